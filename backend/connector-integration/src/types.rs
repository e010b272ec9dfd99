/// Payment systems served by this crate, keyed by the name payment instructions carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum ConnectorEnum {
    #[strum(serialize = "ogone_gateway")]
    Ogone,
}

impl ConnectorEnum {
    /// Resolves a payment system name. Unknown names are not an error, just not ours.
    pub fn from_payment_system_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }
}
