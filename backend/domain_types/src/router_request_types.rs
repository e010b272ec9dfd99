//! Merchant level options forwarded to the hosted payment page.
//!
//! Both option sets can be overridden per payment through the payment's extended data, using
//! the gateway parameter name as key (case does not matter).

use serde::Deserialize;

use crate::connector_types::ExtendedData;

/// Where the hosted payment page sends the customer back to.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Redirection {
    pub accept_url: Option<String>,
    pub decline_url: Option<String>,
    pub exception_url: Option<String>,
    pub cancel_url: Option<String>,
    pub back_url: Option<String>,
}

impl Redirection {
    pub fn request_parameters(&self, extended_data: &ExtendedData) -> Vec<(&'static str, String)> {
        resolve(
            [
                ("ACCEPTURL", &self.accept_url),
                ("DECLINEURL", &self.decline_url),
                ("EXCEPTIONURL", &self.exception_url),
                ("CANCELURL", &self.cancel_url),
                ("BACKURL", &self.back_url),
            ],
            extended_data,
        )
    }
}

/// Look and feel of the hosted payment page.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Design {
    pub title: Option<String>,
    pub bg_color: Option<String>,
    pub txt_color: Option<String>,
    pub tbl_bg_color: Option<String>,
    pub tbl_txt_color: Option<String>,
    pub button_bg_color: Option<String>,
    pub button_txt_color: Option<String>,
    pub font_type: Option<String>,
    pub logo: Option<String>,
    /// Dynamic template URL.
    pub template: Option<String>,
}

impl Design {
    pub fn request_parameters(&self, extended_data: &ExtendedData) -> Vec<(&'static str, String)> {
        resolve(
            [
                ("TITLE", &self.title),
                ("BGCOLOR", &self.bg_color),
                ("TXTCOLOR", &self.txt_color),
                ("TBLBGCOLOR", &self.tbl_bg_color),
                ("TBLTXTCOLOR", &self.tbl_txt_color),
                ("BUTTONBGCOLOR", &self.button_bg_color),
                ("BUTTONTXTCOLOR", &self.button_txt_color),
                ("FONTTYPE", &self.font_type),
                ("LOGO", &self.logo),
                ("TP", &self.template),
            ],
            extended_data,
        )
    }
}

fn resolve<const N: usize>(
    defaults: [(&'static str, &Option<String>); N],
    extended_data: &ExtendedData,
) -> Vec<(&'static str, String)> {
    defaults
        .into_iter()
        .filter_map(|(name, default)| {
            extended_data
                .get_ignore_case(name)
                .map(ToOwned::to_owned)
                .or_else(|| default.clone())
                .filter(|value| !value.is_empty())
                .map(|value| (name, value))
        })
        .collect()
}
