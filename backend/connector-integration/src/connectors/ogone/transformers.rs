use std::{cmp::Ordering, collections::BTreeMap};

use common_enums::{GatewayEndpoint, PaymentAction};
use common_utils::{consts, CustomResult, MinorUnit, StringMajorUnit};
use domain_types::{
    connector_types::{Outcome, Transaction},
    errors,
    router_request_types::{Design, Redirection},
};
use error_stack::report;
use hyperswitch_masking::Secret;
use serde::Serialize;

use super::constants;
use crate::utils::xml_utils;

/// Gateway parameter name. Stored upper-cased, ordered the way the gateway orders names when
/// signing (case-insensitive, lowercase collation).
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParameterName(String);

impl ParameterName {
    fn new(name: &str) -> Self {
        Self(name.to_ascii_uppercase())
    }
}

impl Ord for ParameterName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .to_ascii_lowercase()
            .cmp(&other.0.to_ascii_lowercase())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for ParameterName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A set of gateway parameters, iterated in signing order.
///
/// Names are case-insensitive: `orderID` and `ORDERID` are the same parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OgoneParameters(BTreeMap<ParameterName, String>);

impl OgoneParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, returning the value it replaces.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.0.insert(ParameterName::new(name), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&ParameterName::new(name)).map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(&ParameterName::new(name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every parameter, upper-cased name first, in signing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(name, value)| (name.0.as_str(), value.as_str()))
    }

    /// The parameters that take part in a signature: non-empty values, never `SHASIGN` itself.
    pub fn signed_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(name, value)| !value.is_empty() && *name != constants::SHA_SIGN)
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for OgoneParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut parameters = Self::new();
        for (name, value) in iter {
            parameters.insert(name.as_ref(), value);
        }
        parameters
    }
}

/// `{base}{test|prod}/{page}{_utf8}.asp`
pub fn endpoint_url(base_url: &str, debug: bool, utf8: bool, endpoint: GatewayEndpoint) -> String {
    let environment = if debug {
        constants::TEST_ENVIRONMENT
    } else {
        constants::PRODUCTION_ENVIRONMENT
    };
    let page = match endpoint {
        GatewayEndpoint::StandardOrder => constants::STANDARD_ORDER_PAGE,
        GatewayEndpoint::DirectQuery => constants::DIRECT_QUERY_PAGE,
    };
    let suffix = if utf8 { constants::UTF8_PAGE_SUFFIX } else { "" };

    format!(
        "{}/{environment}/{page}{suffix}{}",
        base_url.trim_end_matches('/'),
        constants::PAGE_EXTENSION
    )
}

/// Parameters sent to the hosted payment page, before signing.
///
/// Later sources win: merchant design and redirection options, then the payment's extended
/// data, then the fields that identify the payment itself.
pub fn build_redirect_parameters(
    pspid: &str,
    transaction: &Transaction,
    order_id: &str,
    redirection: &Redirection,
    design: &Design,
) -> OgoneParameters {
    let extended_data = &transaction.extended_data;
    let mut parameters: OgoneParameters = design
        .request_parameters(extended_data)
        .into_iter()
        .chain(redirection.request_parameters(extended_data))
        .collect();

    for (key, value) in extended_data.iter() {
        let name = if key.eq_ignore_ascii_case(constants::EXTENDED_DATA_LANG) {
            constants::LANGUAGE
        } else {
            key
        };
        parameters.insert(name, value);
    }
    parameters.remove(constants::SHA_SIGN);

    parameters.insert(constants::PSPID, pspid);
    parameters.insert(constants::ORDER_ID, order_id);
    parameters.insert(
        constants::AMOUNT,
        transaction.requested_amount.to_minor_unit_as_string(),
    );
    parameters.insert(constants::CURRENCY, transaction.currency.as_str());
    parameters
}

/// Status lookup posted to the direct query page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct OgoneDirectQueryRequest {
    pub pspid: String,
    pub userid: String,
    pub pswd: Secret<String>,
    pub orderid: String,
}

/// An answer of the gateway: the attributes of a direct query `<ncresponse/>`, or the query
/// string the customer is sent back with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OgoneResponse {
    parameters: OgoneParameters,
    sha_sign: Option<String>,
}

impl OgoneResponse {
    pub fn from_pairs<K: AsRef<str>, V: Into<String>>(
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        let mut parameters: OgoneParameters = pairs.into_iter().collect();
        let sha_sign = parameters.remove(constants::SHA_SIGN);
        Self {
            parameters,
            sha_sign,
        }
    }

    /// Parses a raw gateway body: XML when it looks like markup, `KEY=VALUE` pairs otherwise.
    pub fn parse(body: &[u8]) -> CustomResult<Self, errors::ConnectorError> {
        let text = xml_utils::decode_response_text(body);
        let text = text.trim();
        if text.starts_with('<') {
            Self::from_xml(text)
        } else {
            Self::from_query(text)
        }
    }

    pub fn from_xml(xml: &str) -> CustomResult<Self, errors::ConnectorError> {
        xml_utils::parse_root_attributes(xml).map(Self::from_pairs)
    }

    /// Accepts both `a=1&b=2` and one `KEY=VALUE` per line.
    pub fn from_query(text: &str) -> CustomResult<Self, errors::ConnectorError> {
        let pairs: Vec<(String, String)> = if text.contains('&') || !text.contains('\n') {
            serde_urlencoded::from_str(text.trim_start_matches('?'))
                .map_err(|_| report!(errors::ConnectorError::ResponseDeserializationFailed))?
        } else {
            text.lines()
                .filter_map(|line| line.split_once('='))
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .collect()
        };

        if pairs.is_empty() {
            return Err(report!(errors::ConnectorError::ResponseDeserializationFailed));
        }
        Ok(Self::from_pairs(pairs))
    }

    pub fn parameters(&self) -> &OgoneParameters {
        &self.parameters
    }

    pub fn sha_sign(&self) -> Option<&str> {
        self.sha_sign.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.parameters.get(name)
    }

    pub fn status(&self) -> Option<OgoneStatus> {
        self.get(constants::STATUS)
            .and_then(|status| status.trim().parse().ok())
            .map(OgoneStatus)
    }

    /// `NCERROR`, `"0"` when absent.
    pub fn error_code(&self) -> &str {
        self.get(constants::NC_ERROR)
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .unwrap_or(constants::NO_ERROR)
    }

    pub fn error_message(&self) -> &str {
        self.get(constants::NC_ERROR_PLUS)
            .filter(|message| !message.is_empty() && *message != constants::NO_ERROR_DESCRIPTION)
            .unwrap_or(consts::NO_ERROR_MESSAGE)
    }

    pub fn pay_id(&self) -> Option<String> {
        self.get(constants::PAY_ID)
            .filter(|pay_id| !pay_id.is_empty())
            .map(ToOwned::to_owned)
    }

    pub fn amount(&self) -> Option<StringMajorUnit> {
        self.get(constants::RESPONSE_AMOUNT)
            .filter(|amount| !amount.is_empty())
            .map(|amount| StringMajorUnit::new(amount.trim().to_string()))
    }

    /// No gateway error and a real status.
    pub fn is_successful(&self) -> bool {
        self.error_code() == constants::NO_ERROR
            && self
                .status()
                .is_some_and(|status| status.0 != constants::INCOMPLETE_OR_INVALID)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OgoneStatus(pub u16);

impl OgoneStatus {
    pub fn is_approved(self) -> bool {
        constants::APPROVED_STATUSES.contains(&self.0)
    }

    pub fn is_approving(self) -> bool {
        constants::APPROVING_STATUSES.contains(&self.0)
    }

    pub fn is_deposited(self) -> bool {
        constants::DEPOSITED_STATUSES.contains(&self.0)
    }

    pub fn is_depositing(self) -> bool {
        constants::DEPOSITING_STATUSES.contains(&self.0)
    }
}

/// Maps a parsed gateway answer onto the outcome of `action`.
///
/// Approve-and-deposit runs the approve mapping first and only looks at deposit codes once
/// the payment is approved.
pub fn interpret(
    action: PaymentAction,
    response: &OgoneResponse,
    requested_amount: MinorUnit,
) -> Outcome {
    let status = match response.status() {
        Some(status) if response.is_successful() => status,
        _ => {
            return Outcome::InvalidData {
                message: response.error_message().to_string(),
                error_code: response.error_code().to_string(),
                status: response.status().map(|status| status.0),
            }
        }
    };

    match action {
        PaymentAction::Approve => approve_step(status, response, requested_amount),
        PaymentAction::Deposit => deposit_step(status, response, requested_amount),
        PaymentAction::ApproveAndDeposit => {
            match approve_step(status, response, requested_amount) {
                Outcome::Approved { .. } => deposit_step(status, response, requested_amount),
                outcome => outcome,
            }
        }
    }
}

fn approve_step(status: OgoneStatus, response: &OgoneResponse, requested: MinorUnit) -> Outcome {
    if status.is_approving() {
        Outcome::Approving { status: status.0 }
    } else if status.is_approved() {
        Outcome::Approved {
            amount: processed_amount(response, requested),
            pay_id: response.pay_id(),
        }
    } else {
        unmanaged(status, PaymentAction::Approve, response)
    }
}

fn deposit_step(status: OgoneStatus, response: &OgoneResponse, requested: MinorUnit) -> Outcome {
    if status.is_depositing() {
        Outcome::Depositing { status: status.0 }
    } else if status.is_deposited() {
        Outcome::Deposited {
            amount: processed_amount(response, requested),
            pay_id: response.pay_id(),
        }
    } else {
        unmanaged(status, PaymentAction::Deposit, response)
    }
}

fn unmanaged(status: OgoneStatus, action: PaymentAction, response: &OgoneResponse) -> Outcome {
    Outcome::UnmanagedStatus {
        status: status.0,
        action,
        error_code: response.error_code().to_string(),
    }
}

/// The amount the gateway reports, or the requested one when it reports none we can read.
fn processed_amount(response: &OgoneResponse, requested: MinorUnit) -> MinorUnit {
    let Some(amount) = response.amount() else {
        tracing::warn!(
            requested = %requested,
            "Gateway response carries no amount, using the requested amount"
        );
        return requested;
    };

    match amount.to_minor_unit_as_i64(constants::AMOUNT_EXPONENT) {
        Ok(amount) => amount,
        Err(error) => {
            tracing::warn!(
                amount = %amount.get_amount_as_string(),
                requested = %requested,
                ?error,
                "Gateway amount could not be converted, using the requested amount"
            );
            requested
        }
    }
}
