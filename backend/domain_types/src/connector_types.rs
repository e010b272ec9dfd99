use std::collections::BTreeMap;

use common_enums::{PaymentAction, TransactionState};
use common_utils::{consts, MinorUnit};
use error_stack::report;
use serde::{Deserialize, Serialize};

use crate::errors::{self, ConnectorError};

/// Free-form key/value data a merchant attaches to a payment, e.g. `lang` or `CN`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtendedData(BTreeMap<String, String>);

impl ExtendedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Looks a key up regardless of its case, preferring an exact match.
    pub fn get_ignore_case(&self, key: &str) -> Option<&str> {
        self.get(key).or_else(|| {
            self.0
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(key))
                .map(|(_, value)| value.as_str())
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtendedData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// What the merchant asked to be paid, before any transaction exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInstruction {
    pub amount: MinorUnit,
    pub currency: String,
    pub payment_system_name: String,
    #[serde(default)]
    pub extended_data: ExtendedData,
}

/// A financial transaction as seen by the gateway for the duration of one call.
///
/// The gateway never mutates it; callers fold the returned [`Outcome`] into their own copy
/// with [`Transaction::apply_outcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Gateway `ORDERID`. Assigned when the customer is first redirected.
    pub tracking_id: Option<String>,
    pub requested_amount: MinorUnit,
    pub currency: String,
    #[serde(default)]
    pub extended_data: ExtendedData,
    #[serde(default)]
    pub state: TransactionState,
    pub processed_amount: Option<MinorUnit>,
    pub response_code: Option<String>,
    pub reason_code: Option<String>,
}

impl Transaction {
    pub fn new(requested_amount: MinorUnit, currency: impl Into<String>) -> Self {
        Self {
            tracking_id: None,
            requested_amount,
            currency: currency.into(),
            extended_data: ExtendedData::new(),
            state: TransactionState::New,
            processed_amount: None,
            response_code: None,
            reason_code: None,
        }
    }

    pub fn from_instruction(instruction: &PaymentInstruction) -> Self {
        Self {
            extended_data: instruction.extended_data.clone(),
            ..Self::new(instruction.amount, instruction.currency.clone())
        }
    }

    pub fn get_tracking_id(&self) -> Result<&str, error_stack::Report<ConnectorError>> {
        self.tracking_id.as_deref().ok_or_else(|| {
            report!(ConnectorError::MissingRequiredField {
                field_name: "tracking_id"
            })
        })
    }

    /// Records the effect of a gateway interaction.
    ///
    /// Pending outcomes and communication failures leave the transaction untouched.
    pub fn apply_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::RequiresAction { order_id, .. } => {
                self.tracking_id = Some(order_id.clone());
                self.state = TransactionState::Pending;
                self.response_code = Some(consts::RESPONSE_CODE_PENDING.to_string());
                self.reason_code = Some(consts::REASON_CODE_ACTION_REQUIRED.to_string());
            }
            Outcome::Approved { amount, .. } | Outcome::Deposited { amount, .. } => {
                self.processed_amount = Some(*amount);
                self.state = TransactionState::Success;
                self.response_code = Some(consts::RESPONSE_CODE_SUCCESS.to_string());
                self.reason_code = Some(consts::REASON_CODE_SUCCESS.to_string());
            }
            Outcome::InvalidData {
                error_code, status, ..
            } => {
                self.state = TransactionState::Failed;
                self.response_code = Some(error_code.clone());
                self.reason_code = Some(
                    status
                        .map(|status| status.to_string())
                        .unwrap_or_else(|| consts::REASON_CODE_INVALID.to_string()),
                );
            }
            Outcome::UnmanagedStatus {
                status, error_code, ..
            } => {
                self.state = TransactionState::Failed;
                self.response_code = Some(error_code.clone());
                self.reason_code = Some(status.to_string());
            }
            Outcome::Approving { .. }
            | Outcome::Depositing { .. }
            | Outcome::CommunicationFailure { .. } => {}
        }
    }
}

/// The interpreted effect of one gateway interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The customer has to visit `url` before anything else can happen.
    RequiresAction { url: String, order_id: String },
    /// Authorisation is still running at the gateway.
    Approving { status: u16 },
    Approved {
        amount: MinorUnit,
        pay_id: Option<String>,
    },
    /// Capture is still running at the gateway.
    Depositing { status: u16 },
    Deposited {
        amount: MinorUnit,
        pay_id: Option<String>,
    },
    /// The gateway answered, but declined or rejected the data.
    InvalidData {
        message: String,
        error_code: String,
        status: Option<u16>,
    },
    UnmanagedStatus {
        status: u16,
        action: PaymentAction,
        error_code: String,
    },
    /// No usable answer: transport error body or non-2xx status.
    CommunicationFailure { status_code: u16, body: String },
}

impl Outcome {
    /// Non-terminal: the caller polls again later.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            Self::RequiresAction { .. } | Self::Approving { .. } | Self::Depositing { .. }
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Approved { .. } | Self::Deposited { .. })
    }

    /// Fatal kinds, never retried by the connector.
    pub fn is_failure(&self) -> bool {
        !self.is_pending() && !self.is_success()
    }

    /// Moves fatal kinds to the error channel so `?` can propagate them.
    pub fn into_result(self) -> Result<Self, error_stack::Report<ConnectorError>> {
        match self {
            Self::InvalidData { message, .. } => {
                Err(report!(ConnectorError::InvalidGatewayData { message }))
            }
            Self::UnmanagedStatus { status, action, .. } => {
                Err(report!(ConnectorError::UnmanagedStatus { status, action }))
            }
            Self::CommunicationFailure { status_code, body } => {
                Err(report!(ConnectorError::CommunicationFailure { status_code, body }))
            }
            outcome => Ok(outcome),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiresAction { .. } => f.write_str("User must authorize the transaction"),
            Self::Approving { status } => {
                write!(f, "Payment is still approving, status: {status}.")
            }
            Self::Depositing { status } => {
                write!(f, "Payment is still pending, status: {status}.")
            }
            Self::Approved { amount, .. } => write!(f, "Payment approved, amount: {amount}"),
            Self::Deposited { amount, .. } => write!(f, "Payment deposited, amount: {amount}"),
            Self::InvalidData { message, .. } => {
                write!(f, "Ogone-Response was not successful: {message}")
            }
            Self::UnmanagedStatus { status, action, .. } => write!(
                f,
                "Payment status \"{status}\" is not valid for {}",
                errors::unmanaged_step_label(action)
            ),
            Self::CommunicationFailure { status_code, body } => write!(
                f,
                "The API request was not successful (Status: {status_code}): {body}"
            ),
        }
    }
}
