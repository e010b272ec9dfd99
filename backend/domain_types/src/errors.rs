use common_enums::PaymentAction;

#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Server responded with unexpected response")]
    UnexpectedServerResponse,
    #[error("Fixture for scenario '{0}' could not be read")]
    FixtureNotFound(String),
}

/// Errors surfaced by the gateway connector.
///
/// The last five variants mirror the fatal [`crate::connector_types::Outcome`] kinds and carry
/// the exact messages callers show to operators.
#[derive(Debug, thiserror::Error, PartialEq, Clone)]
pub enum ConnectorError {
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("Failed to sign the request parameters")]
    RequestSigningFailed,
    #[error("The payment instruction is invalid.")]
    InvalidPaymentInstruction { field_errors: Vec<FieldError> },
    #[error("The response signature does not match the expected SHA-OUT signature")]
    SignatureMismatch,
    #[error("The API request was not successful (Status: {status_code}): {body}")]
    CommunicationFailure { status_code: u16, body: String },
    #[error("Ogone-Response was not successful: {message}")]
    InvalidGatewayData { message: String },
    #[error("Payment status \"{status}\" is not valid for {}", unmanaged_step_label(.action))]
    UnmanagedStatus { status: u16, action: PaymentAction },
}

/// A single rejected field of a payment instruction, e.g. `data.lang` / `form.error.required`.
#[derive(Debug, PartialEq, Eq, Clone, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

pub(crate) fn unmanaged_step_label(action: &PaymentAction) -> &'static str {
    match action {
        PaymentAction::Approve | PaymentAction::ApproveAndDeposit => "approvment",
        PaymentAction::Deposit => "depositing",
    }
}
