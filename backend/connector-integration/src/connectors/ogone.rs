pub mod test;

pub mod constants;
pub mod signature;
pub mod transformers;

use std::sync::Arc;

use common_enums::{GatewayEndpoint, PaymentAction, TransactionState};
use common_utils::{
    crypto, fp_utils, request::RequestContent, CustomResult, Method, Request, RequestBuilder,
};
use domain_types::{
    connector_types::{Outcome, PaymentInstruction, Transaction},
    errors::{self, FieldError},
    router_request_types::{Design, Redirection},
    types::OgoneConnectorParams,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::ExposeInterface;
use interfaces::{
    api::ConnectorCommon,
    connector_types::{PaymentGateway, ResponseSource, TokenProvider},
    verification::SourceVerification,
};
use signature::ShaSignature;
use transformers::{self as ogone, OgoneDirectQueryRequest, OgoneParameters, OgoneResponse};

use crate::types::ConnectorEnum;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
}

/// Ogone (Ingenico ePayments) hosted payment page and direct query client.
///
/// New transactions are sent to the hosted page; every later call asks the direct query
/// page for the current status of the order and interprets it.
#[derive(Clone)]
pub struct Ogone {
    params: OgoneConnectorParams,
    token_provider: Arc<dyn TokenProvider>,
    response_source: Arc<dyn ResponseSource>,
    redirection: Redirection,
    design: Design,
}

impl std::fmt::Debug for Ogone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ogone")
            .field("params", &self.params)
            .field("redirection", &self.redirection)
            .field("design", &self.design)
            .finish_non_exhaustive()
    }
}

impl Ogone {
    pub fn new(
        params: OgoneConnectorParams,
        token_provider: Arc<dyn TokenProvider>,
        response_source: Arc<dyn ResponseSource>,
    ) -> Self {
        Self {
            params,
            token_provider,
            response_source,
            redirection: Redirection::default(),
            design: Design::default(),
        }
    }

    pub fn with_redirection(mut self, redirection: Redirection) -> Self {
        self.redirection = redirection;
        self
    }

    pub fn with_design(mut self, design: Design) -> Self {
        self.design = design;
        self
    }

    pub fn endpoint_url(&self, endpoint: GatewayEndpoint) -> String {
        ogone::endpoint_url(
            &self.params.base_url,
            self.params.debug,
            self.params.utf8,
            endpoint,
        )
    }

    pub fn standard_order_url(&self) -> String {
        self.endpoint_url(GatewayEndpoint::StandardOrder)
    }

    pub fn direct_query_url(&self) -> String {
        self.endpoint_url(GatewayEndpoint::DirectQuery)
    }

    /// SHA-IN signature of outgoing parameters.
    pub fn sign(
        &self,
        parameters: &OgoneParameters,
    ) -> CustomResult<ShaSignature, errors::ConnectorError> {
        signature::generate(
            parameters,
            &self.token_provider.sha_in(),
            self.params.hash_algorithm,
        )
    }

    /// Hosted payment page URL for `transaction`, signed, under the given order id.
    pub fn redirect_url(
        &self,
        transaction: &Transaction,
        order_id: &str,
    ) -> CustomResult<String, errors::ConnectorError> {
        let parameters = ogone::build_redirect_parameters(
            &self.token_provider.pspid(),
            transaction,
            order_id,
            &self.redirection,
            &self.design,
        );
        let sha_sign = self.sign(&parameters)?;

        let mut url = url::Url::parse(&self.standard_order_url())
            .change_context(errors::ConnectorError::RequestEncodingFailed)?;
        url.query_pairs_mut()
            .extend_pairs(parameters.signed_pairs())
            .append_pair(constants::SHA_SIGN, sha_sign.as_str());
        Ok(url.into())
    }

    /// Verifies and parses the parameters the customer is sent back with.
    ///
    /// Unlike direct query answers, these travel through the browser, so an unsigned return is
    /// rejected.
    pub fn handle_redirect_return(
        &self,
        query: &str,
    ) -> CustomResult<OgoneResponse, errors::ConnectorError> {
        let response = OgoneResponse::from_query(query)?;
        fp_utils::when(response.sha_sign().is_none(), || {
            tracing::warn!("Redirect return without SHASIGN");
            Err(report!(errors::ConnectorError::SignatureMismatch))
        })?;
        self.authenticate(&response)?;
        Ok(response)
    }

    /// Outcome of `action` as described by an already received gateway answer.
    pub fn interpret(
        &self,
        action: PaymentAction,
        response: &OgoneResponse,
        transaction: &Transaction,
    ) -> Outcome {
        ogone::interpret(action, response, transaction.requested_amount)
    }

    fn authenticate(&self, response: &OgoneResponse) -> CustomResult<(), errors::ConnectorError> {
        let verified = self.verify(response)?;
        fp_utils::when(!verified, || {
            tracing::error!(
                order_id = response.get(constants::ORDER_ID),
                "SHA-OUT signature mismatch"
            );
            Err(report!(errors::ConnectorError::SignatureMismatch))
        })
    }

    fn request_customer_action(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, errors::ConnectorError> {
        let order_id = transaction.tracking_id.clone().unwrap_or_else(|| {
            fp_utils::generate_id_with_default_len(self.id())
        });
        let url = self.redirect_url(transaction, &order_id)?;
        tracing::info!(%order_id, "Customer must authorize the transaction on the hosted page");
        Ok(Outcome::RequiresAction { url, order_id })
    }

    fn build_direct_query_request(
        &self,
        order_id: &str,
    ) -> CustomResult<Request, errors::ConnectorError> {
        let request = OgoneDirectQueryRequest {
            pspid: self.token_provider.pspid(),
            userid: self.token_provider.api_user(),
            pswd: self.token_provider.api_password(),
            orderid: order_id.to_string(),
        };
        Ok(RequestBuilder::new()
            .method(Method::Post)
            .url(&self.direct_query_url())
            .attach_default_headers()
            .header(headers::CONTENT_TYPE, self.common_get_content_type())
            .set_body(RequestContent::FormUrlEncoded(Box::new(request)))
            .build())
    }

    /// Asks the gateway for the order's status.
    ///
    /// `Err(outcome)` carries a communication failure: nothing usable came back.
    async fn query_status(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<Result<OgoneResponse, Outcome>, errors::ConnectorError> {
        let order_id = transaction.get_tracking_id()?;
        let request = self.build_direct_query_request(order_id)?;

        let response = match self.response_source.fetch(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(?error, order_id, "Direct query was not answered");
                return Ok(Err(Outcome::CommunicationFailure {
                    status_code: 0,
                    body: error.current_context().to_string(),
                }));
            }
        };

        if !response.is_success() {
            tracing::warn!(
                status_code = response.status_code,
                order_id,
                "Direct query answered with an error status"
            );
            return Ok(Err(Outcome::CommunicationFailure {
                status_code: response.status_code,
                body: response.body_as_text(),
            }));
        }

        let parsed = OgoneResponse::parse(&response.response)?;
        if parsed.sha_sign().is_some() {
            self.authenticate(&parsed)?;
        }
        Ok(Ok(parsed))
    }

    async fn process(
        &self,
        action: PaymentAction,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, errors::ConnectorError> {
        if transaction.state == TransactionState::New {
            return self.request_customer_action(transaction);
        }

        let outcome = match self.query_status(transaction).await? {
            Ok(response) => self.interpret(action, &response, transaction),
            Err(failure) => failure,
        };
        tracing::info!(
            %action,
            order_id = transaction.tracking_id.as_deref(),
            %outcome,
            "Gateway status interpreted"
        );
        Ok(outcome)
    }
}

impl ConnectorCommon for Ogone {
    fn id(&self) -> &'static str {
        "ogone"
    }
}

#[async_trait::async_trait]
impl PaymentGateway for Ogone {
    fn processes(&self, payment_system_name: &str) -> bool {
        ConnectorEnum::from_payment_system_name(payment_system_name) == Some(ConnectorEnum::Ogone)
    }

    fn check_payment_instruction(
        &self,
        instruction: &PaymentInstruction,
    ) -> CustomResult<(), errors::ConnectorError> {
        let mut field_errors = Vec::new();
        if instruction
            .extended_data
            .get_ignore_case(constants::EXTENDED_DATA_LANG)
            .is_none()
        {
            field_errors.push(FieldError {
                field: "data.lang".to_string(),
                message: "form.error.required".to_string(),
            });
        }

        fp_utils::when(!field_errors.is_empty(), || {
            Err(report!(errors::ConnectorError::InvalidPaymentInstruction {
                field_errors
            }))
        })
    }

    async fn approve(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, errors::ConnectorError> {
        self.process(PaymentAction::Approve, transaction).await
    }

    async fn deposit(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, errors::ConnectorError> {
        self.process(PaymentAction::Deposit, transaction).await
    }

    async fn approve_and_deposit(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, errors::ConnectorError> {
        self.process(PaymentAction::ApproveAndDeposit, transaction)
            .await
    }
}

impl SourceVerification<OgoneResponse> for Ogone {
    fn get_secrets(&self) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        Ok(self.token_provider.sha_out().expose().into_bytes())
    }

    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, errors::ConnectorError> {
        Ok(Box::new(self.params.hash_algorithm))
    }

    fn get_signature(
        &self,
        payload: &OgoneResponse,
        _secrets: &[u8],
    ) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        payload
            .sha_sign()
            .map(|sha_sign| sha_sign.as_bytes().to_vec())
            .ok_or_else(crate::utils::missing_field_err("SHASIGN"))
    }

    fn get_message(
        &self,
        payload: &OgoneResponse,
        secrets: &[u8],
    ) -> CustomResult<Vec<u8>, errors::ConnectorError> {
        let pass_phrase = std::str::from_utf8(secrets)
            .change_context(errors::ConnectorError::SignatureMismatch)?;
        Ok(signature::signing_string(payload.parameters(), pass_phrase).into_bytes())
    }
}
