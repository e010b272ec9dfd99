use common_enums::PaymentAction;
use common_utils::{CustomResult, Request};
use domain_types::{
    connector_types::{Outcome, PaymentInstruction, Transaction},
    errors::{ApiClientError, ConnectorError},
    router_response_types::Response,
    types::OgoneAuth,
};
use hyperswitch_masking::Secret;

use crate::api::ConnectorCommon;

/// Supplies the merchant credentials. Implementations may rotate them between calls.
pub trait TokenProvider: Send + Sync {
    fn pspid(&self) -> String;
    fn api_user(&self) -> String;
    fn api_password(&self) -> Secret<String>;
    /// Pass phrase for outgoing signatures.
    fn sha_in(&self) -> Secret<String>;
    /// Pass phrase for incoming signatures.
    fn sha_out(&self) -> Secret<String>;
}

impl TokenProvider for OgoneAuth {
    fn pspid(&self) -> String {
        self.pspid.clone()
    }

    fn api_user(&self) -> String {
        self.api_user.clone()
    }

    fn api_password(&self) -> Secret<String> {
        self.api_password.clone()
    }

    fn sha_in(&self) -> Secret<String> {
        self.sha_in.clone()
    }

    fn sha_out(&self) -> Secret<String> {
        self.sha_out.clone()
    }
}

/// Where gateway answers come from: the network, or a fixture in tests.
///
/// Any received answer is `Ok`, whatever its HTTP status. `Err` means nothing was received.
#[async_trait::async_trait]
pub trait ResponseSource: Send + Sync {
    async fn fetch(&self, request: Request) -> CustomResult<Response, ApiClientError>;
}

/// The transaction lifecycle a payment framework drives a gateway through.
#[async_trait::async_trait]
pub trait PaymentGateway: ConnectorCommon + Send + Sync {
    /// Whether this gateway handles the named payment system.
    fn processes(&self, payment_system_name: &str) -> bool;

    fn check_payment_instruction(
        &self,
        instruction: &PaymentInstruction,
    ) -> CustomResult<(), ConnectorError>;

    async fn approve(&self, transaction: &Transaction) -> CustomResult<Outcome, ConnectorError>;

    async fn deposit(&self, transaction: &Transaction) -> CustomResult<Outcome, ConnectorError>;

    async fn approve_and_deposit(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, ConnectorError>;

    async fn execute(
        &self,
        action: PaymentAction,
        transaction: &Transaction,
    ) -> CustomResult<Outcome, ConnectorError> {
        match action {
            PaymentAction::Approve => self.approve(transaction).await,
            PaymentAction::Deposit => self.deposit(transaction).await,
            PaymentAction::ApproveAndDeposit => self.approve_and_deposit(transaction).await,
        }
    }
}
