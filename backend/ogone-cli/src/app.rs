use std::{path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use common_enums::{GatewayEndpoint, PaymentAction, TransactionState};
use common_utils::{fp_utils, CustomResult, MinorUnit};
use connector_integration::connectors::{
    ogone::{constants, transformers::OgoneParameters},
    Ogone,
};
use domain_types::{
    connector_types::{ExtendedData, PaymentInstruction, Transaction},
    errors::ConnectorError,
};
use error_stack::{report, ResultExt};
use external_services::{FixtureResponseSource, HttpResponseSource};
use interfaces::{
    api::ConnectorCommon,
    connector_types::{PaymentGateway, ResponseSource},
};
use serde_json::{json, Value};

use crate::{configs::Config, error::CliError, logger};

/// Operator tool for the Ogone gateway client.
#[derive(Debug, Parser)]
#[command(name = "ogone-cli", version)]
pub struct Cli {
    /// Configuration file, instead of `config/<environment>.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the SHA-IN signature of `KEY=VALUE` parameters.
    Sign {
        #[arg(value_parser = parse_key_value, required = true)]
        parameters: Vec<(String, String)>,
    },
    /// Verify the SHA-OUT signature of a return query string.
    Verify { query: String },
    /// Print the URL of a gateway page, e.g. `standard_order` or `direct_query`.
    Endpoint { endpoint: GatewayEndpoint },
    /// Build the signed hosted payment page URL of a transaction.
    RedirectUrl(TransactionArgs),
    Approve(OperationArgs),
    Deposit(OperationArgs),
    ApproveAndDeposit(OperationArgs),
    /// Validate a payment instruction before a transaction is created.
    CheckInstruction {
        #[command(flatten)]
        transaction: TransactionArgs,
        #[arg(long, default_value = "ogone_gateway")]
        payment_system: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct TransactionArgs {
    /// Requested amount, in minor units.
    #[arg(long)]
    pub amount: i64,
    #[arg(long, default_value = "EUR")]
    pub currency: String,
    /// Gateway order id of an already redirected transaction.
    #[arg(long)]
    pub order_id: Option<String>,
    /// Extended data, e.g. `--data lang=en_US`.
    #[arg(long = "data", value_parser = parse_key_value)]
    pub extended_data: Vec<(String, String)>,
}

#[derive(Debug, Clone, Args)]
pub struct OperationArgs {
    #[command(flatten)]
    pub transaction: TransactionArgs,
    /// Answer from `<fixtures_dir>/<scenario>.xml` instead of calling the gateway.
    #[arg(long)]
    pub fixture: Option<String>,
}

impl TransactionArgs {
    fn extended_data(&self) -> ExtendedData {
        self.extended_data.iter().cloned().collect()
    }

    pub fn to_transaction(&self) -> Transaction {
        let mut transaction = Transaction::new(MinorUnit::new(self.amount), &self.currency);
        transaction.extended_data = self.extended_data();
        if let Some(order_id) = &self.order_id {
            transaction.tracking_id = Some(order_id.clone());
            transaction.state = TransactionState::Pending;
        }
        transaction
    }

    fn to_instruction(&self, payment_system_name: &str) -> PaymentInstruction {
        PaymentInstruction {
            amount: MinorUnit::new(self.amount),
            currency: self.currency.clone(),
            payment_system_name: payment_system_name.to_string(),
            extended_data: self.extended_data(),
        }
    }
}

fn parse_key_value(argument: &str) -> Result<(String, String), String> {
    argument
        .split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected KEY=VALUE, got `{argument}`"))
}

/// Gateway wired from configuration, answering from `fixture` when one is named.
pub fn build_gateway(config: &Config, fixture: Option<&str>) -> CustomResult<Ogone, CliError> {
    let response_source: Arc<dyn ResponseSource> = match fixture {
        Some(scenario) => {
            let dir = config.connectors.ogone.fixtures_dir.clone().ok_or_else(|| {
                report!(CliError::InvalidArgument(
                    "--fixture needs connectors.ogone.fixtures_dir to be configured".to_string()
                ))
            })?;
            logger::debug!(scenario, dir = %dir.display(), "Answering from fixtures");
            Arc::new(FixtureResponseSource::new(dir, scenario))
        }
        None => Arc::new(HttpResponseSource::new(config.proxy.clone())),
    };

    Ok(Ogone::new(
        config.connectors.ogone.clone(),
        Arc::new(config.auth.clone()),
        response_source,
    )
    .with_redirection(config.redirection.clone())
    .with_design(config.design.clone()))
}

/// Runs one command and returns what to print.
#[logger::instrument(skip_all, fields(command = command.name()))]
pub async fn run(command: Command, config: &Config) -> CustomResult<Value, CliError> {
    match command {
        Command::Sign { parameters } => {
            let gateway = build_gateway(config, None)?;
            let parameters: OgoneParameters = parameters.into_iter().collect();
            let sha_sign = gateway
                .sign(&parameters)
                .change_context(CliError::GatewayFailure)?;
            Ok(json!({
                "algorithm": config.connectors.ogone.hash_algorithm,
                "shasign": sha_sign,
            }))
        }
        Command::Verify { query } => {
            let gateway = build_gateway(config, None)?;
            match gateway.handle_redirect_return(&query) {
                Ok(response) => Ok(json!({
                    "verified": true,
                    "status": response.status().map(|status| status.0),
                    "order_id": response.get(constants::ORDER_ID),
                    "pay_id": response.pay_id(),
                })),
                Err(error) if error.current_context() == &ConnectorError::SignatureMismatch => {
                    logger::warn!(?error, "Return parameters rejected");
                    Ok(json!({ "verified": false }))
                }
                Err(error) => Err(error.change_context(CliError::GatewayFailure)),
            }
        }
        Command::Endpoint { endpoint } => {
            let gateway = build_gateway(config, None)?;
            Ok(json!({
                "endpoint": endpoint,
                "url": gateway.endpoint_url(endpoint),
            }))
        }
        Command::RedirectUrl(arguments) => {
            let gateway = build_gateway(config, None)?;
            let transaction = arguments.to_transaction();
            let order_id = transaction
                .tracking_id
                .clone()
                .unwrap_or_else(|| fp_utils::generate_id_with_default_len(gateway.id()));
            let url = gateway
                .redirect_url(&transaction, &order_id)
                .change_context(CliError::GatewayFailure)?;
            Ok(json!({ "order_id": order_id, "url": url }))
        }
        Command::Approve(arguments) => {
            run_operation(PaymentAction::Approve, arguments, config).await
        }
        Command::Deposit(arguments) => {
            run_operation(PaymentAction::Deposit, arguments, config).await
        }
        Command::ApproveAndDeposit(arguments) => {
            run_operation(PaymentAction::ApproveAndDeposit, arguments, config).await
        }
        Command::CheckInstruction {
            transaction,
            payment_system,
        } => {
            let gateway = build_gateway(config, None)?;
            fp_utils::when(!gateway.processes(&payment_system), || {
                Err(report!(CliError::InvalidArgument(format!(
                    "payment system `{payment_system}` is not handled by this gateway"
                ))))
            })?;
            let instruction = transaction.to_instruction(&payment_system);
            match gateway.check_payment_instruction(&instruction) {
                Ok(()) => Ok(json!({ "valid": true })),
                Err(error) => match error.current_context() {
                    ConnectorError::InvalidPaymentInstruction { field_errors } => Ok(json!({
                        "valid": false,
                        "field_errors": field_errors,
                    })),
                    _ => Err(error.change_context(CliError::GatewayFailure)),
                },
            }
        }
    }
}

async fn run_operation(
    action: PaymentAction,
    arguments: OperationArgs,
    config: &Config,
) -> CustomResult<Value, CliError> {
    let gateway = build_gateway(config, arguments.fixture.as_deref())?;
    let mut transaction = arguments.transaction.to_transaction();

    let outcome = gateway
        .execute(action, &transaction)
        .await
        .change_context(CliError::GatewayFailure)?;
    transaction.apply_outcome(&outcome);
    logger::info!(%action, %outcome, state = %transaction.state, "Operation completed");

    Ok(json!({
        "action": action,
        "message": outcome.to_string(),
        "outcome": outcome,
        "transaction": transaction,
    }))
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sign { .. } => "sign",
            Self::Verify { .. } => "verify",
            Self::Endpoint { .. } => "endpoint",
            Self::RedirectUrl(_) => "redirect-url",
            Self::Approve(_) => "approve",
            Self::Deposit(_) => "deposit",
            Self::ApproveAndDeposit(_) => "approve-and-deposit",
            Self::CheckInstruction { .. } => "check-instruction",
        }
    }
}
