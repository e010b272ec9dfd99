#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

    use std::sync::{Arc, Mutex};

    use bytes::Bytes;
    use common_enums::{GatewayEndpoint, HashAlgorithm, PaymentAction, TransactionState};
    use common_utils::{CustomResult, MinorUnit, Request};
    use domain_types::{
        connector_types::{ExtendedData, Outcome, PaymentInstruction, Transaction},
        errors::{ApiClientError, ConnectorError, FieldError},
        router_request_types::{Design, Redirection},
        router_response_types::Response,
        types::{OgoneAuth, OgoneConnectorParams},
    };
    use error_stack::report;
    use hyperswitch_masking::{ExposeInterface, Secret};
    use interfaces::{
        api::ConnectorCommon,
        connector_types::{PaymentGateway, ResponseSource},
    };

    use crate::connectors::{
        ogone::{
            constants, signature,
            transformers::{self, OgoneParameters, OgoneResponse},
        },
        Ogone,
    };

    const DEPOSITED_XML: &str = r#"<?xml version="1.0"?>
<ncresponse orderID="ord_42" PAYID="3014" NCERROR="0" NCERRORPLUS="!" STATUS="9" amount="42" currency="EUR" BRAND="VISA"/>"#;

    /// Answers every request with the same status and body, and remembers what it was asked.
    struct StubSource {
        status_code: u16,
        body: &'static str,
        requests: Mutex<Vec<(String, String)>>,
    }

    impl StubSource {
        fn new(status_code: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status_code,
                body,
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<(String, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ResponseSource for StubSource {
        async fn fetch(&self, request: Request) -> CustomResult<Response, ApiClientError> {
            let body = request
                .body
                .as_ref()
                .map(|body| body.get_inner_value().expose())
                .unwrap_or_default();
            self.requests.lock().unwrap().push((request.url, body));
            Ok(Response {
                headers: None,
                response: Bytes::from_static(self.body.as_bytes()),
                status_code: self.status_code,
            })
        }
    }

    struct UnreachableSource;

    #[async_trait::async_trait]
    impl ResponseSource for UnreachableSource {
        async fn fetch(&self, _request: Request) -> CustomResult<Response, ApiClientError> {
            Err(report!(ApiClientError::RequestNotSent(
                "connection refused".to_string()
            )))
        }
    }

    fn auth() -> Arc<OgoneAuth> {
        Arc::new(OgoneAuth {
            pspid: "foobar".to_string(),
            api_user: "api_user".to_string(),
            api_password: Secret::new("api_password".to_string()),
            sha_in: Secret::new("sha-in-secret".to_string()),
            sha_out: Secret::new("out-secret".to_string()),
        })
    }

    fn params(debug: bool, utf8: bool) -> OgoneConnectorParams {
        OgoneConnectorParams {
            debug,
            utf8,
            ..OgoneConnectorParams::default()
        }
    }

    fn connector(source: Arc<dyn ResponseSource>) -> Ogone {
        Ogone::new(params(true, false), auth(), source)
    }

    fn new_transaction() -> Transaction {
        let mut transaction = Transaction::new(MinorUnit::new(4200), "EUR");
        transaction.extended_data = [("lang", "en_US"), ("CN", "Foo Bar")]
            .into_iter()
            .collect();
        transaction
    }

    fn pending_transaction() -> Transaction {
        let mut transaction = new_transaction();
        transaction.tracking_id = Some("ord_42".to_string());
        transaction.state = TransactionState::Pending;
        transaction
    }

    fn response(pairs: &[(&str, &str)]) -> OgoneResponse {
        OgoneResponse::from_pairs(pairs.iter().copied())
    }

    fn query_value(url: &url::Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    // ===== SIGNATURES =====

    #[test]
    fn test_signature_matches_reference_vectors() {
        let parameters: OgoneParameters = [
            ("AMOUNT", "1500"),
            ("CURRENCY", "EUR"),
            ("LANGUAGE", "en_US"),
            ("ORDERID", "1234"),
            ("PSPID", "MyPSPID"),
        ]
        .into_iter()
        .collect();
        let pass_phrase = Secret::new("Mysecretsig1875!?".to_string());

        let expected = [
            (
                HashAlgorithm::Sha1,
                "f4cc376cd7a834d997b91598fa747825a238be0a",
            ),
            (
                HashAlgorithm::Sha256,
                "e019359baa3456ae5a986b6aabd22cf1b3e09438739e97f17a7f61df5a11b30f",
            ),
            (
                HashAlgorithm::Sha512,
                "d1cfe8833a297d0922e908b2b44934b09ee966ef1584dc0d696304e07bb58ba7\
                 1973c2383c831d878d8a243bb7d7dfffbe53cee21955cdfef44fe82e551f859d",
            ),
        ];
        for (algorithm, digest) in expected {
            let signature = signature::generate(&parameters, &pass_phrase, algorithm).unwrap();
            assert_eq!(signature.as_str(), digest, "{algorithm}");
        }
    }

    #[test]
    fn test_signature_ignores_insertion_order_name_case_and_empty_values() {
        let pass_phrase = Secret::new("Mysecretsig1875!?".to_string());
        let ordered: OgoneParameters = [
            ("AMOUNT", "1500"),
            ("CURRENCY", "EUR"),
            ("LANGUAGE", "en_US"),
            ("ORDERID", "1234"),
            ("PSPID", "MyPSPID"),
        ]
        .into_iter()
        .collect();
        let shuffled: OgoneParameters = [
            ("pspid", "MyPSPID"),
            ("CN", ""),
            ("orderID", "1234"),
            ("Currency", "EUR"),
            ("amount", "1500"),
            ("language", "en_US"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            signature::signing_string(&ordered, "Mysecretsig1875!?"),
            signature::signing_string(&shuffled, "Mysecretsig1875!?")
        );
        assert_eq!(
            signature::generate(&ordered, &pass_phrase, HashAlgorithm::Sha1).unwrap(),
            signature::generate(&shuffled, &pass_phrase, HashAlgorithm::Sha1).unwrap()
        );
    }

    #[test]
    fn test_signing_order_is_case_insensitive_lowercase_collation() {
        let parameters: OgoneParameters = [("ITEMID", "a"), ("item_id", "b")].into_iter().collect();
        assert_eq!(
            signature::signing_string(&parameters, "k"),
            "ITEM_ID=bkITEMID=ak"
        );
    }

    #[test]
    fn test_signature_round_trip_and_single_value_mutation() {
        let pass_phrase = Secret::new("out-secret".to_string());
        let parameters: OgoneParameters = [
            ("orderID", "ord_42"),
            ("PAYID", "3014"),
            ("STATUS", "9"),
            ("NCERROR", "0"),
            ("amount", "42"),
            ("currency", "EUR"),
        ]
        .into_iter()
        .collect();
        let sha_sign = signature::generate(&parameters, &pass_phrase, HashAlgorithm::Sha1)
            .unwrap()
            .to_string();

        assert!(
            signature::verify(&parameters, &sha_sign, &pass_phrase, HashAlgorithm::Sha1).unwrap()
        );
        assert!(signature::verify(
            &parameters,
            &sha_sign.to_uppercase(),
            &pass_phrase,
            HashAlgorithm::Sha1
        )
        .unwrap());

        for (name, value) in parameters.iter() {
            let mut tampered = parameters.clone();
            tampered.insert(name, format!("{value}0"));
            assert!(
                !signature::verify(&tampered, &sha_sign, &pass_phrase, HashAlgorithm::Sha1)
                    .unwrap(),
                "mutating {name} must break the signature"
            );
        }
    }

    // ===== ENDPOINTS =====

    #[test]
    fn test_endpoint_table() {
        let cases = [
            (true, false, "test/orderstandard.asp", "test/querydirect.asp"),
            (true, true, "test/orderstandard_utf8.asp", "test/querydirect_utf8.asp"),
            (false, false, "prod/orderstandard.asp", "prod/querydirect.asp"),
            (false, true, "prod/orderstandard_utf8.asp", "prod/querydirect_utf8.asp"),
        ];
        for (debug, utf8, standard_order, direct_query) in cases {
            let ogone = Ogone::new(params(debug, utf8), auth(), Arc::new(UnreachableSource));
            assert_eq!(
                ogone.standard_order_url(),
                format!("https://secure.ogone.com/ncol/{standard_order}")
            );
            assert_eq!(
                ogone.endpoint_url(GatewayEndpoint::DirectQuery),
                format!("https://secure.ogone.com/ncol/{direct_query}")
            );
        }
    }

    #[test]
    fn test_endpoint_base_url_without_trailing_slash() {
        assert_eq!(
            transformers::endpoint_url(
                "https://ogone.test/ncol",
                false,
                false,
                GatewayEndpoint::DirectQuery
            ),
            "https://ogone.test/ncol/prod/querydirect.asp"
        );
    }

    #[test]
    fn test_endpoints_follow_configured_base_url() {
        let params = OgoneConnectorParams {
            base_url: "https://ogone.example/ncol/".to_string(),
            debug: true,
            ..OgoneConnectorParams::default()
        };
        let ogone = Ogone::new(params, auth(), Arc::new(UnreachableSource));

        assert_eq!(ogone.id(), "ogone");
        assert_eq!(
            ogone.standard_order_url(),
            "https://ogone.example/ncol/test/orderstandard.asp"
        );
        assert_eq!(
            ogone.direct_query_url(),
            "https://ogone.example/ncol/test/querydirect.asp"
        );
    }

    // ===== NEW TRANSACTIONS =====

    #[tokio::test]
    async fn test_new_transaction_requires_customer_action() {
        let source = StubSource::new(200, DEPOSITED_XML);
        let ogone = connector(source.clone());

        let outcome = ogone.approve(&new_transaction()).await.unwrap();
        let Outcome::RequiresAction { url, order_id } = &outcome else {
            panic!("expected a redirect, got {outcome:?}");
        };

        assert!(source.requests().is_empty());
        assert!(order_id.starts_with("ogone_"));
        assert_eq!(outcome.to_string(), "User must authorize the transaction");
        let expected_prefix = format!(
            "https://secure.ogone.com/ncol/test/orderstandard.asp?AMOUNT=4200&CN=Foo+Bar\
             &CURRENCY=EUR&LANGUAGE=en_US&ORDERID={order_id}&PSPID=foobar&SHASIGN="
        );
        assert!(url.starts_with(&expected_prefix), "{url}");
    }

    #[tokio::test]
    async fn test_redirect_url_is_signed_with_sha_in() {
        let ogone = connector(Arc::new(UnreachableSource));
        let transaction = new_transaction();
        let url = url::Url::parse(&ogone.redirect_url(&transaction, "ord_7").unwrap()).unwrap();

        let sha_sign = query_value(&url, "SHASIGN").unwrap();
        let signed: OgoneParameters = url
            .query_pairs()
            .filter(|(key, _)| key != "SHASIGN")
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        assert!(signature::verify(
            &signed,
            &sha_sign,
            &Secret::new("sha-in-secret".to_string()),
            HashAlgorithm::Sha1
        )
        .unwrap());
        assert_eq!(url.query_pairs().last().unwrap().0, "SHASIGN");
    }

    #[test]
    fn test_redirect_parameters_precedence() {
        let ogone = connector(Arc::new(UnreachableSource))
            .with_redirection(Redirection {
                accept_url: Some("https://shop.test/accept".to_string()),
                decline_url: Some(String::new()),
                ..Redirection::default()
            })
            .with_design(Design {
                title: Some("Shop".to_string()),
                ..Design::default()
            });
        let mut transaction = new_transaction();
        transaction.extended_data.set("Title", "Checkout");
        transaction.extended_data.set("pspid", "intruder");
        transaction.extended_data.set("amount", "1");
        transaction.extended_data.set("shasign", "forged");

        let url = url::Url::parse(&ogone.redirect_url(&transaction, "ord_7").unwrap()).unwrap();

        assert_eq!(query_value(&url, "TITLE").as_deref(), Some("Checkout"));
        assert_eq!(
            query_value(&url, "ACCEPTURL").as_deref(),
            Some("https://shop.test/accept")
        );
        assert_eq!(query_value(&url, "DECLINEURL"), None);
        assert_eq!(query_value(&url, "PSPID").as_deref(), Some("foobar"));
        assert_eq!(query_value(&url, "AMOUNT").as_deref(), Some("4200"));
        assert_eq!(query_value(&url, "ORDERID").as_deref(), Some("ord_7"));
        assert_ne!(query_value(&url, "SHASIGN").as_deref(), Some("forged"));
    }

    // ===== STATUS INTERPRETATION =====

    #[test]
    fn test_pending_statuses() {
        let approving = transformers::interpret(
            PaymentAction::Approve,
            &response(&[("STATUS", "51"), ("NCERROR", "0")]),
            MinorUnit::new(4200),
        );
        assert_eq!(approving, Outcome::Approving { status: 51 });
        assert_eq!(
            approving.to_string(),
            "Payment is still approving, status: 51."
        );

        let depositing = transformers::interpret(
            PaymentAction::Deposit,
            &response(&[("STATUS", "91"), ("NCERROR", "0")]),
            MinorUnit::new(4200),
        );
        assert_eq!(depositing, Outcome::Depositing { status: 91 });
        assert_eq!(
            depositing.to_string(),
            "Payment is still pending, status: 91."
        );
    }

    #[test]
    fn test_status_table_under_every_action() {
        let requested = MinorUnit::new(4200);
        let codes = constants::APPROVED_STATUSES
            .into_iter()
            .chain(constants::APPROVING_STATUSES)
            .chain(constants::DEPOSITED_STATUSES)
            .chain(constants::DEPOSITING_STATUSES);

        for code in codes {
            let status = code.to_string();
            let answer = response(&[("STATUS", status.as_str()), ("NCERROR", "0")]);
            let approving = constants::APPROVING_STATUSES.contains(&code);
            let approved = constants::APPROVED_STATUSES.contains(&code);
            let depositing = constants::DEPOSITING_STATUSES.contains(&code);
            let deposited = constants::DEPOSITED_STATUSES.contains(&code);

            let approve_expected = if approving {
                Outcome::Approving { status: code }
            } else if approved {
                Outcome::Approved {
                    amount: requested,
                    pay_id: None,
                }
            } else {
                Outcome::UnmanagedStatus {
                    status: code,
                    action: PaymentAction::Approve,
                    error_code: "0".to_string(),
                }
            };
            let deposit_expected = if depositing {
                Outcome::Depositing { status: code }
            } else if deposited {
                Outcome::Deposited {
                    amount: requested,
                    pay_id: None,
                }
            } else {
                Outcome::UnmanagedStatus {
                    status: code,
                    action: PaymentAction::Deposit,
                    error_code: "0".to_string(),
                }
            };
            let approve_and_deposit_expected = match &approve_expected {
                Outcome::Approved { .. } => deposit_expected.clone(),
                outcome => outcome.clone(),
            };

            assert_eq!(
                transformers::interpret(PaymentAction::Approve, &answer, requested),
                approve_expected,
                "approve, status {code}"
            );
            assert_eq!(
                transformers::interpret(PaymentAction::Deposit, &answer, requested),
                deposit_expected,
                "deposit, status {code}"
            );
            assert_eq!(
                transformers::interpret(PaymentAction::ApproveAndDeposit, &answer, requested),
                approve_and_deposit_expected,
                "approve_and_deposit, status {code}"
            );
        }
    }

    #[test]
    fn test_status_table_decisions() {
        let requested = MinorUnit::new(4200);
        let interpret = |action, code: &str| {
            transformers::interpret(
                action,
                &response(&[("STATUS", code), ("NCERROR", "0")]),
                requested,
            )
        };

        assert_eq!(
            interpret(PaymentAction::Approve, "50"),
            Outcome::Approving { status: 50 }
        );
        assert_eq!(
            interpret(PaymentAction::Approve, "92"),
            Outcome::Approved {
                amount: requested,
                pay_id: None
            }
        );
        assert_eq!(
            interpret(PaymentAction::Deposit, "92"),
            Outcome::Depositing { status: 92 }
        );
        assert_eq!(
            interpret(PaymentAction::ApproveAndDeposit, "92"),
            Outcome::Depositing { status: 92 }
        );
        assert_eq!(
            interpret(PaymentAction::Approve, "99"),
            Outcome::Approving { status: 99 }
        );
        assert_eq!(
            interpret(PaymentAction::Deposit, "99"),
            Outcome::Depositing { status: 99 }
        );
        assert_eq!(
            interpret(PaymentAction::ApproveAndDeposit, "99"),
            Outcome::Approving { status: 99 }
        );
        assert_eq!(
            interpret(PaymentAction::ApproveAndDeposit, "95"),
            Outcome::Deposited {
                amount: requested,
                pay_id: None
            }
        );
        assert_eq!(
            interpret(PaymentAction::Deposit, "41"),
            Outcome::UnmanagedStatus {
                status: 41,
                action: PaymentAction::Deposit,
                error_code: "0".to_string()
            }
        );
    }

    #[test]
    fn test_unmanaged_status_messages() {
        let not_managed = response(&[("STATUS", "8"), ("NCERROR", "0")]);
        let approve =
            transformers::interpret(PaymentAction::Approve, &not_managed, MinorUnit::new(4200));
        let deposit =
            transformers::interpret(PaymentAction::Deposit, &not_managed, MinorUnit::new(4200));

        assert_eq!(
            approve.to_string(),
            "Payment status \"8\" is not valid for approvment"
        );
        assert_eq!(
            deposit.to_string(),
            "Payment status \"8\" is not valid for depositing"
        );
        assert!(approve.is_failure() && deposit.is_failure());
    }

    #[test]
    fn test_approve_and_deposit_runs_both_steps() {
        let requested = MinorUnit::new(4200);
        let authorised = response(&[("STATUS", "5"), ("NCERROR", "0"), ("amount", "42")]);
        let captured = response(&[("STATUS", "9"), ("NCERROR", "0"), ("amount", "42")]);
        let capturing = response(&[("STATUS", "91"), ("NCERROR", "0")]);
        let authorising = response(&[("STATUS", "51"), ("NCERROR", "0")]);

        assert_eq!(
            transformers::interpret(PaymentAction::Approve, &authorised, requested),
            Outcome::Approved {
                amount: requested,
                pay_id: None
            }
        );
        assert_eq!(
            transformers::interpret(PaymentAction::ApproveAndDeposit, &authorised, requested),
            Outcome::UnmanagedStatus {
                status: 5,
                action: PaymentAction::Deposit,
                error_code: "0".to_string()
            }
        );
        assert_eq!(
            transformers::interpret(PaymentAction::ApproveAndDeposit, &captured, requested),
            Outcome::Deposited {
                amount: requested,
                pay_id: None
            }
        );
        assert_eq!(
            transformers::interpret(PaymentAction::ApproveAndDeposit, &capturing, requested),
            Outcome::Depositing { status: 91 }
        );
        assert_eq!(
            transformers::interpret(PaymentAction::ApproveAndDeposit, &authorising, requested),
            Outcome::Approving { status: 51 }
        );
    }

    #[test]
    fn test_invalid_responses() {
        let declined = response(&[
            ("STATUS", "0"),
            ("NCERROR", "50001111"),
            (
                "NCERRORPLUS",
                "Some of the data entered is incorrect. Please retry.",
            ),
        ]);
        let outcome =
            transformers::interpret(PaymentAction::Approve, &declined, MinorUnit::new(4200));
        assert_eq!(
            outcome.to_string(),
            "Ogone-Response was not successful: Some of the data entered is incorrect. Please retry."
        );
        assert_eq!(
            outcome,
            Outcome::InvalidData {
                message: "Some of the data entered is incorrect. Please retry.".to_string(),
                error_code: "50001111".to_string(),
                status: Some(0),
            }
        );

        let without_status = transformers::interpret(
            PaymentAction::Deposit,
            &response(&[("NCERROR", "0")]),
            MinorUnit::new(4200),
        );
        assert!(matches!(
            without_status,
            Outcome::InvalidData { status: None, .. }
        ));
    }

    #[test]
    fn test_processed_amount() {
        let requested = MinorUnit::new(4200);
        let partial = response(&[("STATUS", "9"), ("NCERROR", "0"), ("amount", "40.5")]);
        let unreadable = response(&[("STATUS", "9"), ("NCERROR", "0"), ("amount", "n/a")]);
        let too_precise = response(&[("STATUS", "9"), ("NCERROR", "0"), ("amount", "1.005")]);
        let oversized = response(&[
            ("STATUS", "9"),
            ("NCERROR", "0"),
            ("amount", "79228162514264337593543950335"),
        ]);

        let amount_of = |response: &OgoneResponse| {
            match transformers::interpret(PaymentAction::Deposit, response, requested) {
                Outcome::Deposited { amount, .. } => amount,
                outcome => panic!("unexpected outcome {outcome:?}"),
            }
        };
        assert_eq!(amount_of(&partial), MinorUnit::new(4050));
        assert_eq!(amount_of(&unreadable), requested);
        assert_eq!(amount_of(&too_precise), requested);
        assert_eq!(amount_of(&oversized), requested);
    }

    // ===== DIRECT QUERY =====

    #[tokio::test]
    async fn test_direct_query_request_and_deposited_answer() {
        let source = StubSource::new(200, DEPOSITED_XML);
        let ogone = connector(source.clone());
        let mut transaction = pending_transaction();

        let outcome = ogone.approve_and_deposit(&transaction).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::Deposited {
                amount: MinorUnit::new(4200),
                pay_id: Some("3014".to_string())
            }
        );

        let requests = source.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].0,
            "https://secure.ogone.com/ncol/test/querydirect.asp"
        );
        assert_eq!(
            requests[0].1,
            "PSPID=foobar&USERID=api_user&PSWD=api_password&ORDERID=ord_42"
        );

        transaction.apply_outcome(&outcome);
        assert_eq!(transaction.processed_amount, Some(MinorUnit::new(4200)));
        assert_eq!(transaction.response_code.as_deref(), Some("success"));
        assert_eq!(transaction.reason_code.as_deref(), Some("none"));
    }

    #[test]
    fn test_direct_query_password_is_masked() {
        let request = transformers::OgoneDirectQueryRequest {
            pspid: "foobar".to_string(),
            userid: "api_user".to_string(),
            pswd: Secret::new("api_password".to_string()),
            orderid: "ord_42".to_string(),
        };
        let masked = common_utils::RequestContent::FormUrlEncoded(Box::new(request))
            .masked_value()
            .to_string();
        assert!(!masked.contains("api_password"), "{masked}");
        assert!(masked.contains("ord_42"));
    }

    #[tokio::test]
    async fn test_http_error_is_a_communication_failure() {
        let ogone = connector(StubSource::new(500, "Internal Server Error"));
        let outcome = ogone.deposit(&pending_transaction()).await.unwrap();

        assert_eq!(
            outcome.to_string(),
            "The API request was not successful (Status: 500): Internal Server Error"
        );
        let error = outcome.into_result().unwrap_err();
        assert!(matches!(
            error.current_context(),
            ConnectorError::CommunicationFailure {
                status_code: 500,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_transport_error_is_a_communication_failure() {
        let ogone = connector(Arc::new(UnreachableSource));
        let outcome = ogone.approve(&pending_transaction()).await.unwrap();
        assert_eq!(
            outcome,
            Outcome::CommunicationFailure {
                status_code: 0,
                body: "Failed to send request to connector connection refused".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_pending_transaction_without_order_id_is_rejected() {
        let ogone = connector(Arc::new(UnreachableSource));
        let mut transaction = pending_transaction();
        transaction.tracking_id = None;

        let error = ogone.approve(&transaction).await.unwrap_err();
        assert_eq!(
            error.current_context(),
            &ConnectorError::MissingRequiredField {
                field_name: "tracking_id"
            }
        );
    }

    #[tokio::test]
    async fn test_forged_direct_query_signature_is_rejected() {
        let ogone = connector(StubSource::new(
            200,
            r#"<ncresponse orderID="ord_42" STATUS="9" NCERROR="0" SHASIGN="0000"/>"#,
        ));
        let error = ogone.deposit(&pending_transaction()).await.unwrap_err();
        assert_eq!(error.current_context(), &ConnectorError::SignatureMismatch);
    }

    // ===== REDIRECT RETURNS =====

    const SIGNED_RETURN: &str = "orderID=ord_42&currency=EUR&amount=42&PAYID=3014&NCERROR=0\
        &BRAND=VISA&ACCEPTANCE=test123&STATUS=9&SHASIGN=FB8BF903A9927DC7764A80C7E012236C7F26A4B1";

    #[test]
    fn test_signed_redirect_return_is_accepted() {
        let ogone = connector(Arc::new(UnreachableSource));
        let returned = ogone.handle_redirect_return(SIGNED_RETURN).unwrap();

        assert_eq!(returned.get("ORDERID"), Some("ord_42"));
        assert_eq!(
            ogone.interpret(PaymentAction::Deposit, &returned, &pending_transaction()),
            Outcome::Deposited {
                amount: MinorUnit::new(4200),
                pay_id: Some("3014".to_string())
            }
        );
    }

    #[test]
    fn test_tampered_or_unsigned_redirect_return_is_rejected() {
        let ogone = connector(Arc::new(UnreachableSource));

        let tampered = SIGNED_RETURN.replace("amount=42", "amount=4200");
        let error = ogone.handle_redirect_return(&tampered).unwrap_err();
        assert_eq!(error.current_context(), &ConnectorError::SignatureMismatch);

        let unsigned = SIGNED_RETURN
            .split("&SHASIGN=")
            .next()
            .unwrap()
            .to_string();
        let error = ogone.handle_redirect_return(&unsigned).unwrap_err();
        assert_eq!(error.current_context(), &ConnectorError::SignatureMismatch);
    }

    #[test]
    fn test_line_separated_response_is_parsed() {
        let parsed = OgoneResponse::parse(b"orderID=ord_42\nSTATUS=91\nNCERROR=0\n").unwrap();
        assert_eq!(parsed.get("orderid"), Some("ord_42"));
        assert_eq!(
            transformers::interpret(PaymentAction::Deposit, &parsed, MinorUnit::new(4200)),
            Outcome::Depositing { status: 91 }
        );
    }

    // ===== PLUGIN CONTRACT =====

    #[test]
    fn test_processes_only_ogone_gateway() {
        let ogone = connector(Arc::new(UnreachableSource));
        assert!(ogone.processes("ogone_gateway"));
        assert!(!ogone.processes("paypal_express_checkout"));
        assert!(!ogone.processes("ogone"));
        assert_eq!(ogone.id(), "ogone");
    }

    #[test]
    fn test_check_payment_instruction_requires_lang() {
        let ogone = connector(Arc::new(UnreachableSource));
        let mut instruction = PaymentInstruction {
            amount: MinorUnit::new(4200),
            currency: "EUR".to_string(),
            payment_system_name: "ogone_gateway".to_string(),
            extended_data: ExtendedData::new(),
        };

        let error = ogone.check_payment_instruction(&instruction).unwrap_err();
        assert_eq!(error.current_context().to_string(), "The payment instruction is invalid.");
        assert_eq!(
            error.current_context(),
            &ConnectorError::InvalidPaymentInstruction {
                field_errors: vec![FieldError {
                    field: "data.lang".to_string(),
                    message: "form.error.required".to_string(),
                }]
            }
        );

        instruction.extended_data.set("lang", "en_US");
        assert!(ogone.check_payment_instruction(&instruction).is_ok());
    }
}
