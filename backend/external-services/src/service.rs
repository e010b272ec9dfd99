use std::{str::FromStr, time::Duration};

use common_utils::{
    request::{Headers, Method, Request, RequestContent},
    CustomResult,
};
use domain_types::{errors::ApiClientError, router_response_types::Response, types::Proxy};
use error_stack::{report, ResultExt};
use hyperswitch_masking::Maskable;
use interfaces::connector_types::ResponseSource;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{field::Empty, Instrument};

/// Sends gateway requests over HTTP(S), through the configured proxy if any.
#[derive(Debug, Clone, Default)]
pub struct HttpResponseSource {
    proxy: Proxy,
}

impl HttpResponseSource {
    pub fn new(proxy: Proxy) -> Self {
        Self { proxy }
    }
}

#[async_trait::async_trait]
impl ResponseSource for HttpResponseSource {
    async fn fetch(&self, request: Request) -> CustomResult<Response, ApiClientError> {
        let span = tracing::info_span!(
            "ogone_outgoing_api",
            request_headers = Empty,
            request_body = Empty,
            response_body = Empty,
            status_code = Empty,
            latency = Empty,
            method = Empty,
            url = Empty,
        );
        execute_request(&self.proxy, request).instrument(span).await
    }
}

async fn execute_request(
    proxy: &Proxy,
    request: Request,
) -> CustomResult<Response, ApiClientError> {
    let start = tokio::time::Instant::now();
    let span = tracing::Span::current();

    span.record("url", tracing::field::display(&request.url));
    span.record("method", tracing::field::display(request.method));
    span.record(
        "request_headers",
        tracing::field::display(masked_headers(&request.headers)),
    );
    let masked_request = request
        .body
        .as_ref()
        .map(RequestContent::masked_value)
        .unwrap_or(Value::Null);
    span.record("request_body", tracing::field::display(&masked_request));

    let result = call_connector_api(proxy, request).await;
    match &result {
        Ok(response) => {
            span.record("status_code", response.status_code);
            span.record(
                "response_body",
                tracing::field::display(response.body_as_text()),
            );
        }
        Err(err) => {
            error_log(
                "NETWORK_ERROR",
                &json!(format!(
                    "Failed getting response from connector. Error: {:?}",
                    err
                )),
            );
        }
    }

    span.record(
        "latency",
        tracing::field::display(start.elapsed().as_millis()),
    );
    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

fn masked_headers(headers: &Headers) -> Value {
    let masked = headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (name, value)| {
            let value = match value {
                Maskable::Masked(_) => Value::String("*** alloc::string::String ***".to_string()),
                Maskable::Normal(inner) => Value::String(inner.to_owned()),
            };
            acc.insert(name.clone(), value);
            acc
        });
    Value::Object(masked)
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
) -> CustomResult<Response, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.bypass_proxy_urls.contains(&url.to_string());

    let client = get_base_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let request_builder = match request.method {
        Method::Get => client.get(url),
        Method::Post => {
            let client = client.post(url);
            match request.body {
                Some(RequestContent::Json(payload)) => client.json(&payload),
                Some(RequestContent::FormUrlEncoded(payload)) => client.form(&payload),
                Some(RequestContent::RawBytes(payload)) => client.body(payload),
                None => client,
            }
        }
    }
    .add_headers(headers);

    let request_builder = match proxy.request_timeout {
        Some(seconds) => request_builder.timeout(Duration::from_secs(seconds)),
        None => request_builder,
    };

    let response = request_builder.send().await.map_err(|error| {
        let api_error = match error {
            error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
            _ => ApiClientError::RequestNotSent(error.to_string()),
        };
        info_log(
            "REQUEST_FAILURE",
            &json!("Unable to send request to connector."),
        );
        report!(api_error)
    })?;

    handle_response(response).await
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy
        || (proxy_config.http_url.is_none() && proxy_config.https_url.is_none())
    {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

/// Every final status is handed back to the connector, which decides what an error status
/// means. Only informational answers are unexpected here.
async fn handle_response(
    response: reqwest::Response,
) -> CustomResult<Response, ApiClientError> {
    let status_code = response.status().as_u16();
    if response.status().is_informational() {
        warn_log(
            "UNEXPECTED_RESPONSE",
            &json!(format!("Unexpected response from server: {status_code}")),
        );
        return Err(report!(ApiClientError::UnexpectedServerResponse));
    }

    let headers = Some(response.headers().to_owned());
    let body = response
        .bytes()
        .await
        .change_context(ApiClientError::ResponseDecodingFailed)?;

    Ok(Response {
        headers,
        response: body,
        status_code,
    })
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Default, serde::Deserialize, Clone, strum::EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,
    /// Answer served from a fixture file.
    FixtureResponse,
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn debug_log(action: &str, message: &Value) {
    tracing::debug!(tags = %action, json_value= %message);
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}
