use std::path::PathBuf;

use common_enums::HashAlgorithm;
use hyperswitch_masking::Secret;

#[derive(Clone, serde::Deserialize, Debug)]
pub struct Connectors {
    pub ogone: OgoneConnectorParams,
}

#[derive(Clone, serde::Deserialize, Debug)]
pub struct OgoneConnectorParams {
    /// base url, the environment segment and page name are appended to it
    pub base_url: String,
    /// Targets the test environment when set.
    #[serde(default)]
    pub debug: bool,
    /// Targets the `_utf8` pages, for merchants sending UTF-8 encoded parameters.
    #[serde(default)]
    pub utf8: bool,
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
    /// Directory holding `<scenario>.xml` response fixtures.
    #[serde(default)]
    pub fixtures_dir: Option<PathBuf>,
}

impl Default for OgoneConnectorParams {
    fn default() -> Self {
        Self {
            base_url: "https://secure.ogone.com/ncol/".to_string(),
            debug: false,
            utf8: false,
            hash_algorithm: HashAlgorithm::default(),
            fixtures_dir: None,
        }
    }
}

#[derive(Debug, serde::Deserialize, Clone, Default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
    /// Whole request timeout, in seconds.
    pub request_timeout: Option<u64>,
}

/// Merchant credentials issued by the gateway back office.
#[derive(Debug, serde::Deserialize, Clone)]
pub struct OgoneAuth {
    pub pspid: String,
    /// API user allowed to run direct queries.
    pub api_user: String,
    pub api_password: Secret<String>,
    /// Pass phrase signing outgoing parameters.
    pub sha_in: Secret<String>,
    /// Pass phrase the gateway signs its responses with.
    pub sha_out: Secret<String>,
}
