//! SHA-IN / SHA-OUT signatures.
//!
//! The signed string is every non-empty parameter as `NAME=value` followed by the pass phrase,
//! concatenated in signing order. The digest is sent as hex.

use common_enums::HashAlgorithm;
use common_utils::{
    crypto::{GenerateDigest, VerifySignature},
    CustomResult,
};
use domain_types::errors;
use error_stack::ResultExt;
use hyperswitch_masking::{PeekInterface, Secret};
use serde::Serialize;

use super::transformers::OgoneParameters;

/// Lowercase hex digest sent as `SHASIGN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShaSignature(String);

impl ShaSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex comparison, case-insensitive.
    pub fn matches(&self, signature: &str) -> bool {
        self.0.eq_ignore_ascii_case(signature.trim())
    }
}

impl std::fmt::Display for ShaSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contains the pass phrase: never log it.
pub fn signing_string(parameters: &OgoneParameters, pass_phrase: &str) -> String {
    parameters
        .signed_pairs()
        .fold(String::new(), |mut acc, (name, value)| {
            acc.push_str(name);
            acc.push('=');
            acc.push_str(value);
            acc.push_str(pass_phrase);
            acc
        })
}

pub fn generate(
    parameters: &OgoneParameters,
    pass_phrase: &Secret<String>,
    algorithm: HashAlgorithm,
) -> CustomResult<ShaSignature, errors::ConnectorError> {
    let message = signing_string(parameters, pass_phrase.peek());
    let digest = algorithm
        .generate_digest(message.as_bytes())
        .change_context(errors::ConnectorError::RequestSigningFailed)?;
    Ok(ShaSignature(hex::encode(digest)))
}

/// Whether `signature` was produced over `parameters` with `pass_phrase`.
pub fn verify(
    parameters: &OgoneParameters,
    signature: &str,
    pass_phrase: &Secret<String>,
    algorithm: HashAlgorithm,
) -> CustomResult<bool, errors::ConnectorError> {
    let message = signing_string(parameters, pass_phrase.peek());
    algorithm
        .verify_signature(&[], signature.as_bytes(), message.as_bytes())
        .change_context(errors::ConnectorError::SignatureMismatch)
}
