//! Utilities for cryptographic algorithms

use common_enums::HashAlgorithm;
use error_stack::ResultExt;

use crate::errors::{self, CustomResult};

/// Trait for generating a digest for SHA
pub trait GenerateDigest {
    /// takes a message and creates a digest for it
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError>;
}

/// Trait for cryptographically verifying a message against a signature
pub trait VerifySignature {
    /// Takes in a secret, the signature and the message and verifies the message
    /// against the signature
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError>;
}

/// Represents no cryptographic algorithm.
/// Implements all crypto traits and acts like a Nop
#[derive(Debug)]
pub struct NoAlgorithm;

impl VerifySignature for NoAlgorithm {
    fn verify_signature(
        &self,
        _secret: &[u8],
        _signature: &[u8],
        _msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        Ok(true)
    }
}

/// Secure Hash Algorithm 1, kept for gateways still signing with it
#[derive(Debug)]
pub struct Sha1;

/// Secure Hash Algorithm 256
#[derive(Debug)]
pub struct Sha256;

/// Secure Hash Algorithm 512
#[derive(Debug)]
pub struct Sha512;

impl GenerateDigest for Sha1 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, message);
        Ok(digest.as_ref().to_vec())
    }
}

impl GenerateDigest for Sha256 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = ring::digest::digest(&ring::digest::SHA256, message);
        Ok(digest.as_ref().to_vec())
    }
}

impl GenerateDigest for Sha512 {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        let digest = ring::digest::digest(&ring::digest::SHA512, message);
        Ok(digest.as_ref().to_vec())
    }
}

impl GenerateDigest for HashAlgorithm {
    fn generate_digest(&self, message: &[u8]) -> CustomResult<Vec<u8>, errors::CryptoError> {
        match self {
            Self::Sha1 => Sha1.generate_digest(message),
            Self::Sha256 => Sha256.generate_digest(message),
            Self::Sha512 => Sha512.generate_digest(message),
        }
    }
}

/// Verifies a hex encoded digest of `msg`. Hex case is not significant.
///
/// The secret is expected to be already folded into `msg`, so it is ignored here.
impl VerifySignature for HashAlgorithm {
    fn verify_signature(
        &self,
        _secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, errors::CryptoError> {
        let signature = std::str::from_utf8(signature)
            .change_context(errors::CryptoError::EncodingFailed)?;
        let hashed_digest = hex::encode(
            self.generate_digest(msg)
                .change_context(errors::CryptoError::SignatureVerificationFailed)?,
        );
        Ok(hashed_digest.eq_ignore_ascii_case(signature.trim()))
    }
}
