use common_utils::{crypto, CustomResult};
use domain_types::errors::ConnectorError;
use error_stack::ResultExt;

/// Core trait for source verification
pub trait SourceVerification<Payload> {
    fn get_secrets(&self) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Get the verification algorithm being used
    fn get_algorithm(&self) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, ConnectorError> {
        Ok(Box::new(crypto::NoAlgorithm))
    }

    /// Get the signature/hash value from the payload for verification
    fn get_signature(
        &self,
        _payload: &Payload,
        _secrets: &[u8],
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(Vec::new())
    }

    /// Get the message/payload that should be verified
    fn get_message(
        &self,
        payload: &Payload,
        secrets: &[u8],
    ) -> CustomResult<Vec<u8>, ConnectorError>;

    /// Perform the verification
    fn verify(&self, payload: &Payload) -> CustomResult<bool, ConnectorError> {
        let algorithm = self.get_algorithm()?;
        let extracted_secrets = self.get_secrets()?;
        let signature = self.get_signature(payload, &extracted_secrets)?;
        let message = self.get_message(payload, &extracted_secrets)?;

        algorithm
            .verify_signature(&extracted_secrets, &signature, &message)
            .change_context(ConnectorError::SignatureMismatch)
    }
}
