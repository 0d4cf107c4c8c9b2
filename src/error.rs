use crate::signer::SignerError;

/// Failures of the EIP-7702 authorization aggregation.
///
/// All variants are fatal to the batch: the account-abstraction backend
/// requires authorizations for every delegating operation before it accepts
/// a bundle, so no partial authorization list is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Authorization signing failed for nonce {nonce}: {source}")]
    SigningFailed {
        nonce: u64,
        #[source]
        source: SignerError,
    },

    #[error("Malformed authorization signature: {0}")]
    MalformedSignature(String),

    #[error("Authorization flow cancelled")]
    Cancelled,
}
