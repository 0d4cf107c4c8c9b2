use {
    crate::eip7702::RawAuthorizationSignature,
    alloy::primitives::{Address, Bytes, B256},
    async_trait::async_trait,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Signing request rejected by the user")]
    Rejected,

    #[error("Signing request cancelled")]
    Cancelled,

    #[error("Invalid signing parameters: {0}")]
    InvalidParams(String),

    #[error("Signer transport error: {0}")]
    Transport(String),
}

/// Wallet capability that signs EIP-7702 delegation authorizations.
///
/// Backed by an embedded-wallet service, hosted signer, or hardware key. A
/// call may surface a user-facing confirmation prompt, so callers must not
/// invoke it more often than strictly necessary.
#[async_trait]
pub trait AuthorizationSigner: Send + Sync {
    async fn sign_authorization(
        &self,
        contract_address: Address,
        chain_id: u64,
        nonce: u64,
        signer_address: Address,
    ) -> Result<RawAuthorizationSignature, SignerError>;
}

/// Wallet capability that signs an arbitrary 32-byte message, used for the
/// transaction root hash before submission.
#[async_trait]
pub trait MessageSigner: Send + Sync {
    async fn sign_message(
        &self,
        message: B256,
        signer_address: Address,
    ) -> Result<Bytes, SignerError>;
}
