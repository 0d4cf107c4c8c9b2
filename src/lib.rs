//! Client-side core for a Universal Account demo wallet.
//!
//! The heavy lifting (routing, bridging, smart-account deployment) lives in
//! external services behind the [`providers::universal::UniversalAccountClient`]
//! and [`signer`] boundaries. What this crate owns is the glue with real
//! correctness constraints: EIP-7702 authorization aggregation, signature
//! serialization, chain-id translation, primary-asset aggregation, and the
//! transaction submission flow.

pub mod assets;
pub mod chains;
pub mod eip7702;
pub mod error;
pub mod providers;
pub mod signer;
pub mod submit;
pub mod transactions;

pub use {
    assets::{available_primary_tokens, AssetsResponse, PayWith, PrimaryToken},
    chains::UaChainId,
    eip7702::{
        aggregate_authorizations, serialize_signature, AuthorizationRecord, DelegationRequest,
        PendingOperation, RawAuthorizationSignature,
    },
    error::AuthorizationError,
    providers::{lifi::LifiClient, universal::UniversalAccountClient},
    signer::{AuthorizationSigner, MessageSigner, SignerError},
    submit::{submit_transaction, SubmitError},
};
