//! Transaction submission flow: aggregate EIP-7702 authorizations, sign the
//! root hash, hand everything to the backend.

use {
    crate::{
        eip7702::aggregate_authorizations,
        error::AuthorizationError,
        providers::universal::{ClientError, SendResult, UniversalAccountClient, UniversalTransaction},
        signer::{AuthorizationSigner, MessageSigner, SignerError},
    },
    alloy::primitives::Address,
    thiserror::Error,
    tracing::debug,
};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Authorization aggregation failed: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("Root hash signing failed: {0}")]
    RootHashSigning(#[from] SignerError),

    #[error("Transaction submission failed: {0}")]
    Submission(#[from] ClientError),
}

/// Submits an unsigned bundle. All-or-nothing: any failing step aborts the
/// flow and nothing is handed to the backend.
#[tracing::instrument(
    skip(client, authorization_signer, message_signer, transaction),
    fields(transaction_id = %transaction.transaction_id)
)]
pub async fn submit_transaction(
    client: &dyn UniversalAccountClient,
    authorization_signer: &dyn AuthorizationSigner,
    message_signer: &dyn MessageSigner,
    wallet_address: Address,
    transaction: &UniversalTransaction,
) -> Result<SendResult, SubmitError> {
    let authorizations =
        aggregate_authorizations(&transaction.user_ops, authorization_signer, wallet_address)
            .await?;
    debug!(
        count = authorizations.len(),
        "collected EIP-7702 authorizations"
    );

    let root_hash_signature = message_signer
        .sign_message(transaction.root_hash, wallet_address)
        .await?;

    let result = client
        .send_transaction(transaction, root_hash_signature, authorizations)
        .await?;
    debug!(transaction_id = %result.transaction_id, "transaction submitted");
    Ok(result)
}
