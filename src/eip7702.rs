//! EIP-7702 authorization aggregation.
//!
//! A Universal Account transaction bundle carries one user operation per
//! involved chain, and each operation may require a fresh EIP-7702 delegation
//! from the owner wallet. Signing is interactive (the wallet may prompt the
//! user), so the aggregator requests exactly one signature per distinct
//! delegation and reuses its serialized form for every operation that shares
//! it.

use {
    crate::{
        error::AuthorizationError,
        signer::{AuthorizationSigner, SignerError},
    },
    alloy::primitives::Address,
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
    tracing::debug,
};

/// Delegation parameters attached to a user operation that still needs an
/// EIP-7702 authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationRequest {
    /// Contract the signer delegates execution authority to.
    #[serde(alias = "address")]
    pub target_contract: Address,
    pub chain_id: u64,
    pub nonce: u64,
}

/// One atomic on-chain operation awaiting authorization and submission.
///
/// Produced by the Universal Account backend when it builds a bundle; the
/// serde aliases accept the SDK's wire names unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingOperation {
    #[serde(alias = "userOpHash")]
    pub operation_id: String,
    /// Present only if this operation requires a fresh delegation.
    #[serde(default, alias = "eip7702Auth", skip_serializing_if = "Option::is_none")]
    pub delegation: Option<DelegationRequest>,
    /// True if the chain has already recorded this delegation.
    #[serde(default, alias = "eip7702Delegated")]
    pub already_delegated: bool,
}

/// Pairs an operation with its serialized authorization signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationRecord {
    #[serde(alias = "userOpHash")]
    pub operation_id: String,
    pub signature: String,
}

/// Raw signer output for one delegation request.
///
/// `v` takes precedence over `y_parity` when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthorizationSignature {
    pub r: String,
    pub s: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_parity: Option<u8>,
}

/// Signature cache key. Keyed by the full delegation tuple rather than the
/// nonce alone: two delegations to different contracts that happen to share
/// a nonce must not reuse each other's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DelegationKey {
    chain_id: u64,
    target_contract: Address,
    nonce: u64,
}

/// Walks `operations` in order and produces the authorization list required
/// to submit the batch.
///
/// The signer is invoked at most once per distinct delegation tuple;
/// operations without a delegation, or whose delegation is already recorded
/// on chain, produce no record. Output order matches input order. Any signer
/// or serialization failure aborts the whole batch — the backend treats a
/// bundle with a missing authorization as invalid, so partial results are
/// never returned.
pub async fn aggregate_authorizations(
    operations: &[PendingOperation],
    signer: &dyn AuthorizationSigner,
    signer_address: Address,
) -> Result<Vec<AuthorizationRecord>, AuthorizationError> {
    if signer_address.is_zero() {
        return Err(AuthorizationError::InvalidInput(
            "signer address is the zero address".to_string(),
        ));
    }
    if operations.iter().any(|op| op.operation_id.is_empty()) {
        return Err(AuthorizationError::InvalidInput(
            "operation with an empty id in the batch".to_string(),
        ));
    }

    let mut signatures: HashMap<DelegationKey, String> = HashMap::new();
    let mut records = Vec::new();

    for operation in operations {
        let Some(delegation) = &operation.delegation else {
            continue;
        };
        if operation.already_delegated {
            continue;
        }

        let key = DelegationKey {
            chain_id: delegation.chain_id,
            target_contract: delegation.target_contract,
            nonce: delegation.nonce,
        };
        let signature = match signatures.get(&key) {
            Some(signature) => signature.clone(),
            None => {
                debug!(
                    operation_id = %operation.operation_id,
                    chain_id = delegation.chain_id,
                    contract = %delegation.target_contract,
                    nonce = delegation.nonce,
                    "requesting EIP-7702 authorization signature"
                );
                let raw = signer
                    .sign_authorization(
                        delegation.target_contract,
                        delegation.chain_id,
                        delegation.nonce,
                        signer_address,
                    )
                    .await
                    .map_err(|e| match e {
                        SignerError::Cancelled => AuthorizationError::Cancelled,
                        other => AuthorizationError::SigningFailed {
                            nonce: delegation.nonce,
                            source: other,
                        },
                    })?;
                let serialized = serialize_signature(&raw)?;
                signatures.insert(key, serialized.clone());
                serialized
            }
        };

        records.push(AuthorizationRecord {
            operation_id: operation.operation_id.clone(),
            signature,
        });
    }

    Ok(records)
}

/// Serializes a raw authorization signature into the canonical 65-byte
/// `r || s || v` hex encoding, with `v = 27 + y_parity` (the ethers v6
/// `Signature.serialized` convention the backend expects).
///
/// Pure and deterministic, which is what permits caching by delegation tuple.
pub fn serialize_signature(
    raw: &RawAuthorizationSignature,
) -> Result<String, AuthorizationError> {
    let r = decode_scalar(&raw.r, "r")?;
    let s = decode_scalar(&raw.s, "s")?;
    let parity = recovery_parity(raw)?;

    let mut out = [0u8; 65];
    out[..32].copy_from_slice(&r);
    out[32..64].copy_from_slice(&s);
    out[64] = 27 + parity;
    Ok(format!("0x{}", hex::encode(out)))
}

fn decode_scalar(component: &str, name: &str) -> Result<[u8; 32], AuthorizationError> {
    let bytes = hex::decode(component.strip_prefix("0x").unwrap_or(component))
        .map_err(|_| AuthorizationError::MalformedSignature(format!("{name} is not valid hex")))?;
    bytes.try_into().map_err(|_| {
        AuthorizationError::MalformedSignature(format!("{name} must be exactly 32 bytes"))
    })
}

/// Normalizes the recovery indicator to a parity bit. Accepts `v` as either
/// 27/28 or 0/1; falls back to `y_parity` when `v` is absent.
fn recovery_parity(raw: &RawAuthorizationSignature) -> Result<u8, AuthorizationError> {
    match (raw.v, raw.y_parity) {
        (Some(27), _) | (Some(0), _) => Ok(0),
        (Some(28), _) | (Some(1), _) => Ok(1),
        (Some(v), _) => Err(AuthorizationError::MalformedSignature(format!(
            "unexpected v value {v}"
        ))),
        (None, Some(parity @ (0 | 1))) => Ok(parity),
        (None, Some(parity)) => Err(AuthorizationError::MalformedSignature(format!(
            "unexpected yParity value {parity}"
        ))),
        (None, None) => Err(AuthorizationError::MalformedSignature(
            "missing both v and yParity".to_string(),
        )),
    }
}
