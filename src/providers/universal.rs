//! Universal Account backend boundary.
//!
//! The backend owns routing, cross-chain bridging and smart-account
//! deployment; this crate only defines the request/response structures and an
//! opaque async trait, one method per remote call.

use {
    crate::{
        assets::{AssetsResponse, PrimaryToken},
        chains::UaChainId,
        eip7702::{AuthorizationRecord, PendingOperation},
    },
    alloy::primitives::{Address, Bytes, B256, U256},
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Backend rejected the request: {0}")]
    Backend(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response payload: {0}")]
    UnexpectedResponse(#[from] serde_json::Error),
}

/// A token identified by chain and contract address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRef {
    pub chain_id: UaChainId,
    pub address: Address,
}

/// A primary-token amount the transaction is expected to produce or consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectToken {
    #[serde(rename = "type")]
    pub token: PrimaryToken,
    pub amount: String,
}

/// A raw contract call included in a universal transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub to: Address,
    pub data: Bytes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
}

/// Swap primary assets into `expect_token` on `chain_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertTransactionRequest {
    pub chain_id: UaChainId,
    pub expect_token: ExpectToken,
}

/// Buy a token by address for a USD amount drawn from primary assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyTransactionRequest {
    pub token: TokenRef,
    #[serde(rename = "amountInUSD")]
    pub amount_in_usd: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_primary_tokens: Vec<PrimaryToken>,
}

/// Sell a token back to primary assets; `amount` is the raw token amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellTransactionRequest {
    pub token: TokenRef,
    pub amount: String,
}

/// Arbitrary calls on a chain, funded by primary assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalTransactionRequest {
    pub chain_id: UaChainId,
    pub expect_tokens: Vec<ExpectToken>,
    pub transactions: Vec<ContractCall>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub use_primary_tokens: Vec<PrimaryToken>,
}

/// An unsigned bundle returned by the `create_*` calls: the root hash the
/// wallet must sign plus the ordered user operations the authorization
/// aggregator consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalTransaction {
    pub transaction_id: String,
    pub root_hash: B256,
    pub user_ops: Vec<PendingOperation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    pub transaction_id: String,
}

/// Backend status codes for historical transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStatus {
    Failed,
    Pending,
    Processing,
    Confirming,
    Completed,
    Other(i64),
}

impl TransactionStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Failed,
            1 => Self::Pending,
            2 => Self::Processing,
            3 => Self::Confirming,
            7 => Self::Completed,
            other => Self::Other(other),
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::Failed => 0,
            Self::Pending => 1,
            Self::Processing => 2,
            Self::Confirming => 3,
            Self::Completed => 7,
            Self::Other(code) => *code,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Failed => "Failed",
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Confirming => "Confirming",
            Self::Completed => "Completed",
            Self::Other(_) => "Unknown",
        }
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.code())
    }
}

impl<'de> Deserialize<'de> for TransactionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_code(i64::deserialize(deserializer)?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetToken {
    pub name: String,
    pub symbol: String,
    pub address: String,
    pub chain_id: u64,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceChange {
    pub amount: String,
    #[serde(rename = "amountInUSD")]
    pub amount_in_usd: String,
    pub from: String,
    pub to: String,
}

/// One historical transaction from `get_transactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction_id: String,
    /// Backend tag such as `convert`, `transfer`, `bridge`, `deposit` or
    /// `withdraw`.
    pub tag: String,
    pub created_at: String,
    pub updated_at: String,
    pub target_token: TargetToken,
    pub change: BalanceChange,
    pub status: TransactionStatus,
    pub from_chains: Vec<u64>,
    pub to_chains: Vec<u64>,
}

/// Display label for a backend transaction tag; unmapped tags are shown
/// capitalized.
pub fn tag_label(tag: &str) -> String {
    match tag {
        "convert" => "Swap".to_string(),
        "transfer" => "Transfer".to_string(),
        "bridge" => "Bridge".to_string(),
        "deposit" => "Deposit".to_string(),
        "withdraw" => "Withdraw".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        }
    }
}

/// Remote Universal Account backend, one method per documented SDK call.
#[async_trait]
pub trait UniversalAccountClient: Send + Sync {
    async fn create_convert_transaction(
        &self,
        request: ConvertTransactionRequest,
    ) -> Result<UniversalTransaction, ClientError>;

    async fn create_buy_transaction(
        &self,
        request: BuyTransactionRequest,
    ) -> Result<UniversalTransaction, ClientError>;

    async fn create_sell_transaction(
        &self,
        request: SellTransactionRequest,
    ) -> Result<UniversalTransaction, ClientError>;

    async fn create_universal_transaction(
        &self,
        request: UniversalTransactionRequest,
    ) -> Result<UniversalTransaction, ClientError>;

    /// Submits a bundle with its root-hash signature and the aggregated
    /// EIP-7702 authorization list.
    async fn send_transaction(
        &self,
        transaction: &UniversalTransaction,
        root_hash_signature: Bytes,
        authorizations: Vec<AuthorizationRecord>,
    ) -> Result<SendResult, ClientError>;

    async fn get_primary_assets(&self) -> Result<AssetsResponse, ClientError>;

    async fn get_transactions(&self) -> Result<Vec<TransactionRecord>, ClientError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(TransactionStatus::from_code(7), TransactionStatus::Completed);
        assert_eq!(TransactionStatus::from_code(0), TransactionStatus::Failed);
        assert_eq!(
            TransactionStatus::from_code(9),
            TransactionStatus::Other(9)
        );
        assert_eq!(TransactionStatus::Completed.label(), "Completed");
        assert_eq!(TransactionStatus::Other(9).label(), "Unknown");
        assert_eq!(TransactionStatus::from_code(7).code(), 7);
    }

    #[test]
    fn tag_labels() {
        assert_eq!(tag_label("convert"), "Swap");
        assert_eq!(tag_label("withdraw"), "Withdraw");
        assert_eq!(tag_label("redpacket"), "Redpacket");
    }

    #[test]
    fn requests_use_sdk_wire_names() {
        let request = BuyTransactionRequest {
            token: TokenRef {
                chain_id: UaChainId::Base,
                address: Address::ZERO,
            },
            amount_in_usd: "25".to_string(),
            use_primary_tokens: vec![PrimaryToken::Usdc],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["amountInUSD"], "25");
        assert_eq!(json["token"]["chainId"], 8453);
        assert_eq!(json["usePrimaryTokens"][0], "usdc");

        let expect = ExpectToken {
            token: PrimaryToken::Usdc,
            amount: "1.5".to_string(),
        };
        let json = serde_json::to_value(&expect).unwrap();
        assert_eq!(json["type"], "usdc");
    }
}
