//! Primary-asset aggregation over the chain-aggregated balance the backend
//! returns, plus the pay-with selection used by the buy flow.

use {
    serde::{Deserialize, Serialize},
    serde_aux::field_attributes::deserialize_number_from_string,
    std::{cmp::Ordering, collections::HashMap, str::FromStr},
    strum_macros::{Display, EnumString},
};

/// Balances below this USD value are treated as dust and hidden.
const MIN_DISPLAY_USD: f64 = 0.01;

/// Primary tokens the Universal Account settles in. The backend reports them
/// as lowercase `tokenType` strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryToken {
    Eth,
    Usdt,
    Usdc,
    Btc,
    Bnb,
    Sol,
}

impl PrimaryToken {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Usdt => "USDT",
            Self::Usdc => "USDC",
            Self::Btc => "BTC",
            Self::Bnb => "BNB",
            Self::Sol => "SOL",
        }
    }
}

/// One per-chain asset entry from `get_primary_assets`. The backend sometimes
/// reports `amount` as a decimal string, hence the lenient deserializer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    pub token_type: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub amount: f64,
    #[serde(rename = "amountInUSD")]
    pub amount_in_usd: f64,
}

/// Chain-aggregated primary-asset balance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetsResponse {
    pub assets: Vec<AssetEntry>,
    #[serde(rename = "totalAmountInUSD")]
    pub total_amount_in_usd: f64,
}

/// A primary token the user actually holds, aggregated across chains.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryTokenBalance {
    pub token: PrimaryToken,
    pub amount: f64,
    pub amount_in_usd: f64,
}

/// Aggregates per-chain entries by token kind, drops dust balances and sorts
/// by USD value descending. Unknown token types are skipped.
pub fn available_primary_tokens(balance: &AssetsResponse) -> Vec<PrimaryTokenBalance> {
    let mut by_token: HashMap<PrimaryToken, PrimaryTokenBalance> = HashMap::new();

    for asset in &balance.assets {
        let Ok(token) = PrimaryToken::from_str(&asset.token_type) else {
            continue;
        };
        let entry = by_token.entry(token).or_insert(PrimaryTokenBalance {
            token,
            amount: 0.0,
            amount_in_usd: 0.0,
        });
        entry.amount += asset.amount;
        entry.amount_in_usd += asset.amount_in_usd;
    }

    let mut tokens: Vec<_> = by_token
        .into_values()
        .filter(|token| token.amount_in_usd >= MIN_DISPLAY_USD)
        .collect();
    tokens.sort_by(|a, b| {
        b.amount_in_usd
            .partial_cmp(&a.amount_in_usd)
            .unwrap_or(Ordering::Equal)
    });
    tokens
}

/// Pay-with selection for swap transactions: let the backend pick the most
/// efficient source token, or restrict it to one primary token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayWith {
    Any,
    Token(PrimaryToken),
}

impl PayWith {
    /// The `usePrimaryTokens` array handed to the backend; empty means no
    /// restriction.
    pub fn primary_tokens(&self) -> Vec<PrimaryToken> {
        match self {
            Self::Any => Vec::new(),
            Self::Token(token) => vec![*token],
        }
    }

    /// Spendable USD balance for this selection.
    pub fn available_balance(
        &self,
        balance: &AssetsResponse,
        available: &[PrimaryTokenBalance],
    ) -> f64 {
        match self {
            Self::Any => balance.total_amount_in_usd,
            Self::Token(token) => available
                .iter()
                .find(|candidate| candidate.token == *token)
                .map(|candidate| candidate.amount_in_usd)
                .unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(token_type: &str, amount: f64, amount_in_usd: f64) -> AssetEntry {
        AssetEntry {
            token_type: token_type.to_string(),
            amount,
            amount_in_usd,
        }
    }

    fn balance(assets: Vec<AssetEntry>) -> AssetsResponse {
        let total_amount_in_usd = assets.iter().map(|a| a.amount_in_usd).sum();
        AssetsResponse {
            assets,
            total_amount_in_usd,
        }
    }

    #[test]
    fn aggregates_across_chains_and_sorts_by_usd() {
        let balance = balance(vec![
            entry("usdc", 10.0, 10.0),
            entry("usdc", 5.0, 5.0),
            entry("eth", 0.02, 60.0),
            entry("sol", 0.0001, 0.005),
        ]);

        let tokens = available_primary_tokens(&balance);

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].token, PrimaryToken::Eth);
        assert_eq!(tokens[0].amount_in_usd, 60.0);
        assert_eq!(tokens[1].token, PrimaryToken::Usdc);
        assert_eq!(tokens[1].amount, 15.0);
        assert_eq!(tokens[1].amount_in_usd, 15.0);
    }

    #[test]
    fn skips_unknown_token_types() {
        let balance = balance(vec![entry("doge", 100.0, 100.0), entry("usdt", 1.0, 1.0)]);
        let tokens = available_primary_tokens(&balance);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, PrimaryToken::Usdt);
    }

    #[test]
    fn pay_with_balances() {
        let balance = balance(vec![entry("usdc", 15.0, 15.0), entry("eth", 0.02, 60.0)]);
        let available = available_primary_tokens(&balance);

        assert_eq!(PayWith::Any.available_balance(&balance, &available), 75.0);
        assert_eq!(
            PayWith::Token(PrimaryToken::Usdc).available_balance(&balance, &available),
            15.0
        );
        assert_eq!(
            PayWith::Token(PrimaryToken::Btc).available_balance(&balance, &available),
            0.0
        );
        assert!(PayWith::Any.primary_tokens().is_empty());
        assert_eq!(
            PayWith::Token(PrimaryToken::Usdc).primary_tokens(),
            vec![PrimaryToken::Usdc]
        );
    }

    #[test]
    fn accepts_string_amounts_from_the_wire() {
        let parsed: AssetsResponse = serde_json::from_str(
            r#"{
                "assets": [
                    { "tokenType": "usdc", "amount": "12.5", "amountInUSD": 12.5 }
                ],
                "totalAmountInUSD": 12.5
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.assets[0].amount, 12.5);
    }
}
