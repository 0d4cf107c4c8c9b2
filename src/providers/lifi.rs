//! LI.FI token API client, used for token discovery and metadata.

use {
    serde::{Deserialize, Serialize},
    std::collections::HashMap,
    thiserror::Error,
    tracing::error,
    url::Url,
};

const LIFI_BASE_API_URL: &str = "https://li.quest/v1";

/// Tokens with these coin keys are listed first, in this order. Based on the
/// most commonly traded tokens across DeFi.
const PRIORITY_COIN_KEYS: &[&str] = &[
    "ETH", "WETH", "USDC", "USDT", "DAI", "WBTC", "LINK", "UNI", "AAVE", "ARB", "OP", "MATIC",
    "BNB", "AVAX", "SOL",
];

#[derive(Debug, Error)]
pub enum LifiError {
    #[error("Invalid token or chain parameter: {0}")]
    InvalidParameter(String),

    #[error("Asset not supported: {0}")]
    AssetNotSupported(String),

    #[error("Failed to parse request URL")]
    ParseUrl,

    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    #[error("LI.FI API responded with status {0}")]
    ApiError(reqwest::StatusCode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifiToken {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub chain_id: u64,
    #[serde(default)]
    pub coin_key: Option<String>,
    #[serde(default, alias = "logoURI")]
    pub logo_uri: Option<String>,
    #[serde(default, alias = "priceUSD")]
    pub price_usd: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokensResponse {
    tokens: HashMap<String, Vec<LifiToken>>,
}

#[derive(Debug)]
pub struct LifiClient {
    pub api_key: Option<String>,
    pub base_api_url: String,
    pub http_client: reqwest::Client,
}

impl LifiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_api_url: LIFI_BASE_API_URL.to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn send_request(&self, url: Url) -> Result<reqwest::Response, reqwest::Error> {
        if let Some(api_key) = &self.api_key {
            self.http_client
                .get(url)
                .header("x-lifi-api-key", api_key.clone())
                .send()
                .await
        } else {
            self.http_client.get(url).send().await
        }
    }

    /// Metadata for a single token on a chain.
    pub async fn get_token(&self, chain_id: u64, address: &str) -> Result<LifiToken, LifiError> {
        let address = address.to_lowercase();
        let mut url = Url::parse(format!("{}/token", self.base_api_url).as_str())
            .map_err(|_| LifiError::ParseUrl)?;
        url.query_pairs_mut()
            .append_pair("chain", &chain_id.to_string());
        url.query_pairs_mut().append_pair("token", &address);

        let response = self.send_request(url).await.map_err(|e| {
            error!("Error sending token request to LI.FI: {e:?}");
            LifiError::HttpRequest(e)
        })?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::BAD_REQUEST {
                return Err(LifiError::InvalidParameter(
                    "invalid token or chain parameter".to_string(),
                ));
            }
            // 404 is expected when the asset is not served
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Err(LifiError::AssetNotSupported(address));
            }
            error!(
                "Error on getting token from LI.FI. Status is not OK: {:?}",
                response.status()
            );
            return Err(LifiError::ApiError(response.status()));
        }

        Ok(response.json::<LifiToken>().await?)
    }

    /// Token lists for the given chains, each ordered with priority coin keys
    /// first.
    pub async fn get_tokens(
        &self,
        chain_ids: &[u64],
    ) -> Result<HashMap<u64, Vec<LifiToken>>, LifiError> {
        let mut url = Url::parse(format!("{}/tokens", self.base_api_url).as_str())
            .map_err(|_| LifiError::ParseUrl)?;
        let chains = chain_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        url.query_pairs_mut().append_pair("chains", &chains);

        let response = self.send_request(url).await.map_err(|e| {
            error!("Error sending tokens request to LI.FI: {e:?}");
            LifiError::HttpRequest(e)
        })?;
        if !response.status().is_success() {
            error!(
                "Error on getting token lists from LI.FI. Status is not OK: {:?}",
                response.status()
            );
            return Err(LifiError::ApiError(response.status()));
        }

        let body = response.json::<TokensResponse>().await?;
        let mut by_chain = HashMap::new();
        for (chain_id, mut tokens) in body.tokens {
            let Ok(chain_id) = chain_id.parse::<u64>() else {
                continue;
            };
            tokens.sort_by_key(token_priority);
            by_chain.insert(chain_id, tokens);
        }
        Ok(by_chain)
    }
}

fn token_priority(token: &LifiToken) -> usize {
    let coin_key = token
        .coin_key
        .as_deref()
        .unwrap_or(&token.symbol)
        .to_uppercase();
    PRIORITY_COIN_KEYS
        .iter()
        .position(|key| *key == coin_key)
        .unwrap_or(PRIORITY_COIN_KEYS.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(symbol: &str, coin_key: Option<&str>) -> LifiToken {
        LifiToken {
            address: "0x0".to_string(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            decimals: 18,
            chain_id: 1,
            coin_key: coin_key.map(str::to_string),
            logo_uri: None,
            price_usd: None,
        }
    }

    #[test]
    fn priority_tokens_sort_first() {
        let mut tokens = vec![
            token("PEPE", None),
            token("usdc", Some("usdc")),
            token("WETH", Some("WETH")),
        ];
        tokens.sort_by_key(token_priority);
        assert_eq!(tokens[0].symbol, "WETH");
        assert_eq!(tokens[1].symbol, "usdc");
        assert_eq!(tokens[2].symbol, "PEPE");
    }

    #[test]
    fn falls_back_to_symbol_when_coin_key_is_missing() {
        assert!(token_priority(&token("eth", None)) < token_priority(&token("PEPE", None)));
    }

    #[test]
    fn parses_wire_aliases() {
        let parsed: LifiToken = serde_json::from_str(
            r#"{
                "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "symbol": "USDC",
                "name": "USD Coin",
                "decimals": 6,
                "chainId": 1,
                "coinKey": "USDC",
                "logoURI": "https://example.com/usdc.png",
                "priceUSD": "1.00"
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.decimals, 6);
        assert_eq!(parsed.logo_uri.as_deref(), Some("https://example.com/usdc.png"));
        assert_eq!(parsed.price_usd.as_deref(), Some("1.00"));
    }
}
