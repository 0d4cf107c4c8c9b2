//! Builders translating user intent into Universal Account transaction
//! requests, with human-readable descriptions for the wallet's confirmation
//! prompt.

use {
    crate::{
        assets::{PayWith, PrimaryToken},
        chains::{withdraw_usdc_address, UaChainId},
        providers::universal::{
            BuyTransactionRequest, ContractCall, ConvertTransactionRequest, ExpectToken,
            SellTransactionRequest, TokenRef, UniversalTransactionRequest,
        },
    },
    alloy::{
        primitives::{
            utils::{parse_units, UnitsError},
            Address,
        },
        sol,
        sol_types::SolCall,
    },
    thiserror::Error,
};

sol! {
    function transfer(address to, uint256 amount) external returns (bool);
}

/// USDC uses 6 decimals on every withdraw-capable chain.
const USDC_DECIMALS: u8 = 6;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Unsupported chain id: {0}")]
    UnsupportedChain(u64),

    #[error("USDC withdrawals are not supported on {0}")]
    WithdrawUnsupported(UaChainId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] UnitsError),
}

/// A built request plus the description shown in the signing prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared<T> {
    pub request: T,
    pub description: String,
}

/// Buy a token by address for a USD amount, on a chain given by its EIP-155
/// id (as LI.FI reports it).
pub fn buy_request(
    chain_id: u64,
    token_address: Address,
    amount_in_usd: &str,
    pay_with: PayWith,
) -> Result<Prepared<BuyTransactionRequest>, BuildError> {
    let chain = UaChainId::from_eip155(chain_id).ok_or(BuildError::UnsupportedChain(chain_id))?;
    Ok(Prepared {
        request: BuyTransactionRequest {
            token: TokenRef {
                chain_id: chain,
                address: token_address,
            },
            amount_in_usd: amount_in_usd.trim().to_string(),
            use_primary_tokens: pay_with.primary_tokens(),
        },
        description: format!("Buy ${} of tokens", amount_in_usd.trim()),
    })
}

/// Sell a raw token amount back to primary assets.
pub fn sell_request(
    chain_id: u64,
    token_address: Address,
    amount: &str,
) -> Result<Prepared<SellTransactionRequest>, BuildError> {
    let chain = UaChainId::from_eip155(chain_id).ok_or(BuildError::UnsupportedChain(chain_id))?;
    Ok(Prepared {
        request: SellTransactionRequest {
            token: TokenRef {
                chain_id: chain,
                address: token_address,
            },
            amount: amount.trim().to_string(),
        },
        description: format!("Sell {} tokens", amount.trim()),
    })
}

/// Swap primary assets into a target primary token on a chain.
pub fn convert_request(
    chain: UaChainId,
    token: PrimaryToken,
    amount: &str,
) -> Prepared<ConvertTransactionRequest> {
    let amount = amount.trim();
    Prepared {
        request: ConvertTransactionRequest {
            chain_id: chain,
            expect_token: ExpectToken {
                token,
                amount: amount.to_string(),
            },
        },
        description: format!("Swap to {amount} {} on {chain}", token.symbol()),
    }
}

/// Withdraw USDC to an external address: a single ERC-20 `transfer` on the
/// chain's USDC contract, funded by primary assets.
pub fn withdraw_usdc_request(
    chain: UaChainId,
    recipient: Address,
    amount: &str,
) -> Result<Prepared<UniversalTransactionRequest>, BuildError> {
    let usdc = withdraw_usdc_address(chain).ok_or(BuildError::WithdrawUnsupported(chain))?;
    let amount = amount.trim();
    let units = parse_units(amount, USDC_DECIMALS)?;
    let data = transferCall {
        to: recipient,
        amount: units.get_absolute(),
    }
    .abi_encode();

    Ok(Prepared {
        request: UniversalTransactionRequest {
            chain_id: chain,
            expect_tokens: vec![ExpectToken {
                token: PrimaryToken::Usdc,
                amount: amount.to_string(),
            }],
            transactions: vec![ContractCall {
                to: usdc,
                data: data.into(),
                value: None,
            }],
            use_primary_tokens: Vec::new(),
        },
        description: format!(
            "Withdraw {amount} USDC on {chain} to {}",
            short_address(&recipient)
        ),
    })
}

fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}
