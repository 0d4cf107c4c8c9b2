//! Chain registry: the EVM mainnets the Universal Account backend supports,
//! the subset LI.FI serves, and the USDC contracts for withdrawal chains.

use {
    alloy::primitives::{address, Address},
    serde::{de, Deserialize, Deserializer, Serialize, Serializer},
    strum_macros::Display,
};

/// Universal-Account-supported EVM mainnets. Discriminants are the EIP-155
/// chain ids, which is also how the backend encodes them on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[repr(u64)]
pub enum UaChainId {
    Ethereum = 1,
    Optimism = 10,
    #[strum(serialize = "BNB Chain")]
    Bsc = 56,
    Polygon = 137,
    Sonic = 146,
    #[strum(serialize = "X Layer")]
    XLayer = 196,
    Mantle = 5000,
    Base = 8453,
    Arbitrum = 42161,
    Avalanche = 43114,
    Linea = 59144,
    Berachain = 80094,
}

impl UaChainId {
    pub fn from_eip155(chain_id: u64) -> Option<Self> {
        Some(match chain_id {
            1 => Self::Ethereum,
            10 => Self::Optimism,
            56 => Self::Bsc,
            137 => Self::Polygon,
            146 => Self::Sonic,
            196 => Self::XLayer,
            5000 => Self::Mantle,
            8453 => Self::Base,
            42161 => Self::Arbitrum,
            43114 => Self::Avalanche,
            59144 => Self::Linea,
            80094 => Self::Berachain,
            _ => return None,
        })
    }

    pub fn eip155(&self) -> u64 {
        *self as u64
    }
}

impl Serialize for UaChainId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.eip155())
    }
}

impl<'de> Deserialize<'de> for UaChainId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let chain_id = u64::deserialize(deserializer)?;
        Self::from_eip155(chain_id)
            .ok_or_else(|| de::Error::custom(format!("unsupported chain id {chain_id}")))
    }
}

/// A chain the LI.FI token API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifiChain {
    pub id: u64,
    pub name: &'static str,
}

/// Chains verified against the LI.FI API. X Layer (196) and Merlin (4200)
/// are not served.
pub const LIFI_CHAINS: &[LifiChain] = &[
    LifiChain { id: 1, name: "Ethereum" },
    LifiChain { id: 56, name: "BNB Chain" },
    LifiChain { id: 5000, name: "Mantle" },
    LifiChain { id: 143, name: "Monad" },
    LifiChain { id: 9745, name: "Plasma" },
    LifiChain { id: 8453, name: "Base" },
    LifiChain { id: 42161, name: "Arbitrum" },
    LifiChain { id: 43114, name: "Avalanche" },
    LifiChain { id: 10, name: "Optimism" },
    LifiChain { id: 137, name: "Polygon" },
    LifiChain { id: 999, name: "HyperEVM" },
    LifiChain { id: 80094, name: "Berachain" },
    LifiChain { id: 59144, name: "Linea" },
    LifiChain { id: 146, name: "Sonic" },
];

pub fn lifi_chain_by_id(chain_id: u64) -> Option<&'static LifiChain> {
    LIFI_CHAINS.iter().find(|chain| chain.id == chain_id)
}

/// USDC contract for the chains the withdraw flow supports.
pub fn withdraw_usdc_address(chain: UaChainId) -> Option<Address> {
    match chain {
        UaChainId::Base => Some(address!("833589fCD6eDb6E08f4c7C32D4f71b54bdA02913")),
        UaChainId::Arbitrum => Some(address!("af88d065e77c8cC2239327C5EDb3A432268e5831")),
        UaChainId::Bsc => Some(address!("8AC76a51cc950d9822D68b83fE1Ad97B32Cd580d")),
        _ => None,
    }
}

pub const WITHDRAW_CHAINS: &[UaChainId] = &[UaChainId::Base, UaChainId::Arbitrum, UaChainId::Bsc];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eip155_roundtrip() {
        for chain in [
            UaChainId::Ethereum,
            UaChainId::Bsc,
            UaChainId::Base,
            UaChainId::Berachain,
        ] {
            assert_eq!(UaChainId::from_eip155(chain.eip155()), Some(chain));
        }
        assert_eq!(UaChainId::from_eip155(4200), None);
    }

    #[test]
    fn serde_uses_numeric_chain_ids() {
        assert_eq!(serde_json::to_string(&UaChainId::Base).unwrap(), "8453");
        assert_eq!(
            serde_json::from_str::<UaChainId>("42161").unwrap(),
            UaChainId::Arbitrum
        );
        assert!(serde_json::from_str::<UaChainId>("4200").is_err());
    }

    #[test]
    fn display_names() {
        assert_eq!(UaChainId::Bsc.to_string(), "BNB Chain");
        assert_eq!(UaChainId::XLayer.to_string(), "X Layer");
        assert_eq!(UaChainId::Base.to_string(), "Base");
    }

    #[test]
    fn lifi_chain_lookup() {
        assert_eq!(lifi_chain_by_id(8453).unwrap().name, "Base");
        assert!(lifi_chain_by_id(196).is_none());
    }

    #[test]
    fn usdc_only_on_withdraw_chains() {
        for chain in WITHDRAW_CHAINS {
            assert!(withdraw_usdc_address(*chain).is_some());
        }
        assert!(withdraw_usdc_address(UaChainId::Ethereum).is_none());
        assert!(withdraw_usdc_address(UaChainId::Polygon).is_none());
    }
}
