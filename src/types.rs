//! Domain types shared by the trigger and the SDK boundary
//!
//! Starknet identifiers (contract addresses, transaction hashes) are field
//! elements. They are parsed from `0x`-prefixed hex and compared by value, so
//! `0x049d...` and `0x49D...` are the same address.

use crate::{Error, Result};
use alloy::primitives::{uint, U256};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Starknet field prime, 2^251 + 17 * 2^192 + 1
pub const FIELD_PRIME: U256 =
    uint!(0x0800000000000011000000000000000000000000000000000000000000000001_U256);

fn parse_felt(input: &str) -> Result<U256> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| Error::InvalidArgument(format!("Felt must be 0x-prefixed: {}", input)))?;

    if digits.is_empty() || digits.len() > 64 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidArgument(format!("Invalid felt: {}", input)));
    }

    let value = U256::from_str_radix(digits, 16)
        .map_err(|e| Error::InvalidArgument(format!("Invalid felt {}: {}", input, e)))?;

    if value >= FIELD_PRIME {
        return Err(Error::InvalidArgument(format!(
            "Felt exceeds field prime: {}",
            input
        )));
    }

    Ok(value)
}

macro_rules! felt_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(U256);

        impl $name {
            /// Wrap a value known to be below the field prime
            pub const fn new(value: U256) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> U256 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                parse_felt(s).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:x}", self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

felt_newtype!(
    /// Address of a Starknet contract or account
    ContractAddr
);

felt_newtype!(
    /// Hash of a submitted Starknet transaction
    TxHash
);

/// Serde helper for raw token amounts carried as decimal strings
pub mod amount {
    use alloy::primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_str(raw.trim()).map_err(serde::de::Error::custom)
    }
}

/// Amount allocated to a single lending pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub pool_id: ContractAddr,
    #[serde(with = "amount")]
    pub amount: U256,
}

/// Allocation of a strategy's assets across pools
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionSet(Vec<Position>);

impl PositionSet {
    pub fn new(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Amount held in a pool, zero if the pool is absent
    pub fn amount_in(&self, pool_id: &ContractAddr) -> U256 {
        self.0
            .iter()
            .filter(|p| &p.pool_id == pool_id)
            .fold(U256::ZERO, |acc, p| acc.saturating_add(p.amount))
    }

    pub fn total(&self) -> U256 {
        self.0
            .iter()
            .fold(U256::ZERO, |acc, p| acc.saturating_add(p.amount))
    }
}

/// Movement of funds into or out of one pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub pool_id: ContractAddr,
    /// Magnitude moved, direction given by `is_deposit`
    #[serde(with = "amount")]
    pub change_amount: U256,
    #[serde(with = "amount")]
    pub final_amount: U256,
    pub is_deposit: bool,
}

/// Deltas needed to move from the current to the proposed allocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(Vec<PositionChange>);

impl ChangeSet {
    pub fn new(changes: Vec<PositionChange>) -> Self {
        Self(changes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionChange> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when applying the set would not move any funds
    pub fn is_noop(&self) -> bool {
        self.0.iter().all(|c| c.change_amount.is_zero())
    }
}

/// Output of the strategy's reallocation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalancePlan {
    pub changes: ChangeSet,
    pub final_positions: PositionSet,
}

/// A single contract invocation, opaque to the trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub contract_address: ContractAddr,
    pub entrypoint: String,
    pub calldata: Vec<String>,
}

/// Handle returned once the account has submitted a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHandle {
    pub transaction_hash: TxHash,
}

/// Finality and execution states reported by a Starknet node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Received,
    Rejected,
    AcceptedOnL2,
    AcceptedOnL1,
    Succeeded,
    Reverted,
    /// Any status this client does not model; treated as still in flight
    #[serde(other)]
    Unknown,
}

/// Value locked in a strategy, in asset units and USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tvl {
    #[serde(with = "amount")]
    pub amount: U256,
    pub usd_value: f64,
}

/// Per-pool view of a strategy's allocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolInfo {
    pub pool_id: ContractAddr,
    #[serde(default)]
    pub pool_name: Option<String>,
    #[serde(default)]
    pub v_token: Option<ContractAddr>,
    pub max_weight: f64,
    pub current_weight: f64,
    pub apy: f64,
    #[serde(with = "amount")]
    pub amount: U256,
    pub usd_value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> ContractAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_felt_ignores_case_and_padding() {
        let a = addr("0x049d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7");
        let b = addr("0x49D36570D4E46F48E99674BD3FCC84644DDD6B96F7C741B1562B82F9E004DC7");
        assert_eq!(a, b);
        assert_eq!(
            a.to_string(),
            "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7"
        );
    }

    #[test]
    fn test_felt_rejects_invalid_input() {
        assert!("49d365".parse::<ContractAddr>().is_err());
        assert!("0x".parse::<ContractAddr>().is_err());
        assert!("0xzz".parse::<ContractAddr>().is_err());
        // Field prime itself is out of range
        assert!(
            "0x0800000000000011000000000000000000000000000000000000000000000001"
                .parse::<ContractAddr>()
                .is_err()
        );
        assert!(
            "0x0800000000000011000000000000000000000000000000000000000000000000"
                .parse::<ContractAddr>()
                .is_ok()
        );
    }

    #[test]
    fn test_change_set_noop() {
        assert!(ChangeSet::default().is_noop());

        let pool = addr("0x1");
        let zero = ChangeSet::new(vec![PositionChange {
            pool_id: pool,
            change_amount: U256::ZERO,
            final_amount: U256::from(10),
            is_deposit: true,
        }]);
        assert!(zero.is_noop());
        assert!(!zero.is_empty());

        let moving = ChangeSet::new(vec![PositionChange {
            pool_id: pool,
            change_amount: U256::from(5),
            final_amount: U256::from(15),
            is_deposit: true,
        }]);
        assert!(!moving.is_noop());
    }

    #[test]
    fn test_position_set_amounts() {
        let positions = PositionSet::new(vec![
            Position {
                pool_id: addr("0x1"),
                amount: U256::from(100),
            },
            Position {
                pool_id: addr("0x2"),
                amount: U256::from(50),
            },
        ]);
        assert_eq!(positions.amount_in(&addr("0x2")), U256::from(50));
        assert_eq!(positions.amount_in(&addr("0x3")), U256::ZERO);
        assert_eq!(positions.total(), U256::from(150));
    }

    #[test]
    fn test_change_deserializes_from_gateway_json() {
        let value = serde_json::json!({
            "pool_id": "0x4dc4f0ca6ea4961e4c8373265bfd5317678f4fe374d76f3fd7135f57763bf28",
            "change_amount": "1000000000000000000",
            "final_amount": "0x1bc16d674ec80000",
            "is_deposit": false
        });
        let change: PositionChange = serde_json::from_value(value).unwrap();
        assert_eq!(change.change_amount, U256::from(10u64.pow(18)));
        assert_eq!(change.final_amount, U256::from(2 * 10u64.pow(18)));
        assert!(!change.is_deposit);
    }

    #[test]
    fn test_transaction_status_wire_names() {
        let status: TransactionStatus = serde_json::from_str("\"ACCEPTED_ON_L2\"").unwrap();
        assert_eq!(status, TransactionStatus::AcceptedOnL2);
        let status: TransactionStatus = serde_json::from_str("\"PRE_CONFIRMED\"").unwrap();
        assert_eq!(status, TransactionStatus::Unknown);
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Succeeded).unwrap(),
            "\"SUCCEEDED\""
        );
    }
}
