//! Coin and balance-set value types
//!
//! A `Coin` is a denomination plus a non-negative integer quantity.
//! Quantities are `BigUint`, so negative balances are unrepresentable by
//! construction; every subtraction goes through `checked_sub`.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::infrastructure::{AmmError, PoolError, Result};

/// A single denominated amount.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: BigUint,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins keyed by denomination.
///
/// Lookups by denomination return zero for absent denoms, mirroring how
/// balance sets behave everywhere in this core: absence means "no balance",
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coins(Vec<Coin>);

impl Coins {
    pub fn new(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    pub fn one(coin: Coin) -> Self {
        Self(vec![coin])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// Amount held for `denom`; zero when the denom is absent.
    pub fn amount_of(&self, denom: &str) -> BigUint {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount.clone())
            .unwrap_or_else(BigUint::zero)
    }

    /// The single coin in this set.
    ///
    /// Swap input must be exactly one denomination; anything else is
    /// rejected here before any pricing math runs.
    pub fn single(&self) -> Result<&Coin> {
        if self.0.len() != 1 {
            return Err(AmmError::Pool(PoolError::InvalidTokensIn {
                count: self.0.len(),
            }));
        }
        Ok(&self.0[0])
    }

    /// Subtract `other` from this set, failing if any resulting balance
    /// would go negative. Denoms absent from `other` pass through
    /// unchanged; a denom present in `other` but not here is a negative
    /// result by definition.
    pub fn checked_sub(&self, other: &Coins) -> Result<Coins> {
        for coin in other.iter() {
            if self.amount_of(&coin.denom) < coin.amount {
                return Err(AmmError::Pool(PoolError::NegativeBalance {
                    denom: coin.denom.clone(),
                }));
            }
        }
        let out = self
            .0
            .iter()
            .map(|c| Coin::new(c.denom.clone(), c.amount.clone() - other.amount_of(&c.denom)))
            .collect();
        Ok(Coins(out))
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        Self(coins)
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
