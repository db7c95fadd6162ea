//! Pool entity and per-pool configuration
//!
//! A pool owns an ordered asset list, a total-shares coin, and its
//! parameters. Pools are plain values: swap pricing never mutates them,
//! and the exit engine returns a fresh `Pool` for the caller to commit.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coin::{Coin, Coins};
use crate::infrastructure::{AmmError, PoolError, Result};

/// One asset held by a pool.
///
/// `weight` is the configured (raw) weight used by the constant-weight
/// invariant. `external_liquidity_ratio` models how much deeper the
/// external reference market for this asset is assumed to be than this
/// pool; it scales the slippage model for oracle-backed pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAsset {
    pub token: Coin,
    pub weight: u64,
    pub external_liquidity_ratio: Decimal,
}

impl PoolAsset {
    pub fn new(token: Coin, weight: u64, external_liquidity_ratio: Decimal) -> Self {
        Self {
            token,
            weight,
            external_liquidity_ratio,
        }
    }
}

/// Per-pool parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolParams {
    /// When set, trades are priced off the oracle with invariant-curve
    /// slippage estimation; when unset, the pool is a plain
    /// constant-weight pool.
    pub use_oracle: bool,
}

/// A multi-asset liquidity pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub pool_id: u64,
    pub pool_assets: Vec<PoolAsset>,
    pub total_shares: Coin,
    pub pool_params: PoolParams,
}

impl Pool {
    /// Find the pool asset holding `denom`.
    pub fn pool_asset(&self, denom: &str) -> Result<&PoolAsset> {
        self.pool_assets
            .iter()
            .find(|a| a.token.denom == denom)
            .ok_or_else(|| {
                AmmError::Pool(PoolError::AssetNotFound {
                    denom: denom.to_string(),
                })
            })
    }

    /// Resolve a swap request against this pool's assets.
    ///
    /// The input set must contain exactly one coin, its denom must differ
    /// from the output denom, and both sides must be pool assets. Returns
    /// the input coin together with the matched in/out assets.
    pub fn parse_pool_assets<'a>(
        &'a self,
        tokens_in: &Coins,
        token_out_denom: &str,
    ) -> Result<(Coin, &'a PoolAsset, &'a PoolAsset)> {
        let token_in = tokens_in.single()?.clone();
        if token_in.denom == token_out_denom {
            return Err(AmmError::Pool(PoolError::SameDenom {
                denom: token_out_denom.to_string(),
            }));
        }
        let asset_in = self.pool_asset(&token_in.denom)?;
        let asset_out = self.pool_asset(token_out_denom)?;
        Ok((token_in, asset_in, asset_out))
    }

    /// The external-liquidity ratio configured for `denom`.
    pub fn get_asset_external_liquidity_ratio(&self, denom: &str) -> Result<Decimal> {
        Ok(self.pool_asset(denom)?.external_liquidity_ratio)
    }

    /// Current pool liquidity as a balance set.
    pub fn total_pool_liquidity(&self) -> Coins {
        Coins::new(self.pool_assets.iter().map(|a| a.token.clone()).collect())
    }

    /// Rebuild this pool with asset balances taken from `balances`.
    ///
    /// Every pool asset must have an entry; weights and ratios carry over
    /// unchanged.
    pub fn with_asset_balances(&self, balances: &Coins) -> Result<Pool> {
        if balances.len() != self.pool_assets.len() {
            return Err(AmmError::Pool(PoolError::MismatchedBalances {
                expected: self.pool_assets.len(),
                actual: balances.len(),
            }));
        }
        let mut updated = self.clone();
        for asset in updated.pool_assets.iter_mut() {
            asset.token.amount = balances.amount_of(&asset.token.denom);
        }
        Ok(updated)
    }
}
