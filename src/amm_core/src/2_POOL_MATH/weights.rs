//! # Weight Model
//!
//! Two views of a pool's composition:
//! - **configured weights**: each asset's raw weight over the total
//!   configured weight;
//! - **oracle-implied weights**: each asset's value (balance × oracle
//!   price) over total pool value.
//!
//! The distance between the two drives the weight-breaking fee / balance
//! bonus. Distance is a best-effort metric: when the oracle weights
//! cannot be computed it reports zero instead of propagating the failure.
//!
//! Both normalizations share one degenerate fallback: a zero total
//! substitutes 1 as the denominator (see `quo_with_one_fallback`), so a
//! fully empty pool yields each asset's raw figure rather than an error.

use num_traits::CheckedSub;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::infrastructure::{
    biguint_to_decimal, checked_mul, quo_with_one_fallback, AmmError, CalculationError,
    PoolError, PriceError, Result,
};
use crate::types::{Coins, PoolAsset, PriceOracle};

/// A denom paired with its normalized weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetWeight {
    pub denom: String,
    pub weight: Decimal,
}

/// Normalize the configured weights: weight ÷ total configured weight.
///
/// A zero total falls back to a denominator of 1, so each output equals
/// its raw configured weight. Documented degenerate case, not an error.
pub fn normalized_weights(pool_assets: &[PoolAsset]) -> Vec<AssetWeight> {
    let total: u128 = pool_assets.iter().map(|a| a.weight as u128).sum();
    let total_dec = Decimal::from_i128_with_scale(total as i128, 0);

    pool_assets
        .iter()
        .map(|asset| AssetWeight {
            denom: asset.token.denom.clone(),
            weight: quo_with_one_fallback(Decimal::from(asset.weight), total_dec),
        })
        .collect()
}

/// Oracle-implied weights: (balance × price) ÷ total pool value.
///
/// Fails with a price-not-set condition if any denom has a zero price.
/// A zero total value falls back to a denominator of 1.
pub fn oracle_normalized_weights(
    oracle: &dyn PriceOracle,
    pool_assets: &[PoolAsset],
) -> Result<Vec<AssetWeight>> {
    let mut values = Vec::with_capacity(pool_assets.len());
    let mut total_value = Decimal::ZERO;

    for asset in pool_assets {
        let price = oracle.asset_price(&asset.token.denom);
        if price.is_zero() {
            return Err(AmmError::Price(PriceError::NotSet {
                denom: asset.token.denom.clone(),
            }));
        }
        let amount = biguint_to_decimal(&asset.token.amount, "oracle weight value")?;
        let value = checked_mul(amount, price, "oracle weight value")?;
        total_value = total_value.checked_add(value).ok_or(AmmError::Calculation(
            CalculationError::Overflow {
                operation: "oracle weight total",
            },
        ))?;
        values.push((asset.token.denom.clone(), value));
    }

    Ok(values
        .into_iter()
        .map(|(denom, value)| AssetWeight {
            denom,
            weight: quo_with_one_fallback(value, total_value),
        })
        .collect())
}

/// Mean absolute difference between configured and oracle-implied
/// weights.
///
/// Returns zero for an empty asset list and when the oracle weights
/// cannot be computed: this is a best-effort metric, never a propagating
/// fault.
pub fn weight_distance_from_target(
    oracle: &dyn PriceOracle,
    pool_assets: &[PoolAsset],
) -> Decimal {
    if pool_assets.is_empty() {
        return Decimal::ZERO;
    }
    let oracle_weights = match oracle_normalized_weights(oracle, pool_assets) {
        Ok(weights) => weights,
        Err(_) => return Decimal::ZERO,
    };
    let target_weights = normalized_weights(pool_assets);

    let distance_sum: Decimal = target_weights
        .iter()
        .zip(oracle_weights.iter())
        .map(|(target, oracle_w)| (target.weight - oracle_w.weight).abs())
        .sum();

    distance_sum / Decimal::from(pool_assets.len() as u64)
}

/// Configured weight for a single denom; zero when absent.
pub fn denom_normalized_weight(pool_assets: &[PoolAsset], denom: &str) -> Decimal {
    normalized_weights(pool_assets)
        .into_iter()
        .find(|w| w.denom == denom)
        .map(|w| w.weight)
        .unwrap_or(Decimal::ZERO)
}

/// Oracle-implied weight for a single denom; zero when absent or when
/// the oracle weights cannot be computed.
pub fn denom_oracle_asset_weight(
    oracle: &dyn PriceOracle,
    pool_assets: &[PoolAsset],
    denom: &str,
) -> Decimal {
    let weights = match oracle_normalized_weights(oracle, pool_assets) {
        Ok(weights) => weights,
        Err(_) => return Decimal::ZERO,
    };
    weights
        .into_iter()
        .find(|w| w.denom == denom)
        .map(|w| w.weight)
        .unwrap_or(Decimal::ZERO)
}

/// Project the asset balances after applying a swap: input added, output
/// subtracted. Fails if any projected balance would go negative.
pub fn new_pool_assets_after_swap(
    pool_assets: &[PoolAsset],
    in_coins: &Coins,
    out_coins: &Coins,
) -> Result<Vec<PoolAsset>> {
    let mut updated = Vec::with_capacity(pool_assets.len());
    for asset in pool_assets {
        let denom = &asset.token.denom;
        let increased = asset.token.amount.clone() + in_coins.amount_of(denom);
        let after = increased.checked_sub(&out_coins.amount_of(denom)).ok_or(
            AmmError::Pool(PoolError::NegativeBalance {
                denom: denom.clone(),
            }),
        )?;
        let mut next = asset.clone();
        next.token.amount = after;
        updated.push(next);
    }
    Ok(updated)
}

// ===== Tests =====
