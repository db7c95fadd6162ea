//! Accounted-balance substitution
//!
//! Oracle-backed pools may carry externally tracked balances (margin or
//! derivative positions layered on the pool). When such a balance is
//! strictly positive it replaces the raw balance for all weight and
//! slippage math; zero means "no override". Non-oracle pools always use
//! raw balances.

use num_traits::Zero;

use crate::types::{AccountedPool, Pool, PoolAsset};

/// Apply accounted-balance overrides to `pool_assets`.
///
/// Runs for every pool, but only oracle-backed pools consult the
/// accounted source; for the rest this is a pass-through.
pub fn get_accounted_balance(
    pool: &Pool,
    accounted: &dyn AccountedPool,
    pool_assets: &[PoolAsset],
) -> Vec<PoolAsset> {
    pool_assets
        .iter()
        .map(|asset| {
            let mut updated = asset.clone();
            if pool.pool_params.use_oracle {
                let tracked = accounted.accounted_balance(pool.pool_id, &asset.token.denom);
                if !tracked.is_zero() {
                    updated.token.amount = tracked;
                }
            }
            updated
        })
        .collect()
}
