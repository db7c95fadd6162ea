//! # Exit Engine
//!
//! Converts a share burn into coins and produces the post-exit pool
//! state. The share-to-coins valuation itself is delegated to the exit
//! calculator collaborator; this engine validates the burn, subtracts
//! the paid coins from pool balances, and reduces total shares. It is
//! pure: the caller receives a fresh `Pool` and commits it (or not).

use num_bigint::BigUint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::{AmmError, ExitError, Result};
use crate::types::{AccountedPool, Coins, ExitCalculator, Params, Pool, PriceOracle};

/// Settled result of one pool exit.
///
/// `Default` is the documented all-zero value: empty coin sets, zero
/// rates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExitOutcome {
    /// Coins paid out for the burned shares.
    pub exiting_coins: Coins,
    pub weight_balance_bonus: Decimal,
    pub slippage: Decimal,
    pub swap_fee: Decimal,
    pub taker_fees_final: Decimal,
    /// Per-denom slippage attribution reported by the calculator.
    pub slippage_coins: Coins,
}

/// Burn `exiting_shares` out of `pool`.
///
/// On success returns the post-exit pool (balances and total shares
/// reduced) alongside the outcome. Any failure, including one inside the
/// exit calculator, returns before a new pool is built, so the caller's
/// state is never half-updated.
#[allow(clippy::too_many_arguments)]
pub fn exit_pool(
    pool: &Pool,
    exiting_shares: &BigUint,
    token_out_denom: &str,
    params: &Params,
    taker_fees: Decimal,
    apply_weight_breaking_fee: bool,
    oracle: &dyn PriceOracle,
    accounted: &dyn AccountedPool,
    calculator: &dyn ExitCalculator,
) -> Result<(Pool, ExitOutcome)> {
    if *exiting_shares > pool.total_shares.amount {
        return Err(AmmError::Exit(ExitError::InsufficientShares {
            requested: exiting_shares.to_string(),
            available: pool.total_shares.amount.to_string(),
        }));
    }

    let breakdown = calculator.calc_exit_pool_coins_from_shares(
        pool,
        oracle,
        accounted,
        exiting_shares,
        token_out_denom,
        params,
        taker_fees,
        apply_weight_breaking_fee,
    )?;

    // Pay the coins out of pool balances; any denom going negative
    // rejects the exit.
    let balances = pool.total_pool_liquidity().checked_sub(&breakdown.coins)?;
    let mut updated = pool.with_asset_balances(&balances)?;
    updated.total_shares.amount = pool.total_shares.amount.clone() - exiting_shares;

    debug!(
        pool_id = pool.pool_id,
        shares = %exiting_shares,
        "pool exit settled"
    );

    Ok((
        updated,
        ExitOutcome {
            exiting_coins: breakdown.coins,
            weight_balance_bonus: breakdown.weight_balance_bonus,
            slippage: breakdown.slippage,
            swap_fee: breakdown.swap_fee,
            taker_fees_final: breakdown.taker_fees,
            slippage_coins: breakdown.slippage_coins,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::PoolError;
    use crate::types::{Coin, ExitBreakdown, PoolAsset, PoolParams};
    use rust_decimal_macros::dec;

    struct UnitOracle;

    impl PriceOracle for UnitOracle {
        fn asset_price(&self, _denom: &str) -> Decimal {
            Decimal::ONE
        }
    }

    struct NoOverrides;

    impl AccountedPool for NoOverrides {
        fn accounted_balance(&self, _pool_id: u64, _denom: &str) -> BigUint {
            BigUint::from(0u8)
        }
    }

    /// Exit calculator stub returning a canned breakdown.
    struct CannedExit(ExitBreakdown);

    impl ExitCalculator for CannedExit {
        fn calc_exit_pool_coins_from_shares(
            &self,
            _pool: &Pool,
            _oracle: &dyn PriceOracle,
            _accounted: &dyn AccountedPool,
            _exiting_shares: &BigUint,
            _token_out_denom: &str,
            _params: &Params,
            _taker_fees: Decimal,
            _apply_weight_breaking_fee: bool,
        ) -> Result<ExitBreakdown> {
            Ok(self.0.clone())
        }
    }

    /// Exit calculator stub that always fails.
    struct FailingExit;

    impl ExitCalculator for FailingExit {
        fn calc_exit_pool_coins_from_shares(
            &self,
            _pool: &Pool,
            _oracle: &dyn PriceOracle,
            _accounted: &dyn AccountedPool,
            _exiting_shares: &BigUint,
            _token_out_denom: &str,
            _params: &Params,
            _taker_fees: Decimal,
            _apply_weight_breaking_fee: bool,
        ) -> Result<ExitBreakdown> {
            Err(AmmError::Price(crate::infrastructure::PriceError::NotSet {
                denom: "uatom".to_string(),
            }))
        }
    }

    fn pool() -> Pool {
        Pool {
            pool_id: 1,
            pool_assets: vec![
                PoolAsset::new(Coin::new("uusdc", 1_000_000u64), 50, dec!(10)),
                PoolAsset::new(Coin::new("uatom", 500_000u64), 50, dec!(10)),
            ],
            total_shares: Coin::new("amm/pool/1", 100_000u64),
            pool_params: PoolParams { use_oracle: true },
        }
    }

    fn breakdown(usdc: u64, atom: u64) -> ExitBreakdown {
        ExitBreakdown {
            coins: Coins::new(vec![
                Coin::new("uusdc", usdc),
                Coin::new("uatom", atom),
            ]),
            weight_balance_bonus: dec!(0.001),
            slippage: dec!(0.002),
            swap_fee: dec!(0.003),
            taker_fees: dec!(0.004),
            slippage_coins: Coins::one(Coin::new("uatom", 1u64)),
        }
    }

    #[test]
    fn test_exit_reduces_balances_and_shares() {
        let pool = pool();
        let (updated, outcome) = exit_pool(
            &pool,
            &BigUint::from(10_000u64),
            "",
            &Params::default(),
            Decimal::ZERO,
            true,
            &UnitOracle,
            &NoOverrides,
            &CannedExit(breakdown(100_000, 50_000)),
        )
        .unwrap();

        assert_eq!(
            updated.pool_asset("uusdc").unwrap().token.amount,
            900_000u64.into()
        );
        assert_eq!(
            updated.pool_asset("uatom").unwrap().token.amount,
            450_000u64.into()
        );
        assert_eq!(updated.total_shares.amount, 90_000u64.into());
        assert_eq!(outcome.exiting_coins.amount_of("uusdc"), 100_000u64.into());
        assert_eq!(outcome.weight_balance_bonus, dec!(0.001));
        assert_eq!(outcome.taker_fees_final, dec!(0.004));
        // Input pool untouched.
        assert_eq!(pool.total_shares.amount, 100_000u64.into());
    }

    #[test]
    fn test_exit_rejects_burning_more_than_total_shares() {
        let pool = pool();
        let result = exit_pool(
            &pool,
            &BigUint::from(100_001u64),
            "",
            &Params::default(),
            Decimal::ZERO,
            true,
            &UnitOracle,
            &NoOverrides,
            &CannedExit(breakdown(1, 1)),
        );
        assert!(matches!(
            result,
            Err(AmmError::Exit(ExitError::InsufficientShares { .. }))
        ));
    }

    #[test]
    fn test_exit_rejects_overdrawn_payout() {
        let pool = pool();
        let result = exit_pool(
            &pool,
            &BigUint::from(10_000u64),
            "",
            &Params::default(),
            Decimal::ZERO,
            true,
            &UnitOracle,
            &NoOverrides,
            &CannedExit(breakdown(100_000, 500_001)),
        );
        assert!(matches!(
            result,
            Err(AmmError::Pool(PoolError::NegativeBalance { ref denom })) if denom == "uatom"
        ));
    }

    #[test]
    fn test_failing_calculator_propagates_without_new_pool() {
        let pool = pool();
        let result = exit_pool(
            &pool,
            &BigUint::from(10_000u64),
            "uatom",
            &Params::default(),
            Decimal::ZERO,
            true,
            &UnitOracle,
            &NoOverrides,
            &FailingExit,
        );
        assert!(result.is_err());
        assert_eq!(pool.total_shares.amount, 100_000u64.into());
    }

    #[test]
    fn test_exit_whole_pool_zeroes_shares() {
        let pool = pool();
        let (updated, _) = exit_pool(
            &pool,
            &BigUint::from(100_000u64),
            "",
            &Params::default(),
            Decimal::ZERO,
            true,
            &UnitOracle,
            &NoOverrides,
            &CannedExit(breakdown(1_000_000, 500_000)),
        )
        .unwrap();
        assert!(updated.total_shares.amount == 0u8.into());
        assert_eq!(
            updated.pool_asset("uusdc").unwrap().token.amount,
            0u8.into()
        );
    }
}
