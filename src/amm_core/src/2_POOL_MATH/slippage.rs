//! # Slippage Model
//!
//! Models what a trade loses to curve slippage by comparing the
//! oracle-implied output (input × priceIn ÷ priceOut) against the
//! constant-weight invariant output at zero fee. The shortfall is the
//! slippage amount; a trade that beats the oracle price reports zero
//! slippage, never a bonus.

use rust_decimal::Decimal;

use crate::infrastructure::{
    biguint_to_decimal, checked_mul, checked_quo, AmmError, PriceError, Result,
};
use crate::types::{AccountedPool, Coins, OutGivenInCalculator, Pool, PriceOracle};

/// Slippage amount (in output-denom units, as a decimal) for a
/// single-denomination input against `token_out_denom`.
///
/// `snapshot` is the historical pool state the invariant calculator
/// references (typically pool state at the start of the block).
pub fn calc_given_in_slippage(
    pool: &Pool,
    snapshot: &Pool,
    oracle: &dyn PriceOracle,
    accounted: &dyn AccountedPool,
    calculator: &dyn OutGivenInCalculator,
    tokens_in: &Coins,
    token_out_denom: &str,
) -> Result<Decimal> {
    // Invariant-curve output at zero fee.
    let (balancer_out_coin, _) = calculator.calc_out_amt_given_in(
        pool,
        snapshot,
        tokens_in,
        token_out_denom,
        Decimal::ZERO,
        oracle,
        accounted,
    )?;

    let (token_in, asset_in, asset_out) = pool.parse_pool_assets(tokens_in, token_out_denom)?;

    let in_token_price = oracle.asset_price(&token_in.denom);
    if in_token_price.is_zero() {
        return Err(AmmError::Price(PriceError::NotSet {
            denom: asset_in.token.denom.clone(),
        }));
    }
    let out_token_price = oracle.asset_price(token_out_denom);
    if out_token_price.is_zero() {
        return Err(AmmError::Price(PriceError::NotSet {
            denom: asset_out.token.denom.clone(),
        }));
    }

    let amount_in = biguint_to_decimal(&token_in.amount, "oracle out amount")?;
    let oracle_out_amount = checked_quo(
        checked_mul(amount_in, in_token_price, "oracle out amount")?,
        out_token_price,
        "oracle out amount",
    )?;
    let balancer_out = biguint_to_decimal(&balancer_out_coin.amount, "invariant out amount")?;

    let slippage_amount = oracle_out_amount - balancer_out;
    if slippage_amount.is_sign_negative() {
        return Ok(Decimal::ZERO);
    }
    Ok(slippage_amount)
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coin, PoolAsset, PoolParams};
    use num_bigint::BigUint;
    use rust_decimal_macros::dec;

    struct MapOracle(Vec<(&'static str, Decimal)>);

    impl PriceOracle for MapOracle {
        fn asset_price(&self, denom: &str) -> Decimal {
            self.0
                .iter()
                .find(|(d, _)| *d == denom)
                .map(|(_, p)| *p)
                .unwrap_or(Decimal::ZERO)
        }
    }

    struct NoOverrides;

    impl AccountedPool for NoOverrides {
        fn accounted_balance(&self, _pool_id: u64, _denom: &str) -> BigUint {
            BigUint::from(0u8)
        }
    }

    /// Invariant primitive stub returning a fixed output amount.
    struct FixedOut(u64);

    impl OutGivenInCalculator for FixedOut {
        fn calc_out_amt_given_in(
            &self,
            _pool: &Pool,
            _snapshot: &Pool,
            _tokens_in: &Coins,
            token_out_denom: &str,
            _swap_fee: Decimal,
            _oracle: &dyn PriceOracle,
            _accounted: &dyn AccountedPool,
        ) -> Result<(Coin, Decimal)> {
            Ok((Coin::new(token_out_denom, self.0), Decimal::ZERO))
        }
    }

    fn oracle_pool() -> Pool {
        Pool {
            pool_id: 1,
            pool_assets: vec![
                PoolAsset::new(Coin::new("uusdc", 1_000_000u64), 50, dec!(10)),
                PoolAsset::new(Coin::new("uatom", 1_000_000u64), 50, dec!(10)),
            ],
            total_shares: Coin::new("amm/pool/1", 100_000_000u64),
            pool_params: PoolParams { use_oracle: true },
        }
    }

    #[test]
    fn test_slippage_is_oracle_minus_invariant() {
        let pool = oracle_pool();
        let oracle = MapOracle(vec![("uusdc", dec!(1)), ("uatom", dec!(1))]);
        // Oracle-implied out = 100, invariant out = 95 -> slippage 5.
        let slippage = calc_given_in_slippage(
            &pool,
            &pool,
            &oracle,
            &NoOverrides,
            &FixedOut(95),
            &Coins::one(Coin::new("uusdc", 100u64)),
            "uatom",
        )
        .unwrap();
        assert_eq!(slippage, dec!(5));
    }

    #[test]
    fn test_slippage_never_negative() {
        let pool = oracle_pool();
        let oracle = MapOracle(vec![("uusdc", dec!(1)), ("uatom", dec!(1))]);
        // Invariant output beats the oracle price: zero, not a bonus.
        let slippage = calc_given_in_slippage(
            &pool,
            &pool,
            &oracle,
            &NoOverrides,
            &FixedOut(105),
            &Coins::one(Coin::new("uusdc", 100u64)),
            "uatom",
        )
        .unwrap();
        assert_eq!(slippage, Decimal::ZERO);
    }

    #[test]
    fn test_slippage_fails_on_unset_price() {
        let pool = oracle_pool();
        let oracle = MapOracle(vec![("uusdc", dec!(1))]);
        let result = calc_given_in_slippage(
            &pool,
            &pool,
            &oracle,
            &NoOverrides,
            &FixedOut(95),
            &Coins::one(Coin::new("uusdc", 100u64)),
            "uatom",
        );
        assert!(matches!(
            result,
            Err(AmmError::Price(PriceError::NotSet { ref denom })) if denom == "uatom"
        ));
    }

    #[test]
    fn test_slippage_rejects_multi_denom_input() {
        let pool = oracle_pool();
        let oracle = MapOracle(vec![("uusdc", dec!(1)), ("uatom", dec!(1))]);
        let tokens_in = Coins::new(vec![
            Coin::new("uusdc", 100u64),
            Coin::new("uatom", 100u64),
        ]);
        assert!(calc_given_in_slippage(
            &pool,
            &pool,
            &oracle,
            &NoOverrides,
            &FixedOut(95),
            &tokens_in,
            "uatom",
        )
        .is_err());
    }
}
