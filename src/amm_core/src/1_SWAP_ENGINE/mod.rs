//! # Swap Engine
//!
//! Orchestrates a single out-given-in swap:
//!
//! 1. Charge the fixed per-swap gas (always, before anything can fail).
//! 2. Plain pools delegate entirely to the invariant calculator.
//! 3. Oracle-backed pools price off the oracle, estimate slippage by
//!    running the invariant curve on an input resized by the external
//!    liquidity ratio, apply the protocol slippage floor, then layer the
//!    weight-breaking fee and swap/taker fees on top.
//!
//! The engine is pure: it never mutates the pool. Balance application is
//! the caller's job. Every error path leaves the pool untouched and the
//! result record's `Default` is the documented all-zero value.

pub mod accounted_balance;


use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::{
    checked_mul, checked_quo, decimal_to_biguint_round, decimal_to_biguint_trunc,
    biguint_to_decimal, AmmError, PriceError, Result, SwapError,
};
use crate::pool_math::{calc_given_in_slippage, new_pool_assets_after_swap};
use crate::types::{
    AccountedPool, Coin, Coins, GasMeter, OutGivenInCalculator, Params, Pool, PriceOracle,
    WeightFeePolicy,
};

pub use accounted_balance::get_accounted_balance;

/// Collaborators the swap engine reads from.
pub struct SwapDeps<'a> {
    pub oracle: &'a dyn PriceOracle,
    pub accounted: &'a dyn AccountedPool,
    pub calculator: &'a dyn OutGivenInCalculator,
    pub weight_fee_policy: &'a dyn WeightFeePolicy,
}

/// Settled result of one out-given-in swap.
///
/// `Default` is the documented all-zero value returned alongside every
/// rejection: empty output coin, zero ratios and amounts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwapOutcome {
    /// Final settled output, truncated toward zero.
    pub token_out: Coin,
    /// Modeled slippage ratio (after the protocol floor).
    pub slippage: Decimal,
    /// Modeled slippage amount in output units.
    pub slippage_amount: Decimal,
    /// Weight-balance bonus rate granted by the weight-fee policy.
    pub weight_balance_bonus: Decimal,
    /// Oracle-implied output before slippage and fees (zero for plain
    /// pools).
    pub oracle_out_amount: Decimal,
    /// Swap fee actually applied (zero when the policy waives it).
    pub swap_fee_final: Decimal,
}

/// Execute an out-given-in swap against `pool`.
///
/// `snapshot` is the reference pool state for the slippage model.
/// `weight_breaking_fee_perpetual_factor` should be 1 unless a perpetual
/// position is driving the swap.
#[allow(clippy::too_many_arguments)]
pub fn swap_out_amt_given_in(
    pool: &Pool,
    snapshot: &Pool,
    tokens_in: &Coins,
    token_out_denom: &str,
    swap_fee: Decimal,
    weight_breaking_fee_perpetual_factor: Decimal,
    params: &Params,
    taker_fees: Decimal,
    deps: &SwapDeps<'_>,
    gas: &mut dyn GasMeter,
) -> Result<SwapOutcome> {
    // Fixed gas consumption per swap to prevent spam; charged before any
    // validation so failed requests pay too.
    gas.consume_gas(params.swap_gas_fee, "amm swap computation");

    // Plain constant-weight pool: delegate to the invariant calculator.
    if !pool.pool_params.use_oracle {
        tokens_in.single()?;
        let (token_out, slippage) = deps.calculator.calc_out_amt_given_in(
            pool,
            snapshot,
            tokens_in,
            token_out_denom,
            swap_fee,
            deps.oracle,
            deps.accounted,
        )?;
        return Ok(SwapOutcome {
            token_out,
            slippage,
            swap_fee_final: swap_fee,
            ..Default::default()
        });
    }

    let (token_in, asset_in, asset_out) = pool.parse_pool_assets(tokens_in, token_out_denom)?;

    let in_token_price = deps.oracle.asset_price(&token_in.denom);
    if in_token_price.is_zero() {
        return Err(AmmError::Price(PriceError::NotSet {
            denom: asset_in.token.denom.clone(),
        }));
    }
    let out_token_price = deps.oracle.asset_price(token_out_denom);
    if out_token_price.is_zero() {
        return Err(AmmError::Price(PriceError::NotSet {
            denom: asset_out.token.denom.clone(),
        }));
    }

    let accounted_assets = get_accounted_balance(pool, deps.accounted, &pool.pool_assets);

    // Oracle-implied output for the full input.
    let amount_in = biguint_to_decimal(&token_in.amount, "oracle out amount")?;
    let oracle_out_amount = checked_quo(
        checked_mul(amount_in, in_token_price, "oracle out amount")?,
        out_token_price,
        "oracle out amount",
    )?;

    // Resize the input by the external liquidity ratio and run the
    // slippage model at the trade's true relative size, then scale the
    // result back up.
    let external_liquidity_ratio = pool.get_asset_external_liquidity_ratio(token_out_denom)?;
    if external_liquidity_ratio.is_zero() {
        return Err(AmmError::Swap(SwapError::AmountTooLow));
    }

    let resized_amount = decimal_to_biguint_round(
        checked_quo(amount_in, external_liquidity_ratio, "resized input")?,
        "resized input",
    )?;
    let resized_in = Coins::one(Coin::new(token_in.denom.clone(), resized_amount));
    let mut slippage_amount = calc_given_in_slippage(
        pool,
        snapshot,
        deps.oracle,
        deps.accounted,
        deps.calculator,
        &resized_in,
        token_out_denom,
    )?;
    slippage_amount = checked_mul(slippage_amount, external_liquidity_ratio, "scaled slippage")?;

    let mut slippage = checked_quo(slippage_amount, oracle_out_amount, "slippage ratio")?;

    // Protocol-mandated floor, never bypassed.
    if slippage < params.min_slippage {
        slippage = params.min_slippage;
        slippage_amount = checked_mul(oracle_out_amount, params.min_slippage, "floored slippage")?;
    }

    let out_amount_after_slippage = oracle_out_amount - slippage_amount;

    // Projected post-swap balances over the accounted balances; any
    // negative projection rejects the swap.
    let out_coins = Coins::one(Coin::new(
        token_out_denom,
        decimal_to_biguint_trunc(out_amount_after_slippage, "out after slippage")?,
    ));
    let new_asset_pools = new_pool_assets_after_swap(&accounted_assets, tokens_in, &out_coins)?;

    let fees = deps.weight_fee_policy.weight_fees(
        deps.oracle,
        &accounted_assets,
        &new_asset_pools,
        &token_in.denom,
        params,
        weight_breaking_fee_perpetual_factor,
    );
    let swap_fee = if fees.applies_swap_fee {
        swap_fee
    } else {
        Decimal::ZERO
    };

    if swap_fee >= Decimal::ONE {
        return Err(AmmError::Swap(SwapError::ExcessiveSwapFee {
            fee: swap_fee.to_string(),
        }));
    }

    // Settled output; decimal component is dropped, the trader never
    // receives a rounded-up amount.
    let settled = checked_mul(
        checked_mul(
            out_amount_after_slippage,
            Decimal::ONE - fees.weight_breaking_fee,
            "settled output",
        )?,
        Decimal::ONE - (swap_fee + taker_fees),
        "settled output",
    )?;
    let token_out = Coin::new(token_out_denom, decimal_to_biguint_trunc(settled, "settled output")?);

    debug!(
        pool_id = pool.pool_id,
        token_in = %token_in,
        token_out = %token_out,
        %slippage,
        "oracle swap priced"
    );

    Ok(SwapOutcome {
        token_out,
        slippage,
        slippage_amount,
        weight_balance_bonus: fees.weight_balance_bonus,
        oracle_out_amount,
        swap_fee_final: swap_fee,
    })
}
