//! Collaborator interfaces
//!
//! Everything this core reads from the surrounding runtime comes through
//! the traits below: oracle prices, accounted-balance overrides,
//! membership tiers, gas metering, and the lower-level pricing primitives
//! (invariant calculator, route pricers, share-to-coins exit calculator).
//! All reads are synchronous and must be deterministic for a given state;
//! the caller serializes mutating operations against a pool, so none of
//! these implementations need internal locking.

use num_bigint::BigUint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coin::{Coin, Coins};
use super::params::Params;
use super::pool::{Pool, PoolAsset};
use crate::infrastructure::{AmmError, Result, ValidationError};

/// Oracle price feed. A zero return means "no price set" for that denom.
pub trait PriceOracle {
    fn asset_price(&self, denom: &str) -> Decimal;
}

/// Externally tracked balance overrides (e.g. margin positions layered on
/// a pool). A zero return means "no override".
pub trait AccountedPool {
    fn accounted_balance(&self, pool_id: u64, denom: &str) -> BigUint;
}

/// Membership tier registry keyed by trader identity.
pub trait TierRegistry {
    fn membership_tier(&self, address: &AccountId) -> MembershipTier;
}

/// Deterministic per-operation compute charge.
pub trait GasMeter {
    fn consume_gas(&mut self, amount: u64, descriptor: &'static str);
}

/// Constant-weight invariant "out given in" primitive.
///
/// Returns the output coin and the curve's own slippage ratio. Internals
/// are outside this core; only the contract is relied upon.
pub trait OutGivenInCalculator {
    #[allow(clippy::too_many_arguments)]
    fn calc_out_amt_given_in(
        &self,
        pool: &Pool,
        snapshot: &Pool,
        tokens_in: &Coins,
        token_out_denom: &str,
        swap_fee: Decimal,
        oracle: &dyn PriceOracle,
        accounted: &dyn AccountedPool,
    ) -> Result<(Coin, Decimal)>;
}

/// Output of a [`WeightFeePolicy`] evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeightFees {
    /// Non-negative rebate rate for trades that move the pool toward its
    /// oracle-implied composition.
    pub weight_balance_bonus: Decimal,
    /// Non-negative extra fee rate for trades that move it away.
    pub weight_breaking_fee: Decimal,
    /// Whether the base swap fee still applies to this trade.
    pub applies_swap_fee: bool,
}

/// Pluggable weight-fee policy.
///
/// The exact curve mapping weight-distance changes (and the perpetual
/// dampening factor) to a bonus/fee rate is specified independently; this
/// core only consumes the resulting rates.
pub trait WeightFeePolicy {
    fn weight_fees(
        &self,
        oracle: &dyn PriceOracle,
        pre_assets: &[PoolAsset],
        post_assets: &[PoolAsset],
        denom_in: &str,
        params: &Params,
        perpetual_factor: Decimal,
    ) -> WeightFees;
}

/// One hop of a forward (amount-in) route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAmountInRoute {
    pub pool_id: u64,
    pub token_out_denom: String,
}

/// One hop of a reverse (amount-out) route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapAmountOutRoute {
    pub pool_id: u64,
    pub token_in_denom: String,
}

/// Per-route pricing report produced by the route collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePriceReport {
    pub spot_price: Decimal,
    pub impacted_price: Decimal,
    pub out_amount: Coin,
    pub swap_fee: Decimal,
    pub discount: Decimal,
    pub available_liquidity: Coin,
    pub slippage: Decimal,
    pub weight_bonus: Decimal,
}

/// Multi-hop route construction and spot-price calculation.
pub trait RoutePricer {
    fn in_route_by_denom(
        &self,
        denom_in: &str,
        denom_out: &str,
        base_currency: &str,
    ) -> Result<Vec<SwapAmountInRoute>>;

    fn out_route_by_denom(
        &self,
        denom_out: &str,
        denom_in: &str,
        base_currency: &str,
    ) -> Result<Vec<SwapAmountOutRoute>>;

    fn in_route_spot_price(
        &self,
        amount: &Coin,
        route: &[SwapAmountInRoute],
        discount: Decimal,
        override_swap_fee: Decimal,
    ) -> Result<RoutePriceReport>;

    fn out_route_spot_price(
        &self,
        amount: &Coin,
        route: &[SwapAmountOutRoute],
        discount: Decimal,
        override_swap_fee: Decimal,
    ) -> Result<RoutePriceReport>;
}

/// Share-to-coins conversion for pool exits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExitBreakdown {
    pub coins: Coins,
    pub weight_balance_bonus: Decimal,
    pub slippage: Decimal,
    pub swap_fee: Decimal,
    pub taker_fees: Decimal,
    pub slippage_coins: Coins,
}

/// Exit calculator primitive; determines what a share burn is worth.
pub trait ExitCalculator {
    #[allow(clippy::too_many_arguments)]
    fn calc_exit_pool_coins_from_shares(
        &self,
        pool: &Pool,
        oracle: &dyn PriceOracle,
        accounted: &dyn AccountedPool,
        exiting_shares: &BigUint,
        token_out_denom: &str,
        params: &Params,
        taker_fees: Decimal,
        apply_weight_breaking_fee: bool,
    ) -> Result<ExitBreakdown>;
}

/// Trader identity used for membership-tier lookups.
///
/// The zero identity (`Default`) stands in for unrecognized or malformed
/// addresses; lookups against it resolve to whatever the non-member tier
/// carries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Parse a textual address. Addresses are lowercase alphanumeric,
    /// 3 to 90 characters.
    pub fn from_text(text: &str) -> Result<Self> {
        let valid_len = (3..=90).contains(&text.len());
        let valid_chars = text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        if !valid_len || !valid_chars {
            return Err(AmmError::Validation(ValidationError::MalformedAddress {
                address: text.to_string(),
            }));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A trader's membership tier; only the discount matters to this core.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MembershipTier {
    pub discount: Decimal,
}
