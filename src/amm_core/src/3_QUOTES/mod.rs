//! # Quotes
//!
//! Read-only swap estimation over multi-hop routes. Given an amount
//! anchored to either end of a denom pair, picks the matching route
//! direction, prices it through the route collaborator, and reports a
//! single flattened estimate record. Nothing here mutates state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::infrastructure::{checked_quo, AmmError, EstimateError, Result};
use crate::types::{
    AccountId, Coin, RoutePriceReport, RoutePricer, SwapAmountInRoute, SwapAmountOutRoute,
    TierRegistry,
};

/// Flattened quote for a swap by denom pair.
///
/// Exactly one of `in_route` / `out_route` is populated, matching which
/// end of the pair the quoted amount was anchored to. `Default` is the
/// documented all-zero value: no routes, empty coins, zero rates.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwapEstimate {
    pub in_route: Option<Vec<SwapAmountInRoute>>,
    pub out_route: Option<Vec<SwapAmountOutRoute>>,
    pub out_amount: Coin,
    pub spot_price: Decimal,
    pub swap_fee: Decimal,
    pub discount: Decimal,
    pub available_liquidity: Coin,
    pub slippage: Decimal,
    pub weight_bonus: Decimal,
    /// Relative drop from spot to impacted price. Only computed when the
    /// caller supplies a non-zero `decimals`; zero otherwise.
    pub price_impact: Decimal,
}

/// Estimate a swap anchored to `denom_in` or `denom_out`.
///
/// `amount.denom` selects the direction: equal to `denom_in` quotes
/// forward (out given in), equal to `denom_out` quotes in reverse (in
/// given out), anything else is rejected. A malformed `address` falls
/// back to the zero identity rather than failing the whole estimate, so
/// anonymous quotes still work at the non-member discount.
#[allow(clippy::too_many_arguments)]
pub fn estimate_swap_by_denom(
    amount: &Coin,
    denom_in: &str,
    denom_out: &str,
    base_currency: &str,
    address: &str,
    override_swap_fee: Decimal,
    decimals: u64,
    routes: &dyn RoutePricer,
    tiers: &dyn TierRegistry,
) -> Result<SwapEstimate> {
    let account = AccountId::from_text(address).unwrap_or_default();
    let discount = tiers.membership_tier(&account).discount;

    if amount.denom == denom_in {
        let route = routes.in_route_by_denom(denom_in, denom_out, base_currency)?;
        let report = routes.in_route_spot_price(amount, &route, discount, override_swap_fee)?;
        let price_impact = price_impact(&report, decimals)?;
        debug!(denom_in, denom_out, out = %report.out_amount, "forward quote");
        return Ok(SwapEstimate {
            in_route: Some(route),
            out_route: None,
            price_impact,
            ..from_report(report)
        });
    }

    if amount.denom == denom_out {
        let route = routes.out_route_by_denom(denom_out, denom_in, base_currency)?;
        let report = routes.out_route_spot_price(amount, &route, discount, override_swap_fee)?;
        let price_impact = price_impact(&report, decimals)?;
        debug!(denom_in, denom_out, out = %report.out_amount, "reverse quote");
        return Ok(SwapEstimate {
            in_route: None,
            out_route: Some(route),
            price_impact,
            ..from_report(report)
        });
    }

    Err(AmmError::Estimate(EstimateError::InvalidDenom {
        denom: amount.denom.clone(),
    }))
}

fn from_report(report: RoutePriceReport) -> SwapEstimate {
    SwapEstimate {
        in_route: None,
        out_route: None,
        out_amount: report.out_amount,
        spot_price: report.spot_price,
        swap_fee: report.swap_fee,
        discount: report.discount,
        available_liquidity: report.available_liquidity,
        slippage: report.slippage,
        weight_bonus: report.weight_bonus,
        price_impact: Decimal::ZERO,
    }
}

/// (spot - impacted) / spot, gated on the caller asking for it.
///
/// A zero spot price is only an error when the impact was requested;
/// callers that pass `decimals == 0` never see it.
fn price_impact(report: &RoutePriceReport, decimals: u64) -> Result<Decimal> {
    if decimals == 0 {
        return Ok(Decimal::ZERO);
    }
    if report.spot_price.is_zero() {
        return Err(AmmError::Estimate(EstimateError::ZeroSpotPrice));
    }
    checked_quo(
        report.spot_price - report.impacted_price,
        report.spot_price,
        "price impact",
    )
}
