//! AMM Core - Oracle-Hybrid Pricing with Numbered Zones
//!
//! Architecture:
//! 1_SWAP_ENGINE - Out-given-in swap orchestration (highest scrutiny)
//! 2_POOL_MATH - Weight and slippage models
//! 3_QUOTES - Read-only route estimation
//! 4_EXIT - Share burns and pool-state rebuilds
//! 5_INFRASTRUCTURE - Math, errors, constants
//!
//! All arithmetic is fixed-point decimal over unsigned big integers;
//! nothing in this crate touches floating point, and every payout
//! truncates toward zero. External state (oracle prices, accounted
//! balances, tiers, routes) comes in through the traits in [`types`].

// Import numbered modules with explicit paths
#[path = "1_SWAP_ENGINE/mod.rs"]
mod swap_engine_1;
use swap_engine_1 as swap_engine;

#[path = "2_POOL_MATH/mod.rs"]
mod pool_math_2;
use pool_math_2 as pool_math;

#[path = "3_QUOTES/mod.rs"]
mod quotes_3;
use quotes_3 as quotes;

#[path = "4_EXIT/mod.rs"]
mod exit_4;
use exit_4 as exit;

#[path = "5_INFRASTRUCTURE/mod.rs"]
mod infrastructure_5;
use infrastructure_5 as infrastructure;

pub mod types;

// ===== PUBLIC API =====

pub use infrastructure::{
    AmmError, CalculationError, EstimateError, ExitError, PoolError, PriceError, Result,
    SwapError, ValidationError, MAX_DECIMAL_MANTISSA, SWAP_GAS_FEE,
};

pub use pool_math::{
    calc_given_in_slippage, denom_normalized_weight, denom_oracle_asset_weight,
    new_pool_assets_after_swap, normalized_weights, oracle_normalized_weights,
    weight_distance_from_target, AssetWeight,
};

pub use swap_engine::{get_accounted_balance, swap_out_amt_given_in, SwapDeps, SwapOutcome};

pub use quotes::{estimate_swap_by_denom, SwapEstimate};

pub use exit::{exit_pool, ExitOutcome};
