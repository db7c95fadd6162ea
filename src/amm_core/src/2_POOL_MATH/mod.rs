//! Pool math - weight model and slippage model
//! Deterministic pricing primitives shared by the swap and exit engines

pub mod slippage;
pub mod weights;

pub use slippage::calc_given_in_slippage;
pub use weights::{
    denom_normalized_weight, denom_oracle_asset_weight, new_pool_assets_after_swap,
    normalized_weights, oracle_normalized_weights, weight_distance_from_target, AssetWeight,
};
