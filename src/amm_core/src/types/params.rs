//! Global protocol parameters
//!
//! Read-only knobs shared by every pool. Loading/governance of these
//! values happens outside this core; they arrive as plain values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::infrastructure::constants::SWAP_GAS_FEE;

/// Protocol-wide numeric parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Floor on the modeled slippage ratio for oracle-backed swaps.
    /// Never bypassed: a naturally smaller ratio is clamped up to this.
    pub min_slippage: Decimal,
    /// Fixed gas charged per swap call, regardless of outcome.
    pub swap_gas_fee: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_slippage: Decimal::ZERO,
            swap_gas_fee: SWAP_GAS_FEE,
        }
    }
}
