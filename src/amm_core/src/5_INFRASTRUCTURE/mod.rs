//! Infrastructure - Shared utilities and types
//! Foundation layer for all other modules

pub mod constants;
pub mod errors;
pub mod math;

// Re-export commonly used items
pub use constants::*;
pub use errors::{
    AmmError, CalculationError, EstimateError, ExitError, PoolError, PriceError, Result,
    SwapError, ValidationError,
};
pub use math::{
    biguint_to_decimal, checked_mul, checked_quo, decimal_to_biguint_round,
    decimal_to_biguint_trunc, quo_with_one_fallback,
};
