//! Error types for the AMM core
//!
//! One top-level enum wrapping per-domain enums, so callers can match on
//! the domain first and the concrete failure second. Every hard failure
//! rejects a single requested operation; nothing here is process-fatal,
//! and no pool state is mutated on any error path.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AmmError>;

/// Top-level error for all fallible operations in this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmmError {
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Swap error: {0}")]
    Swap(#[from] SwapError),

    #[error("Estimate error: {0}")]
    Estimate(#[from] EstimateError),

    #[error("Exit error: {0}")]
    Exit(#[from] ExitError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Oracle price lookup failures. A zero price is "not set".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("price for token not set: {denom}")]
    NotSet { denom: String },
}

/// Pool shape and balance failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("asset not found in pool: {denom}")]
    AssetNotFound { denom: String },

    #[error("negative pool amount after operation: {denom}")]
    NegativeBalance { denom: String },

    #[error("expected tokens in to be of length one, got {count}")]
    InvalidTokensIn { count: usize },

    #[error("input and output denom are the same: {denom}")]
    SameDenom { denom: String },

    #[error("balance set does not match pool assets: expected {expected}, got {actual}")]
    MismatchedBalances { expected: usize, actual: usize },
}

/// Swap-execution failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    /// External-liquidity ratio is zero; the slippage model would divide
    /// by zero, so the trade is treated as too small to price.
    #[error("amount too low")]
    AmountTooLow,

    #[error("swap fee {fee} must be less than 1")]
    ExcessiveSwapFee { fee: String },
}

/// Quote/estimation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    #[error("amount denom {denom} matches neither side of the trade")]
    InvalidDenom { denom: String },

    #[error("spot price is zero while price impact was requested")]
    ZeroSpotPrice,
}

/// Exit-pool failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExitError {
    #[error("exiting shares {requested} exceed total shares {available}")]
    InsufficientShares { requested: String, available: String },
}

/// Arithmetic failures from the decimal/integer helpers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculationError {
    #[error("division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    #[error("overflow in {operation}")]
    Overflow { operation: &'static str },

    #[error("negative result in {operation}")]
    NegativeResult { operation: &'static str },
}

/// Input validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed address: {address}")]
    MalformedAddress { address: String },
}
