//! Protocol constants

/// Fixed gas consumed per swap call, successful or not. Spam deterrent,
/// not a scheduling mechanism.
pub const SWAP_GAS_FEE: u64 = 10_000;

/// Largest integer representable in a `Decimal` mantissa (2^96 - 1).
/// Amounts above this cannot enter decimal math and are rejected as
/// overflow rather than silently truncated.
pub const MAX_DECIMAL_MANTISSA: u128 = 79_228_162_514_264_337_593_543_950_335;
