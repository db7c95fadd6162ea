//! Shared value types and collaborator interfaces

pub mod coin;
pub mod params;
pub mod pool;
pub mod sources;

pub use coin::{Coin, Coins};
pub use params::Params;
pub use pool::{Pool, PoolAsset, PoolParams};
pub use sources::{
    AccountId, AccountedPool, ExitBreakdown, ExitCalculator, GasMeter, MembershipTier,
    OutGivenInCalculator, PriceOracle, RoutePriceReport, RoutePricer, SwapAmountInRoute,
    SwapAmountOutRoute, TierRegistry, WeightFeePolicy, WeightFees,
};
