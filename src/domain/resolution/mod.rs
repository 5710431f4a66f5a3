//! Resolution Module - Maps axis scores to a result type.
//!
//! # Components
//!
//! - `StrategyConfig` - Tagged strategy configuration (binary pairs,
//!   continuous, categories, custom combinatorial)
//! - `ResultResolver` - Pure, deterministic resolution
//! - `QuizResult` - Stored outcome of a completed session
//! - `CompatibilityEntry` - Best/worst matches per result type
//! - `ResultStatistics` - Result counts per analysis

mod compatibility;
mod errors;
mod quiz_result;
mod resolved;
mod resolver;
mod statistics;
mod strategy;

pub use compatibility::{CompatibilityEntry, CompatibilityMatch};
pub use errors::ResolveError;
pub use quiz_result::QuizResult;
pub use resolved::{AxisLevel, AxisPole, CategoryScore, ResolutionDetail, ResolvedResult};
pub use resolver::{ResultResolver, NO_DOMINANT_CATEGORY};
pub use statistics::ResultStatistics;
pub use strategy::{
    AxisDefinition, BinaryPairsConfig, CategoriesConfig, CombinatorialConfig, ContinuousConfig,
    GenderTitles, RangeBucket, StrategyConfig, StrategyKind, DEFAULT_SEPARATOR, UNKNOWN_LEVEL,
};
