//! Static quiz handlers.

mod compute_result;
mod errors;
mod get_statistics;
mod lookup_compatibility;

pub use compute_result::{ComputeResultCommand, ComputeResultHandler, ComputeResultResult};
pub use errors::QuizError;
pub use get_statistics::GetResultStatisticsHandler;
pub use lookup_compatibility::{
    CompatibilityView, LookupCompatibilityHandler, LookupCompatibilityQuery, MatchView,
};
