//! Interpretation handlers.

mod assemble;

pub use assemble::{AssembleRequest, AssemblerConfig, InterpretationAssembler};
