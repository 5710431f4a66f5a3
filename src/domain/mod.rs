//! Domain layer containing quiz business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `scoring` - Axis score aggregation from answers
//! - `resolution` - Result strategies and the resolver that applies them
//! - `interpretation` - Result-type content, section ordering and personalization inputs
//! - `generation` - Parsing of generated model replies
//! - `adaptive` - Generated-question session lifecycle

pub mod adaptive;
pub mod foundation;
pub mod generation;
pub mod interpretation;
pub mod resolution;
pub mod scoring;
