//! Persona Lens - Personality quiz scoring and adaptive question sessions
//!
//! This crate scores quiz answers along named axes, resolves the scores into
//! a result type under a per-analysis strategy, assembles the result's
//! sectioned interpretation, and drives generated-question sessions that
//! adapt to earlier answers.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
