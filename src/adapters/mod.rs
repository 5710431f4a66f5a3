//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Text-generation providers (OpenAI, mock)
//! - `catalog` - YAML quiz content
//! - `memory` - In-memory session and result store
//! - `postgres` - PostgreSQL session and result repositories

pub mod ai;
pub mod catalog;
pub mod memory;
pub mod postgres;
