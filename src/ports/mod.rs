//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Content Ports
//!
//! - `QuizContentStore` - Authored strategies, weights, result types, themes
//!
//! ## Persistence Ports
//!
//! - `AdaptiveSessionRepository` - Adaptive session aggregates
//! - `ResultRepository` - Stored quiz results
//!
//! ## Generation Ports
//!
//! - `AIProvider` - Text generation for adaptive questions and personalization

mod adaptive_session_repository;
mod ai_provider;
mod quiz_content_store;
mod result_repository;

pub use adaptive_session_repository::AdaptiveSessionRepository;
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, GenerationPurpose,
    Message, MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use quiz_content_store::QuizContentStore;
pub use result_repository::ResultRepository;
