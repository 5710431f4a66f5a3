//! In-memory adapters for tests and development.

mod in_memory_store;

pub use in_memory_store::InMemoryQuizStore;
