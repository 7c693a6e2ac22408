//! Document store implementations.

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::RestStore;
