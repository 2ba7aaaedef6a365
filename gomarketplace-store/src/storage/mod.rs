//! Key-value storage backends for the cart.
//!
//! - [`memory`] - In-process map, for tests and throwaway sessions
//! - [`file`] - One file per key in a data directory

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;
