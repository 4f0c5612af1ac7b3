//! # Congress Store
//!
//! Local key/value storage standing in for the browser's `localStorage`.
//!
//! ## Components
//!
//! - `LocalStore` - Storage port
//! - `MemoryStore` - Volatile store for tests and one-shot runs
//! - `FileStore` - JSON file persisted across CLI invocations
//! - `keys` - Typed accessors for the keys the client uses

mod error;
mod file;
pub mod keys;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage port.
///
/// Values are opaque strings, mirroring `localStorage`; typed access goes
/// through [`keys`].
pub trait LocalStore: Send + Sync {
    /// Read a value
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// All stored keys, sorted
    fn keys(&self) -> StoreResult<Vec<String>>;
}
