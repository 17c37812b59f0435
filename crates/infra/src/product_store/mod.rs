//! Product document store boundary.
//!
//! Handlers only see the [`ProductStore`] trait; the process wires in either the
//! MongoDB adapter or the in-memory double.

pub mod in_memory;
pub mod mongo;
pub mod r#trait;

pub use in_memory::InMemoryProductStore;
pub use mongo::MongoProductStore;
pub use r#trait::{DeleteOutcome, ProductStore, StoreError, UpdateOutcome};
