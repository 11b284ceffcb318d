//! Table store adapters

mod in_memory;
mod postgrest;

pub use in_memory::InMemoryTableStore;
pub use postgrest::PostgrestStore;
