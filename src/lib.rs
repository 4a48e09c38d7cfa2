/*!
 * SyncSet Library
 * Concurrency-safe generic set backed by a sharded concurrent map
 */

pub mod set;
pub mod shard;

// Re-exports
pub use set::{ConcurrentSet, ItemRef, Iter};
pub use shard::{cpu_count, optimal_shards, ContentionProfile};
