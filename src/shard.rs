/*!
 * Shard Configuration
 *
 * CPU-topology-aware shard count selection for the set's backing map.
 * Shard counts scale with the host's core count so a set behaves well
 * on anything from a 2-core container to a 128-core server.
 *
 * # Design Rationale
 *
 * - **Power-of-2 shards**: fast key-to-shard mapping via bitwise AND
 * - **CPU-proportional scaling**: more cores benefit from more shards
 * - **Pure functions**: everything inlines; no singleton, no state
 */

/// Expected contention on a set, used to pick its shard count.
///
/// More shards mean fewer threads colliding on the same shard lock at
/// the price of memory overhead and slower full traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentionProfile {
    /// Many threads mutating hot keys concurrently.
    /// Shard count: 4x CPU cores
    High,

    /// Mixed read/write access from a moderate number of threads.
    /// Shard count: 2x CPU cores
    Medium,

    /// Mostly reads, occasional mutation.
    /// Shard count: 1x CPU cores
    Low,
}

/// Detect the host's available parallelism.
#[inline]
pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or_else(|_| {
            log::warn!("Failed to detect CPU count, defaulting to 8");
            8
        })
}

/// Calculate the shard count for a contention profile.
///
/// Always a power of two, clamped to [8, 512]: the floor avoids
/// degenerate sharding on 1-2 core systems, the ceiling caps memory
/// overhead where extra shards stop paying for themselves.
#[inline]
pub fn optimal_shards(profile: ContentionProfile) -> usize {
    let multiplier = match profile {
        ContentionProfile::High => 4,
        ContentionProfile::Medium => 2,
        ContentionProfile::Low => 1,
    };

    let calculated = (cpu_count() * multiplier).next_power_of_two();
    calculated.clamp(8, 512)
}
