//! Cache invalidation shared by structures that keep derived views.

/// Anything that caches derived adjacency (CSR, varint runs, …) should
/// implement this.
pub trait InvalidateCache {
    /// Invalidate *all* internal caches so future queries rebuild them.
    fn invalidate_cache(&mut self);
}
