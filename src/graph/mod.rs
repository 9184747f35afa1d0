//! Graph storage: the read contract shared by every solver, the mutable
//! compressed store, its frozen CSR view and the varint codec.

pub mod cache;
pub mod compressed;
pub mod frozen_csr;
pub mod graph_trait;
pub mod varint;

/// Dense node identifier in `[0, node_count)`.
pub type NodeId = u32;

pub use cache::InvalidateCache;
pub use compressed::{CompressedGraph, MemoryFootprint};
pub use frozen_csr::FrozenCsr;
pub use graph_trait::Graph;
pub use varint::VarintNeighbors;

static_assertions::assert_impl_all!(CompressedGraph: Send, Sync);
static_assertions::assert_impl_all!(FrozenCsr: Send, Sync);
