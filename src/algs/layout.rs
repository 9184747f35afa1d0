//! Layered 2.5D placement of a topologically ordered graph.
//!
//! Nodes are grouped by longest-path depth (`layer`). Each layer becomes a
//! ring of radius `radius_base + radius_step * layer`, pushed down the z axis
//! by `layer_gap` per layer; nodes are spread evenly around their ring in the
//! order they appear in the topological order.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};

/// Geometry knobs for [`make_layered_layout`].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Distance between consecutive layers along z.
    pub layer_gap: f32,
    /// Ring radius of layer 0.
    pub radius_base: f32,
    /// Radius added per layer. The bundled demo widens this to `1.2`.
    pub radius_step: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layer_gap: 1.5,
            radius_base: 2.0,
            radius_step: 1.0,
        }
    }
}

/// One placed node.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub layer: u32,
}

/// Longest-path depth of every node: `0` for sources, otherwise one more
/// than the deepest predecessor.
///
/// `topo` must be a topological order of `graph`; nodes missing from it
/// stay on layer 0.
pub fn compute_layers<G: Graph + ?Sized>(graph: &G, topo: &[NodeId]) -> Vec<u32> {
    let mut layer = vec![0u32; graph.node_count()];
    for &u in topo {
        let next = layer[u as usize] + 1;
        for &v in graph.neighbor_span(u) {
            let slot = &mut layer[v as usize];
            *slot = (*slot).max(next);
        }
    }
    layer
}

/// Place the nodes of `topo` on concentric rings, one ring per layer.
/// Points come out in `topo` order.
pub fn make_layered_layout<G: Graph + ?Sized>(
    graph: &G,
    topo: &[NodeId],
    config: &LayoutConfig,
) -> Vec<LayoutPoint> {
    let layer = compute_layers(graph, topo);
    let depth = layer.iter().copied().max().map_or(0, |m| m as usize + 1);
    let mut per_layer = vec![0u32; depth];
    for &l in &layer {
        per_layer[l as usize] += 1;
    }

    let mut seen = vec![0u32; depth];
    topo.iter()
        .map(|&id| {
            let l = layer[id as usize];
            let slot = &mut seen[l as usize];
            let idx = *slot;
            *slot += 1;
            let count = per_layer[l as usize].max(1);
            let angle = idx as f32 / count as f32 * TAU;
            let radius = config.radius_base + config.radius_step * l as f32;
            LayoutPoint {
                id,
                x: radius * angle.cos(),
                y: radius * angle.sin(),
                z: -config.layer_gap * l as f32,
                layer: l,
            }
        })
        .collect()
}
