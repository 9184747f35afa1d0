//! Little-endian base-128 varints and the delta-coded neighbor view.
//!
//! Each byte carries seven value bits, low group first; the high bit is set
//! on every byte except the last (LEB128 for `u32`). A node's neighbor run is
//! stored as the first neighbor in absolute form followed by the gaps to each
//! next neighbor, which only works because runs are ascending.
//!
//! Decoding never reads past the end of the slice it is given. A truncated or
//! over-long sequence decodes to *some* value instead of failing; only buffers
//! produced by [`encode_u32`] are ever decoded by the store.

use super::NodeId;
use super::frozen_csr::FrozenCsr;
use super::graph_trait::Graph;

const CONTINUATION: u8 = 0x80;
const PAYLOAD: u8 = 0x7F;

/// Append `value` to `out`, returning the number of bytes written.
pub fn encode_u32(mut value: u32, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    while value >= u32::from(CONTINUATION) {
        out.push((value as u8) | CONTINUATION);
        value >>= 7;
    }
    out.push(value as u8);
    out.len() - start
}

/// Number of bytes [`encode_u32`] produces for `value` (at least one).
#[inline]
pub fn encoded_len(value: u32) -> usize {
    let bits = (u32::BITS - value.leading_zeros()).max(1) as usize;
    bits.div_ceil(7)
}

/// Decode one value from `buf[*pos..]`, advancing `pos` past it.
///
/// Stops at the end of `buf` even if the last byte still has its
/// continuation bit set; groups beyond the 32nd bit are dropped.
pub fn decode_u32(buf: &[u8], pos: &mut usize) -> u32 {
    let mut value = 0u32;
    let mut shift = 0u32;
    while let Some(&byte) = buf.get(*pos) {
        *pos += 1;
        if shift < u32::BITS {
            value |= u32::from(byte & PAYLOAD) << shift;
        }
        if byte & CONTINUATION == 0 {
            break;
        }
        shift = shift.saturating_add(7);
    }
    value
}

/// Delta-coded neighbor runs for every node, derived from a CSR view.
#[derive(Clone, Debug, Default)]
pub struct VarintView {
    /// Concatenated per-node runs.
    pub bytes: Vec<u8>,
    /// `bytes[offsets[u]..offsets[u + 1]]` is the run of node `u` (size n+1).
    pub offsets: Vec<u32>,
}

impl VarintView {
    /// Encode every run of `csr`.
    pub fn from_csr(csr: &FrozenCsr) -> Self {
        let n = csr.node_count();
        let mut bytes = Vec::with_capacity(csr.neighbors.len());
        let mut offsets = Vec::with_capacity(n + 1);
        offsets.push(0u32);
        for u in 0..n {
            let mut prev: Option<NodeId> = None;
            for &v in csr.run(u) {
                let delta = prev.map_or(v, |p| v.wrapping_sub(p));
                encode_u32(delta, &mut bytes);
                prev = Some(v);
            }
            // byte length is bounded by 5 * edge_count, which the store keeps below u32::MAX / 5
            offsets.push(bytes.len() as u32);
        }
        Self { bytes, offsets }
    }

    /// Number of nodes covered by this view.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Raw encoded run of `u`; empty for unknown nodes.
    pub fn run_bytes(&self, u: NodeId) -> &[u8] {
        let i = u as usize;
        if i >= self.node_count() {
            return &[];
        }
        &self.bytes[self.offsets[i] as usize..self.offsets[i + 1] as usize]
    }

    /// Iterate the decoded neighbors of `u`.
    #[inline]
    pub fn neighbors(&self, u: NodeId) -> VarintNeighbors<'_> {
        VarintNeighbors::new(self.run_bytes(u))
    }

    /// Bytes held by the buffer and its offset table.
    #[inline]
    pub fn byte_size(&self) -> usize {
        self.bytes.len() + self.offsets.len() * std::mem::size_of::<u32>()
    }
}

/// Decoder over one delta-coded run.
#[derive(Clone, Debug)]
pub struct VarintNeighbors<'a> {
    run: &'a [u8],
    pos: usize,
    prev: Option<NodeId>,
}

impl<'a> VarintNeighbors<'a> {
    /// Decode `run`, which must be a complete run as written by [`VarintView`].
    pub fn new(run: &'a [u8]) -> Self {
        Self {
            run,
            pos: 0,
            prev: None,
        }
    }
}

impl Iterator for VarintNeighbors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.pos >= self.run.len() {
            return None;
        }
        let delta = decode_u32(self.run, &mut self.pos);
        let v = self.prev.map_or(delta, |p| p.wrapping_add(delta));
        self.prev = Some(v);
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.run.len() - self.pos;
        (usize::from(left > 0), Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        encode_u32(value, &mut out);
        out
    }

    #[test]
    fn known_encodings() {
        assert_eq!(encode(0), vec![0x00]);
        assert_eq!(encode(1), vec![0x01]);
        assert_eq!(encode(127), vec![0x7F]);
        assert_eq!(encode(128), vec![0x80, 0x01]);
        assert_eq!(encode(300), vec![0xAC, 0x02]);
        assert_eq!(encode(u32::MAX), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    }

    #[test]
    fn encoded_len_matches_encoder() {
        for v in [0, 1, 127, 128, 16_383, 16_384, 2_097_151, 2_097_152, u32::MAX] {
            assert_eq!(encoded_len(v), encode(v).len(), "value {v}");
        }
    }

    #[test]
    fn decode_advances_past_each_value() {
        let mut buf = Vec::new();
        for v in [5, 300, 0, u32::MAX] {
            encode_u32(v, &mut buf);
        }
        let mut pos = 0;
        let got: Vec<u32> = (0..4).map(|_| decode_u32(&buf, &mut pos)).collect();
        assert_eq!(got, vec![5, 300, 0, u32::MAX]);
        assert_eq!(pos, buf.len());
    }

    #[test]
    fn truncated_input_stops_at_end() {
        // continuation bit set on the final byte
        let buf = [0x80u8, 0x80];
        let mut pos = 0;
        assert_eq!(decode_u32(&buf, &mut pos), 0);
        assert_eq!(pos, 2);

        let mut pos = 0;
        assert_eq!(decode_u32(&[], &mut pos), 0);
        assert_eq!(pos, 0);
    }

    #[test]
    fn overlong_input_does_not_panic() {
        let buf = [0xFFu8; 12];
        let mut pos = 0;
        let _ = decode_u32(&buf, &mut pos);
        assert_eq!(pos, buf.len());
        assert_eq!(VarintNeighbors::new(&buf).count(), 1);
    }

    #[test]
    fn view_covers_every_csr_node() {
        // 0 -> {1, 130}, 2 -> {0}, every other node has no successors
        let mut offsets = vec![0u32, 2, 2];
        offsets.extend(std::iter::repeat(3u32).take(129));
        let csr = FrozenCsr::try_from_parts(offsets, vec![1, 130, 0]).unwrap();
        let view = VarintView::from_csr(&csr);
        assert_eq!(view.node_count(), 131);
        assert_eq!(view.run_bytes(0), &[0x01, 0x81, 0x01]);
        assert_eq!(view.neighbors(0).collect::<Vec<_>>(), vec![1, 130]);
        assert!(view.run_bytes(1).is_empty());
        assert_eq!(view.neighbors(2).collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn run_decodes_deltas() {
        // absolute 3, then +1
        let run = [0x03u8, 0x01];
        let got: Vec<_> = VarintNeighbors::new(&run).collect();
        assert_eq!(got, vec![3, 4]);
    }
}
