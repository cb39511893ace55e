//! Multi-node cursor follower.
//!
//! Node 0 eases toward the pointer; every later node eases toward where its
//! predecessor was at the *start* of the tick.  Reading the predecessor's
//! already-updated position instead would let the whole chain collapse onto
//! the pointer in a single tick.

/// Repeating per-index node palette (RGB).
pub const FOLLOWER_PALETTE: &[(u8, u8, u8)] = &[
    (255, 128, 0),
    (255, 170, 40),
    (255, 210, 90),
    (255, 90, 60),
    (230, 60, 120),
];

/// One visual node of the chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FollowerNode {
    pub x: f64,
    pub y: f64,
    pub color: (u8, u8, u8),
}

/// Fixed-length chain of follower nodes, created in one batch.
#[derive(Debug, Clone)]
pub struct FollowerChain {
    nodes: Vec<FollowerNode>,
    ease: f64,
    /// Scratch buffer for start-of-tick positions, reused every tick.
    previous: Vec<(f64, f64)>,
}

impl FollowerChain {
    /// `len` nodes all placed at `origin`.
    pub fn new(len: usize, ease: f64, origin: (f64, f64)) -> Self {
        let nodes = (0..len.max(1))
            .map(|i| FollowerNode {
                x: origin.0,
                y: origin.1,
                color: FOLLOWER_PALETTE[i % FOLLOWER_PALETTE.len()],
            })
            .collect::<Vec<_>>();
        let previous = Vec::with_capacity(nodes.len());
        Self {
            nodes,
            ease: ease.clamp(0.01, 1.0),
            previous,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[FollowerNode] {
        &self.nodes
    }

    /// Radius of node `index` given the head radius; later nodes are smaller.
    pub fn radius_of(&self, index: usize, head_radius: f64) -> f64 {
        let n = self.nodes.len() as f64;
        head_radius * (n - index as f64) / n
    }

    /// Advance one animation tick toward `target`.
    pub fn tick(&mut self, target: (f64, f64)) {
        self.previous.clear();
        self.previous.extend(self.nodes.iter().map(|n| (n.x, n.y)));

        let ease = self.ease;
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let (tx, ty) = if i == 0 { target } else { self.previous[i - 1] };
            node.x += (tx - node.x) * ease;
            node.y += (ty - node.y) * ease;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(node: &FollowerNode, p: (f64, f64)) -> f64 {
        ((node.x - p.0).powi(2) + (node.y - p.1).powi(2)).sqrt()
    }

    #[test]
    fn single_jump_lags_monotonically_by_index() {
        let a = (100.0, 100.0);
        let b = (300.0, 200.0);
        let mut chain = FollowerChain::new(20, 0.3, a);
        chain.tick(b);

        let head = dist(&chain.nodes()[0], b);
        for node in &chain.nodes()[1..] {
            assert!(head < dist(node, b));
        }
        // Head moved exactly 30% of the way.
        assert!((chain.nodes()[0].x - 160.0).abs() < 1e-9);
        assert!((chain.nodes()[0].y - 130.0).abs() < 1e-9);
        // Everyone else still sits on A after one tick.
        assert_eq!((chain.nodes()[1].x, chain.nodes()[1].y), a);
    }

    #[test]
    fn chain_does_not_collapse_in_one_tick() {
        let mut chain = FollowerChain::new(5, 0.3, (0.0, 0.0));
        chain.tick((10.0, 0.0));
        chain.tick((10.0, 0.0));
        let xs: Vec<f64> = chain.nodes().iter().map(|n| n.x).collect();
        // Tick 2: node 1 eases toward node 0's tick-1 position (3.0).
        assert!((xs[0] - 5.1).abs() < 1e-9);
        assert!((xs[1] - 0.9).abs() < 1e-9);
        assert_eq!(xs[2], 0.0);
    }

    #[test]
    fn converges_onto_a_still_target() {
        let mut chain = FollowerChain::new(8, 0.3, (0.0, 0.0));
        for _ in 0..400 {
            chain.tick((50.0, -20.0));
        }
        for node in chain.nodes() {
            assert!(dist(node, (50.0, -20.0)) < 1e-3);
        }
    }

    #[test]
    fn palette_repeats_by_index_and_radius_shrinks() {
        let chain = FollowerChain::new(12, 0.3, (0.0, 0.0));
        assert_eq!(chain.len(), 12);
        assert_eq!(chain.nodes()[0].color, chain.nodes()[FOLLOWER_PALETTE.len()].color);
        assert_eq!(chain.radius_of(0, 10.0), 10.0);
        assert!(chain.radius_of(11, 10.0) < chain.radius_of(10, 10.0));
        assert!(chain.radius_of(11, 10.0) > 0.0);
    }
}
