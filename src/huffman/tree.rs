use super::FrequencyMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Index of a node inside a [`HuffmanTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: char,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: NodeId,
        right: NodeId,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } => *weight,
            Node::Internal { weight, .. } => *weight,
        }
    }
}

/// A binary prefix tree built from a [`FrequencyMap`].
///
/// Nodes live in an arena and refer to their children by [`NodeId`], so every
/// node has at most one parent and dropping the tree never recurses.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl HuffmanTree {
    /// Build the tree for `frequencies`, or `None` if the map is empty.
    ///
    /// The two lightest nodes get merged until one is left. Nodes of equal
    /// weight leave the heap in the order they were put in: leaves go in by
    /// ascending symbol, merged nodes after all leaves in creation order.
    /// This only depends on the frequencies, so compressing and decompressing
    /// always arrive at the same tree.
    pub fn build(frequencies: &FrequencyMap) -> Option<HuffmanTree> {
        if frequencies.is_empty() {
            return None;
        }

        let mut nodes = Vec::with_capacity(frequencies.len() * 2 - 1);
        // node indices grow with every push, so they double as the
        // insertion sequence that orders equal weights
        let mut heap = BinaryHeap::with_capacity(frequencies.len());
        for (symbol, weight) in frequencies {
            let id = NodeId(nodes.len());
            nodes.push(Node::Leaf { symbol, weight });
            heap.push(Reverse((weight, id)));
        }

        let root = loop {
            let Reverse((left_weight, left)) = heap.pop()?;
            let Reverse((right_weight, right)) = match heap.pop() {
                Some(entry) => entry,
                None => break left,
            };
            let weight = left_weight + right_weight;
            let id = NodeId(nodes.len());
            nodes.push(Node::Internal {
                weight,
                left,
                right,
            });
            heap.push(Reverse((weight, id)));
        };

        tracing::trace!(
            leaves = frequencies.len(),
            nodes = nodes.len(),
            "built huffman tree"
        );
        Some(HuffmanTree { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// The child reached by following `bit` from `id`, `false` being left.
    /// Leaves have no children.
    pub fn child(&self, id: NodeId, bit: bool) -> Option<NodeId> {
        match self.node(id) {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some(if bit { *right } else { *left }),
        }
    }

    /// The symbol stored at `id` if it is a leaf
    pub fn symbol(&self, id: NodeId) -> Option<char> {
        match self.node(id) {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// True if the whole tree is one leaf, which happens when the text
    /// consists of a single repeated symbol.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.node(self.root), Node::Leaf { .. })
    }

    pub fn leaf_count(&self) -> usize {
        // a full binary tree with n leaves has n - 1 internal nodes
        (self.nodes.len() + 1) / 2
    }

    /// Weight of the root, i.e. the number of symbols the tree encodes
    pub fn weight(&self) -> u64 {
        self.node(self.root).weight()
    }
}
