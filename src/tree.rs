// Joseph Prichard
// 1/5/2023
// Binary tree structure used for huffman coding and the greedy tree builder

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;
use crate::freq::FrequencyTable;

pub struct Tree {
    pub left: Option<Box<Tree>>,
    pub right: Option<Box<Tree>>,
    pub plain_symbol: u8,
    pub weight: u64,
}

impl Tree {
    // creates a leaf structure with no children
    pub fn leaf(symbol: u8, weight: u64) -> Tree {
        Tree {
            left: None,
            right: None,
            plain_symbol: symbol,
            weight,
        }
    }

    // moves the left and right nodes
    pub fn internal(left: Box<Tree>, right: Box<Tree>) -> Tree {
        let weight = left.weight + right.weight;
        Tree {
            left: Some(left),
            right: Some(right),
            plain_symbol: 0,
            weight,
        }
    }

    // an internal node with only a left child, so a lone symbol gets the code "0"
    pub fn wrap(leaf: Box<Tree>) -> Tree {
        Tree {
            weight: leaf.weight,
            left: Some(leaf),
            right: None,
            plain_symbol: 0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    // the child selected by a code bit, None where the tree has no such branch
    pub fn child(&self, bit: u8) -> Option<&Tree> {
        if bit == 0 {
            self.left.as_deref()
        } else {
            self.right.as_deref()
        }
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.left.as_ref().map_or(0, |left| left.leaf_count())
            + self.right.as_ref().map_or(0, |right| right.leaf_count())
    }

    pub fn depth(&self) -> usize {
        let left = self.left.as_ref().map_or(0, |left| left.depth() + 1);
        let right = self.right.as_ref().map_or(0, |right| right.depth() + 1);
        left.max(right)
    }
}

pub struct CodeTree {
    pub root: Box<Tree>,
    pub symbol_count: u32,
}

// a node waiting in the priority queue, order is the insertion sequence number
struct QueuedTree {
    order: u32,
    node: Box<Tree>,
}

impl Eq for QueuedTree {}

impl PartialEq<Self> for QueuedTree {
    fn eq(&self, other: &Self) -> bool {
        self.node.weight == other.node.weight && self.order == other.order
    }
}

impl PartialOrd<Self> for QueuedTree {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedTree {
    // reversed so the max heap pops the lightest node, earliest inserted first on ties
    fn cmp(&self, other: &Self) -> Ordering {
        other.node.weight.cmp(&self.node.weight)
            .then_with(|| other.order.cmp(&self.order))
    }
}

// grows the huffman tree for a frequency table, None when the table is empty
pub fn grow(freq_table: &FrequencyTable) -> Option<CodeTree> {
    let mut heap = BinaryHeap::with_capacity(freq_table.alphabet_count() as usize);

    // add the frequency table leaves to priority queue in ascending symbol order
    let mut order = 0;
    for (symbol, weight) in freq_table.iter() {
        heap.push(QueuedTree { order, node: Box::new(Tree::leaf(symbol, weight)) });
        order += 1;
    }
    let symbol_count = order;

    // huffman coding algorithm
    while heap.len() >= 2 {
        let (Some(first), Some(second)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let node = Box::new(Tree::internal(first.node, second.node));
        heap.push(QueuedTree { order, node });
        order += 1;
    }

    let root = heap.pop()?.node;
    let root = if root.is_leaf() {
        Box::new(Tree::wrap(root))
    } else {
        root
    };
    debug!("Grew tree with {} symbols and depth {}", symbol_count, root.depth());
    Some(CodeTree { root, symbol_count })
}
