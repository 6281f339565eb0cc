//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no code
//! is the beginning of another code.
//!
//! The codes are read off a binary tree that is built bottom-up by
//! repeatedly merging the two least frequent nodes.
pub mod min_heap;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::common::{Frequency, Symbol};
use crate::frequency::FrequencyTable;
use crate::table::CodeTable;
use min_heap::{HeapError, MinHeap, Weighted};

/// A node of a Huffman tree. Internal nodes exclusively own their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    Leaf {
        symbol: S,
        frequency: Frequency,
    },
    Internal {
        /// Always the sum of the children's frequencies
        frequency: Frequency,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S: Symbol> Node<S> {
    pub fn leaf(symbol: S, frequency: Frequency) -> Self {
        Node::Leaf { symbol, frequency }
    }

    /// Combine two nodes under a new internal node, `left` on the 0 branch.
    ///
    /// Returns `None` if the summed frequency overflows.
    pub fn merge(left: Self, right: Self) -> Option<Self> {
        let frequency = left.frequency().checked_add(right.frequency())?;
        Some(Node::Internal {
            frequency,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn frequency(&self) -> Frequency {
        match self {
            Node::Leaf { frequency, .. } => *frequency,
            Node::Internal { frequency, .. } => *frequency,
        }
    }

    /// The symbol of a leaf, `None` for internal nodes
    pub fn symbol(&self) -> Option<S> {
        match self {
            Node::Leaf { symbol, .. } => Some(*symbol),
            Node::Internal { .. } => None,
        }
    }

    /// Length of the longest root-to-leaf path below this node
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Internal { left, right, .. } => {
                    stack.push((&**left, depth + 1));
                    stack.push((&**right, depth + 1));
                }
            }
        }
        deepest
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }
}

impl<S: Symbol> Weighted for Node<S> {
    fn weight(&self) -> Frequency {
        self.frequency()
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TreeBuildError {
    #[error("Can't build a huffman tree without any symbols")]
    EmptyInput,
    #[error("Symbol {symbol} has a frequency of zero. Only symbols that occur can be coded")]
    ZeroFrequency { symbol: String },
    #[error("The sum of all frequencies does not fit into 64 bits")]
    FrequencyOverflow,
    #[error(transparent)]
    HeapError(#[from] HeapError),
}

/// An optimal prefix code tree for a [`FrequencyTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Symbol> HuffmanTree<S> {
    /// Build the tree by greedily merging the two least frequent nodes
    /// until only the root is left.
    ///
    /// A table with a single symbol yields a tree that is just that leaf.
    pub fn build(frequencies: &FrequencyTable<S>) -> Result<Self, TreeBuildError> {
        use TreeBuildError as err;

        if frequencies.is_empty() {
            return Err(err::EmptyInput);
        }
        if frequencies.total().is_none() {
            return Err(err::FrequencyOverflow);
        }

        let mut heap = MinHeap::with_capacity(frequencies.len());
        for (symbol, frequency) in frequencies {
            if frequency == 0 {
                return Err(err::ZeroFrequency {
                    symbol: format!("{:?}", symbol),
                });
            }
            heap.insert(Node::leaf(symbol, frequency));
        }
        vtrace!("Building huffman tree from {} leaves", heap.size());

        while heap.size() > 1 {
            let a = heap.extract_min()?;
            let b = heap.extract_min()?;
            let merged = Node::merge(a, b).ok_or(err::FrequencyOverflow)?;
            heap.insert(merged);
        }

        let root = heap.extract_min()?;
        vtrace!(
            "Huffman tree has total frequency {} and depth {}",
            root.frequency(),
            root.depth()
        );
        Ok(HuffmanTree { root })
    }

    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Sum of the frequencies of all symbols
    pub fn frequency(&self) -> Frequency {
        self.root.frequency()
    }

    /// Derive the code of every leaf symbol
    pub fn code_table(&self) -> CodeTable<S> {
        CodeTable::generate(&self.root)
    }

    /// The (symbol, frequency) pairs of all leaves, left to right
    pub fn leaves(&self) -> Vec<(S, Frequency)> {
        let mut leaves = Vec::with_capacity(self.root.leaf_count());
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                Node::Leaf { symbol, frequency } => leaves.push((*symbol, *frequency)),
                Node::Internal { left, right, .. } => {
                    stack.push(&**right);
                    stack.push(&**left);
                }
            }
        }
        leaves
    }
}
