//! The Huffman tree and its greedy construction.
use std::{
    borrow::Borrow,
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    fmt,
};

use log::{debug, trace};

use crate::{
    code::CodeTable,
    decode,
    error::{Error, Result},
    frequency,
};

/// A node in a Huffman tree.
///
/// Every node is owned by exactly one parent (or by the [`HuffmanTree`] for the root), so
/// dropping the root releases the whole tree.
///
/// Weights are `u128`: summing any number of `u64` frequencies cannot overflow them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<S> {
    /// A single symbol together with its frequency.
    Leaf { symbol: S, weight: u128 },
    /// A merge point. `weight` is always `left.weight() + right.weight()`.
    Internal {
        weight: u128,
        left: Box<Node<S>>,
        right: Box<Node<S>>,
    },
}

impl<S> Node<S> {
    /// Creates a new leaf node.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The symbol that the node represents.
    ///
    /// * `weight` - The frequency of the symbol.
    pub fn leaf(symbol: S, weight: u128) -> Node<S> {
        Node::Leaf { symbol, weight }
    }

    /// Combines two trees into a new internal node whose weight is the sum of theirs.
    ///
    /// # Arguments
    ///
    /// * `left` - The left child of the new node, reached with a '0' bit.
    ///
    /// * `right` - The right child of the new node, reached with a '1' bit.
    pub fn combine(left: Node<S>, right: Node<S>) -> Node<S> {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The frequency of a leaf, or the summed frequencies below an internal node.
    pub fn weight(&self) -> u128 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Returns true if the node is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// The symbol of a leaf, `None` for internal nodes.
    pub fn symbol(&self) -> Option<&S> {
        match self {
            Node::Leaf { symbol, .. } => Some(symbol),
            Node::Internal { .. } => None,
        }
    }

    /// The `(left, right)` children of an internal node, `None` for leaves.
    pub fn children(&self) -> Option<(&Node<S>, &Node<S>)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((left, right)),
        }
    }

    /// Number of leaves in the subtree rooted at this node.
    pub fn leaf_count(&self) -> usize {
        match self.children() {
            None => 1,
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Length of the longest root-to-leaf path; 0 for a single leaf.
    pub fn height(&self) -> usize {
        match self.children() {
            None => 0,
            Some((left, right)) => 1 + left.height().max(right.height()),
        }
    }
}

/// Prints the subtree in pre-order: `(symbol:weight)` for a leaf and
/// `(weight left right)` for an internal node.
impl<S: fmt::Display> fmt::Display for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf { symbol, weight } => write!(f, "({}:{})", symbol, weight),
            Node::Internal { weight, left, right } => write!(f, "({} {} {})", weight, left, right),
        }
    }
}

/// Which tree to take first when two trees in the forest weigh the same.
///
/// The choice never changes the code lengths' weighted sum, only the exact shape of the tree
/// and thus the exact bits assigned to each symbol.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TieBreak {
    /// The tree that entered the forest first wins. Leaves enter in ascending symbol order,
    /// every merged tree enters after all trees already present.
    #[default]
    Oldest,
    /// The tree that entered the forest last wins.
    Newest,
}

/// A tree root waiting in the forest, ordered by weight and then by tie-break rank.
struct Entry<S> {
    weight: u128,
    rank: u64,
    node: Node<S>,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Entry<S> {}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Entry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.rank.cmp(&other.rank))
    }
}

/// The collection of trees that gets merged into a single Huffman tree.
///
/// Kept as a min-heap keyed by weight, so each merge step costs O(log N).
pub struct Forest<S> {
    heap: BinaryHeap<Reverse<Entry<S>>>,
    tie_break: TieBreak,
    arrivals: u64,
}

impl<S> Forest<S> {
    /// Creates an empty forest.
    pub fn new(tie_break: TieBreak) -> Forest<S> {
        Forest {
            heap: BinaryHeap::new(),
            tie_break,
            arrivals: 0,
        }
    }

    /// Builds a forest of leaves from a symbol-frequency mapping.
    ///
    /// # Arguments
    ///
    /// * `frequencies` - Pairs of symbol and frequency. Repeated symbols are summed into one
    /// leaf, and leaves enter the forest in ascending symbol order.
    ///
    /// * `tie_break` - The rule for choosing between trees of equal weight.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroFrequency`] if any frequency is zero.
    pub fn from_frequencies<I>(frequencies: I, tie_break: TieBreak) -> Result<Forest<S>>
    where
        S: Ord,
        I: IntoIterator<Item = (S, u64)>,
    {
        let mut forest = Forest::new(tie_break);
        for leaf in frequency::leaves(frequencies)? {
            forest.push(leaf);
        }
        Ok(forest)
    }

    /// Adds a tree to the forest. It ranks after every tree pushed before it.
    fn push(&mut self, node: Node<S>) {
        let rank = match self.tie_break {
            TieBreak::Oldest => self.arrivals,
            TieBreak::Newest => u64::MAX - self.arrivals,
        };
        self.arrivals += 1;
        self.heap.push(Reverse(Entry {
            weight: node.weight(),
            rank,
            node,
        }));
    }

    /// Number of trees left to merge.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True before any leaf was added, or for an empty mapping.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Sum of the weights of all trees currently in the forest.
    pub fn total_weight(&self) -> u128 {
        self.heap.iter().map(|Reverse(entry)| entry.weight).sum()
    }

    /// Performs one greedy step: removes the two lightest trees and puts back their
    /// combination, the first one taken becoming the left child.
    ///
    /// # Returns
    ///
    /// False, leaving the forest untouched, if fewer than two trees remain.
    pub fn merge_lightest(&mut self) -> bool {
        let Some(Reverse(left)) = self.heap.pop() else {
            return false;
        };
        let Some(Reverse(right)) = self.heap.pop() else {
            self.heap.push(Reverse(left));
            return false;
        };

        trace!(
            "merging trees of weight {} and {} ({} left in forest)",
            left.weight,
            right.weight,
            self.heap.len() + 1
        );
        self.push(Node::combine(left.node, right.node));
        true
    }

    /// Merges until a single tree remains and hands it over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if the forest holds no tree at all.
    pub fn build(mut self) -> Result<HuffmanTree<S>> {
        let leaves = self.len();
        while self.merge_lightest() {}

        let Some(Reverse(root)) = self.heap.pop() else {
            return Err(Error::EmptyInput);
        };
        debug!(
            "built Huffman tree with {} leaves, total weight {}",
            leaves, root.weight
        );

        Ok(HuffmanTree { root: root.node })
    }
}

/// A complete Huffman tree, owning all of its nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree<S> {
    root: Node<S>,
}

impl<S: Ord> HuffmanTree<S> {
    /// Builds the tree for a symbol-frequency mapping with the default [`TieBreak::Oldest`] rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] if the mapping is empty and [`Error::ZeroFrequency`] if one
    /// of its frequencies is zero.
    pub fn from_frequencies<I>(frequencies: I) -> Result<HuffmanTree<S>>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        HuffmanTree::with_tie_break(frequencies, TieBreak::default())
    }

    /// Builds the tree for a symbol-frequency mapping, choosing between equal weights with
    /// `tie_break`.
    pub fn with_tie_break<I>(frequencies: I, tie_break: TieBreak) -> Result<HuffmanTree<S>>
    where
        I: IntoIterator<Item = (S, u64)>,
    {
        Forest::from_frequencies(frequencies, tie_break)?.build()
    }
}

impl<S> HuffmanTree<S> {
    /// The root node, a lone leaf if only one symbol was given.
    pub fn root(&self) -> &Node<S> {
        &self.root
    }

    /// Total weight, i.e. the sum of all symbol frequencies.
    pub fn weight(&self) -> u128 {
        self.root.weight()
    }

    /// Number of distinct symbols.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest codeword, except that a lone leaf has height 0.
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Gives up the tree and returns its root node.
    pub fn into_root(self) -> Node<S> {
        self.root
    }
}

impl<S: Ord + Clone> HuffmanTree<S> {
    /// Derives the code table from the root-to-leaf paths of this tree.
    pub fn code_table(&self) -> CodeTable<S> {
        CodeTable::from_tree(&self.root)
    }
}

impl<S: Ord + Clone + fmt::Debug> HuffmanTree<S> {
    /// Encodes `symbols` into a '0'/'1' bit-string. Derives a fresh code table; keep a
    /// [`CodeTable`] around to encode many sequences.
    pub fn encode<I>(&self, symbols: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        self.code_table().encode(symbols)
    }
}

impl<S: Clone> HuffmanTree<S> {
    /// Decodes a '0'/'1' bit-string back into symbols by walking this tree.
    pub fn decode(&self, bits: &str) -> Result<Vec<S>> {
        decode::decode(&self.root, bits)
    }
}

impl HuffmanTree<char> {
    /// Builds the tree for the character frequencies of `text`.
    pub fn from_text(text: &str) -> Result<HuffmanTree<char>> {
        HuffmanTree::from_frequencies(frequency::text_frequencies(text))
    }

    /// Encodes the characters of `text`.
    pub fn encode_str(&self, text: &str) -> Result<String> {
        self.encode(text.chars())
    }

    /// Decodes `bits` into a `String`.
    pub fn decode_string(&self, bits: &str) -> Result<String> {
        decode::decode_string(&self.root, bits)
    }
}

impl<S: fmt::Display> fmt::Display for HuffmanTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;

    fn clrs() -> std::collections::BTreeMap<char, u64> {
        btreemap! { 'a' => 5, 'b' => 9, 'c' => 12, 'd' => 13, 'e' => 16, 'f' => 45 }
    }

    #[test]
    fn builds_the_textbook_tree() {
        let tree = HuffmanTree::from_frequencies(clrs()).unwrap();
        assert_eq!(tree.weight(), 100);
        assert_eq!(tree.leaf_count(), 6);
        assert_eq!(tree.height(), 4);
        assert_eq!(
            tree.to_string(),
            "(100 (f:45) (55 (25 (c:12) (d:13)) (30 (14 (a:5) (b:9)) (e:16))))"
        );
    }

    #[test]
    fn internal_weights_are_sums() {
        fn check(node: &Node<char>) {
            if let Some((left, right)) = node.children() {
                assert_eq!(node.weight(), left.weight() + right.weight());
                assert!(node.symbol().is_none());
                check(left);
                check(right);
            }
        }
        check(HuffmanTree::from_frequencies(clrs()).unwrap().root());
    }

    #[test]
    fn merging_conserves_weight() {
        let mut forest = Forest::from_frequencies(clrs(), TieBreak::Oldest).unwrap();
        assert_eq!(forest.len(), 6);
        while forest.len() > 1 {
            let before = forest.len();
            assert!(forest.merge_lightest());
            assert_eq!(forest.len(), before - 1);
            assert_eq!(forest.total_weight(), 100);
        }
        assert!(!forest.merge_lightest());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.build().unwrap().weight(), 100);
    }

    #[test]
    fn oldest_tree_wins_ties() {
        let tree = HuffmanTree::with_tie_break(
            btreemap! { 'a' => 1, 'b' => 1, 'c' => 1, 'd' => 1 },
            TieBreak::Oldest,
        )
        .unwrap();
        assert_eq!(tree.to_string(), "(4 (2 (a:1) (b:1)) (2 (c:1) (d:1)))");

        let tree = HuffmanTree::from_frequencies(btreemap! { 'a' => 1, 'b' => 1, 'c' => 2 }).unwrap();
        assert_eq!(tree.to_string(), "(4 (c:2) (2 (a:1) (b:1)))");
    }

    #[test]
    fn newest_tree_wins_ties() {
        let tree = HuffmanTree::with_tie_break(
            btreemap! { 'a' => 1, 'b' => 1, 'c' => 1, 'd' => 1 },
            TieBreak::Newest,
        )
        .unwrap();
        assert_eq!(tree.to_string(), "(4 (2 (b:1) (a:1)) (2 (d:1) (c:1)))");

        let tree = HuffmanTree::with_tie_break(
            btreemap! { 'a' => 1, 'b' => 1, 'c' => 2 },
            TieBreak::Newest,
        )
        .unwrap();
        assert_eq!(tree.to_string(), "(4 (2 (b:1) (a:1)) (c:2))");
    }

    #[test]
    fn single_symbol_is_a_lone_leaf() {
        let tree = HuffmanTree::from_frequencies(btreemap! { 'x' => 7 }).unwrap();
        assert!(tree.root().is_leaf());
        assert_eq!(tree.weight(), 7);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.to_string(), "(x:7)");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(
            HuffmanTree::<char>::from_frequencies(btreemap! {}),
            Err(Error::EmptyInput)
        );
        assert_eq!(
            Forest::<u8>::new(TieBreak::Newest).build(),
            Err(Error::EmptyInput)
        );
        assert_eq!(HuffmanTree::from_text(""), Err(Error::EmptyInput));
    }

    #[test]
    fn zero_frequencies_are_rejected() {
        assert_eq!(
            HuffmanTree::from_frequencies(btreemap! { 'a' => 0, 'b' => 0, 'c' => 3 }),
            Err(Error::ZeroFrequency { position: 0 })
        );
        assert_eq!(
            HuffmanTree::with_tie_break((0..200_000u32).map(|s| (s, 0)), TieBreak::Newest),
            Err(Error::ZeroFrequency { position: 0 })
        );
    }

    #[test]
    fn large_equal_alphabet_stays_shallow() {
        let tree = HuffmanTree::with_tie_break((0..200_000u32).map(|s| (s, 1)), TieBreak::Newest).unwrap();
        assert_eq!(tree.leaf_count(), 200_000);
        assert_eq!(tree.weight(), 200_000);
        assert!(tree.height() <= 18);
    }

    #[test]
    fn weights_beyond_u64_do_not_overflow() {
        let tree = HuffmanTree::from_frequencies(btreemap! { 'a' => u64::MAX, 'b' => 1 }).unwrap();
        assert_eq!(tree.weight(), u128::from(u64::MAX) + 1);
        assert_eq!(tree.to_string(), format!("({} (b:1) (a:{}))", u128::from(u64::MAX) + 1, u64::MAX));

        let mut forest = Forest::from_frequencies(vec![('a', u64::MAX), ('b', u64::MAX), ('c', u64::MAX)], TieBreak::Oldest).unwrap();
        assert!(forest.merge_lightest());
        assert_eq!(forest.total_weight(), 3 * u128::from(u64::MAX));
    }

    #[test]
    fn repeated_symbols_become_one_leaf() {
        let tree = HuffmanTree::from_frequencies(vec![('a', 1), ('b', 2), ('a', 2)]).unwrap();
        assert_eq!(tree.leaf_count(), 2);
        assert_eq!(tree.to_string(), "(5 (b:2) (a:3))");
    }

    #[test]
    fn into_root_hands_over_the_nodes() {
        let root = HuffmanTree::from_frequencies(clrs()).unwrap().into_root();
        assert_eq!(root.weight(), 100);
        let (left, right) = root.children().unwrap();
        assert_eq!(left.symbol(), Some(&'f'));
        assert_eq!(right.weight(), 55);
        assert_eq!(right.leaf_count(), 5);
    }
}
