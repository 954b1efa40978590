//! Code table derivation and encoding.
use std::{borrow::Borrow, collections::BTreeMap, fmt};

use bit_vec::BitVec;
use log::debug;

use crate::{
    error::{Error, Result},
    tree::Node,
};

/// The codeword of one symbol: the path from the root to its leaf, `false` for left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code {
    bits: BitVec,
}

impl Code {
    /// Number of bits in the codeword.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Only true for a codeword built by hand; every derived codeword has at least one bit.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The bits from the root downwards, `true` for a step to the right.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter()
    }

    /// Returns true if `self` is a prefix of (or equal to) `other`.
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len() <= other.len() && self.bits().zip(other.bits()).all(|(a, b)| a == b)
    }
}

/// Renders the codeword as a string of '0' and '1'.
impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Maps every symbol of a Huffman tree to its codeword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S> {
    codes: BTreeMap<S, Code>,
}

impl<S: Ord + Clone> CodeTable<S> {
    /// Derives the code table of the tree rooted at `root`.
    ///
    /// Appends '0' when descending left and '1' when descending right, recording the path at
    /// each leaf. A tree consisting of a single leaf has no path at all, so its symbol is given
    /// the one-bit code "0" instead of an empty codeword.
    pub fn from_tree(root: &Node<S>) -> CodeTable<S> {
        let mut codes = BTreeMap::new();

        if let Node::Leaf { symbol, .. } = root {
            codes.insert(symbol.clone(), Code { bits: BitVec::from_elem(1, false) });
        } else {
            gather_leaves(root, &mut BitVec::new(), &mut codes);
        }

        debug!("derived {} codes", codes.len());
        CodeTable { codes }
    }
}

/// Pre-order walk recording the current path at each leaf.
///
/// # Arguments
///
/// * `node` - The subtree to walk.
///
/// * `path` - The bits leading from the root to `node`. Restored before returning.
///
/// * `codes` - Receives one entry per leaf of the subtree.
fn gather_leaves<S: Ord + Clone>(node: &Node<S>, path: &mut BitVec, codes: &mut BTreeMap<S, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            codes.insert(symbol.clone(), Code { bits: path.clone() });
        }
        Node::Internal { left, right, .. } => {
            path.push(false);
            gather_leaves(left, path, codes);
            path.pop();

            path.push(true);
            gather_leaves(right, path, codes);
            path.pop();
        }
    }
}

impl<S: Ord> CodeTable<S> {
    /// The codeword of `symbol`, if it was in the tree.
    pub fn get(&self, symbol: &S) -> Option<&Code> {
        self.codes.get(symbol)
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Never true for a table derived from a tree.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Code)> {
        self.codes.iter()
    }

    /// Σ frequency × code length over the given symbols. Symbols missing from the table
    /// count as zero.
    pub fn weighted_length(&self, frequencies: &BTreeMap<S, u64>) -> u128 {
        frequencies
            .iter()
            .filter_map(|(symbol, frequency)| {
                self.get(symbol)
                    .map(|code| u128::from(*frequency) * code.len() as u128)
            })
            .sum()
    }

    /// Returns true if no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes[i + 1..]
                .iter()
                .all(|b| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }
}

impl<S: Ord + fmt::Debug> CodeTable<S> {
    /// Encodes a sequence of symbols by concatenating their codewords.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSymbol`] for the first symbol without a codeword. Nothing is
    /// returned for the symbols before it.
    pub fn encode<I>(&self, symbols: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut bits = String::new();

        for (position, symbol) in symbols.into_iter().enumerate() {
            let symbol = symbol.borrow();
            let code = self.get(symbol).ok_or_else(|| Error::UnknownSymbol {
                position,
                symbol: format!("{:?}", symbol),
            })?;
            bits.extend(code.bits().map(|bit| if bit { '1' } else { '0' }));
        }

        Ok(bits)
    }
}

impl CodeTable<char> {
    /// Encodes the characters of `text`.
    pub fn encode_str(&self, text: &str) -> Result<String> {
        self.encode(text.chars())
    }
}
