//! Frequency collection and forest building: the first two steps before a tree can be merged.
use std::collections::BTreeMap;

use crate::{
    error::{Error, Result},
    tree::Node,
};

/// Counts how often each symbol occurs.
///
/// # Arguments
///
/// * `symbols` - Any sequence of symbols, e.g. the characters of a text.
///
/// # Returns
///
/// A map from every distinct symbol to its number of occurrences, ordered by symbol.
pub fn frequencies<S, I>(symbols: I) -> BTreeMap<S, u64>
where
    S: Ord,
    I: IntoIterator<Item = S>,
{
    let mut symbol_frequency = BTreeMap::new();

    for symbol in symbols {
        let count = symbol_frequency.entry(symbol).or_insert(0);
        *count += 1;
    }

    symbol_frequency
}

/// Counts the characters of `text`.
pub fn text_frequencies(text: &str) -> BTreeMap<char, u64> {
    frequencies(text.chars())
}

/// Turns a symbol-frequency mapping into single-node trees, one leaf per distinct symbol, in
/// ascending symbol order.
///
/// # Arguments
///
/// * `frequencies` - Pairs of symbol and frequency. A symbol listed more than once gets a
/// single leaf weighing the sum of its frequencies.
///
/// # Errors
///
/// Returns [`Error::ZeroFrequency`] for the first entry whose frequency is zero.
pub fn leaves<S, I>(frequencies: I) -> Result<Vec<Node<S>>>
where
    S: Ord,
    I: IntoIterator<Item = (S, u64)>,
{
    let mut symbol_weight: BTreeMap<S, u128> = BTreeMap::new();

    for (position, (symbol, frequency)) in frequencies.into_iter().enumerate() {
        if frequency == 0 {
            return Err(Error::ZeroFrequency { position });
        }
        *symbol_weight.entry(symbol).or_insert(0) += u128::from(frequency);
    }

    Ok(symbol_weight
        .into_iter()
        .map(|(symbol, weight)| Node::leaf(symbol, weight))
        .collect())
}
