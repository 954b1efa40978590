//! Decoding a bit-string by walking the Huffman tree.
use log::debug;

use crate::{
    error::{Error, Result},
    tree::Node,
};

/// Decodes a string of '0' and '1' into the symbols it encodes.
///
/// Starting at `root`, every '0' descends to the left child and every '1' to the right one.
/// Reaching a leaf emits its symbol and restarts the walk at `root`.
///
/// If `root` is itself a leaf, its codeword is "0": every '0' emits the symbol and a '1'
/// is malformed.
///
/// # Errors
///
/// * [`Error::MalformedInput`] on a character other than '0' or '1'.
///
/// * [`Error::TruncatedInput`] if the bits run out before a leaf is reached.
pub fn decode<S: Clone>(root: &Node<S>, bits: &str) -> Result<Vec<S>> {
    let mut symbols = Vec::new();
    let mut node = root;
    let mut codeword_start = 0;
    let mut depth = 0;

    for (position, bit) in bits.chars().enumerate() {
        let go_right = match bit {
            '0' => false,
            '1' => true,
            found => return Err(Error::MalformedInput { position, found }),
        };

        if depth == 0 {
            codeword_start = position;
        }

        node = match node {
            Node::Internal { left, right, .. } => {
                if go_right {
                    &**right
                } else {
                    &**left
                }
            }
            // only a single-leaf tree gets here
            Node::Leaf { .. } if go_right => {
                return Err(Error::MalformedInput { position, found: bit });
            }
            Node::Leaf { .. } => node,
        };
        depth += 1;

        if let Node::Leaf { symbol, .. } = node {
            symbols.push(symbol.clone());
            node = root;
            depth = 0;
        }
    }

    if depth != 0 {
        return Err(Error::TruncatedInput { position: codeword_start });
    }

    debug!("decoded {} symbols from {} bits", symbols.len(), bits.len());
    Ok(symbols)
}

/// Decodes into a `String` for trees over characters.
pub fn decode_string(root: &Node<char>, bits: &str) -> Result<String> {
    decode(root, bits).map(|symbols| symbols.into_iter().collect())
}
