//! Errors reported by tree construction, encoding and decoding.

/// Everything that can go wrong while building, encoding or decoding.
///
/// All variants are structural: retrying with the same input fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The frequency mapping (or forest) held no symbols.
    #[error("cannot build a Huffman tree without any symbols")]
    EmptyInput,

    /// An entry of the frequency mapping had a frequency of zero.
    #[error("entry {position} of the frequency mapping has frequency zero")]
    ZeroFrequency { position: usize },

    /// A symbol to encode has no entry in the code table.
    #[error("symbol {symbol} at position {position} is not in the code table")]
    UnknownSymbol { position: usize, symbol: String },

    /// The bit-string holds something other than '0' or '1', or a bit that
    /// leads nowhere in the tree.
    #[error("unexpected {found:?} at position {position} of the bit-string")]
    MalformedInput { position: usize, found: char },

    /// The bit-string ended in the middle of a codeword.
    #[error("bit-string ends inside a codeword that started at position {position}")]
    TruncatedInput { position: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
