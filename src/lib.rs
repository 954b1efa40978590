//! # Huffman
//!
//! `huffman` Library module, builds minimum-redundancy prefix codes from symbol frequencies and
//! uses them to turn a sequence of symbols into a string of '0' and '1' and back.
//!
//! ## Usage
//!
//! ```rust
//! let text = "hello, wired world";
//! let tree = huffman::HuffmanTree::from_text(text).unwrap();
//! let bits = tree.encode_str(text).unwrap();
//!
//! assert_eq!(tree.decode_string(&bits).unwrap(), text);
//! ```

/// Configuration module for the huffman cli tool
mod config;

/// Code tables and encoding
pub mod code;

/// Decoding by tree walk
pub mod decode;

mod error;

/// Symbol counting and leaf creation
pub mod frequency;

/// Huffman tree construction
pub mod tree;

use std::error::Error as Err;

use log::info;

pub use code::{Code, CodeTable};
pub use config::{Command, Config};
pub use error::{Error, Result};
pub use frequency::{frequencies, text_frequencies};
pub use tree::{Forest, HuffmanTree, Node, TieBreak};

/// Sentence encoded and decoded by the `demo` command.
pub const DEMO_TEXT: &str = "hello, wired world";

/// Runs the huffman cli tool with the provided configuration
///
/// # Arguments
///
/// * `config` - The configuration for the huffman cli tool
///
/// # Returns
///
/// A Result containing nothing if successful, or an error message if not
pub fn run(config: Config) -> std::result::Result<(), Box<dyn Err>> {
    match &config.cmd {
        Command::Encode { text } => {
            let text = config.text(text)?;
            let tree = HuffmanTree::with_tie_break(text_frequencies(&text), config.tie_break)?;
            let table = tree.code_table();
            let bits = table.encode_str(&text)?;

            println!("tree: {}", tree);
            for (symbol, code) in table.iter() {
                println!("{:?}: {}", symbol, code);
            }
            println!("code: {}", bits);
            info!("encoded {} characters into {} bits", text.chars().count(), bits.len());
        }
        Command::Decode { text, bits } => {
            let text = config.text(text)?;
            let tree = HuffmanTree::with_tie_break(text_frequencies(&text), config.tie_break)?;

            println!("text: {}", tree.decode_string(bits)?);
        }
        Command::Demo => {
            let tree = HuffmanTree::with_tie_break(text_frequencies(DEMO_TEXT), config.tie_break)?;
            let bits = tree.encode_str(DEMO_TEXT)?;

            println!("{}", tree);
            println!("code: {}", bits);
            println!("text: {}", tree.decode_string(&bits)?);
        }
    }

    Ok(())
}
