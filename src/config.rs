//! Configuration module for the huffman cli tool
use std::{fs, io};

use clap::{Parser, Subcommand};

use crate::tree::TieBreak;

/// Configuration struct for the huffman cli tool
#[derive(Debug, Parser)]
#[command(name = "huffman", version, about = "Build Huffman codes for a text and encode or decode with them")]
pub struct Config {
    /// Which tree to merge first when two trees weigh the same
    #[arg(long, value_enum, default_value_t = TieBreak::Oldest, global = true)]
    pub tie_break: TieBreak,

    /// Treat TEXT arguments as paths of files to read the text from
    #[arg(short, long, global = true)]
    pub file: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the tree, the code table and the encoded bits of TEXT
    Encode { text: String },
    /// Decode BITS with the tree built from the character frequencies of TEXT
    Decode { text: String, bits: String },
    /// Encode and decode a sample sentence
    Demo,
}

impl Config {
    /// Builds a new Config struct from the provided arguments
    ///
    /// # Arguments
    ///
    /// * `args` - An iterator of arguments passed into the cli tool, program name first
    ///
    /// # Errors
    ///
    /// * Returns the clap error (which also covers `--help` and `--version`) if the arguments
    /// do not parse
    pub fn build<I, T>(args: I) -> Result<Config, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Config::try_parse_from(args)
    }

    /// Resolves a TEXT argument, reading it from disk when `--file` was given.
    pub fn text(&self, arg: &str) -> io::Result<String> {
        if self.file {
            fs::read_to_string(arg)
        } else {
            Ok(arg.to_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_encode() {
        let config = Config::build(["huffman", "encode", "abc"]).unwrap();
        assert_eq!(config.tie_break, TieBreak::Oldest);
        assert!(!config.file);
        assert!(matches!(config.cmd, Command::Encode { ref text } if text == "abc"));
        assert_eq!(config.text("abc").unwrap(), "abc");
    }

    #[test]
    fn parses_decode_with_options() {
        let config = Config::build(["huffman", "decode", "--tie-break", "newest", "abc", "0110"]).unwrap();
        assert_eq!(config.tie_break, TieBreak::Newest);
        assert!(matches!(
            config.cmd,
            Command::Decode { ref text, ref bits } if text == "abc" && bits == "0110"
        ));
    }

    #[test]
    fn reads_text_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello, wired world").unwrap();
        let path = file.path().to_str().unwrap().to_owned();

        let config = Config::build(["huffman", "--file", "encode", path.as_str()]).unwrap();
        assert!(config.file);
        assert_eq!(config.text(&path).unwrap(), "hello, wired world");

        let missing = file.path().with_extension("missing");
        assert!(config.text(missing.to_str().unwrap()).is_err());
    }

    #[test]
    fn rejects_missing_arguments() {
        assert!(Config::build(["huffman"]).is_err());
        assert!(Config::build(["huffman", "decode", "abc"]).is_err());
        assert!(Config::build(["huffman", "squash", "abc"]).is_err());
    }
}
