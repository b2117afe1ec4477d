//! Typdep: streaming CoNLL-U reader for dependency parsing
//!
//! Turns a CoNLL-U treebank into a lazy sequence of dependency instances,
//! one sentence at a time, with a synthetic root token at index 0.

pub mod block; // Sentence block assembly
pub mod error; // Error type
pub mod instance; // Dependency instances and the instance builder
pub mod options; // Reader configuration
pub mod reader; // DependencyReader trait and the CoNLL-U reader
pub mod source; // Line sources (plain, gzip, in-memory)

// Re-exports for convenience
pub use error::{ReadError, Result};
pub use instance::{DependencyInstance, FeatureSet, Token, build_instance};
pub use options::ReaderOptions;
pub use reader::{ConllUReader, DependencyFormat, DependencyReader, Instances, open_reader};
pub use source::{BufSource, FileSource, LineSource, TextSource};
