//! Turning merged table records into the fixed odds schema.

pub mod decompose;
pub mod merger;
pub mod schema;

pub use decompose::{CompoundFieldDecomposer, CompoundParts};
pub use merger::{CompoundSelection, MultiSourceMerger};
pub use schema::{NormalizeOutcome, SchemaNormalizer};
