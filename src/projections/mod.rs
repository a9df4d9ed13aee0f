//! Cross-reference pipeline stages for the projections API payload.

pub mod index;
pub mod join;
pub mod payload;
pub mod records;

pub use index::{EntityIndex, EntityIndexBuilder};
pub use join::CrossReferenceJoiner;
pub use payload::{ApiObject, ProjectionsPayload};
pub use records::PrimaryRecordExtractor;
