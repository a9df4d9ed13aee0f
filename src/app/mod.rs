pub mod ports;

pub use ports::{Publisher, SourceFetcher};
