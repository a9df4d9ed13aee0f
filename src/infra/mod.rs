pub mod csv_publisher;
pub mod factory;
pub mod file_fetcher;
pub mod http_client;
pub mod in_memory;
pub mod sheets_publisher;

pub use csv_publisher::{CsvFilePublisher, StdoutPublisher};
pub use factory::{fetcher_for, publisher_for};
pub use file_fetcher::DirSourceFetcher;
pub use http_client::HttpSourceFetcher;
pub use in_memory::{InMemoryPublisher, StaticSourceFetcher};
pub use sheets_publisher::SheetsPublisher;
