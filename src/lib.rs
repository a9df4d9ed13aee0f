pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod telemetry;
pub mod split;
pub mod types;

// Extraction stages for rendered table sources
pub mod tables;

// Compound-field decomposition and schema shaping for merged table records
pub mod normalize;

// Cross-reference pipeline over the projections API payload
pub mod projections;

// Ports for injected collaborators and their adapters
pub mod app;
pub mod infra;

pub mod pipeline;
