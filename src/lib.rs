pub mod api;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod types;

pub use api::{GridClient, GridResponse, GridSource};
pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use probe::{GridProbe, ProbeOutcome};
pub use types::{Cell, Envelope, Grid, PriceRange, Scalar};
