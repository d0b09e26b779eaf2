pub mod client;
pub mod models;

pub use client::{parse_envelope, FetchAnomaly, ReadingSource, SourceClient};
pub use models::Reading;
