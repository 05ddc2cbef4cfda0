pub mod audit;
pub mod writer;

pub use writer::{ReportArtifact, ReportFormat, TabularReport};
