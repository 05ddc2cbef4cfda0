// lineage traces and audits for governance, authorization and data-model workbooks
//governance: rule -> conditions -> mappings -> contexts (three ordered fallback tiers)
//authorization: policy -> mapping -> permissions

pub mod config;
pub mod core;
pub mod pipeline;
pub mod report;
pub mod workbook;

pub use crate::config::LineageConfig;
pub use crate::core::error::{LineageError, LineageResult};
pub use crate::core::keys::synthesize_keys;
pub use crate::core::propagate::{GovernanceLineage, RuleTrace};
pub use crate::core::table::{Cell, Table, Workbook};
pub use crate::core::types::{LineageRecord, Strategy};
pub use crate::report::{ReportArtifact, ReportFormat};
