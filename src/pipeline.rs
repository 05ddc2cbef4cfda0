// one entry point per downloadable artifact, each a pure function of the workbook

use tracing::info;

use crate::config::LineageConfig;
use crate::core::authorization::{AuthorizationLineage, AuthorizationModel};
use crate::core::classify::{self, AuditReport, DataModel};
use crate::core::datamodel::{self, AttributeLineage};
use crate::core::error::LineageResult;
use crate::core::keywords::{self, KeywordUsage};
use crate::core::mapping::GovernanceModel;
use crate::core::propagate::GovernanceLineage;
use crate::core::table::Workbook;
use crate::core::vocabulary::VOCABULARY;
use crate::report::{ReportArtifact, ReportFormat, TabularReport};
use crate::workbook::loader;

pub const GOVERNANCE_FILE_STEM: &str = "Goverance_rules_lineage_output";
pub const AUTHORIZATION_FILE_STEM: &str = "dynamic_auth_lineage_output";
pub const KEYWORD_FILE_STEM: &str = "keyword_usage";
pub const UNUSED_RULES_FILE_STEM: &str = "unused_rules";
pub const DATA_MODEL_FILE_STEM: &str = "data_model_lineage";

const LINEAGE_TABLE_NAME: &str = "LineageTable";

pub fn governance_lineage(workbook: &Workbook, config: &LineageConfig) -> LineageResult<GovernanceLineage> {
    let model = GovernanceModel::from_workbook(workbook, config)?;
    Ok(model.resolve())
}

pub fn governance_lineage_report(
    workbook: &Workbook,
    config: &LineageConfig,
    format: ReportFormat,
) -> LineageResult<ReportArtifact> {
    let lineage = governance_lineage(workbook, config)?;
    let artifact = TabularReport::from_table(&lineage.to_table(), "Lineage", LINEAGE_TABLE_NAME)
        .to_artifact(GOVERNANCE_FILE_STEM, format)?;
    info!(file = %artifact.file_name, records = lineage.len(), "governance lineage report written");
    Ok(artifact)
}

pub fn authorization_lineage(workbook: &Workbook, _config: &LineageConfig) -> LineageResult<AuthorizationLineage> {
    let model = AuthorizationModel::from_workbook(workbook)?;
    Ok(model.resolve())
}

pub fn authorization_lineage_report(
    workbook: &Workbook,
    config: &LineageConfig,
    format: ReportFormat,
) -> LineageResult<ReportArtifact> {
    let lineage = authorization_lineage(workbook, config)?;
    let artifact = TabularReport::from_table(&lineage.to_table(), "Lineage", LINEAGE_TABLE_NAME)
        .to_artifact(AUTHORIZATION_FILE_STEM, format)?;
    info!(file = %artifact.file_name, records = lineage.len(), "authorization lineage report written");
    Ok(artifact)
}

/// Needs BUSINESS RULES only.
pub fn keyword_usage(workbook: &Workbook, config: &LineageConfig) -> LineageResult<Vec<KeywordUsage>> {
    let rules = loader::load_rules(workbook)?;
    Ok(keywords::keyword_usage(
        &rules,
        VOCABULARY,
        config.include_zero_count_keywords,
    ))
}

pub fn keyword_usage_report(
    workbook: &Workbook,
    config: &LineageConfig,
    format: ReportFormat,
) -> LineageResult<ReportArtifact> {
    let usage = keyword_usage(workbook, config)?;
    let artifact = TabularReport::from_table(
        &keywords::keyword_usage_table(&usage),
        "Keyword Usage",
        "KeywordUsageTable",
    )
    .to_artifact(KEYWORD_FILE_STEM, format)?;
    info!(file = %artifact.file_name, keywords = usage.len(), "keyword usage report written");
    Ok(artifact)
}

/// Needs BUSINESS RULES; conditions and mappings are read when present.
pub fn unused_rules(workbook: &Workbook, _config: &LineageConfig) -> LineageResult<Vec<String>> {
    let rules = loader::load_rules(workbook)?;
    let conditions = loader::load_optional(workbook, loader::BUSINESS_CONDITIONS, loader::load_conditions)?;
    let mappings = loader::load_optional(workbook, loader::GOVERNANCE_MAPPING, loader::load_mappings)?;

    let unused = classify::unused_rules(&rules, &conditions, &mappings);
    info!(rules = rules.len(), unused = unused.len(), "unused rules detected");
    Ok(unused)
}

pub fn unused_rules_report(
    workbook: &Workbook,
    config: &LineageConfig,
    format: ReportFormat,
) -> LineageResult<ReportArtifact> {
    let unused = unused_rules(workbook, config)?;
    TabularReport::from_table(&classify::unused_rules_table(&unused), "Unused Rules", "UnusedRulesTable")
        .to_artifact(UNUSED_RULES_FILE_STEM, format)
}

/// Needs ATTRIBUTES and E-A-R MODEL.
pub fn data_model_lineage(workbook: &Workbook, _config: &LineageConfig) -> LineageResult<Vec<AttributeLineage>> {
    datamodel::data_model_lineage(workbook)
}

pub fn data_model_lineage_report(
    workbook: &Workbook,
    config: &LineageConfig,
    format: ReportFormat,
) -> LineageResult<ReportArtifact> {
    let rows = data_model_lineage(workbook, config)?;
    TabularReport::from_table(&datamodel::attribute_lineage_table(&rows), "Lineage", LINEAGE_TABLE_NAME)
        .to_artifact(DATA_MODEL_FILE_STEM, format)
}

/// Needs all four data-model sheets.
pub fn data_model_audit(workbook: &Workbook, _config: &LineageConfig) -> LineageResult<AuditReport> {
    Ok(DataModel::from_workbook(workbook)?.audit())
}

pub fn data_model_audit_report(workbook: &Workbook, config: &LineageConfig) -> LineageResult<ReportArtifact> {
    Ok(data_model_audit(workbook, config)?.to_artifact())
}
