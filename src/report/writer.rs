// tabular report writer: result table -> downloadable document with auto-filter metadata

use serde::Serialize;

use crate::core::error::{LineageError, LineageResult};
use crate::core::table::Table;

pub const TABLE_STYLE: &str = "TableStyleMedium9";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportFormat {
    Csv,
    Json,
    Toon,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
            ReportFormat::Toon => "toon",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Json => "application/json",
            ReportFormat::Toon => "text/plain",
        }
    }
}

/// A finished document, ready to hand to whoever serves downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Spreadsheet-style column letter for a 1-based index: 1 -> A, 27 -> AA.
pub fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push(b'A' + rem as u8);
        index = (index - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularReport {
    pub title: String,
    pub table_name: String,
    pub style: &'static str,
    pub filter_range: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TabularReport {
    /// Null cells become empty strings; nothing in a report is ever null.
    pub fn from_table(table: &Table, title: &str, table_name: &str) -> Self {
        let columns = table.columns().to_vec();
        let rows: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|r| r.iter().map(|c| c.clone().unwrap_or_default()).collect())
            .collect();
        let filter_range = format!(
            "A1:{}{}",
            column_letter(columns.len().max(1)),
            rows.len() + 1
        );

        Self {
            title: title.to_string(),
            table_name: table_name.to_string(),
            style: TABLE_STYLE,
            filter_range,
            columns,
            rows,
        }
    }

    fn to_csv(&self) -> LineageResult<Vec<u8>> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.into_inner().map_err(|e| LineageError::Encode {
            format: "csv",
            reason: e.to_string(),
        })
    }

    fn to_toon(&self) -> LineageResult<Vec<u8>> {
        let value = serde_json::to_value(self)?;
        let text = toon_format::encode_default(&value).map_err(|e| LineageError::Encode {
            format: "toon",
            reason: e.to_string(),
        })?;
        Ok(text.into_bytes())
    }

    pub fn render(&self, format: ReportFormat) -> LineageResult<Vec<u8>> {
        match format {
            ReportFormat::Csv => self.to_csv(),
            ReportFormat::Json => Ok(serde_json::to_vec_pretty(self)?),
            ReportFormat::Toon => self.to_toon(),
        }
    }

    pub fn to_artifact(&self, file_stem: &str, format: ReportFormat) -> LineageResult<ReportArtifact> {
        Ok(ReportArtifact {
            file_name: format!("{file_stem}.{}", format.extension()),
            media_type: format.media_type(),
            bytes: self.render(format)?,
        })
    }
}
