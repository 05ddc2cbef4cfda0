// workbook sources: CSV directory (`<SHEET NAME>.csv`), a single CSV reader, or
//a JSON document `{"sheets":[{"name":…,"columns":[…],"rows":[[…]]}]}`
//every cell ends up as text or null

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::error::{LineageError, LineageResult};
use crate::core::table::{Cell, Table, Workbook};

#[derive(Debug, Deserialize)]
struct WorkbookDoc {
    sheets: Vec<SheetDoc>,
}

#[derive(Debug, Deserialize)]
struct SheetDoc {
    name: String,
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

fn text_cell(raw: &str) -> Cell {
    if raw.is_empty() { None } else { Some(raw.to_string()) }
}

/// Coerce a JSON cell to text. Numbers keep their JSON rendering, so a
/// FOR CONTEXT stored as `12` reads back as `"12"`.
fn coerce_value(sheet: &str, column: &str, row: usize, value: &Value) -> LineageResult<Cell> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(text_cell(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(if *b { "True" } else { "False" }.to_string())),
        Value::Array(_) | Value::Object(_) => Err(LineageError::MalformedField {
            sheet: sheet.to_string(),
            column: column.to_string(),
            row,
            reason: "nested values cannot be coerced to text".to_string(),
        }),
    }
}

impl Workbook {
    /// Read one sheet from CSV text: the header row, then data rows.
    pub fn read_csv_sheet<R: Read>(&mut self, name: &str, reader: R) -> LineageResult<()> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
        let mut table = Table::new(name, columns);

        for record in rdr.records() {
            let record = record?;
            table.push_row(record.iter().map(text_cell).collect());
        }

        debug!(sheet = name, rows = table.len(), "read csv sheet");
        self.add_sheet(table);
        Ok(())
    }

    /// Load every `*.csv` file in `dir` as a sheet named after the file stem.
    pub fn from_csv_dir(dir: impl AsRef<Path>) -> LineageResult<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir.as_ref())?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            })
            .collect();
        paths.sort();

        let mut workbook = Workbook::new();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let name = name.to_string();
            workbook.read_csv_sheet(&name, File::open(&path)?)?;
        }
        Ok(workbook)
    }

    pub fn from_json_str(text: &str) -> LineageResult<Self> {
        let doc: WorkbookDoc = serde_json::from_str(text)?;

        let mut workbook = Workbook::new();
        for sheet in doc.sheets {
            let mut table = Table::new(sheet.name.as_str(), sheet.columns.clone());
            for (i, raw_row) in sheet.rows.iter().enumerate() {
                let mut row = Vec::with_capacity(raw_row.len());
                for (j, value) in raw_row.iter().enumerate() {
                    let column = sheet.columns.get(j).map(String::as_str).unwrap_or("");
                    row.push(coerce_value(&sheet.name, column, i + 1, value)?);
                }
                table.push_row(row);
            }
            workbook.add_sheet(table);
        }
        Ok(workbook)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_sheet_keeps_duplicate_headers_and_nulls() {
        let data = "NAME,CONTEXT TYPE || CONTEXT NAME,CONTEXT TYPE || CONTEXT NAME\nC1Context,,Workflow || C1\n";
        let mut wb = Workbook::new();
        wb.read_csv_sheet("CONTEXTS", data.as_bytes()).unwrap();

        let t = wb.sheet("CONTEXTS").unwrap();
        assert_eq!(t.columns().len(), 3);
        assert_eq!(t.rows()[0], vec![Some("C1Context".into()), None, Some("Workflow || C1".into())]);
    }

    #[test]
    fn json_numbers_are_coerced_to_text() {
        let doc = r#"{"sheets":[{"name":"GOVERNANCE MAPPING",
            "columns":["ENTITY","FOR CONTEXT","IS ENABLED?"],
            "rows":[["product", 12, "Yes"], ["sku", 1.5, "Yes"], [null, true, "No"]]}]}"#;
        let wb = Workbook::from_json_str(doc).unwrap();
        let t = wb.sheet("GOVERNANCE MAPPING").unwrap();

        assert_eq!(t.cell(0, 1), Some("12"));
        assert_eq!(t.cell(1, 1), Some("1.5"));
        assert_eq!(t.cell(2, 0), None);
        assert_eq!(t.cell(2, 1), Some("True"));
    }

    #[test]
    fn json_nested_cell_is_malformed() {
        let doc = r#"{"sheets":[{"name":"GOVERNANCE MAPPING","columns":["FOR CONTEXT"],"rows":[[["a"]]]}]}"#;
        let err = Workbook::from_json_str(doc).unwrap_err();
        match err {
            LineageError::MalformedField { sheet, column, row, .. } => {
                assert_eq!(sheet, "GOVERNANCE MAPPING");
                assert_eq!(column, "FOR CONTEXT");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn csv_dir_uses_file_stems_as_sheet_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut f = File::create(dir.path().join("BUSINESS RULES.csv")).unwrap();
        writeln!(f, "NAME,IS ENABLED?").unwrap();
        writeln!(f, "R1,Yes").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let wb = Workbook::from_csv_dir(dir.path()).unwrap();
        assert_eq!(wb.sheet_names().collect::<Vec<_>>(), vec!["BUSINESS RULES"]);
        assert_eq!(wb.sheet("BUSINESS RULES").unwrap().len(), 1);
    }
}
