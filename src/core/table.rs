// positional tables + the workbook that holds them
use crate::core::error::{LineageError, LineageResult};

/// A single cell. `None` is an empty/null cell, never matched by anything.
pub type Cell = Option<String>;

/// A named sheet with ordered columns and rows.
///
/// Columns are addressed by position. Header names may repeat (the CONTEXTS
/// sheet carries its composite column twice), so lookups by name take an
/// occurrence number instead of collapsing duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from string literals; empty strings become null cells.
    pub fn from_strs(name: &str, columns: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Table::new(name, columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|v| if v.is_empty() { None } else { Some(v.to_string()) })
                    .collect(),
            );
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row, padding short rows with nulls and dropping surplus cells.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    //every position holding this header, left to right
    pub fn occurrences(&self, column: &str) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| if c == column { Some(i) } else { None })
            .collect()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Position of the first column with this header.
    pub fn column_index(&self, column: &str) -> LineageResult<usize> {
        self.nth_column_index(column, 1)
    }

    /// Position of the `occurrence`-th (1-based) column with this header.
    pub fn nth_column_index(&self, column: &str, occurrence: usize) -> LineageResult<usize> {
        let found = self.occurrences(column);
        match occurrence.checked_sub(1).and_then(|i| found.get(i)) {
            Some(&idx) => Ok(idx),
            None if occurrence <= 1 => Err(LineageError::missing_column(&self.name, column)),
            None => Err(LineageError::missing_column(
                &self.name,
                format!("{column} (occurrence {occurrence}, found {})", found.len()),
            )),
        }
    }

    pub fn rename_column_at(&mut self, idx: usize, new_name: &str) {
        if let Some(c) = self.columns.get_mut(idx) {
            *c = new_name.to_string();
        }
    }

    /// Rename the first column called `from`; absent columns are left alone.
    pub fn alias(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.columns.iter().position(|c| c == from) {
            self.rename_column_at(idx, to);
        }
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|r| keep(r));
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

/// The uploaded document: an ordered list of sheets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Workbook {
    sheets: Vec<Table>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, table: Table) -> Self {
        self.add_sheet(table);
        self
    }

    /// Add a sheet, replacing any existing sheet of the same name.
    pub fn add_sheet(&mut self, table: Table) {
        match self.sheets.iter_mut().find(|s| s.name == table.name) {
            Some(existing) => *existing = table,
            None => self.sheets.push(table),
        }
    }

    pub fn sheet(&self, name: &str) -> Option<&Table> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn require(&self, name: &str) -> LineageResult<&Table> {
        self.sheet(name).ok_or_else(|| LineageError::missing_sheet(name))
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sheets.iter().map(|s| s.name.as_str())
    }
}
