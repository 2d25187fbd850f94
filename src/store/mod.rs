//! Table Store — loads the four siloed CSV datasets and exposes raw,
//! row-oriented access.
//!
//! The store is constructed exactly once at startup via [`TableStore::load`]
//! and is immutable afterwards; the merged patient view is built lazily
//! behind a `OnceLock` so concurrent readers never observe partial state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::query::page_bounds;
use crate::view::PatientView;

#[cfg(test)]
pub(crate) mod fixtures;

/// Column every dataset is keyed by.
pub const ID_COLUMN: &str = "Patient_ID";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing dataset: {path}")]
    MissingTable { path: PathBuf },

    #[error("Table {table} has no {column} column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("Invalid table requested: {value}")]
    InvalidTable { value: String },
}

// ═══════════════════════════════════════════════════════════
// TableKind
// ═══════════════════════════════════════════════════════════

/// The four source datasets, keyed by patient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Genomics,
    Clinical,
    Lifestyle,
    Outcomes,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Genomics,
        TableKind::Clinical,
        TableKind::Lifestyle,
        TableKind::Outcomes,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Genomics => "genomics",
            TableKind::Clinical => "clinical",
            TableKind::Lifestyle => "lifestyle",
            TableKind::Outcomes => "outcomes",
        }
    }

    fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl std::str::FromStr for TableKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "genomics" => Ok(TableKind::Genomics),
            "clinical" => Ok(TableKind::Clinical),
            "lifestyle" => Ok(TableKind::Lifestyle),
            "outcomes" => Ok(TableKind::Outcomes),
            _ => Err(StoreError::InvalidTable { value: s.into() }),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Raw rows
// ═══════════════════════════════════════════════════════════

/// One raw dataset row: column → typed cell, in file column order.
///
/// Cells are parsed into JSON values at load time (empty → null, then
/// integer, then float, then string) so the raw endpoints serialize with
/// real nulls instead of empty strings. The `Patient_ID` column is always
/// kept as a string, never type-inferred.
#[derive(Debug, Clone)]
pub struct RawRow {
    fields: Vec<(String, Value)>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn patient_id(&self) -> Option<&str> {
        self.get(ID_COLUMN).and_then(Value::as_str)
    }
}

impl Serialize for RawRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = raw.parse::<f64>() {
        if float.is_finite() {
            return Value::from(float);
        }
    }
    Value::String(raw.to_string())
}

/// Identifier tokens cannot contain `%`, so percentage columns are renamed
/// to a `_Pct` suffix form at load (`Time_in_Therapeutic_Range_%` →
/// `Time_in_Therapeutic_Range_Pct`).
fn normalize_header(header: &str) -> String {
    match header.strip_suffix('%') {
        Some(stripped) => format!("{}_Pct", stripped.trim_end_matches('_')),
        None => header.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════
// Tables
// ═══════════════════════════════════════════════════════════

/// One loaded dataset: rows in file order plus an id index.
#[derive(Debug)]
pub struct Table {
    kind: TableKind,
    columns: Vec<String>,
    rows: Vec<RawRow>,
    index: HashMap<String, usize>,
}

impl Table {
    fn load(kind: TableKind, path: &Path) -> Result<Self, StoreError> {
        if !path.is_file() {
            return Err(StoreError::MissingTable { path: path.into() });
        }

        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();

        if !columns.iter().any(|c| c == ID_COLUMN) {
            return Err(StoreError::MissingColumn {
                table: kind.as_str(),
                column: ID_COLUMN,
            });
        }

        let mut rows = Vec::new();
        let mut index = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let fields = columns
                .iter()
                .zip(record.iter())
                .map(|(name, cell)| {
                    let value = if name == ID_COLUMN {
                        Value::String(cell.to_string())
                    } else {
                        parse_cell(cell)
                    };
                    (name.clone(), value)
                })
                .collect();
            let row = RawRow { fields };
            if let Some(id) = row.patient_id() {
                index.entry(id.to_string()).or_insert(rows.len());
            }
            rows.push(row);
        }

        Ok(Self {
            kind,
            columns,
            rows,
            index,
        })
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record_by_id(&self, patient_id: &str) -> Option<&RawRow> {
        self.index.get(patient_id).map(|&i| &self.rows[i])
    }
}

// ═══════════════════════════════════════════════════════════
// TableStore
// ═══════════════════════════════════════════════════════════

/// All four datasets, loaded once, plus the lazily-built merged view.
#[derive(Debug)]
pub struct TableStore {
    genomics: Table,
    clinical: Table,
    lifestyle: Table,
    outcomes: Table,
    view: OnceLock<PatientView>,
}

impl TableStore {
    /// Load every dataset from `data_dir`. Any missing or malformed file is
    /// an error; the process must not serve traffic without all four tables.
    pub fn load(data_dir: &Path) -> Result<Self, StoreError> {
        let load = |kind: TableKind| Table::load(kind, &data_dir.join(kind.file_name()));
        let store = Self {
            genomics: load(TableKind::Genomics)?,
            clinical: load(TableKind::Clinical)?,
            lifestyle: load(TableKind::Lifestyle)?,
            outcomes: load(TableKind::Outcomes)?,
            view: OnceLock::new(),
        };
        tracing::info!(
            genomics = store.genomics.len(),
            clinical = store.clinical.len(),
            lifestyle = store.lifestyle.len(),
            outcomes = store.outcomes.len(),
            "datasets loaded"
        );
        Ok(store)
    }

    pub fn table(&self, kind: TableKind) -> &Table {
        match kind {
            TableKind::Genomics => &self.genomics,
            TableKind::Clinical => &self.clinical,
            TableKind::Lifestyle => &self.lifestyle,
            TableKind::Outcomes => &self.outcomes,
        }
    }

    /// Raw rows of one table, paginated with the shared clamping rules.
    pub fn rows(&self, kind: TableKind, limit: Option<usize>, offset: Option<usize>) -> &[RawRow] {
        let rows = self.table(kind).rows();
        &rows[page_bounds(rows.len(), limit, offset)]
    }

    pub fn record_by_id(&self, kind: TableKind, patient_id: &str) -> Option<&RawRow> {
        self.table(kind).record_by_id(patient_id)
    }

    /// All patient identifiers, in clinical-table order.
    pub fn patient_ids(&self) -> Vec<String> {
        self.clinical
            .rows()
            .iter()
            .filter_map(|row| row.patient_id())
            .map(str::to_string)
            .collect()
    }

    /// The merged patient view, built on first access and cached for the
    /// process lifetime.
    pub fn view(&self) -> &PatientView {
        self.view.get_or_init(|| PatientView::build(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn table_kind_round_trips() {
        for kind in TableKind::ALL {
            assert_eq!(TableKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_table_name_is_rejected() {
        let err = TableKind::from_str("billing").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTable { value } if value == "billing"));
    }

    #[test]
    fn parse_cell_types() {
        assert_eq!(parse_cell(""), Value::Null);
        assert_eq!(parse_cell("42"), Value::from(42));
        assert_eq!(parse_cell("64.8"), Value::from(64.8));
        assert_eq!(parse_cell("*1/*2"), Value::from("*1/*2"));
        // Non-finite floats stay strings rather than becoming JSON null.
        assert_eq!(parse_cell("NaN"), Value::from("NaN"));
    }

    #[test]
    fn percent_headers_get_pct_suffix() {
        assert_eq!(
            normalize_header("Time_in_Therapeutic_Range_%"),
            "Time_in_Therapeutic_Range_Pct"
        );
        assert_eq!(normalize_header("Age"), "Age");
    }

    #[test]
    fn load_reads_all_tables() {
        let dir = fixtures::sample_data_dir();
        let store = TableStore::load(dir.path()).unwrap();

        assert_eq!(store.table(TableKind::Clinical).len(), 6);
        assert_eq!(store.table(TableKind::Genomics).len(), 5);
        assert_eq!(store.table(TableKind::Lifestyle).len(), 6);
        assert_eq!(store.table(TableKind::Outcomes).len(), 6);
    }

    #[test]
    fn load_fails_on_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, StoreError::MissingTable { .. }));
    }

    #[test]
    fn load_fails_without_id_column() {
        let dir = fixtures::sample_data_dir();
        std::fs::write(dir.path().join("genomics.csv"), "Id,CYP2C9\nP001,*1/*1\n").unwrap();
        let err = TableStore::load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingColumn { table: "genomics", column: ID_COLUMN }
        ));
    }

    #[test]
    fn outcomes_percent_column_is_renamed() {
        let store = fixtures::sample_store();
        let columns = store.table(TableKind::Outcomes).columns();
        assert!(columns.iter().any(|c| c == "Time_in_Therapeutic_Range_Pct"));
        assert!(!columns.iter().any(|c| c.contains('%')));
    }

    #[test]
    fn record_lookup_by_id() {
        let store = fixtures::sample_store();
        let row = store.record_by_id(TableKind::Clinical, "P002").unwrap();
        assert_eq!(row.get("Age"), Some(&Value::from(85)));
        assert!(store.record_by_id(TableKind::Clinical, "P999").is_none());
    }

    #[test]
    fn missing_cells_load_as_null() {
        let store = fixtures::sample_store();
        let row = store.record_by_id(TableKind::Genomics, "P003").unwrap();
        assert_eq!(row.get("CYP2C9"), Some(&Value::Null));
    }

    #[test]
    fn rows_pagination_is_clamped() {
        let store = fixtures::sample_store();

        let all = store.rows(TableKind::Clinical, None, None);
        assert_eq!(all.len(), 6);

        let page = store.rows(TableKind::Clinical, Some(2), Some(1));
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].patient_id(), Some("P002"));

        // Zero limit is clamped up to one row, never an error.
        assert_eq!(store.rows(TableKind::Clinical, Some(0), None).len(), 1);
        // Out-of-range offset yields an empty slice.
        assert!(store.rows(TableKind::Clinical, None, Some(100)).is_empty());
    }

    #[test]
    fn patient_ids_follow_clinical_order() {
        let store = fixtures::sample_store();
        assert_eq!(
            store.patient_ids(),
            vec!["P001", "P002", "P003", "P004", "P005", "P006"]
        );
    }

    #[test]
    fn raw_row_serializes_in_column_order() {
        let store = fixtures::sample_store();
        let row = store.record_by_id(TableKind::Genomics, "P001").unwrap();
        let json = serde_json::to_string(row).unwrap();
        let id_pos = json.find("Patient_ID").unwrap();
        let cyp_pos = json.find("CYP2C9").unwrap();
        assert!(id_pos < cyp_pos);
    }
}
