//! core/table.rs — Append-only chain output: one row per sampled plan, one
//! column per tracked statistic.
//!
//! Rows are heterogeneous: a column may hold a plain scalar (a plan-wide
//! statistic) or a district-keyed mapping (a per-district statistic). The two
//! shapes are an explicit tagged union so district extraction is a match, not
//! a duck-typed key probe.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from table access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Integer row access outside the table (after negative-index
    /// resolution).
    #[error("row index {index} out of range for table of {len} rows")]
    IndexOutOfRange { index: isize, len: usize },
    /// Column extraction hit a row without that column.
    #[error("row {row} has no column named {column:?}")]
    MissingColumn { column: String, row: usize },
}

/// Key identifying one district within a plan.
///
/// District ids arrive as integers or strings depending on the graph the
/// chain ran on; JSON object keys force strings either way, so the canonical
/// form is the decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistrictId(String);

impl DistrictId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DistrictId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for DistrictId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<u32> for DistrictId {
    fn from(number: u32) -> Self {
        Self(number.to_string())
    }
}

impl fmt::Display for DistrictId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single statistic value as produced by an external scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// One column's value in one row: either a plan-wide scalar or a
/// district-keyed mapping of sub-values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Scalar(Scalar),
    ByDistrict(BTreeMap<DistrictId, Scalar>),
}

impl CellValue {
    /// Convenience constructor for a district-keyed cell.
    pub fn by_district<K, V, I>(entries: I) -> Self
    where
        K: Into<DistrictId>,
        V: Into<Scalar>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::ByDistrict(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Scalar> for CellValue {
    fn from(v: Scalar) -> Self {
        Self::Scalar(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Scalar(Scalar::Bool(v))
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Scalar(Scalar::Int(v))
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Scalar(Scalar::Float(v))
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Scalar(Scalar::Text(v.to_owned()))
    }
}

/// One sampled plan's tracked statistics, keyed by column name.
pub type Row = BTreeMap<String, CellValue>;

/// Ordered, append-only sequence of rows for one chain run.
///
/// No shape validation happens on append: a column need not appear in every
/// row, and district-keyed columns need not carry the same district ids
/// across rows. Serializes transparently as a JSON array of row objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainOutputTable {
    rows: Vec<Row>,
}

impl ChainOutputTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Push `row` at the end. Rows are never removed or reordered.
    pub fn append(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Row at `index`; negative indices count from the end, since chain
    /// drivers habitually ask for the latest row as `-1`.
    pub fn row(&self, index: isize) -> Result<&Row, TableError> {
        let len = self.rows.len();
        let resolved = if index < 0 {
            index.checked_add(len as isize)
        } else {
            Some(index)
        };
        resolved
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.rows.get(i))
            .ok_or(TableError::IndexOutOfRange { index, len })
    }

    /// The named column's value from every row, in row order.
    ///
    /// Column policy is strict: the first row lacking the column fails the
    /// whole extraction with [`TableError::MissingColumn`], applied uniformly
    /// across the table.
    pub fn column(&self, name: &str) -> Result<Vec<&CellValue>, TableError> {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, values)| {
                values.get(name).ok_or_else(|| TableError::MissingColumn {
                    column: name.to_owned(),
                    row,
                })
            })
            .collect()
    }

    /// Restrict every row to the district-keyed columns carrying `id`, each
    /// mapped to that row's sub-value for the district.
    ///
    /// Row count is preserved: a row with no matching column contributes an
    /// empty mapping, never a missing entry. Plain-scalar columns are ignored.
    pub fn district(&self, id: &DistrictId) -> Vec<BTreeMap<String, Scalar>> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|(column, value)| match value {
                        CellValue::ByDistrict(by_district) => by_district
                            .get(id)
                            .map(|sub| (column.clone(), sub.clone())),
                        CellValue::Scalar(_) => None,
                    })
                    .collect()
            })
            .collect()
    }

    /// Serialize the full row sequence as a JSON array of row objects.
    ///
    /// Stable across repeated calls; serialization reads the table without
    /// mutating it.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.rows)
    }
}

impl<'a> IntoIterator for &'a ChainOutputTable {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for ChainOutputTable {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

/// Build a table by applying every handler to every element: one row per
/// element, one column per handler, all handler results combined into that
/// single row.
pub fn tabulate<T, I>(
    elements: I,
    handlers: &[(&str, &dyn Fn(&T) -> CellValue)],
) -> ChainOutputTable
where
    I: IntoIterator<Item = T>,
{
    let mut table = ChainOutputTable::new();
    for element in elements {
        let row = handlers
            .iter()
            .map(|(column, handler)| ((*column).to_owned(), handler(&element)))
            .collect();
        table.append(row);
    }
    debug!(
        rows = table.len(),
        columns = handlers.len(),
        "tabulated elements"
    );
    table
}
