//! Immutable, load-once record store

use super::{FinancialRecord, canonical};
use crate::error::{FinanceError, Result};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};
use tracing::info;

static RECORD_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]+_Q[1-4]_\d{4}$").expect("record id pattern"));

static QUARTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Q[1-4]_\d{4}$").expect("quarter pattern"));

/// Read-only store of financial records keyed by id
///
/// Built once at process start and shared by handle. Records keep their
/// load order ("store order"); lookups by id go through an index.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Arc<[FinancialRecord]>,
    index: Arc<HashMap<String, usize>>,
}

impl RecordStore {
    /// Build a store from records, validating ids and uniqueness
    pub fn from_records(records: Vec<FinancialRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            validate(record)?;
            if index.insert(record.id.clone(), position).is_some() {
                return Err(FinanceError::DuplicateRecord(record.id.clone()));
            }
        }

        Ok(Self {
            records: records.into(),
            index: Arc::new(index),
        })
    }

    /// The embedded canonical dataset
    pub fn canonical() -> Self {
        Self::from_records(canonical::records()).expect("canonical dataset is valid")
    }

    /// Load a JSON array of records from a file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&text)?;
        info!(path = %path.display(), records = store.len(), "Loaded dataset");
        Ok(store)
    }

    /// Parse a JSON array of records
    pub fn from_json_str(text: &str) -> Result<Self> {
        let records: Vec<FinancialRecord> = serde_json::from_str(text)?;
        Self::from_records(records)
    }

    /// Every record, in store order
    pub fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    /// Position of an id in store order
    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Distinct company names, sorted ascending
    pub fn companies(&self) -> Vec<String> {
        let mut companies: Vec<String> = Vec::new();
        for record in self.records.iter() {
            if !companies.contains(&record.company) {
                companies.push(record.company.clone());
            }
        }
        companies.sort();
        companies
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate(record: &FinancialRecord) -> Result<()> {
    let invalid = |reason: String| FinanceError::InvalidRecord {
        id: record.id.clone(),
        reason,
    };

    if !QUARTER.is_match(&record.quarter) {
        return Err(invalid(format!(
            "quarter '{}' is not of the form Q<N>_<YEAR>",
            record.quarter
        )));
    }
    if !RECORD_ID.is_match(&record.id) {
        return Err(invalid(
            "id is not of the form <COMPANY_CODE>_<QUARTER>".to_string(),
        ));
    }
    if !record.id.ends_with(&format!("_{}", record.quarter)) {
        return Err(invalid(format!(
            "id does not match quarter '{}'",
            record.quarter
        )));
    }
    if record.company.trim().is_empty() {
        return Err(invalid("company is empty".to_string()));
    }
    Ok(())
}
