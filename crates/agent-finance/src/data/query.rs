//! Query Layer: filtering the store by company, quarter or id

use super::{FinancialRecord, RecordStore};

impl RecordStore {
    /// Records whose company matches `name`, ignoring case, in store order
    ///
    /// An unknown company yields an empty vector, not an error.
    pub fn records_by_company(&self, name: &str) -> Vec<&FinancialRecord> {
        let wanted = name.to_lowercase();
        self.records()
            .iter()
            .filter(|record| record.company.to_lowercase() == wanted)
            .collect()
    }

    /// Records for an exact quarter string, in store order
    pub fn records_by_quarter(&self, quarter: &str) -> Vec<&FinancialRecord> {
        self.records()
            .iter()
            .filter(|record| record.quarter == quarter)
            .collect()
    }

    /// Exact id lookup
    pub fn record_by_id(&self, id: &str) -> Option<&FinancialRecord> {
        self.position(id).map(|position| &self.records()[position])
    }

    /// Record ids grouped by company, companies in first-seen order
    pub fn ids_by_company(&self) -> Vec<(String, Vec<String>)> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for record in self.records() {
            match groups.iter_mut().find(|(company, _)| *company == record.company) {
                Some((_, ids)) => ids.push(record.id.clone()),
                None => groups.push((record.company.clone(), vec![record.id.clone()])),
            }
        }
        groups
    }
}
