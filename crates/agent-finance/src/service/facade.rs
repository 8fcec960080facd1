//! Tool Service Facade: named operations behind the uniform envelope

use super::envelope::{Envelope, Status};
use super::payload::{CompanyData, CompanyList, CompanyRecordIds, QuarterData, RecordIndex, Report};
use crate::analytics::{calculate_metrics, compare_companies};
use crate::chart::{ChartPayload, generate_chart_spec};
use crate::data::RecordStore;
use crate::error::{FinanceError, Result};
use crate::report::generate_report_summary;
use serde::Serialize;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, error};

/// Title used when a report request names none
pub const DEFAULT_REPORT_TITLE: &str = "Financial Analysis Report";

/// Stateless analytical service over an immutable record store
///
/// Every operation returns an [`Envelope`]; errors and panics inside an
/// operation are converted to a `failed` or `not_found` envelope and never
/// escape.
#[derive(Debug, Clone)]
pub struct ToolService {
    store: RecordStore,
}

impl ToolService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Distinct company names, sorted
    pub fn list_companies(&self) -> Envelope {
        self.guarded("list_companies", || {
            let companies = self.store.companies();
            Ok(CompanyList {
                count: companies.len(),
                companies,
            })
        })
    }

    /// All records of one company; `not_found` when there are none
    pub fn get_company_data(&self, company: &str) -> Envelope {
        self.guarded("get_company_data", || {
            let records: Vec<_> = self
                .store
                .records_by_company(company)
                .into_iter()
                .cloned()
                .collect();
            if records.is_empty() {
                return Err(FinanceError::company_not_found(company));
            }
            Ok(CompanyData {
                company: company.to_string(),
                count: records.len(),
                records,
            })
        })
    }

    /// All records of one quarter; `not_found` when there are none
    pub fn get_quarter_data(&self, quarter: &str) -> Envelope {
        self.guarded("get_quarter_data", || {
            let records: Vec<_> = self
                .store
                .records_by_quarter(quarter)
                .into_iter()
                .cloned()
                .collect();
            if records.is_empty() {
                return Err(FinanceError::NotFound {
                    kind: "quarter",
                    key: quarter.to_string(),
                });
            }
            Ok(QuarterData {
                quarter: quarter.to_string(),
                companies: records.iter().map(|r| r.company.clone()).collect(),
                count: records.len(),
                records,
            })
        })
    }

    pub fn analyze_metrics(&self, record_ids: &[String], metric: &str) -> Envelope {
        self.guarded("analyze_metrics", || {
            calculate_metrics(&self.store, record_ids, metric)
        })
    }

    pub fn compare_companies(&self, company1: &str, company2: &str, metric: &str) -> Envelope {
        self.guarded("compare_companies", || {
            compare_companies(&self.store, company1, company2, metric)
        })
    }

    /// Chart payload with the figure serialized into `plotly_json`
    pub fn generate_chart_json(
        &self,
        chart_type: &str,
        companies: &[String],
        metric: &str,
        title: &str,
    ) -> Envelope {
        self.guarded("generate_chart_json", || {
            let spec = generate_chart_spec(&self.store, chart_type, companies, metric, title)?;
            ChartPayload::try_from(&spec)
        })
    }

    pub fn generate_report(&self, record_ids: &[String], title: Option<&str>) -> Envelope {
        self.guarded("generate_report", || {
            let summary = generate_report_summary(&self.store, record_ids)?;
            Ok(Report {
                title: title.unwrap_or(DEFAULT_REPORT_TITLE).to_string(),
                summary,
                record_ids: record_ids.to_vec(),
                generated_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            })
        })
    }

    /// Every record id, flat and grouped by company
    pub fn get_all_record_ids(&self) -> Envelope {
        self.guarded("get_all_record_ids", || {
            let all_record_ids: Vec<String> =
                self.store.records().iter().map(|r| r.id.clone()).collect();
            let by_company: Vec<CompanyRecordIds> = self
                .store
                .ids_by_company()
                .into_iter()
                .map(|(company, record_ids)| CompanyRecordIds {
                    company,
                    record_ids,
                })
                .collect();
            let format_info = by_company
                .iter()
                .map(|group| (group.company.clone(), group.record_ids.join(", ")))
                .collect();
            Ok(RecordIndex {
                total_records: all_record_ids.len(),
                all_record_ids,
                by_company,
                format_info,
            })
        })
    }

    fn guarded<T, F>(&self, operation: &'static str, f: F) -> Envelope
    where
        T: Serialize,
        F: FnOnce() -> Result<T>,
    {
        match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(payload)) => Envelope::success(&payload),
            Ok(Err(err)) => {
                if err.status() == Status::NotFound {
                    debug!(operation, error = %err, "Lookup missed");
                } else {
                    error!(operation, error = %err, "Operation failed");
                }
                Envelope::failure(&err)
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(operation, error = %message, "Operation panicked");
                Envelope::with_status(Status::Failed, message)
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "operation panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{ComparisonResult, MetricResult, Trend};
    use crate::chart::Figure;
    use serde_json::json;

    fn service() -> ToolService {
        ToolService::new(RecordStore::canonical())
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_list_companies() {
        let value = service().list_companies().into_value();
        assert_eq!(
            value,
            json!({
                "companies": ["Jio Platforms Limited", "Nityo Infotech", "Wand AI"],
                "count": 3,
                "status": "success"
            })
        );
    }

    #[test]
    fn test_company_data_hit_and_miss() {
        let service = service();

        let hit = service.get_company_data("nityo infotech");
        let data: CompanyData = hit.payload_as().unwrap();
        assert_eq!(data.company, "nityo infotech");
        assert_eq!(data.count, 3);

        let miss = service.get_company_data("Acme");
        assert_eq!(miss.status, Status::NotFound);
        assert_eq!(miss.error.as_deref(), Some("No data found for company: Acme"));
    }

    #[test]
    fn test_quarter_data() {
        let service = service();
        let data: QuarterData = service.get_quarter_data("Q3_2025").payload_as().unwrap();
        assert_eq!(data.count, 3);
        assert_eq!(
            data.companies,
            vec!["Jio Platforms Limited", "Nityo Infotech", "Wand AI"]
        );

        let miss = service.get_quarter_data("Q4_2025");
        assert_eq!(miss.status, Status::NotFound);
        assert_eq!(miss.error.as_deref(), Some("No data found for quarter: Q4_2025"));
    }

    #[test]
    fn test_analyze_metrics_envelope() {
        let service = service();
        let envelope = service.analyze_metrics(&ids(&["JIO_Q1_2025", "JIO_Q2_2025"]), "profit");
        let result: MetricResult = envelope.payload_as().unwrap();
        assert_eq!(result.trend, Trend::Upward);

        let failed = service.analyze_metrics(&ids(&["JIO_Q1_2025"]), "sector");
        assert_eq!(failed.status, Status::Failed);
        assert!(failed.error.unwrap().contains("sector"));
    }

    #[test]
    fn test_compare_envelope() {
        let service = service();
        let result: ComparisonResult = service
            .compare_companies("Wand AI", "Jio Platforms Limited", "revenue")
            .payload_as()
            .unwrap();
        assert_eq!(result.leader, "Jio Platforms Limited");

        let miss = service.compare_companies("Acme", "Wand AI", "revenue");
        assert_eq!(miss.status, Status::NotFound);
    }

    #[test]
    fn test_chart_envelope() {
        let service = service();
        let envelope = service.generate_chart_json(
            "bar",
            &ids(&["Wand AI", "Acme"]),
            "deal_value",
            "Deals",
        );
        let payload: ChartPayload = envelope.payload_as().unwrap();
        assert_eq!(payload.chart_id, "bar_deal_value_1_companies");
        assert_eq!(payload.companies, vec!["Wand AI"]);

        let figure: Figure = payload.figure().unwrap();
        assert_eq!(figure.layout.title, "Deals");

        let unsupported = service.generate_chart_json("radar", &ids(&["Wand AI"]), "revenue", "t");
        assert_eq!(unsupported.status, Status::Failed);
    }

    #[test]
    fn test_report_envelope() {
        let service = service();
        let report: Report = service
            .generate_report(&ids(&["WAND_Q1_2025", "WAND_Q2_2025", "WAND_Q3_2025"]), None)
            .payload_as()
            .unwrap();
        assert_eq!(report.title, DEFAULT_REPORT_TITLE);
        assert!((report.summary.total_revenue - 316.0).abs() < f64::EPSILON);
        assert_eq!(report.record_ids.len(), 3);
        assert_eq!(report.generated_at.len(), "2025-10-05T20:59:00".len());

        let empty = service.generate_report(&[], Some("Empty"));
        assert_eq!(empty.status, Status::Failed);
        assert_eq!(empty.error.as_deref(), Some("No records provided"));
    }

    #[test]
    fn test_all_record_ids() {
        let index: RecordIndex = service().get_all_record_ids().payload_as().unwrap();
        assert_eq!(index.total_records, 9);
        assert_eq!(index.all_record_ids[0], "JIO_Q1_2025");
        assert_eq!(index.by_company[1].company, "Nityo Infotech");
        assert_eq!(index.by_company[1].record_ids.len(), 3);
        assert_eq!(
            index.format_info.get("Wand AI").map(String::as_str),
            Some("WAND_Q1_2025, WAND_Q2_2025, WAND_Q3_2025")
        );
        assert_eq!(index.format_info.len(), 3);
    }

    #[test]
    fn test_panic_becomes_failed_envelope() {
        let envelope = service().guarded::<(), _>("exploding", || panic!("boom"));
        assert_eq!(envelope.status, Status::Failed);
        assert_eq!(envelope.error.as_deref(), Some("boom"));
    }
}
