//! Tool Service Facade and its envelope

pub mod envelope;
pub mod facade;
pub mod payload;

pub use envelope::{Envelope, Status};
pub use facade::{DEFAULT_REPORT_TITLE, ToolService};
pub use payload::{CompanyData, CompanyList, CompanyRecordIds, QuarterData, RecordIndex, Report};
