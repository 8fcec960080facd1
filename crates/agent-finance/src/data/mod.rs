//! Record Store and Query Layer

pub mod canonical;
pub mod query;
pub mod record;
pub mod store;

pub use record::{FinancialRecord, Metric};
pub use store::RecordStore;
