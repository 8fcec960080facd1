//! Embedded canonical dataset
//!
//! Three companies over Q1-Q3 2025. Figures are INR crores except
//! percentages and head counts.

use super::FinancialRecord;

const TELECOM: &str = "Telecom/Digital Services";
const IT_SERVICES: &str = "IT Services";
const AI_SAAS: &str = "AI SaaS";

/// The nine canonical records, in store order
pub fn records() -> Vec<FinancialRecord> {
    vec![
        FinancialRecord::new("JIO", "Jio Platforms Limited", "Q1_2025", 31100.0, 5130.0, 12.8, 91700, 8.9, 2300.0, TELECOM),
        FinancialRecord::new("JIO", "Jio Platforms Limited", "Q2_2025", 32050.0, 5375.0, 13.5, 92400, 8.6, 2400.0, TELECOM),
        FinancialRecord::new("JIO", "Jio Platforms Limited", "Q3_2025", 33100.0, 5610.0, 14.2, 93000, 8.5, 2500.0, TELECOM),
        FinancialRecord::new("NITYO", "Nityo Infotech", "Q1_2025", 1350.0, 210.0, 10.5, 25200, 14.2, 560.0, IT_SERVICES),
        FinancialRecord::new("NITYO", "Nityo Infotech", "Q2_2025", 1410.0, 220.0, 12.3, 25450, 13.8, 600.0, IT_SERVICES),
        FinancialRecord::new("NITYO", "Nityo Infotech", "Q3_2025", 1485.0, 235.0, 13.7, 25700, 13.2, 670.0, IT_SERVICES),
        FinancialRecord::new("WAND", "Wand AI", "Q1_2025", 92.0, 8.0, 41.0, 130, 22.5, 24.0, AI_SAAS),
        FinancialRecord::new("WAND", "Wand AI", "Q2_2025", 104.0, 12.0, 44.6, 142, 19.6, 32.0, AI_SAAS),
        FinancialRecord::new("WAND", "Wand AI", "Q3_2025", 120.0, 17.0, 48.5, 150, 16.0, 41.0, AI_SAAS),
    ]
}
