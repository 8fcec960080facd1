//! Terminal rendering of service envelopes

use agent_finance::service::{CompanyList, RecordIndex};
use agent_finance::{ComparisonResult, Envelope, FinancialRecord, MetricResult};
use anyhow::bail;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use serde::Deserialize;

/// Print the envelope as pretty JSON; fail on a non-success status
pub fn raw(envelope: Envelope) -> anyhow::Result<()> {
    let success = envelope.is_success();
    let error = envelope.error.clone();
    println!("{}", serde_json::to_string_pretty(&envelope.into_value())?);
    if !success {
        bail!(error.unwrap_or_else(|| "operation failed".to_string()));
    }
    Ok(())
}

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn num(value: f64) -> String {
    format!("{value:.2}")
}

pub fn companies(envelope: Envelope, json: bool) -> anyhow::Result<()> {
    if json {
        return raw(envelope);
    }
    let list: CompanyList = envelope.payload_as()?;
    let mut t = table(vec!["Company"]);
    for company in &list.companies {
        t.add_row(vec![company.as_str()]);
    }
    println!("{t}\n{} companies", list.count);
    Ok(())
}

pub fn record_ids(envelope: Envelope, json: bool) -> anyhow::Result<()> {
    if json {
        return raw(envelope);
    }
    let index: RecordIndex = envelope.payload_as()?;
    let mut t = table(vec!["Company", "Record ids"]);
    for group in &index.by_company {
        t.add_row(vec![group.company.clone(), group.record_ids.join(", ")]);
    }
    println!("{t}\n{} records", index.total_records);
    Ok(())
}

/// `get_company_data` and `get_quarter_data` share the `records` field
#[derive(Deserialize)]
struct Records {
    records: Vec<FinancialRecord>,
}

pub fn records(envelope: Envelope, json: bool) -> anyhow::Result<()> {
    if json {
        return raw(envelope);
    }
    let Records { records } = envelope.payload_as()?;
    let mut t = table(vec![
        "Id",
        "Company",
        "Quarter",
        "Revenue",
        "Profit",
        "Growth YoY %",
        "Employees",
        "Attrition %",
        "Deal value",
        "Sector",
    ]);
    for r in &records {
        t.add_row(vec![
            r.id.clone(),
            r.company.clone(),
            r.quarter.clone(),
            num(r.revenue),
            num(r.profit),
            num(r.growth_yoy),
            r.employee_count.to_string(),
            num(r.attrition_rate),
            num(r.deal_value),
            r.sector.clone(),
        ]);
    }
    println!("{t}");
    Ok(())
}

pub fn metrics(envelope: Envelope, json: bool) -> anyhow::Result<()> {
    if json {
        return raw(envelope);
    }
    let result: MetricResult = envelope.payload_as()?;
    let mut t = table(vec!["Id", "Company", "Quarter", result.metric.as_str()]);
    for snapshot in &result.records {
        t.add_row(vec![
            snapshot.id.clone(),
            snapshot.company.clone(),
            snapshot.quarter.clone(),
            num(snapshot.value),
        ]);
    }
    println!("{t}");
    println!(
        "count {}  average {}  min {}  max {}  trend {}",
        result.count,
        num(result.average),
        num(result.min),
        num(result.max),
        result.trend
    );
    Ok(())
}

pub fn comparison(envelope: Envelope, json: bool) -> anyhow::Result<()> {
    if json {
        return raw(envelope);
    }
    let result: ComparisonResult = envelope.payload_as()?;
    let mut t = table(vec!["Company", &format!("Average {}", result.metric)]);
    t.add_row(vec![result.company1.clone(), num(result.company1_avg)]);
    t.add_row(vec![result.company2.clone(), num(result.company2_avg)]);
    println!("{t}");
    println!("difference {}  leader {}", num(result.difference), result.leader);
    Ok(())
}
