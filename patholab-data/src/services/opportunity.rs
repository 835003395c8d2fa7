//! Opportunity (turnaround) report retrieval and mapping
//!
//! Consumes the case-statistics endpoints and maps the raw payload into
//! per-test and per-pathologist performance records. Blocks belonging to an
//! excluded entity are dropped silently, and every numeric field on the
//! monthly path coerces with default-0 semantics so a malformed backend
//! value can never surface as `NaN` in a chart.

use crate::models::{
    OpportunityReport, OpportunitySummary, OpportunityTest, PathologistPerformance, Period,
};
use crate::normalize::first_string;
use crate::transport::{Transport, TransportError};
use once_cell::sync::Lazy;
use patholab_common::{Error, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

const OPPORTUNITY_BASE: &str = "cases/statistics/opportunity";

/// Entity codes whose records never appear in aggregated reports.
/// Internal quality-control cases are filed under these entities and would
/// distort the turnaround numbers.
static EXCLUDED_ENTITY_CODES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    let mut codes = HashSet::new();
    codes.insert("HAMA");
    codes
});

/// Client for the opportunity statistics endpoints
pub struct OpportunityService {
    transport: Arc<dyn Transport>,
}

impl OpportunityService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Monthly report; without a period the backend reports the current month
    pub async fn monthly(&self, period: Option<Period>) -> Result<OpportunityReport> {
        let mut params = Vec::new();
        if let Some(period) = period {
            params.push(("month".to_string(), period.month.to_string()));
            params.push(("year".to_string(), period.year.to_string()));
        }

        let path = format!("{}/monthly", OPPORTUNITY_BASE);
        tracing::debug!(path = %path, ?period, "loading monthly opportunity report");

        let response = self
            .transport
            .get_json(&path, &params)
            .await
            .map_err(|e| retrieval_error(e, "Failed to load the monthly opportunity report"))?;

        let report = map_monthly(unwrap_data(&response));
        tracing::debug!(
            tests = report.tests.len(),
            pathologists = report.pathologists.len(),
            "monthly opportunity report mapped"
        );
        Ok(report)
    }

    /// Percentage of cases signed out within opportunity, one entry per month.
    ///
    /// Elements keep JS-Number coercion semantics: a non-numeric entry
    /// surfaces as `NaN` rather than a fabricated 0%, so bad backend data
    /// stays visible instead of charting as a real value.
    pub async fn yearly(&self, year: i32) -> Result<Vec<f64>> {
        let path = format!("{}/yearly/{}", OPPORTUNITY_BASE, year);
        tracing::debug!(path = %path, "loading yearly opportunity percentages");

        let response = self
            .transport
            .get_json(&path, &[])
            .await
            .map_err(|e| retrieval_error(e, "Failed to load the yearly opportunity report"))?;

        let data = unwrap_data(&response);
        let Some(Value::Array(entries)) = data.get("percentageByMonth") else {
            return Ok(Vec::new());
        };
        Ok(entries.iter().map(js_number).collect())
    }
}

fn retrieval_error(err: TransportError, fallback: &str) -> Error {
    let message = err
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| fallback.to_string());
    tracing::warn!(error = %err, "opportunity retrieval failed");
    Error::Retrieval(message)
}

/// Report payloads arrive bare or wrapped under `data`
fn unwrap_data(response: &Value) -> &Value {
    match response.get("data") {
        Some(data) if !data.is_null() => data,
        _ => response,
    }
}

fn map_monthly(raw: &Value) -> OpportunityReport {
    let mut tests = Vec::new();
    if let Some(Value::Array(blocks)) = raw.get("tests") {
        for block in blocks {
            if is_excluded(block) {
                continue;
            }
            tests.push(OpportunityTest {
                code: first_string(block, &["code"]),
                name: first_string(block, &["name"]),
                within_opportunity: coerce_count(block.get("withinOpportunity")),
                out_of_opportunity: coerce_count(block.get("outOfOpportunity")),
                average_days: coerce_number(block.get("averageDays")),
            });
        }
    }

    let mut pathologists = Vec::new();
    if let Some(Value::Array(blocks)) = raw.get("pathologists") {
        for block in blocks {
            if is_excluded(block) {
                continue;
            }
            pathologists.push(PathologistPerformance {
                code: first_string(block, &["code"]),
                name: first_string(block, &["name"]),
                within_opportunity: coerce_count(block.get("withinOpportunity")),
                out_of_opportunity: coerce_count(block.get("outOfOpportunity")),
                avg_time: coerce_number(block.get("averageDays")),
            });
        }
    }

    let summary = raw
        .get("summary")
        .filter(|s| s.is_object())
        .map(|s| OpportunitySummary {
            total: coerce_count(s.get("total")),
            within: coerce_count(s.get("within")),
            out: coerce_count(s.get("out")),
        });

    OpportunityReport {
        tests,
        pathologists,
        summary,
    }
}

/// Whether a report block belongs to an excluded entity.
///
/// The entity code may ride on the block itself or on a nested entity
/// object, under several historical key spellings; comparison is trimmed
/// and case-insensitive.
fn is_excluded(block: &Value) -> bool {
    if !block.is_object() {
        return false;
    }

    let entity = ["entity", "entityInfo", "entidad"]
        .iter()
        .find_map(|key| block.get(*key))
        .filter(|v| v.is_object());

    let mut id_as_code = entity
        .map(|e| first_string(e, &["id", "entity_id"]))
        .unwrap_or_default();
    if id_as_code.is_empty() {
        id_as_code = first_string(block, &["entity_id"]);
    }

    let mut code = first_string(block, &["entity_code", "entityCode"]);
    if code.is_empty() {
        if let Some(e) = entity {
            code = first_string(e, &["code", "entity_code", "codigo"]);
        }
    }

    matches_excluded(&code) || matches_excluded(&id_as_code)
}

fn matches_excluded(code: &str) -> bool {
    let normalized = code.trim().to_uppercase();
    !normalized.is_empty() && EXCLUDED_ENTITY_CODES.contains(normalized.as_str())
}

/// Count coercion: parse as number, default to 0 on failure or negatives
fn coerce_count(value: Option<&Value>) -> u64 {
    let n = coerce_number(value);
    if n.is_finite() && n > 0.0 {
        n as u64
    } else {
        0
    }
}

/// Numeric coercion with default-0 semantics for the monthly path
fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    }
}

/// JS `Number()` semantics for the yearly percentage series
fn js_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        _ => f64::NAN,
    }
}
