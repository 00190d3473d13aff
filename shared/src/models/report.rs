//! Report and dashboard wire models
//!
//! Column schemas are fixed and shared by the server (zero-filled fallback
//! rows, CSV export) and the client (table rendering, normalization).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Whether a payload came from a fresh snapshot or a zero-filled placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataStatus {
    Live,
    Fallback,
}

impl DataStatus {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataStatus::Fallback)
    }
}

/// Report sections served by `/api/reports/{section}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportSection {
    Company,
    Opener,
    Intake,
    Comparison,
}

impl ReportSection {
    pub const ALL: [ReportSection; 4] = [
        ReportSection::Company,
        ReportSection::Opener,
        ReportSection::Intake,
        ReportSection::Comparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSection::Company => "company",
            ReportSection::Opener => "opener",
            ReportSection::Intake => "intake",
            ReportSection::Comparison => "comparison",
        }
    }

    pub fn parse(s: &str) -> Option<ReportSection> {
        match s {
            "company" => Some(ReportSection::Company),
            "opener" => Some(ReportSection::Opener),
            "intake" => Some(ReportSection::Intake),
            "comparison" => Some(ReportSection::Comparison),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date ranges accepted by the report filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportRange {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
}

impl ReportRange {
    pub const ALL: [ReportRange; 4] = [
        ReportRange::Today,
        ReportRange::Yesterday,
        ReportRange::ThisWeek,
        ReportRange::ThisMonth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportRange::Today => "today",
            ReportRange::Yesterday => "yesterday",
            ReportRange::ThisWeek => "this_week",
            ReportRange::ThisMonth => "this_month",
        }
    }

    pub fn parse(s: &str) -> Option<ReportRange> {
        match s {
            "today" => Some(ReportRange::Today),
            "yesterday" => Some(ReportRange::Yesterday),
            "this_week" => Some(ReportRange::ThisWeek),
            "this_month" => Some(ReportRange::ThisMonth),
            _ => None,
        }
    }
}

impl std::fmt::Display for ReportRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One report table column: row key plus the header label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

pub const COMPANY_COLUMNS: [Column; 12] = [
    col("leads_received", "Leads Received"),
    col("contacted", "Contacted"),
    col("no_contact", "No Contact"),
    col("dnc", "DNC"),
    col("not_interested_wrong_number", "No Longer Interested / Wrong Number"),
    col("no_credit_report_pulled", "No Credit Report Pulled"),
    col("credit_report_pulled", "Credit Report Pulled"),
    col("qualified", "Qualified"),
    col("not_qualified", "Not Qualified"),
    col("enrolled", "Enrolled"),
    col("enrolled_debt", "Enrolled Debt"),
    col("cancelled", "Cancelled"),
];

pub const OPENER_COLUMNS: [Column; 9] = [
    col("agent", "AGENT"),
    col("received", "RECEIVED"),
    col("cp", "CP"),
    col("cp_percent", "CP%"),
    col("transferred", "TRANSFERRED"),
    col("transferred_percent", "TRANSFERRED%"),
    col("ta", "TA"),
    col("cr_error", "CR ERROR"),
    col("cr_error_percent", "CR ERROR%"),
];

pub const INTAKE_COLUMNS: [Column; 8] = [
    col("agent", "AGENT"),
    col("received", "RECEIVED"),
    col("pitched", "PITCHED"),
    col("pitched_percent", "PITCHED%"),
    col("enrolled", "ENROLLED"),
    col("enrolled_debt", "ENROLLED DEBT"),
    col("enrollment_conversion", "ENROLLMENT CONVERSION"),
    col("enrolled_received", "ENROLLED / RECEIVED"),
];

/// Column schema for a tabular section. Comparison is chart-shaped and has
/// no fixed columns.
pub fn section_columns(section: ReportSection) -> Option<&'static [Column]> {
    match section {
        ReportSection::Company => Some(&COMPANY_COLUMNS),
        ReportSection::Opener => Some(&OPENER_COLUMNS),
        ReportSection::Intake => Some(&INTAKE_COLUMNS),
        ReportSection::Comparison => None,
    }
}

/// Zero-filled placeholder row: "—" for the agent column, "0%" for
/// percentage and conversion columns, 0 otherwise.
pub fn blank_row(columns: &[Column]) -> Map<String, Value> {
    columns
        .iter()
        .map(|column| {
            let value = if column.key == "agent" {
                json!("—")
            } else if column.key.contains("percent") || column.key.contains("conversion") {
                json!("0%")
            } else {
                json!(0)
            };
            (column.key.to_string(), value)
        })
        .collect()
}

/// Placeholder rows served when no fresh snapshot exists
pub fn fallback_rows(section: ReportSection) -> Vec<Value> {
    match section_columns(section) {
        Some(columns) => vec![Value::Object(blank_row(columns))],
        None => Vec::new(),
    }
}

/// Wire shape of `GET /api/reports/{section}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionReport {
    pub status: DataStatus,
    pub rows: Vec<Value>,
}

pub const WEEKDAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

/// Dashboard summary payload. Wire names follow the original UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_leads: i64,
    pub pending_leads: i64,
    pub conversion_rate: f64,
    pub weekly_performance: Vec<WeeklyPoint>,
    pub daily_metrics: Vec<DailyMetric>,
    pub pending_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyMetric {
    pub day: String,
    pub opener: OpenerDay,
    pub intake: IntakeDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenerDay {
    pub transferred: i64,
    pub conversion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeDay {
    pub enrolled: i64,
    pub conversion: String,
}

impl DashboardSummary {
    /// Zero-filled summary with a Mon-Fri series, shown until the first
    /// successful sync. The pending label depends on the viewer's role.
    pub fn fallback(role: &str) -> Self {
        let pending_label = if role == "opener" {
            "Transferred Leads"
        } else {
            "Enrolled Leads"
        };

        DashboardSummary {
            total_leads: 0,
            pending_leads: 0,
            conversion_rate: 0.0,
            weekly_performance: WEEKDAYS
                .iter()
                .map(|day| WeeklyPoint {
                    label: day.to_string(),
                    value: 0,
                })
                .collect(),
            daily_metrics: WEEKDAYS
                .iter()
                .map(|day| DailyMetric {
                    day: day.to_string(),
                    opener: OpenerDay {
                        transferred: 0,
                        conversion: "0%".to_string(),
                    },
                    intake: IntakeDay {
                        enrolled: 0,
                        conversion: "0%".to_string(),
                    },
                })
                .collect(),
            pending_label: pending_label.to_string(),
        }
    }
}

/// Wire shape of `GET /api/dashboard/summary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub status: DataStatus,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

/// Wire shape of `GET /api/forthcrm/sync/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncStatus {
    /// True while a sync pass is running
    pub active: bool,
    pub last_successful_sync: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}
