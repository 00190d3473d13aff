//! Report section and sync status endpoints

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::Value;
use shared::error::{AppError, ErrorCode};
use shared::models::{
    DataStatus, ReportRange, ReportSection, SectionReport, SyncStatus, fallback_rows,
};

use crate::db;
use crate::state::AppState;

use super::ApiResult;

#[derive(Deserialize)]
pub struct RangeQuery {
    pub range: Option<String>,
}

/// A snapshot is live while younger than two sync intervals; after that it
/// is stale and the zero-filled fallback is served instead.
pub fn is_fresh(captured_at: DateTime<Utc>, now: DateTime<Utc>, interval_secs: u64) -> bool {
    now - captured_at <= Duration::seconds(2 * interval_secs as i64)
}

/// GET /api/reports/{section}?range=
pub async fn get_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Query(query): Query<RangeQuery>,
) -> ApiResult<SectionReport> {
    let section = ReportSection::parse(&section)
        .ok_or_else(|| AppError::validation(format!("Unknown report section: {section}")))?;
    let range = match query.range.as_deref() {
        None => ReportRange::Today,
        Some(value) => ReportRange::parse(value)
            .ok_or_else(|| AppError::validation(format!("Unknown report range: {value}")))?,
    };

    let snapshot =
        db::reports::fetch_report_snapshot(&state.pool, section.as_str(), range.as_str())
            .await
            .map_err(|e| {
                tracing::error!("Report snapshot fetch failed: {e}");
                AppError::new(ErrorCode::InternalError)
            })?;

    let report = match snapshot {
        Some(snap) if is_fresh(snap.captured_at, Utc::now(), state.sync_interval_secs) => {
            let rows = match snap.payload {
                Value::Array(rows) => rows,
                other => vec![other],
            };
            SectionReport {
                status: DataStatus::Live,
                rows,
            }
        }
        _ => SectionReport {
            status: DataStatus::Fallback,
            rows: fallback_rows(section),
        },
    };

    Ok(Json(report))
}

/// GET /api/forthcrm/sync/status
pub async fn sync_status(State(state): State<AppState>) -> ApiResult<SyncStatus> {
    let status = db::reports::fetch_sync_status(&state.pool, state.sync_active())
        .await
        .map_err(|e| {
            tracing::error!("Sync state fetch failed: {e}");
            AppError::new(ErrorCode::InternalError)
        })?;
    Ok(Json(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_window_is_two_intervals() {
        let now = Utc::now();
        let interval = 3600;

        assert!(is_fresh(now - Duration::minutes(30), now, interval));
        assert!(is_fresh(now - Duration::minutes(119), now, interval));
        assert!(!is_fresh(now - Duration::minutes(121), now, interval));
    }
}
