//! Background ForthCRM sync task
//!
//! One pass refreshes the CRM user cache, recomputes report and summary
//! snapshots from the submissions log, and records attempt/success/error in
//! `sync_state`. Sections with no local data source keep whatever snapshot
//! they already have. A failing pass is logged and never brings the server
//! down.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde_json::{Value, json};
use shared::models::{
    COMPANY_COLUMNS, DailyMetric, DashboardSummary, IntakeDay, OpenerDay, ReportRange,
    WEEKDAYS, WeeklyPoint, blank_row,
};
use tokio_util::sync::CancellationToken;

use crate::db;
use crate::state::AppState;

/// Reference timezone for business date boundaries
const BUSINESS_TZ: Tz = chrono_tz::America::Chicago;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main loop: one pass at startup, then one per interval until shutdown
pub async fn run(state: AppState, shutdown: CancellationToken) {
    tracing::info!(
        "Forth sync task started (interval: {}s)",
        state.sync_interval_secs
    );

    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs(state.sync_interval_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                run_once(&state).await;
            }
            _ = shutdown.cancelled() => {
                tracing::info!("Forth sync task received shutdown signal");
                return;
            }
        }
    }
}

/// One sync pass with bookkeeping
pub async fn run_once(state: &AppState) {
    state.set_sync_active(true);
    if let Err(e) = db::reports::record_sync_attempt(&state.pool).await {
        tracing::error!("Failed to record sync attempt: {e}");
    }

    let result = sync_pass(state).await;

    match result {
        Ok(()) => {
            if let Err(e) = db::reports::record_sync_success(&state.pool).await {
                tracing::error!("Failed to record sync success: {e}");
            }
            tracing::info!("Forth sync completed");
        }
        Err(e) => {
            tracing::error!("Forth sync failed: {e}");
            let _ = db::reports::record_sync_error(&state.pool, &e.to_string()).await;
        }
    }
    state.set_sync_active(false);
}

async fn sync_pass(state: &AppState) -> Result<(), BoxError> {
    // CRM user cache refresh; skipped quietly when no users URL is set
    if let Some(forth) = &state.forth {
        match forth.fetch_users().await {
            Ok(users) => {
                db::user_mappings::upsert_forth_users(&state.pool, &users).await?;
                tracing::debug!("Cached {} Forth users", users.len());
            }
            Err(crate::forth::ForthError::UsersUrlMissing) => {}
            Err(e) => return Err(e.into()),
        }
    }

    let now = Utc::now().with_timezone(&BUSINESS_TZ);

    // Company section: leads_received from real submission counts, the
    // rest of the columns stay zero until the CRM reporting feed lands.
    for range in ReportRange::ALL {
        let (from, to) = range_bounds(range, now.date_naive());
        let received = db::submissions::count_between(&state.pool, from, to).await?;

        let mut row = blank_row(&COMPANY_COLUMNS);
        row.insert("leads_received".to_string(), json!(received));

        db::reports::upsert_report_snapshot(
            &state.pool,
            "company",
            range.as_str(),
            &Value::Array(vec![Value::Object(row)]),
        )
        .await?;
    }

    // Dashboard summaries per role
    for role in ["admin", "opener", "intake", "agent"] {
        let summary = build_summary(state, role, now.date_naive()).await?;
        db::reports::upsert_summary_snapshot(
            &state.pool,
            role,
            &serde_json::to_value(&summary)?,
        )
        .await?;
    }

    Ok(())
}

/// Summary derived from the submissions log: totals, a Mon-Fri series for
/// the current week, and per-day cards. Starts from the zero-filled shape
/// so role-dependent labels stay consistent with the client fallback.
async fn build_summary(
    state: &AppState,
    role: &str,
    today: NaiveDate,
) -> Result<DashboardSummary, BoxError> {
    let total = db::submissions::count_total(&state.pool).await?;

    let (today_from, today_to) = range_bounds(ReportRange::Today, today);
    let pending = db::submissions::count_between(&state.pool, today_from, today_to).await?;

    let (month_from, month_to) = range_bounds(ReportRange::ThisMonth, today);
    let month_total =
        db::submissions::count_between(&state.pool, month_from, month_to).await?;
    let month_success = db::submissions::count_with_status_between(
        &state.pool,
        "success",
        month_from,
        month_to,
    )
    .await?;
    let conversion_rate = if month_total > 0 {
        (month_success as f64 / month_total as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
    let mut weekly = Vec::with_capacity(WEEKDAYS.len());
    let mut daily = Vec::with_capacity(WEEKDAYS.len());
    for (offset, label) in WEEKDAYS.iter().enumerate() {
        let date = monday + Days::new(offset as u64);
        let from = day_start(date);
        let to = day_start(date + Days::new(1));
        let received = db::submissions::count_between(&state.pool, from, to).await?;
        let succeeded =
            db::submissions::count_with_status_between(&state.pool, "success", from, to).await?;

        weekly.push(WeeklyPoint {
            label: label.to_string(),
            value: received,
        });
        let day_conversion = if received > 0 {
            format!("{}%", (succeeded as f64 / received as f64 * 100.0).round())
        } else {
            "0%".to_string()
        };
        daily.push(DailyMetric {
            day: label.to_string(),
            opener: OpenerDay {
                transferred: succeeded,
                conversion: day_conversion.clone(),
            },
            intake: IntakeDay {
                enrolled: succeeded,
                conversion: day_conversion,
            },
        });
    }

    let mut summary = DashboardSummary::fallback(role);
    summary.total_leads = total;
    summary.pending_leads = pending;
    summary.conversion_rate = conversion_rate;
    summary.weekly_performance = weekly;
    summary.daily_metrics = daily;
    Ok(summary)
}

/// Local-midnight boundary in the business timezone, as UTC. Midnight in
/// America/Chicago always exists (DST shifts at 02:00), so `earliest` only
/// falls back on a hypothetical zone change.
fn day_start(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    BUSINESS_TZ
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

/// Half-open UTC interval covered by a report range, relative to the
/// business-timezone date
fn range_bounds(range: ReportRange, today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let tomorrow = today + Days::new(1);
    match range {
        ReportRange::Today => (day_start(today), day_start(tomorrow)),
        ReportRange::Yesterday => (day_start(today - Days::new(1)), day_start(today)),
        ReportRange::ThisWeek => {
            let monday =
                today - Days::new(u64::from(today.weekday().num_days_from_monday()));
            (day_start(monday), day_start(tomorrow))
        }
        ReportRange::ThisMonth => {
            let first = today.with_day(1).unwrap_or(today);
            (day_start(first), day_start(tomorrow))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_spans_one_business_day() {
        let (from, to) = range_bounds(ReportRange::Today, date(2025, 3, 12));
        assert_eq!(to - from, chrono::Duration::hours(24));
        // Chicago is UTC-5 in March (after the DST switch on 2025-03-09)
        assert_eq!(from, Utc.with_ymd_and_hms(2025, 3, 12, 5, 0, 0).unwrap());
    }

    #[test]
    fn test_yesterday_precedes_today() {
        let today = date(2025, 3, 12);
        let (y_from, y_to) = range_bounds(ReportRange::Yesterday, today);
        let (t_from, _) = range_bounds(ReportRange::Today, today);
        assert_eq!(y_to, t_from);
        assert_eq!(y_to - y_from, chrono::Duration::hours(24));
    }

    #[test]
    fn test_this_week_starts_monday() {
        // 2025-03-12 is a Wednesday
        let (from, to) = range_bounds(ReportRange::ThisWeek, date(2025, 3, 12));
        assert_eq!(from, day_start(date(2025, 3, 10)));
        assert_eq!(to, day_start(date(2025, 3, 13)));

        // A Monday covers just that day
        let (from, to) = range_bounds(ReportRange::ThisWeek, date(2025, 3, 10));
        assert_eq!(to - from, chrono::Duration::hours(24));
    }

    #[test]
    fn test_this_month_starts_on_the_first() {
        let (from, _) = range_bounds(ReportRange::ThisMonth, date(2025, 3, 12));
        assert_eq!(from, day_start(date(2025, 3, 1)));
    }

    #[test]
    fn test_day_start_handles_dst_transition_day() {
        // DST starts 2025-03-09 02:00 in Chicago; midnight still exists
        let start = day_start(date(2025, 3, 9));
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 3, 9, 6, 0, 0).unwrap());
    }
}
