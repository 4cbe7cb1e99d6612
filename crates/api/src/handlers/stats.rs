//! Handlers for the `/stats` resource: dashboard figures computed from the
//! store on every request.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use esante_core::stats::{
    count_for_month, growth_percent, last_twelve_months, month_label, percentage, time_ago,
    Period,
};
use esante_core::types::{Date, DbId, Timestamp};
use esante_db::models::stats::{CenterStats, MonthlyCount, OverviewCounts, WindowCounts};
use esante_db::repositories::{MonthlySeries, StatsRepo};
use esante_db::DbPool;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireMinistry};
use crate::state::AppState;

/// Newest registrations listed under `recent_activity`.
const RECENT_ACTIVITY_LIMIT: i64 = 5;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DetailedParams {
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailedStats {
    pub period: &'static str,
    pub global: GlobalStats,
    pub monthly: Vec<MonthBucket>,
    pub gender: GenderBreakdown,
    pub by_center: Vec<CenterStats>,
    pub recent_activity: Vec<ActivityItem>,
}

/// All-time totals plus activity in the selected window.
#[derive(Debug, Serialize)]
pub struct GlobalStats {
    #[serde(flatten)]
    pub totals: OverviewCounts,
    pub centers: usize,
    pub current_period: WindowCounts,
    pub previous_period: WindowCounts,
    /// Growth of mother registrations over the previous window, in percent.
    pub growth: f64,
    pub growth_by_kind: GrowthBreakdown,
}

#[derive(Debug, Serialize)]
pub struct GrowthBreakdown {
    pub mothers: f64,
    pub cpn: f64,
    pub children: f64,
    pub vaccinations: f64,
}

impl GrowthBreakdown {
    fn between(current: &WindowCounts, previous: &WindowCounts) -> Self {
        Self {
            mothers: growth_percent(current.mothers, previous.mothers),
            cpn: growth_percent(current.cpn, previous.cpn),
            children: growth_percent(current.children, previous.children),
            vaccinations: growth_percent(current.vaccinations, previous.vaccinations),
        }
    }
}

/// Counts for one calendar month, labelled `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub mothers: i64,
    pub cpn: i64,
    pub children: i64,
    pub vaccinations: i64,
    pub filles: i64,
    pub garcons: i64,
}

#[derive(Debug, Serialize)]
pub struct GenderBreakdown {
    pub filles: i64,
    pub garcons: i64,
    pub total: i64,
    pub pourcentage_filles: f64,
    pub pourcentage_garcons: f64,
}

#[derive(Debug, Serialize)]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mother_id: DbId,
    pub message: String,
    pub time: String,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/stats/overview
pub async fn overview(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<OverviewCounts>> {
    Ok(Json(StatsRepo::overview(&state.pool).await?))
}

/// GET /api/v1/stats/detailed?period=week|month|quarter|year
pub async fn detailed(
    State(state): State<AppState>,
    RequireMinistry(_admin): RequireMinistry,
    Query(params): Query<DetailedParams>,
) -> AppResult<Json<DetailedStats>> {
    let period = Period::parse(params.period.as_deref());
    let now = Utc::now();
    let windows = period.windows(now);
    let pool = &state.pool;

    let totals = StatsRepo::overview(pool).await?;
    let current = StatsRepo::window_counts(pool, windows.start, windows.end).await?;
    let previous = StatsRepo::window_counts(pool, windows.previous_start, windows.start).await?;
    let by_center = StatsRepo::by_center(pool).await?;

    let gender_counts = StatsRepo::gender(pool).await?;
    let children = gender_counts.filles + gender_counts.garcons;
    let gender = GenderBreakdown {
        filles: gender_counts.filles,
        garcons: gender_counts.garcons,
        total: children,
        pourcentage_filles: percentage(gender_counts.filles, children),
        pourcentage_garcons: percentage(gender_counts.garcons, children),
    };

    let monthly = monthly_series(pool, now.date_naive()).await?;

    let recent_activity = StatsRepo::recent_mothers(pool, RECENT_ACTIVITY_LIMIT)
        .await?
        .into_iter()
        .map(|m| ActivityItem {
            kind: "mother",
            mother_id: m.id,
            message: format!(
                "New mother registered at {}",
                m.center_name.as_deref().unwrap_or("N/A")
            ),
            time: time_ago(now, m.created_at),
            created_at: m.created_at,
        })
        .collect();

    tracing::debug!(period = period.as_str(), "Detailed stats computed");

    Ok(Json(DetailedStats {
        period: period.as_str(),
        global: GlobalStats {
            totals,
            centers: by_center.len(),
            growth: growth_percent(current.mothers, previous.mothers),
            growth_by_kind: GrowthBreakdown::between(&current, &previous),
            current_period: current,
            previous_period: previous,
        },
        monthly,
        gender,
        by_center,
        recent_activity,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn monthly_series(pool: &DbPool, today: Date) -> AppResult<Vec<MonthBucket>> {
    let months = last_twelve_months(today);
    let Some(&since) = months.first() else {
        return Ok(Vec::new());
    };

    let mothers = series_rows(StatsRepo::monthly(pool, MonthlySeries::Mothers, since).await?);
    let cpn = series_rows(StatsRepo::monthly(pool, MonthlySeries::Consultations, since).await?);
    let children = series_rows(StatsRepo::monthly(pool, MonthlySeries::Children, since).await?);
    let vaccinations =
        series_rows(StatsRepo::monthly(pool, MonthlySeries::Vaccinations, since).await?);
    let filles = series_rows(StatsRepo::monthly(pool, MonthlySeries::Girls, since).await?);
    let garcons = series_rows(StatsRepo::monthly(pool, MonthlySeries::Boys, since).await?);

    Ok(build_buckets(
        &months,
        [&mothers, &cpn, &children, &vaccinations, &filles, &garcons],
    ))
}

fn series_rows(rows: Vec<MonthlyCount>) -> Vec<(Date, i64)> {
    rows.into_iter().map(|r| (r.month, r.count)).collect()
}

/// Merge six per-month series into one bucket per month, zero-filled.
fn build_buckets(months: &[Date], series: [&[(Date, i64)]; 6]) -> Vec<MonthBucket> {
    let [mothers, cpn, children, vaccinations, filles, garcons] = series;
    months
        .iter()
        .map(|&month| MonthBucket {
            month: month_label(month),
            mothers: count_for_month(mothers, month),
            cpn: count_for_month(cpn, month),
            children: count_for_month(children, month),
            vaccinations: count_for_month(vaccinations, month),
            filles: count_for_month(filles, month),
            garcons: count_for_month(garcons, month),
        })
        .collect()
}
