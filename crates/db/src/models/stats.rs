//! Aggregate rows returned by the dashboard queries.

use esante_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Headline counters for the overview card.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OverviewCounts {
    pub mothers: i64,
    pub consultations: i64,
    pub children_followed: i64,
    pub vaccinations: i64,
    pub filles: i64,
    pub garcons: i64,
}

/// Activity counted inside a `[start, end)` window.
#[derive(Debug, Clone, Copy, Default, Serialize, FromRow)]
pub struct WindowCounts {
    pub mothers: i64,
    pub cpn: i64,
    pub children: i64,
    pub vaccinations: i64,
}

/// Per-month counts of one kind of event, keyed by month start.
#[derive(Debug, Clone, FromRow)]
pub struct MonthlyCount {
    pub month: Date,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GenderCounts {
    pub filles: i64,
    pub garcons: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CenterStats {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub mothers: i64,
    pub children: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecentMother {
    pub id: DbId,
    pub full_name: String,
    pub center_name: Option<String>,
    pub created_at: Timestamp,
}
