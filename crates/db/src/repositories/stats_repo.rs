//! Aggregation queries behind the dashboard.

use esante_core::types::{Date, Timestamp};
use sqlx::PgPool;

use crate::models::stats::{
    CenterStats, GenderCounts, MonthlyCount, OverviewCounts, RecentMother, WindowCounts,
};

/// Event series that can be bucketed by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlySeries {
    Mothers,
    Consultations,
    Children,
    Vaccinations,
    Girls,
    Boys,
}

impl MonthlySeries {
    /// `(table, date column, extra predicate)` for the series.
    fn source(self) -> (&'static str, &'static str, &'static str) {
        match self {
            MonthlySeries::Mothers => ("mothers", "created_at", ""),
            MonthlySeries::Consultations => ("prenatal_consultations", "date", "AND is_completed"),
            MonthlySeries::Children => ("children", "birth_date", ""),
            MonthlySeries::Vaccinations => ("vaccinations", "date", "AND is_completed"),
            MonthlySeries::Girls => ("children", "birth_date", "AND sexe = 'F'"),
            MonthlySeries::Boys => ("children", "birth_date", "AND sexe = 'M'"),
        }
    }
}

/// Read-only dashboard queries.
pub struct StatsRepo;

impl StatsRepo {
    /// Headline counters. Consultations and vaccinations only count once
    /// completed.
    pub async fn overview(pool: &PgPool) -> Result<OverviewCounts, sqlx::Error> {
        sqlx::query_as::<_, OverviewCounts>(
            "SELECT
                (SELECT COUNT(*) FROM mothers) AS mothers,
                (SELECT COUNT(*) FROM prenatal_consultations WHERE is_completed) AS consultations,
                (SELECT COUNT(*) FROM children) AS children_followed,
                (SELECT COUNT(*) FROM vaccinations WHERE is_completed) AS vaccinations,
                (SELECT COUNT(*) FROM children WHERE sexe = 'F') AS filles,
                (SELECT COUNT(*) FROM children WHERE sexe = 'M') AS garcons",
        )
        .fetch_one(pool)
        .await
    }

    /// Activity recorded in `[start, end)`.
    pub async fn window_counts(
        pool: &PgPool,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<WindowCounts, sqlx::Error> {
        sqlx::query_as::<_, WindowCounts>(
            "SELECT
                (SELECT COUNT(*) FROM mothers
                  WHERE created_at >= $1 AND created_at < $2) AS mothers,
                (SELECT COUNT(*) FROM prenatal_consultations
                  WHERE created_at >= $1 AND created_at < $2) AS cpn,
                (SELECT COUNT(*) FROM children
                  WHERE created_at >= $1 AND created_at < $2) AS children,
                (SELECT COUNT(*) FROM vaccinations
                  WHERE created_at >= $1 AND created_at < $2) AS vaccinations",
        )
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }

    /// Per-month counts of `series` from `since` onwards. Months without
    /// events are absent.
    pub async fn monthly(
        pool: &PgPool,
        series: MonthlySeries,
        since: Date,
    ) -> Result<Vec<MonthlyCount>, sqlx::Error> {
        let (table, column, extra) = series.source();
        let query = format!(
            "SELECT date_trunc('month', {column})::DATE AS month, COUNT(*) AS count
             FROM {table}
             WHERE {column} >= $1 {extra}
             GROUP BY 1
             ORDER BY 1"
        );
        sqlx::query_as::<_, MonthlyCount>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    pub async fn gender(pool: &PgPool) -> Result<GenderCounts, sqlx::Error> {
        sqlx::query_as::<_, GenderCounts>(
            "SELECT
                COUNT(*) FILTER (WHERE sexe = 'F') AS filles,
                COUNT(*) FILTER (WHERE sexe = 'M') AS garcons
             FROM children",
        )
        .fetch_one(pool)
        .await
    }

    /// Mothers and children per center, busiest first.
    pub async fn by_center(pool: &PgPool) -> Result<Vec<CenterStats>, sqlx::Error> {
        sqlx::query_as::<_, CenterStats>(
            "SELECT c.id, c.name, c.city,
                    COUNT(DISTINCT m.id) AS mothers,
                    COUNT(ch.id) AS children
             FROM health_centers c
             LEFT JOIN mothers m ON m.center_id = c.id
             LEFT JOIN pregnancies p ON p.mother_id = m.id
             LEFT JOIN children ch ON ch.pregnancy_id = p.id
             GROUP BY c.id
             ORDER BY mothers DESC, c.name",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn recent_mothers(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<RecentMother>, sqlx::Error> {
        sqlx::query_as::<_, RecentMother>(
            "SELECT m.id, m.full_name, c.name AS center_name, m.created_at
             FROM mothers m
             LEFT JOIN health_centers c ON c.id = m.center_id
             ORDER BY m.created_at DESC, m.id DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
