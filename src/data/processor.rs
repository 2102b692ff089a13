//! Launch Data Processor
//! Filtering and aggregation over the launch record table.

use crate::data::loader::{BOOSTER, CLASS, PAYLOAD, ROW, SITE};
use polars::prelude::*;

const COUNT: &str = "count";

/// One launch record as read back from a filtered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRow {
    pub row: u64,
    pub site: String,
    pub payload: f64,
    pub outcome: i64,
    pub booster: String,
}

/// Stateless query helpers over the normalized launch frame.
pub struct LaunchProcessor;

impl LaunchProcessor {
    /// Count successful launches per site, ordered by site name.
    pub fn success_counts_by_site(df: &DataFrame) -> PolarsResult<Vec<(String, u64)>> {
        let counts = df
            .clone()
            .lazy()
            .filter(col(CLASS).eq(lit(1i64)))
            .group_by([col(SITE)])
            .agg([col(CLASS).count().alias(COUNT)])
            .sort_by_exprs([col(SITE)], SortMultipleOptions::default())
            .collect()?;

        let sites = counts.column(SITE)?.str()?;
        let totals = counts.column(COUNT)?.cast(&DataType::UInt64)?;
        let totals = totals.u64()?;

        Ok(sites
            .into_iter()
            .zip(totals)
            .filter_map(|(site, n)| Some((site?.to_string(), n?)))
            .collect())
    }

    /// Count launches per outcome value for one site, ordered by outcome.
    pub fn outcome_counts_for_site(df: &DataFrame, site: &str) -> PolarsResult<Vec<(i64, u64)>> {
        let counts = df
            .clone()
            .lazy()
            .filter(col(SITE).eq(lit(site)))
            .group_by([col(CLASS)])
            .agg([col(SITE).count().alias(COUNT)])
            .sort_by_exprs([col(CLASS)], SortMultipleOptions::default())
            .collect()?;

        let outcomes = counts.column(CLASS)?.i64()?;
        let totals = counts.column(COUNT)?.cast(&DataType::UInt64)?;
        let totals = totals.u64()?;

        Ok(outcomes
            .into_iter()
            .zip(totals)
            .filter_map(|(outcome, n)| Some((outcome?, n?)))
            .collect())
    }

    /// Rows with `low <= payload <= high`, optionally restricted to one site.
    /// Source order is preserved.
    pub fn rows_in_payload_range(
        df: &DataFrame,
        low: f64,
        high: f64,
        site: Option<&str>,
    ) -> PolarsResult<Vec<LaunchRow>> {
        let mut predicate = col(PAYLOAD)
            .gt_eq(lit(low))
            .and(col(PAYLOAD).lt_eq(lit(high)));
        if let Some(site) = site {
            predicate = predicate.and(col(SITE).eq(lit(site)));
        }

        let filtered = df.clone().lazy().filter(predicate).collect()?;
        Self::collect_rows(&filtered)
    }

    fn collect_rows(df: &DataFrame) -> PolarsResult<Vec<LaunchRow>> {
        let rows = df.column(ROW)?.u64()?;
        let sites = df.column(SITE)?.str()?;
        let payloads = df.column(PAYLOAD)?.f64()?;
        let outcomes = df.column(CLASS)?.i64()?;
        let boosters = df.column(BOOSTER)?.str()?;

        let mut out = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            if let (Some(row), Some(site), Some(payload), Some(outcome), Some(booster)) = (
                rows.get(i),
                sites.get(i),
                payloads.get(i),
                outcomes.get(i),
                boosters.get(i),
            ) {
                out.push(LaunchRow {
                    row,
                    site: site.to_string(),
                    payload,
                    outcome,
                    booster: booster.to_string(),
                });
            }
        }
        Ok(out)
    }
}
