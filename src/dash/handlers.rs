//! Chart Handlers
//! Pure functions from control values to chart descriptions, and their bindings.

use crate::charts::{Figure, PieChart, PieSlice, ScatterChart, ScatterPoint, XAxis};
use crate::dash::callbacks::{CallbackRegistry, Dependency};
use crate::dash::layout::{ALL_SITES, PAYLOAD_SLIDER, PIE_CHART, SCATTER_CHART, SITE_DROPDOWN};
use crate::data::loader::{BOOSTER, CLASS};
use crate::data::{LaunchDataset, LaunchProcessor};
use polars::prelude::PolarsResult;

/// Success counts per site for "All", else success/failure counts for one site.
///
/// An unknown site yields a pie with no slices.
pub fn pie_chart(dataset: &LaunchDataset, site: &str) -> PolarsResult<Figure> {
    let df = dataset.frame();

    let pie = if site == ALL_SITES {
        let slices = LaunchProcessor::success_counts_by_site(df)?
            .into_iter()
            .map(|(label, value)| PieSlice { label, value })
            .collect();
        PieChart {
            title: "Total Success Launches By Site".to_string(),
            slices,
        }
    } else {
        let slices = LaunchProcessor::outcome_counts_for_site(df, site)?
            .into_iter()
            .map(|(outcome, value)| PieSlice {
                label: outcome.to_string(),
                value,
            })
            .collect();
        PieChart {
            title: format!("Total Launches for site {}", site),
            slices,
        }
    };

    Ok(Figure::Pie(pie))
}

/// Outcome against payload for launches with `low <= payload <= high`,
/// colored by booster category.
///
/// With a single site selected there is no explicit x column, so points are
/// placed by row index instead of payload.
pub fn scatter_chart(dataset: &LaunchDataset, site: &str, range: (f64, f64)) -> PolarsResult<Figure> {
    let (low, high) = range;
    let (site_filter, x_axis) = if site == ALL_SITES {
        (None, XAxis::Payload)
    } else {
        (Some(site), XAxis::RowIndex)
    };

    let rows = LaunchProcessor::rows_in_payload_range(dataset.frame(), low, high, site_filter)?;
    let points = rows.into_iter().map(|r| {
        (
            r.booster,
            ScatterPoint {
                row: r.row,
                site: r.site,
                payload: r.payload,
                outcome: r.outcome,
            },
        )
    });

    Ok(Figure::Scatter(ScatterChart::from_points(
        x_axis, CLASS, BOOSTER, points,
    )))
}

/// Bind the dropdown to the pie chart and dropdown + slider to the scatter chart.
pub fn register_callbacks(registry: &mut CallbackRegistry) {
    let site = Dependency::new(SITE_DROPDOWN, "value");
    let payload = Dependency::new(PAYLOAD_SLIDER, "value");

    registry.register(
        Dependency::new(PIE_CHART, "figure"),
        vec![site.clone()],
        |dataset, args| Ok(pie_chart(dataset, args.str(0)?)?),
    );

    registry.register(
        Dependency::new(SCATTER_CHART, "figure"),
        vec![site, payload],
        |dataset, args| Ok(scatter_chart(dataset, args.str(0)?, args.range(1)?)?),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{PAYLOAD, SITE};
    use polars::prelude::{Column, DataFrame};

    fn example() -> LaunchDataset {
        let df = DataFrame::new(vec![
            Column::new(SITE.into(), ["SiteA", "SiteA", "SiteB"]),
            Column::new(PAYLOAD.into(), [500.0, 700.0, 600.0]),
            Column::new(CLASS.into(), [1i64, 0, 1]),
            Column::new(BOOSTER.into(), ["v1", "v1", "v2"]),
        ])
        .unwrap();
        LaunchDataset::from_frame(&df).unwrap()
    }

    fn as_pie(fig: Figure) -> PieChart {
        match fig {
            Figure::Pie(p) => p,
            other => panic!("expected pie, got {:?}", other),
        }
    }

    fn as_scatter(fig: Figure) -> ScatterChart {
        match fig {
            Figure::Scatter(s) => s,
            other => panic!("expected scatter, got {:?}", other),
        }
    }

    #[test]
    fn test_pie_all_counts_successes_per_site() {
        let pie = as_pie(pie_chart(&example(), "All").unwrap());
        assert_eq!(pie.title, "Total Success Launches By Site");
        let slices: Vec<(&str, u64)> = pie
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect();
        assert_eq!(slices, [("SiteA", 1), ("SiteB", 1)]);
    }

    #[test]
    fn test_pie_for_site_splits_outcomes() {
        let pie = as_pie(pie_chart(&example(), "SiteA").unwrap());
        assert_eq!(pie.title, "Total Launches for site SiteA");
        assert_eq!(pie.total(), 2);
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["0", "1"]);
    }

    #[test]
    fn test_pie_for_unknown_site_is_empty() {
        let pie = as_pie(pie_chart(&example(), "Atlantis").unwrap());
        assert!(pie.slices.is_empty());
    }

    #[test]
    fn test_scatter_for_site_uses_row_index() {
        let scatter = as_scatter(scatter_chart(&example(), "SiteA", (0.0, 10000.0)).unwrap());
        assert_eq!(scatter.point_count(), 2);
        assert_eq!(scatter.x_axis, XAxis::RowIndex);
        assert!(scatter.points().all(|p| p.site == "SiteA"));
    }

    #[test]
    fn test_scatter_all_colors_by_booster() {
        let scatter = as_scatter(scatter_chart(&example(), "All", (0.0, 10000.0)).unwrap());
        assert_eq!(scatter.x_axis, XAxis::Payload);
        assert_eq!(scatter.color_label, BOOSTER);
        assert_eq!(scatter.y_label, CLASS);
        let names: Vec<&str> = scatter.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["v1", "v2"]);
    }

    #[test]
    fn test_scatter_respects_range() {
        let scatter = as_scatter(scatter_chart(&example(), "All", (550.0, 650.0)).unwrap());
        assert_eq!(scatter.point_count(), 1);
        assert!(scatter.points().all(|p| (550.0..=650.0).contains(&p.payload)));
    }

    #[test]
    fn test_handlers_are_idempotent() {
        let ds = example();
        assert_eq!(pie_chart(&ds, "All").unwrap(), pie_chart(&ds, "All").unwrap());
        assert_eq!(
            scatter_chart(&ds, "SiteB", (0.0, 800.0)).unwrap(),
            scatter_chart(&ds, "SiteB", (0.0, 800.0)).unwrap()
        );
    }
}
