//! Chart Descriptions
//! Serializable pie and scatter chart specs produced by the dashboard handlers.

use serde::Serialize;

/// A renderable chart description. Plain value, no identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Pie(PieChart),
    Scatter(ScatterChart),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// What the horizontal axis of a scatter chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XAxis {
    /// Payload mass in kilograms.
    Payload,
    /// Position of the record in the dataset (no explicit x column).
    RowIndex,
}

impl XAxis {
    pub fn label(&self) -> &'static str {
        match self {
            XAxis::Payload => "Payload Mass (kg)",
            XAxis::RowIndex => "index",
        }
    }

    pub fn value(&self, point: &ScatterPoint) -> f64 {
        match self {
            XAxis::Payload => point.payload,
            XAxis::RowIndex => point.row as f64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub row: u64,
    pub site: String,
    pub payload: f64,
    pub outcome: i64,
}

/// Points sharing one color category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub x_axis: XAxis,
    pub y_label: String,
    pub color_label: String,
    pub traces: Vec<ScatterTrace>,
}

impl ScatterChart {
    /// Group `(category, point)` pairs into traces, keeping categories in
    /// first-seen order and points in input order.
    pub fn from_points(
        x_axis: XAxis,
        y_label: &str,
        color_label: &str,
        points: impl IntoIterator<Item = (String, ScatterPoint)>,
    ) -> Self {
        let mut traces: Vec<ScatterTrace> = Vec::new();
        for (category, point) in points {
            match traces.iter_mut().find(|t| t.name == category) {
                Some(trace) => trace.points.push(point),
                None => traces.push(ScatterTrace {
                    name: category,
                    points: vec![point],
                }),
            }
        }

        Self {
            x_axis,
            y_label: y_label.to_string(),
            color_label: color_label.to_string(),
            traces,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &ScatterPoint> {
        self.traces.iter().flat_map(|t| t.points.iter())
    }

    pub fn point_count(&self) -> usize {
        self.traces.iter().map(|t| t.points.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(row: u64, payload: f64) -> ScatterPoint {
        ScatterPoint {
            row,
            site: "SiteA".to_string(),
            payload,
            outcome: 1,
        }
    }

    #[test]
    fn test_traces_follow_first_seen_category_order() {
        let chart = ScatterChart::from_points(
            XAxis::Payload,
            "class",
            "Booster Version Category",
            vec![
                ("FT".to_string(), point(0, 1.0)),
                ("v1.1".to_string(), point(1, 2.0)),
                ("FT".to_string(), point(2, 3.0)),
            ],
        );
        let names: Vec<&str> = chart.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["FT", "v1.1"]);
        assert_eq!(chart.traces[0].points.len(), 2);
        assert_eq!(chart.point_count(), 3);
    }

    #[test]
    fn test_row_index_axis_uses_row_position() {
        let p = point(7, 4200.0);
        assert_eq!(XAxis::RowIndex.value(&p), 7.0);
        assert_eq!(XAxis::Payload.value(&p), 4200.0);
    }

    #[test]
    fn test_figure_json_is_tagged() {
        let fig = Figure::Pie(PieChart {
            title: "t".to_string(),
            slices: vec![PieSlice {
                label: "A".to_string(),
                value: 2,
            }],
        });
        let json = serde_json::to_value(&fig).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["slices"][0]["value"], 2);
    }
}
