//! Dashboard Layout
//! Static description of the page controls, built once from the dataset.

use crate::data::LaunchDataset;
use serde::Serialize;

pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const PIE_CHART: &str = "success-pie-chart";
pub const SCATTER_CHART: &str = "success-payload-scatter-chart";

/// Dropdown value meaning "every launch site".
pub const ALL_SITES: &str = "All";

// Payload slider bounds are fixed, independent of the dataset
pub const SLIDER_MIN: f64 = 0.0;
pub const SLIDER_MAX: f64 = 10000.0;
pub const SLIDER_STEP: f64 = 1000.0;
pub const SLIDER_MARKS: [f64; 5] = [0.0, 2500.0, 5000.0, 7500.0, 10000.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub text: String,
    pub text_align: String,
    pub color: String,
    pub font_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: String,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: String,
    pub searchable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<SliderMark>,
    /// Initially selected `[low, high]`. Seeded from the dataset and not
    /// clamped to `min..=max`.
    pub value: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    pub id: String,
}

/// The whole page, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub heading: Heading,
    pub site_dropdown: Dropdown,
    pub pie_graph: Graph,
    pub payload_label: String,
    pub payload_slider: RangeSlider,
    pub scatter_graph: Graph,
}

impl Layout {
    pub fn build(dataset: &LaunchDataset) -> Self {
        let mut options = vec![DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        }];
        options.extend(dataset.sites().iter().map(|site| DropdownOption {
            label: site.clone(),
            value: site.clone(),
        }));

        let marks = SLIDER_MARKS
            .iter()
            .map(|&value| SliderMark {
                value,
                label: format!("{}", value),
            })
            .collect();

        Self {
            heading: Heading {
                text: "SpaceX Launch Records Dashboard".to_string(),
                text_align: "center".to_string(),
                color: "#503D36".to_string(),
                font_size: 40,
            },
            site_dropdown: Dropdown {
                id: SITE_DROPDOWN.to_string(),
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here".to_string(),
                searchable: true,
            },
            pie_graph: Graph {
                id: PIE_CHART.to_string(),
            },
            payload_label: "Payload range (Kg):".to_string(),
            payload_slider: RangeSlider {
                id: PAYLOAD_SLIDER.to_string(),
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                step: SLIDER_STEP,
                marks,
                value: [dataset.payload_min(), dataset.payload_max()],
            },
            scatter_graph: Graph {
                id: SCATTER_CHART.to_string(),
            },
        }
    }
}
