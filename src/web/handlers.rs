//! HTTP handlers: the dashboard page and the Dash-style JSON endpoints.

use axum::{extract::State, response::Html, Json};
use minijinja::{context, Environment};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::charts::{Figure, SvgChartRenderer};
use crate::dash::{CallbackSpec, ControlState, Dependency, Layout};
use crate::web::error::ApiError;
use crate::web::state::SharedState;

const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

/// One control value as sent by the page.
#[derive(Debug, Clone, Deserialize)]
pub struct InputValue {
    pub id: String,
    pub property: String,
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    /// Prop ids (`id.property`) whose value just changed.
    pub changed_prop_ids: Vec<String>,
    /// Current value of every control on the page.
    pub inputs: Vec<InputValue>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputValue {
    pub id: String,
    pub property: String,
    pub figure: Figure,
    pub svg: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub outputs: Vec<OutputValue>,
}

/// GET / - dashboard page, rendered once at startup
pub async fn dashboard(State(state): State<SharedState>) -> Html<String> {
    Html(state.page.clone())
}

pub(crate) fn render_dashboard(layout: &Layout) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("dashboard.html", DASHBOARD_TEMPLATE)?;
    env.get_template("dashboard.html")?
        .render(context! { layout => layout })
}

/// GET /_dash-layout
pub async fn dash_layout(State(state): State<SharedState>) -> Json<Layout> {
    Json(state.layout.clone())
}

/// GET /_dash-dependencies
pub async fn dash_dependencies(State(state): State<SharedState>) -> Json<Vec<CallbackSpec>> {
    Json(state.callbacks.specs())
}

/// POST /_dash-update-component - run the callbacks bound to the changed controls
pub async fn update_component(
    State(state): State<SharedState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let mut controls = ControlState::new();
    for input in req.inputs {
        controls.set(&Dependency::new(&input.id, &input.property), input.value);
    }

    let results = state
        .callbacks
        .dispatch(&state.dataset, &req.changed_prop_ids, &controls)?;
    debug!(changed = ?req.changed_prop_ids, outputs = results.len(), "Dispatched update");

    let (width, height) = (state.config.chart_width, state.config.chart_height);
    let outputs = results
        .into_iter()
        .map(|out| {
            let svg = SvgChartRenderer::render(&out.figure, width, height)?;
            Ok(OutputValue {
                id: out.target.id,
                property: out.target.property,
                figure: out.figure,
                svg,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(Json(UpdateResponse { outputs }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{BOOSTER, CLASS, PAYLOAD, SITE};
    use crate::data::LaunchDataset;
    use polars::prelude::{Column, DataFrame};

    #[test]
    fn test_page_lists_sites_and_escapes_labels() {
        let df = DataFrame::new(vec![
            Column::new(SITE.into(), ["KSC LC-39A", "<Pad>"]),
            Column::new(PAYLOAD.into(), [2500.0, 3000.0]),
            Column::new(CLASS.into(), [1i64, 0]),
            Column::new(BOOSTER.into(), ["FT", "B4"]),
        ])
        .unwrap();
        let layout = Layout::build(&LaunchDataset::from_frame(&df).unwrap());

        let html = render_dashboard(&layout).unwrap();
        assert!(html.contains("SpaceX Launch Records Dashboard"));
        assert!(html.contains("KSC LC-39A"));
        assert!(html.contains("&lt;Pad&gt;"));
        assert!(html.contains("success-payload-scatter-chart"));
    }
}
