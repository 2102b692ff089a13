//! Callback Registry
//! Binds control properties to chart handlers and dispatches value changes.

use crate::charts::Figure;
use crate::data::LaunchDataset;
use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CallbackError {
    #[error("No value supplied for input '{0}'")]
    MissingInput(String),
    #[error("Invalid value for input '{input}': expected {expected}, got {got}")]
    InvalidArgument {
        input: String,
        expected: &'static str,
        got: Value,
    },
    #[error("Data query failed: {0}")]
    Data(#[from] PolarsError),
}

/// A `(component id, property)` pair, written `id.property` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    pub property: String,
}

impl Dependency {
    pub fn new(id: &str, property: &str) -> Self {
        Self {
            id: id.to_string(),
            property: property.to_string(),
        }
    }

    pub fn prop_id(&self) -> String {
        format!("{}.{}", self.id, self.property)
    }
}

/// Current values of the page controls, keyed by prop id.
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    values: HashMap<String, Value>,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, dep: &Dependency, value: Value) {
        self.values.insert(dep.prop_id(), value);
    }

    pub fn get(&self, prop_id: &str) -> Option<&Value> {
        self.values.get(prop_id)
    }
}

/// Positional handler arguments, in the callback's declared input order.
pub struct Args<'a> {
    inputs: &'a [Dependency],
    values: Vec<&'a Value>,
}

impl Args<'_> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, idx: usize) -> Result<&Value, CallbackError> {
        self.values
            .get(idx)
            .copied()
            .ok_or_else(|| CallbackError::MissingInput(self.name(idx)))
    }

    pub fn str(&self, idx: usize) -> Result<&str, CallbackError> {
        let value = self.value(idx)?;
        value.as_str().ok_or_else(|| self.invalid(idx, "a string", value))
    }

    /// A `[low, high]` pair of numbers.
    pub fn range(&self, idx: usize) -> Result<(f64, f64), CallbackError> {
        let value = self.value(idx)?;
        match value.as_array().map(|a| a.as_slice()) {
            Some([low, high]) => match (low.as_f64(), high.as_f64()) {
                (Some(low), Some(high)) => Ok((low, high)),
                _ => Err(self.invalid(idx, "a pair of numbers", value)),
            },
            _ => Err(self.invalid(idx, "a pair of numbers", value)),
        }
    }

    fn name(&self, idx: usize) -> String {
        self.inputs
            .get(idx)
            .map(Dependency::prop_id)
            .unwrap_or_else(|| format!("#{}", idx))
    }

    fn invalid(&self, idx: usize, expected: &'static str, got: &Value) -> CallbackError {
        CallbackError::InvalidArgument {
            input: self.name(idx),
            expected,
            got: got.clone(),
        }
    }
}

pub type Handler =
    Box<dyn Fn(&LaunchDataset, &Args<'_>) -> Result<Figure, CallbackError> + Send + Sync>;

/// One registered binding: inputs -> handler -> output.
pub struct Callback {
    output: Dependency,
    inputs: Vec<Dependency>,
    handler: Handler,
}

impl Callback {
    fn is_triggered_by(&self, changed: &[String]) -> bool {
        self.inputs
            .iter()
            .any(|input| changed.iter().any(|c| *c == input.prop_id()))
    }
}

/// Wire form of a binding, served to the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallbackSpec {
    pub output: String,
    pub inputs: Vec<String>,
}

/// A handler result published to its declared target.
#[derive(Debug, Clone, PartialEq)]
pub struct CallbackOutput {
    pub target: Dependency,
    pub figure: Figure,
}

#[derive(Default)]
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, output: Dependency, inputs: Vec<Dependency>, handler: F)
    where
        F: Fn(&LaunchDataset, &Args<'_>) -> Result<Figure, CallbackError> + Send + Sync + 'static,
    {
        self.callbacks.push(Callback {
            output,
            inputs,
            handler: Box::new(handler),
        });
    }

    pub fn specs(&self) -> Vec<CallbackSpec> {
        self.callbacks
            .iter()
            .map(|cb| CallbackSpec {
                output: cb.output.prop_id(),
                inputs: cb.inputs.iter().map(Dependency::prop_id).collect(),
            })
            .collect()
    }

    /// Run every callback with at least one input in `changed`, passing the
    /// current value of all its inputs. Outputs come back in registration
    /// order.
    pub fn dispatch(
        &self,
        dataset: &LaunchDataset,
        changed: &[String],
        state: &ControlState,
    ) -> Result<Vec<CallbackOutput>, CallbackError> {
        let mut outputs = Vec::new();
        for cb in self.callbacks.iter().filter(|cb| cb.is_triggered_by(changed)) {
            let values = cb
                .inputs
                .iter()
                .map(|input| {
                    let prop_id = input.prop_id();
                    state
                        .get(&prop_id)
                        .ok_or(CallbackError::MissingInput(prop_id))
                })
                .collect::<Result<Vec<_>, _>>()?;

            debug!(output = %cb.output.prop_id(), inputs = values.len(), "Firing callback");
            let args = Args {
                inputs: &cb.inputs,
                values,
            };
            let figure = (cb.handler)(dataset, &args)?;
            outputs.push(CallbackOutput {
                target: cb.output.clone(),
                figure,
            });
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{PieChart, PieSlice};
    use crate::data::loader::{BOOSTER, CLASS, PAYLOAD, SITE};
    use polars::prelude::{Column, DataFrame};
    use serde_json::json;

    fn dataset() -> LaunchDataset {
        let df = DataFrame::new(vec![
            Column::new(SITE.into(), ["A"]),
            Column::new(PAYLOAD.into(), [1.0]),
            Column::new(CLASS.into(), [1i64]),
            Column::new(BOOSTER.into(), ["v1"]),
        ])
        .unwrap();
        LaunchDataset::from_frame(&df).unwrap()
    }

    /// Echoes its first string argument as the chart title.
    fn echo(_: &LaunchDataset, args: &Args<'_>) -> Result<Figure, CallbackError> {
        Ok(Figure::Pie(PieChart {
            title: args.str(0)?.to_string(),
            slices: vec![PieSlice {
                label: "n".to_string(),
                value: args.len() as u64,
            }],
        }))
    }

    fn registry() -> CallbackRegistry {
        let mut reg = CallbackRegistry::new();
        reg.register(
            Dependency::new("first", "figure"),
            vec![Dependency::new("dd", "value")],
            echo,
        );
        reg.register(
            Dependency::new("second", "figure"),
            vec![Dependency::new("dd", "value"), Dependency::new("slider", "value")],
            echo,
        );
        reg
    }

    fn state() -> ControlState {
        let mut state = ControlState::new();
        state.set(&Dependency::new("dd", "value"), json!("All"));
        state.set(&Dependency::new("slider", "value"), json!([0, 10000]));
        state
    }

    #[test]
    fn test_dispatch_fires_only_bound_callbacks() {
        let reg = registry();
        let out = reg
            .dispatch(&dataset(), &["slider.value".to_string()], &state())
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target.prop_id(), "second.figure");
    }

    #[test]
    fn test_dispatch_passes_all_inputs_in_order() {
        let reg = registry();
        let out = reg
            .dispatch(&dataset(), &["dd.value".to_string()], &state())
            .unwrap();
        let targets: Vec<String> = out.iter().map(|o| o.target.prop_id()).collect();
        assert_eq!(targets, ["first.figure", "second.figure"]);
        match &out[1].figure {
            Figure::Pie(p) => {
                assert_eq!(p.title, "All");
                assert_eq!(p.slices[0].value, 2);
            }
            other => panic!("unexpected figure {:?}", other),
        }
    }

    #[test]
    fn test_unknown_change_fires_nothing() {
        let out = registry()
            .dispatch(&dataset(), &["nope.value".to_string()], &state())
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_input_value_is_an_error() {
        let mut partial = ControlState::new();
        partial.set(&Dependency::new("dd", "value"), json!("All"));
        let err = registry()
            .dispatch(&dataset(), &["slider.value".to_string()], &partial)
            .unwrap_err();
        assert!(matches!(err, CallbackError::MissingInput(ref id) if id == "slider.value"));
    }

    #[test]
    fn test_args_range_rejects_wrong_shape() {
        let deps = vec![Dependency::new("slider", "value")];
        let bad = json!([1, 2, 3]);
        let args = Args {
            inputs: &deps,
            values: vec![&bad],
        };
        assert!(matches!(
            args.range(0),
            Err(CallbackError::InvalidArgument { .. })
        ));

        let good = json!([2500, 7500.5]);
        let args = Args {
            inputs: &deps,
            values: vec![&good],
        };
        assert_eq!(args.range(0).unwrap(), (2500.0, 7500.5));
    }

    #[test]
    fn test_specs_list_bindings() {
        let specs = registry().specs();
        assert_eq!(specs[1].output, "second.figure");
        assert_eq!(specs[1].inputs, ["dd.value", "slider.value"]);
    }
}
