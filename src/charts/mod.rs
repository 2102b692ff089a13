//! Charts module - chart descriptions and SVG rendering

pub mod figure;
mod renderer;

pub use figure::{Figure, PieChart, PieSlice, ScatterChart, ScatterPoint, ScatterTrace, XAxis};
pub use renderer::{RenderError, SvgChartRenderer};
