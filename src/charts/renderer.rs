//! SVG Chart Renderer
//! Draws pie and scatter chart descriptions with plotters' SVG backend.

use crate::charts::figure::{Figure, PieChart, ScatterChart};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

// Plotly's default qualitative palette
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(99, 110, 250),
    RGBColor(239, 85, 59),
    RGBColor(0, 204, 150),
    RGBColor(171, 99, 250),
    RGBColor(255, 161, 90),
    RGBColor(25, 211, 243),
    RGBColor(255, 102, 146),
    RGBColor(182, 232, 128),
    RGBColor(255, 151, 255),
    RGBColor(254, 203, 82),
];

const TITLE_FONT: (&str, f64) = ("sans-serif", 22.0);
const LABEL_FONT: (&str, f64) = ("sans-serif", 14.0);
const GRAY: RGBColor = RGBColor(120, 120, 120);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart drawing failed: {0}")]
    Draw(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Draw(err.to_string())
    }
}

/// Renders chart descriptions to standalone SVG documents.
pub struct SvgChartRenderer;

impl SvgChartRenderer {
    pub fn render(figure: &Figure, width: u32, height: u32) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;
            match figure {
                Figure::Pie(pie) => Self::draw_pie(&root, pie)?,
                Figure::Scatter(scatter) => Self::draw_scatter(&root, scatter)?,
            }
            root.present()?;
        }
        Ok(svg)
    }

    pub fn color(idx: usize) -> RGBColor {
        PALETTE[idx % PALETTE.len()]
    }

    fn draw_pie<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        pie: &PieChart,
    ) -> Result<(), RenderError>
    where
        DB::ErrorType: 'static,
    {
        let area = root.titled(&pie.title, TITLE_FONT)?;
        let (w, h) = area.dim_in_pixel();

        if pie.total() == 0 {
            Self::draw_no_data(&area, w, h)?;
            return Ok(());
        }

        let center = (w as i32 / 2, h as i32 / 2);
        let radius = (w.min(h) as f64 / 2.0 - 40.0).max(10.0);
        let sizes: Vec<f64> = pie.slices.iter().map(|s| s.value as f64).collect();
        let colors: Vec<RGBColor> = (0..sizes.len()).map(Self::color).collect();
        let labels: Vec<String> = pie
            .slices
            .iter()
            .map(|s| format!("{} ({})", s.label, s.value))
            .collect();

        let mut chart = Pie::new(&center, &radius, &sizes, &colors, &labels);
        chart.start_angle(-90.0);
        chart.label_style(LABEL_FONT.into_font().color(&BLACK));
        chart.percentages(LABEL_FONT.into_font().color(&WHITE));
        area.draw(&chart)?;
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        scatter: &ScatterChart,
    ) -> Result<(), RenderError>
    where
        DB::ErrorType: 'static,
    {
        let (x_min, x_max) = Self::x_range(scatter);

        let mut chart = ChartBuilder::on(root)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, -0.25f64..1.25f64)?;

        chart
            .configure_mesh()
            .x_desc(scatter.x_axis.label())
            .y_desc(scatter.y_label.as_str())
            .y_labels(3)
            .draw()?;

        let x_axis = scatter.x_axis;
        for (i, trace) in scatter.traces.iter().enumerate() {
            let color = Self::color(i);
            chart
                .draw_series(trace.points.iter().map(|p| {
                    Circle::new((x_axis.value(p), p.outcome as f64), 5, color.filled())
                }))?
                .label(trace.name.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        if !scatter.traces.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
        }
        Ok(())
    }

    fn draw_no_data<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        w: u32,
        h: u32,
    ) -> Result<(), RenderError>
    where
        DB::ErrorType: 'static,
    {
        let style = LABEL_FONT
            .into_font()
            .color(&GRAY)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw_text("No data", &style, (w as i32 / 2, h as i32 / 2))?;
        Ok(())
    }

    /// Horizontal range covering every point, padded by 5%.
    fn x_range(scatter: &ScatterChart) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for p in scatter.points() {
            let x = scatter.x_axis.value(p);
            min = min.min(x);
            max = max.max(x);
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.05).max(1.0);
        (min - pad, max + pad)
    }
}
