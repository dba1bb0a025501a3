use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::aggregate::CountryRevenueAggregate;
use crate::error::{Error, Result};

pub const TITLE: &str = "Total revenue across different countries";
pub const Y_DESC: &str = "Revenue [$]";

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
// rotated country names need room below the axis, thousands-formatted values beside it
const X_LABEL_AREA: u32 = HEIGHT / 4;
const Y_LABEL_AREA: u32 = WIDTH * 3 / 20;
const FONT: &str = "sans-serif";

/// Draws one bar per country, in aggregate order, into an SVG document.
pub fn render_svg(aggregate: &CountryRevenueAggregate) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        draw(&root, aggregate).map_err(|e| Error::Render(e.to_string()))?;
        root.present().map_err(|e| Error::Render(e.to_string()))?;
    }
    debug!(bars = aggregate.len(), bytes = svg.len(), "chart rendered");
    Ok(svg)
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    aggregate: &CountryRevenueAggregate,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let labels: Vec<&str> = aggregate.iter().map(|e| e.country.as_str()).collect();
    let values: Vec<f64> = aggregate
        .iter()
        .map(|e| e.revenue.to_f64().unwrap_or_default())
        .collect();

    // an empty aggregate still gets one empty slot so the axes can be laid out
    let slots = labels.len().max(1) as u32;
    let (low, high) = value_range(&values);

    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, (FONT, 24))
        .margin(16)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d((0u32..slots).into_segmented(), low..high)?;

    let x_formatter = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => labels
            .get(*i as usize)
            .map(|s| s.to_string())
            .unwrap_or_default(),
        _ => String::new(),
    };
    let y_formatter = |v: &f64| format_thousands(*v as i64);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots as usize)
        .x_label_formatter(&x_formatter)
        .x_label_style((FONT, 14).into_font().transform(FontTransform::Rotate90))
        .y_desc(Y_DESC)
        .y_label_formatter(&y_formatter)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.8).filled())
            .margin(4)
            .data(values.iter().enumerate().map(|(i, v)| (i as u32, *v))),
    )?;
    Ok(())
}

fn value_range(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(0.0, f64::max);
    let min = values.iter().copied().fold(0.0, f64::min);
    let high = if max > 0.0 { max * 1.05 } else { 1.0 };
    let low = if min < 0.0 { min * 1.05 } else { 0.0 };
    (low, high)
}

/// Integer part of a value with `,` between groups of three digits.
pub fn format_thousands(v: i64) -> String {
    let digits = v.unsigned_abs().to_string();
    let mut ret = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0 {
        ret.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            ret.push(',');
        }
        ret.push(c);
    }
    ret
}
