use super::renderer::{History, Series, ACCURACY, LOSS};

/// Size of one chart panel
const PANEL_WIDTH: f64 = 600.0;
const PANEL_HEIGHT: f64 = 500.0;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

const TRAIN_COLOR: &str = "#1f77b4";
const VALID_COLOR: &str = "#ff7f0e";
const FONT: &str = "sans-serif";

/// Render the accuracy and loss curves of a training run side by side as an SVG document
pub fn history_svg(history: &History) -> String {
    let width = PANEL_WIDTH * 2.0;
    let height = PANEL_HEIGHT;

    let mut svg = String::new();

    svg.push_str(&format!(
        r#"<svg viewBox="0 0 {width} {height}" width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    ));
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="white"/>"#
    ));

    svg.push_str(&panel(
        0.0,
        "Model Accuracy",
        "Accuracy (%)",
        &history.series(ACCURACY),
        ("Training Accuracy", "Validation Accuracy"),
    ));
    svg.push_str(&panel(
        PANEL_WIDTH,
        "Model Loss",
        "Loss",
        &history.series(LOSS),
        ("Training Loss", "Validation Loss"),
    ));

    svg.push_str("</svg>");

    svg
}

fn panel(offset: f64, title: &str, y_label: &str, series: &Series, labels: (&str, &str)) -> String {
    let left = offset + MARGIN_LEFT;
    let top = MARGIN_TOP;
    let plot_width = PANEL_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = PANEL_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

    let epochs = series.train.len().max(series.valid.len());
    let (y_min, y_max) = value_range(series);

    let x_at = |epoch: usize| {
        if epochs > 1 {
            left + plot_width * epoch as f64 / (epochs - 1) as f64
        } else {
            left + plot_width / 2.0
        }
    };
    let y_at = |value: f64| top + plot_height * (1.0 - (value - y_min) / (y_max - y_min));

    let mut svg = String::new();

    // Title and frame
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16" font-family="{FONT}">{title}</text>"#,
        left + plot_width / 2.0,
        top - 20.0,
    ));
    svg.push_str(&format!(
        r##"<rect x="{left:.1}" y="{top:.1}" width="{plot_width:.1}" height="{plot_height:.1}" fill="none" stroke="#333" stroke-width="1"/>"##
    ));

    // Y grid and labels
    for step in 0..=4 {
        let value = y_min + (y_max - y_min) * step as f64 / 4.0;
        let y = y_at(value);

        svg.push_str(&format!(
            r##"<line x1="{left:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#ddd" stroke-width="1"/>"##,
            left + plot_width,
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{y:.1}" text-anchor="end" dominant-baseline="middle" font-size="11" font-family="{FONT}">{value:.2}</text>"#,
            left - 8.0,
        ));
    }

    // X labels, thinned so they don't overlap
    let stride = (epochs / 10).max(1);
    for epoch in (0..epochs).step_by(stride) {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" font-family="{FONT}">{}</text>"#,
            x_at(epoch),
            top + plot_height + 18.0,
            epoch + 1,
        ));
    }

    // Axis titles
    svg.push_str(&format!(
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" font-family="{FONT}">Epoch</text>"#,
        left + plot_width / 2.0,
        top + plot_height + 42.0,
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="12" font-family="{FONT}" transform="rotate(-90 {x:.1} {y:.1})">{y_label}</text>"#,
        x = offset + 18.0,
        y = top + plot_height / 2.0,
    ));

    // Curves
    for (values, color) in [(&series.train, TRAIN_COLOR), (&series.valid, VALID_COLOR)] {
        if values.is_empty() {
            continue;
        }

        let points = values
            .iter()
            .enumerate()
            .map(|(epoch, value)| format!("{:.1},{:.1}", x_at(epoch), y_at(*value)))
            .collect::<Vec<_>>()
            .join(" ");

        svg.push_str(&format!(
            r#"<polyline points="{points}" fill="none" stroke="{color}" stroke-width="2"/>"#
        ));
    }

    // Legend
    for (row, (label, color)) in [(labels.0, TRAIN_COLOR), (labels.1, VALID_COLOR)]
        .into_iter()
        .enumerate()
    {
        let y = top + 16.0 + row as f64 * 18.0;
        let x = left + plot_width - 170.0;

        svg.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
            x + 24.0,
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{y:.1}" dominant-baseline="middle" font-size="11" font-family="{FONT}">{label}</text>"#,
            x + 30.0,
        ));
    }

    svg
}

/// The padded value range of a series, never empty
fn value_range(series: &Series) -> (f64, f64) {
    let values = series.train.iter().chain(&series.valid).copied();

    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
        (min.min(value), max.max(value))
    });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let pad = ((max - min) * 0.05).max(1e-3);

    (min - pad, max + pad)
}
