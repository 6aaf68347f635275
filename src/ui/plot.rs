use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Points};

use crate::color::size_color;
use crate::state::MapView;

/// One labelled bar.
pub struct BarSpec {
    pub label: String,
    pub value: f64,
    pub color: Color32,
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Bar chart with one legend entry per bar.
///
/// Each bar is its own series so the legend doubles as the axis labels.
pub fn bar_chart(ui: &mut Ui, id: &str, bars: &[BarSpec], value_label: &str, horizontal: bool) {
    let mut plot = Plot::new(id)
        .legend(Legend::default())
        .height(320.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false);
    plot = if horizontal {
        plot.x_axis_label(value_label).include_x(0.0)
    } else {
        plot.y_axis_label(value_label).include_y(0.0)
    };

    // Horizontal charts list the first entry at the top.
    let n = bars.len();
    plot.show(ui, |plot_ui| {
        for (i, spec) in bars.iter().enumerate() {
            let position = if horizontal { (n - i) as f64 } else { i as f64 };
            let bar = Bar::new(position, spec.value)
                .name(&spec.label)
                .fill(spec.color)
                .width(0.7);
            let mut chart = BarChart::new(vec![bar]).name(&spec.label).color(spec.color);
            if horizontal {
                chart = chart.horizontal();
            }
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Map scatter
// ---------------------------------------------------------------------------

/// Longitude/latitude scatter coloured by size category.
pub fn map_plot(ui: &mut Ui, view: &MapView) {
    Plot::new("hospital_map")
        .legend(Legend::default())
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .data_aspect(1.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (size, series) in &view.points {
                let points = Points::new(series.clone())
                    .name(size.label())
                    .color(size_color(*size))
                    .radius(3.5);
                plot_ui.points(points);
            }
        });
}
