use chrono::NaiveDate;
use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::dashboard::{format_thousands, BarSeries, DashboardView, LineSeries, Summary};
use crate::state::AppState;

const LINE_PLOT_HEIGHT: f32 = 320.0;
const BAR_PLOT_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the metrics and charts in the central panel.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let view = match &state.view {
        Some(view) => view,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view rentals  (File → Open…)");
            });
            return;
        }
    };
    let sep = state.config.thousands_separator;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Bike Sharing Dashboard").size(26.0).strong());
    });
    ui.add_space(8.0);

    ui.heading(&view.daily.title);
    summary_metrics(ui, &view.summary);
    if view.is_empty() {
        ui.label(RichText::new("No records in the selected range.").italics());
    }
    daily_line_plot(ui, &view.daily, sep);

    ui.add_space(12.0);
    ui.heading("Order Distribution");
    category_plots(ui, view, sep);
}

fn summary_metrics(ui: &mut Ui, summary: &Summary) {
    ui.columns(2, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Number of Days", &summary.days_text);
        metric(
            &mut cols[1],
            "Number of Bikes Rent",
            &summary.total_rentals_text,
        );
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.label(RichText::new(label).weak());
    ui.label(RichText::new(value).size(32.0).strong());
}

fn category_plots(ui: &mut Ui, view: &DashboardView, sep: char) {
    ui.columns(2, |cols: &mut [Ui]| {
        bar_plot(&mut cols[0], "by_season", &view.by_season, sep);
        bar_plot(&mut cols[1], "by_weather", &view.by_weather, sep);
    });
}

// ---------------------------------------------------------------------------
// Daily line chart
// ---------------------------------------------------------------------------

/// Dates are plotted as days since the common era.
fn date_to_x(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date.num_days_from_ce() as f64
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

fn daily_line_plot(ui: &mut Ui, series: &LineSeries, sep: char) {
    let coords: Vec<[f64; 2]> = series
        .points
        .iter()
        .map(|&(date, total)| [date_to_x(date), total as f64])
        .collect();

    Plot::new("daily_orders")
        .height(LINE_PLOT_HEIGHT)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .y_axis_formatter(move |mark, _range| axis_count(mark.value, sep))
        .label_formatter(move |_name, point| match x_to_date(point.x) {
            Some(date) => format!("{date}\n{}", axis_count(point.y, sep)),
            None => String::new(),
        })
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(coords.clone()))
                .name(&series.title)
                .color(series.color)
                .width(2.0);
            plot_ui.line(line);

            let markers = Points::new(PlotPoints::from(coords))
                .color(series.color)
                .radius(3.0);
            plot_ui.points(markers);
        });
}

// ---------------------------------------------------------------------------
// Category bar charts
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, id: &str, series: &BarSeries, sep: char) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&series.title);
    });

    let labels = series.axis_labels.clone();
    let max_value = series.bars.iter().map(|b| b.value).max().unwrap_or(0) as f64;
    let text_color = ui.visuals().text_color();

    Plot::new(id)
        .height(BAR_PLOT_HEIGHT)
        .include_x(-0.5)
        .include_x(labels.len() as f64 - 0.5)
        .include_y(0.0)
        // headroom for the value labels
        .include_y(max_value * 1.15)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show_x(false)
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_input| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
        .y_axis_formatter(move |mark, _range| axis_count(mark.value, sep))
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = series
                .bars
                .iter()
                .map(|b| {
                    Bar::new(b.position as f64, b.value as f64)
                        .name(b.label)
                        .fill(b.color)
                        .width(0.7)
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).name(&series.title));

            for b in &series.bars {
                let anchor = PlotPoint::new(b.position as f64, b.value as f64);
                let label = RichText::new(&b.annotation).strong().color(text_color);
                let text = Text::new(anchor, label).anchor(Align2::CENTER_BOTTOM);
                plot_ui.text(text);
            }
        });
}

/// Label for an integral grid mark, empty between categories.
fn category_label(labels: &[&str], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels
        .get(rounded as usize)
        .map(|l| l.to_string())
        .unwrap_or_default()
}

fn axis_count(value: f64, sep: char) -> String {
    if value < 0.0 {
        return String::new();
    }
    format_thousands(value.round() as u64, sep)
}
