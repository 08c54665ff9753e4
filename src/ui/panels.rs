use chrono::NaiveDate;
use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::dashboard::format_thousands;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range picker
// ---------------------------------------------------------------------------

/// Render the left panel with the date range selection.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("Bike Sharing").strong());
    });
    ui.add_space(4.0);
    ui.separator();

    let Some((min, max)) = state.bounds() else {
        match &state.dataset {
            Some(ds) if ds.is_empty() => ui.label("The loaded file has no records."),
            _ => ui.label("No dataset loaded."),
        };
        return;
    };
    ui.strong("Date range");
    ui.small(format!("Data available {min} to {max}"));
    ui.add_space(6.0);

    // Pickers edit copies; the state resolves and clamps the result.
    let mut start = state.start_date;
    let mut end = state.end_date;

    egui::Grid::new("date_range")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Start");
            if date_picker(ui, "start_date", &mut start).changed() {
                state.set_start(start);
            }
            ui.end_row();

            ui.label("End");
            if date_picker(ui, "end_date", &mut end).changed() {
                state.set_end(end);
            }
            ui.end_row();
        });

    ui.add_space(6.0);
    if ui.button("Reset range").clicked() {
        state.reset_range();
    }

    ui.add_space(6.0);
    if let Some(warning) = &state.range_warning {
        ui.label(RichText::new(warning).color(Color32::from_rgb(0xFB, 0x85, 0x00)));
    } else if state.view.as_ref().is_some_and(|v| v.is_single_day()) {
        ui.small("Single day selected.");
    }
}

/// The picker is not bounded; `AppState` clamps the picked date to the data.
fn date_picker(ui: &mut Ui, id: &str, date: &mut NaiveDate) -> egui::Response {
    ui.add(DatePickerButton::new(date).id_salt(id).calendar_week(false))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(path)) = (&state.dataset, &state.source_path) {
            let in_range = state.view.as_ref().map_or(0, |v| v.record_count);
            let sep = state.config.thousands_separator;
            ui.label(format!(
                "{} records from {}, {} in range",
                format_thousands(ds.len() as u64, sep),
                path.display(),
                format_thousands(in_range as u64, sep)
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open rental data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // The error is also shown in the top bar.
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {}", e.detail());
        }
    }
}
