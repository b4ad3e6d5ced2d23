use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::IssueKind;
use crate::state::AppState;

const DATA_CREDITS_URL: &str =
    "https://github.com/fivethirtyeight/data/blob/master/fight-songs/fight-songs.csv";
const AUTHOR_URL: &str = "https://github.com/ananyadatta1";

/// Footer captions, one per column: (caption, link text, link target).
const CREDITS: [(&str, &str, &str); 2] = [
    ("📊 Data Credits:", "College Fight Song Dataset", DATA_CREDITS_URL),
    ("💻 Developed by: Ananya Datta |", "GitHub", AUTHOR_URL),
];

// ---------------------------------------------------------------------------
// Left side panel – settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🎵 Settings");
    ui.label("Explore the data behind the exuberant nonsense of college fight songs.");
    ui.separator();

    let mut show_raw = state.show_raw_data;
    if ui.checkbox(&mut show_raw, "Show Raw Data").changed() {
        state.toggle_raw_data();
    }
    ui.separator();

    ui.strong("Source");
    ui.label(state.source.display().to_string());
    if ui.button("⟳ Reload").clicked() {
        state.reload();
    }
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.label(format!("{} songs", dataset.len()));
    if let Some(median) = dataset.year_median {
        ui.label(format!("Median year: {median}"));
    }

    // ---- Data-quality issues (collapsible) ----
    let issues = &dataset.issues;
    let header = RichText::new(format!("Data issues ({})", issues.len())).strong();
    egui::CollapsingHeader::new(header)
        .id_salt("data_issues")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if issues.is_empty() {
                ui.label("None");
                return;
            }
            ScrollArea::vertical()
                .max_height(240.0)
                .show(ui, |ui: &mut Ui| {
                    for issue in issues {
                        let color = match issue.kind {
                            IssueKind::ImputedYear => Color32::GRAY,
                            IssueKind::UnrecognizedFlag | IssueKind::UnparseableNumber => {
                                Color32::from_rgb(0xD0, 0x90, 0x20)
                            }
                        };
                        ui.label(RichText::new(issue.to_string()).color(color).small());
                    }
                });
        });
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
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} fight songs, {} conferences",
                ds.len(),
                state.views.as_ref().map_or(0, |v| v.conferences.len())
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

/// Two captions side by side: data source and author.
pub fn footer(ui: &mut Ui) {
    ui.columns(CREDITS.len(), |cols| {
        for (col, (caption, text, url)) in cols.iter_mut().zip(CREDITS) {
            col.horizontal(|ui: &mut Ui| {
                ui.small(caption);
                ui.hyperlink_to(RichText::new(text).small(), url);
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open fight song data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
