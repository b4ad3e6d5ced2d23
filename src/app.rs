use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{panels, table, tabs};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FightSongApp {
    pub state: AppState,
}

impl FightSongApp {
    /// Build the app around a state whose dataset is already prepared.
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for FightSongApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: credits ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: settings ----
        egui::SidePanel::left("settings_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabs + raw data ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🎶 College Fight Song DNA Explorer");
            ui.label(
                "Is college spirit a formula? Compare the lyrical identity of conferences \
                 like the Big Ten and SEC, or look up a single school's fight song.",
            );
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.state.tab, tab, tab.title());
                }
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let tab = self.state.tab;
                    match tab {
                        Tab::Conference => tabs::conference_tab(ui, &self.state),
                        Tab::Spotlight => tabs::spotlight_tab(ui, &self.state),
                        Tab::School => tabs::school_tab(ui, &mut self.state),
                    }

                    if self.state.show_raw_data {
                        ui.separator();
                        ui.heading("Raw Dataset");
                        if let Some(views) = &self.state.views {
                            table::raw_table(ui, &views.raw);
                        }
                    }
                });
        });
    }
}
