use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::projection::{leading_tropes, rank_by_uniformity};
use crate::state::AppState;
use crate::ui::plot;

fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a fight song CSV to explore it  (File → Open…)");
    });
}

// ---------------------------------------------------------------------------
// Conference Analysis
// ---------------------------------------------------------------------------

pub fn conference_tab(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        no_data(ui);
        return;
    };

    ui.heading("The Lyrical Monolith vs. Regional Variance");
    ui.columns(2, |cols| {
        cols[0].label(RichText::new("Aggression Score Distribution").strong());
        plot::conference_box_plot(&mut cols[0], &views.conferences, &views.conference_colors);

        let ui = &mut cols[1];
        ui.label(RichText::new("The Findings").heading());
        ui.label(
            "A low coefficient of variation (CV) means a conference's schools stick \
             closely to a shared blueprint; a high CV means regional variance.",
        );
        ui.add_space(6.0);

        let ranked = rank_by_uniformity(&views.conferences);
        if ranked.is_empty() {
            ui.label("Not enough songs per conference to compare.");
        }
        egui::Grid::new("cv_ranking").striped(true).show(ui, |ui| {
            ui.strong("Conference");
            ui.strong("Mean");
            ui.strong("CV");
            ui.end_row();
            for (conference, cv) in &ranked {
                let mean = views
                    .conferences
                    .iter()
                    .find(|g| g.conference == *conference)
                    .and_then(|g| g.mean);
                ui.label(*conference);
                ui.label(mean.map_or_else(|| "–".to_string(), |m| format!("{m:.2}")));
                ui.label(format!("{cv:.2}"));
                ui.end_row();
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Big Ten Spotlight
// ---------------------------------------------------------------------------

pub fn spotlight_tab(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        no_data(ui);
        return;
    };

    ui.heading("Focus: The Big Ten Conference");
    ui.label(RichText::new("Does the Big Ten stand out?").strong());
    plot::spotlight_bar_chart(ui, &views.spotlight);

    let leads = leading_tropes(&views.spotlight);
    let insight = if leads.is_empty() {
        "💡 Insight: the Big Ten does not lead the national average on any trope.".to_string()
    } else {
        let names: Vec<String> = leads.iter().map(|t| t.to_string()).collect();
        format!(
            "💡 Insight: the Big Ten leads the national average in {}.",
            names.join(", ")
        )
    };
    ui.add_space(6.0);
    ui.label(RichText::new(insight).color(Color32::LIGHT_BLUE));
}

// ---------------------------------------------------------------------------
// School DNA
// ---------------------------------------------------------------------------

pub fn school_tab(ui: &mut Ui, state: &mut AppState) {
    let Some(views) = &state.views else {
        no_data(ui);
        return;
    };

    ui.heading("Individual School Profile");

    let schools = views.schools.clone();
    let current = state.selected_school.clone().unwrap_or_default();
    let mut chosen = None;
    egui::ComboBox::from_label("Select a School")
        .selected_text(&current)
        .height(320.0)
        .show_ui(ui, |ui: &mut Ui| {
            for school in &schools {
                if ui.selectable_label(current == *school, school).clicked() {
                    chosen = Some(school.clone());
                }
            }
        });
    if let Some(school) = chosen {
        state.select_school(school);
    }

    let profile = match state.selected_profile() {
        None => {
            ui.label("No school selected.");
            return;
        }
        Some(Err(e)) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
        Some(Ok(profile)) => profile,
    };

    plot::radar_chart(ui, &profile);

    ui.add_space(6.0);
    ui.label(RichText::new(format!("Listen to {}", profile.school)).heading());
    match profile.spotify_embed_url() {
        Some(url) => {
            ui.hyperlink_to("▶ Play on Spotify", url);
        }
        None => {
            ui.label("Spotify track not available for this school.");
        }
    }
}
