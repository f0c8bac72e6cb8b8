use egui::Ui;

use crate::app_actions::AppAction;
use crate::app_state::AppState;

/// Renders the top bar: mode switch buttons and the busy indicator.
pub fn show_top_bar(app_state: &AppState, ui: &mut Ui, action_queue: &mut Vec<AppAction>) {
    ui.horizontal(|ui_content| {
        ui_content.heading("Service Manager");
        ui_content.separator();

        if ui_content
            .button("Create New Service")
            .on_hover_text("Start a blank service form")
            .clicked()
        {
            action_queue.push(AppAction::ShowCreateForm);
        }
        if ui_content
            .button("View Services")
            .on_hover_text("Back to the catalog")
            .clicked()
        {
            action_queue.push(AppAction::ShowServiceList);
        }

        if app_state.is_loading() {
            ui_content.add_space(10.0);
            ui_content.add(egui::Spinner::new());
        }
    });
}
