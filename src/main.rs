use eframe::{NativeOptions, egui};
use log::LevelFilter;

use std::sync::Arc;
use std::sync::mpsc;

use crate::app_actions::AppAction;
use crate::app_logic::draft::ServiceDraft;
use crate::app_logic::request_processor::{self, RequestKind, RequestOutcome, RequestTask};
use crate::app_logic::submission::{SubmissionPlan, build_submission_plan};
use crate::app_state::{AppState, ViewMode};
use crate::catalog::Service;
use crate::ui::delete_confirmation_view::DeleteConfirmationAction;

mod app_actions;
mod app_logic;
mod app_state;
mod catalog;
mod config;
mod services;
#[cfg(test)]
mod tests_common;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("salonex", LevelFilter::Debug)
        .init();
    let mut options = NativeOptions::default();
    options.viewport = egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]);
    eframe::run_native(
        "Salonex Service Manager",
        options,
        Box::new(|_cc| Box::new(SalonexApp::default())),
    )
}

struct SalonexApp {
    app_state: AppState,
    action_queue: Vec<AppAction>,
}

impl Default for SalonexApp {
    fn default() -> Self {
        Self {
            app_state: AppState::new(),
            action_queue: Vec::new(),
        }
    }
}

impl SalonexApp {
    fn handle_action(&mut self, ctx: &egui::Context, action: AppAction) {
        match action {
            AppAction::ShowCreateForm => {
                self.app_state.draft.reset();
                self.app_state.error_message = None;
                self.app_state.view_mode = ViewMode::ServiceForm;
                ctx.request_repaint();
            }
            AppAction::ShowServiceList => {
                self.app_state.draft.reset();
                self.app_state.error_message = None;
                self.app_state.view_mode = ViewMode::ServiceList;
                ctx.request_repaint();
            }
            AppAction::EditService(service) => {
                self.app_state.draft = ServiceDraft::from_service(&service);
                self.app_state.error_message = None;
                self.app_state.view_mode = ViewMode::ServiceForm;
                ctx.request_repaint();
            }
            AppAction::AddDraftImages(paths) => {
                self.app_state.draft.add_local_images(paths);
            }
            AppAction::RemoveDraftImage(index) => {
                self.app_state.draft.remove_image(index);
            }
            AppAction::SubmitDraft => {
                self.submit_draft(ctx);
            }
            AppAction::CancelForm => {
                self.app_state.draft.reset();
                self.app_state.error_message = None;
                self.app_state.view_mode = ViewMode::ServiceList;
                ctx.request_repaint();
            }
            AppAction::RequestDelete(service) => {
                self.app_state.show_delete_confirmation = Some(service);
            }
        }
    }

    fn submit_draft(&mut self, ctx: &egui::Context) {
        // The loading flag gates duplicate submissions.
        if self.app_state.is_loading() {
            return;
        }
        match build_submission_plan(&self.app_state.draft) {
            Ok(plan) => {
                self.app_state.error_message = None;
                self.dispatch_submission(ctx, plan);
            }
            Err(msg) => {
                self.app_state.error_message = Some(msg);
            }
        }
    }

    fn dispatch_submission(&mut self, ctx: &egui::Context, plan: SubmissionPlan) {
        let kind = if plan.is_update() {
            RequestKind::Update
        } else {
            RequestKind::Create
        };
        let api_client = Arc::clone(&self.app_state.api_client);
        let ctx_clone = ctx.clone();

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = api_client.submit(&plan).map(RequestOutcome::ServiceSaved);
            if let Err(e) = tx.send(result) {
                log::error!("Failed to deliver submission result: {}", e);
            }
            ctx_clone.request_repaint();
        });

        self.app_state.requests.push(RequestTask::new(kind, rx));
    }

    fn fetch_services_threaded(&mut self, ctx: &egui::Context) {
        let api_client = Arc::clone(&self.app_state.api_client);
        let ctx_clone = ctx.clone();

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = api_client
                .fetch_services()
                .map(RequestOutcome::ServicesFetched);
            if let Err(e) = tx.send(result) {
                log::error!("Failed to deliver fetched services: {}", e);
            }
            ctx_clone.request_repaint();
        });

        self.app_state
            .requests
            .push(RequestTask::new(RequestKind::FetchList, rx));
    }

    fn delete_service_threaded(&mut self, ctx: &egui::Context, id: String) {
        let api_client = Arc::clone(&self.app_state.api_client);
        let ctx_clone = ctx.clone();

        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let result = api_client
                .delete_service(&id)
                .map(|()| RequestOutcome::ServiceDeleted(id.clone()));
            if let Err(e) = tx.send(result) {
                log::error!("Failed to deliver delete result for '{}': {}", id, e);
            }
            ctx_clone.request_repaint();
        });

        self.app_state
            .requests
            .push(RequestTask::new(RequestKind::Delete, rx));
    }

    fn handle_delete_confirmation_action(
        &mut self,
        ctx: &egui::Context,
        action: DeleteConfirmationAction,
        service_to_delete: Service,
    ) {
        match action {
            DeleteConfirmationAction::ConfirmDelete => {
                self.app_state.show_delete_confirmation = None;
                self.app_state.error_message = None;
                if !self.app_state.is_loading() {
                    self.delete_service_threaded(ctx, service_to_delete.id);
                }
            }
            DeleteConfirmationAction::Cancel => {
                self.app_state.show_delete_confirmation = None;
                ctx.request_repaint();
            }
        }
    }
}

impl eframe::App for SalonexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Initial catalog fetch, once the first frame gives us a context.
        if !self.app_state.initial_fetch_done {
            self.app_state.initial_fetch_done = true;
            self.fetch_services_threaded(ctx);
        }

        // --- Process AppActions ---
        let actions_to_process = self.action_queue.drain(..).collect::<Vec<_>>();
        for action in actions_to_process {
            self.handle_action(ctx, action);
        }

        request_processor::process_request_tasks(&mut self.app_state, ctx);
        self.app_state.preview_service.poll(ctx);

        // A successful mutation schedules a list refetch.
        if self.app_state.needs_refresh && !self.app_state.fetch_in_flight() {
            self.app_state.needs_refresh = false;
            self.fetch_services_threaded(ctx);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |top_ui| {
            ui::top_bar_view::show_top_bar(&self.app_state, top_ui, &mut self.action_queue);
        });

        egui::CentralPanel::default().show(ctx, |panel_ui| {
            if let Some(ref msg) = self.app_state.error_message {
                panel_ui.colored_label(egui::Color32::RED, msg);
                panel_ui.add_space(4.0);
            }

            match self.app_state.view_mode {
                ViewMode::ServiceList => ui::service_list_view::show_service_list(
                    &mut self.app_state,
                    panel_ui,
                    &mut self.action_queue,
                ),
                ViewMode::ServiceForm => ui::service_form_view::show_service_form(
                    &mut self.app_state,
                    panel_ui,
                    &mut self.action_queue,
                ),
            }
        });

        // --- Delete Confirmation Modal ---
        if let Some(service_to_delete) = self.app_state.show_delete_confirmation.clone() {
            if let Some(action) = ui::delete_confirmation_view::show_delete_confirmation_modal(
                ctx,
                &service_to_delete,
            ) {
                self.handle_delete_confirmation_action(ctx, action, service_to_delete);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_common::sample_service;

    #[test]
    fn declined_delete_confirmation_issues_no_request() {
        let mut app = SalonexApp::default();
        let service = sample_service("svc-1", "Trim");
        app.app_state.show_delete_confirmation = Some(service.clone());
        app.app_state.services = vec![service.clone()];

        let ctx = egui::Context::default();
        app.handle_delete_confirmation_action(&ctx, DeleteConfirmationAction::Cancel, service);

        assert!(app.app_state.show_delete_confirmation.is_none());
        assert!(app.app_state.requests.is_empty());
        assert_eq!(app.app_state.services.len(), 1);
    }

    #[test]
    fn confirmed_delete_dispatches_one_request() {
        let mut app = SalonexApp::default();
        let service = sample_service("svc-1", "Trim");
        app.app_state.show_delete_confirmation = Some(service.clone());

        let ctx = egui::Context::default();
        app.handle_delete_confirmation_action(
            &ctx,
            DeleteConfirmationAction::ConfirmDelete,
            service,
        );

        assert!(app.app_state.show_delete_confirmation.is_none());
        assert_eq!(app.app_state.requests.len(), 1);
        assert_eq!(app.app_state.requests[0].kind, RequestKind::Delete);
    }

    #[test]
    fn edit_action_snapshots_service_into_draft() {
        let mut app = SalonexApp::default();
        let mut service = sample_service("svc-1", "Trim");
        service.tags = vec!["quick".to_string(), "walk-in".to_string()];

        let ctx = egui::Context::default();
        app.handle_action(&ctx, AppAction::EditService(service));

        assert_eq!(app.app_state.view_mode, ViewMode::ServiceForm);
        assert!(app.app_state.draft.is_editing());
        assert_eq!(app.app_state.draft.tags, "quick, walk-in");
    }

    #[test]
    fn cancel_form_resets_draft_and_returns_to_list() {
        let mut app = SalonexApp::default();
        let ctx = egui::Context::default();
        app.handle_action(&ctx, AppAction::EditService(sample_service("svc-1", "Trim")));
        app.handle_action(&ctx, AppAction::CancelForm);

        assert_eq!(app.app_state.view_mode, ViewMode::ServiceList);
        assert_eq!(app.app_state.draft, ServiceDraft::default());
    }

    #[test]
    fn submit_with_incomplete_draft_sets_error_without_dispatching() {
        let mut app = SalonexApp::default();
        app.app_state.view_mode = ViewMode::ServiceForm;

        let ctx = egui::Context::default();
        app.handle_action(&ctx, AppAction::SubmitDraft);

        assert!(app.app_state.error_message.is_some());
        assert!(app.app_state.requests.is_empty());
    }
}
