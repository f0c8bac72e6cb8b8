// src/app_logic/request_processor.rs

use eframe::egui;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Instant;

use crate::app_state::{AppState, ViewMode};
use crate::catalog::Service;
use crate::services::api_client::ApiClientError;

pub const NOTIFICATION_DURATION_SECONDS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    FetchList,
    Create,
    Update,
    Delete,
}

impl RequestKind {
    /// Generic user-facing message for a failed request of this kind.
    pub fn failure_message(self) -> &'static str {
        match self {
            RequestKind::FetchList => "Error fetching services",
            RequestKind::Create => "Error adding service",
            RequestKind::Update => "Error updating service",
            RequestKind::Delete => "Error deleting service",
        }
    }

    fn success_message(self) -> Option<&'static str> {
        match self {
            RequestKind::FetchList => None,
            RequestKind::Create => Some("Service added"),
            RequestKind::Update => Some("Service updated"),
            RequestKind::Delete => Some("Service deleted"),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum RequestStatus {
    InProgress,
    Success,
    Failed(String),
}

/// Successful result of a background API call.
#[derive(Debug)]
pub enum RequestOutcome {
    ServicesFetched(Vec<Service>),
    ServiceSaved(Service),
    ServiceDeleted(String),
}

/// One in-flight (or recently finished) API call. The worker thread
/// sends exactly one result over `rx`; finished tasks linger only to
/// back the corner notification.
#[derive(Debug)]
pub struct RequestTask {
    pub kind: RequestKind,
    pub rx: Receiver<Result<RequestOutcome, ApiClientError>>,
    pub status: RequestStatus,
    pub started: Instant,
    pub finished_time: Option<Instant>,
}

impl RequestTask {
    pub fn new(kind: RequestKind, rx: Receiver<Result<RequestOutcome, ApiClientError>>) -> Self {
        Self {
            kind,
            rx,
            status: RequestStatus::InProgress,
            started: Instant::now(),
            finished_time: None,
        }
    }

    pub fn in_progress(&self) -> bool {
        self.status == RequestStatus::InProgress
    }
}

/// Polls every pending task, applies completed outcomes to app state,
/// and renders transient notifications for finished mutations.
/// Called once per frame from the update loop.
pub fn process_request_tasks(app_state: &mut AppState, ctx: &egui::Context) {
    let mut tasks = std::mem::take(&mut app_state.requests);
    let now = Instant::now();
    let mut completed: Vec<(RequestKind, Result<RequestOutcome, String>)> = Vec::new();

    for task in &mut tasks {
        if task.finished_time.is_some() {
            continue;
        }
        match task.rx.try_recv() {
            Ok(Ok(outcome)) => {
                log::debug!(
                    "{:?} request completed in {:.2}s",
                    task.kind,
                    now.duration_since(task.started).as_secs_f32()
                );
                task.status = RequestStatus::Success;
                task.finished_time = Some(now);
                completed.push((task.kind, Ok(outcome)));
            }
            Ok(Err(err)) => {
                let detail = err.to_string();
                task.status = RequestStatus::Failed(detail.clone());
                task.finished_time = Some(now);
                completed.push((task.kind, Err(detail)));
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                let detail = "request worker disconnected".to_string();
                task.status = RequestStatus::Failed(detail.clone());
                task.finished_time = Some(now);
                completed.push((task.kind, Err(detail)));
            }
        }
    }

    for (kind, result) in completed {
        apply_outcome(app_state, kind, result);
        ctx.request_repaint();
    }

    // Fetches retire silently; mutations stay around for the toast.
    tasks.retain(|task| match task.finished_time {
        None => true,
        Some(_) if task.kind == RequestKind::FetchList => false,
        Some(finished) => {
            now.duration_since(finished).as_secs_f32() <= NOTIFICATION_DURATION_SECONDS
        }
    });

    for (index, task) in tasks.iter().enumerate() {
        if task.finished_time.is_some() {
            show_notification(ctx, index, task);
        }
    }

    app_state.requests = tasks;
}

fn apply_outcome(app_state: &mut AppState, kind: RequestKind, result: Result<RequestOutcome, String>) {
    match result {
        Ok(RequestOutcome::ServicesFetched(services)) => {
            log::info!("Fetched {} services.", services.len());
            app_state.services = services;
        }
        Ok(RequestOutcome::ServiceSaved(service)) => {
            log::info!("Service '{}' saved.", service.name);
            app_state.draft.reset();
            app_state.view_mode = ViewMode::ServiceList;
            app_state.needs_refresh = true;
        }
        Ok(RequestOutcome::ServiceDeleted(id)) => {
            log::info!("Service '{}' deleted.", id);
            app_state.needs_refresh = true;
        }
        Err(detail) => {
            log::error!("{:?} request failed: {}", kind, detail);
            app_state.error_message = Some(kind.failure_message().to_string());
        }
    }
}

fn show_notification(ctx: &egui::Context, index: usize, task: &RequestTask) {
    let message = match &task.status {
        RequestStatus::Success => match task.kind.success_message() {
            Some(message) => message,
            None => return,
        },
        RequestStatus::Failed(_) => task.kind.failure_message(),
        RequestStatus::InProgress => return,
    };

    let frame = egui::Frame::default()
        .fill(egui::Color32::from_black_alpha(200))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(12.0));

    egui::Area::new(egui::Id::new(("request_notification", index)))
        .anchor(egui::Align2::RIGHT_TOP, [-24.0, 24.0 + 52.0 * index as f32])
        .show(ctx, |ui| {
            frame.show(ui, |ui| {
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_logic::draft::ServiceDraft;
    use crate::tests_common::sample_service;
    use std::sync::mpsc;

    #[test]
    fn fetched_services_replace_local_state() {
        let mut app_state = AppState::new();
        let services = vec![sample_service("s1", "Trim"), sample_service("s2", "Locs")];
        apply_outcome(
            &mut app_state,
            RequestKind::FetchList,
            Ok(RequestOutcome::ServicesFetched(services.clone())),
        );
        assert_eq!(app_state.services, services);
    }

    #[test]
    fn saved_service_resets_draft_and_returns_to_list() {
        let mut app_state = AppState::new();
        app_state.view_mode = ViewMode::ServiceForm;
        app_state.draft = ServiceDraft::from_service(&sample_service("s1", "Trim"));
        apply_outcome(
            &mut app_state,
            RequestKind::Update,
            Ok(RequestOutcome::ServiceSaved(sample_service("s1", "Trim"))),
        );
        assert_eq!(app_state.draft, ServiceDraft::default());
        assert_eq!(app_state.view_mode, ViewMode::ServiceList);
        assert!(app_state.needs_refresh);
    }

    #[test]
    fn failure_sets_generic_message_and_preserves_draft() {
        let mut app_state = AppState::new();
        app_state.view_mode = ViewMode::ServiceForm;
        let draft = ServiceDraft::from_service(&sample_service("s1", "Trim"));
        app_state.draft = draft.clone();
        apply_outcome(
            &mut app_state,
            RequestKind::Update,
            Err("503 from upstream".to_string()),
        );
        assert_eq!(app_state.error_message.as_deref(), Some("Error updating service"));
        assert_eq!(app_state.draft, draft);
        assert_eq!(app_state.view_mode, ViewMode::ServiceForm);
        assert!(!app_state.needs_refresh);
    }

    #[test]
    fn create_and_delete_failures_use_their_own_wording() {
        assert_eq!(RequestKind::Create.failure_message(), "Error adding service");
        assert_eq!(RequestKind::Delete.failure_message(), "Error deleting service");
    }

    #[test]
    fn process_retires_completed_fetch_task() {
        let mut app_state = AppState::new();
        let (tx, rx) = mpsc::channel();
        app_state
            .requests
            .push(RequestTask::new(RequestKind::FetchList, rx));
        assert!(app_state.is_loading());

        tx.send(Ok(RequestOutcome::ServicesFetched(vec![sample_service(
            "s1", "Trim",
        )])))
        .unwrap();

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            process_request_tasks(&mut app_state, ctx);
        });

        assert_eq!(app_state.services.len(), 1);
        assert!(app_state.requests.is_empty());
        assert!(!app_state.is_loading());
    }

    #[test]
    fn disconnected_channel_fails_the_task() {
        let mut app_state = AppState::new();
        let (tx, rx) = mpsc::channel::<Result<RequestOutcome, ApiClientError>>();
        app_state.requests.push(RequestTask::new(RequestKind::Delete, rx));
        drop(tx);

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            process_request_tasks(&mut app_state, ctx);
        });

        assert_eq!(app_state.error_message.as_deref(), Some("Error deleting service"));
        assert!(!app_state.is_loading());
    }
}
