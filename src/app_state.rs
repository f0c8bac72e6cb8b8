// src/app_state.rs

use std::sync::Arc;

use crate::app_logic::draft::ServiceDraft;
use crate::app_logic::request_processor::{RequestKind, RequestTask};
use crate::catalog::Service;
use crate::config::AppConfig;
use crate::services::api_client::ApiClient;
use crate::services::preview_service::PreviewService;

/// The panel is either showing the catalog or the create/edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    ServiceList,
    ServiceForm,
}

#[derive(Debug)]
pub struct AppState {
    /// Last fetched catalog, replaced verbatim after every fetch.
    pub services: Vec<Service>,
    pub view_mode: ViewMode,
    pub draft: ServiceDraft,
    /// Generic banner text, cleared by the next user action.
    pub error_message: Option<String>,
    /// In-flight and recently finished API calls.
    pub requests: Vec<RequestTask>,
    /// Service awaiting delete confirmation, if any.
    pub show_delete_confirmation: Option<Service>,
    /// Set after a successful mutation; the update loop turns it into
    /// a list refetch.
    pub needs_refresh: bool,
    pub initial_fetch_done: bool,
    pub preview_service: PreviewService,

    // Services
    pub api_client: Arc<ApiClient>,
}

impl AppState {
    pub fn new() -> Self {
        let config = AppConfig::load();
        let api_client = Arc::new(
            ApiClient::new(&config.api_base_url)
                .expect("Failed to initialize API client. Check the configured endpoint."),
        );
        log::info!("Catalog endpoint: {}", api_client.base_url());

        Self {
            services: Vec::new(),
            view_mode: ViewMode::ServiceList,
            draft: ServiceDraft::default(),
            error_message: None,
            requests: Vec::new(),
            show_delete_confirmation: None,
            needs_refresh: false,
            initial_fetch_done: false,
            preview_service: PreviewService::new(),
            api_client,
        }
    }

    /// True while any request is still waiting on its worker thread.
    /// Gates the submit and delete buttons.
    pub fn is_loading(&self) -> bool {
        self.requests.iter().any(|task| task.in_progress())
    }

    pub fn fetch_in_flight(&self) -> bool {
        self.requests
            .iter()
            .any(|task| task.kind == RequestKind::FetchList && task.in_progress())
    }
}
