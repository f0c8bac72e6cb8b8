// src/app_actions.rs

use std::path::PathBuf;

use crate::catalog::Service;

/// Actions pushed by the views and drained at the top of each frame.
#[derive(Debug, Clone)]
pub enum AppAction {
    // --- Navigation ---
    ShowCreateForm,
    ShowServiceList,
    EditService(Service),

    // --- Form draft ---
    AddDraftImages(Vec<PathBuf>),
    RemoveDraftImage(usize),
    SubmitDraft,
    CancelForm,

    // --- Deletion ---
    RequestDelete(Service),
}
