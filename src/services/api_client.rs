// src/services/api_client.rs

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};

use crate::app_logic::submission::SubmissionPlan;
use crate::catalog::Service;

#[derive(Debug)]
pub enum ApiClientError {
    Http(reqwest::Error),
    Io(PathBuf, std::io::Error),
    Serialization(String),
    InvalidInput(String),
}

impl std::fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiClientError::Http(err) => write!(f, "HTTP error: {}", err),
            ApiClientError::Io(path, err) => {
                write!(f, "Failed to read '{}': {}", path.display(), err)
            }
            ApiClientError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            ApiClientError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for ApiClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiClientError::Http(err) => Some(err),
            ApiClientError::Io(_, err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(err: reqwest::Error) -> Self {
        ApiClientError::Http(err)
    }
}

/// Blocking client for the catalog API. Every method performs one
/// round-trip; callers run them on worker threads so the UI thread
/// never blocks on the network.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let http = Client::builder()
            .user_agent(concat!("salonex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// `GET {base}` returning the full collection.
    pub fn fetch_services(&self) -> Result<Vec<Service>, ApiClientError> {
        let services = self
            .http
            .get(&self.base_url)
            .send()?
            .error_for_status()?
            .json::<Vec<Service>>()?;
        Ok(services)
    }

    /// Dispatches the plan as `PATCH {base}/{id}` when it carries an
    /// identifier, else as `POST {base}`.
    pub fn submit(&self, plan: &SubmissionPlan) -> Result<Service, ApiClientError> {
        match plan.service_id.as_deref() {
            Some(id) => self.update_service(id, plan),
            None => self.create_service(plan),
        }
    }

    pub fn create_service(&self, plan: &SubmissionPlan) -> Result<Service, ApiClientError> {
        if plan.service_id.is_some() {
            return Err(ApiClientError::InvalidInput(
                "create must not carry a service id".to_string(),
            ));
        }
        let form = build_multipart_form(plan)?;
        let service = self
            .http
            .post(&self.base_url)
            .multipart(form)
            .send()?
            .error_for_status()?
            .json::<Service>()?;
        Ok(service)
    }

    pub fn update_service(&self, id: &str, plan: &SubmissionPlan) -> Result<Service, ApiClientError> {
        let form = build_multipart_form(plan)?;
        let service = self
            .http
            .patch(self.item_url(id))
            .multipart(form)
            .send()?
            .error_for_status()?
            .json::<Service>()?;
        Ok(service)
    }

    /// `DELETE {base}/{id}`. The confirmation body is ignored.
    pub fn delete_service(&self, id: &str) -> Result<(), ApiClientError> {
        self.http
            .delete(self.item_url(id))
            .send()?
            .error_for_status()?;
        Ok(())
    }
}

/// Renders a submission plan as multipart/form-data: scalar text
/// parts, repeated `images` file parts, the JSON-encoded
/// `existingImages` list, and `imagesToRemove` when anything was
/// removed.
pub(crate) fn build_multipart_form(plan: &SubmissionPlan) -> Result<Form, ApiClientError> {
    let mut form = Form::new();
    for (name, value) in &plan.fields {
        form = form.text(*name, value.clone());
    }
    for path in &plan.uploads {
        form = form.part("images", file_part(path)?);
    }
    let existing = serde_json::to_string(&plan.existing_images)
        .map_err(|e| ApiClientError::Serialization(e.to_string()))?;
    form = form.text("existingImages", existing);
    if !plan.images_to_remove.is_empty() {
        let to_remove = serde_json::to_string(&plan.images_to_remove)
            .map_err(|e| ApiClientError::Serialization(e.to_string()))?;
        form = form.text("imagesToRemove", to_remove);
    }
    Ok(form)
}

fn file_part(path: &Path) -> Result<Part, ApiClientError> {
    let bytes = fs::read(path).map_err(|e| ApiClientError::Io(path.to_path_buf(), e))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime.essence_str())?;
    Ok(part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_logic::submission::build_submission_plan;
    use crate::tests_common::{create_dummy_image_file, sample_draft};
    use tempfile::tempdir;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:9000/api/services/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/api/services");
        assert_eq!(
            client.item_url("abc123"),
            "http://localhost:9000/api/services/abc123"
        );
    }

    #[test]
    fn multipart_form_builds_with_real_upload_files() {
        let dir = tempdir().expect("Failed to create temp dir");
        let image_path = create_dummy_image_file(dir.path(), "preview.png", 8, 8);

        let mut draft = sample_draft();
        draft.add_local_images(vec![image_path]);
        draft.removed_images.push("http://a/old.png".to_string());
        let plan = build_submission_plan(&draft).unwrap();

        assert!(build_multipart_form(&plan).is_ok());
    }

    #[test]
    fn multipart_form_fails_on_missing_upload_file() {
        let mut draft = sample_draft();
        draft.add_local_images(vec![std::path::PathBuf::from("/nonexistent/missing.png")]);
        let plan = build_submission_plan(&draft).unwrap();

        match build_multipart_form(&plan) {
            Err(ApiClientError::Io(path, _)) => {
                assert!(path.ends_with("missing.png"));
            }
            other => panic!("Expected Io error, got {:?}", other.map(|_| "form")),
        }
    }

    #[test]
    fn create_rejects_plan_with_id() {
        let client = ApiClient::new("http://localhost:9000/api/services").unwrap();
        let mut draft = sample_draft();
        draft.service_id = Some("svc-1".to_string());
        let plan = build_submission_plan(&draft).unwrap();
        assert!(matches!(
            client.create_service(&plan),
            Err(ApiClientError::InvalidInput(_))
        ));
    }
}
