// src/app_logic/draft.rs

use std::path::PathBuf;

use crate::catalog::{Service, ServiceCategory};

/// One entry in the draft's image list. While a service is being
/// edited, previously stored images are URLs and newly picked ones are
/// local files that have not been uploaded yet.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageRef {
    Remote(String),
    Local(PathBuf),
}

impl ImageRef {
    pub fn cache_key(&self) -> String {
        match self {
            ImageRef::Remote(url) => url.clone(),
            ImageRef::Local(path) => path.to_string_lossy().into_owned(),
        }
    }
}

/// Staging copy of a service's fields for the create/edit form.
///
/// `removed_images` only ever holds URLs that were present in the image
/// list at edit-start and have since been removed by the user; the
/// backend uses it to delete the stored assets.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub service_id: Option<String>,
    pub name: String,
    pub category: Option<ServiceCategory>,
    pub price: f64,
    pub duration: u32,
    pub description: String,
    pub popular: bool,
    pub discount: Option<u32>,
    pub tags: String,
    pub images: Vec<ImageRef>,
    pub removed_images: Vec<String>,
}

impl Default for ServiceDraft {
    fn default() -> Self {
        Self {
            service_id: None,
            name: String::new(),
            category: None,
            price: 0.0,
            duration: 30,
            description: String::new(),
            popular: false,
            discount: None,
            tags: String::new(),
            images: Vec::new(),
            removed_images: Vec::new(),
        }
    }
}

impl ServiceDraft {
    /// Snapshots a service into an editable draft. Tags are re-joined
    /// into one comma-separated string for the text field.
    pub fn from_service(service: &Service) -> Self {
        Self {
            service_id: Some(service.id.clone()),
            name: service.name.clone(),
            category: Some(service.category),
            price: service.price,
            duration: service.duration,
            description: service.description.clone(),
            popular: service.popular,
            discount: service.discount,
            tags: service.tags.join(", "),
            images: service
                .images
                .iter()
                .cloned()
                .map(ImageRef::Remote)
                .collect(),
            removed_images: Vec::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.service_id.is_some()
    }

    /// Newly picked files are appended, never replacing what is already
    /// in the list.
    pub fn add_local_images(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.images.extend(paths.into_iter().map(ImageRef::Local));
    }

    /// Removes the image at `index`. In edit mode a removed remote URL
    /// is also recorded so the backend can delete the stored asset.
    pub fn remove_image(&mut self, index: usize) {
        if index >= self.images.len() {
            return;
        }
        if self.is_editing() {
            if let ImageRef::Remote(url) = &self.images[index] {
                self.removed_images.push(url.clone());
            }
        }
        self.images.remove(index);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Mirrors the required fields of the form.
    pub fn can_submit(&self) -> bool {
        !self.name.trim().is_empty()
            && self.category.is_some()
            && !self.description.trim().is_empty()
            && self.duration >= 1
    }
}
