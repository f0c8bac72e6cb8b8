// Shared fixtures for unit tests.

use std::path::{Path, PathBuf};

use image::{ImageBuffer, ImageFormat, Rgba};

use crate::app_logic::draft::ServiceDraft;
use crate::catalog::{Service, ServiceCategory};

pub fn sample_service(id: &str, name: &str) -> Service {
    Service {
        id: id.to_string(),
        name: name.to_string(),
        category: ServiceCategory::Hair,
        price: 1500.0,
        duration: 90,
        description: "Wash, condition and style".to_string(),
        tags: Vec::new(),
        images: Vec::new(),
        popular: false,
        discount: None,
    }
}

/// A valid create-mode draft with the required fields filled in.
pub fn sample_draft() -> ServiceDraft {
    ServiceDraft {
        name: "Box Braids".to_string(),
        category: Some(ServiceCategory::Massage),
        price: 2500.0,
        duration: 180,
        description: "Full head, mid-back length".to_string(),
        tags: "premium, protective".to_string(),
        ..ServiceDraft::default()
    }
}

/// Writes a small checkerboard PNG into `dir` and returns its path.
pub fn create_dummy_image_file(dir: &Path, filename: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(filename);
    let img = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    });
    img.save_with_format(&path, ImageFormat::Png)
        .expect("Failed to save dummy image in tests_common::create_dummy_image_file");
    path
}
