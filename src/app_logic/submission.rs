// src/app_logic/submission.rs
//
// Reconciles the form draft into a submission plan: which scalar
// fields to send, which local files to upload, which stored URLs to
// keep, and which to delete. The plan is plain data so it can be
// built and inspected without any HTTP.

use std::path::PathBuf;

use super::draft::{ImageRef, ServiceDraft};

#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionPlan {
    /// Present for an update, absent for a create.
    pub service_id: Option<String>,
    /// Scalar text parts, in emission order.
    pub fields: Vec<(&'static str, String)>,
    /// Local files emitted as repeated `images` file parts, in the
    /// order they appear in the draft.
    pub uploads: Vec<PathBuf>,
    /// Stored URLs the backend should retain (`existingImages`).
    pub existing_images: Vec<String>,
    /// Stored URLs the backend should delete (`imagesToRemove`).
    /// Only emitted when non-empty.
    pub images_to_remove: Vec<String>,
}

impl SubmissionPlan {
    pub fn is_update(&self) -> bool {
        self.service_id.is_some()
    }
}

/// Builds the outbound plan for the current draft.
///
/// The union of `existing_images` and the uploaded files, minus
/// `images_to_remove`, becomes the backend's final image set. No
/// deduplication happens here; removals are applied by the backend
/// independently of additions.
pub fn build_submission_plan(draft: &ServiceDraft) -> Result<SubmissionPlan, String> {
    let category = draft
        .category
        .ok_or_else(|| "Select a category before submitting".to_string())?;

    let mut fields: Vec<(&'static str, String)> = vec![
        ("name", draft.name.clone()),
        ("category", category.wire_name().to_string()),
        ("price", draft.price.to_string()),
        ("duration", draft.duration.to_string()),
        ("description", draft.description.clone()),
        ("popular", draft.popular.to_string()),
    ];
    if let Some(discount) = draft.discount {
        fields.push(("discount", discount.to_string()));
    }
    fields.push(("tags", draft.tags.clone()));

    let mut uploads = Vec::new();
    let mut existing_images = Vec::new();
    for image in &draft.images {
        match image {
            ImageRef::Local(path) => uploads.push(path.clone()),
            ImageRef::Remote(url) => existing_images.push(url.clone()),
        }
    }

    Ok(SubmissionPlan {
        service_id: draft.service_id.clone(),
        fields,
        uploads,
        existing_images,
        images_to_remove: draft.removed_images.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCategory;
    use crate::tests_common::{sample_draft, sample_service};

    fn field<'a>(plan: &'a SubmissionPlan, name: &str) -> Option<&'a str> {
        plan.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn scalar_fields_are_emitted_in_order() {
        let mut draft = sample_draft();
        draft.discount = Some(15);
        let plan = build_submission_plan(&draft).unwrap();
        let names: Vec<&str> = plan.fields.iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["name", "category", "price", "duration", "description", "popular", "discount", "tags"]
        );
        assert_eq!(field(&plan, "category"), Some("massage"));
        assert_eq!(field(&plan, "popular"), Some("false"));
    }

    #[test]
    fn absent_discount_is_omitted() {
        let plan = build_submission_plan(&sample_draft()).unwrap();
        assert_eq!(field(&plan, "discount"), None);
    }

    #[test]
    fn missing_category_is_rejected() {
        let mut draft = sample_draft();
        draft.category = None;
        assert!(build_submission_plan(&draft).is_err());
    }

    #[test]
    fn images_partition_by_kind_preserving_upload_order() {
        let mut draft = sample_draft();
        draft.images = vec![
            ImageRef::Local(PathBuf::from("/tmp/a.png")),
            ImageRef::Remote("http://a/1.png".to_string()),
            ImageRef::Local(PathBuf::from("/tmp/b.png")),
            ImageRef::Remote("http://a/2.png".to_string()),
        ];
        let plan = build_submission_plan(&draft).unwrap();
        assert_eq!(
            plan.uploads,
            vec![PathBuf::from("/tmp/a.png"), PathBuf::from("/tmp/b.png")]
        );
        assert_eq!(
            plan.existing_images,
            vec!["http://a/1.png".to_string(), "http://a/2.png".to_string()]
        );
    }

    #[test]
    fn existing_images_exclude_removed_urls() {
        // The removal already spliced the URL out of the image list, so
        // the retained set never intersects the removal set.
        let mut service = sample_service("svc-1", "Box Braids");
        service.images = vec!["http://a/1.png".to_string()];
        let mut draft = ServiceDraft::from_service(&service);
        draft.add_local_images(vec![PathBuf::from("/tmp/fileA.png")]);
        draft.remove_image(0);

        let plan = build_submission_plan(&draft).unwrap();
        assert!(plan.existing_images.is_empty());
        assert_eq!(plan.images_to_remove, vec!["http://a/1.png".to_string()]);
        assert_eq!(plan.uploads, vec![PathBuf::from("/tmp/fileA.png")]);
        assert!(plan.is_update());
    }

    #[test]
    fn create_mode_plan_has_no_id() {
        let mut draft = sample_draft();
        draft.service_id = None;
        let plan = build_submission_plan(&draft).unwrap();
        assert!(!plan.is_update());
    }

    #[test]
    fn price_formats_without_trailing_zero() {
        let mut draft = sample_draft();
        draft.category = Some(ServiceCategory::Hair);
        draft.price = 1500.0;
        let plan = build_submission_plan(&draft).unwrap();
        assert_eq!(field(&plan, "price"), Some("1500"));

        draft.price = 1500.5;
        let plan = build_submission_plan(&draft).unwrap();
        assert_eq!(field(&plan, "price"), Some("1500.5"));
    }
}
