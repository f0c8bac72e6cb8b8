use egui::{Rounding, Sense, TextEdit, Ui, Vec2};
use rfd::FileDialog;
use strum::IntoEnumIterator;

use crate::app_actions::AppAction;
use crate::app_state::AppState;
use crate::catalog::ServiceCategory;

const THUMB_SIZE: [f32; 2] = [96.0, 72.0];

/// Renders the create/edit form. Field widgets bind directly to the
/// draft; everything with side effects goes through the action queue.
#[allow(clippy::too_many_lines)]
pub fn show_service_form(app_state: &mut AppState, ui: &mut Ui, action_queue: &mut Vec<AppAction>) {
    let loading = app_state.is_loading();
    let AppState {
        draft,
        preview_service,
        ..
    } = app_state;
    let is_editing = draft.is_editing();

    ui.heading(if is_editing {
        "Edit Service"
    } else {
        "Create New Service"
    });
    ui.separator();
    ui.add_space(8.0);

    egui::Grid::new("service_form_grid")
        .num_columns(2)
        .spacing([10.0, 10.0])
        .striped(true)
        .show(ui, |ui| {
            ui.label("Service Name:");
            ui.add(TextEdit::singleline(&mut draft.name).hint_text("Service Name"));
            ui.end_row();

            ui.label("Category:");
            egui::ComboBox::new("category_combo", "")
                .selected_text(draft.category.map_or("Select a category", |c| c.label()))
                .show_ui(ui, |ui| {
                    for category in ServiceCategory::iter() {
                        ui.selectable_value(&mut draft.category, Some(category), category.label());
                    }
                });
            ui.end_row();

            ui.label("Price (Ksh.):");
            ui.add(
                egui::DragValue::new(&mut draft.price)
                    .clamp_range(0.0..=1_000_000.0)
                    .speed(10.0),
            );
            ui.end_row();

            ui.label("Duration (minutes):");
            ui.add(
                egui::DragValue::new(&mut draft.duration)
                    .clamp_range(1..=600)
                    .speed(5),
            );
            ui.end_row();

            ui.label("Discount (%):");
            ui.horizontal(|ui| {
                let mut has_discount = draft.discount.is_some();
                if ui.checkbox(&mut has_discount, "").changed() {
                    draft.discount = if has_discount { Some(10) } else { None };
                }
                if let Some(discount) = draft.discount.as_mut() {
                    ui.add(egui::DragValue::new(discount).clamp_range(0..=100).suffix("%"));
                }
            });
            ui.end_row();

            ui.label("Tags:");
            ui.add(TextEdit::singleline(&mut draft.tags).hint_text("e.g. premium, quick, special"));
            ui.end_row();

            ui.label("Description:");
            ui.add(
                TextEdit::multiline(&mut draft.description)
                    .desired_rows(3)
                    .hint_text("Description"),
            );
            ui.end_row();

            ui.label("Popular:");
            ui.checkbox(&mut draft.popular, "Popular Service");
            ui.end_row();
        });

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label("Images:");
        if ui.button("Add Images...").clicked() {
            if let Some(paths) = FileDialog::new()
                .add_filter("Image", &["png", "jpg", "jpeg", "gif", "webp"])
                .pick_files()
            {
                action_queue.push(AppAction::AddDraftImages(paths));
            }
        }
    });

    if !draft.images.is_empty() {
        ui.add_space(6.0);
        egui::ScrollArea::horizontal().show(ui, |ui| {
            ui.horizontal(|ui| {
                for (index, image) in draft.images.iter().enumerate() {
                    ui.vertical(|ui| {
                        match preview_service.texture_for(ui.ctx(), image) {
                            Some(texture) => {
                                ui.add_sized(
                                    THUMB_SIZE,
                                    egui::Image::new(egui::load::SizedTexture::new(
                                        texture.id(),
                                        texture.size_vec2(),
                                    ))
                                    .rounding(Rounding::same(4.0)),
                                );
                            }
                            None => {
                                let (rect, _) = ui.allocate_exact_size(
                                    Vec2::new(THUMB_SIZE[0], THUMB_SIZE[1]),
                                    Sense::hover(),
                                );
                                ui.painter().rect_filled(
                                    rect,
                                    Rounding::same(4.0),
                                    egui::Color32::from_gray(40),
                                );
                            }
                        }
                        if ui.small_button("Remove").clicked() {
                            action_queue.push(AppAction::RemoveDraftImage(index));
                        }
                    });
                }
            });
        });
    }

    ui.add_space(16.0);
    ui.separator();
    ui.add_space(8.0);

    let submit_label = if loading {
        if is_editing { "Updating..." } else { "Adding..." }
    } else if is_editing {
        "Update Service"
    } else {
        "Add Service"
    };

    let can_submit = !loading && draft.can_submit();
    ui.horizontal(|ui| {
        ui.add_enabled_ui(can_submit, |ui| {
            if ui.button(submit_label).clicked() {
                action_queue.push(AppAction::SubmitDraft);
            }
        });
        if ui.button("Cancel").on_hover_text("Discard changes").clicked() {
            action_queue.push(AppAction::CancelForm);
        }
    });
}
