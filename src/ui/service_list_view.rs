use egui::{Rounding, Sense, Ui, Vec2};

use crate::app_actions::AppAction;
use crate::app_logic::draft::ImageRef;
use crate::app_state::AppState;
use crate::catalog::Service;

const CARD_THUMBNAILS: usize = 3;
const THUMB_SIZE: [f32; 2] = [96.0, 72.0];

/// Struck-through "original" price shown next to a discounted one.
/// Carried over from the booking site as-is.
pub fn struck_price(price: f64, discount: u32) -> f64 {
    price * (100.0 + discount as f64) / 100.0
}

/// Renders the catalog as a scrollable list of cards.
pub fn show_service_list(app_state: &mut AppState, ui: &mut Ui, action_queue: &mut Vec<AppAction>) {
    ui.heading("Existing Services");
    ui.add_space(6.0);

    if app_state.services.is_empty() {
        if app_state.fetch_in_flight() {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading services...");
            });
        } else {
            ui.label("No services found. Add a new service to get started.");
        }
        return;
    }

    // Cloned so the cards can borrow the preview cache mutably.
    let services = app_state.services.clone();
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for service in &services {
                show_service_card(app_state, ui, service, action_queue);
                ui.add_space(8.0);
            }
        });
}

fn show_service_card(
    app_state: &mut AppState,
    ui: &mut Ui,
    service: &Service,
    action_queue: &mut Vec<AppAction>,
) {
    egui::Frame::group(ui.style())
        .rounding(Rounding::same(6.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width() - 16.0);

            ui.horizontal(|ui| {
                ui.strong(service.name.as_str());
                if service.popular {
                    ui.label(
                        egui::RichText::new("Popular")
                            .small()
                            .color(egui::Color32::from_rgb(202, 138, 4)),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(discount) = service.discount {
                        ui.label(
                            egui::RichText::new(format!(
                                "Ksh. {:.2}",
                                struck_price(service.price, discount)
                            ))
                            .small()
                            .strikethrough()
                            .color(egui::Color32::LIGHT_RED),
                        );
                    }
                    ui.strong(format!("Ksh. {}", service.price));
                });
            });

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(service.category.label())
                        .small()
                        .color(egui::Color32::from_rgb(30, 100, 200)),
                );
                ui.label(format!("{} min", service.duration));
            });

            if !service.tags.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    for tag in &service.tags {
                        ui.label(egui::RichText::new(tag.as_str()).small().weak());
                    }
                });
            }

            ui.label(service.description.as_str());

            if !service.images.is_empty() {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    for url in service.images.iter().take(CARD_THUMBNAILS) {
                        let image_ref = ImageRef::Remote(url.clone());
                        match app_state.preview_service.texture_for(ui.ctx(), &image_ref) {
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
                    }
                    if service.images.len() > CARD_THUMBNAILS {
                        ui.label(
                            egui::RichText::new(format!(
                                "+{} more",
                                service.images.len() - CARD_THUMBNAILS
                            ))
                            .small()
                            .weak(),
                        );
                    }
                });
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Edit").on_hover_text("Edit this service").clicked() {
                    action_queue.push(AppAction::EditService(service.clone()));
                }
                if ui
                    .button("Delete")
                    .on_hover_text("Delete this service")
                    .clicked()
                {
                    action_queue.push(AppAction::RequestDelete(service.clone()));
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn struck_price_inflates_by_discount() {
        assert_eq!(struck_price(100.0, 20), 120.0);
        assert_eq!(struck_price(1500.0, 10), 1650.0);
    }
}
