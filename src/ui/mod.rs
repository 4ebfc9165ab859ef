use egui::{Color32, RichText, Stroke};
use std::time::Instant;

use crate::error::suggestion_keys;
use crate::formats::{format_count, format_duration, present, FormatAction, FormatCard};
use crate::localizations::Localizations;
use crate::models::{AppState, HandoffRecord, PanelState, VideoInfo};
use crate::theme::*;
use crate::toast::ToastQueue;

pub fn render_url_input(
    ui: &mut egui::Ui,
    state: &mut AppState,
    localizer: &Localizations,
) -> egui::Response {
    ui.label(localizer.get("url-label"));

    egui::Frame::group(ui.style())
        .fill(Color32::from_rgb(250, 250, 250))
        .stroke(Stroke::new(1.0, Color32::LIGHT_GRAY))
        .rounding(4.0)
        .show(ui, |ui| {
            ui.add_enabled_ui(!state.is_fetching, |ui| {
                ui.add_sized(
                    [ui.available_width(), 40.0],
                    egui::TextEdit::singleline(&mut state.url)
                        .hint_text(localizer.get("url-placeholder"))
                        .font(egui::FontId::proportional(16.0)),
                )
            })
            .inner
        })
        .inner
}

/// Draws whichever panel is active and reports a format card interaction.
/// Download buttons are disabled while `redirecting`.
pub fn render_panel(
    ui: &mut egui::Ui,
    panel: &PanelState,
    redirecting: bool,
    localizer: &Localizations,
) -> Option<FormatAction> {
    match panel {
        PanelState::Idle => None,
        PanelState::Loading => {
            render_skeleton(ui, localizer);
            None
        }
        PanelState::Error(message) => {
            render_error(ui, message, localizer);
            None
        }
        PanelState::Video { info, selection } => {
            render_video_details(ui, info, localizer);
            ui.add_space(16.0);
            ui.label(RichText::new(localizer.get("formats")).strong());
            ui.add_space(8.0);

            let mut action = None;
            ui.horizontal_wrapped(|ui| {
                for (index, card) in present(info, selection).iter().enumerate() {
                    if let Some(a) = render_format_card(ui, index, card, redirecting, localizer) {
                        action = Some(a);
                    }
                }
            });
            action
        }
    }
}

fn render_skeleton(ui: &mut egui::Ui, localizer: &Localizations) {
    let bar = |ui: &mut egui::Ui, width: f32, height: f32| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
        ui.painter().rect_filled(rect, 4.0, SKELETON_BG);
    };

    ui.horizontal(|ui| {
        bar(ui, 160.0, 90.0);
        ui.vertical(|ui| {
            bar(ui, 240.0, 18.0);
            bar(ui, 180.0, 14.0);
            bar(ui, 120.0, 14.0);
        });
    });
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        for _ in 0..4 {
            bar(ui, FORMAT_CARD_WIDTH, 110.0);
        }
    });
    ui.add_space(12.0);
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new());
        ui.label(RichText::new(localizer.get("loading-info")).color(SECONDARY_TEXT));
    });
}

fn render_error(ui: &mut egui::Ui, message: &str, localizer: &Localizations) {
    egui::Frame::group(ui.style())
        .fill(ERROR_BG)
        .stroke(Stroke::new(1.0, TEXT_ERROR))
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(localizer.get("error-title")).strong().color(TEXT_ERROR));
            ui.label(RichText::new(message).color(TEXT_ERROR));
            ui.add_space(8.0);
            ui.label(localizer.get("suggestions"));
            for key in suggestion_keys(message) {
                ui.label(format!("💡 {}", localizer.get(key)));
            }
        });
}

fn render_video_details(ui: &mut egui::Ui, info: &VideoInfo, localizer: &Localizations) {
    egui::Frame::group(ui.style())
        .fill(CARD_BG)
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(&info.title).size(18.0).strong());
            ui.add_space(6.0);
            ui.label(format!("{}: {}", localizer.get("uploader"), info.uploader));
            ui.label(format!("{}: {}", localizer.get("platform"), info.platform));
            if let Some(views) = info.view_count.filter(|v| *v > 0) {
                ui.label(format!("{}: {}", localizer.get("views"), format_count(views)));
            }
            if let Some(duration) = info.duration.filter(|d| *d > 0) {
                ui.label(format!("{}: {}", localizer.get("duration"), format_duration(duration)));
            }
            if !info.thumbnail.is_empty() {
                ui.hyperlink_to("🖼 thumbnail", &info.thumbnail);
            }
        });
}

fn render_format_card(
    ui: &mut egui::Ui,
    index: usize,
    card: &FormatCard<'_>,
    redirecting: bool,
    localizer: &Localizations,
) -> Option<FormatAction> {
    let stroke = if card.selected {
        Stroke::new(2.0, SELECTED_STROKE)
    } else {
        Stroke::new(1.0, BORDER_COLOR)
    };

    let inner = egui::Frame::group(ui.style())
        .fill(CARD_BG)
        .stroke(stroke)
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_width(FORMAT_CARD_WIDTH);
            ui.vertical_centered(|ui| {
                if card.format.is_recommended {
                    ui.label(
                        RichText::new(localizer.get("recommended"))
                            .small()
                            .strong()
                            .color(Color32::WHITE)
                            .background_color(BADGE_BG),
                    );
                }
                ui.label(RichText::new(card.format.icon).size(28.0));
                let label = ui.label(
                    RichText::new(&card.format.option.quality_label)
                        .strong()
                        .color(tier_color(card.format.tier)),
                );
                if let Some(description) = &card.format.option.description {
                    label.on_hover_text(description);
                }
                let size = format!("{}: {}", localizer.get("size"), card.size_label);
                let size = match &card.format.option.ext {
                    Some(ext) => format!("{} · {size}", ext.to_uppercase()),
                    None => size,
                };
                ui.label(RichText::new(size).color(SECONDARY_TEXT));
                let label = if redirecting {
                    localizer.get("processing")
                } else {
                    format!("⬇ {}", localizer.get("download-button"))
                };
                ui.add_enabled(!redirecting, egui::Button::new(label))
            })
            .inner
        });

    let download = inner.inner;
    if download.clicked() {
        return Some(FormatAction::Download(index));
    }

    let card_response = ui.interact(
        inner.response.rect,
        ui.id().with(("format-card", index)),
        egui::Sense::click(),
    );
    if card_response.clicked() && !download.hovered() {
        return Some(FormatAction::Select(index));
    }
    None
}

pub fn render_toasts(ctx: &egui::Context, toasts: &ToastQueue, now: Instant) {
    let live = toasts.active(now);
    if live.is_empty() {
        return;
    }

    egui::Area::new("toasts")
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .show(ctx, |ui| {
            for (toast, _) in live {
                let alpha = toast.opacity(now);
                let color = toast_color(toast.kind);
                egui::Frame::popup(ui.style())
                    .fill(Color32::WHITE.gamma_multiply(alpha))
                    .stroke(Stroke::new(2.0, color.gamma_multiply(alpha)))
                    .show(ui, |ui| {
                        ui.label(RichText::new(&toast.text).color(color.gamma_multiply(alpha)));
                    });
                ui.add_space(6.0);
            }
        });
}

/// The download view. Returns true when the user asks to go back.
pub fn render_downloading(
    ui: &mut egui::Ui,
    record: &HandoffRecord,
    localizer: &Localizations,
) -> bool {
    egui::Frame::group(ui.style())
        .fill(CARD_BG)
        .rounding(ROUNDING_FRAME)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(localizer.get("downloading-title")).size(18.0).strong());
            ui.add_space(8.0);
            ui.label(RichText::new(&record.video_title).strong());
            ui.label(&record.quality);
            ui.label(RichText::new(&record.url).color(SECONDARY_TEXT));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label(localizer.get("starting-download"));
            });
        });

    ui.add_space(20.0);
    ui.button(localizer.get("back-button")).clicked()
}
