use egui::Color32;

use crate::formats::QualityTier;
use crate::toast::ToastKind;

// Color Palette
// Primary Colors
pub const PRIMARY_BUTTON_BG: Color32 = Color32::from_rgb(76, 154, 255);  // Vibrant blue for primary actions
pub const BUTTON_MAIN_TEXT: Color32 = Color32::from_rgb(255, 255, 255);  // White text for buttons
pub const BADGE_BG: Color32 = Color32::from_rgb(245, 158, 11);  // Amber for the recommended badge

// Background & Surface Colors
pub const CARD_BG: Color32 = Color32::from_rgb(248, 248, 248);  // Light gray cards
pub const SKELETON_BG: Color32 = Color32::from_rgb(228, 228, 231);  // Placeholder bars while loading
pub const ERROR_BG: Color32 = Color32::from_rgba_premultiplied(239, 68, 68, 26);  // Faint red behind the error banner

// Text Colors
pub const TEXT_ERROR: Color32 = Color32::from_rgb(239, 68, 68);  // Red for error messages
pub const SECONDARY_TEXT: Color32 = Color32::from_rgb(138, 138, 143);  // Medium gray for secondary text

// UI Elements
pub const BORDER_COLOR: Color32 = Color32::from_rgba_premultiplied(60, 60, 67, 15);  // Subtle border
pub const SELECTED_STROKE: Color32 = PRIMARY_BUTTON_BG;  // Outline of the selected format card

// Sizing & Spacing
pub const ROUNDING_FRAME: f32 = 8.0;
pub const ROUNDING_BUTTON: f32 = 6.0;
pub const MIN_SIZE_BUTTON: egui::Vec2 = egui::Vec2::new(120.0, 40.0);
pub const FORMAT_CARD_WIDTH: f32 = 150.0;  // Fixed so cards wrap into a grid

pub const BUTTON_FONT_SIZE: f32 = 16.0;

// Toast accents, one per kind
pub fn toast_color(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Success => Color32::from_rgb(16, 185, 129),
        ToastKind::Error => TEXT_ERROR,
        ToastKind::Warning => Color32::from_rgb(245, 158, 11),
        ToastKind::Info => Color32::from_rgb(59, 130, 246),
    }
}

// Quality label colors
pub fn tier_color(tier: QualityTier) -> Color32 {
    match tier {
        QualityTier::Best => Color32::from_rgb(245, 158, 11),
        QualityTier::Hd => Color32::from_rgb(139, 92, 246),
        QualityTier::Sd => Color32::from_rgb(59, 130, 246),
        QualityTier::Low => Color32::from_rgb(107, 114, 128),
        QualityTier::Audio => Color32::from_rgb(16, 185, 129),
    }
}
