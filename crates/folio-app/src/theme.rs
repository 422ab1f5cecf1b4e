//! Monochrome dark theme

use egui::{Color32, Context, Rounding, Stroke, Style, Visuals};

pub const BACKGROUND: Color32 = Color32::from_rgb(9, 9, 11);
pub const SURFACE: Color32 = Color32::from_rgb(24, 24, 27);
pub const BORDER: Color32 = Color32::from_rgb(63, 63, 70);
pub const TEXT: Color32 = Color32::from_rgb(244, 244, 245);
pub const MUTED: Color32 = Color32::from_rgb(161, 161, 170);

/// Apply the site theme
pub fn apply_theme(ctx: &Context) {
    let mut style = Style::default();
    let mut visuals = Visuals::dark();

    visuals.window_fill = SURFACE;
    visuals.panel_fill = BACKGROUND;
    visuals.extreme_bg_color = BACKGROUND;
    visuals.faint_bg_color = SURFACE;

    for widgets in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widgets.bg_fill = SURFACE;
        widgets.fg_stroke = Stroke::new(1.0, TEXT);
        widgets.rounding = Rounding::same(999.0);
    }
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, MUTED);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, TEXT);

    visuals.selection.bg_fill = TEXT.linear_multiply(0.2);
    visuals.selection.stroke = Stroke::new(1.0, TEXT);
    visuals.hyperlink_color = TEXT;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.visuals = visuals;
    ctx.set_style(style);
}

/// `color` faded by an animated opacity
pub fn faded(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}
