//! Slow Computer theme — e-ink optimized
//!
//! Pure black and white. No grays. 1px black outlines.

use egui::{Color32, FontData, FontDefinitions, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use std::path::{Path, PathBuf};

/// Only two colors exist on this machine.
pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
}

/// Name of the font family used for large numeric displays.
///
/// Always registered by [`SlowTheme::apply`]; falls back to the
/// proportional fonts when no display font file is found.
pub const DISPLAY_FAMILY: &str = "display";

/// Font file searched for when no display font is configured.
const DEFAULT_DISPLAY_FONT: &str = "Rubik-Regular.ttf";

/// The display font family as an egui [`FontFamily`].
pub fn display_family() -> FontFamily {
    FontFamily::Name(DISPLAY_FAMILY.into())
}

/// Theme configuration for slow computer apps
pub struct SlowTheme {
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
    /// Explicit display font file; searched for by name when `None`.
    pub display_font: Option<PathBuf>,
}

impl Default for SlowTheme {
    fn default() -> Self {
        Self {
            font_size_body: 14.0,
            font_size_heading: 22.0,
            font_size_small: 11.0,
            window_padding: 8.0,
            item_spacing: 4.0,
            display_font: None,
        }
    }
}

impl SlowTheme {
    pub fn with_display_font(mut self, path: Option<PathBuf>) -> Self {
        self.display_font = path;
        self
    }

    /// Candidate locations for a bundled font, relative to the executable
    /// first, then the shared slowOS font directory.
    fn font_search_paths(font_name: &str) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                paths.push(dir.join("fonts").join(font_name));
                paths.push(dir.join(font_name));
            }
        }
        paths.push(Path::new("/usr/share/slowos/fonts").join(font_name));
        paths.push(Path::new("/usr/share/fonts").join(font_name));
        paths
    }

    fn load_display_font(&self) -> Option<Vec<u8>> {
        let candidates = match &self.display_font {
            Some(path) => vec![path.clone()],
            None => Self::font_search_paths(DEFAULT_DISPLAY_FONT),
        };
        for path in candidates {
            match std::fs::read(&path) {
                Ok(data) => {
                    tracing::debug!(path = %path.display(), "loaded display font");
                    return Some(data);
                }
                Err(e) if self.display_font.is_some() => {
                    tracing::warn!(path = %path.display(), error = %e, "display font unavailable");
                }
                Err(_) => {}
            }
        }
        None
    }

    /// Apply the slow computer theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut fonts = FontDefinitions::default();
        let mut display = fonts
            .families
            .get(&FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();
        if let Some(data) = self.load_display_font() {
            fonts.font_data.insert(DISPLAY_FAMILY.to_owned(), FontData::from_owned(data));
            display.insert(0, DISPLAY_FAMILY.to_owned());
        }
        fonts.families.insert(display_family(), display);
        ctx.set_fonts(fonts);

        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        // --- visuals: pure black & white ---
        let mut visuals = Visuals::light();

        visuals.window_fill = SlowColors::WHITE;
        visuals.panel_fill = SlowColors::WHITE;
        visuals.faint_bg_color = SlowColors::WHITE;
        visuals.extreme_bg_color = SlowColors::WHITE;

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, SlowColors::BLACK);

        let bw = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = SlowColors::WHITE;
            ws.bg_stroke = Stroke::new(1.0, SlowColors::BLACK);
            ws.fg_stroke = Stroke::new(1.0, SlowColors::BLACK);
            ws.rounding = Rounding::ZERO;
        };
        bw(&mut visuals.widgets.noninteractive);
        bw(&mut visuals.widgets.inactive);
        bw(&mut visuals.widgets.hovered);
        bw(&mut visuals.widgets.active);
        bw(&mut visuals.widgets.open);

        // dithered shadows are drawn by hand
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Menu bar styling helper
pub fn menu_bar<R>(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> egui::InnerResponse<R> {
    let frame_resp = egui::Frame::none()
        .fill(SlowColors::WHITE)
        .stroke(Stroke::new(1.0, SlowColors::BLACK))
        .inner_margin(egui::Margin::symmetric(4.0, 2.0))
        .show(ui, |ui| ui.horizontal(add_contents).inner);
    egui::InnerResponse {
        inner: frame_resp.inner,
        response: frame_resp.response,
    }
}

/// Strip Tab and Cmd+/Cmd-/Cmd= before widgets see them.
///
/// Tab would cycle focus into the menu bar and the zoom chords would rescale
/// the whole UI. Call at the start of `update()`.
pub fn consume_special_keys(ctx: &egui::Context) {
    ctx.input_mut(|i| {
        i.events.retain(|event| {
            !matches!(event,
                egui::Event::Key { key: egui::Key::Tab, .. }
            ) && !matches!(event,
                egui::Event::Key { key, modifiers, .. }
                    if modifiers.command && matches!(key, egui::Key::Plus | egui::Key::Minus | egui::Key::Equals)
            )
        });
    });
}
