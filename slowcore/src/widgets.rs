//! Custom widgets — pure black and white, dithered overlays
//!
//! Instead of opaque black boxes, pressed, hovered and disabled states are a
//! checkerboard dither so the label underneath stays readable.

use crate::theme::SlowColors;
use egui::{Align2, Color32, FontFamily, FontId, Painter, Pos2, Rect, Response, Sense, Ui, Vec2, Widget};

/// Checkerboard overlay strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dither {
    /// Tight 1px checkerboard (classic mac selection).
    Selection,
    /// 2px spacing, for hover.
    Hover,
    /// Sparse 3px spacing, for controls that cannot be used right now.
    Disabled,
}

impl Dither {
    fn density(self) -> i32 {
        match self {
            Dither::Selection => 1,
            Dither::Hover => 2,
            Dither::Disabled => 3,
        }
    }

    pub fn paint(self, painter: &Painter, rect: Rect) {
        for (x, y) in dither_points(rect, self.density()) {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(x as f32, y as f32), Vec2::splat(1.0)),
                0.0,
                Color32::BLACK,
            );
        }
    }
}

/// Pixel positions of a checkerboard inside `rect`.
///
/// Bounds are snapped inward once so every point lies inside the rect.
fn dither_points(rect: Rect, density: i32) -> impl Iterator<Item = (i32, i32)> {
    let density = density.max(1);
    let x0 = rect.min.x.ceil() as i32;
    let y0 = rect.min.y.ceil() as i32;
    let x1 = rect.max.x.floor() as i32;
    let y1 = rect.max.y.floor() as i32;

    let x_step = (density * 2) as usize;
    (y0..y1).step_by(density as usize).flat_map(move |y| {
        let odd_row = ((y - y0) / density) % 2 == 1;
        let start = x0 + if odd_row { density } else { 0 };
        (start..x1).step_by(x_step).map(move |x| (x, y))
    })
}

/// Draw a dithered drop shadow for a window.
/// Call after `egui::Window::show()` with the window rect.
pub fn draw_window_shadow(ctx: &egui::Context, window_rect: Rect) {
    let shadow_rect = window_rect.translate(egui::vec2(4.0, 4.0));
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::PanelResizeLine,
        egui::Id::new("dither_shadows"),
    ));
    Dither::Hover.paint(&painter, shadow_rect);
}

/// A keypad key: white bg, 1px outline, fixed size.
/// Dithered when pressed; sparsely dithered and inert when disabled.
pub struct KeyButton<'a> {
    text: &'a str,
    size: Vec2,
    enabled: bool,
}

impl<'a> KeyButton<'a> {
    pub fn new(text: &'a str, size: Vec2) -> Self {
        Self { text, size, enabled: true }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl<'a> Widget for KeyButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(self.size, sense);

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, SlowColors::WHITE);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, SlowColors::BLACK));

            let pressed = self.enabled && response.is_pointer_button_down_on();
            if !self.enabled {
                Dither::Disabled.paint(painter, rect.shrink(1.0));
            } else if pressed {
                Dither::Selection.paint(painter, rect);
            } else if response.hovered() {
                Dither::Hover.paint(painter, rect.shrink(1.0));
            }

            let font_size = (self.size.y * 0.45).clamp(10.0, 20.0);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.text,
                FontId::proportional(font_size),
                if pressed { SlowColors::WHITE } else { SlowColors::BLACK },
            );
        }

        response
    }
}

/// Font size that makes text fit `available` width.
///
/// `measured` is the text width at `preferred` size. Text that already fits
/// keeps the preferred size; wider text shrinks proportionally, but never
/// below `min`.
pub fn fit_font_size(measured: f32, preferred: f32, available: f32, min: f32) -> f32 {
    if measured <= available || measured <= 0.0 {
        return preferred;
    }
    (preferred * available / measured).clamp(min.min(preferred), preferred)
}

/// A right-aligned, single-line text display that shrinks its font to fit.
///
/// Sizing is recomputed every frame, so the text follows both content
/// changes and window resizes.
pub struct ScaledDisplay<'a> {
    text: &'a str,
    preferred: f32,
    min: f32,
    family: FontFamily,
}

impl<'a> ScaledDisplay<'a> {
    pub fn new(text: &'a str, preferred: f32) -> Self {
        Self {
            text,
            preferred,
            min: (preferred / 3.0).max(8.0),
            family: FontFamily::Proportional,
        }
    }

    pub fn min_size(mut self, min: f32) -> Self {
        self.min = min;
        self
    }

    pub fn family(mut self, family: FontFamily) -> Self {
        self.family = family;
        self
    }
}

impl<'a> Widget for ScaledDisplay<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let padding = 8.0;
        let height = self.preferred * 1.3;
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(ui.available_width(), height), Sense::hover());

        let measured = ui.fonts(|f| {
            f.layout_no_wrap(
                self.text.to_owned(),
                FontId::new(self.preferred, self.family.clone()),
                SlowColors::BLACK,
            )
            .size()
            .x
        });
        let size = fit_font_size(measured, self.preferred, rect.width() - padding * 2.0, self.min);

        if ui.is_rect_visible(rect) {
            ui.painter().text(
                rect.right_center() - egui::vec2(padding, 0.0),
                Align2::RIGHT_CENTER,
                self.text,
                FontId::new(size, self.family),
                SlowColors::BLACK,
            );
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_keeps_preferred_when_text_fits() {
        assert_eq!(fit_font_size(100.0, 32.0, 200.0, 10.0), 32.0);
        assert_eq!(fit_font_size(200.0, 32.0, 200.0, 10.0), 32.0);
    }

    #[test]
    fn test_fit_shrinks_proportionally() {
        assert_eq!(fit_font_size(400.0, 32.0, 200.0, 10.0), 16.0);
    }

    #[test]
    fn test_fit_never_below_min() {
        assert_eq!(fit_font_size(10_000.0, 32.0, 100.0, 12.0), 12.0);
    }

    #[test]
    fn test_fit_grows_back_when_window_widens() {
        let narrow = fit_font_size(300.0, 30.0, 150.0, 8.0);
        let wide = fit_font_size(300.0, 30.0, 600.0, 8.0);
        assert!(narrow < wide);
        assert_eq!(wide, 30.0);
    }

    #[test]
    fn test_dither_points_stay_inside() {
        let rect = Rect::from_min_max(Pos2::new(0.5, 0.5), Pos2::new(10.5, 6.5));
        for density in 1..=3 {
            for (x, y) in dither_points(rect, density) {
                assert!(rect.contains(Pos2::new(x as f32, y as f32)));
            }
        }
    }

    #[test]
    fn test_dither_checkerboard_alternates_rows() {
        let rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(4.0, 2.0));
        let points: Vec<_> = dither_points(rect, 1).collect();
        assert_eq!(points, vec![(0, 0), (2, 0), (1, 1), (3, 1)]);
    }

    #[test]
    fn test_denser_dither_has_more_points() {
        let rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(30.0, 30.0));
        let selection = dither_points(rect, Dither::Selection.density()).count();
        let disabled = dither_points(rect, Dither::Disabled.density()).count();
        assert!(selection > disabled);
    }

    #[test]
    fn test_empty_rect_has_no_points() {
        let rect = Rect::from_min_max(Pos2::new(3.2, 3.2), Pos2::new(3.8, 3.8));
        assert_eq!(dither_points(rect, 1).count(), 0);
    }
}
