//! SlowCalc application

use crate::engine::Calculator;
use crate::keypad::{Action, KEYPAD};
use egui::{Context, Key};
use slowcore::repaint::RepaintController;
use slowcore::theme::{consume_special_keys, display_family, menu_bar, SlowColors};
use slowcore::widgets::{draw_window_shadow, KeyButton, ScaledDisplay};

/// Preferred font sizes; the displays shrink below these to fit.
const ENTRY_FONT_SIZE: f32 = 36.0;
const TRAIL_FONT_SIZE: f32 = 16.0;

pub struct SlowCalcApp {
    calc: Calculator,
    show_about: bool,
    repaint: RepaintController,
}

impl SlowCalcApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, calc: Calculator) -> Self {
        Self {
            calc,
            show_about: false,
            repaint: RepaintController::new(),
        }
    }

    /// Forward a key to the engine unless it is disabled right now.
    fn press(&mut self, action: Action) {
        if !self.calc.is_enabled(action) {
            return;
        }
        self.calc.dispatch(action);
        // clicks land after the displays were drawn this frame
        self.repaint.mark_needs_repaint();
    }

    fn copy_entry(&self, ctx: &Context) {
        if self.calc.error().is_none() {
            let text = self.calc.entry().to_string();
            ctx.output_mut(|o| o.copied_text = text);
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        consume_special_keys(ctx);

        let mut copy = false;
        let actions: Vec<Action> = ctx.input(|i| {
            let mut actions = Vec::new();
            for event in &i.events {
                match event {
                    egui::Event::Text(text) => actions.extend(text.chars().filter_map(text_action)),
                    egui::Event::Key { key, pressed: true, modifiers, .. } if !modifiers.command => {
                        actions.extend(key_action(*key));
                    }
                    egui::Event::Copy => copy = true,
                    _ => {}
                }
            }
            actions
        });

        if copy {
            self.copy_entry(ctx);
        }
        for action in actions {
            self.press(action);
        }
    }

    fn render_displays(&self, ui: &mut egui::Ui) {
        let trail = self.calc.trail_text();
        egui::Frame::none()
            .fill(SlowColors::WHITE)
            .stroke(egui::Stroke::new(1.0, SlowColors::BLACK))
            .inner_margin(egui::Margin::symmetric(4.0, 4.0))
            .show(ui, |ui| {
                ui.add(ScaledDisplay::new(&trail, TRAIL_FONT_SIZE).family(display_family()));
                ui.add(
                    ScaledDisplay::new(self.calc.entry(), ENTRY_FONT_SIZE)
                        .min_size(12.0)
                        .family(display_family()),
                );
            });
    }

    fn render_keypad(&mut self, ui: &mut egui::Ui) {
        let spacing = ui.spacing().item_spacing;
        let key_w = ((ui.available_width() - spacing.x * 3.0) / 4.0).floor();
        let key_h = ((ui.available_height() - spacing.y * 4.0) / 5.0).floor().clamp(28.0, 64.0);
        let size = egui::vec2(key_w, key_h);

        let mut clicked = None;
        for row in KEYPAD {
            ui.horizontal(|ui| {
                for action in row {
                    let key = KeyButton::new(action.label(), size).enabled(self.calc.is_enabled(action));
                    if ui.add(key).clicked() {
                        clicked = Some(action);
                    }
                }
            });
        }
        if let Some(action) = clicked {
            self.press(action);
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        let resp = egui::Window::new("about calculator")
            .collapsible(false)
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("calculator");
                    ui.label(concat!("version ", env!("CARGO_PKG_VERSION")));
                    ui.add_space(4.0);
                    ui.label("four-function calculator for slowOS");
                });
                ui.add_space(4.0);
                ui.separator();
                ui.label("keys: 0-9 . + - * / Enter");
                ui.label("Backspace, Del (CE), Esc (C), F9 (+/-)");
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
        if let Some(r) = &resp {
            draw_window_shadow(ctx, r.response.rect);
        }
    }
}

/// Typed characters the window reacts to: the symbols printed on keys.
/// Letter shortcuts stay in key scripts only.
fn text_action(c: char) -> Option<Action> {
    if c.is_alphabetic() {
        return None;
    }
    Action::from_char(c)
}

fn key_action(key: Key) -> Option<Action> {
    match key {
        Key::Enter => Some(Action::Calculate),
        Key::Backspace => Some(Action::Backspace),
        Key::Delete => Some(Action::ClearEntry),
        Key::Escape => Some(Action::Clear),
        Key::F9 => Some(Action::Negate),
        _ => None,
    }
}

impl eframe::App for SlowCalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.repaint.begin_frame(ctx);
        if !self.show_about {
            self.handle_keys(ctx);
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            menu_bar(ui, |ui| {
                ui.menu_button("edit", |ui| {
                    if ui.button("copy").clicked() {
                        self.copy_entry(ui.ctx());
                        ui.close_menu();
                    }
                    if ui.button("clear all").clicked() {
                        self.press(Action::Clear);
                        ui.close_menu();
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SlowColors::WHITE).inner_margin(egui::Margin::same(8.0)))
            .show(ctx, |ui| {
                self.render_displays(ui);
                ui.add_space(8.0);
                self.render_keypad(ui);
            });

        if self.show_about {
            self.render_about(ctx);
        }
        self.repaint.end_frame(ctx);
    }
}
