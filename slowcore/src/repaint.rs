//! Partial repaint controller
//!
//! egui redraws everything every frame. On an e-ink panel each refresh is
//! visible, so apps only repaint when something actually changed: the user
//! pressed a key or clicked, or the app marked its state dirty.
//!
//! Call [`RepaintController::begin_frame`] at the top of `update()` and
//! [`RepaintController::end_frame`] at the bottom. Idle frames schedule
//! nothing; egui sleeps until the next input event.

/// Why a frame is being painted; only reported in trace logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RepaintReason {
    /// First frame — always paint.
    Init,
    /// User input (mouse move, key press, scroll).
    Input,
    /// App-requested repaint (state changed internally).
    StateChange,
}

#[derive(Debug, Default)]
pub struct RepaintController {
    needs_repaint: bool,
    frame: u64,
}

impl RepaintController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one more frame after the current one.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub fn begin_frame(&mut self, ctx: &egui::Context) {
        let had_input = ctx.input(|i| {
            !i.events.is_empty()
                || i.pointer.any_pressed()
                || i.pointer.any_released()
                || i.raw_scroll_delta != egui::Vec2::ZERO
                || i.pointer.is_moving()
        });
        self.observe(had_input);
    }

    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if self.settle() {
            ctx.request_repaint();
        }
    }

    fn observe(&mut self, had_input: bool) -> RepaintReason {
        let reason = classify(self.frame, had_input, self.needs_repaint);
        tracing::trace!(frame = self.frame, ?reason, "begin frame");
        self.needs_repaint = false;
        reason
    }

    /// Advance the frame counter; true when another frame was requested
    /// while this one was being built.
    fn settle(&mut self) -> bool {
        self.frame += 1;
        self.needs_repaint
    }
}

fn classify(frame: u64, had_input: bool, needs_repaint: bool) -> RepaintReason {
    if frame == 0 {
        RepaintReason::Init
    } else if needs_repaint && !had_input {
        RepaintReason::StateChange
    } else {
        // egui only wakes us for input or an explicit request
        RepaintReason::Input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_init() {
        let mut rc = RepaintController::new();
        assert_eq!(rc.observe(true), RepaintReason::Init);
    }

    #[test]
    fn test_marked_frame_is_state_change() {
        let mut rc = RepaintController::new();
        rc.observe(false);
        rc.mark_needs_repaint();
        assert!(rc.settle());

        assert_eq!(rc.observe(false), RepaintReason::StateChange);
        assert!(!rc.settle());
        assert_eq!(rc.frame, 2);
    }

    #[test]
    fn test_input_wins_over_state_change() {
        assert_eq!(classify(5, true, true), RepaintReason::Input);
        assert_eq!(classify(5, true, false), RepaintReason::Input);
    }
}
