use super::state::ViewType;
use super::SlotLogApp;
use crate::ui_egui::interaction::{GridKey, KeyOutcome};

impl SlotLogApp {
    /// Route key presses to the active view. Runs before any widget is
    /// drawn so the grid sees keys ahead of buttons.
    pub(super) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let presses: Vec<(egui::Key, egui::Modifiers)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => Some((*key, *modifiers)),
                    _ => None,
                })
                .collect()
        });
        if presses.is_empty() {
            return;
        }

        let typing = ctx.wants_keyboard_input();

        for (key, modifiers) in presses {
            match self.state.view {
                ViewType::Log => self.handle_log_key(ctx, key, modifiers, typing),
                ViewType::Categories => {
                    if key == egui::Key::Escape {
                        self.sort.cancel(&mut self.category_rects);
                    }
                }
                ViewType::Planning => {}
            }
        }
    }

    fn handle_log_key(
        &mut self,
        ctx: &egui::Context,
        key: egui::Key,
        modifiers: egui::Modifiers,
        typing: bool,
    ) {
        let grid_key = GridKey::from(key);

        if !typing && modifiers.is_none() {
            if grid_key == GridKey::ArrowLeft {
                self.navigate_previous();
                return;
            }
            if grid_key == GridKey::ArrowRight {
                self.navigate_next();
                return;
            }
        }

        let outcome = self
            .controller
            .handle_key(grid_key, modifiers, typing, &mut self.context);
        match outcome {
            KeyOutcome::BlurTextField => super::release_text_focus(ctx),
            KeyOutcome::Handled => {
                // Keep Space/Enter from also activating a focused button.
                ctx.input_mut(|i| i.consume_key(modifiers, key));
            }
            KeyOutcome::Ignored => {}
        }
    }
}
