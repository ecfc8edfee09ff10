use new_egui_macroquad::egui;

use crate::ui::BASE_PADDING;
use crate::ui::events::AppAction;

/// Dialog purpose - what happens when the dialog is confirmed
#[derive(Debug, Clone, PartialEq)]
pub enum DialogPurpose {
    Info,
    Confirmation(AppAction),
}

/// Dialog result types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogResult {
    Confirmed,
    Cancelled,
}

/// Modal popup drawn above everything else.
pub struct DialogPopup {
    pub open: bool,
    pub title: Option<String>,
    pub purpose: DialogPurpose,
    pub message: String,
    pub result: Option<DialogResult>,
}

impl DialogPopup {
    pub fn new_info(message: &str) -> Self {
        Self {
            open: true,
            title: None,
            purpose: DialogPurpose::Info,
            message: message.to_string(),
            result: None,
        }
    }

    /// Create an info dialog with a title
    pub fn new_info_with_title(title: &str, message: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::new_info(message)
        }
    }

    /// A yes/no question; `on_confirm` is emitted if the user confirms.
    pub fn new_confirm(message: &str, on_confirm: AppAction) -> Self {
        Self {
            open: true,
            title: None,
            purpose: DialogPurpose::Confirmation(on_confirm),
            message: message.to_string(),
            result: None,
        }
    }

    /// The action to run now that the dialog has closed, if any.
    pub fn take_action(&mut self) -> Option<AppAction> {
        match (self.result.take(), &self.purpose) {
            (Some(DialogResult::Confirmed), DialogPurpose::Confirmation(action)) => {
                Some(action.clone())
            }
            _ => None,
        }
    }

    fn close(&mut self, result: DialogResult) {
        self.result = Some(result);
        self.open = false;
    }

    /// Draw the dialog. Returns true if dialog is still open, false if closed.
    pub fn draw(&mut self, egui_ctx: &egui::Context) -> bool {
        if !self.open {
            return false;
        }

        // Draw modal overlay
        egui::Area::new("modal_overlay".into())
            .order(egui::Order::Background)
            .show(egui_ctx, |ui| {
                let screen_rect = egui_ctx.screen_rect();
                let overlay_color = egui::Color32::from_rgba_premultiplied(20, 20, 20, 180);
                ui.painter().rect_filled(screen_rect, 0.0, overlay_color);
            });

        let window_title = self.title.clone().unwrap_or_default();
        egui::Window::new(window_title)
            .title_bar(self.title.is_some())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(300.0)
            .min_height(100.0)
            .show(egui_ctx, |ui| {
                ui.label(self.message.as_str());
                ui.add_space(BASE_PADDING);

                let (enter, escape) = ui.input(|i| {
                    (
                        i.key_pressed(egui::Key::Enter),
                        i.key_pressed(egui::Key::Escape),
                    )
                });

                match self.purpose {
                    DialogPurpose::Confirmation(_) => {
                        if enter {
                            self.close(DialogResult::Confirmed);
                        } else if escape {
                            self.close(DialogResult::Cancelled);
                        }
                        ui.horizontal(|ui| {
                            if ui.button("Confirm").clicked() {
                                self.close(DialogResult::Confirmed);
                            }
                            if ui.button("Cancel").clicked() {
                                self.close(DialogResult::Cancelled);
                            }
                        });
                    }
                    DialogPurpose::Info => {
                        if enter || escape || ui.button("Ok").clicked() {
                            self.close(DialogResult::Confirmed);
                        }
                    }
                }
            });
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_dialog_yields_action_once() {
        let mut dialog = DialogPopup::new_confirm("End the flight?", AppAction::EndFlight);
        dialog.close(DialogResult::Confirmed);
        assert!(!dialog.open);
        assert_eq!(dialog.take_action(), Some(AppAction::EndFlight));
        assert_eq!(dialog.take_action(), None);
    }

    #[test]
    fn test_cancelled_and_info_dialogs_yield_nothing() {
        let mut dialog = DialogPopup::new_confirm("End the flight?", AppAction::EndFlight);
        dialog.close(DialogResult::Cancelled);
        assert_eq!(dialog.take_action(), None);

        let mut info = DialogPopup::new_info_with_title("Time Warp", "Cannot time warp.");
        info.close(DialogResult::Confirmed);
        assert_eq!(info.take_action(), None);
        assert_eq!(info.title.as_deref(), Some("Time Warp"));
    }
}
