use eframe::egui;

use crate::common::ChatMessage;

/// Room kept below the message list for the input bar.
const INPUT_BAR_RESERVE: f32 = 40.0;

/// Height of the message list; never negative, even in a very short window.
fn list_height(available: f32) -> f32 {
    (available - INPUT_BAR_RESERVE).max(0.0)
}

pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], current_user: &str) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .max_height(list_height(ui.available_height()))
        .show(ui, |ui| {
            if messages.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(
                        egui::RichText::new("No messages yet. Start the conversation! 💬").weak(),
                    );
                });
                return;
            }

            for message in messages {
                render_message(ui, message, message.is_from(current_user));
            }
        });
}

fn render_message(ui: &mut egui::Ui, message: &ChatMessage, is_own: bool) {
    let layout = if is_own {
        egui::Layout::top_down(egui::Align::Max)
    } else {
        egui::Layout::top_down(egui::Align::Min)
    };
    let name_color = if is_own {
        egui::Color32::LIGHT_BLUE
    } else {
        egui::Color32::LIGHT_GREEN
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(name_color, egui::RichText::new(&message.username).strong());
                ui.label(egui::RichText::new(&message.timestamp).weak().small());
            });
            ui.label(&message.content);
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_height_leaves_room_for_input() {
        assert_eq!(list_height(500.0), 460.0);
    }

    #[test]
    fn list_height_never_goes_negative() {
        assert_eq!(list_height(25.0), 0.0);
        assert_eq!(list_height(0.0), 0.0);
    }
}
