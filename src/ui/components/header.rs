use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    ClearChat,
    Logout,
}

pub fn render(ui: &mut egui::Ui, current_user: &str) -> Option<HeaderAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading("Chat App");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button(format!("Logout ({current_user})")).clicked() {
                action = Some(HeaderAction::Logout);
            }
            if ui.button("Clear Chat").clicked() {
                action = Some(HeaderAction::ClearChat);
            }
        });
    });
    action
}
