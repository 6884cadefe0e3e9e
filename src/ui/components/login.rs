use eframe::egui;

/// Login form. Returns the trimmed username once submitted.
pub fn render(ui: &mut egui::Ui, username_input: &mut String) -> Option<String> {
    let mut submit = false;
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);
        ui.heading("Welcome to Chat App");
        ui.add_space(16.0);

        let response =
            ui.add(egui::TextEdit::singleline(username_input).hint_text("Enter your username..."));
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        if ui.button("Join Chat").clicked() {
            submit = true;
        }
    });

    let username = username_input.trim();
    if submit && !username.is_empty() {
        return Some(username.to_string());
    }
    None
}
