use eframe::egui;

pub fn render(ui: &mut egui::Ui, users: &[String], current_user: &str) {
    ui.heading(format!("Online Users ({})", users.len()));
    ui.separator();

    for user in users {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::GREEN, "●");
            if user == current_user {
                ui.label(egui::RichText::new(format!("{user} (you)")).strong());
            } else {
                ui.label(user);
            }
        });
    }
}
