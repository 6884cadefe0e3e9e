use std::time::Duration;

use eframe::egui;

use crate::chat::ChatController;
use crate::storage::KeyValueStore;

use super::components::header::{self, HeaderAction};
use super::components::{chat_area, input_bar, login, sidebar};
use super::state::UiState;

/// Timers fire off-frame, so the UI repaints on its own at this pace.
const REPAINT_INTERVAL: Duration = Duration::from_millis(250);

pub struct ChatApp<S> {
    state: UiState,
    controller: ChatController<S>,
}

impl<S: KeyValueStore> ChatApp<S> {
    pub fn new(_cc: &eframe::CreationContext<'_>, controller: ChatController<S>) -> Self {
        Self {
            state: UiState::new(),
            controller,
        }
    }

    fn render_login(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(username) = login::render(ui, &mut self.state.username_input) {
                self.controller.login(&username);
                self.state.reset();
            }
        });
    }

    fn render_chat(&mut self, ctx: &egui::Context, current_user: &str) {
        egui::TopBottomPanel::top("chat_header").show(ctx, |ui| {
            match header::render(ui, current_user) {
                Some(HeaderAction::ClearChat) => self.controller.clear_chat(),
                Some(HeaderAction::Logout) => {
                    self.controller.logout();
                    self.state.reset();
                }
                None => {}
            }
        });

        egui::SidePanel::left("online_users")
            .resizable(true)
            .default_width(180.0)
            .show(ctx, |ui| {
                sidebar::render(ui, self.controller.online_users(), current_user);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, self.controller.messages(), current_user);

            ui.separator();
            if let Some(content) = input_bar::render(ui, &mut self.state.input_text) {
                self.controller.send_message(&content);
            }
        });
    }
}

impl<S: KeyValueStore> eframe::App for ChatApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll_simulation();

        match self.controller.current_user().map(str::to_string) {
            Some(current_user) => self.render_chat(ctx, &current_user),
            None => self.render_login(ctx),
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
