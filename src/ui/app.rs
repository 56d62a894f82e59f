use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};
use crate::session::Session;

use super::components::{chat_area, input_bar, sidebar, welcome};

pub struct ChatApp {
    session: Session,
    event_receiver: mpsc::Receiver<NetworkEvent>,
    username_input: String,
    input_text: String,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        Self {
            session: Session::new(command_sender),
            event_receiver,
            username_input: String::new(),
            input_text: String::new(),
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.session.apply(event);
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();

        if self.session.username().is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                if let Some(name) = welcome::render(ui, &mut self.username_input) {
                    self.session.submit_username(&name);
                }
            });
            ctx.request_repaint();
            return;
        }

        egui::SidePanel::left("channel_sidebar").show(ctx, |ui| {
            sidebar::render(
                ui,
                self.session.username().unwrap_or_default(),
                self.session.active_users(),
                self.session.is_connected(),
            );
        });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            if let Some(content) = input_bar::render(ui, &mut self.input_text) {
                self.session.compose_text(content);
                self.session.send();
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(format!(
                "Chat App ({})",
                self.session.username().unwrap_or_default()
            ));
            ui.separator();
            chat_area::render(ui, self.session.events(), self.session.user_id());
        });

        ctx.request_repaint();
    }
}
