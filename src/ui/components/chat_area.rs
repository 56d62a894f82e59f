use eframe::egui;

use crate::common::ChatEvent;

pub fn render(ui: &mut egui::Ui, events: &[ChatEvent], own_user_id: &str) {
    egui::ScrollArea::vertical()
        .stick_to_bottom(true)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if events.is_empty() {
                ui.label(egui::RichText::new("No messages yet").weak());
                return;
            }
            for event in events {
                render_message(ui, event, own_user_id);
            }
        });
}

fn render_message(ui: &mut egui::Ui, event: &ChatEvent, own_user_id: &str) {
    let sender = if event.user_id == own_user_id {
        "You"
    } else {
        event.username.as_str()
    };

    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(sender).strong());
        ui.label(egui::RichText::new(format_time(&event.timestamp)).weak().small());
    });
    if !event.content.is_empty() {
        ui.label(&event.content);
    }
    if event.image.is_some() {
        ui.label(egui::RichText::new("[image attachment]").weak().italics());
    }
    ui.add_space(6.0);
}

fn format_time(timestamp: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(timestamp) {
        Ok(instant) => instant
            .with_timezone(&chrono::Local)
            .format("%H:%M")
            .to_string(),
        Err(_) => timestamp.to_string(),
    }
}
