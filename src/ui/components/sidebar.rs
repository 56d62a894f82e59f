use eframe::egui;

const SERVERS: [&str; 4] = ["General", "Gaming", "Music", "Movies"];
const TEXT_CHANNELS: [&str; 4] = ["general", "random", "music", "gaming"];
const VOICE_CHANNELS: [&str; 3] = ["General", "Gaming", "Music"];

/// Static server/channel rails plus the live presence readout. Only the
/// presence count and connectivity dot are driven by session state.
pub fn render(ui: &mut egui::Ui, username: &str, active_users: Option<u32>, connected: bool) {
    ui.heading("Chatify Server");
    ui.separator();

    ui.label(egui::RichText::new("SERVERS").weak().small());
    for server in SERVERS {
        ui.label(format!("◉ {server}"));
    }
    ui.add_space(8.0);

    ui.label(egui::RichText::new("TEXT CHANNELS").weak().small());
    for channel in TEXT_CHANNELS {
        ui.label(format!("# {channel}"));
    }
    ui.add_space(8.0);

    ui.label(egui::RichText::new("VOICE CHANNELS").weak().small());
    for channel in VOICE_CHANNELS {
        ui.label(format!("🔊 {channel}"));
    }

    ui.separator();
    ui.horizontal(|ui| {
        let (dot, color) = if connected {
            ("●", egui::Color32::GREEN)
        } else {
            ("●", egui::Color32::GRAY)
        };
        ui.colored_label(color, dot);
        ui.label(username);
    });
    match active_users {
        Some(count) => ui.label(format!("Active users: {count}")),
        None => ui.label(egui::RichText::new("Active users: —").weak()),
    };
}
