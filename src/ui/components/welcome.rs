use eframe::egui;

/// Entry screen: pick a display name before anything connects.
/// Returns the submitted name, if any.
pub fn render(ui: &mut egui::Ui, username_input: &mut String) -> Option<String> {
    let mut submit = false;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.heading("Welcome to Chatify");
        ui.label("Enter your username to start chatting with friends and colleagues");
        ui.add_space(12.0);

        let response = ui.add(
            egui::TextEdit::singleline(username_input)
                .hint_text("Enter your username")
                .desired_width(240.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }

        ui.add_space(8.0);
        let enabled = !username_input.trim().is_empty();
        if ui
            .add_enabled(enabled, egui::Button::new("Start Chatting"))
            .clicked()
        {
            submit = true;
        }
    });

    if submit && !username_input.trim().is_empty() {
        let name = username_input.clone();
        username_input.clear();
        return Some(name);
    }

    None
}
