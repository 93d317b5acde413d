use egui::Context;

/// An application the platform loop drives once per frame.
pub trait UiApp {
    fn ui(&mut self, ctx: &Context);

    fn window_title(&self) -> String {
        "Toggle Viewer".to_string()
    }
}
