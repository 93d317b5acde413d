use crate::error::ViewerError;
use crate::render::paint_content;
use crate::widget::HtmlViewer;
use app_api::UiApp;
use bus::{HostCommand, WidgetEnd, WidgetEvent};
use core_types::ComponentArgs;
use egui::{CentralPanel, Color32, Context, TopBottomPanel};
use html::Id;

/// The widget hosted in a window: drains host renders each frame, paints the content and
/// turns clicks into toggles reported over the bus.
pub struct ViewerApp {
    viewer: HtmlViewer,
    widget: WidgetEnd,
    last_error: Option<ViewerError>,
}

impl ViewerApp {
    pub fn new(args: &ComponentArgs, widget: WidgetEnd) -> Self {
        widget.send(WidgetEvent::Ready);
        Self {
            viewer: HtmlViewer::new(args),
            widget,
            last_error: None,
        }
    }

    pub fn viewer(&self) -> &HtmlViewer {
        &self.viewer
    }

    pub fn last_error(&self) -> Option<&ViewerError> {
        self.last_error.as_ref()
    }

    /// Apply every pending host render, oldest first. Returns whether the content was rebuilt.
    pub fn pump_commands(&mut self) -> bool {
        let mut rebuilt = false;
        for cmd in self.widget.drain_commands() {
            match cmd {
                HostCommand::Render(args) => {
                    if self.viewer.sync(&args) {
                        rebuilt = true;
                        self.last_error = None;
                    }
                }
            }
        }
        rebuilt
    }

    pub fn handle_click(&mut self, target: Id) {
        match self.viewer.click(target, &mut self.widget) {
            Ok(_) => {}
            Err(err) => {
                self.widget.send(WidgetEvent::Error {
                    message: err.to_string(),
                });
                self.last_error = Some(err);
            }
        }
    }
}

impl UiApp for ViewerApp {
    fn ui(&mut self, ctx: &Context) {
        if self.pump_commands() {
            ctx.request_repaint();
        }

        TopBottomPanel::bottom("viewer_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Copy as text").clicked() {
                    match self.viewer.plain_text() {
                        Ok(text) => ctx.copy_text(text),
                        Err(err) => log::warn!(target: "viewer", "copy failed: {err}"),
                    }
                }
                if let Some(err) = &self.last_error {
                    ui.colored_label(Color32::RED, err.to_string());
                }
            });
        });

        let clicked = CentralPanel::default()
            .show(ctx, |ui| paint_content(ui, &self.viewer))
            .inner;
        if let Some(target) = clicked {
            self.handle_click(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bus::connect;
    use html::traverse::for_each_element;

    const CAT: &str = r#"<span class="toggle" data-original="cat" data-corrected="dog">cat</span>"#;

    fn first_toggle(app: &ViewerApp) -> Id {
        let mut found = Id::UNSET;
        for_each_element(app.viewer().dom(), &mut |n| {
            if found == Id::UNSET && crate::toggle::is_toggle(n) {
                found = n.id();
            }
        });
        found
    }

    #[test]
    fn ready_is_announced_once() {
        let (host, widget) = connect();
        let _app = ViewerApp::new(&ComponentArgs::new(CAT, None), widget);
        assert_eq!(host.drain_events(), vec![WidgetEvent::Ready]);
    }

    #[test]
    fn clicks_report_over_the_bus() {
        let (host, widget) = connect();
        let mut app = ViewerApp::new(&ComponentArgs::new(CAT, None), widget);
        let span = first_toggle(&app);
        app.handle_click(span);
        let events = host.drain_events();
        assert!(
            matches!(events.as_slice(), [WidgetEvent::Ready, WidgetEvent::ComponentValue { seq: 1, value }] if value.contains(">dog</span>")),
            "unexpected events: {events:?}"
        );
    }

    #[test]
    fn contract_violations_surface_as_error_events() {
        let (host, widget) = connect();
        let mut app = ViewerApp::new(
            &ComponentArgs::new(r#"<span class="toggle">cat</span>"#, None),
            widget,
        );
        let span = first_toggle(&app);
        app.handle_click(span);
        assert!(app.last_error().is_some());
        let events = host.drain_events();
        assert!(
            matches!(events.last(), Some(WidgetEvent::Error { message }) if message.contains("data-original")),
            "unexpected events: {events:?}"
        );
    }

    #[test]
    fn host_renders_are_applied_in_order() {
        let (host, widget) = connect();
        let mut app = ViewerApp::new(&ComponentArgs::new(CAT, None), widget);
        app.handle_click(first_toggle(&app));

        assert!(host.render(ComponentArgs::new(CAT, Some(250.0))));
        assert!(host.render(ComponentArgs::new("<p>fresh</p>", Some(250.0))));
        assert!(app.pump_commands());
        assert_eq!(app.viewer().height_px(), 250.0);
        assert_eq!(
            app.viewer().reported_value().expect("container"),
            "<p>fresh</p>"
        );
        assert!(!app.pump_commands(), "nothing pending");
    }
}
