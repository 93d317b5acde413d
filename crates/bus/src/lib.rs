//! Component channel between the hosting application and the widget.
use core_types::{ComponentArgs, ReportSeq};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Debug, Clone, PartialEq)]
pub enum HostCommand {
    /// Host render pass: fresh args, possibly identical to the previous ones.
    Render(ComponentArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Widget is connected and listening for renders.
    Ready,
    /// The component's current value: serialized content after a toggle.
    ComponentValue { seq: ReportSeq, value: String },
    /// A click hit markup that breaks the toggle contract.
    Error { message: String },
}

/// Where the widget reports its value. Reporting is fire-and-forget; a vanished host is
/// not the widget's problem.
pub trait ValueSink {
    fn set_component_value(&mut self, seq: ReportSeq, value: String);
}

impl ValueSink for Vec<(ReportSeq, String)> {
    fn set_component_value(&mut self, seq: ReportSeq, value: String) {
        self.push((seq, value));
    }
}

/// Host side of the channel.
pub struct HostEnd {
    pub cmd_tx: Sender<HostCommand>,
    pub evt_rx: Receiver<WidgetEvent>,
}

/// Widget side of the channel.
pub struct WidgetEnd {
    pub cmd_rx: Receiver<HostCommand>,
    pub evt_tx: Sender<WidgetEvent>,
}

pub fn connect() -> (HostEnd, WidgetEnd) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (evt_tx, evt_rx) = mpsc::channel();
    (HostEnd { cmd_tx, evt_rx }, WidgetEnd { cmd_rx, evt_tx })
}

impl HostEnd {
    /// Returns `false` once the widget side is gone.
    pub fn render(&self, args: ComponentArgs) -> bool {
        self.cmd_tx.send(HostCommand::Render(args)).is_ok()
    }

    /// Every event received so far, without blocking.
    pub fn drain_events(&self) -> Vec<WidgetEvent> {
        self.evt_rx.try_iter().collect()
    }
}

impl WidgetEnd {
    /// Pending host commands, oldest first. Stops quietly when the host hung up.
    pub fn drain_commands(&self) -> Vec<HostCommand> {
        let mut out = Vec::new();
        loop {
            match self.cmd_rx.try_recv() {
                Ok(cmd) => out.push(cmd),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::debug!(target: "bus", "host command channel closed");
                    break;
                }
            }
        }
        out
    }

    pub fn send(&self, event: WidgetEvent) {
        if self.evt_tx.send(event).is_err() {
            log::warn!(target: "bus", "host is gone; dropping widget event");
        }
    }
}

impl ValueSink for WidgetEnd {
    fn set_component_value(&mut self, seq: ReportSeq, value: String) {
        self.send(WidgetEvent::ComponentValue { seq, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_commands_arrive_in_order() {
        let (host, widget) = connect();
        assert!(host.render(ComponentArgs::new("a", None)));
        assert!(host.render(ComponentArgs::new("b", Some(10.0))));
        assert_eq!(
            widget.drain_commands(),
            vec![
                HostCommand::Render(ComponentArgs::new("a", None)),
                HostCommand::Render(ComponentArgs::new("b", Some(10.0))),
            ]
        );
        assert!(widget.drain_commands().is_empty());
    }

    #[test]
    fn reported_values_reach_the_host() {
        let (host, mut widget) = connect();
        widget.send(WidgetEvent::Ready);
        widget.set_component_value(1, "<b>x</b>".to_string());
        assert_eq!(
            host.drain_events(),
            vec![
                WidgetEvent::Ready,
                WidgetEvent::ComponentValue {
                    seq: 1,
                    value: "<b>x</b>".to_string()
                },
            ]
        );
    }

    #[test]
    fn dropped_host_is_tolerated() {
        let (host, mut widget) = connect();
        drop(host);
        assert!(widget.drain_commands().is_empty());
        widget.set_component_value(1, "x".to_string());
    }
}
