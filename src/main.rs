use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use bus::{HostCommand, WidgetEvent};
use clap::Parser;
use core_types::ComponentArgs;
use mimalloc::MiMalloc;
use viewer::{CorrectionDocument, ViewerApp};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Show host markup with clickable correction toggles; every toggle prints the edited markup
/// to stdout as one JSON line.
#[derive(Parser)]
#[command(name = "toggle-viewer")]
struct Cli {
    /// JSON file with `{"html": "...", "height": 400}`; a built-in sample is used when omitted
    args: Option<PathBuf>,

    /// Read further renders from stdin, one args JSON object per line
    #[arg(long)]
    stdin_renders: bool,
}

fn sample_args() -> ComponentArgs {
    let mut doc = CorrectionDocument::new();
    doc.push_same(["Yesterday", "I"])
        .push_change("goed", "went")
        .push_same(["to", "the", "market", "and"])
        .push_change("buyed", "bought")
        .push_same(["apples."])
        .end_line()
        .push_same(["The", "seller"])
        .push_change("were", "was")
        .push_same(["very", "kind."])
        .end_paragraph();
    ComponentArgs::new(doc.finish(), None)
}

fn load_args(cli: &Cli) -> Result<ComponentArgs, String> {
    let Some(path) = cli.args.as_ref() else {
        return Ok(sample_args());
    };
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    ComponentArgs::from_json(&raw).map_err(|e| format!("{}: {e}", path.display()))
}

fn print_events(events: std::sync::mpsc::Receiver<WidgetEvent>) {
    let stdout = io::stdout();
    for event in events {
        match event {
            WidgetEvent::Ready => log::info!("widget ready"),
            WidgetEvent::ComponentValue { seq, value } => {
                let line = serde_json::json!({ "seq": seq, "value": value });
                let mut out = stdout.lock();
                if writeln!(out, "{line}").and_then(|_| out.flush()).is_err() {
                    log::warn!("stdout closed; no longer printing values");
                    return;
                }
            }
            WidgetEvent::Error { message } => log::error!("widget: {message}"),
        }
    }
}

fn forward_stdin_renders(commands: std::sync::mpsc::Sender<HostCommand>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        match ComponentArgs::from_json(&line) {
            Ok(args) => {
                if commands.send(HostCommand::Render(args)).is_err() {
                    break;
                }
            }
            Err(err) => log::warn!("ignoring render: {err}"),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let args = match load_args(&cli) {
        Ok(args) => args,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let (host, widget) = bus::connect();
    let bus::HostEnd { cmd_tx, evt_rx } = host;
    thread::spawn(move || print_events(evt_rx));
    // without stdin renders the sender stays here so the widget never sees a hang-up
    let _idle_commands = if cli.stdin_renders {
        thread::spawn(move || forward_stdin_renders(cmd_tx));
        None
    } else {
        Some(cmd_tx)
    };

    let app = ViewerApp::new(&args, widget);
    match platform::run(Box::new(app)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
