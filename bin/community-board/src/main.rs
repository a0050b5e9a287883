//! # Community Board Binary
//!
//! A terminal front end: reads one command per line from stdin, drives the
//! core, and prints the resulting screen as JSON.

mod commands;
mod settings;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use cb_core::Community;
use cb_surfaces_local::{ClipboardShare, FallbackShare, LogReportSink};
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, Surfaces};

fn init_tracing(settings: &settings::Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if settings.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = settings::load()?;
    init_tracing(&settings);

    // No native share sheet in a terminal; everything lands on the clipboard.
    let share = FallbackShare::new(None, ClipboardShare::new());
    let report = LogReportSink;
    let surfaces = Surfaces {
        share: &share,
        report: &report,
    };

    let mut community = Community::new(settings.community);
    tracing::info!("community board ready; type `help` for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "! {err}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        let shares = matches!(command, Command::Share(_));

        match commands::apply(&mut community, command, &surfaces) {
            Ok(Some(note)) => writeln!(stdout, "{note}")?,
            Ok(None) => {}
            // The screens never surface these; the operator still sees why.
            Err(err) => writeln!(stdout, "ignored: {err}")?,
        }
        if shares {
            if let Some(text) = share.fallback().contents() {
                writeln!(stdout, "clipboard:\n{text}")?;
            }
        }
        writeln!(
            stdout,
            "{}",
            serde_json::to_string_pretty(&commands::render(&community))?
        )?;
    }

    Ok(())
}
