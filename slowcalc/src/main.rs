//! SlowCalc - A calculator for the Slow Computer
//!
//! Four-function keypad calculator. `--keys` runs a key script through the
//! same engine without opening a window.

mod app;
mod engine;
mod keypad;
mod number;
mod settings;

use anyhow::{Context as _, Result};
use app::SlowCalcApp;
use clap::Parser;
use eframe::NativeOptions;
use engine::Calculator;
use settings::Settings;
use slowcore::SlowTheme;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slowcalc", version, about = "A calculator for the Slow Computer")]
struct Cli {
    /// Evaluate a key script such as "12+3n=" and print trail and entry
    #[arg(short, long, value_name = "SCRIPT")]
    keys: Option<String>,

    /// Digits accepted while typing an operand
    #[arg(long, value_name = "N")]
    max_digits: Option<usize>,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("slowcalc=info,slowcore=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Feed a key script to `calc`; returns the (trail, entry) displays.
fn run_script(calc: &mut Calculator, script: &str) -> Result<(String, String)> {
    let actions = keypad::parse_keys(script).with_context(|| format!("invalid key script {script:?}"))?;
    for action in actions {
        calc.dispatch(action);
    }
    Ok((calc.trail_text(), calc.entry().to_string()))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Settings::default_path);
    // headless runs read settings but never create them
    let mut settings = if cli.keys.is_some() {
        Settings::load(&config_path)
    } else {
        Settings::load_or_default(&config_path)
    };
    if let Some(n) = cli.max_digits {
        settings.max_digits = n;
    }
    let mut calc = Calculator::new(settings.max_digits);

    if let Some(script) = &cli.keys {
        let (trail, entry) = run_script(&mut calc, script)?;
        println!("{trail}");
        println!("{entry}");
        return Ok(());
    }

    tracing::info!(config = %config_path.display(), max_digits = calc.max_digits(), "starting calculator");

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([settings.window_width, settings.window_height])
        .with_min_inner_size([200.0, 300.0])
        .with_title("calculator");
    if let Some(pos) = slowcore::cascade_position() {
        viewport = viewport.with_position(pos);
    }

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };
    let theme = SlowTheme::default().with_display_font(settings.display_font.clone());

    eframe::run_native(
        "calculator",
        options,
        Box::new(move |cc| {
            theme.apply(&cc.egui_ctx);
            Box::new(SlowCalcApp::new(cc, calc))
        }),
    )
    .map_err(|e| anyhow::anyhow!("calculator window failed: {e}"))
}
