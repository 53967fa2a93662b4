//! # Jendela - Desktop-style window chrome
//!
//! Command-line driver for the window engine. Loads a configuration,
//! replays a scenario of pointer and button events against a fresh desktop
//! and prints the resulting window views.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use jendela::theme::Theme;
use jendela::{Desktop, JendelaConfig, Scenario, WindowView};

#[derive(Parser)]
#[command(name = "jendela")]
#[command(about = "Draggable, resizable, stackable desktop-style windows")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/jendela/jendela.toml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Scenario to replay (TOML, or JSON with a .json extension)
    #[arg(short, long)]
    scenario: Option<String>,

    /// Print window views as JSON
    #[arg(long)]
    json: bool,

    /// List the named skins and exit
    #[arg(long)]
    themes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    if cli.themes {
        for theme in Theme::NAMED {
            println!("{:<12} {}", theme.name(), theme.skin_class());
        }
        return Ok(());
    }

    info!("🚀 Starting Jendela");
    info!("📄 Version: {}", jendela::VERSION);

    // Load configuration
    let config = match JendelaConfig::load(&cli.config) {
        Ok(config) => {
            info!("✅ Configuration loaded from: {}", cli.config);
            config
        }
        Err(e) => {
            error!("❌ Failed to load configuration: {}", e);
            info!("📝 Using default configuration");
            JendelaConfig::default()
        }
    };

    let mut desktop = Desktop::new(config);
    if let Some(path) = &cli.scenario {
        let scenario = Scenario::load(path)?;
        scenario
            .run(&mut desktop)
            .with_context(|| format!("Replaying {}", path))?;
        info!("✅ Scenario finished at t={}ms", desktop.now().as_millis());
    }

    let views = desktop.views();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print_views(&views);
    }

    info!("👋 Jendela shutting down");
    Ok(())
}

fn print_views(views: &[WindowView]) {
    if views.is_empty() {
        println!("(no windows)");
        return;
    }
    for view in views.iter().rev() {
        let geometry = match view.rect {
            Some(r) => format!("{:>7.1},{:<7.1} {:>6.1}x{:<6.1}", r.left, r.top, r.width, r.height),
            None => format!("{} {} {}x{}", view.left, view.top, view.width, view.height),
        };
        println!(
            "#{:<3} z={:<4} {:<24} {} [{}]",
            view.id,
            view.z_index,
            format!("\"{}\"", view.title),
            geometry,
            view.class_list
        );
    }
}
