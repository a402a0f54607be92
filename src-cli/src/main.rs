//! Scatter - command-line front end for the scatter plot pipeline
//!
//! Loads a CSV, TSV or JSON record file, lays the records out as a scatter
//! plot, and prints the layout as JSON (or a one-line summary).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use scatter::Viewport;
use scatter_view::{ScatterView, SettingsManager, ViewSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lay out records from a data file as a scatter plot
#[derive(Parser, Clone, Debug)]
#[command(name = "scatter", version)]
#[command(about = "Compute a scatter plot layout from a CSV, TSV or JSON file")]
struct Cli {
    /// Record file (.csv, .tsv or .json)
    file: PathBuf,

    /// Field for the X axis, e.g. property.effort
    #[arg(long)]
    x: Option<String>,

    /// Field for the Y axis
    #[arg(long)]
    y: Option<String>,

    /// Field used to color points by category
    #[arg(long)]
    color: Option<String>,

    /// View settings JSON file; flags override its values
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<f64>,

    /// Print a one-line summary instead of the layout
    #[arg(long)]
    summary: bool,

    /// Pretty-print the layout JSON
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn view_settings(&self) -> anyhow::Result<ViewSettings> {
        let mut settings = match self.settings {
            Some(ref path) => {
                let mut manager = SettingsManager::new(path);
                manager
                    .load_sync()
                    .with_context(|| format!("Failed to load settings from {}", path.display()))?;
                manager.get().clone()
            }
            None => ViewSettings::default(),
        };

        if let Some(ref x) = self.x {
            settings.x_field = Some(x.clone());
        }
        if let Some(ref y) = self.y {
            settings.y_field = Some(y.clone());
        }
        if let Some(ref color) = self.color {
            settings.color_field = Some(color.clone());
        }
        settings.viewport = Viewport::new(
            self.width.unwrap_or(settings.viewport.width),
            self.height.unwrap_or(settings.viewport.height),
        );

        Ok(settings)
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let settings = cli.view_settings()?;

    let source = scatter_data::load_from_file(&cli.file)
        .with_context(|| format!("Failed to load records from {}", cli.file.display()))?;
    tracing::info!(
        source = %source.id,
        records = source.record_count(),
        numeric_columns = ?source.numeric_columns(),
        "loaded records"
    );

    let view = ScatterView::with_records(settings, source.records);

    if cli.summary {
        println!("{}", view.summary());
        for skipped in &view.layout().skip_reasons {
            println!("  skipped {}: {}", skipped.label, skipped.reason);
        }
        return Ok(());
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(view.layout())?
    } else {
        serde_json::to_string(view.layout())?
    };
    println!("{}", json);

    Ok(())
}
