use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{LevelFilter, error, info};
use std::path::{Path, PathBuf};

use crate::analyzer::log_loader::{load_tabular, read_log_file};
use crate::config::RenderConfig;
use crate::pipeline::{LOG_OUTPUT, PipelineOutput, TABLE_OUTPUT, run_log_pipeline, run_tabular_pipeline};

mod analyzer;
mod config;
mod error;
mod pipeline;
mod render;
mod ui;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plot powerset construction benchmark results")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Only log warnings and errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse from()/from_old() benchmark output and plot both implementations
    Log(RenderArgs),
    /// Plot duration against character count from a CSV table
    Table(RenderArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input file; a file dialog opens when omitted
    input: Option<PathBuf>,

    /// TOML render configuration (defaults to ./bench-viz.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to save the chart image
    #[arg(long)]
    output: Option<PathBuf>,

    /// Rendering resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    /// Save the chart without opening a window
    #[arg(long)]
    no_show: bool,
}

impl RenderArgs {
    /// Config file values with command-line flags applied on top.
    fn render_config(&self) -> anyhow::Result<RenderConfig> {
        let mut config = RenderConfig::resolve(self.config.as_deref()).map_err(anyhow::Error::msg)?;
        if let Some(output) = &self.output {
            config.output_path = Some(output.clone());
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if self.no_show {
            config.show_interactive = false;
        }
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    fn input_or_pick(&self, filter_name: &str, extensions: &[&str]) -> anyhow::Result<PathBuf> {
        if let Some(input) = &self.input {
            return Ok(input.clone());
        }
        rfd::FileDialog::new()
            .add_filter(filter_name, extensions)
            .add_filter("All files", &["*"])
            .pick_file()
            .context("No input file selected")
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Log(args) => {
            let config = args.render_config()?;
            let input = args.input_or_pick("Benchmark logs", &["log", "txt"])?;
            info!("Reading benchmark log {}", input.display());
            let text = read_log_file(&input)?;
            let output = run_log_pipeline(&text, config.dpi).context("Text-log pipeline failed")?;
            finish(&output, &config, LOG_OUTPUT)
        }
        Command::Table(args) => {
            let config = args.render_config()?;
            let input = args.input_or_pick("CSV tables", &["csv"])?;
            info!("Reading benchmark table {}", input.display());
            let records = load_tabular(&input)?;
            let output = run_tabular_pipeline(&records, config.dpi).context("Tabular pipeline failed")?;
            finish(&output, &config, TABLE_OUTPUT)
        }
    }
}

/// Save the chart, print the summary and optionally show the window.
fn finish(output: &PipelineOutput, config: &RenderConfig, default_path: &str) -> anyhow::Result<()> {
    let path = config.output_path_or(default_path);
    save_figure(output, &path)?;
    println!("{}", output.summary);

    if config.show_interactive {
        ui::show(output)?;
    }
    Ok(())
}

fn save_figure(output: &PipelineOutput, path: &Path) -> anyhow::Result<()> {
    output.figure.save_png(path).context("Saving chart failed")?;
    let (width, height) = output.figure.size();
    info!("Plot saved as '{}' ({}x{})", path.display(), width, height);
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // Logging setup
    let crate_level = if cli.quiet { LevelFilter::Warn } else { LevelFilter::Debug };
    Builder::new()
        .filter_level(if cli.quiet { LevelFilter::Warn } else { LevelFilter::Info })
        .filter(Some("powerset_bench_viz"), crate_level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_command() {
        let cli = Cli::try_parse_from(["powerset-bench-viz", "log", "bench.log", "--dpi", "200", "--no-show"]).unwrap();
        let Command::Log(args) = cli.command else {
            panic!("Expected log command");
        };
        assert_eq!(args.input, Some(PathBuf::from("bench.log")));
        assert_eq!(args.dpi, Some(200));
        assert!(args.no_show);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "powerset-bench-viz",
            "table",
            "data.csv",
            "--output",
            "out.png",
            "--dpi",
            "300",
            "--no-show",
        ])
        .unwrap();
        let Command::Table(args) = cli.command else {
            panic!("Expected table command");
        };
        let config = args.render_config().unwrap();
        assert_eq!(config.output_path, Some(PathBuf::from("out.png")));
        assert_eq!(config.dpi, 300);
        assert!(!config.show_interactive);
    }

    #[test]
    fn test_out_of_range_dpi_flag_rejected() {
        let cli = Cli::try_parse_from(["powerset-bench-viz", "log", "x.log", "--dpi", "0"]).unwrap();
        let Command::Log(args) = cli.command else {
            panic!("Expected log command");
        };
        assert!(args.render_config().is_err());
    }
}
