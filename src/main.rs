use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use tplt::config::{parse_delimiter, Configuration, OutputFormat};
use tplt::export::{write_csv, write_json, HeatmapReport};
use tplt::header::HeaderMode;
use tplt::{build_heatmap, read_points, render};

#[derive(Parser, Debug)]
#[command(name = "tplt")]
#[command(about = "Plot delimited text from stdin as a terminal heatmap", long_about = None)]
struct Cli {
    /// Field delimiter: a single character, or `\t` / `tab` / `space`
    #[arg(short = 'd', long, global = true, default_value = " ", value_parser = parse_delimiter)]
    delimiter: char,

    /// Always treat the first line as a header row
    #[arg(long, global = true, conflicts_with = "no_header")]
    header: bool,

    /// Never treat the first line as a header row
    #[arg(long, global = true)]
    no_header: bool,

    /// Print the effective options to stderr before reading input
    #[arg(long, global = true)]
    show_options: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bin (x, y[, value]) rows into a grid
    Heatmap(HeatmapArgs),
}

#[derive(Args, Debug)]
struct HeatmapArgs {
    /// [X] [Y] [AGG]: fields as `f<N>` or header names, AGG as count, sum(field) or avg(field)
    #[arg(value_name = "FIELD", num_args = 0..=3)]
    fields: Vec<String>,

    /// Grid width in cells
    #[arg(long, default_value_t = tplt::config::DEFAULT_GRID_WIDTH)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = tplt::config::DEFAULT_GRID_HEIGHT)]
    height: usize,

    /// Append a legend to the terminal heatmap
    #[arg(long)]
    legend: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    format: OutputFormat,
}

fn build_config(cli: &Cli) -> Result<Configuration> {
    let Command::Heatmap(args) = &cli.command;

    let header_mode = if cli.header {
        HeaderMode::ForceOn
    } else if cli.no_header {
        HeaderMode::ForceOff
    } else {
        HeaderMode::Auto
    };

    let config = Configuration {
        delimiter: cli.delimiter,
        header_mode,
        format: args.format,
        legend: args.legend,
        ..Configuration::default()
    };

    config
        .with_positionals(&args.fields)?
        .with_grid_size(args.width, args.height)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = build_config(&cli).context("Invalid options")?;
    log::debug!("Configuration: {:?}", config);
    if cli.show_options {
        eprintln!("{}", config);
    }

    let stdin = io::stdin();
    let data = read_points(&config, stdin.lock()).context("Failed to read data from stdin")?;
    if data.is_empty() {
        bail!("No valid data points found in input");
    }

    let grid = build_heatmap(
        &data.points,
        config.grid_width,
        config.grid_height,
        config.aggregation.function,
    )?;
    let header = data.header;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match config.format {
        OutputFormat::Terminal => {
            let label = config.aggregation.to_string();
            let legend = config.legend.then_some(label.as_str());
            render::render_heatmap(&mut handle, &grid, legend)?;
        }
        OutputFormat::Csv => write_csv(&mut handle, &grid)?,
        OutputFormat::Json => {
            let report = HeatmapReport::new(&grid, &config.aggregation, &header);
            write_json(&mut handle, &report)?;
        }
    }
    handle.flush().context("Failed to flush stdout")?;

    Ok(())
}
