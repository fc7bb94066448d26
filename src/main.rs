use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use thermoflora_core::config::HeatModel;
use thermoflora_lib::app::{App, StripRenderer};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How to drive the simulation clock
    #[arg(short, long, value_enum, default_value = "headless")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Simulated seconds to run. Realtime mode runs until Ctrl+C when omitted
    #[arg(short, long)]
    seconds: Option<f64>,

    /// Override the RNG seed from the config
    #[arg(long)]
    seed: Option<u64>,

    /// Override the heat model from the config
    #[arg(long, value_enum)]
    model: Option<ModelArg>,

    /// Print a colored air strip every physics tick
    #[arg(long)]
    strip: bool,

    /// Columns in the air strip
    #[arg(long, default_value_t = 80)]
    columns: usize,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Write the final world snapshot as JSON to this path
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Headless,
    Realtime,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModelArg {
    ThermalBody,
    Shade,
}

impl From<ModelArg> for HeatModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::ThermalBody => HeatModel::ThermalBody,
            ModelArg::Shade => HeatModel::Shade,
        }
    }
}

const DEFAULT_HEADLESS_SECONDS: f64 = 10.0;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    thermoflora_core::init_logging();
    let args = Args::parse();

    let mut config = App::load_config(&args.config)?;
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(model) = args.model {
        config.thermal.heat_model = model.into();
    }

    let mut app = App::new(config)?;
    if args.strip {
        app = app.with_strip(StripRenderer::new(args.columns)?);
    }

    let summary = match args.mode {
        Mode::Headless => app.run_headless(args.seconds.unwrap_or(DEFAULT_HEADLESS_SECONDS))?,
        Mode::Realtime => app.run_realtime(args.seconds).await?,
    };

    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string_pretty(&app.sim.snapshot())?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} slow ticks, {} plants ({} born, {} died), mean air {:.4}, agent at ({:.1}, {:.1})",
            summary.slow_ticks,
            summary.plants,
            summary.births,
            summary.deaths,
            summary.air_mean,
            summary.agent_x,
            summary.agent_y
        );
    }

    Ok(())
}
