use anyhow::Context;
use clap::{Parser, ValueEnum};
use generator::profile::{build_demo_match, GeneratorConfig};
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use gui_bridge::model::VisualizationModel;
use log::info;
use metricaviz::overlay::AnnotationStyle;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::RenderConfig;
use workflow::input::MatchInput;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Clone, Copy, ValueEnum)]
enum Annotation {
    ScoreSummary,
    PassThreat,
}

impl From<Annotation> for AnnotationStyle {
    fn from(value: Annotation) -> Self {
        match value {
            Annotation::ScoreSummary => AnnotationStyle::ScoreSummary,
            Annotation::PassThreat => AnnotationStyle::PassThreat,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Draw Metrica tracking and event data on a pitch")]
struct Args {
    /// Load render settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Tracking frame JSON: {"home": {...}, "away": {...}}
    #[arg(long)]
    tracking: Option<PathBuf>,
    /// Event list JSON
    #[arg(long)]
    events: Option<PathBuf>,
    /// Draw a generated frame and pass sequence instead of loading files
    #[arg(long, default_value_t = false)]
    demo: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Draw player velocity vectors
    #[arg(long, default_value_t = false)]
    velocities: bool,
    /// Label players and events
    #[arg(long, default_value_t = false)]
    annotate: bool,
    #[arg(long, value_enum)]
    annotation: Option<Annotation>,
    #[arg(long, default_value = "pitch.svg")]
    output: PathBuf,
    /// Also write the figure as JSON
    #[arg(long)]
    json: Option<PathBuf>,
    /// Keep serving the figure to the viewer until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        RenderConfig::load(path)?
    } else {
        RenderConfig::default()
    };
    config.frame.include_player_velocities |= args.velocities;
    config.frame.annotate |= args.annotate;
    config.events.annotate |= args.annotate;
    if let Some(annotation) = args.annotation {
        config.events.annotation = annotation.into();
    }

    let input = if args.demo {
        build_demo_match(&GeneratorConfig {
            seed: args.seed,
            dimensions: config.pitch.dimensions,
            ..Default::default()
        })?
    } else {
        MatchInput::load(args.tracking.as_deref(), args.events.as_deref())?
    };

    let runner = Runner::new(config);
    let result = runner.execute(&input)?;

    let svg = runner.to_svg(&result.figure);
    write_output(&args.output, &svg)?;
    if let Some(path) = &args.json {
        let json = result.figure.to_json().context("serializing figure")?;
        write_output(path, &json)?;
    }

    let counts = runner.metrics();
    println!(
        "Rendered {} -> players {}/{}, events {}, drawn {}, skipped {}",
        args.output.display(),
        result.home_players,
        result.away_players,
        result.event_count,
        counts.drawn,
        counts.skipped
    );

    if args.serve {
        let gui_bridge = GuiBridge::new(Arc::new(runner));
        gui_bridge.publish(VisualizationModel::new(result.figure, result.notes));
        gui_bridge.serve(gui_bind_address());
        info!("serving figure (Ctrl+C to stop)");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
