// snazzy-headshot - run a headshot editing session from the command line

use anyhow::{Context, bail};
use clap::Parser;
use snazzy::StudioConfig;
use snazzy::editing::catalog::{self, Category};
use snazzy::editing::raster;
use snazzy::editing::{
    AspectRatio, EchoGenerator, EditOutcome, FrameSpec, GeminiGenerator, ImageData, ImageGenerator,
    Orchestrator, Rect,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a casual photo into a professional headshot", long_about = None)]
struct Args {
    /// Photo to start from (PNG, JPEG or WebP)
    input: Option<PathBuf>,

    /// Edit step to run after the auto-transform; repeatable, runs in order.
    /// preset:<id>, prompt:<text>, kelvin:<K>, light:<degrees>, style,
    /// outpaint:<left>,<top>,<right>,<bottom>, frame:<W:H>, undo, redo,
    /// revert-original, revert-auto
    #[arg(short, long = "step", value_name = "STEP")]
    steps: Vec<Step>,

    /// Style reference image used by later steps
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Where to write the result (defaults to the configured export directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the offline echo generator instead of the hosted model
    #[arg(long)]
    offline: bool,

    /// List the preset catalog and exit
    #[arg(long)]
    list_presets: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// One edit step from the command line
#[derive(Debug, Clone, PartialEq)]
enum Step {
    Preset(String),
    Prompt(String),
    Kelvin(u32),
    Light(f64),
    Style,
    Outpaint { left: u32, top: u32, right: u32, bottom: u32 },
    Frame(AspectRatio),
    Undo,
    Redo,
    RevertOriginal,
    RevertAuto,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once(':') {
            Some((name, value)) => (name, Some(value)),
            None => (s, None),
        };

        match (name, value) {
            ("preset", Some(id)) => Ok(Step::Preset(id.to_string())),
            ("prompt", Some(text)) => Ok(Step::Prompt(text.to_string())),
            ("kelvin", Some(k)) => k
                .parse()
                .map(Step::Kelvin)
                .map_err(|_| format!("invalid temperature: {}", k)),
            ("light", Some(deg)) => deg
                .parse()
                .map(Step::Light)
                .map_err(|_| format!("invalid angle: {}", deg)),
            ("outpaint", Some(margins)) => {
                let values: Vec<u32> = margins
                    .split(',')
                    .map(|m| m.trim().parse())
                    .collect::<Result<_, _>>()
                    .map_err(|_| format!("invalid margins: {}", margins))?;
                match values[..] {
                    [left, top, right, bottom] => Ok(Step::Outpaint { left, top, right, bottom }),
                    _ => Err("outpaint takes four margins: left,top,right,bottom".to_string()),
                }
            }
            ("frame", Some(ratio)) => match AspectRatio::from_str(ratio) {
                Ok(AspectRatio::Free) => Err("frame needs a fixed ratio such as 3:4".to_string()),
                Ok(ratio) => Ok(Step::Frame(ratio)),
                Err(e) => Err(e.to_string()),
            },
            ("style", None) => Ok(Step::Style),
            ("undo", None) => Ok(Step::Undo),
            ("redo", None) => Ok(Step::Redo),
            ("revert-original", None) => Ok(Step::RevertOriginal),
            ("revert-auto", None) => Ok(Step::RevertAuto),
            _ => Err(format!("unknown step: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry the API key
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("✓ Loaded .env file from: {}", path.display());
    }

    let args = Args::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("snazzy={},snazzy_headshot={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if args.list_presets {
        print_presets();
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        bail!("no input photo given (see --help)");
    };

    let config = StudioConfig::load(args.config.as_deref()).context("loading config")?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.output_dir.clone());

    let generator: Arc<dyn ImageGenerator> = if args.offline {
        Arc::new(EchoGenerator::new())
    } else {
        Arc::new(GeminiGenerator::from_env(config.generator.clone())?)
    };
    tracing::info!("Using generator: {}", generator.name());

    let orchestrator = Orchestrator::new(config, generator);

    let photo = read_image(input).await?;
    report(orchestrator.upload(photo).await?, "auto-transform");

    if let Some(reference) = args.reference.as_deref() {
        orchestrator
            .set_style_reference(read_image(reference).await?)
            .await?;
        tracing::info!("Style reference: {}", reference.display());
    }

    for step in &args.steps {
        run_step(&orchestrator, step).await?;
    }

    let Some(download) = orchestrator.download().await else {
        bail!("session ended without an image");
    };
    tokio::fs::create_dir_all(&output_dir).await?;
    let path = output_dir.join(&download.file_name);
    tokio::fs::write(&path, download.bytes())
        .await
        .with_context(|| format!("writing {}", path.display()))?;

    println!("{}", path.display());
    Ok(())
}

async fn run_step(orchestrator: &Orchestrator, step: &Step) -> anyhow::Result<()> {
    tracing::debug!("Step: {:?}", step);
    match step {
        Step::Preset(id) => report(orchestrator.apply_preset(id).await?, id),
        Step::Prompt(text) => report(orchestrator.apply_custom(text).await?, "custom edit"),
        Step::Kelvin(k) => report(orchestrator.apply_color_temperature(*k).await?, "temperature"),
        Step::Light(deg) => report(orchestrator.apply_light_direction(*deg).await?, "key light"),
        Step::Style => report(orchestrator.apply_style_reference().await?, "style reference"),
        Step::Outpaint { left, top, right, bottom } => {
            let (width, height) = current_dimensions(orchestrator).await?;
            let frame = margin_frame(width, height, *left, *top, *right, *bottom);
            report(orchestrator.outpaint(&frame).await?, "outpaint");
        }
        Step::Frame(ratio) => {
            let (width, height) = current_dimensions(orchestrator).await?;
            let frame = ratio_frame(width, height, *ratio);
            report(orchestrator.outpaint(&frame).await?, "reframe");
        }
        Step::Undo => history_step(orchestrator.undo().await, "undo"),
        Step::Redo => history_step(orchestrator.redo().await, "redo"),
        Step::RevertOriginal => history_step(orchestrator.revert_to_original().await, "revert to original"),
        Step::RevertAuto => history_step(orchestrator.revert_to_auto().await, "revert to auto"),
    }
    Ok(())
}

async fn read_image(path: &Path) -> anyhow::Result<ImageData> {
    let mime_type = image::ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .with_context(|| format!("unrecognised image type: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(ImageData::new(mime_type, bytes))
}

async fn current_dimensions(orchestrator: &Orchestrator) -> anyhow::Result<(u32, u32)> {
    let current = orchestrator
        .current_image()
        .await
        .context("no image to reframe")?;
    Ok(raster::dimensions(&current)?)
}

/// Frame that grows the image by fixed margins, in native pixels
fn margin_frame(width: u32, height: u32, left: u32, top: u32, right: u32, bottom: u32) -> FrameSpec {
    let (width, height) = (width as f64, height as f64);
    let (left, top, right, bottom) = (left as f64, top as f64, right as f64, bottom as f64);
    let placement = Rect::new(0.0, 0.0, width, height);
    let frame = Rect::new(-left, -top, width + left + right, height + top + bottom);
    FrameSpec::new(frame, placement, AspectRatio::Free)
}

/// Smallest frame with the given ratio that still contains the whole image, centred on it
fn ratio_frame(width: u32, height: u32, ratio: AspectRatio) -> FrameSpec {
    let (w, h) = (width as f64, height as f64);
    let r = ratio.value().unwrap_or(w / h);
    let (frame_w, frame_h) = if w / h < r { (h * r, h) } else { (w, w / r) };
    let placement = Rect::new(0.0, 0.0, w, h);
    let frame = Rect::new(-(frame_w - w) / 2.0, -(frame_h - h) / 2.0, frame_w, frame_h);
    FrameSpec::new(frame, placement, ratio)
}

fn report(outcome: EditOutcome, what: &str) {
    match outcome {
        EditOutcome::Applied { cursor } => tracing::info!("✓ {} (history position {})", what, cursor),
        EditOutcome::Discarded => tracing::warn!("{} was discarded", what),
    }
}

fn history_step(changed: bool, what: &str) {
    if changed {
        tracing::info!("✓ {}", what);
    } else {
        tracing::warn!("Nothing to {}", what);
    }
}

fn print_presets() {
    for category in Category::ALL {
        println!("{}", category.as_str());
        for preset in catalog::by_category(category) {
            println!("  {:<20} {}", preset.id, preset.label);
        }
    }
    println!();
    println!(
        "Temperature: kelvin:{}..{} (default {})",
        catalog::KELVIN_MIN,
        catalog::KELVIN_MAX,
        catalog::KELVIN_DEFAULT
    );
    println!("Key light: light:<degrees>, 0 = top, clockwise");
}
