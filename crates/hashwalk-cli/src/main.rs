use anyhow::{Context, Result};
use clap::Parser;
use hashwalk_core::{GeneratorKind, PixelGrid, RenderConfig, RenderRequest, Renderer};
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hashwalk")]
#[command(about = "Render a random-walk density image driven by a hash-based generator")]
struct Args {
    /// JSON render config; explicit flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Image width in pixels [default: 1024]
    #[arg(long)]
    width: Option<usize>,

    /// Image height in pixels [default: 768]
    #[arg(long)]
    height: Option<usize>,

    /// Generator strategy: mum, splitmix, fnv or chacha [default: mum]
    #[arg(long)]
    generator: Option<GeneratorKind>,

    /// Initial generator state [default: 1000]
    #[arg(long)]
    seed: Option<u64>,

    /// Walk length as a multiple of the pixel count [default: 40]
    #[arg(long)]
    steps_per_cell: Option<u32>,

    /// Number of consecutive renders sharing one generator
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Output PNG path; numbered per frame when --frames > 1
    #[arg(long, default_value = "field.png")]
    output: PathBuf,

    /// Print each frame's JSON report to stdout
    #[arg(long)]
    report: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                RenderConfig::from_json_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RenderConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(generator) = self.generator {
            config.generator = generator;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(steps_per_cell) = self.steps_per_cell {
            config.steps_per_cell = steps_per_cell;
        }
        config.validate()?;
        Ok(config)
    }
}

fn frame_path(output: &Path, frame: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "field".to_string());
    let ext = output
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_string());
    output.with_file_name(format!("{stem}-{frame:03}.{ext}"))
}

fn to_image(grid: &PixelGrid) -> Result<RgbImage> {
    let width = u32::try_from(grid.width).context("width exceeds u32")?;
    let height = u32::try_from(grid.height).context("height exceeds u32")?;
    RgbImage::from_raw(width, height, grid.to_rgb_bytes())
        .context("pixel buffer does not match image dimensions")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.resolve_config()?;
    let mut renderer = Renderer::from_config(&config)?;
    let request = RenderRequest::new(config.width, config.height);

    println!(
        "Rendering {}x{} with {} (seed {}, {} steps per cell)",
        config.width, config.height, config.generator, config.seed, config.steps_per_cell
    );

    for frame in 0..args.frames {
        let rendered = renderer.render(request)?;
        let path = frame_path(&args.output, frame, args.frames);
        to_image(&rendered.pixels)?
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(frame, path = %path.display(), "frame written");

        let t = &rendered.report.timings;
        println!(
            "  {}: {} ms (walk {} ms, colorize {} ms)",
            path.display(),
            t.total_us / 1000,
            t.walk_us / 1000,
            t.colorize_us / 1000
        );
        if args.report {
            println!("{}", serde_json::to_string_pretty(&rendered.report)?);
        }
    }

    Ok(())
}
