use clap::Parser;
use integral_ops::dispatch;
use integral_ops::io::load_dyn_image;
use integral_ops::{DynImage, IntegralKernel, Rect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Integral image block-kernel CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
struct BlockJson {
    x0: isize,
    y0: isize,
    x1: isize,
    y1: isize,
    #[serde(default = "unit_scale")]
    scale: i32,
}

fn unit_scale() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
struct BorderJson {
    x: usize,
    y: usize,
}

#[derive(Debug, Deserialize)]
struct PointJson {
    x: isize,
    y: isize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    kernel: Vec<BlockJson>,
    /// Two-zone convolution when set; the kernel's own border when `auto_border`.
    border: Option<BorderJson>,
    auto_border: bool,
    parallel: bool,
    points: Vec<PointJson>,
}

#[derive(Debug, Serialize)]
struct ResponseStats {
    min: f64,
    max: f64,
    mean: f64,
}

#[derive(Debug, Serialize)]
struct PointRecord {
    x: isize,
    y: isize,
    response: f64,
}

#[derive(Debug, Serialize)]
struct Output {
    width: usize,
    height: usize,
    pixel_kind: String,
    accumulator_kind: String,
    total_sum: f64,
    response: ResponseStats,
    points: Vec<PointRecord>,
}

fn build_kernel(blocks: &[BlockJson]) -> Result<IntegralKernel, Box<dyn std::error::Error>> {
    let kernel = IntegralKernel::from_pairs(
        blocks
            .iter()
            .map(|b| (Rect::new(b.x0, b.y0, b.x1, b.y1), b.scale)),
    )?;
    Ok(kernel)
}

/// Border for the two-zone path, or `None` for the full zero-border path.
///
/// A requested border narrower than the kernel's own would send blocks past
/// the image edge on the unchecked path, so it is rejected.
fn resolve_border(
    config: &Config,
    kernel: &IntegralKernel,
) -> Result<Option<(usize, usize)>, String> {
    let min = kernel.border();
    if config.auto_border {
        return Ok(Some((min.x, min.y)));
    }
    match &config.border {
        Some(b) if b.x < min.x || b.y < min.y => Err(format!(
            "border {}x{} is smaller than the kernel border {}x{}",
            b.x, b.y, min.x, min.y
        )),
        Some(b) => Ok(Some((b.x, b.y))),
        None => Ok(None),
    }
}

fn response_stats(response: &DynImage) -> ResponseStats {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for y in 0..response.height() {
        for x in 0..response.width() {
            if let Some(value) = response.get_f64(x, y) {
                min = min.min(value);
                max = max.max(value);
                sum += value;
            }
        }
    }
    let count = (response.width() * response.height()) as f64;
    ResponseStats {
        min,
        max,
        mean: sum / count,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("integral_ops=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }
    let kernel = build_kernel(&config.kernel)?;
    let border = resolve_border(&config, &kernel)?;

    let image = load_dyn_image(&config.image_path)?;
    let (width, height) = (image.width(), image.height());
    let acc_kind = image
        .kind()
        .accumulator()
        .ok_or("image pixel kind has no accumulator")?;

    let mut table = DynImage::zeros(acc_kind, width, height)?;
    if config.parallel {
        dispatch::transform_par(image.view(), table.view_mut())?;
    } else {
        dispatch::transform(image.view(), table.view_mut())?;
    }
    let total_sum = dispatch::block_unsafe(table.view(), 0, 0, width, height)?.to_f64();

    let mut response = DynImage::zeros(acc_kind, width, height)?;
    match (border, config.parallel) {
        (Some((bx, by)), true) => {
            dispatch::convolve_border_par(table.view(), &kernel, response.view_mut(), bx, by)?
        }
        (Some((bx, by)), false) => {
            dispatch::convolve_border(table.view(), &kernel, response.view_mut(), bx, by)?
        }
        (None, true) => dispatch::convolve_par(table.view(), &kernel, response.view_mut())?,
        (None, false) => dispatch::convolve(table.view(), &kernel, response.view_mut())?,
    }
    tracing::info!(width, height, blocks = kernel.len(), "response computed");

    let points = config
        .points
        .iter()
        .map(|p| {
            dispatch::convolve_sparse(table.view(), &kernel, p.x, p.y).map(|value| PointRecord {
                x: p.x,
                y: p.y,
                response: value.to_f64(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let output = Output {
        width,
        height,
        pixel_kind: image.kind().to_string(),
        accumulator_kind: acc_kind.to_string(),
        total_sum,
        response: response_stats(&response),
        points,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
