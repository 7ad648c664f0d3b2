use clap::Parser;
use imkernel::io::{load_image, save_image};
use imkernel::lowlevel::{filter2d_par, gaussian_blur_par};
use imkernel::{
    binarize, filter2d, gaussian_blur, to_grayscale, ImageInfo, Kernel, LumaWeights, Method,
    NiblackParams, PixelBuffer,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "imkernel CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output (spans, thresholds, progress).
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LumaConfig {
    Bt601,
    #[default]
    Bt709,
}

impl From<LumaConfig> for LumaWeights {
    fn from(value: LumaConfig) -> Self {
        match value {
            LumaConfig::Bt601 => LumaWeights::Bt601,
            LumaConfig::Bt709 => LumaWeights::Bt709,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MethodConfig {
    Otsu,
    Huang,
    Niblack,
    Isodata,
}

fn default_blur_size() -> usize {
    9
}

fn default_blur_sigma() -> f64 {
    4.0
}

fn default_window_size() -> usize {
    NiblackParams::default().window_size()
}

fn default_k() -> f64 {
    NiblackParams::default().k()
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum OperationConfig {
    GaussianBlur {
        #[serde(default = "default_blur_size")]
        size: usize,
        #[serde(default = "default_blur_sigma")]
        sigma: f64,
    },
    Sharpen {
        #[serde(default)]
        weights: Option<[f64; 9]>,
    },
    SobelX {
        #[serde(default)]
        weights: Option<[f64; 9]>,
    },
    Kernel {
        width: usize,
        height: usize,
        weights: Vec<f64>,
    },
    Grayscale {
        #[serde(default)]
        weights: LumaConfig,
    },
    Threshold {
        method: MethodConfig,
        #[serde(default = "default_window_size")]
        window_size: usize,
        #[serde(default = "default_k")]
        k: f64,
    },
}

impl OperationConfig {
    fn name(&self) -> &'static str {
        match self {
            OperationConfig::GaussianBlur { .. } => "gaussian_blur",
            OperationConfig::Sharpen { .. } => "sharpen",
            OperationConfig::SobelX { .. } => "sobel_x",
            OperationConfig::Kernel { .. } => "kernel",
            OperationConfig::Grayscale { .. } => "grayscale",
            OperationConfig::Threshold { .. } => "threshold",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    input_path: String,
    output_path: String,
    report_path: Option<String>,
    parallel: bool,
    info: bool,
    operations: Vec<OperationConfig>,
}

#[derive(Debug, Serialize)]
struct InfoRecord {
    width: usize,
    height: usize,
    size_bytes: usize,
    unique_colors: Option<usize>,
    average_color: Option<[u8; 3]>,
    average_brightness: Option<u8>,
}

impl From<ImageInfo> for InfoRecord {
    fn from(value: ImageInfo) -> Self {
        Self {
            width: value.width,
            height: value.height,
            size_bytes: value.size_bytes,
            unique_colors: value.unique_colors,
            average_color: value.average_color.map(|px| [px.r, px.g, px.b]),
            average_brightness: value.average_brightness,
        }
    }
}

#[derive(Debug, Serialize)]
struct StepRecord {
    op: &'static str,
    threshold: Option<u8>,
}

#[derive(Debug, Serialize)]
struct Report {
    input: Option<InfoRecord>,
    output: Option<InfoRecord>,
    steps: Vec<StepRecord>,
}

fn apply_kernel(image: &mut PixelBuffer, kernel: &Kernel, parallel: bool) {
    if parallel {
        filter2d_par(image, kernel);
    } else {
        filter2d(image, kernel);
    }
}

fn run_operation(
    image: &mut PixelBuffer,
    op: &OperationConfig,
    parallel: bool,
) -> Result<Option<u8>, Box<dyn std::error::Error>> {
    match op {
        OperationConfig::GaussianBlur { size, sigma } => {
            if parallel {
                gaussian_blur_par(image, *size, *sigma)?;
            } else {
                gaussian_blur(image, *size, *sigma)?;
            }
        }
        OperationConfig::Sharpen { weights } => {
            let kernel = match weights {
                Some(w) => Kernel::from_3x3(*w)?,
                None => Kernel::sharpen_3x3(),
            };
            apply_kernel(image, &kernel, parallel);
        }
        OperationConfig::SobelX { weights } => {
            let kernel = match weights {
                Some(w) => Kernel::from_3x3(*w)?,
                None => Kernel::sobel_x_3x3(),
            };
            apply_kernel(image, &kernel, parallel);
        }
        OperationConfig::Kernel {
            width,
            height,
            weights,
        } => {
            let kernel = Kernel::new(weights.clone(), *width, *height)?;
            apply_kernel(image, &kernel, parallel);
        }
        OperationConfig::Grayscale { weights } => to_grayscale(image, (*weights).into()),
        OperationConfig::Threshold {
            method,
            window_size,
            k,
        } => {
            let method = match method {
                MethodConfig::Otsu => Method::Otsu,
                MethodConfig::Huang => Method::Huang,
                MethodConfig::Isodata => Method::Isodata,
                MethodConfig::Niblack => Method::Niblack(NiblackParams::new(*window_size, *k)?),
            };
            let mut sink = |percent: u8| tracing::info!(percent, "threshold progress");
            return Ok(binarize(image, method, Some(&mut sink)));
        }
    }
    Ok(None)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("imkernel=info".parse()?)
                    .add_directive("imkernel_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() || config.output_path.is_empty() {
        return Err("input_path and output_path must be set in the config".into());
    }

    let mut image = load_image(&config.input_path)?;
    let input_info = config
        .info
        .then(|| InfoRecord::from(ImageInfo::from_buffer(&image)));

    let mut steps = Vec::with_capacity(config.operations.len());
    for op in &config.operations {
        let _span = tracing::info_span!("operation", op = op.name()).entered();
        let threshold = run_operation(&mut image, op, config.parallel)?;
        steps.push(StepRecord {
            op: op.name(),
            threshold,
        });
    }

    save_image(&image, &config.output_path)?;

    let output_info = config
        .info
        .then(|| InfoRecord::from(ImageInfo::from_buffer(&image)));
    let report = Report {
        input: input_info,
        output: output_info,
        steps,
    };
    let json = serde_json::to_string_pretty(&report)?;

    match config.report_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
