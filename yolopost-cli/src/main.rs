use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use yolopost::{
    load_tensor_f32le, suppress_per_class, DetectConfig, Detection, Detector, DisplayScale,
    LabelTable, RawTensor,
};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "yolopost CLI (JSON config driven)")]
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
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum LayoutConfig {
    #[default]
    AttributeMajor,
    CandidateMajor,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectConfigJson {
    input_size: u32,
    num_classes: usize,
    obj_conf_threshold: f32,
    final_score_threshold: f32,
    min_box_side: f32,
    iou_threshold: f32,
    per_class: bool,
    parallel: bool,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = DetectConfig::default();
        Self {
            input_size: cfg.input_size,
            num_classes: cfg.num_classes,
            obj_conf_threshold: cfg.obj_conf_threshold,
            final_score_threshold: cfg.final_score_threshold,
            min_box_side: cfg.min_box_side,
            iou_threshold: cfg.iou_threshold,
            per_class: false,
            parallel: cfg.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    tensor_path: String,
    layout: LayoutConfig,
    labels_path: Option<String>,
    display_width: Option<u32>,
    display_height: Option<u32>,
    output_path: Option<String>,
    detect: DetectConfigJson,
}

#[derive(Debug, Serialize)]
struct DetectionRecord {
    class_index: usize,
    label: String,
    score: f32,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
}

#[derive(Debug, Serialize)]
struct Output {
    count: usize,
    detections: Vec<DetectionRecord>,
}

fn load_tensor(config: &Config, attributes: usize) -> Result<RawTensor, Box<dyn std::error::Error>> {
    let tensor = load_tensor_f32le(&config.tensor_path, attributes)?;
    Ok(match config.layout {
        LayoutConfig::AttributeMajor => tensor,
        // The loader splits by attribute rows; reinterpret as (N, A) columns.
        LayoutConfig::CandidateMajor => {
            RawTensor::from_candidate_major(tensor.data(), tensor.candidates(), attributes)?
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("yolopost=info".parse()?))
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
    if config.tensor_path.is_empty() {
        return Err("tensor_path must be set in the config".into());
    }

    let detector = Detector::new(DetectConfig {
        input_size: config.detect.input_size,
        num_classes: config.detect.num_classes,
        obj_conf_threshold: config.detect.obj_conf_threshold,
        final_score_threshold: config.detect.final_score_threshold,
        min_box_side: config.detect.min_box_side,
        iou_threshold: config.detect.iou_threshold,
        parallel: config.detect.parallel,
    })?;

    let scale = match (config.display_width, config.display_height) {
        (Some(width), Some(height)) => {
            Some(DisplayScale::new(detector.config().input_size, width, height)?)
        }
        (None, None) => None,
        _ => return Err("display_width and display_height must be set together".into()),
    };
    let labels = match &config.labels_path {
        Some(path) => LabelTable::load(path)?,
        None => LabelTable::default(),
    };

    let tensor = load_tensor(&config, detector.config().attributes())?;
    info!(
        attributes = tensor.attributes(),
        candidates = tensor.candidates(),
        "loaded tensor"
    );

    let detections: Vec<Detection> = if config.detect.per_class {
        let candidates = detector.decode(tensor.view())?;
        suppress_per_class(candidates, detector.config().iou_threshold)
    } else {
        detector.detect(tensor.view())?
    };

    let records: Vec<DetectionRecord> = detections
        .iter()
        .map(|det| {
            let bbox = match &scale {
                Some(scale) => scale.scale_box(&det.bbox),
                None => det.bbox,
            };
            DetectionRecord {
                class_index: det.class_index,
                label: labels.label(det.class_index).to_string(),
                score: det.score,
                left: bbox.left,
                top: bbox.top,
                right: bbox.right,
                bottom: bbox.bottom,
            }
        })
        .collect();
    let output = Output {
        count: records.len(),
        detections: records,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
