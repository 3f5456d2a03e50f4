use {
    anyhow::{Context, Result, bail},
    base::*,
    posture::{LandmarkPositions, LandmarkSet, PhotoValidationConfig},
    serde::{Deserialize, de::DeserializeOwned},
    std::path::Path,
    xray::{Detection, ImageOrientation, XrayConfig, orientation::MarkerCandidate},
};

/// Detector output for one radiograph.
#[derive(Debug, Deserialize)]
struct XrayRequest {
    detections: Vec<Detection>,
    #[serde(default)]
    markers: Vec<MarkerCandidate>,
    #[serde(default)]
    orientation: Option<ImageOrientation>,
    #[serde(default)]
    config: XrayConfig,
    /// Size of the radiograph the detections came from, when known.
    #[serde(default)]
    image_width: Option<u32>,
    #[serde(default)]
    image_height: Option<u32>,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} xray <detections.json> [standard|flipped|unknown]", program);
    eprintln!("  {} photo <landmarks.json> <width> <height>", program);
    eprintln!("  {} recalc <positions.json> <width> <height>", program);
    eprintln!();
    eprintln!("Prints the analysis as JSON on stdout.");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SCREEN_LOG       log level (debug, info, warn, error, fatal)");
    eprintln!("  SCREEN_LOG_FILE  append log lines to this file instead of stderr");
    std::process::exit(1);
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("cannot read {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("cannot parse {path}"))
}

fn parse_dimension(value: &str, name: &str) -> Result<u32> {
    value
        .parse()
        .with_context(|| format!("{name} must be a whole number of pixels, got {value:?}"))
}

fn parse_orientation(value: &str) -> Result<ImageOrientation> {
    match value.trim().to_ascii_lowercase().as_str() {
        "standard" => Ok(ImageOrientation::Standard),
        "flipped" => Ok(ImageOrientation::Flipped),
        "unknown" => Ok(ImageOrientation::Unknown),
        other => bail!("unknown orientation {other:?}"),
    }
}

fn run(args: &[String]) -> Result<String> {
    let command = args[1].as_str();
    let json = match command {
        "xray" => {
            let request: XrayRequest = read_json(&args[2])?;
            let confirmed = match args.get(3) {
                Some(value) => Some(parse_orientation(value)?),
                None => request.orientation,
            };
            let orientation =
                xray::orientation::resolve_orientation(confirmed, &request.markers);
            let analysis = match (request.image_width, request.image_height) {
                (Some(width), Some(height)) => xray::analyze_image(
                    request.detections,
                    width,
                    height,
                    orientation,
                    &request.config,
                )?,
                _ => xray::analyze(request.detections, orientation, &request.config)?,
            };
            serde_json::to_string_pretty(&analysis)?
        }
        "photo" | "recalc" => {
            if args.len() < 5 {
                bail!("{command} needs a file, a width and a height");
            }
            let width = parse_dimension(&args[3], "width")?;
            let height = parse_dimension(&args[4], "height")?;
            let analysis = if command == "photo" {
                let landmarks: LandmarkSet = read_json(&args[2])?;
                posture::analyze_validated(
                    &landmarks,
                    width,
                    height,
                    &PhotoValidationConfig::default(),
                )?
            } else {
                let positions: LandmarkPositions = read_json(&args[2])?;
                posture::recalculate(&positions, width, height)?
            };
            serde_json::to_string_pretty(&analysis)?
        }
        _ => bail!("unknown command {command:?}"),
    };
    Ok(json)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        usage(&args[0]);
    }

    let level = match level_from_env("SCREEN_LOG") {
        Ok(level) => level,
        Err(error) => {
            eprintln!("{:#}", error);
            std::process::exit(1);
        }
    };
    match std::env::var("SCREEN_LOG_FILE") {
        Ok(path) => {
            if let Err(error) = init_file_logger(&path, level) {
                eprintln!("{:#}", error);
                std::process::exit(1);
            }
        }
        Err(_) => init_stderr_logger(level),
    }

    match run(&args) {
        Ok(json) => println!("{}", json),
        Err(error) => log_fatal!("{} failed: {:#}", args[1], error),
    }
}
