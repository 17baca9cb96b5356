//! Command-line interface for booth_scan
//!
//! Detects booths in a floor-plan image and prints the result as JSON.
//! Set `RUST_LOG=booth_scan=debug` to see per-stage counts.

use booth_scan::{BoothDetector, DebugOutput, DetectionConfig, DetectionResult};
use std::{env, fs, path::{Path, PathBuf}, process};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();

    let mut debug_output_dir = None;
    let mut config_path = None;
    let mut image_path_arg = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" => {
                // Optional directory argument, unless the next arg is the image itself
                let next_is_dir = args
                    .get(i + 1)
                    .map(|next| {
                        !next.starts_with("--")
                            && !Path::new(next)
                                .extension()
                                .and_then(|e| e.to_str())
                                .is_some_and(booth_scan::image_loader::is_supported_extension)
                    })
                    .unwrap_or(false);

                if next_is_dir {
                    debug_output_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                } else {
                    debug_output_dir = Some(PathBuf::from("debug"));
                }
            }
            "--config" => match args.get(i + 1) {
                Some(path) => {
                    config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                None => {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let image_path = match image_path_arg {
        Some(path) => PathBuf::from(path),
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let config = match config_path {
        Some(path) => DetectionConfig::from_json_file(&path).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        }),
        None => DetectionConfig::default(),
    };

    let detector = BoothDetector::with_config(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let bytes = fs::read(&image_path).unwrap_or_else(|e| {
        eprintln!("Error: Failed to read '{}': {}", image_path.display(), e);
        process::exit(1);
    });

    let outcome = match &debug_output_dir {
        Some(dir) => detector.detect_debug(&bytes).map(|(result, debug)| {
            save_debug_output(&debug, dir, &image_path);
            result
        }),
        None => detector.detect(&bytes),
    };

    match outcome {
        Ok(result) => print_result(&result),
        Err(error) => {
            eprintln!("Detection failed: {}", error);
            eprintln!("Suggestion: {}", error.user_message());
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Detect exhibition booths on a floor-plan image.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    Load detection thresholds from a JSON file");
    eprintln!("  --debug [DIR]    Save smoothed, edge and overlay images");
    eprintln!("                   Optional: specify output directory (default: debug/)");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} hall.png", program_name);
    eprintln!("  {} --debug hall.png", program_name);
    eprintln!("  {} --config tuned.json --debug out/ hall.jpg", program_name);
}

fn save_debug_output(debug: &DebugOutput, output_dir: &Path, input_path: &Path) {
    if let Err(e) = fs::create_dir_all(output_dir) {
        eprintln!("Warning: Failed to create output directory: {}", e);
        return;
    }

    let base_name = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plan");

    let smoothed_path = output_dir.join(format!("{}_smoothed.png", base_name));
    match debug.smoothed.save(&smoothed_path) {
        Ok(_) => eprintln!("Debug: Saved smoothed image to {}", smoothed_path.display()),
        Err(e) => eprintln!("Warning: Failed to save smoothed image: {}", e),
    }

    let edges_path = output_dir.join(format!("{}_edges.png", base_name));
    match debug.edges.as_image().save(&edges_path) {
        Ok(_) => eprintln!("Debug: Saved edge map to {}", edges_path.display()),
        Err(e) => eprintln!("Warning: Failed to save edge map: {}", e),
    }

    let overlay_path = output_dir.join(format!("{}_overlay.png", base_name));
    match debug.overlay.save(&overlay_path) {
        Ok(_) => eprintln!("Debug: Saved booth overlay to {}", overlay_path.display()),
        Err(e) => eprintln!("Warning: Failed to save booth overlay: {}", e),
    }
}

fn print_result(result: &DetectionResult) {
    match serde_json::to_string_pretty(result) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing result: {}", e);
            process::exit(1);
        }
    }

    eprintln!();
    eprintln!("Detection Summary:");
    eprintln!("  Booths: {}", result.count);
    if let (Some(first), Some(last)) = (result.booths.first(), result.booths.last()) {
        eprintln!("  Range: {} .. {}", first.id, last.id);
    }
    if result.is_empty() {
        eprintln!("  Warning: No booths found. Check contrast or try --debug to inspect edges.");
    }
}
