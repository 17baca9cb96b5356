//! Generate the default detection configuration file
//!
//! Creates a JSON config with all default thresholds, ready for tuning

use booth_scan::DetectionConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/detect.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = DetectionConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!(
                "  Smoothing: {}x{} kernel, sigma {}",
                config.preprocessing.blur_kernel_size,
                config.preprocessing.blur_kernel_size,
                config.preprocessing.blur_sigma
            );
            eprintln!(
                "  Edges: Canny ({:.0}, {:.0})",
                config.edges.canny_low_threshold, config.edges.canny_high_threshold
            );
            eprintln!(
                "  Shape filter: area {:.0}px² - {:.0}% of image, aspect {:.2}-{:.2}",
                config.shape_filter.min_area,
                config.shape_filter.max_area_ratio * 100.0,
                config.shape_filter.min_aspect_ratio,
                config.shape_filter.max_aspect_ratio
            );
            eprintln!("  Row gap: {:.1} points", config.labeling.row_gap_threshold);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
