use anyhow::Result;
use log::info;
use std::path::PathBuf;

use chemprep::validator::{validate_prepared_file, ValidationOptions};

/// Validate a prepared table; exits 1 on any failed check
pub fn run(file: PathBuf, min_replicates: Option<usize>) -> Result<()> {
    info!("chemprep Validator");
    info!("==================");
    info!("File: {}", file.display());

    let options = ValidationOptions {
        min_replicates,
        ..ValidationOptions::default()
    };

    match validate_prepared_file(&file, &options) {
        Ok(report) => {
            #[cfg(feature = "colorized_output")]
            {
                println!("{}", report.format_colored());
            }

            #[cfg(not(feature = "colorized_output"))]
            {
                println!("{}", report);
            }

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
