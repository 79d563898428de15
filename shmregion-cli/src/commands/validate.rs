// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion validate` command - Validate configuration file.

use shmregion_core::ConfigLoader;

pub async fn execute(file: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(file = %file, "Validating configuration");

    match ConfigLoader::load_file(file) {
        Ok(config) => {
            let shm = &config.shm;
            println!("✓ Configuration is valid");
            println!();
            println!("Region Settings:");
            println!(
                "  Name Prefix:     {}",
                if shm.name_prefix.is_empty() {
                    "(none)"
                } else {
                    shm.name_prefix.as_str()
                }
            );
            println!("  Mode:            {:04o}", shm.mode);
            println!("  Max Capacity:    {} bytes", shm.max_capacity);
            println!("  Unlink on Close: {}", shm.unlink_on_close);
            println!(
                "  Text Encoding:   {} ({} bytes/unit)",
                shm.text_encoding,
                shm.text_encoding.unit_width()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed:");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }
}
