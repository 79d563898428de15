// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion info` command - Describe a region.

use super::connect;
use crate::RegionArgs;

pub async fn execute(args: &RegionArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let region = connect(args)?;
    let Some(info) = region.info() else {
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Region Settings:");
    println!("  Name:          {}", info.name);
    println!("  OS Name:       {}", info.os_name);
    println!("  Capacity:      {} bytes", info.capacity);
    println!("  Origin:        {}", info.origin);
    println!("  Text Encoding: {} ({} bytes/unit)", info.text_encoding, info.text_encoding.unit_width());

    Ok(())
}
