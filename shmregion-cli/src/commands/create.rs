// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion create` command - Create a new region.
//!
//! With `--hold` the region stays alive until Ctrl-C; otherwise it is closed
//! (and unlinked, unless the configuration says otherwise) on exit.

use shmregion_core::SharedRegion;

use crate::RegionArgs;

pub async fn execute(args: &RegionArgs, hold: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(name = %args.name, capacity = args.capacity, "Creating region");

    let mut region = SharedRegion::new();
    region.try_create_new(&args.name, args.capacity)?;

    println!("✓ Created region '{}' ({} bytes)", args.name, args.capacity);

    if hold {
        println!("  Holding region open. Press Ctrl-C to release.");
        tokio::signal::ctrl_c().await?;
        tracing::info!(name = %args.name, "Releasing region");
    } else if region.config().unlink_on_close {
        println!("  Region is removed when this command exits (use --hold to keep it).");
    }

    region.close();
    Ok(())
}
