// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion watch` command - Follow an int32 until Ctrl-C.
//!
//! Polls; there is no change notification across processes.

use std::time::Duration;

use super::{connect, ensure_fits};
use crate::RegionArgs;

pub async fn execute(
    args: &RegionArgs,
    offset: usize,
    interval_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = connect(args)?;
    ensure_fits(&region, offset, 4)?;

    tracing::info!(name = %args.name, offset = offset, interval_ms = interval_ms, "Watching region");

    let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last = None;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let value = region.read_i32(offset);
                if last != Some(value) {
                    println!("{}", value);
                    last = Some(value);
                }
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}
