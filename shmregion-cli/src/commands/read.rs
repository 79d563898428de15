// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion read` command - Print one typed value from a region.

use super::{connect, ensure_fits, ValueKind};
use crate::RegionArgs;

pub async fn execute(
    args: &RegionArgs,
    kind: ValueKind,
    len: Option<usize>,
    offset: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = connect(args)?;

    if let Some(width) = kind.fixed_width() {
        ensure_fits(&region, offset, width)?;
    }

    match kind {
        ValueKind::Int => println!("{}", region.read_i32(offset)),
        ValueKind::Bool => println!("{}", region.read_bool(offset)),
        ValueKind::Byte => println!("{}", region.read_byte(offset)),
        ValueKind::Text => {
            let width = region.text_encoding().unit_width();
            let units =
                len.unwrap_or_else(|| region.capacity().saturating_sub(offset) / width);
            println!("{}", region.try_read_text(units, offset)?);
        }
    }

    Ok(())
}
