// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion write` command - Write one typed value into a region.

use super::{connect, ensure_fits, CommandError, ValueKind};
use crate::RegionArgs;

pub async fn execute(
    args: &RegionArgs,
    kind: ValueKind,
    value: &str,
    offset: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut region = connect(args)?;

    if let Some(width) = kind.fixed_width() {
        ensure_fits(&region, offset, width)?;
    }

    match kind {
        ValueKind::Int => region.write_i32(parse(kind, value)?, offset),
        ValueKind::Bool => region.write_bool(parse(kind, value)?, offset),
        ValueKind::Byte => region.write_byte(parse(kind, value)?, offset),
        ValueKind::Text => {
            let units = region.try_write_text(value, offset)?;
            tracing::debug!(units = units, encoding = %region.text_encoding(), "Wrote text");
        }
    }

    tracing::info!(name = %args.name, kind = kind.name(), offset = offset, "Value written");
    Ok(())
}

fn parse<T>(kind: ValueKind, value: &str) -> Result<T, CommandError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| CommandError::InvalidValue {
        kind: kind.name(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
