// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! `shmregion smoke` command - Built-in smoke test.
//!
//! Attaches several regions in this process and checks that values written
//! through one instance are read back through another.

use shmregion_core::SharedRegion;

use super::CommandError;

/// Tally of passed and failed checks.
#[derive(Default)]
struct Checks {
    total: usize,
    failed: usize,
}

impl Checks {
    fn check(&mut self, ok: bool, what: &str) {
        self.total += 1;
        if ok {
            println!("  ✓ {}", what);
        } else {
            self.failed += 1;
            println!("  ✗ {}", what);
        }
    }
}

pub async fn execute() -> Result<(), Box<dyn std::error::Error>> {
    let pid = std::process::id();
    let existing = format!("smoke-{}-a", pid);
    let fresh = format!("smoke-{}-b", pid);
    let missing = format!("smoke-{}-c", pid);

    let mut checks = Checks::default();
    let mut sm1 = SharedRegion::new();
    let mut sm2 = SharedRegion::new();
    let mut sm3 = SharedRegion::new();
    let mut sm4 = SharedRegion::new();
    let mut sm5 = SharedRegion::new();

    println!("Attach:");
    checks.check(sm1.create_new(&existing, 100), "create new region");
    checks.check(sm1.is_attached(), "created region is attached");
    checks.check(sm2.connect(&existing, 100), "connect to existing region");
    checks.check(sm2.is_attached(), "connected region is attached");
    checks.check(
        sm3.connect_or_create(&existing, 100),
        "connect-or-create on existing region",
    );
    checks.check(
        sm4.connect_or_create(&fresh, 100),
        "connect-or-create on new region",
    );
    checks.check(!sm5.connect(&missing, 100), "connect to missing region fails");
    checks.check(!sm5.is_attached(), "failed connect leaves region unattached");

    // Every write below goes through sm1 and is read through sm2.
    if sm1.is_attached() && sm2.is_attached() {
        println!("Round trips:");

        sm1.write_i32(10132, 0);
        checks.check(sm2.read_i32(0) == 10132, "int32");

        sm1.write_byte(10, 0);
        checks.check(sm2.read_byte(0) == 10, "byte");

        sm1.write_bool(true, 0);
        checks.check(sm2.read_bool(0), "bool");

        sm1.write_text("hello world", 0);
        checks.check(sm2.read_text(11, 0) == "hello world", "text");
    }

    for region in [&mut sm1, &mut sm2, &mut sm3, &mut sm4, &mut sm5] {
        region.close();
    }

    println!();
    if checks.failed > 0 {
        return Err(CommandError::SmokeFailed {
            failed: checks.failed,
            total: checks.total,
        }
        .into());
    }

    println!("✓ All {} checks passed", checks.total);
    Ok(())
}
