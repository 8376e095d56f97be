// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Human-readable byte sizes.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Format a byte count as `"512 B"`, `"1.5 KB"`, `"3.25 MB"`, `"1.00 GB"`.
///
/// The unit is the largest power of 1024 not exceeding `bytes`, capped at GB.
/// Bytes print as an integer, KB with one decimal, MB and GB with two.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    // floor(log1024(bytes)), computed without floating point so exact
    // powers of 1024 land in the right unit.
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit < UNITS.len() - 1 && bytes / divisor >= STEP {
        divisor *= STEP;
        unit += 1;
    }

    let value = bytes as f64 / divisor as f64;
    match unit {
        0 => format!("{} {}", bytes, UNITS[0]),
        1 => format!("{:.1} {}", value, UNITS[1]),
        _ => format!("{:.2} {}", value, UNITS[unit]),
    }
}
