// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 rhythmcache

use std::time::Duration;

const SIZE_UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

/// elapsed time for the closing summary line, leading zero units are left out
pub fn format_elapsed_time(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, mins, secs) = (total / 3600, total / 60 % 60, total % 60);
    let millis = duration.subsec_millis();

    match (hours, mins) {
        (0, 0) => format!("{secs}.{millis:03}s"),
        (0, _) => format!("{mins}m {secs}.{millis:03}s"),
        _ => format!("{hours}h {mins}m {secs}.{millis:03}s"),
    }
}

/// size in the largest binary unit it reaches, plain bytes below 1 KB
pub fn format_size(size: u64) -> String {
    SIZE_UNITS
        .iter()
        .find(|(scale, _)| size >= *scale)
        .map(|(scale, unit)| format!("{:.2} {unit}", size as f64 / *scale as f64))
        .unwrap_or_else(|| format!("{size} bytes"))
}
