//! Display-label helpers shared by records and snapshots.

const UNITS: [&str; 6] = ["B", "kB", "MB", "GB", "TB", "PB"];

/// Human-readable size label, 1024-based with one decimal ("1.2 MB").
pub fn human_storage_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", size, UNITS[unit])
}

/// Percent label with two decimals ("42.50%").
pub fn progress_label(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
