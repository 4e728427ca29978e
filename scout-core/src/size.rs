const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
const STEP: f64 = 1000.0;

/// Render a byte count with decimal units, rounded to two decimals with
/// trailing zeros removed: `1500000` becomes `"1.5 MB"`.
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    let mut rounded = (value * 100.0).round() / 100.0;
    if rounded >= STEP && unit < UNITS.len() - 1 {
        rounded /= STEP;
        unit += 1;
    }

    let formatted = format!("{rounded:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
