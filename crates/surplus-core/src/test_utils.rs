//! Series builders shared by unit, integration and API tests

use crate::models::TimePoint;

/// Build a series from `(label, amount)` pairs
pub fn series(points: &[(&str, f64)]) -> Vec<TimePoint> {
    points
        .iter()
        .map(|(label, amount)| TimePoint::new(*label, *amount))
        .collect()
}

/// The sample week (Apr 1 to Apr 7) with its peak on Apr 6
pub fn sample_week() -> Vec<TimePoint> {
    series(&[
        ("Apr 1", 2.3),
        ("Apr 2", 3.1),
        ("Apr 3", 2.8),
        ("Apr 4", 4.2),
        ("Apr 5", 3.6),
        ("Apr 6", 5.9),
        ("Apr 7", 4.8),
    ])
}
