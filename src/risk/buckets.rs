//! Static lookup tables mapping rainfall and elevation readings to points.
//!
//! Each table is a list of lower bounds in ascending order. A reading falls
//! into the last bucket whose lower bound it reaches, so every bucket is
//! closed-open except the final one, which is unbounded above. Readings
//! below the first bound (negative or NaN) clamp into the first bucket.

use serde::{Deserialize, Serialize};

/// A half-open range `[lower, next.lower)` mapped to a fixed point value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    pub lower: f64,
    pub points: f64,
}

impl Bucket {
    const fn new(lower: f64, points: f64) -> Self {
        Self { lower, points }
    }
}

/// Rainfall buckets in millimetres. More rain, more points.
pub const RAINFALL_BUCKETS: [Bucket; 5] = [
    Bucket::new(0.0, 10.0),
    Bucket::new(5.0, 20.0),
    Bucket::new(15.0, 35.0),
    Bucket::new(30.0, 50.0),
    Bucket::new(50.0, 60.0),
];

/// Elevation buckets in metres. Lower ground, more points.
pub const ELEVATION_BUCKETS: [Bucket; 5] = [
    Bucket::new(0.0, 40.0),
    Bucket::new(10.0, 30.0),
    Bucket::new(50.0, 20.0),
    Bucket::new(100.0, 10.0),
    Bucket::new(200.0, 5.0),
];

/// Which reading a bucket lookup was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Rainfall,
    Elevation,
}

impl Factor {
    pub fn table(self) -> &'static [Bucket] {
        match self {
            Factor::Rainfall => &RAINFALL_BUCKETS,
            Factor::Elevation => &ELEVATION_BUCKETS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Factor::Rainfall => "rainfall",
            Factor::Elevation => "elevation",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Factor::Rainfall => "mm",
            Factor::Elevation => "m",
        }
    }
}

/// Index of the bucket `value` falls into.
///
/// NaN and anything below the first bound map to index 0.
pub fn bucket_index(table: &[Bucket], value: f64) -> usize {
    table.iter().rposition(|b| value >= b.lower).unwrap_or(0)
}

/// Points awarded to `value` by `table`.
pub fn points_for(table: &[Bucket], value: f64) -> f64 {
    table
        .get(bucket_index(table, value))
        .map(|b| b.points)
        .unwrap_or(0.0)
}

pub fn rainfall_points(rainfall_mm: f64) -> f64 {
    points_for(&RAINFALL_BUCKETS, rainfall_mm)
}

pub fn elevation_points(elevation_m: f64) -> f64 {
    points_for(&ELEVATION_BUCKETS, elevation_m)
}

/// Human-readable range for the bucket at `index`, e.g. `[5, 15) mm`.
pub fn describe_bucket(factor: Factor, index: usize) -> String {
    let table = factor.table();
    let lower = table.get(index).map(|b| b.lower).unwrap_or(0.0);
    match table.get(index + 1) {
        Some(next) => format!("[{}, {}) {}", lower, next.lower, factor.unit()),
        None => format!("[{}, ∞) {}", lower, factor.unit()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rainfall_buckets_closed_open() {
        assert_eq!(rainfall_points(0.0), 10.0);
        assert_eq!(rainfall_points(4.999), 10.0);
        assert_eq!(rainfall_points(5.0), 20.0);
        assert_eq!(rainfall_points(14.99), 20.0);
        assert_eq!(rainfall_points(15.0), 35.0);
        assert_eq!(rainfall_points(30.0), 50.0);
        assert_eq!(rainfall_points(49.9), 50.0);
        assert_eq!(rainfall_points(50.0), 60.0);
        assert_eq!(rainfall_points(500.0), 60.0);
    }

    #[test]
    fn test_elevation_buckets_inverse() {
        assert_eq!(elevation_points(0.0), 40.0);
        assert_eq!(elevation_points(9.99), 40.0);
        assert_eq!(elevation_points(10.0), 30.0);
        assert_eq!(elevation_points(50.0), 20.0);
        assert_eq!(elevation_points(100.0), 10.0);
        assert_eq!(elevation_points(199.9), 10.0);
        assert_eq!(elevation_points(200.0), 5.0);
        assert_eq!(elevation_points(8848.0), 5.0);
    }

    #[test]
    fn test_invalid_readings_clamp_to_lowest_bucket() {
        assert_eq!(rainfall_points(-3.0), 10.0);
        assert_eq!(rainfall_points(f64::NAN), 10.0);
        assert_eq!(elevation_points(-20.0), 40.0);
        assert_eq!(elevation_points(f64::NAN), 40.0);
    }

    #[test]
    fn test_infinite_readings_clamp_to_outer_buckets() {
        assert_eq!(rainfall_points(f64::INFINITY), 60.0);
        assert_eq!(elevation_points(f64::INFINITY), 5.0);
        assert_eq!(rainfall_points(f64::NEG_INFINITY), 10.0);
    }

    #[test]
    fn test_tables_are_ascending() {
        for table in [&RAINFALL_BUCKETS[..], &ELEVATION_BUCKETS[..]] {
            assert!(table.windows(2).all(|w| w[0].lower < w[1].lower));
            assert_eq!(table[0].lower, 0.0);
        }
    }

    #[test]
    fn test_describe_bucket() {
        assert_eq!(describe_bucket(Factor::Rainfall, 1), "[5, 15) mm");
        assert_eq!(describe_bucket(Factor::Elevation, 4), "[200, ∞) m");
    }
}
