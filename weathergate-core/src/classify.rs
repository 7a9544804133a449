//! Pure classification of raw weather numbers into human-readable labels.

use std::fmt;

/// UV risk tier. Bands are fixed: above 5 is high, above 2 is moderate,
/// everything else (including negatives) is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
}

impl UvLevel {
    pub fn advice(&self) -> &'static str {
        match self {
            UvLevel::High => "high! Put on sunscreen!",
            UvLevel::Moderate => "moderate: Sunscreen is recommended",
            UvLevel::Low => "low: Sunscreen is unneeded",
        }
    }
}

impl fmt::Display for UvLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.advice())
    }
}

pub fn classify_uv(index: i64) -> UvLevel {
    if index > 5 {
        UvLevel::High
    } else if index > 2 {
        UvLevel::Moderate
    } else {
        UvLevel::Low
    }
}

/// One of the eight compass sectors, each 45° wide and centered on a
/// cardinal or intercardinal point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassDirection {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl CompassDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassDirection::North => "Northern",
            CompassDirection::Northeast => "Northeastern",
            CompassDirection::East => "Eastern",
            CompassDirection::Southeast => "Southeastern",
            CompassDirection::South => "Southern",
            CompassDirection::Southwest => "Southwestern",
            CompassDirection::West => "Western",
            CompassDirection::Northwest => "Northwestern",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map wind degrees to a compass sector. Membership is
/// `[center - 22.5, center + 22.5)`; the north sector wraps across 360 back to 0.
///
/// Input outside `[0, 360)` is normalized with `rem_euclid(360.0)` first,
/// so 450° reads as 90° and -45° as 315°.
pub fn classify_wind_direction(degrees: f64) -> CompassDirection {
    let deg = degrees.rem_euclid(360.0);

    if deg >= 337.5 || deg < 22.5 {
        CompassDirection::North
    } else if deg < 67.5 {
        CompassDirection::Northeast
    } else if deg < 112.5 {
        CompassDirection::East
    } else if deg < 157.5 {
        CompassDirection::Southeast
    } else if deg < 202.5 {
        CompassDirection::South
    } else if deg < 247.5 {
        CompassDirection::Southwest
    } else if deg < 292.5 {
        CompassDirection::West
    } else {
        CompassDirection::Northwest
    }
}
