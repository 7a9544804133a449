//! Assembly of one current-conditions report from a fetched response body.

use crate::classify::{classify_uv, classify_wind_direction};
use crate::extract::{self, extract, extract_location};

/// Everything the report prints, with failed fields already rendered as
/// their sentinel (NaN for numbers, empty string for text).
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub location: String,
    pub localtime: String,
    pub description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub wind_direction: String,
    pub wind_speed_kmh: f64,
    pub precip_mm: f64,
    pub humidity: f64,
    pub pressure_mb: f64,
    pub visibility_km: f64,
    pub cloud_cover_pct: f64,
    pub uv_label: String,
}

impl CurrentConditions {
    /// Run every extraction over the body unconditionally. No field's
    /// failure affects any other field.
    pub fn from_response(body: &str) -> Self {
        let wind_direction = match extract(body, &extract::WIND_DEGREE) {
            v if v.as_f64().is_nan() => String::new(),
            v => classify_wind_direction(v.as_f64()).to_string(),
        };

        let uv_label = extract(body, &extract::UV_INDEX)
            .as_i64()
            .map(|i| classify_uv(i).to_string())
            .unwrap_or_default();

        Self {
            location: extract_location(body),
            localtime: extract(body, &extract::LOCALTIME).into_text(),
            description: extract(body, &extract::DESCRIPTION).into_text(),
            temperature_c: extract(body, &extract::TEMPERATURE).as_f64(),
            feels_like_c: extract(body, &extract::FEELS_LIKE).as_f64(),
            wind_direction,
            wind_speed_kmh: extract(body, &extract::WIND_SPEED).as_f64(),
            precip_mm: extract(body, &extract::PRECIPITATION).as_f64(),
            humidity: extract(body, &extract::HUMIDITY).as_f64(),
            pressure_mb: extract(body, &extract::PRESSURE).as_f64(),
            visibility_km: extract(body, &extract::VISIBILITY).as_f64(),
            cloud_cover_pct: extract(body, &extract::CLOUD_COVER).as_f64(),
            uv_label,
        }
    }
}
