//! Field extraction over raw weatherstack response text.
//!
//! The response body is never parsed as JSON. Each field is pulled out by
//! locating its key literal and slicing a value span up to the next comma
//! (or end of text for the last field). Failures are silent: an absent key
//! or an unparseable number yields [`ExtractedValue::Missing`], never an
//! error. Callers decide how a missing value renders (NaN, empty string).
//!
//! Keeping the scanning behind [`extract`] means a real parser could be
//! swapped in later without touching any caller.

/// A typed value pulled out of the response, or `Missing` when the key was
/// absent or its span did not parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedValue {
    Float(f64),
    Int(i64),
    Text(String),
    Missing,
}

impl ExtractedValue {
    /// Numeric view: `Missing` becomes NaN, matching the sentinel the
    /// report format expects.
    pub fn as_f64(&self) -> f64 {
        match self {
            ExtractedValue::Float(v) => *v,
            #[allow(clippy::cast_precision_loss)]
            ExtractedValue::Int(v) => *v as f64,
            _ => f64::NAN,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ExtractedValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Text view: anything but `Text` becomes the empty string.
    pub fn into_text(self) -> String {
        match self {
            ExtractedValue::Text(s) => s,
            _ => String::new(),
        }
    }
}

/// What to parse the value span into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Int,
    Text,
}

/// How the value span is computed relative to the key literal.
///
/// Two rules exist because weatherstack fields use two quoting conventions:
/// bare numbers (`"temperature":2,`) and quoted strings, sometimes wrapped
/// in an array (`"weather_descriptions":["Sunny"],`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Span = `[end of key, first comma after the key)`.
    Bare,
    /// Span start = key start + `skip` bytes, span end = comma minus `trim`
    /// bytes. `skip` covers the key plus the opening `"` (or `["`); `trim`
    /// strips the closing `"` (or `"]`). Both are fixed per field.
    Quoted { skip: usize, trim: usize },
}

/// A field's key literal paired with its kind and extraction rule.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub rule: FieldRule,
}

impl FieldSpec {
    const fn bare(key: &'static str, kind: FieldKind) -> Self {
        Self { key, kind, rule: FieldRule::Bare }
    }

    /// Quoted string field: skip = key length + opening quote, trim = 1.
    const fn quoted(key: &'static str) -> Self {
        Self { key, kind: FieldKind::Text, rule: FieldRule::Quoted { skip: key.len() + 1, trim: 1 } }
    }
}

// Bare numeric fields of the `current` object.
pub const TEMPERATURE: FieldSpec = FieldSpec::bare("\"temperature\":", FieldKind::Float);
pub const FEELS_LIKE: FieldSpec = FieldSpec::bare("\"feelslike\":", FieldKind::Float);
pub const WIND_SPEED: FieldSpec = FieldSpec::bare("\"wind_speed\":", FieldKind::Float);
pub const WIND_DEGREE: FieldSpec = FieldSpec::bare("\"wind_degree\":", FieldKind::Float);
pub const PRECIPITATION: FieldSpec = FieldSpec::bare("\"precip\":", FieldKind::Float);
pub const HUMIDITY: FieldSpec = FieldSpec::bare("\"humidity\":", FieldKind::Float);
pub const PRESSURE: FieldSpec = FieldSpec::bare("\"pressure\":", FieldKind::Float);
pub const VISIBILITY: FieldSpec = FieldSpec::bare("\"visibility\":", FieldKind::Float);
pub const CLOUD_COVER: FieldSpec = FieldSpec::bare("\"cloudcover\":", FieldKind::Float);
pub const UV_INDEX: FieldSpec = FieldSpec::bare("\"uv_index\":", FieldKind::Int);

// Quoted string fields of the `location` object. skip/trim per the
// documented response shape, e.g. `"name":"Paris",` gives skip 8, trim 1.
pub const CITY: FieldSpec = FieldSpec::quoted("\"name\":");
pub const REGION: FieldSpec = FieldSpec::quoted("\"region\":");
pub const COUNTRY: FieldSpec = FieldSpec::quoted("\"country\":");
pub const LOCALTIME: FieldSpec = FieldSpec::quoted("\"localtime\":");

/// Array-wrapped description, `"weather_descriptions":["Sunny"],`: the
/// opening `["` costs two extra bytes and the closing `"]` two back.
pub const DESCRIPTION: FieldSpec = FieldSpec {
    key: "\"weather_descriptions\":",
    kind: FieldKind::Text,
    rule: FieldRule::Quoted { skip: "\"weather_descriptions\":".len() + 2, trim: 2 },
};

/// Extract one field from the response text.
///
/// Only the first occurrence of the key is considered. The span ends at the
/// first comma after the key, or at end-of-text when no comma follows, so
/// the last field of a response is still extractable.
pub fn extract(response: &str, spec: &FieldSpec) -> ExtractedValue {
    let Some(key_start) = response.find(spec.key) else {
        return ExtractedValue::Missing;
    };
    let key_end = key_start + spec.key.len();

    let comma = response[key_end..].find(',').map_or(response.len(), |i| key_end + i);

    let (start, end) = match spec.rule {
        FieldRule::Bare => (key_end, comma),
        FieldRule::Quoted { skip, trim } => (key_start + skip, comma.saturating_sub(trim)),
    };

    if start > end {
        return ExtractedValue::Missing;
    }

    // `get` also rejects spans that fall off a UTF-8 char boundary.
    let Some(span) = response.get(start..end) else {
        return ExtractedValue::Missing;
    };

    match spec.kind {
        FieldKind::Float => span.parse::<f64>().map_or(ExtractedValue::Missing, ExtractedValue::Float),
        FieldKind::Int => span.parse::<i64>().map_or(ExtractedValue::Missing, ExtractedValue::Int),
        FieldKind::Text => ExtractedValue::Text(span.to_string()),
    }
}

/// Location is a composite of three independent single-key extractions,
/// each degrading to an empty string on its own.
pub fn extract_location(response: &str) -> String {
    let city = extract(response, &CITY).into_text();
    let region = extract(response, &REGION).into_text();
    let country = extract(response, &COUNTRY).into_text();
    format!("{city}, {region}, {country}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compact body in the field order weatherstack actually returns.
    const SAMPLE: &str = concat!(
        r#"{"request":{"type":"City","query":"Paris","language":"en","unit":"m"},"#,
        r#""location":{"name":"Paris","country":"France","region":"Ile-de-France","#,
        r#""lat":"48.867","lon":"2.333","timezone_id":"Europe/Paris","#,
        r#""localtime":"2023-05-12 14:30","localtime_epoch":1683901800,"utc_offset":"2.0"},"#,
        r#""current":{"temperature":12.5,"weather_code":116,"#,
        r#""weather_descriptions":["Partly cloudy"],"wind_speed":13,"wind_degree":250,"#,
        r#""pressure":1011,"precip":0.2,"humidity":71,"cloudcover":75,"feelslike":11,"#,
        r#""uv_index":4,"visibility":10,"observation_time":"12:30 PM"}}"#,
    );

    #[test]
    fn well_formed_numeric_field() {
        let body = r#"{"temperature":12.5,"humidity":71}"#;
        assert_eq!(extract(body, &TEMPERATURE), ExtractedValue::Float(12.5));
    }

    #[test]
    fn last_field_without_trailing_comma() {
        // No comma after the value: the span runs to end-of-text.
        let body = "\"wind_speed\":4,\"pressure\":1013.2";
        assert_eq!(extract(body, &PRESSURE), ExtractedValue::Float(1013.2));

        // A closing brace lands inside the span and spoils the parse.
        let body = r#"{"wind_speed":4,"pressure":1013}"#;
        assert_eq!(extract(body, &PRESSURE), ExtractedValue::Missing);
    }

    #[test]
    fn absent_key_is_missing_not_error() {
        let body = r#"{"humidity":50}"#;
        assert_eq!(extract(body, &TEMPERATURE), ExtractedValue::Missing);
        assert!(extract(body, &TEMPERATURE).as_f64().is_nan());
        assert_eq!(extract(body, &CITY).into_text(), "");
    }

    #[test]
    fn unparseable_span_is_missing() {
        let body = r#"{"temperature":abc,"humidity":50}"#;
        assert!(extract(body, &TEMPERATURE).as_f64().is_nan());
    }

    #[test]
    fn first_occurrence_wins() {
        let body = r#"{"temperature":1.0,"nested":{"temperature":2.0}}"#;
        assert_eq!(extract(body, &TEMPERATURE), ExtractedValue::Float(1.0));
    }

    #[test]
    fn quoted_field_strips_surrounding_quotes() {
        let body = SAMPLE;
        assert_eq!(extract(body, &CITY), ExtractedValue::Text("Paris".into()));
        assert_eq!(extract(body, &COUNTRY), ExtractedValue::Text("France".into()));
        assert_eq!(extract(body, &REGION), ExtractedValue::Text("Ile-de-France".into()));
        assert_eq!(
            extract(body, &LOCALTIME),
            ExtractedValue::Text("2023-05-12 14:30".into())
        );
    }

    #[test]
    fn array_wrapped_description() {
        let body = SAMPLE;
        assert_eq!(
            extract(body, &DESCRIPTION),
            ExtractedValue::Text("Partly cloudy".into())
        );
    }

    #[test]
    fn empty_quoted_value_is_empty_string_not_missing() {
        let body = r#"{"region":"","country":"France"}"#;
        assert_eq!(extract(body, &REGION), ExtractedValue::Text(String::new()));
    }

    #[test]
    fn location_combines_three_independent_extractions() {
        let body = SAMPLE;
        assert_eq!(extract_location(body), "Paris, Ile-de-France, France");
    }

    #[test]
    fn location_parts_fail_independently() {
        let body = r#"{"name":"Oslo","localtime":"x"}"#;
        assert_eq!(extract_location(body), "Oslo, , ");
    }

    #[test]
    fn integer_field_parses_as_int() {
        let body = SAMPLE;
        assert_eq!(extract(body, &UV_INDEX).as_i64(), Some(4));
        // A fractional uv_index does not parse as an integer.
        let body = r#"{"uv_index":4.5,"x":1}"#;
        assert_eq!(extract(body, &UV_INDEX).as_i64(), None);
    }

    #[test]
    fn truncated_response_stays_silent() {
        // Key found but the text stops mid-value: no comma, so the span
        // runs to end-of-text and the trim eats the last content byte.
        let body = r#"{"location":{"name":"Pa"#;
        assert_eq!(extract(body, &CITY).into_text(), "P");
        assert!(extract(body, &TEMPERATURE).as_f64().is_nan());
    }
}
