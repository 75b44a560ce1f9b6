use crate::utils::error::Result;
use crate::utils::validation;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Traveler-frame inputs: proper time elapsed aboard, and speed as a
/// percentage of light speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelParameters {
    pub traveler_years: f64,
    pub speed_percent: f64,
}

impl TravelParameters {
    pub fn new(traveler_years: f64, speed_percent: f64) -> Self {
        Self {
            traveler_years,
            speed_percent,
        }
    }
}

/// When the voyage starts. The default of "now" is supplied by callers at the
/// presentation boundary; the calculator itself never reads the clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartureContext {
    pub departure_date: Option<DateTime<Utc>>,
}

impl DepartureContext {
    pub fn now() -> Self {
        Self {
            departure_date: Some(Utc::now()),
        }
    }

    /// Parse a YYYY-MM-DD date as a midnight-UTC departure.
    pub fn from_iso_date(value: &str) -> Result<Self> {
        let date = validation::validate_iso_date("departure_date", value)?;
        let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default();
        Ok(Self {
            departure_date: Some(date.and_time(midnight).and_utc()),
        })
    }
}

/// Intermediate result of the Earth-elapsed computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthElapsed {
    pub gamma: f64,
    pub earth_years: f64,
}

/// Full outcome of a dilation computation. `return_date` is present only when
/// a departure date was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DilationResult {
    pub gamma: f64,
    pub earth_years: f64,
    pub diff_years: f64,
    pub return_date: Option<DateTime<Utc>>,
}

/// Tone of the generated future-Earth description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrativeStyle {
    Realistic,
    Scifi,
    Humorous,
    Optimistic,
    Neutral,
    Pessimistic,
}

impl NarrativeStyle {
    /// Unknown style names fall back to the realistic default rather than
    /// failing; free-form user input reaches this from the console loop.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "realistic" => Self::Realistic,
            "scifi" | "sci-fi" => Self::Scifi,
            "humorous" => Self::Humorous,
            "optimistic" => Self::Optimistic,
            "neutral" => Self::Neutral,
            "pessimistic" => Self::Pessimistic,
            _ => Self::Realistic,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Realistic => "Provide a realistic, science-based prediction",
            Self::Scifi => "Provide an imaginative science fiction scenario",
            Self::Humorous => "Provide a silly and humorous scenario",
            Self::Optimistic => "Provide a hopeful, optimistic outlook",
            Self::Neutral => "Provide a balanced, neutral outlook",
            Self::Pessimistic => "Provide a cautionary, pessimistic outlook",
        }
    }
}

impl Default for NarrativeStyle {
    fn default() -> Self {
        Self::Realistic
    }
}

impl std::fmt::Display for NarrativeStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Realistic => "realistic",
            Self::Scifi => "scifi",
            Self::Humorous => "humorous",
            Self::Optimistic => "optimistic",
            Self::Neutral => "neutral",
            Self::Pessimistic => "pessimistic",
        };
        f.write_str(name)
    }
}

/// Everything one voyage produced: the numeric result plus the optional
/// narrative fetched for the projected future year.
#[derive(Debug, Clone, Serialize)]
pub struct VoyageReport {
    pub label: Option<String>,
    pub params: TravelParameters,
    pub result: DilationResult,
    pub future_year: Option<i64>,
    pub narrative: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_departure_context_from_iso_date() {
        let ctx = DepartureContext::from_iso_date("2024-01-01").unwrap();
        let departure = ctx.departure_date.unwrap();
        assert_eq!(departure.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_departure_context_rejects_bad_date() {
        assert!(DepartureContext::from_iso_date("01/01/2024").is_err());
    }

    #[test]
    fn test_style_parse_known_names() {
        assert_eq!(
            NarrativeStyle::parse_or_default("scifi"),
            NarrativeStyle::Scifi
        );
        assert_eq!(
            NarrativeStyle::parse_or_default("  Pessimistic "),
            NarrativeStyle::Pessimistic
        );
    }

    #[test]
    fn test_style_falls_back_to_realistic() {
        assert_eq!(
            NarrativeStyle::parse_or_default("cyberpunk"),
            NarrativeStyle::Realistic
        );
        assert_eq!(NarrativeStyle::parse_or_default(""), NarrativeStyle::Realistic);
    }
}
