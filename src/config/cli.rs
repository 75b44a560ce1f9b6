use crate::domain::model::{DepartureContext, NarrativeStyle, TravelParameters};
use crate::domain::ports::NarrativeConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "time-dilation")]
#[command(about = "Relativistic time-dilation calculator with future-Earth narratives")]
pub struct CliConfig {
    /// Travel time experienced aboard, in years (one-shot mode)
    #[arg(long)]
    pub traveler_years: Option<f64>,

    /// Speed as a percentage of light speed, e.g. 99.999 (one-shot mode)
    #[arg(long)]
    pub speed_percent: Option<f64>,

    /// Departure date as YYYY-MM-DD; defaults to today
    #[arg(long)]
    pub departure: Option<String>,

    /// Narrative style: realistic, scifi, humorous, optimistic, neutral, pessimistic
    #[arg(long, default_value = "realistic")]
    pub style: String,

    /// Base URL of the OpenAI-compatible narrative service
    #[arg(long, default_value = "http://localhost:8000")]
    pub narrative_endpoint: String,

    /// Model name to request; the server default is used when omitted
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long, default_value = "60")]
    pub timeout_secs: u64,

    #[arg(long, default_value = "512")]
    pub max_tokens: u32,

    #[arg(long, default_value = "0.8")]
    pub temperature: f32,

    /// Skip the narrative call and print only the calculation
    #[arg(long)]
    pub offline: bool,

    /// Directory to write a plain-text voyage report into
    #[arg(long)]
    pub save_report: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Both numeric inputs on the command line means one-shot mode; otherwise
    /// the binary drops into the interactive prompt loop.
    pub fn one_shot_parameters(&self) -> Option<TravelParameters> {
        match (self.traveler_years, self.speed_percent) {
            (Some(years), Some(speed)) => Some(TravelParameters::new(years, speed)),
            _ => None,
        }
    }

    pub fn departure_context(&self) -> Result<DepartureContext> {
        match &self.departure {
            Some(date) => DepartureContext::from_iso_date(date),
            None => Ok(DepartureContext::now()),
        }
    }

    pub fn narrative_style(&self) -> NarrativeStyle {
        NarrativeStyle::parse_or_default(&self.style)
    }
}

impl NarrativeConfig for CliConfig {
    fn narrative_endpoint(&self) -> &str {
        &self.narrative_endpoint
    }

    fn narrative_model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("narrative_endpoint", &self.narrative_endpoint)?;
        validation::validate_non_empty_string("style", &self.style)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;

        if let Some(years) = self.traveler_years {
            validation::validate_positive("traveler_years", years)?;
        }
        if let Some(speed) = self.speed_percent {
            validation::validate_speed_percent("speed_percent", speed)?;
        }
        if let Some(date) = &self.departure {
            validation::validate_iso_date("departure", date)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            traveler_years: None,
            speed_percent: None,
            departure: None,
            style: "realistic".to_string(),
            narrative_endpoint: "http://localhost:8000".to_string(),
            model: None,
            timeout_secs: 60,
            max_tokens: 512,
            temperature: 0.8,
            offline: false,
            save_report: None,
            verbose: false,
        }
    }

    #[test]
    fn test_one_shot_requires_both_inputs() {
        let mut config = base_config();
        assert!(config.one_shot_parameters().is_none());

        config.traveler_years = Some(10.0);
        assert!(config.one_shot_parameters().is_none());

        config.speed_percent = Some(99.0);
        let params = config.one_shot_parameters().unwrap();
        assert_eq!(params.traveler_years, 10.0);
        assert_eq!(params.speed_percent, 99.0);
    }

    #[test]
    fn test_validate_rejects_light_speed() {
        let mut config = base_config();
        config.traveler_years = Some(5.0);
        config.speed_percent = Some(100.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_negative_speed() {
        let mut config = base_config();
        config.speed_percent = Some(-10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let mut config = base_config();
        config.narrative_endpoint = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_departure_context_parses_cli_date() {
        let mut config = base_config();
        config.departure = Some("2042-03-15".to_string());
        let ctx = config.departure_context().unwrap();
        assert!(ctx.departure_date.is_some());
    }
}
