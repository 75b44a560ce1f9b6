//! TOML voyage plans: several voyages computed in one batch run.

use crate::domain::model::{DepartureContext, NarrativeStyle, TravelParameters};
use crate::domain::ports::NarrativeConfig;
use crate::utils::error::{Result, VoyageError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    pub plan: PlanMeta,
    pub narrative: NarrativeSection,
    pub voyages: Vec<VoyageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeSection {
    pub endpoint: String,
    pub model: Option<String>,
    pub enabled: Option<bool>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoyageEntry {
    pub label: Option<String>,
    pub traveler_years: f64,
    pub speed_percent: f64,
    pub departure_date: Option<String>,
    pub style: Option<NarrativeStyle>,
}

impl VoyageEntry {
    pub fn parameters(&self) -> TravelParameters {
        TravelParameters::new(self.traveler_years, self.speed_percent)
    }

    pub fn departure_context(&self) -> Result<DepartureContext> {
        match &self.departure_date {
            Some(date) => DepartureContext::from_iso_date(date),
            None => Ok(DepartureContext::now()),
        }
    }

    pub fn style(&self) -> NarrativeStyle {
        self.style.unwrap_or_default()
    }
}

impl PlanConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(VoyageError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| VoyageError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` with the environment value; unset variables are
    /// left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn narrative_enabled(&self) -> bool {
        self.narrative.enabled.unwrap_or(true)
    }

    fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("plan.name", &self.plan.name)?;
        validation::validate_url("narrative.endpoint", &self.narrative.endpoint)?;

        if let Some(temperature) = self.narrative.temperature {
            validation::validate_range("narrative.temperature", temperature, 0.0, 2.0)?;
        }

        if self.voyages.is_empty() {
            return Err(VoyageError::MissingConfigError {
                field: "voyages".to_string(),
            });
        }

        for (index, voyage) in self.voyages.iter().enumerate() {
            let field = |name: &str| format!("voyages[{}].{}", index, name);
            validation::validate_positive(&field("traveler_years"), voyage.traveler_years)?;
            validation::validate_speed_percent(&field("speed_percent"), voyage.speed_percent)?;
            if let Some(date) = &voyage.departure_date {
                validation::validate_iso_date(&field("departure_date"), date)?;
            }
        }

        Ok(())
    }
}

impl NarrativeConfig for PlanConfig {
    fn narrative_endpoint(&self) -> &str {
        &self.narrative.endpoint
    }

    fn narrative_model(&self) -> Option<&str> {
        self.narrative.model.as_deref()
    }

    fn request_timeout_secs(&self) -> u64 {
        self.narrative.timeout_seconds.unwrap_or(60)
    }

    fn max_tokens(&self) -> u32 {
        self.narrative.max_tokens.unwrap_or(512)
    }

    fn temperature(&self) -> f32 {
        self.narrative.temperature.unwrap_or(0.8)
    }
}

impl Validate for PlanConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_PLAN: &str = r#"
[plan]
name = "grand-tour"
description = "Three hops at increasing speed"

[narrative]
endpoint = "http://localhost:8000"
max_tokens = 256

[[voyages]]
label = "slow cruise"
traveler_years = 10.0
speed_percent = 50.0

[[voyages]]
label = "photon chaser"
traveler_years = 10.0
speed_percent = 99.999
departure_date = "2030-01-01"
style = "scifi"
"#;

    #[test]
    fn test_parse_basic_plan() {
        let plan = PlanConfig::from_toml_str(BASIC_PLAN).unwrap();

        assert_eq!(plan.plan.name, "grand-tour");
        assert_eq!(plan.voyages.len(), 2);
        assert_eq!(plan.voyages[1].style(), NarrativeStyle::Scifi);
        assert_eq!(plan.max_tokens(), 256);
        assert_eq!(plan.temperature(), 0.8);
        assert!(plan.narrative_enabled());
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_NARRATIVE_ENDPOINT", "https://narrative.test");

        let toml_content = r#"
[plan]
name = "env-test"

[narrative]
endpoint = "${TEST_NARRATIVE_ENDPOINT}"

[[voyages]]
traveler_years = 1.0
speed_percent = 10.0
"#;

        let plan = PlanConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(plan.narrative.endpoint, "https://narrative.test");

        std::env::remove_var("TEST_NARRATIVE_ENDPOINT");
    }

    #[test]
    fn test_validation_rejects_light_speed_voyage() {
        let toml_content = r#"
[plan]
name = "too-fast"

[narrative]
endpoint = "http://localhost:8000"

[[voyages]]
traveler_years = 5.0
speed_percent = 100.0
"#;

        let plan = PlanConfig::from_toml_str(toml_content).unwrap();
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validation_requires_voyages() {
        let toml_content = r#"
voyages = []

[plan]
name = "empty"

[narrative]
endpoint = "http://localhost:8000"
"#;

        let plan = PlanConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            plan.validate(),
            Err(VoyageError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_style_is_a_parse_error() {
        let toml_content = r#"
[plan]
name = "bad-style"

[narrative]
endpoint = "http://localhost:8000"

[[voyages]]
traveler_years = 1.0
speed_percent = 10.0
style = "cyberpunk"
"#;

        assert!(PlanConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_plan_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_PLAN.as_bytes()).unwrap();

        let plan = PlanConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(plan.plan.name, "grand-tour");
    }
}
