use crate::core::dilation;
use crate::domain::model::{DepartureContext, NarrativeStyle, TravelParameters, VoyageReport};
use crate::domain::ports::Narrator;
use crate::utils::error::Result;
use chrono::Datelike;
use std::path::Path;

pub fn format_years(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_gamma(value: f64) -> String {
    format!("{:.6}", value)
}

/// Runs one voyage end to end: dilation math, future-year projection, and the
/// narrative call. The engine owns everything the pure calculator must not:
/// logging, the HTTP collaborator, and output formatting.
pub struct VoyageEngine<N: Narrator> {
    narrator: N,
    narrative_enabled: bool,
}

impl<N: Narrator> VoyageEngine<N> {
    pub fn new(narrator: N) -> Self {
        Self {
            narrator,
            narrative_enabled: true,
        }
    }

    pub fn new_with_narrative(narrator: N, enabled: bool) -> Self {
        Self {
            narrator,
            narrative_enabled: enabled,
        }
    }

    pub async fn run(
        &self,
        label: Option<String>,
        params: TravelParameters,
        ctx: DepartureContext,
        style: NarrativeStyle,
    ) -> Result<VoyageReport> {
        tracing::debug!(
            "Computing dilation for {} traveler years at {}% of c",
            params.traveler_years,
            params.speed_percent
        );
        let result = dilation::compute_full(&params, &ctx)?;

        // Projected calendar year the traveler returns to, anchored on the
        // departure year so the whole report stays deterministic.
        let future_year = ctx
            .departure_date
            .map(|departure| departure.year() as i64 + result.diff_years.round() as i64);

        let narrative = match (self.narrative_enabled, future_year) {
            (true, Some(year)) => {
                tracing::info!("Requesting a {} description of Earth in {}", style, year);
                match self.narrator.describe_future(year, style).await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        // The numeric result is still worth reporting.
                        tracing::warn!("Narrative generation failed: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(VoyageReport {
            label,
            params,
            result,
            future_year,
            narrative,
        })
    }
}

/// Console lines for one report: traveler time, Earth time, difference,
/// return date, gamma.
pub fn render_report(report: &VoyageReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(label) = &report.label {
        lines.push(format!("=== {} ===", label));
    }

    lines.push(format!(
        "You travel for {} years at {}% of c.",
        format_years(report.params.traveler_years),
        format_years(report.params.speed_percent)
    ));
    lines.push(format!(
        " → For you: {} years.",
        format_years(report.params.traveler_years)
    ));
    lines.push(format!(
        " → For Earth: {} years.",
        format_years(report.result.earth_years)
    ));
    lines.push(format!(
        " → Difference (Earth - you): {} years.",
        format_years(report.result.diff_years)
    ));
    if let Some(return_date) = report.result.return_date {
        lines.push(format!(
            " → Earth return date (ignoring leap years): {}",
            return_date.format("%Y-%m-%d")
        ));
    }
    lines.push(format!(
        " → Lorentz factor (gamma): {}",
        format_gamma(report.result.gamma)
    ));

    if let Some(narrative) = &report.narrative {
        if let Some(year) = report.future_year {
            lines.push(format!("Future Earth description (year {}):", year));
        } else {
            lines.push("Future Earth description:".to_string());
        }
        lines.push(narrative.clone());
    }

    lines
}

/// Write a report as a plain-text file under `dir`; returns the path written.
pub fn save_report(report: &VoyageReport, dir: &str) -> Result<String> {
    let file_name = match &report.label {
        Some(label) => format!(
            "voyage-{}.txt",
            label.to_lowercase().replace(|c: char| !c.is_alphanumeric(), "-")
        ),
        None => "voyage-report.txt".to_string(),
    };
    let path = Path::new(dir).join(file_name);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render_report(report).join("\n") + "\n")?;

    Ok(path.display().to_string())
}
