use clap::Parser;
use std::io::{BufRead, Write};
use time_dilation::core::engine::{self, VoyageEngine};
use time_dilation::utils::error::ErrorSeverity;
use time_dilation::utils::{logger, validation::Validate};
use time_dilation::{
    ChatNarrator, CliConfig, DepartureContext, NarrativeStyle, TravelParameters, VoyageError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting time-dilation CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let narrator = match ChatNarrator::from_config(&config) {
        Ok(narrator) => narrator,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let narrative_enabled = !config.offline;
    if narrative_enabled && !narrator.health_check().await {
        tracing::warn!(
            "⚠️ Narrative service at {} is not answering; results will be shown without descriptions",
            config.narrative_endpoint
        );
    }

    let engine = VoyageEngine::new_with_narrative(narrator, narrative_enabled);

    match config.one_shot_parameters() {
        Some(params) => {
            if let Err(e) = run_voyage(&engine, &config, None, params).await {
                tracing::error!(
                    "❌ Voyage computation failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());

                let exit_code = match e.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                };
                if exit_code > 0 {
                    std::process::exit(exit_code);
                }
            }
        }
        None => run_console_loop(&engine, &config).await,
    }

    Ok(())
}

async fn run_voyage(
    engine: &VoyageEngine<ChatNarrator>,
    config: &CliConfig,
    params_label: Option<String>,
    params: TravelParameters,
) -> Result<(), VoyageError> {
    let ctx = config.departure_context()?;
    let report = engine
        .run(params_label, params, ctx, config.narrative_style())
        .await?;

    for line in engine::render_report(&report) {
        println!("{}", line);
    }

    if let Some(dir) = &config.save_report {
        let path = engine::save_report(&report, dir)?;
        tracing::info!("📁 Report saved to: {}", path);
        println!("📁 Report saved to: {}", path);
    }

    Ok(())
}

/// Interactive prompt loop: enter values, or a blank line / q to quit.
async fn run_console_loop(engine: &VoyageEngine<ChatNarrator>, config: &CliConfig) {
    println!("Time-dilation console - enter values, or q to quit.");

    let stdin = std::io::stdin();
    loop {
        let years_raw = match prompt_line(&stdin, "Travel time for you (years): ") {
            Some(value) => value,
            None => {
                println!("Exited.");
                break;
            }
        };

        let speed_raw = match prompt_line(&stdin, "Speed as % of c (e.g. 95): ") {
            Some(value) => value,
            None => {
                println!("Exited.");
                break;
            }
        };

        let (years, speed) = match (years_raw.parse::<f64>(), speed_raw.parse::<f64>()) {
            (Ok(y), Ok(s)) => (y, s),
            _ => {
                println!("Invalid input - please enter numeric values.");
                continue;
            }
        };

        let style_raw = prompt_line(&stdin, "Style (realistic/scifi/humorous, blank for default): ");
        let style = style_raw
            .map(|s| NarrativeStyle::parse_or_default(&s))
            .unwrap_or_else(|| config.narrative_style());

        let params = TravelParameters::new(years, speed);
        let report = engine
            .run(None, params, DepartureContext::now(), style)
            .await;

        match report {
            Ok(report) => {
                for line in engine::render_report(&report) {
                    println!("{}", line);
                }
            }
            Err(e) => {
                println!("Error: {}", e.user_friendly_message());
                println!("💡 {}", e.recovery_suggestion());
            }
        }

        println!("-------");
    }
}

/// Read one trimmed line; None means quit (EOF, empty line, or q).
fn prompt_line(stdin: &std::io::Stdin, prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("q") {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}
