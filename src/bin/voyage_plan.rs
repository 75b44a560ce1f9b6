use clap::Parser;
use time_dilation::config::plan::PlanConfig;
use time_dilation::core::engine::{self, VoyageEngine};
use time_dilation::utils::{logger, validation::Validate};
use time_dilation::ChatNarrator;

#[derive(Parser)]
#[command(name = "voyage-plan")]
#[command(about = "Run a batch of time-dilation voyages from a TOML plan")]
struct Args {
    /// Path to the TOML voyage plan
    #[arg(short, long, default_value = "voyage-plan.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Override the narrative.enabled setting from the plan
    #[arg(long)]
    narrative: Option<bool>,

    /// Directory to write per-voyage report files into
    #[arg(long)]
    save_reports: Option<String>,

    /// Show what would be computed without calling the narrative service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting voyage plan runner");
    tracing::info!("📁 Loading plan from: {}", args.config);

    let plan = match PlanConfig::from_file(&args.config) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("❌ Failed to load plan '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML");
            std::process::exit(1);
        }
    };

    if let Err(e) = plan.validate() {
        tracing::error!("❌ Plan validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Plan loaded and validated successfully");
    display_plan_summary(&plan, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no narrative requests will be made");
    }

    let narrative_enabled =
        !args.dry_run && args.narrative.unwrap_or_else(|| plan.narrative_enabled());

    let narrator = match ChatNarrator::from_config(&plan) {
        Ok(narrator) => narrator,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let voyage_engine = VoyageEngine::new_with_narrative(narrator, narrative_enabled);

    let mut failures = 0_usize;
    for entry in &plan.voyages {
        let label = entry
            .label
            .clone()
            .unwrap_or_else(|| format!("{}% of c", entry.speed_percent));

        let ctx = match entry.departure_context() {
            Ok(ctx) => ctx,
            Err(e) => {
                failures += 1;
                eprintln!("❌ {}: {}", label, e.user_friendly_message());
                continue;
            }
        };

        match voyage_engine
            .run(Some(label.clone()), entry.parameters(), ctx, entry.style())
            .await
        {
            Ok(report) => {
                for line in engine::render_report(&report) {
                    println!("{}", line);
                }
                println!();

                if let Some(dir) = &args.save_reports {
                    match engine::save_report(&report, dir) {
                        Ok(path) => tracing::info!("📁 Report saved to: {}", path),
                        Err(e) => {
                            failures += 1;
                            eprintln!("❌ Could not save report for {}: {}", label, e);
                        }
                    }
                }
            }
            Err(e) => {
                failures += 1;
                tracing::error!(
                    "❌ Voyage '{}' failed: {} (Category: {:?}, Severity: {:?})",
                    label,
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}: {}", label, e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
            }
        }
    }

    let total = plan.voyages.len();
    if failures == 0 {
        tracing::info!("✅ All {} voyages completed successfully", total);
        println!("✅ All {} voyages completed successfully", total);
    } else {
        tracing::error!("❌ {}/{} voyages failed", failures, total);
        eprintln!("❌ {}/{} voyages failed", failures, total);
        std::process::exit(1);
    }

    Ok(())
}

fn display_plan_summary(plan: &PlanConfig, args: &Args) {
    println!("📋 Plan Summary:");
    println!("  Name: {}", plan.plan.name);
    if let Some(description) = &plan.plan.description {
        println!("  Description: {}", description);
    }
    println!("  Narrative endpoint: {}", plan.narrative.endpoint);
    println!("  Voyages: {}", plan.voyages.len());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
