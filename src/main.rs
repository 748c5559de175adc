use clap::Parser;
use secret_santa::core::ConfigProvider;
use secret_santa::utils::{logger, validation::Validate};
use secret_santa::{CliConfig, DirectoryStore, Exchange, Result, Roster, RosterConfig};

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting secret-santa CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match execute(&config) {
        Ok(output_path) => {
            if config.validate_only {
                println!("✅ Picks in {} are valid.", output_path);
            } else {
                println!("Picks complete. See {}/*.txt", output_path);
            }
        }
        Err(e) => {
            tracing::error!("❌ Draw failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}

fn execute(config: &CliConfig) -> Result<String> {
    config.validate()?;

    match &config.roster {
        Some(path) => {
            tracing::info!("📁 Loading roster from: {}", path);
            let roster_config = RosterConfig::from_file(path)?.with_overrides(
                config.output_path.clone(),
                config.allow_reciprocal,
                config.seed,
            );
            roster_config.validate()?;
            tracing::info!("🎄 Exchange: {}", roster_config.exchange_name());

            let roster = roster_config.roster()?;
            draw(&roster, &roster_config, config.validate_only)
        }
        None => {
            tracing::info!("No roster given, using the built-in example roster");
            draw(&Roster::example(), config, config.validate_only)
        }
    }
}

fn draw<C: ConfigProvider>(roster: &Roster, settings: &C, validate_only: bool) -> Result<String> {
    let store = DirectoryStore::new(settings.output_path());
    let mut exchange = Exchange::from_config(store, settings);

    if validate_only {
        exchange.verify(roster)?;
    } else {
        exchange.run(roster)?;
    }

    Ok(settings.output_path().to_string())
}
