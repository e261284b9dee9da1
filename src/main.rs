use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use dialoguer::Select;
use gridiron_chemistry::config::AppConfig;
use gridiron_chemistry::layout::FormationLayout;
use gridiron_chemistry::logging::setup_logging;
use gridiron_chemistry::report::Report;
use gridiron_chemistry::sleeper::SleeperClient;
use gridiron_chemistry::source::{load_roster, RosterSource};
use gridiron_chemistry::Chemistry;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let matches = Command::new("gridiron-chemistry")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fantasy-football roster chemistry report")
        .arg(
            Arg::new("source")
                .long("source")
                .value_name("SOURCE")
                .help("Where the roster comes from")
                .default_value("demo")
                .value_parser(["demo", "live"]),
        )
        .arg(
            Arg::new("league")
                .long("league")
                .value_name("ID")
                .help("Sleeper league id (overrides config)"),
        )
        .arg(
            Arg::new("owner")
                .long("owner")
                .value_name("USER_ID")
                .help("Sleeper user id whose roster to load (default: first roster)"),
        )
        .arg(
            Arg::new("pick-owner")
                .long("pick-owner")
                .help("Choose the roster owner interactively")
                .action(ArgAction::SetTrue)
                .conflicts_with("owner"),
        )
        .arg(
            Arg::new("players")
                .long("players")
                .value_name("PATH")
                .help("Local players.json used to resolve player ids")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file (default: roster_config.json if present)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("no-chemistry")
                .long("no-chemistry")
                .help("Disable chemistry multipliers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .default_value("text")
                .value_parser(["text", "json"]),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("More log output (repeatable)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("No log output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    setup_logging(matches.get_count("verbose"), matches.get_flag("quiet"));

    let mut config = AppConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("Failed to load configuration")?;
    if let Some(league) = matches.get_one::<String>("league") {
        config.league_id = league.clone();
    }
    if let Some(players) = matches.get_one::<PathBuf>("players") {
        config.players_path = players.clone();
    }
    if matches.get_flag("no-chemistry") {
        config.chemistry_enabled = false;
    }

    let source = matches
        .get_one::<String>("source")
        .map(|s| s.parse::<RosterSource>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    let mut owner = matches.get_one::<String>("owner").cloned();
    if source == RosterSource::Live && matches.get_flag("pick-owner") {
        owner = pick_owner(&config).await?;
    }

    // Step 1: Load roster
    let roster = load_roster(source, &config, owner.as_deref())
        .await
        .context("Failed to load roster")?;
    info!("Roster has {} players", roster.len());

    // Step 2: Chemistry and connectors on the standard formation
    let chemistry = Chemistry::new(config.chemistry_enabled);
    let report = Report::build(&roster, chemistry, &FormationLayout::default());

    // Step 3: Output
    match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        ),
        _ => print!("{}", report),
    }

    Ok(())
}

/// Lists the league's users and lets the user pick one. `None` if cancelled.
async fn pick_owner(config: &AppConfig) -> Result<Option<String>> {
    let client = SleeperClient::new(config).context("Failed to create HTTP client")?;
    let users = client
        .users()
        .await
        .with_context(|| format!("Failed to fetch users for league {}", client.league_id()))?;
    if users.is_empty() {
        return Ok(None);
    }

    let labels: Vec<&str> = users.iter().map(|u| u.label()).collect();
    let choice = Select::new()
        .with_prompt("Whose team?")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Owner selection failed")?;

    Ok(choice.map(|i| users[i].user_id.clone()))
}
