use clap::Parser;
use colored::Colorize;
use dhcp_pool_audit::logging::init_logging;
use dhcp_pool_audit::output::{build_report, print_report};
use dhcp_pool_audit::run_audit;
use dhcp_pool_audit::settings::{Cli, Settings};
use std::error::Error;

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = run(Cli::parse()) {
        log::error!("{e}");
        eprintln!("{} {e}", "ERROR".on_red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let settings = Settings::from_cli(cli)?;
    init_logging(&settings.log_config)?;
    log::info!("#Start main()");

    let outcome = run_audit(&settings.audit)?;
    let rows = build_report(&outcome.pool);
    print_report(&rows, &settings.style)?;

    log::info!("#End main() reported {} subnet(s)", rows.len());
    Ok(())
}
