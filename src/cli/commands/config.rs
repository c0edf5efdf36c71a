use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config { print_config, check } = cmd {
        if *print_config {
            println!("📄 Current configuration:\n");
            let yaml = serde_yaml::to_string(&cfg).map_err(|_| AppError::ConfigSave)?;
            println!("{}", yaml);
        }

        if *check {
            let problems = cfg.check();
            if problems.is_empty() {
                messages::success("Configuration OK");
            } else {
                for p in &problems {
                    messages::warning(p);
                }
            }
        }
    }

    Ok(())
}
