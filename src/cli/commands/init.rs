use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file with the default testing knobs
pub fn handle(cli: &Cli) -> AppResult<()> {
    println!("⚙️  Initializing shiftclock…");

    Config::init_all(cli.test)?;

    let path = Config::config_file();
    println!("📄 Config file : {}", path.display());
    println!("🎉 shiftclock initialization completed!");

    Ok(())
}
