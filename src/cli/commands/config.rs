use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        get,
        set,
    } = &cli.command
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            let yaml = serde_yaml::to_string(cfg)
                .map_err(|e| AppError::Config(format!("cannot serialize configuration: {e}")))?;
            println!("📄 Current configuration:\n");
            println!("{yaml}");
        }

        // ---- GET ----
        if let Some(key) = get {
            println!("{}", cfg.get_value(key)?);
        }

        // ---- SET ----
        if let Some(pair) = set {
            let [key, value] = pair.as_slice() else {
                return Err(AppError::Config("--set needs a KEY and a VALUE".into()));
            };
            let path = Config::config_file();
            let mut stored = if cli.test {
                cfg.clone()
            } else {
                Config::load_from(&path)?
            };
            stored.set_value(key, value)?;

            if cli.test {
                info(format!("Test mode: {key} = {} (not saved)", stored.get_value(key)?));
            } else {
                stored.save_to(&path)?;
                success(format!("{key} updated in {}", path.display()));
            }
        }
    }

    Ok(())
}
