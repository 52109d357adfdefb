use crate::cli::parser::Commands;
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Suggest {
        sector,
        location,
        description,
    } = cmd
    {
        let ctx = AppContext::open(cfg.clone())?;
        let suggestion = ctx.suggest_checklist(sector, location, description);
        ctx.close();

        if let Some(msg) = &suggestion.message {
            info(msg);
        }
        header("Suggested checklist");
        for item in &suggestion.checklist {
            println!("- {item}");
        }
    }
    Ok(())
}
