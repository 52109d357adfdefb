use crate::cli::parser::Commands;
use crate::cli::commands::finish;
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::AppResult;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let mut ctx = AppContext::open(cfg.clone())?;
        let result = ctx.export(*format, file.as_deref().map(Path::new), *force);
        ctx.close();
        finish(result)?;
    }
    Ok(())
}
