use crate::cli::parser::Cli;
use crate::config::Config;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the workbook file with both sheets
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    println!("⚙️  Initializing hotelmaint…");
    if cli.test {
        info("Test mode: configuration file left untouched");
    } else {
        cfg.save_to(&path)?;
        println!("📄 Config file : {}", path.display());
    }
    println!("🗄️  Workbook    : {}", cfg.workbook);

    let ctx = AppContext::open(cfg.clone())?;
    let report = ctx.diagnose();
    ctx.close();

    if report.is_healthy() {
        success(format!("Workbook initialized at {}", cfg.workbook));
    } else {
        warning("Workbook opened, but its sheets do not have the expected columns; run `hotelmaint diagnose`.");
    }
    Ok(())
}
