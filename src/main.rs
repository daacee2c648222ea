use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info};

use fund_disclosure::observability::init_logging;
use fund_disclosure::{Config, FundPageBuilder, NaverMarketData, RenderContext};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(&config);
    config.validate().context("Invalid configuration")?;

    info!("Building fund page from {}", config.template_path.display());

    let source = NaverMarketData::new(&config).context("Failed to create HTTP client")?;
    let ctx = RenderContext::from_config(&config, Local::now().date_naive());
    let builder = FundPageBuilder::new(config, source);

    match builder.run(&ctx).await {
        Ok(output) => {
            info!(
                "Build finished: {} holdings, NAV {}",
                output.summary.holdings_count,
                output.summary.nav.trunc()
            );
            Ok(())
        }
        Err(e) => {
            error!("BUILD_FAILED: {}", e);
            Err(e).context("Fund page build failed")
        }
    }
}
