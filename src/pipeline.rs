use std::fs;
use tracing::info;

use crate::errors::{FundError, Result};
use crate::market::{MarketDataFetcher, MarketDataSource};
use crate::portfolio::{load_portfolio, FundCalculator, FundSummary, Portfolio};
use crate::report::{render_page, RenderContext, Template};
use crate::utils::Config;

/// Result of one build
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub html: String,
    pub summary: FundSummary,
}

/// Runs load → fetch → calculate → render once.
///
/// Nothing is written until every stage has succeeded.
pub struct FundPageBuilder<S> {
    config: Config,
    fetcher: MarketDataFetcher<S>,
}

impl<S: MarketDataSource> FundPageBuilder<S> {
    pub fn new(config: Config, source: S) -> Self {
        let fetcher = MarketDataFetcher::new(source, &config);
        Self { config, fetcher }
    }

    /// Price a loaded portfolio and render it into `template`
    pub async fn build(
        &self,
        mut portfolio: Portfolio,
        template: &Template,
        ctx: &RenderContext,
    ) -> Result<BuildOutput> {
        let quotes = self.fetcher.fetch_quotes(&portfolio).await?;
        portfolio.apply_quotes(&quotes);

        let summary = FundCalculator::summarize(&portfolio);
        info!(
            "AUM {} / NAV {} / beta {:.2} across {} holdings",
            summary.aum,
            summary.nav.trunc(),
            summary.weighted_beta,
            summary.holdings_count
        );

        let html = render_page(template, &summary, ctx)?;
        Ok(BuildOutput { html, summary })
    }

    /// Full build from the configured files, writing the output page
    pub async fn run(&self, ctx: &RenderContext) -> Result<BuildOutput> {
        let config = &self.config;

        let portfolio = load_portfolio(&config.portfolio_path, &config.shares_path, &config.cash_ticker)?;
        let template = fs::read_to_string(&config.template_path)
            .map(Template::new)
            .map_err(|e| FundError::io(&config.template_path, e))?;

        let output = self.build(portfolio, &template, ctx).await?;

        if let Some(parent) = config.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FundError::io(parent, e))?;
        }
        fs::write(&config.output_path, &output.html)
            .map_err(|e| FundError::io(&config.output_path, e))?;

        info!("Wrote {}", config.output_path.display());
        Ok(output)
    }
}
