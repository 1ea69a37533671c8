use crate::prelude::*;
use clap::Parser;

mod hudu;
mod mcp;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Search and fetch Hudu assets from the command line or as MCP tools"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Hudu base URL (e.g. https://acme.huducloud.com or https://acme.huducloud.com/api/v1)
    #[clap(long, env = "HUDU_BASE_URL", global = true)]
    base_url: Option<String>,

    /// Hudu API key, sent as the x-api-key header
    #[clap(long, env = "HUDU_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Default number of assets requested per search
    #[clap(long, env = "HUDU_DEFAULT_PAGE_SIZE", global = true, default_value = "15")]
    page_size: u32,

    /// Timeout for each Hudu request, in seconds
    #[clap(long, env = "HTTP_TIMEOUT_S", global = true, default_value = "15")]
    timeout: f64,

    /// Append the "Title" custom field and primary email to search titles
    #[clap(long, env = "HUDU_ENRICH_TITLES", global = true, default_value = "false")]
    enrich_titles: bool,

    /// Whether to display additional information.
    #[clap(long, env = "HUDU_MCP_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Hudu asset operations
    Hudu(crate::hudu::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    let config = crate::hudu::HuduConfig::from_global(&app.global)?;

    match app.command {
        SubCommands::Hudu(sub_app) => crate::hudu::run(sub_app, config, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, config, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
