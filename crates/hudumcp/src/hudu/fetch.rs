use super::HuduClient;
use crate::prelude::{println, *};
use log::{info, warn};
use serde::{Deserialize, Serialize};

// Import domain models and pure functions from core crate
use hudumcp_core::assets::AssetQuery;
use hudumcp_core::fetch::{transform_fetch_response, validate_id};
pub use hudumcp_core::fetch::FetchDocument;

/// Options for fetching one Hudu asset
#[derive(Debug, clap::Args, Serialize, Deserialize, Clone)]
#[command(after_help = "EXAMPLES:
  # Show an asset by id:
  hudumcp hudu fetch 28840

  # Print the fetch document exactly as the MCP tool returns it:
  hudumcp hudu fetch 28840 --json")]
pub struct FetchOptions {
    /// Asset id, as returned by search
    #[clap(env = "HUDU_ASSET_ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Public data function - used by both CLI and MCP
///
/// A blank id fails before Hudu is called. Zero matches is
/// [`HuduError::NotFound`]; transport failures stay [`HuduError::Upstream`].
pub async fn fetch_asset_data(client: &HuduClient, id: &str) -> Result<FetchDocument, HuduError> {
    let id = validate_id(id)?;

    let list = client.list_assets(&AssetQuery::by_id(&id)).await?;
    if list.records.len() > 1 {
        warn!(
            "fetch({id}) matched {} assets, using the first",
            list.records.len()
        );
    }

    let document = transform_fetch_response(&list.records, &id, &client.config().base_url);
    match &document {
        Ok(doc) => info!("fetch({id}) -> {:?} ({} bytes)", doc.title, doc.text.len()),
        Err(err) => warn!("fetch({id}) failed: {err}"),
    }

    document
}

/// Handle the fetch command
pub async fn handler(options: FetchOptions, client: &HuduClient) -> Result<()> {
    let doc = fetch_asset_data(client, &options.id)
        .await
        .map_err(|e| eyre!("{}", e))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row!["ID", &doc.id]);
    table.add_row(prettytable::row!["Title", &doc.title]);
    table.add_row(prettytable::row!["URL", &doc.url]);

    if let Some(metadata) = &doc.metadata {
        let fields = [
            ("Type", &metadata.asset_type),
            ("Company", &metadata.company_name),
            ("Email", &metadata.primary_mail),
            ("Model", &metadata.primary_model),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                table.add_row(prettytable::row![label, value]);
            }
        }
    }

    table.printstd();
    println!();
    println!("{}", doc.text);

    Ok(())
}
