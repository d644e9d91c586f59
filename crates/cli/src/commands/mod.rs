//! CLI command implementations.

pub mod seed;
pub mod table;

use clementine_store::DynamoStore;

/// Connect to the configured table.
///
/// # Errors
///
/// Returns an error if `CLEMENTINE_TABLE` is not set.
pub async fn connect() -> Result<DynamoStore, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let table = std::env::var("CLEMENTINE_TABLE").map_err(|_| "CLEMENTINE_TABLE not set")?;
    let endpoint = std::env::var("DYNAMO_ENDPOINT_URL").ok();

    Ok(DynamoStore::from_env(table, endpoint.as_deref()).await)
}
