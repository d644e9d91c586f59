//! Table provisioning command.
//!
//! Creates the single table every Clementine entity lives in: string
//! partition key `pk`, on-demand billing. Safe to re-run.

use tracing::info;

/// Create the DynamoDB table.
///
/// # Errors
///
/// Returns an error if configuration is missing or table creation fails.
pub async fn create() -> Result<(), Box<dyn std::error::Error>> {
    let store = super::connect().await?;

    info!(table = %store.table(), "Creating table");
    if store.create_table().await? {
        info!(table = %store.table(), "Table created");
    } else {
        info!(table = %store.table(), "Table already exists, nothing to do");
    }

    Ok(())
}
