//! `setup-store` command: one-shot playbook vector store provisioning

use std::path::Path;

use tracing::info;

use ndareview_config::{Config, VECTOR_STORE_ENV};
use ndareview_llm::VectorStoreClient;
use ndareview_utils::error::NdaReviewError;

/// Execute the setup-store command.
///
/// Prints the resulting store id as a shell-ready config line so the user
/// can paste it into their environment.
///
/// # Errors
///
/// Returns `NdaReviewError` for upload, creation, and indexing failures.
pub async fn execute_setup_store_command(
    playbook: &Path,
    name: Option<&str>,
    config: &Config,
) -> Result<(), NdaReviewError> {
    let store_name = match name {
        Some(name) => name.to_string(),
        None => {
            let file_name = playbook
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("playbook");
            format!("NDA Playbook Store ({file_name})")
        }
    };

    info!(playbook = %playbook.display(), name = %store_name, "setting up vector store");

    let client = VectorStoreClient::new_from_config(config)?;
    let outcome = client.setup_playbook_store(playbook, &store_name).await?;

    println!("\n--- Vector Store Setup Complete ---");
    println!("Vector Store Name: {}", outcome.name);
    println!("Uploaded File ID: {}", outcome.file_id);
    println!("Add the following line to your environment:");
    println!("\n{VECTOR_STORE_ENV}=\"{}\"\n", outcome.vector_store_id);

    Ok(())
}
