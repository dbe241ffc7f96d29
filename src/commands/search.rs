// src/commands/search.rs

//! Search command: Flathub application id lookup

use anyhow::{Context, Result};
use rpm2flatpak::flathub::FlathubClient;
use rpm2flatpak::repository::RepositoryClient;

pub fn cmd_search(term: &str) -> Result<()> {
    let client = FlathubClient::new(RepositoryClient::new().context("Failed to create HTTP client")?);
    let id = client.search(term)?;
    println!("{id}");
    Ok(())
}
