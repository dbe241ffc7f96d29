// src/repository/mod.rs

//! Remote package repository access
//!
//! Packages live in dist-git repositories: one repository per package, with
//! the `.spec` recipe and a `sources` checksum manifest at each revision.

pub mod client;
mod fetcher;

pub use client::RepositoryClient;
pub use fetcher::{
    DEFAULT_CHECKSUM_URL, DEFAULT_RECIPE_URL, FetchError, FetchedRecipe, HttpRecipeFetcher,
    RecipeSource, UrlTemplate,
};
