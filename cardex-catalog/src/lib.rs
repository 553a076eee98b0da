//! Card catalog data model types, slug construction, and species-name cleaning.
//!
//! This crate defines the persistent data model for the card catalog without
//! any database or network dependencies. Everything here is pure: the same
//! input always produces the same slug, SEO path, or cleaned name.

pub mod slug;
pub mod species;
pub mod types;

pub use slug::{
    SeoContext, build_seo_path, build_slug, clean_seo_name, clean_slug, clean_slug_segment,
    element_slug, rarity_slug,
};
pub use species::{clean_pokemon_name, species_candidates};
pub use types::*;
