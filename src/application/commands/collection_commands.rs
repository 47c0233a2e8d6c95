// src/application/commands/collection_commands.rs

use crate::application::dto::CollectionDto;
use crate::domain::CURATED_COLLECTIONS;

/// List the curated collections, in catalog order
pub fn list_collections() -> Vec<CollectionDto> {
    CURATED_COLLECTIONS.iter().map(CollectionDto::from).collect()
}
