//! Tiles backend integration module.
//!
//! Provides the REST client, the tile model and the error taxonomy.

pub mod client;
pub mod error;
pub mod models;

pub use client::{TileApi, TileClient};
pub use error::ApiError;
pub use models::{Tile, TileId, tiles_from_listing};
