//! Tile inventory models and listing normalization.
//!
//! Contains the tile record exchanged with the backend, the create payload,
//! and the logic that digs the tile list out of a listing response.

use crate::tiles::error::ApiError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// Keys tried, in order, when a listing response wraps its tiles in an object.
pub const WRAPPER_KEYS: [&str; 3] = ["data", "tiles", "content"];

/// Backend-assigned tile identifier.
///
/// Opaque to the client: whatever the backend sends is kept losslessly and
/// echoed back verbatim in `/tiles/{id}` paths and update bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileId {
    /// Any JSON number, integer or not, kept as received
    Number(Number),
    /// Textual identifier (e.g. a UUID or document id)
    Text(String),
    /// Anything else the backend put in `id`, such as a boolean
    Other(Value),
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileId::Number(n) => write!(f, "{}", n),
            TileId::Text(s) => f.write_str(s),
            TileId::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for TileId {
    fn from(n: i64) -> Self {
        TileId::Number(Number::from(n))
    }
}

/// Represents one tile product in the warehouse.
///
/// All descriptive fields are free text. `count_of_boxes` and `price` are
/// meant to hold numbers but are never validated or coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tile {
    /// Backend identifier, `None` for records that were never saved
    pub id: Option<TileId>,
    /// Tile name
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    /// Brand name
    #[serde(deserialize_with = "lenient_text")]
    pub brand: String,
    /// Size, e.g. "60x60"
    #[serde(deserialize_with = "lenient_text")]
    pub size: String,
    /// Number of boxes in stock
    #[serde(deserialize_with = "lenient_text")]
    pub count_of_boxes: String,
    /// Price per box
    #[serde(deserialize_with = "lenient_text")]
    pub price: String,
}

impl Tile {
    /// Borrow this tile as a create payload (everything but the id).
    pub fn as_new(&self) -> NewTile<'_> {
        NewTile {
            name: &self.name,
            brand: &self.brand,
            size: &self.size,
            count_of_boxes: &self.count_of_boxes,
            price: &self.price,
        }
    }
}

/// Body of a create request. The backend assigns the id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTile<'a> {
    pub name: &'a str,
    pub brand: &'a str,
    pub size: &'a str,
    pub count_of_boxes: &'a str,
    pub price: &'a str,
}

/// Accept any JSON value for a text field.
///
/// Strings are taken as-is, null is empty, and everything else becomes its
/// compact JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extract the tile list from a listing response body.
///
/// # Arguments
/// * `body` - Parsed JSON body of `GET /tiles`
///
/// # Returns
/// * `Result<Vec<Tile>, ApiError>` - Tiles in response order, or why none were found
///
/// # Details
/// A bare array is used as-is. An object is searched for [`WRAPPER_KEYS`] in
/// order and the first key holding an array wins, so `data` beats `tiles`
/// beats `content`. Anything else is [`ApiError::UnexpectedShape`].
///
/// A row that is not a tile object still takes its place in the list as a
/// blank tile with no id, so one odd record never hides the others.
pub fn tiles_from_listing(body: Value) -> Result<Vec<Tile>, ApiError> {
    let list = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let key = WRAPPER_KEYS
                .iter()
                .find(|key| map.get(**key).is_some_and(Value::is_array))
                .ok_or_else(|| {
                    ApiError::UnexpectedShape(format!(
                        "object without any of {:?} holding an array",
                        WRAPPER_KEYS
                    ))
                })?;
            match map.remove(*key) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        other => {
            return Err(ApiError::UnexpectedShape(format!(
                "top-level {}",
                kind_of(&other)
            )));
        }
    };

    Ok(list.into_iter().enumerate().map(tile_from_row).collect())
}

fn tile_from_row((index, item): (usize, Value)) -> Tile {
    let kind = kind_of(&item);
    serde_json::from_value(item).unwrap_or_else(|e| {
        tracing::warn!(index, kind, error = %e, "listing row is not a tile");
        Tile::default()
    })
}
