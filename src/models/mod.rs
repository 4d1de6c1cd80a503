//! Data models for the attendance backend.
//!
//! Field names follow the backend's JSON exactly; most are Indonesian.

mod attendance;
mod auth;
mod document;
mod profile;
mod todo;

pub use attendance::*;
pub use auth::*;
pub use document::*;
pub use profile::*;
pub use todo::*;

use serde::{Deserialize, Deserializer};

/// Treat a JSON `null` (or a missing field, with `#[serde(default)]`) as the
/// type's default: an empty string, an empty list, zero.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
