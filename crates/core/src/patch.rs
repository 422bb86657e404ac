//! Tri-state PATCH field.
//!
//! JSON partial updates need to distinguish "leave this field alone"
//! from "clear this field". [`Patch`] makes that distinction explicit:
//! an absent field deserializes to [`Patch::Keep`], a JSON `null` to
//! [`Patch::Clear`], and any other value to [`Patch::Set`].
//!
//! Use it with `#[serde(default)]` so absent fields fall back to
//! `Keep`:
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct UpdateProject {
//!     name: Option<String>,
//!     #[serde(default)]
//!     image_ref: Patch<String>,
//! }
//! ```

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field was absent from the payload; do not touch the stored value.
    #[default]
    Keep,
    /// Field was explicitly `null`; clear the stored value.
    Clear,
    /// Field carried a value; replace the stored value.
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Apply this patch to an optional slot.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *slot = None,
            Patch::Set(value) => *slot = Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // This impl only ever sees present fields, so `null` means
        // Clear; Keep comes from `#[serde(default)]` on the field.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Patch::Set(value),
            None => Patch::Clear,
        })
    }
}
