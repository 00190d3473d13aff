//! Common types for the shared crate
//!
//! Utility types used across the backend

use serde::{Deserialize, Deserializer};

/// Three-state field for partial updates.
///
/// JSON cannot distinguish "absent" from "null" through `Option<T>` alone,
/// but the admin panel relies on the difference: an omitted field keeps the
/// stored value while an explicit `null` clears it.
///
/// Use with `#[serde(default)]` so absent keys decode to [`Field::Omitted`]:
///
/// ```
/// use serde::Deserialize;
/// use shared::types::Field;
///
/// #[derive(Deserialize)]
/// struct Update {
///     #[serde(default)]
///     email: Field<String>,
/// }
///
/// let u: Update = serde_json::from_str("{}").unwrap();
/// assert!(u.email.is_omitted());
///
/// let u: Update = serde_json::from_str(r#"{"email":null}"#).unwrap();
/// assert_eq!(u.email, Field::Cleared);
///
/// let u: Update = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
/// assert_eq!(u.email, Field::Set("a@b.c".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field<T> {
    /// Key absent from the request; keep the stored value
    #[default]
    Omitted,
    /// Key present with `null`; clear the stored value
    Cleared,
    /// Key present with a value
    Set(T),
}

impl<T> Field<T> {
    /// True when the key was absent from the request
    pub fn is_omitted(&self) -> bool {
        matches!(self, Field::Omitted)
    }

    /// The set value, if any
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Field::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl Field<String> {
    /// The value to store when the field was provided at all, with `null`
    /// collapsing to the empty string. `None` when the field was omitted.
    pub fn provided(self) -> Option<String> {
        match self {
            Field::Omitted => None,
            Field::Cleared => Some(String::new()),
            Field::Set(value) => Some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Set(value),
            None => Field::Cleared,
        })
    }
}
