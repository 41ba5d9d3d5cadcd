//! Wire shapes. Every entity has a read shape (identity, computed fields,
//! nested data) and a write shape that only carries user-settable fields.
//! Write shapes come in two flavours: the full one used by POST and PUT,
//! and a `*Patch` one where every field is optional.

pub mod director;
pub mod movie;
pub mod review;

pub use director::*;
pub use movie::*;
pub use review::*;

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::ValidationError;

use crate::error::{FieldErrors, NULL_MESSAGE};

/// Pair with `#[serde(default)]`: an absent key stays `None`, an explicit
/// `null` becomes `Some(None)`.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Unwraps a body field, remembering `field` when it was sent as `null`.
pub(crate) fn take<T>(
    value: Option<Option<T>>,
    field: &'static str,
    nulls: &mut Vec<&'static str>,
) -> Option<T> {
    match value {
        Some(None) => {
            nulls.push(field);
            None
        }
        other => other.flatten(),
    }
}

/// A `null` supersedes any other message on the same field.
pub(crate) fn add_null_errors(errors: &mut FieldErrors, nulls: &[&'static str]) {
    for field in nulls {
        errors.set(*field, NULL_MESSAGE);
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::from("This field may not be blank.")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_tells_null_from_absent() {
        let mut nulls = Vec::new();
        assert_eq!(take::<i32>(None, "stars", &mut nulls), None);
        assert!(nulls.is_empty());
        assert_eq!(take(Some(Some(4)), "stars", &mut nulls), Some(4));
        assert!(nulls.is_empty());
        assert_eq!(take::<i32>(Some(None), "stars", &mut nulls), None);
        assert_eq!(nulls, ["stars"]);
    }

    #[test]
    fn null_replaces_other_messages() {
        let mut errors = FieldErrors::new();
        errors.add("name", crate::error::REQUIRED_MESSAGE);
        add_null_errors(&mut errors, &["name"]);
        assert_eq!(errors.messages("name"), [NULL_MESSAGE]);
    }

    #[test]
    fn blank_values_are_rejected() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t\n").is_err());
        assert!(validate_not_blank(" Stalker ").is_ok());
    }
}
