use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{add_null_errors, present, take, validate_not_blank};
use crate::error::{ApiError, FieldErrors};
use crate::models::DirectorWithMovieCount;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DirectorRead {
    pub id: i64,
    pub name: String,
    pub movies_count: i64,
}

impl From<DirectorWithMovieCount> for DirectorRead {
    fn from(director: DirectorWithMovieCount) -> Self {
        DirectorRead {
            id: director.id,
            name: director.name,
            movies_count: director.movies_count,
        }
    }
}

/// Request body as sent, before nulls are told apart from absent keys.
#[derive(Deserialize)]
struct DirectorBody {
    #[serde(default, deserialize_with = "present")]
    name: Option<Option<String>>,
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(from = "DirectorBody")]
pub struct DirectorWrite {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    /// Fields sent as an explicit `null`.
    pub nulls: Vec<&'static str>,
}

impl From<DirectorBody> for DirectorWrite {
    fn from(body: DirectorBody) -> Self {
        let mut nulls = Vec::new();
        let name = take(body.name, "name", &mut nulls);
        DirectorWrite { name, nulls }
    }
}

impl DirectorWrite {
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::collect(self.validate());
        add_null_errors(&mut errors, &self.nulls);
        errors
    }

    /// Validated name, or every offending field.
    pub fn into_name(self) -> Result<String, ApiError> {
        let errors = self.field_errors();
        match self.name {
            Some(name) if errors.is_empty() => Ok(name),
            _ => Err(ApiError::ValidationFailed(errors)),
        }
    }
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(from = "DirectorBody")]
pub struct DirectorPatch {
    #[validate(
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,
    pub nulls: Vec<&'static str>,
}

impl From<DirectorBody> for DirectorPatch {
    fn from(body: DirectorBody) -> Self {
        let mut nulls = Vec::new();
        let name = take(body.name, "name", &mut nulls);
        DirectorPatch { name, nulls }
    }
}

impl DirectorPatch {
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::collect(self.validate());
        add_null_errors(&mut errors, &self.nulls);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NULL_MESSAGE, REQUIRED_MESSAGE};
    use serde_json::json;

    #[test]
    fn read_shape_has_identity_name_and_count() {
        let read = DirectorRead::from(DirectorWithMovieCount {
            id: 7,
            name: "Chantal Akerman".to_string(),
            movies_count: 2,
        });
        assert_eq!(
            serde_json::to_value(read).unwrap(),
            json!({ "id": 7, "name": "Chantal Akerman", "movies_count": 2 })
        );
    }

    #[test]
    fn write_shape_ignores_identity_and_counts() {
        let write: DirectorWrite =
            serde_json::from_value(json!({ "id": 99, "name": "Kelly Reichardt", "movies_count": 4 }))
                .unwrap();
        assert_eq!(write.into_name().unwrap(), "Kelly Reichardt");
    }

    #[test]
    fn missing_name_is_required() {
        let write: DirectorWrite = serde_json::from_value(json!({})).unwrap();
        match write.into_name() {
            Err(ApiError::ValidationFailed(errors)) => {
                assert_eq!(errors.messages("name"), [REQUIRED_MESSAGE]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn overlong_and_blank_names_are_rejected() {
        let long = DirectorWrite {
            name: Some("x".repeat(101)),
            ..DirectorWrite::default()
        };
        assert!(long.into_name().is_err());
        let blank = DirectorWrite {
            name: Some("   ".to_string()),
            ..DirectorWrite::default()
        };
        assert!(blank.into_name().is_err());
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(DirectorPatch::default().field_errors().is_empty());
        let blank = DirectorPatch {
            name: Some(String::new()),
            ..DirectorPatch::default()
        };
        assert!(!blank.field_errors().is_empty());
    }

    #[test]
    fn null_name_is_rejected_not_ignored() {
        let write: DirectorWrite = serde_json::from_value(json!({ "name": null })).unwrap();
        match write.into_name() {
            Err(ApiError::ValidationFailed(errors)) => {
                assert_eq!(errors.messages("name"), [NULL_MESSAGE]);
            }
            other => panic!("expected validation failure, got {:?}", other),
        }

        let patch: DirectorPatch = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(patch.field_errors().messages("name"), [NULL_MESSAGE]);
        let patch: DirectorPatch = serde_json::from_value(json!({})).unwrap();
        assert!(patch.field_errors().is_empty());
    }
}
