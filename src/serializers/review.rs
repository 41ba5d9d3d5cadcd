use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{add_null_errors, present, take, validate_not_blank};
use crate::error::{ApiError, FieldErrors, REQUIRED_MESSAGE};
use crate::models::{NewReview, Review, ReviewChanges, DEFAULT_STARS};

/// Reviews are read and written through the same shape; `id` is read-only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReviewRead {
    pub id: i64,
    pub text: String,
    pub stars: i32,
    pub movie: i64,
}

impl From<Review> for ReviewRead {
    fn from(review: Review) -> Self {
        ReviewRead {
            id: review.id,
            text: review.text,
            stars: review.stars,
            movie: review.movie_id,
        }
    }
}

/// Request body as sent, before nulls are told apart from absent keys.
#[derive(Deserialize)]
struct ReviewBody {
    #[serde(default, deserialize_with = "present")]
    text: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    stars: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    movie: Option<Option<i64>>,
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(from = "ReviewBody")]
pub struct ReviewWrite {
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_not_blank")
    )]
    pub text: Option<String>,
    /// Absent on create means the default rating.
    #[validate(range(min = 1, max = 5, message = "Ensure this value is between 1 and 5."))]
    pub stars: Option<i32>,
    pub movie: Option<i64>,
    /// Fields sent as an explicit `null`.
    pub nulls: Vec<&'static str>,
}

impl From<ReviewBody> for ReviewWrite {
    fn from(body: ReviewBody) -> Self {
        let mut nulls = Vec::new();
        ReviewWrite {
            text: take(body.text, "text", &mut nulls),
            stars: take(body.stars, "stars", &mut nulls),
            movie: take(body.movie, "movie", &mut nulls),
            nulls,
        }
    }
}

impl ReviewWrite {
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::collect(self.validate());
        add_null_errors(&mut errors, &self.nulls);
        errors
    }

    /// Drops the body's `movie`, null or not, for routes that take it from the path.
    pub fn without_movie(mut self) -> Self {
        self.movie = None;
        self.nulls.retain(|field| *field != "movie");
        self
    }

    /// Review for the movie named in the body.
    pub fn into_new_review(self, mut errors: FieldErrors) -> Result<NewReview, ApiError> {
        let movie = self.movie;
        match movie {
            Some(movie_id) => self.for_movie(movie_id, errors),
            None => {
                if !errors.contains("movie") {
                    errors.add("movie", REQUIRED_MESSAGE);
                }
                Err(ApiError::ValidationFailed(errors))
            }
        }
    }

    /// Review for `movie_id`, whatever the body says.
    pub fn for_movie(self, movie_id: i64, errors: FieldErrors) -> Result<NewReview, ApiError> {
        match self.text {
            Some(text) if errors.is_empty() => Ok(NewReview {
                text,
                stars: self.stars.unwrap_or(DEFAULT_STARS),
                movie_id,
            }),
            _ => Err(ApiError::ValidationFailed(errors)),
        }
    }

    /// Full replacement. An absent rating keeps the stored one.
    pub fn into_replacement(self, mut errors: FieldErrors) -> Result<ReviewChanges, ApiError> {
        if self.movie.is_none() && !errors.contains("movie") {
            errors.add("movie", REQUIRED_MESSAGE);
        }
        match (self.text, self.movie) {
            (Some(text), Some(movie_id)) if errors.is_empty() => Ok(ReviewChanges {
                text: Some(text),
                stars: self.stars,
                movie_id: Some(movie_id),
            }),
            _ => Err(ApiError::ValidationFailed(errors)),
        }
    }
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(from = "ReviewBody")]
pub struct ReviewPatch {
    #[validate(custom(function = "validate_not_blank"))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Ensure this value is between 1 and 5."))]
    pub stars: Option<i32>,
    pub movie: Option<i64>,
    pub nulls: Vec<&'static str>,
}

impl From<ReviewBody> for ReviewPatch {
    fn from(body: ReviewBody) -> Self {
        let mut nulls = Vec::new();
        ReviewPatch {
            text: take(body.text, "text", &mut nulls),
            stars: take(body.stars, "stars", &mut nulls),
            movie: take(body.movie, "movie", &mut nulls),
            nulls,
        }
    }
}

impl ReviewPatch {
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::collect(self.validate());
        add_null_errors(&mut errors, &self.nulls);
        errors
    }

    pub fn into_changes(self, errors: FieldErrors) -> Result<ReviewChanges, ApiError> {
        errors.into_result()?;
        Ok(ReviewChanges {
            text: self.text,
            stars: self.stars,
            movie_id: self.movie,
        })
    }
}
