use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

use super::{add_null_errors, present, take, validate_not_blank, ReviewRead};
use crate::error::{ApiError, FieldErrors};
use crate::models::{
    find_movie, list_movies, list_reviews_for_movies, Movie, MovieChanges, NewMovie, Review,
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MovieRead {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub duration: i32,
    pub director: i64,
    pub reviews: Vec<ReviewRead>,
    pub avg_rating: f64,
}

impl MovieRead {
    pub fn new(movie: Movie, reviews: Vec<ReviewRead>) -> Self {
        let avg_rating = average_rating(reviews.iter().map(|review| review.stars));
        MovieRead {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            duration: movie.duration,
            director: movie.director_id,
            reviews,
            avg_rating,
        }
    }
}

/// Arithmetic mean of the given star ratings, `0.0` when there are none.
pub fn average_rating(stars: impl IntoIterator<Item = i32>) -> f64 {
    let (total, count) = stars
        .into_iter()
        .fold((0i64, 0u32), |(total, count), stars| {
            (total + i64::from(stars), count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    total as f64 / f64::from(count)
}

/// Attaches each review to its movie, keeping both inputs' order.
pub fn assemble_movies(movies: Vec<Movie>, reviews: Vec<Review>) -> Vec<MovieRead> {
    let mut by_movie: HashMap<i64, Vec<ReviewRead>> = HashMap::new();
    for review in reviews {
        by_movie
            .entry(review.movie_id)
            .or_default()
            .push(ReviewRead::from(review));
    }
    movies
        .into_iter()
        .map(|movie| {
            let reviews = by_movie.remove(&movie.id).unwrap_or_default();
            MovieRead::new(movie, reviews)
        })
        .collect()
}

pub async fn load_movies(pool: &PgPool) -> Result<Vec<MovieRead>, sqlx::Error> {
    let movies = list_movies(pool).await?;
    let ids: Vec<i64> = movies.iter().map(|movie| movie.id).collect();
    let reviews = list_reviews_for_movies(pool, &ids).await?;
    Ok(assemble_movies(movies, reviews))
}

pub async fn load_movie(pool: &PgPool, id: i64) -> Result<Option<MovieRead>, sqlx::Error> {
    let Some(movie) = find_movie(pool, id).await? else {
        return Ok(None);
    };
    let reviews = list_reviews_for_movies(pool, &[movie.id]).await?;
    Ok(assemble_movies(vec![movie], reviews).pop())
}

/// Request body as sent, before nulls are told apart from absent keys.
#[derive(Deserialize)]
struct MovieBody {
    #[serde(default, deserialize_with = "present")]
    title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    duration: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    director: Option<Option<i64>>,
}

struct MovieFields {
    title: Option<String>,
    description: Option<String>,
    duration: Option<i32>,
    director: Option<i64>,
    nulls: Vec<&'static str>,
}

impl From<MovieBody> for MovieFields {
    fn from(body: MovieBody) -> Self {
        let mut nulls = Vec::new();
        MovieFields {
            title: take(body.title, "title", &mut nulls),
            description: take(body.description, "description", &mut nulls),
            duration: take(body.duration, "duration", &mut nulls),
            director: take(body.director, "director", &mut nulls),
            nulls,
        }
    }
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(from = "MovieBody")]
pub struct MovieWrite {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "This field is required."),
        custom(function = "validate_not_blank")
    )]
    pub description: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub duration: Option<i32>,
    #[validate(required(message = "This field is required."))]
    pub director: Option<i64>,
    /// Fields sent as an explicit `null`.
    pub nulls: Vec<&'static str>,
}

impl From<MovieBody> for MovieWrite {
    fn from(body: MovieBody) -> Self {
        let fields = MovieFields::from(body);
        MovieWrite {
            title: fields.title,
            description: fields.description,
            duration: fields.duration,
            director: fields.director,
            nulls: fields.nulls,
        }
    }
}

impl MovieWrite {
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::collect(self.validate());
        add_null_errors(&mut errors, &self.nulls);
        errors
    }

    /// `errors` holds whatever was found so far, reference checks included.
    pub fn into_new_movie(self, errors: FieldErrors) -> Result<NewMovie, ApiError> {
        match (self.title, self.description, self.duration, self.director) {
            (Some(title), Some(description), Some(duration), Some(director_id))
                if errors.is_empty() =>
            {
                Ok(NewMovie {
                    title,
                    description,
                    duration,
                    director_id,
                })
            }
            _ => Err(ApiError::ValidationFailed(errors)),
        }
    }
}

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(from = "MovieBody")]
pub struct MoviePatch {
    #[validate(
        length(max = 100, message = "Ensure this field has no more than 100 characters."),
        custom(function = "validate_not_blank")
    )]
    pub title: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,
    pub duration: Option<i32>,
    pub director: Option<i64>,
    pub nulls: Vec<&'static str>,
}

impl From<MovieBody> for MoviePatch {
    fn from(body: MovieBody) -> Self {
        let fields = MovieFields::from(body);
        MoviePatch {
            title: fields.title,
            description: fields.description,
            duration: fields.duration,
            director: fields.director,
            nulls: fields.nulls,
        }
    }
}

impl MoviePatch {
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = FieldErrors::collect(self.validate());
        add_null_errors(&mut errors, &self.nulls);
        errors
    }

    pub fn into_changes(self, errors: FieldErrors) -> Result<MovieChanges, ApiError> {
        errors.into_result()?;
        Ok(MovieChanges {
            title: self.title,
            description: self.description,
            duration: self.duration,
            director_id: self.director,
        })
    }
}
