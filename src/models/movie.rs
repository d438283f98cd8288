//! Boundary shapes of a movie record and the explicit mappings between them
//! and the `movies` table.
//!
//! Every mapping destructures its source, so adding a column or a field fails
//! to compile until the mapping is updated.

use chrono::NaiveDate;
use sea_orm::{ActiveValue::NotSet, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::movies;

pub const MIN_DURATION: i32 = 70;
pub const MAX_DURATION: i32 = 600;
pub const GENRE_MAX_LEN: u64 = 50;

/// Full representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub genre: String,
    pub duration: i32,
    pub release_date: Option<NaiveDate>,
}

/// Create input. Carries no identifier; the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct NewMovie {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = GENRE_MAX_LEN,
        message = "Genre is required and must be at most 50 characters"
    ))]
    pub genre: String,

    #[validate(range(
        min = MIN_DURATION,
        max = MAX_DURATION,
        message = "Duration must be between 70 and 600 minutes"
    ))]
    pub duration: i32,

    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

/// Update input: every mutable field of a movie.
///
/// Used as the body of a full update and as the projection a patch document
/// is applied to before it is merged back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MovieChanges {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = GENRE_MAX_LEN,
        message = "Genre is required and must be at most 50 characters"
    ))]
    pub genre: String,

    #[validate(range(
        min = MIN_DURATION,
        max = MAX_DURATION,
        message = "Duration must be between 70 and 600 minutes"
    ))]
    pub duration: i32,

    #[serde(default)]
    pub release_date: Option<NaiveDate>,
}

impl From<movies::Model> for Movie {
    fn from(model: movies::Model) -> Self {
        let movies::Model {
            id,
            title,
            genre,
            duration,
            release_date,
        } = model;

        Self {
            id,
            title,
            genre,
            duration,
            release_date,
        }
    }
}

impl IntoActiveModel<movies::ActiveModel> for NewMovie {
    fn into_active_model(self) -> movies::ActiveModel {
        let Self {
            title,
            genre,
            duration,
            release_date,
        } = self;

        movies::ActiveModel {
            id: NotSet,
            title: Set(title),
            genre: Set(genre),
            duration: Set(duration),
            release_date: Set(release_date),
        }
    }
}

impl From<&movies::Model> for MovieChanges {
    fn from(model: &movies::Model) -> Self {
        let movies::Model {
            id: _,
            title,
            genre,
            duration,
            release_date,
        } = model;

        Self {
            title: title.clone(),
            genre: genre.clone(),
            duration: *duration,
            release_date: *release_date,
        }
    }
}

impl MovieChanges {
    /// Overwrites every mutable column of `target`, even when the value is
    /// unchanged. The primary key is left alone.
    pub fn apply_to(self, target: &mut movies::ActiveModel) {
        let Self {
            title,
            genre,
            duration,
            release_date,
        } = self;

        target.title = Set(title);
        target.genre = Set(genre);
        target.duration = Set(duration);
        target.release_date = Set(release_date);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ActiveValue;

    fn interstellar() -> NewMovie {
        NewMovie {
            title: "Interstellar".to_string(),
            genre: "Sci-Fi".to_string(),
            duration: 169,
            release_date: None,
        }
    }

    #[test]
    fn test_valid_new_movie() {
        assert!(interstellar().validate().is_ok());
    }

    #[test]
    fn test_new_movie_constraints() {
        let mut movie = interstellar();
        movie.title = String::new();
        movie.genre = "x".repeat(usize::try_from(GENRE_MAX_LEN).unwrap() + 1);
        movie.duration = MIN_DURATION - 1;

        let errors = movie.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("genre"));
        assert!(fields.contains_key("duration"));
    }

    #[test]
    fn test_duration_bounds_are_inclusive() {
        let mut movie = interstellar();
        movie.duration = MIN_DURATION;
        assert!(movie.validate().is_ok());
        movie.duration = MAX_DURATION;
        assert!(movie.validate().is_ok());
        movie.duration = MAX_DURATION + 1;
        assert!(movie.validate().is_err());
    }

    #[test]
    fn test_genre_limit_matches_constant() {
        let limit = usize::try_from(GENRE_MAX_LEN).unwrap();

        let mut changes = MovieChanges::from(&movies::Model {
            id: 1,
            title: "Alien".to_string(),
            genre: "x".repeat(limit),
            duration: 117,
            release_date: None,
        });
        assert!(changes.validate().is_ok());

        changes.genre.push('x');
        assert!(changes.validate().unwrap_err().field_errors().contains_key("genre"));
    }

    #[test]
    fn test_new_movie_leaves_id_unset() {
        let active = interstellar().into_active_model();
        assert!(matches!(active.id, ActiveValue::NotSet));
        assert_eq!(active.title, ActiveValue::Set("Interstellar".to_string()));
    }

    #[test]
    fn test_projection_and_merge() {
        let model = movies::Model {
            id: 7,
            title: "Alien".to_string(),
            genre: "Horror".to_string(),
            duration: 117,
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25),
        };

        let mut changes = MovieChanges::from(&model);
        assert_eq!(changes.duration, 117);

        changes.duration = 116;
        let mut active: movies::ActiveModel = model.into();
        changes.apply_to(&mut active);

        assert_eq!(active.id, ActiveValue::Unchanged(7));
        assert_eq!(active.duration, ActiveValue::Set(116));
        assert_eq!(active.title, ActiveValue::Set("Alien".to_string()));
    }

    #[test]
    fn test_release_date_is_optional_in_json() {
        let movie: NewMovie = serde_json::from_str(
            r#"{"title":"Interstellar","genre":"Sci-Fi","duration":169}"#,
        )
        .unwrap();
        assert_eq!(movie.release_date, None);

        let movie: NewMovie = serde_json::from_str(
            r#"{"title":"Interstellar","genre":"Sci-Fi","duration":169,"release_date":"2014-11-07"}"#,
        )
        .unwrap();
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(2014, 11, 7));
    }
}
