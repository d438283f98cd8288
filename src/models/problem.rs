use serde::Serialize;
use std::collections::BTreeMap;
use validator::ValidationErrors;

pub const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc4918#section-11.2";
pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";

/// Problem details body listing every failed constraint by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationProblem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub errors: BTreeMap<String, Vec<String>>,
}

impl Default for ValidationProblem {
    fn default() -> Self {
        Self {
            kind: VALIDATION_PROBLEM_TYPE.to_string(),
            title: VALIDATION_PROBLEM_TITLE.to_string(),
            status: 422,
            errors: BTreeMap::new(),
        }
    }
}

impl ValidationProblem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Appends every failure of `other`, keeping failures already recorded.
    pub fn merge(&mut self, other: Self) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<ValidationErrors> for ValidationProblem {
    fn from(errors: ValidationErrors) -> Self {
        let mut problem = Self::new();

        for (field, failures) in errors.field_errors() {
            for failure in failures {
                let message = failure
                    .message
                    .as_ref()
                    .map_or_else(|| failure.code.to_string(), ToString::to_string);
                problem.add(field.to_string(), message);
            }
        }

        problem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::movie::NewMovie;
    use validator::Validate;

    #[test]
    fn test_problem_from_validation_errors() {
        let movie = NewMovie {
            title: String::new(),
            genre: "Drama".to_string(),
            duration: 30,
            release_date: None,
        };

        let problem = ValidationProblem::from(movie.validate().unwrap_err());

        assert_eq!(problem.status, 422);
        assert_eq!(problem.errors.len(), 2);
        assert_eq!(problem.errors["title"], vec!["Title is required"]);
        assert_eq!(
            problem.errors["duration"],
            vec!["Duration must be between 70 and 600 minutes"]
        );
    }

    #[test]
    fn test_merge_keeps_existing_failures() {
        let mut problem = ValidationProblem::new().with_error("/duration", "expected a number");
        problem.merge(ValidationProblem::new().with_error("title", "Title is required"));
        problem.merge(ValidationProblem::new().with_error("/duration", "test failed"));

        assert_eq!(problem.errors.len(), 2);
        assert_eq!(problem.errors["/duration"].len(), 2);
        assert_eq!(problem.errors["title"], vec!["Title is required"]);
    }

    #[test]
    fn test_problem_serialization() {
        let problem = ValidationProblem::new().with_error("/duration", "expected a number");
        let json = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["type"], VALIDATION_PROBLEM_TYPE);
        assert_eq!(json["status"], 422);
        assert_eq!(json["errors"]["/duration"][0], "expected a number");
    }
}
