//! Patch documents applied to a [`MovieChanges`] projection.
//!
//! Two request forms are accepted and both normalise to an ordered list of
//! [`PatchOperation`]s:
//!
//! - an RFC 6902 array: `[{"op": "replace", "path": "/duration", "value": 120}]`
//! - a merge-style object: `{"duration": 120, "release_date": null}`, where
//!   `null` removes the field and any other value replaces it.

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use super::movie::MovieChanges;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Replace { path: String, value: Value },
    Remove { path: String },
    Copy { from: String, path: String },
    Move { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Add { path, .. }
            | Self::Replace { path, .. }
            | Self::Remove { path }
            | Self::Copy { path, .. }
            | Self::Move { path, .. }
            | Self::Test { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PatchDocument {
    Operations(Vec<PatchOperation>),
    Merge(Map<String, Value>),
}

impl PatchDocument {
    #[must_use]
    pub fn into_operations(self) -> Vec<PatchOperation> {
        match self {
            Self::Operations(operations) => operations,
            Self::Merge(fields) => fields
                .into_iter()
                .map(|(key, value)| {
                    let path = format!("/{key}");
                    if value.is_null() {
                        PatchOperation::Remove { path }
                    } else {
                        PatchOperation::Replace { path, value }
                    }
                })
                .collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatchError {
    #[error("The target location specified by path '{0}' was not found")]
    UnknownPath(String),

    #[error("The value for '{path}' is invalid: {message}")]
    InvalidValue { path: String, message: String },

    #[error("The current value at '{0}' is not equal to the test value")]
    TestFailed(String),
}

impl PatchError {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::UnknownPath(path) | Self::TestFailed(path) => path,
            Self::InvalidValue { path, .. } => path,
        }
    }
}

/// A patchable field of the update shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MovieField {
    Title,
    Genre,
    Duration,
    ReleaseDate,
}

impl MovieField {
    fn parse(path: &str) -> Result<Self, PatchError> {
        let name = path.strip_prefix('/').unwrap_or(path).to_ascii_lowercase();
        match name.as_str() {
            "title" => Ok(Self::Title),
            "genre" => Ok(Self::Genre),
            "duration" => Ok(Self::Duration),
            "release_date" | "releasedate" => Ok(Self::ReleaseDate),
            _ => Err(PatchError::UnknownPath(path.to_string())),
        }
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, PatchError> {
    serde_json::from_value(value).map_err(|e| PatchError::InvalidValue {
        path: path.to_string(),
        message: e.to_string(),
    })
}

impl MovieChanges {
    fn get(&self, field: MovieField) -> Value {
        match field {
            MovieField::Title => Value::from(self.title.clone()),
            MovieField::Genre => Value::from(self.genre.clone()),
            MovieField::Duration => Value::from(self.duration),
            MovieField::ReleaseDate => self
                .release_date
                .map_or(Value::Null, |d| Value::from(d.to_string())),
        }
    }

    fn set(&mut self, field: MovieField, path: &str, value: Value) -> Result<(), PatchError> {
        match field {
            MovieField::Title => self.title = decode(path, value)?,
            MovieField::Genre => self.genre = decode(path, value)?,
            MovieField::Duration => self.duration = decode(path, value)?,
            MovieField::ReleaseDate => {
                self.release_date = decode::<Option<NaiveDate>>(path, value)?;
            }
        }
        Ok(())
    }

    /// Resets a field to its empty value. Required fields then fail validation.
    fn clear(&mut self, field: MovieField) {
        match field {
            MovieField::Title => self.title.clear(),
            MovieField::Genre => self.genre.clear(),
            MovieField::Duration => self.duration = 0,
            MovieField::ReleaseDate => self.release_date = None,
        }
    }

    /// Applies `operations` in order. A failing operation leaves the
    /// projection untouched and is collected; later operations still run.
    pub fn apply_patch(&mut self, operations: &[PatchOperation]) -> Result<(), Vec<PatchError>> {
        let errors: Vec<PatchError> = operations
            .iter()
            .filter_map(|operation| self.apply_operation(operation).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn apply_operation(&mut self, operation: &PatchOperation) -> Result<(), PatchError> {
        match operation {
            PatchOperation::Add { path, value } | PatchOperation::Replace { path, value } => {
                let field = MovieField::parse(path)?;
                self.set(field, path, value.clone())
            }
            PatchOperation::Remove { path } => {
                let field = MovieField::parse(path)?;
                self.clear(field);
                Ok(())
            }
            PatchOperation::Copy { from, path } => {
                let source = MovieField::parse(from)?;
                let target = MovieField::parse(path)?;
                let value = self.get(source);
                self.set(target, path, value)
            }
            PatchOperation::Move { from, path } => {
                let source = MovieField::parse(from)?;
                let target = MovieField::parse(path)?;
                let value = self.get(source);
                self.set(target, path, value)?;
                if source != target {
                    self.clear(source);
                }
                Ok(())
            }
            PatchOperation::Test { path, value } => {
                let field = MovieField::parse(path)?;
                if self.get(field) == *value {
                    Ok(())
                } else {
                    Err(PatchError::TestFailed(path.clone()))
                }
            }
        }
    }
}
