pub mod movie;
pub mod patch;
pub mod problem;

pub use movie::{Movie, MovieChanges, NewMovie};
pub use patch::{PatchDocument, PatchError, PatchOperation};
pub use problem::ValidationProblem;
