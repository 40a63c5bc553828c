//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod article;
pub mod validation;

pub use article::{Article, ArticleUpdate, Author, NewArticle, MAX_TITLE_LEN};
pub use validation::ValidationError;
