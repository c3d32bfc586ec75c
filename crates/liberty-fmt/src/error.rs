use liberty_syntax::shape::ShapeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatterError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
}
