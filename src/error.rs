use polars::error::PolarsError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("column `{0}` does not exist in the dataframe")]
  MissingColumn(String),

  #[error("`{param}` must be {expected}, got `{actual}`")]
  TypeKind { param: &'static str, expected: &'static str, actual: String },

  #[error("{0}")]
  Shape(String),

  #[error("computation failed: {0}")]
  Computation(#[from] PolarsError),

  #[error("failed to write image: {0}")]
  Image(#[from] image::ImageError),
}
