use std::io::ErrorKind;
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error(transparent)]
  IO(#[from] std::io::Error),
  #[error(transparent)]
  Http(#[from] reqwest::Error),
  #[error("api request rejected with status code {0}")]
  Status(reqwest::StatusCode),
}

pub(crate) fn new_io_error(msg: &str) -> Error {
  Error::IO(std::io::Error::new(ErrorKind::InvalidData, msg))
}
