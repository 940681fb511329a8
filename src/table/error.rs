use std::io;
use thiserror::Error;

use crate::file::FileError;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File error: {0}")]
    File(#[from] FileError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Table full")]
    TableFull,
}

pub type TableResult<T> = Result<T, TableError>;
