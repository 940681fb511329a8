use std::io;
use thiserror::Error;

use super::PageId;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt database file: length {0} does not end on a slot boundary")]
    CorruptFile(u64),

    #[error("Page out of bounds: page_id={0}")]
    PageOutOfBounds(PageId),
}

pub type FileResult<T> = Result<T, FileError>;
