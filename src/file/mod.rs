mod error;
mod pager;

pub use error::{FileError, FileResult};
pub use pager::Pager;

/// Page size in bytes (4KB)
pub const PAGE_SIZE: usize = 4096;

/// Hard cap on the number of pages a backing file may use. Together with
/// the slot size this bounds capacity, which is what makes the never-evict
/// page cache acceptable.
pub const MAX_PAGES: usize = 100;

/// Page ID type
pub type PageId = usize;
