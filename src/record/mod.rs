mod row;

pub use row::Row;

use crate::file::PAGE_SIZE;

/// Maximum byte length of the username column
pub const USERNAME_SIZE: usize = 32;

/// Maximum byte length of the email column
pub const EMAIL_SIZE: usize = 255;

pub(crate) const ID_SIZE: usize = size_of::<u32>();
pub(crate) const ID_OFFSET: usize = 0;
pub(crate) const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub(crate) const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;

/// Encoded width of one row slot
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/// Row slots per page
pub const ROWS_PER_PAGE: usize = PAGE_SIZE / ROW_SIZE;
