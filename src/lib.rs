pub mod file;
pub mod record;
pub mod repl;
pub mod table;

pub use file::{FileError, FileResult, MAX_PAGES, PAGE_SIZE, PageId, Pager};
pub use record::{EMAIL_SIZE, ROW_SIZE, ROWS_PER_PAGE, Row, USERNAME_SIZE};
pub use repl::{Repl, Statement, StatementError};
pub use table::{MAX_ROWS, Table, TableError, TableResult};
