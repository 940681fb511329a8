mod error;

pub use error::{TableError, TableResult};

use std::path::Path;

use crate::file::{MAX_PAGES, PageId, Pager};
use crate::record::{ROW_SIZE, ROWS_PER_PAGE, Row};

/// Hard row capacity derived from the page cap
pub const MAX_ROWS: usize = ROWS_PER_PAGE * MAX_PAGES;

/// The single table backed by one paged file. Append-only: rows live at
/// the slot address derived from their insertion index, and the row count
/// is recovered from the file length at open time rather than stored.
///
/// A table assumes exclusive ownership of its backing file for the whole
/// process lifetime. Two instances pointed at the same path concurrently
/// are unsupported and produce unspecified results.
pub struct Table {
    pager: Pager,
    row_count: usize,
}

impl Table {
    /// Open the table over `path`, creating the file if absent.
    pub fn open<P: AsRef<Path>>(path: P) -> TableResult<Self> {
        let pager = Pager::open(path, ROW_SIZE)?;
        let row_count = pager.slot_count();
        Ok(Self { pager, row_count })
    }

    /// Number of rows currently stored.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Append a row. Rows are immutable once inserted; insertion order is
    /// the only order.
    pub fn insert(&mut self, row: &Row) -> TableResult<()> {
        if self.row_count >= MAX_ROWS {
            return Err(TableError::TableFull);
        }

        let (page_id, offset) = slot_address(self.row_count);
        let page = self.pager.page_mut(page_id)?;
        row.write_to(&mut page[offset..offset + ROW_SIZE]);
        self.row_count += 1;
        Ok(())
    }

    /// Lazy, insertion-ordered iterator over all rows. Each call restarts
    /// from the first slot; scanning mutates nothing beyond page-cache
    /// population, so repeated scans yield identical sequences.
    pub fn scan(&mut self) -> Rows<'_> {
        Rows {
            table: self,
            next: 0,
        }
    }

    /// Write every dirty page holding rows back to the backing file, then
    /// sync. Each page is written truncated to its occupied slots so the
    /// file length keeps encoding the exact row count.
    pub fn flush(&mut self) -> TableResult<()> {
        if self.row_count > 0 {
            let last = (self.row_count - 1) / ROWS_PER_PAGE;
            for page_id in 0..=last {
                let rows_in_page = (self.row_count - page_id * ROWS_PER_PAGE).min(ROWS_PER_PAGE);
                self.pager.flush_page(page_id, rows_in_page * ROW_SIZE)?;
            }
        }
        self.pager.sync()?;
        Ok(())
    }
}

/// Translate a row index into its (page, byte offset) slot address.
fn slot_address(row_index: usize) -> (PageId, usize) {
    (
        row_index / ROWS_PER_PAGE,
        (row_index % ROWS_PER_PAGE) * ROW_SIZE,
    )
}

/// Streaming scan over a table's rows.
pub struct Rows<'a> {
    table: &'a mut Table,
    next: usize,
}

impl Iterator for Rows<'_> {
    type Item = TableResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.table.row_count {
            return None;
        }

        let (page_id, offset) = slot_address(self.next);
        self.next += 1;

        let page = match self.table.pager.page(page_id) {
            Ok(page) => page,
            Err(err) => return Some(Err(err.into())),
        };
        Some(Ok(Row::read_from(&page[offset..offset + ROW_SIZE])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{EMAIL_SIZE, USERNAME_SIZE};
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    fn make_row(i: usize) -> Row {
        Row {
            id: i as u32 + 1,
            username: format!("user{i}"),
            email: format!("person{i}@example.com"),
        }
    }

    fn collect_rows(table: &mut Table) -> Vec<Row> {
        table.scan().collect::<TableResult<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_insert_then_scan() {
        let temp_dir = setup_test_dir();
        let mut table = Table::open(temp_dir.path().join("test.db")).unwrap();

        let row = make_row(0);
        table.insert(&row).unwrap();

        assert_eq!(table.row_count(), 1);
        assert_eq!(collect_rows(&mut table), vec![row]);
    }

    #[test]
    fn test_scan_is_restartable() {
        let temp_dir = setup_test_dir();
        let mut table = Table::open(temp_dir.path().join("test.db")).unwrap();

        for i in 0..5 {
            table.insert(&make_row(i)).unwrap();
        }

        let first = collect_rows(&mut table);
        let second = collect_rows(&mut table);
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rows_cross_page_boundary() {
        let temp_dir = setup_test_dir();
        let mut table = Table::open(temp_dir.path().join("test.db")).unwrap();

        let count = ROWS_PER_PAGE * 2 + 3;
        for i in 0..count {
            table.insert(&make_row(i)).unwrap();
        }

        let rows = collect_rows(&mut table);
        assert_eq!(rows.len(), count);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(*row, make_row(i));
        }
    }

    #[test]
    fn test_table_full_at_capacity() {
        let temp_dir = setup_test_dir();
        let mut table = Table::open(temp_dir.path().join("test.db")).unwrap();

        for i in 0..MAX_ROWS {
            table.insert(&make_row(i)).unwrap();
        }
        assert_eq!(table.row_count(), MAX_ROWS);

        let result = table.insert(&make_row(MAX_ROWS));
        assert!(matches!(result, Err(TableError::TableFull)));
        assert_eq!(table.row_count(), MAX_ROWS);
    }

    #[test]
    fn test_flush_truncates_last_page_to_rows() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("test.db");
        let mut table = Table::open(&path).unwrap();

        let count = ROWS_PER_PAGE + 2;
        for i in 0..count {
            table.insert(&make_row(i)).unwrap();
        }
        table.flush().unwrap();

        // Page 0 occupies a full page extent, page 1 holds two slots.
        let expected = (crate::file::PAGE_SIZE + 2 * ROW_SIZE) as u64;
        assert_eq!(fs::metadata(&path).unwrap().len(), expected);
    }

    #[test]
    fn test_persistence_round_trip() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("test.db");
        let count = ROWS_PER_PAGE + 5;

        {
            let mut table = Table::open(&path).unwrap();
            for i in 0..count {
                table.insert(&make_row(i)).unwrap();
            }
            table.flush().unwrap();
        }

        let mut table = Table::open(&path).unwrap();
        assert_eq!(table.row_count(), count);
        let rows = collect_rows(&mut table);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(*row, make_row(i));
        }
    }

    #[test]
    fn test_persistence_with_max_length_strings() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("test.db");
        let row = Row {
            id: 1,
            username: "a".repeat(USERNAME_SIZE),
            email: "b".repeat(EMAIL_SIZE),
        };

        {
            let mut table = Table::open(&path).unwrap();
            table.insert(&row).unwrap();
            table.flush().unwrap();
        }

        let mut table = Table::open(&path).unwrap();
        assert_eq!(collect_rows(&mut table), vec![row]);
    }

    #[test]
    fn test_persistence_at_full_capacity() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("test.db");

        {
            let mut table = Table::open(&path).unwrap();
            for i in 0..MAX_ROWS {
                table.insert(&make_row(i)).unwrap();
            }
            table.flush().unwrap();
        }

        // The length-derived count must stay exact even with every page
        // extent full.
        let mut table = Table::open(&path).unwrap();
        assert_eq!(table.row_count(), MAX_ROWS);
        assert!(matches!(
            table.insert(&make_row(MAX_ROWS)),
            Err(TableError::TableFull)
        ));
    }

    #[test]
    fn test_select_only_session_leaves_file_untouched() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("test.db");

        {
            let mut table = Table::open(&path).unwrap();
            for i in 0..3 {
                table.insert(&make_row(i)).unwrap();
            }
            table.flush().unwrap();
        }
        let len_before = fs::metadata(&path).unwrap().len();

        {
            let mut table = Table::open(&path).unwrap();
            let _ = collect_rows(&mut table);
            table.flush().unwrap();
        }
        assert_eq!(fs::metadata(&path).unwrap().len(), len_before);
    }

    #[test]
    fn test_unflushed_rows_are_lost() {
        let temp_dir = setup_test_dir();
        let path = temp_dir.path().join("test.db");

        {
            let mut table = Table::open(&path).unwrap();
            table.insert(&make_row(0)).unwrap();
            // Dropped without flush: the session's inserts never hit disk.
        }

        let table = Table::open(&path).unwrap();
        assert_eq!(table.row_count(), 0);
    }
}
