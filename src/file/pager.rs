use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::error::{FileError, FileResult};
use super::{MAX_PAGES, PAGE_SIZE, PageId};

/// One resident page buffer
struct Frame {
    data: Box<[u8]>,
    /// Whether this page has been modified since load
    dirty: bool,
}

/// Maps page numbers onto one backing file through an arena of lazily
/// allocated frames. Frames are never evicted: every touched page stays
/// resident until the pager is dropped, bounded by `MAX_PAGES`.
///
/// The pager is slot-agnostic beyond one rule: the file may end mid-page,
/// and that tail must be a whole number of `slot_size` units so the file
/// length alone recovers how many slots are stored.
pub struct Pager {
    file: File,
    file_length: u64,
    slot_size: usize,
    frames: Vec<Option<Frame>>,
}

impl Pager {
    /// Open (or create) a backing file for slots of `slot_size` bytes.
    /// Fails with `CorruptFile` when the partial-page tail of the file is
    /// not slot-aligned.
    pub fn open<P: AsRef<Path>>(path: P, slot_size: usize) -> FileResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        let file_length = file.metadata()?.len();
        let tail = file_length as usize % PAGE_SIZE;
        if tail % slot_size != 0 {
            return Err(FileError::CorruptFile(file_length));
        }

        Ok(Self {
            file,
            file_length,
            slot_size,
            frames: (0..MAX_PAGES).map(|_| None).collect(),
        })
    }

    /// Number of slots stored on disk, derived from the file length alone.
    /// Full-page extents occupy `PAGE_SIZE` bytes each (including the
    /// unused slack past the last slot); the tail holds whole slots.
    pub fn slot_count(&self) -> usize {
        let slots_per_page = PAGE_SIZE / self.slot_size;
        let len = self.file_length as usize;
        (len / PAGE_SIZE) * slots_per_page + (len % PAGE_SIZE) / self.slot_size
    }

    /// Current length of the backing file in bytes.
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Get a page for reading, loading it from disk on first touch.
    pub fn page(&mut self, page_id: PageId) -> FileResult<&[u8]> {
        let frame = self.ensure_resident(page_id)?;
        Ok(&frame.data)
    }

    /// Get a page for writing. Marks the frame dirty.
    pub fn page_mut(&mut self, page_id: PageId) -> FileResult<&mut [u8]> {
        let frame = self.ensure_resident(page_id)?;
        frame.dirty = true;
        Ok(&mut frame.data)
    }

    /// Write the first `byte_count` bytes of page `page_id` back to the
    /// file at its fixed offset. No-op when the frame is absent or clean.
    pub fn flush_page(&mut self, page_id: PageId, byte_count: usize) -> FileResult<()> {
        let Some(frame) = self.frames.get_mut(page_id).and_then(Option::as_mut) else {
            return Ok(());
        };
        if !frame.dirty {
            return Ok(());
        }

        let offset = (page_id * PAGE_SIZE) as u64;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(&frame.data[..byte_count])?;
        frame.dirty = false;

        let end = offset + byte_count as u64;
        if end > self.file_length {
            self.file_length = end;
        }
        Ok(())
    }

    /// Sync the backing file to disk (flush all OS buffers).
    pub fn sync(&mut self) -> FileResult<()> {
        self.file.sync_data()?;
        Ok(())
    }

    /// Number of dirty frames currently resident.
    pub fn dirty_page_count(&self) -> usize {
        self.frames
            .iter()
            .flatten()
            .filter(|frame| frame.dirty)
            .count()
    }

    /// Check if a page is resident in the arena.
    pub fn is_resident(&self, page_id: PageId) -> bool {
        matches!(self.frames.get(page_id), Some(Some(_)))
    }

    fn ensure_resident(&mut self, page_id: PageId) -> FileResult<&mut Frame> {
        if page_id >= MAX_PAGES {
            return Err(FileError::PageOutOfBounds(page_id));
        }

        if self.frames[page_id].is_none() {
            let mut data = vec![0u8; PAGE_SIZE].into_boxed_slice();
            let offset = (page_id * PAGE_SIZE) as u64;

            // Pages past the current file extent start out zero-filled; a
            // short read near EOF leaves the remainder zeroed the same way.
            if offset < self.file_length {
                self.file.seek(SeekFrom::Start(offset))?;
                let mut filled = 0;
                while filled < PAGE_SIZE {
                    let n = self.file.read(&mut data[filled..])?;
                    if n == 0 {
                        break;
                    }
                    filled += n;
                }
            }

            self.frames[page_id] = Some(Frame { data, dirty: false });
        }

        match self.frames[page_id].as_mut() {
            Some(frame) => Ok(frame),
            None => unreachable!("frame resident after load"),
        }
    }
}
