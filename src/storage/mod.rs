//! File store used by the reader, editor and file manager.
//!
//! [`Storage`] is the seam to the medium: a flat directory of named files
//! with seek-and-read access. [`RamFs`] is the in-memory implementation the
//! firmware uses; the board layer mirrors it to flash whenever it is dirty.
//!
//! Flash image layout (one map item per file slot):
//!   `[name_len][name bytes][file bytes...]`, an empty item marks a free slot.

pub mod catalog;

use crate::config::{MAX_FILES, MAX_FILE_BYTES, MAX_FILE_NAME};
use crate::Error;
use heapless::{String, Vec};

/// Size of the largest serialized file slot.
pub const MAX_SLOT_BYTES: usize = 1 + MAX_FILE_NAME + MAX_FILE_BYTES;

/// Directory entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String<MAX_FILE_NAME>,
    pub size: usize,
}

impl FileInfo {
    /// Whether the name is `stem.ext` with a non-empty stem (ASCII
    /// case-insensitive).
    pub fn has_extension(&self, ext: &str) -> bool {
        match self.name.rsplit_once('.') {
            Some((stem, e)) => !stem.is_empty() && e.eq_ignore_ascii_case(ext),
            None => false,
        }
    }
}

/// Flat file store.
pub trait Storage {
    /// Number of files in the directory.
    fn file_count(&self) -> usize;

    /// The `index`-th directory entry, in directory order.
    fn entry(&self, index: usize) -> Option<FileInfo>;

    fn exists(&self, name: &str) -> bool;

    /// Copy bytes starting at `offset` into `buf`; returns how many were
    /// copied (zero at end of file).
    fn read_at(&self, name: &str, offset: usize, buf: &mut [u8]) -> Result<usize, Error>;

    /// Create or overwrite a file.
    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), Error>;

    fn remove(&mut self, name: &str) -> Result<(), Error>;
}

struct RamFile {
    name: String<MAX_FILE_NAME>,
    data: Vec<u8, MAX_FILE_BYTES>,
}

/// In-memory file table with a dirty flag for write-back.
pub struct RamFs {
    files: Vec<RamFile, MAX_FILES>,
    mounted: bool,
    dirty: bool,
}

impl Default for RamFs {
    fn default() -> Self {
        Self::new()
    }
}

impl RamFs {
    /// Create an empty, mounted store.
    pub const fn new() -> Self {
        Self {
            files: Vec::new(),
            mounted: true,
            dirty: false,
        }
    }

    /// A store whose medium failed to mount; every operation reports
    /// [`Error::NotMounted`].
    pub const fn unmounted() -> Self {
        Self {
            files: Vec::new(),
            mounted: false,
            dirty: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True if the table changed since the last [`RamFs::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.files.iter().position(|f| f.name.as_str() == name)
    }

    fn check_mounted(&self) -> Result<(), Error> {
        if self.mounted {
            Ok(())
        } else {
            Err(Error::NotMounted)
        }
    }

    /// Serialize slot `slot` into `buf` (flash image layout). A free slot
    /// serializes to zero bytes.
    pub fn serialize_slot(&self, slot: usize, buf: &mut [u8]) -> usize {
        let Some(file) = self.files.get(slot) else {
            return 0;
        };
        let name = file.name.as_bytes();
        let total = 1 + name.len() + file.data.len();
        if buf.len() < total {
            return 0;
        }
        buf[0] = name.len() as u8;
        buf[1..1 + name.len()].copy_from_slice(name);
        buf[1 + name.len()..total].copy_from_slice(&file.data);
        total
    }

    /// Restore one slot from its flash image. Empty or malformed images are
    /// skipped.
    pub fn restore_slot(&mut self, image: &[u8]) -> Result<(), Error> {
        let Some((&name_len, rest)) = image.split_first() else {
            return Ok(());
        };
        let name_len = name_len as usize;
        if name_len == 0 || rest.len() < name_len {
            return Ok(());
        }
        let name = core::str::from_utf8(&rest[..name_len]).map_err(|_| Error::NameTooLong)?;
        self.insert(name, &rest[name_len..])
    }

    fn insert(&mut self, name: &str, data: &[u8]) -> Result<(), Error> {
        if name.is_empty() {
            return Err(Error::NameTooLong);
        }
        let name: String<MAX_FILE_NAME> = String::try_from(name).map_err(|_| Error::NameTooLong)?;
        let data: Vec<u8, MAX_FILE_BYTES> = Vec::from_slice(data).map_err(|_| Error::FileTooLarge)?;

        match self.find(name.as_str()) {
            Some(i) => self.files[i].data = data,
            None => self
                .files
                .push(RamFile { name, data })
                .map_err(|_| Error::StorageFull)?,
        }
        Ok(())
    }
}

impl Storage for RamFs {
    fn file_count(&self) -> usize {
        self.files.len()
    }

    fn entry(&self, index: usize) -> Option<FileInfo> {
        let file = self.files.get(index)?;
        Some(FileInfo {
            name: file.name.clone(),
            size: file.data.len(),
        })
    }

    fn exists(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    fn read_at(&self, name: &str, offset: usize, buf: &mut [u8]) -> Result<usize, Error> {
        self.check_mounted()?;
        let i = self.find(name).ok_or(Error::NotFound)?;
        let data = &self.files[i].data;
        if offset >= data.len() {
            return Ok(0);
        }
        let n = buf.len().min(data.len() - offset);
        buf[..n].copy_from_slice(&data[offset..offset + n]);
        Ok(n)
    }

    fn write(&mut self, name: &str, data: &[u8]) -> Result<(), Error> {
        self.check_mounted()?;
        self.insert(name, data)?;
        self.dirty = true;
        info!("storage: wrote {} ({} bytes)", name, data.len());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<(), Error> {
        self.check_mounted()?;
        let i = self.find(name).ok_or(Error::NotFound)?;
        self.files.remove(i);
        self.dirty = true;
        info!("storage: removed {}", name);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests (run on host, not embedded)
// ═══════════════════════════════════════════════════════════════════════════
