//! Persistent file table in the nRF52840's internal flash.
//!
//! Uses the `sequential-storage` map so the flash pages get wear levelling
//! and GC. Each file slot is serialized with [`RamFs::serialize_slot`] and
//! split into items of at most [`FLASH_CHUNK_BYTES`]:
//!
//!   key = slot << 4 | chunk
//!
//! A chunk shorter than [`FLASH_CHUNK_BYTES`] ends the slot; an empty
//! chunk 0 marks a free slot.

use defmt::{debug, error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map::{fetch_item, store_item};
use temaos::config::{FLASH_CHUNK_BYTES, MAX_FILES, STORAGE_FLASH_PAGE_COUNT, STORAGE_FLASH_PAGE_START};
use temaos::storage::{RamFs, Storage, MAX_SLOT_BYTES};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Chunks needed for the largest slot.
const CHUNKS_PER_SLOT: usize = MAX_SLOT_BYTES.div_ceil(FLASH_CHUNK_BYTES);

/// Scratch space for one map item (key, length header, chunk, alignment).
const ITEM_BUF_BYTES: usize = FLASH_CHUNK_BYTES + 32;

fn chunk_key(slot: usize, chunk: usize) -> u16 {
    ((slot as u16) << 4) | chunk as u16
}

/// Load every slot into a fresh table. A flash error gives an unmounted
/// table, so the UI reports it instead of silently losing writes.
pub async fn load(flash: &mut impl NorFlash) -> RamFs {
    let mut fs = RamFs::new();
    let mut image = [0u8; MAX_SLOT_BYTES];
    let mut buf = [0u8; ITEM_BUF_BYTES];

    for slot in 0..MAX_FILES {
        let mut len = 0;
        for chunk in 0..CHUNKS_PER_SLOT {
            let item = fetch_item::<u16, &[u8], _>(
                flash,
                STORAGE_START..STORAGE_END,
                &mut NoCache::new(),
                &mut buf,
                &chunk_key(slot, chunk),
            )
            .await;
            let data = match item {
                Ok(Some(data)) => data,
                Ok(None) => break,
                Err(e) => {
                    error!("Flash read error: {:?}", defmt::Debug2Format(&e));
                    return RamFs::unmounted();
                }
            };
            let end = (len + data.len()).min(MAX_SLOT_BYTES);
            image[len..end].copy_from_slice(&data[..end - len]);
            len = end;
            if data.len() < FLASH_CHUNK_BYTES {
                break;
            }
        }
        if let Err(e) = fs.restore_slot(&image[..len]) {
            warn!("Flash slot {} skipped: {}", slot, e);
        }
    }

    fs.mark_clean();
    info!("Loaded {} files from flash", fs.file_count());
    fs
}

/// Write the whole table back and clear its dirty flag.
///
/// Errors are logged and the flag is cleared anyway so a failing flash does
/// not retry on every loop.
pub async fn save(flash: &mut impl NorFlash, fs: &mut RamFs) {
    if !fs.is_dirty() {
        debug!("Flash: no changes to save");
        return;
    }

    let mut image = [0u8; MAX_SLOT_BYTES];
    let mut buf = [0u8; ITEM_BUF_BYTES];
    let mut ok = true;

    'slots: for slot in 0..MAX_FILES {
        let len = fs.serialize_slot(slot, &mut image);
        let mut chunks = image[..len].chunks(FLASH_CHUNK_BYTES);
        for chunk in 0..CHUNKS_PER_SLOT {
            // A short (possibly empty) chunk terminates the slot.
            let data = chunks.next().unwrap_or(&[]);
            let stored = store_item::<u16, &[u8], _>(
                flash,
                STORAGE_START..STORAGE_END,
                &mut NoCache::new(),
                &mut buf,
                &chunk_key(slot, chunk),
                &data,
            )
            .await;
            if let Err(e) = stored {
                error!("Flash write error: {:?}", defmt::Debug2Format(&e));
                ok = false;
                break 'slots;
            }
            if data.len() < FLASH_CHUNK_BYTES {
                break;
            }
        }
    }

    if ok {
        info!("Saved {} files to flash", fs.file_count());
    }
    fs.mark_clean();
}
