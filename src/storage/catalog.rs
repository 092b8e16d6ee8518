//! Files installed on first boot so the reader has something to show.

use super::Storage;
use crate::config::{MAX_FILE_BYTES, SCREEN_WIDTH};
use crate::render::{self, FrameBuffer, TextSize};
use crate::Error;
use heapless::Vec;

pub const WELCOME_NAME: &str = "welcome.txt";
pub const LOGO_NAME: &str = "logo.tos";

pub const WELCOME_TEXT: &str = "Welcome to TemaOS!\n\
\n\
This pocket console runs a menu shell, a set of small apps and a handful of classic games on a 128x64 screen.\n\
\n\
Buttons: UP and DOWN move the cursor, LEFT and RIGHT flip pages, SELECT opens the item under the cursor and EXIT goes back.\n\
\n\
In the reader DOWN shows the next page and UP goes back to the previous one. Files ending in .tos are pictures and fill the whole screen.\n\
\n\
Write your own notes with the text editor; they are saved as note.txt and show up here.\n";

/// Rows of the raster stored in the logo (two 8-pixel pages).
const LOGO_PAGES: usize = 2;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Install the catalog into an empty store. A store that already holds
/// files is left alone.
pub fn install_defaults<S: Storage>(storage: &mut S) -> Result<(), Error> {
    if storage.file_count() > 0 {
        return Ok(());
    }
    storage.write(WELCOME_NAME, WELCOME_TEXT.as_bytes())?;
    storage.write(LOGO_NAME, &logo_image())?;
    info!("storage: installed default files");
    Ok(())
}

/// The logo as `.tos` text: the top two pages of a frame with the name and
/// an underline.
pub fn logo_image() -> Vec<u8, MAX_FILE_BYTES> {
    let mut fb = FrameBuffer::new();
    render::text_centered(&mut fb, 0, "TemaOS", TextSize::Large);
    render::hline(&mut fb, 24, SCREEN_WIDTH - 25, 15);

    let mut out: Vec<u8, MAX_FILE_BYTES> = Vec::new();
    let _ = out.push(b'{');
    let raster = &fb.as_bytes()[..LOGO_PAGES * SCREEN_WIDTH as usize];
    for (i, byte) in raster.iter().enumerate() {
        if i > 0 {
            let _ = out.push(b',');
        }
        let _ = out.extend_from_slice(&[
            b'0',
            b'x',
            HEX[(byte >> 4) as usize],
            HEX[(byte & 0x0F) as usize],
        ]);
    }
    let _ = out.push(b'}');
    out
}
