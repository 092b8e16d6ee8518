//! `.tos` images: a C-style initializer `{0x00, 0xFF, ...}` holding a
//! 128x64 raster in page format.

use super::layout::ByteStream;
use crate::config::FRAME_BYTES;
use crate::render::FrameBuffer;
use crate::storage::Storage;
use crate::Error;

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode `name` into `frame`. Bytes beyond the ones present in the file
/// stay dark. Returns the number of decoded bytes; an image without any is
/// [`Error::MalformedImage`].
pub fn decode<S: Storage>(storage: &S, name: &str, frame: &mut FrameBuffer) -> Result<usize, Error> {
    let mut stream = ByteStream::new(storage, name);
    let mut raster = [0u8; FRAME_BYTES];
    let mut count = 0;
    let mut pos = 0;

    loop {
        match stream.byte_at(pos)? {
            Some(b'{') => break,
            Some(_) => pos += 1,
            None => return Err(Error::MalformedImage),
        }
    }
    pos += 1;

    while count < FRAME_BYTES {
        let Some(b) = stream.byte_at(pos)? else {
            break;
        };
        if b == b'}' {
            break;
        }
        if b == b'0' && stream.byte_at(pos + 1)? == Some(b'x') {
            // Up to two digits, like a hex literal read with strtoul.
            let mut value = 0u8;
            let mut used = 0;
            while used < 2 {
                match stream.byte_at(pos + 2 + used)?.and_then(hex_digit) {
                    Some(d) => {
                        value = (value << 4) | d;
                        used += 1;
                    }
                    None => break,
                }
            }
            raster[count] = value;
            count += 1;
            pos += 2 + used;
        } else {
            pos += 1;
        }
    }

    if count == 0 {
        warn!("reader: {} holds no image data", name);
        return Err(Error::MalformedImage);
    }
    frame.load_pages(&raster);
    Ok(count)
}
