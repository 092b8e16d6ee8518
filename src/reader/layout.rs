//! Streaming text layout.
//!
//! A page is built straight from the file with a small read window, so long
//! files never have to fit in RAM. Source lines are trimmed, blank lines
//! are skipped and long lines wrap at the last space that fits, or are cut
//! hard when a word is longer than a line.

use crate::config::{READER_LINE_CHARS, READER_PAGE_LINES};
use crate::storage::Storage;
use crate::Error;
use heapless::{String, Vec};

const WINDOW: usize = 64;

/// Buffered sequential reader over one file.
pub struct ByteStream<'a, S: Storage> {
    storage: &'a S,
    name: &'a str,
    window: [u8; WINDOW],
    start: usize,
    len: usize,
}

impl<'a, S: Storage> ByteStream<'a, S> {
    pub fn new(storage: &'a S, name: &'a str) -> Self {
        Self {
            storage,
            name,
            window: [0; WINDOW],
            start: 0,
            len: 0,
        }
    }

    /// Byte at absolute `offset`, or `None` past the end of the file.
    pub fn byte_at(&mut self, offset: usize) -> Result<Option<u8>, Error> {
        if offset < self.start || offset >= self.start + self.len {
            self.len = self.storage.read_at(self.name, offset, &mut self.window)?;
            self.start = offset;
        }
        if offset < self.start + self.len {
            Ok(Some(self.window[offset - self.start]))
        } else {
            Ok(None)
        }
    }
}

/// One laid-out screen of text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String<READER_LINE_CHARS>, READER_PAGE_LINES>,
    /// File offset the following page starts at.
    pub next_offset: usize,
    /// Nothing but whitespace remains after this page.
    pub eof: bool,
}

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r')
}

/// Skip blanks and empty lines from `pos`; returns the first printable
/// offset, or `None` at end of file.
fn skip_space<S: Storage>(stream: &mut ByteStream<'_, S>, mut pos: usize) -> Result<Option<usize>, Error> {
    while let Some(b) = stream.byte_at(pos)? {
        if !is_blank(b) && b != b'\n' {
            return Ok(Some(pos));
        }
        pos += 1;
    }
    Ok(None)
}

/// Length of the line at `pos` up to the newline, and the same length with
/// trailing blanks removed.
fn measure_line<S: Storage>(stream: &mut ByteStream<'_, S>, pos: usize) -> Result<(usize, usize), Error> {
    let mut len = 0;
    let mut trimmed = 0;
    while let Some(b) = stream.byte_at(pos + len)? {
        if b == b'\n' {
            break;
        }
        len += 1;
        if !is_blank(b) {
            trimmed = len;
        }
    }
    Ok((len, trimmed))
}

fn copy_line<S: Storage>(
    stream: &mut ByteStream<'_, S>,
    pos: usize,
    count: usize,
) -> Result<String<READER_LINE_CHARS>, Error> {
    let mut line = String::new();
    for i in 0..count {
        let b = stream.byte_at(pos + i)?.unwrap_or(b' ');
        let c = if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' };
        let _ = line.push(c);
    }
    Ok(line)
}

/// Lay out the page that starts at `offset` in `name`.
pub fn layout_page<S: Storage>(storage: &S, name: &str, offset: usize) -> Result<Page, Error> {
    let mut stream = ByteStream::new(storage, name);
    let mut page = Page::default();
    let mut pos = offset;

    while !page.lines.is_full() {
        let Some(start) = skip_space(&mut stream, pos)? else {
            pos = usize::MAX;
            break;
        };
        pos = start;
        let (len, trimmed) = measure_line(&mut stream, pos)?;

        let line = if trimmed <= READER_LINE_CHARS {
            let line = copy_line(&mut stream, pos, trimmed)?;
            pos += len;
            if stream.byte_at(pos)? == Some(b'\n') {
                pos += 1;
            }
            line
        } else {
            let mut split = None;
            for i in (0..=READER_LINE_CHARS).rev() {
                if stream.byte_at(pos + i)? == Some(b' ') {
                    split = Some(i);
                    break;
                }
            }
            match split {
                Some(at) => {
                    let line = copy_line(&mut stream, pos, at)?;
                    pos += at + 1;
                    line
                }
                None => {
                    let line = copy_line(&mut stream, pos, READER_LINE_CHARS)?;
                    pos += READER_LINE_CHARS;
                    line
                }
            }
        };
        let _ = page.lines.push(line);
    }

    if pos == usize::MAX {
        page.eof = true;
        page.next_offset = storage_len(storage, name)?;
    } else {
        page.eof = skip_space(&mut stream, pos)?.is_none();
        page.next_offset = pos;
    }
    Ok(page)
}

fn storage_len<S: Storage>(storage: &S, name: &str) -> Result<usize, Error> {
    for i in 0..storage.file_count() {
        if let Some(info) = storage.entry(i) {
            if info.name.as_str() == name {
                return Ok(info.size);
            }
        }
    }
    Err(Error::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::RamFs;

    fn page_of(text: &str, offset: usize) -> Page {
        let mut fs = RamFs::new();
        fs.write("t.txt", text.as_bytes()).unwrap();
        layout_page(&fs, "t.txt", offset).unwrap()
    }

    fn lines(page: &Page) -> std::vec::Vec<&str> {
        page.lines.iter().map(|l| l.as_str()).collect()
    }

    #[test]
    fn short_lines_are_trimmed_and_blanks_skipped() {
        let page = page_of("  hello  \r\n\n\nworld\n", 0);
        assert_eq!(lines(&page), ["hello", "world"]);
        assert!(page.eof);
    }

    #[test]
    fn wraps_at_last_space_that_fits() {
        let page = page_of("the quick brown fox jumps over the lazy dog", 0);
        assert_eq!(lines(&page), ["the quick brown fox", "jumps over the lazy", "dog"]);
    }

    #[test]
    fn long_word_is_cut_hard() {
        let page = page_of("abcdefghijklmnopqrstuvwxyz", 0);
        assert_eq!(lines(&page), ["abcdefghijklmnopqrstu", "vwxyz"]);
    }

    #[test]
    fn space_right_after_a_full_line_is_a_clean_break() {
        let page = page_of("abcdefghijklmnopqrstu vwx", 0);
        assert_eq!(lines(&page), ["abcdefghijklmnopqrstu", "vwx"]);
    }

    #[test]
    fn full_page_resumes_mid_line() {
        // Eight wrapped rows from one source line: the eighth starts page 2.
        let mut text = std::string::String::new();
        for i in 0..8 {
            text.push_str(&format!("row{:02} aaaaaaaaaaaaaa ", i));
        }
        let first = page_of(&text, 0);
        assert_eq!(first.lines.len(), READER_PAGE_LINES);
        assert!(!first.eof);
        assert_eq!(first.lines[6].as_str(), "row06 aaaaaaaaaaaaaa");

        let second = page_of(&text, first.next_offset);
        assert_eq!(lines(&second), ["row07 aaaaaaaaaaaaaa"]);
        assert!(second.eof);
    }

    #[test]
    fn non_ascii_bytes_show_as_placeholder() {
        let page = page_of("caf\u{e9}", 0);
        assert_eq!(lines(&page), ["caf??"]);
    }

    #[test]
    fn window_refills_across_reads() {
        let mut text = std::string::String::new();
        for _ in 0..10 {
            text.push_str("0123456789 ");
        }
        let page = page_of(&text, 0);
        assert_eq!(page.lines.len(), 5);
        assert!(page.lines.iter().all(|l| l.as_str() == "0123456789 0123456789"));
    }
}
