//! File reader: a list of `.txt` and `.tos` files, a paged text view and a
//! full-screen image view.
//!
//! Paging forward pushes the start of the page being left onto a bounded
//! history, paging back pops it. When the history is full the oldest entry
//! is dropped, so the reader can always go back the last
//! [`READER_HISTORY_CAP`] pages.

pub mod layout;
pub mod tos;

use crate::app::Flow;
use crate::clock::elapsed;
use crate::config::{HOLD_REPEAT_MS, MAX_FILES, READER_HISTORY_CAP, READER_LIST_ROWS};
use crate::input::{Button, Input};
use crate::render::{self, Canvas, FrameBuffer};
use crate::storage::{FileInfo, Storage};
use core::fmt::Write;
use heapless::{Deque, String, Vec};
use layout::{layout_page, Page};

enum View {
    List,
    Text {
        file: usize,
        page_start: usize,
        page: Page,
    },
    Image,
}

pub struct ReaderState {
    files: Vec<FileInfo, MAX_FILES>,
    cursor: usize,
    last_repeat_ms: u64,
    view: View,
    history: Deque<usize, READER_HISTORY_CAP>,
    image: FrameBuffer,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the reader lists this file.
pub fn is_readable(info: &FileInfo) -> bool {
    info.has_extension("txt") || info.has_extension("tos")
}

impl ReaderState {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            cursor: 0,
            last_repeat_ms: 0,
            view: View::List,
            history: Deque::new(),
            image: FrameBuffer::new(),
        }
    }

    /// Rescan the store and open the list. Returns the number of readable
    /// files.
    pub fn enter<S: Storage>(&mut self, storage: &S) -> usize {
        self.files.clear();
        for i in 0..storage.file_count() {
            if let Some(info) = storage.entry(i) {
                if is_readable(&info) {
                    let _ = self.files.push(info);
                }
            }
        }
        self.cursor = 0;
        self.view = View::List;
        self.history.clear();
        self.files.len()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn in_file_view(&self) -> bool {
        !matches!(self.view, View::List)
    }

    /// Offset of the page on screen, in a text view.
    pub fn page_start(&self) -> Option<usize> {
        match &self.view {
            View::Text { page_start, .. } => Some(*page_start),
            _ => None,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        match &self.view {
            View::Text { page, .. } => Some(page),
            _ => None,
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Held Up/Down fire on the press edge and then every
    /// [`HOLD_REPEAT_MS`].
    fn repeat(&mut self, input: &Input, button: Button, now_ms: u64) -> bool {
        let fire = input.is_click(button)
            || (input.is_hold(button) && elapsed(now_ms, self.last_repeat_ms) > HOLD_REPEAT_MS);
        if fire {
            self.last_repeat_ms = now_ms;
        }
        fire
    }

    pub fn update<S: Storage, D: Canvas>(
        &mut self,
        storage: &S,
        input: &Input,
        now_ms: u64,
        display: &mut D,
    ) -> Flow {
        let event = match self.view {
            View::List => self.update_list(storage, input, now_ms),
            View::Text { .. } => self.update_text(storage, input, now_ms),
            View::Image => {
                if input.is_click(Button::Exit) || input.is_click(Button::Select) {
                    self.view = View::List;
                }
                Flow::Stay
            }
        };
        self.render(display);
        event
    }

    fn update_list<S: Storage>(&mut self, storage: &S, input: &Input, now_ms: u64) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        if self.repeat(input, Button::Up, now_ms) && self.cursor > 0 {
            self.cursor -= 1;
        }
        if self.repeat(input, Button::Down, now_ms) && self.cursor + 1 < self.files.len() {
            self.cursor += 1;
        }
        if input.is_click(Button::Select) && self.cursor < self.files.len() {
            return self.open(storage, self.cursor);
        }
        Flow::Stay
    }

    fn open<S: Storage>(&mut self, storage: &S, file: usize) -> Flow {
        let entry = &self.files[file];
        let name = entry.name.as_str();
        let opened = if entry.has_extension("tos") {
            tos::decode(storage, name, &mut self.image).map(|_| View::Image)
        } else {
            layout_page(storage, name, 0).map(|page| View::Text {
                file,
                page_start: 0,
                page,
            })
        };
        match opened {
            Ok(view) => {
                info!("reader: opened {}", name);
                self.history.clear();
                self.view = view;
                Flow::Stay
            }
            Err(e) => {
                warn!("reader: cannot open {}: {:?}", name, e);
                Flow::Notice(e.message())
            }
        }
    }

    fn update_text<S: Storage>(&mut self, storage: &S, input: &Input, now_ms: u64) -> Flow {
        if input.is_click(Button::Exit) {
            self.view = View::List;
            return Flow::Stay;
        }
        let up = self.repeat(input, Button::Up, now_ms);
        let down = self.repeat(input, Button::Down, now_ms);
        let View::Text {
            file,
            page_start,
            page,
        } = &mut self.view
        else {
            return Flow::Stay;
        };
        let name = self.files[*file].name.as_str();

        let target = if down && !page.eof {
            if self.history.is_full() {
                self.history.pop_front();
            }
            let _ = self.history.push_back(*page_start);
            Some(page.next_offset)
        } else if up {
            self.history.pop_back()
        } else {
            None
        };

        if let Some(offset) = target {
            match layout_page(storage, name, offset) {
                Ok(next) => {
                    *page_start = offset;
                    *page = next;
                }
                Err(e) => {
                    warn!("reader: read failed: {:?}", e);
                    self.view = View::List;
                    return Flow::Notice(e.message());
                }
            }
        }
        Flow::Stay
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        render::clear(display);
        match &self.view {
            View::List => {
                let mut title: String<24> = String::new();
                let _ = write!(title, "Reader: {} files", self.files.len());
                render::header(display, title.as_str());
                let first = (self.cursor / READER_LIST_ROWS) * READER_LIST_ROWS;
                for (row, info) in self.files.iter().skip(first).take(READER_LIST_ROWS).enumerate() {
                    render::text(display, 10, 2 + row as i32, info.name.as_str());
                }
                if !self.files.is_empty() {
                    render::text(display, 0, 2 + (self.cursor % READER_LIST_ROWS) as i32, ">");
                }
            }
            View::Text { file, page, .. } => {
                render::text(display, 0, 0, self.files[*file].name.as_str());
                for (row, line) in page.lines.iter().enumerate() {
                    render::text(display, 0, 1 + row as i32, line.as_str());
                }
            }
            View::Image => self.image.blit_to(display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::READER_PAGE_LINES;
    use crate::storage::RamFs;

    fn store_with_pages(pages: usize) -> RamFs {
        let mut fs = RamFs::new();
        let mut text = std::string::String::new();
        for i in 0..pages * READER_PAGE_LINES {
            text.push_str(&format!("line {}\n", i));
        }
        fs.write("book.txt", text.as_bytes()).unwrap();
        fs.write("data.bin", b"skip me").unwrap();
        fs
    }

    fn tick(reader: &mut ReaderState, fs: &RamFs, input: Input, now: &mut u64) -> Flow {
        *now += 200;
        let mut fb = FrameBuffer::new();
        reader.update(fs, &input, *now, &mut fb)
    }

    fn click(b: Button) -> Input {
        Input::idle().with_click(b)
    }

    #[test]
    fn lists_only_readable_files() {
        let mut fs = store_with_pages(1);
        fs.write("PIC.TOS", b"{0x00}").unwrap();
        fs.write(".txt", b"hidden").unwrap();
        let mut reader = ReaderState::new();
        assert_eq!(reader.enter(&fs), 2);
        assert_eq!(reader.files[0].name.as_str(), "book.txt");
        assert_eq!(reader.files[1].name.as_str(), "PIC.TOS");
    }

    #[test]
    fn forward_then_back_returns_to_the_same_offsets() {
        let fs = store_with_pages(6);
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut now = 0;
        tick(&mut reader, &fs, click(Button::Select), &mut now);
        assert_eq!(reader.page_start(), Some(0));

        let mut starts = std::vec::Vec::new();
        for _ in 0..4 {
            starts.push(reader.page_start().unwrap());
            tick(&mut reader, &fs, click(Button::Down), &mut now);
        }
        assert_eq!(reader.history_len(), 4);
        assert_eq!(reader.page().unwrap().lines[0].as_str(), "line 28");

        for expected in starts.iter().rev() {
            tick(&mut reader, &fs, click(Button::Up), &mut now);
            assert_eq!(reader.page_start(), Some(*expected));
        }
        // Nothing left to go back to.
        tick(&mut reader, &fs, click(Button::Up), &mut now);
        assert_eq!(reader.page_start(), Some(0));
    }

    #[test]
    fn last_page_does_not_advance() {
        let fs = store_with_pages(2);
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut now = 0;
        tick(&mut reader, &fs, click(Button::Select), &mut now);
        tick(&mut reader, &fs, click(Button::Down), &mut now);
        let last = reader.page_start();
        assert!(reader.page().unwrap().eof);
        tick(&mut reader, &fs, click(Button::Down), &mut now);
        assert_eq!(reader.page_start(), last);
        assert_eq!(reader.history_len(), 1);
    }

    #[test]
    fn history_keeps_only_the_most_recent_pages() {
        let mut fs = RamFs::new();
        let mut text = std::string::String::new();
        for i in 0..170 * READER_PAGE_LINES {
            text.push_str(&format!("{}\n", i % 10));
        }
        fs.write("long.txt", text.as_bytes()).unwrap();
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut now = 0;
        tick(&mut reader, &fs, click(Button::Select), &mut now);

        let mut starts = std::vec::Vec::new();
        for _ in 0..160 {
            starts.push(reader.page_start().unwrap());
            tick(&mut reader, &fs, click(Button::Down), &mut now);
        }
        assert_eq!(reader.history_len(), READER_HISTORY_CAP);
        assert_eq!(reader.page_start(), Some(160 * READER_PAGE_LINES * 2));

        for _ in 0..READER_HISTORY_CAP {
            tick(&mut reader, &fs, click(Button::Up), &mut now);
        }
        // The ten oldest pages fell out of the history.
        assert_eq!(reader.page_start(), Some(starts[10]));
        tick(&mut reader, &fs, click(Button::Up), &mut now);
        assert_eq!(reader.page_start(), Some(starts[10]));
    }

    #[test]
    fn held_down_repeats_at_the_hold_rate() {
        let fs = store_with_pages(6);
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut fb = FrameBuffer::new();
        reader.update(&fs, &click(Button::Select), 0, &mut fb);
        let hold = Input::idle().with_hold(Button::Down);
        for t in (10..=300).step_by(10) {
            reader.update(&fs, &hold, t, &mut fb);
        }
        // Fires at 160 and again after another 150 ms.
        assert_eq!(reader.history_len(), 1);
        reader.update(&fs, &hold, 320, &mut fb);
        assert_eq!(reader.history_len(), 2);
    }

    #[test]
    fn exit_leaves_the_view_and_then_the_reader() {
        let fs = store_with_pages(1);
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut now = 0;
        tick(&mut reader, &fs, click(Button::Select), &mut now);
        assert!(reader.in_file_view());
        assert_eq!(tick(&mut reader, &fs, click(Button::Exit), &mut now), Flow::Stay);
        assert!(!reader.in_file_view());
        assert_eq!(tick(&mut reader, &fs, click(Button::Exit), &mut now), Flow::Exit);
    }

    #[test]
    fn malformed_image_reports_and_stays_in_list() {
        let mut fs = RamFs::new();
        fs.write("bad.tos", b"{}").unwrap();
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut now = 0;
        let event = tick(&mut reader, &fs, click(Button::Select), &mut now);
        assert_eq!(event, Flow::Notice(crate::Error::MalformedImage.message()));
        assert!(!reader.in_file_view());
    }

    #[test]
    fn image_view_closes_on_select() {
        let mut fs = RamFs::new();
        fs.write("dot.tos", b"{0x01}").unwrap();
        let mut reader = ReaderState::new();
        reader.enter(&fs);
        let mut fb = FrameBuffer::new();
        reader.update(&fs, &click(Button::Select), 10, &mut fb);
        assert!(reader.in_file_view());
        assert!(fb.pixel(0, 0));
        assert_eq!(fb.lit_count(), 1);
        reader.update(&fs, &click(Button::Select), 20, &mut fb);
        assert!(!reader.in_file_view());
    }
}
