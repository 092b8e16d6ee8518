//! Glyph-picker text editor for the note file.

use super::footer;
use crate::app::Flow;
use crate::config::{NOTE_FILE_NAME, NOTE_MAX_CHARS, READER_LINE_CHARS};
use crate::input::{Button, Input};
use crate::render::{self, Canvas, TextSize};
use crate::storage::Storage;
use heapless::String;

/// Glyphs Up/Down cycle through. Starts at 'A'.
const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 .,!?-:'";

/// Rows of note text shown above the picker.
const TEXT_ROWS: usize = 4;

/// Offset of the first shown character: a line boundary leaving at most
/// [`TEXT_ROWS`] lines after it.
fn tail_start(len: usize) -> usize {
    let hidden = len.saturating_sub(TEXT_ROWS * READER_LINE_CHARS);
    hidden.div_ceil(READER_LINE_CHARS) * READER_LINE_CHARS
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextEditor {
    note: String<NOTE_MAX_CHARS>,
    glyph: usize,
}

impl TextEditor {
    pub const fn new() -> Self {
        Self {
            note: String::new(),
            glyph: 0,
        }
    }

    pub fn note(&self) -> &str {
        self.note.as_str()
    }

    pub fn candidate(&self) -> char {
        GLYPHS[self.glyph] as char
    }

    /// Load the saved note, or start empty when there is none.
    pub fn enter<S: Storage>(&mut self, storage: &S) {
        self.note.clear();
        self.glyph = 0;
        let mut buf = [0u8; NOTE_MAX_CHARS];
        let n = match storage.read_at(NOTE_FILE_NAME, 0, &mut buf) {
            Ok(n) => n,
            Err(e) => {
                debug!("editor: no note loaded: {:?}", e);
                return;
            }
        };
        for &b in &buf[..n] {
            // Only glyphs the picker can produce survive a reload.
            let c = if b.is_ascii_graphic() || b == b' ' { b as char } else { ' ' };
            let _ = self.note.push(c);
        }
    }

    pub fn update<S: Storage, D: Canvas>(&mut self, storage: &mut S, input: &Input, display: &mut D) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }

        let mut flow = Flow::Stay;
        if input.is_click(Button::Up) {
            self.glyph = (self.glyph + 1) % GLYPHS.len();
        }
        if input.is_click(Button::Down) {
            self.glyph = (self.glyph + GLYPHS.len() - 1) % GLYPHS.len();
        }
        if input.is_click(Button::Right) && self.note.push(self.candidate()).is_err() {
            flow = Flow::Notice("Note full!");
        }
        if input.is_click(Button::Left) {
            self.note.pop();
        }
        if input.is_click(Button::Select) {
            flow = match storage.write(NOTE_FILE_NAME, self.note.as_bytes()) {
                Ok(()) => Flow::Notice("Saved!"),
                Err(e) => {
                    warn!("editor: save failed: {:?}", e);
                    Flow::Notice(e.message())
                }
            };
        }

        self.render(display);
        flow
    }

    fn render<D: Canvas>(&self, display: &mut D) {
        render::clear(display);
        render::header(display, "Text editor");

        // Show the last TEXT_ROWS whole lines when the note no longer fits.
        let bytes = self.note.as_bytes();
        let start = tail_start(bytes.len());
        for (row, chunk) in bytes[start..].chunks(READER_LINE_CHARS).take(TEXT_ROWS).enumerate() {
            if let Ok(line) = core::str::from_utf8(chunk) {
                render::text(display, 0, 2 + row as i32, line);
            }
        }

        let mut picker: String<4> = String::new();
        let _ = picker.push('[');
        let _ = picker.push(self.candidate());
        let _ = picker.push(']');
        render::text_sized(display, 0, 6, picker.as_str(), TextSize::Small);
        render::text(display, 30, 6, "R:add L:del");
        footer(display, "SEL: save");
    }
}
