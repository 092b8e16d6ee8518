//! File manager: browse the store and delete files.

use crate::app::Flow;
use crate::config::LONG_MENU_PER_PAGE;
use crate::input::{Button, Input};
use crate::menu::{page_count, MenuState};
use crate::render::{self, Canvas};
use crate::storage::Storage;
use core::fmt::Write;
use heapless::String;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileManager {
    menu: MenuState,
    /// A first Select armed deletion of this entry.
    confirm: Option<usize>,
}

impl FileManager {
    pub const fn new() -> Self {
        Self {
            menu: MenuState::new(),
            confirm: None,
        }
    }

    pub fn selected(&self) -> usize {
        self.menu.selected(LONG_MENU_PER_PAGE)
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm.is_some()
    }

    pub fn update<S: Storage, D: Canvas>(&mut self, storage: &mut S, input: &Input, display: &mut D) -> Flow {
        let flow = if let Some(index) = self.confirm {
            self.confirming(storage, input, index)
        } else {
            self.browsing(storage, input)
        };
        if flow == Flow::Exit {
            return flow;
        }
        self.render(storage, display);
        flow
    }

    fn browsing<S: Storage>(&mut self, storage: &S, input: &Input) -> Flow {
        if input.is_click(Button::Exit) {
            return Flow::Exit;
        }
        let count = storage.file_count();
        self.menu.navigate(input, count, LONG_MENU_PER_PAGE);
        if input.is_click(Button::Select) && self.selected() < count {
            self.confirm = Some(self.selected());
        }
        Flow::Stay
    }

    fn confirming<S: Storage>(&mut self, storage: &mut S, input: &Input, index: usize) -> Flow {
        if !input.any_click() {
            return Flow::Stay;
        }
        self.confirm = None;
        if !input.is_click(Button::Select) {
            return Flow::Stay;
        }
        let Some(info) = storage.entry(index) else {
            return Flow::Stay;
        };
        match storage.remove(info.name.as_str()) {
            Ok(()) => {
                let count = storage.file_count();
                if self.selected() >= count && count > 0 {
                    // Keep the cursor on the new last entry.
                    let last = count - 1;
                    self.menu.page = last / LONG_MENU_PER_PAGE;
                    self.menu.index = last % LONG_MENU_PER_PAGE;
                } else if count == 0 {
                    self.menu.reset();
                }
                Flow::Notice("Deleted")
            }
            Err(e) => {
                warn!("files: delete failed: {:?}", e);
                Flow::Notice(e.message())
            }
        }
    }

    fn render<S: Storage, D: Canvas>(&self, storage: &S, display: &mut D) {
        render::clear(display);
        render::header(display, "File manager");
        let count = storage.file_count();
        let pages = page_count(count, LONG_MENU_PER_PAGE);
        if pages > 1 {
            let mut indicator: String<8> = String::new();
            let _ = write!(indicator, "({}/{})", self.menu.page + 1, pages);
            render::text(display, 92, 0, indicator.as_str());
        }
        if count == 0 {
            render::text(display, 10, 3, "No files");
            return;
        }

        if let Some(index) = self.confirm {
            let name = storage.entry(index).map(|i| i.name).unwrap_or_default();
            render::text(display, 0, 2, "Delete?");
            render::text(display, 0, 3, name.as_str());
            render::text(display, 0, 7, "SEL: yes, other: no");
            return;
        }

        let first = self.menu.page * LONG_MENU_PER_PAGE;
        for row in 0..LONG_MENU_PER_PAGE {
            let Some(info) = storage.entry(first + row) else {
                break;
            };
            let y = 2 + row as i32;
            let mut name: String<16> = String::new();
            for c in info.name.chars().take(14) {
                let _ = name.push(c);
            }
            render::text(display, 10, y, name.as_str());
            let size = render::label_value("", info.size as i64);
            render::text(display, 100, y, size.as_str());
        }
        render::text(display, 0, 2 + self.menu.index as i32, ">");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::FrameBuffer;
    use crate::storage::RamFs;

    fn store() -> RamFs {
        let mut fs = RamFs::new();
        for name in ["a.txt", "b.txt", "c.tos"] {
            fs.write(name, b"data").unwrap();
        }
        fs
    }

    fn click(b: Button) -> Input {
        Input::idle().with_click(b)
    }

    #[test]
    fn two_selects_delete_the_entry() {
        let mut fs = store();
        let mut fm = FileManager::new();
        let mut fb = FrameBuffer::new();
        fm.update(&mut fs, &click(Button::Down), &mut fb);
        fm.update(&mut fs, &click(Button::Select), &mut fb);
        assert!(fm.is_confirming());
        assert!(fs.exists("b.txt"));
        let flow = fm.update(&mut fs, &click(Button::Select), &mut fb);
        assert_eq!(flow, Flow::Notice("Deleted"));
        assert!(!fs.exists("b.txt"));
        assert_eq!(fs.file_count(), 2);
    }

    #[test]
    fn any_other_button_cancels() {
        let mut fs = store();
        let mut fm = FileManager::new();
        let mut fb = FrameBuffer::new();
        fm.update(&mut fs, &click(Button::Select), &mut fb);
        // No button: still asking.
        fm.update(&mut fs, &Input::idle(), &mut fb);
        assert!(fm.is_confirming());
        assert_eq!(fm.update(&mut fs, &click(Button::Exit), &mut fb), Flow::Stay);
        assert!(!fm.is_confirming());
        assert_eq!(fs.file_count(), 3);
        assert_eq!(fm.update(&mut fs, &click(Button::Exit), &mut fb), Flow::Exit);
    }

    #[test]
    fn deleting_the_last_entry_moves_the_cursor_up() {
        let mut fs = store();
        let mut fm = FileManager::new();
        let mut fb = FrameBuffer::new();
        fm.update(&mut fs, &click(Button::Up), &mut fb);
        assert_eq!(fm.selected(), 2);
        fm.update(&mut fs, &click(Button::Select), &mut fb);
        fm.update(&mut fs, &click(Button::Select), &mut fb);
        assert_eq!(fm.selected(), 1);
    }
}
