//! Unified error type for temaos.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

use core::fmt;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Storage
    /// No file with the requested name.
    NotFound,

    /// The file store could not be mounted; every operation fails.
    NotMounted,

    /// The file table has no free slot.
    StorageFull,

    /// File name is empty or longer than the store allows.
    NameTooLong,

    /// File contents exceed the per-file limit.
    FileTooLarge,

    /// Flash read/write failed.
    Flash,

    // Content
    /// A `.tos` image decoded to zero bytes.
    MalformedImage,
}

impl Error {
    /// Short text for an on-screen message box.
    pub fn message(&self) -> &'static str {
        match self {
            Error::NotFound => "File error!",
            Error::NotMounted => "No storage!",
            Error::StorageFull => "Disk full!",
            Error::NameTooLong => "Bad name!",
            Error::FileTooLarge => "Too large!",
            Error::Flash => "Flash error!",
            Error::MalformedImage => "Bad .tos",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;

    #[test]
    fn display_matches_message() {
        let mut s: heapless::String<16> = heapless::String::new();
        let _ = write!(s, "{}", Error::MalformedImage);
        assert_eq!(s.as_str(), "Bad .tos");
    }

    #[test]
    fn messages_fit_one_large_line() {
        // Large text is 9 px wide; a message box line holds 13 characters.
        for e in [
            Error::NotFound,
            Error::NotMounted,
            Error::StorageFull,
            Error::NameTooLong,
            Error::FileTooLarge,
            Error::Flash,
            Error::MalformedImage,
        ] {
            assert!(e.message().len() <= 13, "{:?}", e);
        }
    }
}
