//! The calendar's plain-text data files and illustrations, read from one directory.

use crate::error::{CalendarError, DataFormatError};
use crate::events::{parse_events, AnnotationEvent};
use chrono::Month;
use std::io;
use std::path::{Path, PathBuf};

pub const BIRTHDAYS_FILE: &str = "birthdays.txt";
pub const DEATHS_FILE: &str = "deaths.txt";
pub const ADDRESSES_FILE: &str = "addresses.txt";
pub const CREDITS_FILE: &str = "picture-credits.txt";
pub const FRONT_COVER_IMAGE: &str = "front-cover.jpg";
pub const IN_MEMORIAM_IMAGE: &str = "in-memory.jpg";

/// One line of the address book
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AddressLine {
    /// Alternate style tag, lowercased; `None` for the plain `Addresses` style
    pub tag: Option<String>,
    pub text: String,
}

/// Parsed `addresses.txt`
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AddressBook {
    pub lines: Vec<AddressLine>,
}

impl AddressBook {
    /// Parse the address book. `@comment:` lines are dropped, `@tag:text` selects
    /// an alternate style for that line and blank lines are kept as spacing.
    pub fn parse(text: &str, source_name: &str) -> Result<AddressBook, DataFormatError> {
        let mut lines = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.starts_with("@comment:") {
                continue;
            }
            let entry = match line.strip_prefix('@') {
                Some(rest) => {
                    let (tag, text) = rest.split_once(':').ok_or_else(|| DataFormatError {
                        source_name: source_name.to_string(),
                        line: i + 1,
                        content: line.to_string(),
                        reason: "expected '@tag:text'".to_string(),
                    })?;
                    AddressLine {
                        tag: Some(tag.trim().to_ascii_lowercase()),
                        text: text.to_string(),
                    }
                }
                None => AddressLine {
                    tag: None,
                    text: line.to_string(),
                },
            };
            lines.push(entry);
        }
        Ok(AddressBook { lines })
    }

    /// Every distinct style tag used, in first-use order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.lines.iter().filter_map(|l| l.tag.as_deref()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }
}

/// Illustrations that exist on disk. Missing files are simply `None`.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ImageAssets {
    pub front_cover: Option<PathBuf>,
    pub months: [Option<PathBuf>; 12],
    pub in_memoriam: Option<PathBuf>,
}

impl ImageAssets {
    /// File name of a month's illustration, e.g. `1 January.jpg`
    pub fn month_file_name(month: Month) -> String {
        format!("{} {}.jpg", month.number_from_month(), month.name())
    }

    pub fn find(dir: &Path) -> ImageAssets {
        let mut assets = ImageAssets {
            front_cover: existing(dir.join(FRONT_COVER_IMAGE)),
            in_memoriam: existing(dir.join(IN_MEMORIAM_IMAGE)),
            ..Default::default()
        };
        let mut month = Month::January;
        for slot in assets.months.iter_mut() {
            *slot = existing(dir.join(ImageAssets::month_file_name(month)));
            month = month.succ();
        }
        assets
    }
}

/// Everything read from the data directory
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CalendarData {
    pub birthdays: Vec<AnnotationEvent>,
    pub deaths: Option<String>,
    pub addresses: Option<AddressBook>,
    pub credits: Option<String>,
    pub images: ImageAssets,
}

impl CalendarData {
    /// Read the data files from `dir`. Images are only looked up when bitmaps are
    /// wanted.
    pub fn load<P: AsRef<Path>>(dir: P, skip_bitmaps: bool) -> Result<CalendarData, CalendarError> {
        let dir = dir.as_ref();

        let birthdays_path = dir.join(BIRTHDAYS_FILE);
        let birthdays = std::fs::read_to_string(&birthdays_path).map_err(|source| {
            CalendarError::ReadData {
                path: birthdays_path.clone(),
                source,
            }
        })?;
        let birthdays = parse_events(&birthdays, BIRTHDAYS_FILE)?;

        let addresses = match read_optional(&dir.join(ADDRESSES_FILE))? {
            Some(text) => Some(AddressBook::parse(&text, ADDRESSES_FILE)?),
            None => None,
        };

        let images = if skip_bitmaps {
            ImageAssets::default()
        } else {
            ImageAssets::find(dir)
        };

        log::debug!(
            "loaded {} events from {}",
            birthdays.len(),
            birthdays_path.display()
        );
        Ok(CalendarData {
            birthdays,
            deaths: read_optional(&dir.join(DEATHS_FILE))?,
            addresses,
            credits: read_optional(&dir.join(CREDITS_FILE))?,
            images,
        })
    }
}

/// Read a text file that is allowed to be absent
fn read_optional(path: &Path) -> Result<Option<String>, CalendarError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("{} not found, skipping", path.display());
            Ok(None)
        }
        Err(source) => Err(CalendarError::ReadData {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        log::debug!("{} not found, skipping", path.display());
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_address_book() {
        let text = "@comment: family\nSmith, John\n@Phone: 555-1234\n\n@bold:Doe";
        let book = AddressBook::parse(text, ADDRESSES_FILE).expect("can parse addresses");
        assert_eq!(
            book.lines,
            vec![
                AddressLine {
                    tag: None,
                    text: "Smith, John".into()
                },
                AddressLine {
                    tag: Some("phone".into()),
                    text: " 555-1234".into()
                },
                AddressLine {
                    tag: None,
                    text: String::new()
                },
                AddressLine {
                    tag: Some("bold".into()),
                    text: "Doe".into()
                },
            ]
        );
        assert_eq!(book.tags(), ["phone", "bold"]);
    }

    #[test]
    fn tag_without_colon_is_an_error() {
        let err = AddressBook::parse("ok\n@oops", ADDRESSES_FILE).expect_err("no colon");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn month_image_names() {
        assert_eq!(ImageAssets::month_file_name(Month::January), "1 January.jpg");
        assert_eq!(ImageAssets::month_file_name(Month::December), "12 December.jpg");
    }
}
