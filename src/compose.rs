//! The calendar's page sequence.
//!
//! | page  | content                                     |
//! |-------|---------------------------------------------|
//! | 1     | front cover                                 |
//! | 2..25 | for each month: illustration, then the grid |
//! | 26    | in memoriam                                 |
//! | 27    | addresses                                   |
//! | 28    | picture credits                             |
//!
//! Every page is emitted even when all of its optional content is missing, so the
//! printed calendar always has the same page count.

use crate::config::{AddressWrap, CalendarConfig};
use crate::data::{AddressBook, CalendarData};
use crate::document::{Document, PageSession};
use crate::error::{CalendarError, ConfigError};
use crate::events::{format_event, EventMerger};
use crate::layout::{GridCell, Point, GRID_COLUMNS};
use crate::style::TextStyle;
use crate::surface::DrawingSurface;
use chrono::{Datelike, Month, NaiveDate};
use std::collections::BTreeMap;

/// Column headings of the month grid, starting on Sunday
pub const WEEKDAYS: [&str; GRID_COLUMNS as usize] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Pages in every calendar
pub const PAGE_COUNT: usize = 1 + 12 * 2 + 3;

/// A title and a block of text, as drawn on the closing pages
struct TitledText<'a> {
    title: &'a str,
    title_style: &'a TextStyle,
    title_at: Point,
    style: &'a TextStyle,
    at: Point,
}

struct AddressPage<'a> {
    heading: TitledText<'a>,
    wrap: AddressWrap,
    book: &'a AddressBook,
    tags: &'a BTreeMap<String, TextStyle>,
}

/// Lays out a whole calendar from its configuration and data.
///
/// Everything the optional pages need is checked when the composer is built, so
/// composing can only fail on device errors or event ordering defects.
pub struct Composer<'a> {
    config: &'a CalendarConfig,
    data: &'a CalendarData,
    deaths: Option<(TitledText<'a>, &'a str)>,
    addresses: Option<AddressPage<'a>>,
    credits: Option<(TitledText<'a>, &'a str)>,
}

fn require<T>(value: Option<T>, section: &str, key: &str) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    })
}

impl<'a> Composer<'a> {
    pub fn new(config: &'a CalendarConfig, data: &'a CalendarData) -> Result<Composer<'a>, ConfigError> {
        let general = &config.general;
        let styles = &config.styles;
        let layout = &config.layout;

        let deaths = match &data.deaths {
            Some(text) => Some((
                TitledText {
                    title: require(general.deaths_title.as_deref(), "General", "Deaths-title")?,
                    title_style: require(styles.deaths_title.as_ref(), "Fonts", "Deaths-title")?,
                    title_at: require(layout.deaths_title, "Layout", "Deaths-title")?,
                    style: require(styles.deaths.as_ref(), "Fonts", "Deaths")?,
                    at: require(layout.deaths, "Layout", "Deaths")?,
                },
                text.as_str(),
            )),
            None => None,
        };

        let addresses = match &data.addresses {
            Some(book) => {
                for tag in book.tags() {
                    if !styles.address_tags.contains_key(tag) {
                        return Err(ConfigError::MissingKey {
                            section: "Fonts".to_string(),
                            key: format!("Addresses-{tag}"),
                        });
                    }
                }
                Some(AddressPage {
                    heading: TitledText {
                        title: require(general.addresses_title.as_deref(), "General", "Addresses-title")?,
                        title_style: require(styles.addresses_title.as_ref(), "Fonts", "Addresses-title")?,
                        title_at: require(layout.addresses_title, "Layout", "Addresses-title")?,
                        style: require(styles.addresses.as_ref(), "Fonts", "Addresses")?,
                        at: require(layout.addresses, "Layout", "Addresses")?,
                    },
                    wrap: require(layout.addresses_wrap, "Layout", "Addresses-wrap")?,
                    book,
                    tags: &styles.address_tags,
                })
            }
            None => None,
        };

        let credits = match &data.credits {
            Some(text) => Some((
                TitledText {
                    title: require(general.credits_title.as_deref(), "General", "Credits-title")?,
                    title_style: require(styles.credits_title.as_ref(), "Fonts", "Credits-title")?,
                    title_at: require(layout.credits_title, "Layout", "Credits-title")?,
                    style: require(styles.credits.as_ref(), "Fonts", "Credits")?,
                    at: require(layout.credits, "Layout", "Credits")?,
                },
                text.as_str(),
            )),
            None => None,
        };

        Ok(Composer {
            config,
            data,
            deaths,
            addresses,
            credits,
        })
    }

    /// Draw every page of the calendar
    pub fn compose<S: DrawingSurface + ?Sized>(&self, document: &mut Document<'_, S>) -> Result<(), CalendarError> {
        let year = self.config.general.year;
        let mut events = EventMerger::for_year(self.data.birthdays.clone(), year);

        self.front_cover(&mut document.page()?)?;

        let mut month = Month::January;
        for _ in 0..12 {
            self.month_illustration(&mut document.page()?, month)?;
            self.month_grid(&mut document.page()?, month, &mut events)?;
            month = month.succ();
        }
        events.finish()?;

        self.in_memoriam(&mut document.page()?)?;
        self.address_book(&mut document.page()?)?;
        self.picture_credits(&mut document.page()?)?;
        Ok(())
    }

    fn front_cover<S: DrawingSurface + ?Sized>(&self, page: &mut PageSession<'_, '_, S>) -> Result<(), CalendarError> {
        let layout = &self.config.layout;
        if let (Some(path), Some(bounds)) = (&self.data.images.front_cover, layout.front_cover_image) {
            page.image(bounds, path)?;
        }

        page.text_style(&self.config.styles.front_cover)?;
        let at = layout.front_cover_text;
        page.text_center(at.x, at.y, &self.config.general.cover_text())?;
        let at = layout.front_cover_year;
        page.text_center(at.x, at.y, &self.config.general.year.to_string())?;
        Ok(())
    }

    fn month_illustration<S: DrawingSurface + ?Sized>(
        &self,
        page: &mut PageSession<'_, '_, S>,
        month: Month,
    ) -> Result<(), CalendarError> {
        let index = month.number_from_month() as usize - 1;
        if let (Some(path), Some(bounds)) = (&self.data.images.months[index], self.config.layout.month_image) {
            page.image(bounds, path)?;
        }
        Ok(())
    }

    fn month_grid<S: DrawingSurface + ?Sized>(
        &self,
        page: &mut PageSession<'_, '_, S>,
        month: Month,
        events: &mut EventMerger,
    ) -> Result<(), CalendarError> {
        let config = self.config;
        let styles = &config.styles;
        let layout = &config.layout;
        let grid = layout.grid;

        // title box
        page.pen(config.lines.box_outline)?;
        page.brush(config.month(month).box_colour)?;
        page.rect(layout.title_box)?;

        page.text_style(&styles.month)?;
        page.text_left(layout.month.x, layout.month.y, month.name())?;
        page.text_style(&styles.year)?;
        page.text_left(layout.year.x, layout.year.y, &config.general.year.to_string())?;

        page.text_style(&styles.quote)?;
        page.text_box(layout.quote, &config.month(month).quote)?;

        page.text_style(&styles.weekdays)?;
        for (column, name) in WEEKDAYS.iter().enumerate() {
            page.text_center(grid.column_centre(column as u32), layout.weekdays, name)?;
        }

        page.pen(config.lines.grid)?;
        for x in grid.column_rules() {
            page.line(x, grid.origin_y, x, grid.bottom())?;
        }
        for y in grid.row_rules() {
            page.line(grid.origin_x, y, grid.right(), y)?;
        }

        let Some(mut date) = NaiveDate::from_ymd_opt(config.general.year, month.number_from_month(), 1) else {
            return Ok(());
        };
        let first_weekday = date.weekday().num_days_from_sunday();
        loop {
            let cell = GridCell::for_day(date.day(), first_weekday);
            let (x, y) = grid.cell_origin(cell);

            page.text_style(&styles.day)?;
            page.text_left(x + layout.day.x, y + layout.day.y, &date.day().to_string())?;

            // events stack upwards from the bottom of the cell
            let mut bottom = y + grid.cell_height - layout.birthday.y;
            for event in events.pop_if_matches(date.month(), date.day())? {
                let style = if event.is_anniversary() {
                    &styles.anniversary
                } else {
                    &styles.birthday
                };
                bottom -= page.text_style(style)?;
                page.text_left(
                    x + layout.birthday.x,
                    bottom,
                    &format_event(&config.general.birthday_format, &event),
                )?;
            }

            match date.succ_opt() {
                Some(next) if next.month() == date.month() => date = next,
                _ => break,
            }
        }
        Ok(())
    }

    fn titled_text<S: DrawingSurface + ?Sized>(
        page: &mut PageSession<'_, '_, S>,
        heading: &TitledText<'_>,
        centred: bool,
        text: Option<&str>,
    ) -> Result<(), CalendarError> {
        page.text_style(heading.title_style)?;
        let at = heading.title_at;
        if centred {
            page.text_center(at.x, at.y, heading.title)?;
        } else {
            page.text_left(at.x, at.y, heading.title)?;
        }
        if let Some(text) = text {
            page.text_style(heading.style)?;
            page.text_left(heading.at.x, heading.at.y, text)?;
        }
        Ok(())
    }

    fn in_memoriam<S: DrawingSurface + ?Sized>(&self, page: &mut PageSession<'_, '_, S>) -> Result<(), CalendarError> {
        if let (Some(path), Some(bounds)) = (&self.data.images.in_memoriam, self.config.layout.deaths_image) {
            page.image(bounds, path)?;
        }
        if let Some((heading, text)) = &self.deaths {
            Composer::titled_text(page, heading, true, Some(*text))?;
        }
        Ok(())
    }

    fn address_book<S: DrawingSurface + ?Sized>(&self, page: &mut PageSession<'_, '_, S>) -> Result<(), CalendarError> {
        let Some(addresses) = &self.addresses else {
            return Ok(());
        };
        Composer::titled_text(page, &addresses.heading, true, None)?;

        let start = addresses.heading.at;
        let (mut x, mut y) = (start.x, start.y);
        for line in &addresses.book.lines {
            let style = match &line.tag {
                Some(tag) => addresses.tags.get(tag),
                None => Some(addresses.heading.style),
            };
            // tags were checked when the composer was built
            let Some(style) = style else {
                continue;
            };

            let height = page.text_style(style)?;
            if !line.text.is_empty() {
                page.text_left(x, y, &line.text)?;
            }
            y += height;
            if y > addresses.wrap.max_y {
                x += addresses.wrap.column_advance;
                y = start.y;
            }
        }
        Ok(())
    }

    fn picture_credits<S: DrawingSurface + ?Sized>(&self, page: &mut PageSession<'_, '_, S>) -> Result<(), CalendarError> {
        if let Some((heading, text)) = &self.credits {
            Composer::titled_text(page, heading, false, Some(*text))?;
        }
        Ok(())
    }
}

/// Compose a whole calendar onto `surface`, releasing every resource afterwards.
/// Returns the number of pages drawn.
pub fn render<S: DrawingSurface + ?Sized>(
    config: &CalendarConfig,
    data: &CalendarData,
    surface: &mut S,
) -> Result<usize, CalendarError> {
    let composer = Composer::new(config, data)?;
    let mut document = Document::new(surface, config.page);
    composer.compose(&mut document)?;
    let pages = document.page_count();
    document.finish();
    Ok(pages)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::test::SAMPLE;
    use crate::data::AddressLine;
    use crate::events::AnnotationEvent;
    use crate::style::StyleSpec;
    use crate::surface::{DrawCall, RecordingSurface};

    fn config() -> CalendarConfig {
        CalendarConfig::parse(SAMPLE).expect("can parse configuration")
    }

    fn texts(calls: &[DrawCall]) -> Vec<&str> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn always_emits_every_page() {
        let config = config();
        let mut surface = RecordingSurface::new();
        let pages = render(&config, &CalendarData::default(), &mut surface).expect("can render");
        assert_eq!(pages, PAGE_COUNT);
        assert_eq!(surface.pages().len(), 28);

        // optional pages are empty without their data
        let all = surface.pages();
        assert!(all[1].is_empty());
        assert!(all[25].is_empty());
        assert!(all[26].is_empty());
        assert!(all[27].is_empty());
    }

    #[test]
    fn month_grid_has_header_rules_and_days() {
        let config = config();
        let mut surface = RecordingSurface::new();
        render(&config, &CalendarData::default(), &mut surface).expect("can render");

        // February 2024 is a leap month starting on a Thursday
        let february = surface.pages()[4];
        let text = texts(february);
        assert_eq!(text[0], "February");
        assert_eq!(text[1], "2024");
        assert_eq!(text[2], "February quote");
        assert_eq!(&text[3..10], &WEEKDAYS);
        assert_eq!(text[10], "1");
        assert_eq!(text.last(), Some(&"29"));
        assert_eq!(text.len(), 10 + 29);

        let lines = february
            .iter()
            .filter(|c| matches!(c, DrawCall::Line { .. }))
            .count();
        assert_eq!(lines, 8 + 7);

        let grid = config.layout.grid;
        let first_day = february.iter().find(|c| matches!(c, DrawCall::Text { text, .. } if text == "1"));
        let (x, y) = grid.cell_origin(GridCell { column: 4, row: 0 });
        assert!(matches!(
            first_day,
            Some(DrawCall::Text { x: tx, y: ty, .. }) if *tx == x + 50 && *ty == -(y + 30)
        ));
    }

    #[test]
    fn events_stack_up_from_the_cell_bottom() {
        let config = config();
        let data = CalendarData {
            birthdays: vec![
                AnnotationEvent::new(2, 1, 1990, "A"),
                AnnotationEvent::new(1, 15, 2000, "B"),
                AnnotationEvent::new(1, 15, 2000, "C&D"),
            ],
            ..Default::default()
        };
        let mut surface = RecordingSurface::new();
        render(&config, &data, &mut surface).expect("can render");

        let january = surface.pages()[2];
        let events: Vec<&DrawCall> = january
            .iter()
            .filter(|c| matches!(c, DrawCall::Text { text, .. } if text.contains('(')))
            .collect();
        assert_eq!(events.len(), 2);

        // 2024-01-15 is a Monday in the third row
        let grid = config.layout.grid;
        let (x, y) = grid.cell_origin(GridCell { column: 1, row: 2 });
        let bottom = y + grid.cell_height - 40;
        match (events[0], events[1]) {
            (DrawCall::Text { x: x0, y: y0, text: t0, .. }, DrawCall::Text { x: x1, y: y1, text: t1, .. }) => {
                assert_eq!(t0, "B (00)");
                assert_eq!(t1, "C&D (00)");
                assert_eq!(*x0, x + 50);
                assert_eq!(*x1, x + 50);
                assert_eq!(*y0, -(bottom - 110));
                assert_eq!(*y1, -(bottom - 220));
            }
            _ => unreachable!(),
        }

        // the anniversary was drawn in its own colour
        let anniversary = config.styles.anniversary.colour;
        let position = january
            .iter()
            .position(|c| matches!(c, DrawCall::Text { text, .. } if text == "C&D (00)"))
            .expect("anniversary drawn");
        assert!(january[..position]
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCall::ForegroundColour(colour) => Some(*colour),
                _ => None,
            })
            .is_some_and(|c| c == anniversary));

        assert!(texts(surface.pages()[4]).contains(&"A (90)"));
    }

    #[test]
    fn addresses_flow_into_columns() {
        let text = SAMPLE.replace("Addresses-wrap = 5000, 8000", "Addresses-wrap = 5000, 1300");
        let config = CalendarConfig::parse(&text).expect("can parse configuration");
        let data = CalendarData {
            addresses: Some(AddressBook {
                lines: vec![
                    AddressLine {
                        tag: Some("name".into()),
                        text: "Smith".into(),
                    },
                    AddressLine {
                        tag: None,
                        text: String::new(),
                    },
                    AddressLine {
                        tag: None,
                        text: "1 Main St".into(),
                    },
                ],
            }),
            ..Default::default()
        };
        let mut surface = RecordingSurface::new();
        render(&config, &data, &mut surface).expect("can render");

        let page = surface.pages()[26];
        let placed: Vec<(i32, i32, &str)> = page
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { x, y, text, .. } => Some((*x, *y, text.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(placed[0].2, "Addresses");
        // 1000 -> 1150 -> 1300 -> 1450 wraps to the next column
        assert_eq!(&placed[1..], &[(500, -1000, "Smith"), (500, -1300, "1 Main St")]);
    }

    #[test]
    fn unknown_address_tags_are_config_errors() {
        let config = config();
        let data = CalendarData {
            addresses: Some(AddressBook {
                lines: vec![AddressLine {
                    tag: Some("phone".into()),
                    text: "555".into(),
                }],
            }),
            ..Default::default()
        };
        match Composer::new(&config, &data) {
            Err(ConfigError::MissingKey { key, .. }) => assert_eq!(key, "Addresses-phone"),
            _ => panic!("expected a missing style"),
        }
    }

    #[test]
    fn title_tagged_addresses_use_the_title_style() {
        let config = config();
        let data = CalendarData {
            addresses: Some(AddressBook::parse("@title:Hello\nWorld", "addresses.txt").expect("can parse addresses")),
            ..Default::default()
        };
        let mut surface = RecordingSurface::new();
        render(&config, &data, &mut surface).expect("can render");

        let title = config.styles.addresses_title.as_ref().expect("title style is configured");
        let page = surface.pages()[26];
        let hello = page
            .iter()
            .position(|c| matches!(c, DrawCall::Text { text, .. } if text == "Hello"))
            .expect("tagged line is drawn");
        let handle = page[..hello]
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCall::SelectFont(handle) => Some(*handle),
                _ => None,
            })
            .expect("a font is selected");
        let created = surface.calls().iter().find_map(|c| match c {
            DrawCall::Create(h, spec) if *h == handle => Some(spec),
            _ => None,
        });
        assert_eq!(created, Some(&StyleSpec::Font(title.font.clone())));
    }

    #[test]
    fn optional_pages_need_their_configuration() {
        let text = SAMPLE.replace("Credits-title = Picture Credits\n", "");
        let config = CalendarConfig::parse(&text).expect("can parse configuration");
        let data = CalendarData {
            credits: Some("Photos by me".into()),
            ..Default::default()
        };
        assert!(matches!(
            Composer::new(&config, &data),
            Err(ConfigError::MissingKey { ref section, .. }) if section == "General"
        ));
    }

    #[test]
    fn rendering_is_repeatable() {
        let config = config();
        let data = CalendarData {
            birthdays: vec![AnnotationEvent::new(7, 4, 1976, "Sam")],
            deaths: Some("Grandpa".into()),
            credits: Some("Photos".into()),
            ..Default::default()
        };

        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        render(&config, &data, &mut first).expect("can render");
        render(&config, &data, &mut second).expect("can render");
        assert_eq!(first.calls(), second.calls());
    }
}
