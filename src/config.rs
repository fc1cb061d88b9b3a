//! The calendar configuration, read from an INI file into typed records.
//!
//! Every entry is parsed and validated here, so a malformed configuration is
//! reported before the first page is started.

use crate::colour::Colour;
use crate::error::ConfigError;
use crate::layout::{Axis, Bounds, GridGeometry, LayoutParseError, LayoutTuple, LayoutValue, Margins, Point};
use crate::pagesize::{self, Orientation, PageSpec};
use crate::style::{FontSpec, PenSpec, TextStyle};
use chrono::{Month, NaiveDate};
use ini::{Ini, ParseOption};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const GENERAL: &str = "General";
const FONTS: &str = "Fonts";
const FILL_COLOURS: &str = "Fill-colors";
const LINES: &str = "Lines";
const LAYOUT: &str = "Layout";

/// Prefix of the address book's alternate text parts
pub const ADDRESS_TAG_PREFIX: &str = "addresses-";

/// `[General]`
#[derive(Debug, Clone, PartialEq)]
pub struct GeneralConfig {
    pub year: i32,
    pub skip_bitmaps: bool,
    pub title: String,
    /// Output file, relative to [`CalendarConfig::dir`]
    pub output: PathBuf,
    pub font_dir: Option<PathBuf>,
    pub front_cover_text: String,
    pub birthday_format: String,
    pub deaths_title: Option<String>,
    pub addresses_title: Option<String>,
    pub credits_title: Option<String>,
}

/// Font and colour of every text part
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyles {
    pub front_cover: TextStyle,
    pub month: TextStyle,
    pub year: TextStyle,
    pub quote: TextStyle,
    pub weekdays: TextStyle,
    pub day: TextStyle,
    pub birthday: TextStyle,
    pub anniversary: TextStyle,
    pub deaths_title: Option<TextStyle>,
    pub deaths: Option<TextStyle>,
    pub addresses_title: Option<TextStyle>,
    pub addresses: Option<TextStyle>,
    pub credits_title: Option<TextStyle>,
    pub credits: Option<TextStyle>,
    /// `Addresses-<tag>` parts keyed by lowercased tag
    pub address_tags: BTreeMap<String, TextStyle>,
}

/// `[Lines]`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyles {
    pub box_outline: PenSpec,
    pub grid: PenSpec,
}

/// Column flow of the address page
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AddressWrap {
    /// Horizontal distance to the next column
    pub column_advance: i32,
    /// A line starting below this y moves to the next column
    pub max_y: i32,
}

/// `[Layout]`, resolved against the page
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub front_cover_image: Option<Bounds>,
    pub month_image: Option<Bounds>,
    pub deaths_image: Option<Bounds>,
    pub front_cover_text: Point,
    pub front_cover_year: Point,
    pub month: Point,
    pub year: Point,
    /// Day number offset inside a cell
    pub day: Point,
    /// Event offset: x from the cell's left edge, y up from its bottom edge
    pub birthday: Point,
    pub title_box: Bounds,
    pub quote: Bounds,
    pub weekdays: i32,
    pub grid: GridGeometry,
    pub deaths_title: Option<Point>,
    pub deaths: Option<Point>,
    pub addresses_title: Option<Point>,
    pub addresses: Option<Point>,
    pub addresses_wrap: Option<AddressWrap>,
    pub credits_title: Option<Point>,
    pub credits: Option<Point>,
}

/// `[January]` .. `[December]`
#[derive(Debug, Clone, PartialEq)]
pub struct MonthConfig {
    pub quote: String,
    pub box_colour: Colour,
}

/// The whole configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarConfig {
    /// Directory the configuration was read from; data files live here too
    pub dir: PathBuf,
    pub general: GeneralConfig,
    pub page: PageSpec,
    pub styles: TextStyles,
    pub lines: LineStyles,
    pub layout: LayoutConfig,
    pub months: [MonthConfig; 12],
}

impl CalendarConfig {
    /// Read and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<CalendarConfig, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = CalendarConfig::parse(&text)?;
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            config.dir = dir.to_path_buf();
        }
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration text. Relative paths are resolved against the current
    /// directory.
    pub fn parse(text: &str) -> Result<CalendarConfig, ConfigError> {
        let raw = RawConfig::parse(text)?;

        let general = GeneralConfig::from_raw(&raw)?;
        let page = page_spec(&raw)?;
        Ok(CalendarConfig {
            dir: PathBuf::from("."),
            styles: TextStyles::from_raw(&raw, &page)?,
            lines: LineStyles {
                box_outline: raw.pen("Box-outline", &page)?,
                grid: raw.pen("Grid", &page)?,
            },
            layout: LayoutConfig::from_raw(&raw, &page, general.skip_bitmaps)?,
            months: month_configs(&raw)?,
            general,
            page,
        })
    }

    /// Where the PDF is written
    pub fn output_path(&self) -> PathBuf {
        self.dir.join(&self.general.output)
    }

    /// Extra font directory, if configured
    pub fn font_dir(&self) -> Option<PathBuf> {
        self.general.font_dir.as_ref().map(|d| self.dir.join(d))
    }

    pub fn month(&self, month: Month) -> &MonthConfig {
        &self.months[month.number_from_month() as usize - 1]
    }
}

impl GeneralConfig {
    fn from_raw(raw: &RawConfig) -> Result<GeneralConfig, ConfigError> {
        let year_text = raw.require(GENERAL, "Year")?;
        let year: i32 = year_text
            .trim()
            .parse()
            .ok()
            .filter(|&y| NaiveDate::from_ymd_opt(y, 1, 1).is_some())
            .ok_or_else(|| invalid(GENERAL, "Year", year_text, "expected a calendar year"))?;

        let skip_bitmaps = match raw.get(GENERAL, "Skip-bitmaps") {
            Some(text) => parse_bool(text)
                .ok_or_else(|| invalid(GENERAL, "Skip-bitmaps", text, "expected a boolean"))?,
            None => false,
        };

        let owned = |key: &str| raw.get(GENERAL, key).map(str::to_string);
        Ok(GeneralConfig {
            year,
            skip_bitmaps,
            title: owned("Title").unwrap_or_else(|| "Calendar".to_string()),
            output: owned("Output")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("calendar.pdf")),
            font_dir: owned("Font-dir").map(PathBuf::from),
            front_cover_text: raw.require(GENERAL, "Front-cover-text")?.to_string(),
            birthday_format: raw.require(GENERAL, "Birthday-format")?.to_string(),
            deaths_title: owned("Deaths-title"),
            addresses_title: owned("Addresses-title"),
            credits_title: owned("Credits-title"),
        })
    }

    /// The front cover text with its placeholders filled in
    pub fn cover_text(&self) -> String {
        self.front_cover_text
            .replace("{year}", &self.year.to_string())
            .replace("{nl}", "\n")
    }
}

impl TextStyles {
    fn from_raw(raw: &RawConfig, page: &PageSpec) -> Result<TextStyles, ConfigError> {
        let mut address_tags = BTreeMap::new();
        for key in raw.keys(FONTS) {
            if let Some(tag) = key.strip_prefix(ADDRESS_TAG_PREFIX) {
                if !tag.is_empty() {
                    address_tags.insert(tag.to_string(), raw.text_style(key, page)?);
                }
            }
        }

        Ok(TextStyles {
            front_cover: raw.text_style("Front-cover", page)?,
            month: raw.text_style("Month", page)?,
            year: raw.text_style("Year", page)?,
            quote: raw.text_style("Quote", page)?,
            weekdays: raw.text_style("Weekdays", page)?,
            day: raw.text_style("Day", page)?,
            birthday: raw.text_style("Birthday", page)?,
            anniversary: raw.text_style("Anniversary", page)?,
            deaths_title: raw.optional_text_style("Deaths-title", page)?,
            deaths: raw.optional_text_style("Deaths", page)?,
            addresses_title: raw.optional_text_style("Addresses-title", page)?,
            addresses: raw.optional_text_style("Addresses", page)?,
            credits_title: raw.optional_text_style("Credits-title", page)?,
            credits: raw.optional_text_style("Credits", page)?,
            address_tags,
        })
    }
}

impl LayoutConfig {
    fn from_raw(raw: &RawConfig, page: &PageSpec, skip_bitmaps: bool) -> Result<LayoutConfig, ConfigError> {
        let image = |key: &str| -> Result<Option<Bounds>, ConfigError> {
            if skip_bitmaps {
                raw.optional_layout(key, |t| Bounds::parse(t, page))
            } else {
                raw.layout(key, |t| Bounds::parse(t, page)).map(Some)
            }
        };
        let point = |key: &str| raw.layout(key, |t| Point::parse(t, page));
        let optional_point = |key: &str| raw.optional_layout(key, |t| Point::parse(t, page));

        // a lone y position, measured on the height axis
        let weekdays = raw.layout("Weekdays", |t| {
            let y = LayoutValue::parse(t, Axis::Height)?;
            y.check(page)?;
            Ok(y.resolve(page))
        })?;

        let margins = raw.layout("Grid-margins", |t| Margins::parse(t, page))?;
        let grid = GridGeometry::new(page, &margins);
        if grid.cell_width <= 0 || grid.cell_height <= 0 {
            let text = raw.require(LAYOUT, "Grid-margins")?;
            return Err(invalid(LAYOUT, "Grid-margins", text, "margins leave no room for the grid"));
        }

        let addresses_wrap = raw.optional_layout("Addresses-wrap", |t| {
            Point::parse(t, page).map(|p| AddressWrap {
                column_advance: p.x,
                max_y: p.y,
            })
        })?;

        Ok(LayoutConfig {
            front_cover_image: image("Front-cover-image")?,
            month_image: image("Month-image")?,
            deaths_image: image("Deaths-image")?,
            front_cover_text: point("Front-cover-text")?,
            front_cover_year: point("Front-cover-year")?,
            month: point("Month")?,
            year: optional_point("Year")?.unwrap_or(Point::new(500, 860)),
            day: point("Day")?,
            birthday: point("Birthday")?,
            title_box: raw.layout("Box", |t| Bounds::parse(t, page))?,
            quote: raw.layout("Quote", |t| Bounds::parse(t, page))?,
            weekdays,
            grid,
            deaths_title: optional_point("Deaths-title")?,
            deaths: optional_point("Deaths")?,
            addresses_title: optional_point("Addresses-title")?,
            addresses: optional_point("Addresses")?,
            addresses_wrap,
            credits_title: optional_point("Credits-title")?,
            credits: optional_point("Credits")?,
        })
    }
}

fn page_spec(raw: &RawConfig) -> Result<PageSpec, ConfigError> {
    let orientation = match raw.get(GENERAL, "Orientation") {
        Some(text) => text
            .parse::<Orientation>()
            .map_err(|reason| invalid(GENERAL, "Orientation", text, &reason))?,
        None => Orientation::default(),
    };

    if let Some(text) = raw.get(GENERAL, "Page-size") {
        let size = explicit_page_size(text).map_err(|reason| invalid(GENERAL, "Page-size", text, &reason))?;
        return Ok(PageSpec::new(size, orientation));
    }

    let name = raw.get(GENERAL, "Paper-size").unwrap_or("letter");
    let size = pagesize::by_name(name).ok_or_else(|| ConfigError::UnknownPaperSize(name.to_string()))?;
    Ok(PageSpec::new(size, orientation))
}

fn explicit_page_size(text: &str) -> Result<pagesize::PaperSize, String> {
    let layout = LayoutTuple::<2>::parse(text).map_err(|e| e.to_string())?;
    let mut size = [0; 2];
    for (slot, value) in size.iter_mut().zip(layout.values()) {
        if value.token.is_relative() {
            return Err("page dimensions cannot be percentages".to_string());
        }
        *slot = value
            .token
            .resolve_with(value.axis, 0, 0)
            .map_err(|e| e.to_string())?;
        if *slot <= 0 {
            return Err("page dimensions must be positive".to_string());
        }
    }
    Ok((size[0], size[1]))
}

fn month_configs(raw: &RawConfig) -> Result<[MonthConfig; 12], ConfigError> {
    let mut months = Vec::with_capacity(12);
    let mut month = Month::January;
    for _ in 0..12 {
        let section = month.name();
        let colour = raw.require(section, "Box-color")?;
        months.push(MonthConfig {
            quote: raw.require(section, "Quote")?.to_string(),
            box_colour: Colour::from_hex(colour)
                .map_err(|reason| invalid(section, "Box-color", colour, &reason))?,
        });
        month = month.succ();
    }
    months.try_into().map_err(|_| ConfigError::MissingKey {
        section: "January".to_string(),
        key: "Quote".to_string(),
    })
}

/// Parse a configuration boolean the way INI readers conventionally do
pub fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// The INI file as case-insensitive section and key lookups
struct RawConfig {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

impl RawConfig {
    fn parse(text: &str) -> Result<RawConfig, ConfigError> {
        let ini = Ini::load_from_str_opt(
            text,
            ParseOption {
                enabled_quote: false,
                enabled_escape: false,
                ..ParseOption::default()
            },
        )?;

        let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
        for (section, properties) in ini.iter() {
            let Some(section) = section else {
                continue;
            };
            let entries = sections.entry(section.trim().to_ascii_lowercase()).or_default();
            for (key, value) in properties.iter() {
                entries.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
            }
        }
        Ok(RawConfig { sections })
    }

    fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(&section.to_ascii_lowercase())?
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn require(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.get(section, key).ok_or_else(|| ConfigError::MissingKey {
            section: section.to_string(),
            key: key.to_string(),
        })
    }

    /// Lowercased keys of a section
    fn keys(&self, section: &str) -> Vec<&str> {
        self.sections
            .get(&section.to_ascii_lowercase())
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn layout<T, F>(&self, key: &str, parse: F) -> Result<T, ConfigError>
    where
        F: FnOnce(&str) -> Result<T, LayoutParseError>,
    {
        let text = self.require(LAYOUT, key)?;
        parse(text).map_err(|source| ConfigError::Layout {
            section: LAYOUT.to_string(),
            key: key.to_string(),
            source,
        })
    }

    fn optional_layout<T, F>(&self, key: &str, parse: F) -> Result<Option<T>, ConfigError>
    where
        F: FnOnce(&str) -> Result<T, LayoutParseError>,
    {
        match self.get(LAYOUT, key) {
            Some(_) => self.layout(key, parse).map(Some),
            None => Ok(None),
        }
    }

    fn pen(&self, key: &str, page: &PageSpec) -> Result<PenSpec, ConfigError> {
        let text = self.require(LINES, key)?;
        let pen = PenSpec::parse(text, page).map_err(|reason| invalid(LINES, key, text, &reason))?;
        if pen.width <= 0 {
            return Err(invalid(LINES, key, text, "pen width must be positive"));
        }
        Ok(pen)
    }

    fn text_style(&self, part: &str, page: &PageSpec) -> Result<TextStyle, ConfigError> {
        let font_text = self.require(FONTS, part)?;
        let font = FontSpec::parse(font_text, page).map_err(|reason| invalid(FONTS, part, font_text, &reason))?;
        if font.size <= 0 {
            return Err(invalid(FONTS, part, font_text, "font size must be positive"));
        }

        let colour_text = self.require(FILL_COLOURS, part)?;
        let colour =
            Colour::from_hex(colour_text).map_err(|reason| invalid(FILL_COLOURS, part, colour_text, &reason))?;

        Ok(TextStyle { font, colour })
    }

    /// A text part that only needs configuring when its data exists. Configuring
    /// half of it is still an error.
    fn optional_text_style(&self, part: &str, page: &PageSpec) -> Result<Option<TextStyle>, ConfigError> {
        if self.get(FONTS, part).is_none() && self.get(FILL_COLOURS, part).is_none() {
            return Ok(None);
        }
        self.text_style(part, page).map(Some)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// A complete configuration with every optional part present
    pub(crate) const SAMPLE: &str = r#"
[General]
Year = 2024
Skip-bitmaps = yes
Title = Family Calendar
Front-cover-text = The {year}{nl}Family Calendar
Birthday-format = {name} ({shortyear})
Deaths-title = In Memoriam
Addresses-title = Addresses
Credits-title = Picture Credits

[Fonts]
Front-cover = Times New Roman, 600, bold
Month = Arial, 500, bold
Year = Arial, 500
Quote = Times New Roman, 200
Weekdays = Arial, 150
Day = Arial, 200, bold
Birthday = Arial, 110
Anniversary = Arial, 110, bold, underline
Deaths-title = Arial, 300
Deaths = Arial, 200
Addresses-title = Arial, 300
Addresses = Arial, 150
Addresses-Name = Arial, 150, bold
Credits-title = Arial, 300
Credits = Arial, 150

[Fill-colors]
Front-cover = 000080
Month = 000000
Year = 000000
Quote = 404040
Weekdays = 000000
Day = 000000
Birthday = 0000FF
Anniversary = FF0000
Deaths-title = 000000
Deaths = 000000
Addresses-title = 000000
Addresses = 000000
Addresses-Name = 000080
Credits-title = 000000
Credits = 000000

[Lines]
Box-outline = 10, 000000
Grid = 5, 808080

[Layout]
Front-cover-text = 50%, 30%
Front-cover-year = 50%, 60%
Month = 600, 300
Day = 50, 30
Birthday = 50, 40
Box = 500, 250, 10500, 1300
Quote = 4000, 350, 10400, 1250
Weekdays = 1350
Grid-margins = 500, 1500, 500, 300
Deaths-title = 50%, 1in
Deaths = 1in, 2in
Addresses-title = 50%, 0.5in
Addresses = 500, 1000
Addresses-wrap = 5000, 8000
Credits-title = 500, 500
Credits = 500, 1000

[January]
Quote = New year, new you.
Box-color = FFE0E0
[February]
Quote = February quote
Box-color = E0FFE0
[March]
Quote = March quote
Box-color = E0E0FF
[April]
Quote = April quote
Box-color = FFFFE0
[May]
Quote = May quote
Box-color = FFE0FF
[June]
Quote = June quote
Box-color = E0FFFF
[July]
Quote = July quote
Box-color = FFF0E0
[August]
Quote = August quote
Box-color = F0FFE0
[September]
Quote = September quote
Box-color = E0F0FF
[October]
Quote = October quote
Box-color = FFE0F0
[November]
Quote = November quote
Box-color = F0E0FF
[December]
Quote = December quote
Box-color = E0FFF0
"#;

    #[test]
    fn parses_a_complete_configuration() {
        let config = CalendarConfig::parse(SAMPLE).expect("can parse configuration");

        assert_eq!(config.general.year, 2024);
        assert!(config.general.skip_bitmaps);
        assert_eq!(config.general.cover_text(), "The 2024\nFamily Calendar");
        assert_eq!(config.output_path(), Path::new(".").join("calendar.pdf"));

        assert_eq!((config.page.width, config.page.height), (11000, 8500));
        assert_eq!(config.styles.anniversary.font, FontSpec::new("Arial", 110).bold().underlined());
        assert_eq!(config.styles.birthday.colour, Colour::new_rgb_bytes(0, 0, 255));
        assert!(config.styles.address_tags.contains_key("name"));
        assert_eq!(config.lines.grid.width, 5);

        assert_eq!(config.layout.front_cover_text, Point::new(5500, 2550));
        assert_eq!(config.layout.year, Point::new(500, 860));
        assert_eq!(config.layout.weekdays, 1350);
        assert_eq!(config.layout.front_cover_image, None);
        assert_eq!(config.layout.grid.cell_width, (11000 - 1000) / 7);
        assert_eq!(config.layout.grid.cell_height, (8500 - 1800) / 6);
        assert_eq!(
            config.layout.addresses_wrap,
            Some(AddressWrap {
                column_advance: 5000,
                max_y: 8000
            })
        );

        assert_eq!(config.month(Month::March).quote, "March quote");
        assert_eq!(config.months[0].box_colour, Colour::new_rgb_bytes(0xFF, 0xE0, 0xE0));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let text = SAMPLE.replace("[General]\nYear = 2024", "[GENERAL]\nyear = 2023");
        let config = CalendarConfig::parse(&text).expect("can parse configuration");
        assert_eq!(config.general.year, 2023);
    }

    #[test]
    fn percent_weekdays_use_the_page_height() {
        let text = SAMPLE.replace("Weekdays = 1350", "Weekdays = 10%");
        let config = CalendarConfig::parse(&text).expect("can parse configuration");
        assert_eq!(config.layout.weekdays, 850);
    }

    #[test]
    fn missing_keys_are_reported() {
        let text = SAMPLE.replace("Day = 50, 30\n", "");
        match CalendarConfig::parse(&text) {
            Err(ConfigError::MissingKey { section, key }) => {
                assert_eq!(section, "Layout");
                assert_eq!(key, "Day");
            }
            other => panic!("expected a missing key, got {other:?}"),
        }
    }

    #[test]
    fn malformed_values_are_reported() {
        let text = SAMPLE.replace("Box = 500, 250, 10500, 1300", "Box = 500, 250, 10500");
        assert!(matches!(
            CalendarConfig::parse(&text),
            Err(ConfigError::Layout { ref key, .. }) if key == "Box"
        ));

        let text = SAMPLE.replace("Month = 600, 300", "Month = 600, 3.5");
        assert!(matches!(CalendarConfig::parse(&text), Err(ConfigError::Layout { .. })));

        let text = SAMPLE.replace("Birthday = 0000FF", "Birthday = blue");
        assert!(matches!(
            CalendarConfig::parse(&text),
            Err(ConfigError::InvalidValue { ref section, .. }) if section == "Fill-colors"
        ));

        let text = SAMPLE.replace("Grid = 5, 808080", "Grid = 0, 808080");
        assert!(matches!(CalendarConfig::parse(&text), Err(ConfigError::InvalidValue { .. })));

        let text = SAMPLE.replace("Skip-bitmaps = yes", "Skip-bitmaps = maybe");
        assert!(matches!(CalendarConfig::parse(&text), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn grid_margins_must_leave_room() {
        for margins in ["60%, 500, 60%, 500", "500, 5000, 500, 4000", "5500, 500, 5497, 500"] {
            let text = SAMPLE.replace("Grid-margins = 500, 1500, 500, 300", &format!("Grid-margins = {margins}"));
            assert!(
                matches!(
                    CalendarConfig::parse(&text),
                    Err(ConfigError::InvalidValue { ref section, ref key, .. }) if section == "Layout" && key == "Grid-margins"
                ),
                "{margins}"
            );
        }
    }

    #[test]
    fn address_title_doubles_as_a_tag() {
        let config = CalendarConfig::parse(SAMPLE).expect("can parse configuration");
        assert_eq!(config.styles.address_tags.get("title"), config.styles.addresses_title.as_ref());
    }

    #[test]
    fn paper_sizes_and_orientation() {
        let text = SAMPLE.replace("Title = Family Calendar", "Paper-size = A4\nOrientation = portrait");
        let config = CalendarConfig::parse(&text).expect("can parse configuration");
        assert_eq!((config.page.width, config.page.height), (8268, 11693));

        let text = SAMPLE.replace("Title = Family Calendar", "Page-size = 8in, 10in");
        let config = CalendarConfig::parse(&text).expect("can parse configuration");
        assert_eq!((config.page.width, config.page.height), (10000, 8000));

        let text = SAMPLE.replace("Title = Family Calendar", "Paper-size = napkin");
        assert!(matches!(
            CalendarConfig::parse(&text),
            Err(ConfigError::UnknownPaperSize(_))
        ));

        let text = SAMPLE.replace("Title = Family Calendar", "Page-size = 50%, 10in");
        assert!(matches!(CalendarConfig::parse(&text), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn images_need_layouts_unless_skipped() {
        let text = SAMPLE.replace("Skip-bitmaps = yes", "Skip-bitmaps = no");
        assert!(matches!(
            CalendarConfig::parse(&text),
            Err(ConfigError::MissingKey { ref key, .. }) if key == "Front-cover-image"
        ));
    }

    #[test]
    fn half_configured_parts_are_errors() {
        let text = SAMPLE.replace("Credits = 000000\n", "");
        assert!(matches!(
            CalendarConfig::parse(&text),
            Err(ConfigError::MissingKey { ref section, ref key }) if section == "Fill-colors" && key == "Credits"
        ));
    }

    #[test]
    fn booleans() {
        for yes in ["1", "yes", "TRUE", "On"] {
            assert_eq!(parse_bool(yes), Some(true));
        }
        for no in ["0", "no", "False", "off"] {
            assert_eq!(parse_bool(no), Some(false));
        }
        assert_eq!(parse_bool("2"), None);
    }
}
