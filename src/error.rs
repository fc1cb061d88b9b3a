use crate::events::AnnotationEvent;
use crate::layout::LayoutParseError;
use crate::resources::ResourceHandle;
use crate::style::ResourceKind;
use std::path::PathBuf;
use thiserror::Error;

/// All errors that can stop a calendar from being generated
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error(transparent)]
    /// The configuration is missing something or contains a malformed entry
    Config(#[from] ConfigError),

    #[error(transparent)]
    /// The drawing device refused to create a font, pen or brush
    ResourceCreation(#[from] ResourceCreationError),

    #[error(transparent)]
    /// A data file contains a line that could not be understood
    DataFormat(#[from] DataFormatError),

    #[error(transparent)]
    /// The event traversal went out of order; this is a defect, not bad input
    EventOrdering(#[from] EventOrderingViolation),

    #[error(transparent)]
    /// The drawing surface was used incorrectly
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    /// The PDF could not be produced
    Pdf(#[from] PdfError),

    #[error("could not read {path}")]
    /// A data file exists but could not be read
    ReadData {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with the configuration file. All of these are detected before the
/// first page is started.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration syntax error: {0}")]
    Syntax(#[from] ini::ParseError),

    #[error("missing required key [{section}] {key}")]
    MissingKey { section: String, key: String },

    #[error("[{section}] {key}: {source}")]
    Layout {
        section: String,
        key: String,
        #[source]
        source: LayoutParseError,
    },

    #[error("[{section}] {key}: invalid value '{value}': {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    #[error("[General] Paper-size: unknown paper size '{0}'")]
    UnknownPaperSize(String),
}

/// The drawing device rejected a resource. Fatal for the whole document.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResourceCreationError {
    #[error("no installed font is named '{0}'")]
    UnknownFont(String),

    #[error("font '{name}' could not be loaded: {reason}")]
    FontLoad { name: String, reason: String },

    #[error("font size must be positive, got {0}")]
    InvalidFontSize(i32),

    #[error("pen width must be positive, got {0}")]
    InvalidPenWidth(i32),

    #[error("the resource cache has already been released")]
    Released,
}

/// A line in a data file could not be parsed
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{source_name} line {line}: {reason}: '{content}'")]
pub struct DataFormatError {
    pub source_name: String,
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// The day-by-day traversal of the year went wrong
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventOrderingViolation {
    #[error(
        "event '{}' on {}/{} was passed over by the calendar traversal (now at {}/{})",
        .event.label, .event.month, .event.day, .cursor.0, .cursor.1
    )]
    PassedOver {
        event: AnnotationEvent,
        /// The traversal's (month, day) when the problem was noticed
        cursor: (u32, u32),
    },

    #[error(
        "the calendar traversal moved backwards from {}/{} to {}/{}",
        .from.0, .from.1, .to.0, .to.1
    )]
    Backwards { from: (u32, u32), to: (u32, u32) },
}

/// Incorrect use of a [`DrawingSurface`](crate::DrawingSurface)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("drawing requires an active page")]
    NoActivePage,

    #[error("a page is already active")]
    PageAlreadyActive,

    #[error("no {0} is selected")]
    NothingSelected(ResourceKind),

    #[error("unknown or released resource {0:?}")]
    UnknownHandle(ResourceHandle),
}

/// Errors produced while rendering the PDF
#[derive(Error, Debug)]
pub enum PdfError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error("a page is still active")]
    /// The document was written before its last page was ended
    PageOpen,
}
