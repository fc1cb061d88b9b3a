//! Lays out a yearly wall calendar (a front cover, an illustration and a date grid
//! for every month, then memorial, address book and picture credit pages) and draws
//! it onto any [`DrawingSurface`], most usefully a [`PdfSurface`].
//!
//! ```no_run
//! use pdf_calendar::{render, CalendarConfig, CalendarData, PdfSurface};
//!
//! let config = CalendarConfig::load("calendar.ini")?;
//! let data = CalendarData::load(&config.dir, config.general.skip_bitmaps)?;
//! let mut surface = PdfSurface::new(config.page, &config.general.title, config.font_dir().as_deref());
//! render(&config, &data, &mut surface)?;
//! surface.write(&mut std::fs::File::create(config.output_path())?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod colour;
pub use colour::*;

mod compose;
pub use compose::*;

mod config;
pub use config::*;

mod data;
pub use data::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod events;
pub use events::*;

/// Resolution of symbolic layout values and the geometry built from them
pub mod layout;

mod pagesize;
pub use pagesize::*;

/// The PDF drawing backend
pub mod pdf;
pub use pdf::PdfSurface;

mod resources;
pub use resources::*;

mod style;
pub use style::*;

mod surface;
pub use surface::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
