//! The page-oriented drawing device.
//!
//! # Coordinates
//!
//! Every coordinate is in native units (1/1000 inch). The origin is the top-left
//! corner of the page, x grows to the right and y grows **upwards**, so every point
//! on the page has `y <= 0`. Callers that think in "distance from the top" negate
//! their y values before drawing.
//!
//! # Paint state
//!
//! Colours and the selected font, pen and brush persist between draw calls on a
//! page but are reset by [`DrawingSurface::begin_page`]; set them again on every
//! page that needs them.

mod recording;

pub use recording::*;

use crate::colour::Colour;
use crate::error::{ResourceCreationError, SurfaceError};
use crate::resources::ResourceHandle;
use crate::style::StyleSpec;
use std::path::Path;

/// Horizontal placement of text within its box
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Align {
    Left,
    Center,
}

/// A box of text to lay out: the top-left corner, the box size, and how to place
/// the text inside it
#[derive(Clone, PartialEq, Debug)]
pub struct TextBox<'a> {
    pub x: i32,
    /// Top edge of the box (y grows upwards)
    pub y: i32,
    pub width: i32,
    /// Informational only: text is not clipped to the box height
    pub height: i32,
    pub text: &'a str,
    pub align: Align,
    /// Break lines on whitespace so they fit `width`
    pub wrap: bool,
}

/// A device that can draw onto a sequence of pages.
///
/// Resources (fonts, pens, brushes) are created and released through the
/// [`ResourceCache`](crate::ResourceCache), which is the only caller of
/// [`create_resource`](DrawingSurface::create_resource) and
/// [`release_resource`](DrawingSurface::release_resource).
pub trait DrawingSurface {
    /// Start a new page. Pages never nest.
    fn begin_page(&mut self) -> Result<(), SurfaceError>;

    /// Finish the active page. Empty pages are still emitted.
    fn end_page(&mut self) -> Result<(), SurfaceError>;

    /// Create a device resource for `spec`
    fn create_resource(&mut self, spec: &StyleSpec) -> Result<ResourceHandle, ResourceCreationError>;

    /// Dispose of a resource previously returned by
    /// [`create_resource`](DrawingSurface::create_resource)
    fn release_resource(&mut self, handle: ResourceHandle);

    /// Colour used for text
    fn set_foreground_colour(&mut self, colour: Colour) -> Result<(), SurfaceError>;

    /// Colour used to fill rectangles
    fn set_fill_colour(&mut self, colour: Colour) -> Result<(), SurfaceError>;

    fn select_font(&mut self, font: ResourceHandle) -> Result<(), SurfaceError>;

    fn select_pen(&mut self, pen: ResourceHandle) -> Result<(), SurfaceError>;

    /// Select a brush; this also sets the fill colour to the brush's colour
    fn select_brush(&mut self, brush: ResourceHandle) -> Result<(), SurfaceError>;

    /// Draw text with the selected font and foreground colour
    fn draw_text(&mut self, text: TextBox<'_>) -> Result<(), SurfaceError>;

    /// Draw a straight line with the selected pen
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), SurfaceError>;

    /// Draw a rectangle filled with the fill colour and outlined with the selected
    /// pen (if any)
    fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> Result<(), SurfaceError>;

    /// Draw the raster image at `path` scaled into the box whose top-left corner is
    /// (`left`, `top`) and which extends `width` to the right and `height`
    /// downwards. An image that cannot be loaded is logged and skipped.
    fn draw_image(
        &mut self,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        path: &Path,
    ) -> Result<(), SurfaceError>;

    /// Vertical advance of one line of text in the given font
    fn measure_text_height(&mut self, font: ResourceHandle) -> Result<i32, SurfaceError>;
}
