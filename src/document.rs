use crate::error::{CalendarError, SurfaceError};
use crate::layout::Bounds;
use crate::pagesize::PageSpec;
use crate::resources::{ResourceCache, ResourceHandle};
use crate::style::{BrushSpec, PenSpec, StyleSpec, TextStyle};
use crate::surface::{Align, DrawingSurface, TextBox};
use crate::Colour;
use std::path::Path;

/// One document being drawn onto a surface.
///
/// The document borrows the surface for its whole lifetime and owns the
/// [`ResourceCache`], so every font, pen and brush it creates is released exactly
/// once: by [`Document::finish`], or when the document is dropped on an error path.
pub struct Document<'s, S: DrawingSurface + ?Sized> {
    surface: &'s mut S,
    resources: ResourceCache,
    page: PageSpec,
    pages: usize,
}

impl<'s, S: DrawingSurface + ?Sized> Document<'s, S> {
    pub fn new(surface: &'s mut S, page: PageSpec) -> Document<'s, S> {
        Document {
            surface,
            resources: ResourceCache::new(),
            page,
            pages: 0,
        }
    }

    /// Begin the next page. The page ends when the returned session is dropped.
    pub fn page(&mut self) -> Result<PageSession<'_, 's, S>, SurfaceError> {
        self.surface.begin_page()?;
        self.pages += 1;
        log::info!("Printing page {}", self.pages);
        Ok(PageSession { document: self })
    }

    /// Number of pages started so far
    pub fn page_count(&self) -> usize {
        self.pages
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    /// Release every resource and give the surface back
    pub fn finish(mut self) {
        self.resources.release_all(&mut *self.surface);
        log::info!("Finished {} pages", self.pages);
    }
}

impl<'s, S: DrawingSurface + ?Sized> Drop for Document<'s, S> {
    fn drop(&mut self) {
        self.resources.release_all(&mut *self.surface);
    }
}

/// The active page of a [`Document`].
///
/// Positions passed to the helpers here are measured downwards from the top of the
/// page; they are flipped into the surface's upward y axis on the way through.
pub struct PageSession<'d, 's, S: DrawingSurface + ?Sized> {
    document: &'d mut Document<'s, S>,
}

impl<'d, 's, S: DrawingSurface + ?Sized> PageSession<'d, 's, S> {
    /// Direct access to the surface for anything the helpers don't cover
    pub fn surface(&mut self) -> &mut S {
        &mut *self.document.surface
    }

    /// Fetch (creating on first use) the resource for `spec`
    pub fn acquire<T: Into<StyleSpec>>(&mut self, spec: T) -> Result<ResourceHandle, CalendarError> {
        let document = &mut *self.document;
        Ok(document
            .resources
            .acquire(&mut *document.surface, &spec.into())?)
    }

    /// Select a text style's font and colour. Returns the line height of the font.
    pub fn text_style(&mut self, style: &TextStyle) -> Result<i32, CalendarError> {
        let font = self.acquire(style.font.clone())?;
        let surface = self.surface();
        surface.select_font(font)?;
        surface.set_foreground_colour(style.colour)?;
        Ok(surface.measure_text_height(font)?)
    }

    pub fn pen(&mut self, pen: PenSpec) -> Result<(), CalendarError> {
        let handle = self.acquire(pen)?;
        Ok(self.surface().select_pen(handle)?)
    }

    pub fn brush(&mut self, colour: Colour) -> Result<(), CalendarError> {
        let handle = self.acquire(BrushSpec { colour })?;
        Ok(self.surface().select_brush(handle)?)
    }

    /// Left-aligned text starting at (`x`, `y`), wrapping at the page width
    pub fn text_left(&mut self, x: i32, y: i32, text: &str) -> Result<(), CalendarError> {
        let width = self.document.page.width;
        self.surface().draw_text(TextBox {
            x,
            y: -y,
            width,
            height: 0,
            text,
            align: Align::Left,
            wrap: true,
        })?;
        Ok(())
    }

    /// Text centred horizontally on `x`, with its top at `y`
    pub fn text_center(&mut self, x: i32, y: i32, text: &str) -> Result<(), CalendarError> {
        let width = self.document.page.width;
        self.surface().draw_text(TextBox {
            x: x - width,
            y: -y,
            width: 2 * width,
            height: 0,
            text,
            align: Align::Center,
            wrap: true,
        })?;
        Ok(())
    }

    /// Left-aligned text wrapped inside a box
    pub fn text_box(&mut self, bounds: Bounds, text: &str) -> Result<(), CalendarError> {
        self.surface().draw_text(TextBox {
            x: bounds.left,
            y: -bounds.top,
            width: bounds.width(),
            height: bounds.height(),
            text,
            align: Align::Left,
            wrap: true,
        })?;
        Ok(())
    }

    pub fn rect(&mut self, bounds: Bounds) -> Result<(), CalendarError> {
        self.surface()
            .draw_rect(bounds.left, -bounds.top, bounds.right, -bounds.bottom)?;
        Ok(())
    }

    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), CalendarError> {
        self.surface().draw_line(x1, -y1, x2, -y2)?;
        Ok(())
    }

    pub fn image(&mut self, bounds: Bounds, path: &Path) -> Result<(), CalendarError> {
        self.surface().draw_image(
            bounds.left,
            -bounds.top,
            bounds.width(),
            bounds.height(),
            path,
        )?;
        Ok(())
    }
}

impl<'d, 's, S: DrawingSurface + ?Sized> Drop for PageSession<'d, 's, S> {
    fn drop(&mut self) {
        if let Err(e) = self.document.surface.end_page() {
            log::error!("could not end page {}: {}", self.document.pages, e);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::colour::colours;
    use crate::pagesize::{Orientation, LETTER};
    use crate::style::FontSpec;
    use crate::surface::{DrawCall, RecordingSurface};

    fn page() -> PageSpec {
        PageSpec::new(LETTER, Orientation::Landscape)
    }

    #[test]
    fn pages_end_when_sessions_drop() {
        let mut surface = RecordingSurface::new();
        let mut document = Document::new(&mut surface, page());
        {
            let _page = document.page().expect("can begin page");
        }
        {
            let mut page = document.page().expect("can begin page");
            page.line(0, 100, 200, 100).expect("can draw a line");
        }
        assert_eq!(document.page_count(), 2);
        document.finish();

        let pages = surface.pages();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_empty());
        assert_eq!(
            pages[1],
            &[DrawCall::Line {
                x1: 0,
                y1: -100,
                x2: 200,
                y2: -100
            }]
        );
    }

    #[test]
    fn pages_end_on_error_paths() {
        fn failing(document: &mut Document<'_, RecordingSurface>) -> Result<(), CalendarError> {
            let mut page = document.page()?;
            page.text_style(&TextStyle {
                font: FontSpec::new("", 100),
                colour: colours::BLACK,
            })?;
            Ok(())
        }

        let mut surface = RecordingSurface::new();
        {
            let mut document = Document::new(&mut surface, page());
            assert!(matches!(
                failing(&mut document),
                Err(CalendarError::ResourceCreation(_))
            ));
        }
        assert_eq!(surface.calls(), &[DrawCall::BeginPage, DrawCall::EndPage]);
    }

    #[test]
    fn resources_are_released_once() {
        let mut surface = RecordingSurface::new();
        {
            let mut document = Document::new(&mut surface, page());
            let style = TextStyle {
                font: FontSpec::new("Arial", 200),
                colour: colours::RED,
            };
            for _ in 0..3 {
                let mut page = document.page().expect("can begin page");
                assert_eq!(page.text_style(&style).expect("can select style"), 200);
                page.text_left(100, 200, "hello").expect("can draw text");
            }
            assert_eq!(document.resources().len(), 1);
            document.finish();
        }
        assert_eq!(surface.created().len(), 1);
        assert_eq!(surface.live_resources(), 0);
        let releases = surface
            .calls()
            .iter()
            .filter(|c| matches!(c, DrawCall::Release(_)))
            .count();
        assert_eq!(releases, 1);
    }

    #[test]
    fn helpers_flip_the_y_axis() {
        let mut surface = RecordingSurface::new();
        {
            let mut document = Document::new(&mut surface, page());
            let mut page = document.page().expect("can begin page");
            page.text_style(&TextStyle {
                font: FontSpec::new("Arial", 200),
                colour: colours::BLACK,
            })
            .expect("can select style");
            page.text_center(5500, 300, "centre").expect("can draw text");
            page.rect(Bounds::ltrb(10, 20, 30, 40)).expect("can draw rect");
            page.image(Bounds::ltrb(10, 20, 30, 60), Path::new("a.jpg"))
                .expect("can draw image");
        }

        let calls = surface.calls();
        assert!(calls.contains(&DrawCall::Text {
            x: 5500 - 11000,
            y: -300,
            width: 22000,
            height: 0,
            text: "centre".into(),
            align: Align::Center,
            wrap: true,
        }));
        assert!(calls.contains(&DrawCall::Rect {
            left: 10,
            top: -20,
            right: 30,
            bottom: -40
        }));
        assert!(calls.contains(&DrawCall::Image {
            left: 10,
            top: -20,
            width: 20,
            height: 40,
            path: "a.jpg".into()
        }));
    }
}
