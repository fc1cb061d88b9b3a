//! A [`DrawingSurface`] that renders to a PDF file.
//!
//! Fonts are looked up by family name and weight among the installed system fonts
//! (plus an optional extra font directory) and embedded whole. Pictures are loaded
//! once per path and shared by every page that draws them.

mod content;
mod font;
mod image;
mod info;
mod page;
mod refs;
mod text;

pub use self::font::Font;
pub use self::image::Image;
pub use info::Info;
pub use text::wrap_lines;

use crate::colour::{colours, Colour};
use crate::error::{PdfError, ResourceCreationError, SurfaceError};
use crate::pagesize::PageSpec;
use crate::resources::ResourceHandle;
use crate::style::{FontSpec, ResourceKind, StyleSpec};
use crate::surface::{Align, DrawingSurface, TextBox};
use crate::units::Pt;
use id_arena::{Arena, Id};
use page::{Page, PageContents, Stroke, TextRun};
use pdf_writer::{Pdf, Rect, Ref};
use refs::{ObjectReferences, RefType};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

enum Resource {
    Font {
        face: Id<Font>,
        spec: FontSpec,
        em: Pt,
        /// Horizontal scaling in percent
        scale: f32,
    },
    Pen(Stroke),
    Brush(Colour),
}

/// Per-page drawing state, reset whenever a page begins
struct Paint {
    foreground: Colour,
    fill: Option<Colour>,
    font: Option<usize>,
    pen: Option<Stroke>,
}

impl Default for Paint {
    fn default() -> Self {
        Paint {
            foreground: colours::BLACK,
            fill: None,
            font: None,
            pen: None,
        }
    }
}

pub struct PdfSurface {
    page_spec: PageSpec,
    pub info: Info,
    database: fontdb::Database,
    fonts: Arena<Font>,
    faces: HashMap<fontdb::ID, Id<Font>>,
    resources: Vec<Option<Resource>>,
    images: Arena<Image>,
    image_paths: HashMap<PathBuf, Option<Id<Image>>>,
    pages: Vec<Page>,
    current: Option<Page>,
    paint: Paint,
}

impl PdfSurface {
    /// Create a surface whose pages are all `page_spec` sized. Fonts in `font_dir`
    /// are considered alongside the system fonts.
    pub fn new<S: ToString>(page_spec: PageSpec, title: S, font_dir: Option<&Path>) -> PdfSurface {
        let mut database = fontdb::Database::new();
        database.load_system_fonts();
        if let Some(dir) = font_dir {
            database.load_fonts_dir(dir);
        }
        log::debug!("{} font faces available", database.len());

        let mut info = Info::new();
        info.title(title);

        PdfSurface {
            page_spec,
            info,
            database,
            fonts: Arena::new(),
            faces: HashMap::new(),
            resources: Vec::new(),
            images: Arena::new(),
            image_paths: HashMap::new(),
            pages: Vec::new(),
            current: None,
            paint: Paint::default(),
        }
    }

    /// Number of finished pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_height(&self) -> Pt {
        self.page_spec.size_pt().1
    }

    /// Convert a native x coordinate to PDF user space
    fn x(&self, x: i32) -> Pt {
        Pt::from_native(x)
    }

    /// Convert a native (upward, non-positive on the page) y coordinate to PDF user space
    fn y(&self, y: i32) -> Pt {
        self.page_height() + Pt::from_native(y)
    }

    fn current_page(&mut self) -> Result<&mut Page, SurfaceError> {
        self.current.as_mut().ok_or(SurfaceError::NoActivePage)
    }

    fn resource(&self, handle: ResourceHandle, kind: ResourceKind) -> Result<&Resource, SurfaceError> {
        let resource = self
            .resources
            .get(handle.id)
            .and_then(Option::as_ref)
            .ok_or(SurfaceError::UnknownHandle(handle))?;
        let actual = match resource {
            Resource::Font { .. } => ResourceKind::Font,
            Resource::Pen(_) => ResourceKind::Pen,
            Resource::Brush(_) => ResourceKind::Brush,
        };
        if actual != kind || handle.kind != kind {
            return Err(SurfaceError::UnknownHandle(handle));
        }
        Ok(resource)
    }

    fn load_face(&mut self, spec: &FontSpec) -> Result<Id<Font>, ResourceCreationError> {
        let query = fontdb::Query {
            families: &[fontdb::Family::Name(&spec.name)],
            weight: fontdb::Weight(spec.weight),
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let face_id = self
            .database
            .query(&query)
            .ok_or_else(|| ResourceCreationError::UnknownFont(spec.name.clone()))?;
        if let Some(&id) = self.faces.get(&face_id) {
            return Ok(id);
        }

        let (bytes, index) = self
            .database
            .with_face_data(face_id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ResourceCreationError::FontLoad {
                name: spec.name.clone(),
                reason: "font data is unavailable".to_string(),
            })?;
        let font = Font::load(bytes, index, &spec.name).map_err(|e| ResourceCreationError::FontLoad {
            name: spec.name.clone(),
            reason: e.to_string(),
        })?;
        log::debug!("loaded font face '{}' for {}", font.name(), spec.name);

        let id = self.fonts.alloc(font);
        self.faces.insert(face_id, id);
        Ok(id)
    }

    fn create_font(&mut self, spec: &FontSpec) -> Result<Resource, ResourceCreationError> {
        if spec.name.trim().is_empty() {
            return Err(ResourceCreationError::UnknownFont(spec.name.clone()));
        }
        if spec.size <= 0 {
            return Err(ResourceCreationError::InvalidFontSize(spec.size));
        }

        let face = self.load_face(spec)?;
        let font = &self.fonts[face];
        let em = font.em_size(Pt::from_native(spec.size));
        let scale = if spec.width > 0 {
            let natural = em.0 * font.average_lowercase_advance();
            if natural > 0.0 {
                Pt::from_native(spec.width).0 / natural * 100.0
            } else {
                100.0
            }
        } else {
            100.0
        };

        Ok(Resource::Font {
            face,
            spec: spec.clone(),
            em,
            scale,
        })
    }

    /// Load (or recall) the picture at `path`. Pictures that fail to load are
    /// remembered as missing so the warning is only logged once.
    fn image(&mut self, path: &Path) -> Option<Id<Image>> {
        if let Some(&cached) = self.image_paths.get(path) {
            return cached;
        }
        let loaded = match Image::from_disk(path) {
            Ok(image) => Some(self.images.alloc(image)),
            Err(e) => {
                log::warn!("skipping image {}: {}", path.display(), e);
                None
            }
        };
        self.image_paths.insert(path.to_path_buf(), loaded);
        loaded
    }

    /// Write the finished document. Fails if a page is still active.
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), PdfError> {
        if self.current.is_some() {
            return Err(PdfError::PageOpen);
        }

        let mut refs = ObjectReferences::new();
        let mut writer = Pdf::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        self.info.write(&mut refs, &mut writer);

        for (id, font) in self.fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }
        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }
        for (i, page) in self.pages.iter().enumerate() {
            page.write(&mut refs, i, &self.fonts, &self.images, &mut writer)?;
        }

        let kids: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .kids(kids)
            .count(self.pages.len() as i32);
        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(&writer.finish())?;
        Ok(())
    }
}

impl DrawingSurface for PdfSurface {
    fn begin_page(&mut self) -> Result<(), SurfaceError> {
        if self.current.is_some() {
            return Err(SurfaceError::PageAlreadyActive);
        }
        let (width, height) = self.page_spec.size_pt();
        self.current = Some(Page::new(width, height));
        self.paint = Paint::default();
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), SurfaceError> {
        let page = self.current.take().ok_or(SurfaceError::NoActivePage)?;
        self.pages.push(page);
        Ok(())
    }

    fn create_resource(&mut self, spec: &StyleSpec) -> Result<ResourceHandle, ResourceCreationError> {
        let resource = match spec {
            StyleSpec::Font(font) => self.create_font(font)?,
            StyleSpec::Pen(pen) => {
                if pen.width <= 0 {
                    return Err(ResourceCreationError::InvalidPenWidth(pen.width));
                }
                Resource::Pen(Stroke {
                    width: Pt::from_native(pen.width),
                    colour: pen.colour,
                })
            }
            StyleSpec::Brush(brush) => Resource::Brush(brush.colour),
        };

        let handle = ResourceHandle {
            kind: spec.kind(),
            id: self.resources.len(),
        };
        self.resources.push(Some(resource));
        Ok(handle)
    }

    fn release_resource(&mut self, handle: ResourceHandle) {
        if let Some(slot) = self.resources.get_mut(handle.id) {
            *slot = None;
        }
        if self.paint.font == Some(handle.id) {
            self.paint.font = None;
        }
    }

    fn set_foreground_colour(&mut self, colour: Colour) -> Result<(), SurfaceError> {
        self.current_page()?;
        self.paint.foreground = colour;
        Ok(())
    }

    fn set_fill_colour(&mut self, colour: Colour) -> Result<(), SurfaceError> {
        self.current_page()?;
        self.paint.fill = Some(colour);
        Ok(())
    }

    fn select_font(&mut self, font: ResourceHandle) -> Result<(), SurfaceError> {
        self.current_page()?;
        self.resource(font, ResourceKind::Font)?;
        self.paint.font = Some(font.id);
        Ok(())
    }

    fn select_pen(&mut self, pen: ResourceHandle) -> Result<(), SurfaceError> {
        self.current_page()?;
        let stroke = match self.resource(pen, ResourceKind::Pen)? {
            Resource::Pen(stroke) => *stroke,
            _ => return Err(SurfaceError::UnknownHandle(pen)),
        };
        self.paint.pen = Some(stroke);
        Ok(())
    }

    fn select_brush(&mut self, brush: ResourceHandle) -> Result<(), SurfaceError> {
        self.current_page()?;
        let colour = match self.resource(brush, ResourceKind::Brush)? {
            Resource::Brush(colour) => *colour,
            _ => return Err(SurfaceError::UnknownHandle(brush)),
        };
        self.paint.fill = Some(colour);
        Ok(())
    }

    fn draw_text(&mut self, text: TextBox<'_>) -> Result<(), SurfaceError> {
        self.current_page()?;
        let slot = self
            .paint
            .font
            .ok_or(SurfaceError::NothingSelected(ResourceKind::Font))?;
        let handle = ResourceHandle {
            kind: ResourceKind::Font,
            id: slot,
        };
        let Resource::Font {
            face,
            spec,
            em,
            scale,
        } = self.resource(handle, ResourceKind::Font)?
        else {
            return Err(SurfaceError::UnknownHandle(handle));
        };
        let (face, em, scale) = (*face, *em, *scale);
        let line_height = Pt::from_native(spec.size);
        let underline = spec.underline;

        let font = &self.fonts[face];
        let box_left = self.x(text.x);
        let box_width = Pt::from_native(text.width);
        let ascent = font.ascent(em);
        let measure = |line: &str| font.width_of(line, em).0 * scale / 100.0;
        let lines = wrap_lines(text.text, text.wrap.then_some(box_width.0), measure);

        let mut runs = Vec::with_capacity(lines.len());
        let mut top = self.y(text.y);
        for line in lines {
            if !line.is_empty() {
                let width = Pt(measure(&line));
                let x = match text.align {
                    Align::Left => box_left,
                    Align::Center => box_left + (box_width - width) * 0.5,
                };
                runs.push(TextRun {
                    font: face,
                    em,
                    scale,
                    colour: self.paint.foreground,
                    x,
                    y: top - ascent,
                    glyphs: line.chars().map(|ch| font.glyph_id(ch)).collect(),
                    underline: underline.then(|| font.underline(em)),
                    width,
                });
            }
            top -= line_height;
        }

        let page = self.current_page()?;
        for run in runs {
            page.add(PageContents::Text(run));
        }
        Ok(())
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), SurfaceError> {
        self.current_page()?;
        let stroke = self.paint.pen.unwrap_or(Stroke {
            width: Pt(0.0),
            colour: colours::BLACK,
        });
        let from = (self.x(x1), self.y(y1));
        let to = (self.x(x2), self.y(y2));
        self.current_page()?
            .add(PageContents::Line { from, to, stroke });
        Ok(())
    }

    fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> Result<(), SurfaceError> {
        self.current_page()?;
        let rect = Rect::new(
            self.x(left).0,
            self.y(bottom).0,
            self.x(right).0,
            self.y(top).0,
        );
        let fill = self.paint.fill;
        let stroke = self.paint.pen;
        self.current_page()?
            .add(PageContents::Rect { rect, fill, stroke });
        Ok(())
    }

    fn draw_image(
        &mut self,
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        path: &Path,
    ) -> Result<(), SurfaceError> {
        self.current_page()?;
        let Some(image) = self.image(path) else {
            return Ok(());
        };
        let x1 = self.x(left);
        let y2 = self.y(top);
        let position = Rect::new(
            x1.0,
            (y2 - Pt::from_native(height)).0,
            (x1 + Pt::from_native(width)).0,
            y2.0,
        );
        self.current_page()?
            .add(PageContents::Image { image, position });
        Ok(())
    }

    fn measure_text_height(&mut self, font: ResourceHandle) -> Result<i32, SurfaceError> {
        match self.resource(font, ResourceKind::Font)? {
            Resource::Font { spec, .. } => Ok(spec.size),
            _ => Err(SurfaceError::UnknownHandle(font)),
        }
    }
}
