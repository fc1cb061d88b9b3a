use super::content::render_contents;
use super::font::Font;
use super::image::Image;
use super::refs::{ObjectReferences, RefType};
use crate::colour::Colour;
use crate::units::Pt;
use id_arena::{Arena, Id};
use pdf_writer::{Filter, Finish, Name, Pdf, Rect};

/// Outline style for lines and rectangle borders
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stroke {
    pub width: Pt,
    pub colour: Colour,
}

/// One line of text, already shaped into glyph ids. `(x, y)` is the start of the
/// baseline in PDF user space.
#[derive(Clone, PartialEq, Debug)]
pub struct TextRun {
    pub font: Id<Font>,
    pub em: Pt,
    /// Horizontal scaling in percent
    pub scale: f32,
    pub colour: Colour,
    pub x: Pt,
    pub y: Pt,
    pub glyphs: Vec<u16>,
    /// Offset from the baseline and thickness of an underline, if any
    pub underline: Option<(Pt, Pt)>,
    /// Scaled advance of the whole run
    pub width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(TextRun),
    Line {
        from: (Pt, Pt),
        to: (Pt, Pt),
        stroke: Stroke,
    },
    Rect {
        rect: Rect,
        fill: Option<Colour>,
        stroke: Option<Stroke>,
    },
    Image {
        image: Id<Image>,
        position: Rect,
    },
}

pub struct Page {
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(width: Pt, height: Pt) -> Page {
        Page {
            media_box: Rect {
                x1: 0.0,
                y1: 0.0,
                x2: width.0,
                y2: height.0,
            },
            contents: Vec::new(),
        }
    }

    pub fn add(&mut self, content: PageContents) {
        self.contents.push(content);
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), std::io::Error> {
        let id = refs.gen(RefType::Page(index));
        let page_tree = refs.gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(index));

        let mut page = writer.page(id);
        page.media_box(self.media_box);
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            resource_fonts.pair(
                Name(format!("F{}", font_id.index()).as_bytes()),
                refs.gen(RefType::Font(font_id.index())),
            );
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            resource_xobjects.pair(
                Name(format!("I{}", image_id.index()).as_bytes()),
                refs.gen(RefType::Image(image_id.index())),
            );
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);
        Ok(())
    }
}
