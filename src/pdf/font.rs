use super::refs::{ObjectReferences, RefType};
use crate::error::PdfError;
use crate::units::Pt;
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// An installed font face, embedded whole into the PDF as a Type0 font.
///
/// Sizes handed to the metric helpers are *em* sizes in points; use
/// [`Font::em_size`] to get from a cell height to an em size.
pub struct Font {
    pub face: OwnedFace,
    /// Family name the face was requested by
    pub family: String,
}

impl Font {
    /// Parse a font face out of raw font file bytes
    pub fn load<S: ToString>(bytes: Vec<u8>, index: u32, family: S) -> Result<Font, PdfError> {
        let face = OwnedFace::from_vec(bytes, index)?;
        Ok(Font {
            face,
            family: family.to_string(),
        })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn units_per_em(&self) -> f32 {
        self.face().units_per_em() as f32
    }

    /// Full name of the face, falling back to the family name
    pub fn name(&self) -> String {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .unwrap_or_else(|| self.family.clone())
    }

    /// Em size that makes ascent + descent equal `cell_height`
    pub fn em_size(&self, cell_height: Pt) -> Pt {
        let extent = (self.face().ascender() as f32 - self.face().descender() as f32).max(1.0);
        cell_height * (self.units_per_em() / extent)
    }

    /// Distance from the top of the text cell to the baseline
    pub fn ascent(&self, em: Pt) -> Pt {
        em * (self.face().ascender() as f32 / self.units_per_em())
    }

    /// Advance width of `text` at the given em size. Characters without a glyph use
    /// the fallback glyph's advance.
    pub fn width_of(&self, text: &str, em: Pt) -> Pt {
        let units: f32 = text
            .chars()
            .map(|ch| {
                self.face()
                    .glyph_hor_advance(GlyphId(self.glyph_id(ch)))
                    .unwrap_or_default() as f32
            })
            .sum();
        em * (units / self.units_per_em())
    }

    /// Mean advance of the lowercase latin letters, as a fraction of the em
    pub fn average_lowercase_advance(&self) -> f32 {
        let (sum, count) = ('a'..='z')
            .filter_map(|ch| self.face().glyph_index(ch))
            .filter_map(|gid| self.face().glyph_hor_advance(gid))
            .fold((0.0, 0), |(sum, count), adv| (sum + adv as f32, count + 1));
        if count == 0 {
            0.5
        } else {
            sum / count as f32 / self.units_per_em()
        }
    }

    /// Underline offset from the baseline (negative is below) and thickness
    pub fn underline(&self, em: Pt) -> (Pt, Pt) {
        let scaling = 1.0 / self.units_per_em();
        match self.face().underline_metrics() {
            Some(m) => (
                em * (m.position as f32 * scaling),
                em * (m.thickness.max(1) as f32 * scaling),
            ),
            None => (em * -0.1, em * 0.05),
        }
    }

    /// Glyph for `ch`, or the replacement character, `?`, or `.notdef` in that
    /// order of preference
    pub fn glyph_id(&self, ch: char) -> u16 {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// Glyph id -> the first character that maps to it
    fn glyph_chars(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint| {
                if let (Ok(ch), Some(gid)) = (char::try_from(codepoint), subtable.glyph_index(codepoint)) {
                    if gid.0 > 0 {
                        map.entry(gid.0).or_insert(ch);
                    }
                }
            });
        }
        map
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(index));
        let data = self.face.as_slice();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            data,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), data.len() as i32);
        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let data_id = self.write_font_data(refs, index, writer);
        let face = self.face();
        let scaling = 1000.0 / self.units_per_em();

        let advances: Vec<f32> = self
            .glyph_chars()
            .keys()
            .filter_map(|&gid| face.glyph_hor_advance(GlyphId(gid)))
            .map(|adv| adv as f32 * scaling)
            .collect();
        let max_width = advances.iter().copied().fold(0.0, f32::max);
        let avg_width = if advances.is_empty() {
            0.0
        } else {
            advances.iter().sum::<f32>() / advances.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(self.name().replace(' ', "").as_bytes()));
        descriptor.family(Str(self.family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scaling);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width);
        descriptor.max_width(max_width);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_cid(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let descriptor_id = self.write_descriptor(refs, index, writer);
        let face = self.face();
        let scaling = 1000.0 / self.units_per_em();

        let id = refs.gen(RefType::CidFont(index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);

        // runs of consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        let mut run: Option<(u16, Vec<f32>)> = None;
        for gid in 0..face.number_of_glyphs() {
            let width = face.glyph_hor_advance(GlyphId(gid)).unwrap_or_default() as f32 * scaling;
            match run.as_mut() {
                Some((_, run_widths)) if run_widths.len() < 256 => run_widths.push(width),
                _ => {
                    if let Some((start, run_widths)) = run.take() {
                        widths.consecutive(start, run_widths);
                    }
                    run = Some((gid, vec![width]));
                }
            }
        }
        if let Some((start, run_widths)) = run {
            widths.consecutive(start, run_widths);
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(u16, char)> = self.glyph_chars().into_iter().collect();
        for block in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let index = id.index();
        let font_id = refs.gen(RefType::Font(index));
        let cid_font_id = self.write_cid(refs, index, writer);
        let to_unicode_id = self.write_to_unicode(refs, index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}
