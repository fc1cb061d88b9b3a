use super::{Align, DrawingSurface, TextBox};
use crate::colour::Colour;
use crate::error::{ResourceCreationError, SurfaceError};
use crate::resources::ResourceHandle;
use crate::style::{FontSpec, ResourceKind, StyleSpec};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// One call made against a [`RecordingSurface`]
#[derive(Clone, PartialEq, Debug)]
pub enum DrawCall {
    BeginPage,
    EndPage,
    Create(ResourceHandle, StyleSpec),
    Release(ResourceHandle),
    ForegroundColour(Colour),
    FillColour(Colour),
    SelectFont(ResourceHandle),
    SelectPen(ResourceHandle),
    SelectBrush(ResourceHandle),
    Text {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        text: String,
        align: Align,
        wrap: bool,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
    Rect {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
    Image {
        left: i32,
        top: i32,
        width: i32,
        height: i32,
        path: PathBuf,
    },
}

/// An in-memory drawing device that records every call it receives.
///
/// It enforces the same usage rules as a real device (no drawing outside a page,
/// no nested pages, text needs a font) and rejects the same kinds of resources:
/// empty font names, non-positive sizes and pen widths, and any font name
/// registered with [`reject_font`](RecordingSurface::reject_font).
#[derive(Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    live: HashMap<usize, StyleSpec>,
    next_id: usize,
    page_active: bool,
    font: Option<ResourceHandle>,
    rejected_fonts: HashSet<String>,
}

impl RecordingSurface {
    pub fn new() -> RecordingSurface {
        RecordingSurface::default()
    }

    /// Refuse to create any font with the given family name
    pub fn reject_font<S: ToString>(mut self, name: S) -> RecordingSurface {
        self.rejected_fonts.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// The calls made within each page, in page order
    pub fn pages(&self) -> Vec<&[DrawCall]> {
        let mut pages = Vec::new();
        let mut start = None;
        for (i, call) in self.calls.iter().enumerate() {
            match call {
                DrawCall::BeginPage => start = Some(i + 1),
                DrawCall::EndPage => {
                    if let Some(s) = start.take() {
                        pages.push(&self.calls[s..i]);
                    }
                }
                _ => {}
            }
        }
        pages
    }

    /// Every spec a resource was created for, in creation order
    pub fn created(&self) -> Vec<&StyleSpec> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Create(_, spec) => Some(spec),
                _ => None,
            })
            .collect()
    }

    /// Number of resources created and not yet released
    pub fn live_resources(&self) -> usize {
        self.live.len()
    }

    fn require_page(&self) -> Result<(), SurfaceError> {
        if self.page_active {
            Ok(())
        } else {
            Err(SurfaceError::NoActivePage)
        }
    }

    fn require_live(&self, handle: ResourceHandle, kind: ResourceKind) -> Result<(), SurfaceError> {
        match self.live.get(&handle.id) {
            Some(spec) if spec.kind() == kind && handle.kind == kind => Ok(()),
            _ => Err(SurfaceError::UnknownHandle(handle)),
        }
    }

    fn check_font(&self, font: &FontSpec) -> Result<(), ResourceCreationError> {
        if font.name.trim().is_empty() || self.rejected_fonts.contains(&font.name) {
            return Err(ResourceCreationError::UnknownFont(font.name.clone()));
        }
        if font.size <= 0 {
            return Err(ResourceCreationError::InvalidFontSize(font.size));
        }
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin_page(&mut self) -> Result<(), SurfaceError> {
        if self.page_active {
            return Err(SurfaceError::PageAlreadyActive);
        }
        self.page_active = true;
        self.font = None;
        self.calls.push(DrawCall::BeginPage);
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.page_active = false;
        self.calls.push(DrawCall::EndPage);
        Ok(())
    }

    fn create_resource(&mut self, spec: &StyleSpec) -> Result<ResourceHandle, ResourceCreationError> {
        match spec {
            StyleSpec::Font(font) => self.check_font(font)?,
            StyleSpec::Pen(pen) if pen.width <= 0 => {
                return Err(ResourceCreationError::InvalidPenWidth(pen.width))
            }
            _ => {}
        }

        let handle = ResourceHandle {
            kind: spec.kind(),
            id: self.next_id,
        };
        self.next_id += 1;
        self.live.insert(handle.id, spec.clone());
        self.calls.push(DrawCall::Create(handle, spec.clone()));
        Ok(handle)
    }

    fn release_resource(&mut self, handle: ResourceHandle) {
        if self.live.remove(&handle.id).is_some() {
            self.calls.push(DrawCall::Release(handle));
        }
    }

    fn set_foreground_colour(&mut self, colour: Colour) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.calls.push(DrawCall::ForegroundColour(colour));
        Ok(())
    }

    fn set_fill_colour(&mut self, colour: Colour) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.calls.push(DrawCall::FillColour(colour));
        Ok(())
    }

    fn select_font(&mut self, font: ResourceHandle) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.require_live(font, ResourceKind::Font)?;
        self.font = Some(font);
        self.calls.push(DrawCall::SelectFont(font));
        Ok(())
    }

    fn select_pen(&mut self, pen: ResourceHandle) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.require_live(pen, ResourceKind::Pen)?;
        self.calls.push(DrawCall::SelectPen(pen));
        Ok(())
    }

    fn select_brush(&mut self, brush: ResourceHandle) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.require_live(brush, ResourceKind::Brush)?;
        self.calls.push(DrawCall::SelectBrush(brush));
        Ok(())
    }

    fn draw_text(&mut self, text: TextBox<'_>) -> Result<(), SurfaceError> {
        self.require_page()?;
        if self.font.is_none() {
            return Err(SurfaceError::NothingSelected(ResourceKind::Font));
        }
        self.calls.push(DrawCall::Text {
            x: text.x,
            y: text.y,
            width: text.width,
            height: text.height,
            text: text.text.to_string(),
            align: text.align,
            wrap: text.wrap,
        });
        Ok(())
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.calls.push(DrawCall::Line { x1, y1, x2, y2 });
        Ok(())
    }

    fn draw_rect(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> Result<(), SurfaceError> {
        self.require_page()?;
        self.calls.push(DrawCall::Rect {
            left,
            top,
            right,
            bottom,
        });
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
        self.require_page()?;
        self.calls.push(DrawCall::Image {
            left,
            top,
            width,
            height,
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn measure_text_height(&mut self, font: ResourceHandle) -> Result<i32, SurfaceError> {
        match self.live.get(&font.id) {
            Some(StyleSpec::Font(spec)) => Ok(spec.size),
            _ => Err(SurfaceError::UnknownHandle(font)),
        }
    }
}
