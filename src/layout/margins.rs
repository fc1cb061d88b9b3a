use super::{BoxLayout, LayoutParseError};
use crate::pagesize::PageSpec;

/// Margins, in native units, measured inwards from the page edges. The calendar
/// grid fills whatever area the margins leave free.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    /// Create margins in the same order as a layout box: left, top, right, bottom
    pub fn ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Margins {
        Margins {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create margins where all values are equal
    pub fn all(value: i32) -> Margins {
        Margins::ltrb(value, value, value, value)
    }

    /// Resolve a `left, top, right, bottom` layout tuple against the page
    pub fn from_layout(layout: &BoxLayout, page: &PageSpec) -> Margins {
        let [left, top, right, bottom] = layout.resolve(page);
        Margins::ltrb(left, top, right, bottom)
    }

    /// Parse and resolve in one step
    pub fn parse(text: &str, page: &PageSpec) -> Result<Margins, LayoutParseError> {
        let layout = BoxLayout::parse(text)?;
        layout.check(page)?;
        Ok(Margins::from_layout(&layout, page))
    }

    /// Width left over between the left and right margins
    pub fn inner_width(&self, page: &PageSpec) -> i32 {
        page.width - self.left - self.right
    }

    /// Height left over between the top and bottom margins
    pub fn inner_height(&self, page: &PageSpec) -> i32 {
        page.height - self.top - self.bottom
    }
}
