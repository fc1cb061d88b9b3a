use super::{BoxLayout, LayoutParseError, PointLayout};
use crate::pagesize::PageSpec;

/// A resolved (x, y) position, measured from the top-left corner of the page
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    pub fn parse(text: &str, page: &PageSpec) -> Result<Point, LayoutParseError> {
        let layout = PointLayout::parse(text)?;
        layout.check(page)?;
        let [x, y] = layout.resolve(page);
        Ok(Point { x, y })
    }
}

/// A resolved box, measured from the top-left corner of the page with `top <
/// bottom` for a box of positive height
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub fn ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Bounds {
        Bounds {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn parse(text: &str, page: &PageSpec) -> Result<Bounds, LayoutParseError> {
        let layout = BoxLayout::parse(text)?;
        layout.check(page)?;
        let [left, top, right, bottom] = layout.resolve(page);
        Ok(Bounds::ltrb(left, top, right, bottom))
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}
