//! Lengths, points and rectangles
//!
//! Window geometry is stored as [`Length`] values: either absolute pixels or a
//! pre-formatted length expression such as `calc(50% - 100px)` that passes
//! through untouched until the engine needs a pixel value. Expressions are
//! resolved against the viewport dimension of their axis.

mod calc;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{JendelaError, Result};

/// A point in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Resolved window rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left && point.y >= self.top && point.x < self.right() && point.y < self.bottom()
    }
}

/// A CSS-style length: absolute pixels or an expression passed through as-is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Length {
    /// Absolute pixels, formatted as `<n>px`
    Px(f64),
    /// Pre-formatted length expression (`50%`, `calc(50% - 100px)`, `120px`)
    Expr(String),
}

impl Length {
    /// Resolve to pixels. `basis` is the viewport extent along this axis and
    /// is what percentages refer to; `vw`/`vh` use `viewport`.
    pub fn resolve(&self, basis: f64, viewport: Size) -> Result<f64> {
        match self {
            Length::Px(px) => Ok(*px),
            Length::Expr(expr) => calc::evaluate(expr, basis, viewport),
        }
    }

    /// Offset that centers a box of this extent: `calc(50% - <extent / 2>)`.
    pub fn centering_offset(&self) -> Length {
        match self {
            Length::Px(px) => Length::Expr(format!("calc(50% - {}px)", format_px(px / 2.0))),
            Length::Expr(expr) => Length::Expr(format!("calc(50% - ({}) / 2)", expr)),
        }
    }

    /// Check that an expression can be evaluated at all.
    pub fn validate(&self) -> Result<()> {
        self.resolve(0.0, Size::default()).map(|_| ())
    }
}

impl Default for Length {
    fn default() -> Self {
        Length::Px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(px) => write!(f, "{}px", format_px(*px)),
            Length::Expr(expr) => f.write_str(expr),
        }
    }
}

impl From<u32> for Length {
    fn from(px: u32) -> Self {
        Length::Px(px as f64)
    }
}

impl From<i32> for Length {
    fn from(px: i32) -> Self {
        Length::Px(px as f64)
    }
}

impl From<f64> for Length {
    fn from(px: f64) -> Self {
        Length::Px(px)
    }
}

impl From<&str> for Length {
    fn from(expr: &str) -> Self {
        Length::Expr(expr.to_string())
    }
}

impl From<String> for Length {
    fn from(expr: String) -> Self {
        Length::Expr(expr)
    }
}

/// Format a pixel value without a trailing `.0` and without negative zero.
pub fn format_px(px: f64) -> String {
    let px = if px == 0.0 { 0.0 } else { px };
    format!("{}", px)
}

pub(crate) fn invalid_length(expr: &str) -> JendelaError {
    JendelaError::InvalidLength(expr.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_formatting() {
        assert_eq!(Length::Px(120.0).to_string(), "120px");
        assert_eq!(Length::Px(12.5).to_string(), "12.5px");
        assert_eq!(Length::Px(-0.0).to_string(), "0px");
        assert_eq!(Length::from("calc(50% - 100px)").to_string(), "calc(50% - 100px)");
    }

    #[test]
    fn test_centering_offset_of_pixels() {
        let offset = Length::Px(200.0).centering_offset();
        assert_eq!(offset.to_string(), "calc(50% - 100px)");
        assert_eq!(offset.resolve(1000.0, Size::default()).unwrap(), 400.0);
    }

    #[test]
    fn test_centering_offset_of_expression() {
        let offset = Length::from("50%").centering_offset();
        assert_eq!(offset.resolve(800.0, Size::default()).unwrap(), 200.0);
    }

    #[test]
    fn test_untagged_deserialization() {
        #[derive(Deserialize)]
        struct Holder {
            a: Length,
            b: Length,
        }
        let holder: Holder = toml::from_str("a = 300.0\nb = \"40%\"").unwrap();
        assert_eq!(holder.a, Length::Px(300.0));
        assert_eq!(holder.b, Length::Expr("40%".into()));
    }

    #[test]
    fn test_validate_flags_unresolvable_expressions() {
        assert!(Length::Px(10.0).validate().is_ok());
        assert!(Length::from("calc(50% - 25vw)").validate().is_ok());
        assert!(Length::from("auto").validate().is_err());
        assert!(Length::from("10em").validate().is_err());
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(rect.contains(Point::new(109.9, 59.9)));
        assert!(!rect.contains(Point::new(110.0, 30.0)));
        assert!(!rect.contains(Point::new(50.0, 60.0)));
    }
}
