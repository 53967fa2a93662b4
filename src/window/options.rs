//! Creation options for new windows

use serde::{Deserialize, Serialize};

use super::ButtonFlags;
use crate::config::WindowConfig;
use crate::geometry::{Length, Size};
use crate::theme::Theme;

/// Options accepted by [`Desktop::create_window`](crate::Desktop::create_window).
///
/// Every field is optional; unset fields fall back to the `[window]` section
/// of the configuration. Width and height default to the minimums, left and
/// top default to centering the window on its own size.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    pub title: String,
    /// Raw markup for the window body
    pub body: String,
    pub theme: Option<Theme>,
    pub minimize_button: Option<bool>,
    pub resize_button: Option<bool>,
    pub close_button: Option<bool>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub left: Option<Length>,
    pub top: Option<Length>,
}

/// Fully defaulted options
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    pub body: String,
    pub theme: Theme,
    pub buttons: ButtonFlags,
    pub min_size: Size,
    pub width: Length,
    pub height: Length,
    pub left: Length,
    pub top: Length,
}

impl WindowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn theme(mut self, theme: impl Into<Theme>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn buttons(mut self, minimize: bool, resize: bool, close: bool) -> Self {
        self.minimize_button = Some(minimize);
        self.resize_button = Some(resize);
        self.close_button = Some(close);
        self
    }

    pub fn min_size(mut self, width: f64, height: f64) -> Self {
        self.min_width = Some(width);
        self.min_height = Some(height);
        self
    }

    pub fn size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    pub fn position(mut self, left: impl Into<Length>, top: impl Into<Length>) -> Self {
        self.left = Some(left.into());
        self.top = Some(top.into());
        self
    }

    /// Fill every unset option from `defaults`.
    pub fn resolve(self, defaults: &WindowConfig) -> WindowSpec {
        let min_size = Size::new(
            self.min_width.unwrap_or(defaults.min_width),
            self.min_height.unwrap_or(defaults.min_height),
        );
        let width = self.width.unwrap_or(Length::Px(min_size.width));
        let height = self.height.unwrap_or(Length::Px(min_size.height));
        let left = self.left.unwrap_or_else(|| width.centering_offset());
        let top = self.top.unwrap_or_else(|| height.centering_offset());

        WindowSpec {
            title: self.title,
            body: self.body,
            theme: self.theme.unwrap_or_else(|| defaults.theme.clone()),
            buttons: ButtonFlags {
                minimize: self.minimize_button.unwrap_or(defaults.buttons.minimize),
                resize: self.resize_button.unwrap_or(defaults.buttons.resize),
                close: self.close_button.unwrap_or(defaults.buttons.close),
            },
            min_size,
            width,
            height,
            left,
            top,
        }
    }
}
