//! Title bar and its buttons

use serde::{Deserialize, Serialize};

/// Header button, in the order they are laid out left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Minimize,
    /// Maximize / restore toggle
    Resize,
    Close,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 3] = [ButtonKind::Minimize, ButtonKind::Resize, ButtonKind::Close];

    pub fn class_name(&self) -> &'static str {
        match self {
            ButtonKind::Minimize => "headerButton headerButtonMinimize",
            ButtonKind::Resize => "headerButton headerButtonResize",
            ButtonKind::Close => "headerButton headerButtonClose",
        }
    }
}

/// Which header buttons a window is created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonFlags {
    pub minimize: bool,
    pub resize: bool,
    pub close: bool,
}

impl Default for ButtonFlags {
    fn default() -> Self {
        Self {
            minimize: true,
            resize: true,
            close: true,
        }
    }
}

impl ButtonFlags {
    pub fn enabled(&self, kind: ButtonKind) -> bool {
        match kind {
            ButtonKind::Minimize => self.minimize,
            ButtonKind::Resize => self.resize,
            ButtonKind::Close => self.close,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderButton {
    pub kind: ButtonKind,
    /// Release listener still attached
    bound: bool,
}

/// Window title bar: the move handle and the home of the header buttons
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub title: String,
    buttons: Vec<HeaderButton>,
}

impl Header {
    pub fn new(title: impl Into<String>, flags: ButtonFlags) -> Self {
        let buttons = ButtonKind::ALL
            .into_iter()
            .filter(|kind| flags.enabled(*kind))
            .map(|kind| HeaderButton { kind, bound: true })
            .collect();

        Self {
            title: title.into(),
            buttons,
        }
    }

    /// Buttons present in the header, left to right
    pub fn buttons(&self) -> &[HeaderButton] {
        &self.buttons
    }

    pub fn has_button(&self, kind: ButtonKind) -> bool {
        self.buttons.iter().any(|b| b.kind == kind)
    }

    /// Whether a release on `kind` should still fire its action
    pub fn is_bound(&self, kind: ButtonKind) -> bool {
        self.buttons.iter().any(|b| b.kind == kind && b.bound)
    }

    /// Detach every release listener that is still attached. Returns how many
    /// were detached, so a second call reports zero.
    pub fn detach_listeners(&mut self) -> usize {
        let mut detached = 0;
        for button in self.buttons.iter_mut().filter(|b| b.bound) {
            button.bound = false;
            detached += 1;
        }
        detached
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_respects_flags() {
        let header = Header::new(
            "Notes",
            ButtonFlags {
                minimize: false,
                resize: true,
                close: true,
            },
        );
        assert!(!header.has_button(ButtonKind::Minimize));
        assert!(header.has_button(ButtonKind::Resize));
        let kinds: Vec<_> = header.buttons().iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![ButtonKind::Resize, ButtonKind::Close]);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut header = Header::new("x", ButtonFlags::default());
        assert!(header.is_bound(ButtonKind::Close));
        assert_eq!(header.detach_listeners(), 3);
        assert_eq!(header.detach_listeners(), 0);
        assert!(!header.is_bound(ButtonKind::Close));
        assert!(header.has_button(ButtonKind::Close));
    }
}
