//! Skin tags
//!
//! The interaction core never looks inside a theme; it only carries the skin
//! class through to the visual layer. Unknown tags pass through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Theme {
    #[default]
    Classic,
    Legacy,
    /// GNOME libadwaita look
    Libadwaita,
    Xp,
    Win7,
    Win8,
    Win10,
    Win11,
    /// Any other skin class, carried verbatim
    Custom(String),
}

impl Theme {
    /// The eight built-in skins
    pub const NAMED: [Theme; 8] = [
        Theme::Classic,
        Theme::Legacy,
        Theme::Libadwaita,
        Theme::Xp,
        Theme::Win7,
        Theme::Win8,
        Theme::Win10,
        Theme::Win11,
    ];

    /// Symbolic name (`classic`, `win10`, ...)
    pub fn name(&self) -> &str {
        match self {
            Theme::Classic => "classic",
            Theme::Legacy => "legacy",
            Theme::Libadwaita => "libadwaita",
            Theme::Xp => "xp",
            Theme::Win7 => "win7",
            Theme::Win8 => "win8",
            Theme::Win10 => "win10",
            Theme::Win11 => "win11",
            Theme::Custom(tag) => tag,
        }
    }

    /// Class applied to the window root
    pub fn skin_class(&self) -> &str {
        match self {
            Theme::Classic => "jendela-classic",
            Theme::Legacy => "jendela-legacy",
            Theme::Libadwaita => "jendela-libadwaita",
            Theme::Xp => "jendela-xp",
            Theme::Win7 => "jendela-7",
            Theme::Win8 => "jendela-8",
            Theme::Win10 => "jendela-10",
            Theme::Win11 => "jendela-11",
            Theme::Custom(tag) => tag,
        }
    }

    /// Accepts either a symbolic name or a skin class.
    pub fn parse(tag: &str) -> Theme {
        let tag = tag.trim();
        Self::NAMED
            .into_iter()
            .find(|theme| theme.name() == tag || theme.skin_class() == tag)
            .unwrap_or_else(|| Theme::Custom(tag.to_string()))
    }
}

impl From<String> for Theme {
    fn from(tag: String) -> Self {
        Theme::parse(&tag)
    }
}

impl From<&str> for Theme {
    fn from(tag: &str) -> Self {
        Theme::parse(tag)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.name().to_string()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.skin_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_skin_classes() {
        assert_eq!(Theme::Classic.skin_class(), "jendela-classic");
        assert_eq!(Theme::Win7.skin_class(), "jendela-7");
        assert_eq!(Theme::Win11.skin_class(), "jendela-11");
        assert_eq!(Theme::default(), Theme::Classic);
    }

    #[test]
    fn test_parse_accepts_name_and_class() {
        assert_eq!(Theme::parse("xp"), Theme::Xp);
        assert_eq!(Theme::parse("jendela-xp"), Theme::Xp);
        assert_eq!(Theme::parse("jendela-10"), Theme::Win10);
        assert_eq!(Theme::parse("libadwaita"), Theme::Libadwaita);
    }

    #[test]
    fn test_unknown_tags_pass_through() {
        let theme = Theme::parse("my-skin");
        assert_eq!(theme, Theme::Custom("my-skin".into()));
        assert_eq!(theme.skin_class(), "my-skin");
    }

    #[test]
    fn test_serde_uses_symbolic_name() {
        let json = serde_json::to_string(&Theme::Win8).unwrap();
        assert_eq!(json, "\"win8\"");
        let back: Theme = serde_json::from_str("\"jendela-legacy\"").unwrap();
        assert_eq!(back, Theme::Legacy);
    }
}
