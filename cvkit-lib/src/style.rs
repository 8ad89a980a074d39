use crate::types::Meta;
use crate::variant::Variant;
use std::fmt;
use std::str::FromStr;

/// HTML skeleton families. Each places the same regions differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Modern,  // accent header band, single column
    Classic, // centered serif masthead, ruled sections
    Agency,  // accent sidebar with contact, skills and awards
    Visual,  // hero header, portfolio first
}

impl Layout {
    pub const ALL: [Layout; 4] = [Layout::Modern, Layout::Classic, Layout::Agency, Layout::Visual];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layout::Modern => "modern",
            Layout::Classic => "classic",
            Layout::Agency => "agency",
            Layout::Visual => "visual",
        }
    }
}

impl FromStr for Layout {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Layout::Modern),
            "classic" => Ok(Layout::Classic),
            "agency" => Ok(Layout::Agency),
            "visual" => Ok(Layout::Visual),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named color themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Rose,
    Teal,
    Indigo,
    Violet,
    Academic,
    Luxury,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Rose,
        Theme::Teal,
        Theme::Indigo,
        Theme::Violet,
        Theme::Academic,
        Theme::Luxury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Rose => "rose",
            Theme::Teal => "teal",
            Theme::Indigo => "indigo",
            Theme::Violet => "violet",
            Theme::Academic => "academic",
            Theme::Luxury => "luxury",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Theme::Rose => "#e11d48",
            Theme::Teal => "#0d9488",
            Theme::Indigo => "#4f46e5",
            Theme::Violet => "#7c3aed",
            Theme::Academic => "#1e3a5f",
            Theme::Luxury => "#a16207",
        }
    }

    pub fn tint(&self) -> &'static str {
        match self {
            Theme::Rose => "#fff1f2",
            Theme::Teal => "#f0fdfa",
            Theme::Indigo => "#eef2ff",
            Theme::Violet => "#f5f3ff",
            Theme::Academic => "#f1f5f9",
            Theme::Luxury => "#fefce8",
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rose" => Ok(Theme::Rose),
            "teal" => Ok(Theme::Teal),
            "indigo" => Ok(Theme::Indigo),
            "violet" => Ok(Theme::Violet),
            "academic" => Ok(Theme::Academic),
            "luxury" => Ok(Theme::Luxury),
            _ => Err(()),
        }
    }
}

/// Accent color: a named theme, or a raw CSS hex color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accent {
    Theme(Theme),
    Hex(String),
}

const NEUTRAL_TINT: &str = "#f8fafc";

impl Accent {
    pub fn color(&self) -> &str {
        match self {
            Accent::Theme(theme) => theme.color(),
            Accent::Hex(hex) => hex,
        }
    }

    pub fn tint(&self) -> &str {
        match self {
            Accent::Theme(theme) => theme.tint(),
            Accent::Hex(_) => NEUTRAL_TINT,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Accent::Theme(theme) => theme.as_str(),
            Accent::Hex(_) => "custom",
        }
    }
}

impl FromStr for Accent {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(theme) = s.parse::<Theme>() {
            return Ok(Accent::Theme(theme));
        }

        let s = s.trim();
        let digits = s.strip_prefix('#').ok_or(())?;
        if matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Accent::Hex(s.to_ascii_lowercase()))
        } else {
            Err(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Sans,
    Serif,
}

impl FontFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontFamily::Sans => "sans",
            FontFamily::Serif => "serif",
        }
    }

    /// CSS font stack with CJK faces first.
    pub fn stack(&self) -> &'static str {
        match self {
            FontFamily::Sans => {
                "\"PingFang SC\", \"Hiragino Sans GB\", \"Microsoft YaHei\", \"Noto Sans CJK SC\", \"Helvetica Neue\", Arial, sans-serif"
            }
            FontFamily::Serif => {
                "\"Songti SC\", \"STSong\", \"SimSun\", \"Noto Serif CJK SC\", Georgia, \"Times New Roman\", serif"
            }
        }
    }
}

impl FromStr for FontFamily {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sans" | "sans-serif" => Ok(FontFamily::Sans),
            "serif" => Ok(FontFamily::Serif),
            _ => Err(()),
        }
    }
}

/// Fully resolved presentation for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub layout: Layout,
    pub accent: Accent,
    pub font: FontFamily,
}

impl Style {
    /// Starts from the variant preset and applies each recognized hint in
    /// `meta`. Unrecognized hints are logged and ignored.
    pub fn resolve(variant: Variant, meta: &Meta) -> Style {
        let mut style = variant.preset();

        if let Some(raw) = non_blank(&meta.layout) {
            match raw.parse() {
                Ok(layout) => style.layout = layout,
                Err(()) => tracing::warn!(layout = raw, "unknown layout hint, keeping preset"),
            }
        }
        if let Some(raw) = non_blank(&meta.theme_color) {
            match raw.parse() {
                Ok(accent) => style.accent = accent,
                Err(()) => tracing::warn!(theme_color = raw, "unknown theme color, keeping preset"),
            }
        }
        if let Some(raw) = non_blank(&meta.font_family) {
            match raw.parse() {
                Ok(font) => style.font = font,
                Err(()) => tracing::warn!(font_family = raw, "unknown font family, keeping preset"),
            }
        }

        style
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accent_parsing() {
        assert_eq!("Rose".parse::<Accent>(), Ok(Accent::Theme(Theme::Rose)));
        assert_eq!("#2563EB".parse::<Accent>(), Ok(Accent::Hex("#2563eb".to_string())));
        assert_eq!("#abc".parse::<Accent>(), Ok(Accent::Hex("#abc".to_string())));
        assert!("#zzzzzz".parse::<Accent>().is_err());
        assert!("red; background: url(x)".parse::<Accent>().is_err());
        assert!("".parse::<Accent>().is_err());
    }

    #[test]
    fn test_resolve_uses_preset_without_meta() {
        let style = Style::resolve(Variant::Advertising, &Meta::default());
        assert_eq!(style, Variant::Advertising.preset());
        assert_eq!(style.accent, Accent::Theme(Theme::Rose));
    }

    #[test]
    fn test_resolve_applies_recognized_hints() {
        let meta = Meta {
            theme_color: Some("teal".to_string()),
            font_family: Some("serif".to_string()),
            layout: Some("visual".to_string()),
        };
        let style = Style::resolve(Variant::Advertising, &meta);
        assert_eq!(style.layout, Layout::Visual);
        assert_eq!(style.accent, Accent::Theme(Theme::Teal));
        assert_eq!(style.font, FontFamily::Serif);
    }

    #[test]
    fn test_resolve_ignores_unknown_hints() {
        let meta = Meta {
            theme_color: Some("chartreuse".to_string()),
            font_family: Some("comic".to_string()),
            layout: Some("  ".to_string()),
        };
        let style = Style::resolve(Variant::Journalism, &meta);
        assert_eq!(style, Variant::Journalism.preset());
    }
}
