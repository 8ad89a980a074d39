use crate::loader::parse_profile;
use crate::style::{Accent, FontFamily, Layout, Style, Theme};
use crate::types::{CvError, Profile};
use std::fmt;
use std::str::FromStr;

/// Template variants, one per major track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    Advertising,
    Journalism,
    Broadcasting,
    #[default]
    NewMedia,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Advertising,
        Variant::Journalism,
        Variant::Broadcasting,
        Variant::NewMedia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Advertising => "advertising",
            Variant::Journalism => "journalism",
            Variant::Broadcasting => "broadcasting",
            Variant::NewMedia => "new_media",
        }
    }

    /// Display name of the major.
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Advertising => "广告学",
            Variant::Journalism => "新闻学",
            Variant::Broadcasting => "广播电视学",
            Variant::NewMedia => "网络与新媒体",
        }
    }

    pub fn preset(&self) -> Style {
        let (layout, theme, font) = match self {
            Variant::Advertising => (Layout::Agency, Theme::Rose, FontFamily::Sans),
            Variant::Journalism => (Layout::Classic, Theme::Academic, FontFamily::Serif),
            Variant::Broadcasting => (Layout::Visual, Theme::Violet, FontFamily::Sans),
            Variant::NewMedia => (Layout::Modern, Theme::Teal, FontFamily::Sans),
        };
        Style {
            layout,
            accent: Accent::Theme(theme),
            font,
        }
    }

    /// The variant whose preset uses `layout`.
    pub fn for_layout(layout: Layout) -> Variant {
        match layout {
            Layout::Agency => Variant::Advertising,
            Layout::Classic => Variant::Journalism,
            Layout::Visual => Variant::Broadcasting,
            Layout::Modern => Variant::NewMedia,
        }
    }

    /// Picks the variant from `meta.layout`, defaulting to `new_media`.
    pub fn infer(profile: &Profile) -> Variant {
        profile
            .meta
            .layout
            .as_deref()
            .and_then(|layout| layout.parse::<Layout>().ok())
            .map(Variant::for_layout)
            .unwrap_or_default()
    }

    pub fn sample_json(&self) -> &'static str {
        match self {
            Variant::Advertising => include_str!("../samples/advertising.json"),
            Variant::Journalism => include_str!("../samples/journalism.json"),
            Variant::Broadcasting => include_str!("../samples/broadcasting.json"),
            Variant::NewMedia => include_str!("../samples/new_media.json"),
        }
    }

    pub fn sample_profile(&self) -> Result<Profile, CvError> {
        parse_profile(self.sample_json())
    }
}

impl FromStr for Variant {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "advertising" => Ok(Variant::Advertising),
            "journalism" => Ok(Variant::Journalism),
            "broadcasting" => Ok(Variant::Broadcasting),
            "new_media" | "new-media" | "newmedia" => Ok(Variant::NewMedia),
            _ => Err(CvError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
