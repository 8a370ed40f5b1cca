//! Image size variants and the URL locators the server hands out for them.
//!
//! Size names double as on-disk file stems (`<size>.png`) and as ledger keys
//! in `versionInfo.data`, so their serialized names are part of the cache
//! format.

use serde::{Deserialize, Serialize};

/// Size variants the server renders for a mod logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogoSize {
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "thumb_320x180")]
    Thumb320x180,
    #[serde(rename = "thumb_640x360")]
    Thumb640x360,
    #[serde(rename = "thumb_1280x720")]
    Thumb1280x720,
}

impl LogoSize {
    pub const ALL: [LogoSize; 4] = [
        LogoSize::Original,
        LogoSize::Thumb320x180,
        LogoSize::Thumb640x360,
        LogoSize::Thumb1280x720,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogoSize::Original => "original",
            LogoSize::Thumb320x180 => "thumb_320x180",
            LogoSize::Thumb640x360 => "thumb_640x360",
            LogoSize::Thumb1280x720 => "thumb_1280x720",
        }
    }
}

/// Size variants for user avatars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AvatarSize {
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "thumb_50x50")]
    Thumb50x50,
    #[serde(rename = "thumb_100x100")]
    Thumb100x100,
}

impl AvatarSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvatarSize::Original => "original",
            AvatarSize::Thumb50x50 => "thumb_50x50",
            AvatarSize::Thumb100x100 => "thumb_100x100",
        }
    }
}

/// Size variants for gallery images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GalleryImageSize {
    #[serde(rename = "original")]
    Original,
    #[serde(rename = "thumb_320x180")]
    Thumb320x180,
}

impl GalleryImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryImageSize::Original => "original",
            GalleryImageSize::Thumb320x180 => "thumb_320x180",
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_as_str!(LogoSize, AvatarSize, GalleryImageSize);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoLocator {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub thumb_320x180: String,
    #[serde(default)]
    pub thumb_640x360: String,
    #[serde(default)]
    pub thumb_1280x720: String,
}

impl LogoLocator {
    pub fn url(&self, size: LogoSize) -> &str {
        match size {
            LogoSize::Original => &self.original,
            LogoSize::Thumb320x180 => &self.thumb_320x180,
            LogoSize::Thumb640x360 => &self.thumb_640x360,
            LogoSize::Thumb1280x720 => &self.thumb_1280x720,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarLocator {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub thumb_50x50: String,
    #[serde(default)]
    pub thumb_100x100: String,
}

impl AvatarLocator {
    pub fn url(&self, size: AvatarSize) -> &str {
        match size {
            AvatarSize::Original => &self.original,
            AvatarSize::Thumb50x50 => &self.thumb_50x50,
            AvatarSize::Thumb100x100 => &self.thumb_100x100,
        }
    }
}

/// A gallery image. Identity for diffing is `filename`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLocator {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub original: String,
    #[serde(default)]
    pub thumb_320x180: String,
}

/// Media attached to a mod profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModMedia {
    #[serde(default)]
    pub youtube: Vec<String>,
    #[serde(default)]
    pub sketchfab: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageLocator>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_names_match_serde_names() {
        for size in LogoSize::ALL {
            let json = serde_json::to_string(&size).unwrap();
            assert_eq!(json, format!("\"{}\"", size.as_str()));
        }
        assert_eq!(
            serde_json::to_string(&AvatarSize::Thumb100x100).unwrap(),
            "\"thumb_100x100\""
        );
    }

    #[test]
    fn test_media_deserializes_with_missing_fields() {
        let media: ModMedia = serde_json::from_str(r#"{"youtube":["a"]}"#).unwrap();
        assert_eq!(media.youtube, vec!["a".to_string()]);
        assert!(media.sketchfab.is_empty());
        assert!(media.images.is_empty());
    }

    #[test]
    fn test_logo_locator_url_by_size() {
        let logo = LogoLocator {
            filename: "logo.png".to_string(),
            original: "https://cdn/o.png".to_string(),
            thumb_320x180: "https://cdn/s.png".to_string(),
            ..Default::default()
        };
        assert_eq!(logo.url(LogoSize::Original), "https://cdn/o.png");
        assert_eq!(logo.url(LogoSize::Thumb320x180), "https://cdn/s.png");
        assert_eq!(logo.url(LogoSize::Thumb1280x720), "");
    }
}
