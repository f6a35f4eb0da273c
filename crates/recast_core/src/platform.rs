//! Target platforms.

use serde::{Deserialize, Serialize};

/// Platforms the pipeline rewrites content for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    /// Short-form visual platform
    Instagram,
    /// Short-form video platform
    #[strum(serialize = "tiktok")]
    TikTok,
    /// Professional networking platform
    #[strum(serialize = "linkedin")]
    LinkedIn,
}

impl Platform {
    /// Key used for this platform in run results.
    ///
    /// ```
    /// use recast_core::Platform;
    ///
    /// assert_eq!(Platform::TikTok.output_key(), "tiktok_content");
    /// ```
    pub fn output_key(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram_content",
            Platform::TikTok => "tiktok_content",
            Platform::LinkedIn => "linkedin_content",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::TikTok => "Tiktok",
            Platform::LinkedIn => "LinkedIn",
        }
    }
}
