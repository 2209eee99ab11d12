//! Shared campaign vocabulary: ad platforms, objectives, audiences and
//! the fixed set of run durations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CreatorError;

/// Social platform an ad campaign can run on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
    Youtube,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Instagram,
        Platform::Tiktok,
        Platform::Facebook,
        Platform::Youtube,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CreatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CreatorError::Validation(format!("unknown platform '{s}'")))
    }
}

/// What the paid campaign optimizes for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    #[default]
    Awareness,
    Traffic,
    Engagement,
    Conversions,
}

/// Who the ads are shown to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Broad,
    Lookalike,
    Interests,
    Retargeting,
}

/// Campaign run length. Only the enumerated day counts are accepted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum CampaignDuration {
    ThreeDays,
    #[default]
    OneWeek,
    TwoWeeks,
    ThirtyDays,
    SixtyDays,
}

impl CampaignDuration {
    pub const ALL: [CampaignDuration; 5] = [
        CampaignDuration::ThreeDays,
        CampaignDuration::OneWeek,
        CampaignDuration::TwoWeeks,
        CampaignDuration::ThirtyDays,
        CampaignDuration::SixtyDays,
    ];

    pub fn days(&self) -> u32 {
        match self {
            CampaignDuration::ThreeDays => 3,
            CampaignDuration::OneWeek => 7,
            CampaignDuration::TwoWeeks => 14,
            CampaignDuration::ThirtyDays => 30,
            CampaignDuration::SixtyDays => 60,
        }
    }
}

impl TryFrom<u32> for CampaignDuration {
    type Error = CreatorError;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        CampaignDuration::ALL
            .into_iter()
            .find(|d| d.days() == days)
            .ok_or_else(|| {
                CreatorError::Validation(format!(
                    "duration must be one of 3, 7, 14, 30 or 60 days, got {days}"
                ))
            })
    }
}

impl From<CampaignDuration> for u32 {
    fn from(duration: CampaignDuration) -> Self {
        duration.days()
    }
}
