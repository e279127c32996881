// SPDX-License-Identifier: MPL-2.0
//! Visual filter presets.
//!
//! A filter is a preview-only render transform: it never touches the media
//! bytes nor any post content. The transform is expressed as a CSS filter
//! function list, the format the presentation layer applies.

use crate::domain::error::PlaybackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color filter applied to the rendered video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VisualFilter {
    #[default]
    None,
    Sepia,
    Grayscale,
    Invert,
    Warm,
    Cool,
}

impl VisualFilter {
    /// All filters in menu order.
    pub const ALL: [VisualFilter; 6] = [
        VisualFilter::None,
        VisualFilter::Sepia,
        VisualFilter::Grayscale,
        VisualFilter::Invert,
        VisualFilter::Warm,
        VisualFilter::Cool,
    ];

    /// Stable identifier, as used in settings and commands.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sepia => "sepia",
            Self::Grayscale => "grayscale",
            Self::Invert => "invert",
            Self::Warm => "warm",
            Self::Cool => "cool",
        }
    }

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Sepia => "Sepia",
            Self::Grayscale => "B&W",
            Self::Invert => "Invert",
            Self::Warm => "Warm",
            Self::Cool => "Cool",
        }
    }

    /// CSS filter expression; empty for [`VisualFilter::None`].
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Sepia => "sepia(0.8)",
            Self::Grayscale => "grayscale(1)",
            Self::Invert => "invert(1)",
            Self::Warm => "sepia(0.3) saturate(1.5) hue-rotate(-10deg)",
            Self::Cool => "saturate(1.2) hue-rotate(180deg) brightness(1.1)",
        }
    }

    /// Returns true if a transform is applied.
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for VisualFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VisualFilter {
    type Err = PlaybackError;

    /// Accepts the identifier or the menu label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| {
                filter.id().eq_ignore_ascii_case(wanted) || filter.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| PlaybackError::UnknownFilter(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_has_no_transform() {
        assert_eq!(VisualFilter::default(), VisualFilter::None);
        assert_eq!(VisualFilter::None.css(), "");
        assert!(!VisualFilter::None.is_active());
    }

    #[test]
    fn every_other_filter_has_a_transform() {
        for filter in VisualFilter::ALL.into_iter().filter(|f| f.is_active()) {
            assert!(!filter.css().is_empty(), "{} has no css", filter);
        }
    }

    #[test]
    fn parses_ids_and_labels() {
        assert_eq!("grayscale".parse::<VisualFilter>(), Ok(VisualFilter::Grayscale));
        assert_eq!("B&W".parse::<VisualFilter>(), Ok(VisualFilter::Grayscale));
        assert_eq!(" Warm ".parse::<VisualFilter>(), Ok(VisualFilter::Warm));
        assert_eq!(
            "vhs".parse::<VisualFilter>(),
            Err(PlaybackError::UnknownFilter("vhs".to_string()))
        );
    }

    #[test]
    fn ids_round_trip_through_from_str() {
        for filter in VisualFilter::ALL {
            assert_eq!(filter.id().parse::<VisualFilter>(), Ok(filter));
        }
    }
}
