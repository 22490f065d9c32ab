//! Core types for weather feed records.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Description stored when the feed carries no weather condition text.
pub const UNSPECIFIED_DESCRIPTION: &str = "未提供";

/// Geographic grouping derived from a location name.
///
/// Regions are never taken from the feed itself; they are assigned by the
/// region classifier in `twwx-core` and persisted by their [`label`](Region::label).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    North,
    Central,
    South,
    East,
    Islands,
    Other,
}

impl Region {
    /// Every region, in display order.
    pub const ALL: [Region; 6] = [
        Region::North,
        Region::Central,
        Region::South,
        Region::East,
        Region::Islands,
        Region::Other,
    ];

    /// Stable English label, used as the persisted form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::Central => "Central",
            Region::South => "South",
            Region::East => "East",
            Region::Islands => "Islands",
            Region::Other => "Other",
        }
    }

    /// Name of the region as used by the feed's audience.
    #[must_use]
    pub fn local_name(&self) -> &'static str {
        match self {
            Region::North => "北部",
            Region::Central => "中部",
            Region::South => "南部",
            Region::East => "東部",
            Region::Islands => "離島",
            Region::Other => "其他",
        }
    }

    /// Parse a persisted label leniently, mapping unknown text to [`Region::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use twwx_types::Region;
    ///
    /// assert_eq!(Region::from_stored("East"), Region::East);
    /// assert_eq!(Region::from_stored("東部"), Region::East);
    /// assert_eq!(Region::from_stored("Atlantis"), Region::Other);
    /// ```
    #[must_use]
    pub fn from_stored(s: &str) -> Self {
        s.parse().unwrap_or(Region::Other)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = TypeError;

    /// Accepts either the English label (case-insensitive) or the local name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(trimmed) || r.local_name() == trimmed)
            .ok_or_else(|| TypeError::UnknownRegion(s.to_string()))
    }
}

/// One normalized observation for a location, as produced by the feed parser.
///
/// Store-assigned fields (`id`, `created_at`) live on the stored form in
/// `twwx-store`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeatherRecord {
    /// Free-text place name, exactly as the feed spelled it.
    pub location: String,
    /// Region derived from the location name.
    pub region: Region,
    /// Minimum temperature in Celsius.
    pub min_temp: Option<f64>,
    /// Maximum temperature in Celsius.
    pub max_temp: Option<f64>,
    /// Current temperature in Celsius.
    pub current_temp: Option<f64>,
    /// Weather condition text, or [`UNSPECIFIED_DESCRIPTION`].
    pub description: String,
    /// ISO-8601 forecast start time from the feed, or the capture time.
    pub forecast_time: String,
}

impl WeatherRecord {
    /// Create a record with no readings and the unspecified description.
    pub fn new(location: impl Into<String>, region: Region, forecast_time: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            region,
            min_temp: None,
            max_temp: None,
            current_temp: None,
            description: UNSPECIFIED_DESCRIPTION.to_string(),
            forecast_time: forecast_time.into(),
        }
    }

    /// Temperature to show for this record.
    ///
    /// Prefers the current reading and otherwise uses the midpoint of the
    /// min/max range. This is a display helper only; the midpoint is never
    /// written back into the record.
    #[must_use]
    pub fn display_temperature(&self) -> Option<f64> {
        self.current_temp
            .or_else(|| Some((self.min_temp? + self.max_temp?) / 2.0))
    }
}

/// Colour band of the temperature scale used when rendering records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemperatureBand {
    Freezing,
    Cold,
    Cool,
    Comfortable,
    Warm,
    Hot,
    VeryHot,
    Extreme,
}

impl TemperatureBand {
    /// Every band, coldest first.
    pub const ALL: [TemperatureBand; 8] = [
        TemperatureBand::Freezing,
        TemperatureBand::Cold,
        TemperatureBand::Cool,
        TemperatureBand::Comfortable,
        TemperatureBand::Warm,
        TemperatureBand::Hot,
        TemperatureBand::VeryHot,
        TemperatureBand::Extreme,
    ];

    /// Classify a Celsius temperature. Upper bounds are exclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use twwx_types::TemperatureBand;
    ///
    /// assert_eq!(TemperatureBand::of(9.9), TemperatureBand::Freezing);
    /// assert_eq!(TemperatureBand::of(20.0), TemperatureBand::Comfortable);
    /// assert_eq!(TemperatureBand::of(35.0), TemperatureBand::Extreme);
    /// ```
    #[must_use]
    pub fn of(celsius: f64) -> Self {
        TemperatureBand::ALL
            .into_iter()
            .find(|band| band.upper_bound().is_some_and(|upper| celsius < upper))
            .unwrap_or(TemperatureBand::Extreme)
    }

    /// Exclusive upper bound in Celsius, `None` for the open-ended top band.
    #[must_use]
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            TemperatureBand::Freezing => Some(10.0),
            TemperatureBand::Cold => Some(15.0),
            TemperatureBand::Cool => Some(20.0),
            TemperatureBand::Comfortable => Some(25.0),
            TemperatureBand::Warm => Some(28.0),
            TemperatureBand::Hot => Some(32.0),
            TemperatureBand::VeryHot => Some(35.0),
            TemperatureBand::Extreme => None,
        }
    }

    /// Human-readable range, e.g. `"10-15°C"`.
    #[must_use]
    pub fn range_text(&self) -> &'static str {
        match self {
            TemperatureBand::Freezing => "< 10°C",
            TemperatureBand::Cold => "10-15°C",
            TemperatureBand::Cool => "15-20°C",
            TemperatureBand::Comfortable => "20-25°C",
            TemperatureBand::Warm => "25-28°C",
            TemperatureBand::Hot => "28-32°C",
            TemperatureBand::VeryHot => "32-35°C",
            TemperatureBand::Extreme => "> 35°C",
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBand::Freezing => "Freezing",
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Cool => "Cool",
            TemperatureBand::Comfortable => "Comfortable",
            TemperatureBand::Warm => "Warm",
            TemperatureBand::Hot => "Hot",
            TemperatureBand::VeryHot => "Very hot",
            TemperatureBand::Extreme => "Extreme",
        }
    }

    /// RGB colour for the band.
    #[must_use]
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TemperatureBand::Freezing => (0x00, 0x66, 0xCC),
            TemperatureBand::Cold => (0x33, 0x99, 0xFF),
            TemperatureBand::Cool => (0x66, 0xCC, 0xFF),
            TemperatureBand::Comfortable => (0x99, 0xFF, 0x99),
            TemperatureBand::Warm => (0xFF, 0xFF, 0x66),
            TemperatureBand::Hot => (0xFF, 0xCC, 0x33),
            TemperatureBand::VeryHot => (0xFF, 0x66, 0x33),
            TemperatureBand::Extreme => (0xCC, 0x00, 0x00),
        }
    }

    /// Colour as a `#RRGGBB` string.
    #[must_use]
    pub fn hex_color(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
