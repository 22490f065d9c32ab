//! Conversion of raw feed documents into [`WeatherRecord`]s.
//!
//! The feed is a loosely guaranteed tree:
//!
//! ```text
//! cwaopendata
//! └── dataset
//!     └── location[]            (or dataset.locations.location[])
//!         ├── locationName
//!         └── weatherElement[]
//!             ├── elementName
//!             └── time[0]
//!                 ├── startTime
//!                 └── parameter.parameterName
//! ```
//!
//! Only the first entry of each element's time series is read. A missing
//! container above the location list makes the whole document unusable; any
//! problem below it only affects the entry or field concerned.

use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, error, info, warn};
use twwx_types::{UNSPECIFIED_DESCRIPTION, WeatherRecord};

use crate::document::Node;
use crate::error::ParseError;
use crate::region::RegionTable;

/// Location name used when an entry carries none.
pub const UNKNOWN_LOCATION: &str = "Unknown";

const LOCATION_PATH: &str = "cwaopendata.dataset.location";
const FALLBACK_LOCATION_PATH: &str = "cwaopendata.dataset.locations.location";

/// Record field a weather element feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    MinTemperature,
    MaxTemperature,
    Temperature,
    Weather,
}

#[derive(Debug, Clone, Copy)]
enum TagMatch {
    Contains(&'static str),
    Exact(&'static str),
}

impl TagMatch {
    fn matches(self, name: &str) -> bool {
        match self {
            TagMatch::Contains(needle) => name.contains(needle),
            TagMatch::Exact(tag) => name == tag,
        }
    }
}

/// Element tag rules, checked in order. An element takes the first kind
/// with a matching rule.
const ELEMENT_RULES: &[(ElementKind, &[TagMatch])] = &[
    (
        ElementKind::MinTemperature,
        &[TagMatch::Contains("MinT"), TagMatch::Contains("最低溫")],
    ),
    (
        ElementKind::MaxTemperature,
        &[TagMatch::Contains("MaxT"), TagMatch::Contains("最高溫")],
    ),
    (
        ElementKind::Temperature,
        &[TagMatch::Exact("T"), TagMatch::Contains("溫度")],
    ),
    (
        ElementKind::Weather,
        &[TagMatch::Contains("Wx"), TagMatch::Contains("天氣")],
    ),
];

impl ElementKind {
    /// Classify an element name tag. Matching is case-sensitive.
    ///
    /// ```
    /// use twwx_core::ElementKind;
    ///
    /// assert_eq!(ElementKind::classify("MinT"), Some(ElementKind::MinTemperature));
    /// assert_eq!(ElementKind::classify("T"), Some(ElementKind::Temperature));
    /// assert_eq!(ElementKind::classify("PoP"), None);
    /// ```
    pub fn classify(name: &str) -> Option<Self> {
        ELEMENT_RULES
            .iter()
            .find(|(_, rules)| rules.iter().any(|rule| rule.matches(name)))
            .map(|(kind, _)| *kind)
    }
}

/// Raw text gathered from one location's elements, before coercion.
#[derive(Debug, Default)]
struct ElementText {
    min: Option<String>,
    max: Option<String>,
    current: Option<String>,
    description: Option<String>,
    forecast_time: Option<String>,
}

impl ElementText {
    /// Later elements of the same kind overwrite earlier ones; the forecast
    /// time is taken from the first minimum-temperature element that has one.
    fn apply(&mut self, kind: ElementKind, value: Option<String>, start_time: Option<String>) {
        match kind {
            ElementKind::MinTemperature => {
                self.min = value;
                if self.forecast_time.is_none() {
                    self.forecast_time = start_time;
                }
            }
            ElementKind::MaxTemperature => self.max = value,
            ElementKind::Temperature => self.current = value,
            ElementKind::Weather => self.description = value,
        }
    }
}

/// Parse a reading. Absent or blank text is `Ok(None)`.
fn coerce(raw: Option<&str>) -> Result<Option<f64>, std::num::ParseFloatError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some),
    }
}

/// Turns feed documents into records, classifying locations with a
/// [`RegionTable`].
#[derive(Debug, Clone)]
pub struct FeedParser {
    regions: RegionTable,
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    /// Parser using the built-in Taiwan region table.
    pub fn new() -> Self {
        Self::with_regions(RegionTable::taiwan())
    }

    pub fn with_regions(regions: RegionTable) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Parse a document, capturing "now" as the fallback forecast time.
    ///
    /// Never fails: a structurally unusable document is logged and yields
    /// an empty list.
    pub fn parse(&self, doc: &Value) -> Vec<WeatherRecord> {
        self.parse_at(doc, OffsetDateTime::now_utc())
    }

    /// Like [`parse`](Self::parse) with an explicit capture time.
    pub fn parse_at(&self, doc: &Value, captured_at: OffsetDateTime) -> Vec<WeatherRecord> {
        match self.try_parse_at(doc, captured_at) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to parse weather feed: {}", e);
                Vec::new()
            }
        }
    }

    /// Parse a document, reporting structural failures.
    pub fn try_parse(&self, doc: &Value) -> Result<Vec<WeatherRecord>, ParseError> {
        self.try_parse_at(doc, OffsetDateTime::now_utc())
    }

    pub fn try_parse_at(
        &self,
        doc: &Value,
        captured_at: OffsetDateTime,
    ) -> Result<Vec<WeatherRecord>, ParseError> {
        let dataset = Node::new(doc)
            .require("cwaopendata", "cwaopendata")?
            .require("dataset", "cwaopendata.dataset")?;
        let entries = location_entries(dataset)?;
        debug!("Found {} location entries", entries.len());

        let captured = captured_at
            .format(&Rfc3339)
            .unwrap_or_else(|_| captured_at.unix_timestamp().to_string());

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            match self.parse_location(Node::new(entry), &captured) {
                Some(record) => {
                    debug!(
                        "Parsed {} ({}): {:?} - {:?}",
                        record.location, record.region, record.min_temp, record.max_temp
                    );
                    records.push(record);
                }
                None => warn!("Skipping location entry {}: not an object", index),
            }
        }

        info!("Parsed {} weather records", records.len());
        Ok(records)
    }

    fn parse_location(&self, entry: Node<'_>, captured: &str) -> Option<WeatherRecord> {
        if !entry.is_object() {
            return None;
        }

        let location = entry
            .get("locationName")
            .text()
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());
        let region = self.regions.classify(&location);

        let mut text = ElementText::default();
        for element in entry.get("weatherElement").items() {
            let Some(name) = element.get("elementName").text() else {
                continue;
            };
            let Some(kind) = ElementKind::classify(&name) else {
                continue;
            };
            let first = element.get("time").first();
            if !first.is_present() {
                continue;
            }
            text.apply(
                kind,
                first.get("parameter").get("parameterName").text(),
                first.get("startTime").non_empty_text(),
            );
        }

        let min_temp = coerce(text.min.as_deref()).unwrap_or(None);
        let max_temp = coerce(text.max.as_deref()).unwrap_or(None);
        let current_temp = match coerce(text.current.as_deref()) {
            Ok(value) => value,
            Err(_) => {
                // The midpoint is reported but the field stays unset.
                if let (Some(min), Some(max)) = (min_temp, max_temp) {
                    debug!(
                        "{}: unparseable current temperature, midpoint {} not retained",
                        location,
                        (min + max) / 2.0
                    );
                }
                None
            }
        };

        Some(WeatherRecord {
            region,
            min_temp,
            max_temp,
            current_temp,
            description: text
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| UNSPECIFIED_DESCRIPTION.to_string()),
            forecast_time: text.forecast_time.unwrap_or_else(|| captured.to_string()),
            location,
        })
    }
}

/// Locate the per-location list, preferring the primary key unless it is
/// absent or empty.
fn location_entries<'a>(dataset: Node<'a>) -> Result<&'a [Value], ParseError> {
    let primary = dataset.get("location");
    if let Some(list) = primary.as_array()
        && !list.is_empty()
    {
        return Ok(list);
    }

    let fallback = dataset.get("locations").get("location");
    if let Some(list) = fallback.as_array() {
        return Ok(list);
    }
    if let Some(list) = primary.as_array() {
        return Ok(list);
    }

    if primary.is_present() {
        Err(ParseError::UnexpectedShape {
            path: LOCATION_PATH.to_string(),
            expected: "a list of locations",
        })
    } else if fallback.is_present() {
        Err(ParseError::UnexpectedShape {
            path: FALLBACK_LOCATION_PATH.to_string(),
            expected: "a list of locations",
        })
    } else {
        Err(ParseError::MissingKey(LOCATION_PATH.to_string()))
    }
}

/// Parse with the default parser.
pub fn parse(doc: &Value) -> Vec<WeatherRecord> {
    FeedParser::new().parse(doc)
}
