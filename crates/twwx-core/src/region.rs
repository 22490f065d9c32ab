//! Region classification by location name.
//!
//! A [`RegionTable`] is an ordered list of `(pattern, region)` pairs. A
//! location belongs to the region of the first pattern it contains; entries
//! are evaluated in registration order, so adding a region or an alias is a
//! matter of registering another pair.

use std::sync::LazyLock;

use twwx_types::Region;

/// County and city name stems of Taiwan, grouped by region.
const TAIWAN_REGIONS: &[(&str, Region)] = &[
    ("臺北", Region::North),
    ("新北", Region::North),
    ("基隆", Region::North),
    ("桃園", Region::North),
    ("新竹", Region::North),
    ("宜蘭", Region::North),
    ("苗栗", Region::Central),
    ("臺中", Region::Central),
    ("彰化", Region::Central),
    ("南投", Region::Central),
    ("雲林", Region::Central),
    ("嘉義", Region::South),
    ("臺南", Region::South),
    ("高雄", Region::South),
    ("屏東", Region::South),
    ("花蓮", Region::East),
    ("臺東", Region::East),
    ("澎湖", Region::Islands),
    ("金門", Region::Islands),
    ("連江", Region::Islands),
];

static TAIWAN: LazyLock<RegionTable> = LazyLock::new(RegionTable::taiwan);

/// Ordered substring-to-region lookup table.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
    entries: Vec<(String, Region)>,
}

impl RegionTable {
    /// An empty table; every location classifies as [`Region::Other`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of Taiwan's counties and cities.
    pub fn taiwan() -> Self {
        TAIWAN_REGIONS
            .iter()
            .fold(Self::new(), |table, (pattern, region)| {
                table.with(*pattern, *region)
            })
    }

    /// Register a pattern after all existing ones.
    pub fn with(mut self, pattern: impl Into<String>, region: Region) -> Self {
        self.push(pattern, region);
        self
    }

    /// Register a pattern after all existing ones.
    pub fn push(&mut self, pattern: impl Into<String>, region: Region) {
        self.entries.push((pattern.into(), region));
    }

    /// Registered entries in evaluation order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Region)> {
        self.entries.iter().map(|(p, r)| (p.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Region of the first pattern contained in `location`, else [`Region::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use twwx_core::RegionTable;
    /// use twwx_types::Region;
    ///
    /// let table = RegionTable::taiwan();
    /// assert_eq!(table.classify("臺北市"), Region::North);
    /// assert_eq!(table.classify("花蓮縣"), Region::East);
    /// assert_eq!(table.classify("Tokyo"), Region::Other);
    /// ```
    pub fn classify(&self, location: &str) -> Region {
        self.entries
            .iter()
            .find(|(pattern, _)| location.contains(pattern.as_str()))
            .map_or(Region::Other, |(_, region)| *region)
    }
}

/// Classify a location with the built-in Taiwan table.
pub fn classify(location: &str) -> Region {
    TAIWAN.classify(location)
}
