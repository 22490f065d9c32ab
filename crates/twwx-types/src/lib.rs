//! Shared types for the Taiwan weather feed pipeline.
//!
//! This crate holds the record shape that flows between the feed parser
//! (`twwx-core`), the record store (`twwx-store`) and the command-line
//! front end (`twwx-cli`). It performs no I/O.
//!
//! # Example
//!
//! ```
//! use twwx_types::{Region, TemperatureBand, WeatherRecord};
//!
//! let mut record = WeatherRecord::new("臺北市", Region::North, "2025-01-01T06:00:00+08:00");
//! record.min_temp = Some(18.5);
//! record.max_temp = Some(25.3);
//!
//! assert_eq!(record.current_temp, None);
//! assert_eq!(TemperatureBand::of(22.0), TemperatureBand::Comfortable);
//! ```

pub mod error;
pub mod types;

pub use error::TypeError;
pub use types::{Region, TemperatureBand, UNSPECIFIED_DESCRIPTION, WeatherRecord};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Region tests ---

    #[test]
    fn test_region_label_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.label().parse::<Region>(), Ok(region));
        }
    }

    #[test]
    fn test_region_parses_local_name() {
        assert_eq!("北部".parse::<Region>(), Ok(Region::North));
        assert_eq!("離島".parse::<Region>(), Ok(Region::Islands));
        assert_eq!("其他".parse::<Region>(), Ok(Region::Other));
    }

    #[test]
    fn test_region_parse_is_case_insensitive() {
        assert_eq!("islands".parse::<Region>(), Ok(Region::Islands));
        assert_eq!(" SOUTH ".parse::<Region>(), Ok(Region::South));
    }

    #[test]
    fn test_region_parse_unknown() {
        let err = "Mars".parse::<Region>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown region: Mars");
    }

    #[test]
    fn test_region_from_stored_defaults_to_other() {
        assert_eq!(Region::from_stored(""), Region::Other);
        assert_eq!(Region::from_stored("Central"), Region::Central);
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::Central.to_string(), "Central");
    }

    // --- WeatherRecord tests ---

    #[test]
    fn test_new_record_has_unspecified_description() {
        let record = WeatherRecord::new("Taipei", Region::North, "2025-01-01T00:00:00Z");
        assert_eq!(record.description, UNSPECIFIED_DESCRIPTION);
        assert!(record.min_temp.is_none());
        assert!(record.max_temp.is_none());
        assert!(record.current_temp.is_none());
    }

    #[test]
    fn test_display_temperature_prefers_current() {
        let mut record = WeatherRecord::new("Taipei", Region::North, "t");
        record.min_temp = Some(10.0);
        record.max_temp = Some(20.0);
        record.current_temp = Some(12.0);
        assert_eq!(record.display_temperature(), Some(12.0));
    }

    #[test]
    fn test_display_temperature_midpoint_needs_both_bounds() {
        let mut record = WeatherRecord::new("Taipei", Region::North, "t");
        record.min_temp = Some(10.0);
        assert_eq!(record.display_temperature(), None);

        record.max_temp = Some(20.0);
        assert_eq!(record.display_temperature(), Some(15.0));
        // The helper never mutates the record.
        assert_eq!(record.current_temp, None);
    }

    #[test]
    fn test_record_serialization_field_names() {
        let mut record = WeatherRecord::new("Taipei", Region::North, "2025-01-01T00:00:00Z");
        record.min_temp = Some(18.5);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"location\":\"Taipei\""));
        assert!(json.contains("\"region\":\"North\""));
        assert!(json.contains("\"min_temp\":18.5"));
        assert!(json.contains("\"current_temp\":null"));
    }

    // --- TemperatureBand tests ---

    #[test]
    fn test_band_boundaries_are_exclusive() {
        assert_eq!(TemperatureBand::of(-5.0), TemperatureBand::Freezing);
        assert_eq!(TemperatureBand::of(10.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(14.9), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::of(15.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::of(24.99), TemperatureBand::Comfortable);
        assert_eq!(TemperatureBand::of(25.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::of(28.0), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::of(32.0), TemperatureBand::VeryHot);
        assert_eq!(TemperatureBand::of(40.0), TemperatureBand::Extreme);
    }

    #[test]
    fn test_band_hex_colors() {
        assert_eq!(TemperatureBand::Freezing.hex_color(), "#0066CC");
        assert_eq!(TemperatureBand::Comfortable.hex_color(), "#99FF99");
        assert_eq!(TemperatureBand::Extreme.hex_color(), "#CC0000");
    }

    #[test]
    fn test_only_top_band_is_open_ended() {
        let open: Vec<_> = TemperatureBand::ALL
            .iter()
            .filter(|b| b.upper_bound().is_none())
            .collect();
        assert_eq!(open, vec![&TemperatureBand::Extreme]);
    }

    proptest! {
        #[test]
        fn prop_band_bounds_contain_value(celsius in -50.0f64..60.0) {
            let band = TemperatureBand::of(celsius);
            if let Some(upper) = band.upper_bound() {
                prop_assert!(celsius < upper);
            }
            let idx = TemperatureBand::ALL.iter().position(|b| *b == band).unwrap();
            if idx > 0 {
                let lower = TemperatureBand::ALL[idx - 1].upper_bound().unwrap();
                prop_assert!(celsius >= lower);
            }
        }
    }
}
