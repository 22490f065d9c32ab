//! Demonstration records, one per county or city.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use twwx_types::WeatherRecord;

use crate::region::classify;

/// (location, min, max, current, description)
const SAMPLES: &[(&str, f64, f64, f64, &str)] = &[
    ("臺北市", 18.5, 25.3, 22.0, "多雲時晴"),
    ("新北市", 17.8, 24.5, 21.2, "晴時多雲"),
    ("基隆市", 19.2, 23.8, 21.5, "多雲短暫雨"),
    ("桃園市", 18.0, 26.0, 22.5, "晴"),
    ("新竹縣", 17.5, 25.5, 21.8, "多雲"),
    ("宜蘭縣", 20.0, 24.0, 22.2, "陰短暫雨"),
    ("苗栗縣", 16.5, 27.0, 22.0, "晴時多雲"),
    ("臺中市", 19.0, 28.5, 24.0, "晴"),
    ("彰化縣", 20.0, 29.0, 25.0, "多雲時晴"),
    ("南投縣", 15.0, 26.5, 21.0, "晴"),
    ("雲林縣", 20.5, 30.0, 26.0, "晴時多雲"),
    ("嘉義縣", 21.0, 30.5, 26.5, "晴"),
    ("臺南市", 22.0, 31.0, 27.0, "晴時多雲"),
    ("高雄市", 23.0, 32.0, 28.0, "晴"),
    ("屏東縣", 23.5, 32.5, 28.5, "晴時多雲"),
    ("花蓮縣", 20.5, 27.0, 24.0, "多雲短暫雨"),
    ("臺東縣", 22.0, 29.0, 26.0, "多雲時晴"),
    ("澎湖縣", 21.5, 26.5, 24.5, "多雲"),
    ("金門縣", 19.0, 25.0, 22.5, "晴時多雲"),
    ("連江縣", 18.0, 23.0, 21.0, "多雲"),
];

/// Sample records stamped with the current time.
pub fn sample_records() -> Vec<WeatherRecord> {
    sample_records_at(OffsetDateTime::now_utc())
}

/// Sample records with `forecast_time` set to `at`.
pub fn sample_records_at(at: OffsetDateTime) -> Vec<WeatherRecord> {
    let forecast_time = at
        .format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string());

    SAMPLES
        .iter()
        .map(|&(location, min, max, current, description)| WeatherRecord {
            location: location.to_string(),
            region: classify(location),
            min_temp: Some(min),
            max_temp: Some(max),
            current_temp: Some(current),
            description: description.to_string(),
            forecast_time: forecast_time.clone(),
        })
        .collect()
}
