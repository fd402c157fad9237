// ABOUTME: FIT adapter: integrity check, message decoding, and record-to-point conversion
// ABOUTME: Resolves historically renamed fields through prioritized candidate tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pacemap Contributors

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use fitparser::de::{from_bytes_with_options, DecodeOption};
use fitparser::profile::MesgNum;
use fitparser::{FitDataRecord, Value};
use pacemap_core::constants::formats::FIT;
use pacemap_core::errors::{ActivityError, ActivityResult};
use pacemap_core::geo::semicircles_to_degrees;
use pacemap_core::models::{Activity, ActivityBuilder, Point, SportType};
use tracing::{debug, warn};

use super::{name_from_file, non_blank, ActivityAdapter};

/// Smallest legal header (protocol 1.0 headers carry no header checksum)
const MIN_HEADER_SIZE: usize = 12;
/// Header size from which a header checksum is present
const HEADER_SIZE_WITH_CRC: usize = 14;
/// File type signature at bytes 8..12 of the header
const FIT_SIGNATURE: &[u8; 4] = b".FIT";
/// Trailing checksum length
const CRC_SIZE: usize = 2;

/// Adapter for FIT binary telemetry containers
///
/// The embedded integrity check runs before any message is decoded; a
/// container that fails it never produces an activity.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryTelemetryAdapter;

impl ActivityAdapter for BinaryTelemetryAdapter {
    fn format(&self) -> &'static str {
        FIT
    }

    fn parse(&self, input: &[u8], file_name: &str) -> ActivityResult<Activity> {
        verify_integrity(input).inspect_err(|e| {
            warn!(file_name, error = %e, "Rejected binary telemetry container");
        })?;

        // Checksums were verified above
        let options: HashSet<DecodeOption> = [
            DecodeOption::SkipHeaderCrcValidation,
            DecodeOption::SkipDataCrcValidation,
        ]
        .into_iter()
        .collect();
        let messages = from_bytes_with_options(input, &options)
            .map_err(|e| ActivityError::malformed(FIT, e.to_string()))?;

        let mut session: Option<FieldMap<'_>> = None;
        let mut sport_name: Option<String> = None;
        let mut records = 0_usize;
        let mut points = Vec::new();

        for message in &messages {
            match message.kind() {
                MesgNum::Record => {
                    records += 1;
                    if let Some(point) = record_to_point(&field_map(message)) {
                        points.push(point);
                    }
                }
                MesgNum::Session if session.is_none() => session = Some(field_map(message)),
                MesgNum::Sport if sport_name.is_none() => {
                    sport_name = resolve(&field_map(message), SPORT_NAME);
                }
                _ => {}
            }
        }
        debug!(
            file_name,
            messages = messages.len(),
            records,
            dropped = records - points.len(),
            has_session = session.is_some(),
            "Decoded binary telemetry messages"
        );

        let summary = session.as_ref().map(SessionSummary::from_fields).unwrap_or_default();
        let name = non_blank(sport_name.as_deref())
            .or_else(|| summary.sport.as_ref().map(|s| s.display_name().to_owned()))
            .unwrap_or_else(|| name_from_file(file_name));
        let date = summary
            .start_time
            .or_else(|| points.iter().find_map(|p| p.timestamp));

        ActivityBuilder::new(name, FIT)
            .date(date)
            .sport(summary.sport)
            .distance_meters(summary.total_distance)
            .elevation_gain_meters(summary.total_ascent)
            .elapsed_seconds(summary.total_elapsed_time)
            .average_heart_rate(summary.average_heart_rate)
            .max_heart_rate(summary.max_heart_rate)
            .points(points)
            .build()
    }
}

/// Validate the container header, header checksum, and trailing file checksum
///
/// # Errors
///
/// Returns `ActivityError::Integrity` describing the first failed check
pub fn verify_integrity(bytes: &[u8]) -> ActivityResult<()> {
    let header_size = usize::from(
        *bytes
            .first()
            .ok_or_else(|| ActivityError::integrity("empty container"))?,
    );
    if header_size < MIN_HEADER_SIZE {
        return Err(ActivityError::integrity(format!(
            "header size {header_size} is below the minimum of {MIN_HEADER_SIZE}"
        )));
    }
    if bytes.len() < header_size + CRC_SIZE {
        return Err(ActivityError::integrity(
            "container shorter than its header and checksum",
        ));
    }
    if &bytes[8..12] != FIT_SIGNATURE {
        return Err(ActivityError::integrity("missing .FIT signature"));
    }

    let data_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    let data_end = header_size
        .checked_add(data_size)
        .filter(|end| end + CRC_SIZE <= bytes.len())
        .ok_or_else(|| ActivityError::integrity("container shorter than its declared data size"))?;

    if header_size >= HEADER_SIZE_WITH_CRC {
        let stored = u16::from_le_bytes([bytes[12], bytes[13]]);
        // Zero means the writer skipped the header checksum
        if stored != 0 && stored != fit_crc(&bytes[..12]) {
            return Err(ActivityError::integrity("header checksum mismatch"));
        }
    }

    let stored = u16::from_le_bytes([bytes[data_end], bytes[data_end + 1]]);
    if stored != fit_crc(&bytes[..data_end]) {
        return Err(ActivityError::integrity("file checksum mismatch"));
    }
    Ok(())
}

/// CRC-16 used by FIT headers and files
fn fit_crc(data: &[u8]) -> u16 {
    const CRC_TABLE: [u16; 16] = [
        0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
        0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
    ];

    data.iter().fold(0u16, |crc, byte| {
        let mut tmp = CRC_TABLE[usize::from(crc & 0xF)];
        let mut crc = (crc >> 4) & 0x0FFF;
        crc ^= tmp ^ CRC_TABLE[usize::from(byte & 0xF)];
        tmp = CRC_TABLE[usize::from(crc & 0xF)];
        crc = (crc >> 4) & 0x0FFF;
        crc ^ tmp ^ CRC_TABLE[usize::from((byte >> 4) & 0xF)]
    })
}

type FieldMap<'a> = HashMap<&'a str, &'a Value>;

fn field_map(message: &FitDataRecord) -> FieldMap<'_> {
    message
        .fields()
        .iter()
        .map(|field| (field.name(), field.value()))
        .collect()
}

/// One spelling a semantic field may appear under, with its value extractor
struct Candidate<T> {
    name: &'static str,
    extract: fn(&Value) -> Option<T>,
}

/// First candidate present in the message with an extractable value
fn resolve<T>(fields: &FieldMap<'_>, candidates: &[Candidate<T>]) -> Option<T> {
    candidates
        .iter()
        .find_map(|c| fields.get(c.name).and_then(|value| (c.extract)(value)))
}

const LATITUDE: &[Candidate<f64>] = &[
    Candidate { name: "position_lat", extract: semicircles },
    Candidate { name: "lat", extract: semicircles },
];
const LONGITUDE: &[Candidate<f64>] = &[
    Candidate { name: "position_long", extract: semicircles },
    Candidate { name: "lng", extract: semicircles },
    Candidate { name: "lon", extract: semicircles },
];
const ELEVATION: &[Candidate<f64>] = &[
    Candidate { name: "enhanced_altitude", extract: number },
    Candidate { name: "altitude", extract: number },
];
const HEART_RATE: &[Candidate<u32>] = &[
    Candidate { name: "heart_rate", extract: count },
    Candidate { name: "hr", extract: count },
];
const CADENCE: &[Candidate<u32>] = &[Candidate { name: "cadence", extract: count }];
const POWER: &[Candidate<u32>] = &[
    Candidate { name: "power", extract: count },
    Candidate { name: "enhanced_power", extract: count },
];
const TEMPERATURE: &[Candidate<f64>] = &[Candidate { name: "temperature", extract: number }];
const TIMESTAMP: &[Candidate<DateTime<Utc>>] = &[Candidate { name: "timestamp", extract: timestamp }];

const SESSION_DISTANCE: &[Candidate<f64>] = &[Candidate { name: "total_distance", extract: number }];
const SESSION_ASCENT: &[Candidate<f64>] = &[Candidate { name: "total_ascent", extract: number }];
const SESSION_ELAPSED: &[Candidate<f64>] = &[
    Candidate { name: "total_elapsed_time", extract: number },
    Candidate { name: "total_timer_time", extract: number },
];
const SESSION_AVG_HR: &[Candidate<f64>] = &[Candidate { name: "avg_heart_rate", extract: number }];
const SESSION_MAX_HR: &[Candidate<u32>] = &[Candidate { name: "max_heart_rate", extract: count }];
// The session's own `timestamp` marks when it was written (its end), never the start
const SESSION_START: &[Candidate<DateTime<Utc>>] = &[
    Candidate { name: "start_time", extract: timestamp },
];
const SESSION_SPORT: &[Candidate<SportType>] = &[Candidate { name: "sport", extract: sport }];
const SPORT_NAME: &[Candidate<String>] = &[Candidate { name: "name", extract: text }];

fn record_to_point(fields: &FieldMap<'_>) -> Option<Point> {
    let latitude = resolve(fields, LATITUDE)?;
    let longitude = resolve(fields, LONGITUDE)?;
    let mut point = Point::try_new(latitude, longitude)?;
    point.elevation = resolve(fields, ELEVATION);
    point.timestamp = resolve(fields, TIMESTAMP);
    point.heart_rate = resolve(fields, HEART_RATE);
    point.cadence = resolve(fields, CADENCE);
    point.power = resolve(fields, POWER);
    point.temperature = resolve(fields, TEMPERATURE);
    Some(point)
}

/// Authoritative totals from the first session message
#[derive(Debug, Default)]
struct SessionSummary {
    sport: Option<SportType>,
    start_time: Option<DateTime<Utc>>,
    total_distance: Option<f64>,
    total_ascent: Option<f64>,
    total_elapsed_time: Option<f64>,
    average_heart_rate: Option<f64>,
    max_heart_rate: Option<u32>,
}

impl SessionSummary {
    fn from_fields(fields: &FieldMap<'_>) -> Self {
        Self {
            sport: resolve(fields, SESSION_SPORT),
            start_time: resolve(fields, SESSION_START),
            total_distance: resolve(fields, SESSION_DISTANCE),
            total_ascent: resolve(fields, SESSION_ASCENT),
            total_elapsed_time: resolve(fields, SESSION_ELAPSED),
            average_heart_rate: resolve(fields, SESSION_AVG_HR),
            max_heart_rate: resolve(fields, SESSION_MAX_HR),
        }
    }
}

fn number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Float32(v) => f64::from(*v),
        Value::Float64(v) => *v,
        Value::SInt8(v) => f64::from(*v),
        Value::SInt16(v) => f64::from(*v),
        Value::SInt32(v) => f64::from(*v),
        Value::SInt64(v) => *v as f64,
        Value::UInt8(v) | Value::UInt8z(v) | Value::Byte(v) => f64::from(*v),
        Value::UInt16(v) | Value::UInt16z(v) => f64::from(*v),
        Value::UInt32(v) | Value::UInt32z(v) => f64::from(*v),
        Value::UInt64(v) | Value::UInt64z(v) => *v as f64,
        Value::Array(values) => return values.iter().find_map(number),
        _ => return None,
    };
    number.is_finite().then_some(number)
}

fn semicircles(value: &Value) -> Option<f64> {
    number(value).map(semicircles_to_degrees)
}

fn count(value: &Value) -> Option<u32> {
    number(value)
        .filter(|v| (0.0..=f64::from(u32::MAX)).contains(v))
        .map(|v| v.round() as u32)
}

fn timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(t) => Some(t.with_timezone(&Utc)),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Sport from its profile name or, when left undecoded, its numeric code
fn sport(value: &Value) -> Option<SportType> {
    match value {
        Value::String(label) => Some(SportType::from_label(label)),
        Value::Enum(code) => Some(match code {
            1 => SportType::Run,
            2 => SportType::Ride,
            5 => SportType::Swim,
            11 => SportType::Walk,
            17 => SportType::Hike,
            other => SportType::Other(format!("sport_{other}")),
        }),
        _ => None,
    }
}
