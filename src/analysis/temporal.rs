/// Temporal analysis: when did the matched events happen?
///
/// Groups events by UTC calendar day and by UTC hour of day, and pulls out
/// the major events (magnitude at or above a threshold) in time order.
/// Works on a private time-sorted copy of the input.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use serde::Serialize;

use crate::model::EarthquakeEvent;

/// Default magnitude at which an event is listed as major.
pub const MAJOR_EVENT_MAGNITUDE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MajorEvent {
    pub id: String,
    pub magnitude: f64,
    pub depth_km: f64,
    pub time: DateTime<Utc>,
    pub place: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalAnalysis {
    /// One entry per UTC day with at least one event, ascending.
    pub timeline: Vec<DailyCount>,
    /// Always 24 entries, hour 0 through 23 UTC.
    pub hourly_pattern: Vec<HourlyCount>,
    pub total_days: usize,
    /// Events per active day (days with no events are not counted).
    pub avg_per_day: f64,
    /// First day reaching the maximum daily count.
    pub busiest_day: Option<DailyCount>,
    pub major_events: Vec<MajorEvent>,
}

fn utc(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// Builds the timeline, hourly pattern and major-event list.
///
/// Events whose timestamp is outside chrono's representable range are left
/// out of the day/hour grouping.
pub fn temporal_analysis(events: &[EarthquakeEvent], major_magnitude: f64) -> TemporalAnalysis {
    let mut sorted: Vec<&EarthquakeEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp_ms());

    let mut daily: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    let mut hourly = [0usize; 24];

    for time in sorted.iter().filter_map(|e| utc(e.timestamp_ms())) {
        *daily.entry(time.date_naive()).or_default() += 1;
        hourly[time.hour() as usize] += 1;
    }

    let timeline: Vec<DailyCount> = daily
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();

    let busiest_day = timeline
        .iter()
        .copied()
        .fold(None, |best: Option<DailyCount>, day| match best {
            Some(b) if b.count >= day.count => Some(b),
            _ => Some(day),
        });

    let total_days = timeline.len();
    let counted: usize = timeline.iter().map(|d| d.count).sum();
    let avg_per_day = if total_days > 0 {
        counted as f64 / total_days as f64
    } else {
        0.0
    };

    let major_events = sorted
        .iter()
        .filter(|e| e.magnitude() >= major_magnitude)
        .filter_map(|e| {
            Some(MajorEvent {
                id: e.id().to_string(),
                magnitude: e.magnitude(),
                depth_km: e.depth_km(),
                time: utc(e.timestamp_ms())?,
                place: e.place().to_string(),
            })
        })
        .collect();

    TemporalAnalysis {
        timeline,
        hourly_pattern: hourly
            .iter()
            .enumerate()
            .map(|(hour, &count)| HourlyCount { hour: hour as u32, count })
            .collect(),
        total_days,
        avg_per_day,
        busiest_day,
        major_events,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
