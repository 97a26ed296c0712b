//! Weekly grid of bookable half-hour slots.
//!
//! Rows are times of day from opening (inclusive) to closing (exclusive),
//! columns are the seven dates starting at the anchor date.

use crate::services::date_utils::{format_date_header, format_time_of_day};
use chrono::{NaiveDate, NaiveTime, TimeZone};
use shared::Timestamp;

pub const SLOT_MINUTES: u32 = 30;
pub const DAYS_SHOWN: usize = 7;

/// One cell of the grid; `starts_at` is `None` when the local time does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub starts_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlotGrid {
    times_of_day: Vec<NaiveTime>,
    dates: Vec<NaiveDate>,
}

impl TimeSlotGrid {
    pub fn new(opens_at: u32, closes_at: u32, anchor: NaiveDate) -> Self {
        Self {
            times_of_day: times_of_day(opens_at, closes_at),
            dates: anchor.iter_days().take(DAYS_SHOWN).collect(),
        }
    }

    pub fn times_of_day(&self) -> &[NaiveTime] {
        &self.times_of_day
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.times_of_day.is_empty()
    }

    pub fn time_labels(&self) -> Vec<String> {
        self.times_of_day.iter().copied().map(format_time_of_day).collect()
    }

    pub fn date_headers(&self) -> Vec<String> {
        self.dates.iter().copied().map(format_date_header).collect()
    }

    /// Absolute start of the slot at (`day`, `row`) in the given time zone
    pub fn timestamp_at<Tz: TimeZone>(&self, day: usize, row: usize, tz: &Tz) -> Option<Timestamp> {
        let date = self.dates.get(day)?;
        let time = self.times_of_day.get(row)?;
        tz.from_local_datetime(&date.and_time(*time))
            .earliest()
            .map(|moment| moment.timestamp_millis())
    }

    /// Every cell, row by row
    pub fn cells<Tz: TimeZone>(&self, tz: &Tz) -> Vec<GridCell> {
        (0..self.times_of_day.len())
            .flat_map(|row| {
                (0..self.dates.len()).map(move |day| GridCell {
                    starts_at: self.timestamp_at(day, row, tz),
                })
            })
            .collect()
    }
}

fn times_of_day(opens_at: u32, closes_at: u32) -> Vec<NaiveTime> {
    if opens_at >= closes_at || closes_at > 24 {
        if opens_at != closes_at {
            log::warn!(
                "salon hours {}..{} are not a valid range; showing no time slots",
                opens_at,
                closes_at
            );
        }
        return Vec::new();
    }

    let first = opens_at * 60;
    (first..closes_at * 60)
        .step_by(SLOT_MINUTES as usize)
        .filter_map(|minutes| NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0))
        .collect()
}
