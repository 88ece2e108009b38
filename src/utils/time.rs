use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, TimeZone};

/// Calendar date of `moment` as seen from the timezone of `now`.
pub fn local_date<Tz: TimeZone, Other: TimeZone>(
    moment: &DateTime<Other>,
    now: &DateTime<Tz>,
) -> NaiveDate {
    moment.with_timezone(&now.timezone()).date_naive()
}

/// Returns true when both moments share a calendar day in the timezone of `now`.
pub fn is_same_day<Tz: TimeZone, Other: TimeZone>(
    moment: &DateTime<Other>,
    now: &DateTime<Tz>,
) -> bool {
    local_date(moment, now) == now.date_naive()
}

/// First moment of `date` in `tz`. When midnight falls into a DST gap the day starts at the
/// first valid local time after it.
pub fn day_start<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(midnight + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Midnight of the most recent Sunday, the Sunday of `now` included. Days are stepped on the
/// calendar, so 23 and 25 hour days in between don't shift the result.
pub fn week_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let offset = u64::from(now.weekday().num_days_from_sunday());
    day_start(now.date_naive() - Days::new(offset), &now.timezone())
}

#[cfg(test)]
pub mod test_zone {
    use chrono::{Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

    /// Zone with one DST jump, shaped like US Eastern time in March 2024: UTC-5 until
    /// 2024-03-10 at `gap_hour`:00 local, UTC-4 from the next hour on. The hour in between
    /// does not exist.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SpringForward {
        gap_hour: u32,
    }

    impl Default for SpringForward {
        fn default() -> Self {
            Self { gap_hour: 2 }
        }
    }

    impl SpringForward {
        /// Clock jumps from 00:00 straight to 01:00, so the day has no midnight.
        pub fn at_midnight() -> Self {
            Self { gap_hour: 0 }
        }

        fn standard() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn daylight() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn gap_start(&self) -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(self.gap_hour, 0, 0)
                .unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            Self::default()
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = self.gap_start();
            if *local < gap_start {
                LocalResult::Single(Self::standard())
            } else if *local < gap_start + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::daylight())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            // The jump happens at gap_start standard time.
            if *utc < self.gap_start() + Duration::hours(5) {
                Self::standard()
            } else {
                Self::daylight()
            }
        }
    }
}
