//! Wall-clock to instant conversion in an injected timezone.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;

/// Interpret `naive` as wall-clock time in `tz`.
///
/// An ambiguous time (DST fall-back) resolves to the earlier instant. A time
/// inside a DST gap is moved forward by one hour, the width of the gap in
/// every zone that observes DST today. Returns `None` only when the shifted
/// time is still unrepresentable.
pub fn localize(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let shifted = naive.checked_add_signed(TimeDelta::hours(1))?;
            tz.from_local_datetime(&shifted).earliest()
        }
    }
}
