//! Wall-clock formatting for message timestamps.

#[cfg(test)]
#[path = "time_test.rs"]
mod time_test;

const MS_PER_MINUTE: i64 = 60_000;
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Format an epoch-millisecond timestamp as `HH:MM` at the given UTC offset.
#[must_use]
pub fn format_clock(epoch_ms: i64, utc_offset_minutes: i32) -> String {
    let minutes = epoch_ms.div_euclid(MS_PER_MINUTE) + i64::from(utc_offset_minutes);
    let of_day = minutes.rem_euclid(MINUTES_PER_DAY);
    format!("{:02}:{:02}", of_day / 60, of_day % 60)
}

/// Browser's local UTC offset (minutes east of UTC) at `epoch_ms`.
///
/// Outside the browser this is always UTC.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn local_offset_minutes(epoch_ms: i64) -> i32 {
    #[cfg(feature = "csr")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(epoch_ms as f64));
        // getTimezoneOffset() is UTC minus local time.
        -date.get_timezone_offset() as i32
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = epoch_ms;
        0
    }
}
