//! Synthetic intraday series for charting.
//!
//! The walk starts at the session open implied by the reported change, drifts toward the
//! reported price in equal steps with uniform noise on top, and is pinned to the reported
//! price at the final point. It is a visual approximation, not market data.

use crate::schema::SeriesPoint;
use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Uniform};

pub const SERIES_POINTS: usize = 30;
pub const SESSION_MINUTES: f64 = 390.0;
/// 9:30 expressed in minutes after midnight
pub const SESSION_OPEN_MINUTE: f64 = 9.0 * 60.0 + 30.0;
/// Per-step volatility as a fraction of the open price
pub const STEP_VOLATILITY: f64 = 0.005;
pub const PLACEHOLDER_VALUE: f64 = 100.0;

pub fn generate_series(current_price: f64, change_percent: f64) -> Vec<SeriesPoint> {
    generate_series_with_rng(current_price, change_percent, &mut thread_rng())
}

/// Same as [`generate_series`] with a caller-supplied noise source.
pub fn generate_series_with_rng<R: Rng + ?Sized>(
    current_price: f64,
    change_percent: f64,
    rng: &mut R,
) -> Vec<SeriesPoint> {
    if !current_price.is_finite() {
        return flat_series(PLACEHOLDER_VALUE);
    }

    let open = session_open(current_price, change_percent);
    let drift = (current_price - open) / SERIES_POINTS as f64;
    let half_width = (open * STEP_VOLATILITY).abs() / 2.0;
    let noise = Uniform::new_inclusive(-half_width, half_width);

    let mut value = open;
    let mut series: Vec<SeriesPoint> = (0..SERIES_POINTS)
        .map(|step| {
            value += drift + noise.sample(&mut *rng);
            SeriesPoint {
                time_label: time_label(step),
                value: round_cents(value),
            }
        })
        .collect();

    if let Some(last) = series.last_mut() {
        last.value = current_price;
    }

    series
}

/// Price at the start of the session implied by `current_price` and its percentage change.
///
/// Falls back to `current_price` when the change leaves the open undefined (e.g. -100%).
pub fn session_open(current_price: f64, change_percent: f64) -> f64 {
    let open = current_price / (1.0 + change_percent / 100.0);
    if open.is_finite() {
        open
    } else {
        current_price
    }
}

/// Wall-clock label (`H:MM`) of the given step within the session.
pub fn time_label(step: usize) -> String {
    let minute_step = SESSION_MINUTES / SERIES_POINTS as f64;
    let minute_of_day = SESSION_OPEN_MINUTE + step as f64 * minute_step;
    let hour = (minute_of_day / 60.0).floor() as u32;
    let minute = (minute_of_day % 60.0).floor() as u32;
    format!("{}:{:02}", hour, minute)
}

fn flat_series(value: f64) -> Vec<SeriesPoint> {
    (0..SERIES_POINTS)
        .map(|step| SeriesPoint {
            time_label: time_label(step),
            value,
        })
        .collect()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
