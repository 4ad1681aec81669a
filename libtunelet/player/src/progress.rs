/// Durations the port could not measure (NaN, infinite, zero or negative)
/// are reported as unknown, which is represented by `0.0`.
pub(crate) fn normalize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

/// Clamps a playback position into `0..=duration`. The upper bound only
/// applies once a duration is known.
pub(crate) fn clamp_position(position: f64, duration: f64) -> f64 {
    if !position.is_finite() || position < 0.0 {
        return 0.0;
    }
    if duration > 0.0 {
        position.min(duration)
    } else {
        position
    }
}

pub(crate) fn progress_percent(current_time: f64, duration: f64) -> f64 {
    let duration = normalize_duration(duration);
    if duration == 0.0 {
        return 0.0;
    }
    let percent = current_time / duration * 100.0;
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

pub(crate) fn clamp_fraction(fraction: f64) -> f64 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

/// Fractional position of a click `offset` pixels into a bar `width` pixels
/// wide.
pub fn fraction_of(offset: f64, width: f64) -> f64 {
    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }
    clamp_fraction(offset / width)
}
