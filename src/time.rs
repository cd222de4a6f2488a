//! Domain-wide time/speed constants (§4.2, §6).

/// Fixed courier speed, 15 km/h expressed in meters per second.
pub const COURIER_SPEED_MPS: f64 = 15_000.0 / 3_600.0;

/// One working day, in seconds (§4.5, §8 P11).
pub const WORKDAY_SECONDS: u64 = 8 * 3_600;

/// Derive travel time in whole seconds from a distance in meters, at the
/// fixed courier speed, rounding up (§4.2: "apply a fixed courier speed of
/// 15 km/h").
pub fn travel_time_seconds(distance_meters: f64) -> u64 {
    (distance_meters / COURIER_SPEED_MPS).ceil() as u64
}
