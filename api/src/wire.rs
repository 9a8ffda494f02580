//! Raw response bodies and their one-step normalization
//!
//! The service sends aggregate counts as strings (`"12"`) and timestamps with
//! or without an offset. Each raw entity is converted exactly once, here.

use crate::error::ApiError;
use crate::types::{
    Booking, BookingId, BookingStatus, ExtendedBooking, MAX_TOTAL_SEATS, Movie, MovieId, Show,
    ShowId,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

/// A number that may arrive as an integer, a float or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    fn to_u64(&self, field: &'static str) -> Result<u64, ApiError> {
        let invalid = || ApiError::InvalidResponse(format!("{field}: not a count: {self:?}"));
        match self {
            Self::Int(n) => u64::try_from(*n).map_err(|_| invalid()),
            Self::Float(f) => whole_float(*f).ok_or_else(invalid),
            Self::Text(text) => {
                let text = text.trim();
                text.parse::<u64>()
                    .ok()
                    .or_else(|| text.parse::<f64>().ok().and_then(whole_float))
                    .ok_or_else(invalid)
            },
        }
    }

    fn to_u32(&self, field: &'static str) -> Result<u32, ApiError> {
        let wide = self.to_u64(field)?;
        u32::try_from(wide)
            .map_err(|_| ApiError::InvalidResponse(format!("{field}: out of range: {wide}")))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn whole_float(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64)
        .then_some(value as u64)
}

fn optional_u32(value: Option<&Numeric>, field: &'static str) -> Result<Option<u32>, ApiError> {
    value.map(|n| n.to_u32(field)).transpose()
}

/// Parse a timestamp; values without an offset are taken as UTC
pub(crate) fn parse_time(raw: &str, field: &'static str) -> Result<DateTime<Utc>, ApiError> {
    const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ApiError::InvalidResponse(format!("{field}: not a timestamp: {raw:?}")))
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMovie {
    id: Numeric,
    title: String,
    #[serde(default)]
    description: Option<String>,
    duration_minutes: Numeric,
}

impl TryFrom<RawMovie> for Movie {
    type Error = ApiError;

    fn try_from(raw: RawMovie) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MovieId(raw.id.to_u64("movie.id")?),
            title: raw.title,
            description: raw.description.unwrap_or_default(),
            duration_minutes: raw.duration_minutes.to_u32("movie.duration_minutes")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawShow {
    id: Numeric,
    movie_id: Numeric,
    screen_name: String,
    start_time: String,
    total_seats: Numeric,
    #[serde(default)]
    movie_title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    duration_minutes: Option<Numeric>,
    #[serde(default)]
    booked_seats: Option<Numeric>,
    #[serde(default)]
    available_seats: Option<Numeric>,
}

impl TryFrom<RawShow> for Show {
    type Error = ApiError;

    fn try_from(raw: RawShow) -> Result<Self, Self::Error> {
        let total_seats = raw.total_seats.to_u32("show.total_seats")?;
        if total_seats > MAX_TOTAL_SEATS {
            return Err(ApiError::InvalidResponse(format!(
                "show.total_seats: {total_seats} exceeds {MAX_TOTAL_SEATS}"
            )));
        }
        Ok(Self {
            id: ShowId(raw.id.to_u64("show.id")?),
            movie_id: MovieId(raw.movie_id.to_u64("show.movie_id")?),
            screen_name: raw.screen_name,
            start_time: parse_time(&raw.start_time, "show.start_time")?,
            total_seats,
            movie_title: raw.movie_title,
            description: raw.description,
            duration_minutes: optional_u32(raw.duration_minutes.as_ref(), "show.duration_minutes")?,
            booked_seats: optional_u32(raw.booked_seats.as_ref(), "show.booked_seats")?,
            available_seats: optional_u32(raw.available_seats.as_ref(), "show.available_seats")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawBooking {
    id: Numeric,
    show_id: Numeric,
    user_email: String,
    #[serde(default)]
    seats_booked: Option<Numeric>,
    #[serde(default)]
    seat_numbers: Option<Vec<Numeric>>,
    status: String,
    #[serde(default)]
    created_at: Option<String>,
}

impl TryFrom<RawBooking> for Booking {
    type Error = ApiError;

    fn try_from(raw: RawBooking) -> Result<Self, Self::Error> {
        let seat_numbers = raw
            .seat_numbers
            .unwrap_or_default()
            .iter()
            .map(|seat| seat.to_u32("booking.seat_numbers"))
            .collect::<Result<Vec<_>, _>>()?;
        let seats_booked = match raw.seats_booked {
            Some(count) => count.to_u32("booking.seats_booked")?,
            None => u32::try_from(seat_numbers.len()).unwrap_or(u32::MAX),
        };
        let created_at = raw
            .created_at
            .as_deref()
            .map(|at| parse_time(at, "booking.created_at"))
            .transpose()?;

        Ok(Self {
            id: BookingId(raw.id.to_u64("booking.id")?),
            show_id: ShowId(raw.show_id.to_u64("booking.show_id")?),
            user_email: raw.user_email,
            seats_booked,
            seat_numbers,
            status: BookingStatus::from(raw.status.as_str()),
            created_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawExtendedBooking {
    #[serde(flatten)]
    booking: RawBooking,
    movie_title: String,
    screen_name: String,
    start_time: String,
}

impl TryFrom<RawExtendedBooking> for ExtendedBooking {
    type Error = ApiError;

    fn try_from(raw: RawExtendedBooking) -> Result<Self, Self::Error> {
        Ok(Self {
            booking: Booking::try_from(raw.booking)?,
            movie_title: raw.movie_title,
            screen_name: raw.screen_name,
            start_time: parse_time(&raw.start_time, "booking.start_time")?,
        })
    }
}

/// Body of `POST /shows/:id/book`: nested under `booking`, or the booking itself
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CreatedBooking {
    Nested { booking: RawBooking },
    Direct(RawBooking),
}

impl TryFrom<CreatedBooking> for Booking {
    type Error = ApiError;

    fn try_from(created: CreatedBooking) -> Result<Self, Self::Error> {
        match created {
            CreatedBooking::Nested { booking } | CreatedBooking::Direct(booking) => {
                Self::try_from(booking)
            },
        }
    }
}

/// Body of `GET /shows/:id/booked-seats`
#[derive(Debug, Deserialize)]
pub(crate) struct RawBookedSeats {
    #[serde(default)]
    booked_seats: Vec<Numeric>,
}

impl RawBookedSeats {
    pub(crate) fn into_seats(self) -> Result<Vec<u32>, ApiError> {
        self.booked_seats
            .iter()
            .map(|seat| seat.to_u32("booked_seats"))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn show(value: serde_json::Value) -> Result<Show, ApiError> {
        Show::try_from(serde_json::from_value::<RawShow>(value).unwrap())
    }

    #[test]
    fn string_counts_are_coerced() {
        let show = show(json!({
            "id": 1,
            "movie_id": 2,
            "screen_name": "Screen 1",
            "start_time": "2025-01-06T18:30:00.000Z",
            "total_seats": 50,
            "booked_seats": "12",
            "available_seats": "38",
            "duration_minutes": 148.0
        }))
        .unwrap();

        assert_eq!(show.booked_seats, Some(12));
        assert_eq!(show.available_seats, Some(38));
        assert_eq!(show.duration_minutes, Some(148));
        assert_eq!(show.start_time, Utc.with_ymd_and_hms(2025, 1, 6, 18, 30, 0).unwrap());
    }

    #[test]
    fn oversized_auditorium_is_rejected() {
        let body = |total: u64| {
            json!({
                "id": 1, "movie_id": 2, "screen_name": "A",
                "start_time": "2025-01-06T18:30:00Z", "total_seats": total
            })
        };
        assert_eq!(show(body(10_000)).unwrap().total_seats, MAX_TOTAL_SEATS);
        assert!(matches!(show(body(4_000_000_000)), Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn negative_or_fractional_counts_are_rejected() {
        let base = json!({
            "id": 1, "movie_id": 2, "screen_name": "A",
            "start_time": "2025-01-06T18:30:00Z", "total_seats": 50
        });
        let mut negative = base.clone();
        negative["available_seats"] = json!("-1");
        assert!(matches!(show(negative), Err(ApiError::InvalidResponse(_))));

        let mut fractional = base;
        fractional["available_seats"] = json!(2.5);
        assert!(matches!(show(fractional), Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn naive_times_are_utc() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 6, 18, 30, 0).unwrap();
        assert_eq!(parse_time("2025-01-06T18:30", "t").unwrap(), expected);
        assert_eq!(parse_time("2025-01-06 18:30:00", "t").unwrap(), expected);
        assert_eq!(parse_time("2025-01-06T20:30:00+02:00", "t").unwrap(), expected);
        assert!(parse_time("next tuesday", "t").is_err());
    }

    #[test]
    fn created_booking_accepts_both_shapes() {
        let body = json!({
            "id": 9, "show_id": 1, "user_email": "a@b.co",
            "seats_booked": 2, "seat_numbers": [4, 5], "status": "CONFIRMED"
        });
        let nested: CreatedBooking = serde_json::from_value(json!({ "booking": body })).unwrap();
        let direct: CreatedBooking = serde_json::from_value(body).unwrap();

        let nested = Booking::try_from(nested).unwrap();
        assert_eq!(nested.id, BookingId(9));
        assert_eq!(nested, Booking::try_from(direct).unwrap());
    }

    #[test]
    fn missing_seat_count_is_derived_from_seat_list() {
        let raw: RawBooking = serde_json::from_value(json!({
            "id": "3", "show_id": "1", "user_email": "a@b.co",
            "seat_numbers": ["7", 8], "status": "PENDING"
        }))
        .unwrap();
        let booking = Booking::try_from(raw).unwrap();
        assert_eq!(booking.seats_booked, 2);
        assert_eq!(booking.seat_numbers, vec![7, 8]);
        assert_eq!(booking.status, BookingStatus::Pending);
    }
}
