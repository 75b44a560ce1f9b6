//! Special-relativistic time-dilation arithmetic.
//!
//! Every function here is a pure transform from inputs to outputs or a typed
//! failure: no I/O, no logging, no clock reads. Presentation layers own
//! formatting and the "departure defaults to now" convention.

use crate::domain::model::{DepartureContext, DilationResult, EarthElapsed, TravelParameters};
use crate::utils::error::{Result, VoyageError};
use chrono::{DateTime, Duration, Utc};

/// One calendar year is exactly 365 days: leap days are never inserted, so
/// projections stay deterministic and reproducible.
const DAYS_PER_YEAR: f64 = 365.0;
const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Lorentz factor for a speed given as percent of light speed.
///
/// Zero and negative speeds both mean "no motion" and yield exactly 1; the
/// boundary `speed_percent == 100` is an error, not infinity.
pub fn compute_lorentz_factor(speed_percent: f64) -> Result<f64> {
    if !speed_percent.is_finite() {
        return Err(VoyageError::InvalidSpeed {
            value: speed_percent,
        });
    }

    let beta = speed_percent / 100.0;
    if beta <= 0.0 {
        return Ok(1.0);
    }
    if beta >= 1.0 {
        return Err(VoyageError::InvalidSpeed {
            value: speed_percent,
        });
    }

    Ok(1.0 / (1.0 - beta * beta).sqrt())
}

/// Earth-frame elapsed time for a traveler-frame duration at the given speed.
///
/// `earth_years >= traveler_years` for every valid input; equality holds only
/// at zero (or negative) speed.
pub fn compute_earth_elapsed(traveler_years: f64, speed_percent: f64) -> Result<EarthElapsed> {
    // `!(x > 0.0)` also rejects NaN.
    if !(traveler_years > 0.0) || traveler_years.is_infinite() {
        return Err(VoyageError::InvalidDuration {
            value: traveler_years,
        });
    }

    let gamma = compute_lorentz_factor(speed_percent)?;
    Ok(EarthElapsed {
        gamma,
        earth_years: traveler_years * gamma,
    })
}

/// Project the Earth return date: departure plus `earth_years * 365` days at
/// millisecond granularity.
pub fn project_return_date(departure: DateTime<Utc>, earth_years: f64) -> Result<DateTime<Utc>> {
    let millis = earth_years * DAYS_PER_YEAR * MILLIS_PER_DAY;
    departure
        .checked_add_signed(Duration::milliseconds(millis as i64))
        .ok_or_else(|| VoyageError::ProcessingError {
            message: "Return date falls outside the representable calendar range".to_string(),
        })
}

/// Compute the whole dilation outcome. The only operation most callers need;
/// the sub-operations stay public so each can be reused and tested alone.
pub fn compute_full(params: &TravelParameters, ctx: &DepartureContext) -> Result<DilationResult> {
    let elapsed = compute_earth_elapsed(params.traveler_years, params.speed_percent)?;

    let return_date = match ctx.departure_date {
        Some(departure) => Some(project_return_date(departure, elapsed.earth_years)?),
        None => None,
    };

    Ok(DilationResult {
        gamma: elapsed.gamma,
        earth_years: elapsed.earth_years,
        diff_years: elapsed.earth_years - params.traveler_years,
        return_date,
    })
}
