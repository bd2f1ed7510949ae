//! Shared helpers for the synthetic-data generators.

use chrono::{DateTime, Duration, Utc};
use rand::{Rng, rngs::StdRng};

use crate::types::EnergySource;

/// Length of generated opaque identifiers.
const ID_LEN: usize = 13;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Listing mix: cumulative weights drawn against one uniform sample.
const SOURCE_MIX: &[(EnergySource, f64)] = &[
    (EnergySource::Solar, 0.5),
    (EnergySource::Wind, 0.3),
    (EnergySource::Hydro, 0.1),
    (EnergySource::Biomass, 0.05),
    (EnergySource::Geothermal, 0.05),
];

/// Produces an opaque random base-36 identifier.
///
/// Uniqueness is not guaranteed; ids are session-scoped and the collision
/// probability over a demo session is ignored.
pub fn base36_id(rng: &mut StdRng) -> String {
    (0..ID_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// Now minus a uniform whole-day offset in `[0, 7)`.
pub fn recent_date(rng: &mut StdRng, now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(rng.random_range(0..7))
}

/// Now plus an exact hour offset.
pub fn future_date(now: DateTime<Utc>, hours_ahead: i64) -> DateTime<Utc> {
    now + Duration::hours(hours_ahead)
}

/// Weighted draw over the energy-source mix.
///
/// Walks the cumulative weight sum against a single uniform sample, so the
/// draw consumes exactly one RNG value.
pub fn weighted_source(rng: &mut StdRng) -> EnergySource {
    let draw = rng.random::<f64>();
    let mut sum = 0.0;
    for &(source, weight) in SOURCE_MIX {
        sum += weight;
        if draw < sum {
            return source;
        }
    }
    EnergySource::Solar
}
