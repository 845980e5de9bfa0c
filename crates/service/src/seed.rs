//! Bundled initial peaks.

use tracing::info;

use crate::errors::ServiceError;
use crate::peak::{NewPeak, PeakRepository, PeakService};

const INITIAL_PEAKS: [(&str, f64, f64, i32); 6] = [
    ("Mount Desert", 44.342827, -68.307138, 55),
    ("Mount Cadillac", 44.409286, -68.247501, 466),
    ("Mount Taranaki Maunga", -39.296770, 174.063399, 2518),
    ("Mount Tongariro", -39.1333, 175.6500, 1978),
    ("Monte Perdido", 42.6499974, 0.0499998, 3355),
    ("Mont Blanc", 45.833641, 6.864594, 4806),
];

pub fn initial_peaks() -> Vec<NewPeak> {
    INITIAL_PEAKS
        .iter()
        .map(|&(name, latitude, longitude, altitude)| NewPeak { name: name.to_string(), latitude, longitude, altitude })
        .collect()
}

/// Insert the initial peaks when the table is empty; returns how many were added.
pub async fn load_initial_peaks<R: PeakRepository + ?Sized>(svc: &PeakService<R>) -> Result<usize, ServiceError> {
    let existing = svc.count().await?;
    if existing > 0 {
        info!(existing, "peak table not empty, skipping seed");
        return Ok(0);
    }
    let peaks = initial_peaks();
    let n = peaks.len();
    for p in peaks {
        svc.create(p).await?;
    }
    info!(inserted = n, "initial peaks loaded");
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peak::repository::mock::MockPeakRepository;
    use std::sync::Arc;

    #[test]
    fn initial_peaks_are_valid() {
        for p in initial_peaks() {
            assert!(p.validate().is_ok(), "{} should be valid", p.name);
        }
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let svc = PeakService::new(Arc::new(MockPeakRepository::default()));
        assert_eq!(load_initial_peaks(&svc).await.unwrap(), 6);
        assert_eq!(load_initial_peaks(&svc).await.unwrap(), 0);
        assert_eq!(svc.count().await.unwrap(), 6);
        assert_eq!(svc.get(6).await.unwrap().name, "Mont Blanc");
    }
}
