//! Result recording for the mate-choice experiment.
//!
//! On every successful coupling the pairing protocol hands the
//! (female, male) pair to a [`CoupleRecorder`]. The recorder is a trait
//! so the environment can run with a no-op stub in tests or stream
//! observations elsewhere; the bundled [`MemoryRecorder`] keeps every
//! couple in memory and computes the experiment's primary observable,
//! the correlation of partner attractiveness.

use chrono::{DateTime, Utc};
use courtship_types::{Agent, AgentId};
use serde::Serialize;

/// One recorded coupling, in female-then-male attribution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedCouple {
    /// Round in which the couple formed.
    pub round: u64,
    /// The female partner's ID.
    pub female_id: AgentId,
    /// The female partner's attractiveness.
    pub female_attractiveness: f64,
    /// The male partner's ID.
    pub male_id: AgentId,
    /// The male partner's attractiveness.
    pub male_attractiveness: f64,
    /// Wall-clock time the observation was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// A sink for successful couplings.
///
/// Implementations must accept pairs in female-then-male order; the
/// pairing protocol guarantees that attribution regardless of which
/// partner initiated the date.
pub trait CoupleRecorder {
    /// Record one successful coupling.
    fn record_couple(&mut self, round: u64, female: &Agent, male: &Agent);
}

/// A recorder that discards every observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRecorder;

impl CoupleRecorder for NoOpRecorder {
    fn record_couple(&mut self, _round: u64, _female: &Agent, _male: &Agent) {}
}

/// An in-memory recorder for bounded experiment runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecorder {
    /// Every recorded coupling, in formation order.
    couples: Vec<RecordedCouple>,
}

impl MemoryRecorder {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self { couples: Vec::new() }
    }

    /// All recorded couples, in formation order.
    pub fn couples(&self) -> &[RecordedCouple] {
        &self.couples
    }

    /// Number of recorded couples.
    pub fn len(&self) -> usize {
        self.couples.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.couples.is_empty()
    }

    /// Pearson correlation between female and male attractiveness over
    /// all recorded couples.
    ///
    /// This is the Kalick–Hamilton experiment's primary observable: the
    /// attractiveness rule alone produces strong partner correlation,
    /// mirroring the matching observed in real couples.
    ///
    /// Returns `None` with fewer than two couples or when either side
    /// has zero variance.
    pub fn attractiveness_correlation(&self) -> Option<f64> {
        let n = self.couples.len();
        if n < 2 {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = n as f64;
        let mean_female =
            self.couples.iter().map(|couple| couple.female_attractiveness).sum::<f64>() / count;
        let mean_male =
            self.couples.iter().map(|couple| couple.male_attractiveness).sum::<f64>() / count;

        let mut covariance = 0.0;
        let mut variance_female = 0.0;
        let mut variance_male = 0.0;
        for couple in &self.couples {
            let df = couple.female_attractiveness - mean_female;
            let dm = couple.male_attractiveness - mean_male;
            covariance += df * dm;
            variance_female += df * df;
            variance_male += dm * dm;
        }
        let denominator = (variance_female * variance_male).sqrt();
        if denominator <= f64::EPSILON {
            return None;
        }
        Some(covariance / denominator)
    }
}

impl CoupleRecorder for MemoryRecorder {
    fn record_couple(&mut self, round: u64, female: &Agent, male: &Agent) {
        self.couples.push(RecordedCouple {
            round,
            female_id: female.id,
            female_attractiveness: female.attractiveness,
            male_id: male.id,
            male_attractiveness: male.attractiveness,
            recorded_at: Utc::now(),
        });
    }
}
