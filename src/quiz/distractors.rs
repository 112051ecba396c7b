use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::periodic::{ElementRecord, FieldKey, FieldValue};

/// Limits for sampling wrong answers out of the element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistractorSettings {
    /// Wrong options shown next to the correct one.
    pub max_distractors: usize,
    /// Accepted (present, non-matching) candidates to collect before stopping.
    pub candidate_quota: usize,
    /// Draws allowed per element in the pool; the loop never exceeds
    /// `attempts_per_element * pool.len()` draws.
    pub attempts_per_element: usize,
}

impl Default for DistractorSettings {
    fn default() -> Self {
        Self {
            max_distractors: 3,
            candidate_quota: 15,
            attempts_per_element: 10,
        }
    }
}

impl DistractorSettings {
    pub fn max_attempts(&self, pool_size: usize) -> usize {
        self.attempts_per_element.saturating_mul(pool_size)
    }
}

/// Builds the shuffled option list for one question.
///
/// Records are drawn uniformly at random, with replacement. A draw counts as a
/// candidate when the record has a value for `field` and that value does not
/// loosely equal `correct`. Sampling stops at `candidate_quota` candidates or
/// when the attempt cap runs out, whichever comes first. Candidates are then
/// deduplicated by label, capped at `max_distractors`, and shuffled together
/// with `correct`.
///
/// The result always holds `correct` exactly once and never repeats a label.
/// With an empty pool, or a field on which every record agrees with the
/// correct answer, that is the only option.
pub fn generate_options<R: Rng + ?Sized>(
    correct: &FieldValue,
    field: FieldKey,
    pool: &[ElementRecord],
    settings: &DistractorSettings,
    rng: &mut R,
) -> Vec<FieldValue> {
    let Candidates { values, attempts } = sample_candidates(correct, field, pool, settings, rng);

    let mut seen = HashSet::new();
    let mut options: Vec<FieldValue> = values
        .into_iter()
        .filter(|value| seen.insert(value.label()))
        .take(settings.max_distractors)
        .collect();

    if options.len() < settings.max_distractors {
        log::warn!(
            "Only {} distractor(s) for {} after {} draw(s)",
            options.len(),
            field.as_str(),
            attempts
        );
    } else {
        log::debug!("Collected distractors for {} in {} draw(s)", field.as_str(), attempts);
    }

    options.push(correct.clone());
    options.shuffle(rng);
    options
}

struct Candidates {
    values: Vec<FieldValue>,
    attempts: usize,
}

/// Draws until `candidate_quota` values are accepted or the attempt cap is spent.
fn sample_candidates<R: Rng + ?Sized>(
    correct: &FieldValue,
    field: FieldKey,
    pool: &[ElementRecord],
    settings: &DistractorSettings,
    rng: &mut R,
) -> Candidates {
    let max_attempts = settings.max_attempts(pool.len());
    let mut values = Vec::with_capacity(settings.candidate_quota);
    let mut attempts = 0;

    while values.len() < settings.candidate_quota && attempts < max_attempts {
        attempts += 1;
        // max_attempts is zero for an empty pool
        let Some(record) = pool.choose(rng) else {
            break;
        };
        match record.field(field) {
            Some(value) if !value.same_as(correct) => values.push(value),
            _ => {}
        }
    }

    Candidates { values, attempts }
}
