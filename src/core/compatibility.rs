use crate::core::height::height_to_inches;
use crate::models::{Gender, Profile};

/// Acceptable groom-minus-bride age gap, inclusive.
pub const MIN_AGE_GAP: i32 = 3;
pub const MAX_AGE_GAP: i32 = 6;

/// Acceptable groom-minus-bride height gap in inches, inclusive.
pub const MIN_HEIGHT_GAP: i32 = 6;
pub const MAX_HEIGHT_GAP: i32 = 8;

/// The submitted profile, reduced to the fields the matching rule reads.
#[derive(Debug, Clone)]
pub struct MatchQuery {
    pub age: i32,
    pub gender: Gender,
    pub height_inches: i32,
}

impl MatchQuery {
    pub fn new(age: i32, gender: Gender, height: &str) -> Self {
        Self {
            age,
            gender,
            height_inches: height_to_inches(height),
        }
    }
}

/// Fixed compatibility rule between the submitted profile and a stored
/// candidate of the opposite gender.
///
/// The groom must be 3-6 years older and 6-8 inches taller than the bride,
/// whichever side of the pair was submitted. When the candidate is the
/// groom he must also have a profession on record.
#[inline]
pub fn is_compatible(query: &MatchQuery, candidate: &Profile) -> bool {
    let candidate_inches = height_to_inches(&candidate.height);

    match query.gender {
        Gender::Male => {
            let age_gap = query.age - candidate.age;
            let height_gap = query.height_inches - candidate_inches;

            (MIN_AGE_GAP..=MAX_AGE_GAP).contains(&age_gap)
                && (MIN_HEIGHT_GAP..=MAX_HEIGHT_GAP).contains(&height_gap)
        }
        Gender::Female => {
            // A groom without a profession is never offered.
            if candidate
                .profession
                .as_deref()
                .map_or(true, |p| p.is_empty())
            {
                return false;
            }

            let age_gap = candidate.age - query.age;
            let height_gap = candidate_inches - query.height_inches;

            (MIN_AGE_GAP..=MAX_AGE_GAP).contains(&age_gap)
                && (MIN_HEIGHT_GAP..=MAX_HEIGHT_GAP).contains(&height_gap)
        }
    }
}
