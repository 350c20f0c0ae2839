use crate::core::compatibility::{is_compatible, MatchQuery};
use crate::models::Profile;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// How many recently returned candidate ids are excluded from re-selection.
pub const RECENT_WINDOW: usize = 3;

const SCORE_MIN: i32 = 85;
const SCORE_MAX: i32 = 100;

/// Bounded FIFO of the most recently returned candidate ids.
///
/// Holds at most [`RECENT_WINDOW`] ids in return order, oldest first.
/// Empty at process start and never persisted.
#[derive(Debug, Default)]
pub struct RecencyWindow {
    ids: VecDeque<i32>,
}

impl RecencyWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.ids.contains(&id)
    }

    pub fn record(&mut self, id: i32) {
        self.ids.push_back(id);
        if self.ids.len() > RECENT_WINDOW {
            self.ids.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in return order, oldest first.
    pub fn ids(&self) -> Vec<i32> {
        self.ids.iter().copied().collect()
    }
}

/// A successful pick: the matched profile and its compatibility score.
///
/// The score is a uniform random integer in [85, 100] and is not derived
/// from how close the match actually is.
#[derive(Debug, Clone)]
pub struct Selection {
    pub profile: Profile,
    pub score: i32,
}

/// Applies the compatibility rule to a candidate pool and picks one match
/// at random, steering away from recently returned candidates.
///
/// Owns the recency window and the random source; the host serializes
/// access (one mutex in app state), so each call sees a consistent window.
#[derive(Debug)]
pub struct MatchSelector {
    recency: RecencyWindow,
    rng: StdRng,
}

impl MatchSelector {
    pub fn new() -> Self {
        Self {
            recency: RecencyWindow::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic selector for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            recency: RecencyWindow::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Find a match for `query` among `candidates`.
    ///
    /// `candidates` must already be restricted to the gender opposite the
    /// query's; the selector only applies the compatibility rule and the
    /// recency exclusion on top.
    ///
    /// Returns `None` when no candidate passes the compatibility rule; the
    /// recency window is only mutated on a successful pick. When every
    /// compatible candidate has been returned recently, the window is
    /// cleared and the pick is made from the full compatible set.
    pub fn find_match(&mut self, query: &MatchQuery, candidates: &[Profile]) -> Option<Selection> {
        let compatible: Vec<&Profile> = candidates
            .iter()
            .filter(|candidate| is_compatible(query, candidate))
            .collect();

        if compatible.is_empty() {
            return None;
        }

        let available: Vec<&Profile> = compatible
            .iter()
            .copied()
            .filter(|candidate| !self.recency.contains(candidate.id))
            .collect();

        let pool = if available.is_empty() {
            self.recency.clear();
            &compatible
        } else {
            &available
        };

        let picked = pool[self.rng.gen_range(0..pool.len())];
        self.recency.record(picked.id);

        let score = self.rng.gen_range(SCORE_MIN..=SCORE_MAX);

        Some(Selection {
            profile: picked.clone(),
            score,
        })
    }

    /// Recently returned candidate ids, oldest first.
    pub fn recent_ids(&self) -> Vec<i32> {
        self.recency.ids()
    }
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use chrono::Utc;

    fn bride(id: i32, age: i32, height: &str) -> Profile {
        Profile {
            id,
            name: format!("Bride {}", id),
            age,
            gender: Gender::Female,
            profession: None,
            qualification: None,
            marital_status: None,
            religion: None,
            height: height.to_string(),
            birth_year: 1998,
            profile_picture: None,
            profile_picture_original: None,
            document: None,
            document_original: None,
            created_at: Utc::now(),
        }
    }

    fn groom_query() -> MatchQuery {
        MatchQuery::new(30, Gender::Male, "5'10\"")
    }

    #[test]
    fn test_returns_the_only_compatible_candidate() {
        let mut selector = MatchSelector::with_seed(1);
        let candidates = vec![
            bride(7, 26, "5'3\""),  // compatible
            bride(8, 28, "5'2\""),  // age gap 2, rejected
        ];

        let selection = selector.find_match(&groom_query(), &candidates).unwrap();

        assert_eq!(selection.profile.id, 7);
        assert!((85..=100).contains(&selection.score));
        assert_eq!(selector.recent_ids(), vec![7]);
    }

    #[test]
    fn test_no_compatible_candidate_leaves_recency_untouched() {
        let mut selector = MatchSelector::with_seed(1);
        let candidates = vec![bride(1, 26, "5'3\"")];

        selector.find_match(&groom_query(), &candidates).unwrap();
        assert_eq!(selector.recent_ids(), vec![1]);

        // nothing compatible this time
        let incompatible = vec![bride(2, 29, "5'9\"")];
        assert!(selector.find_match(&groom_query(), &incompatible).is_none());
        assert_eq!(selector.recent_ids(), vec![1]);

        // empty pool behaves the same
        assert!(selector.find_match(&groom_query(), &[]).is_none());
        assert_eq!(selector.recent_ids(), vec![1]);
    }

    #[test]
    fn test_window_never_exceeds_capacity_and_evicts_oldest() {
        let mut selector = MatchSelector::with_seed(3);
        let candidates: Vec<Profile> =
            (1..=6).map(|id| bride(id, 26, "5'3\"")).collect();

        let mut returned = Vec::new();
        for _ in 0..5 {
            let selection = selector.find_match(&groom_query(), &candidates).unwrap();
            returned.push(selection.profile.id);

            let recent = selector.recent_ids();
            assert!(recent.len() <= RECENT_WINDOW);
            assert_eq!(*recent.last().unwrap(), selection.profile.id);
        }

        let expected: Vec<i32> = returned[returned.len() - RECENT_WINDOW..].to_vec();
        assert_eq!(selector.recent_ids(), expected);
    }

    #[test]
    fn test_recent_candidates_are_not_repeated_while_alternatives_exist() {
        let mut selector = MatchSelector::with_seed(11);
        let candidates: Vec<Profile> =
            (1..=6).map(|id| bride(id, 26, "5'3\"")).collect();

        for _ in 0..20 {
            let before = selector.recent_ids();
            let selection = selector.find_match(&groom_query(), &candidates).unwrap();
            assert!(
                !before.contains(&selection.profile.id),
                "picked {} out of recent {:?}",
                selection.profile.id,
                before
            );
        }
    }

    #[test]
    fn test_exhausted_pool_resets_window_and_still_matches() {
        let mut selector = MatchSelector::with_seed(7);
        let candidates = vec![bride(1, 26, "5'3\""), bride(2, 26, "5'3\"")];

        // two calls exhaust the pool of two
        let first = selector.find_match(&groom_query(), &candidates).unwrap();
        let second = selector.find_match(&groom_query(), &candidates).unwrap();
        assert_ne!(first.profile.id, second.profile.id);
        assert_eq!(selector.recent_ids().len(), 2);

        // third call must clear the window and pick from the full pool
        let third = selector.find_match(&groom_query(), &candidates).unwrap();
        assert_eq!(selector.recent_ids(), vec![third.profile.id]);
    }

    #[test]
    fn test_score_always_within_range() {
        let mut selector = MatchSelector::with_seed(99);
        let candidates: Vec<Profile> =
            (1..=10).map(|id| bride(id, 26, "5'3\"")).collect();

        for _ in 0..50 {
            let selection = selector.find_match(&groom_query(), &candidates).unwrap();
            assert!(
                (85..=100).contains(&selection.score),
                "score {} out of range",
                selection.score
            );
        }
    }

    #[test]
    fn test_seeded_selectors_are_deterministic() {
        let candidates: Vec<Profile> =
            (1..=10).map(|id| bride(id, 26, "5'3\"")).collect();

        let mut a = MatchSelector::with_seed(42);
        let mut b = MatchSelector::with_seed(42);

        for _ in 0..10 {
            let x = a.find_match(&groom_query(), &candidates).unwrap();
            let y = b.find_match(&groom_query(), &candidates).unwrap();
            assert_eq!(x.profile.id, y.profile.id);
            assert_eq!(x.score, y.score);
        }
    }
}
