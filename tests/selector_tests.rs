// Integration tests for the match selector and its recency window

use chrono::Utc;
use ghotokbari::core::{MatchQuery, MatchSelector, RECENT_WINDOW};
use ghotokbari::models::{Gender, Profile};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

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
fn test_every_returned_match_satisfies_the_rule() {
    let mut selector = MatchSelector::with_seed(1);

    // mixed pool: some compatible, some not
    let candidates = vec![
        bride(1, 26, "5'3\""),  // compatible
        bride(2, 25, "5'4\""),  // compatible
        bride(3, 28, "5'3\""),  // age gap 2
        bride(4, 26, "5'6\""),  // height gap 4
        bride(5, 20, "5'3\""),  // age gap 10
    ];

    for _ in 0..20 {
        let selection = selector.find_match(&groom_query(), &candidates).unwrap();
        let age_gap = 30 - selection.profile.age;
        assert!((3..=6).contains(&age_gap));
        assert!([1, 2].contains(&selection.profile.id));
        assert!((85..=100).contains(&selection.score));
    }
}

#[test]
fn test_no_match_for_empty_or_incompatible_pool() {
    let mut selector = MatchSelector::with_seed(2);

    assert!(selector.find_match(&groom_query(), &[]).is_none());

    let incompatible = vec![bride(1, 29, "5'9\"")];
    assert!(selector.find_match(&groom_query(), &incompatible).is_none());

    // recency untouched by failed lookups
    assert!(selector.recent_ids().is_empty());
}

#[test]
fn test_recency_window_tracks_the_last_three_picks() {
    let mut selector = MatchSelector::with_seed(3);
    let candidates: Vec<Profile> = (1..=8).map(|id| bride(id, 26, "5'3\"")).collect();

    let mut returned = Vec::new();
    for _ in 0..6 {
        let selection = selector.find_match(&groom_query(), &candidates).unwrap();
        returned.push(selection.profile.id);

        let recent = selector.recent_ids();
        assert!(recent.len() <= RECENT_WINDOW);
        assert_eq!(*recent.last().unwrap(), selection.profile.id);
    }

    assert_eq!(
        selector.recent_ids(),
        returned[returned.len() - RECENT_WINDOW..].to_vec()
    );
}

#[test]
fn test_small_pool_reset_still_returns_a_match() {
    let mut selector = MatchSelector::with_seed(4);

    // compatible pool of exactly three; after three picks every member is
    // in the window, so the fourth call must reset and still match
    let candidates = vec![
        bride(1, 26, "5'3\""),
        bride(2, 26, "5'3\""),
        bride(3, 26, "5'3\""),
    ];

    let mut first_three = HashSet::new();
    for _ in 0..3 {
        let selection = selector.find_match(&groom_query(), &candidates).unwrap();
        first_three.insert(selection.profile.id);
    }
    assert_eq!(first_three.len(), 3);
    assert_eq!(selector.recent_ids().len(), 3);

    let fourth = selector.find_match(&groom_query(), &candidates).unwrap();
    assert!(first_three.contains(&fourth.profile.id));

    // the window was cleared before the pick was recorded
    assert_eq!(selector.recent_ids(), vec![fourth.profile.id]);
}

#[test]
fn test_concurrent_matches_leave_three_distinct_recent_ids() {
    let selector = Arc::new(Mutex::new(MatchSelector::new()));
    let candidates: Vec<Profile> = (1..=10).map(|id| bride(id, 26, "5'3\"")).collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let selector = Arc::clone(&selector);
            let candidates = candidates.clone();
            thread::spawn(move || {
                let mut selector = selector.lock().unwrap();
                selector
                    .find_match(&groom_query(), &candidates)
                    .unwrap()
                    .profile
                    .id
            })
        })
        .collect();

    let returned: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(returned.len(), 8);

    let selector = selector.lock().unwrap();
    let recent = selector.recent_ids();

    // exactly the window capacity, no duplicates, all actually returned
    assert_eq!(recent.len(), RECENT_WINDOW);
    let unique: HashSet<i32> = recent.iter().copied().collect();
    assert_eq!(unique.len(), RECENT_WINDOW);
    for id in &recent {
        assert!(returned.contains(id));
    }
}

#[test]
fn test_bride_input_matches_employed_grooms_only() {
    let mut selector = MatchSelector::with_seed(6);
    let query = MatchQuery::new(26, Gender::Female, "5'3\"");

    let mut employed = bride(1, 30, "5'10\"");
    employed.gender = Gender::Male;
    employed.profession = Some("Engineer".to_string());

    let mut unemployed = bride(2, 30, "5'10\"");
    unemployed.gender = Gender::Male;

    let candidates = vec![employed, unemployed];

    for _ in 0..10 {
        let selection = selector.find_match(&query, &candidates).unwrap();
        assert_eq!(selection.profile.id, 1);
    }
}
