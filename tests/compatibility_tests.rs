// Unit tests for the height parser and the compatibility rule

use chrono::Utc;
use ghotokbari::core::{height_to_inches, is_compatible, MatchQuery};
use ghotokbari::models::{Gender, Profile};

fn candidate(id: i32, age: i32, gender: Gender, height: &str, profession: Option<&str>) -> Profile {
    Profile {
        id,
        name: format!("Candidate {}", id),
        age,
        gender,
        profession: profession.map(|p| p.to_string()),
        qualification: None,
        marital_status: None,
        religion: None,
        height: height.to_string(),
        birth_year: 1995,
        profile_picture: None,
        profile_picture_original: None,
        document: None,
        document_original: None,
        created_at: Utc::now(),
    }
}

#[test]
fn test_height_parsing_vectors() {
    assert_eq!(height_to_inches("5'9\""), 69);
    assert_eq!(height_to_inches("6'0\""), 72);
    assert_eq!(height_to_inches("tall"), 0);
}

#[test]
fn test_groom_accepts_bride_in_both_ranges() {
    // age gap 4, height gap 7
    let query = MatchQuery::new(30, Gender::Male, "5'10\"");
    let bride = candidate(7, 26, Gender::Female, "5'3\"", None);

    assert!(is_compatible(&query, &bride));
}

#[test]
fn test_groom_rejects_bride_outside_age_range() {
    // age gap 2 is below the minimum of 3
    let query = MatchQuery::new(30, Gender::Male, "5'10\"");
    let bride = candidate(8, 28, Gender::Female, "5'2\"", None);

    assert!(!is_compatible(&query, &bride));
}

#[test]
fn test_groom_age_gap_boundaries() {
    let query = MatchQuery::new(30, Gender::Male, "5'10\"");

    for (age, expected) in [(27, true), (24, true), (28, false), (23, false)] {
        let bride = candidate(1, age, Gender::Female, "5'3\"", None);
        assert_eq!(
            is_compatible(&query, &bride),
            expected,
            "bride age {}",
            age
        );
    }
}

#[test]
fn test_groom_height_gap_boundaries() {
    let query = MatchQuery::new(30, Gender::Male, "5'10\"");

    for (height, expected) in [
        ("5'4\"", true),  // 6 inches shorter
        ("5'2\"", true),  // 8 inches shorter
        ("5'5\"", false), // 5 inches shorter
        ("5'1\"", false), // 9 inches shorter
    ] {
        let bride = candidate(1, 26, Gender::Female, height, None);
        assert_eq!(
            is_compatible(&query, &bride),
            expected,
            "bride height {}",
            height
        );
    }
}

#[test]
fn test_bride_accepts_older_taller_employed_groom() {
    let query = MatchQuery::new(26, Gender::Female, "5'3\"");
    let groom = candidate(1, 30, Gender::Male, "5'10\"", Some("Engineer"));

    assert!(is_compatible(&query, &groom));
}

#[test]
fn test_bride_rejects_groom_without_profession() {
    let query = MatchQuery::new(26, Gender::Female, "5'3\"");

    let no_profession = candidate(1, 30, Gender::Male, "5'10\"", None);
    let empty_profession = candidate(2, 30, Gender::Male, "5'10\"", Some(""));

    assert!(!is_compatible(&query, &no_profession));
    assert!(!is_compatible(&query, &empty_profession));
}

#[test]
fn test_bride_direction_mirrors_groom_direction() {
    let query = MatchQuery::new(26, Gender::Female, "5'3\"");

    for (age, height, expected) in [
        (29, "5'9\"", true),   // gap 3 years, 6 inches
        (32, "5'11\"", true),  // gap 6 years, 8 inches
        (33, "5'10\"", false), // 7 years older
        (30, "6'0\"", false),  // 9 inches taller
    ] {
        let groom = candidate(1, age, Gender::Male, height, Some("Doctor"));
        assert_eq!(
            is_compatible(&query, &groom),
            expected,
            "groom age {} height {}",
            age,
            height
        );
    }
}

#[test]
fn test_unparseable_input_height_matches_nothing_sensible() {
    // the input parses to 0 inches, so no realistic bride is 6-8 inches shorter
    let query = MatchQuery::new(30, Gender::Male, "tall");
    let bride = candidate(1, 26, Gender::Female, "5'3\"", None);

    assert!(!is_compatible(&query, &bride));
}
