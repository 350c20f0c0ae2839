// Criterion benchmarks for the matching core

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ghotokbari::core::{height_to_inches, is_compatible, MatchQuery, MatchSelector};
use ghotokbari::models::{Gender, Profile};

fn create_candidate(id: i32) -> Profile {
    Profile {
        id,
        name: format!("Candidate {}", id),
        age: 22 + (id % 12),
        gender: Gender::Female,
        profession: None,
        qualification: None,
        marital_status: None,
        religion: None,
        height: format!("5'{}\"", id % 12),
        birth_year: 1995,
        profile_picture: None,
        profile_picture_original: None,
        document: None,
        document_original: None,
        created_at: Utc::now(),
    }
}

fn bench_height_parsing(c: &mut Criterion) {
    c.bench_function("height_to_inches", |b| {
        b.iter(|| height_to_inches(black_box("5'9\"")));
    });
}

fn bench_compatibility(c: &mut Criterion) {
    let query = MatchQuery::new(30, Gender::Male, "5'10\"");
    let candidate = create_candidate(1);

    c.bench_function("is_compatible", |b| {
        b.iter(|| is_compatible(black_box(&query), black_box(&candidate)));
    });
}

fn bench_find_match(c: &mut Criterion) {
    let query = MatchQuery::new(30, Gender::Male, "5'10\"");

    let mut group = c.benchmark_group("matching");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Profile> = (0..*candidate_count).map(create_candidate).collect();
        let mut selector = MatchSelector::with_seed(42);

        group.bench_with_input(
            BenchmarkId::new("find_match", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| selector.find_match(black_box(&query), black_box(&candidates)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_height_parsing, bench_compatibility, bench_find_match);
criterion_main!(benches);
