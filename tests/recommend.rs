use std::{sync::Arc, thread};

use tag_recommender::{
    BuildError, MetadataError, RawItem, RecommendError, RecommendationIndex, RecommenderConfig, StopWords,
};

fn raw(id: u64, title: &str, overview: &str, genres: &str, cast: &str, crew: &str) -> RawItem {
    RawItem {
        id: Some(id),
        title: Some(title.to_string()),
        overview: Some(overview.to_string()),
        genres: Some(genres.to_string()),
        keywords: Some("[]".to_string()),
        cast: Some(cast.to_string()),
        crew: Some(crew.to_string()),
    }
}

fn catalog() -> Vec<RawItem> {
    vec![
        raw(
            19995,
            "Avatar",
            "In the 22nd century, a paraplegic Marine is dispatched to the moon Pandora.",
            r#"[{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]"#,
            r#"[{"name": "Sam Worthington"}, {"name": "Zoe Saldana"}, {"name": "Sigourney Weaver"}]"#,
            r#"[{"job": "Director", "name": "James Cameron"}]"#,
        ),
        raw(
            679,
            "Aliens",
            "Ripley returns to the moon where her crew met the alien, now with Marines.",
            r#"[{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]"#,
            r#"[{"name": "Sigourney Weaver"}, {"name": "Michael Biehn"}]"#,
            r#"[{"job": "Director", "name": "James Cameron"}, {"job": "Producer", "name": "Gale Anne Hurd"}]"#,
        ),
        raw(
            597,
            "Titanic",
            "A seventeen-year-old aristocrat falls in love with a kind but poor artist aboard the ship.",
            r#"[{"id": 18, "name": "Drama"}, {"id": 10749, "name": "Romance"}]"#,
            r#"[{"name": "Kate Winslet"}, {"name": "Leonardo DiCaprio"}]"#,
            r#"[{"job": "Director", "name": "James Cameron"}]"#,
        ),
        raw(
            8587,
            "The Lion King",
            "A young lion prince is cast out of his pride by his cruel uncle.",
            r#"[{"id": 16, "name": "Animation"}, {"id": 10751, "name": "Family"}, {"id": 18, "name": "Drama"}]"#,
            r#"[{"name": "Matthew Broderick"}, {"name": "Jeremy Irons"}]"#,
            r#"[{"job": "Director", "name": "Roger Allers"}, {"job": "Director", "name": "Rob Minkoff"}]"#,
        ),
        raw(
            1,
            "Untitled Short",
            "",
            "[]",
            "[]",
            // no director among the crew
            r#"[{"job": "Editor", "name": "Someone Else"}]"#,
        ),
    ]
}

fn build() -> RecommendationIndex {
    RecommendationIndex::initialize(&catalog(), &RecommenderConfig::default()).unwrap()
}

#[test]
fn diagonal_is_one_for_nonzero_items() {
    let index = build();
    let m = index.similarity();
    for (i, v) in index.vectors().iter().enumerate() {
        if v.nnz() > 0 {
            assert!((m.get(i, i) - 1.0).abs() < 1e-12);
        } else {
            assert_eq!(m.get(i, i), 0.0);
        }
    }
}

#[test]
fn matrix_is_symmetric() {
    let index = build();
    let m = index.similarity();
    for i in 0..m.len() {
        for j in 0..m.len() {
            assert_eq!(m.get(i, j), m.get(j, i));
        }
    }
}

#[test]
fn every_vector_has_vocabulary_length() {
    let index = build();
    let dims = index.vocabulary().len();
    assert!(dims <= 5000);
    assert!(index.vectors().iter().all(|v| v.len() == dims));
    assert!(index.vocabulary().iter().all(|t| !StopWords::English.contains(t)));
}

#[test]
fn sequel_ranks_first() {
    let index = build();
    assert_eq!(index.recommend("Avatar", 1).unwrap(), vec!["Aliens"]);
    let recs = index.recommend("Avatar", 5).unwrap();
    assert_eq!(recs.len(), 4);
    assert!(!recs.contains(&"Avatar".to_string()));
}

#[test]
fn item_without_director_builds() {
    let index = build();
    assert_eq!(index.len(), 5);
    assert!(index.report().excluded.is_empty());
    let short = index.lookup("Untitled Short").unwrap();
    assert!(index.items()[short].tags.is_empty());
    // zero-norm item scores zero against everything
    assert!(index.similarity().row(short).iter().all(|&s| s == 0.0));
    assert_eq!(index.recommend("Untitled Short", 2).unwrap(), vec!["Avatar", "Aliens"]);
}

#[test]
fn unknown_title() {
    let index = build();
    let err = index.recommend("Unknown Title", 5).unwrap_err();
    assert_eq!(err, RecommendError::NotFound("Unknown Title".to_string()));
    assert_eq!(err.code(), "NOT_FOUND");
}

#[test]
fn free_functions_use_default_count() {
    let index = tag_recommender::initialize(&catalog(), &RecommenderConfig::default()).unwrap();
    assert_eq!(tag_recommender::recommend(&index, "Titanic").unwrap().len(), 4);
}

#[test]
fn rebuild_is_deterministic() {
    let a = build();
    let b = build();
    assert_eq!(a.vocabulary(), b.vocabulary());
    assert_eq!(a.vectors(), b.vectors());
    assert_eq!(a.similarity(), b.similarity());
    for title in a.titles() {
        assert_eq!(a.recommend(title, 3).unwrap(), b.recommend(title, 3).unwrap());
    }
}

#[test]
fn concurrent_readers_agree() {
    let index = Arc::new(build());
    let expected = index.recommend("Aliens", 3).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            thread::spawn(move || index.recommend("Aliens", 3).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn malformed_item_is_excluded_not_fatal() {
    let mut items = catalog();
    items[2].cast = Some("[{'name': 'Kate Winslet'}]".to_string());
    let index = RecommendationIndex::initialize(&items, &RecommenderConfig::default()).unwrap();
    assert_eq!(index.len(), 4);
    assert!(matches!(
        index.report().excluded[0].error,
        MetadataError::Parse { field: "cast", .. }
    ));
    assert!(index.lookup("Titanic").is_err());
}

#[test]
fn all_items_excluded_fails_build() {
    let items: Vec<RawItem> = catalog()
        .into_iter()
        .map(|mut item| {
            item.overview = None;
            item
        })
        .collect();
    assert_eq!(
        RecommendationIndex::initialize(&items, &RecommenderConfig::default()).unwrap_err(),
        BuildError::EmptyCorpus { excluded: 5 }
    );
}

#[test]
fn small_vocabulary_config() {
    let config = RecommenderConfig {
        max_features: 3,
        ..RecommenderConfig::default()
    };
    let index = RecommendationIndex::initialize(&catalog(), &config).unwrap();
    assert_eq!(index.vocabulary().len(), 3);
    // "jamescameron" appears in three items, more than any other term
    assert!(index.vocabulary().contains("jamescameron"));
}

#[test]
fn catalog_decodes_from_json() {
    let json = r#"[{"movie_id": 7, "title": "X", "overview": "space", "genres": "[]",
        "keywords": "[]", "cast": "[]", "crew": "[]"}, {"title": "missing the rest"}]"#;
    let raw: Vec<RawItem> = serde_json::from_str(json).unwrap();
    let index = RecommendationIndex::initialize(&raw, &RecommenderConfig::default()).unwrap();
    assert_eq!(index.items()[0].id, 7);
    assert_eq!(index.report().excluded.len(), 1);
}

#[test]
fn bad_record_in_catalog_json_excludes_only_itself() {
    let json = r#"[
        {"id": 10, "title": "Native Genres", "overview": "space", "genres": [{"name": "Action"}],
         "keywords": "[]", "cast": "[]", "crew": "[]"},
        {"id": 11, "movie_id": 11, "title": "Both Ids", "overview": "space", "genres": "[]",
         "keywords": "[]", "cast": "[]", "crew": "[]"},
        {"movie_id": 12, "title": "Good", "overview": "space hero", "genres": "[]",
         "keywords": "[]", "cast": "[]", "crew": "[]"}
    ]"#;
    let records: Vec<serde_json::Value> = serde_json::from_str(json).unwrap();
    let index = RecommendationIndex::initialize_from_values(&records, &RecommenderConfig::default()).unwrap();
    assert_eq!(index.titles().collect::<Vec<_>>(), vec!["Good"]);
    let excluded: Vec<_> = index.report().excluded.iter().map(|e| e.title.as_deref()).collect();
    assert_eq!(excluded, vec![Some("Native Genres"), Some("Both Ids")]);
}
