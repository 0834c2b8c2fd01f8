mod common;

use std::sync::Arc;

use common::*;
use lesson_gateway::{
    errors::AppError,
    models::domain::{Attachment, CacheEntry, GenerationRequest, GenerationResult, Level, Mode},
    repositories::CacheRepository,
    services::{cache_key::build_cache_key, response_parser::parse_response},
};

fn lesson(topic: &str) -> GenerationRequest {
    GenerationRequest::new(topic, Level::Beginner, "English", Mode::Lesson)
}

#[tokio::test]
async fn test_in_memory_cache_returns_oldest_duplicate() {
    let cache = InMemoryCacheRepository::new();
    let first = parse_response(&lesson_json("First"), Mode::Lesson).expect("lesson");
    let second = parse_response(&lesson_json("Second"), Mode::Lesson).expect("lesson");

    cache.insert(CacheEntry::new("k", first.clone())).await.unwrap();
    cache.insert(CacheEntry::new("k", second)).await.unwrap();

    let found = cache.find_by_key("k").await.unwrap().expect("entry");
    assert_eq!(found.value, first);
    assert_eq!(cache.count("k").await, 2);
    assert!(cache.find_by_key("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_preseeded_entry_short_circuits_provider() {
    let cache = Arc::new(InMemoryCacheRepository::new());
    let request = lesson("Photosynthesis");
    let cached = parse_response(&lesson_json("From cache"), Mode::Lesson).expect("lesson");
    cache
        .insert(CacheEntry::new(build_cache_key(&request), cached.clone()))
        .await
        .unwrap();

    let provider = Arc::new(FakeProvider::new());
    let service = service(cache.clone(), provider.clone(), None);

    let result = service.generate(request).await.expect("cached result");
    assert_eq!(result, cached);
    assert!(provider.called_models().is_empty());
}

#[tokio::test]
async fn test_knobs_produce_separate_cache_entries() {
    let cache = Arc::new(InMemoryCacheRepository::new());
    let provider = Arc::new(FakeProvider::new().reply(PRIMARY, Reply::Text(lesson_json("Tides"))));
    let service = service(cache.clone(), provider.clone(), None);

    service.generate(lesson("Tides")).await.expect("plain");
    service
        .generate(lesson("Tides").with_style("socratic"))
        .await
        .expect("styled");

    let mut keys = cache.keys().await;
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "tides-beginner-english-lesson-default-default-default".to_string(),
            "tides-beginner-english-lesson-socratic-default-default".to_string(),
        ]
    );
    assert_eq!(provider.called_models().len(), 2);
}

#[tokio::test]
async fn test_cache_outage_does_not_block_generation() {
    let cache = Arc::new(InMemoryCacheRepository::failing());
    let provider = Arc::new(FakeProvider::new().reply(PRIMARY, Reply::Text(quiz_json("Rivers"))));
    let service = service(cache, provider, None);

    let request = GenerationRequest::new("Rivers", Level::Expert, "French", Mode::Quiz);
    let result = service.generate(request).await.expect("generated");

    assert_eq!(result.mode(), Mode::Quiz);
    assert_eq!(result.title(), "Rivers");
}

#[tokio::test]
async fn test_wrong_mode_response_falls_through() {
    let cache = Arc::new(InMemoryCacheRepository::new());
    let provider = Arc::new(
        FakeProvider::new()
            .reply(PRIMARY, Reply::Text(quiz_json("Oops")))
            .reply(SECONDARY, Reply::Text(format!("```json\n{}\n```", lesson_json("Tides")))),
    );
    let service = service(cache.clone(), provider.clone(), None);

    let result = service.generate(lesson("Tides")).await.expect("lesson");

    assert!(matches!(result, GenerationResult::Lesson(ref l) if l.title == "Tides"));
    assert_eq!(provider.called_models(), vec![PRIMARY, SECONDARY]);
    assert_eq!(cache.total().await, 1);
}

#[tokio::test]
async fn test_attachment_request_never_writes_cache() {
    let cache = Arc::new(InMemoryCacheRepository::new());
    let provider = Arc::new(FakeProvider::new().reply(PRIMARY, Reply::Text(lesson_json("Notes"))));
    let service = service(cache.clone(), provider.clone(), None);

    let request = lesson("Notes").with_attachment(Attachment {
        bytes: b"%PDF-1.4".to_vec(),
        mime_type: "application/pdf".to_string(),
    });
    service.generate(request).await.expect("lesson");

    assert_eq!(cache.total().await, 0);
    assert_eq!(provider.attachment_flags(), vec![true]);
}

#[tokio::test]
async fn test_exhaustion_surfaces_last_failure() {
    let cache = Arc::new(InMemoryCacheRepository::new());
    let provider = Arc::new(
        FakeProvider::new()
            .reply(PRIMARY, Reply::Hang)
            .reply(SECONDARY, Reply::Hang)
            .reply(TEXT_ONLY, Reply::Text("{\"title\": \"half a lesson\"}".to_string())),
    );
    let service = service(cache.clone(), provider, None);

    let err = service.generate(lesson("Tides")).await.unwrap_err();

    match err {
        AppError::AllCandidatesExhausted(message) => assert!(message.contains(TEXT_ONLY)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(cache.total().await, 0);
}
