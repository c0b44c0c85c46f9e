mod common;

use std::collections::HashSet;
use std::sync::Arc;

use shortlink_core::domain::repositories::LinkStore;
use shortlink_core::error::Error;

#[tokio::test]
async fn test_shorten_assigns_tokens_from_row_ids() {
    let (_, service) = common::memory_service();

    let first = service.shorten("https://example.com/a").await.unwrap();
    let second = service.shorten("https://example.com/b").await.unwrap();

    assert_eq!(first, common::public_url("1"));
    assert_eq!(second, common::public_url("2"));
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let (store, service) = common::memory_service();

    let first = service.shorten("https://example.com/page").await.unwrap();
    let second = service.shorten("https://example.com/page").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(store.count_by_token("1").await.unwrap(), 1);
}

#[tokio::test]
async fn test_shorten_skips_tokens_taken_by_custom_links() {
    let (_, service) = common::memory_service();

    // Row id 1 claims the token "3", which row id 3 would otherwise get.
    let promo = service
        .shorten_by_custom("https://example.com/promo", "3")
        .await
        .unwrap();
    assert_eq!(promo, common::public_url("3"));

    service.shorten("https://example.com/second").await.unwrap();
    let third = service.shorten("https://example.com/third").await.unwrap();

    assert_eq!(third, common::public_url("3+a"));
    assert_eq!(
        service.lengthen("3").await.unwrap(),
        "https://example.com/promo"
    );
    assert_eq!(
        service.lengthen("3+a").await.unwrap(),
        "https://example.com/third"
    );
}

#[tokio::test]
async fn test_shorten_reports_exhaustion_and_keeps_the_placeholder() {
    let (store, service) = common::memory_service();

    // Rows 1-27 claim every candidate row 28 could derive from its id.
    let candidates =
        std::iter::once("s".to_string()).chain(('a'..='z').map(|suffix| format!("s+{suffix}")));
    for (i, token) in candidates.enumerate() {
        service
            .shorten_by_custom(&format!("https://example.com/filler/{i}"), &token)
            .await
            .unwrap();
    }

    let result = service.shorten("https://example.com/unlucky").await;
    assert!(matches!(result, Err(Error::AllocationExhausted { id }) if id == 28));

    // The placeholder row survives, and a retry resumes it instead of
    // inserting a second row.
    let placeholder = store
        .find_by_url("https://example.com/unlucky")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(placeholder.id, 28);
    assert!(placeholder.resolved_token.is_none());

    let retry = service.shorten("https://example.com/unlucky").await;
    assert!(matches!(retry, Err(Error::AllocationExhausted { id }) if id == 28));
}

#[tokio::test]
async fn test_custom_token_conflicts_do_not_steal_the_mapping() {
    let (store, service) = common::memory_service();

    service
        .shorten_by_custom("https://x.example", "abc")
        .await
        .unwrap();

    // A leftover placeholder, as if an earlier call failed before resolving.
    let placeholder = store.insert_placeholder("https://y.example").await.unwrap();

    let conflict = service.shorten_by_custom("https://y.example", "abc").await;
    assert!(matches!(conflict, Err(Error::TokenAlreadyTaken { token }) if token == "abc"));
    assert_eq!(service.lengthen("abc").await.unwrap(), "https://x.example");

    // The placeholder survives the conflict and is resumed on retry.
    let retried = service
        .shorten_by_custom("https://y.example", "xyz")
        .await
        .unwrap();
    assert_eq!(retried, common::public_url("xyz"));

    let resolved = store
        .find_by_url("https://y.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, placeholder.id);
}

#[tokio::test]
async fn test_custom_conflict_for_a_new_url_inserts_nothing() {
    let (store, service) = common::memory_service();
    service
        .shorten_by_custom("https://x.example", "abc")
        .await
        .unwrap();

    let conflict = service.shorten_by_custom("https://y.example", "abc").await;

    // The taken-token check runs before the insert, so no row is created.
    assert!(matches!(conflict, Err(Error::TokenAlreadyTaken { .. })));
    assert!(
        store
            .find_by_url("https://y.example")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_custom_is_idempotent_per_url() {
    let (_, service) = common::memory_service();

    let first = service
        .shorten_by_custom("https://example.com/page", "promo")
        .await
        .unwrap();
    let second = service
        .shorten_by_custom("https://example.com/page", "other")
        .await
        .unwrap();

    // The stored mapping wins over the newly requested token.
    assert_eq!(first, common::public_url("promo"));
    assert_eq!(second, first);
}

#[tokio::test]
async fn test_lengthen_counts_referrals() {
    let (store, service) = common::memory_service();
    service.shorten("https://example.com/page").await.unwrap();

    for _ in 0..5 {
        let url = service.lengthen("1").await.unwrap();
        assert_eq!(url, "https://example.com/page");
    }

    let record = store.find_by_token("1").await.unwrap().unwrap();
    assert_eq!(record.referral_count, 5);
}

#[tokio::test]
async fn test_lengthen_rejects_unknown_and_blank_tokens() {
    let (_, service) = common::memory_service();

    let missing = service.lengthen("missing").await;
    assert!(matches!(missing, Err(Error::NotFound { token }) if token == "missing"));

    let blank = service.lengthen("   ").await;
    assert!(matches!(blank, Err(Error::NotFound { .. })));
}

#[tokio::test]
async fn test_shorten_rejects_blank_and_numeric_urls() {
    let (_, service) = common::memory_service();

    for input in ["", "   ", "12345", "12.5", "1e5", "-3"] {
        let result = service.shorten(input).await;
        assert!(
            matches!(result, Err(Error::InvalidUrl { .. })),
            "expected rejection for {input:?}"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shortens_assign_distinct_tokens() {
    common::init_tracing();
    let (_, service) = common::memory_service();
    let service = Arc::new(service);

    // Rows 1-3 hold the base encodings of rows 4-6, forcing part of the
    // concurrent batch through the suffix fallback.
    for (i, taken) in ["4", "5", "6"].into_iter().enumerate() {
        service
            .shorten_by_custom(&format!("https://example.com/seed/{i}"), taken)
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for i in 0..20 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/page/{i}");
            let short = service.shorten(&url).await.unwrap();
            (url, short)
        }));
    }

    let mut tokens = HashSet::new();
    for handle in handles {
        let (url, short) = handle.await.unwrap();
        let token = short.rsplit('/').next().unwrap().to_string();
        assert!(tokens.insert(token.clone()), "token assigned twice: {short}");
        assert_eq!(service.lengthen(&token).await.unwrap(), url);
    }
    assert_eq!(tokens.len(), 20);
    for forced in ["4+a", "5+a", "6+a"] {
        assert!(tokens.contains(forced), "expected a suffixed token {forced}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_shortens_of_one_url_agree() {
    common::init_tracing();
    let (store, service) = common::memory_service();
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.shorten("https://example.com/shared").await.unwrap()
        }));
    }

    let mut urls = HashSet::new();
    for handle in handles {
        urls.insert(handle.await.unwrap());
    }

    assert_eq!(urls.len(), 1);
    assert_eq!(store.count_by_token("1").await.unwrap(), 1);
}
