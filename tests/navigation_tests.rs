// =====================================================
// FILE: tests/navigation_tests.rs - BACK/FORWARD SEMANTICS
// =====================================================

use futures::FutureExt;
use page_history::{BasicPage, HistoryError, HistoryManager, Outcome, PageRef};
use std::sync::Arc;

fn page(url: &str) -> PageRef {
    BasicPage::new(url).into_ref()
}

fn same(a: &PageRef, b: &PageRef) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

async fn visit(history: &HistoryManager, urls: &[&str]) {
    for url in urls {
        assert_eq!(history.go(page(url)).unwrap().await.unwrap(), Outcome::Navigated);
    }
}

#[tokio::test]
async fn test_new_manager_is_empty() {
    let history = HistoryManager::new();
    assert!(history.current().is_none());
    assert_eq!(history.url(), None);
    assert!(!history.has_back());
    assert!(!history.has_forward());
    assert!(!history.is_busy());
}

#[tokio::test]
async fn test_go_loads_given_page() {
    let history = HistoryManager::new();

    history.go(page("first-page")).unwrap().await.unwrap();
    assert_eq!(history.url().as_deref(), Some("first-page"));
    assert!(!history.has_back());

    history.go(page("second-page")).unwrap().await.unwrap();
    assert_eq!(history.url().as_deref(), Some("second-page"));
    assert!(history.has_back());
    assert!(!history.has_forward());
    assert_eq!(history.back_urls(), vec!["first-page"]);
}

#[test]
fn test_go_without_setup_resolves_on_first_poll() {
    let history = HistoryManager::new();

    let first = history.go(page("first-page")).unwrap().now_or_never();
    assert!(matches!(first, Some(Ok(Outcome::Navigated))));
    assert_eq!(history.url().as_deref(), Some("first-page"));

    let back = history.back().now_or_never();
    assert!(matches!(back, Some(Ok(Outcome::EmptyStack))));
}

#[test]
fn test_works_outside_tokio() {
    let history = HistoryManager::new();
    tokio_test::block_on(async {
        visit(&history, &["a", "b"]).await;
        history.back().await.unwrap();
    });
    assert_eq!(history.url().as_deref(), Some("a"));
    assert!(history.has_forward());
}

#[tokio::test]
async fn test_go_rejects_page_without_url_at_call_site() {
    let history = HistoryManager::new();
    visit(&history, &["home"]).await;

    let err = history
        .go(BasicPage::without_url().into_ref())
        .err()
        .expect("refused before any future exists");
    assert!(matches!(err, HistoryError::MissingUrl));
    assert_eq!(history.url().as_deref(), Some("home"));
    assert!(!history.has_back());
    assert!(!history.is_busy());
}

#[tokio::test]
async fn test_empty_url_is_a_valid_page() {
    let history = HistoryManager::new();
    visit(&history, &["home", ""]).await;

    assert_eq!(history.url().as_deref(), Some(""));
    assert_eq!(history.back_urls(), vec!["home"]);

    history.back().await.unwrap();
    assert_eq!(history.forward_urls(), vec![""]);
    history.clear_forward(Some(""));
    assert!(!history.has_forward());
}

#[tokio::test]
async fn test_back_loads_previous_page() {
    let history = HistoryManager::new();
    visit(&history, &["first-page", "second-page"]).await;

    assert_eq!(history.back().await.unwrap(), Outcome::Navigated);
    assert_eq!(history.url().as_deref(), Some("first-page"));
    assert!(!history.has_back());
    assert!(history.has_forward());
    assert_eq!(history.forward_urls(), vec!["second-page"]);
}

#[tokio::test]
async fn test_back_then_forward_returns_same_page() {
    let history = HistoryManager::new();
    let second = page("second-page");
    history.go(page("first-page")).unwrap().await.unwrap();
    history.go(second.clone()).unwrap().await.unwrap();

    history.back().await.unwrap();
    assert_eq!(history.forward().await.unwrap(), Outcome::Navigated);

    assert_eq!(history.url().as_deref(), Some("second-page"));
    assert!(same(&history.current().unwrap(), &second));
    assert!(!history.has_forward());
    assert_eq!(history.back_urls(), vec!["first-page"]);
}

#[tokio::test]
async fn test_cancel_erases_current_page() {
    let history = HistoryManager::new();
    visit(&history, &["first-page", "second-page"]).await;

    assert_eq!(history.cancel().await.unwrap(), Outcome::Navigated);
    assert_eq!(history.url().as_deref(), Some("first-page"));
    assert!(!history.has_forward());
    assert!(!history.has_back());
}

#[tokio::test]
async fn test_go_clears_forward_history() {
    let history = HistoryManager::new();
    visit(&history, &["a", "b"]).await;
    history.back().await.unwrap();
    assert!(history.has_forward());

    history.go(page("c")).unwrap().await.unwrap();
    assert!(!history.has_forward());
    assert_eq!(history.back_urls(), vec!["a"]);
    assert_eq!(history.url().as_deref(), Some("c"));
}

#[tokio::test]
async fn test_boundaries_are_silent_noops() {
    let history = HistoryManager::new();
    assert_eq!(history.back().await.unwrap(), Outcome::EmptyStack);
    assert_eq!(history.cancel().await.unwrap(), Outcome::EmptyStack);
    assert_eq!(history.forward().await.unwrap(), Outcome::EmptyStack);
    assert_eq!(history.url(), None);

    visit(&history, &["only"]).await;
    let current = history.current().unwrap();
    assert_eq!(history.back().await.unwrap(), Outcome::EmptyStack);
    assert_eq!(history.forward().await.unwrap(), Outcome::EmptyStack);
    assert!(same(&history.current().unwrap(), &current));
    assert!(!history.has_back());
    assert!(!history.has_forward());
}

#[tokio::test]
async fn test_back_to_first_unwinds_everything() {
    let history = HistoryManager::new();
    visit(&history, &["a", "b", "c"]).await;

    assert_eq!(history.back_to_first().await.unwrap(), Outcome::Navigated);
    assert_eq!(history.url().as_deref(), Some("a"));
    assert!(!history.has_back());
    assert_eq!(history.forward_urls(), vec!["c", "b"]);

    history.forward().await.unwrap();
    assert_eq!(history.url().as_deref(), Some("b"));
}

#[tokio::test]
async fn test_back_to_first_at_start() {
    let history = HistoryManager::new();
    assert_eq!(history.back_to_first().await.unwrap(), Outcome::EmptyStack);

    visit(&history, &["a"]).await;
    assert_eq!(history.back_to_first().await.unwrap(), Outcome::EmptyStack);
    assert_eq!(history.url().as_deref(), Some("a"));
}

#[tokio::test]
async fn test_clear_forward_by_url_keeps_order() {
    let history = HistoryManager::new();
    visit(&history, &["root", "v", "w", "u"]).await;
    history.back().await.unwrap();
    history.back().await.unwrap();
    history.back().await.unwrap();
    assert_eq!(history.forward_urls(), vec!["u", "w", "v"]);

    history.clear_forward(Some("w"));
    assert_eq!(history.forward_urls(), vec!["u", "v"]);

    history.clear_forward(Some("missing"));
    assert_eq!(history.forward_urls(), vec!["u", "v"]);

    history.forward().await.unwrap();
    assert_eq!(history.url().as_deref(), Some("v"));
}

#[tokio::test]
async fn test_clear_forward_removes_every_match() {
    let history = HistoryManager::new();
    visit(&history, &["root", "dup", "other", "dup"]).await;
    history.back_to_first().await.unwrap();

    history.clear_forward(Some("dup"));
    assert_eq!(history.forward_urls(), vec!["other"]);

    history.clear_forward(None);
    assert!(!history.has_forward());
    assert_eq!(history.url().as_deref(), Some("root"));
}

#[tokio::test]
async fn test_duplicate_urls_are_separate_entries() {
    let history = HistoryManager::new();
    visit(&history, &["same", "same", "same"]).await;
    assert_eq!(history.back_len(), 2);

    history.back().await.unwrap();
    assert_eq!(history.url().as_deref(), Some("same"));
    assert_eq!(history.forward_len(), 1);
}
