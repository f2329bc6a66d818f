use fontshelf_core::catalog::{Catalog, Category, WritingSystem};
use fontshelf_core::error::CriteriaError;
use fontshelf_core::reveal::ScrollMetrics;
use fontshelf_core::session::{RevealReset, Session, SessionConfig, ViewMode};

/// Simulated page: each visible card is 300 units tall, viewport is 900.
fn metrics_for(session: &Session, scroll_offset: f64) -> ScrollMetrics {
    let content = session.visible().len() as f64 * 300.0;
    ScrollMetrics::new(900.0, scroll_offset, content)
}

#[test_log::test]
fn scrolling_to_the_bottom_reveals_the_whole_catalog() {
    let mut session = Session::new(Catalog::sample());
    let mut grew = 0;

    for _ in 0..50 {
        let bottom = metrics_for(&session, f64::MAX / 4.0);
        if session.on_scroll(bottom) {
            grew += 1;
        }
    }

    assert_eq!(grew, 3);
    assert_eq!(session.reveal_limit(), 30);
    assert_eq!(session.visible().len(), 30);
}

#[test_log::test]
fn burst_of_signals_never_overshoots() {
    let mut session = Session::new(Catalog::sample());
    let signal = ScrollMetrics::new(900.0, 10_000.0, 10_500.0);

    for _ in 0..1_000 {
        session.on_scroll(signal);
        assert!(session.reveal_limit() <= session.catalog().len());
    }
    assert_eq!(session.reveal_limit(), 30);
}

#[test_log::test]
fn narrowed_filter_inherits_shared_limit_by_default() {
    let mut session = Session::new(Catalog::sample());
    session.reveal_more();
    session.reveal_more();

    session.set_category(Category::Monospace);
    session.set_writing_system(WritingSystem::Chinese);

    assert_eq!(session.reveal_limit(), 28);
    assert!(session
        .visible()
        .iter()
        .all(|r| r.category == Category::Monospace && r.supports(WritingSystem::Chinese)));
    assert!(!session.projection().has_more());
}

#[test_log::test]
fn opt_in_reset_restarts_incremental_loading() {
    let config = SessionConfig {
        reveal_reset: RevealReset::OnFilterChange,
        ..SessionConfig::default()
    };
    let mut session = Session::with_config(Catalog::sample(), config).expect("session");
    session.reveal_more();
    session.set_view_mode(ViewMode::List);
    assert_eq!(session.reveal_limit(), 20, "view mode is not a filter");

    session.set_query("sans");
    assert_eq!(session.reveal_limit(), 12);
    assert!(session.visible().iter().all(|r| r.name.contains("Sans")));
}

#[test]
fn session_config_reads_partial_json() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"reveal_step": 4, "reveal_reset": "on_filter_change"}"#)
            .expect("config");
    assert_eq!(config.reveal_step, 4);
    assert_eq!(config.reveal_reset, RevealReset::OnFilterChange);
    assert_eq!(config.initial_reveal, 12);
}

#[test]
fn zero_initial_reveal_is_rejected() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"initial_reveal": 0}"#).expect("config");
    let err = Session::with_config(Catalog::sample(), config).unwrap_err();
    assert_eq!(err, CriteriaError::ZeroRevealLimit);
}

#[test]
fn custom_initial_reveal_starts_positive() {
    let config = SessionConfig {
        initial_reveal: 1,
        ..SessionConfig::default()
    };
    let session = Session::with_config(Catalog::sample(), config).expect("session");
    assert_eq!(session.reveal_limit(), 1);
    assert_eq!(session.visible().len(), 1);
}
