use rtcal::core::cache::QueryCache;
use rtcal::core::mutations::{
    add_custom_issue, create_placeholder, delete_custom_issue, delete_placeholder,
    list_custom_issues, update_placeholder,
};
use rtcal::core::ports::PlaceholderStore;
use rtcal::db::migrate::applied_versions;
use rtcal::db::placeholders::resolve_placeholder_id;
use rtcal::db::pool::DbPool;
use rtcal::db::users::{clear_api_key, get_api_key, mask_api_key, set_api_key, user_exists};
use rtcal::errors::AppError;
use rtcal::models::placeholder::{NewPlaceholder, PlaceholderPatch};
use rtcal::models::placeholder_kind::PlaceholderKind;
use rtcal::session::Session;

mod common;
use common::d;

fn vacation(day: chrono::NaiveDate) -> NewPlaceholder {
    NewPlaceholder::with_default_duration(PlaceholderKind::Vacation, day)
}

#[test]
fn test_migrations_are_recorded_once() {
    let pool = DbPool::in_memory().unwrap();
    let versions = applied_versions(&pool.conn).unwrap();
    assert_eq!(versions.len(), 3);

    let again = rtcal::db::migrate::run_pending_migrations(&pool.conn, true).unwrap();
    assert_eq!(again, 0);
}

#[test]
fn test_placeholders_are_listed_per_owner_and_window() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);
    let bob = Session::for_user("bob", None);

    create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 2, 12))).unwrap();
    create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 2, 5))).unwrap();
    create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 4, 1))).unwrap();
    create_placeholder(&pool, &cache, &bob, &vacation(d(2024, 2, 6))).unwrap();

    let window = rtcal::core::range::compute_visible_window(d(2024, 2, 1));
    let listed = pool.list_placeholders("alice", &window).unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].date, d(2024, 2, 5));
    assert_eq!(listed[1].date, d(2024, 2, 12));
    assert!(listed.iter().all(|p| p.owner_id == "alice"));
    assert_eq!(listed[0].duration_hours, 8.0);
}

#[test]
fn test_foreign_placeholder_looks_missing() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);
    let bob = Session::for_user("bob", None);

    let created = create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 2, 5))).unwrap();

    let patch = PlaceholderPatch {
        duration_hours: Some(2.0),
        ..PlaceholderPatch::default()
    };
    let err = update_placeholder(&pool, &cache, &bob, &created.id, &patch).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = delete_placeholder(&pool, &cache, &bob, &created.id).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // still there for its owner
    delete_placeholder(&pool, &cache, &alice, &created.id).unwrap();
}

#[test]
fn test_placeholder_update_keeps_untouched_fields() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);

    let mut fields = NewPlaceholder::with_default_duration(PlaceholderKind::Doctor, d(2024, 2, 5));
    fields.note = Some("  dentist ".into());
    let created = create_placeholder(&pool, &cache, &alice, &fields).unwrap();
    assert_eq!(created.note.as_deref(), Some("dentist"));

    let patch = PlaceholderPatch {
        date: Some(d(2024, 2, 6)),
        ..PlaceholderPatch::default()
    };
    let updated = update_placeholder(&pool, &cache, &alice, &created.id, &patch).unwrap();

    assert_eq!(updated.date, d(2024, 2, 6));
    assert_eq!(updated.kind, PlaceholderKind::Doctor);
    assert_eq!(updated.duration_hours, 4.0);
    assert_eq!(updated.note.as_deref(), Some("dentist"));
}

#[test]
fn test_placeholder_hours_must_be_in_range() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);

    for hours in [0.0, -1.0, 24.5] {
        let mut fields = vacation(d(2024, 2, 5));
        fields.duration_hours = hours;
        let err = create_placeholder(&pool, &cache, &alice, &fields).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{hours}");
    }

    let mut full_day = vacation(d(2024, 2, 5));
    full_day.duration_hours = 24.0;
    assert!(create_placeholder(&pool, &cache, &alice, &full_day).is_ok());
}

#[test]
fn test_empty_patch_is_rejected() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);
    let created = create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 2, 5))).unwrap();

    let err = update_placeholder(&pool, &cache, &alice, &created.id, &PlaceholderPatch::default())
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_anonymous_session_cannot_mutate() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();

    let err = create_placeholder(&pool, &cache, &Session::anonymous(), &vacation(d(2024, 2, 5)))
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated));
}

#[test]
fn test_short_placeholder_ids_resolve() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);
    let created = create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 2, 5))).unwrap();

    let short: String = created.id.chars().take(8).collect();
    assert_eq!(resolve_placeholder_id(&pool, "alice", &short).unwrap(), created.id);
    assert!(matches!(
        resolve_placeholder_id(&pool, "bob", &short),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_like_wildcards_are_matched_literally() {
    let pool = DbPool::in_memory().unwrap();
    let cache = QueryCache::default();
    let alice = Session::for_user("alice", None);
    let created = create_placeholder(&pool, &cache, &alice, &vacation(d(2024, 2, 5))).unwrap();

    for pattern in ["%", "_", "%%", "____"] {
        assert!(
            matches!(
                resolve_placeholder_id(&pool, "alice", pattern),
                Err(AppError::NotFound(_))
            ),
            "{pattern}"
        );
    }
    assert_eq!(resolve_placeholder_id(&pool, "alice", &created.id).unwrap(), created.id);
}

#[test]
fn test_custom_issues_are_unique_per_owner() {
    let pool = DbPool::in_memory().unwrap();
    let alice = Session::for_user("alice", None);
    let bob = Session::for_user("bob", None);

    add_custom_issue(&pool, &alice, 186933, "Support rotation").unwrap();
    let err = add_custom_issue(&pool, &alice, 186933, "Again").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // another user may keep the same issue
    add_custom_issue(&pool, &bob, 186933, "Support rotation").unwrap();

    add_custom_issue(&pool, &alice, 42, "Meetings").unwrap();
    let listed = list_custom_issues(&pool, &alice).unwrap();
    let ids: Vec<u32> = listed.iter().map(|c| c.issue_id).collect();
    assert_eq!(ids, vec![42, 186933]);

    delete_custom_issue(&pool, &alice, 42).unwrap();
    assert!(matches!(
        delete_custom_issue(&pool, &alice, 42),
        Err(AppError::NotFound(_))
    ));
}

#[test]
fn test_custom_issue_input_is_validated() {
    let pool = DbPool::in_memory().unwrap();
    let alice = Session::for_user("alice", None);

    assert!(matches!(
        add_custom_issue(&pool, &alice, 0, "Zero"),
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        add_custom_issue(&pool, &alice, 7, "   "),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_api_keys_per_user() {
    let pool = DbPool::in_memory().unwrap();

    assert!(!user_exists(&pool.conn, "alice").unwrap());
    assert_eq!(get_api_key(&pool.conn, "alice").unwrap(), None);

    set_api_key(&pool.conn, "alice", "  abcdef123456 ").unwrap();
    assert!(user_exists(&pool.conn, "alice").unwrap());
    assert_eq!(
        get_api_key(&pool.conn, "alice").unwrap().as_deref(),
        Some("abcdef123456")
    );
    assert_eq!(get_api_key(&pool.conn, "bob").unwrap(), None);

    assert!(matches!(
        set_api_key(&pool.conn, "alice", " "),
        Err(AppError::Validation(_))
    ));

    assert!(clear_api_key(&pool.conn, "alice").unwrap());
    assert!(!clear_api_key(&pool.conn, "alice").unwrap());
    assert_eq!(get_api_key(&pool.conn, "alice").unwrap(), None);
}

#[test]
fn test_mask_api_key() {
    assert_eq!(mask_api_key("abcdef123456"), "********3456");
    assert_eq!(mask_api_key("abc"), "***");
}

#[test]
fn test_session_resolve_prefers_cli_user() {
    let pool = DbPool::in_memory().unwrap();
    set_api_key(&pool.conn, "carol", "secret-key").unwrap();
    let cfg = rtcal::config::Config {
        current_user: Some("dave".into()),
        ..rtcal::config::Config::default()
    };

    let session = Session::resolve(Some("carol"), &cfg, &pool).unwrap();
    assert_eq!(session.user_id(), Some("carol"));
    assert_eq!(session.api_key().unwrap(), "secret-key");

    let session = Session::resolve(None, &cfg, &pool).unwrap();
    assert_eq!(session.user_id(), Some("dave"));
    assert!(matches!(session.api_key(), Err(AppError::Config(_))));

    let cfg = rtcal::config::Config::default();
    let session = Session::resolve(None, &cfg, &pool).unwrap();
    assert_eq!(session.user_id(), None);
}
