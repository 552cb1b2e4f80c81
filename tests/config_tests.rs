use rtcal::config::Config;
use rtcal::config::migrate::{migrate_config_file, missing_keys};
use rtcal::remote::fetcher::PagingPolicy;
use std::env;
use std::fs;

fn temp_config(name: &str, content: &str) -> std::path::PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{}_rtcal.conf", name));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_old_config_files_get_missing_keys() {
    let path = temp_config(
        "config_migrate",
        "database: /tmp/old.sqlite\nredmine_base_url: https://redmine.example.com\n",
    );

    let missing = missing_keys(&path).unwrap();
    assert!(missing.contains(&"page_size".to_string()));
    assert!(!missing.contains(&"database".to_string()));

    assert!(migrate_config_file(&path).unwrap());
    assert!(missing_keys(&path).unwrap().is_empty());
    assert!(!migrate_config_file(&path).unwrap());

    // existing values survive
    let cfg = Config::load_from(&path).unwrap();
    assert_eq!(cfg.database, "/tmp/old.sqlite");
    assert_eq!(
        cfg.redmine_base_url.as_deref(),
        Some("https://redmine.example.com")
    );
    assert_eq!(cfg.page_size, 100);
}

#[test]
fn test_partial_config_uses_defaults() {
    let path = temp_config("config_partial", "page_size: 500\nmax_pages: 0\n");
    let cfg = Config::load_from(&path).unwrap();

    assert_eq!(cfg.high_workload_hours, 6.0);
    assert_eq!(cfg.expected_daily_hours, 8.0);
    assert_eq!(cfg.default_activity, 9);
    assert!(cfg.base_url().is_err());

    // Redmine refuses more than 100 per page
    let paging = PagingPolicy::from_config(&cfg);
    assert_eq!(paging.page_size, 100);
    assert_eq!(paging.max_pages, 1);
}
