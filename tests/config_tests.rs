use rdietlogger::config::Config;
use rdietlogger::config::migrate::{fill_missing_keys, missing_keys};

#[test]
fn old_config_gets_defaults_for_new_keys() {
    let old = "database: /tmp/diet.sqlite\nseparator_char: \"=\"\n";

    let cfg = Config::from_yaml(old).expect("parse");
    assert_eq!(cfg.database, "/tmp/diet.sqlite");
    assert_eq!(cfg.default_user, 1);
    assert_eq!(cfg.catalog_page_size, 100);
    assert!(cfg.warn_unbound_achievements);
    assert_eq!(cfg.separator_char, "=");

    assert_eq!(
        missing_keys(old).expect("keys"),
        vec!["default_user", "catalog_page_size", "warn_unbound_achievements"]
    );
}

#[test]
fn migration_keeps_user_values() {
    let old = "database: /tmp/diet.sqlite\ncatalog_page_size: 0\n";

    let (updated, added) = fill_missing_keys(old).expect("migrate");
    assert_eq!(added.len(), 3);
    assert!(missing_keys(&updated).expect("keys").is_empty());

    let cfg = Config::from_yaml(&updated).expect("parse");
    assert_eq!(cfg.database, "/tmp/diet.sqlite");
    // zero is kept in the file but never used as a page size
    assert_eq!(cfg.catalog_page_size, 0);
    assert_eq!(cfg.page_size(), 1);
}
