use bookshelf::config::{Config, DEFAULT_BIND_ADDR};
use secrecy::ExposeSecret;

// Environment variables are process-wide, so every case runs in one test.
#[test]
fn config_from_env() {
    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("BIND_ADDR");
    }
    let result = Config::from_env();
    assert!(matches!(result, Err(bookshelf::error::Error::Config(_))));

    unsafe {
        std::env::set_var("DATABASE_URL", "sqlite://books.db");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.database_url.expose_secret(), "sqlite://books.db");
    assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
    assert!(!config.log_level.is_empty());

    unsafe {
        std::env::set_var("BIND_ADDR", "0.0.0.0:8080");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.bind_addr, "0.0.0.0:8080");

    unsafe {
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("BIND_ADDR");
    }
}
