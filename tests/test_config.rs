use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use alcove::config::Config;
use tempfile::TempDir;

// Environment variables are process-global; tests touching them take this
// lock so they cannot interleave.
fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn clear_env() {
    unsafe {
        std::env::remove_var("ALCOVE_CONFIG");
        std::env::remove_var("LISTEN");
        std::env::remove_var("DOCUMENT_ROOT");
    }
}

#[test]
fn test_config_defaults() {
    let _guard = env_lock().lock().unwrap();
    clear_env();

    let cfg = Config::load().unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.static_files.document_root, PathBuf::from("public"));
    assert_eq!(
        cfg.static_files.allowed_extensions,
        vec!["png", "pdf", "html"]
    );
}

#[test]
fn test_config_listen_override_from_env() {
    let _guard = env_lock().lock().unwrap();
    clear_env();
    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");

    clear_env();
}

#[test]
fn test_config_document_root_override_from_env() {
    let _guard = env_lock().lock().unwrap();
    clear_env();
    unsafe {
        std::env::set_var("DOCUMENT_ROOT", "/srv/www");
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.static_files.document_root, PathBuf::from("/srv/www"));

    clear_env();
}

#[test]
fn test_config_from_yaml_file() {
    let _guard = env_lock().lock().unwrap();
    clear_env();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "server:\n  listen_addr: \"0.0.0.0:9000\"\nstatic_files:\n  document_root: \"/srv/www\"\n  allowed_extensions: [\"html\"]\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var("ALCOVE_CONFIG", &path);
    }

    let cfg = Config::load().unwrap();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:9000");
    assert_eq!(cfg.static_files.document_root, PathBuf::from("/srv/www"));
    assert_eq!(cfg.static_files.allowed_extensions, vec!["html"]);

    clear_env();
}

#[test]
fn test_config_env_overrides_yaml_file() {
    let _guard = env_lock().lock().unwrap();
    clear_env();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "server:\n  listen_addr: \"0.0.0.0:9000\"\n").unwrap();

    unsafe {
        std::env::set_var("ALCOVE_CONFIG", &path);
        std::env::set_var("LISTEN", "127.0.0.1:4000");
    }

    let cfg = Config::load().unwrap();
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:4000");

    clear_env();
}

#[test]
fn test_config_clone() {
    let _guard = env_lock().lock().unwrap();
    clear_env();

    let cfg1 = Config::load().unwrap();
    let cfg2 = cfg1.clone();

    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
    assert_eq!(
        cfg1.static_files.document_root,
        cfg2.static_files.document_root
    );
}
