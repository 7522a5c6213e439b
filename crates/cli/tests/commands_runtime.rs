use std::env;
use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::sync::{mpsc, Mutex, OnceLock};
use std::thread;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use shopfront_cli::commands::{config, doctor, products};
use shopfront_core::catalog::{seed_products, Catalog};
use shopfront_core::{Product, ProductId};
use shopfront_view::LOAD_FAILED_MESSAGE;
use tempfile::TempDir;

#[test]
fn config_reports_defaults_with_source_attribution() {
    with_env(&[], || {
        let result = config::run(false);
        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("- server.port = 7239 (source: default)"));
        assert!(result
            .output
            .contains("cors allow-list: http://localhost:4200, https://localhost:4200"));
    });
}

#[test]
fn config_json_includes_frontend_url_in_allow_list() {
    with_env(&[("SHOPFRONT_FRONTEND_URL", "https://shop.example.com")], || {
        let result = config::run(true);
        assert_eq!(result.exit_code, 0);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["cors"]["frontend_url"], "https://shop.example.com");
        assert_eq!(payload["allowed_origins"][2], "https://shop.example.com");
        assert_eq!(payload["server"]["port"], 7239);
    });
}

#[test]
fn config_returns_validation_failure_for_bad_port() {
    with_env(&[("SHOPFRONT_SERVER_PORT", "not-a-port")], || {
        let result = config::run(false);
        assert_eq!(result.exit_code, 2, "expected config validation failure code");

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn doctor_passes_when_static_bundle_is_present() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("index.html"), "<html></html>").expect("write index");
    let static_dir = dir.path().display().to_string();

    with_env(&[("SHOPFRONT_SERVER_STATIC_DIR", static_dir.as_str())], || {
        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(payload["checks"].as_array().map(Vec::len), Some(3));
    });
}

#[test]
fn doctor_flags_missing_static_bundle() {
    let dir = TempDir::new().expect("temp dir");
    let static_dir = dir.path().join("dist").display().to_string();

    with_env(&[("SHOPFRONT_SERVER_STATIC_DIR", static_dir.as_str())], || {
        let output = doctor::run(false);
        assert!(output.starts_with("doctor: one or more readiness checks failed"));
        assert!(output.contains("- [fail] static_bundle"));
        assert!(output.contains("- [ok] catalog_seed: 5 products validated"));
    });
}

#[test]
fn products_lists_catalog_from_running_service() {
    let base_url = spawn_catalog_service();

    with_env(&[], || {
        let result = products::run(None, Some(base_url.clone()));
        assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);

        let lines: Vec<&str> = result.output.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Laptop"));
        assert!(lines[1].contains("$999.99"));
        assert!(lines[5].contains("USB-C Hub"));
    });
}

#[test]
fn products_shows_single_product_by_id() {
    let base_url = spawn_catalog_service();

    with_env(&[("SHOPFRONT_CLIENT_API_BASE_URL", base_url.as_str())], || {
        let result = products::run(Some(3), None);
        assert_eq!(result.exit_code, 0, "unexpected output: {}", result.output);
        assert!(result.output.contains("Keyboard"));
        assert!(result.output.contains("$129.99"));
        assert!(!result.output.contains("Laptop"));
    });
}

#[test]
fn products_reports_not_found_for_unknown_id() {
    let base_url = spawn_catalog_service();

    with_env(&[], || {
        let result = products::run(Some(999), Some(base_url.clone()));
        assert_eq!(result.exit_code, 4);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "products");
        assert_eq!(payload["error_class"], "not_found");
        assert_eq!(payload["message"], "product 999 not found");
    });
}

#[test]
fn products_reports_fixed_message_when_service_is_down() {
    let base_url = unreachable_base_url();

    with_env(&[], || {
        let listing = products::run(None, Some(base_url.clone()));
        assert_eq!(listing.exit_code, 3);
        assert_eq!(listing.output.trim_end(), format!("Error: {LOAD_FAILED_MESSAGE}"));

        let lookup = products::run(Some(1), Some(base_url.clone()));
        assert_eq!(lookup.exit_code, 3);
        let payload = parse_payload(&lookup.output);
        assert_eq!(payload["error_class"], "service_unreachable");
        assert_eq!(payload["message"], LOAD_FAILED_MESSAGE);
    });
}

#[test]
fn products_rejects_blank_api_base_url() {
    with_env(&[], || {
        let result = products::run(None, Some("   ".to_string()));
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "config_validation");
    });
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid json")
}

// The command builds its own runtime, so the stub service lives on a separate thread.
fn spawn_catalog_service() -> String {
    let (tx, rx) = mpsc::channel::<SocketAddr>();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("service runtime");
        runtime.block_on(async move {
            let catalog = Catalog::new(seed_products()).expect("seed catalog");
            let list = catalog.all().to_vec();
            let app = Router::new()
                .route("/api/products", get(move || async move { Json(list) }))
                .route(
                    "/api/products/{id}",
                    get(move |Path(id): Path<i32>| async move {
                        catalog
                            .find(ProductId(id))
                            .cloned()
                            .map(Json::<Product>)
                            .ok_or(StatusCode::NOT_FOUND)
                    }),
                );

            let listener =
                tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub service");
            tx.send(listener.local_addr().expect("local addr")).expect("send address");
            axum::serve(listener, app).await.expect("serve stub catalog");
        });
    });

    let addr = rx.recv().expect("stub service address");
    format!("http://{addr}")
}

fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard = ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap_or_else(|e| e.into_inner());

    let keys = [
        "SHOPFRONT_SERVER_BIND_ADDRESS",
        "SHOPFRONT_SERVER_PORT",
        "SHOPFRONT_SERVER_STATIC_DIR",
        "SHOPFRONT_SERVER_GRACEFUL_SHUTDOWN_SECS",
        "SHOPFRONT_ENVIRONMENT",
        "SHOPFRONT_FRONTEND_URL",
        "SHOPFRONT_CLIENT_API_BASE_URL",
        "SHOPFRONT_LOGGING_LEVEL",
        "SHOPFRONT_LOGGING_FORMAT",
        "SHOPFRONT_LOG_LEVEL",
        "SHOPFRONT_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
