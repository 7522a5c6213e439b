use serde::Serialize;
use shopfront_core::catalog::{seed_products, Catalog};
use shopfront_core::config::{AppConfig, LoadOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report(AppConfig::load(LoadOptions::default()).map_err(|e| e.to_string()));

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report(config: Result<AppConfig, String>) -> DoctorReport {
    let mut checks = Vec::new();

    match config {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_seed_catalog());
            checks.push(check_static_bundle(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error,
            });
            checks.push(check_seed_catalog());
            checks.push(DoctorCheck {
                name: "static_bundle",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_seed_catalog() -> DoctorCheck {
    match Catalog::new(seed_products()) {
        Ok(catalog) => DoctorCheck {
            name: "catalog_seed",
            status: CheckStatus::Pass,
            details: format!("{} products validated", catalog.len()),
        },
        Err(error) => DoctorCheck {
            name: "catalog_seed",
            status: CheckStatus::Fail,
            details: error.to_string(),
        },
    }
}

fn check_static_bundle(config: &AppConfig) -> DoctorCheck {
    let index = config.server.static_dir.join("index.html");
    if index.is_file() {
        DoctorCheck {
            name: "static_bundle",
            status: CheckStatus::Pass,
            details: format!("found `{}`", index.display()),
        }
    } else {
        DoctorCheck {
            name: "static_bundle",
            status: CheckStatus::Fail,
            details: format!(
                "`{}` is missing; SPA fallback will answer 404 until the frontend is built",
                index.display()
            ),
        }
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
