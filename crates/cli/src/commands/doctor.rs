use agronova_core::config::{AppConfig, LoadOptions};
use agronova_core::weather::ClimateResolver;
use agronova_core::Catalog;
use agronova_db::{connect_with_settings, migrations};
use serde::Serialize;

use crate::commands::CommandResult;

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

const DEPENDENT_CHECKS: [&str; 5] = [
    "crop_catalog",
    "weather_provider",
    "chat_assistant",
    "database_connectivity",
    "database_schema",
];

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 1 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog(&config));
            checks.push(check_weather_provider(&config));
            checks.push(check_chat_assistant(&config));
            checks.extend(check_database(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.extend(DEPENDENT_CHECKS.iter().map(|name| DoctorCheck {
                name: *name,
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            }));
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

fn check_catalog(config: &AppConfig) -> DoctorCheck {
    let source = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "embedded".to_string());

    match Catalog::load(config.catalog.path.as_deref()) {
        Ok(catalog) => DoctorCheck {
            name: "crop_catalog",
            status: CheckStatus::Pass,
            details: format!("{} crops loaded from {source}", catalog.len()),
        },
        Err(error) => DoctorCheck {
            name: "crop_catalog",
            status: CheckStatus::Fail,
            details: format!("catalog from {source} is invalid: {error}"),
        },
    }
}

fn check_weather_provider(config: &AppConfig) -> DoctorCheck {
    match ClimateResolver::from_settings(config.live_weather_settings()) {
        Ok(resolver) => {
            let mode = if resolver.has_live_lookup() { "live lookup" } else { "offline only" };
            DoctorCheck {
                name: "weather_provider",
                status: CheckStatus::Pass,
                details: format!(
                    "{mode}; fallback chain: {}",
                    resolver.strategy_names().join(" -> ")
                ),
            }
        }
        Err(error) => DoctorCheck {
            name: "weather_provider",
            status: CheckStatus::Fail,
            details: format!("weather client could not be built: {error}"),
        },
    }
}

fn check_chat_assistant(config: &AppConfig) -> DoctorCheck {
    let details = if config.llm_enabled() {
        format!("llm model `{}` configured with canned fallback", config.llm.model)
    } else {
        "no llm api key; canned responder only".to_string()
    };
    DoctorCheck { name: "chat_assistant", status: CheckStatus::Pass, details }
}

fn check_database(config: &AppConfig) -> Vec<DoctorCheck> {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return vec![
                DoctorCheck {
                    name: "database_connectivity",
                    status: CheckStatus::Fail,
                    details: format!("failed to initialize async runtime: {error}"),
                },
                DoctorCheck {
                    name: "database_schema",
                    status: CheckStatus::Skipped,
                    details: "skipped because the database was not reachable".to_string(),
                },
            ];
        }
    };

    let result = runtime.block_on(async {
        let pool = connect_with_settings(
            &config.database.url,
            config.database.max_connections,
            config.database.timeout_secs,
        )
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

        let pending = migrations::pending_count(&pool).await;
        pool.close().await;
        Ok::<_, String>(pending)
    });

    match result {
        Ok(pending) => {
            let schema = match pending {
                Ok(0) => DoctorCheck {
                    name: "database_schema",
                    status: CheckStatus::Pass,
                    details: "all migrations applied".to_string(),
                },
                Ok(count) => DoctorCheck {
                    name: "database_schema",
                    status: CheckStatus::Fail,
                    details: format!("{count} pending migration(s); run `agronova migrate`"),
                },
                Err(error) => DoctorCheck {
                    name: "database_schema",
                    status: CheckStatus::Fail,
                    details: format!("failed to inspect migrations: {error}"),
                },
            };
            vec![
                DoctorCheck {
                    name: "database_connectivity",
                    status: CheckStatus::Pass,
                    details: format!("connected using `{}`", config.database.url),
                },
                schema,
            ]
        }
        Err(error) => vec![
            DoctorCheck { name: "database_connectivity", status: CheckStatus::Fail, details: error },
            DoctorCheck {
                name: "database_schema",
                status: CheckStatus::Skipped,
                details: "skipped because the database was not reachable".to_string(),
            },
        ],
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
