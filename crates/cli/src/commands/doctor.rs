use std::collections::BTreeSet;

use savora_core::catalog::load_store;
use savora_core::config::{AppConfig, LoadOptions};
use savora_core::{RecipeStore, SubstitutionTable};
use serde::Serialize;

use crate::commands::{CommandResult, EXIT_CONFIG, EXIT_DATASET};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Warn,
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

pub fn run(json_output: bool) -> CommandResult {
    let (report, exit_code) = build_report();

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

fn build_report() -> (DoctorReport, u8) {
    let mut checks = Vec::new();
    let mut exit_code = 0;

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            match load_store(&config.catalog) {
                Ok(store) => {
                    let source = config
                        .catalog
                        .dataset_path
                        .as_ref()
                        .map(|path| format!("`{}`", path.display()))
                        .unwrap_or_else(|| "bundled dataset".to_string());
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Pass,
                        details: format!("{} recipes loaded from {source}", store.len()),
                    });
                    checks.push(check_recipe_vocabulary(&store));
                }
                Err(error) => {
                    exit_code = EXIT_DATASET;
                    checks.push(DoctorCheck {
                        name: "dataset_load",
                        status: CheckStatus::Fail,
                        details: error.to_string(),
                    });
                    checks.push(skipped("tag_vocabulary", "dataset did not load"));
                }
            }
        }
        Err(error) => {
            exit_code = EXIT_CONFIG;
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(skipped("dataset_load", "configuration did not load"));
            checks.push(skipped("tag_vocabulary", "configuration did not load"));
        }
    }
    checks.push(check_substitution_table(&SubstitutionTable::bundled()));

    let failed = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let warned = checks.iter().any(|check| check.status == CheckStatus::Warn);
    let (overall_status, summary) = match (failed, warned) {
        (true, _) => (CheckStatus::Fail, "doctor: one or more readiness checks failed"),
        (false, true) => (CheckStatus::Pass, "doctor: checks passed with warnings"),
        (false, false) => (CheckStatus::Pass, "doctor: all readiness checks passed"),
    };

    (DoctorReport { overall_status, summary: summary.to_string(), checks }, exit_code)
}

fn check_recipe_vocabulary(store: &RecipeStore) -> DoctorCheck {
    let unknown: BTreeSet<String> = store
        .list_all()
        .iter()
        .flat_map(|recipe| {
            recipe.unknown_tags().into_iter().map(|tag| format!("{} ({})", tag, recipe.name))
        })
        .collect();

    if unknown.is_empty() {
        return DoctorCheck {
            name: "tag_vocabulary",
            status: CheckStatus::Pass,
            details: "every recipe tag is in the shared vocabulary".to_string(),
        };
    }

    DoctorCheck {
        name: "tag_vocabulary",
        status: CheckStatus::Warn,
        details: format!(
            "tags outside the vocabulary never match a query: {}",
            unknown.into_iter().collect::<Vec<_>>().join(", ")
        ),
    }
}

fn check_substitution_table(table: &SubstitutionTable) -> DoctorCheck {
    let unknown: BTreeSet<String> = table
        .rules()
        .flat_map(|rule| rule.tags.iter().filter(|tag| !tag.is_known()))
        .map(ToString::to_string)
        .collect();
    let rules = table.rules().count();

    if unknown.is_empty() {
        DoctorCheck {
            name: "substitution_table",
            status: CheckStatus::Pass,
            details: format!("{rules} rules across {} ingredients", table.len()),
        }
    } else {
        DoctorCheck {
            name: "substitution_table",
            status: CheckStatus::Warn,
            details: format!(
                "{rules} rules; tags outside the vocabulary: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

fn skipped(name: &'static str, reason: &str) -> DoctorCheck {
    DoctorCheck {
        name,
        status: CheckStatus::Skipped,
        details: format!("skipped because {reason}"),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Warn => "warn",
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
