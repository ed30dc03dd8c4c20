//! `tagsel select` command - run a selector over the tests of a manifest

use std::time::Instant;

use tagsel_core::config::SelectorConfig;
use tagsel_core::error::Result;
use tagsel_core::format::{records_list, OutputFormat};
use tagsel_core::instance::TestInstance;
use tagsel_core::manifest::Manifest;
use tagsel_core::selector::{Matcher, ParseReport};
use tagsel_core::trace_time;

use crate::cli::Cli;
use crate::commands::{describe_rejected, rejected_json};

/// A test together with the decision made for it
struct Outcome {
    test: TestInstance,
    selected: bool,
}

/// Execute the select command
pub fn execute(
    cli: &Cli,
    config: &SelectorConfig,
    manifest: &Manifest,
    expression: Option<&str>,
    all: bool,
    start: Instant,
) -> Result<()> {
    let registry = manifest.registry()?;
    trace_time!(start, "registry_built", classes = registry.len());

    let instances = manifest.instances(&registry)?;
    let report = config.parse_selector(expression);
    trace_time!(start, "selector_parsed", rejected = report.rejected.len());

    let matcher = Matcher::new(&report.selector).with_path_normalizer(config.path_normalizer());
    let outcomes: Vec<Outcome> = instances
        .into_iter()
        .map(|mut test| {
            let selected = matcher.matches(&mut test);
            Outcome { test, selected }
        })
        .collect();

    let selected_count = outcomes.iter().filter(|o| o.selected).count();
    tracing::debug!(
        total = outcomes.len(),
        selected = selected_count,
        "select"
    );
    trace_time!(start, "tests_matched", tests = outcomes.len());

    let shown: Vec<&Outcome> = outcomes.iter().filter(|o| all || o.selected).collect();

    match cli.format {
        OutputFormat::Human => output_human(cli, &report, &shown, selected_count, outcomes.len()),
        OutputFormat::Json => output_json(&report, &shown, selected_count, outcomes.len())?,
        OutputFormat::Records => output_records(&report, &shown, selected_count, outcomes.len()),
    }

    Ok(())
}

fn output_human(
    cli: &Cli,
    report: &ParseReport,
    shown: &[&Outcome],
    selected: usize,
    total: usize,
) {
    if !cli.quiet {
        for rejected in &report.rejected {
            eprintln!("warning: skipped selector {}", describe_rejected(rejected));
        }
    }

    for outcome in shown {
        let test = &outcome.test;
        let marker = if outcome.selected { "+" } else { "-" };
        let mut line = format!("{} {}", marker, test.display_name());
        if !test.selected_parameters.is_empty() {
            line.push_str(&format!(" [{}]", test.selected_parameters.join(", ")));
        }
        if !test.selected_modules.is_empty() {
            line.push_str(&format!(" ({})", test.selected_modules.join(", ")));
        }
        println!("{}", line);
    }

    if !cli.quiet {
        println!();
        println!("{} of {} tests selected", selected, total);
    }
}

fn output_json(
    report: &ParseReport,
    shown: &[&Outcome],
    selected: usize,
    total: usize,
) -> Result<()> {
    let tests: Vec<_> = shown
        .iter()
        .map(|outcome| {
            let test = &outcome.test;
            serde_json::json!({
                "test": test.display_name(),
                "module": test.module,
                "class": test.class_name,
                "method": test.method_name,
                "tags": test.tags,
                "selected": outcome.selected,
                "parameters": test.selected_parameters,
                "modules": test.selected_modules,
            })
        })
        .collect();

    let output = serde_json::json!({
        "selector": report.selector.to_string(),
        "total": total,
        "selected": selected,
        "tests": tests,
        "rejected": rejected_json(&report.rejected),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_records(report: &ParseReport, shown: &[&Outcome], selected: usize, total: usize) {
    println!(
        "H tagsel=1 records=1 mode=select total={} selected={} rejected={}",
        total,
        selected,
        report.rejected.len()
    );
    for outcome in shown {
        let test = &outcome.test;
        println!(
            "T {} selected={} params={} modules={}",
            test.display_name(),
            outcome.selected,
            records_list(&test.selected_parameters),
            records_list(&test.selected_modules)
        );
    }
    for rejected in &report.rejected {
        println!("R {}", describe_rejected(rejected));
    }
}
