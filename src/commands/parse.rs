//! `tagsel parse` command - show the structure of a selector expression

use tagsel_core::config::SelectorConfig;
use tagsel_core::error::Result;
use tagsel_core::format::{escape_quotes, OutputFormat};
use tagsel_core::selector::{ParseReport, SelectorClause};

use crate::cli::Cli;
use crate::commands::{describe_rejected, rejected_json};

/// Execute the parse command
pub fn execute(cli: &Cli, config: &SelectorConfig, expression: Option<&str>) -> Result<()> {
    let report = config.parse_selector(expression);
    let expression = expression.unwrap_or(&config.expression);

    match cli.format {
        OutputFormat::Human => output_human(cli, &report),
        OutputFormat::Json => output_json(expression, &report)?,
        OutputFormat::Records => output_records(&report),
    }

    Ok(())
}

fn output_human(cli: &Cli, report: &ParseReport) {
    let selector = &report.selector;

    if selector.is_empty() {
        println!("selector: (empty, matches nothing)");
    } else {
        println!("selector: {}", selector);
    }

    print_clauses("include", selector.include().iter());
    if !selector.has_explicit_include() && !selector.is_empty() {
        println!("  (implicit)");
    }
    print_clauses("exclude", selector.exclude().iter());

    if !selector.parameters().is_empty() {
        println!("parameters:");
        for attachment in selector.parameters() {
            println!(
                "  {} {} [{}]",
                attachment.sign, attachment.clause, attachment.payload
            );
        }
    }

    if !report.rejected.is_empty() && !cli.quiet {
        println!("rejected:");
        for rejected in &report.rejected {
            println!("  {}", describe_rejected(rejected));
        }
    }
}

fn print_clauses<'a>(label: &str, clauses: impl ExactSizeIterator<Item = &'a SelectorClause>) {
    if clauses.len() == 0 {
        return;
    }
    println!("{}:", label);
    for clause in clauses {
        println!("  {}", clause);
    }
}

fn output_json(expression: &str, report: &ParseReport) -> Result<()> {
    let selector = &report.selector;
    let output = serde_json::json!({
        "expression": expression,
        "canonical": selector.to_string(),
        "include": selector.include(),
        "exclude": selector.exclude(),
        "parameters": selector.parameters(),
        "has_explicit_include": selector.has_explicit_include(),
        "available_modules": selector.available_modules(),
        "rejected": rejected_json(&report.rejected),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_records(report: &ParseReport) {
    let selector = &report.selector;
    println!(
        "H tagsel=1 records=1 mode=parse selector=\"{}\" include={} exclude={} parameters={} rejected={}",
        escape_quotes(&selector.to_string()),
        selector.include().len(),
        selector.exclude().len(),
        selector.parameters().len(),
        report.rejected.len()
    );
    for clause in selector.include() {
        println!("I {}", clause);
    }
    for clause in selector.exclude() {
        println!("X {}", clause);
    }
    for attachment in selector.parameters() {
        println!(
            "P {} {} \"{}\"",
            attachment.sign,
            attachment.clause,
            escape_quotes(&attachment.payload)
        );
    }
    for rejected in &report.rejected {
        println!("R {}", describe_rejected(rejected));
    }
}
