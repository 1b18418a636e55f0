//! `concertina keys`: the leader layer as compiled from configuration.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output;
use crate::config::ConfigStore;
use crate::error::ConcertinaError;
use crate::hotkey::compile_bindings;

/// Arguments for the keys command.
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// Output in JSON format instead of a table.
    #[arg(long, short = 'j')]
    pub json: bool,
}

/// One active binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRow {
    pub action: String,
    pub keys: String,
    pub stays_in_leader: bool,
}

/// The compiled leader layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysReport {
    pub enabled: bool,
    pub trigger: String,
    pub timeout_ms: u64,
    pub bindings: Vec<BindingRow>,
}

/// Compiles the configured bindings. Invalid entries are skipped.
///
/// # Errors
///
/// Returns an error when the trigger chord does not parse.
pub fn report(store: &ConfigStore) -> Result<KeysReport, ConcertinaError> {
    let config = store.snapshot();
    let keymap = compile_bindings(&config.leader)?;

    let bindings = keymap
        .bindings()
        .into_iter()
        .map(|(_, binding)| BindingRow {
            action: binding.id.clone(),
            keys: binding.keys.clone(),
            stays_in_leader: binding.stays_in_leader,
        })
        .collect();

    Ok(KeysReport {
        enabled: keymap.is_enabled(),
        trigger: config.leader.trigger.clone(),
        timeout_ms: config.leader.timeout_ms,
        bindings,
    })
}

/// Execute the keys command.
///
/// # Errors
///
/// Returns an error if the bindings cannot be compiled.
pub fn execute(args: &KeysArgs, store: &ConfigStore) -> Result<(), ConcertinaError> {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Keys")]
        keys: String,
        #[tabled(rename = "Action")]
        action: String,
        #[tabled(rename = "Stays")]
        stays: String,
    }

    let report = report(store)?;
    if args.json {
        return output::print_json(&report);
    }

    let timeout = if report.timeout_ms == 0 {
        "no timeout".to_string()
    } else {
        format!("{} ms timeout", report.timeout_ms)
    };
    let state = if report.enabled { "".normal() } else { " (disabled)".red() };
    println!("{}{state}", format!("Leader: {} ({timeout})", report.trigger).bold());

    if report.bindings.is_empty() {
        println!("{}", "No bindings configured.".dimmed());
        return Ok(());
    }

    let rows: Vec<Row> = report
        .bindings
        .iter()
        .map(|b| Row {
            keys: b.keys.clone(),
            action: b.action.clone(),
            stays: output::format_bool(b.stays_in_leader),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string();
    println!("{table}");
    Ok(())
}
