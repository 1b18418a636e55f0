//! `concertina simulate`: a tiling pass against an in-memory desktop.

use std::sync::Arc;

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output::{self, format_px};
use crate::config::{ConcertinaConfig, ConfigStore};
use crate::error::ConcertinaError;
use crate::tiling::{
    LayoutId, Pid, Rect, TilingManager, TilingResult, VirtualDesktop, WindowId, WindowInfo,
    WindowSource,
};

/// Owner of every simulated window.
const SIMULATED_PID: Pid = 1000;

/// Arguments for the simulate command.
#[derive(Args, Debug)]
#[command(after_long_help = r#"Examples:
  concertina simulate --windows 4                     # Four windows, first focused
  concertina simulate --windows 3 --fixed 2           # Window 2 cannot be resized
  concertina simulate --windows 3 --reject 3 --json   # Window 3 refuses the resize at runtime"#)]
pub struct SimulateArgs {
    /// Number of windows to open.
    #[arg(long, short = 'n', default_value_t = 3)]
    pub windows: u32,

    /// Window focused before tiling, 1-based.
    #[arg(long, short, default_value_t = 1)]
    pub focus: u32,

    /// Layout to use. Defaults to the configured default layout.
    #[arg(long, short)]
    pub layout: Option<LayoutId>,

    /// Windows that report themselves as not resizable.
    #[arg(long, value_name = "WINDOW")]
    pub fixed: Vec<u32>,

    /// Windows that claim to be resizable but refuse size changes.
    #[arg(long, value_name = "WINDOW")]
    pub reject: Vec<u32>,

    /// Monitor width in pixels.
    #[arg(long, default_value_t = 1920.0)]
    pub width: f64,

    /// Monitor height in pixels.
    #[arg(long, default_value_t = 1080.0)]
    pub height: f64,

    /// Output in JSON format instead of a table.
    #[arg(long, short = 'j')]
    pub json: bool,
}

/// Where a simulated window ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedWindow {
    pub window_id: WindowId,
    pub frame: Rect,
    pub resizable: bool,
    pub focused: bool,
    /// 1 is frontmost.
    pub stack_position: usize,
}

/// Outcome of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub layout: LayoutId,
    pub result: TilingResult,
    pub windows: Vec<SimulatedWindow>,
    /// Windows reclassified as fixed after refusing a resize.
    pub rejected: Vec<WindowId>,
}

/// Runs the simulation on a fresh single-threaded runtime.
///
/// # Errors
///
/// Returns an error for invalid arguments or when the runtime cannot start.
pub fn run(args: &SimulateArgs, store: &ConfigStore) -> Result<SimulationReport, ConcertinaError> {
    if args.windows == 0 {
        return Err(ConcertinaError::InvalidArguments("window count must be at least 1".into()));
    }
    if args.focus == 0 || args.focus > args.windows {
        return Err(ConcertinaError::InvalidArguments(format!(
            "focus must be between 1 and {}",
            args.windows
        )));
    }

    let mut config: ConcertinaConfig = (*store.snapshot()).clone();
    if let Some(layout) = args.layout {
        config.tiling.default_layout = layout;
    }

    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    runtime.block_on(simulate(args, config))
}

async fn simulate(
    args: &SimulateArgs,
    config: ConcertinaConfig,
) -> Result<SimulationReport, ConcertinaError> {
    let layout = config.tiling.default_layout;
    let desktop = Arc::new(VirtualDesktop::with_single_monitor(args.width, args.height));

    for id in 1..=args.windows {
        let offset = f64::from(id) * 40.0;
        let window = WindowInfo::new(
            WindowId(id),
            SIMULATED_PID,
            format!("Window {id}"),
            Rect::new(offset, offset, 800.0, 600.0),
        )
        .with_resizable(!args.fixed.contains(&id));
        desktop.open_window(window);
        if args.reject.contains(&id) {
            desktop.reject_resize(WindowId(id));
        }
    }
    desktop.activate(WindowId(args.focus));

    let manager = TilingManager::new(
        desktop.clone(),
        desktop.clone(),
        desktop.clone(),
        Arc::new(ConfigStore::new(config)),
    );
    let result = manager
        .start()
        .await
        .ok_or_else(|| ConcertinaError::TilingError("tiling manager already running".into()))?;
    manager.stop();

    let z_order = desktop.z_order();
    let focused = desktop.focused_window().map(|f| f.id);
    let windows = desktop
        .visible_windows()
        .into_iter()
        .map(|window| SimulatedWindow {
            window_id: window.id,
            frame: window.frame,
            resizable: window.is_resizable,
            focused: focused == Some(window.id),
            stack_position: z_order.iter().rev().position(|&id| id == window.id).map_or(0, |i| i + 1),
        })
        .collect();

    let mut rejected: Vec<WindowId> = manager.rejected_windows().into_iter().collect();
    rejected.sort_by_key(|id| id.0);

    Ok(SimulationReport { layout, result, windows, rejected })
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the simulation cannot run.
pub fn execute(args: &SimulateArgs, store: &ConfigStore) -> Result<(), ConcertinaError> {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Window")]
        window: String,
        #[tabled(rename = "X")]
        x: String,
        #[tabled(rename = "Y")]
        y: String,
        #[tabled(rename = "Width")]
        width: String,
        #[tabled(rename = "Height")]
        height: String,
        #[tabled(rename = "Stack")]
        stack: usize,
        #[tabled(rename = "Resizable")]
        resizable: String,
        #[tabled(rename = "Focused")]
        focused: String,
    }

    let report = run(args, store)?;
    if args.json {
        return output::print_json(&report);
    }

    let rows: Vec<Row> = report
        .windows
        .iter()
        .map(|w| Row {
            window: w.window_id.to_string(),
            x: format_px(w.frame.x),
            y: format_px(w.frame.y),
            width: format_px(w.frame.width),
            height: format_px(w.frame.height),
            stack: w.stack_position,
            resizable: output::format_bool(w.resizable),
            focused: output::format_bool(w.focused),
        })
        .collect();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..6)).with(Alignment::right()))
        .with(Modify::new(Columns::new(6..8)).with(Alignment::center()))
        .to_string();

    let status = match &report.result {
        TilingResult::Success(placed) => format!("success, {placed} placed").green(),
        TilingResult::NoWindowsToTile => "nothing to tile".dimmed(),
        TilingResult::Cancelled => "cancelled".yellow(),
        TilingResult::Failed(reason) => format!("failed: {reason}").red(),
    };
    println!("{} {status}", format!("Layout {}:", report.layout).bold());
    println!("{table}");
    if !report.rejected.is_empty() {
        let ids: Vec<String> = report.rejected.iter().map(ToString::to_string).collect();
        println!("{} {}", "Treated as fixed after rejecting a resize:".dimmed(), ids.join(", "));
    }
    Ok(())
}
