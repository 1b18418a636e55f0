//! `concertina layout`: the layout engine on a synthetic monitor.

use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::cli::output::{self, format_px};
use crate::config::ConfigStore;
use crate::error::ConcertinaError;
use crate::tiling::layout::{self, Gaps, LayoutInput};
use crate::tiling::{LayoutId, Rect, WindowId, WindowInfo};

/// Frame given to the synthetic windows before layout.
const SEED_FRAME: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

/// Arguments for the layout command.
#[derive(Args, Debug)]
#[command(after_long_help = r#"Examples:
  concertina layout --windows 3                       # Accordion of three in monocle
  concertina layout --windows 5 --focus 3 --json      # Focus the third window
  concertina layout --windows 4 --layout grid-2x2     # Four quadrants"#)]
pub struct LayoutArgs {
    /// Number of windows to lay out.
    #[arg(long, short = 'n', default_value_t = 3)]
    pub windows: u32,

    /// Focused window, 1-based.
    #[arg(long, short, default_value_t = 1)]
    pub focus: u32,

    /// Layout to use. Defaults to the configured default layout.
    #[arg(long, short)]
    pub layout: Option<LayoutId>,

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

/// One computed window frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementRow {
    pub window_id: WindowId,
    pub container: usize,
    pub focused: bool,
    pub frame: Rect,
}

/// Deals `args.windows` windows round-robin into the layout's containers and
/// runs the engine on each container.
///
/// # Errors
///
/// Returns an error when the window count is zero or the focus is out of range.
pub fn compute(args: &LayoutArgs, store: &ConfigStore) -> Result<Vec<PlacementRow>, ConcertinaError> {
    if args.windows == 0 {
        return Err(ConcertinaError::InvalidArguments("window count must be at least 1".into()));
    }
    if args.focus == 0 || args.focus > args.windows {
        return Err(ConcertinaError::InvalidArguments(format!(
            "focus must be between 1 and {}",
            args.windows
        )));
    }

    let config = store.snapshot();
    let layout_id = args.layout.unwrap_or(config.tiling.default_layout);
    let monitor = Rect::new(0.0, 0.0, args.width, args.height);
    let frames = layout::container_frames(layout_id, &monitor, &Gaps::from_config(&config.tiling));
    let focused = WindowId(args.focus);

    let mut buckets: Vec<Vec<WindowInfo>> = vec![Vec::new(); frames.len()];
    for id in 1..=args.windows {
        let window = WindowInfo::new(WindowId(id), 0, format!("Window {id}"), SEED_FRAME);
        let index = (id as usize - 1) % frames.len();
        buckets[index].push(window);
    }

    let mut rows = Vec::new();
    for (index, (container, windows)) in frames.iter().zip(&buckets).enumerate() {
        let input = LayoutInput {
            windows,
            focused_window_id: Some(focused),
            container: *container,
            offset: config.tiling.accordion_offset,
            orientation: layout::orientation(layout_id),
        };
        rows.extend(layout::calculate(&input).into_iter().map(|placement| PlacementRow {
            window_id: placement.window_id,
            container: index + 1,
            focused: placement.window_id == focused,
            frame: placement.frame,
        }));
    }

    rows.sort_by_key(|row| row.window_id.0);
    Ok(rows)
}

/// Execute the layout command.
///
/// # Errors
///
/// Returns an error if the arguments are invalid.
pub fn execute(args: &LayoutArgs, store: &ConfigStore) -> Result<(), ConcertinaError> {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Window")]
        window: String,
        #[tabled(rename = "Container")]
        container: usize,
        #[tabled(rename = "X")]
        x: String,
        #[tabled(rename = "Y")]
        y: String,
        #[tabled(rename = "Width")]
        width: String,
        #[tabled(rename = "Height")]
        height: String,
        #[tabled(rename = "Focused")]
        focused: String,
    }

    let rows = compute(args, store)?;
    if args.json {
        return output::print_json(&rows);
    }

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| Row {
            window: row.window_id.to_string(),
            container: row.container,
            x: format_px(row.frame.x),
            y: format_px(row.frame.y),
            width: format_px(row.frame.width),
            height: format_px(row.frame.height),
            focused: output::format_bool(row.focused),
        })
        .collect();

    let table = Table::new(table_rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..6)).with(Alignment::right()))
        .with(Modify::new(Columns::last()).with(Alignment::center()))
        .to_string();

    println!("{}", format!("Placements ({})", rows.len()).bold());
    println!("{table}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn args(windows: u32, focus: u32, layout: LayoutId) -> LayoutArgs {
        LayoutArgs { windows, focus, layout: Some(layout), width: 1920.0, height: 1080.0, json: true }
    }

    #[test]
    fn test_monocle_accordion_of_three() {
        let rows = compute(&args(3, 2, LayoutId::Monocle), &ConfigStore::default()).unwrap();
        let xs: Vec<f64> = rows.iter().map(|r| r.frame.x).collect();
        assert_eq!(xs, vec![8.0, 40.0, 72.0]);
        assert!(rows[1].focused);
        assert!(rows.iter().all(|r| r.container == 1));
    }

    #[test]
    fn test_windows_are_dealt_round_robin() {
        let rows = compute(&args(4, 1, LayoutId::Columns2), &ConfigStore::default()).unwrap();
        let containers: Vec<usize> = rows.iter().map(|r| r.container).collect();
        assert_eq!(containers, vec![1, 2, 1, 2]);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let store = ConfigStore::default();
        assert!(compute(&args(0, 1, LayoutId::Monocle), &store).is_err());
        assert!(compute(&args(2, 3, LayoutId::Monocle), &store).is_err());
        assert!(compute(&args(2, 0, LayoutId::Monocle), &store).is_err());
    }
}
