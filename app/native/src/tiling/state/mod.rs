//! Tiling state model.
//!
//! - [`container`]: a ring of windows with a focus pointer
//! - [`monitor_state`]: the containers of one display and the operations on them
//! - [`tiling_state`]: the registry of monitor states
//! - [`types`]: identifiers, geometry and layout ids

pub mod container;
pub mod monitor_state;
pub mod tiling_state;
pub mod types;

pub use container::{Container, WindowIdList};
pub use monitor_state::MonitorTilingState;
pub use tiling_state::TilingState;
pub use types::{ContainerId, Direction, LayoutId, MonitorId, Orientation, Pid, Rect, WindowId};
