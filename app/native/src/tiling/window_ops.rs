//! The window positioning contract consumed by the animation engine.

use super::error::FrameError;
use super::state::{Pid, Rect, WindowId};

/// Moves, resizes and raises windows.
///
/// Calls may block on inter-process communication with the owning app, so
/// callers never hold a lock across them.
pub trait WindowOps: Send + Sync {
    /// Sets a window's frame.
    ///
    /// # Errors
    ///
    /// [`FrameError::SizeRejected`] when the window took the position but
    /// refused the size, [`FrameError::PositionFailed`] when it could not be
    /// moved.
    fn set_frame(&self, frame: Rect, window_id: WindowId, pid: Pid) -> Result<(), FrameError>;

    /// Brings a window to the front without moving keyboard focus.
    ///
    /// # Errors
    ///
    /// [`FrameError::PositionFailed`] when the window could not be raised.
    fn raise_window(&self, window_id: WindowId, pid: Pid) -> Result<(), FrameError>;

    /// Gives a window keyboard focus. Raising is the fallback for window
    /// systems that focus on raise.
    ///
    /// # Errors
    ///
    /// [`FrameError::PositionFailed`] when the window could not be focused.
    fn focus_window(&self, window_id: WindowId, pid: Pid) -> Result<(), FrameError> {
        self.raise_window(window_id, pid)
    }
}
