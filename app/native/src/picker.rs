//! Point acquisition.
//!
//! The user picks a point with `slurp`. It blocks until the user clicks, and
//! exits non-zero with no output when they press Escape instead.
//!
//! `slurp` prints `X,Y WxH`. In pixel mode the size is always `1x1`; in
//! rectangle mode the point used is the rectangle's top-left corner.

use std::process::Command;

use crate::error::WkillError;
use crate::tree::Point;
use crate::utils::command::resolve_binary;

/// Name of the point picker binary.
const SLURP_BINARY: &str = "slurp";

/// Transparent background so the screen is not dimmed while picking.
const BACKGROUND_COLOR: &str = "#00000000";

/// Selection border color.
const BORDER_COLOR: &str = "#ff0000ff";

/// How the user selects a point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// A single click selects one pixel.
    #[default]
    Pixel,
    /// The user drags a rectangle; its origin is the selected point.
    Rectangle,
}

/// Source of a screen point chosen by the user.
pub trait PointPicker {
    /// Blocks until the user selects a point.
    ///
    /// # Errors
    ///
    /// Returns [`WkillError::SelectionCancelled`] if the user aborts, or
    /// [`WkillError::Picker`] if the picker cannot be run or its output is unreadable.
    fn pick(&mut self, mode: SelectionMode) -> Result<Point, WkillError>;
}

/// Picks a point by running `slurp`.
#[derive(Debug, Clone, Default)]
pub struct Slurp;

impl Slurp {
    /// Command-line arguments for a selection mode.
    #[must_use]
    pub fn args(mode: SelectionMode) -> Vec<&'static str> {
        let mut args = Vec::with_capacity(5);
        if mode == SelectionMode::Pixel {
            args.push("-p");
        }
        args.extend(["-b", BACKGROUND_COLOR, "-c", BORDER_COLOR]);
        args
    }
}

impl PointPicker for Slurp {
    fn pick(&mut self, mode: SelectionMode) -> Result<Point, WkillError> {
        let binary = resolve_binary(SLURP_BINARY).map_err(WkillError::Picker)?;
        let output = Command::new(&binary).args(Self::args(mode)).output()?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::debug!("picker: slurp result: {:?}", stdout.trim());

        if !output.status.success() {
            tracing::debug!("picker: slurp exited with {}", output.status);
            return Err(WkillError::SelectionCancelled);
        }

        let point = parse_selection(&stdout)?;
        tracing::debug!("picker: click coordinates: {point}");
        Ok(point)
    }
}

/// Parses `slurp` output into the selected point.
///
/// # Errors
///
/// Returns [`WkillError::SelectionCancelled`] for blank output and
/// [`WkillError::Picker`] if the leading `X,Y` pair is malformed.
pub fn parse_selection(output: &str) -> Result<Point, WkillError> {
    let Some(coords) = output.split_whitespace().next() else {
        return Err(WkillError::SelectionCancelled);
    };

    let malformed = || WkillError::Picker(format!("unexpected slurp output: {:?}", output.trim()));

    let (x, y) = coords.split_once(',').ok_or_else(malformed)?;
    let x = x.parse::<i32>().map_err(|_| malformed())?;
    let y = y.parse::<i32>().map_err(|_| malformed())?;

    Ok(Point::new(x, y))
}
