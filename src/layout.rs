//! Column widths, column visibility and the resize gesture.
//!
//! Layout state lives beside the column set and never alters it. Widths are
//! kept in pixels; the grid converts them to terminal cells when rendering.

use crate::column::{ColumnSet, MIN_WIDTH};
use crate::error::GridError;
use log::{debug, trace};
use std::collections::HashMap;

/// An in-progress column resize, from press to release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeGesture {
    /// Column being resized.
    pub key: String,
    /// Pointer x position when the gesture began.
    pub start_x: i32,
    /// Column width when the gesture began.
    pub start_width: u16,
}

/// Per-column widths and the ordered list of visible columns.
#[derive(Debug, Clone)]
pub struct Layout {
    widths: HashMap<String, u16>,
    visible: Vec<String>,
    gesture: Option<ResizeGesture>,
}

impl Layout {
    /// Every column visible at its configured width (or the default).
    pub fn new(columns: &ColumnSet) -> Self {
        Self {
            widths: columns
                .columns()
                .iter()
                .map(|c| (c.key.clone(), c.initial_width()))
                .collect(),
            visible: columns.keys().map(str::to_string).collect(),
            gesture: None,
        }
    }

    /// Width of `key` in pixels.
    pub fn width(&self, key: &str) -> Option<u16> {
        self.widths.get(key).copied()
    }

    /// Sets a width directly, clamped to the minimum.
    pub fn set_width(&mut self, key: &str, width: u16) -> Result<(), GridError> {
        let slot = self
            .widths
            .get_mut(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        *slot = width.max(MIN_WIDTH);
        Ok(())
    }

    /// Visible column keys in display order.
    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    /// Whether `key` is visible.
    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.iter().any(|k| k == key)
    }

    /// Hides a visible column or shows a hidden one. A shown column lands
    /// back in its descriptor-order slot among the visible columns.
    pub fn toggle_visibility(&mut self, columns: &ColumnSet, key: &str) -> Result<(), GridError> {
        let index = columns
            .index_of(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;

        if let Some(pos) = self.visible.iter().position(|k| k == key) {
            self.visible.remove(pos);
            debug!("column `{key}` hidden");
        } else {
            let insert_at = self
                .visible
                .iter()
                .position(|k| columns.index_of(k).is_some_and(|i| i > index))
                .unwrap_or(self.visible.len());
            self.visible.insert(insert_at, key.to_string());
            debug!("column `{key}` shown at {insert_at}");
        }
        Ok(())
    }

    /// Replaces the visible list. Keys are reordered to descriptor order
    /// and duplicates dropped; unknown keys are rejected.
    pub fn set_visible(&mut self, columns: &ColumnSet, keys: &[String]) -> Result<(), GridError> {
        if let Some(unknown) = keys.iter().find(|k| columns.index_of(k).is_none()) {
            return Err(GridError::UnknownColumn(unknown.clone()));
        }
        self.visible = columns
            .keys()
            .filter(|k| keys.iter().any(|v| v.as_str() == *k))
            .map(str::to_string)
            .collect();
        Ok(())
    }

    /// Starts resizing `key` with the pointer at `x`.
    ///
    /// Any gesture already in progress is replaced.
    pub fn begin_resize(&mut self, key: &str, x: i32) -> Result<(), GridError> {
        let start_width = self
            .width(key)
            .ok_or_else(|| GridError::UnknownColumn(key.to_string()))?;
        debug!("resize of `{key}` started at x={x}, width={start_width}");
        self.gesture = Some(ResizeGesture {
            key: key.to_string(),
            start_x: x,
            start_width,
        });
        Ok(())
    }

    /// Follows the pointer to `x`: the width becomes
    /// `max(MIN_WIDTH, start_width + (x - start_x))`. No-op without a gesture.
    pub fn drag_resize(&mut self, x: i32) {
        let Some(gesture) = &self.gesture else {
            return;
        };
        let raw = i32::from(gesture.start_width) + (x - gesture.start_x);
        let width = raw.clamp(i32::from(MIN_WIDTH), i32::from(u16::MAX)) as u16;
        trace!("resize of `{}` to {width}", gesture.key);
        if let Some(slot) = self.widths.get_mut(&gesture.key) {
            *slot = width;
        }
    }

    /// Ends the gesture, keeping the width reached. Returns the gesture that ended.
    pub fn end_resize(&mut self) -> Option<ResizeGesture> {
        let ended = self.gesture.take();
        if let Some(g) = &ended {
            debug!(
                "resize of `{}` finished at {}",
                g.key,
                self.width(&g.key).unwrap_or(g.start_width)
            );
        }
        ended
    }

    /// The gesture in progress, if any.
    pub fn resizing(&self) -> Option<&ResizeGesture> {
        self.gesture.as_ref()
    }
}
