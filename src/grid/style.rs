//! Styles for the data grid.
//!
//! All defaults use `AdaptiveColor`, so the grid reads well on light and
//! dark terminals. Replace individual fields to restyle parts of the grid:
//!
//! ```rust
//! use bubbletea_datagrid::grid::GridStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = GridStyles::default();
//! styles.header = Style::new()
//!     .foreground(AdaptiveColor { Light: "#1a1a1a", Dark: "#ffffff" })
//!     .bold(true);
//! ```

use crate::column::BadgeTone;
use lipgloss_extras::prelude::*;

/// Character drawn for skeleton cells while loading.
pub const SKELETON: &str = "░";

/// Character marking truncated cell text.
pub const ELLIPSIS: &str = "…";

/// Lipgloss styles for every part of the grid.
#[derive(Debug, Clone)]
pub struct GridStyles {
    /// Toolbar line above the table.
    pub toolbar: Style,
    /// The "Delete Selected" action.
    pub delete_button: Style,
    /// Search and filter inputs.
    pub input: Style,
    /// The focused search or filter input.
    pub input_focused: Style,
    /// Placeholder text of empty inputs.
    pub placeholder: Style,
    /// Header cells.
    pub header: Style,
    /// Header cells when the header is sticky.
    pub sticky_header: Style,
    /// Arrow of the active sort column.
    pub sort_active: Style,
    /// Arrow of sortable columns that are not sorted.
    pub sort_inactive: Style,
    /// Column resize handle in the header.
    pub resize_handle: Style,
    /// Body cells.
    pub cell: Style,
    /// The cell under the cursor.
    pub cursor_cell: Style,
    /// Cells of selected rows.
    pub selected_row: Style,
    /// The cell being edited.
    pub editing_cell: Style,
    /// Badge for values mentioning "active".
    pub badge_active: Style,
    /// Badge for values mentioning "expired".
    pub badge_expired: Style,
    /// Badge for values mentioning "terminated".
    pub badge_terminated: Style,
    /// Badge for any other value.
    pub badge_neutral: Style,
    /// Skeleton cells shown while loading.
    pub skeleton: Style,
    /// The empty-state message.
    pub empty: Style,
    /// Pagination bar text.
    pub pagination: Style,
    /// Help line.
    pub help: Style,
}

impl GridStyles {
    /// Badge style for a tone.
    pub fn badge(&self, tone: BadgeTone) -> &Style {
        match tone {
            BadgeTone::Positive => &self.badge_active,
            BadgeTone::Warning => &self.badge_expired,
            BadgeTone::Negative => &self.badge_terminated,
            BadgeTone::Neutral => &self.badge_neutral,
        }
    }
}

impl Default for GridStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let accent = AdaptiveColor {
            Light: "#2563EB",
            Dark: "#60A5FA",
        };
        let header_bg = AdaptiveColor {
            Light: "#F3F4F6",
            Dark: "#1F2937",
        };

        Self {
            toolbar: Style::new(),
            delete_button: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#B91C1C",
                    Dark: "#F87171",
                })
                .bold(true),
            input: Style::new().foreground(AdaptiveColor {
                Light: "#1a1a1a",
                Dark: "#dddddd",
            }),
            input_focused: Style::new().foreground(accent.clone()).underline(true),
            placeholder: Style::new().foreground(subdued.clone()),
            header: Style::new().bold(true),
            sticky_header: Style::new().bold(true).background(header_bg),
            sort_active: Style::new().foreground(accent.clone()).bold(true),
            sort_inactive: Style::new().foreground(subdued.clone()),
            resize_handle: Style::new().foreground(AdaptiveColor {
                Light: "#BCD0EE",
                Dark: "#3B4A63",
            }),
            cell: Style::new(),
            cursor_cell: Style::new().reverse(true),
            selected_row: Style::new().foreground(accent.clone()),
            editing_cell: Style::new().underline(true).foreground(accent),
            badge_active: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#15803D",
                    Dark: "#4ADE80",
                })
                .bold(true),
            badge_expired: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#C2410C",
                    Dark: "#FB923C",
                })
                .bold(true),
            badge_terminated: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#B91C1C",
                    Dark: "#F87171",
                })
                .bold(true),
            badge_neutral: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#374151",
                    Dark: "#D1D5DB",
                })
                .bold(true),
            skeleton: Style::new().foreground(subdued.clone()),
            empty: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            pagination: Style::new().foreground(subdued.clone()),
            help: Style::new().foreground(subdued),
        }
    }
}
