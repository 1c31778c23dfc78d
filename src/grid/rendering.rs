//! View rendering for the grid.
//!
//! The view is a stack of lines:
//! - toolbar (delete action, hidden columns)
//! - search and filter bar, when searchable or filters exist
//! - header
//! - body: page rows, skeleton rows while loading, or the empty message
//! - pagination bar, when any rows survive filtering
//! - help
//!
//! Column widths are kept in pixels and drawn at `width / cell_px` terminal
//! cells. Each column is followed by one separator cell, which is the
//! resize handle in the header.

use super::model::{Focus, Model};
use super::style::{ELLIPSIS, SKELETON};
use crate::column::{CellContent, CellKind};
use crate::key::KeyMap;
use crate::pipeline::Derived;
use crate::rows::RowId;
use crate::value::{Record, Value};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells taken by the checkbox column, separator included.
pub(super) const CHECKBOX_CELLS: u16 = 4;

/// Toolbar action shown while rows are selected.
pub(super) const DELETE_LABEL: &str = "[Delete Selected]";

/// Where a visible column sits on screen, in cells from the grid's left edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct ColumnSpan {
    pub(super) key: String,
    pub(super) start: u16,
    pub(super) cells: u16,
    pub(super) handle: u16,
}

impl ColumnSpan {
    pub(super) fn contains(&self, x: u16) -> bool {
        x >= self.start && x < self.handle
    }
}

/// Fits `text` into exactly `cells` terminal cells: ANSI sequences and line
/// breaks are removed, overlong text is cut at a grapheme boundary and
/// marked with an ellipsis, short text is padded with spaces.
pub(super) fn fit(text: &str, cells: usize) -> String {
    if cells == 0 {
        return String::new();
    }
    let plain = strip_ansi_escapes::strip_str(text).replace(['\n', '\r', '\t'], " ");
    let width = UnicodeWidthStr::width(plain.as_str());
    if width <= cells {
        return format!("{plain}{}", " ".repeat(cells - width));
    }

    let mut out = String::new();
    let mut used = 0;
    for g in plain.graphemes(true) {
        let w = UnicodeWidthStr::width(g);
        if used + w > cells - 1 {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push_str(ELLIPSIS);
    used += 1;
    out.push_str(&" ".repeat(cells.saturating_sub(used)));
    out
}

impl<R: Record> Model<R> {
    /// Cells a pixel width occupies on screen.
    pub(super) fn cells_for(&self, width_px: u16) -> u16 {
        (width_px / self.cell_px).max(1)
    }

    /// Screen positions of the visible columns.
    pub(super) fn column_spans(&self) -> Vec<ColumnSpan> {
        let mut start = CHECKBOX_CELLS;
        self.layout
            .visible()
            .iter()
            .map(|key| {
                let cells = self.cells_for(self.layout.width(key).unwrap_or_default());
                let span = ColumnSpan {
                    key: key.clone(),
                    start,
                    cells,
                    handle: start.saturating_add(cells),
                };
                start = span.handle.saturating_add(1);
                span
            })
            .collect()
    }

    pub(super) fn filter_bar_shown(&self) -> bool {
        self.searchable || !self.filters.is_empty()
    }

    /// Line index of the header within the view.
    pub(super) fn header_line(&self) -> usize {
        1 + usize::from(self.filter_bar_shown())
    }

    /// Renders the grid.
    pub fn view(&self) -> String {
        let derived = self.derived();
        let spans = self.column_spans();

        let mut lines = vec![self.view_toolbar()];
        if self.filter_bar_shown() {
            lines.push(self.view_filter_bar());
        }
        lines.push(self.view_header(&spans));
        lines.extend(self.view_body(&derived, &spans));
        if derived.total() > 0 {
            lines.push(self.view_pagination());
        }
        lines.push(self.view_help());
        lines.join("\n")
    }

    fn view_toolbar(&self) -> String {
        let mut parts = Vec::new();
        if !self.selection.is_empty() {
            parts.push(format!(
                "{} {} selected",
                self.styles.delete_button.render(DELETE_LABEL),
                self.selection.len()
            ));
        }
        let hidden: Vec<&str> = self
            .columns
            .columns()
            .iter()
            .filter(|c| !self.layout.is_visible(&c.key))
            .map(|c| c.title.as_str())
            .collect();
        if !hidden.is_empty() {
            parts.push(format!("Hidden: {}", hidden.join(", ")));
        }
        self.styles.toolbar.render(&parts.join("  "))
    }

    fn view_filter_bar(&self) -> String {
        let mut parts = Vec::new();
        if self.searchable {
            let style = if self.focus == Focus::Search {
                &self.styles.input_focused
            } else {
                &self.styles.input
            };
            let text = if self.search.is_empty() {
                self.styles.placeholder.render("Search")
            } else {
                style.render(&self.search)
            };
            parts.push(format!("{} {text}", style.render("/")));
        }

        if !self.filters.is_empty() {
            for (i, column) in self.columns.filterable().enumerate() {
                let value = self.filters.get(&column.key).cloned().unwrap_or_default();
                let style = if self.focus == Focus::Filter(i) {
                    &self.styles.input_focused
                } else {
                    &self.styles.input
                };
                let text = match &column.options {
                    Some(options) => {
                        let label = if value.is_blank() {
                            format!("All {}", column.title)
                        } else {
                            options
                                .iter()
                                .find(|o| o.value == value)
                                .map(|o| o.label.clone())
                                .unwrap_or_else(|| value.as_text())
                        };
                        style.render(&format!("‹{label}›"))
                    }
                    None if value.is_blank() => {
                        self.styles.placeholder.render(&format!("Filter {}", column.title))
                    }
                    None => style.render(&value.as_text()),
                };
                parts.push(text);
            }
        }
        parts.join("  ")
    }

    fn view_header(&self, spans: &[ColumnSpan]) -> String {
        let style = if self.sticky_header {
            &self.styles.sticky_header
        } else {
            &self.styles.header
        };
        let mut line = style.render(&fit(
            self.header_check_state().glyph(),
            usize::from(CHECKBOX_CELLS),
        ));

        for span in spans {
            let Some(column) = self.columns.get(&span.key) else {
                continue;
            };
            let cells = usize::from(span.cells);
            let arrow = (self.sortable && column.sortable).then(|| match &self.sort {
                Some(sort) if sort.key == column.key => {
                    self.styles.sort_active.render(sort.direction.arrow())
                }
                _ => self.styles.sort_inactive.render("▲"),
            });
            match arrow {
                Some(arrow) if cells >= 3 => {
                    line.push_str(&style.render(&fit(&column.title, cells - 2)));
                    line.push_str(&style.render(" "));
                    line.push_str(&arrow);
                }
                _ => line.push_str(&style.render(&fit(&column.title, cells))),
            }
            if self.resizable {
                line.push_str(&self.styles.resize_handle.render("│"));
            } else {
                line.push(' ');
            }
        }
        line
    }

    fn view_body(&self, derived: &Derived, spans: &[ColumnSpan]) -> Vec<String> {
        if self.loading {
            let row: Vec<String> = spans
                .iter()
                .map(|s| {
                    self.styles
                        .skeleton
                        .render(&SKELETON.repeat(usize::from(s.cells)))
                })
                .collect();
            let line = format!(
                "{}{}",
                " ".repeat(usize::from(CHECKBOX_CELLS)),
                row.join(" ")
            );
            return vec![line; self.page_size()];
        }
        if derived.total() == 0 {
            return vec![self.styles.empty.render(&self.empty_message)];
        }

        derived
            .page_rows()
            .iter()
            .enumerate()
            .filter_map(|(pos, &index)| {
                let id = self.rows.id_at(index)?;
                let row = self.rows.rows().get(index)?;
                Some(self.view_row(pos, id, row, spans))
            })
            .collect()
    }

    fn view_row(
        &self,
        pos: usize,
        id: RowId,
        row: &R,
        spans: &[ColumnSpan],
    ) -> String {
        let selected = self.selection.is_selected(id);
        let check = if selected { "[x]" } else { "[ ]" };
        let mut line = fit(check, usize::from(CHECKBOX_CELLS));

        for (col, span) in spans.iter().enumerate() {
            let cells = usize::from(span.cells);
            let under_cursor = self.focused
                && self.focus == Focus::Table
                && pos == self.cursor_row
                && col == self.cursor_col;

            let rendered = if let Some(draft) = self
                .edit
                .draft()
                .filter(|d| d.row == id && d.key == span.key)
            {
                self.styles.editing_cell.render(&fit(draft.value(), cells))
            } else {
                let value = row.value(&span.key);
                self.render_cell(&span.key, &value, pos, cells, selected, under_cursor)
            };
            line.push_str(&rendered);
            line.push(' ');
        }
        line
    }

    fn render_cell(
        &self,
        key: &str,
        value: &Value,
        pos: usize,
        cells: usize,
        selected: bool,
        under_cursor: bool,
    ) -> String {
        let content = self
            .columns
            .kind(key)
            .map_or(CellContent::Text(value.as_text()), |kind: &CellKind| {
                kind.content(value, pos)
            });
        let (text, style) = match content {
            CellContent::Text(text) => {
                let style = if selected {
                    &self.styles.selected_row
                } else {
                    &self.styles.cell
                };
                (text, style)
            }
            CellContent::Badge { label, tone } => (label, self.styles.badge(tone)),
        };
        let style = if under_cursor {
            &self.styles.cursor_cell
        } else {
            style
        };
        style.render(&fit(&text, cells))
    }

    fn view_pagination(&self) -> String {
        let mut pager = self.paginator.clone();
        pager.set_total_items(self.total());
        self.styles.pagination.render(&pager.view())
    }

    fn view_help(&self) -> String {
        let help: Vec<String> = self
            .short_help()
            .iter()
            .filter(|b| b.enabled())
            .map(|b| format!("{} {}", b.help().key, b.help().desc))
            .collect();
        self.styles.help.render(&help.join(" • "))
    }
}
