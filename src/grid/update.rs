//! Message handling: keys and mouse events in, grid events out.

use super::events::GridEventsMsg;
use super::model::{Click, Focus, Model};
use super::rendering::{ColumnSpan, CHECKBOX_CELLS, DELETE_LABEL};
use crate::error::GridError;
use crate::value::{Record, Value};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, trace};
use std::time::{Duration, Instant};

/// Longest gap between the two clicks of a double click.
const DOUBLE_CLICK: Duration = Duration::from_millis(500);

impl<R: Record> Model<R> {
    /// Handles a message.
    ///
    /// Key presses are handled while the grid is focused. Mouse events are
    /// `crossterm::event::MouseEvent`s forwarded by the host, in screen
    /// coordinates. Returns a command resolving to a [`GridEventsMsg`] when
    /// anything the host should hear about happened.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key_msg);
        } else if let Some(mouse) = msg.downcast_ref::<MouseEvent>() {
            self.handle_mouse(mouse);
        }
        self.flush()
    }

    /// Packs the queued events into a command.
    pub fn flush(&mut self) -> Option<Cmd> {
        if self.pending.is_empty() {
            return None;
        }
        let events = self.take_events();
        Some(Box::pin(async move {
            Some(Box::new(GridEventsMsg(events)) as Msg)
        }))
    }

    fn handle_key(&mut self, msg: &KeyMsg) {
        if self.edit.is_editing() {
            self.handle_edit_key(msg);
            return;
        }
        match self.focus {
            Focus::Table => self.handle_table_key(msg),
            Focus::Search => self.handle_search_key(msg),
            Focus::Filter(index) => self.handle_filter_key(index, msg),
        }
    }

    fn handle_edit_key(&mut self, msg: &KeyMsg) {
        if self.keymap.commit.matches(msg) {
            self.commit_edit();
        } else if self.keymap.cancel.matches(msg) {
            self.cancel_edit();
        } else if let Some(draft) = self.edit.draft_mut() {
            draft.handle_key(msg);
        }
    }

    fn handle_search_key(&mut self, msg: &KeyMsg) {
        match msg.key {
            KeyCode::Esc | KeyCode::Enter => self.focus_table(),
            KeyCode::Tab => self.focus_filter(0),
            KeyCode::Backspace => {
                let mut term = self.search.clone();
                term.pop();
                self.set_search(term);
            }
            KeyCode::Char(c) if !msg.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut term = self.search.clone();
                term.push(c);
                self.set_search(term);
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, index: usize, msg: &KeyMsg) {
        let Some(column) = self.columns.filterable().nth(index) else {
            self.focus_table();
            return;
        };
        let key = column.key.clone();
        let options = column.options.clone();
        let current = self.filters.get(&key).cloned().unwrap_or_default();

        let next = match (msg.key, &options) {
            (KeyCode::Esc | KeyCode::Enter, _) => {
                self.focus_table();
                return;
            }
            (KeyCode::Tab, _) => {
                let count = self.columns.filterable().count();
                if index + 1 < count {
                    self.focus = Focus::Filter(index + 1);
                } else {
                    self.focus_table();
                }
                return;
            }
            (KeyCode::Left | KeyCode::Right, Some(options)) => {
                // Choices are "All" (blank) followed by every option.
                let choices: Vec<Value> = std::iter::once(Value::Null)
                    .chain(options.iter().map(|o| o.value.clone()))
                    .collect();
                let at = choices
                    .iter()
                    .position(|v| *v == current || (v.is_blank() && current.is_blank()))
                    .unwrap_or(0);
                let step = if msg.key == KeyCode::Right {
                    1
                } else {
                    choices.len() - 1
                };
                choices[(at + step) % choices.len()].clone()
            }
            (KeyCode::Backspace, None) => {
                let mut text = current.as_text();
                text.pop();
                Value::from(text)
            }
            (KeyCode::Char(c), None) if !msg.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = current.as_text();
                text.push(c);
                Value::from(text)
            }
            _ => return,
        };
        if let Err(err) = self.set_filter(&key, next) {
            debug!("filter input ignored: {err}");
        }
    }

    fn handle_table_key(&mut self, msg: &KeyMsg) {
        let km = &self.keymap;
        if km.cursor_up.matches(msg) {
            self.cursor_row = self.cursor_row.saturating_sub(1);
        } else if km.cursor_down.matches(msg) {
            self.cursor_row += 1;
            self.clamp_cursor();
        } else if km.cursor_left.matches(msg) {
            self.cursor_col = self.cursor_col.saturating_sub(1);
        } else if km.cursor_right.matches(msg) {
            self.cursor_col += 1;
            self.clamp_cursor();
        } else if km.next_page.matches(msg) {
            self.next_page();
        } else if km.prev_page.matches(msg) {
            self.prev_page();
        } else if km.next_page_size.matches(msg) {
            self.cycle_page_size();
        } else if km.sort.matches(msg) {
            if let Some(key) = self.cursor_key() {
                log_ignored(self.toggle_sort(&key));
            }
        } else if km.toggle_row.matches(msg) {
            let row = self.cursor_row;
            log_ignored(self.toggle_row_at(row));
        } else if km.toggle_all.matches(msg) {
            self.toggle_all();
        } else if km.delete_selected.matches(msg) {
            self.delete_selected();
        } else if km.start_edit.matches(msg) {
            if let Some(key) = self.cursor_key() {
                let row = self.cursor_row;
                log_ignored(self.start_edit_at(row, &key));
            }
        } else if km.focus_search.matches(msg) {
            self.focus_search();
        } else if km.focus_filter.matches(msg) {
            self.focus_filter(0);
        } else if km.toggle_column.matches(msg) {
            if let KeyCode::Char(d) = msg.key {
                let nth = d.to_digit(10).and_then(|n| (n as usize).checked_sub(1));
                if let Some(key) = nth.and_then(|i| self.columns.columns().get(i)) {
                    let key = key.key.clone();
                    log_ignored(self.toggle_column(&key));
                }
            }
        } else if km.widen_column.matches(msg) || km.narrow_column.matches(msg) {
            let widen = km.widen_column.matches(msg);
            if let Some(key) = self.cursor_key() {
                let width = self.layout.width(&key).unwrap_or_default();
                let width = if widen {
                    width.saturating_add(self.cell_px)
                } else {
                    width.saturating_sub(self.cell_px)
                };
                log_ignored(self.set_column_width(&key, width));
            }
        }
    }

    fn handle_mouse(&mut self, event: &MouseEvent) {
        let x = i32::from(event.column) - i32::from(self.origin.0);
        let y = i32::from(event.row) - i32::from(self.origin.1);
        trace!("mouse {:?} at ({x}, {y})", event.kind);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let (Ok(x), Ok(y)) = (u16::try_from(x), usize::try_from(y)) {
                    self.mouse_down(x, y);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag_resize(x.saturating_mul(i32::from(self.cell_px)))
            }
            MouseEventKind::Up(MouseButton::Left) => self.end_resize(),
            _ => {}
        }
    }

    fn mouse_down(&mut self, x: u16, y: usize) {
        let header = self.header_line();
        let spans = self.column_spans();
        let hit = spans.iter().position(|s| s.contains(x));

        // A click anywhere but the cell being edited leaves the edit, which commits it.
        let on_edit_cell = y > header
            && hit.is_some_and(|c| {
                let row = y - header - 1;
                self.page_ids().get(row).is_some_and(|&id| {
                    self.edit.is_editing_cell(id, &spans[c].key)
                })
            });
        if self.edit.is_editing() && !on_edit_cell {
            self.commit_edit();
        }

        if y == 0 {
            if !self.selection.is_empty() && usize::from(x) < DELETE_LABEL.len() {
                self.delete_selected();
            }
            return;
        }
        if y < header {
            self.click_filter_bar();
            return;
        }
        if y == header {
            self.click_header(x, &spans);
            return;
        }

        let row = y - header - 1;
        if row >= self.page_ids().len() || self.loading {
            return;
        }
        self.focus = Focus::Table;
        if x < CHECKBOX_CELLS {
            log_ignored(self.toggle_row_at(row));
            return;
        }
        let Some(col) = hit else {
            return;
        };
        self.cursor_row = row;
        self.cursor_col = col;

        let now = Instant::now();
        let double = self.last_click.is_some_and(|c| {
            c.row == row && c.col == col && now.duration_since(c.at) <= DOUBLE_CLICK
        });
        self.last_click = Some(Click { at: now, row, col });
        if double {
            self.last_click = None;
            let key = spans[col].key.clone();
            let editable = self.columns.get(&key).is_some_and(|c| c.is_editable());
            if editable {
                log_ignored(self.start_edit_at(row, &key));
            }
        }
    }

    fn click_header(&mut self, x: u16, spans: &[ColumnSpan]) {
        if x < CHECKBOX_CELLS {
            self.toggle_all();
            return;
        }
        if let Some(span) = spans.iter().find(|s| s.handle == x) {
            let key = span.key.clone();
            let start = i32::from(x).saturating_mul(i32::from(self.cell_px));
            log_ignored(self.begin_resize(&key, start));
        } else if let Some(span) = spans.iter().find(|s| s.contains(x)) {
            let key = span.key.clone();
            log_ignored(self.toggle_sort(&key));
        }
    }

    fn click_filter_bar(&mut self) {
        if self.searchable {
            self.focus_search();
        } else {
            self.focus_filter(0);
        }
    }
}

fn log_ignored(result: Result<(), GridError>) {
    if let Err(err) = result {
        debug!("ignored: {err}");
    }
}
