//! Messages the grid emits for the host application.
//!
//! State holders never call back into the application. Instead
//! [`crate::table::Model`]'s `update` returns a command that delivers one of
//! these events as a bubbletea message.

use crate::expansion::RowPath;
use crate::paginator::PageDirection;
use crate::row::Row;
use crate::value::Value;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::time::Duration;

/// An intent produced by user interaction with the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    /// An inline cell edit changed a value.
    ValueChanged {
        field: String,
        old_value: Value,
        new_value: Value,
    },
    /// An edit session was saved; carries the full row.
    Save(Row),
    /// An edit session was cancelled.
    Cancel,
    /// The sort column was chosen.
    Sort(String),
    /// The selection changed; carries the selected ids.
    SelectionChanged(Vec<Value>),
    /// The current page moved.
    PageChange(PageDirection),
    /// A nested row was expanded or collapsed.
    Expanded { path: RowPath, expanded: bool },
}

impl GridEvent {
    /// Wraps the event in a command that delivers it on the next tick.
    pub fn into_cmd(self) -> Cmd {
        bubbletea_tick(Duration::from_nanos(1), move |_| Box::new(self.clone()) as Msg)
    }
}
