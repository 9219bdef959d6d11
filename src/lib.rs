#![doc(html_root_url = "https://docs.rs/bubbletea-datagrid/")]

//! # bubbletea-datagrid
//!
//! An interactive data grid for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: filter, sort and paginate tabular rows, select them, edit
//! them in a popup form or inline, and expand nested rows.
//!
//! ## Overview
//!
//! The grid is split into small state holders that can be used on their own:
//!
//! - [`filtering`], [`sorting`] and [`paginator`]: the row pipeline
//! - [`RowSelector`]: single or multiple selection by row id
//! - [`RowEditor`]: edit sessions with a snapshot and a ledger of modified rows
//! - [`cell`]: value formatting, input parsing and single-cell editing
//! - [`ExpansionState`](expansion::ExpansionState): which nested rows are open
//!
//! [`DataGrid`] composes them, follows the Elm Architecture through the
//! bubbletea-rs `Model` trait, and reports user intents as [`GridEvent`]s.
//!
//! ## Quick Start
//!
//! ```rust
//! use bubbletea_datagrid::prelude::*;
//!
//! let rows = Row::from_json_str(r#"[
//!     {"id": 1, "name": "Bob", "age": 30},
//!     {"id": 2, "name": "Ann", "age": 25}
//! ]"#).unwrap();
//!
//! let mut grid = DataGrid::new(vec![Column::new("name", "Name"), Column::new("age", "Age")])
//!     .with_rows(rows);
//!
//! grid.sort_by("name");
//! assert_eq!(grid.visible_rows()[0].get("name").to_string(), "Ann");
//! assert_eq!(grid.select_row(Value::from(2)), GridEvent::SelectionChanged(vec![Value::from(2)]));
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_datagrid::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     grid: DataGrid,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let grid = DataGrid::new(vec![Column::new("name", "Name")]);
//!         (Self { grid }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(event) = msg.downcast_ref::<GridEvent>() {
//!             // react to saves, sorts, selection changes...
//!             let _ = event;
//!             return None;
//!         }
//!         self.grid.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.grid.view()
//!     }
//! }
//! ```

pub mod cell;
pub mod column;
pub mod config;
pub mod editor;
pub mod error;
pub mod event;
pub mod expansion;
pub mod filtering;
pub mod key;
pub mod paginator;
pub mod row;
pub mod selection;
pub mod sorting;
pub mod table;
pub mod value;

use bubbletea_rs::Cmd;

/// Focus management for components.
///
/// A focused component receives keyboard input; a blurred one ignores it
/// and renders without a cursor.
///
/// ```rust
/// use bubbletea_datagrid::prelude::*;
///
/// let mut grid = DataGrid::new(vec![Column::new("name", "Name")]);
/// assert!(grid.focused());
/// grid.blur();
/// assert!(!grid.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state. May return a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns `true` while focused.
    fn focused(&self) -> bool;
}

pub use column::{Column, EditableConfig, FieldType, SelectOption};
pub use config::GridConfig;
pub use editor::{EditMode, RowEditor};
pub use error::GridError;
pub use event::GridEvent;
pub use expansion::{ExpansionState, RowPath};
pub use key::{Binding, KeyMap, KeyPress};
pub use paginator::{Model as Paginator, PageDirection};
pub use row::Row;
pub use selection::{RowSelector, Selection, SelectionMode};
pub use sorting::SortDirection;
pub use table::{Model as DataGrid, TableKeyMap, TableState, TableStyles};
pub use value::Value;

/// Re-exports of the commonly used types.
///
/// ```rust
/// use bubbletea_datagrid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::column::{Column, EditableConfig, FieldType, SelectOption};
    pub use crate::config::GridConfig;
    pub use crate::editor::{EditMode, RowEditor};
    pub use crate::error::GridError;
    pub use crate::event::GridEvent;
    pub use crate::expansion::RowPath;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::row::Row;
    pub use crate::selection::{RowSelector, SelectionMode};
    pub use crate::sorting::SortDirection;
    pub use crate::table::Model as DataGrid;
    pub use crate::value::Value;
    pub use crate::Component;
    pub use bubbletea_rs::Model as BubbleTeaModel;
}
