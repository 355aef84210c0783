//! tessera-tui: a terminal compositing engine built from scratch on crossterm
//!
//! This crate provides:
//! - Geometry primitives (`Point`, `Size`, `Rect`) and nine-way `Placement`
//! - Cell buffers with clipped compositing and run-merged styled rendering
//! - Connected box-drawing lines resolved from a shared bit mask
//! - An element tree with two-tier dirty tracking and cached buffers
//! - Interactive screens with a selection matrix, key tables and a play loop
//! - Terminal sinks over crossterm, plus a headless sink for tests

pub mod buffer;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod screen;
pub mod style;
pub mod terminal;
pub mod widget;

// Re-export commonly used types
pub use buffer::{BitBuffer, Buffer, Cell, GlyphTable, RenderMode};
pub use config::TuiConfig;
pub use element::{shared, Element, ElementCore, ElementRef, Observers};
pub use error::{Result, TuiError};
pub use geometry::{Placement, Point, Rect, Size};
pub use screen::{
    ConnectedLinesScreen, InteractiveScreen, PlaySettings, Playable, Screen, ScreenSwitcher,
    StopHandle,
};
pub use style::{Color, Intensity, Style};
pub use terminal::{CrosstermSink, HeadlessSink, TerminalSink};
pub use widget::{Button, Checkbox, Label, Line, Selectable, TextBox, Writable};
