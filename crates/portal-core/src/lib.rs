//! Core types and traits for portal sidebar widgets.
//!
//! This crate provides foundational types used throughout the portal UI:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Events: [`Event`]
//! - The [`Widget`] and [`Canvas`] traits plus a [`RecordingCanvas`]
//! - Page themes: [`PageThemes`] keyed by [`PageCategory`]

mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
mod theme;
pub mod widget;

pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use draw::{BoxStyle, DrawCommand, StrokeStyle};
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use theme::{PageCategory, PageTheme, PageThemes, UnknownCategory};
pub use widget::{
    AccessibleRole, Canvas, FontWeight, LayoutResult, Message, TextAlign, TextStyle, TypeId,
    Widget,
};
