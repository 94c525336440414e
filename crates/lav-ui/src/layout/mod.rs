//! Layout: per-node attributes and the stateless calculator that resolves
//! them into screen-space boxes.
//!
//! Passes run parent-first. For one parent: scale, then position, then
//! overflow, then alignment. Grid parents swap in the track passes, scroll
//! panes reserve space for their scrollbars, split panes resize their panes.

mod attribs;
pub mod calculator;
pub mod grid;
mod issue;
pub mod scroll;
pub mod split;

pub use attribs::{
    Align, Axis, Edges, GridCell, GridSpec, LayoutAttribs, LayoutType, Position, PositionXY, Scale,
    ScaleType, ScaleXY, Spacing,
};
pub use issue::LayoutIssue;
