//! Lav UI: retained element tree on top of `lav-engine`.
//!
//! Every window owns a [`UiTree`](tree::UiTree) of nodes addressed by
//! [`NodeId`](node::NodeId). Each frame the tree is laid out breadth-first
//! (pixel, relative, fit, fill and grid sizing, flow placement, scrollbars),
//! drawn through a [`GpuBinder`](lav_engine::render::GpuBinder), and input is
//! turned into typed events delivered to per-node listeners.
//!
//! ```rust,ignore
//! use lav_ui::prelude::*;
//!
//! Application::new().title("demo").run(|window| {
//!     let root = window.root();
//!     let tree = window.tree_mut();
//!     let button = tree.create(Button::new());
//!     tree.events_mut(button).unwrap().on::<MouseLeftClickEvt>(|_| log::info!("clicked"));
//!     tree.add(root, button);
//! })
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod node;
pub mod state;
pub mod tree;
pub mod widgets;
pub mod window;

pub use app::Application;

/// Everything needed to build a UI.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::event::{
        EventKind, MouseButtonEvt, MouseDragEvt, MouseEnterEvt, MouseExitEvt, MouseLeftClickEvt,
        MouseLeftReleaseEvt, MouseMoveEvt, MouseScrollEvt, SliderEvt, TypedEvent, UiEvent,
        WindowResizeEvt,
    };
    pub use crate::layout::{
        Align, Axis, Edges, GridCell, GridSpec, LayoutAttribs, LayoutType, Position, PositionXY,
        Scale, ScaleType, ScaleXY, Spacing,
    };
    pub use crate::node::{Node, NodeId};
    pub use crate::tree::{TreeError, UiTree};
    pub use crate::widgets::{Button, ItemId, Pane, Slider, SplitPane, TreeItem, TreeView, Widget};
    pub use crate::window::UiWindow;

    pub use lav_engine::coords::{Color, Rect, Vec2};
    pub use lav_engine::input::CursorShape;
}
