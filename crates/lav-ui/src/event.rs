//! Typed UI events and the per-node listener table.
//!
//! Every payload kind has a stable numeric [`EventKind`]. Dispatch is a
//! match on that discriminant; listeners are stored per kind.

use std::fmt;

use lav_engine::coords::Vec2;
use lav_engine::input::{MouseButton, MouseButtonState};
use rustc_hash::FxHashMap;

use crate::state::UiState;

/// Discriminant of a [`UiEvent`].
#[repr(u32)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EventKind {
    MouseMove = 1,
    MouseButton,
    MouseLeftClick,
    MouseLeftRelease,
    MouseEnter,
    MouseExit,
    MouseDrag,
    MouseScroll,
    WindowResize,
    Slider,
}

impl EventKind {
    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Broadcast kinds reach every listening node; the rest go to one target.
    #[inline]
    pub fn is_broadcast(self) -> bool {
        matches!(self, EventKind::MouseMove | EventKind::MouseButton | EventKind::WindowResize)
    }
}

// ── payloads ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMoveEvt {
    pub pos: Vec2,
    pub delta: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseButtonEvt {
    pub pos: Vec2,
    pub button: MouseButton,
    pub action: MouseButtonState,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseLeftClickEvt {
    pub pos: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseLeftReleaseEvt {
    pub pos: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseEnterEvt {
    pub pos: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseExitEvt {
    pub pos: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseDragEvt {
    pub pos: Vec2,
    pub delta: Vec2,
}

/// Wheel offset in lines; positive `y` scrolls up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseScrollEvt {
    pub offset: Vec2,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowResizeEvt {
    pub size: Vec2,
    pub delta: Vec2,
}

/// Emitted by a slider whenever its value changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SliderEvt {
    pub value: f32,
    pub percentage: f32,
}

/// A payload that knows its own kind, so listeners can be registered by type.
pub trait TypedEvent: Sized {
    const KIND: EventKind;

    fn from_event(event: &UiEvent) -> Option<&Self>;
}

macro_rules! ui_events {
    ($($variant:ident($ty:ident)),+ $(,)?) => {
        /// Closed set of event payloads.
        #[derive(Debug, Copy, Clone, PartialEq)]
        pub enum UiEvent {
            $($variant($ty),)+
        }

        impl UiEvent {
            pub fn kind(&self) -> EventKind {
                match self {
                    $(UiEvent::$variant(_) => EventKind::$variant,)+
                }
            }
        }

        $(
            impl TypedEvent for $ty {
                const KIND: EventKind = EventKind::$variant;

                fn from_event(event: &UiEvent) -> Option<&Self> {
                    match event {
                        UiEvent::$variant(e) => Some(e),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }

            impl From<$ty> for UiEvent {
                fn from(e: $ty) -> Self {
                    UiEvent::$variant(e)
                }
            }
        )+
    };
}

ui_events! {
    MouseMove(MouseMoveEvt),
    MouseButton(MouseButtonEvt),
    MouseLeftClick(MouseLeftClickEvt),
    MouseLeftRelease(MouseLeftReleaseEvt),
    MouseEnter(MouseEnterEvt),
    MouseExit(MouseExitEvt),
    MouseDrag(MouseDragEvt),
    MouseScroll(MouseScrollEvt),
    WindowResize(WindowResizeEvt),
    Slider(SliderEvt),
}

impl UiEvent {
    /// Builds the payload for `kind` from the current window state.
    ///
    /// `Slider` events carry widget data and are built by the slider itself;
    /// asking for one here yields `None`.
    pub fn from_state(kind: EventKind, state: &UiState) -> Option<UiEvent> {
        let pos = state.mouse_pos;
        let event = match kind {
            EventKind::MouseMove => MouseMoveEvt { pos, delta: state.mouse_delta }.into(),
            EventKind::MouseButton => MouseButtonEvt {
                pos,
                button: state.mouse_button,
                action: state.mouse_action,
            }
            .into(),
            EventKind::MouseLeftClick => MouseLeftClickEvt { pos }.into(),
            EventKind::MouseLeftRelease => MouseLeftReleaseEvt { pos }.into(),
            EventKind::MouseEnter => MouseEnterEvt { pos }.into(),
            EventKind::MouseExit => MouseExitEvt { pos }.into(),
            EventKind::MouseDrag => MouseDragEvt { pos, delta: state.mouse_delta }.into(),
            EventKind::MouseScroll => MouseScrollEvt { offset: state.scroll_offset }.into(),
            EventKind::WindowResize => WindowResizeEvt {
                size: state.window_size,
                delta: state.window_size_delta,
            }
            .into(),
            EventKind::Slider => return None,
        };
        Some(event)
    }
}

// ── listeners ─────────────────────────────────────────────────────────────

type Listener = Box<dyn FnMut(&UiEvent)>;

/// Per-node mapping from event kind to callbacks, in registration order.
#[derive(Default)]
pub struct EventTable {
    listeners: FxHashMap<EventKind, Vec<Listener>>,
}

impl EventTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw listener for `kind`.
    pub fn listen(&mut self, kind: EventKind, f: impl FnMut(&UiEvent) + 'static) {
        self.listeners.entry(kind).or_default().push(Box::new(f));
    }

    /// Registers a listener that receives the typed payload.
    ///
    /// ```rust,ignore
    /// node.events.on::<MouseLeftClickEvt>(|e| log::info!("clicked at {:?}", e.pos));
    /// ```
    pub fn on<E: TypedEvent + 'static>(&mut self, mut f: impl FnMut(&E) + 'static) {
        self.listen(E::KIND, move |event| {
            if let Some(e) = E::from_event(event) {
                f(e);
            }
        });
    }

    /// Invokes every listener registered for the event's kind.
    /// Returns how many were called.
    pub fn emit(&mut self, event: &UiEvent) -> usize {
        match self.listeners.get_mut(&event.kind()) {
            Some(list) => {
                for f in list.iter_mut() {
                    f(event);
                }
                list.len()
            }
            None => 0,
        }
    }

    pub fn has(&self, kind: EventKind) -> bool {
        self.listeners.get(&kind).is_some_and(|l| !l.is_empty())
    }

    pub fn clear(&mut self, kind: EventKind) {
        self.listeners.remove(&kind);
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for EventTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self
            .listeners
            .iter()
            .map(|(k, v)| (k.id(), v.len()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("EventTable").field("listeners", &kinds).finish()
    }
}
