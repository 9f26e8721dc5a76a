//! Input handling for the page.
//!
//! [`Input`] turns raw window events into [`PageEvent`]s the page
//! understands, and keeps the little state that needs (keys held, last
//! pointer and touch positions).
//!
//! | Input                       | Event                                  |
//! |-----------------------------|----------------------------------------|
//! | pointer motion              | [`PageEvent::PointerMoved`]            |
//! | wheel, touch drag           | [`PageEvent::Scroll`] (also scroll intent) |
//! | digit keys `1`..`9`         | [`PageEvent::NavActivated`] for link 0..8 |
//! | `T`                         | [`PageEvent::ToggleTheme`]             |
//! | window resize               | [`PageEvent::Resized`]                 |

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::event::{ElementState, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels scrolled per wheel "line".
pub const LINE_HEIGHT: f32 = 40.0;

/// Something that happened to the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// Pointer position in surface pixels.
    PointerMoved(Vec2),
    /// Wheel or touch scroll. Positive `delta_y` moves down the page.
    Scroll { delta_y: f32 },
    /// Navigation link at this index was activated.
    NavActivated(usize),
    ToggleTheme,
    /// New surface size in pixels.
    Resized(Vec2),
}

/// Translates window events into page events.
#[derive(Debug, Default)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    pointer: Vec2,
    touches: HashMap<u64, f32>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known pointer position in surface pixels.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<PageEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => match event.physical_key {
                PhysicalKey::Code(code) => self.key(code, event.state),
                PhysicalKey::Unidentified(_) => None,
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(Vec2::new(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseWheel { delta, .. } => Some(PageEvent::Scroll {
                delta_y: wheel_delta(*delta),
            }),
            WindowEvent::Touch(touch) => {
                self.touch(touch.id, touch.phase, touch.location.y as f32)
            }
            WindowEvent::Resized(size) => Some(PageEvent::Resized(Vec2::new(
                size.width as f32,
                size.height as f32,
            ))),
            _ => None,
        }
    }

    /// Key press or release. Held keys do not repeat.
    pub fn key(&mut self, code: KeyCode, state: ElementState) -> Option<PageEvent> {
        match state {
            ElementState::Released => {
                self.keys_held.remove(&code);
                None
            }
            ElementState::Pressed => {
                if !self.keys_held.insert(code) {
                    return None;
                }
                match code {
                    KeyCode::KeyT => Some(PageEvent::ToggleTheme),
                    code => digit(code).map(|n| PageEvent::NavActivated(n - 1)),
                }
            }
        }
    }

    pub fn pointer_moved(&mut self, position: Vec2) -> Option<PageEvent> {
        self.pointer = position;
        Some(PageEvent::PointerMoved(position))
    }

    /// Touch contact `id` at vertical position `y`.
    ///
    /// Dragging a finger up scrolls the page down.
    pub fn touch(&mut self, id: u64, phase: TouchPhase, y: f32) -> Option<PageEvent> {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, y);
                None
            }
            TouchPhase::Moved => {
                let last = self.touches.insert(id, y)?;
                Some(PageEvent::Scroll { delta_y: last - y })
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                None
            }
        }
    }
}

/// Wheel delta in page pixels, positive down the page.
pub fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * LINE_HEIGHT,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

fn digit(code: KeyCode) -> Option<usize> {
    let n = match code {
        KeyCode::Digit1 | KeyCode::Numpad1 => 1,
        KeyCode::Digit2 | KeyCode::Numpad2 => 2,
        KeyCode::Digit3 | KeyCode::Numpad3 => 3,
        KeyCode::Digit4 | KeyCode::Numpad4 => 4,
        KeyCode::Digit5 | KeyCode::Numpad5 => 5,
        KeyCode::Digit6 | KeyCode::Numpad6 => 6,
        KeyCode::Digit7 | KeyCode::Numpad7 => 7,
        KeyCode::Digit8 | KeyCode::Numpad8 => 8,
        KeyCode::Digit9 | KeyCode::Numpad9 => 9,
        _ => return None,
    };
    Some(n)
}
