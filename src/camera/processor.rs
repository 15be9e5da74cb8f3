//! Pointer state machine turning [`InputEvent`]s into camera commands.

use glam::Vec2;

use super::input::{InputEvent, MouseButton};

/// Camera motion requested by an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    /// Orbit by a drag of `delta` pixels.
    Rotate {
        /// Cursor movement in physical pixels.
        delta: Vec2,
    },
    /// Move the orbit target by a drag of `delta` pixels.
    Pan {
        /// Cursor movement in physical pixels.
        delta: Vec2,
    },
    /// Change the orbit distance by a scroll amount in lines.
    Zoom {
        /// Scroll amount in lines.
        delta: f32,
    },
}

/// Tracks buttons, modifiers and the last cursor position between events.
///
/// Left-drag rotates. Right-drag, or left-drag with shift held, pans.
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    last_cursor: Option<Vec2>,
    left_pressed: bool,
    right_pressed: bool,
    shift_pressed: bool,
}

impl InputProcessor {
    /// Processor with no buttons held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.left_pressed || self.right_pressed
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// End any held drag without waiting for its button-up. The next cursor
    /// position starts a fresh delta.
    pub fn release_mouse_state(&mut self) {
        self.left_pressed = false;
        self.right_pressed = false;
        self.last_cursor = None;
    }

    /// Process one event, returning the camera motion it causes.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<CameraCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right => self.right_pressed = pressed,
                    MouseButton::Middle => {}
                }
                None
            }
            InputEvent::Scroll { delta } => Some(CameraCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::PointerLeft => {
                self.release_mouse_state();
                None
            }
        }
    }

    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<CameraCommand> {
        let delta = self.last_cursor.map_or(Vec2::ZERO, |last| pos - last);
        self.last_cursor = Some(pos);

        if !self.mouse_pressed() {
            return None;
        }
        if self.shift_pressed || self.right_pressed {
            return Some(CameraCommand::Pan { delta });
        }
        Some(CameraCommand::Rotate { delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(moved(10.0, 10.0)), None);
        assert_eq!(input.handle_event(moved(30.0, 10.0)), None);
    }

    #[test]
    fn left_drag_rotates_by_cursor_delta() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(10.0, 10.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert_eq!(
            input.handle_event(moved(25.0, 4.0)),
            Some(CameraCommand::Rotate {
                delta: Vec2::new(15.0, -6.0)
            })
        );
    }

    #[test]
    fn right_drag_and_shift_drag_pan() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(0.0, 0.0));
        let _ = input.handle_event(button(MouseButton::Right, true));
        assert!(matches!(
            input.handle_event(moved(5.0, 0.0)),
            Some(CameraCommand::Pan { .. })
        ));

        let _ = input.handle_event(button(MouseButton::Right, false));
        let _ = input.handle_event(InputEvent::ModifiersChanged { shift: true });
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert!(matches!(
            input.handle_event(moved(9.0, 0.0)),
            Some(CameraCommand::Pan { .. })
        ));
    }

    #[test]
    fn leaving_the_window_ends_the_drag() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(100.0, 100.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert!(input.mouse_pressed());

        let _ = input.handle_event(InputEvent::PointerLeft);
        assert!(!input.mouse_pressed());
        // button-up happened outside the window and never arrives
        assert_eq!(input.handle_event(moved(400.0, 300.0)), None);
    }

    #[test]
    fn reentry_starts_a_fresh_delta() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(100.0, 100.0));
        input.release_mouse_state();
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert_eq!(
            input.handle_event(moved(700.0, 500.0)),
            Some(CameraCommand::Rotate { delta: Vec2::ZERO })
        );
    }

    #[test]
    fn scroll_always_zooms() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 2.0 }),
            Some(CameraCommand::Zoom { delta: 2.0 })
        );
    }
}
