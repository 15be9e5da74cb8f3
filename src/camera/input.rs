/// Platform-agnostic input events.
///
/// The viewer converts window-system events into these and feeds them to
/// [`ParticleCloudEngine::handle_input`](crate::ParticleCloudEngine::handle_input),
/// which drives the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// Modifier key state changed.
    ModifiersChanged {
        /// Whether the shift key is held.
        shift: bool,
    },
    /// The cursor left the window or the window lost focus. Any held drag
    /// ends, since its button-up will not arrive.
    PointerLeft,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}

/// Pixels of trackpad scroll per wheel line.
#[cfg(feature = "viewer")]
const PIXELS_PER_LINE: f32 = 100.0;

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Translate a winit window event. Returns `None` for events the camera
    /// does not consume.
    pub fn from_window_event(event: &winit::event::WindowEvent) -> Option<Self> {
        use winit::event::{ElementState, MouseScrollDelta, WindowEvent};

        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(Self::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                })
            }
            WindowEvent::MouseInput { button, state, .. } => {
                Some(Self::MouseButton {
                    button: MouseButton::from(*button),
                    pressed: *state == ElementState::Pressed,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_LINE
                    }
                };
                Some(Self::Scroll { delta })
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                Some(Self::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                })
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                Some(Self::PointerLeft)
            }
            _ => None,
        }
    }
}

#[cfg(all(test, feature = "viewer"))]
mod tests {
    use winit::event::WindowEvent;

    use super::*;

    #[test]
    fn unrelated_events_are_ignored() {
        assert_eq!(InputEvent::from_window_event(&WindowEvent::Focused(true)), None);
    }

    #[test]
    fn focus_loss_ends_pointer_interaction() {
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Focused(false)),
            Some(InputEvent::PointerLeft)
        );
    }

    #[test]
    fn mouse_buttons_map_to_left_by_default() {
        assert_eq!(
            MouseButton::from(winit::event::MouseButton::Back),
            MouseButton::Left
        );
        assert_eq!(
            MouseButton::from(winit::event::MouseButton::Right),
            MouseButton::Right
        );
    }
}
