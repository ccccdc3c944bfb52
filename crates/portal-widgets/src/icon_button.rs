//! Icon button: a small square affordance that emits a click message.

use portal_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Key, Message, MouseButton, Rect, Size, TextAlign, TypeId,
    Widget,
};
use serde::{Deserialize, Serialize};

/// Icon-only button with hover and pressed feedback.
#[derive(Clone, Serialize, Deserialize)]
pub struct IconButton {
    /// Glyph drawn in the center
    icon: String,
    /// Icon color
    color: Color,
    /// Background shown while hovered
    background_hover: Color,
    /// Edge length of the square
    size: f32,
    /// Whether the button is disabled
    disabled: bool,
    /// Test ID
    test_id_value: Option<String>,
    /// Accessible name
    accessible_name: Option<String>,
    /// Current hover state
    #[serde(skip)]
    hovered: bool,
    /// Current pressed state
    #[serde(skip)]
    pressed: bool,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

/// Message emitted when an icon button is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconButtonClicked {
    /// Test ID of the button, if it had one
    pub test_id: Option<String>,
}

impl IconButton {
    /// Create a new icon button.
    #[must_use]
    pub fn new(icon: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            color: Color::rgb(0.45, 0.45, 0.45),
            background_hover: Color::new(0.0, 0.0, 0.0, 0.08),
            size: 20.0,
            disabled: false,
            test_id_value: None,
            accessible_name: None,
            hovered: false,
            pressed: false,
            bounds: Rect::default(),
        }
    }

    /// Set icon color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set edge length.
    #[must_use]
    pub const fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name = Some(name.into());
        self
    }

    fn clicked(&self) -> Message {
        Box::new(IconButtonClicked {
            test_id: self.test_id_value.clone(),
        })
    }
}

impl Widget for IconButton {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn type_name(&self) -> &'static str {
        "IconButton"
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.size, self.size))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.hovered && !self.disabled {
            canvas.fill_rect(self.bounds, self.background_hover);
        }
        let style = TextStyle {
            size: self.size * 0.7,
            color: if self.disabled {
                Color::rgb(0.7, 0.7, 0.7)
            } else {
                self.color
            },
            weight: FontWeight::Normal,
            align: TextAlign::Center,
        };
        canvas.draw_text(&self.icon, self.bounds.center(), &style);
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        if self.disabled {
            return None;
        }

        match event {
            Event::MouseEnter => {
                self.hovered = true;
                None
            }
            Event::MouseLeave => {
                self.hovered = false;
                self.pressed = false;
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.bounds.contains_point(position) {
                    self.pressed = true;
                }
                None
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;

                if was_pressed && self.bounds.contains_point(position) {
                    Some(self.clicked())
                } else {
                    None
                }
            }
            Event::KeyDown {
                key: Key::Enter | Key::Space,
            } => {
                self.pressed = true;
                None
            }
            Event::KeyUp {
                key: Key::Enter | Key::Space,
            } => {
                let was_pressed = self.pressed;
                self.pressed = false;
                was_pressed.then(|| self.clicked())
            }
            _ => None,
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
