//! Avatar widget: a filled circle with a short label centered on it.

use portal_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Canvas, Color, Constraints, Event, Message, Point, Rect, Size, TextAlign, TypeId, Widget,
};
use serde::{Deserialize, Serialize};

/// Circular avatar with initials.
#[derive(Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Label drawn in the center (usually one or two characters)
    label: String,
    /// Circle fill
    fill: Color,
    /// Label color; derived from the fill when unset
    label_color: Option<Color>,
    /// Circle diameter
    diameter: f32,
    /// Label font size
    font_size: f32,
    /// Test ID
    test_id_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl Avatar {
    /// Create an avatar with a label and fill color.
    #[must_use]
    pub fn new(label: impl Into<String>, fill: Color) -> Self {
        Self {
            label: label.into(),
            fill,
            label_color: None,
            diameter: 28.0,
            font_size: 12.0,
            test_id_value: None,
            bounds: Rect::default(),
        }
    }

    /// Set circle diameter.
    #[must_use]
    pub const fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    /// Set label font size.
    #[must_use]
    pub const fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Force a label color instead of the contrast-derived one.
    #[must_use]
    pub const fn label_color(mut self, color: Color) -> Self {
        self.label_color = Some(color);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Circle fill color.
    #[must_use]
    pub const fn fill(&self) -> Color {
        self.fill
    }

    /// Centered label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn effective_label_color(&self) -> Color {
        self.label_color.unwrap_or_else(|| self.fill.on_color())
    }

    fn radius(&self) -> f32 {
        self.bounds.width.min(self.bounds.height) / 2.0
    }
}

impl Widget for Avatar {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn type_name(&self) -> &'static str {
        "Avatar"
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(self.diameter, self.diameter))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let center = self.bounds.center();
        canvas.fill_circle(center, self.radius(), self.fill);

        let style = TextStyle {
            size: self.font_size,
            color: self.effective_label_color(),
            weight: FontWeight::Medium,
            align: TextAlign::Center,
        };
        // Baseline sits half a line below the center.
        let baseline = Point::new(center.x, center.y + self.font_size * 0.35);
        canvas.draw_text(&self.label, baseline, &style);
    }

    fn event(&mut self, _event: &Event) -> Option<Message> {
        None
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &[]
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut []
    }

    fn text_content(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Image
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
