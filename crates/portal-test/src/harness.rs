//! Test harness for portal widgets.

use portal_core::{
    Constraints, Event, Key, Message, MouseButton, RecordingCanvas, Rect, Size, Widget,
};
use std::collections::VecDeque;

use crate::selector::Selector;

/// Test harness for interacting with a widget tree.
///
/// The root widget receives every simulated event, the same way a host
/// window would route input; the harness re-lays the tree out after each
/// batch so queries see fresh bounds.
pub struct Harness<W: Widget> {
    /// Root widget being tested
    root: W,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Current viewport size
    viewport: Rect,
    /// Messages returned by the root, oldest first
    messages: Vec<Message>,
}

impl<W: Widget> Harness<W> {
    /// Create a new harness with a root widget and lay it out.
    pub fn new(root: W) -> Self {
        let mut harness = Self {
            root,
            event_queue: VecDeque::new(),
            viewport: Rect::new(0.0, 0.0, 240.0, 48.0),
            messages: Vec::new(),
        };
        harness.relayout();
        harness
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Rect::new(0.0, 0.0, width, height);
        self.relayout();
        self
    }

    /// Borrow the root widget.
    pub const fn root(&self) -> &W {
        &self.root
    }

    /// Mutably borrow the root widget. Call [`Harness::relayout`] afterwards
    /// if the change affects geometry, or use [`Harness::update`].
    pub fn root_mut(&mut self) -> &mut W {
        &mut self.root
    }

    /// Apply a change to the root and re-render it.
    pub fn update(&mut self, f: impl FnOnce(&mut W)) -> &mut Self {
        f(&mut self.root);
        self.relayout();
        self
    }

    /// Measure and lay out the root within the viewport.
    pub fn relayout(&mut self) {
        let size = self
            .root
            .measure(Constraints::loose(Size::new(self.viewport.width, self.viewport.height)));
        self.root
            .layout(Rect::new(self.viewport.x, self.viewport.y, size.width, size.height));
    }

    // === Event Simulation ===

    /// Simulate a click on a widget matching the selector.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            let center = bounds.center();
            self.event_queue
                .push_back(Event::MouseMove { position: center });
            self.event_queue.push_back(Event::MouseDown {
                position: center,
                button: MouseButton::Left,
            });
            self.event_queue.push_back(Event::MouseUp {
                position: center,
                button: MouseButton::Left,
            });
            self.process_events();
        }
        self
    }

    /// Simulate the pointer moving over a widget matching the selector.
    pub fn hover(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            self.event_queue.push_back(Event::MouseMove {
                position: bounds.center(),
            });
            self.event_queue.push_back(Event::MouseEnter);
            self.process_events();
        }
        self
    }

    /// Simulate the pointer leaving a widget matching the selector.
    pub fn unhover(&mut self, selector: &str) -> &mut Self {
        if self.exists(selector) {
            self.event_queue.push_back(Event::MouseLeave);
            self.process_events();
        }
        self
    }

    /// Simulate a key press.
    pub fn press_key(&mut self, key: Key) -> &mut Self {
        self.event_queue.push_back(Event::KeyDown { key });
        self.event_queue.push_back(Event::KeyUp { key });
        self.process_events();
        self
    }

    /// Dispatch a raw event to the root.
    pub fn dispatch(&mut self, event: Event) -> &mut Self {
        self.event_queue.push_back(event);
        self.process_events();
        self
    }

    // === Messages ===

    /// Drain messages emitted since the last call.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }

    /// Drain messages and keep those of type `T`.
    pub fn take_messages_of<T: 'static>(&mut self) -> Vec<T> {
        self.take_messages()
            .into_iter()
            .filter_map(|m| m.downcast::<T>().ok().map(|b| *b))
            .collect()
    }

    // === Rendering ===

    /// Paint the tree into a fresh recording canvas.
    #[must_use]
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.root.paint(&mut canvas);
        canvas
    }

    // === Queries ===

    /// Query for a widget matching the selector.
    #[must_use]
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        let sel = Selector::parse(selector).ok()?;
        self.find(&sel)
    }

    /// Query for all widgets matching the selector.
    #[must_use]
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut results: Vec<&dyn Widget> = Vec::new();
        if sel.matches(&self.root) {
            results.push(&self.root);
        }
        find_all_widgets(self.root.children(), &sel, &mut results);
        results
    }

    /// Find a widget whose visible text is exactly `text`.
    #[must_use]
    pub fn get_by_text(&self, text: &str) -> Option<&dyn Widget> {
        self.find(&Selector::Text(text.to_string()))
    }

    /// Find a widget by test ID.
    #[must_use]
    pub fn get_by_test_id(&self, id: &str) -> Option<&dyn Widget> {
        self.find(&Selector::TestId(id.to_string()))
    }

    /// Get visible text (falling back to the accessible name) of a widget.
    #[must_use]
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(|w| w.text_content().or_else(|| w.accessible_name()))
            .unwrap_or_default()
            .to_string()
    }

    /// Check if a widget exists.
    #[must_use]
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a widget does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the widget exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected widget matching '{selector}' to not exist"
        );
        self
    }

    /// Assert that some widget displays exactly `text`.
    ///
    /// # Panics
    ///
    /// Panics if no widget displays the text.
    pub fn assert_text_visible(&self, text: &str) -> &Self {
        assert!(
            self.get_by_text(text).is_some(),
            "Expected text '{text}' to be displayed"
        );
        self
    }

    /// Assert that text matches exactly.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            if let Some(message) = self.root.event(&event) {
                self.messages.push(message);
            }
            self.relayout();
        }
    }

    fn find(&self, selector: &Selector) -> Option<&dyn Widget> {
        if selector.matches(&self.root) {
            return Some(&self.root);
        }
        find_widget(self.root.children(), selector)
    }

    fn query_bounds(&self, selector: &str) -> Option<Rect> {
        self.query(selector).map(|w| w.bounds())
    }
}

fn find_widget<'a>(widgets: &'a [Box<dyn Widget>], selector: &Selector) -> Option<&'a dyn Widget> {
    for widget in widgets {
        if selector.matches(widget.as_ref()) {
            return Some(widget.as_ref());
        }
        if let Some(found) = find_widget(widget.children(), selector) {
            return Some(found);
        }
    }
    None
}

fn find_all_widgets<'a>(
    widgets: &'a [Box<dyn Widget>],
    selector: &Selector,
    results: &mut Vec<&'a dyn Widget>,
) {
    for widget in widgets {
        if selector.matches(widget.as_ref()) {
            results.push(widget.as_ref());
        }
        find_all_widgets(widget.children(), selector, results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{widget::LayoutResult, Canvas, TypeId};

    // Mock widget for testing
    struct MockWidget {
        test_id: Option<String>,
        text: Option<String>,
        children: Vec<Box<dyn Widget>>,
        entered: usize,
        bounds: Rect,
    }

    impl MockWidget {
        fn new() -> Self {
            Self {
                test_id: None,
                text: None,
                children: Vec::new(),
                entered: 0,
                bounds: Rect::default(),
            }
        }

        fn with_test_id(mut self, id: &str) -> Self {
            self.test_id = Some(id.to_string());
            self
        }

        fn with_text(mut self, text: &str) -> Self {
            self.text = Some(text.to_string());
            self
        }

        fn with_child(mut self, child: Self) -> Self {
            self.children.push(Box::new(child));
            self
        }
    }

    impl Widget for MockWidget {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }
        fn type_name(&self) -> &'static str {
            "Mock"
        }
        fn measure(&self, c: Constraints) -> Size {
            c.constrain(Size::new(100.0, 50.0))
        }
        fn layout(&mut self, b: Rect) -> LayoutResult {
            self.bounds = b;
            LayoutResult { size: b.size() }
        }
        fn paint(&self, canvas: &mut dyn Canvas) {
            if let Some(text) = &self.text {
                canvas.draw_text(text, self.bounds.origin(), &portal_core::TextStyle::default());
            }
        }
        fn event(&mut self, event: &Event) -> Option<Message> {
            match event {
                Event::MouseEnter => {
                    self.entered += 1;
                    Some(Box::new(self.entered))
                }
                _ => None,
            }
        }
        fn children(&self) -> &[Box<dyn Widget>] {
            &self.children
        }
        fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
            &mut self.children
        }
        fn test_id(&self) -> Option<&str> {
            self.test_id.as_deref()
        }
        fn text_content(&self) -> Option<&str> {
            self.text.as_deref()
        }
        fn bounds(&self) -> Rect {
            self.bounds
        }
    }

    #[test]
    fn test_harness_exists() {
        let harness = Harness::new(MockWidget::new().with_test_id("root"));
        assert!(harness.exists("[data-testid='root']"));
        assert!(!harness.exists("[data-testid='nonexistent']"));
        assert!(harness.exists("Mock"));
    }

    #[test]
    #[should_panic(expected = "Expected widget matching")]
    fn test_harness_assert_exists_fails() {
        let harness = Harness::new(MockWidget::new());
        harness.assert_exists("[data-testid='missing']");
    }

    #[test]
    fn test_harness_text_queries() {
        let widget = MockWidget::new().with_child(MockWidget::new().with_text("ST"));
        let harness = Harness::new(widget);
        assert!(harness.get_by_text("ST").is_some());
        assert!(harness.get_by_text("S").is_none());
        harness.assert_text_visible("ST").assert_text("text=ST", "ST");
    }

    #[test]
    fn test_harness_query_all_nested() {
        let widget = MockWidget::new()
            .with_child(MockWidget::new().with_test_id("item"))
            .with_child(
                MockWidget::new()
                    .with_test_id("group")
                    .with_child(MockWidget::new().with_test_id("item")),
            );
        let harness = Harness::new(widget);
        harness.assert_count("[data-testid='item']", 2);
        assert!(harness.get_by_test_id("group").is_some());
    }

    #[test]
    fn test_harness_hover_collects_messages() {
        let mut harness = Harness::new(MockWidget::new().with_test_id("root"));
        harness.hover("[data-testid='root']").hover("[data-testid='root']");
        assert_eq!(harness.take_messages_of::<usize>(), vec![1, 2]);
        assert!(harness.take_messages().is_empty());
        assert_eq!(harness.root().entered, 2);
    }

    #[test]
    fn test_harness_hover_missing_selector_is_noop() {
        let mut harness = Harness::new(MockWidget::new());
        harness.hover("[data-testid='missing']");
        assert_eq!(harness.root().entered, 0);
    }

    #[test]
    fn test_harness_layout_uses_viewport() {
        let harness = Harness::new(MockWidget::new()).viewport(60.0, 20.0);
        assert_eq!(harness.root().bounds, Rect::new(0.0, 0.0, 60.0, 20.0));
    }

    #[test]
    fn test_harness_paint_and_update() {
        let mut harness = Harness::new(MockWidget::new().with_text("before"));
        assert_eq!(harness.paint().texts(), vec!["before"]);
        harness.update(|w| w.text = Some("after".to_string()));
        assert_eq!(harness.paint().texts(), vec!["after"]);
    }
}
