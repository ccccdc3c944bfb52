//! Sidebar entry for one shortcut.
//!
//! A [`ShortcutItem`] draws a colored avatar with the title's abbreviation,
//! the full title when the sidebar is open, and an edit button while the
//! pointer hovers over it. The avatar label and color are derived from the
//! current shortcut every time the item is rendered.

use crate::abbreviation::abbreviate;
use crate::api::ShortcutApi;
use crate::config::SidebarOptions;
use crate::error::ShortcutError;
use crate::form::ShortcutForm;
use crate::types::Shortcut;
use portal_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult},
    Canvas, Color, Constraints, Event, Key, Message, MouseButton, Rect, Size, TypeId,
    Widget,
};
use portal_widgets::{Avatar, IconButton, IconButtonClicked, Text};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Test id of the edit button.
pub const EDIT_TEST_ID: &str = "edit";

const PADDING: f32 = 12.0;
const AVATAR_SIZE: f32 = 28.0;
const GAP: f32 = 12.0;
const EDIT_SIZE: f32 = 20.0;
const ROW_HEIGHT: f32 = 40.0;
const TITLE_SIZE: f32 = 14.0;
// Width used when the parent does not bound us.
const PREFERRED_OPEN_WIDTH: f32 = 224.0;

/// Hover state of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// Pointer elsewhere; edit button hidden
    #[default]
    Idle,
    /// Pointer over the item; edit button visible
    Hovered,
}

/// Emitted when the edit button is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEditRequested {
    /// Shortcut being edited
    pub shortcut: Shortcut,
}

/// Emitted when the item itself is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutNavigate {
    /// Destination
    pub url: String,
}

/// Sidebar item widget.
pub struct ShortcutItem {
    shortcut: Shortcut,
    api: Arc<dyn ShortcutApi>,
    options: SidebarOptions,
    hover: HoverState,
    editing: Option<ShortcutForm>,
    children: Vec<Box<dyn Widget>>,
    bounds: Rect,
    pressed: bool,
}

impl std::fmt::Debug for ShortcutItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutItem")
            .field("shortcut", &self.shortcut)
            .field("options", &self.options)
            .field("hover", &self.hover)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

impl ShortcutItem {
    /// Create an item for `shortcut` that delegates persistence to `api`.
    pub fn new(shortcut: Shortcut, api: Arc<dyn ShortcutApi>, options: SidebarOptions) -> Self {
        let mut item = Self {
            shortcut,
            api,
            options,
            hover: HoverState::Idle,
            editing: None,
            children: Vec::new(),
            bounds: Rect::default(),
            pressed: false,
        };
        item.render();
        item
    }

    /// Shortcut currently shown.
    #[must_use]
    pub const fn shortcut(&self) -> &Shortcut {
        &self.shortcut
    }

    /// Replace the shown shortcut. A different id resets hover and edit state.
    pub fn set_shortcut(&mut self, shortcut: Shortcut) {
        if shortcut.id != self.shortcut.id {
            self.hover = HoverState::Idle;
            self.editing = None;
            self.pressed = false;
        }
        self.shortcut = shortcut;
        self.render();
    }

    /// Sidebar options in use.
    #[must_use]
    pub const fn options(&self) -> SidebarOptions {
        self.options
    }

    /// Change the sidebar options.
    pub fn set_options(&mut self, options: SidebarOptions) {
        self.options = options;
        self.render();
    }

    /// Current hover state.
    #[must_use]
    pub const fn hover_state(&self) -> HoverState {
        self.hover
    }

    /// Label shown on the avatar.
    #[must_use]
    pub fn abbreviation(&self) -> String {
        abbreviate(&self.shortcut.title)
    }

    /// Avatar fill color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.api.color(&self.shortcut.url)
    }

    /// Whether the edit form is open.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The open edit form.
    #[must_use]
    pub const fn form(&self) -> Option<&ShortcutForm> {
        self.editing.as_ref()
    }

    /// Mutable access to the open edit form.
    pub fn form_mut(&mut self) -> Option<&mut ShortcutForm> {
        self.editing.as_mut()
    }

    /// Open the edit form seeded with the current shortcut.
    pub fn begin_edit(&mut self) -> &mut ShortcutForm {
        debug!(id = %self.shortcut.id, "editing shortcut");
        self.editing
            .insert(ShortcutForm::from_shortcut(&self.shortcut))
    }

    /// Close the edit form without saving.
    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            debug!(id = %self.shortcut.id, "cancelled shortcut edit");
        }
    }

    /// Validate the edit form and store the result.
    ///
    /// On success the item shows the updated shortcut and leaves edit mode.
    /// On failure the form stays open so it can be corrected. Calling this
    /// while not editing is a no-op returning the current shortcut.
    pub async fn save_edit(&mut self) -> Result<Shortcut, ShortcutError> {
        let Some(form) = &self.editing else {
            return Ok(self.shortcut.clone());
        };
        let updated = form.validate()?.with_id(self.shortcut.id.clone());

        let saved = self.api.update(updated).await.map_err(|err| {
            warn!(id = %self.shortcut.id, error = %err, "failed to save shortcut");
            err
        })?;

        self.editing = None;
        self.shortcut = saved.clone();
        self.render();
        Ok(saved)
    }

    /// Delete the shortcut through the API.
    pub async fn remove(&mut self) -> Result<(), ShortcutError> {
        self.api.remove(&self.shortcut.id).await.map_err(|err| {
            warn!(id = %self.shortcut.id, error = %err, "failed to remove shortcut");
            err
        })?;
        self.editing = None;
        Ok(())
    }

    fn set_hover(&mut self, hover: HoverState) {
        if self.hover != hover {
            trace!(id = %self.shortcut.id, ?hover, "hover changed");
            self.hover = hover;
            self.render();
        }
    }

    /// Rebuild the child widgets from current state.
    fn render(&mut self) {
        let mut children: Vec<Box<dyn Widget>> = Vec::with_capacity(3);

        children.push(Box::new(
            Avatar::new(self.abbreviation(), self.color())
                .diameter(AVATAR_SIZE)
                .with_test_id("shortcut-avatar"),
        ));

        if self.options.is_open {
            children.push(Box::new(
                Text::new(self.shortcut.title.clone())
                    .font_size(TITLE_SIZE)
                    .font_weight(FontWeight::Normal)
                    .with_test_id("shortcut-title"),
            ));
        }

        if self.hover == HoverState::Hovered {
            children.push(Box::new(
                IconButton::new("✎")
                    .size(EDIT_SIZE)
                    .with_test_id(EDIT_TEST_ID)
                    .with_accessible_name("Edit shortcut"),
            ));
        }

        self.children = children;
        let bounds = self.bounds;
        if bounds != Rect::default() {
            self.layout(bounds);
        }
    }

    fn collapsed_width() -> f32 {
        PADDING * 2.0 + AVATAR_SIZE
    }

    fn edit_bounds(&self) -> Option<Rect> {
        self.children
            .iter()
            .find(|c| c.test_id() == Some(EDIT_TEST_ID))
            .map(|c| c.bounds())
    }

    fn forward(&mut self, event: &Event) -> Option<Message> {
        self.children
            .iter_mut()
            .find_map(|child| child.event(event))
    }
}

impl Widget for ShortcutItem {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn type_name(&self) -> &'static str {
        "ShortcutItem"
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if self.options.is_open {
            if constraints.max_width.is_finite() {
                constraints.max_width
            } else {
                PREFERRED_OPEN_WIDTH
            }
        } else {
            Self::collapsed_width()
        };
        constraints.constrain(Size::new(width, ROW_HEIGHT))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let center_y = bounds.y + bounds.height / 2.0;
        let right = bounds.x + bounds.width;
        let has_edit = self
            .children
            .iter()
            .any(|c| c.test_id() == Some(EDIT_TEST_ID));
        // Collapsed rows overlay the button on the avatar's right edge.
        let edit_x = if self.options.is_open {
            right - PADDING - EDIT_SIZE
        } else {
            right - EDIT_SIZE
        };
        let limit = if has_edit && self.options.is_open {
            edit_x - GAP
        } else {
            right - PADDING
        };
        let mut x = bounds.x + PADDING;

        for child in &mut self.children {
            let size = child.measure(Constraints::loose(bounds.size()));
            let top = center_y - size.height / 2.0;
            let child_bounds = if child.test_id() == Some(EDIT_TEST_ID) {
                Rect::new(edit_x, top, size.width, size.height)
            } else if child.type_name() == "Avatar" {
                let r = Rect::new(x, top, size.width, size.height);
                x += size.width + GAP;
                r
            } else {
                let width = size.width.min((limit - x).max(0.0));
                let r = Rect::new(x, top, width, size.height);
                x += width + GAP;
                r
            };
            child.layout(child_bounds);
        }

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.hover == HoverState::Hovered {
            canvas.fill_rect(self.bounds, Color::new(1.0, 1.0, 1.0, 0.08));
        }
        for child in &self.children {
            child.paint(canvas);
        }
    }

    fn event(&mut self, event: &Event) -> Option<Message> {
        match event {
            Event::MouseEnter => {
                self.set_hover(HoverState::Hovered);
                None
            }
            Event::MouseLeave => {
                self.pressed = false;
                self.set_hover(HoverState::Idle);
                None
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                let forwarded = self.forward(event);
                let on_edit = self.edit_bounds().is_some_and(|r| r.contains_point(position));
                self.pressed = !on_edit && self.bounds.contains_point(position);
                forwarded
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } => {
                let was_pressed = std::mem::take(&mut self.pressed);
                if let Some(message) = self.forward(event) {
                    return match message.downcast::<IconButtonClicked>() {
                        Ok(clicked) if clicked.test_id.as_deref() == Some(EDIT_TEST_ID) => {
                            self.begin_edit();
                            Some(Box::new(ShortcutEditRequested {
                                shortcut: self.shortcut.clone(),
                            }))
                        }
                        Ok(clicked) => Some(clicked as Message),
                        Err(other) => Some(other),
                    };
                }
                (was_pressed && self.bounds.contains_point(position)).then(|| {
                    debug!(url = %self.shortcut.url, "navigating to shortcut");
                    Box::new(ShortcutNavigate {
                        url: self.shortcut.url.clone(),
                    }) as Message
                })
            }
            Event::KeyDown { key: Key::Escape } => {
                self.cancel_edit();
                None
            }
            _ => self.forward(event),
        }
    }

    fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.children
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.shortcut.title)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Link
    }

    fn test_id(&self) -> Option<&str> {
        Some("shortcut-item")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::LocalStoredShortcuts;
    use crate::storage::MemoryStorage;
    use portal_core::{Point, RecordingCanvas};

    fn item(title: &str, options: SidebarOptions) -> ShortcutItem {
        let api = Arc::new(LocalStoredShortcuts::new(Arc::new(MemoryStorage::new())));
        let mut item = ShortcutItem::new(Shortcut::new("id", "/some-url", title), api, options);
        item.layout(Rect::new(0.0, 0.0, 240.0, ROW_HEIGHT));
        item
    }

    fn type_names(item: &ShortcutItem) -> Vec<&'static str> {
        item.children().iter().map(|c| c.type_name()).collect()
    }

    #[test]
    fn test_initial_children() {
        let item = item("some title", SidebarOptions::open());
        assert_eq!(item.hover_state(), HoverState::Idle);
        assert_eq!(type_names(&item), vec!["Avatar", "Text"]);
        assert_eq!(item.children()[0].text_content(), Some("ST"));
        assert_eq!(item.children()[1].text_content(), Some("some title"));
    }

    #[test]
    fn test_collapsed_sidebar_hides_title() {
        let item = item("some title", SidebarOptions::collapsed());
        assert_eq!(type_names(&item), vec!["Avatar"]);
        assert_eq!(
            item.measure(Constraints::loose(Size::new(240.0, 48.0))),
            Size::new(52.0, ROW_HEIGHT)
        );
    }

    #[test]
    fn test_collapsed_avatar_keeps_full_size() {
        let mut item = item("some title", SidebarOptions::collapsed());
        item.layout(Rect::new(0.0, 0.0, 52.0, ROW_HEIGHT));
        assert_eq!(item.children()[0].bounds().width, AVATAR_SIZE);

        item.event(&Event::MouseEnter);
        assert_eq!(item.children()[0].bounds().width, AVATAR_SIZE);
        let edit = item.edit_bounds().unwrap();
        assert_eq!(edit.x + edit.width, 52.0);
    }

    #[test]
    fn test_idle_title_uses_edit_slot() {
        let mut item = item("some title", SidebarOptions::open());
        item.layout(Rect::new(0.0, 0.0, 120.0, ROW_HEIGHT));
        let idle = item.children()[1].bounds().width;

        item.event(&Event::MouseEnter);
        let hovered = item.children()[1].bounds().width;
        assert!(hovered < idle, "{hovered} should be narrower than {idle}");
    }

    struct EmitsOnPress;

    impl Widget for EmitsOnPress {
        fn type_id(&self) -> TypeId {
            TypeId::of::<Self>()
        }

        fn type_name(&self) -> &'static str {
            "EmitsOnPress"
        }

        fn measure(&self, constraints: Constraints) -> Size {
            constraints.constrain(Size::new(10.0, 10.0))
        }

        fn layout(&mut self, bounds: Rect) -> LayoutResult {
            LayoutResult {
                size: bounds.size(),
            }
        }

        fn paint(&self, _canvas: &mut dyn Canvas) {}

        fn event(&mut self, event: &Event) -> Option<Message> {
            matches!(event, Event::MouseDown { .. }).then(|| Box::new("pressed") as Message)
        }

        fn children(&self) -> &[Box<dyn Widget>] {
            &[]
        }

        fn children_mut(&mut self) -> &mut [Box<dyn Widget>] {
            &mut []
        }
    }

    #[test]
    fn test_press_returns_child_message() {
        let mut item = item("some title", SidebarOptions::open());
        item.children.push(Box::new(EmitsOnPress));
        let msg = item
            .event(&Event::MouseDown {
                position: Point::new(20.0, 20.0),
                button: MouseButton::Left,
            })
            .expect("child message");
        assert_eq!(*msg.downcast::<&str>().unwrap(), "pressed");
    }

    #[test]
    fn test_open_sidebar_fills_width() {
        let item = item("x", SidebarOptions::open());
        assert_eq!(
            item.measure(Constraints::loose(Size::new(240.0, 48.0))),
            Size::new(240.0, ROW_HEIGHT)
        );
        assert_eq!(
            item.measure(Constraints::unbounded()).width,
            PREFERRED_OPEN_WIDTH
        );
    }

    #[test]
    fn test_hover_toggles_edit_button() {
        let mut item = item("some title", SidebarOptions::open());
        item.event(&Event::MouseEnter);
        assert_eq!(item.hover_state(), HoverState::Hovered);
        assert_eq!(type_names(&item), vec!["Avatar", "Text", "IconButton"]);

        item.event(&Event::MouseLeave);
        assert_eq!(item.hover_state(), HoverState::Idle);
        assert_eq!(type_names(&item), vec!["Avatar", "Text"]);
    }

    #[test]
    fn test_rapid_enter_leave_applies_in_order() {
        let mut item = item("some title", SidebarOptions::open());
        for _ in 0..3 {
            item.event(&Event::MouseEnter);
            item.event(&Event::MouseLeave);
        }
        item.event(&Event::MouseEnter);
        assert_eq!(item.hover_state(), HoverState::Hovered);
    }

    #[test]
    fn test_edit_button_sits_at_right_edge() {
        let mut item = item("some title", SidebarOptions::open());
        item.event(&Event::MouseEnter);
        let edit = item.edit_bounds().unwrap();
        assert_eq!(edit.x, 240.0 - PADDING - EDIT_SIZE);
        assert_eq!(edit.width, EDIT_SIZE);
        assert_eq!(edit.y, (ROW_HEIGHT - EDIT_SIZE) / 2.0);
    }

    #[test]
    fn test_set_shortcut_recomputes_and_resets_hover() {
        let mut item = item("some title", SidebarOptions::open());
        item.event(&Event::MouseEnter);

        item.set_shortcut(Shortcut::new("id", "/some-url", "two title"));
        assert_eq!(item.abbreviation(), "TT");
        assert_eq!(item.hover_state(), HoverState::Hovered);

        item.set_shortcut(Shortcut::new("other", "/some-url", "two title"));
        assert_eq!(item.hover_state(), HoverState::Idle);
    }

    #[test]
    fn test_click_on_item_navigates() {
        let mut item = item("some title", SidebarOptions::open());
        let at = Point::new(20.0, 20.0);
        item.event(&Event::MouseDown {
            position: at,
            button: MouseButton::Left,
        });
        let msg = item
            .event(&Event::MouseUp {
                position: at,
                button: MouseButton::Left,
            })
            .expect("navigate");
        let nav = msg.downcast::<ShortcutNavigate>().unwrap();
        assert_eq!(nav.url, "/some-url");
    }

    #[test]
    fn test_click_on_edit_opens_form() {
        let mut item = item("some title", SidebarOptions::open());
        item.event(&Event::MouseEnter);
        let at = item.edit_bounds().unwrap().center();
        item.event(&Event::MouseDown {
            position: at,
            button: MouseButton::Left,
        });
        let msg = item
            .event(&Event::MouseUp {
                position: at,
                button: MouseButton::Left,
            })
            .expect("edit requested");
        let requested = msg.downcast::<ShortcutEditRequested>().unwrap();
        assert_eq!(requested.shortcut.title, "some title");
        assert!(item.is_editing());
        assert_eq!(item.form().unwrap().url, "/some-url");

        item.event(&Event::KeyDown { key: Key::Escape });
        assert!(!item.is_editing());
    }

    #[test]
    fn test_paint_draws_avatar_with_resolved_color() {
        let item = item("some title", SidebarOptions::open());
        let mut canvas = RecordingCanvas::new();
        item.paint(&mut canvas);
        assert_eq!(canvas.first_circle_fill(), Some(item.color()));
        assert_eq!(canvas.texts(), vec!["ST", "some title"]);
    }

    #[tokio::test]
    async fn test_save_edit_with_invalid_form_keeps_editing() {
        let mut item = item("some title", SidebarOptions::open());
        item.begin_edit().title = "   ".to_string();
        let err = item.save_edit().await.unwrap_err();
        assert!(matches!(err, ShortcutError::InvalidForm(_)));
        assert!(item.is_editing());
        assert_eq!(item.shortcut().title, "some title");
    }

    #[tokio::test]
    async fn test_save_without_form_is_noop() {
        let mut item = item("some title", SidebarOptions::open());
        let saved = item.save_edit().await.unwrap();
        assert_eq!(saved, *item.shortcut());
    }
}
