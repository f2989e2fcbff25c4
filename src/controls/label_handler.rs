/*
 * Static text and edit controls. Both wrap native classes and keep native
 * painting. A label created with a zero width or height sizes itself to its
 * text, and keeps doing so whenever the text changes.
 */
use crate::error::Result as PlatformResult;
use crate::types::{Rect, WindowClass, WindowConfig, WindowStyle};
use crate::window_common::{Window, WindowNode};

use std::cell::Cell;
use std::rc::Rc;

pub struct Label {
    node: Rc<WindowNode>,
    auto_size: Cell<bool>,
}

impl Label {
    pub fn new(parent: &Rc<WindowNode>, text: &str, bounds: Rect) -> PlatformResult<Self> {
        let auto_size = bounds.width() == 0 || bounds.height() == 0;
        let (width, height) = if auto_size {
            (1, 1)
        } else {
            (bounds.width(), bounds.height())
        };
        let config = WindowConfig::new(
            text,
            WindowStyle::child(),
            bounds.left,
            bounds.top,
            width,
            height,
        )
        .with_class(WindowClass::Static);
        let node = WindowNode::create(parent.native_ref(), &config, Some(parent))?;
        let label = Self {
            node,
            auto_size: Cell::new(auto_size),
        };
        if auto_size {
            label.fit_to(text);
        }
        Ok(label)
    }

    pub fn is_auto_size(&self) -> bool {
        self.auto_size.get()
    }

    /// Takes effect on the next `set_text`.
    pub fn set_auto_size(&self, enable: bool) {
        self.auto_size.set(enable);
    }

    pub fn text(&self) -> String {
        self.node.text()
    }

    pub fn set_text(&self, text: &str) {
        self.node.set_text(text);
        if self.auto_size.get() {
            self.fit_to(text);
        }
    }

    fn fit_to(&self, text: &str) {
        let size = self.node.measure_text(text);
        self.node.set_size(size.width, size.height);
    }
}

impl Window for Label {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

/// Single-line edit field with a sunken client edge.
pub struct TextBox {
    node: Rc<WindowNode>,
}

impl TextBox {
    pub fn new(parent: &Rc<WindowNode>, text: &str, bounds: Rect) -> PlatformResult<Self> {
        let style = WindowStyle {
            tab_stop: true,
            client_edge: true,
            ..WindowStyle::child()
        };
        let config = WindowConfig::new(
            text,
            style,
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height(),
        )
        .with_class(WindowClass::Edit);
        let node = WindowNode::create(parent.native_ref(), &config, Some(parent))?;
        Ok(Self { node })
    }

    pub fn text(&self) -> String {
        self.node.text()
    }

    pub fn set_text(&self, text: &str) {
        self.node.set_text(text);
    }
}

impl Window for TextBox {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_backend::{HEADLESS_CHAR_WIDTH, HEADLESS_LINE_HEIGHT, HeadlessPlatform};
    use crate::native::NativeRef;
    use crate::types::{DockType, Size};

    fn main_window() -> Rc<WindowNode> {
        let headless = Rc::new(HeadlessPlatform::new());
        let native: NativeRef = headless;
        WindowNode::create(
            &native,
            &WindowConfig::new("main", WindowStyle::top_level(), 0, 0, 300, 200),
            None,
        )
        .expect("main")
    }

    #[test]
    fn auto_sized_label_follows_its_text() {
        // Arrange
        let main = main_window();
        let label = Label::new(&main, "Name", Rect::default()).expect("label");
        assert_eq!(label.size(), Size::new(4 * HEADLESS_CHAR_WIDTH, HEADLESS_LINE_HEIGHT));
        // Act
        label.set_text("Full name");
        // Assert
        assert_eq!(label.size(), Size::new(9 * HEADLESS_CHAR_WIDTH, HEADLESS_LINE_HEIGHT));
        assert_eq!(label.text(), "Full name");
    }

    #[test]
    fn fixed_label_keeps_its_size() {
        let main = main_window();
        let label = Label::new(&main, "Name", Rect::new(0, 0, 100, 20)).expect("label");

        label.set_text("A much longer caption");

        assert!(!label.is_auto_size());
        assert_eq!(label.size(), Size::new(100, 20));
    }

    #[test]
    fn docked_text_box_spans_the_parent_width() {
        let main = main_window();
        let text_box = TextBox::new(&main, "", Rect::new(0, 0, 50, 22)).expect("text box");

        text_box.set_dock_type(DockType::Top);

        assert_eq!(text_box.size(), Size::new(300, 22));
        assert!(text_box.node().is_subclassed());
    }
}
