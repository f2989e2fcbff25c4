/*
 * Push buttons and group boxes. Both wrap the native "Button" class; the node
 * is subclassed, so painting stays native. A click arrives as a command
 * notification at the parent and is reflected back to the button node, where
 * it is turned into the button's click callback.
 */
use crate::error::Result as PlatformResult;
use crate::types::{Rect, WindowClass, WindowConfig, WindowStyle};
use crate::window_common::{Window, WindowNode};

use std::rc::Rc;

/// Notification code of a button click.
pub const BN_CLICKED: i32 = 0;

/// Controls that report clicks through command reflection.
pub trait ClickSource: Window {
    /// Replaces the click callback; only one is kept.
    fn set_click_handler(&self, handler: impl Fn() + 'static) {
        self.node().set_command_handler(move |code| {
            if code == BN_CLICKED {
                handler();
            }
        });
    }
}

fn subclassed_child(text: &str, bounds: Rect, class: WindowClass) -> WindowConfig {
    let style = WindowStyle {
        tab_stop: true,
        ..WindowStyle::child()
    };
    WindowConfig::new(text, style, bounds.left, bounds.top, bounds.width(), bounds.height())
        .with_class(class)
}

pub struct Button {
    node: Rc<WindowNode>,
}

impl Button {
    /*
     * Creates a push button. A zero width or height makes the button size
     * itself to its caption once the native control exists.
     */
    pub fn new(parent: &Rc<WindowNode>, text: &str, bounds: Rect) -> PlatformResult<Self> {
        let auto_size = bounds.width() == 0 || bounds.height() == 0;
        let initial = if auto_size {
            Rect::new(bounds.left, bounds.top, bounds.left + 1, bounds.top + 1)
        } else {
            bounds
        };
        let config = subclassed_child(text, initial, WindowClass::Button);
        let node = WindowNode::create(parent.native_ref(), &config, Some(parent))?;
        if auto_size {
            let caption = node.measure_text(text);
            log::debug!("ButtonHandler: '{text}' sized to caption {caption:?}");
            node.set_size(caption.width, caption.height);
        }
        Ok(Self { node })
    }

    pub fn text(&self) -> String {
        self.node.text()
    }

    pub fn set_text(&self, text: &str) {
        self.node.set_text(text);
    }
}

impl Window for Button {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

impl ClickSource for Button {}

/// Captioned frame grouping other controls; never reports clicks.
pub struct GroupBox {
    node: Rc<WindowNode>,
}

impl GroupBox {
    pub fn new(parent: &Rc<WindowNode>, text: &str, bounds: Rect) -> PlatformResult<Self> {
        let mut config = subclassed_child(text, bounds, WindowClass::GroupBox);
        config.style.tab_stop = false;
        let node = WindowNode::create(parent.native_ref(), &config, Some(parent))?;
        Ok(Self { node })
    }
}

impl Window for GroupBox {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_backend::{HEADLESS_CHAR_WIDTH, HEADLESS_LINE_HEIGHT, HeadlessPlatform};
    use crate::message::{RawMessage, WM_COMMAND};
    use crate::native::{NativeRef, NativeWindowing};
    use crate::types::Size;
    use std::cell::Cell;

    fn main_window() -> (Rc<HeadlessPlatform>, Rc<WindowNode>) {
        let headless = Rc::new(HeadlessPlatform::new());
        let native: NativeRef = headless.clone();
        let main = WindowNode::create(
            &native,
            &WindowConfig::new("main", WindowStyle::top_level(), 0, 0, 300, 200),
            None,
        )
        .expect("main");
        (headless, main)
    }

    fn command(parent: &Rc<WindowNode>, source: &Rc<WindowNode>, code: i32) -> RawMessage {
        RawMessage::new(
            parent.handle(),
            WM_COMMAND,
            ((code as usize) & 0xFFFF) << 16,
            source.handle().raw(),
        )
    }

    #[test]
    fn reflected_click_reaches_the_button_handler() {
        // Arrange
        let (headless, main) = main_window();
        let button = Button::new(&main, "OK", Rect::new(5, 5, 80, 30)).expect("button");
        let clicks = Rc::new(Cell::new(0));
        let sink = Rc::clone(&clicks);
        button.set_click_handler(move || sink.set(sink.get() + 1));
        // Act
        headless.dispatch_message(&command(&main, button.node(), BN_CLICKED));
        // Assert
        assert_eq!(clicks.get(), 1);
        assert!(button.node().is_subclassed());
    }

    #[test]
    fn other_notification_codes_are_not_clicks() {
        let (headless, main) = main_window();
        let button = Button::new(&main, "OK", Rect::new(5, 5, 80, 30)).expect("button");
        let clicks = Rc::new(Cell::new(0));
        let sink = Rc::clone(&clicks);
        button.set_click_handler(move || sink.set(sink.get() + 1));

        headless.dispatch_message(&command(&main, button.node(), 6));

        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn zero_sized_button_fits_its_caption() {
        let (_headless, main) = main_window();

        let button = Button::new(&main, "Apply", Rect::new(10, 10, 10, 10)).expect("button");

        assert_eq!(
            button.size(),
            Size::new(5 * HEADLESS_CHAR_WIDTH, HEADLESS_LINE_HEIGHT)
        );
    }

    #[test]
    fn group_box_keeps_its_bounds_and_caption() {
        let (_headless, main) = main_window();

        let group = GroupBox::new(&main, "Options", Rect::new(0, 0, 120, 90)).expect("group");

        assert_eq!(group.size(), Size::new(120, 90));
        assert_eq!(group.node().text(), "Options");
    }
}
