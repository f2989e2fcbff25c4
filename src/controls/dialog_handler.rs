/*
 * Captioned dialog windows with an OK/Cancel button row.
 *
 * The dialog is an owned top-level window that starts hidden. Its client area
 * ends in a right-to-left container docked at the bottom holding the OK and
 * Cancel buttons; content added with `add_widgets` fills the rest. Closing the
 * dialog only hides it, so the same dialog can be shown again. A modal show
 * disables the owner until the dialog is hidden.
 */
use crate::controls::button_handler::{Button, ClickSource};
use crate::controls::container_handler::Container;
use crate::controls::widget_builder::{Widget, create_widgets};
use crate::error::Result as PlatformResult;
use crate::types::{
    DockType, FlowDirection, Margins, Point, Rect, Size, WindowConfig, WindowStyle,
};
use crate::window_common::{Window, WindowNode};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Screen position every dialog is created at.
pub const DIALOG_ORIGIN: (i32, i32) = (600, 400);
pub const DIALOG_BUTTON_SIZE: Size = Size::new(86, 24);
pub const DIALOG_BUTTON_ROW_HEIGHT: i32 = 50;
const DIALOG_BUTTON_MARGIN: i32 = 10;

pub trait Dialog: Window {
    /*
     * Shows the dialog. A modal dialog disables its owner until it is hidden.
     * `on_accept` runs when OK is clicked, before the dialog hides.
     */
    fn show(&self, modal: bool, on_accept: impl Fn() + 'static);

    /// Hides the dialog and re-enables the owner of a modal dialog.
    fn hide(&self);

    /// Creates the widgets inside the dialog, above the button row.
    fn add_widgets(&self, widgets: &[Box<dyn Widget>]) -> PlatformResult<()>;
}

#[derive(Default)]
struct DialogState {
    modal: bool,
    on_accept: Option<Rc<dyn Fn()>>,
}

pub struct DialogWindow {
    node: Rc<WindowNode>,
    button_row: Container,
    ok: Button,
    cancel: Button,
    state: Rc<RefCell<DialogState>>,
}

fn hide_dialog(node: &WindowNode, state: &RefCell<DialogState>) {
    if state.borrow().modal
        && let Some(owner) = node.parent()
    {
        owner.set_enabled(true);
    }
    log::debug!("DialogHandler: hiding {:?}", node.handle());
    node.set_visible(false);
}

impl DialogWindow {
    pub fn new(owner: &Rc<WindowNode>, caption: &str, size: Size) -> PlatformResult<Self> {
        let (x, y) = DIALOG_ORIGIN;
        let config = WindowConfig::new(
            caption,
            WindowStyle::dialog(),
            x,
            y,
            size.width,
            size.height,
        );
        let node = WindowNode::create(owner.native_ref(), &config, Some(owner))?;
        let state = Rc::new(RefCell::new(DialogState::default()));

        let weak: Weak<WindowNode> = Rc::downgrade(&node);
        let close_state = Rc::clone(&state);
        node.set_close_handler(move || {
            if let Some(node) = weak.upgrade() {
                hide_dialog(&node, &close_state);
            }
            false
        });

        // Only the height counts once the row is docked.
        let button_row = Container::new(
            &node,
            FlowDirection::RightToLeft,
            Rect::new(0, 0, 0, DIALOG_BUTTON_ROW_HEIGHT),
        )?;
        button_row.set_dock_type(DockType::Bottom);

        let button_bounds = Rect::from_origin_size(Point::new(0, 0), DIALOG_BUTTON_SIZE);
        let ok = Button::new(button_row.node(), "OK", button_bounds)?;
        let cancel = Button::new(button_row.node(), "Cancel", button_bounds)?;
        ok.set_margins(Margins::uniform(DIALOG_BUTTON_MARGIN));
        cancel.set_margins(Margins::uniform(DIALOG_BUTTON_MARGIN));

        let weak = Rc::downgrade(&node);
        let ok_state = Rc::clone(&state);
        ok.set_click_handler(move || {
            let on_accept = ok_state.borrow().on_accept.clone();
            if let Some(on_accept) = on_accept {
                on_accept();
            }
            if let Some(node) = weak.upgrade() {
                hide_dialog(&node, &ok_state);
            }
        });

        let weak = Rc::downgrade(&node);
        let cancel_state = Rc::clone(&state);
        cancel.set_click_handler(move || {
            if let Some(node) = weak.upgrade() {
                hide_dialog(&node, &cancel_state);
            }
        });

        log::info!("DialogHandler: '{caption}' ready as {:?}", node.handle());
        Ok(Self {
            node,
            button_row,
            ok,
            cancel,
            state,
        })
    }

    pub fn ok_button(&self) -> &Button {
        &self.ok
    }

    pub fn cancel_button(&self) -> &Button {
        &self.cancel
    }

    pub fn button_row(&self) -> &Container {
        &self.button_row
    }

    pub fn is_modal(&self) -> bool {
        self.state.borrow().modal
    }
}

impl Window for DialogWindow {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

impl Dialog for DialogWindow {
    fn show(&self, modal: bool, on_accept: impl Fn() + 'static) {
        if modal && let Some(owner) = self.node.parent() {
            owner.set_enabled(false);
        }
        {
            let mut state = self.state.borrow_mut();
            state.modal = modal;
            state.on_accept = Some(Rc::new(on_accept));
        }
        log::debug!("DialogHandler: showing {:?} (modal: {modal})", self.node.handle());
        self.node.request_layout();
        self.node.set_visible(true);
    }

    fn hide(&self) {
        hide_dialog(&self.node, &self.state);
    }

    fn add_widgets(&self, widgets: &[Box<dyn Widget>]) -> PlatformResult<()> {
        create_widgets(&self.node, widgets).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::button_handler::BN_CLICKED;
    use crate::controls::widget_builder::LabelWidget;
    use crate::dispatcher;
    use crate::headless_backend::HeadlessPlatform;
    use crate::message::{NativeEvent, RawMessage, WM_COMMAND};
    use crate::native::{NativeRef, NativeWindowing};
    use std::cell::Cell;

    struct Fixture {
        headless: Rc<HeadlessPlatform>,
        main: Rc<WindowNode>,
        dialog: DialogWindow,
    }

    fn fixture() -> Fixture {
        let headless = Rc::new(HeadlessPlatform::new());
        let native: NativeRef = headless.clone();
        let main = WindowNode::create(
            &native,
            &WindowConfig::new("main", WindowStyle::top_level(), 0, 0, 800, 600),
            None,
        )
        .expect("main");
        let dialog = DialogWindow::new(&main, "Settings", Size::new(300, 200)).expect("dialog");
        Fixture {
            headless,
            main,
            dialog,
        }
    }

    fn click(headless: &HeadlessPlatform, button: &Button) {
        let row = button.node().parent().expect("button row");
        headless.dispatch_message(&RawMessage::new(
            row.handle(),
            WM_COMMAND,
            ((BN_CLICKED as usize) & 0xFFFF) << 16,
            button.handle().raw(),
        ));
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        (count, move || sink.set(sink.get() + 1))
    }

    fn origin_in_parent(node: &Rc<WindowNode>) -> Point {
        let parent = node.parent().expect("parent");
        let screen = node.window_rect().origin();
        let base = parent.window_rect().origin();
        Point::new(screen.x - base.x, screen.y - base.y)
    }

    #[test]
    fn modal_ok_accepts_once_and_gives_the_owner_back() {
        // Arrange
        let f = fixture();
        let (accepted, on_accept) = counter();
        f.dialog.show(true, on_accept);
        assert!(f.headless.is_visible(f.dialog.handle()));
        assert!(!f.headless.is_enabled(f.main.handle()));
        // Act
        click(&f.headless, f.dialog.ok_button());
        // Assert
        assert_eq!(accepted.get(), 1);
        assert!(!f.headless.is_visible(f.dialog.handle()));
        assert!(f.headless.is_enabled(f.main.handle()));
    }

    #[test]
    fn cancel_hides_without_accepting() {
        // Arrange
        let f = fixture();
        let (accepted, on_accept) = counter();
        f.dialog.show(true, on_accept);
        // Act
        click(&f.headless, f.dialog.cancel_button());
        // Assert
        assert_eq!(accepted.get(), 0);
        assert!(!f.headless.is_visible(f.dialog.handle()));
        assert!(f.headless.is_enabled(f.main.handle()));
    }

    #[test]
    fn closing_hides_the_dialog_instead_of_destroying_it() {
        let f = fixture();
        let (accepted, on_accept) = counter();
        f.dialog.show(true, on_accept);

        dispatcher::dispatch_event(f.dialog.handle(), NativeEvent::Close);

        assert!(!f.dialog.node().is_disposed());
        assert!(dispatcher::is_registered(f.dialog.handle()));
        assert!(!f.headless.is_visible(f.dialog.handle()));
        assert!(f.headless.is_enabled(f.main.handle()));
        assert_eq!(accepted.get(), 0);
    }

    #[test]
    fn modeless_dialog_leaves_the_owner_enabled() {
        let f = fixture();
        let (accepted, on_accept) = counter();

        f.dialog.show(false, on_accept);
        click(&f.headless, f.dialog.ok_button());

        assert!(!f.dialog.is_modal());
        assert!(f.headless.is_enabled(f.main.handle()));
        assert_eq!(accepted.get(), 1);
    }

    #[test]
    fn buttons_sit_right_aligned_in_the_bottom_row() {
        let f = fixture();

        let row = f.dialog.button_row().node();

        assert_eq!(row.size(), Size::new(300, DIALOG_BUTTON_ROW_HEIGHT));
        assert_eq!(origin_in_parent(row), Point::new(0, 200 - DIALOG_BUTTON_ROW_HEIGHT));
        assert_eq!(
            origin_in_parent(f.dialog.ok_button().node()),
            Point::new(300 - 10 - 86, 10)
        );
        assert_eq!(
            origin_in_parent(f.dialog.cancel_button().node()),
            Point::new(300 - 10 - 86 - 10 - 10 - 86, 10)
        );
    }

    #[test]
    fn added_widgets_fill_the_space_above_the_buttons() {
        let f = fixture();

        f.dialog
            .add_widgets(&[Box::new(LabelWidget {
                dock: DockType::Fill,
                text: "Pick a brush".to_string(),
                ..Default::default()
            })])
            .expect("widgets");

        let content = f
            .dialog
            .node()
            .children()
            .into_iter()
            .find(|c| c.text() == "Pick a brush")
            .expect("label");
        assert_eq!(content.size(), Size::new(300, 200 - DIALOG_BUTTON_ROW_HEIGHT));
        assert_eq!(origin_in_parent(&content), Point::new(0, 0));
    }

    #[test]
    fn the_dialog_does_not_disturb_the_owner_layout() {
        let f = fixture();
        let config = WindowConfig::new("panel", WindowStyle::child(), 0, 0, 10, 10);
        let panel = WindowNode::create(f.main.native_ref(), &config, Some(&f.main)).expect("panel");

        panel.set_dock_type(DockType::Fill);

        assert_eq!(panel.size(), Size::new(800, 600));
        assert_eq!(f.dialog.node().window_rect().origin(), Point::new(600, 400));
    }
}
