/*
 * Declarative construction of window trees. A widget value describes one
 * control (bounds, dock type, margins and, for containers, nested widgets) and
 * `create` builds it under a parent in one call, so dialogs and panels can be
 * written as nested struct literals:
 *
 *     let form = FlowContainerWidget {
 *         dock: DockType::Top,
 *         direction: FlowDirection::LeftToRight,
 *         bounds: Rect::new(0, 0, 0, 40),
 *         widgets: vec![Box::new(LabelWidget { text: "Name".into(), ..Default::default() })],
 *         ..Default::default()
 *     };
 *     form.create(dialog.node())?;
 *
 * Controls that application code needs to reach later are handed out through
 * an `assign_to` slot.
 */
use crate::controls::button_handler::{Button, ClickSource, GroupBox};
use crate::controls::container_handler::Container;
use crate::controls::label_handler::{Label, TextBox};
use crate::error::Result as PlatformResult;
use crate::types::{DockType, FlowDirection, Margins, Rect};
use crate::window_common::{Window, WindowNode};

use std::cell::OnceCell;
use std::rc::Rc;

pub trait Widget {
    /// Creates the control under `parent` and returns its node.
    fn create(&self, parent: &Rc<WindowNode>) -> PlatformResult<Rc<WindowNode>>;
}

pub type WidgetList = Vec<Box<dyn Widget>>;

/// Slot receiving a created control.
pub type AssignSlot<T> = Rc<OnceCell<T>>;

/// Creates every widget under `parent`, in order; stops at the first failure.
pub fn create_widgets(
    parent: &Rc<WindowNode>,
    widgets: &[Box<dyn Widget>],
) -> PlatformResult<Vec<Rc<WindowNode>>> {
    widgets.iter().map(|widget| widget.create(parent)).collect()
}

fn place(node: &Rc<WindowNode>, dock: DockType, margins: Margins) {
    node.set_dock_type(dock);
    node.set_margins(margins);
}

fn assign<T>(slot: &Option<AssignSlot<T>>, control: T, what: &str) {
    if let Some(slot) = slot
        && slot.set(control).is_err()
    {
        log::warn!("WidgetBuilder: {what} slot already filled; keeping the first control");
    }
}

/// Captioned group frame with nested widgets.
#[derive(Default)]
pub struct GroupWidget {
    pub dock: DockType,
    pub margins: Margins,
    pub bounds: Rect,
    pub text: String,
    pub widgets: WidgetList,
}

impl Widget for GroupWidget {
    fn create(&self, parent: &Rc<WindowNode>) -> PlatformResult<Rc<WindowNode>> {
        let group = GroupBox::new(parent, &self.text, self.bounds)?;
        let node = Rc::clone(group.node());
        place(&node, self.dock, self.margins);
        create_widgets(&node, &self.widgets)?;
        Ok(node)
    }
}

/// Container that flows its undocked children.
#[derive(Default)]
pub struct FlowContainerWidget {
    pub dock: DockType,
    pub margins: Margins,
    pub bounds: Rect,
    pub direction: FlowDirection,
    pub widgets: WidgetList,
}

impl Widget for FlowContainerWidget {
    fn create(&self, parent: &Rc<WindowNode>) -> PlatformResult<Rc<WindowNode>> {
        let container = Container::new(parent, self.direction, self.bounds)?;
        let node = Rc::clone(container.node());
        place(&node, self.dock, self.margins);
        create_widgets(&node, &self.widgets)?;
        Ok(node)
    }
}

#[derive(Default)]
pub struct LabelWidget {
    pub dock: DockType,
    pub margins: Margins,
    /// Zero width or height makes the label size itself to its text.
    pub bounds: Rect,
    pub text: String,
    pub assign_to: Option<AssignSlot<Label>>,
}

impl Widget for LabelWidget {
    fn create(&self, parent: &Rc<WindowNode>) -> PlatformResult<Rc<WindowNode>> {
        let label = Label::new(parent, &self.text, self.bounds)?;
        let node = Rc::clone(label.node());
        place(&node, self.dock, self.margins);
        assign(&self.assign_to, label, "label");
        Ok(node)
    }
}

#[derive(Default)]
pub struct ButtonWidget {
    pub dock: DockType,
    pub margins: Margins,
    pub bounds: Rect,
    pub text: String,
    pub on_click: Option<Rc<dyn Fn()>>,
    pub assign_to: Option<AssignSlot<Button>>,
}

impl Widget for ButtonWidget {
    fn create(&self, parent: &Rc<WindowNode>) -> PlatformResult<Rc<WindowNode>> {
        let button = Button::new(parent, &self.text, self.bounds)?;
        let node = Rc::clone(button.node());
        place(&node, self.dock, self.margins);
        if let Some(handler) = &self.on_click {
            let handler = Rc::clone(handler);
            button.set_click_handler(move || handler());
        }
        assign(&self.assign_to, button, "button");
        Ok(node)
    }
}

#[derive(Default)]
pub struct TextBoxWidget {
    pub dock: DockType,
    pub margins: Margins,
    pub bounds: Rect,
    pub text: String,
    pub assign_to: Option<AssignSlot<TextBox>>,
}

impl Widget for TextBoxWidget {
    fn create(&self, parent: &Rc<WindowNode>) -> PlatformResult<Rc<WindowNode>> {
        let text_box = TextBox::new(parent, &self.text, self.bounds)?;
        let node = Rc::clone(text_box.node());
        place(&node, self.dock, self.margins);
        assign(&self.assign_to, text_box, "text box");
        Ok(node)
    }
}
