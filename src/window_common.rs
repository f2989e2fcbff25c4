/*
 * The retained-mode window object. A `WindowNode` wraps exactly one native
 * window resource and carries everything the toolkit layers on top of it: the
 * position in the window tree, dock type and margins, the font, the flow
 * direction used for undocked children, and one callback slot per event kind.
 *
 * Ownership: a parent holds strong references to its children in creation
 * order (which is also layout order); a child holds a weak reference back to
 * its parent. The dispatcher's registry holds one strong reference per live
 * native handle, so a node stays alive while its native window exists even if
 * application code dropped every other reference.
 *
 * Owned popups and dialogs are kept in the owner's child list too, but they
 * live in screen coordinates and never take part in the owner's layout.
 *
 * Disposal destroys the native resource, removes the registry entry and drops
 * the node from its parent's child list. It does not cascade: each owner
 * disposes its own children.
 */
use crate::controls::paint_router::{self, EraseRoute, PaintRoute};
use crate::dispatcher::{self, PendingConstructionGuard};
use crate::error::Result as PlatformResult;
use crate::layout_engine::{self, LayoutItem};
use crate::message::{EventResponse, NativeEvent};
use crate::native::{DrawingSurface, NativeRef, NativeWindowing};
use crate::types::{
    DockType, FlowDirection, FontHandle, Margins, MouseActivation, MouseButton, MouseWheelEvent,
    NativeHandle, Point, Rect, ScrollEvent, ShowMode, Size, WindowClass, WindowConfig, WindowKind,
};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Upper bound on layout passes re-requested from inside a resize handler.
const MAX_NESTED_LAYOUT_PASSES: u32 = 4;

pub type PaintHandler = Rc<dyn Fn(&mut dyn DrawingSurface, &Rect)>;
pub type MouseHandler = Rc<dyn Fn(Point, MouseButton)>;
pub type NotifyHandler = Rc<dyn Fn()>;
pub type KeyHandler = Rc<dyn Fn(u32)>;
pub type RectHandler = Rc<dyn Fn(&Rect)>;
pub type WheelHandler = Rc<dyn Fn(&MouseWheelEvent)>;
pub type CloseHandler = Rc<dyn Fn() -> bool>;
pub type ActivateHandler = Rc<dyn Fn() -> MouseActivation>;
pub type CursorHandler = Rc<dyn Fn() -> bool>;
pub type ScrollHandler = Rc<dyn Fn(ScrollEvent)>;
pub type CommandHandler = Rc<dyn Fn(i32)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Paint,
    MouseDown,
    MouseMove,
    MouseUp,
    MouseLeave,
    MouseWheel,
    KeyDown,
    KeyUp,
    Char,
    Resize,
    FocusLost,
    Destroy,
    Close,
    PositionChanged,
    MouseActivate,
    CursorQuery,
    HScroll,
    VScroll,
    /// Notification reflected back from the parent (e.g. a button click).
    Command,
}

/*
 * One optional slot per event kind. Registering a handler replaces the
 * previous one. The dispatcher clones the `Rc` out of the slot before calling
 * it, so a handler may re-register or clear slots on its own window.
 */
#[derive(Clone, Default)]
pub struct EventHandlers {
    paint: Option<PaintHandler>,
    mouse_down: Option<MouseHandler>,
    mouse_move: Option<MouseHandler>,
    mouse_up: Option<MouseHandler>,
    mouse_leave: Option<NotifyHandler>,
    mouse_wheel: Option<WheelHandler>,
    key_down: Option<KeyHandler>,
    key_up: Option<KeyHandler>,
    char_input: Option<KeyHandler>,
    resize: Option<RectHandler>,
    focus_lost: Option<NotifyHandler>,
    destroy: Option<NotifyHandler>,
    close: Option<CloseHandler>,
    position_changed: Option<RectHandler>,
    mouse_activate: Option<ActivateHandler>,
    cursor_query: Option<CursorHandler>,
    hscroll: Option<ScrollHandler>,
    vscroll: Option<ScrollHandler>,
    command: Option<CommandHandler>,
}

impl EventHandlers {
    pub fn has(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Paint => self.paint.is_some(),
            EventKind::MouseDown => self.mouse_down.is_some(),
            EventKind::MouseMove => self.mouse_move.is_some(),
            EventKind::MouseUp => self.mouse_up.is_some(),
            EventKind::MouseLeave => self.mouse_leave.is_some(),
            EventKind::MouseWheel => self.mouse_wheel.is_some(),
            EventKind::KeyDown => self.key_down.is_some(),
            EventKind::KeyUp => self.key_up.is_some(),
            EventKind::Char => self.char_input.is_some(),
            EventKind::Resize => self.resize.is_some(),
            EventKind::FocusLost => self.focus_lost.is_some(),
            EventKind::Destroy => self.destroy.is_some(),
            EventKind::Close => self.close.is_some(),
            EventKind::PositionChanged => self.position_changed.is_some(),
            EventKind::MouseActivate => self.mouse_activate.is_some(),
            EventKind::CursorQuery => self.cursor_query.is_some(),
            EventKind::HScroll => self.hscroll.is_some(),
            EventKind::VScroll => self.vscroll.is_some(),
            EventKind::Command => self.command.is_some(),
        }
    }

    pub fn clear(&mut self, kind: EventKind) {
        match kind {
            EventKind::Paint => self.paint = None,
            EventKind::MouseDown => self.mouse_down = None,
            EventKind::MouseMove => self.mouse_move = None,
            EventKind::MouseUp => self.mouse_up = None,
            EventKind::MouseLeave => self.mouse_leave = None,
            EventKind::MouseWheel => self.mouse_wheel = None,
            EventKind::KeyDown => self.key_down = None,
            EventKind::KeyUp => self.key_up = None,
            EventKind::Char => self.char_input = None,
            EventKind::Resize => self.resize = None,
            EventKind::FocusLost => self.focus_lost = None,
            EventKind::Destroy => self.destroy = None,
            EventKind::Close => self.close = None,
            EventKind::PositionChanged => self.position_changed = None,
            EventKind::MouseActivate => self.mouse_activate = None,
            EventKind::CursorQuery => self.cursor_query = None,
            EventKind::HScroll => self.hscroll = None,
            EventKind::VScroll => self.vscroll = None,
            EventKind::Command => self.command = None,
        }
    }
}

pub struct WindowNode {
    handle: Cell<NativeHandle>,
    native: NativeRef,
    class: Cell<WindowClass>,
    kind: Cell<WindowKind>,
    parent: RefCell<Weak<WindowNode>>,
    children: RefCell<Vec<Rc<WindowNode>>>,
    dock_type: Cell<DockType>,
    margins: Cell<Margins>,
    flow_direction: Cell<FlowDirection>,
    font: Cell<FontHandle>,
    handlers: RefCell<EventHandlers>,
    mouse_inside: Cell<bool>,
    disposed: Cell<bool>,
    layout_in_progress: Cell<bool>,
    layout_requested_again: Cell<bool>,
}

impl std::fmt::Debug for WindowNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowNode")
            .field("handle", &self.handle.get())
            .field("dock_type", &self.dock_type.get())
            .field("children", &self.children.borrow().len())
            .field("disposed", &self.disposed.get())
            .finish()
    }
}

impl WindowNode {
    /// A node with no native resource yet.
    pub(crate) fn detached(native: NativeRef) -> Rc<WindowNode> {
        Rc::new(WindowNode {
            handle: Cell::new(NativeHandle::INVALID),
            native,
            class: Cell::new(WindowClass::Custom),
            kind: Cell::new(WindowKind::default()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            dock_type: Cell::new(DockType::None),
            margins: Cell::new(Margins::default()),
            flow_direction: Cell::new(FlowDirection::None),
            font: Cell::new(FontHandle::default()),
            handlers: RefCell::new(EventHandlers::default()),
            mouse_inside: Cell::new(false),
            disposed: Cell::new(false),
            layout_in_progress: Cell::new(false),
            layout_requested_again: Cell::new(false),
        })
    }

    /*
     * Allocates the native window, registers it and assigns the default font.
     * Events the native service sends during creation reach this node through
     * the pending-construction slot. The node joins its parent's child list only
     * once creation succeeded, then both the node and its parent are laid out.
     */
    pub fn create(
        native: &NativeRef,
        config: &WindowConfig,
        parent: Option<&Rc<WindowNode>>,
    ) -> PlatformResult<Rc<WindowNode>> {
        let node = WindowNode::detached(Rc::clone(native));
        node.class.set(config.class);
        node.kind.set(config.style.kind);
        if let Some(parent) = parent {
            *node.parent.borrow_mut() = Rc::downgrade(parent);
        }

        let created = {
            let _pending = PendingConstructionGuard::new(&node);
            native.create_window(config, parent.map(|p| p.handle()))
        };
        let handle = match created {
            Ok(handle) => handle,
            Err(e) => {
                log::error!("WindowNode: creating '{}' failed: {e}", config.text);
                dispatcher::unregister_node(&node);
                node.disposed.set(true);
                return Err(e);
            }
        };
        dispatcher::register(handle, &node);

        let font = native.default_font();
        node.font.set(font);
        native.set_font(handle, font);

        if let Some(parent) = parent {
            parent.children.borrow_mut().push(Rc::clone(&node));
        }
        log::debug!(
            "WindowNode: created {handle:?} '{}' ({} registered)",
            config.text,
            dispatcher::registered_window_count()
        );

        node.request_layout();
        if let Some(parent) = parent {
            parent.request_layout();
        }
        Ok(node)
    }

    pub fn handle(&self) -> NativeHandle {
        self.handle.get()
    }

    pub(crate) fn set_handle(&self, handle: NativeHandle) {
        self.handle.set(handle);
    }

    pub fn native(&self) -> &dyn NativeWindowing {
        self.native.as_ref()
    }

    pub fn native_ref(&self) -> &NativeRef {
        &self.native
    }

    pub fn is_subclassed(&self) -> bool {
        self.class.get() != WindowClass::Custom
    }

    pub fn kind(&self) -> WindowKind {
        self.kind.get()
    }

    pub fn parent(&self) -> Option<Rc<WindowNode>> {
        self.parent.borrow().upgrade()
    }

    pub fn children(&self) -> Vec<Rc<WindowNode>> {
        self.children.borrow().clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn is_mouse_inside(&self) -> bool {
        self.mouse_inside.get()
    }

    // --- geometry -------------------------------------------------------

    /// Outer size of the window.
    pub fn size(&self) -> Size {
        self.native.window_rect(self.handle()).size()
    }

    pub fn client_rect(&self) -> Rect {
        self.native.client_rect(self.handle())
    }

    /// Outer bounds in screen coordinates.
    pub fn window_rect(&self) -> Rect {
        self.native.window_rect(self.handle())
    }

    pub fn set_size(&self, width: i32, height: i32) {
        self.native.set_size(self.handle(), Size::new(width, height));
        self.request_parent_layout();
    }

    pub fn set_position(&self, x: i32, y: i32) {
        self.native.set_position(self.handle(), Point::new(x, y));
    }

    pub fn set_bounds(&self, bounds: Rect) {
        self.native.move_window(self.handle(), bounds, true);
        self.request_parent_layout();
    }

    pub fn show(&self, mode: ShowMode) {
        self.native.show(self.handle(), mode);
    }

    pub fn set_visible(&self, visible: bool) {
        self.show(if visible { ShowMode::Show } else { ShowMode::Hide });
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.native.enable_window(self.handle(), enabled);
    }

    // --- layout properties ---------------------------------------------

    pub fn dock_type(&self) -> DockType {
        self.dock_type.get()
    }

    pub fn set_dock_type(&self, dock: DockType) {
        self.dock_type.set(dock);
        self.request_parent_layout();
    }

    pub fn margins(&self) -> Margins {
        self.margins.get()
    }

    pub fn set_margins(&self, margins: Margins) {
        self.margins.set(margins);
        self.request_parent_layout();
    }

    pub fn flow_direction(&self) -> FlowDirection {
        self.flow_direction.get()
    }

    pub fn set_flow_direction(&self, direction: FlowDirection) {
        self.flow_direction.set(direction);
        self.request_layout();
    }

    // --- text and font -------------------------------------------------

    pub fn font(&self) -> FontHandle {
        self.font.get()
    }

    pub fn set_font(&self, font: FontHandle) {
        self.font.set(font);
        self.native.set_font(self.handle(), font);
    }

    pub fn text(&self) -> String {
        self.native.text(self.handle())
    }

    pub fn set_text(&self, text: &str) {
        self.native.set_text(self.handle(), text);
    }

    pub fn measure_text(&self, text: &str) -> Size {
        self.native.measure_text(self.handle(), self.font(), text)
    }

    // --- repaint -------------------------------------------------------

    pub fn invalidate(&self) {
        self.native.invalidate(self.handle(), None, false);
    }

    pub fn invalidate_rect(&self, rect: Rect) {
        self.native.invalidate(self.handle(), Some(rect), false);
    }

    /// Invalidates the whole client area and paints it right away.
    pub fn repaint(&self) {
        let handle = self.handle();
        self.native.invalidate(handle, None, true);
        self.native.update(handle);
    }

    // --- layout --------------------------------------------------------

    fn request_parent_layout(&self) {
        if let Some(parent) = self.parent() {
            parent.request_layout();
        }
    }

    /*
     * Lays out the children, then repaints. A layout requested while one is
     * already running on this node (typically from a resize handler) is folded
     * into another pass after the current one instead of recursing.
     */
    pub fn request_layout(&self) {
        if self.is_disposed() || self.handle().is_invalid() {
            return;
        }
        if self.layout_in_progress.replace(true) {
            self.layout_requested_again.set(true);
            return;
        }
        let mut passes = 0;
        loop {
            self.layout_requested_again.set(false);
            self.perform_layout();
            passes += 1;
            if !self.layout_requested_again.get() {
                break;
            }
            if passes >= MAX_NESTED_LAYOUT_PASSES {
                log::warn!(
                    "WindowNode: {:?} still requesting layout after {passes} passes",
                    self.handle()
                );
                break;
            }
        }
        self.layout_in_progress.set(false);
        self.repaint();
    }

    fn perform_layout(&self) {
        let content = self.client_rect();
        let children: Vec<Rc<WindowNode>> = self
            .children
            .borrow()
            .iter()
            .filter(|c| !c.is_disposed() && c.kind().is_laid_out_by_parent())
            .cloned()
            .collect();
        let items: Vec<LayoutItem> = children
            .iter()
            .map(|c| LayoutItem {
                dock: c.dock_type(),
                margins: c.margins(),
                size: c.size(),
            })
            .collect();

        let pass = layout_engine::calculate_layout(content, &items);
        let moves: Vec<(NativeHandle, Rect)> = children
            .iter()
            .zip(pass.rects.iter())
            .filter_map(|(child, rect)| rect.map(|r| (child.handle(), r)))
            .collect();
        if !moves.is_empty() {
            log::trace!(
                "WindowNode: laying out {} docked children of {:?}",
                moves.len(),
                self.handle()
            );
            self.native.apply_layout(&moves);
        }

        let flow =
            layout_engine::calculate_flow_layout(self.flow_direction(), pass.remaining, &items);
        for (child, pos) in children.iter().zip(flow) {
            if let Some(pos) = pos {
                self.native.set_position(child.handle(), pos);
            }
        }

        let resize = self.handlers.borrow().resize.clone();
        if let Some(handler) = resize {
            handler(&pass.remaining);
        }
    }

    // --- disposal ------------------------------------------------------

    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let handle = self.handle();
        if handle.is_invalid() {
            return;
        }
        self.native.destroy_window(handle);
        dispatcher::unregister(handle);
        self.handle.set(NativeHandle::INVALID);
        if let Some(parent) = self.parent() {
            parent.children.borrow_mut().retain(|c| !c.is_disposed());
        }
        log::debug!(
            "WindowNode: disposed {handle:?} ({} registered)",
            dispatcher::registered_window_count()
        );
    }

    // --- handler registration ------------------------------------------

    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.borrow().has(kind)
    }

    pub fn has_paint_handler(&self) -> bool {
        self.has_handler(EventKind::Paint)
    }

    pub fn clear_handler(&self, kind: EventKind) {
        self.handlers.borrow_mut().clear(kind);
    }

    pub fn set_paint_handler(&self, handler: impl Fn(&mut dyn DrawingSurface, &Rect) + 'static) {
        self.handlers.borrow_mut().paint = Some(Rc::new(handler));
    }

    pub fn set_mouse_down_handler(&self, handler: impl Fn(Point, MouseButton) + 'static) {
        self.handlers.borrow_mut().mouse_down = Some(Rc::new(handler));
    }

    pub fn set_mouse_move_handler(&self, handler: impl Fn(Point, MouseButton) + 'static) {
        self.handlers.borrow_mut().mouse_move = Some(Rc::new(handler));
    }

    pub fn set_mouse_up_handler(&self, handler: impl Fn(Point, MouseButton) + 'static) {
        self.handlers.borrow_mut().mouse_up = Some(Rc::new(handler));
    }

    pub fn set_mouse_leave_handler(&self, handler: impl Fn() + 'static) {
        self.handlers.borrow_mut().mouse_leave = Some(Rc::new(handler));
    }

    pub fn set_mouse_wheel_handler(&self, handler: impl Fn(&MouseWheelEvent) + 'static) {
        self.handlers.borrow_mut().mouse_wheel = Some(Rc::new(handler));
    }

    pub fn set_key_down_handler(&self, handler: impl Fn(u32) + 'static) {
        self.handlers.borrow_mut().key_down = Some(Rc::new(handler));
    }

    pub fn set_key_up_handler(&self, handler: impl Fn(u32) + 'static) {
        self.handlers.borrow_mut().key_up = Some(Rc::new(handler));
    }

    pub fn set_char_handler(&self, handler: impl Fn(u32) + 'static) {
        self.handlers.borrow_mut().char_input = Some(Rc::new(handler));
    }

    /// Called after each layout pass with the content rect the docked children left over.
    pub fn set_resize_handler(&self, handler: impl Fn(&Rect) + 'static) {
        self.handlers.borrow_mut().resize = Some(Rc::new(handler));
    }

    pub fn set_focus_lost_handler(&self, handler: impl Fn() + 'static) {
        self.handlers.borrow_mut().focus_lost = Some(Rc::new(handler));
    }

    pub fn set_destroy_handler(&self, handler: impl Fn() + 'static) {
        self.handlers.borrow_mut().destroy = Some(Rc::new(handler));
    }

    /// Return `false` from the handler to keep the window open.
    pub fn set_close_handler(&self, handler: impl Fn() -> bool + 'static) {
        self.handlers.borrow_mut().close = Some(Rc::new(handler));
    }

    pub fn set_position_changed_handler(&self, handler: impl Fn(&Rect) + 'static) {
        self.handlers.borrow_mut().position_changed = Some(Rc::new(handler));
    }

    pub fn set_mouse_activate_handler(&self, handler: impl Fn() -> MouseActivation + 'static) {
        self.handlers.borrow_mut().mouse_activate = Some(Rc::new(handler));
    }

    /// Return `true` when the handler set the cursor itself.
    pub fn set_cursor_handler(&self, handler: impl Fn() -> bool + 'static) {
        self.handlers.borrow_mut().cursor_query = Some(Rc::new(handler));
    }

    pub fn set_hscroll_handler(&self, handler: impl Fn(ScrollEvent) + 'static) {
        self.handlers.borrow_mut().hscroll = Some(Rc::new(handler));
    }

    pub fn set_vscroll_handler(&self, handler: impl Fn(ScrollEvent) + 'static) {
        self.handlers.borrow_mut().vscroll = Some(Rc::new(handler));
    }

    pub fn set_command_handler(&self, handler: impl Fn(i32) + 'static) {
        self.handlers.borrow_mut().command = Some(Rc::new(handler));
    }

    // --- event handling ------------------------------------------------

    pub(crate) fn handle_reflected_command(&self, code: i32) -> bool {
        let handler = self.handlers.borrow().command.clone();
        match handler {
            Some(handler) => {
                handler(code);
                true
            }
            None => false,
        }
    }

    /*
     * Routes one event to its slot. Handlers are cloned out of the slot table
     * before they run; no borrow of this node is held across a handler call.
     */
    pub(crate) fn handle_event(&self, event: NativeEvent<'_>) -> EventResponse {
        let handlers = self.handlers.borrow().clone();
        match event {
            NativeEvent::Created => EventResponse::Default,
            NativeEvent::Paint { surface, dirty } => {
                match paint_router::resolve_paint_route(self.is_subclassed(), handlers.paint.is_some()) {
                    PaintRoute::Native => EventResponse::Default,
                    PaintRoute::Custom => {
                        if let Some(handler) = handlers.paint {
                            surface.select_font(self.font());
                            let client = self.client_rect();
                            handler(surface, &client);
                        }
                        EventResponse::Handled
                    }
                    PaintRoute::DefaultFill => {
                        log::trace!("[Paint] default fill for {:?}", self.handle());
                        surface.fill_rect(dirty, self.native.default_background());
                        EventResponse::Handled
                    }
                }
            }
            NativeEvent::EraseBackground => {
                match paint_router::resolve_erase_route(self.is_subclassed(), handlers.paint.is_some()) {
                    EraseRoute::Suppress => EventResponse::Value(1),
                    EraseRoute::Native => EventResponse::Default,
                }
            }
            NativeEvent::MouseMove { pos, button } => {
                if !self.mouse_inside.replace(true) {
                    self.native.track_mouse_leave(self.handle());
                }
                if let Some(handler) = handlers.mouse_move {
                    handler(pos, button);
                }
                EventResponse::Default
            }
            NativeEvent::MouseDown { pos, button } => {
                if let Some(handler) = handlers.mouse_down {
                    handler(pos, button);
                }
                EventResponse::Default
            }
            NativeEvent::MouseUp { pos, button } => {
                if let Some(handler) = handlers.mouse_up {
                    handler(pos, button);
                }
                EventResponse::Default
            }
            NativeEvent::MouseLeave => {
                self.mouse_inside.set(false);
                if let Some(handler) = handlers.mouse_leave {
                    handler();
                }
                EventResponse::Default
            }
            NativeEvent::MouseWheel(wheel) => match handlers.mouse_wheel {
                Some(handler) => {
                    handler(&wheel);
                    EventResponse::Handled
                }
                None => EventResponse::Default,
            },
            NativeEvent::KeyDown(key) => {
                if let Some(handler) = handlers.key_down {
                    handler(key);
                }
                EventResponse::Default
            }
            NativeEvent::KeyUp(key) => {
                if let Some(handler) = handlers.key_up {
                    handler(key);
                }
                EventResponse::Default
            }
            NativeEvent::Char(ch) => match handlers.char_input {
                Some(handler) => {
                    handler(ch);
                    EventResponse::Handled
                }
                None => EventResponse::Default,
            },
            NativeEvent::Resized { client } => {
                log::trace!("WindowNode: {:?} resized to {client:?}", self.handle());
                self.request_layout();
                EventResponse::Default
            }
            NativeEvent::FocusLost => {
                if let Some(handler) = handlers.focus_lost {
                    handler();
                }
                EventResponse::Default
            }
            NativeEvent::Close => {
                let allow = handlers.close.is_none_or(|handler| handler());
                if allow {
                    self.dispose();
                } else {
                    log::debug!("WindowNode: close of {:?} vetoed by handler", self.handle());
                }
                EventResponse::Handled
            }
            NativeEvent::Destroy => {
                if let Some(handler) = handlers.destroy {
                    handler();
                }
                EventResponse::Default
            }
            NativeEvent::PositionChanged(bounds) => {
                if let Some(handler) = handlers.position_changed {
                    handler(&bounds);
                }
                EventResponse::Default
            }
            NativeEvent::MouseActivate => match handlers.mouse_activate {
                Some(handler) => EventResponse::Value(handler().raw()),
                None => EventResponse::Default,
            },
            NativeEvent::CursorQuery => match handlers.cursor_query {
                Some(handler) if handler() => EventResponse::Value(1),
                _ => EventResponse::Default,
            },
            NativeEvent::HScroll(scroll) => match handlers.hscroll {
                Some(handler) => {
                    handler(scroll);
                    EventResponse::Handled
                }
                None => EventResponse::Default,
            },
            NativeEvent::VScroll(scroll) => match handlers.vscroll {
                Some(handler) => {
                    handler(scroll);
                    EventResponse::Handled
                }
                None => EventResponse::Default,
            },
            NativeEvent::Command { source, code } => {
                if dispatcher::reflect_command(source, code) {
                    EventResponse::Handled
                } else {
                    EventResponse::Default
                }
            }
        }
    }
}

/*
 * Capability shared by every control built on a `WindowNode`. Controls
 * implement `node()`; everything else is delegated.
 */
pub trait Window {
    fn node(&self) -> &Rc<WindowNode>;

    fn handle(&self) -> NativeHandle {
        self.node().handle()
    }

    fn size(&self) -> Size {
        self.node().size()
    }

    fn client_rect(&self) -> Rect {
        self.node().client_rect()
    }

    fn set_dock_type(&self, dock: DockType) {
        self.node().set_dock_type(dock);
    }

    fn set_margins(&self, margins: Margins) {
        self.node().set_margins(margins);
    }

    fn set_size(&self, width: i32, height: i32) {
        self.node().set_size(width, height);
    }

    fn request_layout(&self) {
        self.node().request_layout();
    }

    fn repaint(&self) {
        self.node().repaint();
    }

    fn dispose(&self) {
        self.node().dispose();
    }
}
