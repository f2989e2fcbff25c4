/*
 * Routes native events to the `WindowNode` that owns the target handle.
 *
 * The registry maps every live native handle to exactly one node. Native
 * services deliver events to a window before `create_window` returns its
 * handle, so the node under construction is parked in a thread-local pending
 * slot for the duration of the call; the first event for an unknown handle
 * adopts that node. An event for an unknown handle with no pending node is a
 * bootstrapping defect and panics.
 *
 * Everything here is thread-local: windows are owned by the thread that
 * created them and all events for them arrive on that thread.
 */
use crate::controls::paint_router::{self, PaintRoute};
use crate::message::{EventResponse, NativeEvent, RawMessage, translate_message};
use crate::types::NativeHandle;
use crate::window_common::WindowNode;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

thread_local! {
    static WINDOW_REGISTRY: RefCell<HashMap<NativeHandle, Rc<WindowNode>>> =
        RefCell::new(HashMap::new());
    static PENDING_CONSTRUCTION: RefCell<Option<Rc<WindowNode>>> = const { RefCell::new(None) };
}

/*
 * RAII helper that parks a node in the pending-construction slot until dropped.
 * Restores whatever was parked before, so a window created from inside another
 * window's creation events does not lose the outer node.
 */
pub(crate) struct PendingConstructionGuard {
    previous: Option<Rc<WindowNode>>,
}

impl PendingConstructionGuard {
    pub(crate) fn new(node: &Rc<WindowNode>) -> Self {
        let previous =
            PENDING_CONSTRUCTION.with(|slot| slot.borrow_mut().replace(Rc::clone(node)));
        Self { previous }
    }
}

impl Drop for PendingConstructionGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        PENDING_CONSTRUCTION.with(|slot| *slot.borrow_mut() = previous);
    }
}

fn take_pending() -> Option<Rc<WindowNode>> {
    PENDING_CONSTRUCTION.with(|slot| slot.borrow_mut().take())
}

pub(crate) fn register(handle: NativeHandle, node: &Rc<WindowNode>) {
    node.set_handle(handle);
    let replaced = WINDOW_REGISTRY.with(|reg| reg.borrow_mut().insert(handle, Rc::clone(node)));
    if let Some(old) = replaced
        && !Rc::ptr_eq(&old, node)
    {
        log::warn!("Dispatcher: handle {handle:?} re-registered to a different window");
    }
}

pub(crate) fn unregister(handle: NativeHandle) -> Option<Rc<WindowNode>> {
    WINDOW_REGISTRY.with(|reg| reg.borrow_mut().remove(&handle))
}

/// Removes every registry entry pointing at `node` (used when creation fails midway).
pub(crate) fn unregister_node(node: &Rc<WindowNode>) {
    WINDOW_REGISTRY.with(|reg| reg.borrow_mut().retain(|_, n| !Rc::ptr_eq(n, node)));
}

pub fn lookup(handle: NativeHandle) -> Option<Rc<WindowNode>> {
    WINDOW_REGISTRY.with(|reg| reg.borrow().get(&handle).cloned())
}

pub fn is_registered(handle: NativeHandle) -> bool {
    WINDOW_REGISTRY.with(|reg| reg.borrow().contains_key(&handle))
}

pub fn registered_window_count() -> usize {
    WINDOW_REGISTRY.with(|reg| reg.borrow().len())
}

/*
 * Finds the node for `handle`, adopting the pending node on first contact.
 * Panics when neither exists.
 */
fn resolve(handle: NativeHandle, event_name: &str) -> Rc<WindowNode> {
    if let Some(node) = lookup(handle) {
        return node;
    }
    match take_pending() {
        Some(node) => {
            log::debug!("Dispatcher: adopting window under construction as {handle:?}");
            register(handle, &node);
            node
        }
        None => panic!(
            "Dispatcher: {event_name} for unregistered handle {handle:?} with no window under construction"
        ),
    }
}

/// Delivers one typed event to the window that owns `handle`.
pub fn dispatch_event(handle: NativeHandle, event: NativeEvent<'_>) -> EventResponse {
    let node = resolve(handle, event.name());
    node.handle_event(event)
}

/*
 * Translates and delivers a raw message. Messages the toolkit does not route
 * still resolve their target, so the registry invariant is checked for every
 * message the native layer hands over.
 */
pub fn dispatch_message(msg: &RawMessage) -> EventResponse {
    match translate_message(msg) {
        Some(event) => dispatch_event(msg.target, event),
        None => {
            resolve(msg.target, "message");
            EventResponse::Default
        }
    }
}

/// Decides up front how the backend should serve a paint request for `handle`.
pub fn paint_route(handle: NativeHandle) -> PaintRoute {
    let node = resolve(handle, "Paint");
    paint_router::resolve_paint_route(node.is_subclassed(), node.has_paint_handler())
}

/// Hands a child notification back to the child that sent it.
pub(crate) fn reflect_command(source: NativeHandle, code: i32) -> bool {
    match lookup(source) {
        Some(node) => node.handle_reflected_command(code),
        None => {
            log::trace!("Dispatcher: command from unmanaged control {source:?} ignored");
            false
        }
    }
}
