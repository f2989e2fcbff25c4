/*
 * Transient popup windows with their own modal message loop.
 *
 * A `PopupController` owns a hidden, topmost, non-activating popup window and
 * a list of `PopupItem`s. `popup(x, y)` sizes the window from the configured
 * content measurement, shows it at the given screen position, captures input
 * to the owner window and then pumps messages itself until the popup is done.
 * Every message is passed through `filter_popup_message` first, which steals
 * mouse and keyboard input for the popup: client mouse coordinates are mapped
 * from the original target into the popup's client space, so hit testing is
 * always evaluated in the popup's frame.
 *
 * The loop ends when an item is clicked, a mouse button goes down outside the
 * popup, capture moves away from the owner, the owner (or the window it is a
 * child of) stops being active, or a quit message arrives. A quit message is
 * posted again after the loop so the primary loop still sees it. Capture is
 * released and the popup hidden on every exit, unwinding included. The clicked
 * item's callback runs once, after that, so a callback may open another popup.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::message::{MessageKind, RawMessage, VK_DOWN, VK_ESCAPE, VK_RETURN, VK_UP};
use crate::native::{DrawingSurface, NativeWindowing, TextMeasure, WindowTextMeasure};
use crate::types::{
    Color, MouseActivation, MouseButton, NativeHandle, Point, Rect, ShowMode, Size, WindowConfig,
    WindowStyle,
};
use crate::window_common::{Window, WindowNode};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Border the popup window adds around its measured content.
pub const POPUP_BORDER_INSET: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupItemEvent {
    pub index: usize,
    pub popup: NativeHandle,
}

pub type PopupClickHandler = Rc<dyn Fn(&PopupItemEvent)>;
pub type MeasureContentFn = Rc<dyn Fn(&dyn TextMeasure, &[PopupItem]) -> Size>;
pub type ArrangeItemsFn = Rc<dyn Fn(&mut [PopupItem], Rect)>;
pub type DrawItemsFn = Rc<dyn Fn(&mut dyn DrawingSurface, &Rect, &[PopupItem])>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupItemKind {
    Menu {
        text: String,
        toggled: bool,
        text_rect: Rect,
    },
    Size {
        /// Line thickness in pixels.
        size: i32,
        toggled: bool,
    },
}

#[derive(Clone)]
pub struct PopupItem {
    /// Hit rect in popup client coordinates, assigned when items are arranged.
    pub rect: Rect,
    pub highlighted: bool,
    pub enabled: bool,
    pub separator: bool,
    pub on_click: Option<PopupClickHandler>,
    pub kind: PopupItemKind,
}

impl std::fmt::Debug for PopupItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopupItem")
            .field("rect", &self.rect)
            .field("highlighted", &self.highlighted)
            .field("enabled", &self.enabled)
            .field("separator", &self.separator)
            .field("has_click", &self.on_click.is_some())
            .field("kind", &self.kind)
            .finish()
    }
}

impl PopupItem {
    pub fn new(kind: PopupItemKind) -> Self {
        Self {
            rect: Rect::default(),
            highlighted: false,
            enabled: true,
            separator: false,
            on_click: None,
            kind,
        }
    }

    pub fn menu(text: &str) -> Self {
        Self::new(PopupItemKind::Menu {
            text: text.to_string(),
            toggled: false,
            text_rect: Rect::default(),
        })
    }

    pub fn size(size: i32) -> Self {
        Self::new(PopupItemKind::Size {
            size,
            toggled: false,
        })
    }

    pub fn with_click(mut self, handler: impl Fn(&PopupItemEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn text(&self) -> &str {
        match &self.kind {
            PopupItemKind::Menu { text, .. } => text,
            PopupItemKind::Size { .. } => "",
        }
    }

    pub fn has_text(&self) -> bool {
        !self.text().is_empty()
    }

    pub fn is_toggled(&self) -> bool {
        match self.kind {
            PopupItemKind::Menu { toggled, .. } | PopupItemKind::Size { toggled, .. } => toggled,
        }
    }

    pub fn set_toggled(&mut self, value: bool) {
        match &mut self.kind {
            PopupItemKind::Menu { toggled, .. } | PopupItemKind::Size { toggled, .. } => {
                *toggled = value
            }
        }
    }

    /// Separators and disabled items never become the popup result.
    pub fn is_selectable(&self) -> bool {
        !self.separator && self.enabled
    }
}

/// Index of the first item whose rect contains `pt`.
pub fn hit_test(items: &[PopupItem], pt: Point) -> Option<usize> {
    items.iter().position(|item| item.rect.contains(pt))
}

/// Next selectable item from `current` in the given direction, wrapping around.
pub fn next_selectable(items: &[PopupItem], current: Option<usize>, forward: bool) -> Option<usize> {
    let count = items.len();
    if count == 0 {
        return None;
    }
    let start = match (current, forward) {
        (Some(i), _) => i,
        (None, true) => count - 1,
        (None, false) => 0,
    };
    (1..=count)
        .map(|step| {
            if forward {
                (start + step) % count
            } else {
                (start + count - step % count) % count
            }
        })
        .find(|&i| items[i].is_selectable())
}

pub struct PopupFilterContext<'a> {
    pub popup: NativeHandle,
    /// Maps a point from `source`'s client space into the popup's client space.
    pub to_popup_client: &'a dyn Fn(NativeHandle, Point) -> Point,
}

/*
 * Rewrites one message for the popup loop. Client mouse messages are retargeted
 * and their coordinates mapped into the popup; non-client mouse messages
 * (screen coordinates) and keyboard messages are only retargeted. Everything
 * else passes through unchanged.
 */
pub fn filter_popup_message(raw: &RawMessage, ctx: &PopupFilterContext<'_>) -> RawMessage {
    match raw.kind() {
        MessageKind::ClientMouse => {
            let pt = (ctx.to_popup_client)(raw.target, raw.point());
            raw.with_target(ctx.popup).with_point(pt)
        }
        MessageKind::NonClientMouse | MessageKind::Keyboard => raw.with_target(ctx.popup),
        MessageKind::Quit | MessageKind::Other => *raw,
    }
}

#[derive(Debug, Default)]
struct PopupState {
    items: Vec<PopupItem>,
    done: bool,
    clicked: Option<usize>,
    running: bool,
}

impl PopupState {
    fn highlighted(&self) -> Option<usize> {
        self.items.iter().position(|item| item.highlighted)
    }

    /// Highlights exactly `index`, clearing every other item. Returns true when anything changed.
    fn highlight(&mut self, index: Option<usize>) -> bool {
        let mut changed = false;
        for (i, item) in self.items.iter_mut().enumerate() {
            let on = Some(i) == index;
            changed |= item.highlighted != on;
            item.highlighted = on;
        }
        changed
    }

    fn click(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) if item.is_selectable() => {
                log::debug!("PopupHandler: item {index} clicked");
                self.clicked = Some(index);
                self.done = true;
                true
            }
            _ => false,
        }
    }
}

/*
 * One shown popup. Creating it shows the window and captures input to the
 * owner; dropping it releases capture, hides the window and clears the
 * running flag, whether the loop returned or a handler unwound through it.
 */
struct PopupSession<'a> {
    native: &'a dyn NativeWindowing,
    popup: NativeHandle,
    state: &'a RefCell<PopupState>,
}

impl<'a> PopupSession<'a> {
    fn start(
        native: &'a dyn NativeWindowing,
        popup: NativeHandle,
        owner: NativeHandle,
        state: &'a RefCell<PopupState>,
    ) -> Self {
        state.borrow_mut().running = true;
        native.show(popup, ShowMode::ShowNoActivate);
        native.set_capture(owner);
        Self {
            native,
            popup,
            state,
        }
    }
}

impl Drop for PopupSession<'_> {
    fn drop(&mut self) {
        self.native.release_capture();
        self.native.show(self.popup, ShowMode::Hide);
        match self.state.try_borrow_mut() {
            Ok(mut state) => state.running = false,
            Err(_) => log::error!("PopupHandler: popup state still borrowed at exit"),
        }
        log::debug!("PopupHandler: {:?} closed", self.popup);
    }
}

#[derive(Default)]
struct PopupCallbacks {
    measure: Option<MeasureContentFn>,
    arrange: Option<ArrangeItemsFn>,
    draw: Option<DrawItemsFn>,
}

pub struct PopupController {
    window: Rc<WindowNode>,
    owner: Rc<WindowNode>,
    state: Rc<RefCell<PopupState>>,
    callbacks: Rc<RefCell<PopupCallbacks>>,
}

impl PopupController {
    /// Creates the (hidden) popup window, owned by `owner`.
    pub fn new(owner: &Rc<WindowNode>) -> PlatformResult<Self> {
        let config = WindowConfig::new("DropDownMenu", WindowStyle::popup(), 10, 10, 10, 10);
        let window = WindowNode::create(owner.native_ref(), &config, Some(owner))?;
        let controller = Self {
            window,
            owner: Rc::clone(owner),
            state: Rc::new(RefCell::new(PopupState::default())),
            callbacks: Rc::new(RefCell::new(PopupCallbacks::default())),
        };
        controller.install_handlers();
        Ok(controller)
    }

    fn install_handlers(&self) {
        let weak_window: Weak<WindowNode> = Rc::downgrade(&self.window);

        let (state, win) = (Rc::clone(&self.state), weak_window.clone());
        self.window.set_mouse_down_handler(move |pt, _button| {
            let Some(window) = win.upgrade() else { return };
            let screen = window.native().map_point(Some(window.handle()), None, pt);
            if !window.window_rect().contains(screen) {
                log::debug!("PopupHandler: mouse down outside popup at {screen:?}");
                state.borrow_mut().done = true;
            }
        });

        let (state, win) = (Rc::clone(&self.state), weak_window.clone());
        self.window.set_mouse_move_handler(move |pt, _button| {
            let changed = {
                let mut state = state.borrow_mut();
                let hit = hit_test(&state.items, pt);
                state.highlight(hit)
            };
            if changed && let Some(window) = win.upgrade() {
                window.repaint();
            }
        });

        let state = Rc::clone(&self.state);
        self.window.set_mouse_up_handler(move |pt, button| {
            if button != MouseButton::Left {
                return;
            }
            let mut state = state.borrow_mut();
            if let Some(index) = hit_test(&state.items, pt) {
                state.click(index);
            }
        });

        let (state, win) = (Rc::clone(&self.state), weak_window);
        self.window.set_key_down_handler(move |key| {
            let changed = {
                let mut state = state.borrow_mut();
                match key {
                    VK_ESCAPE => {
                        state.done = true;
                        false
                    }
                    VK_UP | VK_DOWN => {
                        let next = next_selectable(&state.items, state.highlighted(), key == VK_DOWN);
                        state.highlight(next)
                    }
                    VK_RETURN => {
                        if let Some(index) = state.highlighted() {
                            state.click(index);
                        }
                        false
                    }
                    _ => false,
                }
            };
            if changed && let Some(window) = win.upgrade() {
                window.repaint();
            }
        });

        self.window
            .set_mouse_activate_handler(|| MouseActivation::NoActivate);

        let (state, callbacks) = (Rc::clone(&self.state), Rc::clone(&self.callbacks));
        self.window.set_paint_handler(move |surface, client| {
            let (arrange, draw) = {
                let callbacks = callbacks.borrow();
                (callbacks.arrange.clone(), callbacks.draw.clone())
            };
            let mut state = state.borrow_mut();
            if let Some(arrange) = arrange {
                arrange(&mut state.items, *client);
            }
            match draw {
                Some(draw) => draw(surface, client, &state.items),
                None => surface.fill_rect(*client, Color::WHITE),
            }
        });
    }

    pub fn window(&self) -> &Rc<WindowNode> {
        &self.window
    }

    pub fn owner(&self) -> &Rc<WindowNode> {
        &self.owner
    }

    pub fn set_measure_content_size(
        &self,
        measure: impl Fn(&dyn TextMeasure, &[PopupItem]) -> Size + 'static,
    ) {
        self.callbacks.borrow_mut().measure = Some(Rc::new(measure));
    }

    /// Assigns item rects for a given client rect; runs before showing and on every paint.
    pub fn set_arrange_items(&self, arrange: impl Fn(&mut [PopupItem], Rect) + 'static) {
        self.callbacks.borrow_mut().arrange = Some(Rc::new(arrange));
    }

    pub fn set_draw_items(
        &self,
        draw: impl Fn(&mut dyn DrawingSurface, &Rect, &[PopupItem]) + 'static,
    ) {
        self.callbacks.borrow_mut().draw = Some(Rc::new(draw));
    }

    pub fn add_item(&self, item: PopupItem) {
        self.state.borrow_mut().items.push(item);
    }

    pub fn item_count(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn items(&self) -> Vec<PopupItem> {
        self.state.borrow().items.clone()
    }

    /// Runs `f` on one item; `None` when the index is out of range.
    pub fn update_item<R>(&self, index: usize, f: impl FnOnce(&mut PopupItem) -> R) -> Option<R> {
        let result = self.state.borrow_mut().items.get_mut(index).map(f);
        if result.is_some() {
            self.window.invalidate();
        }
        result
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.state.borrow().highlighted()
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().running
    }

    /*
     * Shows the popup at screen position (x, y) and blocks until it is
     * dismissed. Returns the index of the clicked item, if any, after its click
     * callback has run.
     */
    pub fn popup(&self, x: i32, y: i32) -> PlatformResult<Option<usize>> {
        if self.is_running() {
            log::warn!("PopupHandler: popup already running; nested request refused");
            return Err(PlatformError::OperationFailed(
                "popup is already running".to_string(),
            ));
        }
        let (measure, arrange) = {
            let callbacks = self.callbacks.borrow();
            (callbacks.measure.clone(), callbacks.arrange.clone())
        };
        let Some(measure) = measure else {
            log::error!("PopupHandler: no content measurement configured; refusing to show popup");
            return Err(PlatformError::Configuration(
                "popup has no content measurement function".to_string(),
            ));
        };

        let native = Rc::clone(self.window.native_ref());
        let popup = self.window.handle();
        let owner = self.owner.handle();

        let content = {
            let metrics = WindowTextMeasure {
                native: native.as_ref(),
                handle: popup,
                font: self.window.font(),
            };
            let state = self.state.borrow();
            measure(&metrics, &state.items)
        };
        let size = Size::new(
            content.width + POPUP_BORDER_INSET,
            content.height + POPUP_BORDER_INSET,
        );

        log::debug!("PopupHandler: showing {popup:?} at ({x}, {y}) size {size:?}");
        native.move_window(popup, Rect::from_origin_size(Point::new(x, y), size), true);
        {
            let client = native.client_rect(popup);
            let mut state = self.state.borrow_mut();
            state.done = false;
            state.clicked = None;
            state.highlight(None);
            if let Some(arrange) = arrange {
                arrange(&mut state.items, client);
            }
        }

        let quit_code = {
            let _session = PopupSession::start(native.as_ref(), popup, owner, &self.state);
            self.run_message_loop(native.as_ref(), popup, owner)
        };

        let clicked = {
            let mut state = self.state.borrow_mut();
            state.done = false;
            state.clicked.take()
        };

        if let Some(index) = clicked {
            let handler = self
                .state
                .borrow()
                .items
                .get(index)
                .and_then(|item| item.on_click.clone());
            if let Some(handler) = handler {
                handler(&PopupItemEvent { index, popup });
            }
        }
        if let Some(code) = quit_code {
            log::debug!("PopupHandler: re-posting quit({code})");
            native.post_quit(code);
        }
        Ok(clicked)
    }

    /// Returns the exit code of a quit message that ended the loop.
    fn run_message_loop(
        &self,
        native: &dyn NativeWindowing,
        popup: NativeHandle,
        owner: NativeHandle,
    ) -> Option<i32> {
        let to_popup_client =
            |source: NativeHandle, pt: Point| native.map_point(Some(source), Some(popup), pt);
        let ctx = PopupFilterContext {
            popup,
            to_popup_client: &to_popup_client,
        };
        loop {
            let Some(msg) = native.next_message() else {
                log::debug!("PopupHandler: message source ended");
                return None;
            };
            if msg.is_quit() {
                return Some(msg.exit_code());
            }
            if self.should_end(native, owner) {
                return None;
            }
            let filtered = filter_popup_message(&msg, &ctx);
            native.dispatch_message(&filtered);
            if self.should_end(native, owner) {
                return None;
            }
        }
    }

    fn should_end(&self, native: &dyn NativeWindowing, owner: NativeHandle) -> bool {
        if self.state.borrow().done {
            return true;
        }
        let owner_active = native
            .active_window()
            .is_some_and(|active| active == owner || native.is_child(active, owner));
        if !owner_active {
            log::debug!("PopupHandler: owner no longer active; closing popup");
            return true;
        }
        if native.capture() != Some(owner) {
            log::debug!("PopupHandler: capture lost; closing popup");
            return true;
        }
        false
    }
}

impl Window for PopupController {
    fn node(&self) -> &Rc<WindowNode> {
        &self.window
    }
}

/// Capability of every popup control.
pub trait PopupWindow: Window {
    fn controller(&self) -> &PopupController;

    fn popup(&self, x: i32, y: i32) -> PlatformResult<Option<usize>> {
        self.controller().popup(x, y)
    }

    fn item_count(&self) -> usize {
        self.controller().item_count()
    }
}

impl PopupWindow for PopupController {
    fn controller(&self) -> &PopupController {
        self
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::headless_backend::HeadlessPlatform;
    use crate::message::{
        WM_KEYDOWN, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_NCLBUTTONDOWN, WM_PAINT,
        WM_SIZE, make_lparam,
    };
    use crate::native::NativeRef;
    use std::cell::Cell;

    pub(crate) struct Fixture {
        pub headless: Rc<HeadlessPlatform>,
        pub main: Rc<WindowNode>,
        pub owner: Rc<WindowNode>,
    }

    /// Main window at the screen origin with an owner child at (10, 10).
    pub(crate) fn fixture() -> Fixture {
        let headless = Rc::new(HeadlessPlatform::new());
        let native: NativeRef = headless.clone();
        let main = WindowNode::create(
            &native,
            &WindowConfig::new("main", WindowStyle::top_level(), 0, 0, 400, 300),
            None,
        )
        .expect("main");
        let owner = WindowNode::create(
            &native,
            &WindowConfig::new("owner", WindowStyle::child(), 10, 10, 80, 24),
            Some(&main),
        )
        .expect("owner");
        Fixture {
            headless,
            main,
            owner,
        }
    }

    fn stacked_items(items: &mut [PopupItem], rect: Rect) {
        let mut top = rect.top;
        for item in items.iter_mut() {
            item.rect = Rect::new(rect.left, top, rect.right, top + 24);
            top += 24;
        }
    }

    fn counting_controller(fx: &Fixture, clicks: &Rc<Cell<u32>>) -> PopupController {
        let controller = PopupController::new(&fx.owner).expect("popup");
        controller.set_measure_content_size(|_, items| Size::new(100, 24 * items.len() as i32));
        controller.set_arrange_items(stacked_items);
        for text in ["one", "two", "three"] {
            let clicks = Rc::clone(clicks);
            controller.add_item(PopupItem::menu(text).with_click(move |_| clicks.set(clicks.get() + 1)));
        }
        controller
    }

    /// Owner-client point that lands on `popup_pt` when the popup sits at screen (50, 100).
    fn owner_point_for(popup_pt: Point) -> Point {
        Point::new(popup_pt.x + 50 - 10, popup_pt.y + 100 - 10)
    }

    #[test]
    fn hit_test_resolves_stacked_items() {
        // Arrange
        let mut items = vec![PopupItem::menu("a"), PopupItem::menu("b"), PopupItem::menu("c")];
        stacked_items(&mut items, Rect::new(0, 0, 100, 72));
        // Act / Assert
        assert_eq!(hit_test(&items, Point::new(5, 30)), Some(1));
        assert_eq!(hit_test(&items, Point::new(5, 100)), None);
    }

    #[test]
    fn next_selectable_skips_separators_and_disabled_items() {
        let mut items = vec![PopupItem::menu("a"), PopupItem::menu(""), PopupItem::menu("c")];
        items[1].separator = true;

        assert_eq!(next_selectable(&items, None, true), Some(0));
        assert_eq!(next_selectable(&items, Some(0), true), Some(2));
        assert_eq!(next_selectable(&items, Some(2), true), Some(0));
        assert_eq!(next_selectable(&items, Some(0), false), Some(2));

        items[2].enabled = false;
        assert_eq!(next_selectable(&items, Some(0), true), Some(0));
    }

    #[test]
    fn filter_remaps_client_mouse_into_the_popup_frame() {
        // Arrange
        let popup = NativeHandle(2);
        let shift = |_: NativeHandle, pt: Point| Point::new(pt.x - 40, pt.y - 90);
        let ctx = PopupFilterContext {
            popup,
            to_popup_client: &shift,
        };
        let raw = RawMessage::mouse(NativeHandle(1), WM_MOUSEMOVE, Point::new(60, 150), 0);
        // Act
        let filtered = filter_popup_message(&raw, &ctx);
        // Assert
        assert_eq!(filtered.target, popup);
        assert_eq!(filtered.point(), Point::new(20, 60));
    }

    #[test]
    fn filter_only_retargets_non_client_mouse_and_keyboard() {
        let popup = NativeHandle(2);
        let shift = |_: NativeHandle, pt: Point| Point::new(pt.x + 1000, pt.y);
        let ctx = PopupFilterContext {
            popup,
            to_popup_client: &shift,
        };
        let nc = RawMessage::new(NativeHandle(1), WM_NCLBUTTONDOWN, 2, make_lparam(300, 400));
        let key = RawMessage::key(NativeHandle(1), WM_KEYDOWN, VK_ESCAPE);
        let paint = RawMessage::new(NativeHandle(1), WM_PAINT, 0, 0);

        let nc_out = filter_popup_message(&nc, &ctx);
        let key_out = filter_popup_message(&key, &ctx);
        let paint_out = filter_popup_message(&paint, &ctx);

        assert_eq!((nc_out.target, nc_out.lparam), (popup, nc.lparam));
        assert_eq!(key_out.target, popup);
        assert_eq!(paint_out, paint);
    }

    #[test]
    fn mouse_up_on_an_item_selects_it_and_fires_its_callback_once() {
        // Arrange
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        let target = owner_point_for(Point::new(20, 60));
        fx.headless
            .post(RawMessage::mouse(fx.owner.handle(), WM_MOUSEMOVE, target, 0));
        fx.headless
            .post(RawMessage::mouse(fx.owner.handle(), WM_LBUTTONUP, target, 0));
        // Act
        let result = controller.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(result, Some(2));
        assert_eq!(clicks.get(), 1);
        assert!(!fx.headless.is_visible(controller.window().handle()));
        assert_eq!(fx.headless.capture(), None);
    }

    #[test]
    fn click_callback_runs_after_the_loop_has_unwound() {
        // Arrange
        let fx = fixture();
        let controller = PopupController::new(&fx.owner).expect("popup");
        controller.set_measure_content_size(|_, _| Size::new(100, 24));
        controller.set_arrange_items(stacked_items);
        let observed = Rc::new(Cell::new(None));
        let (sink, native) = (Rc::clone(&observed), Rc::clone(&fx.headless));
        let popup_handle = controller.window().handle();
        controller.add_item(PopupItem::menu("only").with_click(move |event| {
            sink.set(Some((native.capture(), native.is_visible(event.popup))));
        }));
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            owner_point_for(Point::new(5, 5)),
            0,
        ));
        // Act
        controller.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(observed.get(), Some((None, false)));
        assert_eq!(popup_handle, controller.window().handle());
    }

    #[test]
    fn mouse_down_outside_ends_without_a_click() {
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONDOWN,
            Point::new(0, 0),
            0,
        ));
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            owner_point_for(Point::new(20, 60)),
            0,
        ));

        let result = controller.popup(50, 100).expect("popup");

        assert_eq!(result, None);
        assert_eq!(clicks.get(), 0);
        assert_eq!(fx.headless.pending_messages().len(), 1);
    }

    #[test]
    fn mouse_move_highlights_exactly_one_item() {
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        for y in [5, 30] {
            fx.headless.post(RawMessage::mouse(
                fx.owner.handle(),
                WM_MOUSEMOVE,
                owner_point_for(Point::new(20, y)),
                0,
            ));
        }
        fx.headless
            .post(RawMessage::key(fx.main.handle(), WM_KEYDOWN, VK_ESCAPE));

        let result = controller.popup(50, 100).expect("popup");

        assert_eq!(result, None);
        assert_eq!(controller.highlighted(), Some(1));
        let highlighted: Vec<bool> = controller.items().iter().map(|i| i.highlighted).collect();
        assert_eq!(highlighted, vec![false, true, false]);
    }

    #[test]
    fn keyboard_navigation_clicks_the_highlighted_item() {
        // Arrange
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        for key in [VK_DOWN, VK_DOWN, VK_RETURN] {
            fx.headless.post(RawMessage::key(fx.main.handle(), WM_KEYDOWN, key));
        }
        // Act
        let result = controller.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(result, Some(1));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn disabled_item_does_not_end_the_popup() {
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        controller.update_item(2, |item| item.enabled = false);
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            owner_point_for(Point::new(20, 60)),
            0,
        ));

        let result = controller.popup(50, 100).expect("popup");

        assert_eq!(result, None);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn quit_message_ends_the_loop_and_is_posted_again() {
        // Arrange
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        fx.headless.post(RawMessage::quit(5));
        // Act
        let result = controller.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(result, None);
        let pending = fx.headless.pending_messages();
        assert_eq!(pending.len(), 1);
        assert!(pending[0].is_quit());
        assert_eq!(pending[0].exit_code(), 5);
    }

    #[test]
    fn losing_activation_ends_the_loop() {
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        fx.headless.set_active_window(None);
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            owner_point_for(Point::new(20, 60)),
            0,
        ));

        let result = controller.popup(50, 100).expect("popup");

        assert_eq!(result, None);
        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn losing_capture_ends_the_loop() {
        // Arrange
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        let native = Rc::clone(&fx.headless);
        fx.owner.set_resize_handler(move |_| native.release_capture());
        fx.headless.post(RawMessage::new(
            fx.owner.handle(),
            WM_SIZE,
            0,
            make_lparam(80, 24),
        ));
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            owner_point_for(Point::new(20, 60)),
            0,
        ));
        // Act
        let result = controller.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(result, None);
        assert_eq!(fx.headless.pending_messages().len(), 1);
    }

    #[test]
    fn popup_without_measurement_refuses_to_show() {
        let fx = fixture();
        let controller = PopupController::new(&fx.owner).expect("popup");
        controller.add_item(PopupItem::menu("x"));

        let result = controller.popup(0, 0);

        assert!(matches!(result, Err(PlatformError::Configuration(_))));
        assert!(!fx.headless.is_visible(controller.window().handle()));
        assert!(!controller.is_running());
    }

    #[test]
    fn popup_is_sized_to_content_plus_border() {
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);

        controller.popup(50, 100).expect("popup");

        assert_eq!(
            controller.window().window_rect(),
            Rect::new(50, 100, 152, 174)
        );
    }

    #[test]
    fn items_are_arranged_inside_the_client_area() {
        // Arrange
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        let arranged = Rc::new(Cell::new(Rect::default()));
        let sink = Rc::clone(&arranged);
        controller.set_arrange_items(move |items, rect| {
            sink.set(rect);
            stacked_items(items, rect);
        });
        fx.headless
            .post(RawMessage::key(fx.main.handle(), WM_KEYDOWN, VK_ESCAPE));
        controller.popup(50, 100).expect("first popup");
        fx.headless
            .post(RawMessage::key(fx.main.handle(), WM_KEYDOWN, VK_ESCAPE));
        // Act
        controller.popup(60, 100).expect("second popup");
        // Assert
        assert_eq!(arranged.get(), Rect::new(0, 0, 100, 72));
        assert_eq!(arranged.get(), controller.window().client_rect());
        assert_eq!(controller.items()[2].rect.bottom, 72);
    }

    #[test]
    fn unwinding_handler_still_closes_the_popup() {
        // Arrange
        let fx = fixture();
        let clicks = Rc::new(Cell::new(0));
        let controller = counting_controller(&fx, &clicks);
        controller.set_draw_items(|surface, client, items| {
            if items.iter().any(|item| item.highlighted) {
                panic!("draw failed");
            }
            surface.fill_rect(*client, Color::WHITE);
        });
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_MOUSEMOVE,
            owner_point_for(Point::new(20, 30)),
            0,
        ));
        // Act
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            controller.popup(50, 100)
        }));
        // Assert
        assert!(outcome.is_err());
        assert!(!controller.is_running());
        assert_eq!(fx.headless.capture(), None);
        assert!(!fx.headless.is_visible(controller.window().handle()));
        controller.set_draw_items(|surface, client, _| surface.fill_rect(*client, Color::WHITE));
        fx.headless
            .post(RawMessage::key(fx.main.handle(), WM_KEYDOWN, VK_ESCAPE));
        assert_eq!(controller.popup(50, 100).expect("popup after unwind"), None);
    }

    #[test]
    fn click_callback_may_open_the_popup_again() {
        // Arrange
        let fx = fixture();
        let controller = Rc::new(PopupController::new(&fx.owner).expect("popup"));
        controller.set_measure_content_size(|_, _| Size::new(100, 24));
        controller.set_arrange_items(stacked_items);
        let nested = Rc::new(Cell::new(None));
        let (weak, sink) = (Rc::downgrade(&controller), Rc::clone(&nested));
        controller.add_item(PopupItem::menu("again").with_click(move |_| {
            if let Some(controller) = weak.upgrade() {
                sink.set(Some(controller.popup(50, 100).is_ok()));
            }
        }));
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            owner_point_for(Point::new(5, 5)),
            0,
        ));
        // Act
        let result = controller.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(result, Some(0));
        assert_eq!(nested.get(), Some(true));
    }
}
