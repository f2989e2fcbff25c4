/*
 * In-memory implementation of the windowing service and drawing surface.
 *
 * `HeadlessPlatform` keeps a table of fake windows (bounds, visibility, text,
 * font, dirty region), a message queue, capture and activation state. It
 * delivers the same notifications a native service would (create, destroy,
 * size, position, paint) through the dispatcher, so window trees, layout and
 * popup loops behave as they do on a desktop. Handles are never reused. Popup
 * windows have a one pixel frame, so their client area is smaller than their
 * window rect, as with a bordered native popup.
 *
 * `PixelSurface` is a plain RGB pixel buffer that records drawn text, used
 * both as the paint target of headless windows and for buffer tests.
 */
use crate::dispatcher;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::message::{
    NativeEvent, RawMessage, WM_CREATE, WM_DESTROY, WM_ERASEBKGND, WM_MOUSELEAVE, WM_PAINT,
    WM_SIZE, make_lparam,
};
use crate::native::{DrawingSurface, NativeWindowing, TextAlign};
use crate::types::{
    Color, FontHandle, NativeHandle, Point, Rect, ShowMode, Size, WindowConfig, WindowKind,
};

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};

/// Fixed advance width of one character in headless text metrics.
pub const HEADLESS_CHAR_WIDTH: i32 = 7;
pub const HEADLESS_LINE_HEIGHT: i32 = 16;

const FIRST_HANDLE: isize = 0x100;
const DEFAULT_FONT: FontHandle = FontHandle(1);

/// Non-client frame width on each side of a window of this kind.
fn frame_inset(kind: WindowKind) -> i32 {
    match kind {
        WindowKind::Popup => 1,
        WindowKind::TopLevel | WindowKind::Child | WindowKind::Dialog => 0,
    }
}

fn is_activatable(kind: WindowKind) -> bool {
    matches!(kind, WindowKind::TopLevel | WindowKind::Dialog)
}

fn measure(text: &str) -> Size {
    Size::new(
        text.chars().count() as i32 * HEADLESS_CHAR_WIDTH,
        HEADLESS_LINE_HEIGHT,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnText {
    pub text: String,
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
    font: FontHandle,
    texts: Vec<DrawnText>,
}

impl PixelSurface {
    pub fn new(size: Size, background: Color) -> Self {
        let width = size.width.max(0);
        let height = size.height.max(0);
        Self {
            width,
            height,
            pixels: vec![background; (width * height) as usize],
            font: FontHandle::default(),
            texts: Vec::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            let index = (y * self.width + x) as usize;
            self.pixels[index] = color;
        }
    }

    pub fn texts(&self) -> &[DrawnText] {
        &self.texts
    }

    pub fn selected_font(&self) -> FontHandle {
        self.font
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

impl DrawingSurface for PixelSurface {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn create_compatible(&self, size: Size) -> PlatformResult<Box<dyn DrawingSurface>> {
        if size.width < 0 || size.height < 0 {
            return Err(PlatformError::OperationFailed(format!(
                "negative surface size {size:?}"
            )));
        }
        let mut surface = PixelSurface::new(size, Color::BLACK);
        surface.font = self.font;
        Ok(Box::new(surface))
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some(clipped) = rect.intersect(&self.bounds()) else {
            return;
        };
        for y in clipped.top..clipped.bottom {
            for x in clipped.left..clipped.right {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn blit(&mut self, source: &dyn DrawingSurface, dest: Point, size: Size) -> PlatformResult<()> {
        let source = source
            .as_any()
            .downcast_ref::<PixelSurface>()
            .ok_or_else(|| {
                PlatformError::OperationFailed("blit source is not a pixel surface".to_string())
            })?;
        for y in 0..size.height {
            for x in 0..size.width {
                if let Some(color) = source.pixel(x, y) {
                    self.set_pixel(dest.x + x, dest.y + y, color);
                }
            }
        }
        for text in &source.texts {
            self.texts.push(DrawnText {
                rect: text.rect.offset(dest.x, dest.y),
                ..text.clone()
            });
        }
        Ok(())
    }

    fn select_font(&mut self, font: FontHandle) {
        self.font = font;
    }

    fn measure_text(&self, text: &str) -> Size {
        measure(text)
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, _align: TextAlign) {
        self.texts.push(DrawnText {
            text: text.to_string(),
            rect,
            color,
        });
    }
}

#[derive(Debug, Clone)]
struct HeadlessWindow {
    parent: Option<NativeHandle>,
    kind: WindowKind,
    /// Parent-client coordinates for child windows, screen coordinates otherwise.
    bounds: Rect,
    visible: bool,
    enabled: bool,
    text: String,
    font: FontHandle,
    dirty: Option<Rect>,
    tracking_leave: bool,
}

impl HeadlessWindow {
    /// Client area in client coordinates.
    fn client(&self) -> Rect {
        let inset = frame_inset(self.kind);
        let size = self.bounds.size();
        Rect::new(0, 0, (size.width - 2 * inset).max(0), (size.height - 2 * inset).max(0))
    }
}

pub struct HeadlessPlatform {
    windows: RefCell<BTreeMap<NativeHandle, HeadlessWindow>>,
    surfaces: RefCell<BTreeMap<NativeHandle, PixelSurface>>,
    queue: RefCell<VecDeque<RawMessage>>,
    next_handle: Cell<isize>,
    capture: Cell<Option<NativeHandle>>,
    active: Cell<Option<NativeHandle>>,
    cursor: Cell<Point>,
    fail_next_create: Cell<bool>,
    background: Color,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            windows: RefCell::new(BTreeMap::new()),
            surfaces: RefCell::new(BTreeMap::new()),
            queue: RefCell::new(VecDeque::new()),
            next_handle: Cell::new(FIRST_HANDLE),
            capture: Cell::new(None),
            active: Cell::new(None),
            cursor: Cell::new(Point::default()),
            fail_next_create: Cell::new(false),
            background: Color::WHITE,
        }
    }

    // --- test controls -------------------------------------------------

    /// Queues an input message, as if the user produced it.
    pub fn post(&self, msg: RawMessage) {
        self.queue.borrow_mut().push_back(msg);
    }

    pub fn pending_messages(&self) -> Vec<RawMessage> {
        self.queue.borrow().iter().copied().collect()
    }

    pub fn fail_next_create(&self) {
        self.fail_next_create.set(true);
    }

    pub fn set_active_window(&self, handle: Option<NativeHandle>) {
        self.active.set(handle);
    }

    pub fn set_cursor_pos(&self, pt: Point) {
        self.cursor.set(pt);
    }

    pub fn is_visible(&self, handle: NativeHandle) -> bool {
        self.windows
            .borrow()
            .get(&handle)
            .is_some_and(|w| w.visible)
    }

    pub fn is_enabled(&self, handle: NativeHandle) -> bool {
        self.windows
            .borrow()
            .get(&handle)
            .is_some_and(|w| w.enabled)
    }

    pub fn exists(&self, handle: NativeHandle) -> bool {
        self.windows.borrow().contains_key(&handle)
    }

    pub fn font_of(&self, handle: NativeHandle) -> Option<FontHandle> {
        self.windows.borrow().get(&handle).map(|w| w.font)
    }

    pub fn is_tracking_leave(&self, handle: NativeHandle) -> bool {
        self.windows
            .borrow()
            .get(&handle)
            .is_some_and(|w| w.tracking_leave)
    }

    /// Copy of the surface the window last painted into.
    pub fn surface_snapshot(&self, handle: NativeHandle) -> Option<PixelSurface> {
        self.surfaces.borrow().get(&handle).cloned()
    }

    /*
     * Runs a full paint cycle for `handle`: erase, then paint the dirty region
     * (or the whole client area) into the window's persistent surface.
     */
    pub fn paint(&self, handle: NativeHandle) {
        let Some(dirty) = self.take_dirty(handle) else {
            return;
        };
        let client = self.client_rect(handle);
        let previous = self.surfaces.borrow_mut().remove(&handle);
        let mut surface = match previous {
            Some(surface) if surface.size() == client.size() => surface,
            _ => PixelSurface::new(client.size(), Color::BLACK),
        };

        dispatcher::dispatch_message(&RawMessage::new(handle, WM_ERASEBKGND, 0, 0));
        dispatcher::dispatch_event(
            handle,
            NativeEvent::Paint {
                surface: &mut surface,
                dirty,
            },
        );

        if self.exists(handle) {
            self.surfaces.borrow_mut().insert(handle, surface);
        }
    }

    fn take_dirty(&self, handle: NativeHandle) -> Option<Rect> {
        let mut windows = self.windows.borrow_mut();
        let window = windows.get_mut(&handle)?;
        let client = window.client();
        Some(window.dirty.take().unwrap_or(client))
    }

    fn allocate_handle(&self) -> NativeHandle {
        let raw = self.next_handle.get();
        self.next_handle.set(raw + 1);
        NativeHandle(raw)
    }

    /// Screen position of the window's outer top-left corner.
    fn screen_origin(&self, handle: NativeHandle) -> Point {
        let windows = self.windows.borrow();
        let mut origin = Point::default();
        let mut current = windows.get(&handle);
        while let Some(window) = current {
            origin.x += window.bounds.left;
            origin.y += window.bounds.top;
            current = match (window.kind, window.parent) {
                (WindowKind::Child, Some(parent)) => windows.get(&parent),
                _ => None,
            };
            if let Some(parent) = current {
                let inset = frame_inset(parent.kind);
                origin.x += inset;
                origin.y += inset;
            }
        }
        origin
    }

    /// Screen position of the window's client origin.
    fn client_origin(&self, handle: NativeHandle) -> Point {
        let inset = self
            .windows
            .borrow()
            .get(&handle)
            .map(|w| frame_inset(w.kind))
            .unwrap_or_default();
        let origin = self.screen_origin(handle);
        Point::new(origin.x + inset, origin.y + inset)
    }

    fn set_bounds(&self, handle: NativeHandle, bounds: Rect, repaint: bool) {
        let (moved, resized) = {
            let mut windows = self.windows.borrow_mut();
            let Some(window) = windows.get_mut(&handle) else {
                log::debug!("Headless: move of unknown window {handle:?} ignored");
                return;
            };
            let old = window.bounds;
            window.bounds = bounds;
            if repaint {
                window.dirty = Some(window.client());
            }
            (old.origin() != bounds.origin(), old.size() != bounds.size())
        };
        if moved || resized {
            dispatcher::dispatch_event(handle, NativeEvent::PositionChanged(bounds));
        }
        if resized {
            let size = bounds.size();
            dispatcher::dispatch_message(&RawMessage::new(
                handle,
                WM_SIZE,
                0,
                make_lparam(size.width, size.height),
            ));
        }
    }
}

impl NativeWindowing for HeadlessPlatform {
    fn create_window(
        &self,
        config: &WindowConfig,
        parent: Option<NativeHandle>,
    ) -> PlatformResult<NativeHandle> {
        if self.fail_next_create.replace(false) {
            return Err(PlatformError::WindowCreationFailed(format!(
                "headless creation of '{}' refused",
                config.text
            )));
        }
        if let Some(parent) = parent
            && !self.exists(parent)
        {
            return Err(PlatformError::InvalidHandle(format!(
                "parent {parent:?} does not exist"
            )));
        }
        let handle = self.allocate_handle();
        self.windows.borrow_mut().insert(
            handle,
            HeadlessWindow {
                parent,
                kind: config.style.kind,
                bounds: config.bounds(),
                visible: config.style.visible,
                enabled: true,
                text: config.text.clone(),
                font: FontHandle::default(),
                dirty: None,
                tracking_leave: false,
            },
        );
        log::trace!("Headless: created {handle:?} '{}'", config.text);

        dispatcher::dispatch_message(&RawMessage::new(handle, WM_CREATE, 0, 0));
        if is_activatable(config.style.kind) && config.style.visible {
            self.active.set(Some(handle));
        }
        Ok(handle)
    }

    fn destroy_window(&self, handle: NativeHandle) {
        if !self.exists(handle) {
            log::debug!("Headless: destroy of unknown window {handle:?} ignored");
            return;
        }
        dispatcher::dispatch_message(&RawMessage::new(handle, WM_DESTROY, 0, 0));
        self.windows.borrow_mut().remove(&handle);
        self.surfaces.borrow_mut().remove(&handle);
        if self.capture.get() == Some(handle) {
            self.capture.set(None);
        }
        if self.active.get() == Some(handle) {
            self.active.set(None);
        }
    }

    fn client_rect(&self, handle: NativeHandle) -> Rect {
        self.windows
            .borrow()
            .get(&handle)
            .map(HeadlessWindow::client)
            .unwrap_or_default()
    }

    fn window_rect(&self, handle: NativeHandle) -> Rect {
        let Some(size) = self.windows.borrow().get(&handle).map(|w| w.bounds.size()) else {
            return Rect::default();
        };
        Rect::from_origin_size(self.screen_origin(handle), size)
    }

    fn move_window(&self, handle: NativeHandle, bounds: Rect, repaint: bool) {
        self.set_bounds(handle, bounds, repaint);
    }

    fn set_position(&self, handle: NativeHandle, pos: Point) {
        let Some(size) = self.windows.borrow().get(&handle).map(|w| w.bounds.size()) else {
            return;
        };
        self.set_bounds(handle, Rect::from_origin_size(pos, size), false);
    }

    fn set_size(&self, handle: NativeHandle, size: Size) {
        let Some(origin) = self.windows.borrow().get(&handle).map(|w| w.bounds.origin()) else {
            return;
        };
        self.set_bounds(handle, Rect::from_origin_size(origin, size), false);
    }

    fn apply_layout(&self, moves: &[(NativeHandle, Rect)]) {
        for (handle, bounds) in moves {
            if let Some(window) = self.windows.borrow_mut().get_mut(handle) {
                window.visible = true;
            }
            self.set_bounds(*handle, *bounds, true);
        }
    }

    fn show(&self, handle: NativeHandle, mode: ShowMode) {
        let kind = {
            let mut windows = self.windows.borrow_mut();
            let Some(window) = windows.get_mut(&handle) else {
                return;
            };
            window.visible = mode != ShowMode::Hide;
            window.kind
        };
        if mode == ShowMode::Show && is_activatable(kind) {
            self.active.set(Some(handle));
        }
    }

    fn enable_window(&self, handle: NativeHandle, enable: bool) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&handle) {
            window.enabled = enable;
        }
    }

    fn invalidate(&self, handle: NativeHandle, rect: Option<Rect>, _erase: bool) {
        let mut windows = self.windows.borrow_mut();
        let Some(window) = windows.get_mut(&handle) else {
            return;
        };
        let area = rect.unwrap_or(window.client());
        window.dirty = Some(match window.dirty {
            Some(d) => Rect::new(
                d.left.min(area.left),
                d.top.min(area.top),
                d.right.max(area.right),
                d.bottom.max(area.bottom),
            ),
            None => area,
        });
    }

    fn update(&self, handle: NativeHandle) {
        let dirty = self
            .windows
            .borrow()
            .get(&handle)
            .is_some_and(|w| w.dirty.is_some());
        if dirty {
            self.paint(handle);
        }
    }

    fn set_text(&self, handle: NativeHandle, text: &str) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&handle) {
            window.text = text.to_string();
        }
    }

    fn text(&self, handle: NativeHandle) -> String {
        self.windows
            .borrow()
            .get(&handle)
            .map(|w| w.text.clone())
            .unwrap_or_default()
    }

    fn set_font(&self, handle: NativeHandle, font: FontHandle) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&handle) {
            window.font = font;
        }
    }

    fn default_font(&self) -> FontHandle {
        DEFAULT_FONT
    }

    fn default_background(&self) -> Color {
        self.background
    }

    fn measure_text(&self, _handle: NativeHandle, _font: FontHandle, text: &str) -> Size {
        measure(text)
    }

    fn set_capture(&self, handle: NativeHandle) {
        self.capture.set(Some(handle));
    }

    fn release_capture(&self) {
        self.capture.set(None);
    }

    fn capture(&self) -> Option<NativeHandle> {
        self.capture.get()
    }

    fn active_window(&self) -> Option<NativeHandle> {
        self.active.get()
    }

    fn is_child(&self, parent: NativeHandle, child: NativeHandle) -> bool {
        let windows = self.windows.borrow();
        let mut current = windows.get(&child).and_then(|w| w.parent);
        while let Some(handle) = current {
            if handle == parent {
                return true;
            }
            current = windows.get(&handle).and_then(|w| w.parent);
        }
        false
    }

    fn cursor_pos(&self) -> Point {
        self.cursor.get()
    }

    fn map_point(&self, from: Option<NativeHandle>, to: Option<NativeHandle>, pt: Point) -> Point {
        let from_origin = from.map(|h| self.client_origin(h)).unwrap_or_default();
        let to_origin = to.map(|h| self.client_origin(h)).unwrap_or_default();
        Point::new(
            pt.x + from_origin.x - to_origin.x,
            pt.y + from_origin.y - to_origin.y,
        )
    }

    fn track_mouse_leave(&self, handle: NativeHandle) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&handle) {
            window.tracking_leave = true;
        }
    }

    fn next_message(&self) -> Option<RawMessage> {
        self.queue.borrow_mut().pop_front()
    }

    fn dispatch_message(&self, msg: &RawMessage) {
        if !self.exists(msg.target) {
            log::trace!("Headless: message {:#x} for {:?} dropped", msg.id, msg.target);
            return;
        }
        match msg.id {
            WM_PAINT => self.paint(msg.target),
            WM_MOUSELEAVE => {
                if let Some(window) = self.windows.borrow_mut().get_mut(&msg.target) {
                    window.tracking_leave = false;
                }
                dispatcher::dispatch_message(msg);
            }
            _ => {
                dispatcher::dispatch_message(msg);
            }
        }
    }

    fn post_quit(&self, exit_code: i32) {
        self.post(RawMessage::quit(exit_code));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WindowStyle;
    use crate::window_common::WindowNode;

    #[test]
    fn fill_rect_is_clipped_to_the_surface() {
        let mut surface = PixelSurface::new(Size::new(4, 4), Color::BLACK);

        surface.fill_rect(Rect::new(2, 2, 10, 10), Color::WHITE);

        assert_eq!(surface.pixel(3, 3), Some(Color::WHITE));
        assert_eq!(surface.pixel(1, 1), Some(Color::BLACK));
        assert_eq!(surface.pixel(4, 4), None);
    }

    #[test]
    fn blit_copies_pixels_at_the_destination_offset() {
        // Arrange
        let mut target = PixelSurface::new(Size::new(10, 10), Color::BLACK);
        let mut source = PixelSurface::new(Size::new(2, 2), Color::rgb(9, 9, 9));
        source.draw_text("x", Rect::new(0, 0, 2, 2), Color::WHITE, TextAlign::Left);
        // Act
        target
            .blit(&source, Point::new(5, 6), Size::new(2, 2))
            .expect("blit");
        // Assert
        assert_eq!(target.pixel(5, 6), Some(Color::rgb(9, 9, 9)));
        assert_eq!(target.pixel(6, 7), Some(Color::rgb(9, 9, 9)));
        assert_eq!(target.pixel(7, 7), Some(Color::BLACK));
        assert_eq!(target.texts()[0].rect, Rect::new(5, 6, 7, 8));
    }

    #[test]
    fn child_window_rect_is_reported_in_screen_coordinates() {
        // Arrange
        let platform = std::rc::Rc::new(HeadlessPlatform::new());
        let native: crate::native::NativeRef = platform.clone();
        let root_config =
            WindowConfig::new("root", WindowStyle::top_level(), 100, 50, 300, 200);
        let root = WindowNode::create(&native, &root_config, None).expect("root");
        // Act
        let child_config = WindowConfig::new("child", WindowStyle::child(), 10, 20, 30, 40);
        let child = WindowNode::create(&native, &child_config, Some(&root)).expect("child");
        // Assert
        assert_eq!(
            platform.window_rect(child.handle()),
            Rect::new(110, 70, 140, 110)
        );
        assert_eq!(
            platform.map_point(Some(child.handle()), Some(root.handle()), Point::new(1, 1)),
            Point::new(11, 21)
        );
        assert!(platform.is_child(root.handle(), child.handle()));
        assert!(!platform.is_child(child.handle(), root.handle()));
    }

    #[test]
    fn popup_client_area_sits_inside_a_one_pixel_frame() {
        // Arrange
        let platform = std::rc::Rc::new(HeadlessPlatform::new());
        let native: crate::native::NativeRef = platform.clone();
        let config = WindowConfig::new("popup", WindowStyle::popup(), 50, 100, 102, 74);
        // Act
        let popup = WindowNode::create(&native, &config, None).expect("popup");
        // Assert
        assert_eq!(platform.window_rect(popup.handle()), Rect::new(50, 100, 152, 174));
        assert_eq!(platform.client_rect(popup.handle()), Rect::new(0, 0, 100, 72));
        assert_eq!(
            platform.map_point(Some(popup.handle()), None, Point::new(0, 0)),
            Point::new(51, 101)
        );
    }

    #[test]
    fn disabled_windows_report_their_state() {
        let platform = std::rc::Rc::new(HeadlessPlatform::new());
        let native: crate::native::NativeRef = platform.clone();
        let config = WindowConfig::new("w", WindowStyle::top_level(), 0, 0, 1, 1);
        let handle = WindowNode::create(&native, &config, None).expect("window").handle();

        platform.enable_window(handle, false);

        assert!(!platform.is_enabled(handle));
        platform.enable_window(handle, true);
        assert!(platform.is_enabled(handle));
    }

    #[test]
    fn creation_failure_is_reported_once() {
        let platform = HeadlessPlatform::new();
        platform.fail_next_create();
        let config = WindowConfig::new("w", WindowStyle::top_level(), 0, 0, 1, 1);

        let first = platform.create_window(&config, None);

        assert!(matches!(first, Err(PlatformError::WindowCreationFailed(_))));
        assert!(!platform.fail_next_create.get());
    }

    #[test]
    fn post_quit_queues_a_quit_message() {
        let platform = HeadlessPlatform::new();

        platform.post_quit(7);

        let msg = platform.next_message().expect("quit message");
        assert!(msg.is_quit());
        assert_eq!(msg.exit_code(), 7);
        assert!(platform.next_message().is_none());
    }
}
