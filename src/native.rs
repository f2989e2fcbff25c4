/*
 * Seams to the two external collaborators the toolkit consumes: the native
 * windowing service and the native 2D drawing surface. The Win32 backend
 * implements them over `windows-rs`; the headless backend implements them in
 * memory so layout, dispatch, buffering and popup loops run in unit tests.
 *
 * All methods take `&self`: the dispatcher re-enters the windowing service from
 * inside handlers (a paint handler may invalidate, a resize may move children),
 * so implementations keep their own interior mutability and never hold a borrow
 * across a dispatch.
 */
use crate::error::Result as PlatformResult;
use crate::message::RawMessage;
use crate::types::{Color, FontHandle, NativeHandle, Point, Rect, ShowMode, Size, WindowConfig};

use std::any::Any;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Font metrics query, handed to popup content measurement.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> Size;
}

/// A native drawing target (a window DC during paint, or an offscreen surface).
pub trait DrawingSurface {
    fn as_any(&self) -> &dyn Any;

    fn size(&self) -> Size;

    /// Allocates an offscreen surface compatible with this one.
    fn create_compatible(&self, size: Size) -> PlatformResult<Box<dyn DrawingSurface>>;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Copies `size` pixels from the origin of `source` onto this surface at `dest`.
    fn blit(&mut self, source: &dyn DrawingSurface, dest: Point, size: Size) -> PlatformResult<()>;

    fn select_font(&mut self, font: FontHandle);

    fn measure_text(&self, text: &str) -> Size;

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, align: TextAlign);

    /// Filled rectangle with a one pixel border.
    fn fill_rectangle(&mut self, rect: Rect, border: Color, fill: Color) {
        self.fill_rect(rect, border);
        let inner = rect.inflate(-1, -1);
        if !inner.is_empty() {
            self.fill_rect(inner, fill);
        }
    }

    /// Axis-aligned line, end point exclusive. Diagonal lines are the paint tools' business.
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        if y1 == y2 {
            self.fill_rect(Rect::new(x1.min(x2), y1, x1.max(x2), y1 + 1), color);
        } else if x1 == x2 {
            self.fill_rect(Rect::new(x1, y1.min(y2), x1 + 1, y1.max(y2)), color);
        } else {
            log::warn!("DrawingSurface: diagonal line ({x1},{y1})-({x2},{y2}) ignored");
        }
    }
}

/// Native windowing service. Positions of child windows are in their parent's
/// client coordinates; top-level and popup windows use screen coordinates.
pub trait NativeWindowing {
    fn create_window(
        &self,
        config: &WindowConfig,
        parent: Option<NativeHandle>,
    ) -> PlatformResult<NativeHandle>;

    fn destroy_window(&self, handle: NativeHandle);

    fn client_rect(&self, handle: NativeHandle) -> Rect;

    /// Outer bounds in screen coordinates.
    fn window_rect(&self, handle: NativeHandle) -> Rect;

    fn move_window(&self, handle: NativeHandle, bounds: Rect, repaint: bool);

    fn set_position(&self, handle: NativeHandle, pos: Point);

    fn set_size(&self, handle: NativeHandle, size: Size);

    /// Moves and shows a batch of children in one native transaction.
    fn apply_layout(&self, moves: &[(NativeHandle, Rect)]);

    fn show(&self, handle: NativeHandle, mode: ShowMode);

    /// Enables or disables mouse and keyboard input to the window.
    fn enable_window(&self, handle: NativeHandle, enable: bool);

    fn invalidate(&self, handle: NativeHandle, rect: Option<Rect>, erase: bool);

    fn update(&self, handle: NativeHandle);

    fn set_text(&self, handle: NativeHandle, text: &str);

    fn text(&self, handle: NativeHandle) -> String;

    fn set_font(&self, handle: NativeHandle, font: FontHandle);

    fn default_font(&self) -> FontHandle;

    /// System window background, used when a window has no paint handler.
    fn default_background(&self) -> Color;

    fn measure_text(&self, handle: NativeHandle, font: FontHandle, text: &str) -> Size;

    fn set_capture(&self, handle: NativeHandle);

    fn release_capture(&self);

    fn capture(&self) -> Option<NativeHandle>;

    fn active_window(&self) -> Option<NativeHandle>;

    /// True when `child` is a (transitive) child of `parent`.
    fn is_child(&self, parent: NativeHandle, child: NativeHandle) -> bool;

    fn cursor_pos(&self) -> Point;

    /// Converts a point between two windows' client spaces; `None` is the screen.
    fn map_point(&self, from: Option<NativeHandle>, to: Option<NativeHandle>, pt: Point) -> Point;

    /// Arms a one-shot mouse-leave notification for `handle`.
    fn track_mouse_leave(&self, handle: NativeHandle);

    /// Blocks until the next message is available. `None` means the message
    /// source failed and no further messages will arrive.
    fn next_message(&self) -> Option<RawMessage>;

    fn dispatch_message(&self, msg: &RawMessage);

    fn post_quit(&self, exit_code: i32);
}

pub type NativeRef = Rc<dyn NativeWindowing>;

/// `TextMeasure` over one window and font of a windowing service.
pub struct WindowTextMeasure<'a> {
    pub native: &'a dyn NativeWindowing,
    pub handle: NativeHandle,
    pub font: FontHandle,
}

impl TextMeasure for WindowTextMeasure<'_> {
    fn measure_text(&self, text: &str) -> Size {
        self.native.measure_text(self.handle, self.font, text)
    }
}
