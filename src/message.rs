/*
 * Portable representation of native system messages. A `RawMessage` carries the
 * Win32-compatible message id together with its `wparam`/`lparam` payload, so the
 * Win32 backend can round-trip it losslessly through `DispatchMessageW` while the
 * headless backend and the popup filter can inspect and rewrite it without any
 * native API.
 *
 * `translate_message` turns a raw message into the typed `NativeEvent` the
 * dispatcher routes to handler slots. Messages whose payload is only meaningful
 * to the native layer (paint, window position records) are produced by the
 * backends directly instead.
 */
use crate::native::DrawingSurface;
use crate::types::{MouseButton, MouseWheelEvent, NativeHandle, Point, Rect, ScrollEvent};

pub const WM_CREATE: u32 = 0x0001;
pub const WM_DESTROY: u32 = 0x0002;
pub const WM_SIZE: u32 = 0x0005;
pub const WM_KILLFOCUS: u32 = 0x0008;
pub const WM_PAINT: u32 = 0x000F;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_QUIT: u32 = 0x0012;
pub const WM_ERASEBKGND: u32 = 0x0014;
pub const WM_SETCURSOR: u32 = 0x0020;
pub const WM_MOUSEACTIVATE: u32 = 0x0021;
pub const WM_WINDOWPOSCHANGED: u32 = 0x0047;

pub const WM_NCMOUSEMOVE: u32 = 0x00A0;
pub const WM_NCLBUTTONDOWN: u32 = 0x00A1;
pub const WM_NCLBUTTONUP: u32 = 0x00A2;
pub const WM_NCLBUTTONDBLCLK: u32 = 0x00A3;
pub const WM_NCRBUTTONDOWN: u32 = 0x00A4;
pub const WM_NCRBUTTONUP: u32 = 0x00A5;
pub const WM_NCRBUTTONDBLCLK: u32 = 0x00A6;
pub const WM_NCMBUTTONDOWN: u32 = 0x00A7;
pub const WM_NCMBUTTONUP: u32 = 0x00A8;
pub const WM_NCMBUTTONDBLCLK: u32 = 0x00A9;

pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_CHAR: u32 = 0x0102;
pub const WM_DEADCHAR: u32 = 0x0103;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;
pub const WM_SYSCHAR: u32 = 0x0106;
pub const WM_SYSDEADCHAR: u32 = 0x0107;

pub const WM_COMMAND: u32 = 0x0111;
pub const WM_HSCROLL: u32 = 0x0114;
pub const WM_VSCROLL: u32 = 0x0115;

pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MBUTTONDBLCLK: u32 = 0x0209;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_CAPTURECHANGED: u32 = 0x0215;
// Not exported by every binding; the value is fixed by the platform.
pub const WM_MOUSELEAVE: u32 = 0x02A3;

pub const MK_LBUTTON: usize = 0x0001;
pub const MK_RBUTTON: usize = 0x0002;
pub const MK_MBUTTON: usize = 0x0010;

pub const VK_RETURN: u32 = 0x0D;
pub const VK_ESCAPE: u32 = 0x1B;
pub const VK_UP: u32 = 0x26;
pub const VK_DOWN: u32 = 0x28;

#[inline]
pub fn loword_from_wparam(wparam: usize) -> i32 {
    (wparam & 0xFFFF) as i32
}
#[inline]
pub fn hiword_from_wparam(wparam: usize) -> i32 {
    ((wparam >> 16) & 0xFFFF) as i32
}
/// Signed low word; client coordinates may be negative after a cross-window remap.
#[inline]
pub fn x_from_lparam(lparam: isize) -> i32 {
    (lparam & 0xFFFF) as u16 as i16 as i32
}
#[inline]
pub fn y_from_lparam(lparam: isize) -> i32 {
    ((lparam >> 16) & 0xFFFF) as u16 as i16 as i32
}
#[inline]
pub fn make_lparam(low: i32, high: i32) -> isize {
    ((low as u16 as u32) | ((high as u16 as u32) << 16)) as isize
}

/// Coarse classification used by the popup input filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Mouse message whose `lparam` holds client coordinates of `target`.
    ClientMouse,
    /// Non-client mouse message; `lparam` holds screen coordinates.
    NonClientMouse,
    Keyboard,
    Quit,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage {
    pub target: NativeHandle,
    pub id: u32,
    pub wparam: usize,
    pub lparam: isize,
    pub time: u32,
    /// Cursor position in screen coordinates when the message was posted.
    pub screen_pt: Point,
}

impl RawMessage {
    pub fn new(target: NativeHandle, id: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            target,
            id,
            wparam,
            lparam,
            time: 0,
            screen_pt: Point::default(),
        }
    }

    /// Client-coordinate mouse message (`WM_MOUSEMOVE`, `WM_LBUTTONDOWN`, ...).
    pub fn mouse(target: NativeHandle, id: u32, client_pt: Point, key_state: usize) -> Self {
        Self::new(target, id, key_state, make_lparam(client_pt.x, client_pt.y))
    }

    pub fn key(target: NativeHandle, id: u32, virtual_key: u32) -> Self {
        Self::new(target, id, virtual_key as usize, 0)
    }

    pub fn quit(exit_code: i32) -> Self {
        Self::new(NativeHandle::INVALID, WM_QUIT, exit_code as usize, 0)
    }

    pub fn kind(&self) -> MessageKind {
        match self.id {
            WM_MOUSEMOVE | WM_LBUTTONDOWN | WM_LBUTTONUP | WM_LBUTTONDBLCLK | WM_RBUTTONDOWN
            | WM_RBUTTONUP | WM_RBUTTONDBLCLK | WM_MBUTTONDOWN | WM_MBUTTONUP
            | WM_MBUTTONDBLCLK => MessageKind::ClientMouse,
            WM_NCMOUSEMOVE | WM_NCLBUTTONDOWN | WM_NCLBUTTONUP | WM_NCLBUTTONDBLCLK
            | WM_NCRBUTTONDOWN | WM_NCRBUTTONUP | WM_NCRBUTTONDBLCLK | WM_NCMBUTTONDOWN
            | WM_NCMBUTTONUP | WM_NCMBUTTONDBLCLK => MessageKind::NonClientMouse,
            WM_KEYDOWN | WM_KEYUP | WM_CHAR | WM_DEADCHAR | WM_SYSKEYDOWN | WM_SYSKEYUP
            | WM_SYSCHAR | WM_SYSDEADCHAR => MessageKind::Keyboard,
            WM_QUIT => MessageKind::Quit,
            _ => MessageKind::Other,
        }
    }

    pub fn is_quit(&self) -> bool {
        self.id == WM_QUIT
    }

    pub fn exit_code(&self) -> i32 {
        self.wparam as i32
    }

    pub fn point(&self) -> Point {
        Point::new(x_from_lparam(self.lparam), y_from_lparam(self.lparam))
    }

    pub fn with_point(mut self, pt: Point) -> Self {
        self.lparam = make_lparam(pt.x, pt.y);
        self
    }

    pub fn with_target(mut self, target: NativeHandle) -> Self {
        self.target = target;
        self
    }
}

/// Typed event delivered to a single `WindowNode` by the dispatcher.
pub enum NativeEvent<'a> {
    Created,
    Paint {
        surface: &'a mut dyn DrawingSurface,
        dirty: Rect,
    },
    EraseBackground,
    MouseMove {
        pos: Point,
        button: MouseButton,
    },
    MouseDown {
        pos: Point,
        button: MouseButton,
    },
    MouseUp {
        pos: Point,
        button: MouseButton,
    },
    MouseLeave,
    MouseWheel(MouseWheelEvent),
    KeyDown(u32),
    KeyUp(u32),
    Char(u32),
    Resized {
        client: Rect,
    },
    FocusLost,
    Close,
    Destroy,
    PositionChanged(Rect),
    MouseActivate,
    CursorQuery,
    HScroll(ScrollEvent),
    VScroll(ScrollEvent),
    /// A child control notified its parent; reflected back to `source`.
    Command {
        source: NativeHandle,
        code: i32,
    },
}

impl NativeEvent<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            NativeEvent::Created => "Created",
            NativeEvent::Paint { .. } => "Paint",
            NativeEvent::EraseBackground => "EraseBackground",
            NativeEvent::MouseMove { .. } => "MouseMove",
            NativeEvent::MouseDown { .. } => "MouseDown",
            NativeEvent::MouseUp { .. } => "MouseUp",
            NativeEvent::MouseLeave => "MouseLeave",
            NativeEvent::MouseWheel(_) => "MouseWheel",
            NativeEvent::KeyDown(_) => "KeyDown",
            NativeEvent::KeyUp(_) => "KeyUp",
            NativeEvent::Char(_) => "Char",
            NativeEvent::Resized { .. } => "Resized",
            NativeEvent::FocusLost => "FocusLost",
            NativeEvent::Close => "Close",
            NativeEvent::Destroy => "Destroy",
            NativeEvent::PositionChanged(_) => "PositionChanged",
            NativeEvent::MouseActivate => "MouseActivate",
            NativeEvent::CursorQuery => "CursorQuery",
            NativeEvent::HScroll(_) => "HScroll",
            NativeEvent::VScroll(_) => "VScroll",
            NativeEvent::Command { .. } => "Command",
        }
    }
}

/// What the dispatcher tells the native layer after routing an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the native default processing run.
    Default,
    /// Fully handled; the native layer returns 0.
    Handled,
    /// Handled with an explicit result value.
    Value(isize),
}

fn button_from_key_state(key_state: usize) -> MouseButton {
    if key_state & MK_LBUTTON != 0 {
        MouseButton::Left
    } else if key_state & MK_RBUTTON != 0 {
        MouseButton::Right
    } else if key_state & MK_MBUTTON != 0 {
        MouseButton::Middle
    } else {
        MouseButton::None
    }
}

/*
 * Translates a raw message into the event routed to its target. Returns `None`
 * for messages the toolkit does not route (they go straight to default
 * processing) and for paint/position messages that the backend builds itself.
 */
pub fn translate_message(raw: &RawMessage) -> Option<NativeEvent<'static>> {
    let pos = raw.point();
    let event = match raw.id {
        WM_CREATE => NativeEvent::Created,
        WM_ERASEBKGND => NativeEvent::EraseBackground,
        WM_MOUSEMOVE => NativeEvent::MouseMove {
            pos,
            button: button_from_key_state(raw.wparam),
        },
        WM_LBUTTONDOWN => NativeEvent::MouseDown {
            pos,
            button: MouseButton::Left,
        },
        WM_RBUTTONDOWN => NativeEvent::MouseDown {
            pos,
            button: MouseButton::Right,
        },
        WM_MBUTTONDOWN => NativeEvent::MouseDown {
            pos,
            button: MouseButton::Middle,
        },
        WM_LBUTTONUP => NativeEvent::MouseUp {
            pos,
            button: MouseButton::Left,
        },
        WM_RBUTTONUP => NativeEvent::MouseUp {
            pos,
            button: MouseButton::Right,
        },
        WM_MBUTTONUP => NativeEvent::MouseUp {
            pos,
            button: MouseButton::Middle,
        },
        WM_MOUSELEAVE => NativeEvent::MouseLeave,
        WM_MOUSEWHEEL => NativeEvent::MouseWheel(MouseWheelEvent {
            wheel_delta: hiword_from_wparam(raw.wparam) as u16 as i16 as i32,
            position: pos,
            virtual_key: loword_from_wparam(raw.wparam),
        }),
        WM_KEYDOWN => NativeEvent::KeyDown(raw.wparam as u32),
        WM_KEYUP => NativeEvent::KeyUp(raw.wparam as u32),
        WM_CHAR => NativeEvent::Char(raw.wparam as u32),
        WM_SIZE => NativeEvent::Resized {
            client: Rect::new(
                0,
                0,
                (raw.lparam & 0xFFFF) as i32,
                ((raw.lparam >> 16) & 0xFFFF) as i32,
            ),
        },
        WM_KILLFOCUS => NativeEvent::FocusLost,
        WM_CLOSE => NativeEvent::Close,
        WM_DESTROY => NativeEvent::Destroy,
        WM_MOUSEACTIVATE => NativeEvent::MouseActivate,
        WM_SETCURSOR => NativeEvent::CursorQuery,
        WM_HSCROLL => NativeEvent::HScroll(ScrollEvent {
            request: loword_from_wparam(raw.wparam),
            position: hiword_from_wparam(raw.wparam),
        }),
        WM_VSCROLL => NativeEvent::VScroll(ScrollEvent {
            request: loword_from_wparam(raw.wparam),
            position: hiword_from_wparam(raw.wparam),
        }),
        WM_COMMAND if raw.lparam != 0 => NativeEvent::Command {
            source: NativeHandle(raw.lparam),
            code: hiword_from_wparam(raw.wparam),
        },
        _ => return None,
    };
    Some(event)
}
