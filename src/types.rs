/*
 * Platform-agnostic value types used throughout the toolkit: geometry, dock
 * and flow settings, colors, opaque native handles and the window
 * configuration passed to construction. Nothing in here touches a native API,
 * so these types are available (and testable) on every platform.
 */

/// Opaque identifier of a native window resource. The windowing service owns
/// the resource; a `WindowNode` only references it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeHandle(pub isize);

impl NativeHandle {
    pub const INVALID: NativeHandle = NativeHandle(0);

    pub fn is_invalid(self) -> bool {
        self.0 == 0
    }

    pub fn raw(self) -> isize {
        self.0
    }
}

/// Opaque identifier of a native font resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontHandle(pub isize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_inside(&self, rect: &Rect) -> bool {
        rect.contains(*self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Edge-based rectangle, right and bottom exclusive (Win32 `RECT` semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center_y(&self) -> i32 {
        self.top + self.height() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.left && pt.x < self.right && pt.y >= self.top && pt.y < self.bottom
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    pub fn inflate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.left - dx, self.top - dy, self.right + dx, self.bottom + dy)
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.left.max(other.left),
            self.top.max(other.top),
            self.right.min(other.right),
            self.bottom.min(other.bottom),
        );
        (!r.is_empty()).then_some(r)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Margins {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Margins {
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }
}

/// Placement rule controlling how a child claims space from its parent's
/// remaining content rect during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DockType {
    #[default]
    None,
    Top,
    Bottom,
    Left,
    Right,
    Fill,
}

/// Direction of the flow pass applied to children with `DockType::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FlowDirection {
    #[default]
    None,
    LeftToRight,
    RightToLeft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum MouseButton {
    #[default]
    None,
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseWheelEvent {
    pub wheel_delta: i32,
    /// Screen coordinates, as delivered by the native service.
    pub position: Point,
    pub virtual_key: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub request: i32,
    pub position: i32,
}

/// Answer of a window to a mouse activation query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseActivation {
    Activate,
    ActivateAndEat,
    NoActivate,
    NoActivateAndEat,
}

impl MouseActivation {
    /// The `MA_*` value the native service expects.
    pub fn raw(self) -> isize {
        match self {
            MouseActivation::Activate => 1,
            MouseActivation::ActivateAndEat => 2,
            MouseActivation::NoActivate => 3,
            MouseActivation::NoActivateAndEat => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Native class the window resource is created from. `Custom` windows are
/// fully driven by the toolkit; the others wrap a system control that the
/// toolkit subclasses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowClass {
    #[default]
    Custom,
    Button,
    /// Native button class drawn as a captioned frame.
    GroupBox,
    Static,
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowKind {
    #[default]
    TopLevel,
    Child,
    Popup,
    /// Owned top-level window with a caption; positioned in screen coordinates.
    Dialog,
}

impl WindowKind {
    /// Only child windows take part in their parent's layout; the others are
    /// merely owned and live in screen coordinates.
    pub fn is_laid_out_by_parent(self) -> bool {
        self == WindowKind::Child
    }
}

/// Strongly-typed window style; each flag maps to one native style bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowStyle {
    pub kind: WindowKind,
    pub visible: bool,
    pub clip_children: bool,
    pub tab_stop: bool,
    pub topmost: bool,
    pub no_activate: bool,
    pub client_edge: bool,
}

impl WindowStyle {
    pub fn top_level() -> Self {
        Self {
            kind: WindowKind::TopLevel,
            visible: true,
            clip_children: true,
            ..Default::default()
        }
    }

    pub fn child() -> Self {
        Self {
            kind: WindowKind::Child,
            visible: true,
            clip_children: true,
            ..Default::default()
        }
    }

    /// Transient popup: always on top, never takes activation, hidden until shown.
    pub fn popup() -> Self {
        Self {
            kind: WindowKind::Popup,
            visible: false,
            topmost: true,
            no_activate: true,
            ..Default::default()
        }
    }

    /// Captioned dialog frame, hidden until shown.
    pub fn dialog() -> Self {
        Self {
            kind: WindowKind::Dialog,
            visible: false,
            clip_children: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WindowConfig {
    pub text: String,
    pub class: WindowClass,
    pub style: WindowStyle,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowConfig {
    pub fn new(text: &str, style: WindowStyle, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            text: text.to_string(),
            class: WindowClass::Custom,
            style,
            x,
            y,
            width,
            height,
        }
    }

    pub fn with_class(mut self, class: WindowClass) -> Self {
        self.class = class;
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowMode {
    Show,
    ShowNoActivate,
    Hide,
}

/// Description of the default GUI font created by the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescription {
    pub face_name: String,
    pub point_size: i32,
    /// DPI at which `point_size` is specified.
    pub reference_dpi: i32,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            face_name: "Segoe UI".to_string(),
            point_size: 8,
            reference_dpi: 72,
        }
    }
}
