/*
 * Provides the public entry point for the dockui crate, a retained-mode window
 * toolkit for a paint application. It manages a tree of native windows, routes
 * native messages to per-window handlers, lays children out by docking, paints
 * through double buffers, shows OK/Cancel dialogs and runs modal popup menus
 * with their own input loop.
 *
 * Everything except the Win32 backend is portable: the windowing service and
 * drawing surface are traits (`native`), and the headless backend implements
 * them in memory so layout, dispatch and popup behaviour can be tested on every
 * platform. Conditional compilation keeps the `windows-rs` code scoped to
 * Windows builds.
 */
pub mod app;
pub mod controls;
pub mod dispatcher;
pub mod double_buffer;
pub mod error;
#[cfg(target_os = "windows")]
pub(crate) mod gdi_surface;
pub mod headless_backend;
pub mod layout_engine;
pub mod message;
pub mod native;
pub mod types;
#[cfg(target_os = "windows")]
pub mod win32_backend;
pub mod window_common;

pub use app::PlatformInterface;
pub use controls::button_handler::{Button, ClickSource, GroupBox};
pub use controls::container_handler::{Container, FlowContainer};
pub use controls::dialog_handler::{Dialog, DialogWindow};
pub use controls::label_handler::{Label, TextBox};
pub use controls::popup_handler::{PopupController, PopupItem, PopupWindow};
pub use controls::popup_menu_handler::{MenuItemInfo, PopupMenu};
pub use controls::size_menu_handler::{SizeMenu, SizeMenuItemInfo};
pub use controls::statusbar_handler::{Status, Statusbar};
pub use controls::widget_builder::{
    ButtonWidget, FlowContainerWidget, GroupWidget, LabelWidget, TextBoxWidget, Widget,
    WidgetList,
};
pub use double_buffer::{BackBuffer, DoubleBuffer};
pub use error::{PlatformError, Result as PlatformResult};
pub use native::{DrawingSurface, NativeRef, NativeWindowing};
pub use types::{
    Color, DockType, FlowDirection, FontDescription, Margins, Point, Rect, Size, WindowConfig,
    WindowStyle,
};
pub use window_common::{EventKind, Window, WindowNode};
