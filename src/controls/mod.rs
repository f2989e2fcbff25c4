/*
 * Controls built on `WindowNode`: native-class wrappers (buttons, labels, text
 * boxes), flow containers, dialogs, the status bar, declarative widget
 * builders, and the popup family with its modal input loop.
 */
pub mod button_handler;
pub mod container_handler;
pub mod dialog_handler;
pub mod label_handler;
pub mod paint_router;
pub mod popup_handler;
pub mod popup_menu_handler;
pub mod size_menu_handler;
pub mod statusbar_handler;
#[cfg(target_os = "windows")]
pub(crate) mod styling_handler;
pub mod widget_builder;
