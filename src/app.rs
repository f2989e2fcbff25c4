/*
 * Application entry point: owns the windowing service and runs the primary
 * message loop. Popups run their own loop on top of this one and re-post any
 * quit request they swallow, so `run` still sees it.
 */
use crate::error::{PlatformError, Result as PlatformResult};
use crate::native::NativeRef;
use crate::types::{Point, WindowConfig, WindowStyle};
use crate::window_common::WindowNode;

#[cfg(target_os = "windows")]
use crate::types::FontDescription;

use std::rc::Rc;

pub struct PlatformInterface {
    native: NativeRef,
}

impl PlatformInterface {
    /*
     * Creates the Win32 platform: registers the window class named after
     * `app_name` and creates the DPI-aware default GUI font.
     */
    #[cfg(target_os = "windows")]
    pub fn new(app_name: &str) -> PlatformResult<Self> {
        Self::with_font(app_name, &FontDescription::default())
    }

    #[cfg(target_os = "windows")]
    pub fn with_font(app_name: &str, font: &FontDescription) -> PlatformResult<Self> {
        log::debug!("PlatformInterface: initializing '{app_name}' with {font:?}");
        let native = crate::win32_backend::Win32Platform::new(app_name, font)?;
        Ok(Self {
            native: Rc::new(native),
        })
    }

    /// Wraps any windowing service, e.g. the headless backend in tests.
    pub fn from_native(native: NativeRef) -> Self {
        Self { native }
    }

    pub fn native(&self) -> &NativeRef {
        &self.native
    }

    /// Creates a visible top-level window.
    pub fn create_main_window(
        &self,
        title: &str,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> PlatformResult<Rc<WindowNode>> {
        let config = WindowConfig::new(title, WindowStyle::top_level(), x, y, width, height);
        WindowNode::create(&self.native, &config, None)
    }

    pub fn cursor_pos(&self) -> Point {
        self.native.cursor_pos()
    }

    /*
     * Pumps messages until a quit message arrives and returns its exit code.
     * A message source that dries up before quitting is an error.
     */
    pub fn run(&self) -> PlatformResult<i32> {
        log::debug!("PlatformInterface: entering the main message loop");
        loop {
            match self.native.next_message() {
                Some(msg) if msg.is_quit() => {
                    log::debug!(
                        "PlatformInterface: quit received, exit code {}",
                        msg.exit_code()
                    );
                    return Ok(msg.exit_code());
                }
                Some(msg) => self.native.dispatch_message(&msg),
                None => {
                    log::error!("PlatformInterface: message source failed before quit");
                    return Err(PlatformError::OperationFailed(
                        "message loop ended without a quit message".to_string(),
                    ));
                }
            }
        }
    }

    /// Asks the running loop to return `exit_code`.
    pub fn exit(&self, exit_code: i32) {
        self.native.post_quit(exit_code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_backend::HeadlessPlatform;
    use crate::message::{MK_LBUTTON, RawMessage, WM_LBUTTONDOWN, WM_PAINT};
    use crate::types::{MouseButton, Size};
    use std::cell::Cell;

    fn headless_app() -> (Rc<HeadlessPlatform>, PlatformInterface) {
        let headless = Rc::new(HeadlessPlatform::new());
        let app = PlatformInterface::from_native(headless.clone());
        (headless, app)
    }

    #[test]
    fn run_dispatches_until_exit_and_returns_the_code() {
        // Arrange
        let (headless, app) = headless_app();
        let main = app.create_main_window("main", 0, 0, 200, 100).expect("main");
        let clicks = Rc::new(Cell::new(0));
        let sink = Rc::clone(&clicks);
        main.set_mouse_down_handler(move |_, button| {
            if button == MouseButton::Left {
                sink.set(sink.get() + 1);
            }
        });
        headless.post(RawMessage::mouse(
            main.handle(),
            WM_LBUTTONDOWN,
            Point::new(5, 5),
            MK_LBUTTON,
        ));
        app.exit(3);
        // Act
        let code = app.run();
        // Assert
        assert_eq!(code, Ok(3));
        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn messages_after_quit_stay_queued() {
        let (headless, app) = headless_app();
        let main = app.create_main_window("main", 0, 0, 50, 50).expect("main");
        app.exit(0);
        headless.post(RawMessage::new(main.handle(), WM_PAINT, 0, 0));

        assert_eq!(app.run(), Ok(0));

        assert_eq!(headless.pending_messages().len(), 1);
    }

    #[test]
    fn drained_message_source_is_an_error() {
        let (_headless, app) = headless_app();

        let result = app.run();

        assert!(matches!(result, Err(PlatformError::OperationFailed(_))));
    }

    #[test]
    fn main_window_has_requested_size() {
        let (_headless, app) = headless_app();

        let main = app.create_main_window("main", 10, 10, 320, 240).expect("main");

        assert_eq!(main.size(), Size::new(320, 240));
    }
}
