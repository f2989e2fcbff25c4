/*
 * Win32 implementation of `NativeWindowing`. Every window the toolkit creates
 * runs through one of two window procedures:
 *
 * - `toolkit_wnd_proc` for windows of the toolkit's own class (custom-painted
 *   windows, containers, popups);
 * - `subclass_wnd_proc` for native controls (buttons, static text, edits),
 *   which are subclassed right after creation. Their previous window procedure
 *   is stored in `GWLP_USERDATA` and called for everything the toolkit does not
 *   consume.
 *
 * Both procedures hand messages to the dispatcher, which resolves the target
 * `WindowNode` (adopting the node under construction on the very first
 * message) and routes the typed event. Paint messages are handled here because
 * they need a device context for the duration of the handler.
 */
use crate::controls::paint_router::PaintRoute;
use crate::controls::styling_handler::colorref_to_color;
use crate::dispatcher;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::gdi_surface::{GdiSurface, font_object, rect_from_native, rect_to_native};
use crate::message::{EventResponse, NativeEvent, RawMessage};
use crate::native::NativeWindowing;
use crate::types::{
    Color, FontDescription, FontHandle, NativeHandle, Point, Rect, ShowMode, Size, WindowClass,
    WindowConfig, WindowKind, WindowStyle,
};

use std::ffi::c_void;

use windows::{
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, POINT, RECT, SIZE, WPARAM},
        Graphics::Gdi::{
            BeginPaint, CLIP_DEFAULT_PRECIS, COLOR_WINDOW, CreateFontW, DEFAULT_CHARSET,
            DEFAULT_GUI_FONT, DEFAULT_QUALITY, DeleteObject, EndPaint, FF_DONTCARE, FW_NORMAL,
            GetDC, GetDeviceCaps, GetStockObject, GetSysColor, GetTextExtentPoint32W, HBRUSH,
            InvalidateRect, LOGPIXELSY, MapWindowPoints, OUT_DEFAULT_PRECIS, PAINTSTRUCT,
            ReleaseDC, SelectObject, UpdateWindow,
        },
        System::LibraryLoader::GetModuleHandleW,
        System::WindowsProgramming::MulDiv,
        UI::Input::KeyboardAndMouse::{
            EnableWindow, GetActiveWindow, GetCapture, ReleaseCapture, SetCapture, TME_LEAVE, TRACKMOUSEEVENT,
            TrackMouseEvent,
        },
        UI::WindowsAndMessaging::*,
    },
    core::{HSTRING, PCWSTR},
};

fn to_hwnd(handle: NativeHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

fn to_handle(hwnd: HWND) -> NativeHandle {
    NativeHandle(hwnd.0 as isize)
}

fn optional_handle(hwnd: HWND) -> Option<NativeHandle> {
    if hwnd.is_invalid() {
        None
    } else {
        Some(to_handle(hwnd))
    }
}

fn native_style(style: &WindowStyle, class: WindowClass) -> (WINDOW_EX_STYLE, WINDOW_STYLE) {
    let mut ws = match style.kind {
        WindowKind::TopLevel => WS_OVERLAPPEDWINDOW,
        WindowKind::Child => WS_CHILD,
        WindowKind::Popup => WS_POPUP | WS_BORDER,
        WindowKind::Dialog => WS_CAPTION | WS_SYSMENU,
    };
    if style.visible {
        ws |= WS_VISIBLE;
    }
    if style.clip_children {
        ws |= WS_CLIPCHILDREN;
    }
    if style.tab_stop {
        ws |= WS_TABSTOP;
    }
    ws |= match class {
        WindowClass::Button => WINDOW_STYLE(BS_PUSHBUTTON as u32),
        WindowClass::GroupBox => WINDOW_STYLE(BS_GROUPBOX as u32),
        WindowClass::Edit => WINDOW_STYLE(ES_AUTOHSCROLL as u32),
        WindowClass::Custom | WindowClass::Static => WINDOW_STYLE(0),
    };

    let mut ex = WINDOW_EX_STYLE(0);
    if style.topmost {
        ex |= WS_EX_TOPMOST;
    }
    if style.no_activate {
        ex |= WS_EX_NOACTIVATE | WS_EX_TOOLWINDOW;
    }
    if style.client_edge {
        ex |= WS_EX_CLIENTEDGE;
    }
    (ex, ws)
}

fn response_to_result(response: EventResponse) -> Option<LRESULT> {
    match response {
        EventResponse::Default => None,
        EventResponse::Handled => Some(LRESULT(0)),
        EventResponse::Value(value) => Some(LRESULT(value)),
    }
}

/*
 * Paints a toolkit window. Subclassed controls keep their native painting; for
 * everything else a surface over the `BeginPaint` DC is handed to the node,
 * which either runs its paint handler or fills the system background.
 */
fn handle_paint(hwnd: HWND, handle: NativeHandle) -> Option<LRESULT> {
    if dispatcher::paint_route(handle) == PaintRoute::Native {
        return None;
    }
    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);
        if hdc.is_invalid() {
            log::warn!("[Paint] BeginPaint failed for {handle:?}");
            return Some(LRESULT(0));
        }
        let mut client = RECT::default();
        if let Err(e) = GetClientRect(hwnd, &mut client) {
            log::warn!("[Paint] GetClientRect failed for {handle:?}: {e:?}");
        }
        let mut surface = GdiSurface::borrowed(hdc, rect_from_native(&client).size());
        dispatcher::dispatch_event(
            handle,
            NativeEvent::Paint {
                surface: &mut surface,
                dirty: rect_from_native(&ps.rcPaint),
            },
        );
        drop(surface);
        _ = EndPaint(hwnd, &ps);
    }
    Some(LRESULT(0))
}

/*
 * Routes one message to the dispatcher. `None` means the message was not
 * consumed and the caller runs its default processing.
 */
fn route_message(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> Option<LRESULT> {
    let handle = to_handle(hwnd);
    match msg {
        WM_PAINT => handle_paint(hwnd, handle),
        WM_WINDOWPOSCHANGED => {
            if lparam.0 != 0 {
                let pos = unsafe { &*(lparam.0 as *const WINDOWPOS) };
                let bounds = Rect::new(pos.x, pos.y, pos.x + pos.cx, pos.y + pos.cy);
                dispatcher::dispatch_event(handle, NativeEvent::PositionChanged(bounds));
            }
            // Default processing generates WM_SIZE and WM_MOVE.
            None
        }
        WM_NCDESTROY => {
            // Native children die with their parent; the handle may be reused.
            let raw = RawMessage::new(handle, msg, wparam.0, lparam.0);
            let response = dispatcher::dispatch_message(&raw);
            dispatcher::unregister(handle);
            response_to_result(response)
        }
        _ => {
            let raw = RawMessage::new(handle, msg, wparam.0, lparam.0);
            response_to_result(dispatcher::dispatch_message(&raw))
        }
    }
}

unsafe extern "system" fn toolkit_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match route_message(hwnd, msg, wparam, lparam) {
        Some(result) => result,
        None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

unsafe extern "system" fn subclass_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if let Some(result) = route_message(hwnd, msg, wparam, lparam) {
        return result;
    }
    unsafe {
        let prev = GetWindowLongPtrW(hwnd, GWLP_USERDATA);
        if prev != 0 {
            let prev_proc: WNDPROC = std::mem::transmute(prev);
            CallWindowProcW(prev_proc, hwnd, msg, wparam, lparam)
        } else {
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
    }
}

/// Installs the toolkit procedure on a native control. The original procedure
/// is saved in `GWLP_USERDATA` before the switch.
fn subclass_control(hwnd: HWND) {
    unsafe {
        let original = GetWindowLongPtrW(hwnd, GWLP_WNDPROC);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, original);
        #[allow(clippy::fn_to_numeric_cast)]
        SetWindowLongPtrW(hwnd, GWLP_WNDPROC, subclass_wnd_proc as isize);
    }
}

fn register_window_class(h_instance: HINSTANCE, class_name: &HSTRING) -> PlatformResult<()> {
    let class_name_pcwstr = PCWSTR(class_name.as_ptr());
    unsafe {
        let mut wc_test = WNDCLASSEXW::default();
        if GetClassInfoExW(Some(h_instance), class_name_pcwstr, &mut wc_test).is_ok() {
            log::debug!("Platform: Window class '{class_name}' already registered.");
            return Ok(());
        }

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC,
            lpfnWndProc: Some(toolkit_wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: h_instance,
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: class_name_pcwstr,
            hIconSm: LoadIconW(None, IDI_APPLICATION)?,
        };

        if RegisterClassExW(&wc) == 0 {
            let error = GetLastError();
            log::error!("Platform: RegisterClassExW failed: {error:?}");
            Err(PlatformError::InitializationFailed(format!(
                "RegisterClassExW failed: {error:?}"
            )))
        } else {
            log::debug!("Platform: Window class '{class_name}' registered successfully.");
            Ok(())
        }
    }
}

/*
 * Creates the GUI font scaled for the screen DPI. When the requested face
 * cannot be created the stock GUI font is used instead; the returned flag tells
 * whether the caller owns (and must delete) the font.
 */
fn create_gui_font(description: &FontDescription) -> (FontHandle, bool) {
    let face_name = HSTRING::from(description.face_name.as_str());
    unsafe {
        let screen_dc = GetDC(None);
        let dpi = if screen_dc.is_invalid() {
            96
        } else {
            let dpi = GetDeviceCaps(Some(screen_dc), LOGPIXELSY);
            ReleaseDC(None, screen_dc);
            dpi
        };
        let height = -MulDiv(description.point_size, dpi, description.reference_dpi.max(1));
        let h_font = CreateFontW(
            height,
            0,
            0,
            0,
            FW_NORMAL.0 as i32,
            0,
            0,
            0,
            DEFAULT_CHARSET,
            OUT_DEFAULT_PRECIS,
            CLIP_DEFAULT_PRECIS,
            DEFAULT_QUALITY,
            FF_DONTCARE.0 as u32,
            &face_name,
        );
        if h_font.is_invalid() {
            log::error!(
                "Platform: Failed to create GUI font '{}' of size {}, using the stock GUI font",
                description.face_name,
                description.point_size
            );
            let stock = GetStockObject(DEFAULT_GUI_FONT);
            (FontHandle(stock.0 as isize), false)
        } else {
            log::debug!(
                "Platform: Created GUI font '{}' {}pt (height {height} at {dpi} dpi)",
                description.face_name,
                description.point_size
            );
            (FontHandle(h_font.0 as isize), true)
        }
    }
}

pub struct Win32Platform {
    h_instance: HINSTANCE,
    class_name: HSTRING,
    gui_font: FontHandle,
    owns_font: bool,
}

impl Win32Platform {
    /*
     * Registers the toolkit window class (named after the application) and
     * creates the default GUI font. Fails when the class cannot be registered.
     */
    pub fn new(app_name: &str, font: &FontDescription) -> PlatformResult<Self> {
        let h_instance: HINSTANCE = unsafe { GetModuleHandleW(None) }
            .map_err(|e| {
                PlatformError::InitializationFailed(format!("GetModuleHandleW failed: {e}"))
            })?
            .into();
        let class_name = HSTRING::from(format!("{app_name}_PlatformWindowClass"));
        register_window_class(h_instance, &class_name)?;
        let (gui_font, owns_font) = create_gui_font(font);
        Ok(Self {
            h_instance,
            class_name,
            gui_font,
            owns_font,
        })
    }
}

impl Drop for Win32Platform {
    fn drop(&mut self) {
        if self.owns_font {
            unsafe {
                let _ = DeleteObject(font_object(self.gui_font));
            }
        }
    }
}

impl NativeWindowing for Win32Platform {
    fn create_window(
        &self,
        config: &WindowConfig,
        parent: Option<NativeHandle>,
    ) -> PlatformResult<NativeHandle> {
        let class_name = match config.class {
            WindowClass::Custom => self.class_name.clone(),
            WindowClass::Button | WindowClass::GroupBox => HSTRING::from("BUTTON"),
            WindowClass::Static => HSTRING::from("STATIC"),
            WindowClass::Edit => HSTRING::from("EDIT"),
        };
        let (ex_style, style) = native_style(&config.style, config.class);
        let hwnd = unsafe {
            CreateWindowExW(
                ex_style,
                &class_name,
                &HSTRING::from(config.text.as_str()),
                style,
                config.x,
                config.y,
                config.width,
                config.height,
                parent.map(to_hwnd),
                None,
                Some(self.h_instance),
                None,
            )
        }
        .map_err(|e| {
            log::error!("Platform: CreateWindowExW failed for '{}': {e:?}", config.text);
            PlatformError::WindowCreationFailed(format!("'{}': {e}", config.text))
        })?;

        if config.class != WindowClass::Custom {
            subclass_control(hwnd);
        }
        Ok(to_handle(hwnd))
    }

    fn destroy_window(&self, handle: NativeHandle) {
        if let Err(e) = unsafe { DestroyWindow(to_hwnd(handle)) } {
            log::warn!("Platform: DestroyWindow failed for {handle:?}: {e:?}");
        }
    }

    fn client_rect(&self, handle: NativeHandle) -> Rect {
        let mut rc = RECT::default();
        if let Err(e) = unsafe { GetClientRect(to_hwnd(handle), &mut rc) } {
            log::warn!("Platform: GetClientRect failed for {handle:?}: {e:?}");
        }
        rect_from_native(&rc)
    }

    fn window_rect(&self, handle: NativeHandle) -> Rect {
        let mut rc = RECT::default();
        if let Err(e) = unsafe { GetWindowRect(to_hwnd(handle), &mut rc) } {
            log::warn!("Platform: GetWindowRect failed for {handle:?}: {e:?}");
        }
        rect_from_native(&rc)
    }

    fn move_window(&self, handle: NativeHandle, bounds: Rect, repaint: bool) {
        unsafe {
            _ = MoveWindow(
                to_hwnd(handle),
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
                repaint,
            );
        }
    }

    fn set_position(&self, handle: NativeHandle, pos: Point) {
        unsafe {
            _ = SetWindowPos(
                to_hwnd(handle),
                None,
                pos.x,
                pos.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    fn set_size(&self, handle: NativeHandle, size: Size) {
        unsafe {
            _ = SetWindowPos(
                to_hwnd(handle),
                None,
                0,
                0,
                size.width,
                size.height,
                SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
            );
        }
    }

    /*
     * Moves all children in one deferred transaction so the parent repaints
     * once. Falls back to individual moves when the transaction cannot start.
     */
    fn apply_layout(&self, moves: &[(NativeHandle, Rect)]) {
        if moves.is_empty() {
            return;
        }
        unsafe {
            let mut hdwp = match BeginDeferWindowPos(moves.len() as i32) {
                Ok(hdwp) if !hdwp.is_invalid() => hdwp,
                _ => {
                    log::warn!("Layout: BeginDeferWindowPos failed, falling back to MoveWindow");
                    for (handle, rect) in moves {
                        self.move_window(*handle, *rect, true);
                    }
                    return;
                }
            };
            for (handle, rect) in moves {
                match DeferWindowPos(
                    hdwp,
                    to_hwnd(*handle),
                    None,
                    rect.left,
                    rect.top,
                    rect.width(),
                    rect.height(),
                    SWP_NOZORDER | SWP_NOACTIVATE | SWP_SHOWWINDOW,
                ) {
                    Ok(next) if !next.is_invalid() => hdwp = next,
                    _ => {
                        // The batch is gone once DeferWindowPos fails.
                        log::warn!("Layout: DeferWindowPos failed for {handle:?}");
                        for (handle, rect) in moves {
                            self.move_window(*handle, *rect, true);
                        }
                        return;
                    }
                }
            }
            _ = EndDeferWindowPos(hdwp);
        }
    }

    fn show(&self, handle: NativeHandle, mode: ShowMode) {
        let cmd = match mode {
            ShowMode::Show => SW_SHOW,
            ShowMode::ShowNoActivate => SW_SHOWNOACTIVATE,
            ShowMode::Hide => SW_HIDE,
        };
        unsafe {
            _ = ShowWindow(to_hwnd(handle), cmd);
        }
    }

    fn enable_window(&self, handle: NativeHandle, enable: bool) {
        // The return value is the previous state, not an error indicator.
        let was_disabled = unsafe { EnableWindow(to_hwnd(handle), enable) }.as_bool();
        log::trace!("Platform: {handle:?} enabled={enable} (was disabled: {was_disabled})");
    }

    fn invalidate(&self, handle: NativeHandle, rect: Option<Rect>, erase: bool) {
        let native_rect = rect.map(rect_to_native);
        unsafe {
            _ = InvalidateRect(
                Some(to_hwnd(handle)),
                native_rect.as_ref().map(|r| r as *const RECT),
                erase,
            );
        }
    }

    fn update(&self, handle: NativeHandle) {
        unsafe {
            _ = UpdateWindow(to_hwnd(handle));
        }
    }

    fn set_text(&self, handle: NativeHandle, text: &str) {
        if let Err(e) = unsafe { SetWindowTextW(to_hwnd(handle), &HSTRING::from(text)) } {
            log::warn!("Platform: SetWindowTextW failed for {handle:?}: {e:?}");
        }
    }

    fn text(&self, handle: NativeHandle) -> String {
        let hwnd = to_hwnd(handle);
        unsafe {
            let len = GetWindowTextLengthW(hwnd);
            if len <= 0 {
                return String::new();
            }
            let mut buffer = vec![0u16; len as usize + 1];
            let copied = GetWindowTextW(hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    fn set_font(&self, handle: NativeHandle, font: FontHandle) {
        unsafe {
            SendMessageW(
                to_hwnd(handle),
                WM_SETFONT,
                Some(WPARAM(font.0 as usize)),
                Some(LPARAM(1)),
            );
        }
    }

    fn default_font(&self) -> FontHandle {
        self.gui_font
    }

    fn default_background(&self) -> Color {
        colorref_to_color(windows::Win32::Foundation::COLORREF(unsafe {
            GetSysColor(COLOR_WINDOW)
        }))
    }

    fn measure_text(&self, handle: NativeHandle, font: FontHandle, text: &str) -> Size {
        let hwnd = to_hwnd(handle);
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut extent = SIZE::default();
        unsafe {
            let hdc = GetDC(Some(hwnd));
            if hdc.is_invalid() {
                log::warn!("Platform: GetDC failed while measuring text for {handle:?}");
                return Size::default();
            }
            let previous = SelectObject(hdc, font_object(font));
            let _ = GetTextExtentPoint32W(hdc, &wide, &mut extent);
            SelectObject(hdc, previous);
            ReleaseDC(Some(hwnd), hdc);
        }
        Size::new(extent.cx, extent.cy)
    }

    fn set_capture(&self, handle: NativeHandle) {
        unsafe {
            SetCapture(to_hwnd(handle));
        }
    }

    fn release_capture(&self) {
        if let Err(e) = unsafe { ReleaseCapture() } {
            log::debug!("Platform: ReleaseCapture failed: {e:?}");
        }
    }

    fn capture(&self) -> Option<NativeHandle> {
        optional_handle(unsafe { GetCapture() })
    }

    fn active_window(&self) -> Option<NativeHandle> {
        optional_handle(unsafe { GetActiveWindow() })
    }

    fn is_child(&self, parent: NativeHandle, child: NativeHandle) -> bool {
        unsafe { IsChild(to_hwnd(parent), to_hwnd(child)).as_bool() }
    }

    fn cursor_pos(&self) -> Point {
        let mut pt = POINT::default();
        if let Err(e) = unsafe { GetCursorPos(&mut pt) } {
            log::warn!("Platform: GetCursorPos failed: {e:?}");
        }
        Point::new(pt.x, pt.y)
    }

    fn map_point(&self, from: Option<NativeHandle>, to: Option<NativeHandle>, pt: Point) -> Point {
        let mut points = [POINT { x: pt.x, y: pt.y }];
        unsafe {
            MapWindowPoints(from.map(to_hwnd), to.map(to_hwnd), &mut points);
        }
        Point::new(points[0].x, points[0].y)
    }

    fn track_mouse_leave(&self, handle: NativeHandle) {
        let mut tme = TRACKMOUSEEVENT {
            cbSize: std::mem::size_of::<TRACKMOUSEEVENT>() as u32,
            dwFlags: TME_LEAVE,
            hwndTrack: to_hwnd(handle),
            dwHoverTime: 0,
        };
        if let Err(e) = unsafe { TrackMouseEvent(&mut tme) } {
            log::warn!("Platform: TrackMouseEvent failed for {handle:?}: {e:?}");
        }
    }

    fn next_message(&self) -> Option<RawMessage> {
        let mut msg = MSG::default();
        let result = unsafe { GetMessageW(&mut msg, None, 0, 0) };
        match result.0 {
            -1 => {
                log::error!("Platform: GetMessageW failed: {:?}", unsafe { GetLastError() });
                None
            }
            0 => Some(RawMessage::quit(msg.wParam.0 as i32)),
            _ => Some(RawMessage {
                target: to_handle(msg.hwnd),
                id: msg.message,
                wparam: msg.wParam.0,
                lparam: msg.lParam.0,
                time: msg.time,
                screen_pt: Point::new(msg.pt.x, msg.pt.y),
            }),
        }
    }

    fn dispatch_message(&self, msg: &RawMessage) {
        if msg.is_quit() {
            return;
        }
        let native = MSG {
            hwnd: to_hwnd(msg.target),
            message: msg.id,
            wParam: WPARAM(msg.wparam),
            lParam: LPARAM(msg.lparam),
            time: msg.time,
            pt: POINT {
                x: msg.screen_pt.x,
                y: msg.screen_pt.y,
            },
            ..Default::default()
        };
        unsafe {
            _ = TranslateMessage(&native);
            DispatchMessageW(&native);
        }
    }

    fn post_quit(&self, exit_code: i32) {
        unsafe { PostQuitMessage(exit_code) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_style_never_activates() {
        // Arrange
        let style = WindowStyle::popup();
        // Act
        let (ex, ws) = native_style(&style, WindowClass::Custom);
        // Assert
        assert!(ws.contains(WS_POPUP));
        assert!(!ws.contains(WS_VISIBLE));
        assert!(ex.contains(WS_EX_TOPMOST));
        assert!(ex.contains(WS_EX_NOACTIVATE));
    }

    #[test]
    fn group_box_gets_the_group_button_style() {
        let (_, ws) = native_style(&WindowStyle::child(), WindowClass::GroupBox);

        assert!(ws.contains(WS_CHILD));
        assert!(ws.contains(WINDOW_STYLE(BS_GROUPBOX as u32)));
    }

    #[test]
    fn dialog_frame_has_a_caption_but_no_resize_border() {
        let (_, ws) = native_style(&WindowStyle::dialog(), WindowClass::Custom);

        assert!(ws.contains(WS_CAPTION));
        assert!(ws.contains(WS_SYSMENU));
        assert!(!ws.contains(WS_THICKFRAME));
        assert!(!ws.contains(WS_CHILD));
    }

    #[test]
    fn handled_events_return_zero_and_values_pass_through() {
        assert_eq!(response_to_result(EventResponse::Default), None);
        assert_eq!(response_to_result(EventResponse::Handled), Some(LRESULT(0)));
        assert_eq!(response_to_result(EventResponse::Value(3)), Some(LRESULT(3)));
    }
}
