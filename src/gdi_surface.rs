/*
 * `DrawingSurface` over a GDI device context. A surface either borrows the DC
 * handed out by `BeginPaint` (the window owns it) or owns a memory DC with a
 * compatible bitmap selected into it, created through `create_compatible`.
 * Owned resources are released when the surface is dropped.
 */
use crate::controls::styling_handler::color_to_colorref;
use crate::error::{PlatformError, Result as PlatformResult};
use crate::native::{DrawingSurface, TextAlign};
use crate::types::{Color, FontHandle, Point, Rect, Size};

use std::any::Any;
use std::ffi::c_void;

use windows::Win32::Foundation::{RECT, SIZE};
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, CreateSolidBrush, DT_CENTER, DT_LEFT,
    DT_NOPREFIX, DT_SINGLELINE, DT_VCENTER, DeleteDC, DeleteObject, DrawTextW, FillRect,
    GetTextExtentPoint32W, HBITMAP, HDC, HGDIOBJ, SRCCOPY, SelectObject, SetBkMode, SetTextColor,
    TRANSPARENT,
};

pub(crate) fn rect_to_native(rect: Rect) -> RECT {
    RECT {
        left: rect.left,
        top: rect.top,
        right: rect.right,
        bottom: rect.bottom,
    }
}

pub(crate) fn rect_from_native(rect: &RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

pub(crate) fn font_object(font: FontHandle) -> HGDIOBJ {
    HGDIOBJ(font.0 as *mut c_void)
}

struct OwnedBitmap {
    bitmap: HBITMAP,
    previous: HGDIOBJ,
}

pub(crate) struct GdiSurface {
    hdc: HDC,
    size: Size,
    font: FontHandle,
    owned: Option<OwnedBitmap>,
}

impl GdiSurface {
    /// Wraps a DC the caller keeps ownership of (typically from `BeginPaint`).
    pub(crate) fn borrowed(hdc: HDC, size: Size) -> Self {
        Self {
            hdc,
            size,
            font: FontHandle::default(),
            owned: None,
        }
    }

    fn offscreen(compatible_with: HDC, size: Size, font: FontHandle) -> PlatformResult<Self> {
        unsafe {
            let hdc = CreateCompatibleDC(Some(compatible_with));
            if hdc.is_invalid() {
                return Err(PlatformError::OperationFailed(
                    "CreateCompatibleDC failed".to_string(),
                ));
            }
            let bitmap = CreateCompatibleBitmap(compatible_with, size.width.max(1), size.height.max(1));
            if bitmap.is_invalid() {
                let _ = DeleteDC(hdc);
                return Err(PlatformError::OperationFailed(format!(
                    "CreateCompatibleBitmap failed for {}x{}",
                    size.width, size.height
                )));
            }
            let previous = SelectObject(hdc, bitmap.into());
            let mut surface = Self {
                hdc,
                size,
                font: FontHandle::default(),
                owned: Some(OwnedBitmap { bitmap, previous }),
            };
            if font != FontHandle::default() {
                surface.select_font(font);
            }
            Ok(surface)
        }
    }
}

impl Drop for GdiSurface {
    fn drop(&mut self) {
        if let Some(owned) = self.owned.take() {
            unsafe {
                SelectObject(self.hdc, owned.previous);
                let _ = DeleteObject(owned.bitmap.into());
                let _ = DeleteDC(self.hdc);
            }
        }
    }
}

impl DrawingSurface for GdiSurface {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn size(&self) -> Size {
        self.size
    }

    fn create_compatible(&self, size: Size) -> PlatformResult<Box<dyn DrawingSurface>> {
        Ok(Box::new(GdiSurface::offscreen(self.hdc, size, self.font)?))
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        unsafe {
            let brush = CreateSolidBrush(color_to_colorref(&color));
            FillRect(self.hdc, &rect_to_native(rect), brush);
            let _ = DeleteObject(brush.into());
        }
    }

    fn blit(&mut self, source: &dyn DrawingSurface, dest: Point, size: Size) -> PlatformResult<()> {
        let source = source
            .as_any()
            .downcast_ref::<GdiSurface>()
            .ok_or_else(|| {
                PlatformError::OperationFailed("blit source is not a GDI surface".to_string())
            })?;
        unsafe {
            BitBlt(
                self.hdc,
                dest.x,
                dest.y,
                size.width,
                size.height,
                Some(source.hdc),
                0,
                0,
                SRCCOPY,
            )?;
        }
        Ok(())
    }

    fn select_font(&mut self, font: FontHandle) {
        self.font = font;
        unsafe {
            SelectObject(self.hdc, font_object(font));
        }
    }

    fn measure_text(&self, text: &str) -> Size {
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut sz = SIZE::default();
        let _ = unsafe { GetTextExtentPoint32W(self.hdc, &wide, &mut sz) };
        Size::new(sz.cx, sz.cy)
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, align: TextAlign) {
        let mut wide: Vec<u16> = text.encode_utf16().collect();
        let mut rc = rect_to_native(rect);
        let horizontal = match align {
            TextAlign::Left => DT_LEFT,
            TextAlign::Center => DT_CENTER,
        };
        unsafe {
            SetBkMode(self.hdc, TRANSPARENT);
            SetTextColor(self.hdc, color_to_colorref(&color));
            DrawTextW(
                self.hdc,
                &mut wide,
                &mut rc,
                horizontal | DT_VCENTER | DT_SINGLELINE | DT_NOPREFIX,
            );
        }
    }
}
