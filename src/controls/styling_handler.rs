/*
 * Conversions between the portable `Color` and Win32 `COLORREF` values, shared
 * by the GDI drawing surface and the windowing backend.
 */

use crate::types::Color;
use windows::Win32::Foundation::COLORREF;

/*
 * Creates a Win32 COLORREF from the platform-agnostic `Color` struct.
 * Win32 expects colors in BGR format, so this function handles the conversion.
 */
pub(crate) fn color_to_colorref(color: &Color) -> COLORREF {
    COLORREF((color.r as u32) | ((color.g as u32) << 8) | ((color.b as u32) << 16))
}

/*
 * Converts a Win32 COLORREF (BGR) back to platform-agnostic Color (RGB).
 * Used for the system window background.
 */
pub(crate) fn colorref_to_color(cr: COLORREF) -> Color {
    Color::rgb(
        (cr.0 & 0xFF) as u8,
        ((cr.0 >> 8) & 0xFF) as u8,
        ((cr.0 >> 16) & 0xFF) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorref_is_stored_as_bgr() {
        // Arrange
        let menu_hover = Color::rgb(168, 210, 253);
        // Act
        let cr = color_to_colorref(&menu_hover);
        // Assert
        assert_eq!(cr.0, 0x00FD_D2A8);
        assert_eq!(colorref_to_color(cr), menu_hover);
    }
}
