/*
 * Offscreen rendering helpers.
 *
 * `DoubleBuffer` is the scoped form: `begin` allocates an offscreen surface the
 * size of the paint rect and pre-fills it (one pixel border plus fill), the
 * caller draws into `surface()` in rect-local coordinates, and the result is
 * copied onto the target at the rect's origin when the buffer is ended or
 * dropped. Dropping covers early returns and unwinding, so the offscreen
 * resource is released on every exit path. `end` consumes the buffer, so the
 * surface cannot be touched afterwards.
 *
 * `BackBuffer` is the persistent form for canvas-like owners that keep their
 * drawing across frames and blit it on every paint.
 */
use crate::error::Result as PlatformResult;
use crate::native::DrawingSurface;
use crate::types::{Color, Point, Rect, Size};

pub struct DoubleBuffer<'t> {
    target: &'t mut dyn DrawingSurface,
    rect: Rect,
    offscreen: Box<dyn DrawingSurface>,
    presented: bool,
}

impl<'t> DoubleBuffer<'t> {
    pub fn begin(
        target: &'t mut dyn DrawingSurface,
        rect: Rect,
        border: Color,
        fill: Color,
    ) -> PlatformResult<Self> {
        let mut offscreen = target.create_compatible(rect.size())?;
        offscreen.fill_rectangle(Rect::from_origin_size(Point::default(), rect.size()), border, fill);
        Ok(Self {
            target,
            rect,
            offscreen,
            presented: false,
        })
    }

    /// Offscreen drawing surface; (0, 0) is the top-left corner of the paint rect.
    pub fn surface(&mut self) -> &mut dyn DrawingSurface {
        self.offscreen.as_mut()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Copies the offscreen surface onto the target and releases it.
    pub fn end(mut self) -> PlatformResult<()> {
        self.present()
    }

    fn present(&mut self) -> PlatformResult<()> {
        if self.presented {
            return Ok(());
        }
        self.presented = true;
        self.target
            .blit(self.offscreen.as_ref(), self.rect.origin(), self.rect.size())
    }
}

impl Drop for DoubleBuffer<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.present() {
            log::warn!("DoubleBuffer: blit at {:?} failed: {e}", self.rect);
        }
    }
}

/// Offscreen surface that survives across paints; recreated only on resize.
pub struct BackBuffer {
    surface: Option<Box<dyn DrawingSurface>>,
    background: Color,
}

impl BackBuffer {
    pub fn new(background: Color) -> Self {
        Self {
            surface: None,
            background,
        }
    }

    pub fn size(&self) -> Size {
        self.surface.as_ref().map(|s| s.size()).unwrap_or_default()
    }

    /*
     * Makes sure the buffer matches `size`, creating it from `compatible_with`
     * when missing or differently sized. Returns true when the contents were
     * recreated (and cleared to the background), so the owner must redraw.
     */
    pub fn ensure_size(
        &mut self,
        compatible_with: &dyn DrawingSurface,
        size: Size,
    ) -> PlatformResult<bool> {
        if self.surface.is_some() && self.size() == size {
            return Ok(false);
        }
        let mut surface = compatible_with.create_compatible(size)?;
        surface.fill_rect(Rect::from_origin_size(Point::default(), size), self.background);
        log::debug!("BackBuffer: (re)created at {}x{}", size.width, size.height);
        self.surface = Some(surface);
        Ok(true)
    }

    pub fn surface(&mut self) -> Option<&mut dyn DrawingSurface> {
        match self.surface.as_mut() {
            Some(surface) => Some(surface.as_mut()),
            None => None,
        }
    }

    pub fn present(&self, target: &mut dyn DrawingSurface, dest: Point) -> PlatformResult<()> {
        match &self.surface {
            Some(surface) => target.blit(surface.as_ref(), dest, surface.size()),
            None => Ok(()),
        }
    }

    pub fn release(&mut self) {
        self.surface = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_backend::PixelSurface;

    const RED: Color = Color::rgb(200, 0, 0);
    const GREY: Color = Color::rgb(90, 90, 90);

    #[test]
    fn ended_buffer_reproduces_its_drawing_at_the_rect_origin_only() {
        // Arrange
        let mut target = PixelSurface::new(Size::new(40, 30), Color::BLACK);
        let rect = Rect::new(10, 5, 30, 20);
        // Act
        {
            let mut buffer =
                DoubleBuffer::begin(&mut target, rect, RED, RED).expect("begin");
            buffer.surface().fill_rect(Rect::new(0, 0, 20, 15), RED);
            buffer.end().expect("end");
        }
        // Assert
        for y in 0..30 {
            for x in 0..40 {
                let expected = if rect.contains(Point::new(x, y)) {
                    RED
                } else {
                    Color::BLACK
                };
                assert_eq!(target.pixel(x, y), Some(expected), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn begin_prefills_border_and_fill_colors() {
        let mut target = PixelSurface::new(Size::new(10, 10), Color::BLACK);

        let buffer = DoubleBuffer::begin(&mut target, Rect::new(0, 0, 10, 10), GREY, Color::WHITE)
            .expect("begin");
        drop(buffer);

        assert_eq!(target.pixel(0, 0), Some(GREY));
        assert_eq!(target.pixel(9, 5), Some(GREY));
        assert_eq!(target.pixel(5, 5), Some(Color::WHITE));
    }

    fn paint_with_early_return(target: &mut PixelSurface, bail: bool) -> PlatformResult<()> {
        let mut buffer = DoubleBuffer::begin(target, Rect::new(2, 2, 6, 6), RED, RED)?;
        if bail {
            return Ok(());
        }
        buffer.surface().fill_rect(Rect::new(0, 0, 4, 4), GREY);
        buffer.end()
    }

    #[test]
    fn dropping_without_end_still_presents() {
        let mut target = PixelSurface::new(Size::new(8, 8), Color::BLACK);

        paint_with_early_return(&mut target, true).expect("paint");

        assert_eq!(target.pixel(3, 3), Some(RED));
        assert_eq!(target.pixel(7, 7), Some(Color::BLACK));
    }

    #[test]
    fn back_buffer_keeps_drawing_until_resized() {
        // Arrange
        let mut target = PixelSurface::new(Size::new(20, 20), Color::BLACK);
        let mut back = BackBuffer::new(Color::WHITE);
        assert!(back.ensure_size(&target, Size::new(10, 10)).expect("create"));
        if let Some(surface) = back.surface() {
            surface.fill_rect(Rect::new(0, 0, 5, 5), RED);
        }
        // Act
        let recreated_same = back.ensure_size(&target, Size::new(10, 10)).expect("same");
        back.present(&mut target, Point::new(4, 4)).expect("present");
        let recreated_bigger = back.ensure_size(&target, Size::new(12, 12)).expect("resize");
        // Assert
        assert!(!recreated_same);
        assert_eq!(target.pixel(4, 4), Some(RED));
        assert_eq!(target.pixel(12, 12), Some(Color::WHITE));
        assert!(recreated_bigger);
        assert_eq!(back.size(), Size::new(12, 12));
    }
}
