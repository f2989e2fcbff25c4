/*
 * Popup listing line thicknesses. Each row previews its size as a black bar
 * centered in the row; toggled and highlighted rows get a tinted frame.
 */
use crate::controls::popup_handler::{
    PopupClickHandler, PopupController, PopupItem, PopupItemEvent, PopupItemKind, PopupWindow,
};
use crate::controls::popup_menu_handler::MENU_BORDER_COLOR;
use crate::double_buffer::DoubleBuffer;
use crate::error::Result as PlatformResult;
use crate::native::DrawingSurface;
use crate::types::{Color, Rect, Size};
use crate::window_common::{Window, WindowNode};

use std::rc::Rc;

pub const SIZE_MENU_WIDTH: i32 = 130;
pub const SIZE_MENU_ITEM_HEIGHT: i32 = 40;
const LINE_INSET: i32 = 6;

#[derive(Clone, Default)]
pub struct SizeMenuItemInfo {
    /// Line thickness in pixels.
    pub size: i32,
    pub toggled: bool,
    pub on_click: Option<PopupClickHandler>,
}

impl SizeMenuItemInfo {
    pub fn new(size: i32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn toggled(mut self, toggled: bool) -> Self {
        self.toggled = toggled;
        self
    }

    pub fn on_click(mut self, handler: impl Fn(&PopupItemEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    fn into_item(self) -> PopupItem {
        let mut item = PopupItem::size(self.size);
        item.set_toggled(self.toggled);
        item.on_click = self.on_click;
        item
    }
}

pub fn measure_size_menu(items: &[PopupItem]) -> Size {
    Size::new(SIZE_MENU_WIDTH, SIZE_MENU_ITEM_HEIGHT * items.len() as i32)
}

pub fn arrange_size_items(items: &mut [PopupItem], rect: Rect) {
    let mut top = rect.top;
    for item in items.iter_mut() {
        item.rect = Rect::new(rect.left, top, rect.right, top + SIZE_MENU_ITEM_HEIGHT);
        top += SIZE_MENU_ITEM_HEIGHT;
    }
}

/// Preview bar for a thickness, vertically centered in `row`.
pub fn line_rect(row: Rect, size: i32) -> Rect {
    let mut top = row.center_y();
    if size > 1 {
        top -= size / 2;
    }
    Rect::new(row.left + LINE_INSET, top, row.right - LINE_INSET, top + size)
}

fn frame_colors(highlighted: bool, toggled: bool) -> Option<(Color, Color)> {
    match (highlighted, toggled) {
        (true, true) => Some((Color::rgb(125, 179, 234), Color::rgb(219, 235, 252))),
        (true, false) => Some((Color::rgb(168, 210, 253), Color::rgb(237, 244, 252))),
        (false, true) => Some((Color::rgb(100, 165, 230), Color::rgb(206, 229, 252))),
        (false, false) => None,
    }
}

fn draw_size_items(g: &mut dyn DrawingSurface, items: &[PopupItem]) {
    for item in items {
        let PopupItemKind::Size { size, toggled } = item.kind else {
            continue;
        };
        let r = item.rect;
        if let Some((border, fill)) = frame_colors(item.highlighted, toggled) {
            let hover = Rect::new(r.left + 2, r.top + 2, r.right - 2, r.bottom - 1);
            g.fill_rectangle(hover, border, fill);
        }
        g.fill_rectangle(line_rect(r, size), Color::BLACK, Color::BLACK);
    }
}

pub fn paint_size_menu(target: &mut dyn DrawingSurface, client: &Rect, items: &[PopupItem]) {
    let mut buffer = match DoubleBuffer::begin(target, *client, MENU_BORDER_COLOR, Color::WHITE) {
        Ok(buffer) => buffer,
        Err(e) => {
            log::warn!("SizeMenu: cannot allocate paint buffer: {e}");
            return;
        }
    };
    draw_size_items(buffer.surface(), items);
    if let Err(e) = buffer.end() {
        log::warn!("SizeMenu: presenting paint buffer failed: {e}");
    }
}

pub struct SizeMenu {
    controller: PopupController,
}

impl SizeMenu {
    pub fn new(owner: &Rc<WindowNode>, items: Vec<SizeMenuItemInfo>) -> PlatformResult<Self> {
        let controller = PopupController::new(owner)?;
        controller.set_measure_content_size(|_, items| measure_size_menu(items));
        controller.set_arrange_items(arrange_size_items);
        controller.set_draw_items(paint_size_menu);
        let menu = Self { controller };
        menu.add_items(items);
        Ok(menu)
    }

    pub fn add_items(&self, items: Vec<SizeMenuItemInfo>) {
        for info in items {
            self.controller.add_item(info.into_item());
        }
        self.controller.window().invalidate();
    }

    pub fn set_item_toggled(&self, index: usize, toggled: bool) -> bool {
        self.controller
            .update_item(index, |item| item.set_toggled(toggled))
            .is_some()
    }

    pub fn item_size(&self, index: usize) -> Option<i32> {
        match self.controller.items().get(index)?.kind {
            PopupItemKind::Size { size, .. } => Some(size),
            PopupItemKind::Menu { .. } => None,
        }
    }
}

impl Window for SizeMenu {
    fn node(&self) -> &Rc<WindowNode> {
        self.controller.window()
    }
}

impl PopupWindow for SizeMenu {
    fn controller(&self) -> &PopupController {
        &self.controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::popup_handler::tests::fixture;
    use crate::headless_backend::PixelSurface;
    use crate::message::{RawMessage, WM_LBUTTONUP};
    use crate::types::Point;
    use std::cell::Cell;

    #[test]
    fn measurement_is_fixed_width_and_forty_pixels_per_item() {
        let items = vec![PopupItem::size(1), PopupItem::size(3), PopupItem::size(8)];

        assert_eq!(measure_size_menu(&items), Size::new(130, 120));
    }

    #[test]
    fn thick_lines_are_centered_on_the_row() {
        // Arrange
        let row = Rect::new(0, 40, 130, 80);
        // Act
        let thin = line_rect(row, 1);
        let thick = line_rect(row, 8);
        // Assert
        assert_eq!(thin, Rect::new(6, 60, 124, 61));
        assert_eq!(thick, Rect::new(6, 56, 124, 64));
    }

    #[test]
    fn paint_draws_toggled_frame_and_black_bar() {
        // Arrange
        let mut items = vec![PopupItem::size(4), PopupItem::size(2)];
        items[0].set_toggled(true);
        let client = Rect::new(0, 0, 130, 80);
        arrange_size_items(&mut items, client);
        let mut target = PixelSurface::new(client.size(), Color::BLACK);
        // Act
        paint_size_menu(&mut target, &client, &items);
        // Assert
        assert_eq!(target.pixel(2, 2), Some(Color::rgb(100, 165, 230)));
        assert_eq!(target.pixel(4, 4), Some(Color::rgb(206, 229, 252)));
        assert_eq!(target.pixel(60, 19), Some(Color::BLACK));
        assert_eq!(target.pixel(60, 45), Some(Color::WHITE));
        assert_eq!(target.pixel(60, 59), Some(Color::BLACK));
    }

    #[test]
    fn clicking_a_size_reports_its_index() {
        // Arrange
        let fx = fixture();
        let chosen = Rc::new(Cell::new(0));
        let items = [1, 3, 5]
            .into_iter()
            .map(|size| {
                let chosen = Rc::clone(&chosen);
                SizeMenuItemInfo::new(size).on_click(move |_| chosen.set(size))
            })
            .collect();
        let menu = SizeMenu::new(&fx.owner, items).expect("size menu");
        fx.headless.post(RawMessage::mouse(
            fx.owner.handle(),
            WM_LBUTTONUP,
            Point::new(40 + 60, 90 + 50),
            0,
        ));
        // Act
        let result = menu.popup(50, 100).expect("popup");
        // Assert
        assert_eq!(result, Some(1));
        assert_eq!(chosen.get(), 3);
        assert_eq!(menu.item_size(1), Some(3));
        assert_eq!(menu.size(), Size::new(132, 122));
    }
}
