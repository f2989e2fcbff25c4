/*
 * Dropdown menu built on `PopupController`: text items with an optional
 * toggled state, disabled items, and plain or captioned separators. Item rects
 * are computed from the popup's client rect; a plain separator is a zero-height
 * line, a captioned separator is a labelled band.
 */
use crate::controls::popup_handler::{
    PopupClickHandler, PopupController, PopupItem, PopupItemEvent, PopupItemKind, PopupWindow,
};
use crate::double_buffer::DoubleBuffer;
use crate::error::Result as PlatformResult;
use crate::native::{DrawingSurface, TextAlign, TextMeasure};
use crate::types::{Color, Point, Rect, Size};
use crate::window_common::{Window, WindowNode};

use std::cell::Cell;
use std::rc::Rc;

pub const MENU_BORDER_COLOR: Color = Color::rgb(210, 210, 210);
pub const CAPTIONED_SEPARATOR_HEIGHT: i32 = 22;
/// Extra width added to the widest caption.
const MENU_EXTRA_WIDTH: i32 = 40;
const TEXT_INDENT: i32 = 8;

const HOVER_BORDER: Color = Color::rgb(168, 210, 253);
const HOVER_FILL: Color = Color::rgb(237, 244, 252);
const TOGGLED_BORDER: Color = Color::rgb(100, 165, 230);
const TOGGLED_FILL: Color = Color::rgb(205, 230, 252);
const TEXT_COLOR: Color = Color::rgb(60, 60, 60);
const DISABLED_TEXT_COLOR: Color = Color::rgb(140, 140, 140);
const CAPTION_COLOR: Color = Color::rgb(80, 80, 80);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuMetrics {
    pub item_height: i32,
    /// Width of the icon/check column left of the captions.
    pub left_margin: i32,
}

impl MenuMetrics {
    pub const NORMAL: MenuMetrics = MenuMetrics {
        item_height: 24,
        left_margin: 26,
    };
    pub const LARGE: MenuMetrics = MenuMetrics {
        item_height: 48,
        left_margin: 52,
    };
}

/// Declarative description of one menu entry.
#[derive(Clone)]
pub struct MenuItemInfo {
    pub text: String,
    pub separator: bool,
    pub enabled: bool,
    pub toggled: bool,
    pub on_click: Option<PopupClickHandler>,
}

impl MenuItemInfo {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            separator: false,
            enabled: true,
            toggled: false,
            on_click: None,
        }
    }

    pub fn separator() -> Self {
        Self {
            separator: true,
            ..Self::new("")
        }
    }

    pub fn captioned_separator(caption: &str) -> Self {
        Self {
            separator: true,
            ..Self::new(caption)
        }
    }

    pub fn on_click(mut self, handler: impl Fn(&PopupItemEvent) + 'static) -> Self {
        self.on_click = Some(Rc::new(handler));
        self
    }

    pub fn toggled(mut self, toggled: bool) -> Self {
        self.toggled = toggled;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn into_item(self) -> PopupItem {
        let mut item = PopupItem::menu(&self.text);
        item.separator = self.separator;
        item.enabled = self.enabled;
        item.set_toggled(self.toggled);
        item.on_click = self.on_click;
        item
    }
}

pub fn measure_menu_content(
    measure: &dyn TextMeasure,
    items: &[PopupItem],
    metrics: MenuMetrics,
) -> Size {
    let widest = items
        .iter()
        .filter(|item| item.has_text())
        .map(|item| measure.measure_text(item.text()).width)
        .fold(1, i32::max);
    let height = items.iter().fold(1, |sum, item| {
        sum + match (item.separator, item.has_text()) {
            (true, true) => CAPTIONED_SEPARATOR_HEIGHT,
            (true, false) => 0,
            (false, _) => metrics.item_height,
        }
    });
    Size::new(widest + metrics.left_margin + MENU_EXTRA_WIDTH, height)
}

pub fn arrange_menu_items(items: &mut [PopupItem], rect: Rect, metrics: MenuMetrics) {
    let mut top = rect.top;
    for item in items.iter_mut() {
        if item.separator {
            if item.has_text() {
                item.rect = Rect::new(rect.left, top, rect.right, top + CAPTIONED_SEPARATOR_HEIGHT);
                top += CAPTIONED_SEPARATOR_HEIGHT;
            } else {
                item.rect = Rect::new(rect.left + metrics.left_margin + 1, top, rect.right, top);
            }
            continue;
        }
        item.rect = Rect::new(rect.left, top, rect.right, top + metrics.item_height);
        let caption = Rect {
            left: item.rect.left + metrics.left_margin + TEXT_INDENT,
            ..item.rect
        };
        if let PopupItemKind::Menu { text_rect, .. } = &mut item.kind {
            *text_rect = caption;
        }
        top += metrics.item_height;
    }
}

fn draw_menu_items(g: &mut dyn DrawingSurface, rect: Rect, items: &[PopupItem], metrics: MenuMetrics) {
    g.draw_line(
        rect.left + metrics.left_margin,
        rect.top + 4,
        rect.left + metrics.left_margin,
        rect.bottom - 4,
        MENU_BORDER_COLOR,
    );
    for item in items {
        let r = item.rect;
        if item.separator {
            if item.has_text() {
                g.fill_rectangle(r, Color::WHITE, Color::WHITE);
                g.draw_line(rect.left, rect.top, rect.left, rect.bottom, MENU_BORDER_COLOR);
                g.draw_line(rect.right - 1, rect.top, rect.right - 1, rect.bottom, MENU_BORDER_COLOR);
                g.draw_line(rect.left + 2, r.top, rect.right - 3, r.top, MENU_BORDER_COLOR);
                g.draw_line(rect.left + 2, r.bottom, rect.right - 3, r.bottom, MENU_BORDER_COLOR);
                let caption = Rect {
                    left: r.left + TEXT_INDENT,
                    ..r
                };
                g.draw_text(item.text(), caption, CAPTION_COLOR, TextAlign::Left);
            } else {
                g.draw_line(r.left + 2, r.top, r.right - 3, r.top, MENU_BORDER_COLOR);
            }
            continue;
        }
        if item.highlighted {
            let hover = Rect::new(r.left + 2, r.top + 2, r.right - 2, r.bottom - 1);
            g.fill_rectangle(hover, HOVER_BORDER, HOVER_FILL);
        }
        if item.is_toggled() {
            let check = Rect::new(r.left + 2, r.top + 2, r.left + metrics.left_margin - 2, r.bottom - 2);
            g.fill_rectangle(check, TOGGLED_BORDER, TOGGLED_FILL);
        }
        let text_rect = match &item.kind {
            PopupItemKind::Menu { text_rect, .. } => *text_rect,
            PopupItemKind::Size { .. } => r,
        };
        let color = if item.enabled {
            TEXT_COLOR
        } else {
            DISABLED_TEXT_COLOR
        };
        g.draw_text(item.text(), text_rect, color, TextAlign::Left);
    }
}

/// Paints the whole menu through a scoped double buffer.
pub fn paint_menu(
    target: &mut dyn DrawingSurface,
    client: &Rect,
    items: &[PopupItem],
    metrics: MenuMetrics,
) {
    let mut buffer = match DoubleBuffer::begin(target, *client, MENU_BORDER_COLOR, Color::WHITE) {
        Ok(buffer) => buffer,
        Err(e) => {
            log::warn!("PopupMenu: cannot allocate paint buffer: {e}");
            return;
        }
    };
    let local = Rect::from_origin_size(Point::default(), client.size());
    draw_menu_items(buffer.surface(), local, items, metrics);
    if let Err(e) = buffer.end() {
        log::warn!("PopupMenu: presenting paint buffer failed: {e}");
    }
}

pub struct PopupMenu {
    controller: PopupController,
    metrics: Rc<Cell<MenuMetrics>>,
}

impl PopupMenu {
    pub fn new(owner: &Rc<WindowNode>, items: Vec<MenuItemInfo>) -> PlatformResult<Self> {
        let controller = PopupController::new(owner)?;
        let metrics = Rc::new(Cell::new(MenuMetrics::NORMAL));

        let m = Rc::clone(&metrics);
        controller.set_measure_content_size(move |measure, items| {
            measure_menu_content(measure, items, m.get())
        });
        let m = Rc::clone(&metrics);
        controller.set_arrange_items(move |items, rect| arrange_menu_items(items, rect, m.get()));
        let m = Rc::clone(&metrics);
        controller.set_draw_items(move |surface, client, items| {
            paint_menu(surface, client, items, m.get())
        });

        let menu = Self {
            controller,
            metrics,
        };
        menu.add_items(items);
        Ok(menu)
    }

    pub fn add_items(&self, items: Vec<MenuItemInfo>) {
        for info in items {
            self.controller.add_item(info.into_item());
        }
        self.controller.window().invalidate();
    }

    /// Switches between 24 px and 48 px item rows.
    pub fn set_large_items(&self, large: bool) {
        self.metrics.set(if large {
            MenuMetrics::LARGE
        } else {
            MenuMetrics::NORMAL
        });
    }

    pub fn metrics(&self) -> MenuMetrics {
        self.metrics.get()
    }

    pub fn set_item_enabled(&self, index: usize, enabled: bool) -> bool {
        self.controller
            .update_item(index, |item| item.enabled = enabled)
            .is_some()
    }

    pub fn set_item_toggled(&self, index: usize, toggled: bool) -> bool {
        self.controller
            .update_item(index, |item| item.set_toggled(toggled))
            .is_some()
    }

    pub fn set_item_text(&self, index: usize, new_text: &str) -> bool {
        self.controller
            .update_item(index, |item| {
                if let PopupItemKind::Menu { text, .. } = &mut item.kind {
                    *text = new_text.to_string();
                }
            })
            .is_some()
    }
}

impl Window for PopupMenu {
    fn node(&self) -> &Rc<WindowNode> {
        self.controller.window()
    }
}

impl PopupWindow for PopupMenu {
    fn controller(&self) -> &PopupController {
        &self.controller
    }
}
