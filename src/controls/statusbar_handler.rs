/*
 * Sectioned status bar. Each section is a fixed-width text slot followed by a
 * separator line; a hidden section keeps its slot but draws no text, so the
 * sections after it do not move. Painting is double-buffered.
 */
use crate::double_buffer::DoubleBuffer;
use crate::error::Result as PlatformResult;
use crate::native::{DrawingSurface, TextAlign};
use crate::types::{Color, Point, Rect, WindowConfig, WindowStyle};
use crate::window_common::{Window, WindowNode};

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub const STATUSBAR_BACKGROUND: Color = Color::rgb(240, 240, 240);
pub const STATUSBAR_LINE_COLOR: Color = Color::rgb(215, 215, 215);
pub const STATUS_SECTION_WIDTH: i32 = 140;
/// Gap before the first section and after every separator.
pub const STATUS_SECTION_GAP: i32 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSection {
    pub text: String,
    pub visible: bool,
}

type Sections = Rc<RefCell<Vec<StatusSection>>>;

pub fn paint_statusbar(target: &mut dyn DrawingSurface, client: &Rect, sections: &[StatusSection]) {
    let mut buffer = match DoubleBuffer::begin(
        target,
        *client,
        STATUSBAR_BACKGROUND,
        STATUSBAR_BACKGROUND,
    ) {
        Ok(buffer) => buffer,
        Err(e) => {
            log::warn!("Statusbar: cannot allocate paint buffer: {e}");
            return;
        }
    };
    let local = Rect::from_origin_size(Point::default(), client.size());
    let surface = buffer.surface();
    surface.draw_line(local.left, local.top, local.right, local.top, STATUSBAR_LINE_COLOR);

    let mut left = STATUS_SECTION_GAP;
    for section in sections {
        if section.visible && !section.text.is_empty() {
            let text_rect = Rect::new(
                left,
                local.top - 1,
                left + STATUS_SECTION_WIDTH,
                local.bottom - 1,
            );
            surface.draw_text(&section.text, text_rect, Color::BLACK, TextAlign::Left);
        }
        left += STATUS_SECTION_WIDTH;
        surface.draw_line(left, local.top + 3, left, local.bottom - 3, STATUSBAR_LINE_COLOR);
        left += STATUS_SECTION_GAP;
    }

    if let Err(e) = buffer.end() {
        log::warn!("Statusbar: presenting paint buffer failed: {e}");
    }
}

pub struct Statusbar {
    node: Rc<WindowNode>,
    sections: Sections,
}

impl Statusbar {
    /// Creates an empty bar; callers normally dock it at the bottom and give it a height.
    pub fn new(parent: &Rc<WindowNode>) -> PlatformResult<Self> {
        let config = WindowConfig::new("", WindowStyle::child(), 10, 10, 10, 10);
        let node = WindowNode::create(parent.native_ref(), &config, Some(parent))?;
        let sections: Sections = Rc::new(RefCell::new(Vec::new()));
        let painted = Rc::clone(&sections);
        node.set_paint_handler(move |surface, client| {
            paint_statusbar(surface, client, &painted.borrow());
        });
        log::debug!("Statusbar: created {:?}", node.handle());
        Ok(Self { node, sections })
    }

    /// Appends a visible section; it shows up on the next paint.
    pub fn add_status(&self, text: &str) -> Status {
        let index = {
            let mut sections = self.sections.borrow_mut();
            sections.push(StatusSection {
                text: text.to_string(),
                visible: true,
            });
            sections.len() - 1
        };
        Status {
            bar: Rc::downgrade(&self.node),
            sections: Rc::clone(&self.sections),
            index,
        }
    }

    pub fn sections(&self) -> Vec<StatusSection> {
        self.sections.borrow().clone()
    }
}

impl Window for Statusbar {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

/// Handle to one section of a `Statusbar`. Changes repaint the bar right away.
#[derive(Clone)]
pub struct Status {
    bar: Weak<WindowNode>,
    sections: Sections,
    index: usize,
}

impl Status {
    pub fn text(&self) -> String {
        self.sections.borrow()[self.index].text.clone()
    }

    pub fn is_visible(&self) -> bool {
        self.sections.borrow()[self.index].visible
    }

    pub fn update(&self, text: &str) {
        self.sections.borrow_mut()[self.index].text = text.to_string();
        self.repaint_bar();
    }

    pub fn set_visible(&self, visible: bool) {
        self.sections.borrow_mut()[self.index].visible = visible;
        self.repaint_bar();
    }

    fn repaint_bar(&self) {
        match self.bar.upgrade() {
            Some(bar) if !bar.is_disposed() => bar.repaint(),
            _ => log::trace!("Statusbar: section {} changed after the bar went away", self.index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_backend::{HeadlessPlatform, PixelSurface};
    use crate::native::NativeRef;
    use crate::types::{DockType, Size};

    fn status_bar() -> (Rc<HeadlessPlatform>, Statusbar) {
        let headless = Rc::new(HeadlessPlatform::new());
        let native: NativeRef = headless.clone();
        let main = WindowNode::create(
            &native,
            &WindowConfig::new("main", WindowStyle::top_level(), 0, 0, 400, 300),
            None,
        )
        .expect("main");
        let bar = Statusbar::new(&main).expect("statusbar");
        bar.set_dock_type(DockType::Bottom);
        bar.set_size(0, 27);
        (headless, bar)
    }

    fn snapshot(headless: &HeadlessPlatform, bar: &Statusbar) -> PixelSurface {
        headless.surface_snapshot(bar.handle()).expect("painted surface")
    }

    #[test]
    fn sections_are_laid_out_in_fixed_slots() {
        // Arrange
        let (headless, bar) = status_bar();
        // Act
        bar.add_status("12, 40px");
        bar.add_status("800 x 600px");
        bar.repaint();
        // Assert
        assert_eq!(bar.size(), Size::new(400, 27));
        let surface = snapshot(&headless, &bar);
        let texts = surface.texts();
        let first = texts.iter().rfind(|t| t.text == "12, 40px").expect("first");
        let second = texts.iter().rfind(|t| t.text == "800 x 600px").expect("second");
        assert_eq!(first.rect, Rect::new(8, -1, 148, 26));
        assert_eq!(second.rect, Rect::new(156, -1, 296, 26));
        assert_eq!(first.color, Color::BLACK);
        assert_eq!(surface.pixel(200, 0), Some(STATUSBAR_LINE_COLOR));
        assert_eq!(surface.pixel(148, 10), Some(STATUSBAR_LINE_COLOR));
        assert_eq!(surface.pixel(148, 2), Some(STATUSBAR_BACKGROUND));
        assert_eq!(surface.pixel(100, 10), Some(STATUSBAR_BACKGROUND));
    }

    #[test]
    fn update_repaints_with_the_new_text() {
        // Arrange
        let (headless, bar) = status_bar();
        let position = bar.add_status("0, 0px");
        // Act
        position.update("31, 7px");
        // Assert
        assert_eq!(position.text(), "31, 7px");
        let surface = snapshot(&headless, &bar);
        let last = surface.texts().last().expect("drawn text");
        assert_eq!(last.text, "31, 7px");
        assert_eq!(last.rect.left, STATUS_SECTION_GAP);
    }

    #[test]
    fn hidden_section_keeps_its_slot_but_draws_no_text() {
        let (headless, bar) = status_bar();
        let selection = bar.add_status("10 x 10px");
        bar.add_status("0.2KB");
        bar.repaint();
        let before = snapshot(&headless, &bar).texts().len();

        selection.set_visible(false);

        let surface = snapshot(&headless, &bar);
        let drawn: Vec<&str> = surface.texts()[before..].iter().map(|t| t.text.as_str()).collect();
        assert_eq!(drawn, vec!["0.2KB"]);
        let size = surface.texts().last().expect("drawn text");
        assert_eq!(size.rect.left, 156);
        assert!(!selection.is_visible());
        assert_eq!(surface.pixel(148, 10), Some(STATUSBAR_LINE_COLOR));
    }

    #[test]
    fn section_outliving_its_bar_is_ignored() {
        let (_headless, bar) = status_bar();
        let status = bar.add_status("ready");

        bar.dispose();
        status.update("gone");

        assert_eq!(status.text(), "gone");
        assert_eq!(bar.sections()[0].text, "gone");
    }
}
