/*
 * Plain child window that arranges its undocked children in rows. Docked
 * children are peeled off first; the flow pass then places the rest inside
 * what remains, wrapping when a row is full.
 */
use crate::error::Result as PlatformResult;
use crate::types::{FlowDirection, Rect, WindowConfig, WindowStyle};
use crate::window_common::{Window, WindowNode};

use std::rc::Rc;

/// Windows whose undocked children follow a flow direction.
pub trait FlowContainer: Window {
    fn flow_direction(&self) -> FlowDirection {
        self.node().flow_direction()
    }

    fn set_flow_direction(&self, direction: FlowDirection) {
        self.node().set_flow_direction(direction);
    }
}

pub struct Container {
    node: Rc<WindowNode>,
}

impl Container {
    pub fn new(
        parent: &Rc<WindowNode>,
        direction: FlowDirection,
        bounds: Rect,
    ) -> PlatformResult<Self> {
        let config = WindowConfig::new(
            "",
            WindowStyle::child(),
            bounds.left,
            bounds.top,
            bounds.width(),
            bounds.height(),
        );
        let node = WindowNode::create(parent.native_ref(), &config, Some(parent))?;
        node.set_flow_direction(direction);
        log::debug!("Container: {:?} created with {direction:?} flow", node.handle());
        Ok(Self { node })
    }
}

impl Window for Container {
    fn node(&self) -> &Rc<WindowNode> {
        &self.node
    }
}

impl FlowContainer for Container {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless_backend::HeadlessPlatform;
    use crate::native::NativeRef;
    use crate::types::{DockType, Margins, Point, Size};

    fn main_window() -> (Rc<HeadlessPlatform>, Rc<WindowNode>) {
        let headless = Rc::new(HeadlessPlatform::new());
        let native: NativeRef = headless.clone();
        let main = WindowNode::create(
            &native,
            &WindowConfig::new("main", WindowStyle::top_level(), 0, 0, 400, 300),
            None,
        )
        .expect("main");
        (headless, main)
    }

    fn tile(parent: &Container, width: i32, height: i32) -> Rc<WindowNode> {
        let config = WindowConfig::new("tile", WindowStyle::child(), 0, 0, width, height);
        WindowNode::create(parent.node().native_ref(), &config, Some(parent.node())).expect("tile")
    }

    fn origin_in_parent(node: &Rc<WindowNode>) -> Point {
        let parent = node.parent().expect("parent");
        let screen = node.window_rect().origin();
        let base = parent.window_rect().origin();
        Point::new(screen.x - base.x, screen.y - base.y)
    }

    #[test]
    fn left_to_right_container_wraps_its_children() {
        // Arrange
        let (_headless, main) = main_window();
        let row = Container::new(&main, FlowDirection::LeftToRight, Rect::new(0, 0, 100, 100))
            .expect("container");
        // Act
        let a = tile(&row, 40, 20);
        let b = tile(&row, 40, 25);
        let c = tile(&row, 40, 20);
        // Assert
        assert_eq!(origin_in_parent(&a), Point::new(0, 0));
        assert_eq!(origin_in_parent(&b), Point::new(40, 0));
        assert_eq!(origin_in_parent(&c), Point::new(0, 25));
    }

    #[test]
    fn resizing_a_docked_container_reflows_its_children() {
        // Arrange
        let (_headless, main) = main_window();
        let row = Container::new(&main, FlowDirection::RightToLeft, Rect::new(0, 0, 100, 40))
            .expect("container");
        let a = tile(&row, 30, 20);
        a.set_margins(Margins::new(0, 5, 0, 0));
        // Act
        row.set_dock_type(DockType::Top);
        // Assert
        assert_eq!(row.size(), Size::new(400, 40));
        assert_eq!(origin_in_parent(&a), Point::new(400 - 5 - 30, 0));
    }

    #[test]
    fn changing_the_direction_relays_out_immediately() {
        let (_headless, main) = main_window();
        let row = Container::new(&main, FlowDirection::LeftToRight, Rect::new(0, 0, 100, 40))
            .expect("container");
        let a = tile(&row, 30, 20);

        row.set_flow_direction(FlowDirection::RightToLeft);

        assert_eq!(row.flow_direction(), FlowDirection::RightToLeft);
        assert_eq!(origin_in_parent(&a), Point::new(70, 0));
    }
}
