/*
 * Pure layout calculation for the children of one window. Nothing here calls a
 * native API: the caller collects each child's dock type, margins and current
 * outer size, and applies the returned rectangles through the windowing
 * service. Nested windows are laid out when their own size changes, so the
 * recursion across the tree is driven by resize notifications.
 */
use crate::types::{DockType, FlowDirection, Margins, Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutItem {
    pub dock: DockType,
    pub margins: Margins,
    /// Current outer size of the child.
    pub size: Size,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPass {
    /// One entry per item, in input order. `None` for undocked items.
    pub rects: Vec<Option<Rect>>,
    /// Content rect left after all edge-docked children claimed their strips.
    pub remaining: Rect,
    /// Index of the last `Fill` child, the one assigned last.
    pub fill_winner: Option<usize>,
}

/*
 * Dock-peeling pass. Children are visited in insertion order; each edge-docked
 * child takes a strip from the current remaining rect and shrinks it. Margins
 * inset the child inside its strip and also separate it from the next strip.
 * A `Fill` child gets the remaining rect as it stands when the child is
 * visited, minus its own margins, and consumes nothing. With several `Fill`
 * children the last one is assigned last and reported as `fill_winner`.
 */
pub fn calculate_layout(content: Rect, items: &[LayoutItem]) -> LayoutPass {
    let mut remaining = content;
    let mut rects = vec![None; items.len()];
    let mut fill_winner = None;

    for (index, item) in items.iter().enumerate() {
        let m = item.margins;
        match item.dock {
            DockType::Top => {
                let top = remaining.top + m.top;
                let rect = Rect::new(
                    remaining.left + m.left,
                    top,
                    remaining.right - m.right,
                    top + item.size.height,
                );
                remaining.top = rect.bottom + m.bottom;
                rects[index] = Some(rect);
            }
            DockType::Bottom => {
                let bottom = remaining.bottom - m.bottom;
                let rect = Rect::new(
                    remaining.left + m.left,
                    bottom - item.size.height,
                    remaining.right - m.right,
                    bottom,
                );
                remaining.bottom = rect.top - m.top;
                rects[index] = Some(rect);
            }
            DockType::Left => {
                let left = remaining.left + m.left;
                let rect = Rect::new(
                    left,
                    remaining.top + m.top,
                    left + item.size.width,
                    remaining.bottom - m.bottom,
                );
                remaining.left = rect.right + m.right;
                rects[index] = Some(rect);
            }
            DockType::Right => {
                let right = remaining.right - m.right;
                let rect = Rect::new(
                    right - item.size.width,
                    remaining.top + m.top,
                    right,
                    remaining.bottom - m.bottom,
                );
                remaining.right = rect.left - m.left;
                rects[index] = Some(rect);
            }
            DockType::Fill => {
                rects[index] = Some(Rect::new(
                    remaining.left + m.left,
                    remaining.top + m.top,
                    remaining.right - m.right,
                    remaining.bottom - m.bottom,
                ));
                fill_winner = Some(index);
            }
            DockType::None => {}
        }
    }

    LayoutPass {
        rects,
        remaining,
        fill_winner,
    }
}

/*
 * Flow pass over the undocked children, placed inside `area`. Each child
 * advances the cursor by its leading margin, width and trailing margin. A row wraps
 * when the next child would cross the far edge of the area and the row already
 * holds something; the next row starts below the tallest child (margins
 * included) of the previous one. Right-to-left mirrors this against the right
 * edge, with the right margin leading. Returns the top-left position (in the same coordinates as `area`) for
 * each undocked item, `None` for docked ones.
 */
pub fn calculate_flow_layout(
    direction: FlowDirection,
    area: Rect,
    items: &[LayoutItem],
) -> Vec<Option<Point>> {
    let mut positions = vec![None; items.len()];
    if direction == FlowDirection::None {
        return positions;
    }

    let width = area.width();
    let mut x = 0;
    let mut y = 0;
    let mut row_height = 0;
    let mut row_used = false;

    for (index, item) in items.iter().enumerate() {
        if item.dock != DockType::None {
            continue;
        }
        let m = item.margins;
        let size = item.size;
        let (leading, trailing) = match direction {
            FlowDirection::RightToLeft => (m.right, m.left),
            _ => (m.left, m.right),
        };
        if row_used && x + leading + size.width > width {
            x = 0;
            y += row_height;
            row_height = 0;
        }
        let offset = x + leading;
        let left = match direction {
            FlowDirection::RightToLeft => area.right - offset - size.width,
            _ => area.left + offset,
        };
        positions[index] = Some(Point::new(left, area.top + y + m.top));
        x = offset + size.width + trailing;
        row_height = row_height.max(m.top + size.height + m.bottom);
        row_used = true;
    }
    positions
}
