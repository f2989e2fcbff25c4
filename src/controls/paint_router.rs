use log::debug;

/// How a paint request for one window is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintRoute {
    /// Subclassed system control; its own window procedure paints.
    Native,
    /// The window's paint handler draws the client area.
    Custom,
    /// No handler: the dirty region is filled with the default background.
    DefaultFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseRoute {
    Native,
    /// Report the background as erased; the paint handler covers every pixel.
    Suppress,
}

pub fn resolve_paint_route(subclassed: bool, has_paint_handler: bool) -> PaintRoute {
    match (subclassed, has_paint_handler) {
        (true, true) => {
            debug!("[Paint] paint handler on a subclassed control ignored; native proc paints");
            PaintRoute::Native
        }
        (true, false) => PaintRoute::Native,
        (false, true) => PaintRoute::Custom,
        (false, false) => PaintRoute::DefaultFill,
    }
}

pub fn resolve_erase_route(subclassed: bool, has_paint_handler: bool) -> EraseRoute {
    if !subclassed && has_paint_handler {
        EraseRoute::Suppress
    } else {
        EraseRoute::Native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_window_with_handler_paints_itself_and_suppresses_erase() {
        assert_eq!(resolve_paint_route(false, true), PaintRoute::Custom);
        assert_eq!(resolve_erase_route(false, true), EraseRoute::Suppress);
    }

    #[test]
    fn custom_window_without_handler_fills_default_background() {
        assert_eq!(resolve_paint_route(false, false), PaintRoute::DefaultFill);
        assert_eq!(resolve_erase_route(false, false), EraseRoute::Native);
    }

    #[test]
    fn subclassed_control_always_uses_native_painting() {
        assert_eq!(resolve_paint_route(true, true), PaintRoute::Native);
        assert_eq!(resolve_erase_route(true, true), EraseRoute::Native);
    }
}
