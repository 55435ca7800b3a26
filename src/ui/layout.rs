use tui::layout::{Constraint, Layout, Rect, Size};
pub const HEADER_HEIGHT: u16 = 3;
pub const LOG_PANE_PERCENT: u16 = 30;

/// Pre-computed layout areas for the main draw loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    /// Tournament name on the left, refresh status on the right.
    pub header: [Rect; 2],
    pub main: Rect,
    /// Zero-sized unless the log pane is open.
    pub logs: Rect,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (header, body) = if full_screen {
            ([Rect::ZERO, Rect::ZERO], area)
        } else {
            let [header, body] =
                Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Fill(1)]).areas(area);
            (Self::split_header(header), body)
        };

        if !show_logs {
            return LayoutAreas { header, main: body, logs: Rect::ZERO };
        }

        let [main, logs] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Percentage(LOG_PANE_PERCENT),
        ])
        .areas(body);
        LayoutAreas { header, main, logs }
    }

    fn split_header(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sits_above_main() {
        let areas = LayoutAreas::new(Size::new(100, 40));
        assert_eq!(areas.header[0].height, HEADER_HEIGHT);
        assert_eq!(areas.main.y, HEADER_HEIGHT);
        assert_eq!(areas.main.height, 40 - HEADER_HEIGHT);
        assert_eq!(areas.logs, Rect::ZERO);
    }

    #[test]
    fn full_screen_drops_header_and_logs_split_main() {
        let mut areas = LayoutAreas::new(Size::new(100, 40));
        areas.update(Rect::new(0, 0, 100, 40), true, true);
        assert_eq!(areas.header, [Rect::ZERO, Rect::ZERO]);
        assert_eq!(areas.main.y, 0);
        assert_eq!(areas.main.height + areas.logs.height, 40);
        assert_eq!(areas.logs.height, 12);
    }
}
