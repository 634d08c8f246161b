//! Per-frame registry of where each identified element was drawn.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::test_id::TestId;

/// Screen rectangles of the elements drawn in the last frame, in draw order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMap {
    entries: Vec<(TestId, Rect)>,
}

impl ElementMap {
    /// Forgets every element. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records that `id` was drawn at `area`. Zero-sized areas are ignored, so clipped
    /// elements count as not rendered.
    pub fn register(&mut self, id: TestId, area: Rect) {
        if area.is_empty() {
            return;
        }
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.push((id, area));
    }

    /// Returns where `id` was drawn, if it was.
    pub fn get(&self, id: TestId) -> Option<Rect> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, area)| *area)
    }

    pub fn contains(&self, id: TestId) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over the recorded elements in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &(TestId, Rect)> {
        self.entries.iter()
    }
}

/// Reads the text drawn inside `area`, one trimmed line per row, empty rows dropped.
pub fn text_in(buffer: &Buffer, area: Rect) -> String {
    let area = area.intersection(buffer.area);
    let mut lines = Vec::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let line = line.trim().to_string();
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use ratatui::text::Line;
    use ratatui::widgets::Widget;

    use super::*;

    #[test]
    fn register_and_get() {
        let mut map = ElementMap::default();
        let area = Rect::new(1, 2, 10, 1);
        map.register(TestId::BtnSubmit, area);
        assert_eq!(map.get(TestId::BtnSubmit), Some(area));
        assert!(!map.contains(TestId::BtnReset));
    }

    #[test]
    fn empty_area_is_not_registered() {
        let mut map = ElementMap::default();
        map.register(TestId::Table, Rect::new(0, 0, 0, 5));
        assert!(!map.contains(TestId::Table));
    }

    #[test]
    fn re_register_replaces_area() {
        let mut map = ElementMap::default();
        map.register(TestId::Modal, Rect::new(0, 0, 5, 5));
        map.register(TestId::Modal, Rect::new(1, 1, 2, 2));
        assert_eq!(map.get(TestId::Modal), Some(Rect::new(1, 1, 2, 2)));
        assert_eq!(map.iter().count(), 1);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut map = ElementMap::default();
        map.register(TestId::Form, Rect::new(0, 0, 3, 3));
        map.clear();
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn text_in_reads_trimmed_rows() {
        let mut buffer = Buffer::empty(Rect::new(0, 0, 20, 3));
        Line::from("  hello  ").render(Rect::new(0, 0, 20, 1), &mut buffer);
        Line::from("world").render(Rect::new(0, 2, 20, 1), &mut buffer);
        assert_eq!(text_in(&buffer, buffer.area), "hello\nworld");
    }
}
