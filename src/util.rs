use ratatui::layout::{Flex, Layout, Rect, Size};

/// Return a rectangle of the given size in the center of `buffer_area`,
/// shrunk to fit if `buffer_area` is too small
pub(crate) fn get_display_area(buffer_area: Rect, size: Size) -> Rect {
    let [display] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(display);
    display
}
