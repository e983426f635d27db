use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) trait EnumExt: Enum {
    /// Iterate over all variants in declaration order
    fn iter() -> impl Iterator<Item = Self>;
}

impl<T: Enum> EnumExt for T {
    fn iter() -> impl Iterator<Item = T> {
        (0..T::LENGTH).map(T::from_usize)
    }
}

/// Return a rectangle of the given size centered within `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}
