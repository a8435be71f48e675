use crate::model::{Orientation, PageDimensions, PageSize};

impl PageSize {
    /// Portrait width and height in points.
    pub fn points(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Tabloid => (792.0, 1224.0),
        }
    }
}

pub fn page_dimensions(size: PageSize, orientation: Orientation) -> PageDimensions {
    let (width, height) = size.points();
    match orientation {
        Orientation::Portrait => PageDimensions { width, height },
        Orientation::Landscape => PageDimensions {
            width: height,
            height: width,
        },
    }
}
