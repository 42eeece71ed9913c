pub mod hull;
pub mod polygon;
pub mod r2;
pub mod rect;

pub use hull::Hull;
pub use polygon::Polygon;
pub use r2::R2;
pub use rect::Rect;
