pub mod hit;
pub mod paint;

pub use hit::{Hit, hit_test, over_terminal};
pub use paint::{PaintTheme, paint_circuit};
