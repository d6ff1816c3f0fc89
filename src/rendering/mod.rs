mod annotate;
mod png;
mod shape_renderer;

pub use annotate::{draw_bboxes, NumberLabeler, BBOX_COLOR, BBOX_THICKNESS};
pub use png::encode_png;
pub use shape_renderer::{ShapeRenderer, SvgShapeRenderer};
