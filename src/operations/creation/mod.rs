mod make_face;
mod make_loop;

pub use make_face::MakeFace;
pub use make_loop::MakeLoop;
