// Layout rendering: resume data + settings tree + template id in, a styled
// visual tree out. Pure functions throughout; the export pipeline and the
// preview both consume the same output.

pub mod dates;
pub mod resume;
pub mod style;
pub mod tree;

pub use resume::render;
pub use tree::LayoutTree;
