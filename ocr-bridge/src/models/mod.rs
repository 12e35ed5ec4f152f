mod analysis;
mod note_image;

pub use analysis::*;
pub use note_image::*;
