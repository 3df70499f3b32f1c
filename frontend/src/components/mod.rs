// Reusable components live here.

pub mod header;
pub mod loading_spinner;
pub mod modal_frame;
pub mod tag_input;
pub mod toast;
