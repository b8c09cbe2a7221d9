//! Widget implementations for the reporter dialog

mod button;
mod label;
mod text_area;

pub use button::Button;
pub use label::Label;
pub use text_area::TextArea;
