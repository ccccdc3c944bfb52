//! Leaf widgets used by the portal sidebar.

pub mod avatar;
pub mod icon_button;
pub mod text;

pub use avatar::Avatar;
pub use icon_button::{IconButton, IconButtonClicked};
pub use text::Text;
