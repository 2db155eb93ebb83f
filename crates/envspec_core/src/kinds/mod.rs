//! Concrete variable kinds.

pub mod boolean;
pub mod file;
pub mod numeric;
pub mod set;
pub mod text;

pub use boolean::Boolean;
pub use file::File;
pub use numeric::{Number, Numeric};
pub use set::Set;
pub use text::Text;
