pub mod enumerate;
pub mod entry_type;
pub mod native;
pub mod path;
pub mod size;
