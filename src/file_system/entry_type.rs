use crate::{error::DuError, file_system::native, file_system::path::CanonicalPath};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryType {
    Dir,
    File,
}

impl EntryType {
    pub fn of(path: &CanonicalPath) -> Result<Self, DuError> {
        native::entry_type(path.absolute()).map_err(|source| DuError::Attributes {
            path: path.display().into_owned(),
            source,
        })
    }
}
