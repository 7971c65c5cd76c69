use crate::{error::DuError, file_system::native, file_system::path::CanonicalPath};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SizeMode {
    #[default]
    Apparent,
    Allocated,
}

pub fn combine_size(high: u32, low: u32) -> u64 {
    u64::from(high) * (u64::from(u32::MAX) + 1) + u64::from(low)
}

pub fn size_of(path: &CanonicalPath, mode: SizeMode) -> Result<u64, DuError> {
    let size = match mode {
        SizeMode::Apparent => native::apparent_size(path.absolute()),
        SizeMode::Allocated => native::allocated_size(path.absolute()),
    };
    size.map_err(|source| DuError::Metadata {
        path: path.display().into_owned(),
        source,
    })
}
