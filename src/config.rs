use crate::{bytes::units::SizeFormat, error::DuError, file_system::size::SizeMode};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Config {
    pub targets: Vec<String>,
    pub include_regular_files: bool,
    pub bytes_only: bool,
    pub summarize_only: bool,
    pub human_readable: bool,
    pub size_mode: SizeMode,
}

impl Config {
    pub fn validate(self) -> Result<Self, DuError> {
        if self.include_regular_files && self.summarize_only {
            return Err(DuError::ConflictingFlags);
        }
        Ok(self)
    }

    pub fn size_format(&self) -> SizeFormat {
        if self.human_readable {
            SizeFormat::HumanReadable
        } else if self.bytes_only {
            SizeFormat::Bytes
        } else {
            SizeFormat::Kibibytes
        }
    }
}
