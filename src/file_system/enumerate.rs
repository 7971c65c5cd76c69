use std::iter::FusedIterator;

use crate::{
    error::DuError,
    file_system::{native::Search, path::CanonicalPath},
};

fn is_pseudo_entry(name: &str) -> bool {
    name == "." || name == ".."
}

/// The immediate children of one directory, yielded lazily as basenames.
/// A failure to advance is yielded once and ends the sequence.
pub struct Children {
    search: Search,
    scope: String,
}

impl Children {
    pub fn open(dir: &CanonicalPath) -> Result<Self, DuError> {
        let search = Search::open(dir.absolute(), None).map_err(|source| DuError::Enumeration {
            path: dir.display().into_owned(),
            source,
        })?;

        Ok(Self {
            search,
            scope: dir.display().into_owned(),
        })
    }

    // Searches the parent of `pattern` for its last component.
    pub fn matching(pattern: &CanonicalPath) -> Result<Self, DuError> {
        let dir = pattern.parent();
        let search = Search::open(dir.absolute(), Some(pattern.leaf_name())).map_err(|source| {
            DuError::Enumeration {
                path: pattern.display().into_owned(),
                source,
            }
        })?;

        Ok(Self {
            search,
            scope: pattern.display().into_owned(),
        })
    }
}

impl Iterator for Children {
    type Item = Result<String, DuError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let name = match self.search.next_name()? {
                Ok(name) => name,
                Err(source) => {
                    return Some(Err(DuError::EnumerationAdvance {
                        path: self.scope.clone(),
                        source,
                    }))
                }
            };

            match name.into_string() {
                Ok(name) if is_pseudo_entry(&name) => continue,
                Ok(name) => return Some(Ok(name)),
                Err(name) => {
                    return Some(Err(DuError::InvalidName {
                        path: self.scope.clone(),
                        name: name.to_string_lossy().into_owned(),
                    }))
                }
            }
        }
    }
}

impl FusedIterator for Children {}
