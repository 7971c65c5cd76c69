use std::{
    ffi::OsString,
    fs::{self, ReadDir},
    io,
};

use globset::{GlobBuilder, GlobMatcher};

use crate::file_system::entry_type::EntryType;

// Links are classified without following them, so a link to a directory
// counts as a leaf and cannot send the walk around a cycle.
pub fn entry_type(absolute: &str) -> io::Result<EntryType> {
    let metadata = fs::symlink_metadata(absolute)?;
    if metadata.is_dir() {
        Ok(EntryType::Dir)
    } else {
        Ok(EntryType::File)
    }
}

pub fn apparent_size(absolute: &str) -> io::Result<u64> {
    fs::symlink_metadata(absolute).map(|m| m.len())
}

pub fn allocated_size(absolute: &str) -> io::Result<u64> {
    let metadata = fs::symlink_metadata(absolute)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        Ok(metadata.blocks() * 512)
    }
    #[cfg(not(unix))]
    {
        Ok(metadata.len())
    }
}

pub struct Search {
    entries: ReadDir,
    matcher: Option<GlobMatcher>,
    pending: Option<io::Result<OsString>>,
    finished: bool,
}

impl Search {
    // A pattern that matches nothing fails to open, as `FindFirstFileW` does.
    pub fn open(dir: &str, pattern: Option<&str>) -> io::Result<Self> {
        let matcher = match pattern {
            Some(pattern) => Some(compile_pattern(pattern)?),
            None => None,
        };

        let mut search = Self {
            entries: fs::read_dir(dir)?,
            matcher,
            pending: None,
            finished: false,
        };

        if search.matcher.is_some() {
            match search.next_name() {
                Some(first) => search.pending = Some(first),
                None => {
                    return Err(io::Error::new(
                        io::ErrorKind::NotFound,
                        "no entries match the pattern",
                    ))
                }
            }
        }
        Ok(search)
    }

    pub fn next_name(&mut self) -> Option<io::Result<OsString>> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        if self.finished {
            return None;
        }

        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            };

            let name = entry.file_name();
            if let Some(matcher) = &self.matcher {
                if !matcher.is_match(&name) {
                    continue;
                }
            }
            return Some(Ok(name));
        }

        self.finished = true;
        None
    }
}

// Windows wildcards: only `*` and `?` are special, case is ignored, and
// `*.*` matches names with or without an extension.
fn compile_pattern(pattern: &str) -> io::Result<GlobMatcher> {
    let pattern = if pattern == "*.*" { "*" } else { pattern };

    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '[' | ']' | '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            c => escaped.push(c),
        }
    }

    let glob = GlobBuilder::new(&escaped)
        .case_insensitive(true)
        .literal_separator(true)
        .backslash_escape(false)
        .build()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    Ok(glob.compile_matcher())
}
