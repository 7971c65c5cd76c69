use std::{borrow::Cow, fmt};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::DuError;
#[cfg(windows)]
use crate::file_system::native;

const LONG_PREFIX: &str = r"\\?\";
const LONG_UNC_PREFIX: &str = r"\\?\UNC\";
const UNC_LEAD: &str = r"\\";

// One or two letter drive designator, as in `C:` or `AB:`.
static DRIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{1,2}:").unwrap());

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PathStyle {
    Windows,
    Unix,
}

impl PathStyle {
    #[cfg(windows)]
    pub const NATIVE: Self = Self::Windows;
    #[cfg(not(windows))]
    pub const NATIVE: Self = Self::Unix;

    pub fn separator(self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Unix => '/',
        }
    }

    fn alt_separator(self) -> Option<char> {
        match self {
            Self::Windows => Some('/'),
            Self::Unix => None,
        }
    }

    pub fn long_prefix(self) -> &'static str {
        match self {
            Self::Windows => LONG_PREFIX,
            Self::Unix => "",
        }
    }

    pub fn standardize(self, s: &str) -> String {
        match self.alt_separator() {
            Some(alt) => s.replace(alt, &self.separator().to_string()),
            None => s.to_string(),
        }
    }
}

/// A filesystem location in two forms: the display form the user typed and
/// the long-prefixed absolute form used for every OS call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanonicalPath {
    original: String,
    absolute: String,
    style: PathStyle,
}

impl CanonicalPath {
    #[cfg(windows)]
    pub fn normalize(input: &str) -> Result<Self, DuError> {
        let style = PathStyle::Windows;
        check_not_empty(input)?;

        let original = style.standardize(input);
        let full = native::full_path_name(&original).map_err(|err| DuError::PathResolution {
            path: input.to_string(),
            reason: err.to_string(),
        })?;
        let absolute = with_long_prefix(&strip_display_prefix(&full, style), style, input)?;

        Ok(Self {
            original,
            absolute,
            style,
        })
    }

    #[cfg(not(windows))]
    pub fn normalize(input: &str) -> Result<Self, DuError> {
        let cwd = current_dir_string(input)?;
        Self::normalize_in(input, &cwd, PathStyle::NATIVE)
    }

    // `cwd` must itself be absolute.
    pub fn normalize_in(input: &str, cwd: &str, style: PathStyle) -> Result<Self, DuError> {
        check_not_empty(input)?;

        let original = style.standardize(input);
        let plain = resolve(&original, cwd, style);
        let absolute = with_long_prefix(&plain, style, input)?;

        Ok(Self {
            original,
            absolute,
            style,
        })
    }

    pub fn current_dir() -> Result<Self, DuError> {
        let cwd = current_dir_string(".")?;
        let mut path = Self::normalize_in(&cwd, &cwd, PathStyle::NATIVE)?;
        let display = path.plain_absolute().into_owned();
        path.original = display;
        Ok(path)
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn absolute(&self) -> &str {
        &self.absolute
    }

    pub fn display(&self) -> Cow<'_, str> {
        strip_display_prefix(&self.original, self.style)
    }

    pub fn plain_absolute(&self) -> Cow<'_, str> {
        strip_display_prefix(&self.absolute, self.style)
    }

    // A display parent of `.`, or the empty one `parent` leaves behind on a
    // bare name, is dropped so the child shows as just `name`.
    pub fn child(&self, name: &str) -> Self {
        let name = self.style.standardize(name);
        let original = if self.original.is_empty() || self.original == "." {
            name.clone()
        } else {
            join(&self.original, &name, self.style.separator())
        };

        Self {
            original,
            absolute: join(&self.absolute, &name, self.style.separator()),
            style: self.style,
        }
    }

    pub fn parent(&self) -> Self {
        let sep = self.style.separator();

        let original = match self.original.rfind(sep) {
            Some(idx) => self.original[..idx].to_string(),
            None => String::new(),
        };

        let root = root_len(&self.absolute, self.style);
        let absolute = match self.absolute.rfind(sep) {
            Some(idx) if idx + 1 > root => self.absolute[..idx].to_string(),
            _ => self.absolute[..root].to_string(),
        };

        Self {
            original,
            absolute,
            style: self.style,
        }
    }

    pub fn leaf_name(&self) -> &str {
        match self.absolute.rfind(self.style.separator()) {
            Some(idx) => &self.absolute[idx + 1..],
            None => &self.absolute,
        }
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// True when the name contains a wildcard. The `?` of a long-path prefix
/// does not count.
pub fn is_glob_pattern(input: &str) -> bool {
    let body = input.strip_prefix(LONG_PREFIX).unwrap_or(input);
    body.contains('*') || body.contains('?')
}

pub fn strip_display_prefix(path: &str, style: PathStyle) -> Cow<'_, str> {
    if style != PathStyle::Windows {
        return Cow::Borrowed(path);
    }
    if let Some(rest) = path.strip_prefix(LONG_UNC_PREFIX) {
        Cow::Owned(format!("{UNC_LEAD}{rest}"))
    } else if let Some(rest) = path.strip_prefix(LONG_PREFIX) {
        Cow::Borrowed(rest)
    } else {
        Cow::Borrowed(path)
    }
}

pub fn is_absolute_input(input: &str, style: PathStyle) -> bool {
    match style {
        PathStyle::Windows => {
            let input = style.standardize(input);
            if input.starts_with('\\') {
                return true;
            }
            match DRIVE.find(&input) {
                Some(m) => input[m.end()..].starts_with('\\'),
                None => false,
            }
        }
        PathStyle::Unix => input.starts_with('/'),
    }
}

fn check_not_empty(input: &str) -> Result<(), DuError> {
    if input.is_empty() {
        return Err(DuError::PathResolution {
            path: input.to_string(),
            reason: "the path is empty".to_string(),
        });
    }
    Ok(())
}

fn current_dir_string(input: &str) -> Result<String, DuError> {
    let cwd = std::env::current_dir().map_err(|err| DuError::PathResolution {
        path: input.to_string(),
        reason: err.to_string(),
    })?;
    cwd.into_os_string()
        .into_string()
        .map_err(|cwd| DuError::PathResolution {
            path: input.to_string(),
            reason: format!("current directory {cwd:?} is not valid Unicode"),
        })
}

fn join(left: &str, right: &str, sep: char) -> String {
    let mut joined = String::with_capacity(left.len() + 1 + right.len());
    joined.push_str(left);
    if !left.ends_with(sep) {
        joined.push(sep);
    }
    joined.push_str(right);
    joined
}

fn resolve(path: &str, cwd: &str, style: PathStyle) -> String {
    let sep = style.separator();
    let path = strip_display_prefix(path, style);
    let cwd = style.standardize(&strip_display_prefix(cwd, style));

    let absolute = if is_absolute_input(&path, style) {
        match style {
            // Rooted on the current drive, as in `\temp`.
            PathStyle::Windows if !path.starts_with(UNC_LEAD) && path.starts_with(sep) => {
                let (root, _) = split_root(&cwd, style);
                format!("{root}{path}")
            }
            _ => path.into_owned(),
        }
    } else {
        match DRIVE.find(&path).map(|m| m.end()) {
            // Drive-relative, as in `C:notes`.
            Some(end) if style == PathStyle::Windows => {
                let (drive, rest) = path.split_at(end);
                let (cwd_root, _) = split_root(&cwd, style);
                if cwd_root.eq_ignore_ascii_case(drive) {
                    join(&cwd, rest, sep)
                } else {
                    format!("{drive}{sep}{rest}")
                }
            }
            _ => join(&cwd, &path, sep),
        }
    };

    collapse(&absolute, style)
}

fn collapse(absolute: &str, style: PathStyle) -> String {
    let sep = style.separator();
    let (root, rest) = split_root(absolute, style);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(sep) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut out = String::from(root);
    if segments.is_empty() {
        out.push(sep);
    }
    for segment in segments {
        out.push(sep);
        out.push_str(segment);
    }
    out
}

fn split_root(absolute: &str, style: PathStyle) -> (&str, &str) {
    match style {
        PathStyle::Windows => {
            if let Some(rest) = absolute.strip_prefix(UNC_LEAD) {
                absolute.split_at(UNC_LEAD.len() + unc_share_len(rest))
            } else if let Some(m) = DRIVE.find(absolute) {
                absolute.split_at(m.end())
            } else {
                ("", absolute)
            }
        }
        PathStyle::Unix => ("", absolute),
    }
}

fn unc_share_len(rest: &str) -> usize {
    match rest.find('\\') {
        None => rest.len(),
        Some(server_end) => match rest[server_end + 1..].find('\\') {
            None => rest.len(),
            Some(share_end) => server_end + 1 + share_end,
        },
    }
}

// Includes the separator that follows the root.
fn root_len(absolute: &str, style: PathStyle) -> usize {
    let (skip, rest) = match style {
        PathStyle::Unix => (0, absolute),
        PathStyle::Windows => {
            if let Some(rest) = absolute.strip_prefix(LONG_UNC_PREFIX) {
                (LONG_UNC_PREFIX.len() + unc_share_len(rest), "")
            } else if let Some(rest) = absolute.strip_prefix(LONG_PREFIX) {
                (LONG_PREFIX.len(), rest)
            } else if let Some(rest) = absolute.strip_prefix(UNC_LEAD) {
                (UNC_LEAD.len() + unc_share_len(rest), "")
            } else {
                (0, absolute)
            }
        }
    };
    let (root, _) = split_root(rest, style);
    (skip + root.len() + 1).min(absolute.len())
}

fn with_long_prefix(plain: &str, style: PathStyle, input: &str) -> Result<String, DuError> {
    let (prefix, body) = match plain.strip_prefix(UNC_LEAD) {
        Some(rest) if style == PathStyle::Windows => (LONG_UNC_PREFIX, rest),
        _ => (style.long_prefix(), plain),
    };

    let mut absolute = String::new();
    absolute
        .try_reserve_exact(prefix.len() + body.len())
        .map_err(|_| DuError::Allocation {
            path: input.to_string(),
        })?;
    absolute.push_str(prefix);
    absolute.push_str(body);
    Ok(absolute)
}
