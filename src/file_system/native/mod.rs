//! The thin layer that actually talks to the operating system. Everything
//! above it works on [`CanonicalPath`](super::path::CanonicalPath) strings.

#[cfg(windows)]
mod win32;
#[cfg(windows)]
pub use self::win32::*;

#[cfg(not(windows))]
mod posix;
#[cfg(not(windows))]
pub use self::posix::*;
