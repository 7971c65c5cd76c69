use std::{ffi::OsString, io, iter, os::windows::ffi::OsStringExt};

use windows::core::PCWSTR;
use windows::Win32::Foundation::{ERROR_NO_MORE_FILES, HANDLE};
use windows::Win32::Storage::FileSystem::{
    FindClose, FindFirstFileW, FindNextFileW, GetCompressedFileSizeW, GetFileAttributesW,
    GetFullPathNameW, FILE_ATTRIBUTE_DIRECTORY, INVALID_FILE_ATTRIBUTES, INVALID_FILE_SIZE, WIN32_FIND_DATAW,
};

use crate::file_system::{entry_type::EntryType, size::combine_size};

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(iter::once(0)).collect()
}

struct FindHandle(HANDLE);

impl Drop for FindHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = FindClose(self.0);
        }
    }
}

fn find_first(query: &str) -> io::Result<(FindHandle, WIN32_FIND_DATAW)> {
    let wide = to_wide(query);
    let mut data = WIN32_FIND_DATAW::default();
    let handle = unsafe { FindFirstFileW(PCWSTR(wide.as_ptr()), &mut data) }?;
    Ok((FindHandle(handle), data))
}

fn file_name(data: &WIN32_FIND_DATAW) -> OsString {
    let len = data
        .cFileName
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(data.cFileName.len());
    OsString::from_wide(&data.cFileName[..len])
}

// Asks for the required length first, then fills a buffer of that size.
// The current directory may change in between, so a second answer that no
// longer fits is an error rather than a retry.
pub fn full_path_name(input: &str) -> io::Result<String> {
    let wide = to_wide(input);

    let required = unsafe { GetFullPathNameW(PCWSTR(wide.as_ptr()), None, None) };
    if required == 0 {
        return Err(io::Error::last_os_error());
    }

    let mut buffer: Vec<u16> = Vec::new();
    buffer
        .try_reserve_exact(required as usize)
        .map_err(|err| io::Error::new(io::ErrorKind::OutOfMemory, err))?;
    buffer.resize(required as usize, 0);

    let written = unsafe { GetFullPathNameW(PCWSTR(wide.as_ptr()), Some(&mut buffer), None) };
    if written == 0 {
        return Err(io::Error::last_os_error());
    }
    if written as usize >= buffer.len() {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "full path grew between size and fill calls",
        ));
    }

    String::from_utf16(&buffer[..written as usize])
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

pub fn entry_type(absolute: &str) -> io::Result<EntryType> {
    let wide = to_wide(absolute);
    let attributes = unsafe { GetFileAttributesW(PCWSTR(wide.as_ptr())) };
    if attributes == INVALID_FILE_ATTRIBUTES {
        return Err(io::Error::last_os_error());
    }
    if attributes & FILE_ATTRIBUTE_DIRECTORY.0 != 0 {
        Ok(EntryType::Dir)
    } else {
        Ok(EntryType::File)
    }
}

pub fn apparent_size(absolute: &str) -> io::Result<u64> {
    let (_handle, data) = find_first(absolute)?;
    Ok(combine_size(data.nFileSizeHigh, data.nFileSizeLow))
}

pub fn allocated_size(absolute: &str) -> io::Result<u64> {
    let wide = to_wide(absolute);
    let mut high = 0u32;
    let low = unsafe { GetCompressedFileSizeW(PCWSTR(wide.as_ptr()), Some(&mut high)) };
    if low == INVALID_FILE_SIZE {
        // INVALID_FILE_SIZE is also a legal low half; only the last error
        // tells the two apart.
        let err = io::Error::last_os_error();
        if err.raw_os_error() != Some(0) {
            return Err(err);
        }
    }
    Ok(combine_size(high, low))
}

pub struct Search {
    handle: FindHandle,
    data: WIN32_FIND_DATAW,
    has_current: bool,
    failure: Option<io::Error>,
}

impl Search {
    pub fn open(dir: &str, pattern: Option<&str>) -> io::Result<Self> {
        let sep = if dir.ends_with('\\') { "" } else { "\\" };
        let query = format!("{dir}{sep}{}", pattern.unwrap_or("*"));
        let (handle, data) = find_first(&query)?;

        Ok(Self {
            handle,
            data,
            has_current: true,
            failure: None,
        })
    }

    pub fn next_name(&mut self) -> Option<io::Result<OsString>> {
        if let Some(err) = self.failure.take() {
            return Some(Err(err));
        }
        if !self.has_current {
            return None;
        }

        let name = file_name(&self.data);
        if let Err(err) = unsafe { FindNextFileW(self.handle.0, &mut self.data) } {
            self.has_current = false;
            if err.code() != ERROR_NO_MORE_FILES.to_hresult() {
                self.failure = Some(io::Error::from(err));
            }
        }
        Some(Ok(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_path_name_strips_trailing_dots_and_spaces() {
        assert_eq!(full_path_name(r"C:\work\foo.").unwrap(), r"C:\work\foo");
        assert_eq!(full_path_name(r"C:\work\foo  ").unwrap(), r"C:\work\foo");
    }

    #[test]
    fn test_full_path_name_resolves_relative_input() {
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.join("notes").to_str().unwrap().to_string();
        assert_eq!(full_path_name("notes").unwrap(), expected);
        assert_eq!(full_path_name(r".\a\..\notes").unwrap(), expected);
    }

    #[test]
    fn test_full_path_name_keeps_long_prefix() {
        assert_eq!(full_path_name(r"\\?\C:\work").unwrap(), r"\\?\C:\work");
    }
}
