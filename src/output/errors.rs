use std::io::{self, Write};

pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

pub fn write_error<W, E>(w: &mut W, err: E) -> io::Result<()>
where
    W: Write,
    E: std::fmt::Display,
{
    writeln!(w, "{}: {}", PROGRAM_NAME, err)?;
    w.flush()
}

pub fn print_error<E>(err: E)
where
    E: std::fmt::Display,
{
    let _ = write_error(&mut io::stderr(), err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DuError;

    #[test]
    fn test_single_prefixed_line() {
        let mut buf = Vec::new();
        write_error(&mut buf, DuError::ConflictingFlags).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "du: ERROR with arguments: cannot both summarize and show all entries\n"
        );
    }
}
