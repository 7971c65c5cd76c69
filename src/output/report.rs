use std::io::{self, Write};

use console::{pad_str, Alignment};

use crate::{bytes::units::SizeFormat, file_system::path::CanonicalPath};

const SIZE_WIDTH: usize = 7;
const HUMAN_SIZE_WIDTH: usize = 2;

pub fn make_line(display: &str, size: u64, format: SizeFormat) -> String {
    let size = format.format(size);
    match format {
        SizeFormat::HumanReadable => format!(
            "{}\t{}",
            pad_str(&size, HUMAN_SIZE_WIDTH, Alignment::Left, None),
            display
        ),
        SizeFormat::Kibibytes | SizeFormat::Bytes => format!(
            "{} {}",
            pad_str(&size, SIZE_WIDTH, Alignment::Left, None),
            display
        ),
    }
}

pub struct Reporter<W: Write> {
    out: W,
    format: SizeFormat,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, format: SizeFormat) -> Self {
        Self { out, format }
    }

    pub fn report(&mut self, path: &CanonicalPath, size: u64) -> io::Result<()> {
        writeln!(self.out, "{}", make_line(&path.display(), size, self.format))?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
