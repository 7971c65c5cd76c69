use crate::bytes::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SizeFormat {
    Kibibytes,
    Bytes,
    HumanReadable,
}

impl SizeFormat {
    const HUMAN_UNITS: [(u64, &'static str); 3] = [(GIBIBYTE, G), (MEBIBYTE, M), (KIBIBYTE, K)];

    pub fn format(&self, bytes: u64) -> String {
        match self {
            Self::Kibibytes => format!("{}", to_kibibytes(bytes)),
            Self::Bytes => format!("{}", bytes),
            Self::HumanReadable => Self::format_human(bytes),
        }
    }

    fn format_human(bytes: u64) -> String {
        for (unit, suffix) in Self::HUMAN_UNITS {
            if bytes >= unit {
                return format!("{:.1}{}", bytes as f64 / unit as f64, suffix);
            }
        }
        format!("{}", bytes)
    }
}

// Nearest kibibyte, but a non-empty size never shows as 0.
fn to_kibibytes(bytes: u64) -> u64 {
    if bytes == 0 {
        return 0;
    }
    let rounded = bytes / KIBIBYTE + u64::from(bytes % KIBIBYTE >= KIBIBYTE / 2);
    rounded.max(1)
}
