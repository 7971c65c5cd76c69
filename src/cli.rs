use std::ffi::OsString;

use clap::{ArgAction, Parser};

use crate::{
    config::Config,
    error::DuError,
    file_system::{path::PathStyle, size::SizeMode},
};

#[derive(Debug, Parser)]
#[command(
    name = "du",
    version,
    about = "Summarize disk usage of each FILE, recursively for directories.",
    long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
    after_help = "File and directory sizes are written in kilobytes.\n\
                  1 kilobyte = 1024 bytes\n\n\
                  Example: du -s *"
)]
pub struct Args {
    /// Files, directories or wildcard patterns (default: the current directory)
    pub targets: Vec<String>,

    /// Write counts for all files, not just directories (/a)
    #[arg(name = "all", short = 'a', long = "all")]
    pub all: bool,

    /// Print size in bytes (/b)
    #[arg(name = "bytes", short = 'b', long = "bytes")]
    pub bytes: bool,

    /// Display only a total for each argument (/s)
    #[arg(name = "summarize", short = 's', long = "summarize")]
    pub summarize: bool,

    /// Print sizes in human readable format, e.g. 1K 234M 2G (/h)
    #[arg(name = "human-readable", short = 'h', long = "human-readable")]
    pub human_readable: bool,

    /// Count the space allocated on disk instead of the file length
    #[arg(name = "allocated", long = "allocated")]
    pub allocated: bool,

    /// Display this help and exit (/?)
    #[arg(short = '?', long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Output version information and exit (/v)
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}

impl TryFrom<Args> for Config {
    type Error = DuError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let size_mode = if args.allocated {
            SizeMode::Allocated
        } else {
            SizeMode::Apparent
        };

        Config {
            targets: args.targets,
            include_regular_files: args.all,
            bytes_only: args.bytes,
            summarize_only: args.summarize,
            human_readable: args.human_readable,
            size_mode,
        }
        .validate()
    }
}

// Only done for Windows paths, where a bare `/s` cannot be a file.
pub fn translate_slash_switches<I, T>(args: I, style: PathStyle) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if style != PathStyle::Windows {
                return arg;
            }
            match arg.to_str() {
                Some("/a") => "-a".into(),
                Some("/b") => "-b".into(),
                Some("/h") => "-h".into(),
                Some("/s") => "-s".into(),
                Some("/?") => "-?".into(),
                Some("/v") => "-v".into(),
                _ => arg,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn test_slash_switches_on_windows() {
        let args = translate_slash_switches(["du", "/a", "/b", "/x", "dir"], PathStyle::Windows);
        assert_eq!(args, vec!["du", "-a", "-b", "/x", "dir"]);
    }

    #[test]
    fn test_slash_switches_left_alone_on_unix() {
        let args = translate_slash_switches(["du", "/s"], PathStyle::Unix);
        assert_eq!(args, vec!["du", "/s"]);
    }

    #[test]
    fn test_help_and_version_short_flags() {
        let err = Args::try_parse_from(["du", "-?"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let err = Args::try_parse_from(["du", "-v"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_unknown_flag_is_error() {
        let err = Args::try_parse_from(["du", "--frobnicate"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_dash_h_is_human_readable() {
        let args = Args::try_parse_from(["du", "-h", "."]).unwrap();
        assert!(args.human_readable);
        assert_eq!(args.targets, vec!["."]);
    }
}
