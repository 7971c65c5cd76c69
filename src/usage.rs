use std::io::Write;

use crate::{
    config::Config,
    error::DuError,
    file_system::{
        entry_type::EntryType,
        enumerate::Children,
        path::{is_glob_pattern, CanonicalPath},
        size::size_of,
    },
    ok_or,
    output::{errors::write_error, report::Reporter},
};

pub struct DiskUsage<'c, O: Write, E: Write> {
    config: &'c Config,
    reporter: Reporter<O>,
    errors: E,
}

impl<'c, O: Write, E: Write> DiskUsage<'c, O, E> {
    pub fn new(config: &'c Config, out: O, errors: E) -> Self {
        Self {
            config,
            reporter: Reporter::new(out, config.size_format()),
            errors,
        }
    }

    pub fn run(&mut self) -> Result<(), DuError> {
        let config = self.config;
        if config.targets.is_empty() {
            let cwd = CanonicalPath::current_dir()?;
            self.visit(&cwd, true)?;
            return Ok(());
        }

        for target in &config.targets {
            self.run_target(target)?;
        }
        Ok(())
    }

    // Every match of a wildcard target is its own top-level entry.
    pub fn run_target(&mut self, target: &str) -> Result<(), DuError> {
        let path = CanonicalPath::normalize(target)?;
        tracing::debug!(arg = target, absolute = path.absolute(), "measuring target");

        if !is_glob_pattern(target) {
            self.visit(&path, true)?;
            return Ok(());
        }

        let dir = path.parent();
        let matches = ok_or!(Children::matching(&path), err => {
            self.absorb(err)?;
            return Ok(());
        });
        for name in matches {
            let name = ok_or!(name, err => {
                self.absorb(err)?;
                continue;
            });
            self.visit(&dir.child(&name), true)?;
        }
        Ok(())
    }

    pub fn visit(&mut self, path: &CanonicalPath, is_top_level: bool) -> Result<u64, DuError> {
        let entry_type = ok_or!(EntryType::of(path), err => {
            self.absorb(err)?;
            return Ok(0);
        });

        match entry_type {
            EntryType::Dir => {
                let mut total = 0u64;
                match Children::open(path) {
                    Ok(children) => {
                        for child in children {
                            match child {
                                Ok(name) => total += self.visit(&path.child(&name), false)?,
                                Err(err) => self.absorb(err)?,
                            }
                        }
                    }
                    Err(err) => self.absorb(err)?,
                }

                if !self.config.summarize_only || is_top_level {
                    self.reporter.report(path, total)?;
                }
                Ok(total)
            }
            EntryType::File => {
                let size = ok_or!(size_of(path, self.config.size_mode), err => {
                    self.absorb(err)?;
                    0
                });

                if self.config.include_regular_files || is_top_level {
                    self.reporter.report(path, size)?;
                }
                Ok(size)
            }
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.reporter.into_inner(), self.errors)
    }

    fn absorb(&mut self, err: DuError) -> Result<(), DuError> {
        if err.is_fatal() {
            return Err(err);
        }
        tracing::debug!(error = %err, "entry skipped");
        if let Err(write_err) = write_error(&mut self.errors, &err) {
            tracing::warn!("could not report error '{}': {}", err, write_err);
        }
        Ok(())
    }
}
