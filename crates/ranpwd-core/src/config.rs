//! Generation request and entropy device configuration.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::format::Format;

/// Blocking, high-quality device used in secure mode.
pub const SECURE_DEVICE: &str = "/dev/random";
/// Non-blocking device used by default.
pub const DEFAULT_DEVICE: &str = "/dev/urandom";

/// A validated generation request. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    format: Format,
    length: usize,
    decorate: bool,
    secure: bool,
}

impl Config {
    /// Request `format` at its default length, undecorated, non-secure.
    pub fn new(format: Format) -> Self {
        Self {
            format,
            length: format.default_length(),
            decorate: false,
            secure: false,
        }
    }

    /// Override the unit count. Anything below 1 is rejected.
    pub fn with_length(mut self, length: i64) -> Result<Self> {
        if length < 1 {
            return Err(Error::InvalidLength(length));
        }
        self.length = usize::try_from(length).map_err(|_| Error::InvalidLength(length))?;
        Ok(self)
    }

    pub fn decorated(mut self, decorate: bool) -> Self {
        self.decorate = decorate;
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn is_decorated(&self) -> bool {
        self.decorate
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }
}

/// Where entropy comes from.
///
/// `None` means "no device file": the OS CSPRNG syscall is used instead.
/// This is the default on platforms without `/dev/urandom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntropyConfig {
    pub secure_device: Option<PathBuf>,
    pub default_device: Option<PathBuf>,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        if cfg!(unix) {
            Self {
                secure_device: Some(PathBuf::from(SECURE_DEVICE)),
                default_device: Some(PathBuf::from(DEFAULT_DEVICE)),
            }
        } else {
            Self {
                secure_device: None,
                default_device: None,
            }
        }
    }
}

impl EntropyConfig {
    /// Read from `path` in both modes.
    pub fn with_device(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            secure_device: Some(path.clone()),
            default_device: Some(path),
        }
    }

    /// Device that `open(secure)` will try first.
    pub fn device(&self, secure: bool) -> Option<&Path> {
        if secure {
            self.secure_device.as_deref()
        } else {
            self.default_device.as_deref()
        }
    }
}
