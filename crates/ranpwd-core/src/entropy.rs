//! Random byte acquisition.
//!
//! Every backend implements [`EntropySource`]. [`Entropy::open`] picks one
//! once per invocation:
//!
//! ```text
//! secure?  ── yes ──> /dev/random   ── open fails ──> EntropyUnavailable
//!          └─ no ───> /dev/urandom  ── open fails ──> warn + FallbackSource
//! ```
//!
//! On targets without device files the `getrandom` syscall takes the place
//! of the device and is probed with a one-byte read instead of an open.
//!
//! Bytes are used as-is. Nothing is whitened or accounted.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::EntropyConfig;
use crate::error::{Error, Result};

/// Which kind of backend is producing bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A character device such as `/dev/urandom`.
    Device,
    /// The OS CSPRNG syscall.
    System,
    /// Time-and-pid seeded pseudo-random generator.
    Fallback,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device => write!(f, "device"),
            Self::System => write!(f, "system"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Anything that produces uniformly distributed bytes.
pub trait EntropySource {
    /// Fill all of `buf`, or fail. A partial fill is never reported as success.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;

    fn kind(&self) -> SourceKind;
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// An open OS random device.
#[derive(Debug)]
pub struct DeviceSource {
    file: File,
}

impl DeviceSource {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self { file })
    }
}

impl EntropySource for DeviceSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        read_full(&mut self.file, buf).map_err(Error::EntropyReadFailure)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Device
    }
}

/// Read until `buf` is full, retrying on short reads and `EINTR`.
///
/// End-of-file before the buffer is full is an error: a device that runs dry
/// must not leave stale bytes in the tail of the buffer.
fn read_full<R: Read>(reader: &mut R, mut buf: &mut [u8]) -> io::Result<()> {
    while !buf.is_empty() {
        match reader.read(buf) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "entropy device returned end-of-file",
                ));
            }
            Ok(n) => buf = &mut buf[n..],
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// System call
// ---------------------------------------------------------------------------

/// OS CSPRNG via the `getrandom` crate, for targets without device files.
#[derive(Debug, Default)]
pub struct SystemSource;

impl SystemSource {
    /// Confirm the syscall works before committing to it.
    pub fn probe() -> io::Result<Self> {
        let mut byte = [0u8; 1];
        getrandom::fill(&mut byte).map_err(|e| io::Error::other(e.to_string()))?;
        Ok(Self)
    }
}

impl EntropySource for SystemSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        getrandom::fill(buf)
            .map_err(|e| Error::EntropyReadFailure(io::Error::other(e.to_string())))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::System
    }
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// Pseudo-random generator used when no device could be opened in
/// non-secure mode. Never fails.
pub struct FallbackSource {
    rng: StdRng,
}

impl FallbackSource {
    /// Seed from the current time XOR the process id.
    pub fn from_time_and_pid() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self::from_seed(secs ^ u64::from(std::process::id()))
    }

    pub(crate) fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl EntropySource for FallbackSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.rng.fill_bytes(buf);
        Ok(())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Fallback
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The backend chosen for this invocation.
///
/// Built once by [`Entropy::open`] and handed to the encoder by `&mut`; it is
/// never reopened. A device handle and the fallback state are exclusive by
/// construction.
pub enum Entropy {
    Device(DeviceSource),
    System(SystemSource),
    Fallback(FallbackSource),
}

impl Entropy {
    /// Open the preferred source for `secure` mode.
    ///
    /// In secure mode a missing source is fatal. Otherwise a warning is
    /// logged and the seeded fallback generator is used.
    pub fn open(config: &EntropyConfig, secure: bool) -> Result<Self> {
        let (device, opened) = match config.device(secure) {
            Some(path) => (
                path.display().to_string(),
                DeviceSource::open(path).map(Self::Device),
            ),
            None => ("getrandom".to_string(), SystemSource::probe().map(Self::System)),
        };

        match opened {
            Ok(entropy) => {
                log::debug!("using {} entropy from {device}", entropy.kind());
                Ok(entropy)
            }
            Err(source) if secure => Err(Error::EntropyUnavailable { device, source }),
            Err(e) => {
                log::warn!("cannot open {device}: {e}; using time-seeded generator");
                Ok(Self::Fallback(FallbackSource::from_time_and_pid()))
            }
        }
    }
}

impl EntropySource for Entropy {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        match self {
            Self::Device(s) => s.fill(buf),
            Self::System(s) => s.fill(buf),
            Self::Fallback(s) => s.fill(buf),
        }
    }

    fn kind(&self) -> SourceKind {
        match self {
            Self::Device(s) => s.kind(),
            Self::System(s) => s.kind(),
            Self::Fallback(s) => s.kind(),
        }
    }
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

/// Replays a fixed byte sequence, then fails like a device at end-of-file.
#[cfg(test)]
pub(crate) struct Scripted {
    bytes: std::collections::VecDeque<u8>,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.iter().copied().collect(),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
impl EntropySource for Scripted {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.bytes.len() < buf.len() {
            return Err(Error::EntropyReadFailure(io::Error::from(
                io::ErrorKind::UnexpectedEof,
            )));
        }
        for slot in buf.iter_mut() {
            *slot = self.bytes.pop_front().unwrap_or_default();
        }
        Ok(())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Device
    }
}
