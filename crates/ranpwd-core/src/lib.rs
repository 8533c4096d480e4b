//! # ranpwd-core
//!
//! **Random passwords, numbers, MAC addresses and UUIDs from the OS entropy device.**
//!
//! `ranpwd-core` reads raw bytes from `/dev/urandom` (or `/dev/random` in
//! secure mode) and turns them into exactly the requested number of output
//! units. Each unit is one of: a printable character, a hex, octal or
//! decimal digit pair, a bit, an IP or MAC octet, or a whole UUID.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ranpwd_core::{Config, Entropy, EntropyConfig, Format, generate};
//!
//! let config = Config::new(Format::Hex).with_length(16).unwrap().decorated(true);
//! let mut entropy = Entropy::open(&EntropyConfig::default(), config.is_secure()).unwrap();
//! let key = generate(&config, &mut entropy).unwrap();
//! assert!(key.starts_with("0x"));
//! ```
//!
//! ## Architecture
//!
//! Configuration → Entropy (opened once) → Encoder (rejection sampling) → Output
//!
//! Character classes are drawn by masking a byte into a small range and
//! rejecting anything outside the class, so there is no modulo bias. Case
//! variants are distinct [`Format`]s with their own rejection rules rather
//! than a fold applied after the fact.
//!
//! If the non-secure device cannot be opened, a warning goes through the
//! `log` facade and a time-and-pid seeded generator takes over. In secure
//! mode the same condition is a hard [`Error::EntropyUnavailable`].

pub mod config;
pub mod encoder;
pub mod entropy;
pub mod error;
pub mod format;

pub use config::{Config, DEFAULT_DEVICE, EntropyConfig, SECURE_DEVICE};
pub use encoder::{encode, generate, generate_line};
pub use entropy::{DeviceSource, Entropy, EntropySource, FallbackSource, SourceKind, SystemSource};
pub use error::{Error, Result};
pub use format::{Case, Decoration, Format};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
