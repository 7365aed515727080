#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod character_sets;
mod codec;
mod config;
mod error;
mod helpers;
mod param_map;
mod request;
mod scheme;
mod site_root;
mod unicode;

// Public API
pub use codec::{Redirect, UrlCodec};
pub use config::Config;
pub use error::{CodecError, ErrorKind, ParseError, Result};
pub use request::{Request, parse_query};
pub use scheme::Scheme;
pub use site_root::SiteRoot;
