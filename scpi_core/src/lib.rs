#![cfg_attr(not(any(feature = "std", test)), no_std)]
//! # SCPI Command Tree Core
//!
//! This crate resolves SCPI-style command strings against a static tree of
//! hierarchical keywords and dispatches them to handler functions. It
//! provides:
//!
//! - long and short keyword forms (`VOLTage` / `VOLT`), compared
//!   case-insensitively,
//! - optional levels that may be left out of a command path,
//! - query detection (trailing `?`) and raw parameter extraction,
//! - semicolon-separated command sequences dispatched in textual order,
//! - and a path walker for listing the command vocabulary.
//!
//! ## Usage
//! Trees are built bottom-up with [`Node`] and resolved with
//! [`Node::match_segment`] or [`Node::parse`]:
//!
//! ```
//! use scpi_core::Node;
//!
//! let tree = Node::new("SENSor").child(
//!     Node::new("POWer").optional().child(
//!         Node::new("VOLTage").handler(|query, parameters| {
//!             if query {
//!                 println!("voltage requested");
//!             } else {
//!                 println!("voltage set to {}", parameters);
//!             }
//!         }),
//!     ),
//! );
//!
//! // The optional POWer level and the short forms may be left out or
//! // spelled in any case.
//! assert!(tree.match_segment("sens:volt 100mV").is_some());
//! assert!(tree.match_segment("SENSOR:POWER:VOLTAGE?").is_some());
//! tree.parse("SENS:VOLT 5V;SENS:VOLT?");
//! ```
//!
//! ## no_std
//! The crate is `no_std` by default and allocates only while a tree is
//! built; resolving a command borrows the tree and the input line. The
//! `std` feature adds `std::error::Error` for [`KeywordError`], and the
//! `defmt` feature adds `defmt::Format` for the public types.
//!
//! ## Errors
//! Resolution has no error channel: a command that matches nothing is
//! reported as an absent result. Only tree construction can fail, with
//! [`KeywordError`].

extern crate alloc;

pub mod error;
pub mod node;

pub use error::KeywordError;
pub use node::{Handler, MatchResult, Node};
