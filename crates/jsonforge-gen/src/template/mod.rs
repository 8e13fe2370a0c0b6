//! Code fragment templates.
//!
//! Each function renders one fragment of a generated conversion function as
//! a token stream with named parameters spliced in; the emitters compose
//! fragments recursively. This is plain interpolation, no templating engine:
//! the contract is the shape of the emitted code, not the mechanism.

pub mod de;
pub mod ser;
