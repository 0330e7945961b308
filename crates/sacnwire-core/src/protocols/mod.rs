//! Protocol encoding and decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, sizes and constants (source of truth)
//! - `codec`: big-endian primitives over caller buffers
//! - one module per PDU with its own `encode`/`decode`
//! - `error`: explicit, actionable errors
//!
//! Codecs are pure and contain no I/O; sockets belong to the caller.

pub mod sacn;
