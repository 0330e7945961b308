//! sACN (E1.31) packet encoding and decoding.
//!
//! A data packet is three PDUs laid out back to back: the ACN root layer, the
//! E1.31 framing layer and the DMP layer carrying the DMX slots. Each layer
//! owns its `encode`/`decode`; `Packet` composes them and adds a fast path
//! that patches the sequence number and slots of an already encoded buffer.
//!
//! Decoding is structural: each layer checks its length field against the
//! buffer and reports `is_malformed()`. Identifier checks (ACN PID, vectors,
//! start code) are left to `Packet::validate`. Wire offsets are defined in
//! `layout`; big-endian primitives live in `codec`.

pub mod addressing;
pub mod cid;
pub mod codec;
pub mod data;
pub mod error;
pub mod framing;
pub mod layout;
pub mod options;
pub mod packet;
pub mod root;

pub use cid::Cid;
pub use data::DataLayer;
pub use error::{Layer, SacnError};
pub use framing::{FramingLayer, SourceName};
pub use options::FramingOptions;
pub use packet::Packet;
pub use root::RootLayer;
