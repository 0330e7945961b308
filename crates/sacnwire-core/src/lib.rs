//! sacnwire core library: byte-exact sACN (ANSI E1.31) packet codec.
//!
//! This crate builds and parses E1.31 data packets: the ACN root layer, the
//! E1.31 framing layer and the DMP layer carrying up to 512 DMX slots. Every
//! multi-byte field is big-endian and every offset is fixed, so the codec is
//! a set of pure functions over caller buffers with no I/O. Sockets, pacing
//! and retransmission belong to the caller.
//!
//! Invariants:
//! - Encoding never fails and always yields a well-formed packet.
//! - Decoding is structural: a length field that disagrees with the buffer
//!   marks the packet malformed and nothing from it is exposed.
//! - The fast path (`Packet::compare_slots`, `Packet::patch_sequence_and_slots`)
//!   only touches the sequence byte and the slot bytes of an encoded buffer.
//!
//! # Examples
//! ```
//! use sacnwire_core::{Cid, Packet};
//!
//! let mut frame = Packet::new(Cid::NIL, "Test Source", 0, 1, &[255, 0, 0], 0, 3).to_bytes();
//! assert!(!Packet::compare_slots(&frame, &[0, 255, 0], 0, 3));
//!
//! Packet::patch_sequence_and_slots(&mut frame, &[0, 255, 0], 0, 3, 1);
//! let packet = Packet::decode(&frame);
//! assert_eq!(packet.sequence(), 1);
//! assert_eq!(packet.slots(), &[0, 255, 0]);
//! ```

pub mod config;
pub mod protocols;
pub mod stream;

pub use config::{ConfigError, SourceConfig};
pub use protocols::sacn::{
    Cid, DataLayer, FramingLayer, FramingOptions, Layer, Packet, RootLayer, SacnError, SourceName,
};
pub use stream::UniverseStream;
