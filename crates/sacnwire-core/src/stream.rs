use std::net::SocketAddrV4;

use tracing::debug;

use crate::config::SourceConfig;
use crate::protocols::sacn::addressing::multicast_socket_addr;
use crate::protocols::sacn::{FramingOptions, Packet};

/// One encoded packet kept alive for repeated transmission of a universe.
///
/// The first packet is built once; later frames only patch the sequence
/// number and the slots in place. Each stream owns its buffer, so patching
/// and sending happen one frame at a time.
///
/// # Examples
/// ```
/// use sacnwire_core::{SourceConfig, UniverseStream};
///
/// let config = SourceConfig::default();
/// let mut stream = UniverseStream::new(&config, 1, &[0, 0, 0]);
/// assert!(stream.update(&[0, 0, 0]).is_none());
///
/// let frame = stream.update(&[255, 0, 0]).expect("slots changed");
/// assert_eq!(&frame[126..129], &[255, 0, 0]);
/// assert_eq!(stream.sequence(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct UniverseStream {
    universe: u16,
    slot_count: usize,
    sequence: u8,
    buffer: Vec<u8>,
}

impl UniverseStream {
    /// Encodes the first frame of `universe` with `initial` as its slots.
    ///
    /// Panics if `initial` holds more than 512 slots.
    pub fn new(config: &SourceConfig, universe: u16, initial: &[u8]) -> Self {
        let packet = Packet::new(
            config.cid,
            &config.source_name,
            0,
            universe,
            initial,
            0,
            initial.len(),
        )
        .with_priority(config.priority)
        .with_options(config.options());

        Self {
            universe,
            slot_count: initial.len(),
            sequence: 0,
            buffer: packet.to_bytes(),
        }
    }

    /// Streams for every universe in `config`, all slots zeroed.
    pub fn for_config(config: &SourceConfig, slot_count: usize) -> Vec<Self> {
        let blank = vec![0u8; slot_count];
        config
            .universes
            .iter()
            .map(|&universe| Self::new(config, universe, &blank))
            .collect()
    }

    /// Returns the frame to send when `values` differ from the last frame.
    ///
    /// Panics if `values` holds fewer slots than the stream was created with.
    pub fn update(&mut self, values: &[u8]) -> Option<&[u8]> {
        if Packet::compare_slots(&self.buffer, values, 0, self.slot_count) {
            return None;
        }
        self.sequence = self.sequence.wrapping_add(1);
        Packet::patch_sequence_and_slots(
            &mut self.buffer,
            values,
            0,
            self.slot_count,
            self.sequence,
        );
        Some(self.buffer.as_slice())
    }

    /// Re-sends the current slots under the next sequence number.
    pub fn refresh(&mut self) -> &[u8] {
        self.sequence = self.sequence.wrapping_add(1);
        Packet::patch_sequence_and_slots(&mut self.buffer, &[], 0, 0, self.sequence);
        &self.buffer
    }

    /// Final frame announcing the end of this stream.
    pub fn terminate(&mut self) -> Vec<u8> {
        self.sequence = self.sequence.wrapping_add(1);
        let mut packet = Packet::decode(&self.buffer);
        let options = packet.framing.options() | FramingOptions::STREAM_TERMINATED;
        packet.framing.sequence = self.sequence;
        debug!(universe = self.universe, sequence = self.sequence, "terminating sACN stream");
        packet.with_options(options).to_bytes()
    }

    pub fn universe(&self) -> u16 {
        self.universe
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// The last frame, as it would be sent.
    pub fn frame(&self) -> &[u8] {
        &self.buffer
    }

    pub fn destination(&self) -> SocketAddrV4 {
        multicast_socket_addr(self.universe)
    }
}
