//! Whole-packet composition and the in-place patch path for encoded buffers.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::cid::Cid;
use super::data::DataLayer;
use super::error::SacnError;
use super::framing::FramingLayer;
use super::layout;
use super::options::FramingOptions;
use super::root::RootLayer;

/// A complete E1.31 data packet: root, framing and DMP layers back to back.
///
/// # Examples
/// ```
/// use sacnwire_core::{Cid, Packet};
///
/// let packet = Packet::new(Cid::NIL, "Test Source", 0, 1, &[255, 0, 0], 0, 3);
/// let bytes = packet.to_bytes();
/// assert_eq!(bytes.len(), 129);
///
/// let decoded = Packet::decode(&bytes);
/// assert!(!decoded.is_malformed());
/// assert_eq!(decoded.slots(), &[255, 0, 0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    pub root: RootLayer,
    pub framing: FramingLayer,
    pub data: DataLayer,
    #[serde(skip)]
    malformed: bool,
}

impl Packet {
    /// Builds a packet carrying `slot_count` slots from `values[source_offset..]`.
    ///
    /// Lengths are derived inner layer first, so the result is always
    /// well formed.
    ///
    /// Panics if `slot_count` exceeds [`layout::DMX_MAX_SLOTS`].
    pub fn new(
        cid: Cid,
        source_name: &str,
        sequence: u8,
        universe: u16,
        values: &[u8],
        source_offset: usize,
        slot_count: usize,
    ) -> Self {
        let data = DataLayer::new(values, source_offset, slot_count);
        let framing = FramingLayer::new(
            (layout::FRAMING_LAYER_SIZE as u16).wrapping_add(data.length()),
            source_name,
            sequence,
            universe,
        );
        let root = RootLayer::new(
            (layout::ROOT_PDU_SIZE as u16).wrapping_add(framing.length()),
            cid,
        );
        Self {
            root,
            framing,
            data,
            malformed: false,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.framing.priority = priority;
        self
    }

    pub fn with_options(mut self, options: FramingOptions) -> Self {
        self.framing.options = options.bits();
        self
    }

    /// Decodes `buffer`, stopping at the first malformed layer.
    ///
    /// A malformed packet carries default layers: nothing decoded from a
    /// rejected buffer is exposed.
    pub fn decode(buffer: &[u8]) -> Self {
        match Self::try_decode(buffer) {
            Ok(packet) => packet,
            Err(err) => {
                debug!(error = %err, len = buffer.len(), "malformed sACN packet");
                Self {
                    malformed: true,
                    ..Self::default()
                }
            }
        }
    }

    /// Like [`Packet::decode`], reporting why the buffer was rejected.
    pub fn try_decode(buffer: &[u8]) -> Result<Self, SacnError> {
        if buffer.len() < layout::MIN_LEN {
            return Err(SacnError::TooShort {
                needed: layout::MIN_LEN,
                actual: buffer.len(),
            });
        }
        let root = RootLayer::try_decode(buffer, layout::ROOT_OFFSET)?;
        let framing = FramingLayer::try_decode(buffer, layout::FRAMING_OFFSET)?;
        let data = DataLayer::try_decode(buffer, layout::DATA_OFFSET)?;
        Ok(Self {
            root,
            framing,
            data,
            malformed: false,
        })
    }

    /// Checks the identifiers the structural decode leaves alone: ACN PID,
    /// the three vectors, the DMP address type and the start code.
    pub fn validate(&self) -> Result<(), SacnError> {
        self.root.validate()?;
        self.framing.validate()?;
        self.data.validate()
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// Bytes the encoded packet occupies.
    pub fn phy_length(&self) -> usize {
        layout::FRAMING_OFFSET + self.framing.length() as usize
    }

    pub fn cid(&self) -> &Cid {
        &self.root.cid
    }

    pub fn universe(&self) -> u16 {
        self.framing.universe
    }

    pub fn sequence(&self) -> u8 {
        self.framing.sequence
    }

    pub fn slots(&self) -> &[u8] {
        self.data.slots()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; self.phy_length()];
        self.encode(&mut buffer);
        buffer
    }

    /// Encodes into the front of `buffer`, which must hold
    /// [`Packet::phy_length`] bytes.
    pub fn encode(&self, buffer: &mut [u8]) {
        self.root.encode(buffer, layout::ROOT_OFFSET);
        self.framing.encode(buffer, layout::FRAMING_OFFSET);
        self.data.encode(buffer, layout::DATA_OFFSET);
    }

    /// Whether the slots of an encoded packet equal
    /// `values[source_offset..source_offset + slot_count]`.
    ///
    /// `buffer` must come from an encode with at least `slot_count` slots.
    pub fn compare_slots(
        buffer: &[u8],
        values: &[u8],
        source_offset: usize,
        slot_count: usize,
    ) -> bool {
        let slots = &buffer[layout::PACKET_SLOTS_OFFSET..layout::PACKET_SLOTS_OFFSET + slot_count];
        slots == &values[source_offset..source_offset + slot_count]
    }

    /// Rewrites the slots and the sequence number of an encoded packet in
    /// place. No other byte is touched and no length is re-derived.
    ///
    /// `slot_count` must match the count the buffer was encoded with.
    pub fn patch_sequence_and_slots(
        buffer: &mut [u8],
        values: &[u8],
        source_offset: usize,
        slot_count: usize,
        sequence: u8,
    ) {
        trace!(sequence, slot_count, "patching encoded sACN packet");
        buffer[layout::PACKET_SLOTS_OFFSET..layout::PACKET_SLOTS_OFFSET + slot_count]
            .copy_from_slice(&values[source_offset..source_offset + slot_count]);
        buffer[layout::PACKET_SEQUENCE_OFFSET] = sequence;
    }
}
