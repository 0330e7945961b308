//! E1.31 framing layer and its fixed-width source name field.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use super::codec;
use super::error::{Layer, SacnError};
use super::layout;
use super::options::FramingOptions;

/// Fixed 64-byte, zero padded UTF-8 source name as it appears on the wire.
///
/// # Examples
/// ```
/// use sacnwire_core::SourceName;
///
/// let name = SourceName::new("Test Source");
/// assert_eq!(name.as_bytes().len(), 64);
/// assert_eq!(name.trimmed(), "Test Source");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceName([u8; layout::SOURCE_NAME_LEN]);

impl SourceName {
    /// Encodes `name`, truncating at 64 bytes with no terminator.
    pub fn new(name: &str) -> Self {
        let mut bytes = [0u8; layout::SOURCE_NAME_LEN];
        codec::write_fixed_string(name, &mut bytes, 0, layout::SOURCE_NAME_LEN);
        Self(bytes)
    }

    pub const fn from_bytes(bytes: [u8; layout::SOURCE_NAME_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; layout::SOURCE_NAME_LEN] {
        &self.0
    }

    /// The full 64-byte field decoded as UTF-8, padding included.
    pub fn raw(&self) -> String {
        codec::read_fixed_string(&self.0, 0, layout::SOURCE_NAME_LEN)
    }

    /// The name without its zero padding.
    pub fn trimmed(&self) -> String {
        self.raw().trim_end_matches('\0').to_string()
    }

    /// The name without padding, when it is valid UTF-8.
    fn text(&self) -> Option<&str> {
        let end = self.0.iter().rposition(|b| *b != 0).map_or(0, |idx| idx + 1);
        std::str::from_utf8(&self.0[..end]).ok()
    }
}

impl Default for SourceName {
    fn default() -> Self {
        Self([0u8; layout::SOURCE_NAME_LEN])
    }
}

impl fmt::Debug for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SourceName").field(&self.trimmed()).finish()
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trimmed())
    }
}

impl From<&str> for SourceName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// A name cut inside a multi-byte character is kept as its raw 64 bytes so
// that deserializing restores the exact field.
impl Serialize for SourceName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.text() {
            Some(text) => serializer.serialize_str(text),
            None => serializer.collect_seq(self.0.iter()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceNameRepr {
    Text(String),
    Bytes(Vec<u8>),
}

impl<'de> Deserialize<'de> for SourceName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SourceNameRepr::deserialize(deserializer)? {
            SourceNameRepr::Text(text) => Ok(Self::new(&text)),
            SourceNameRepr::Bytes(bytes) => {
                let len = bytes.len();
                let bytes: [u8; layout::SOURCE_NAME_LEN] = bytes.try_into().map_err(|_| {
                    <D::Error as serde::de::Error>::invalid_length(len, &"64 source name bytes")
                })?;
                Ok(Self(bytes))
            }
        }
    }
}

/// E1.31 framing layer: source name, priority, sequence and universe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramingLayer {
    pub flags_and_length: u16,
    pub vector: u32,
    pub source_name: SourceName,
    pub priority: u8,
    pub reserved: u16,
    pub sequence: u8,
    pub options: u8,
    pub universe: u16,
    #[serde(skip)]
    malformed: bool,
}

impl FramingLayer {
    /// Framing layer whose PDU (itself plus the data layer) spans
    /// `payload_length` bytes.
    pub fn new(payload_length: u16, source_name: &str, sequence: u8, universe: u16) -> Self {
        let mut layer = Self {
            flags_and_length: 0,
            vector: layout::FRAMING_VECTOR_DMX,
            source_name: SourceName::new(source_name),
            priority: layout::DEFAULT_PRIORITY,
            reserved: 0,
            sequence,
            options: 0,
            universe,
            malformed: false,
        };
        layer.set_length(payload_length);
        layer
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_options(mut self, options: FramingOptions) -> Self {
        self.options = options.bits();
        self
    }

    /// Reads the layer at `offset`; malformed unless the length field covers
    /// the rest of `buffer`.
    pub fn decode(buffer: &[u8], offset: usize) -> Self {
        let mut layer = Self::read(buffer, offset);
        if let Err(err) = layer.check_length(buffer, offset) {
            debug!(error = %err, universe = layer.universe, "malformed sACN framing layer");
            layer.malformed = true;
        }
        layer
    }

    pub(crate) fn try_decode(buffer: &[u8], offset: usize) -> Result<Self, SacnError> {
        let layer = Self::read(buffer, offset);
        layer.check_length(buffer, offset)?;
        Ok(layer)
    }

    fn read(buffer: &[u8], offset: usize) -> Self {
        let name = offset + layout::SOURCE_NAME_RANGE.start;
        let mut source_name = [0u8; layout::SOURCE_NAME_LEN];
        source_name.copy_from_slice(&buffer[name..name + layout::SOURCE_NAME_LEN]);

        Self {
            flags_and_length: codec::read_u16_be(
                buffer,
                offset + layout::FRAMING_FLAGS_LENGTH_RANGE.start,
            ),
            vector: codec::read_u32_be(buffer, offset + layout::FRAMING_VECTOR_RANGE.start),
            source_name: SourceName::from_bytes(source_name),
            priority: buffer[offset + layout::PRIORITY_OFFSET],
            reserved: codec::read_u16_be(buffer, offset + layout::RESERVED_RANGE.start),
            sequence: buffer[offset + layout::SEQUENCE_OFFSET],
            options: buffer[offset + layout::OPTIONS_OFFSET],
            universe: codec::read_u16_be(buffer, offset + layout::UNIVERSE_RANGE.start),
            malformed: false,
        }
    }

    pub fn encode(&self, buffer: &mut [u8], offset: usize) {
        codec::write_u16_be(
            self.flags_and_length,
            buffer,
            offset + layout::FRAMING_FLAGS_LENGTH_RANGE.start,
        );
        codec::write_u32_be(self.vector, buffer, offset + layout::FRAMING_VECTOR_RANGE.start);
        let name = offset + layout::SOURCE_NAME_RANGE.start;
        buffer[name..name + layout::SOURCE_NAME_LEN].copy_from_slice(self.source_name.as_bytes());
        buffer[offset + layout::PRIORITY_OFFSET] = self.priority;
        codec::write_u16_be(self.reserved, buffer, offset + layout::RESERVED_RANGE.start);
        buffer[offset + layout::SEQUENCE_OFFSET] = self.sequence;
        buffer[offset + layout::OPTIONS_OFFSET] = self.options;
        codec::write_u16_be(self.universe, buffer, offset + layout::UNIVERSE_RANGE.start);
    }

    pub fn length(&self) -> u16 {
        self.flags_and_length & layout::LENGTH_MASK
    }

    pub fn set_length(&mut self, value: u16) {
        self.flags_and_length = layout::FLAGS | (value & layout::LENGTH_MASK);
    }

    pub fn options(&self) -> FramingOptions {
        FramingOptions::from_bits_retain(self.options)
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub(crate) fn check_length(&self, buffer: &[u8], offset: usize) -> Result<(), SacnError> {
        let expected = buffer.len().saturating_sub(offset);
        let declared = self.length() as usize;
        if declared != expected {
            return Err(SacnError::LengthMismatch {
                layer: Layer::Framing,
                declared,
                expected,
            });
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), SacnError> {
        if self.vector != layout::FRAMING_VECTOR_DMX {
            return Err(SacnError::InvalidFramingVector { value: self.vector });
        }
        Ok(())
    }
}
