//! ACN root layer: preamble, ACN packet identifier and the sender CID.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cid::Cid;
use super::codec;
use super::error::{Layer, SacnError};
use super::layout;

/// ACN root layer: preamble, packet identifier and sender CID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootLayer {
    pub preamble_size: u16,
    pub postamble_size: u16,
    pub protocol_id: [u8; layout::ACN_PID_LEN],
    pub flags_and_length: u16,
    pub vector: u32,
    pub cid: Cid,
    #[serde(skip)]
    malformed: bool,
}

impl RootLayer {
    /// Root layer for a packet whose root PDU spans `payload_length` bytes.
    pub fn new(payload_length: u16, cid: Cid) -> Self {
        let mut protocol_id = [0u8; layout::ACN_PID_LEN];
        codec::write_fixed_string(layout::ACN_PID_STR, &mut protocol_id, 0, layout::ACN_PID_LEN);
        let mut layer = Self {
            preamble_size: layout::PREAMBLE_SIZE,
            postamble_size: layout::POSTAMBLE_SIZE,
            protocol_id,
            flags_and_length: 0,
            vector: layout::ROOT_VECTOR_DATA,
            cid,
            malformed: false,
        };
        layer.set_length(payload_length);
        layer
    }

    /// Reads the layer at `offset`.
    ///
    /// The layer is malformed unless its length field covers exactly the rest
    /// of `buffer` from the flags field onwards. A buffer that cannot hold the
    /// 38 fixed bytes is a caller bug and panics.
    pub fn decode(buffer: &[u8], offset: usize) -> Self {
        let mut layer = Self::read(buffer, offset);
        if let Err(err) = layer.check_length(buffer, offset) {
            debug!(error = %err, "malformed sACN root layer");
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
        let mut layer = Self {
            preamble_size: codec::read_u16_be(buffer, offset + layout::PREAMBLE_SIZE_RANGE.start),
            postamble_size: codec::read_u16_be(
                buffer,
                offset + layout::POSTAMBLE_SIZE_RANGE.start,
            ),
            protocol_id: [0u8; layout::ACN_PID_LEN],
            flags_and_length: codec::read_u16_be(
                buffer,
                offset + layout::ROOT_FLAGS_LENGTH_RANGE.start,
            ),
            vector: codec::read_u32_be(buffer, offset + layout::ROOT_VECTOR_RANGE.start),
            cid: codec::read_cid(buffer, offset + layout::CID_RANGE.start),
            malformed: false,
        };
        let pid = offset + layout::ACN_PID_RANGE.start;
        layer
            .protocol_id
            .copy_from_slice(&buffer[pid..pid + layout::ACN_PID_LEN]);
        layer
    }

    pub fn encode(&self, buffer: &mut [u8], offset: usize) {
        codec::write_u16_be(
            self.preamble_size,
            buffer,
            offset + layout::PREAMBLE_SIZE_RANGE.start,
        );
        codec::write_u16_be(
            self.postamble_size,
            buffer,
            offset + layout::POSTAMBLE_SIZE_RANGE.start,
        );
        let pid = offset + layout::ACN_PID_RANGE.start;
        buffer[pid..pid + layout::ACN_PID_LEN].copy_from_slice(&self.protocol_id);
        codec::write_u16_be(
            self.flags_and_length,
            buffer,
            offset + layout::ROOT_FLAGS_LENGTH_RANGE.start,
        );
        codec::write_u32_be(self.vector, buffer, offset + layout::ROOT_VECTOR_RANGE.start);
        codec::write_cid(&self.cid, buffer, offset + layout::CID_RANGE.start);
    }

    pub fn length(&self) -> u16 {
        self.flags_and_length & layout::LENGTH_MASK
    }

    pub fn set_length(&mut self, value: u16) {
        self.flags_and_length = layout::FLAGS | (value & layout::LENGTH_MASK);
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub(crate) fn check_length(&self, buffer: &[u8], offset: usize) -> Result<(), SacnError> {
        let expected = buffer
            .len()
            .saturating_sub(offset + layout::ROOT_FLAGS_LENGTH_RANGE.start);
        let declared = self.length() as usize;
        if declared != expected {
            return Err(SacnError::LengthMismatch {
                layer: Layer::Root,
                declared,
                expected,
            });
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> Result<(), SacnError> {
        if &self.protocol_id != layout::ACN_PID {
            return Err(SacnError::InvalidAcnPid);
        }
        if self.vector != layout::ROOT_VECTOR_DATA {
            return Err(SacnError::InvalidRootVector { value: self.vector });
        }
        Ok(())
    }
}
