//! DMP layer: the set-property message carrying the DMX start code and slots.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec;
use super::error::{Layer, SacnError};
use super::layout;

/// DMP layer carrying the start code and the DMX slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLayer {
    pub flags_and_length: u16,
    pub vector: u8,
    pub address_and_data_type: u8,
    pub first_property_address: u16,
    pub address_increment: u16,
    pub property_value_count: u16,
    /// Start code at index 0, then one byte per slot.
    pub property_values: Vec<u8>,
    #[serde(skip)]
    malformed: bool,
}

impl DataLayer {
    /// Copies `slot_count` slots from `values[source_offset..]` behind a
    /// zero start code.
    ///
    /// Panics if `slot_count` exceeds [`layout::DMX_MAX_SLOTS`] or `values`
    /// holds fewer than `source_offset + slot_count` bytes.
    pub fn new(values: &[u8], source_offset: usize, slot_count: usize) -> Self {
        assert!(
            slot_count <= layout::DMX_MAX_SLOTS,
            "slot count {slot_count} exceeds {} DMX slots",
            layout::DMX_MAX_SLOTS
        );
        let mut property_values = Vec::with_capacity(slot_count + 1);
        property_values.push(layout::START_CODE_DMX);
        property_values.extend_from_slice(&values[source_offset..source_offset + slot_count]);

        let mut layer = Self {
            flags_and_length: 0,
            vector: layout::DMP_VECTOR_SET_PROPERTY,
            address_and_data_type: layout::DMP_ADDRESS_TYPE,
            first_property_address: layout::DMP_FIRST_ADDRESS,
            address_increment: layout::DMP_ADDRESS_INCREMENT,
            property_value_count: (slot_count + 1) as u16,
            property_values,
            malformed: false,
        };
        layer.set_length((layout::DATA_LAYER_HEADER_SIZE + 1 + slot_count) as u16);
        layer
    }

    /// Reads the layer at `offset`.
    ///
    /// Unlike the outer layers' reads, this never indexes past `buffer`: a
    /// truncated header or value block, a property count that disagrees with
    /// the length field, or a length field that does not cover the rest of
    /// `buffer` all yield a malformed layer.
    pub fn decode(buffer: &[u8], offset: usize) -> Self {
        let mut layer = Self::default();
        match layer.read(buffer, offset) {
            Ok(()) => layer,
            Err(err) => {
                debug!(error = %err, "malformed sACN data layer");
                layer.malformed = true;
                layer
            }
        }
    }

    pub(crate) fn try_decode(buffer: &[u8], offset: usize) -> Result<Self, SacnError> {
        let mut layer = Self::default();
        layer.read(buffer, offset)?;
        Ok(layer)
    }

    fn read(&mut self, buffer: &[u8], offset: usize) -> Result<(), SacnError> {
        let header_end = offset + layout::DATA_LAYER_HEADER_SIZE;
        if buffer.len() < header_end {
            return Err(SacnError::TooShort {
                needed: header_end,
                actual: buffer.len(),
            });
        }

        self.flags_and_length =
            codec::read_u16_be(buffer, offset + layout::DMP_FLAGS_LENGTH_RANGE.start);
        self.vector = buffer[offset + layout::DMP_VECTOR_OFFSET];
        self.address_and_data_type = buffer[offset + layout::DMP_ADDRESS_TYPE_OFFSET];
        self.first_property_address =
            codec::read_u16_be(buffer, offset + layout::DMP_FIRST_ADDRESS_RANGE.start);
        self.address_increment =
            codec::read_u16_be(buffer, offset + layout::DMP_ADDRESS_INCREMENT_RANGE.start);
        self.property_value_count =
            codec::read_u16_be(buffer, offset + layout::DMP_PROPERTY_VALUE_COUNT_RANGE.start);

        let values_end = header_end + self.property_value_count as usize;
        let values = buffer.get(header_end..values_end).ok_or(SacnError::TooShort {
            needed: values_end,
            actual: buffer.len(),
        })?;
        self.property_values = values.to_vec();

        let declared = self.length() as usize;
        if declared != self.phy_length() {
            return Err(SacnError::InvalidPropertyValueCount {
                count: self.property_value_count,
            });
        }
        let expected = buffer.len() - offset;
        if declared != expected {
            return Err(SacnError::LengthMismatch {
                layer: Layer::Data,
                declared,
                expected,
            });
        }
        Ok(())
    }

    pub fn encode(&self, buffer: &mut [u8], offset: usize) {
        codec::write_u16_be(
            self.flags_and_length,
            buffer,
            offset + layout::DMP_FLAGS_LENGTH_RANGE.start,
        );
        buffer[offset + layout::DMP_VECTOR_OFFSET] = self.vector;
        buffer[offset + layout::DMP_ADDRESS_TYPE_OFFSET] = self.address_and_data_type;
        codec::write_u16_be(
            self.first_property_address,
            buffer,
            offset + layout::DMP_FIRST_ADDRESS_RANGE.start,
        );
        codec::write_u16_be(
            self.address_increment,
            buffer,
            offset + layout::DMP_ADDRESS_INCREMENT_RANGE.start,
        );
        codec::write_u16_be(
            self.property_value_count,
            buffer,
            offset + layout::DMP_PROPERTY_VALUE_COUNT_RANGE.start,
        );
        let start = offset + layout::DMP_PROPERTY_VALUES_OFFSET;
        buffer[start..start + self.property_values.len()].copy_from_slice(&self.property_values);
    }

    pub fn length(&self) -> u16 {
        self.flags_and_length & layout::LENGTH_MASK
    }

    pub fn set_length(&mut self, value: u16) {
        self.flags_and_length = layout::FLAGS | (value & layout::LENGTH_MASK);
    }

    /// Bytes this layer occupies on the wire.
    pub fn phy_length(&self) -> usize {
        layout::DATA_LAYER_HEADER_SIZE + self.property_value_count as usize
    }

    pub fn start_code(&self) -> Option<u8> {
        self.property_values.first().copied()
    }

    pub fn slots(&self) -> &[u8] {
        self.property_values.get(1..).unwrap_or(&[])
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    pub(crate) fn validate(&self) -> Result<(), SacnError> {
        if self.vector != layout::DMP_VECTOR_SET_PROPERTY {
            return Err(SacnError::InvalidDmpVector { value: self.vector });
        }
        if self.address_and_data_type != layout::DMP_ADDRESS_TYPE {
            return Err(SacnError::InvalidAddressType {
                value: self.address_and_data_type,
            });
        }
        match self.start_code() {
            Some(layout::START_CODE_DMX) => Ok(()),
            Some(value) => Err(SacnError::InvalidStartCode { value }),
            None => Err(SacnError::InvalidPropertyValueCount { count: 0 }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataLayer;
    use crate::protocols::sacn::error::SacnError;

    fn encoded(layer: &DataLayer) -> Vec<u8> {
        let mut buf = vec![0u8; layer.phy_length()];
        layer.encode(&mut buf, 0);
        buf
    }

    #[test]
    fn new_prefixes_start_code() {
        let layer = DataLayer::new(&[9, 1, 2, 3, 9], 1, 3);
        assert_eq!(layer.property_value_count, 4);
        assert_eq!(layer.property_values, vec![0, 1, 2, 3]);
        assert_eq!(layer.slots(), &[1, 2, 3]);
        assert_eq!(layer.length(), 14);
        assert_eq!(layer.phy_length(), 14);
        assert_eq!(layer.flags_and_length, 0x700E);
    }

    #[test]
    fn new_without_slots_keeps_start_code() {
        let layer = DataLayer::new(&[], 0, 0);
        assert_eq!(layer.property_values, vec![0]);
        assert_eq!(layer.phy_length(), 11);
    }

    #[test]
    fn new_accepts_full_universe() {
        let values = vec![0x11u8; 512];
        let layer = DataLayer::new(&values, 0, 512);
        assert_eq!(layer.property_value_count, 513);
        assert_eq!(layer.length(), 523);

        let decoded = DataLayer::decode(&encoded(&layer), 0);
        assert!(!decoded.is_malformed());
        assert_eq!(decoded.slots().len(), 512);
    }

    #[test]
    #[should_panic(expected = "slot count 513 exceeds 512 DMX slots")]
    fn new_rejects_more_than_a_universe() {
        let values = vec![0u8; 513];
        DataLayer::new(&values, 0, 513);
    }

    #[test]
    fn encode_writes_wire_layout() {
        let buf = encoded(&DataLayer::new(&[0xFF, 0x00], 0, 2));
        assert_eq!(
            buf,
            vec![0x70, 0x0D, 0x02, 0xA1, 0x00, 0x00, 0x00, 0x01, 0x00, 0x03, 0x00, 0xFF, 0x00]
        );
    }

    #[test]
    fn decode_round_trips() {
        let layer = DataLayer::new(&[1, 2, 3], 0, 3);
        let decoded = DataLayer::decode(&encoded(&layer), 0);
        assert!(!decoded.is_malformed());
        assert_eq!(decoded, layer);
    }

    // Hardened beyond the outer layers: a short buffer is a malformed result,
    // not an out-of-bounds panic.
    #[test]
    fn decode_truncated_values_is_malformed() {
        let buf = encoded(&DataLayer::new(&[1, 2, 3], 0, 3));
        let decoded = DataLayer::decode(&buf[..buf.len() - 1], 0);
        assert!(decoded.is_malformed());

        let err = DataLayer::try_decode(&buf[..buf.len() - 1], 0).unwrap_err();
        assert_eq!(err, SacnError::TooShort { needed: 14, actual: 13 });
    }

    #[test]
    fn decode_truncated_header_is_malformed() {
        let buf = encoded(&DataLayer::new(&[1], 0, 1));
        assert!(DataLayer::decode(&buf[..5], 0).is_malformed());
    }

    // Hardened: the length field is checked against the rest of the buffer.
    #[test]
    fn decode_trailing_bytes_is_malformed() {
        let mut buf = encoded(&DataLayer::new(&[1, 2], 0, 2));
        buf.push(0);
        let err = DataLayer::try_decode(&buf, 0).unwrap_err();
        assert!(matches!(err, SacnError::LengthMismatch { .. }));
    }

    #[test]
    fn decode_count_disagreeing_with_length_is_malformed() {
        let mut buf = encoded(&DataLayer::new(&[1, 2], 0, 2));
        buf[9] = 2;
        let err = DataLayer::try_decode(&buf, 0).unwrap_err();
        assert_eq!(err, SacnError::InvalidPropertyValueCount { count: 2 });
    }

    #[test]
    fn validate_rejects_nonzero_start_code() {
        let mut layer = DataLayer::new(&[1], 0, 1);
        layer.property_values[0] = 0xCC;
        assert_eq!(
            layer.validate().unwrap_err(),
            SacnError::InvalidStartCode { value: 0xCC }
        );
    }
}
