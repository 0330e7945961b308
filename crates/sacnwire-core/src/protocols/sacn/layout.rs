use std::ops::Range;

// Layer sizes.
pub const ROOT_LAYER_SIZE: usize = 38;
pub const FRAMING_LAYER_SIZE: usize = 77;
pub const DATA_LAYER_HEADER_SIZE: usize = 10;

pub const ROOT_OFFSET: usize = 0;
pub const FRAMING_OFFSET: usize = ROOT_OFFSET + ROOT_LAYER_SIZE;
pub const DATA_OFFSET: usize = FRAMING_OFFSET + FRAMING_LAYER_SIZE;

pub const MIN_LEN: usize = ROOT_LAYER_SIZE + FRAMING_LAYER_SIZE + DATA_LAYER_HEADER_SIZE;

// Root layer, relative to the start of the layer.
pub const PREAMBLE_SIZE_RANGE: Range<usize> = 0..2;
pub const POSTAMBLE_SIZE_RANGE: Range<usize> = 2..4;
pub const ACN_PID_RANGE: Range<usize> = 4..16;
pub const ROOT_FLAGS_LENGTH_RANGE: Range<usize> = 16..18;
pub const ROOT_VECTOR_RANGE: Range<usize> = 18..22;
pub const CID_RANGE: Range<usize> = 22..38;

/// Root PDU bytes counted by the root length field before the framing layer.
pub const ROOT_PDU_SIZE: usize = ROOT_LAYER_SIZE - ROOT_FLAGS_LENGTH_RANGE.start;

// Framing layer, relative to the start of the layer.
pub const FRAMING_FLAGS_LENGTH_RANGE: Range<usize> = 0..2;
pub const FRAMING_VECTOR_RANGE: Range<usize> = 2..6;
pub const SOURCE_NAME_RANGE: Range<usize> = 6..70;
pub const PRIORITY_OFFSET: usize = 70;
pub const RESERVED_RANGE: Range<usize> = 71..73;
pub const SEQUENCE_OFFSET: usize = 73;
pub const OPTIONS_OFFSET: usize = 74;
pub const UNIVERSE_RANGE: Range<usize> = 75..77;

// Data (DMP) layer, relative to the start of the layer.
pub const DMP_FLAGS_LENGTH_RANGE: Range<usize> = 0..2;
pub const DMP_VECTOR_OFFSET: usize = 2;
pub const DMP_ADDRESS_TYPE_OFFSET: usize = 3;
pub const DMP_FIRST_ADDRESS_RANGE: Range<usize> = 4..6;
pub const DMP_ADDRESS_INCREMENT_RANGE: Range<usize> = 6..8;
pub const DMP_PROPERTY_VALUE_COUNT_RANGE: Range<usize> = 8..10;
pub const DMP_PROPERTY_VALUES_OFFSET: usize = DATA_LAYER_HEADER_SIZE;

// Absolute packet offsets used by the fast path.
pub const PACKET_SEQUENCE_OFFSET: usize = FRAMING_OFFSET + SEQUENCE_OFFSET;
pub const PACKET_START_CODE_OFFSET: usize = DATA_OFFSET + DMP_PROPERTY_VALUES_OFFSET;
pub const PACKET_SLOTS_OFFSET: usize = PACKET_START_CODE_OFFSET + 1;

pub const SOURCE_NAME_LEN: usize = SOURCE_NAME_RANGE.end - SOURCE_NAME_RANGE.start;
pub const ACN_PID_LEN: usize = ACN_PID_RANGE.end - ACN_PID_RANGE.start;
pub const CID_LEN: usize = CID_RANGE.end - CID_RANGE.start;

pub const ACN_PID: &[u8; 12] = b"ASC-E1.17\0\0\0";
pub const ACN_PID_STR: &str = "ASC-E1.17";
pub const PREAMBLE_SIZE: u16 = 0x0010;
pub const POSTAMBLE_SIZE: u16 = 0x0000;
pub const ROOT_VECTOR_DATA: u32 = 0x0000_0004;
pub const FRAMING_VECTOR_DMX: u32 = 0x0000_0002;
pub const DMP_VECTOR_SET_PROPERTY: u8 = 0x02;
pub const DMP_ADDRESS_TYPE: u8 = 0xA1;
pub const DMP_FIRST_ADDRESS: u16 = 0x0000;
pub const DMP_ADDRESS_INCREMENT: u16 = 0x0001;
pub const START_CODE_DMX: u8 = 0x00;

pub const FLAGS: u16 = 0x7000;
pub const LENGTH_MASK: u16 = 0x0FFF;

pub const DEFAULT_PRIORITY: u8 = 100;
pub const MAX_PRIORITY: u8 = 200;
pub const DMX_MAX_SLOTS: usize = 512;

pub const MIN_UNIVERSE: u16 = 1;
pub const MAX_UNIVERSE: u16 = 63999;
pub const SACN_PORT: u16 = 5568;
