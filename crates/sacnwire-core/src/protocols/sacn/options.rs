use bitflags::bitflags;

bitflags! {
    /// Framing layer options byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FramingOptions: u8 {
        /// Data is meant for visualisers, not live output.
        const PREVIEW_DATA = 0x80;
        /// Last packet of this source on this universe.
        const STREAM_TERMINATED = 0x40;
        const FORCE_SYNCHRONIZATION = 0x20;
    }
}

#[cfg(test)]
mod tests {
    use super::FramingOptions;

    #[test]
    fn unknown_bits_are_retained() {
        let options = FramingOptions::from_bits_retain(0x41);
        assert!(options.contains(FramingOptions::STREAM_TERMINATED));
        assert_eq!(options.bits(), 0x41);
    }
}
