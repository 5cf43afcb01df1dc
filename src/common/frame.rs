// src/common/frame.rs

use super::types::LogicLevel;

/// Number of data bits per character frame.
pub const DATA_BITS: u8 = 8;

/// Total bits on the wire per frame: 1 start + 8 data + 1 stop.
pub const FRAME_BITS: u32 = 10;

/// Level of the start bit. A high-to-low transition out of the idle/stop
/// level marks the beginning of a frame.
pub const START_LEVEL: LogicLevel = LogicLevel::Low;

/// Level of the stop bit, which is also the idle level between frames.
pub const STOP_LEVEL: LogicLevel = LogicLevel::High;

/// Extracts data bit `index` (0 = LSB, transmitted first) of `byte` as a
/// channel level.
pub fn data_bit(byte: u8, index: u8) -> LogicLevel {
    LogicLevel::from(byte & (1 << index) != 0)
}

/// Returns `byte` with data bit `index` set according to a sampled level.
///
/// Decoding reconstructs a byte by OR-ing sampled bits into ascending
/// positions, so a low sample leaves the (initially zero) bit untouched.
pub fn with_data_bit(byte: u8, index: u8, level: LogicLevel) -> u8 {
    if level.is_high() {
        byte | (1 << index)
    } else {
        byte
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lsb_first_bit_order() {
        // 0x01 drives only position 0 high...
        for index in 0..DATA_BITS {
            let expected = LogicLevel::from(index == 0);
            assert_eq!(data_bit(0x01, index), expected, "0x01 bit {}", index);
        }
        // ...and 0x80 only position 7.
        for index in 0..DATA_BITS {
            let expected = LogicLevel::from(index == 7);
            assert_eq!(data_bit(0x80, index), expected, "0x80 bit {}", index);
        }
    }

    #[test]
    fn test_extract_insert_round_trip() {
        // 'H' = 0x48 = 0b01001000, transmitted LSB first as 0 0 0 1 0 0 1 0.
        let mut rebuilt = 0u8;
        for index in 0..DATA_BITS {
            rebuilt = with_data_bit(rebuilt, index, data_bit(b'H', index));
        }
        assert_eq!(rebuilt, b'H');
    }

    #[test]
    fn test_low_sample_leaves_bit_clear() {
        assert_eq!(with_data_bit(0, 3, LogicLevel::Low), 0);
        assert_eq!(with_data_bit(0, 3, LogicLevel::High), 0b0000_1000);
    }
}
