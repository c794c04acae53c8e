//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use crate::bytes::ByteCursor;

impl<'i> ByteCursor<'i> {
    pub fn read_u8(&mut self) -> Option<u8> {
        let bytes = self.read_slice(1)?;
        Some(bytes[0])
    }

    pub fn read_u16(&mut self) -> Option<u16> {
        let bytes = self.read_slice(2)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.read_slice(4)?;
        Some(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads an MQTT variable byte integer.
    ///
    /// Each byte contributes seven bits of payload, the high bit marks a
    /// continuation. At most four bytes are consumed; a continuation bit on
    /// the fourth byte or a truncated sequence fails without consuming
    /// anything.
    pub fn read_variable_u32(&mut self) -> Option<u32> {
        let start = self.position();
        let mut value: u32 = 0;
        let mut multiplier: u32 = 1;

        for consumed in 1..=4 {
            let Some(byte) = self.read_u8() else {
                self.reset_to(start);
                return None;
            };

            value += u32::from(byte & 0b0111_1111) * multiplier;

            if byte & 0b1000_0000 == 0 {
                return Some(value);
            }
            if consumed == 4 {
                break;
            }
            multiplier *= 128;
        }

        self.reset_to(start);
        None
    }
}

/// Appends the MQTT variable byte integer encoding of `value`.
///
/// Values above `268_435_455` do not fit in four bytes and are refused.
pub fn encode_variable_u32(value: u32, out: &mut Vec<u8>) -> Option<()> {
    if value > 268_435_455 {
        return None;
    }

    let mut rest = value;
    loop {
        let mut byte = (rest % 128) as u8;
        rest /= 128;
        if rest > 0 {
            byte |= 0b1000_0000;
        }
        out.push(byte);
        if rest == 0 {
            return Some(());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::bytes::ByteCursor;
    use crate::integers::encode_variable_u32;

    #[test]
    fn check_integer_parsing() {
        let input = 15u16.to_be_bytes();
        assert_eq!(ByteCursor::new(&input).read_u16().unwrap(), 15);

        let input = 42u32.to_be_bytes();
        assert_eq!(ByteCursor::new(&input).read_u32().unwrap(), 42);

        let input = [0x12, 0x34];
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn check_integer_bounds() {
        for width in [1usize, 2, 4] {
            for len in 0..width {
                let buf = vec![0u8; len];
                let mut cursor = ByteCursor::new(&buf);
                let result = match width {
                    1 => cursor.read_u8().map(u32::from),
                    2 => cursor.read_u16().map(u32::from),
                    _ => cursor.read_u32(),
                };
                assert_eq!(result, None);
                assert_eq!(cursor.position(), 0);
            }
        }
    }

    #[test]
    fn check_variable_integers() {
        let input = [0x0];
        assert_eq!(ByteCursor::new(&input).read_variable_u32().unwrap(), 0);

        let input = [0x7F];
        assert_eq!(ByteCursor::new(&input).read_variable_u32().unwrap(), 127);

        let input = [0x80, 0x01];
        assert_eq!(ByteCursor::new(&input).read_variable_u32().unwrap(), 128);

        let input = [0xFF, 0x7F];
        assert_eq!(ByteCursor::new(&input).read_variable_u32().unwrap(), 16_383);

        let input = [0x80, 0x80, 0x01];
        assert_eq!(ByteCursor::new(&input).read_variable_u32().unwrap(), 16_384);

        let input = [0xFF, 0xFF, 0x7F];
        assert_eq!(
            ByteCursor::new(&input).read_variable_u32().unwrap(),
            2_097_151
        );

        let input = [0x80, 0x80, 0x80, 0x01];
        assert_eq!(
            ByteCursor::new(&input).read_variable_u32().unwrap(),
            2_097_152
        );

        let input = [0xFF, 0xFF, 0xFF, 0x7F];
        assert_eq!(
            ByteCursor::new(&input).read_variable_u32().unwrap(),
            268_435_455
        );
    }

    #[test]
    fn check_variable_integer_with_unterminated_fourth_byte() {
        let input = [0xFF, 0xFF, 0xFF, 0x8F];
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_variable_u32(), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn check_truncated_variable_integer() {
        let input = [0xFF, 0xFF];
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_variable_u32(), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn check_variable_integer_round_trip() {
        for value in [
            0u32,
            1,
            127,
            128,
            16_383,
            16_384,
            2_097_151,
            2_097_152,
            268_435_455,
        ] {
            let mut encoded = Vec::new();
            encode_variable_u32(value, &mut encoded).unwrap();
            assert!(encoded.len() <= 4);
            assert_eq!(
                ByteCursor::new(&encoded).read_variable_u32().unwrap(),
                value
            );
        }

        assert_eq!(encode_variable_u32(268_435_456, &mut Vec::new()), None);
    }
}
