//
//   This Source Code Form is subject to the terms of the Mozilla Public
//   License, v. 2.0. If a copy of the MPL was not distributed with this
//   file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

/// A borrowed byte sequence plus a read offset.
///
/// Every read either advances the offset by exactly the bytes it consumed,
/// or returns `None` and leaves the offset untouched. The offset never
/// exceeds the buffer length, so no read can index out of bounds no matter
/// what lengths the input claims.
#[derive(Debug)]
pub struct ByteCursor<'i> {
    buf: &'i [u8],
    offset: usize,
}

impl<'i> ByteCursor<'i> {
    pub fn new(buf: &'i [u8]) -> ByteCursor<'i> {
        ByteCursor { buf, offset: 0 }
    }

    /// Current read offset into the buffer.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.buf.len()
    }

    /// Everything not yet consumed.
    pub fn remaining(&self) -> &'i [u8] {
        &self.buf[self.offset..]
    }

    /// The next byte, without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.buf.get(self.offset).copied()
    }

    /// Rewinds to an offset previously obtained from [`ByteCursor::position`].
    pub(crate) fn reset_to(&mut self, offset: usize) {
        debug_assert!(offset <= self.offset);
        self.offset = offset;
    }

    /// Consumes exactly `count` bytes, or nothing.
    pub fn read_slice(&mut self, count: usize) -> Option<&'i [u8]> {
        let end = self.offset.checked_add(count)?;
        let slice = self.buf.get(self.offset..end)?;
        self.offset = end;
        Some(slice)
    }

    /// Reads MQTT binary data: a two byte big-endian length prefix followed
    /// by that many bytes. A prefix claiming more bytes than remain fails
    /// without consuming anything.
    pub fn read_binary_data(&mut self) -> Option<&'i [u8]> {
        let start = self.offset;
        let len = self.read_u16()?;
        match self.read_slice(usize::from(len)) {
            Some(data) => Some(data),
            None => {
                self.offset = start;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::bytes::ByteCursor;

    #[test]
    fn check_simple_binary_data() {
        let input = [0x0, 0x2, 0x61, 0xFF, 0x33];
        let mut cursor = ByteCursor::new(&input);

        assert_eq!(cursor.read_binary_data().unwrap(), &[0x61, 0xFF]);
        assert_eq!(cursor.position(), 4);
        assert_eq!(cursor.remaining(), &[0x33]);
    }

    #[test]
    fn check_binary_data_longer_than_buffer() {
        // Length prefix claims 10 bytes, only 2 are present
        let input = [0x0, 0x0A, 0x61, 0x62];
        let mut cursor = ByteCursor::new(&input);

        assert_eq!(cursor.read_binary_data(), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn check_read_slice_at_end() {
        let input = [0x1];
        let mut cursor = ByteCursor::new(&input);
        cursor.read_slice(1).unwrap();

        assert!(cursor.is_empty());
        assert_eq!(cursor.read_slice(1), None);
        assert_eq!(cursor.peek_u8(), None);
    }
}
