use crate::bytes::ByteCursor;

impl<'i> ByteCursor<'i> {
    /// Reads an MQTT string: a two byte big-endian length prefix followed by
    /// that many bytes of UTF-8.
    ///
    /// A prefix claiming more bytes than remain, or bytes that are not valid
    /// UTF-8, fail without consuming anything. No replacement characters are
    /// ever substituted.
    pub fn read_string(&mut self) -> Option<&'i str> {
        let start = self.position();
        let Some(bytes) = self.read_binary_data() else {
            return None;
        };

        match std::str::from_utf8(bytes) {
            Ok(s) => Some(s),
            Err(_) => {
                self.reset_to(start);
                None
            }
        }
    }

    /// Reads two length-prefixed strings back to back, as used by the
    /// user-property pair. Fails atomically: a missing second string leaves
    /// the cursor before the first.
    pub fn read_string_pair(&mut self) -> Option<(&'i str, &'i str)> {
        let start = self.position();
        let first = self.read_string()?;
        let Some(second) = self.read_string() else {
            self.reset_to(start);
            return None;
        };

        Some((first, second))
    }
}
