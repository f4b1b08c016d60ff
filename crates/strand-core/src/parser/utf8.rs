//! UTF-8 carry for byte-oriented chunk sources
//!
//! Transports that hand over raw bytes can split a multi-byte character
//! across two chunks. The carry holds the incomplete trailing sequence until
//! the next chunk completes it.

/// Holds an incomplete trailing UTF-8 sequence between chunks
#[derive(Debug, Default, Clone)]
pub struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, keeping any incomplete trailing sequence for later.
    ///
    /// Invalid bytes in the interior are replaced with U+FFFD.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes = if self.pending.is_empty() {
            chunk.to_vec()
        } else {
            let mut combined = std::mem::take(&mut self.pending);
            combined.extend_from_slice(chunk);
            combined
        };

        // Fast path for complete UTF-8
        if let Ok(s) = std::str::from_utf8(&bytes) {
            return s.to_string();
        }

        let valid_end = incomplete_tail_start(&bytes);
        self.pending = bytes[valid_end..].to_vec();

        match std::str::from_utf8(&bytes[..valid_end]) {
            Ok(s) => s.to_string(),
            Err(e) => {
                tracing::warn!(
                    "Invalid UTF-8 at byte {} of chunk, replacing with U+FFFD",
                    e.valid_up_to()
                );
                String::from_utf8_lossy(&bytes[..valid_end]).into_owned()
            }
        }
    }

    /// Drain the carried bytes lossily, for end of stream
    pub fn flush(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        tracing::warn!(
            "Stream ended inside a UTF-8 sequence, dropping {} byte(s) as U+FFFD",
            self.pending.len()
        );
        let bytes = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Index where a trailing incomplete sequence starts, or `bytes.len()`
fn incomplete_tail_start(bytes: &[u8]) -> usize {
    for i in 1..=4.min(bytes.len()) {
        let pos = bytes.len() - i;
        let byte = bytes[pos];

        if !is_continuation_byte(byte) {
            if bytes.len() - pos < utf8_char_len(byte) {
                return pos;
            }
            break;
        }
    }
    bytes.len()
}

/// Check if a byte is a UTF-8 continuation byte (10xxxxxx)
#[inline]
fn is_continuation_byte(byte: u8) -> bool {
    (byte & 0b1100_0000) == 0b1000_0000
}

/// Expected length of a UTF-8 character from its first byte
#[inline]
fn utf8_char_len(first_byte: u8) -> usize {
    if first_byte & 0b1000_0000 == 0 {
        1
    } else if first_byte & 0b1110_0000 == 0b1100_0000 {
        2
    } else if first_byte & 0b1111_0000 == 0b1110_0000 {
        3
    } else if first_byte & 0b1111_1000 == 0b1111_0000 {
        4
    } else {
        1
    }
}
