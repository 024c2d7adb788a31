/// Append-only byte sink that packed values are written into
///
/// Writes never fail, so every `push_*` method returns the number of bytes
/// appended rather than a `Result`. Summing those counts across an
/// [`Encode::write_to`](super::Encode::write_to) call yields the width of
/// the encoding, which is how [`ByteCounter`] measures a value without
/// allocating.
pub trait Target {
    /// Hints that `extra` more bytes are about to be written.
    fn anticipate(&mut self, extra: usize);

    /// Returns a new, empty sink.
    fn create() -> Self;

    /// Appends one byte and returns `1`.
    fn push_one(&mut self, b: u8) -> usize;

    /// Appends a fixed-width array, such as a big-endian length prefix, and
    /// returns `N`.
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize;

    /// Appends a slice and returns its length.
    fn push_all(&mut self, buf: &[u8]) -> usize;
}

/// Sink that discards its input, used to compute encoded widths
pub type ByteCounter = std::io::Sink;

impl Target for ByteCounter {
    #[inline(always)]
    fn anticipate(&mut self, _: usize) {}

    #[inline]
    fn create() -> Self {
        std::io::sink()
    }

    #[inline(always)]
    fn push_one(&mut self, _: u8) -> usize {
        1
    }

    #[inline(always)]
    fn push_many<const N: usize>(&mut self, _: [u8; N]) -> usize {
        N
    }

    #[inline(always)]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        buf.len()
    }
}

impl Target for Vec<u8> {
    #[inline]
    fn anticipate(&mut self, extra: usize) {
        self.reserve(extra)
    }

    #[inline]
    fn create() -> Self {
        Self::new()
    }

    #[inline]
    fn push_one(&mut self, b: u8) -> usize {
        self.push(b);
        1
    }

    #[inline]
    fn push_many<const N: usize>(&mut self, arr: [u8; N]) -> usize {
        self.extend_from_slice(&arr);
        N
    }

    #[inline]
    fn push_all(&mut self, buf: &[u8]) -> usize {
        self.extend_from_slice(buf);
        buf.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn write_header<U: Target>(buf: &mut U, len: u32) -> usize {
        buf.push_one(0x05) + buf.push_one(0x01) + buf.push_many(len.to_be_bytes())
    }

    #[test]
    fn counter_agrees_with_vec() {
        let mut counter = ByteCounter::create();
        let mut vec = Vec::<u8>::create();
        assert_eq!(write_header(&mut counter, 3), 6);
        assert_eq!(write_header(&mut vec, 3), 6);
        assert_eq!(vec.push_all(b"abc"), 3);
        assert_eq!(vec, hex::decode("050100000003616263").unwrap());
    }
}
