use crate::error::{Error, Result};

/// Big-endian cursor over class-file bytes.
#[derive(Debug, Clone)]
pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(Error::UnexpectedEof)?;
        let slice = self.bytes.get(self.pos..end).ok_or(Error::UnexpectedEof)?;
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_u1(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub(crate) fn read_u2(&mut self) -> Result<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_u4(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub(crate) fn read_u8(&mut self) -> Result<u64> {
        let hi = self.read_u4()? as u64;
        let lo = self.read_u4()? as u64;
        Ok((hi << 32) | lo)
    }

    /// Split off the next `len` bytes as an independent reader.
    pub(crate) fn sub_reader(&mut self, len: usize) -> Result<Reader<'a>> {
        Ok(Reader::new(self.read_bytes(len)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_values() {
        let mut reader = Reader::new(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]);
        assert_eq!(reader.read_u1().unwrap(), 0x01);
        assert_eq!(reader.read_u2().unwrap(), 0x0203);
        assert_eq!(reader.read_u4().unwrap(), 0x0405_0607);
        assert!(reader.is_empty());
        assert_eq!(reader.read_u1(), Err(Error::UnexpectedEof));
    }

    #[test]
    fn sub_reader_is_bounded() {
        let mut reader = Reader::new(&[0xAA, 0xBB, 0xCC]);
        let mut sub = reader.sub_reader(2).unwrap();
        assert_eq!(sub.read_u2().unwrap(), 0xAABB);
        assert!(sub.is_empty());
        assert_eq!(reader.read_u1().unwrap(), 0xCC);
    }
}
