use std::{io::Write, marker::PhantomData};

use zerocopy::{BigEndian, byteorder};

use crate::{ByteOrder, Error, Result, TagID, cold_path};

/// Sequential primitive writer, the mirror of [`NbtReader`](crate::NbtReader).
pub struct NbtWriter<W, O: ByteOrder = BigEndian> {
    inner: W,
    _marker: PhantomData<O>,
}

macro_rules! write_number {
    ($($fn_name:ident => $type:ident: $ty:ty);* $(;)?) => {
        $(
            #[inline]
            pub fn $fn_name(&mut self, value: $ty) -> Result<()> {
                self.write_raw(&byteorder::$type::<O>::new(value).to_bytes())
            }
        )*
    };
}

impl<W: Write, O: ByteOrder> NbtWriter<W, O> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(Error::from)
    }

    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes).map_err(Error::from)
    }

    #[inline]
    pub fn write_tag_id(&mut self, id: TagID) -> Result<()> {
        self.write_raw(&[id as u8])
    }

    #[inline]
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_raw(&[value])
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) -> Result<()> {
        self.write_raw(&[value as u8])
    }

    write_number!(
        write_i16 => I16: i16;
        write_i32 => I32: i32;
        write_i64 => I64: i64;
        write_f32 => F32: f32;
        write_f64 => F64: f64;
    );

    /// Writes an `i32` length prefix.
    pub fn write_length(&mut self, what: &'static str, len: usize) -> Result<()> {
        let Ok(len32) = i32::try_from(len) else {
            cold_path();
            return Err(Error::TooLong { what, len });
        };
        self.write_i32(len32)
    }

    /// Writes an `i16` length-prefixed UTF-8 string.
    ///
    /// Strings longer than `i16::MAX` bytes are rejected rather than
    /// truncated.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let Ok(len) = i16::try_from(value.len()) else {
            cold_path();
            return Err(Error::StringTooLong(value.len()));
        };
        self.write_i16(len)?;
        self.write_raw(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use zerocopy::LittleEndian;

    use super::*;

    #[test]
    fn test_write_big_endian_numbers() {
        let mut writer = NbtWriter::<_, BigEndian>::new(Vec::new());
        writer.write_i16(0x0102).unwrap();
        writer.write_i32(-2).unwrap();
        writer.write_f32(1.0).unwrap();
        writer.write_i64(1).unwrap();
        assert_eq!(
            writer.into_inner(),
            [
                0x01, 0x02, 0xFF, 0xFF, 0xFF, 0xFE, 0x3F, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00,
                0x00, 0x00, 0x00, 0x00, 0x01
            ]
        );
    }

    #[test]
    fn test_write_little_endian_numbers() {
        let mut writer = NbtWriter::<_, LittleEndian>::new(Vec::new());
        writer.write_i32(42).unwrap();
        assert_eq!(writer.into_inner(), [0x2A, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_write_string() {
        let mut writer = NbtWriter::<_, BigEndian>::new(Vec::new());
        writer.write_string("héllo").unwrap();
        assert_eq!(
            writer.into_inner(),
            [0x00, 0x06, b'h', 0xC3, 0xA9, b'l', b'l', b'o']
        );
    }

    #[test]
    fn test_string_too_long() {
        let long = "x".repeat(i16::MAX as usize + 1);
        let mut writer = NbtWriter::<_, BigEndian>::new(Vec::new());
        assert!(matches!(
            writer.write_string(&long),
            Err(Error::StringTooLong(32768))
        ));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_longest_string_fits() {
        let long = "x".repeat(i16::MAX as usize);
        let mut writer = NbtWriter::<_, BigEndian>::new(Vec::new());
        writer.write_string(&long).unwrap();
        assert_eq!(writer.into_inner().len(), 2 + i16::MAX as usize);
    }
}
