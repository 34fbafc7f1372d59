use std::{io::Read, marker::PhantomData};

use zerocopy::{BigEndian, byteorder};

use crate::{ByteOrder, Error, Result, TagID, cold_path};

/// Sequential primitive reader over a byte stream.
///
/// Multi-byte values are decoded in byte order `O`, big-endian unless stated
/// otherwise. Truncated input is reported as [`Error::EndOfFile`].
pub struct NbtReader<R, O: ByteOrder = BigEndian> {
    inner: R,
    _marker: PhantomData<O>,
}

macro_rules! read_number {
    ($($fn_name:ident => $type:ident: $ty:ty, $size:expr);* $(;)?) => {
        $(
            #[inline]
            pub fn $fn_name(&mut self) -> Result<$ty> {
                let bytes = self.read_array::<$size>()?;
                Ok(byteorder::$type::<O>::from_bytes(bytes).get())
            }
        )*
    };
}

impl<R: Read, O: ByteOrder> NbtReader<R, O> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Reads one tag type byte.
    pub fn read_tag_id(&mut self) -> Result<TagID> {
        let [byte] = self.read_array::<1>()?;
        TagID::try_from(byte)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.read_u8()? as i8)
    }

    read_number!(
        read_i16 => I16: i16, 2;
        read_i32 => I32: i32, 4;
        read_i64 => I64: i64, 8;
        read_f32 => F32: f32, 4;
        read_f64 => F64: f64, 8;
    );

    /// Reads an `i32` length prefix, rejecting negative values.
    pub fn read_length(&mut self, what: &'static str) -> Result<usize> {
        let len = self.read_i32()?;
        if len < 0 {
            cold_path();
            return Err(Error::NegativeLength { what, len });
        }
        Ok(len as usize)
    }

    /// Reads exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if read != len {
            cold_path();
            return Err(Error::EndOfFile);
        }
        Ok(buf)
    }

    /// Reads an `i16` length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_i16()?;
        if len < 0 {
            cold_path();
            return Err(Error::NegativeLength {
                what: "string",
                len: len as i32,
            });
        }
        let bytes = self.read_bytes(len as usize)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }
}
