//! Container formats around an NBT document.
//!
//! Three containers are understood:
//!
//! - **None**: the raw document, starting with the Compound type byte `0x0A`.
//! - **GZip**: an RFC 1952 gzip stream, starting with `0x1F`.
//! - **ZLib**: a `0x78 0x01` header, a raw deflate body and a big-endian
//!   Adler32 trailer over the uncompressed document.
//!
//! The zlib trailer is written but not checked on read; corrupt deflate data
//! is still reported by the decompressor.

use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};

use flate2::{
    read::{DeflateDecoder, GzDecoder},
    write::{DeflateEncoder, GzEncoder},
};
use tracing::debug;

use crate::{Error, Result, TagID, cold_path};

const GZIP_MAGIC: u8 = 0x1F;
const ZLIB_MAGIC: u8 = 0x78;
const ZLIB_HEADER: [u8; 2] = [ZLIB_MAGIC, 0x01];

/// Container format selector for a single read or write call.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Compression {
    /// Pick the format from the first byte of the stream. Reading only, and
    /// only from seekable streams.
    #[default]
    AutoDetect,
    None,
    GZip,
    ZLib,
}

impl Compression {
    /// Maps the first byte of a stream onto its container format.
    pub fn from_magic(byte: u8) -> Result<Self> {
        match byte {
            b if b == TagID::Compound as u8 => Ok(Compression::None),
            GZIP_MAGIC => Ok(Compression::GZip),
            ZLIB_MAGIC => Ok(Compression::ZLib),
            other => {
                cold_path();
                Err(Error::UndetectableCompression(other))
            }
        }
    }

    /// Peeks at the first byte of `reader` and rewinds it.
    ///
    /// An empty stream fails with [`Error::EndOfFile`].
    pub fn detect<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let mut first = [0u8; 1];
        reader.read_exact(&mut first)?;
        reader.seek(SeekFrom::Current(-1))?;
        let compression = Compression::from_magic(first[0])?;
        debug!(?compression, "detected NBT container");
        Ok(compression)
    }
}

/// Peels the container off `reader` and hands the decompressed stream to `f`.
///
/// `compression` must already be resolved; `AutoDetect` is rejected.
pub(crate) fn decode<R: Read, T>(
    mut reader: R,
    compression: Compression,
    buffer_size: usize,
    f: impl FnOnce(&mut dyn Read) -> Result<T>,
) -> Result<T> {
    match compression {
        Compression::AutoDetect => {
            cold_path();
            Err(Error::InvalidCompression(compression))
        }
        Compression::None => f(&mut BufReader::with_capacity(buffer_size, reader)),
        Compression::GZip => f(&mut BufReader::with_capacity(
            buffer_size,
            GzDecoder::new(reader),
        )),
        Compression::ZLib => {
            let mut header = [0u8; 2];
            reader.read_exact(&mut header)?;
            if header[0] != ZLIB_MAGIC {
                cold_path();
                return Err(Error::InvalidZlibHeader(header[0]));
            }
            debug!("reading zlib body, Adler32 trailer is not verified");
            f(&mut BufReader::with_capacity(
                buffer_size,
                DeflateDecoder::new(reader),
            ))
        }
    }
}

/// Runs `f` against a stream that wraps `writer` in the requested container,
/// then flushes and closes every layer.
pub(crate) fn encode<W: Write>(
    mut writer: W,
    compression: Compression,
    level: u32,
    buffer_size: usize,
    f: impl FnOnce(&mut dyn Write) -> Result<()>,
) -> Result<()> {
    let level = flate2::Compression::new(level);
    match compression {
        Compression::AutoDetect => {
            cold_path();
            Err(Error::InvalidCompression(compression))
        }
        Compression::None => {
            let mut buffered = BufWriter::with_capacity(buffer_size, writer);
            f(&mut buffered)?;
            buffered.flush()?;
            Ok(())
        }
        Compression::GZip => {
            let mut encoder = GzEncoder::new(writer, level);
            {
                let mut buffered = BufWriter::with_capacity(buffer_size, &mut encoder);
                f(&mut buffered)?;
                buffered.flush()?;
            }
            encoder.finish()?.flush()?;
            Ok(())
        }
        Compression::ZLib => {
            writer.write_all(&ZLIB_HEADER)?;
            let mut encoder = DeflateEncoder::new(writer, level);
            let checksum = {
                let mut hashing = Adler32Writer::new(&mut encoder);
                {
                    let mut buffered = BufWriter::with_capacity(buffer_size, &mut hashing);
                    f(&mut buffered)?;
                    buffered.flush()?;
                }
                hashing.checksum()
            };
            let mut writer = encoder.finish()?;
            writer.write_all(&checksum.to_be_bytes())?;
            writer.flush()?;
            Ok(())
        }
    }
}

/// Pass-through writer that accumulates an Adler32 checksum of everything
/// written through it.
struct Adler32Writer<W> {
    inner: W,
    adler: adler2::Adler32,
}

impl<W: Write> Adler32Writer<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            adler: adler2::Adler32::new(),
        }
    }

    fn checksum(&self) -> u32 {
        self.adler.checksum()
    }
}

impl<W: Write> Write for Adler32Writer<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.adler.write_slice(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
