//! Compression codec detection for tar streams.
//!
//! The tar extractor never trusts the file suffix for compression: the first
//! bytes of the file decide which decoder wraps the stream.
//!
//! # Supported Codecs
//!
//! - **Gzip**: `1F 8B`
//! - **Bzip2**: `BZh`
//! - **Xz**: `FD 37 7A 58 5A 00`
//! - **Zstd**: `28 B5 2F FD`

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use crate::Result;

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

/// Number of leading bytes needed to recognise every codec.
const SNIFF_LEN: usize = 6;

/// Compression codec wrapped around a tar stream.
///
/// # Examples
///
/// ```
/// use flib_core::formats::compression::CompressionCodec;
///
/// assert_eq!(CompressionCodec::sniff(&[0x1F, 0x8B, 0x08]), Some(CompressionCodec::Gzip));
/// assert_eq!(CompressionCodec::sniff(b"plain tar"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,

    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,

    /// Xz compression (LZMA2 algorithm).
    Xz,

    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

impl CompressionCodec {
    /// Identifies a codec from the leading bytes of a file.
    ///
    /// Returns `None` when no known signature is present, which the tar
    /// extractor treats as an uncompressed archive.
    #[must_use]
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if header.starts_with(GZIP_MAGIC) {
            Some(Self::Gzip)
        } else if header.starts_with(XZ_MAGIC) {
            Some(Self::Xz)
        } else if header.starts_with(ZSTD_MAGIC) {
            Some(Self::Zstd)
        } else if header.starts_with(BZIP2_MAGIC) {
            Some(Self::Bzip2)
        } else {
            None
        }
    }

    /// Reads the leading bytes of `file` and rewinds it.
    pub fn detect(file: &mut File) -> Result<Option<Self>> {
        let mut header = [0u8; SNIFF_LEN];
        let mut filled = 0;
        while filled < SNIFF_LEN {
            let read = file.read(&mut header[filled..])?;
            if read == 0 {
                break;
            }
            filled += read;
        }
        file.seek(SeekFrom::Start(0))?;
        Ok(Self::sniff(&header[..filled]))
    }

    /// Wraps `file` in the decoder for `codec`, or a plain buffered reader
    /// when uncompressed.
    #[must_use]
    pub fn decoder(codec: Option<Self>, file: File) -> Box<dyn Read> {
        let reader = BufReader::new(file);
        match codec {
            Some(Self::Gzip) => Box::new(flate2::read::MultiGzDecoder::new(reader)),
            Some(Self::Bzip2) => Box::new(bzip2::read::MultiBzDecoder::new(reader)),
            Some(Self::Xz) => Box::new(xz2::read::XzDecoder::new_multi_decoder(reader)),
            Some(Self::Zstd) => match zstd::stream::read::Decoder::with_buffer(reader) {
                Ok(decoder) => Box::new(decoder),
                Err(err) => Box::new(FailingReader(Some(err))),
            },
            None => Box::new(reader),
        }
    }

    /// Returns a human-readable name for this codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use flib_core::formats::compression::CompressionCodec;
    ///
    /// assert_eq!(CompressionCodec::Gzip.name(), "gzip");
    /// assert_eq!(CompressionCodec::Bzip2.name(), "bzip2");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }
}

/// Reader that reports a decoder setup failure on first read.
struct FailingReader(Option<std::io::Error>);

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(self
            .0
            .take()
            .unwrap_or_else(|| std::io::Error::other("zstd decoder unavailable")))
    }
}
