use std::fmt;

use thiserror::Error;

/// The six record types defined by the Intel HEX format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    Data = 0x00,
    EndOfFile = 0x01,
    ExtendedSegmentAddress = 0x02,
    StartSegmentAddress = 0x03,
    ExtendedLinearAddress = 0x04,
    StartLinearAddress = 0x05,
}

impl RecordType {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Self::Data),
            0x01 => Some(Self::EndOfFile),
            0x02 => Some(Self::ExtendedSegmentAddress),
            0x03 => Some(Self::StartSegmentAddress),
            0x04 => Some(Self::ExtendedLinearAddress),
            0x05 => Some(Self::StartLinearAddress),
            _ => None,
        }
    }
}

impl From<RecordType> for u8 {
    fn from(record_type: RecordType) -> Self {
        record_type as u8
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Data => "data",
            Self::EndOfFile => "end-of-file",
            Self::ExtendedSegmentAddress => "extended segment address",
            Self::StartSegmentAddress => "start segment address",
            Self::ExtendedLinearAddress => "extended linear address",
            Self::StartLinearAddress => "start linear address",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("line does not start with ':'")]
    MissingStartMarker,

    #[error("odd number of hex digits")]
    OddDigitCount,

    #[error("invalid hex digit {found:?} at offset {index}")]
    InvalidHexDigit { found: char, index: usize },

    #[error("record too short: {0} bytes")]
    TooShort(usize),

    #[error("declared payload length {declared} does not match actual {actual}")]
    LengthMismatch { declared: u8, actual: usize },

    #[error("checksum mismatch: expected {expected:02X}, got {actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },
}

/// One physical line of an Intel HEX document, between the ':' marker and
/// the checksum. The record type is kept as the raw byte so that unknown
/// types survive decoding; dispatch on known types happens in the stream
/// codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub address: u16,
    pub record_type: u8,
    pub data: Vec<u8>,
}

impl Record {
    pub fn new(address: u16, record_type: RecordType, data: Vec<u8>) -> Self {
        Self {
            address,
            record_type: record_type.into(),
            data,
        }
    }

    /// Decode one `:LLAAAATT[DD...]CC` line. Surrounding whitespace is
    /// tolerated; everything else is checked.
    pub fn decode(line: &str) -> Result<Self, RecordError> {
        let line = line.trim();
        let hex_str = line.strip_prefix(':').ok_or(RecordError::MissingStartMarker)?;

        let bytes = hex::decode(hex_str).map_err(|e| match e {
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                RecordError::OddDigitCount
            }
            hex::FromHexError::InvalidHexCharacter { c, index } => RecordError::InvalidHexDigit {
                found: c,
                index,
            },
        })?;

        // length byte + 2 address bytes + type byte + checksum byte
        if bytes.len() < 5 {
            return Err(RecordError::TooShort(bytes.len()));
        }

        let declared = bytes[0];
        if bytes.len() != declared as usize + 5 {
            return Err(RecordError::LengthMismatch {
                declared,
                actual: bytes.len() - 5,
            });
        }

        let address = u16::from_be_bytes([bytes[1], bytes[2]]);
        let record_type = bytes[3];
        let data = bytes[4..4 + declared as usize].to_vec();

        let expected = checksum(declared, address, record_type, &data);
        let actual = bytes[bytes.len() - 1];
        if expected != actual {
            return Err(RecordError::ChecksumMismatch { expected, actual });
        }

        Ok(Self {
            address,
            record_type,
            data,
        })
    }

    /// Render the record as one line, without a terminator. The caller
    /// guarantees the payload fits the single length byte.
    pub fn encode(&self, upper_case: bool) -> String {
        debug_assert!(self.data.len() <= 0xFF, "record payload exceeds 255 bytes");

        let mut bytes = Vec::with_capacity(self.data.len() + 5);
        bytes.push(self.data.len() as u8);
        bytes.extend_from_slice(&self.address.to_be_bytes());
        bytes.push(self.record_type);
        bytes.extend_from_slice(&self.data);
        bytes.push(checksum(
            self.data.len() as u8,
            self.address,
            self.record_type,
            &self.data,
        ));

        let mut line = String::with_capacity(1 + bytes.len() * 2);
        line.push(':');
        if upper_case {
            line.push_str(&hex::encode_upper(&bytes));
        } else {
            line.push_str(&hex::encode(&bytes));
        }
        line
    }
}

/// Two's complement of the mod-256 sum over length, address, type and
/// payload bytes.
fn checksum(length: u8, address: u16, record_type: u8, data: &[u8]) -> u8 {
    let [addr_hi, addr_lo] = address.to_be_bytes();
    let sum = data.iter().fold(
        length
            .wrapping_add(addr_hi)
            .wrapping_add(addr_lo)
            .wrapping_add(record_type),
        |acc, &b| acc.wrapping_add(b),
    );
    sum.wrapping_neg()
}
