use std::fmt;

use crate::record::{Record, RecordType};
use crate::Image;

use super::GenerateError;

/// Line-address window established by an extension record.
const WINDOW: u64 = 0x1_0000;

/// Addressing architecture of the generated document. Controls the address
/// ceiling and which extension record re-bases the 64 KiB line window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Architecture {
    /// 20-bit segmented addressing, type-2 extension records.
    Segment20,
    /// 32-bit linear addressing, type-4 extension records.
    #[default]
    Linear32,
}

impl Architecture {
    /// Highest byte address the architecture can express.
    pub fn ceiling(self) -> u32 {
        match self {
            Self::Segment20 => 0xF_FFFF,
            Self::Linear32 => 0xFFFF_FFFF,
        }
    }

    /// Granularity mask applied to a section start when re-basing.
    fn base_mask(self) -> u32 {
        match self {
            Self::Segment20 => 0xF_0000,
            Self::Linear32 => 0xFFFF_0000,
        }
    }

    fn extension_record(self, base: u32) -> Record {
        match self {
            Self::Segment20 => Record::new(
                0,
                RecordType::ExtendedSegmentAddress,
                ((base >> 4) as u16).to_be_bytes().to_vec(),
            ),
            Self::Linear32 => Record::new(
                0,
                RecordType::ExtendedLinearAddress,
                ((base >> 16) as u16).to_be_bytes().to_vec(),
            ),
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Segment20 => "20-bit segment",
            Self::Linear32 => "32-bit linear",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSeparator {
    /// Platform default: CRLF on Windows, LF elsewhere.
    #[default]
    System,
    Lf,
    CrLf,
    Cr,
}

impl LineSeparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Payload bytes per data line, 1..=255.
    pub bytes_per_line: u8,
    pub architecture: Architecture,
    pub line_separator: LineSeparator,
    pub emit_end_of_file: bool,
    pub upper_case_hex: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            bytes_per_line: 16,
            architecture: Architecture::default(),
            line_separator: LineSeparator::default(),
            emit_end_of_file: true,
            upper_case_hex: true,
        }
    }
}

/// Generate the Intel HEX rendition of `image`.
///
/// Sections are emitted in image order. An extension record is written
/// whenever the next line's address falls outside the active 64 KiB window,
/// with the new base taken from the address masked to the architecture's
/// granularity; data lines never cross a window boundary, so a section
/// spanning one is split around an intervening extension record. The
/// address ceiling is validated up front and nothing is emitted on failure.
pub fn generate(image: &Image, options: &GeneratorOptions) -> Result<String, GenerateError> {
    if options.bytes_per_line == 0 {
        return Err(GenerateError::InvalidBytesPerLine);
    }

    let architecture = options.architecture;
    let ceiling = architecture.ceiling();
    for section in image.sections() {
        if !section.is_empty() && section.end_address() - 1 > ceiling as u64 {
            return Err(GenerateError::AddressRange {
                start: section.start_address,
                end: section.end_address() - 1,
                architecture,
                ceiling,
            });
        }
    }

    let upper = options.upper_case_hex;
    let bytes_per_line = options.bytes_per_line as usize;
    let mut lines: Vec<String> = Vec::new();
    let mut extension_base: u32 = 0;

    for section in image.sections() {
        let mut address = section.start_address as u64;
        let mut offset = 0;

        while offset < section.data.len() {
            if address < extension_base as u64 || address - extension_base as u64 >= WINDOW {
                extension_base = (address as u32) & architecture.base_mask();
                lines.push(architecture.extension_record(extension_base).encode(upper));
            }

            let line_address = (address - extension_base as u64) as u16;
            let window_remaining = (WINDOW - line_address as u64) as usize;
            let chunk_len = bytes_per_line
                .min(window_remaining)
                .min(section.data.len() - offset);

            let chunk = section.data[offset..offset + chunk_len].to_vec();
            lines.push(Record::new(line_address, RecordType::Data, chunk).encode(upper));

            offset += chunk_len;
            address += chunk_len as u64;
        }
    }

    if let Some(start_segment) = image.start_segment_address {
        lines.push(
            Record::new(
                0,
                RecordType::StartSegmentAddress,
                start_segment.to_be_bytes().to_vec(),
            )
            .encode(upper),
        );
    }
    if let Some(start_linear) = image.start_linear_address {
        lines.push(
            Record::new(
                0,
                RecordType::StartLinearAddress,
                start_linear.to_be_bytes().to_vec(),
            )
            .encode(upper),
        );
    }
    if options.emit_end_of_file {
        lines.push(Record::new(0, RecordType::EndOfFile, vec![]).encode(upper));
    }

    Ok(lines.join(options.line_separator.as_str()))
}
