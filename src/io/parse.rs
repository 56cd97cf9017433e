use crate::record::{Record, RecordType};
use crate::{Image, Section};

use super::ParseError;

/// Parse an Intel HEX document into a memory image.
///
/// Blank lines are skipped and everything after an end-of-file record is
/// ignored, as is any record with an unrecognized type byte (the format
/// reserves room for vendor extensions, so unknown types are deliberately
/// not an error). A missing end-of-file record is tolerated. Adjacent data
/// records are coalesced into maximal contiguous sections once the whole
/// document has been read.
pub fn parse(text: &str) -> Result<Image, ParseError> {
    let mut image = Image::new();
    let mut base_address: u32 = 0;
    let mut eof_seen = false;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || eof_seen {
            continue;
        }

        let record = Record::decode(line).map_err(|source| ParseError::Record {
            line: index,
            source,
        })?;

        match RecordType::from_byte(record.record_type) {
            Some(RecordType::Data) => {
                // Base is at most 0xFFFF_0000 (linear) or 0xF_FFF0 (segment)
                // and the line address at most 0xFFFF, so this cannot wrap.
                let address = base_address + record.address as u32;
                image.push_section(Section::new(address, record.data));
            }
            Some(RecordType::EndOfFile) => {
                eof_seen = true;
            }
            Some(record_type @ RecordType::ExtendedSegmentAddress) => {
                let payload = control_payload::<2>(&record, index, record_type)?;
                base_address = (u16::from_be_bytes(payload) as u32) << 4;
            }
            Some(record_type @ RecordType::ExtendedLinearAddress) => {
                let payload = control_payload::<2>(&record, index, record_type)?;
                base_address = (u16::from_be_bytes(payload) as u32) << 16;
            }
            Some(record_type @ RecordType::StartSegmentAddress) => {
                let payload = control_payload::<4>(&record, index, record_type)?;
                image.start_segment_address = Some(u32::from_be_bytes(payload));
            }
            Some(record_type @ RecordType::StartLinearAddress) => {
                let payload = control_payload::<4>(&record, index, record_type)?;
                image.start_linear_address = Some(u32::from_be_bytes(payload));
            }
            None => {}
        }
    }

    image.merge_sections();
    Ok(image)
}

fn control_payload<const N: usize>(
    record: &Record,
    line: usize,
    record_type: RecordType,
) -> Result<[u8; N], ParseError> {
    record
        .data
        .as_slice()
        .try_into()
        .map_err(|_| ParseError::RecordLength {
            line,
            record_type,
            expected: N,
            actual: record.data.len(),
        })
}
