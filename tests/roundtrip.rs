use hexmem::{
    Architecture, GeneratorOptions, Image, LineSeparator, ParseError, RecordError, Section,
    generate, parse,
};

fn lf_options() -> GeneratorOptions {
    GeneratorOptions {
        line_separator: LineSeparator::Lf,
        ..GeneratorOptions::default()
    }
}

fn sorted_sections(image: &Image) -> Vec<Section> {
    let mut sections = image.sections().to_vec();
    sections.sort_by_key(|s| s.start_address);
    sections
}

#[test]
fn round_trip_linear_image() {
    let mut image = Image::with_sections(vec![
        Section::new(0x0800_0000, (0..200u8).collect()),
        Section::new(0x0806_0000, vec![0x55; 33]),
        Section::new(0xE26A, vec![0xA5; 7]),
    ]);
    image.start_linear_address = Some(0x0800_8879);

    let text = generate(&image, &lf_options()).unwrap();
    let parsed = parse(&text).unwrap();

    assert_eq!(sorted_sections(&parsed), sorted_sections(&image));
    assert_eq!(parsed.start_linear_address, Some(0x0800_8879));
    assert_eq!(parsed.start_segment_address, None);
}

#[test]
fn round_trip_segment_image() {
    let mut image = Image::with_sections(vec![
        Section::new(0x1_F000, vec![0x42; 100]),
        Section::new(0x0040, vec![0x24; 16]),
    ]);
    image.start_segment_address = Some(0x1000_F000);

    let text = generate(
        &image,
        &GeneratorOptions {
            architecture: Architecture::Segment20,
            ..lf_options()
        },
    )
    .unwrap();
    let parsed = parse(&text).unwrap();

    assert_eq!(sorted_sections(&parsed), sorted_sections(&image));
    assert_eq!(parsed.start_segment_address, Some(0x1000_F000));
}

#[test]
fn round_trip_window_straddling_section() {
    let image = Image::with_sections(vec![Section::new(0xFFF0, (0..64u8).collect())]);

    let text = generate(&image, &lf_options()).unwrap();
    // The section crosses 0x10000, so an extension record splits the data
    // lines; payload lengths still sum to the original span.
    assert!(text.contains(":020000040001F9"));
    let data_bytes: usize = text
        .lines()
        .map(|l| hexmem::Record::decode(l).unwrap())
        .filter(|r| r.record_type == hexmem::RecordType::Data as u8)
        .map(|r| r.data.len())
        .sum();
    assert_eq!(data_bytes, 64);

    let parsed = parse(&text).unwrap();
    assert_eq!(parsed.sections().len(), 1);
    assert_eq!(parsed.sections()[0].start_address, 0xFFF0);
    assert_eq!(parsed.sections()[0].len(), 64);
}

#[test]
fn round_trip_respects_bytes_per_line() {
    let image = Image::with_sections(vec![Section::new(0, (0..255u8).collect())]);

    for bytes_per_line in [1u8, 8, 16, 255] {
        let text = generate(
            &image,
            &GeneratorOptions {
                bytes_per_line,
                ..lf_options()
            },
        )
        .unwrap();
        for line in text.lines() {
            let record = hexmem::Record::decode(line).unwrap();
            assert!(record.data.len() <= bytes_per_line as usize);
        }
        assert_eq!(parse(&text).unwrap().sections(), image.sections());
    }
}

#[test]
fn parse_whole_document_with_crlf_and_blank_lines() {
    let text = ":10010000214601360121470136007EFE09D2190140\r\n\
                \r\n\
                :100110002146017E17C20001FF5F16002148011928\r\n\
                :00000001FF\r\n";
    let image = parse(text).unwrap();
    assert_eq!(image.sections().len(), 1);
    assert_eq!(image.sections()[0].start_address, 0x0100);
    assert_eq!(image.sections()[0].len(), 32);
}

#[test]
fn parse_failure_identifies_line() {
    // Line 2 (0-based) has a flipped checksum bit.
    let text = ":0100000041BE\n\
                :0101000042BC\n\
                :0102000043B9\n\
                :00000001FF";
    let err = parse(text).unwrap_err();
    assert_eq!(err.line(), 2);
    assert!(matches!(
        err,
        ParseError::Record {
            source: RecordError::ChecksumMismatch { .. },
            ..
        }
    ));
}

#[test]
fn generated_document_has_no_trailing_separator() {
    let image = Image::with_sections(vec![Section::new(0, vec![0x01])]);
    let text = generate(&image, &lf_options()).unwrap();
    assert!(!text.ends_with('\n'));
    assert!(text.ends_with(":00000001FF"));
}
