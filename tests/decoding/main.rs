use heightmap_chunks::{
    encode, DecodeError, DecodeOptions, EncodeOptions, Filter, FormatError, Heightmap,
    ImageHeader, PaddedHeightField, PixelFormat, TileConfig, UnsupportedFormatError, Vertex,
};
use miniz_oxide::deflate::compress_to_vec_zlib;

const SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

// CRCs are left zeroed; the decoder only checks them when asked to.
fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut bytes = (data.len() as u32).to_be_bytes().to_vec();
    bytes.extend(chunk_type);
    bytes.extend(data);
    bytes.extend([0; 4]);
    bytes
}

fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
    let mut data = width.to_be_bytes().to_vec();
    data.extend(height.to_be_bytes());
    data.extend([bit_depth, color_type, 0, 0, 0]);
    chunk(b"IHDR", &data)
}

fn png(chunks: &[Vec<u8>]) -> Vec<u8> {
    [SIGNATURE.to_vec(), chunks.concat()].concat()
}

fn gray8(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    let header = ImageHeader::new(width, height, PixelFormat::Gray8);
    encode(&header, pixels, &EncodeOptions::default()).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "{actual} is not close to {expected}"
    );
}

#[test]
fn two_by_two_greyscale_end_to_end() {
    let heightmap = Heightmap::from_bytes(&gray8(2, 2, &[0, 128, 255, 64])).unwrap();
    assert_eq!(heightmap.header, ImageHeader::new(2, 2, PixelFormat::Gray8));
    assert_eq!(heightmap.field.width(), 2);
    assert_eq!(heightmap.field.height(), 2);

    let config = TileConfig::new(2, 10.0, 100.0).unwrap();
    let padded = PaddedHeightField::new(&heightmap.field, config.chunk_size);
    let tiles = padded.tiles(&config.scale);
    assert_eq!(tiles.len(), 1);
    let tile = &tiles[0];
    assert_eq!((tile.cx, tile.cz), (0, 0));

    let expected = [
        (0.0, 0.0, 0.0),
        (5.0, 50.196, 0.0),
        (0.0, 100.0, 5.0),
        (5.0, 25.098, 5.0),
    ];
    assert_eq!(tile.vertices.len(), expected.len());
    for (Vertex { x, y, z }, (ex, ey, ez)) in tile.vertices.iter().zip(expected) {
        assert_close(*x, ex);
        assert_close(*y, ey);
        assert_close(*z, ez);
    }
}

#[test]
fn every_filter_decodes_to_the_source_pixels() {
    let pixels: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(73)).collect();
    for filter in Filter::ALL {
        let header = ImageHeader::new(4, 4, PixelFormat::Gray8);
        let options = EncodeOptions {
            filters: vec![filter],
            ..Default::default()
        };
        let bytes = encode(&header, &pixels, &options).unwrap();
        let heightmap = Heightmap::from_bytes(&bytes).unwrap();
        let decoded: Vec<u8> = heightmap
            .field
            .values()
            .iter()
            .map(|v| (v * 255.0).round() as u8)
            .collect();
        assert_eq!(decoded, pixels, "{filter:?}");
    }
}

#[test]
fn wide_formats_with_mixed_filters() {
    let options = EncodeOptions {
        filters: Filter::ALL.to_vec(),
        max_idat_len: 7,
    };

    // 3x5 16-bit greyscale: sample (x, y) = 1000 * (y * 3 + x)
    let header = ImageHeader::new(3, 5, PixelFormat::Gray16);
    let pixels: Vec<u8> = (0..15u16).flat_map(|i| (i * 1000).to_be_bytes()).collect();
    let heightmap = Heightmap::from_bytes(&encode(&header, &pixels, &options).unwrap()).unwrap();
    for (i, v) in heightmap.field.values().iter().enumerate() {
        assert_close(f64::from(*v), i as f64 * 1000.0 / 65535.0);
    }

    // 2x5 RGBA: grey pixels with varying alpha
    let header = ImageHeader::new(2, 5, PixelFormat::Rgba8);
    let pixels: Vec<u8> = (0..10u8).flat_map(|i| [i * 20, i * 20, i * 20, 255 - i]).collect();
    let heightmap = Heightmap::from_bytes(&encode(&header, &pixels, &options).unwrap()).unwrap();
    for (i, v) in heightmap.field.values().iter().enumerate() {
        assert_close(f64::from(*v), i as f64 * 20.0 / 255.0);
    }

    // 2x2 16-bit RGBA: pure red, green, blue and white
    let header = ImageHeader::new(2, 2, PixelFormat::Rgba16);
    let pixels: Vec<u8> = [
        [0xffff, 0, 0, 0],
        [0, 0xffff, 0, 0],
        [0, 0, 0xffff, 0],
        [0xffff, 0xffff, 0xffff, 0xffff],
    ]
    .iter()
    .flatten()
    .flat_map(|c: &u16| c.to_be_bytes())
    .collect();
    let heightmap = Heightmap::from_bytes(&encode(&header, &pixels, &options).unwrap()).unwrap();
    let values = heightmap.field.values();
    for (v, e) in values.iter().zip([0.299, 0.587, 0.114, 1.0]) {
        assert_close(f64::from(*v), e);
    }
    assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn rejects_files_without_signature() {
    assert_eq!(
        Heightmap::from_bytes(b"definitely not a png"),
        Err(DecodeError::Format(FormatError::MissingSignature))
    );
    assert_eq!(
        Heightmap::from_bytes(&[]),
        Err(DecodeError::Format(FormatError::MissingSignature))
    );
}

#[test]
fn rejects_unsupported_formats() {
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 0], 6));
    let bytes = png(&[ihdr(1, 1, 4, 0), idat.clone(), chunk(b"IEND", &[])]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Unsupported(UnsupportedFormatError::BitDepth(4)))
    );

    let bytes = png(&[ihdr(1, 1, 8, 3), idat, chunk(b"IEND", &[])]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Unsupported(UnsupportedFormatError::ColorType(3)))
    );
}

#[test]
fn image_data_needs_a_header_first() {
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 7], 6));
    let bytes = png(&[idat.clone(), ihdr(1, 1, 8, 0), chunk(b"IEND", &[])]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Format(FormatError::MissingHeader))
    );

    let bytes = png(&[ihdr(1, 1, 8, 0), chunk(b"IEND", &[])]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Format(FormatError::MissingImageData))
    );
}

#[test]
fn first_header_wins_and_unknown_chunks_are_skipped() {
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 51], 6));
    let bytes = png(&[
        ihdr(1, 1, 8, 0),
        chunk(b"tEXt", b"Comment\0made by hand"),
        ihdr(9, 9, 4, 3),
        idat,
        chunk(b"IEND", &[]),
    ]);
    let heightmap = Heightmap::from_bytes(&bytes).unwrap();
    assert_eq!(heightmap.header, ImageHeader::new(1, 1, PixelFormat::Gray8));
    assert_eq!(heightmap.field.values(), [0.2]);
}

#[test]
fn image_data_may_span_many_chunks() {
    let compressed = compress_to_vec_zlib(&[0, 10, 20, 2, 5, 5], 6);
    let mut chunks = vec![ihdr(2, 2, 8, 0)];
    chunks.extend(compressed.chunks(3).map(|data| chunk(b"IDAT", data)));
    let heightmap = Heightmap::from_bytes(&png(&chunks)).unwrap();
    let decoded: Vec<u8> = heightmap
        .field
        .values()
        .iter()
        .map(|v| (v * 255.0).round() as u8)
        .collect();
    assert_eq!(decoded, [10, 20, 15, 25]);
}

#[test]
fn rejects_bad_filter_bytes() {
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 1, 9, 2], 6));
    let bytes = png(&[ihdr(1, 2, 8, 0), idat]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Format(FormatError::InvalidFilter {
            row: 1,
            filter: 9
        }))
    );
}

#[test]
fn rejects_short_image_data() {
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 1, 2, 0], 6));
    let bytes = png(&[ihdr(2, 2, 8, 0), idat]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Format(FormatError::TruncatedImageData {
            row: 1,
            expected: 6,
            actual: 4
        }))
    );
}

#[test]
fn huge_headers_with_little_data_are_truncated() {
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&[0, 0], 6));
    let bytes = png(&[ihdr(u32::MAX, u32::MAX, 8, 0), idat.clone()]);
    assert!(matches!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Format(FormatError::TruncatedImageData {
            row: 0,
            actual: 2,
            ..
        }))
    ));

    let bytes = png(&[ihdr(65536, 65536, 8, 0), idat]);
    assert_eq!(
        Heightmap::from_bytes(&bytes),
        Err(DecodeError::Format(FormatError::TruncatedImageData {
            row: 0,
            expected: 65537 * 65536,
            actual: 2
        }))
    );
}

#[test]
fn image_data_past_the_last_row_is_dropped() {
    // 1x2 image followed by a megabyte of extra zeros
    let mut data = vec![0, 51, 0, 102];
    data.resize(1 << 20, 0);
    let idat = chunk(b"IDAT", &compress_to_vec_zlib(&data, 9));
    let heightmap = Heightmap::from_bytes(&png(&[ihdr(1, 2, 8, 0), idat])).unwrap();
    assert_eq!(heightmap.field.values(), [0.2, 0.4]);
}

#[test]
fn rejects_truncated_files_and_corrupt_streams() {
    let bytes = gray8(4, 4, &[200; 16]);
    let truncated = &bytes[..bytes.len() - 20];
    assert!(matches!(
        Heightmap::from_bytes(truncated),
        Err(DecodeError::Format(FormatError::TruncatedChunk { .. }))
    ));

    let idat = chunk(b"IDAT", b"\x78\x9cnot deflate");
    assert!(matches!(
        Heightmap::from_bytes(&png(&[ihdr(1, 1, 8, 0), idat])),
        Err(DecodeError::Format(FormatError::Inflate(_)))
    ));
}

#[test]
fn crc_checks_are_opt_in() {
    let mut bytes = gray8(2, 1, &[1, 2]);
    // last byte of the IHDR CRC
    bytes[8 + 8 + 13 + 3] ^= 0x55;
    assert!(Heightmap::from_bytes(&bytes).is_ok());

    let strict = DecodeOptions { verify_crc: true };
    assert!(Heightmap::from_bytes_with(&gray8(2, 1, &[1, 2]), strict).is_ok());
    assert!(matches!(
        Heightmap::from_bytes_with(&bytes, strict),
        Err(DecodeError::Format(FormatError::CrcMismatch { .. }))
    ));
}
