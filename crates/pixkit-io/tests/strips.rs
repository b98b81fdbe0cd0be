use pixkit_image::{pixel::L8, CpuAllocator, ImageSize, PixelBuffer, Region, Rgba32};
use pixkit_io::{
    tiff::{ByteOrder, PhotometricDecoder},
    IoError,
};

#[test]
fn decode_4bit_strips() -> Result<(), IoError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let size = ImageSize {
        width: 5,
        height: 4,
    };
    let mut image = PixelBuffer::from_size_val(size, L8::default(), CpuAllocator)?;
    let decoder = PhotometricDecoder::from_tags(1, &[4], None, ByteOrder::LittleEndian)?;

    // two strips of two rows, each row padded to three bytes
    let strips: [&[u8]; 2] = [
        &[0x01, 0x23, 0x40, 0x56, 0x78, 0x90],
        &[0xab, 0xcd, 0xe0, 0xff, 0xff, 0xf0],
    ];
    for (i, strip) in strips.iter().enumerate() {
        let region = Region::new(0, i * 2, size.width, 2);
        assert_eq!(decoder.required_len(region), strip.len());
        decoder.decode(strip, &mut image, region)?;
    }

    let levels = image.as_slice().iter().map(|px| px.l).collect::<Vec<_>>();
    #[rustfmt::skip]
    assert_eq!(
        levels,
        vec![
            0, 17, 34, 51, 68,
            85, 102, 119, 136, 153,
            170, 187, 204, 221, 238,
            255, 255, 255, 255, 255,
        ]
    );
    Ok(())
}

#[test]
fn decode_tiles_into_color_image() -> Result<(), IoError> {
    let size = ImageSize {
        width: 4,
        height: 2,
    };
    let mut image = PixelBuffer::from_size_val(size, Rgba32::default(), CpuAllocator)?;

    // a grayscale tile on the left and an rgb tile on the right
    let gray = PhotometricDecoder::from_tags(1, &[8], None, ByteOrder::BigEndian)?;
    gray.decode(&[10, 20, 30, 40], &mut image, Region::new(0, 0, 2, 2))?;

    let rgb = PhotometricDecoder::from_tags(2, &[8, 8, 8], None, ByteOrder::BigEndian)?;
    rgb.decode(
        &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        &mut image,
        Region::new(2, 0, 2, 2),
    )?;

    assert_eq!(
        image.as_slice(),
        &[
            Rgba32::new(10, 10, 10, 255),
            Rgba32::new(20, 20, 20, 255),
            Rgba32::new(1, 2, 3, 255),
            Rgba32::new(4, 5, 6, 255),
            Rgba32::new(30, 30, 30, 255),
            Rgba32::new(40, 40, 40, 255),
            Rgba32::new(7, 8, 9, 255),
            Rgba32::new(10, 11, 12, 255),
        ]
    );
    Ok(())
}

#[test]
fn strip_past_the_bottom_is_rejected() -> Result<(), IoError> {
    let size = ImageSize {
        width: 2,
        height: 2,
    };
    let mut image = PixelBuffer::from_size_val(size, L8::new(3), CpuAllocator)?;
    let decoder = PhotometricDecoder::BlackIsZero4;
    let res = decoder.decode(&[0xff; 4], &mut image, Region::new(0, 1, 2, 2));
    assert!(matches!(res, Err(IoError::ImageError(_))));
    assert!(image.as_slice().iter().all(|px| *px == L8::new(3)));
    Ok(())
}
