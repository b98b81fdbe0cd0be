use pixkit_image::{pixel::L8, CpuAllocator, ImageSize, PixelBuffer, Region, Rgba32, Vector4};
use pixkit_imgproc::{
    convert_pixels, map_pixels_with_position, process_pixel_rows, ConversionModifiers,
    ExecutionStrategy, RowOptions,
};
use pixkit_io::tiff::{ByteOrder, PhotometricDecoder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // an 8x4 gradient stored as 4-bit grayscale, one nibble per pixel
    let size = ImageSize {
        width: 8,
        height: 4,
    };
    let data = (0..size.height)
        .flat_map(|y| {
            (0..size.width / 2).map(move |x| {
                let hi = (x * 4 + y) as u8;
                ((hi & 0xf) << 4) | ((hi + 2) & 0xf)
            })
        })
        .collect::<Vec<_>>();

    let decoder = PhotometricDecoder::from_tags(1, &[4], None, ByteOrder::LittleEndian)?;
    let mut gray = PixelBuffer::from_size_val(size, L8::default(), CpuAllocator)?;
    let bounds = gray.bounds();
    decoder.decode(&data, &mut gray, bounds)?;

    let mut color = PixelBuffer::from_size_val(size, Rgba32::default(), CpuAllocator)?;
    convert_pixels(&gray, &mut color, ExecutionStrategy::default())?;

    // tint the center red, working in linear light
    let options = RowOptions::default()
        .with_region(Region::new(2, 1, 4, 2))
        .with_modifiers(ConversionModifiers::SCALE | ConversionModifiers::COMPAND);
    map_pixels_with_position(&mut color, &options, |v, p| {
        let weight = 0.5 + 0.1 * p.x as f32;
        Vector4::new(v.r.max(weight), v.g * 0.5, v.b * 0.5, v.a)
    })?;

    // print every row's mean in the native range
    let options = RowOptions::default().with_strategy(ExecutionStrategy::Serial);
    process_pixel_rows(&mut color, &options, |row, start| {
        let mean = row.iter().map(|v| v.r + v.g + v.b).sum::<f32>() / (3 * row.len()) as f32;
        println!("row {}: mean {mean:.1}", start.y);
    })?;

    for y in 0..color.height() {
        let line = color
            .row(y)
            .unwrap_or_default()
            .iter()
            .map(|px| format!("{:02x}{:02x}{:02x}", px.r, px.g, px.b))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{line}");
    }

    Ok(())
}
