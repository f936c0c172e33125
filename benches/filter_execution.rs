use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageFormat, RgbaImage};
use rasterpipe::filters::FilterDirective;
use rasterpipe::loader::StaticLoader;
use rasterpipe::processor::{CancelToken, FilterProcessor};
use rasterpipe::surface::Surface;
use std::io::Cursor;

fn create_bench_surface(width: u32, height: u32) -> Surface {
    let mut img = RgbaImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = image::Rgba([(x % 255) as u8, (y % 255) as u8, ((x + y) % 255) as u8, 255]);
    }
    Surface::from_rgba(img)
}

fn create_mark_blob(width: u32, height: u32) -> Bytes {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([30, 30, 200, 255]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png).unwrap();
    Bytes::from(buffer.into_inner())
}

fn bench_filter_execution(c: &mut Criterion) {
    let fixture = create_bench_surface(1280, 720);
    let processor = FilterProcessor::default();
    let cancel = CancelToken::new();
    let loader = StaticLoader::new().with("mark.png", create_mark_blob(160, 90));

    let mut group = c.benchmark_group("filter_execution");
    group.sample_size(10); // raster ops are slow, reduce sample size

    group.bench_function("tone_chain_720p", |b| {
        let directives = [
            FilterDirective::new("grayscale", &[]),
            FilterDirective::new("brightness", &["10"]),
            FilterDirective::new("contrast", &["20"]),
        ];
        b.iter(|| {
            let mut surface = fixture.clone();
            processor
                .apply(black_box(&mut surface), &loader, &directives, &cancel)
                .unwrap();
        })
    });

    group.bench_function("watermark_tiled_720p", |b| {
        let directives = [FilterDirective::new(
            "watermark",
            &["mark.png", "repeat", "bottom", "40"],
        )];
        b.iter(|| {
            let mut surface = fixture.clone();
            processor
                .apply(black_box(&mut surface), &loader, &directives, &cancel)
                .unwrap();
        })
    });

    group.bench_function("round_corner_720p", |b| {
        let directives = [FilterDirective::new("roundCorner", &["48"])];
        b.iter(|| {
            let mut surface = fixture.clone();
            processor
                .apply(black_box(&mut surface), &loader, &directives, &cancel)
                .unwrap();
        })
    });

    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    let fixture = create_bench_surface(160, 90);
    let processor = FilterProcessor::default();

    let mut group = c.benchmark_group("fill");
    group.sample_size(10);

    group.bench_function("flat_fill_to_512", |b| {
        b.iter(|| {
            let mut surface = fixture.clone();
            processor
                .fill(black_box(&mut surface), 512, 512, 0, 0, false, "white")
                .unwrap();
        })
    });

    group.bench_function("blur_fill_to_320", |b| {
        b.iter(|| {
            let mut surface = fixture.clone();
            processor
                .fill(black_box(&mut surface), 320, 320, 10, 10, false, "blur")
                .unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_filter_execution, bench_fill);
criterion_main!(benches);
