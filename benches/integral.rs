use criterion::{criterion_group, criterion_main, Criterion};
use integral_ops::{
    convolve, convolve_border, integral_image, ImageView, IntegralKernel, OwnedImage, Rect,
};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn haar_kernel() -> IntegralKernel {
    IntegralKernel::from_pairs([
        (Rect::new(-8, -8, 0, 9), 1),
        (Rect::new(0, -8, 8, 9), -1),
    ])
    .unwrap()
}

fn bench_integral(c: &mut Criterion) {
    let width = 1024;
    let height = 768;
    let image = make_image(width, height);
    let view = ImageView::from_slice(&image, width, height).unwrap();

    c.bench_function("integral_u8", |b| {
        b.iter(|| black_box(integral_image(view).unwrap()));
    });

    let table = integral_image(view).unwrap();
    let kernel = haar_kernel();
    let border = kernel.border();
    let mut out = OwnedImage::<i32>::zeros(width, height).unwrap();

    c.bench_function("convolve_haar_zero_border", |b| {
        b.iter(|| convolve(table.view(), &kernel, out.view_mut()).unwrap());
    });

    c.bench_function("convolve_haar_two_zone", |b| {
        b.iter(|| {
            convolve_border(table.view(), &kernel, out.view_mut(), border.x, border.y).unwrap()
        });
    });

    #[cfg(feature = "rayon")]
    {
        use integral_ops::{convolve_border_par, transform_par};

        let mut table_par = OwnedImage::<i32>::zeros(width, height).unwrap();
        c.bench_function("integral_u8_parallel", |b| {
            b.iter(|| transform_par(view, table_par.view_mut()).unwrap());
        });

        c.bench_function("convolve_haar_two_zone_parallel", |b| {
            b.iter(|| {
                convolve_border_par(table.view(), &kernel, out.view_mut(), border.x, border.y)
                    .unwrap()
            });
        });
    }
}

criterion_group!(benches, bench_integral);
criterion_main!(benches);
