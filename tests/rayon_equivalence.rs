#![cfg(feature = "rayon")]

use integral_ops::dispatch;
use integral_ops::{
    convolve, convolve_border, convolve_border_par, convolve_par, integral_image, transform_par,
    DynImage, ImageView, ImageViewMut, IntegralKernel, OwnedImage, Rect,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 11) ^ (y * 3) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn haar_kernel() -> IntegralKernel {
    IntegralKernel::from_pairs([
        (Rect::new(-4, -3, 4, 0), 1),
        (Rect::new(-4, 0, 4, 3), -1),
    ])
    .unwrap()
}

#[test]
fn parallel_transform_matches_sequential() {
    let (width, height) = (97, 61);
    let src = make_image(width, height);
    let view = ImageView::from_slice(&src, width, height).unwrap();
    let sequential = integral_image(view).unwrap();

    let mut parallel = OwnedImage::<i32>::zeros(width, height).unwrap();
    transform_par(view, parallel.view_mut()).unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn parallel_transform_respects_stride() {
    let (width, height, stride) = (10, 7, 13);
    let mut rng = StdRng::seed_from_u64(8);
    let src: Vec<f32> = (0..stride * height)
        .map(|_| rng.random_range(-20i32..=20) as f32)
        .collect();
    let view = ImageView::new(&src, width, height, stride).unwrap();
    let sequential = integral_image(view).unwrap();

    let mut out = vec![f64::NAN; stride * height];
    transform_par(
        view,
        ImageViewMut::new(&mut out, width, height, stride).unwrap(),
    )
    .unwrap();
    for y in 0..height {
        assert_eq!(
            &out[y * stride..y * stride + width],
            sequential.view().row(y).unwrap()
        );
        assert!(out[y * stride + width..(y + 1) * stride]
            .iter()
            .all(|v| v.is_nan()));
    }
}

#[test]
fn parallel_convolutions_match_sequential() {
    let (width, height) = (80, 52);
    let src = make_image(width, height);
    let table = integral_image(ImageView::from_slice(&src, width, height).unwrap()).unwrap();

    for kernel in [haar_kernel(), IntegralKernel::box_filter(4)] {
        let border = kernel.border();

        let mut seq = OwnedImage::<i32>::zeros(width, height).unwrap();
        let mut par = OwnedImage::<i32>::zeros(width, height).unwrap();
        convolve(table.view(), &kernel, seq.view_mut()).unwrap();
        convolve_par(table.view(), &kernel, par.view_mut()).unwrap();
        assert_eq!(seq, par);

        let mut seq_border = OwnedImage::<i32>::zeros(width, height).unwrap();
        let mut par_border = OwnedImage::<i32>::zeros(width, height).unwrap();
        convolve_border(
            table.view(),
            &kernel,
            seq_border.view_mut(),
            border.x,
            border.y,
        )
        .unwrap();
        convolve_border_par(
            table.view(),
            &kernel,
            par_border.view_mut(),
            border.x,
            border.y,
        )
        .unwrap();
        assert_eq!(seq_border, par_border);
        assert_eq!(seq, par_border);
    }
}

#[test]
fn dynamic_parallel_routes_match_sequential() {
    let (width, height) = (40, 30);
    let src: DynImage = OwnedImage::new(make_image(width, height), width, height)
        .unwrap()
        .into();
    let table = dispatch::integral_image(src.view()).unwrap();

    let mut table_par = DynImage::zeros(table.kind(), width, height).unwrap();
    dispatch::transform_par(src.view(), table_par.view_mut()).unwrap();
    assert_eq!(table, table_par);

    let kernel = haar_kernel();
    let border = kernel.border();
    let mut seq = DynImage::zeros(table.kind(), width, height).unwrap();
    let mut par = DynImage::zeros(table.kind(), width, height).unwrap();
    let mut par_border = DynImage::zeros(table.kind(), width, height).unwrap();
    dispatch::convolve(table.view(), &kernel, seq.view_mut()).unwrap();
    dispatch::convolve_par(table.view(), &kernel, par.view_mut()).unwrap();
    dispatch::convolve_border_par(
        table.view(),
        &kernel,
        par_border.view_mut(),
        border.x,
        border.y,
    )
    .unwrap();
    assert_eq!(seq, par);
    assert_eq!(seq, par_border);
}
