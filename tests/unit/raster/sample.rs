use super::*;

fn gradient_2x2() -> PixelBuffer {
    PixelBuffer::from_vec(2, 2, 1, vec![10, 20, 30, 40]).unwrap()
}

#[test]
fn centre_of_2x2_is_area_average() {
    let img = gradient_2x2();
    assert_eq!(sample_bilinear(&img, Point::new(0.5, 0.5)), [25, 0, 0, 0]);
}

#[test]
fn integer_coordinates_return_stored_bytes() {
    let (w, h) = (4u32, 3u32);
    let data: Vec<u8> = (0..(w * h * 4)).map(|i| (i * 7 % 251) as u8).collect();
    let img = PixelBuffer::from_vec(w, h, 4, data).unwrap();
    for row in 0..h {
        for col in 0..w {
            let got = sample_bilinear(&img, Point::new(f64::from(col), f64::from(row)));
            assert_eq!(&got[..], img.pixel(row, col), "pixel ({row}, {col})");
        }
    }
}

#[test]
fn near_integer_drift_does_not_lose_a_level() {
    let img = PixelBuffer::from_vec(3, 1, 1, vec![0, 200, 255]).unwrap();
    assert_eq!(sample_bilinear(&img, Point::new(1.0 - 1e-12, 0.0))[0], 200);
    assert_eq!(sample_bilinear(&img, Point::new(1.0 + 1e-12, 0.0))[0], 200);
}

#[test]
fn half_steps_interpolate_along_each_axis() {
    // 10 20
    // 30 40
    let img = gradient_2x2();
    assert_eq!(sample_bilinear(&img, Point::new(0.5, 0.0))[0], 15);
    assert_eq!(sample_bilinear(&img, Point::new(0.0, 0.5))[0], 20);
    assert_eq!(sample_bilinear(&img, Point::new(0.5, 1.0))[0], 35);
    assert_eq!(sample_bilinear(&img, Point::new(1.0, 0.5))[0], 30);
}

#[test]
fn off_centre_weights_follow_area() {
    // 10 20
    // 30 40
    // x = 0.25, y = 0.75: 10*0.1875 + 20*0.0625 + 30*0.5625 + 40*0.1875 = 27.5
    let img = gradient_2x2();
    assert_eq!(sample_bilinear(&img, Point::new(0.25, 0.75))[0], 27);
    assert_eq!(sample_bilinear(&img, Point::new(0.75, 0.25))[0], 22);
}

#[test]
fn opposite_drift_on_each_axis_keeps_the_right_corner() {
    let data: Vec<u8> = (0..16u8).map(|i| i * 10).collect();
    let img = PixelBuffer::from_vec(4, 4, 1, data).unwrap();
    let got = sample_bilinear(&img, Point::new(2.0 - 1e-12, 1.0 + 1e-12));
    assert_eq!(got[0], img.pixel(1, 2)[0]);
    let got = sample_bilinear(&img, Point::new(2.0 + 1e-12, 1.0 - 1e-12));
    assert_eq!(got[0], img.pixel(1, 2)[0]);
}

#[test]
fn weights_are_a_partition_of_unity() {
    let img = PixelBuffer::filled(3, 3, &[77]).unwrap();
    for (x, y) in [(0.1, 0.9), (1.3, 0.2), (1.75, 1.5), (0.5, 0.5)] {
        assert_eq!(sample_bilinear(&img, Point::new(x, y))[0], 77);
    }
}

#[test]
fn far_out_of_range_clamps_to_border() {
    let img = gradient_2x2();
    assert_eq!(sample_bilinear(&img, Point::new(-1000.0, 1000.0))[0], 30);
    assert_eq!(sample_bilinear(&img, Point::new(1000.0, -1000.0))[0], 20);
    assert_eq!(sample_bilinear(&img, Point::new(1e300, 1e300))[0], 40);
    assert_eq!(sample_bilinear(&img, Point::new(-0.5, -0.5))[0], 10);
}

#[test]
fn non_finite_coordinates_do_not_panic() {
    let img = gradient_2x2();
    let _ = sample_bilinear(&img, Point::new(f64::NAN, 0.0));
    let _ = sample_bilinear(&img, Point::new(f64::INFINITY, f64::NEG_INFINITY));
}

#[test]
fn missing_channels_are_zero() {
    let img = PixelBuffer::filled(2, 2, &[9, 8, 7]).unwrap();
    assert_eq!(sample_bilinear(&img, Point::new(0.3, 0.7)), [9, 8, 7, 0]);
}

#[test]
fn empty_image_samples_zero() {
    let img = PixelBuffer::new(0, 0, 4).unwrap();
    assert_eq!(sample_bilinear(&img, Point::new(0.0, 0.0)), [0; 4]);
}

#[test]
fn single_pixel_image_is_constant_everywhere() {
    let img = PixelBuffer::filled(1, 1, &[1, 2, 3, 4]).unwrap();
    for loc in [
        Point::new(0.0, 0.0),
        Point::new(0.25, 0.75),
        Point::new(-3.0, 12.0),
    ] {
        assert_eq!(sample_bilinear(&img, loc), [1, 2, 3, 4]);
    }
}
