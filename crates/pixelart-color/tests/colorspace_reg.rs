//! Grayscale regression test
//!
//! Luma weights, RGB output, and stability under repeated conversion.

use pixelart_color::{rgb_to_gray, to_grayscale};
use pixelart_test::{RegParams, alpha_checker, gray_ramp, rgb_gradient, solid_rgb};

#[test]
fn colorspace_reg() {
    let mut rp = RegParams::new("colorspace");

    // --- Test 1: Primary colors ---
    for (rgb, expected) in [
        ((255u8, 0u8, 0u8), 76u8),
        ((0, 255, 0), 150),
        ((0, 0, 255), 29),
        ((0, 0, 0), 0),
        ((255, 255, 255), 255),
    ] {
        rp.compare_values(expected as f64, rgb_to_gray(rgb.0, rgb.1, rgb.2) as f64, 0.0);
        let pix = solid_rgb(2, 2, rgb).expect("solid");
        let gray = to_grayscale(&pix).expect("grayscale");
        rp.check(gray.get_rgb(1, 1) == Some((expected, expected, expected)), "gray pixel");
    }

    // --- Test 2: Output is RGB with equal channels ---
    let pixs = rgb_gradient(20, 12).expect("gradient");
    let gray = to_grayscale(&pixs).expect("grayscale");
    rp.check(gray.is_rgb(), "rgb output");
    rp.compare_values(20.0, gray.width() as f64, 0.0);
    rp.compare_values(12.0, gray.height() as f64, 0.0);
    let mut equal = true;
    for y in 0..12 {
        for x in 0..20 {
            let (r, g, b) = gray.get_rgb(x, y).expect("pixel");
            equal &= r == g && g == b;
        }
    }
    rp.check(equal, "R = G = B");

    // --- Test 3: Repeated conversion is stable ---
    let twice = to_grayscale(&gray).expect("twice");
    rp.compare_pix(&gray, &twice);

    // --- Test 4: Other depths ---
    let ramp = gray_ramp(16, 2).expect("ramp");
    let out = to_grayscale(&ramp).expect("from 8 bpp");
    rp.check(out.get_rgb(15, 0) == Some((255, 255, 255)), "ramp end");
    let checker = alpha_checker(4, 4, 1, (255, 0, 0), 255, 0).expect("rgba");
    let out = to_grayscale(&checker).expect("from rgba");
    rp.check(out.get_rgba(1, 0) == Some((76, 76, 76, 255)), "alpha dropped");

    assert!(rp.cleanup());
}
