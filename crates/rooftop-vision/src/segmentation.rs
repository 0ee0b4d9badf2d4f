//! Roof segmentation: threshold, clean up, measure, outline
//!
//! Fixed pipeline with no learned parameters:
//! 1. grayscale
//! 2. inverted adaptive mean threshold (51 px block, offset 10, replicated borders)
//! 3. morphological closing with a 5x5 square
//!
//! The mask marks dark, locally contrasting surfaces, which on aerial
//! photographs are mostly roofs. It is a rough estimate, not a model.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use std::collections::VecDeque;
use rooftop_types::{Error, Result};

/// Side of the square neighbourhood used for the local mean
pub const THRESHOLD_BLOCK_SIZE: u32 = 51;

/// A pixel is kept when it is at least this much darker than its local mean
pub const THRESHOLD_OFFSET: i32 = 10;

/// Side of the square structuring element used for closing
pub const CLOSING_KERNEL_SIZE: u32 = 5;

/// Ground area of one pixel (0.5 m x 0.5 m)
pub const DEFAULT_PIXEL_AREA_M2: f64 = 0.25;

const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

const MASK_ON: u8 = 255;

/// Binary mask, 255 = roof, 0 = background
pub type RoofMask = GrayImage;

/// Segment roof-like regions in an image
pub fn segment(image: &DynamicImage) -> RoofMask {
    let gray = image.to_luma8();
    let thresholded = adaptive_threshold_inv(&gray, THRESHOLD_BLOCK_SIZE / 2, THRESHOLD_OFFSET);
    close(&thresholded, CLOSING_KERNEL_SIZE / 2)
}

/// Area covered by the mask, in m²
pub fn mask_area(mask: &RoofMask, pixel_area_m2: f64) -> Result<f64> {
    if !(pixel_area_m2.is_finite() && pixel_area_m2 > 0.0) {
        return Err(Error::InvalidInput(format!(
            "pixel area must be a positive number of m², got {}",
            pixel_area_m2
        )));
    }
    let on = mask.as_raw().iter().filter(|&&v| v > 0).count();
    Ok(on as f64 * pixel_area_m2)
}

/// Copy of `image` with the outer boundary of every mask region painted
/// green, 3 px wide.
///
/// Only external contours are drawn; edges of holes enclosed by a region
/// (a chimney cut-out, a skylight) keep their source colour.
pub fn outline(image: &DynamicImage, mask: &RoofMask) -> Result<RgbImage> {
    let mut outlined = image.to_rgb8();
    if outlined.dimensions() != mask.dimensions() {
        return Err(Error::InvalidInput(format!(
            "mask is {:?} but image is {:?}",
            mask.dimensions(),
            outlined.dimensions()
        )));
    }

    let exterior = exterior_background(mask);
    let (w, h) = mask.dimensions();
    for y in 0..h {
        for x in 0..w {
            if !is_outer_boundary(mask, &exterior, x, y) {
                continue;
            }
            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    outlined.put_pixel(nx, ny, OUTLINE_COLOR);
                }
            }
        }
    }

    Ok(outlined)
}

/// Background pixels 4-connected to the image border
fn exterior_background(mask: &RoofMask) -> Vec<bool> {
    let (w, h) = mask.dimensions();
    let idx = |x: u32, y: u32| (y * w + x) as usize;
    let mut exterior = vec![false; (w * h) as usize];
    if w == 0 || h == 0 {
        return exterior;
    }
    let mut queue = VecDeque::new();

    let border = (0..w)
        .flat_map(|x| [(x, 0), (x, h.saturating_sub(1))])
        .chain((0..h).flat_map(|y| [(0, y), (w.saturating_sub(1), y)]));
    for (x, y) in border {
        if mask.get_pixel(x, y)[0] == 0 && !exterior[idx(x, y)] {
            exterior[idx(x, y)] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let neighbours = [
            (x.checked_sub(1), Some(y)),
            ((x + 1 < w).then_some(x + 1), Some(y)),
            (Some(x), y.checked_sub(1)),
            (Some(x), (y + 1 < h).then_some(y + 1)),
        ];
        for (nx, ny) in neighbours {
            if let (Some(nx), Some(ny)) = (nx, ny) {
                if mask.get_pixel(nx, ny)[0] == 0 && !exterior[idx(nx, ny)] {
                    exterior[idx(nx, ny)] = true;
                    queue.push_back((nx, ny));
                }
            }
        }
    }

    exterior
}

fn is_outer_boundary(mask: &RoofMask, exterior: &[bool], x: u32, y: u32) -> bool {
    if mask.get_pixel(x, y)[0] == 0 {
        return false;
    }
    let (w, h) = mask.dimensions();
    if x == 0 || y == 0 || x + 1 == w || y + 1 == h {
        return true;
    }
    [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
        .iter()
        .any(|&(nx, ny)| exterior[(ny * w + nx) as usize])
}

/// Inverted binary adaptive threshold against the rounded local mean.
///
/// Out-of-image neighbours replicate the nearest edge pixel.
fn adaptive_threshold_inv(gray: &GrayImage, radius: u32, offset: i32) -> GrayImage {
    let means = box_mean_replicate(gray, radius);
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (i, (value, mean)) in gray.as_raw().iter().zip(means.iter()).enumerate() {
        if i32::from(*value) - i32::from(*mean) <= -offset {
            let x = (i % gray.width() as usize) as u32;
            let y = (i / gray.width() as usize) as u32;
            out.put_pixel(x, y, Luma([MASK_ON]));
        }
    }
    out
}

fn box_mean_replicate(gray: &GrayImage, radius: u32) -> Vec<u8> {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    let r = radius as i64;
    let raw = gray.as_raw();
    let clamp = |v: i64, len: usize| v.clamp(0, len as i64 - 1) as usize;

    // Horizontal window sums
    let mut horizontal = vec![0u32; w * h];
    for y in 0..h {
        let row = &raw[y * w..(y + 1) * w];
        let mut sum: u32 = (-r..=r).map(|dx| u32::from(row[clamp(dx, w)])).sum();
        for x in 0..w {
            horizontal[y * w + x] = sum;
            let xi = x as i64;
            sum = sum + u32::from(row[clamp(xi + r + 1, w)]) - u32::from(row[clamp(xi - r, w)]);
        }
    }

    // Vertical window sums of the horizontal sums
    let window = ((2 * r + 1) * (2 * r + 1)) as f64;
    let mut means = vec![0u8; w * h];
    for x in 0..w {
        let mut sum: u32 = (-r..=r).map(|dy| horizontal[clamp(dy, h) * w + x]).sum();
        for y in 0..h {
            means[y * w + x] = (f64::from(sum) / window).round() as u8;
            let yi = y as i64;
            sum = sum + horizontal[clamp(yi + r + 1, h) * w + x]
                - horizontal[clamp(yi - r, h) * w + x];
        }
    }

    means
}

/// Dilate then erode with a (2r+1)² square; pixels outside the image are ignored
fn close(mask: &GrayImage, radius: u32) -> GrayImage {
    let dilated = morph(mask, radius, u8::max);
    morph(&dilated, radius, u8::min)
}

fn morph(src: &GrayImage, radius: u32, pick: fn(u8, u8) -> u8) -> GrayImage {
    let (w, h) = src.dimensions();

    let mut horizontal = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(w - 1);
            let v = (lo..=hi)
                .map(|nx| src.get_pixel(nx, y)[0])
                .reduce(pick)
                .unwrap_or(0);
            horizontal.put_pixel(x, y, Luma([v]));
        }
    }

    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(h - 1);
            let v = (lo..=hi)
                .map(|ny| horizontal.get_pixel(x, ny)[0])
                .reduce(pick)
                .unwrap_or(0);
            out.put_pixel(x, y, Luma([v]));
        }
    }
    out
}
