use augmentor_image::{ImageDtype, ImageError, PixelImage};
use num_traits::Zero;

use super::{clamp_index, kernels::BoxFilter};

/// Running per-channel sum over the window of a scan line.
///
/// The window moves by one sample per step: the entering sample is added and
/// the leaving one subtracted, so each output costs O(1) regardless of the
/// filter width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accumulator {
    values: Vec<u64>,
}

impl Accumulator {
    /// Create a zeroed accumulator for pixels of `num_channels` samples.
    pub fn new(num_channels: usize) -> Self {
        Self {
            values: vec![0; num_channels],
        }
    }

    /// Add a pixel to the window.
    #[inline]
    pub fn add<T: ImageDtype>(&mut self, pixel: &[T]) {
        for (value, &p) in self.values.iter_mut().zip(pixel.iter()) {
            *value += p.into_u64();
        }
    }

    /// Move the window by one pixel.
    ///
    /// `leaving` must be a pixel previously added, so the sum never underflows.
    #[inline]
    pub fn shift<T: ImageDtype>(&mut self, leaving: &[T], entering: &[T]) {
        for ((value, &l), &e) in self
            .values
            .iter_mut()
            .zip(leaving.iter())
            .zip(entering.iter())
        {
            *value += e.into_u64();
            *value -= l.into_u64();
        }
    }

    /// Write the integer mean of the window, `sum / count` per channel.
    #[inline]
    pub fn mean_into<T: ImageDtype>(&self, count: u64, out: &mut [T]) {
        for (out_val, &value) in out.iter_mut().zip(self.values.iter()) {
            *out_val = T::from_u64_saturating(value / count);
        }
    }

    /// The current per-channel sums.
    pub fn values(&self) -> &[u64] {
        &self.values
    }
}

/// Box filter a scan line of `len` pixels with a sliding accumulator.
fn slide_line<'a, T, R, W>(
    len: usize,
    filter: &BoxFilter,
    read: R,
    mut write: W,
    out: &mut [T],
) -> Result<(), ImageError>
where
    T: ImageDtype,
    R: Fn(usize) -> Result<&'a [T], ImageError>,
    W: FnMut(usize, &[T]) -> Result<(), ImageError>,
{
    let width = filter.width() as isize;
    let half = filter.half_width() as isize;
    let count = filter.width() as u64;

    // the window of the first pixel
    let mut acc = Accumulator::new(out.len());
    for k in 0..width {
        acc.add(read(clamp_index(k - half, len))?);
    }
    acc.mean_into(count, out);
    write(0, out)?;

    for i in 1..len as isize {
        let leaving = clamp_index(i - half - 1, len);
        let entering = clamp_index(i - half + width - 1, len);
        acc.shift(read(leaving)?, read(entering)?);
        acc.mean_into(count, out);
        write(i as usize, out)?;
    }

    Ok(())
}

/// Apply a box filter to an image in place with a sliding window.
///
/// Every column is filtered along the height axis into a transient image of
/// the same shape, then every row of the transient image is filtered along
/// the width axis back into `image`. Each output sample is the integer mean
/// of the `filter.width()` samples of its window, with window positions
/// outside the image replicating the edge pixel.
///
/// # Arguments
///
/// * `image` - The image to filter, with shape (H, W, C).
/// * `filter` - The box filter.
pub fn sliding_box_filter<I: PixelImage>(
    image: &mut I,
    filter: &BoxFilter,
) -> Result<(), ImageError> {
    let cols = image.width();
    let rows = image.height();

    let mut transient = image.zeros_like()?;
    let mut out = vec![I::Dtype::zero(); image.num_channels()];

    // height axis: image -> transient
    {
        let src: &I = image;
        for x in 0..cols {
            slide_line(
                rows,
                filter,
                move |y| src.pixel(x, y),
                |y, pixel| transient.set_pixel(x, y, pixel),
                &mut out,
            )?;
        }
    }

    // width axis: transient -> image
    let src = &transient;
    for y in 0..rows {
        slide_line(
            cols,
            filter,
            move |x| src.pixel(x, y),
            |x, pixel| image.set_pixel(x, y, pixel),
            &mut out,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmentor_image::{ColorSpace, Image, ImageSize};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Windowed mean of a single line computed sample by sample.
    fn direct_box_filter(line: &[u8], width: usize) -> Vec<u8> {
        let half = (width / 2) as isize;
        (0..line.len() as isize)
            .map(|i| {
                let sum: u64 = (0..width as isize)
                    .map(|k| line[clamp_index(i - half + k, line.len())] as u64)
                    .sum();
                (sum / width as u64) as u8
            })
            .collect()
    }

    #[test]
    fn test_accumulator() {
        let mut acc = Accumulator::new(2);
        acc.add(&[1u8, 2]);
        acc.add(&[3u8, 4]);
        assert_eq!(acc.values(), &[4, 6]);

        acc.shift(&[1u8, 2], &[10u8, 20]);
        assert_eq!(acc.values(), &[13, 24]);

        let mut out = [0u8; 2];
        acc.mean_into(2, &mut out);
        assert_eq!(out, [6, 12]);
    }

    #[test]
    fn test_box_filter_flat() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let mut image = Image::<u8>::gray(size, vec![100; 16])?;

        sliding_box_filter(&mut image, &BoxFilter::new(3)?)?;

        assert_eq!(image.as_slice(), &[100u8; 16]);
        Ok(())
    }

    #[test]
    fn test_box_filter_clamps_edges() -> Result<(), ImageError> {
        let mut image = Image::<u8>::gray(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![0, 30, 60, 90],
        )?;

        sliding_box_filter(&mut image, &BoxFilter::new(3)?)?;

        assert_eq!(image.as_slice(), &[10, 30, 60, 80]);
        Ok(())
    }

    #[test]
    fn test_box_filter_matches_direct_average() -> Result<(), ImageError> {
        let mut rng = StdRng::seed_from_u64(42);

        for len in [1, 2, 5, 17] {
            for width in 1..=8 {
                let line: Vec<u8> = (0..len).map(|_| rng.random()).collect();

                // a single row, so the height pass leaves the samples untouched
                let mut image = Image::gray(
                    ImageSize {
                        width: len,
                        height: 1,
                    },
                    line.clone(),
                )?;
                sliding_box_filter(&mut image, &BoxFilter::new(width)?)?;

                assert_eq!(
                    image.as_slice(),
                    direct_box_filter(&line, width).as_slice(),
                    "len {len} width {width}"
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_box_filter_columns() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let mut image = Image::<u8>::new(
            ImageSize { width: 1, height: 3 },
            3,
            ColorSpace::Rgb,
            vec![
                0, 3, 6,
                3, 6, 9,
                6, 9, 12,
            ],
        )?;

        sliding_box_filter(&mut image, &BoxFilter::new(3)?)?;

        #[rustfmt::skip]
        assert_eq!(
            image.as_slice(),
            &[
                1, 4, 7,
                3, 6, 9,
                5, 8, 11,
            ]
        );
        Ok(())
    }
}
