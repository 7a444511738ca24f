//! Packed opacity bitmasks with exact overlap queries.

use crate::error::PhysicsError;

const WORD_BITS: usize = u64::BITS as usize;

/// Default alpha threshold: a pixel is opaque when its alpha is strictly
/// greater than this value.
pub const ALPHA_THRESHOLD: u8 = 127;

/// A row-major bitset of opaque pixels.
///
/// Bits past `width` in the last word of every row are always zero, so whole
/// words can be combined without masking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    words_per_row: usize,
    bits: Vec<u64>,
}

impl Mask {
    /// An empty (fully transparent) mask.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let words_per_row = width.div_ceil(WORD_BITS);
        Self {
            width,
            height,
            words_per_row,
            bits: vec![0; words_per_row * height],
        }
    }

    /// Build a mask by asking `opaque(x, y)` for every pixel.
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut opaque: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                if opaque(x, y) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }

    /// Build a mask from a row-major alpha channel.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::AlphaSizeMismatch`] if `alpha` does not hold
    /// exactly `width * height` entries.
    pub fn from_alpha(
        width: usize,
        height: usize,
        alpha: &[u8],
        threshold: u8,
    ) -> Result<Self, PhysicsError> {
        let expected = width * height;
        if alpha.len() != expected {
            return Err(PhysicsError::AlphaSizeMismatch {
                width,
                height,
                expected,
                actual: alpha.len(),
            });
        }
        Ok(Self::from_fn(width, height, |x, y| alpha[y * width + x] > threshold))
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let word = self.bits[y * self.words_per_row + x / WORD_BITS];
        (word >> (x % WORD_BITS)) & 1 == 1
    }

    /// Set or clear one pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, opaque: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.words_per_row + x / WORD_BITS;
        let bit = 1u64 << (x % WORD_BITS);
        if opaque {
            self.bits[idx] |= bit;
        } else {
            self.bits[idx] &= !bit;
        }
    }

    /// Number of opaque pixels.
    #[must_use]
    pub fn count(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// The same mask mirrored top to bottom.
    #[must_use]
    pub fn flip_vertical(&self) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len());
        for row in self.bits.chunks_exact(self.words_per_row.max(1)).rev() {
            bits.extend_from_slice(row);
        }
        Self { bits, ..*self }
    }

    /// First opaque pixel shared with `other` when `other`'s origin sits at
    /// `offset` relative to this mask's origin.
    ///
    /// Pixels are scanned row by row in this mask's coordinates, and the
    /// returned point is in those coordinates too.
    #[must_use]
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(usize, usize)> {
        let (dx, dy) = (i64::from(offset.0), i64::from(offset.1));
        let x0 = dx.max(0);
        let x1 = (dx + to_i64(other.width)).min(to_i64(self.width));
        let y0 = dy.max(0);
        let y1 = (dy + to_i64(other.height)).min(to_i64(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        // All coordinates below are non-negative and inside both masks.
        let (x0, x1) = (to_usize(x0), to_usize(x1));
        for y in to_usize(y0)..to_usize(y1) {
            let other_y = to_usize(to_i64(y) - dy);
            let mut x = x0;
            while x < x1 {
                let len = (x1 - x).min(WORD_BITS);
                let ours = self.row_bits(y, x, len);
                let theirs = other.row_bits(other_y, to_usize(to_i64(x) - dx), len);
                let hit = ours & theirs;
                if hit != 0 {
                    return Some((x + hit.trailing_zeros() as usize, y));
                }
                x += len;
            }
        }
        None
    }

    /// Whether any opaque pixel is shared with `other` at `offset`.
    #[must_use]
    pub fn overlaps(&self, other: &Mask, offset: (i32, i32)) -> bool {
        self.overlap(other, offset).is_some()
    }

    /// Up to 64 bits of row `y` starting at column `start`, bit 0 = `start`.
    fn row_bits(&self, y: usize, start: usize, len: usize) -> u64 {
        let row = &self.bits[y * self.words_per_row..(y + 1) * self.words_per_row];
        let word = start / WORD_BITS;
        let shift = start % WORD_BITS;
        let mut bits = row.get(word).copied().unwrap_or(0) >> shift;
        if shift > 0 {
            if let Some(&next) = row.get(word + 1) {
                bits |= next << (WORD_BITS - shift);
            }
        }
        if len < WORD_BITS {
            bits &= (1u64 << len) - 1;
        }
        bits
    }
}

#[allow(clippy::cast_possible_wrap)]
fn to_i64(v: usize) -> i64 {
    v as i64
}

#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn to_usize(v: i64) -> usize {
    debug_assert!(v >= 0);
    v as usize
}
