// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content-hash memoization for decoded uploads.
//
// Re-rendering a page re-submits the same file bytes; decoding is the only
// expensive step, so results are keyed by the SHA-256 of the bytes and
// shared as `Arc`s. Purely a performance hint — correctness never depends
// on a hit.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use image::DynamicImage;
use sha2::{Digest, Sha256};
use tracing::debug;

use bildwerk_core::error::Result;

use crate::decode::decode_image;

/// Compute the SHA-256 hash of `data` and return it as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Bounded decode cache keyed by content hash.
///
/// Eviction is oldest-insertion-first; the demo holds at most three live
/// images, so the bound only matters under repeated re-uploads.
pub struct DecodedCache {
    capacity: usize,
    entries: HashMap<String, Arc<DynamicImage>>,
    insertion_order: VecDeque<String>,
}

impl DecodedCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
        }
    }

    /// Return the decoded image for `bytes`, decoding on a miss.
    pub fn get_or_decode(&mut self, bytes: &[u8]) -> Result<Arc<DynamicImage>> {
        let key = hash_bytes(bytes);
        if let Some(img) = self.entries.get(&key) {
            debug!(key = %key, "decode cache hit");
            return Ok(Arc::clone(img));
        }

        let img = Arc::new(decode_image(bytes)?);
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.insertion_order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.entries.insert(key.clone(), Arc::clone(&img));
        self.insertion_order.push_back(key);
        Ok(img)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::to_png_bytes;
    use image::{Rgb, RgbImage};

    fn png_bytes(shade: u8) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([shade, shade, shade])));
        to_png_bytes(&img).unwrap()
    }

    #[test]
    fn repeated_bytes_share_one_decode() {
        let mut cache = DecodedCache::new(4);
        let bytes = png_bytes(100);
        let first = cache.get_or_decode(&bytes).unwrap();
        let second = cache.get_or_decode(&bytes).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let mut cache = DecodedCache::new(2);
        for shade in 0..5 {
            cache.get_or_decode(&png_bytes(shade * 40)).unwrap();
            assert!(cache.len() <= 2);
        }
    }

    #[test]
    fn eviction_drops_the_oldest_entry() {
        let mut cache = DecodedCache::new(2);
        let oldest = png_bytes(10);
        cache.get_or_decode(&oldest).unwrap();
        let kept = cache.get_or_decode(&png_bytes(20)).unwrap();
        cache.get_or_decode(&png_bytes(30)).unwrap();

        // Entry for `kept` survived; the first upload was evicted and
        // decodes to a fresh Arc.
        let kept_again = cache.get_or_decode(&png_bytes(20)).unwrap();
        assert!(Arc::ptr_eq(&kept, &kept_again));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn corrupt_bytes_do_not_poison_the_cache() {
        let mut cache = DecodedCache::new(2);
        assert!(cache.get_or_decode(b"corrupt").is_err());
        assert!(cache.is_empty());
        assert!(cache.get_or_decode(&png_bytes(50)).is_ok());
    }
}
