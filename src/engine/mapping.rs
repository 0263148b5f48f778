use std::collections::HashSet;

/// Candidate key: `images[i]` is the alphabet id assigned to the i-th
/// ciphertext symbol of the domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mapping {
    images: Vec<u8>,
}

impl Mapping {
    /// Pairs the i-th domain symbol with the i-th alphabet symbol.
    pub fn prefix(len: usize) -> Self {
        Self {
            images: (0..len).map(|i| i as u8).collect(),
        }
    }

    pub fn from_images(images: Vec<u8>) -> Self {
        Self { images }
    }

    pub fn images(&self) -> &[u8] {
        &self.images
    }

    #[inline(always)]
    pub fn image(&self, symbol: u8) -> u8 {
        self.images[symbol as usize]
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Transposes the images of two domain symbols. Applying it twice is a no-op.
    #[inline(always)]
    pub fn swap(&mut self, a: usize, b: usize) {
        self.images.swap(a, b);
    }

    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut next = self.clone();
        next.swap(a, b);
        next
    }

    pub fn is_bijection(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.images.len());
        self.images.iter().all(|img| seen.insert(*img))
    }
}
