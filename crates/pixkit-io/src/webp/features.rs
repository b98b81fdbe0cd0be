use pixkit_image::{BufferAllocator, CpuAllocator};

use super::alpha::{AlphaChunkHeader, AlphaData};
use crate::error::IoError;

const ICC_FLAG: u8 = 0x20;
const ALPHA_FLAG: u8 = 0x10;
const EXIF_FLAG: u8 = 0x08;
const XMP_FLAG: u8 = 0x04;
const ANIMATION_FLAG: u8 = 0x02;

/// Optional features of a WebP image, as announced by its 'VP8X' chunk.
///
/// The flags are plain values. The alpha payload, when present, owns memory
/// from an allocator and is released exactly once: by [`Self::release`], by
/// moving it out with [`Self::take_alpha_data`] and dropping it, or when the
/// features are dropped.
///
/// # Example
///
/// ```
/// use pixkit_image::CpuAllocator;
/// use pixkit_io::webp::WebpFeatures;
///
/// let mut features = WebpFeatures::from_vp8x_flags(0x10);
/// assert!(features.alpha);
///
/// features.set_alpha_data(0, &[255; 4], CpuAllocator).unwrap();
/// assert_eq!(features.alpha_data().map(|a| a.len()), Some(4));
///
/// features.release();
/// assert!(features.alpha_data().is_none());
/// ```
#[derive(Debug)]
pub struct WebpFeatures<A: BufferAllocator = CpuAllocator> {
    /// The image carries an ICC profile.
    pub icc_profile: bool,
    /// The image has transparency.
    pub alpha: bool,
    /// The image carries EXIF metadata.
    pub exif_profile: bool,
    /// The image carries XMP metadata.
    pub xmp_metadata: bool,
    /// The image is animated.
    pub animation: bool,
    alpha_chunk_header: AlphaChunkHeader,
    alpha_data: Option<AlphaData<A>>,
}

impl<A: BufferAllocator> Default for WebpFeatures<A> {
    fn default() -> Self {
        Self {
            icc_profile: false,
            alpha: false,
            exif_profile: false,
            xmp_metadata: false,
            animation: false,
            alpha_chunk_header: AlphaChunkHeader::default(),
            alpha_data: None,
        }
    }
}

impl<A: BufferAllocator> WebpFeatures<A> {
    /// Read the feature flags from the first byte of a 'VP8X' chunk payload.
    pub fn from_vp8x_flags(flags: u8) -> Self {
        Self {
            icc_profile: flags & ICC_FLAG != 0,
            alpha: flags & ALPHA_FLAG != 0,
            exif_profile: flags & EXIF_FLAG != 0,
            xmp_metadata: flags & XMP_FLAG != 0,
            animation: flags & ANIMATION_FLAG != 0,
            ..Self::default()
        }
    }

    /// Pack the feature flags into a 'VP8X' flags byte.
    pub fn vp8x_flags(&self) -> u8 {
        [
            (self.icc_profile, ICC_FLAG),
            (self.alpha, ALPHA_FLAG),
            (self.exif_profile, EXIF_FLAG),
            (self.xmp_metadata, XMP_FLAG),
            (self.animation, ANIMATION_FLAG),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .fold(0, |flags, (_, bit)| flags | bit)
    }

    /// Store the contents of an 'ALPH' chunk: its header byte and a copy of the
    /// alpha bytes. The previous payload is released once the new one is in place.
    ///
    /// On allocation failure the container is left unchanged.
    pub fn set_alpha_data(&mut self, header: u8, data: &[u8], alloc: A) -> Result<(), IoError> {
        let payload = AlphaData::from_slice(data, alloc)?;
        self.release();
        self.alpha_data = Some(payload);
        self.alpha_chunk_header = AlphaChunkHeader(header);
        self.alpha = true;
        log::trace!("stored {} alpha bytes, header {header:#04x}", data.len());
        Ok(())
    }

    /// The 'ALPH' chunk header byte.
    pub fn alpha_chunk_header(&self) -> AlphaChunkHeader {
        self.alpha_chunk_header
    }

    /// The alpha payload, if present and not yet released.
    pub fn alpha_data(&self) -> Option<&AlphaData<A>> {
        self.alpha_data.as_ref()
    }

    /// Move the alpha payload out, leaving none behind.
    pub fn take_alpha_data(&mut self) -> Option<AlphaData<A>> {
        self.alpha_data.take()
    }

    /// Return the alpha payload memory to its allocator.
    ///
    /// The flags are kept. Calling it again is a no-op.
    pub fn release(&mut self) {
        if let Some(data) = self.alpha_data.take() {
            log::trace!("releasing {} alpha bytes", data.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_image::AllocatorError;
    use std::alloc::Layout;
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    };

    #[derive(Clone, Default)]
    struct CountingAllocator {
        allocs: Arc<AtomicUsize>,
        deallocs: Arc<AtomicUsize>,
        exhausted: Arc<AtomicBool>,
    }

    impl CountingAllocator {
        fn counts(&self) -> (usize, usize) {
            (
                self.allocs.load(Ordering::SeqCst),
                self.deallocs.load(Ordering::SeqCst),
            )
        }
    }

    impl BufferAllocator for CountingAllocator {
        fn alloc(&self, layout: Layout) -> Result<*mut u8, AllocatorError> {
            if self.exhausted.load(Ordering::SeqCst) {
                return Err(AllocatorError::NullPointer);
            }
            self.allocs.fetch_add(1, Ordering::SeqCst);
            CpuAllocator.alloc(layout)
        }

        fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            self.deallocs.fetch_add(1, Ordering::SeqCst);
            CpuAllocator.dealloc(ptr, layout)
        }
    }

    #[test]
    fn flags_from_vp8x() {
        let features = WebpFeatures::<CpuAllocator>::from_vp8x_flags(0x3e);
        assert!(features.icc_profile);
        assert!(features.alpha);
        assert!(features.exif_profile);
        assert!(features.xmp_metadata);
        assert!(features.animation);
        assert_eq!(features.vp8x_flags(), 0x3e);

        let features = WebpFeatures::<CpuAllocator>::from_vp8x_flags(0x24);
        assert!(features.icc_profile && features.xmp_metadata);
        assert!(!features.alpha && !features.animation && !features.exif_profile);
        assert_eq!(features.vp8x_flags(), 0x24);
        assert!(features.alpha_data().is_none());
    }

    #[test]
    fn release_exactly_once() -> Result<(), IoError> {
        let alloc = CountingAllocator::default();
        let mut features = WebpFeatures::default();
        features.set_alpha_data(0b0000_0101, &[1, 2, 3], alloc.clone())?;
        assert!(features.alpha);
        assert_eq!(features.alpha_chunk_header(), AlphaChunkHeader(0b0000_0101));
        assert_eq!(alloc.counts(), (1, 0));

        features.release();
        assert_eq!(alloc.counts(), (1, 1));
        assert!(features.alpha_data().is_none());
        assert!(features.alpha);

        features.release();
        drop(features);
        assert_eq!(alloc.counts(), (1, 1));
        Ok(())
    }

    #[test]
    fn drop_releases_payload() -> Result<(), IoError> {
        let alloc = CountingAllocator::default();
        {
            let mut features = WebpFeatures::default();
            features.set_alpha_data(0, &[9; 32], alloc.clone())?;
            // replacing the payload releases the old one
            features.set_alpha_data(0, &[7; 8], alloc.clone())?;
            assert_eq!(alloc.counts(), (2, 1));
        }
        assert_eq!(alloc.counts(), (2, 2));
        Ok(())
    }

    #[test]
    fn failed_replace_keeps_payload() -> Result<(), IoError> {
        let alloc = CountingAllocator::default();
        let mut features = WebpFeatures::default();
        features.set_alpha_data(0b0001_0001, &[3; 6], alloc.clone())?;

        alloc.exhausted.store(true, Ordering::SeqCst);
        let res = features.set_alpha_data(0b0000_0010, &[4; 16], alloc.clone());
        assert!(matches!(res, Err(IoError::AllocationError(_))));

        assert_eq!(alloc.counts(), (1, 0));
        assert_eq!(features.alpha_chunk_header(), AlphaChunkHeader(0b0001_0001));
        assert_eq!(
            features.alpha_data().map(|d| d.as_slice()),
            Some(&[3u8; 6][..])
        );
        Ok(())
    }

    #[test]
    fn take_moves_ownership() -> Result<(), IoError> {
        let alloc = CountingAllocator::default();
        let mut features = WebpFeatures::default();
        features.set_alpha_data(0, &[5; 4], alloc.clone())?;

        let data = features.take_alpha_data();
        drop(features);
        assert_eq!(alloc.counts(), (1, 0));
        assert_eq!(data.as_ref().map(|d| d.as_slice()), Some(&[5u8; 4][..]));

        drop(data);
        assert_eq!(alloc.counts(), (1, 1));
        Ok(())
    }
}
