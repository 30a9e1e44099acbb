use std::ptr::null_mut;

use super::RowPtr;
use crate::util::WORD_SIZE;
use libc::{MAP_ANONYMOUS, MAP_POPULATE, MAP_SHARED};
use log::debug;

/// Errors from validating a provisioned region or an address against it.
#[derive(Debug, thiserror::Error)]
pub enum RegionError {
    /// The provisioned base pointer is null
    #[error("Region base is null")]
    NullBase,
    /// The provisioned size is zero
    #[error("Region size is zero")]
    Empty,
    /// The provisioned size cannot be scanned word-at-a-time
    #[error("Region size {0} is not a multiple of the word size")]
    UnalignedSize(usize),
    /// An address does not denote a readable word inside the region
    #[error("Address {0:#x} is outside the provisioned region")]
    OutOfRange(usize),
}

/// Result type for region operations.
pub type Result<T> = std::result::Result<T, RegionError>;

/// The externally provisioned heap region.
///
/// A contiguous byte range of fixed base and size, handed in once at
/// context creation. The provisioning collaborator is trusted on *where*
/// the region lives; this type only enforces the shape invariants the scan
/// and the probes rely on: a non-null base and a size that is a non-zero
/// multiple of the machine word size.
#[derive(Clone, Debug)]
pub struct HeapRegion {
    ptr: *mut u8,
    len: usize,
}

unsafe impl Send for HeapRegion {}

impl HeapRegion {
    /// Adopts an externally provisioned region.
    ///
    /// # Errors
    ///
    /// Returns a [`RegionError`] if the base is null, the size is zero, or
    /// the size is not a multiple of [`WORD_SIZE`].
    pub fn new(ptr: *mut u8, len: usize) -> Result<Self> {
        if ptr.is_null() {
            return Err(RegionError::NullBase);
        }
        if len == 0 {
            return Err(RegionError::Empty);
        }
        if !len.is_multiple_of(WORD_SIZE) {
            return Err(RegionError::UnalignedSize(len));
        }
        debug!("adopting heap region {:p}, {} bytes", ptr, len);
        Ok(HeapRegion { ptr, len })
    }

    /// Allocates a stand-in region using mmap.
    ///
    /// Outside an isolated context (tests, host-side threshold calibration)
    /// there is no provisioned heap; this creates a zeroed region of the
    /// given size with read/write permissions instead.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if mmap fails or `size` violates the region
    /// invariants.
    pub fn mmap(size: usize) -> std::result::Result<Self, std::io::Error> {
        let p = unsafe {
            libc::mmap(
                null_mut(),
                size,
                libc::PROT_READ | libc::PROT_WRITE,
                MAP_SHARED | MAP_ANONYMOUS | MAP_POPULATE,
                -1,
                0,
            )
        };
        if p == libc::MAP_FAILED {
            return Err(std::io::Error::last_os_error());
        }
        unsafe { libc::memset(p, 0x00, size) };
        HeapRegion::new(p as *mut u8, size)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    }

    /// Releases a region obtained from [`HeapRegion::mmap`]. Consumes self.
    ///
    /// Must not be called on an adopted region; its memory belongs to the
    /// provisioning collaborator.
    pub fn dealloc(self) {
        unsafe { libc::munmap(self.ptr as *mut libc::c_void, self.len) };
    }

    /// Returns a pointer to the byte at the given offset.
    pub fn addr(&self, offset: usize) -> *mut u8 {
        assert!(
            offset < self.len,
            "HeapRegion::addr failed. Offset {} >= {}",
            offset,
            self.len
        );
        unsafe { self.ptr.byte_add(offset) }
    }

    /// Returns a pointer to the start of the region.
    pub fn ptr(&self) -> *mut u8 {
        self.ptr
    }

    /// Returns the region length in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of machine words the region scan will touch.
    pub fn word_count(&self) -> usize {
        self.len / WORD_SIZE
    }

    /// Whether `addr` denotes a full readable word inside the region.
    pub fn contains(&self, addr: RowPtr) -> bool {
        let base = self.ptr as usize;
        let addr = addr as usize;
        addr >= base && addr + WORD_SIZE <= base + self.len
    }

    /// Validates `addr` against the region boundary.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OutOfRange`] if the word at `addr` is not
    /// fully inside the region.
    pub fn check(&self, addr: RowPtr) -> Result<()> {
        if self.contains(addr) {
            Ok(())
        } else {
            Err(RegionError::OutOfRange(addr as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HeapRegion, RegionError};
    use crate::util::WORD_SIZE;

    #[test]
    fn test_rejects_null_base() {
        assert!(matches!(
            HeapRegion::new(std::ptr::null_mut(), 64),
            Err(RegionError::NullBase)
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            HeapRegion::new(0x1000 as *mut u8, 0),
            Err(RegionError::Empty)
        ));
    }

    #[test]
    fn test_rejects_unaligned_size() {
        assert!(matches!(
            HeapRegion::new(0x1000 as *mut u8, 13),
            Err(RegionError::UnalignedSize(13))
        ));
    }

    #[test]
    fn test_word_count() {
        let region = HeapRegion::new(0x1000 as *mut u8, 64).unwrap();
        assert_eq!(region.word_count(), 64 / WORD_SIZE);
    }

    #[test]
    fn test_contains_boundaries() {
        let region = HeapRegion::new(0x1000 as *mut u8, 64).unwrap();
        assert!(region.contains(0x1000 as *const u8));
        assert!(region.contains((0x1040 - WORD_SIZE) as *const u8));
        // last word position that would read past the end
        assert!(!region.contains((0x1040 - WORD_SIZE + 1) as *const u8));
        assert!(!region.contains(0x0fff as *const u8));
        assert!(!region.contains(0x1040 as *const u8));
    }

    #[test]
    fn test_mmap_roundtrip() -> anyhow::Result<()> {
        let region = HeapRegion::mmap(4096)?;
        assert_eq!(region.len(), 4096);
        assert!(!region.ptr().is_null());
        // mmap zeroes the region
        assert_eq!(unsafe { *region.addr(0) }, 0);
        assert_eq!(unsafe { *region.addr(4095) }, 0);
        region.dealloc();
        Ok(())
    }
}
