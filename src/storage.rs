use std::alloc::{handle_alloc_error, GlobalAlloc, Layout, System};
use std::any::Any;
use std::fmt;
use std::ptr::NonNull;
use std::sync::{Arc, RwLock};

/// Abstract interface to a memory resource used by JSON value trees.
///
/// A resource hands out raw byte allocations. All nodes of a single tree
/// allocate from one resource, carried around as a [`StoragePtr`], which
/// keeps the resource alive for as long as any value refers to it.
///
/// Allocation can fail only by diverging through
/// [`std::alloc::handle_alloc_error`]; there is no `Result` on this path,
/// same as the standard collections.
pub trait Storage: Send + Sync {
    /// Allocate at least `n` bytes aligned to at least `align`.
    ///
    /// `align` must be a power of two and `n` must be non-zero.
    fn allocate(&self, n: usize, align: usize) -> NonNull<u8>;

    /// Return an allocation to the resource.
    ///
    /// # Safety
    ///
    /// `p` must have been returned by `allocate` on this resource (or one
    /// equal to it) with the same `n` and `align`, and must not be used
    /// after this call.
    unsafe fn deallocate(&self, p: NonNull<u8>, n: usize, align: usize);

    /// Returns `true` when allocations are freely interchangeable between
    /// `self` and `other`, e.g. both wrap the same upstream allocator.
    ///
    /// Identity is handled by the caller; this is only consulted for
    /// distinct resource objects.
    fn is_equal(&self, other: &dyn Storage) -> bool;

    /// Downcast support for `is_equal` implementations.
    fn as_any(&self) -> &dyn Any;
}

/// A counted handle to a [`Storage`].
///
/// Cloning a handle bumps an atomic reference count; dropping the last
/// handle destroys the resource exactly once. Handles may cross threads
/// even though the values allocated from them may not.
///
/// Two handles compare equal when they point at the same resource or when
/// the resources report interchangeability via [`Storage::is_equal`].
#[derive(Clone)]
pub struct StoragePtr {
    inner: Arc<dyn Storage>,
}

impl StoragePtr {
    /// Wrap a resource into a counted handle.
    pub fn new<S>(storage: S) -> Self
    where
        S: Storage + 'static,
    {
        StoragePtr {
            inner: Arc::new(storage),
        }
    }

    /// Borrow the underlying resource.
    pub fn get(&self) -> &dyn Storage {
        &*self.inner
    }

    /// Number of live handles to this resource.
    pub fn refcount(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    #[inline]
    pub(crate) fn alloc(&self, n: usize, align: usize) -> NonNull<u8> {
        self.inner.allocate(n, align)
    }

    #[inline]
    pub(crate) unsafe fn dealloc(&self, p: NonNull<u8>, n: usize, align: usize) {
        self.inner.deallocate(p, n, align);
    }
}

impl PartialEq for StoragePtr {
    fn eq(&self, other: &StoragePtr) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.is_equal(&*other.inner)
    }
}

impl Eq for StoragePtr {}

impl fmt::Debug for StoragePtr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("StoragePtr")
            .field(&Arc::as_ptr(&self.inner))
            .finish()
    }
}

/// Adapts any byte allocator implementing [`GlobalAlloc`] into a
/// [`Storage`].
///
/// The requested size is rounded up to a multiple of the alignment before
/// it is forwarded, so the wrapped allocator always sees layout-compatible
/// requests.
pub struct StorageAdaptor<A> {
    alloc: A,
}

impl<A> StorageAdaptor<A> {
    pub fn new(alloc: A) -> Self {
        StorageAdaptor { alloc }
    }
}

#[inline]
fn round_up(n: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    n.wrapping_add(align - 1) & !(align - 1)
}

impl<A> Storage for StorageAdaptor<A>
where
    A: GlobalAlloc + Send + Sync + 'static,
{
    fn allocate(&self, n: usize, align: usize) -> NonNull<u8> {
        debug_assert!(n > 0, "zero-sized allocation");
        let n = round_up(n, align);

        // Alignment is a power of two and `n` was rounded up to a
        // multiple of it, so the layout is valid.
        let layout = unsafe { Layout::from_size_align_unchecked(n, align) };
        let ptr = unsafe { self.alloc.alloc(layout) };

        match NonNull::new(ptr) {
            Some(p) => p,
            None => handle_alloc_error(layout),
        }
    }

    unsafe fn deallocate(&self, p: NonNull<u8>, n: usize, align: usize) {
        let n = round_up(n, align);
        let layout = Layout::from_size_align_unchecked(n, align);
        self.alloc.dealloc(p.as_ptr(), layout);
    }

    fn is_equal(&self, other: &dyn Storage) -> bool {
        // Two adaptors over the same stateless allocator type hand out
        // interchangeable allocations. Stateful allocators are only
        // interchangeable with themselves, which identity already covers.
        other.as_any().downcast_ref::<Self>().is_some() && std::mem::size_of::<A>() == 0
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The resource used when no explicit handle is given: the system
/// allocator behind a [`StorageAdaptor`].
pub type GlobalStorage = StorageAdaptor<System>;

static DEFAULT: RwLock<Option<StoragePtr>> = RwLock::new(None);

/// Returns a handle to the current process-wide default resource,
/// creating it on first use.
pub fn default_storage() -> StoragePtr {
    if let Some(sp) = DEFAULT.read().unwrap().as_ref() {
        return sp.clone();
    }

    let mut slot = DEFAULT.write().unwrap();
    slot.get_or_insert_with(|| StoragePtr::new(StorageAdaptor::new(System)))
        .clone()
}

/// Replace the process-wide default resource.
///
/// Must not be called concurrently with itself or with any construction
/// that reads the default.
pub fn set_default_storage(sp: StoragePtr) {
    *DEFAULT.write().unwrap() = Some(sp);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up_multiples() {
        assert_eq!(round_up(1, 8), 8);
        assert_eq!(round_up(8, 8), 8);
        assert_eq!(round_up(9, 8), 16);
        assert_eq!(round_up(17, 16), 32);
    }

    #[test]
    fn adaptor_allocates() {
        let sp = StoragePtr::new(StorageAdaptor::new(System));
        let p = sp.alloc(24, 8);
        unsafe { sp.dealloc(p, 24, 8) };
    }

    #[test]
    fn clone_bumps_refcount() {
        let sp = StoragePtr::new(StorageAdaptor::new(System));
        assert_eq!(sp.refcount(), 1);
        let sp2 = sp.clone();
        assert_eq!(sp.refcount(), 2);
        drop(sp2);
        assert_eq!(sp.refcount(), 1);
    }

    #[test]
    fn stateless_adaptors_are_equal() {
        let a = StoragePtr::new(StorageAdaptor::new(System));
        let b = StoragePtr::new(StorageAdaptor::new(System));
        assert_eq!(a, b);
    }

    #[test]
    fn default_storage_is_stable() {
        let a = default_storage();
        let b = default_storage();
        assert_eq!(a, b);
    }
}
