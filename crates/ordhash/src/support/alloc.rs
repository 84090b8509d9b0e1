//! Allocator plumbing.
//!
//! Both the order arena and the position index are allocator-api2
//! collections. With the `allocator-api2` feature, callers can hand us any
//! `allocator_api2::alloc::Allocator`. Without it, only [`Global`] is
//! available, through a private trait of the same shape.

pub use self::inner::Global;
pub(crate) use self::inner::{AllocWrapper, Allocator, global_alloc};

#[cfg(feature = "allocator-api2")]
mod inner {
    use allocator_api2::alloc::AllocError;
    pub use allocator_api2::alloc::{Allocator, Global, Layout};
    use core::ptr::NonNull;

    #[inline]
    pub(crate) fn global_alloc() -> Global {
        Global
    }

    /// Adapts a user-facing allocator to the allocator-api2 trait that our
    /// collections are parameterized over.
    #[derive(Clone, Copy, Default)]
    pub(crate) struct AllocWrapper<T>(pub(crate) T);

    // SAFETY: every call is forwarded unchanged to the wrapped allocator,
    // which upholds the trait's contract itself.
    unsafe impl<T: Allocator> allocator_api2::alloc::Allocator
        for AllocWrapper<T>
    {
        #[inline]
        fn allocate(
            &self,
            layout: Layout,
        ) -> Result<NonNull<[u8]>, AllocError> {
            allocator_api2::alloc::Allocator::allocate(&self.0, layout)
        }

        #[inline]
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            // SAFETY: the caller guarantees that `ptr` was allocated by this
            // allocator with `layout`, and we allocated it through `self.0`.
            unsafe {
                allocator_api2::alloc::Allocator::deallocate(
                    &self.0, ptr, layout,
                );
            }
        }
    }
}

#[cfg(not(feature = "allocator-api2"))]
mod inner {
    use allocator_api2::alloc::AllocError;
    use core::{alloc::Layout, ptr::NonNull};

    #[inline]
    pub(crate) fn global_alloc() -> Global {
        Global::default()
    }

    #[allow(clippy::missing_safety_doc)] // not exposed outside of this crate
    pub unsafe trait Allocator {
        fn allocate(&self, layout: Layout)
        -> Result<NonNull<[u8]>, AllocError>;
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
    }

    /// The global memory allocator.
    #[derive(Copy, Clone, Default)]
    #[doc(hidden)]
    pub struct Global(allocator_api2::alloc::Global);

    // SAFETY: forwards to allocator-api2's global allocator.
    unsafe impl Allocator for Global {
        #[inline]
        fn allocate(
            &self,
            layout: Layout,
        ) -> Result<NonNull<[u8]>, AllocError> {
            allocator_api2::alloc::Allocator::allocate(&self.0, layout)
        }

        #[inline]
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            // SAFETY: upheld by the caller.
            unsafe {
                allocator_api2::alloc::Allocator::deallocate(
                    &self.0, ptr, layout,
                );
            }
        }
    }

    #[derive(Clone, Copy, Default)]
    pub(crate) struct AllocWrapper<T>(pub(crate) T);

    // SAFETY: forwards to the wrapped allocator.
    unsafe impl<T: Allocator> allocator_api2::alloc::Allocator
        for AllocWrapper<T>
    {
        #[inline]
        fn allocate(
            &self,
            layout: Layout,
        ) -> Result<NonNull<[u8]>, AllocError> {
            Allocator::allocate(&self.0, layout)
        }

        #[inline]
        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            // SAFETY: upheld by the caller.
            unsafe { Allocator::deallocate(&self.0, ptr, layout) }
        }
    }
}
