use core::alloc::Layout;
use core::ptr::NonNull;
use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;

#[inline(always)]
pub(crate) const fn cast<T, U>(x: NonNull<T>) -> NonNull<U>
where
  T: ?Sized
{
  x.cast()
}

#[inline(always)]
pub(crate) unsafe fn write<T>(x: NonNull<T>, y: T) {
  x.as_ptr().write(y)
}

#[inline(always)]
pub(crate) unsafe fn read<T>(x: NonNull<T>) -> T {
  x.as_ptr().read()
}

#[inline(always)]
pub(crate) unsafe fn as_ref<'a, T>(x: NonNull<T>) -> &'a T
where
  T: ?Sized
{
  &*x.as_ptr()
}

#[inline(always)]
pub(crate) unsafe fn as_mut_ref<'a, T>(x: NonNull<T>) -> &'a mut T
where
  T: ?Sized
{
  &mut *x.as_ptr()
}

/// Allocates uninitialized memory for one `T` from the global allocator.
///
/// On failure, the layout that could not be satisfied is returned.

#[inline(always)]
pub(crate) fn alloc<T>() -> Result<NonNull<T>, Layout> {
  let layout = Layout::new::<T>();

  // NB: Every caller allocates a node, which holds at least one pointer, so
  // `layout` is never zero-sized.

  match Global.allocate(layout) {
    Ok(p) => Ok(cast(p)),
    Err(_) => Err(layout),
  }
}

/// Returns memory obtained from [`alloc`] to the global allocator. The value
/// stored there, if any, must already have been moved out or dropped.

#[inline(always)]
pub(crate) unsafe fn dealloc<T>(x: NonNull<T>) {
  Global.deallocate(cast(x), Layout::new::<T>())
}
