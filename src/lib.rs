#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

/// The error returned when memory for a node could not be allocated.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllocError;

/// The error returned when an element is requested from an empty list.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyError;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod ptr;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A singly linked list that remembers its last node.
///
/// Elements can be pushed onto either end in constant time, and popped from
/// the front in constant time.
///
/// Operations that need an element to exist come in two forms. The plain form
/// ([`front`](Self::front), [`tail`](Self::tail),
/// [`pop_front`](Self::pop_front)) panics when the list is empty, and the
/// `try_` form returns an [`EmptyError`] instead. Check
/// [`is_empty`](Self::is_empty) first if you are not sure.

pub struct List<T> {
  size: usize,
  first: Option<NonNull<Node<T>>>,
  last: Option<NonNull<Node<T>>>,
  _owns: PhantomData<T>,
}

// SAFETY:
//
// Every node is owned by exactly one list, and is only reachable through
// that list, so the list is as thread-safe as a `T` is.

unsafe impl<T> Send for List<T> where T: Send { }

unsafe impl<T> Sync for List<T> where T: Sync { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

// `first` owns the head, and each node owns its `next`. `last` aliases the
// final node and never owns it.

struct Node<T> {
  data: T,
  next: Option<NonNull<Node<T>>>,
}

struct Elements<'a, T> {
  next: Option<NonNull<Node<T>>>,
  _list: PhantomData<&'a List<T>>,
}

// The unreleased remainder of a chain.

struct Release<T>(Option<NonNull<Node<T>>>);

struct OutOfMemory(Layout);

struct Empty(&'static str);

enum Panicked { }

trait Fail<C>: Sized {
  fn fail<T>(_: C) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail<OutOfMemory> for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: OutOfMemory) -> Result<T, Self> {
    alloc::alloc::handle_alloc_error(e.0)
  }
}

impl Fail<Empty> for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(e: Empty) -> Result<T, Self> {
    panic!("taillist: called `{}` on an empty list!", e.0)
  }
}

impl Fail<OutOfMemory> for AllocError {
  #[inline(always)]
  fn fail<T>(_: OutOfMemory) -> Result<T, Self> {
    Err(AllocError)
  }
}

impl Fail<Empty> for EmptyError {
  #[inline(always)]
  fn fail<T>(_: Empty) -> Result<T, Self> {
    Err(EmptyError)
  }
}

impl fmt::Display for AllocError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("memory allocation for a list node failed")
  }
}

impl core::error::Error for AllocError { }

impl fmt::Display for EmptyError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("the list is empty")
  }
}

impl core::error::Error for EmptyError { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Node                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn node<T, E>(data: T) -> Result<NonNull<Node<T>>, E>
where
  E: Fail<OutOfMemory>,
{
  let p =
    match ptr::alloc::<Node<T>>() {
      Ok(p) => p,
      Err(layout) => return E::fail(OutOfMemory(layout)),
    };

  unsafe { ptr::write(p, Node { data, next: None }) };

  Ok(p)
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Elements                                                                   //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T> Iterator for Elements<'a, T> {
  type Item = &'a T;

  #[inline(always)]
  fn next(&mut self) -> Option<&'a T> {
    let p = self.next?;
    let n: &'a Node<T> = unsafe { ptr::as_ref(p) };
    self.next = n.next;
    Some(&n.data)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Release                                                                    //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<T> Release<T> {
  fn run(&mut self) {
    while let Some(q) = self.0 {
      let n = unsafe { ptr::read(q) };
      unsafe { ptr::dealloc(q) };
      self.0 = n.next;
      drop::<T>(n.data);
    }
  }
}

impl<T> Drop for Release<T> {
  fn drop(&mut self) {
    // Only reached with nodes left if an element's `drop` panicked. Keep
    // going so the rest of the chain is still released.

    self.run()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn push_front<T, E>(list: &mut List<T>, item: T) -> Result<(), E>
where
  E: Fail<OutOfMemory>,
{
  let p = node(item)?;

  unsafe { ptr::as_mut_ref(p) }.next = list.first;

  if list.last.is_none() {
    list.last = Some(p);
  }

  list.first = Some(p);
  list.size += 1;

  Ok(())
}

fn push_back<T, E>(list: &mut List<T>, item: T) -> Result<(), E>
where
  E: Fail<OutOfMemory>,
{
  let p = node(item)?;

  match list.last {
    None => list.first = Some(p),
    Some(t) => unsafe { ptr::as_mut_ref(t) }.next = Some(p),
  }

  list.last = Some(p);
  list.size += 1;

  Ok(())
}

fn pop_front<T, E>(list: &mut List<T>) -> Result<T, E>
where
  E: Fail<Empty>,
{
  let Some(p) = list.first else {
    return E::fail(Empty("pop_front"));
  };

  let n = unsafe { ptr::read(p) };
  unsafe { ptr::dealloc(p) };

  if list.last == Some(p) {
    list.first = None;
    list.last = None;
  } else {
    list.first = n.next;
  }

  list.size -= 1;

  Ok(n.data)
}

fn front<'a, T, E>(list: &'a List<T>) -> Result<&'a T, E>
where
  E: Fail<Empty>,
{
  match list.first {
    Some(p) => Ok(&unsafe { ptr::as_ref(p) }.data),
    None => E::fail(Empty("front")),
  }
}

fn tail<'a, T, E>(list: &'a List<T>) -> Result<&'a T, E>
where
  E: Fail<Empty>,
{
  match list.last {
    Some(p) => Ok(&unsafe { ptr::as_ref(p) }.data),
    None => E::fail(Empty("tail")),
  }
}

fn copy<T, E>(list: &List<T>) -> Result<List<T>, E>
where
  T: Clone,
  E: Fail<OutOfMemory>,
{
  // If an allocation fails or `T::clone` panics, dropping `new` releases
  // whatever was copied so far.

  let mut new = List::new();

  for x in list.elements() {
    push_back(&mut new, x.clone())?;
  }

  Ok(new)
}

fn assign<T, E>(list: &mut List<T>, rhs: &List<T>) -> Result<(), E>
where
  T: Clone,
  E: Fail<OutOfMemory>,
{
  let mut new = copy(rhs)?;
  list.swap(&mut new);
  Ok(())
}

fn release<T>(list: &mut List<T>) {
  // The list is reset before any element is dropped, so a panicking `drop`
  // never leaves it pointing at freed nodes.

  let mut chain = Release(list.first.take());

  list.last = None;
  list.size = 0;

  chain.run();
}

impl<T> List<T> {
  /// Creates an empty list. Does not allocate.

  #[inline(always)]
  pub const fn new() -> Self {
    Self { size: 0, first: None, last: None, _owns: PhantomData }
  }

  /// The number of elements in the list.

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.size
  }

  /// Whether the list has no elements.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.size == 0
  }

  /// Inserts an element at the front of the list.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_front(&mut self, item: T) {
    unwrap(push_front(self, item))
  }

  /// Inserts an element at the front of the list.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory, in which case the
  /// list is unchanged and `item` is dropped.

  pub fn try_push_front(&mut self, item: T) -> Result<(), AllocError> {
    push_front(self, item)
  }

  /// Inserts an element at the back of the list.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_back(&mut self, item: T) {
    unwrap(push_back(self, item))
  }

  /// Inserts an element at the back of the list.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory, in which case the
  /// list is unchanged and `item` is dropped.

  pub fn try_push_back(&mut self, item: T) -> Result<(), AllocError> {
    push_back(self, item)
  }

  /// Removes the first element and returns it.
  ///
  /// # Panics
  ///
  /// Panics if the list is empty.

  pub fn pop_front(&mut self) -> T {
    unwrap(pop_front(self))
  }

  /// Removes the first element and returns it.
  ///
  /// # Errors
  ///
  /// An error is returned if the list is empty.

  pub fn try_pop_front(&mut self) -> Result<T, EmptyError> {
    pop_front(self)
  }

  /// A reference to the first element.
  ///
  /// # Panics
  ///
  /// Panics if the list is empty.

  pub fn front(&self) -> &T {
    unwrap(front(self))
  }

  /// A reference to the first element.
  ///
  /// # Errors
  ///
  /// An error is returned if the list is empty.

  pub fn try_front(&self) -> Result<&T, EmptyError> {
    front(self)
  }

  /// A reference to the last element.
  ///
  /// # Panics
  ///
  /// Panics if the list is empty.

  pub fn tail(&self) -> &T {
    unwrap(tail(self))
  }

  /// A reference to the last element.
  ///
  /// # Errors
  ///
  /// An error is returned if the list is empty.

  pub fn try_tail(&self) -> Result<&T, EmptyError> {
    tail(self)
  }

  /// Exchanges the contents of two lists without allocating.

  #[inline(always)]
  pub fn swap(&mut self, other: &mut Self) {
    mem::swap(&mut self.size, &mut other.size);
    mem::swap(&mut self.first, &mut other.first);
    mem::swap(&mut self.last, &mut other.last);
  }

  /// Drops every element, leaving the list empty.

  pub fn clear(&mut self) {
    release(self)
  }

  #[inline(always)]
  fn elements(&self) -> Elements<'_, T> {
    Elements { next: self.first, _list: PhantomData }
  }
}

impl<T: Clone> List<T> {
  /// Copies the list into a new chain of nodes.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_clone(&self) -> Result<Self, AllocError> {
    copy(self)
  }

  /// Replaces the contents of the list with a copy of `rhs`.
  ///
  /// The copy is built in full before it is swapped in, so if copying fails
  /// the list keeps its old contents.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn assign(&mut self, rhs: &Self) {
    unwrap(assign(self, rhs))
  }

  /// Replaces the contents of the list with a copy of `rhs`.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory, in which case the
  /// list is unchanged.

  pub fn try_assign(&mut self, rhs: &Self) -> Result<(), AllocError> {
    assign(self, rhs)
  }
}

impl<T> Drop for List<T> {
  fn drop(&mut self) {
    release(self)
  }
}

impl<T> Default for List<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: Clone> Clone for List<T> {
  fn clone(&self) -> Self {
    unwrap(copy(self))
  }

  fn clone_from(&mut self, source: &Self) {
    unwrap(assign(self, source))
  }
}

impl<T: PartialEq> PartialEq for List<T> {
  fn eq(&self, other: &Self) -> bool {
    self.size == other.size && self.elements().eq(other.elements())
  }
}

impl<T: Eq> Eq for List<T> { }

impl<T> Extend<T> for List<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for x in iter {
      self.push_back(x);
    }
  }
}

impl<T> FromIterator<T> for List<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut list = Self::new();
    list.extend(iter);
    list
  }
}

/// Renders every element followed by a single space, front to back. An empty
/// list renders as the empty string.

impl<T: fmt::Display> fmt::Display for List<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for x in self.elements() {
      write!(f, "{x} ")?;
    }
    Ok(())
  }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.elements()).finish()
  }
}
