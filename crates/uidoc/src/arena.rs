//! Arena lifetime plumbing for visitor passes.

/// Extends a visitor-provided node reference to the arena lifetime.
///
/// Visitor callbacks receive references whose outer lifetime is tied to the
/// walk, even though the nodes themselves live in the bump allocator for the
/// whole session.
///
/// # Safety
///
/// The node must be allocated in the arena that backs `'a`. Every node
/// reached by walking a program parsed into the session allocator satisfies
/// this.
pub(crate) unsafe fn arena_ref<'a, T: ?Sized>(node: &T) -> &'a T {
    unsafe { &*(node as *const T) }
}
