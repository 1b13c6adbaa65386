use core::ops::{Deref, DerefMut};

use super::Canvas;

/// Scope guard that restores a canvas to the save count observed at creation.
///
/// Works for anything that can lend out its canvas, so a paint context can be
/// guarded while still being passed down to children:
///
/// ```ignore
/// let mut scope = AutoRestore::new(ctx);
/// scope.canvas.save_layer(bounds);
/// paint_children(&mut scope);
/// // restored here, on return or unwind
/// ```
///
/// Creating the guard does not save; callers save inside the scope.
pub struct AutoRestore<'a, T: AsMut<Canvas> + ?Sized> {
    target: &'a mut T,
    count: usize,
}

impl<'a, T: AsMut<Canvas> + ?Sized> AutoRestore<'a, T> {
    pub fn new(target: &'a mut T) -> Self {
        let count = target.as_mut().save_count();
        Self { target, count }
    }

    /// Save count that will be restored on drop.
    #[inline]
    pub fn restore_count(&self) -> usize {
        self.count
    }
}

impl<T: AsMut<Canvas> + ?Sized> Deref for AutoRestore<'_, T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        self.target
    }
}

impl<T: AsMut<Canvas> + ?Sized> DerefMut for AutoRestore<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.target
    }
}

impl<T: AsMut<Canvas> + ?Sized> Drop for AutoRestore<'_, T> {
    fn drop(&mut self) {
        self.target.as_mut().restore_to_count(self.count);
    }
}
