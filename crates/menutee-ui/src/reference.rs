use std::cell::RefCell;
use std::rc::Rc;

/// A shared, observable value a widget binds to instead of owning.
///
/// Game code keeps one clone (e.g. its settings struct) and hands another to a
/// Ref-bound widget config. The widget reads its initial value from the
/// reference, writes every user change back into it, and follows external
/// writes on its next refresh. [`ValueRef::version`] increases on every `set`,
/// so readers can tell whether anything changed since they last looked.
pub struct ValueRef<T> {
    inner: Rc<RefCell<Slot<T>>>,
}

struct Slot<T> {
    value: T,
    version: u64,
}

impl<T: Clone> ValueRef<T> {
    pub fn new(value: T) -> Self {
        Self { inner: Rc::new(RefCell::new(Slot { value, version: 0 })) }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn set(&self, value: T) {
        let mut slot = self.inner.borrow_mut();
        slot.value = value;
        slot.version += 1;
    }

    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// `true` if both handles share one value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for ValueRef<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for ValueRef<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.inner.borrow();
        f.debug_struct("ValueRef").field("value", &slot.value).field("version", &slot.version).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_value() {
        let a = ValueRef::new(0.5_f32);
        let b = a.clone();
        b.set(0.8);
        assert_eq!(a.get(), 0.8);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn version_bumps_on_set() {
        let r = ValueRef::new(false);
        assert_eq!(r.version(), 0);
        r.set(true);
        r.set(true);
        assert_eq!(r.version(), 2);
    }
}
