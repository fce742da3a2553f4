use std::cell::RefCell;
use std::rc::Rc;

use crate::attributes::MenuAttributes;

/// Anything the [`crate::stack::MenuStack`] can hold.
///
/// The stack calls `set_menu_up(true)` right after a push and `set_menu_on_top`
/// whenever the top entry changes. Implementations must tolerate repeated calls
/// with the same value.
pub trait Menu {
    /// Attributes applied to the host while this menu is on top.
    fn menu_attributes(&self) -> MenuAttributes;

    fn set_menu_up(&mut self, up: bool);

    fn set_menu_on_top(&mut self, on_top: bool);
}

/// Shared handle to a stacked menu. Identity is the allocation, not the value.
pub type MenuRef = Rc<RefCell<dyn Menu>>;

/// `true` if both handles point at the same menu.
#[inline]
pub fn same_menu(a: &MenuRef, b: &MenuRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
