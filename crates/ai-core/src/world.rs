use std::cell::Cell;
use std::rc::Rc;

use crate::Vec3;

/// Read-only position lookup for a tracked entity (the player, a waypoint, ...).
///
/// Implementations return a cheap snapshot; callers may see a value that is one step stale.
/// `None` means the entity is gone and any behavior aimed at it should fail.
pub trait PositionSource {
    fn position(&self) -> Option<Vec3>;
}

/// Shared handle to a target, held by the leaves that aim at it.
pub type TargetRef = Rc<dyn PositionSource>;

impl PositionSource for Cell<Vec3> {
    fn position(&self) -> Option<Vec3> {
        Some(self.get())
    }
}

impl PositionSource for Cell<Option<Vec3>> {
    fn position(&self) -> Option<Vec3> {
        self.get()
    }
}

impl PositionSource for Vec3 {
    fn position(&self) -> Option<Vec3> {
        Some(*self)
    }
}
