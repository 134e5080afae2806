use std::cell::Cell;
use std::rc::Rc;

use ai_core::{PositionSource, TargetRef, Vec3};

#[test]
fn cell_target_reports_latest_position() {
    let player = Rc::new(Cell::new(Vec3::new(1.0, 0.0, 1.0)));
    let target: TargetRef = player.clone();

    assert_eq!(target.position(), Some(Vec3::new(1.0, 0.0, 1.0)));
    player.set(Vec3::new(4.0, 0.0, 2.0));
    assert_eq!(target.position(), Some(Vec3::new(4.0, 0.0, 2.0)));
}

#[test]
fn vanished_target_reports_none() {
    let player = Rc::new(Cell::new(Some(Vec3::ZERO)));
    let target: TargetRef = player.clone();
    player.set(None);
    assert_eq!(target.position(), None);
}
