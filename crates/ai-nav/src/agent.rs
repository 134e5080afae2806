use std::cell::RefCell;
use std::rc::Rc;

use ai_core::Vec3;
use tracing::debug;

use crate::{NavGrid, NavPath, Navigator};

/// Path-following movement provider consumed by behaviors.
///
/// Destinations resolve asynchronously: after `set_destination` the agent may report
/// `is_path_pending` for one or more steps, and callers must poll rather than assume arrival.
pub trait NavAgent {
    fn position(&self) -> Vec3;

    fn set_destination(&mut self, destination: Vec3);

    fn is_path_pending(&self) -> bool;

    /// Distance left along the current path. `f32::INFINITY` when the last destination
    /// could not be reached, `0.0` when there is no destination.
    fn remaining_distance(&self) -> f32;

    /// Halt movement. The destination is kept; `resume` continues toward it.
    fn stop(&mut self);

    fn resume(&mut self);

    fn set_speed(&mut self, speed: f32);

    fn set_stopping_distance(&mut self, distance: f32);
}

/// Shared handle: the host advances the agent, behaviors steer it.
pub type SharedNav = Rc<RefCell<dyn NavAgent>>;

/// Kinematic agent that plans on a [`Navigator`] and walks the path at constant speed.
///
/// A destination set during a step is planned on the next [`GridNavAgent::advance`], so it is
/// pending until then.
#[derive(Debug, Clone)]
pub struct GridNavAgent<N = NavGrid> {
    navigator: N,
    position: Vec3,
    speed: f32,
    stopping_distance: f32,
    stopped: bool,
    destination: Option<Vec3>,
    pending: bool,
    path: Option<NavPath>,
    next_index: usize,
}

impl<N: Navigator> GridNavAgent<N> {
    pub fn new(navigator: N, position: Vec3) -> Self {
        Self {
            navigator,
            position,
            speed: 3.5,
            stopping_distance: 0.0,
            stopped: false,
            destination: None,
            pending: false,
            path: None,
            next_index: 1,
        }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }

    /// Resolve a pending destination, then move along the path for `dt_seconds`.
    pub fn advance(&mut self, dt_seconds: f32) {
        if self.pending {
            self.pending = false;
            self.next_index = 1;
            self.path = self
                .destination
                .and_then(|goal| self.navigator.find_path(self.position, goal));
            if self.path.is_none() {
                debug!(destination = ?self.destination, "nav destination unreachable");
            }
        }

        if self.stopped {
            return;
        }

        let Some(path) = &self.path else {
            return;
        };

        let slack = self.remaining_distance() - self.stopping_distance;
        let mut budget = (self.speed.max(0.0) * dt_seconds.max(0.0)).min(slack.max(0.0));

        let mut current = self.position;
        while self.next_index < path.points.len() && budget > 0.0 {
            let target = path.points[self.next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                self.next_index += 1;
                continue;
            }

            if budget >= dist {
                current = target;
                self.next_index += 1;
                budget -= dist;
                continue;
            }

            current = current + to_target * (budget / dist);
            break;
        }

        self.position = current;
    }
}

impl<N: Navigator> NavAgent for GridNavAgent<N> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.pending = true;
    }

    fn is_path_pending(&self) -> bool {
        self.pending
    }

    fn remaining_distance(&self) -> f32 {
        if self.destination.is_none() {
            return 0.0;
        }
        let Some(path) = &self.path else {
            return f32::INFINITY;
        };

        let mut total = 0.0;
        let mut from = self.position;
        for &point in path.points.iter().skip(self.next_index) {
            total += from.distance(point);
            from = point;
        }
        total
    }

    fn stop(&mut self) {
        self.stopped = true;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_stopping_distance(&mut self, distance: f32) {
        self.stopping_distance = distance;
    }
}
