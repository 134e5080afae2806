use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ai_core::Vec3;

/// Identifier of the projectile template a host should instantiate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefabId(pub Cow<'static, str>);

impl PrefabId {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PrefabId {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&'static str> for PrefabId {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl fmt::Display for PrefabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a ranged behavior launches.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub prefab: PrefabId,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileLaunch {
    pub prefab: PrefabId,
    pub origin: Vec3,
    /// Unit launch direction.
    pub direction: Vec3,
    pub velocity: Vec3,
}

/// Effect sink for launched projectiles. Flight and collision belong to the host.
pub trait ProjectileSpawner {
    fn spawn(&mut self, launch: ProjectileLaunch);
}

pub type SharedSpawner = Rc<RefCell<dyn ProjectileSpawner>>;

#[derive(Debug, Default)]
pub struct RecordingSpawner {
    pub launches: Vec<ProjectileLaunch>,
}

impl RecordingSpawner {
    pub fn count(&self, prefab: &str) -> usize {
        self.launches
            .iter()
            .filter(|l| l.prefab.as_str() == prefab)
            .count()
    }
}

impl ProjectileSpawner for RecordingSpawner {
    fn spawn(&mut self, launch: ProjectileLaunch) {
        self.launches.push(launch);
    }
}
