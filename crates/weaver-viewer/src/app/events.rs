use bevy::prelude::Event;
use weaver_core::NodeId;

/// Click released on a point.
#[derive(Event)]
pub struct Picked(pub NodeId);

/// Click released over empty space.
#[derive(Event)]
pub struct PointerMissed;

#[derive(Event)]
pub struct FlyTo(pub NodeId);
