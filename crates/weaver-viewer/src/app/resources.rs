use bevy::prelude::{Resource, Vec2};
use crossbeam_channel::{Receiver, Sender};

use crate::load::Loaded;

#[derive(Resource)]
pub struct LoadChannel {
    pub tx: Sender<Loaded>,
    pub rx: Receiver<Loaded>,
}

impl Default for LoadChannel {
    fn default() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }
}

/// Left-button press position, used to tell clicks from orbit drags.
#[derive(Resource, Default)]
pub struct PointerTracker {
    pub press_pos: Option<Vec2>,
}
