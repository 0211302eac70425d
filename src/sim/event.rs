/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound; the simulation never
/// reads them back.

use crate::domain::key::KeyFamily;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PlayerMoved { x: usize, y: usize },
    KeyCollected { family: KeyFamily, x: usize, y: usize },
    LocksOpened { family: KeyFamily, count: usize },
    BlockPushed { x: usize, y: usize },
    BlockStartedFalling { x: usize, y: usize },
    BlockLanded { x: usize, y: usize },
}
