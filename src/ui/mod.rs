/// Terminal presentation: renderer, keyboard, gamepad and sound.

pub mod gamepad;
pub mod input;
pub mod renderer;
pub mod sound;
