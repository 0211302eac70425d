/// Gamepad input tracker using gilrs.
///
/// Button mapping for the meta actions comes from config.toml.
/// Default mapping:
///   D-pad / Left Stick    →  Movement (one step per press)
///   Start                 →  Pause
///   Select                →  Restart
///   B (East)              →  Quit

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::input::Input;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    Start,
    Select,
}

const BTN_COUNT: usize = 8;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping (loaded from config).
#[derive(Debug, PartialEq)]
struct ActionMap {
    pause: Vec<Btn>,
    restart: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            pause:   vec![Btn::Start],
            restart: vec![Btn::Select],
            quit:    vec![Btn::B],
        }
    }
}

impl ActionMap {
    /// Unknown names are skipped with a warning; an action left with no
    /// valid button keeps its default.
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(action: &str, names: &[String], fallback: Vec<Btn>) -> Vec<Btn> {
            let btns: Vec<Btn> = names
                .iter()
                .filter_map(|s| {
                    let b = Btn::from_name(s);
                    if b.is_none() {
                        log::warn!("gamepad.{action}: unknown button {s:?}");
                    }
                    b
                })
                .collect();
            if btns.is_empty() { fallback } else { btns }
        }
        let d = ActionMap::default();
        ActionMap {
            pause: parse_list("pause", &cfg.pause, d.pause),
            restart: parse_list("restart", &cfg.restart, d.restart),
            quit: parse_list("quit", &cfg.quit, d.quit),
        }
    }
}

/// Digital view of the left stick: which directions are past the deadzone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct StickDirs {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl StickDirs {
    fn from_axes(x: f32, y: f32) -> Self {
        StickDirs {
            up: y > STICK_DEADZONE,
            down: y < -STICK_DEADZONE,
            left: x < -STICK_DEADZONE,
            right: x > STICK_DEADZONE,
        }
    }

    /// Directions that became active since `prev`.
    fn entered_since(self, prev: StickDirs) -> impl Iterator<Item = Input> {
        [
            (self.up && !prev.up, Input::Up),
            (self.down && !prev.down, Input::Down),
            (self.left && !prev.left, Input::Left),
            (self.right && !prev.right, Input::Right),
        ]
        .into_iter()
        .filter_map(|(hit, input)| hit.then_some(input))
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Buttons pressed this frame (indexed by Btn).
    just_pressed: [bool; BTN_COUNT],

    /// Movement commands of this frame, in arrival order.
    moves: Vec<Input>,

    stick: StickDirs,
    stick_x: f32,
    stick_y: f32,

    action_map: ActionMap,

    pub connected: bool,
}

fn btn_index(btn: Btn) -> usize {
    btn as usize
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs_opt, connected) = {
            match Gilrs::new() {
                Ok(g) => {
                    let has_pad = g.gamepads().next().is_some();
                    (Some(g), has_pad)
                }
                Err(e) => {
                    log::warn!("gamepad support unavailable: {e}");
                    (None, false)
                }
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            just_pressed: [false; BTN_COUNT],
            moves: Vec::with_capacity(4),
            stick: StickDirs::default(),
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::from_config(cfg),
            connected,
        }
    }

    pub fn update(&mut self) {
        self.just_pressed = [false; BTN_COUNT];
        self.moves.clear();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.connected = true;
                    self.press(btn);
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.connected = true;
                    match axis {
                        Axis::LeftStickX => self.stick_x = value,
                        Axis::LeftStickY => self.stick_y = value,
                        _ => {}
                    }
                    self.sync_stick();
                }
                EventType::Connected => {
                    log::info!("gamepad connected");
                    self.connected = true;
                }
                EventType::Disconnected => {
                    log::info!("gamepad disconnected");
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                    self.stick = StickDirs::default();
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn press(&mut self, gilrs_btn: Button) {
        // D-pad is movement, not an action button.
        let dir = match gilrs_btn {
            Button::DPadUp    => Some(Input::Up),
            Button::DPadDown  => Some(Input::Down),
            Button::DPadLeft  => Some(Input::Left),
            Button::DPadRight => Some(Input::Right),
            _ => None,
        };
        if let Some(input) = dir {
            self.moves.push(input);
            return;
        }

        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            self.just_pressed[btn_index(btn)] = true;
        }
    }

    /// Stick crossings behave like D-pad presses.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn sync_stick(&mut self) {
        let now = StickDirs::from_axes(self.stick_x, self.stick_y);
        self.moves.extend(now.entered_since(self.stick));
        self.stick = now;
    }

    // ── Action queries (config-driven) ──

    fn any_just_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.just_pressed[btn_index(b)])
    }

    pub fn moves(&self) -> &[Input] {
        &self.moves
    }

    pub fn pause_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.pause)
    }
    pub fn restart_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.restart)
    }
    pub fn quit_pressed(&self) -> bool {
        self.any_just_pressed(&self.action_map.quit)
    }
}
