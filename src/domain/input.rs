/// Directional commands and the queue that buffers them between ticks.
///
/// Commands are pushed in arrival order and drained last-in-first-out,
/// completely, at the start of every tick.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Input {
    Up,
    Down,
    Left,
    Right,
}

impl Input {
    /// Grid offset (dx, dy) of this command. y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Input::Up => (0, -1),
            Input::Down => (0, 1),
            Input::Left => (-1, 0),
            Input::Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: Vec<Input>,
}

impl InputQueue {
    pub fn new() -> Self {
        InputQueue { pending: Vec::with_capacity(8) }
    }

    pub fn push(&mut self, input: Input) {
        self.pending.push(input);
    }

    /// Take the most recently pushed command.
    pub fn pop(&mut self) -> Option<Input> {
        self.pending.pop()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
