/// Which inputs are held during one tick. The front end decides how a key
/// counts as held; the rules only read this snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub look_up: bool,
    pub look_down: bool,
    pub sprint: bool,
    pub fire: bool,
    pub quit: bool,
}

impl HeldKeys {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }
}
