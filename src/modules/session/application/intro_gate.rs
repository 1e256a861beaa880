// src/modules/session/application/intro_gate.rs

/// Session-scoped, one-shot gate for the landing intro animation.
#[derive(Debug, Default)]
pub struct IntroGate {
    played: bool,
}

impl IntroGate {
    /// Returns `true` exactly once; every later call reports the intro as
    /// already played.
    pub fn should_play(&mut self) -> bool {
        !std::mem::replace(&mut self.played, true)
    }

    pub fn has_played(&self) -> bool {
        self.played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_exactly_once() {
        let mut gate = IntroGate::default();
        assert!(gate.should_play());
        assert!(!gate.should_play());
        assert!(gate.has_played());
    }
}
