//! Background-music toggle state
//!
//! The playing flag lives here; actual audio output sits behind
//! [`MusicBackend`] so the toggle logic runs without a sound device.

use crate::asset_error::AssetError;

/// Something that can start and pause a looping track
pub trait MusicBackend {
    /// Start or resume playback
    fn play(&mut self) -> Result<(), AssetError>;
    /// Pause playback, keeping the position
    fn pause(&mut self);
}

/// On/off state for the background track
pub struct MusicToggle<B: MusicBackend> {
    backend: B,
    playing: bool,
}

impl<B: MusicBackend> MusicToggle<B> {
    /// Create a toggle in the stopped state
    pub fn new(backend: B) -> Self {
        Self { backend, playing: false }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused, returning the new state
    ///
    /// If playback cannot start the flag stays off.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.backend.pause();
            self.playing = false;
        } else {
            match self.backend.play() {
                Ok(()) => self.playing = true,
                Err(e) => log::warn!("Music unavailable: {}", e),
            }
        }
        log::info!("Music {}", if self.playing { "on" } else { "off" });
        self.playing
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        plays: u32,
        pauses: u32,
        fail: bool,
    }

    impl MusicBackend for Recorder {
        fn play(&mut self) -> Result<(), AssetError> {
            if self.fail {
                return Err(AssetError::NotFound("background.mp3".to_string()));
            }
            self.plays += 1;
            Ok(())
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }
    }

    #[test]
    fn test_starts_stopped() {
        let toggle = MusicToggle::new(Recorder::default());
        assert!(!toggle.is_playing());
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut toggle = MusicToggle::new(Recorder::default());
        assert!(toggle.toggle());
        assert!(!toggle.toggle());
        assert!(!toggle.is_playing());
        assert_eq!(toggle.backend().plays, 1);
        assert_eq!(toggle.backend().pauses, 1);
    }

    #[test]
    fn test_failed_play_leaves_flag_off() {
        let mut toggle = MusicToggle::new(Recorder { fail: true, ..Default::default() });
        assert!(!toggle.toggle());
        assert!(!toggle.is_playing());
        assert_eq!(toggle.backend().pauses, 0);
    }
}
