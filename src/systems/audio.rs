//! Background music system
//!
//! The output device is opened lazily on the first play request, so a
//! machine without audio only notices when the music button is pressed.

use orrery_core::{AssetError, MusicBackend, MusicToggle};
use crate::config::AudioConfig;

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::PathBuf;

    use orrery_core::{AssetError, MusicBackend};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    /// Looping playback of one file through rodio
    pub struct RodioBackend {
        path: PathBuf,
        volume: f32,
        // The stream must outlive the sink
        output: Option<(OutputStream, OutputStreamHandle)>,
        sink: Option<Sink>,
    }

    impl RodioBackend {
        pub fn new(path: impl Into<PathBuf>, volume: f32) -> Self {
            Self {
                path: path.into(),
                volume: volume.clamp(0.0, 1.0),
                output: None,
                sink: None,
            }
        }

        fn start(&mut self) -> Result<Sink, AssetError> {
            if !self.path.exists() {
                return Err(AssetError::NotFound(self.path.display().to_string()));
            }
            let file = File::open(&self.path)?;
            let source = Decoder::new(BufReader::new(file))
                .map_err(|e| AssetError::Decode(format!("{}: {}", self.path.display(), e)))?;

            if self.output.is_none() {
                let output = OutputStream::try_default()
                    .map_err(|e| AssetError::Output(e.to_string()))?;
                self.output = Some(output);
            }
            let Some((_, handle)) = self.output.as_ref() else {
                return Err(AssetError::Output("no output stream".to_string()));
            };

            let sink = Sink::try_new(handle).map_err(|e| AssetError::Output(e.to_string()))?;
            sink.set_volume(self.volume);
            sink.append(source.repeat_infinite());
            log::info!("Playing {}", self.path.display());
            Ok(sink)
        }
    }

    impl MusicBackend for RodioBackend {
        fn play(&mut self) -> Result<(), AssetError> {
            match &self.sink {
                Some(sink) => sink.play(),
                None => self.sink = Some(self.start()?),
            }
            Ok(())
        }

        fn pause(&mut self) {
            if let Some(sink) = &self.sink {
                sink.pause();
            }
        }
    }
}

#[cfg(feature = "audio")]
pub use rodio_backend::RodioBackend;

/// Backend used when audio is disabled
pub struct NullBackend;

impl MusicBackend for NullBackend {
    fn play(&mut self) -> Result<(), AssetError> {
        Err(AssetError::Output("audio disabled".to_string()))
    }

    fn pause(&mut self) {}
}

/// Whichever backend the build and config select
pub enum AudioBackend {
    #[cfg(feature = "audio")]
    Rodio(RodioBackend),
    Null(NullBackend),
}

impl AudioBackend {
    fn from_config(config: &AudioConfig) -> Self {
        if !config.enabled {
            log::info!("Music disabled in config");
            return AudioBackend::Null(NullBackend);
        }
        #[cfg(feature = "audio")]
        {
            AudioBackend::Rodio(RodioBackend::new(&config.music_path, config.volume))
        }
        #[cfg(not(feature = "audio"))]
        {
            log::info!("Built without audio support");
            AudioBackend::Null(NullBackend)
        }
    }
}

impl MusicBackend for AudioBackend {
    fn play(&mut self) -> Result<(), AssetError> {
        match self {
            #[cfg(feature = "audio")]
            AudioBackend::Rodio(backend) => backend.play(),
            AudioBackend::Null(backend) => backend.play(),
        }
    }

    fn pause(&mut self) {
        match self {
            #[cfg(feature = "audio")]
            AudioBackend::Rodio(backend) => backend.pause(),
            AudioBackend::Null(backend) => backend.pause(),
        }
    }
}

/// Owns the music toggle
pub struct AudioSystem {
    music: MusicToggle<AudioBackend>,
}

impl AudioSystem {
    /// Create from config, starting playback if `autoplay` is set
    pub fn new(config: &AudioConfig) -> Self {
        let mut music = MusicToggle::new(AudioBackend::from_config(config));
        if config.enabled && config.autoplay {
            music.toggle();
        }
        Self { music }
    }

    /// Flip music on or off, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music.toggle()
    }

    pub fn is_playing(&self) -> bool {
        self.music.is_playing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled() -> AudioConfig {
        AudioConfig { enabled: false, ..AudioConfig::default() }
    }

    #[test]
    fn test_disabled_audio_stays_off() {
        let mut audio = AudioSystem::new(&disabled());
        assert!(!audio.is_playing());
        assert!(!audio.toggle_music());
        assert!(!audio.is_playing());
    }

    #[test]
    fn test_null_backend_reports_output_error() {
        let mut backend = NullBackend;
        match backend.play() {
            Err(AssetError::Output(msg)) => assert_eq!(msg, "audio disabled"),
            other => panic!("Expected Output error, got {:?}", other),
        }
    }

    #[test]
    fn test_autoplay_ignored_when_disabled() {
        let config = AudioConfig { autoplay: true, ..disabled() };
        let audio = AudioSystem::new(&config);
        assert!(!audio.is_playing());
    }

    #[cfg(feature = "audio")]
    #[test]
    fn test_missing_file_leaves_music_off() {
        let config = AudioConfig {
            music_path: "/nonexistent/background.mp3".to_string(),
            ..AudioConfig::default()
        };
        let mut audio = AudioSystem::new(&config);
        assert!(!audio.toggle_music());
        assert!(!audio.is_playing());
    }

    #[cfg(feature = "audio")]
    #[test]
    fn test_rodio_missing_file_is_not_found() {
        let mut backend = RodioBackend::new("/nonexistent/background.mp3", 0.5);
        assert!(matches!(backend.play(), Err(AssetError::NotFound(_))));
    }
}
