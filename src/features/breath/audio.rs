//! Audio catalog and playback backends.
//!
//! The driver only ever issues play/pause/rewind against a fixed catalog
//! of nine tracks. Playback is fire-and-forget: nothing is awaited.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::ValueEnum;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use serde::{Deserialize, Serialize};

use super::phase::Cue;
use crate::error::BreathError;

/// Background music choice for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MusicTrack {
    /// Silence.
    #[default]
    None,
    GentlePiano,
    RiverSounds,
    AmbientChimes,
}

impl MusicTrack {
    /// The catalog track to play, if any.
    #[must_use]
    pub const fn track(self) -> Option<Track> {
        match self {
            Self::None => None,
            Self::GentlePiano => Some(Track::GentlePiano),
            Self::RiverSounds => Some(Track::RiverSounds),
            Self::AmbientChimes => Some(Track::AmbientChimes),
        }
    }
}

impl std::fmt::Display for MusicTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.track() {
            Some(track) => write!(f, "{}", track.id()),
            None => write!(f, "none"),
        }
    }
}

/// Every sound the driver can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    GentlePiano,
    RiverSounds,
    AmbientChimes,
    CueInhale,
    CueHold,
    CueExhale,
    InstructionInhale,
    InstructionHold,
    InstructionExhale,
}

impl Track {
    pub const ALL: [Self; 9] = [
        Self::GentlePiano,
        Self::RiverSounds,
        Self::AmbientChimes,
        Self::CueInhale,
        Self::CueHold,
        Self::CueExhale,
        Self::InstructionInhale,
        Self::InstructionHold,
        Self::InstructionExhale,
    ];

    /// Phase-entry cue track.
    #[must_use]
    pub const fn cue(cue: Cue) -> Self {
        match cue {
            Cue::Inhale => Self::CueInhale,
            Cue::Hold => Self::CueHold,
            Cue::Exhale => Self::CueExhale,
        }
    }

    /// Spoken instruction track.
    #[must_use]
    pub const fn instruction(cue: Cue) -> Self {
        match cue {
            Cue::Inhale => Self::InstructionInhale,
            Cue::Hold => Self::InstructionHold,
            Cue::Exhale => Self::InstructionExhale,
        }
    }

    #[must_use]
    pub const fn is_music(self) -> bool {
        matches!(self, Self::GentlePiano | Self::RiverSounds | Self::AmbientChimes)
    }

    /// Stable identifier used in logs and listings.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::GentlePiano => "gentle-piano",
            Self::RiverSounds => "river-sounds",
            Self::AmbientChimes => "ambient-chimes",
            Self::CueInhale => "phase-inhale",
            Self::CueHold => "phase-hold",
            Self::CueExhale => "phase-exhale",
            Self::InstructionInhale => "instruction-inhale",
            Self::InstructionHold => "instruction-hold",
            Self::InstructionExhale => "instruction-exhale",
        }
    }

    /// File name looked up in the sounds directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::GentlePiano => "piano-sample.mp3",
            Self::RiverSounds => "river-sample.mp3",
            Self::AmbientChimes => "ambient-chimes.mp3",
            Self::CueInhale => "Inhale.mp3",
            Self::CueHold => "Hold.mp3",
            Self::CueExhale => "Exhale.mp3",
            Self::InstructionInhale => "Inhale-Instruction.mp3",
            Self::InstructionHold => "Hold-Instruction.mp3",
            Self::InstructionExhale => "Exhale-Instruction.mp3",
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Sink for audio commands.
#[cfg_attr(test, mockall::automock)]
pub trait AudioSink {
    /// Start or continue playback.
    fn play(&mut self, track: Track);
    /// Pause playback, keeping the position.
    fn pause(&mut self, track: Track);
    /// Seek back to the start.
    fn rewind(&mut self, track: Track);
    /// Whether the track restarts when it ends.
    fn set_looping(&mut self, track: Track, looping: bool);
}

/// Discards every command. Used with `--no-audio` or when no output device exists.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _track: Track) {}
    fn pause(&mut self, _track: Track) {}
    fn rewind(&mut self, _track: Track) {}
    fn set_looping(&mut self, _track: Track, _looping: bool) {}
}

struct Channel {
    data: Option<Arc<[u8]>>,
    sink: Option<Sink>,
    looping: bool,
}

/// Plays catalog tracks from a directory of sound files through rodio.
///
/// Files are read once up front. A missing or undecodable file silences
/// that track only.
pub struct RodioAudio {
    /// Output stream; must outlive every sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    channels: HashMap<Track, Channel>,
}

impl RodioAudio {
    /// Open the default output device and load the catalog from `sounds_dir`.
    ///
    /// # Errors
    ///
    /// Returns `BreathError::Audio` if no output device is available.
    pub fn new(sounds_dir: &Path) -> Result<Self, BreathError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| BreathError::Audio(format!("Failed to open audio output: {e}")))?;

        let channels = Track::ALL
            .iter()
            .map(|&track| {
                let channel = Channel {
                    data: load_track(sounds_dir, track),
                    sink: None,
                    looping: false,
                };
                (track, channel)
            })
            .collect();

        tracing::info!(sounds_dir = %sounds_dir.display(), "Audio output initialized");

        Ok(Self {
            _stream: stream,
            handle,
            channels,
        })
    }

    fn channel(&mut self, track: Track) -> Option<&mut Channel> {
        self.channels.get_mut(&track)
    }
}

/// Path a track is loaded from.
#[must_use]
pub fn track_path(sounds_dir: &Path, track: Track) -> PathBuf {
    sounds_dir.join(track.file_name())
}

fn load_track(sounds_dir: &Path, track: Track) -> Option<Arc<[u8]>> {
    let path = track_path(sounds_dir, track);
    match std::fs::read(&path) {
        Ok(bytes) => Some(Arc::from(bytes)),
        Err(e) => {
            tracing::warn!(track = %track, path = %path.display(), "Sound file unavailable: {e}");
            None
        }
    }
}

impl AudioSink for RodioAudio {
    fn play(&mut self, track: Track) {
        let handle = self.handle.clone();
        let Some(channel) = self.channel(track) else {
            return;
        };
        let Some(data) = channel.data.clone() else {
            return;
        };

        if channel.sink.is_none() {
            match Sink::try_new(&handle) {
                Ok(sink) => channel.sink = Some(sink),
                Err(e) => {
                    tracing::warn!(track = %track, "Failed to create audio sink: {e}");
                    return;
                }
            }
        }
        let looping = channel.looping;
        let Some(sink) = channel.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            match Decoder::new(Cursor::new(data)) {
                Ok(source) if looping => sink.append(source.repeat_infinite()),
                Ok(source) => sink.append(source),
                Err(e) => {
                    tracing::warn!(track = %track, "Failed to decode sound: {e}");
                    return;
                }
            }
        }
        sink.play();
    }

    fn pause(&mut self, track: Track) {
        if let Some(sink) = self.channel(track).and_then(|c| c.sink.as_ref()) {
            sink.pause();
        }
    }

    fn rewind(&mut self, track: Track) {
        // Clearing drops the queued source; the next play decodes from the start.
        if let Some(sink) = self.channel(track).and_then(|c| c.sink.as_ref()) {
            sink.clear();
        }
    }

    fn set_looping(&mut self, track: Track, looping: bool) {
        if let Some(channel) = self.channel(track) {
            channel.looping = looping;
        }
    }
}

/// Pick the rodio backend, falling back to silence when it cannot start.
#[must_use]
pub fn open_audio(enabled: bool, sounds_dir: &Path) -> Box<dyn AudioSink> {
    if !enabled {
        return Box::new(NullAudio);
    }
    match RodioAudio::new(sounds_dir) {
        Ok(audio) => Box::new(audio),
        Err(e) => {
            tracing::warn!("{e}; continuing without sound");
            Box::new(NullAudio)
        }
    }
}

impl AudioSink for Box<dyn AudioSink> {
    fn play(&mut self, track: Track) {
        (**self).play(track);
    }
    fn pause(&mut self, track: Track) {
        (**self).pause(track);
    }
    fn rewind(&mut self, track: Track) {
        (**self).rewind(track);
    }
    fn set_looping(&mut self, track: Track, looping: bool) {
        (**self).set_looping(track, looping);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_music_track_mapping() {
        assert_eq!(MusicTrack::None.track(), None);
        assert_eq!(MusicTrack::RiverSounds.track(), Some(Track::RiverSounds));
        assert_eq!(MusicTrack::GentlePiano.to_string(), "gentle-piano");
        assert_eq!(MusicTrack::None.to_string(), "none");
    }

    #[test]
    fn test_catalog_partitions() {
        let music = Track::ALL.iter().filter(|t| t.is_music()).count();
        assert_eq!(music, 3);
        assert_eq!(Track::cue(Cue::Hold), Track::CueHold);
        assert_eq!(Track::instruction(Cue::Exhale), Track::InstructionExhale);
        assert!(!Track::CueInhale.is_music());
    }

    #[test]
    fn test_track_path() {
        let dir = Path::new("/sounds");
        assert_eq!(
            track_path(dir, Track::InstructionHold),
            PathBuf::from("/sounds/Hold-Instruction.mp3")
        );
    }

    #[test]
    fn test_disabled_audio_is_null() {
        let mut audio = open_audio(false, Path::new("/nonexistent"));
        audio.play(Track::CueInhale);
        audio.rewind(Track::CueInhale);
    }

    #[test]
    fn test_music_track_yaml_names() {
        let parsed: MusicTrack = serde_yaml::from_str("ambient-chimes").unwrap();
        assert_eq!(parsed, MusicTrack::AmbientChimes);
        let parsed: MusicTrack = serde_yaml::from_str("none").unwrap();
        assert_eq!(parsed, MusicTrack::None);
    }
}
