/// Fire-and-forget sound cues.
///
/// The game core only reports `GameEvent`s; this module decides which of them
/// are audible and hands them to whichever sink is available. With the
/// `sound` feature the cues are synthesized tones played through rodio;
/// otherwise the terminal bell marks the important ones.

use std::io::Write;

use shooting_birds::entities::Kind;
use shooting_birds::events::GameEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Shot,
    Empty,
    Reload,
    Hit,
    DarkHit,
    Beep,
    Warning,
    RoundOver,
}

pub fn sound_for(event: &GameEvent) -> Option<Sound> {
    match event {
        GameEvent::Shot { .. } => Some(Sound::Shot),
        GameEvent::EmptyMagazine => Some(Sound::Empty),
        GameEvent::Reloaded => Some(Sound::Reload),
        GameEvent::Hit {
            kind: Kind::DarkBird,
            ..
        } => Some(Sound::DarkHit),
        GameEvent::Hit { .. } => Some(Sound::Hit),
        GameEvent::CountdownBeep { .. } => Some(Sound::Beep),
        GameEvent::TimeWarning { .. } => Some(Sound::Warning),
        GameEvent::RoundOver { .. } => Some(Sound::RoundOver),
        _ => None,
    }
}

pub trait AudioSink {
    fn play(&mut self, sound: Sound);
}

pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) {}
}

/// Rings the terminal bell for cues the player must not miss.
pub struct Bell;

impl AudioSink for Bell {
    fn play(&mut self, sound: Sound) {
        if matches!(sound, Sound::Empty | Sound::Warning | Sound::RoundOver) {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

#[cfg(feature = "sound")]
mod synth {
    use std::time::Duration;

    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{AudioSink, Sound};

    pub struct Synth {
        // Dropping the stream silences everything.
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl Synth {
        pub fn new() -> anyhow::Result<Self> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Synth {
                _stream: stream,
                handle,
            })
        }

        fn tone(&self, freq: f32, millis: u64, gain: f32) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    let source = SineWave::new(freq)
                        .take_duration(Duration::from_millis(millis))
                        .amplify(gain);
                    sink.append(source);
                    sink.detach(); // Play in background
                }
                Err(err) => tracing::warn!("audio sink unavailable: {err}"),
            }
        }
    }

    impl AudioSink for Synth {
        fn play(&mut self, sound: Sound) {
            match sound {
                Sound::Shot => self.tone(180.0, 60, 0.25),
                Sound::Empty => self.tone(90.0, 40, 0.20),
                Sound::Reload => self.tone(320.0, 120, 0.15),
                Sound::Hit => self.tone(880.0, 90, 0.15),
                Sound::DarkHit => self.tone(140.0, 250, 0.20),
                Sound::Beep => self.tone(660.0, 120, 0.15),
                Sound::Warning => self.tone(990.0, 80, 0.12),
                Sound::RoundOver => self.tone(440.0, 400, 0.15),
            }
        }
    }
}

/// Pick the best sink for this build and settings.
pub fn open(enabled: bool) -> Box<dyn AudioSink> {
    if !enabled {
        return Box::new(Silent);
    }
    #[cfg(feature = "sound")]
    {
        match synth::Synth::new() {
            Ok(synth) => return Box::new(synth),
            Err(err) => tracing::warn!("no audio output, using terminal bell: {err}"),
        }
    }
    Box::new(Bell)
}
