use crate::framework::logger::Logger;
use crate::schema::route::{contains_any, APPROVE_TOKENS, REJECT_TOKENS};
use crate::Result;

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    Submission,
    CheckIn,
    CheckOut,
    TaskStatus,
    Reminder,
    Default,
}

impl Sound {
    pub fn url(&self) -> &'static str {
        match self {
            Sound::Submission | Sound::TaskStatus | Sound::Default => {
                "https://assets.mixkit.co/active_storage/sfx/2869/2869-preview.mp3"
            }
            Sound::CheckIn => "https://assets.mixkit.co/active_storage/sfx/1/1-preview.mp3",
            Sound::CheckOut => "https://assets.mixkit.co/active_storage/sfx/2/2-preview.mp3",
            Sound::Reminder => "https://assets.mixkit.co/active_storage/sfx/948/948-preview.mp3",
        }
    }
}

const SOUND_TABLE: &[(&str, Sound)] = &[
    ("submission", Sound::Submission),
    ("checkin", Sound::CheckIn),
    ("checkout", Sound::CheckOut),
    ("checkout_request", Sound::CheckOut),
    ("checkout_status", Sound::CheckOut),
    ("task_status", Sound::TaskStatus),
    ("reminder", Sound::Reminder),
    ("default", Sound::Default),
];

/// Approve and reject outcomes share a channel with generic task updates, so
/// they are matched by substring before the table lookup.
pub fn select(kind: Option<&str>) -> Sound {
    let kind = match kind {
        Some(kind) => kind,
        None => return Sound::Default,
    };

    if contains_any(kind, APPROVE_TOKENS) || contains_any(kind, REJECT_TOKENS) {
        return Sound::TaskStatus;
    }

    SOUND_TABLE
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, sound)| *sound)
        .unwrap_or(Sound::Default)
}

pub trait SoundPlayerTrait {
    fn play(&mut self, sound: Sound) -> Result<()>;
}

/// Writes each cue to the log instead of an audio device.
pub struct LoggingSoundPlayer {
    logger: Logger,
}

impl LoggingSoundPlayer {
    pub fn new(logger: Logger) -> Self {
        LoggingSoundPlayer { logger }
    }
}

impl SoundPlayerTrait for LoggingSoundPlayer {
    fn play(&mut self, sound: Sound) -> Result<()> {
        self.logger.info(&format!(
            "[fieldnotify::LoggingSoundPlayer::play] {:?} ({})",
            sound,
            sound.url()
        ));
        Ok(())
    }
}

pub struct SilentSoundPlayer;

impl SoundPlayerTrait for SilentSoundPlayer {
    fn play(&mut self, _sound: Sound) -> Result<()> {
        Ok(())
    }
}

type SoundPlayerRef = Rc<RefCell<dyn SoundPlayerTrait>>;
pub struct SoundPlayer(SoundPlayerRef);

impl SoundPlayer {
    pub fn new(player: impl SoundPlayerTrait + 'static) -> Self {
        SoundPlayer(Rc::new(RefCell::new(player)))
    }

    pub fn silent() -> Self {
        SoundPlayer::new(SilentSoundPlayer)
    }

    pub fn play(&self, sound: Sound) -> Result<()> {
        self.0.borrow_mut().play(sound)
    }
}

impl Clone for SoundPlayer {
    fn clone(&self) -> Self {
        SoundPlayer(self.0.clone())
    }
}
