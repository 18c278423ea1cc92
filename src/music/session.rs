//! Playback session of one guild as an explicit state machine.
//!
//! Every command maps to a guarded transition. A rejected transition leaves
//! the state untouched and carries the reply for the user.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No voice session for the guild.
    #[default]
    Idle,
    Playing,
    Paused,
}

/// What a `skip` does to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipAction {
    /// Only one track left: skipping it ends the session like `stop`.
    Stop,
    /// Move on to the next queued track.
    Advance,
}

/// Precondition failures, reported to the user without changing any state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    NotInVoice,
    NoSession,
    AlreadyPaused,
    AlreadyPlaying,
    EmptyQueue,
    AlreadyQueued,
    /// The current track is still loading and cannot be skipped yet.
    NotStarted,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInVoice => write!(f, "You need to be in a voice channel to do that."),
            Self::NoSession => write!(f, "This server does not have an active player session."),
            Self::AlreadyPaused => write!(f, "The player is already paused."),
            Self::AlreadyPlaying => write!(f, "The player is already playing."),
            Self::EmptyQueue => write!(f, "The queue is empty."),
            Self::AlreadyQueued => write!(f, "The song is already in the playlist."),
            Self::NotStarted => write!(f, "The song is still loading, try again in a moment."),
        }
    }
}

impl SessionState {
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }

    /// A track was queued. Returns the next state and whether playback has
    /// to be started; an active session is never restarted.
    pub fn on_queued(self) -> (Self, bool) {
        match self {
            Self::Idle => (Self::Playing, true),
            other => (other, false),
        }
    }

    pub fn pause(self) -> Result<Self, Rejection> {
        match self {
            Self::Idle => Err(Rejection::NoSession),
            Self::Paused => Err(Rejection::AlreadyPaused),
            Self::Playing => Ok(Self::Paused),
        }
    }

    pub fn resume(self) -> Result<Self, Rejection> {
        match self {
            Self::Idle => Err(Rejection::NoSession),
            Self::Playing => Err(Rejection::AlreadyPlaying),
            Self::Paused => Ok(Self::Playing),
        }
    }

    pub fn skip(self, remaining: usize) -> Result<SkipAction, Rejection> {
        match self {
            Self::Idle => Err(Rejection::NoSession),
            _ if remaining <= 1 => Ok(SkipAction::Stop),
            _ => Ok(SkipAction::Advance),
        }
    }

    pub fn stop(self) -> Result<Self, Rejection> {
        match self {
            Self::Idle => Err(Rejection::NoSession),
            _ => Ok(Self::Idle),
        }
    }

    pub fn check_queue(self, len: usize) -> Result<(), Rejection> {
        match self {
            Self::Idle => Err(Rejection::NoSession),
            _ if len == 0 => Err(Rejection::EmptyQueue),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use SessionState::*;

    #[test]
    fn test_pause_transitions() {
        assert_eq!(Idle.pause(), Err(Rejection::NoSession));
        assert_eq!(Playing.pause(), Ok(Paused));
        assert_eq!(Paused.pause(), Err(Rejection::AlreadyPaused));
    }

    #[test]
    fn test_resume_transitions() {
        assert_eq!(Idle.resume(), Err(Rejection::NoSession));
        assert_eq!(Playing.resume(), Err(Rejection::AlreadyPlaying));
        assert_eq!(Paused.resume(), Ok(Playing));
    }

    #[test]
    fn test_skip_last_track_is_stop() {
        assert_eq!(Idle.skip(3), Err(Rejection::NoSession));
        assert_eq!(Playing.skip(1), Ok(SkipAction::Stop));
        assert_eq!(Paused.skip(1), Ok(SkipAction::Stop));
        assert_eq!(Playing.skip(2), Ok(SkipAction::Advance));
        assert_eq!(Paused.skip(5), Ok(SkipAction::Advance));
    }

    #[test]
    fn test_stop_requires_session() {
        assert_eq!(Idle.stop(), Err(Rejection::NoSession));
        assert_eq!(Playing.stop(), Ok(Idle));
        assert_eq!(Paused.stop(), Ok(Idle));
    }

    #[test]
    fn test_queue_check() {
        assert_eq!(Idle.check_queue(4), Err(Rejection::NoSession));
        assert_eq!(Playing.check_queue(0), Err(Rejection::EmptyQueue));
        assert_eq!(Paused.check_queue(2), Ok(()));
    }

    #[test]
    fn test_queued_never_restarts_active_session() {
        assert_eq!(Idle.on_queued(), (Playing, true));
        assert_eq!(Playing.on_queued(), (Playing, false));
        assert_eq!(Paused.on_queued(), (Paused, false));
    }
}
