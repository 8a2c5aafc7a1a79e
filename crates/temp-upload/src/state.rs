//! Upload State Machine
//!
//! Pure transitions, no I/O. The async driver and UI code decide when to call
//! the backend; these methods decide whether they are allowed to.

use std::fmt;

/// What was on display before an upload started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub url: String,
    /// True when the object still lives in the temp namespace
    pub temporary: bool,
}

/// Lifecycle of a single uploaded resource
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    /// Nothing selected
    #[default]
    Empty,
    /// New file on its way to temp storage
    Uploading { previous: Option<Resource> },
    /// Stored in the temp namespace, owned by this form
    Temporary(String),
    /// Submit started; temp object is being moved
    Moving(String),
    /// Referenced by a saved entity, never deleted by the form
    Permanent(String),
    /// Abandoned temp object being deleted
    Deleting(String),
}

/// Data-free view of [`UploadState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Uploading,
    Temporary,
    Moving,
    Permanent,
    Deleting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Empty => "empty",
            Phase::Uploading => "uploading",
            Phase::Temporary => "temporary",
            Phase::Moving => "moving",
            Phase::Permanent => "permanent",
            Phase::Deleting => "deleting",
        };
        f.write_str(name)
    }
}

/// What a submit has to do with the resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// No file; submit without one
    Nothing,
    /// Already permanent; submit as is
    Ready(String),
    /// Move this temp URL first
    Move(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {action} while {phase}")]
    Busy { action: &'static str, phase: Phase },
}

impl UploadState {
    /// Starting state for a form editing an entity that may already have a file
    pub fn existing(url: Option<String>) -> Self {
        match url {
            Some(url) if !url.trim().is_empty() => UploadState::Permanent(url),
            _ => UploadState::Empty,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            UploadState::Empty => Phase::Empty,
            UploadState::Uploading { .. } => Phase::Uploading,
            UploadState::Temporary(_) => Phase::Temporary,
            UploadState::Moving(_) => Phase::Moving,
            UploadState::Permanent(_) => Phase::Permanent,
            UploadState::Deleting(_) => Phase::Deleting,
        }
    }

    /// URL to preview. While uploading, the previous file stays visible.
    pub fn url(&self) -> Option<&str> {
        match self {
            UploadState::Empty | UploadState::Deleting(_) => None,
            UploadState::Uploading { previous } => previous.as_ref().map(|r| r.url.as_str()),
            UploadState::Temporary(url) | UploadState::Moving(url) | UploadState::Permanent(url) => {
                Some(url)
            }
        }
    }

    /// Whether an abandon would have something to delete
    pub fn is_temporary(&self) -> bool {
        matches!(self, UploadState::Temporary(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            UploadState::Uploading { .. } | UploadState::Moving(_) | UploadState::Deleting(_)
        )
    }

    pub(crate) fn busy(&self, action: &'static str) -> TransitionError {
        TransitionError::Busy { action, phase: self.phase() }
    }

    pub fn begin_upload(&mut self) -> Result<(), TransitionError> {
        let previous = match self {
            UploadState::Empty => None,
            UploadState::Temporary(url) => Some(Resource { url: url.clone(), temporary: true }),
            UploadState::Permanent(url) => Some(Resource { url: url.clone(), temporary: false }),
            _ => return Err(self.busy("upload")),
        };
        *self = UploadState::Uploading { previous };
        Ok(())
    }

    /// Record a finished upload. Returns a URL that is no longer referenced
    /// and should be released: the replaced temp object, or the new upload
    /// itself if the state moved on while it was in flight.
    pub fn finish_upload(&mut self, url: String) -> Option<String> {
        match std::mem::take(self) {
            UploadState::Uploading { previous } => {
                *self = UploadState::Temporary(url);
                previous.filter(|r| r.temporary).map(|r| r.url)
            }
            other => {
                *self = other;
                Some(url)
            }
        }
    }

    pub fn fail_upload(&mut self) {
        if let UploadState::Uploading { previous } = self {
            *self = match previous.take() {
                None => UploadState::Empty,
                Some(Resource { url, temporary: true }) => UploadState::Temporary(url),
                Some(Resource { url, temporary: false }) => UploadState::Permanent(url),
            };
        }
    }

    pub fn begin_commit(&mut self) -> Result<Commit, TransitionError> {
        if self.is_busy() {
            return Err(self.busy("submit"));
        }
        Ok(self.claim())
    }

    /// `begin_commit` for a state already known not to be busy
    pub(crate) fn claim(&mut self) -> Commit {
        match self {
            UploadState::Permanent(url) => Commit::Ready(url.clone()),
            UploadState::Temporary(url) => {
                let url = url.clone();
                *self = UploadState::Moving(url.clone());
                Commit::Move(url)
            }
            _ => Commit::Nothing,
        }
    }

    /// Close a move. `None` means the move failed and the temp URL is kept as
    /// the submitted value; either way the form no longer owns the object.
    pub fn finish_commit(&mut self, permanent: Option<String>) -> Option<String> {
        match self {
            UploadState::Moving(temp) => {
                let url = permanent.unwrap_or_else(|| temp.clone());
                *self = UploadState::Permanent(url.clone());
                Some(url)
            }
            _ => None,
        }
    }

    pub fn begin_discard(&mut self) -> Option<String> {
        match self {
            UploadState::Temporary(url) => {
                let url = url.clone();
                *self = UploadState::Deleting(url.clone());
                Some(url)
            }
            _ => None,
        }
    }

    pub fn finish_discard(&mut self) {
        if matches!(self, UploadState::Deleting(_)) {
            *self = UploadState::Empty;
        }
    }

    /// User removed the image from the form
    pub fn clear(&mut self) -> Option<String> {
        match self {
            UploadState::Temporary(_) => self.begin_discard(),
            UploadState::Permanent(_) => {
                *self = UploadState::Empty;
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp(url: &str) -> UploadState {
        UploadState::Temporary(url.to_string())
    }

    #[test]
    fn test_existing_skips_blank_urls() {
        assert_eq!(UploadState::existing(None), UploadState::Empty);
        assert_eq!(UploadState::existing(Some("  ".into())), UploadState::Empty);
        assert_eq!(
            UploadState::existing(Some("/files/a.png".into())),
            UploadState::Permanent("/files/a.png".into())
        );
    }

    #[test]
    fn test_replacing_temp_releases_previous() {
        let mut state = temp("/temp/a.png");
        state.begin_upload().unwrap();
        assert_eq!(state.url(), Some("/temp/a.png"));

        let stale = state.finish_upload("/temp/b.png".into());
        assert_eq!(stale.as_deref(), Some("/temp/a.png"));
        assert_eq!(state, temp("/temp/b.png"));
    }

    #[test]
    fn test_replacing_permanent_keeps_previous() {
        let mut state = UploadState::Permanent("/files/a.png".into());
        state.begin_upload().unwrap();
        assert_eq!(state.finish_upload("/temp/b.png".into()), None);
        assert!(state.is_temporary());
    }

    #[test]
    fn test_failed_upload_restores_previous() {
        let mut state = UploadState::Permanent("/files/a.png".into());
        state.begin_upload().unwrap();
        state.fail_upload();
        assert_eq!(state, UploadState::Permanent("/files/a.png".into()));

        let mut state = UploadState::Empty;
        state.begin_upload().unwrap();
        state.fail_upload();
        assert_eq!(state, UploadState::Empty);
    }

    #[test]
    fn test_upload_finishing_after_reset_is_stale() {
        let mut state = UploadState::Empty;
        state.begin_upload().unwrap();
        state = UploadState::Empty;
        assert_eq!(state.finish_upload("/temp/late.png".into()).as_deref(), Some("/temp/late.png"));
        assert_eq!(state, UploadState::Empty);
    }

    #[test]
    fn test_commit_moves_only_temporary() {
        assert_eq!(UploadState::Empty.begin_commit(), Ok(Commit::Nothing));

        let mut permanent = UploadState::Permanent("/files/a.png".into());
        assert_eq!(permanent.begin_commit(), Ok(Commit::Ready("/files/a.png".into())));

        let mut state = temp("/temp/a.png");
        assert_eq!(state.begin_commit(), Ok(Commit::Move("/temp/a.png".into())));
        assert_eq!(state.phase(), Phase::Moving);
    }

    #[test]
    fn test_commit_while_uploading_is_rejected() {
        let mut state = UploadState::Empty;
        state.begin_upload().unwrap();
        let err = state.begin_commit().unwrap_err();
        assert_eq!(err.to_string(), "cannot submit while uploading");
    }

    #[test]
    fn test_failed_move_falls_back_to_temp_url() {
        let mut state = temp("/temp/a.png");
        state.begin_commit().unwrap();
        assert_eq!(state.finish_commit(None).as_deref(), Some("/temp/a.png"));
        assert_eq!(state, UploadState::Permanent("/temp/a.png".into()));
    }

    #[test]
    fn test_moving_cannot_be_discarded() {
        let mut state = temp("/temp/a.png");
        state.begin_commit().unwrap();
        assert_eq!(state.begin_discard(), None);
        assert_eq!(state.clear(), None);
        assert_eq!(state.phase(), Phase::Moving);
        assert!(state.begin_upload().is_err());
    }

    #[test]
    fn test_discard_then_finish_empties() {
        let mut state = temp("/temp/a.png");
        assert_eq!(state.begin_discard().as_deref(), Some("/temp/a.png"));
        assert!(state.is_busy());
        state.finish_discard();
        assert_eq!(state, UploadState::Empty);
    }

    #[test]
    fn test_clear_permanent_deletes_nothing() {
        let mut state = UploadState::Permanent("/files/a.png".into());
        assert_eq!(state.clear(), None);
        assert_eq!(state, UploadState::Empty);
    }
}
