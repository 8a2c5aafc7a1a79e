//! Async Driver
//!
//! Sequences backend calls around the state machine. State lives behind a
//! [`StateCell`] so the same driver works with a `RefCell` in tests and a
//! reactive signal in the UI.

use std::cell::RefCell;
use std::fmt;

use crate::state::{Commit, TransitionError, UploadState};

/// Storage endpoints the lifecycle needs
#[allow(async_fn_in_trait)]
pub trait UploadBackend {
    type File;
    type Error: fmt::Display;

    /// Store a file in the temp namespace, returning its URL
    async fn upload_temp(&self, file: Self::File) -> Result<String, Self::Error>;
    /// Move a temp object to permanent storage, returning the new URL
    async fn move_to_permanent(&self, temp_url: &str) -> Result<String, Self::Error>;
    async fn delete(&self, url: &str) -> Result<(), Self::Error>;
}

/// Holder of the current [`UploadState`]
pub trait StateCell {
    fn get(&self) -> UploadState;
    fn set(&self, state: UploadState);

    fn update<R>(&self, f: impl FnOnce(&mut UploadState) -> R) -> R {
        let mut state = self.get();
        let result = f(&mut state);
        self.set(state);
        result
    }
}

impl StateCell for RefCell<UploadState> {
    fn get(&self) -> UploadState {
        self.borrow().clone()
    }

    fn set(&self, state: UploadState) {
        *self.borrow_mut() = state;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError<E> {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("upload failed: {0}")]
    Upload(E),
}

/// Result of a successful [`replace`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replaced {
    pub url: String,
    /// Object that is no longer referenced; pass to [`release`]
    pub stale: Option<String>,
}

/// Outcome of [`discard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// No temp object outstanding
    Nothing,
    /// User chose to keep it
    Declined,
    Deleted,
    /// Delete call failed; already logged
    Failed,
}

/// Upload `file` to temp storage, replacing whatever the cell holds.
///
/// The replaced temp object is not deleted here. The caller releases
/// `stale` without waiting on it.
pub async fn replace<B, C>(backend: &B, cell: &C, file: B::File) -> Result<Replaced, LifecycleError<B::Error>>
where
    B: UploadBackend,
    C: StateCell,
{
    cell.update(UploadState::begin_upload)?;
    match backend.upload_temp(file).await {
        Ok(url) => {
            let stale = cell.update(|state| state.finish_upload(url.clone()));
            Ok(Replaced { url, stale })
        }
        Err(e) => {
            cell.update(UploadState::fail_upload);
            Err(LifecycleError::Upload(e))
        }
    }
}

/// Best-effort delete; failures are logged only
pub async fn release<B: UploadBackend>(backend: &B, url: &str) {
    if let Err(e) = backend.delete(url).await {
        log::warn!("[temp-upload] failed to delete {url}: {e}");
    }
}

/// Make the resource permanent and return the URL to submit.
///
/// A failed move is swallowed: the temp URL is returned instead and the
/// resource is treated as committed.
pub async fn commit<B, C>(backend: &B, cell: &C) -> Result<Option<String>, TransitionError>
where
    B: UploadBackend,
    C: StateCell,
{
    let claimed = cell.update(UploadState::begin_commit)?;
    Ok(settle(backend, cell, claimed).await)
}

/// Claim every cell of a form for one submit, before anything is awaited.
///
/// Either all cells leave the temporary state or none do: if any cell is
/// busy, nothing is changed. A claimed cell is `Moving`, so a discard that
/// runs while the submit is in flight leaves it alone.
pub fn claim_all<C: StateCell, const N: usize>(cells: [&C; N]) -> Result<[Commit; N], TransitionError> {
    if let Some(state) = cells.iter().map(|cell| cell.get()).find(UploadState::is_busy) {
        return Err(state.busy("submit"));
    }
    Ok(cells.map(|cell| cell.update(UploadState::claim)))
}

/// Finish a claimed commit and return the URL to submit.
///
/// The result depends only on `claimed` and the backend; the cell is told
/// about the outcome but never read back.
pub async fn settle<B, C>(backend: &B, cell: &C, claimed: Commit) -> Option<String>
where
    B: UploadBackend,
    C: StateCell,
{
    match claimed {
        Commit::Nothing => None,
        Commit::Ready(url) => Some(url),
        Commit::Move(temp) => {
            let permanent = match backend.move_to_permanent(&temp).await {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("[temp-upload] move failed for {temp}, submitting temp url: {e}");
                    None
                }
            };
            let url = permanent.clone().unwrap_or(temp);
            cell.update(|state| state.finish_commit(permanent));
            Some(url)
        }
    }
}

/// Delete an outstanding temp object after asking `confirm`.
///
/// `confirm` is only called when there is something to delete.
pub async fn discard<B, C>(backend: &B, cell: &C, confirm: impl FnOnce() -> bool) -> Discard
where
    B: UploadBackend,
    C: StateCell,
{
    if !cell.get().is_temporary() {
        return Discard::Nothing;
    }
    if !confirm() {
        return Discard::Declined;
    }
    let Some(url) = cell.update(UploadState::begin_discard) else {
        return Discard::Nothing;
    };
    let result = backend.delete(&url).await;
    cell.update(UploadState::finish_discard);
    match result {
        Ok(()) => Discard::Deleted,
        Err(e) => {
            log::warn!("[temp-upload] failed to delete {url}: {e}");
            Discard::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use futures::executor::block_on;

    /// Records every call; fails the operations it is told to fail
    #[derive(Default)]
    struct FakeBackend {
        calls: RefCell<Vec<String>>,
        fail_upload: bool,
        fail_move: bool,
        fail_delete: bool,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
        }
    }

    impl UploadBackend for FakeBackend {
        type File = &'static str;
        type Error = String;

        async fn upload_temp(&self, file: &'static str) -> Result<String, String> {
            self.calls.borrow_mut().push(format!("upload {file}"));
            if self.fail_upload {
                return Err("offline".into());
            }
            Ok(format!("/temp/{file}"))
        }

        async fn move_to_permanent(&self, temp_url: &str) -> Result<String, String> {
            self.calls.borrow_mut().push(format!("move {temp_url}"));
            if self.fail_move {
                return Err("offline".into());
            }
            Ok(temp_url.replace("/temp/", "/files/"))
        }

        async fn delete(&self, url: &str) -> Result<(), String> {
            self.calls.borrow_mut().push(format!("delete {url}"));
            if self.fail_delete {
                return Err("offline".into());
            }
            Ok(())
        }
    }

    fn cell(state: UploadState) -> RefCell<UploadState> {
        RefCell::new(state)
    }

    #[test]
    fn test_replace_reports_stale_temp() {
        let backend = FakeBackend::default();
        let cell = cell(UploadState::Temporary("/temp/old.png".into()));

        let replaced = block_on(replace(&backend, &cell, "new.png")).unwrap();
        assert_eq!(replaced.url, "/temp/new.png");
        assert_eq!(replaced.stale.as_deref(), Some("/temp/old.png"));
        assert_eq!(cell.get(), UploadState::Temporary("/temp/new.png".into()));
        assert_eq!(backend.count("delete"), 0);

        block_on(release(&backend, "/temp/old.png"));
        assert_eq!(backend.calls().last().map(String::as_str), Some("delete /temp/old.png"));
    }

    #[test]
    fn test_replace_failure_keeps_previous() {
        let backend = FakeBackend { fail_upload: true, ..Default::default() };
        let cell = cell(UploadState::Permanent("/files/a.png".into()));

        let err = block_on(replace(&backend, &cell, "b.png")).unwrap_err();
        assert!(matches!(err, LifecycleError::Upload(_)));
        assert_eq!(cell.get(), UploadState::Permanent("/files/a.png".into()));
    }

    #[test]
    fn test_commit_moves_exactly_once_and_returns_permanent_url() {
        let backend = FakeBackend::default();
        let cell = cell(UploadState::Temporary("/temp/a.png".into()));

        let url = block_on(commit(&backend, &cell)).unwrap();
        assert_eq!(url.as_deref(), Some("/files/a.png"));
        assert_eq!(backend.count("move"), 1);
        assert_eq!(cell.get(), UploadState::Permanent("/files/a.png".into()));

        // a second submit (e.g. after a failed save) reuses the permanent url
        let again = block_on(commit(&backend, &cell)).unwrap();
        assert_eq!(again.as_deref(), Some("/files/a.png"));
        assert_eq!(backend.count("move"), 1);
    }

    #[test]
    fn test_commit_move_failure_submits_temp_url() {
        let backend = FakeBackend { fail_move: true, ..Default::default() };
        let cell = cell(UploadState::Temporary("/temp/a.png".into()));

        let url = block_on(commit(&backend, &cell)).unwrap();
        assert_eq!(url.as_deref(), Some("/temp/a.png"));
        assert_eq!(backend.count("move"), 1);
        assert_eq!(backend.count("delete"), 0);
    }

    #[test]
    fn test_commit_without_file() {
        let backend = FakeBackend::default();
        let url = block_on(commit(&backend, &cell(UploadState::Empty))).unwrap();
        assert_eq!(url, None);
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_claimed_cells_survive_discard_between_moves() {
        let backend = FakeBackend::default();
        let thumb = cell(UploadState::Temporary("/temp/thumb.png".into()));
        let wip = cell(UploadState::Temporary("/temp/wip.png".into()));

        let [thumb_claim, wip_claim] = claim_all([&thumb, &wip]).unwrap();
        assert_eq!(wip.get(), UploadState::Moving("/temp/wip.png".into()));

        let thumb_url = block_on(settle(&backend, &thumb, thumb_claim));
        // the form is abandoned while the second move is still pending
        let outcome = block_on(discard(&backend, &wip, || panic!("should not prompt")));
        assert_eq!(outcome, Discard::Nothing);
        let wip_url = block_on(settle(&backend, &wip, wip_claim));

        assert_eq!(thumb_url.as_deref(), Some("/files/thumb.png"));
        assert_eq!(wip_url.as_deref(), Some("/files/wip.png"));
        assert_eq!(backend.count("move"), 2);
        assert_eq!(backend.count("delete"), 0);
    }

    #[test]
    fn test_settle_does_not_read_back_the_cell() {
        let backend = FakeBackend::default();
        let existing = cell(UploadState::Permanent("/files/wip.png".into()));
        let fresh = cell(UploadState::Temporary("/temp/thumb.png".into()));

        let [existing_claim, fresh_claim] = claim_all([&existing, &fresh]).unwrap();
        // owner went away; the cells now report their default
        existing.set(UploadState::Empty);
        fresh.set(UploadState::Empty);

        assert_eq!(block_on(settle(&backend, &existing, existing_claim)).as_deref(), Some("/files/wip.png"));
        assert_eq!(block_on(settle(&backend, &fresh, fresh_claim)).as_deref(), Some("/files/thumb.png"));
    }

    #[test]
    fn test_claim_all_is_all_or_nothing() {
        let thumb = cell(UploadState::Temporary("/temp/thumb.png".into()));
        let wip = cell(UploadState::Uploading { previous: None });

        let err = claim_all([&thumb, &wip]).unwrap_err();
        assert_eq!(err, TransitionError::Busy { action: "submit", phase: Phase::Uploading });
        assert!(thumb.get().is_temporary());
    }

    #[test]
    fn test_discard_confirmed_deletes_once() {
        let backend = FakeBackend::default();
        let cell = cell(UploadState::Temporary("/temp/a.png".into()));
        let mut asked = 0;

        let outcome = block_on(discard(&backend, &cell, || {
            asked += 1;
            true
        }));
        assert_eq!(outcome, Discard::Deleted);
        assert_eq!(asked, 1);
        assert_eq!(backend.calls(), vec!["delete /temp/a.png".to_string()]);
        assert_eq!(cell.get(), UploadState::Empty);
    }

    #[test]
    fn test_discard_declined_deletes_nothing() {
        let backend = FakeBackend::default();
        let cell = cell(UploadState::Temporary("/temp/a.png".into()));

        let outcome = block_on(discard(&backend, &cell, || false));
        assert_eq!(outcome, Discard::Declined);
        assert_eq!(backend.count("delete"), 0);
        assert!(cell.get().is_temporary());
    }

    #[test]
    fn test_discard_skips_prompt_when_nothing_temporary() {
        let backend = FakeBackend::default();
        for state in [
            UploadState::Empty,
            UploadState::Permanent("/files/a.png".into()),
            UploadState::Moving("/temp/a.png".into()),
        ] {
            let outcome = block_on(discard(&backend, &cell(state), || panic!("should not prompt")));
            assert_eq!(outcome, Discard::Nothing);
        }
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_discard_failure_is_reported_not_raised() {
        let backend = FakeBackend { fail_delete: true, ..Default::default() };
        let cell = cell(UploadState::Temporary("/temp/a.png".into()));

        assert_eq!(block_on(discard(&backend, &cell, || true)), Discard::Failed);
        assert_eq!(cell.get(), UploadState::Empty);
    }
}
