//! Image Upload Component
//!
//! File picker with preview, backed by the temp-upload lifecycle. Picking a
//! file uploads it to temp storage right away; the owning form commits or
//! discards it through [`UploadSlot`].

use std::cell::RefCell;

use leptos::prelude::*;
use leptos::task::spawn_local;
use temp_upload::{Commit, Phase, StateCell, TransitionError, UploadState};
use wasm_bindgen::JsCast;

use crate::commands::UploadApi;

/// Reactive holder for one upload's lifecycle state
#[derive(Clone, Copy)]
pub struct UploadSlot(RwSignal<UploadState>);

impl StateCell for UploadSlot {
    fn get(&self) -> UploadState {
        self.0.try_get_untracked().unwrap_or_default()
    }

    // no-op once the owning form is gone
    fn set(&self, state: UploadState) {
        let _ = self.0.try_set(state);
    }
}

impl UploadSlot {
    /// Slot for a form; `existing` is the entity's current permanent URL
    pub fn new(existing: Option<String>) -> Self {
        Self(RwSignal::new(UploadState::existing(existing)))
    }

    /// Reset to an entity loaded after the form was created
    pub fn load(&self, existing: Option<String>) {
        StateCell::set(self, UploadState::existing(existing));
    }

    pub fn url(&self) -> Option<String> {
        self.0.with(|s| s.url().map(String::from))
    }

    pub fn phase(&self) -> Phase {
        self.0.with(UploadState::phase)
    }

    pub fn is_busy(&self) -> bool {
        self.0.with(UploadState::is_busy)
    }

    pub fn has_pending_temp(&self) -> bool {
        StateCell::get(self).is_temporary()
    }

    /// Claim both slots of a form for a submit. Runs synchronously so a
    /// cleanup that fires mid-submit finds nothing temporary to delete.
    pub fn claim_pair(first: UploadSlot, second: UploadSlot) -> Result<[Commit; 2], TransitionError> {
        temp_upload::claim_all([&first, &second])
    }

    /// Make a claimed file permanent and return the URL to submit
    pub async fn settle(self, claimed: Commit) -> Option<String> {
        temp_upload::settle(&UploadApi, &self, claimed).await
    }

    /// User removed the image; a temp object is deleted in the background
    pub fn remove(self) {
        if let Some(url) = self.update(UploadState::clear) {
            spawn_local(async move {
                temp_upload::release(&UploadApi, &url).await;
                self.update(UploadState::finish_discard);
            });
        }
    }
}

/// Ask the browser to confirm; false when no window is available
fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Delete every outstanding temp upload behind one confirmation.
///
/// Returns false when the user declined. Each slot is emptied right away and
/// its temp object handed to a detached cell, so the delete still runs after
/// the form unmounts and a later call finds nothing left to discard.
pub fn discard_pending(slots: &[UploadSlot], message: &str) -> bool {
    let pending: Vec<UploadSlot> = slots.iter().copied().filter(UploadSlot::has_pending_temp).collect();
    if pending.is_empty() {
        return true;
    }
    if !confirm(message) {
        log::info!("[upload] kept {} temporary upload(s)", pending.len());
        return false;
    }
    for slot in pending {
        let detached = RefCell::new(slot.update(std::mem::take));
        spawn_local(async move {
            let outcome = temp_upload::discard(&UploadApi, &detached, || true).await;
            log::debug!("[upload] discard: {outcome:?}");
        });
    }
    true
}

fn selected_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    let file = input.files()?.get(0)?;
    // allow picking the same file again
    input.set_value("");
    Some(file)
}

/// Image picker with preview and remove button
#[component]
pub fn ImageUpload(upload: UploadSlot, #[prop(into)] label: String) -> impl IntoView {
    let (error, set_error) = signal(None::<String>);

    let on_change = move |ev: web_sys::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        set_error.set(None);
        spawn_local(async move {
            match temp_upload::replace(&UploadApi, &upload, file).await {
                Ok(replaced) => {
                    log::debug!("[upload] stored {}", replaced.url);
                    if let Some(stale) = replaced.stale {
                        spawn_local(async move { temp_upload::release(&UploadApi, &stale).await });
                    }
                }
                Err(temp_upload::LifecycleError::Upload(e)) => set_error.set(Some(e.user_message())),
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    view! {
        <div class="image-upload">
            <span class="field-label">{label}</span>
            {move || upload.url().map(|src| view! { <img class="upload-preview" src=src alt="" /> })}
            <Show when=move || upload.phase() == Phase::Uploading>
                <span class="upload-status">"Uploading…"</span>
            </Show>
            <div class="upload-actions">
                <input
                    type="file"
                    accept="image/*"
                    prop:disabled=move || upload.is_busy()
                    on:change=on_change
                />
                <Show when=move || upload.url().is_some() && !upload.is_busy()>
                    <button type="button" class="link-btn" on:click=move |_| upload.remove()>"Remove"</button>
                </Show>
            </div>
            {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
        </div>
    }
}
