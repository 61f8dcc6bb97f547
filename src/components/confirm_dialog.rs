use futures::channel::oneshot;
use leptos::prelude::*;

use crate::controller::Confirm;

struct PendingConfirm {
    prompt: String,
    responder: oneshot::Sender<bool>,
}

/// Handle to an in-page confirmation dialog. `confirm` shows the dialog and
/// resolves once the user answers.
#[derive(Clone, Copy)]
pub struct ConfirmHandle {
    pending: RwSignal<Option<PendingConfirm>>,
}

impl ConfirmHandle {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
        }
    }

    fn prompt(&self) -> Option<String> {
        self.pending.with(|p| p.as_ref().map(|p| p.prompt.clone()))
    }

    fn resolve(&self, answer: bool) {
        if let Some(pending) = self.pending.try_update(Option::take).flatten() {
            let _ = pending.responder.send(answer);
        }
    }
}

impl Default for ConfirmHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirm for ConfirmHandle {
    async fn confirm(&self, prompt: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        // A dialog still open from an earlier action is answered "no" by
        // dropping its sender.
        self.pending.set(Some(PendingConfirm {
            prompt: prompt.to_string(),
            responder: tx,
        }));
        rx.await.unwrap_or(false)
    }
}

#[component]
pub fn ConfirmDialog(handle: ConfirmHandle) -> impl IntoView {
    view! {
        <Show when=move || handle.prompt().is_some()>
            <div class="modal-overlay" on:click=move |_| handle.resolve(false)>
                <div class="modal-content" on:click=move |ev| ev.stop_propagation()>
                    <h3>"Onay"</h3>
                    <p>{move || handle.prompt().unwrap_or_default()}</p>
                    <div class="modal-actions">
                        <button class="btn btn-secondary" on:click=move |_| handle.resolve(false)>
                            "Vazgeç"
                        </button>
                        <button class="btn btn-primary" on:click=move |_| handle.resolve(true)>
                            "Devam"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
