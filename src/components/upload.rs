//! Multi-file upload component with per-file progress.
//!
//! Owns the pending batch and the run state, launches one transfer per
//! file, and renders aggregated progress.

use leptos::*;
use web_sys::File;

use crate::components::{DropZone, ProgressBar};
use crate::config::API_SERVER;
use crate::services::send_file;
use crate::state::UploadBatch;
use crate::types::{RunState, TransferEvent};

#[component]
pub fn UploadSection() -> impl IntoView {
    let (batch, set_batch) = create_signal(UploadBatch::<File>::new());

    let on_files_added = move |files: Vec<File>| {
        set_batch.update(|b| b.add_files(files.into_iter().map(|f| (f.name(), f))));
    };

    // New drops are locked out while a run is in flight or awaiting Clear.
    let dropzone_disabled = Signal::derive(move || {
        batch.with(|b| b.run_state() != RunState::Idle)
    });

    let start_upload = move |_| {
        // Snapshot the run's transfers under the same update that
        // flips the state to Uploading.
        let launched = set_batch
            .try_update(|b| {
                if b.start_run() {
                    b.files()
                        .iter()
                        .map(|f| (f.id, f.name.clone(), f.handle.clone()))
                        .collect::<Vec<_>>()
                } else {
                    Vec::new()
                }
            })
            .unwrap_or_default();
        if launched.is_empty() {
            return;
        }

        log::info!("📤 Starting upload run with {} file(s)", launched.len());

        // Fan-out: every transfer starts immediately, no throttling.
        // Each callback funnels through the batch reducer, so updates
        // always transform the latest state.
        for (id, name, handle) in launched {
            spawn_local(async move {
                let report = move |ev: TransferEvent| set_batch.update(|b| b.apply(ev));
                let sent = send_file(&handle, API_SERVER, move |loaded, total| {
                    report(TransferEvent::Progress { id, loaded, total })
                })
                .await;
                match sent {
                    Ok(()) => {
                        log::info!("✅ Uploaded {}", name);
                        report(TransferEvent::Done { id });
                    }
                    Err(e) => {
                        log::error!("❌ Upload of {} failed: {}", name, e);
                        report(TransferEvent::Failed { id });
                    }
                }
            });
        }
    };

    let on_clear = move |_| {
        set_batch.update(|b| {
            b.clear();
        });
    };

    let completed = move || batch.with(|b| b.run_state() == RunState::Completed);
    let can_start = move || batch.with(|b| b.can_start());
    let run_visible = move || batch.with(|b| b.run_state() != RunState::Idle);

    view! {
        <div class="upload-section">
            <span class="title">"Upload Files"</span>
            <div class="content">
                <DropZone disabled=dropzone_disabled on_files_added=on_files_added/>
                <div class="files">
                    <For
                        each=move || {
                            batch.with(|b| {
                                b.files()
                                    .iter()
                                    .map(|f| (f.id, f.name.clone()))
                                    .collect::<Vec<_>>()
                            })
                        }
                        key=|(id, _)| *id
                        children=move |(id, name)| {
                            let status = create_memo(move |_| {
                                batch.with(|b| b.status(id).cloned())
                            });
                            let percentage = Signal::derive(move || {
                                status.get().map(|s| s.percentage()).unwrap_or(0.0)
                            });
                            let is_done = move || {
                                status.get().is_some_and(|s| s.is_done())
                            };
                            view! {
                                <div class="file-row">
                                    <span class="file-name">{name}</span>
                                    <Show when=run_visible fallback=|| view! {}>
                                        <div class="progress-wrapper">
                                            <ProgressBar percentage=percentage/>
                                            <span
                                                class="check-icon"
                                                style:opacity=move || {
                                                    if is_done() { "0.5" } else { "0" }
                                                }
                                            >
                                                "✓"
                                            </span>
                                        </div>
                                    </Show>
                                </div>
                            }
                        }
                    />
                </div>
            </div>
            <div class="actions">
                <Show
                    when=completed
                    fallback=move || {
                        view! {
                            <button
                                class="upload-button"
                                prop:disabled=move || !can_start()
                                on:click=start_upload
                            >
                                "Upload"
                            </button>
                        }
                    }
                >
                    <button class="upload-button" on:click=on_clear>
                        "Clear"
                    </button>
                </Show>
            </div>
        </div>
    }
}
