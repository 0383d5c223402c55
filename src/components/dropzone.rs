//! File selection component: click-to-browse plus drag & drop.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Event, File, FileList, HtmlInputElement};

/// Highlight bookkeeping for the drop surface.
///
/// The highlight is a rendering affordance only: set while an enabled
/// drag hovers the zone, cleared on leave and on drop no matter what.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct DragState {
    highlight: bool,
}

impl DragState {
    fn drag_over(&mut self, disabled: bool) {
        if !disabled {
            self.highlight = true;
        }
    }

    fn drag_leave(&mut self) {
        self.highlight = false;
    }

    fn drop_finished(&mut self) {
        self.highlight = false;
    }
}

/// Normalize a browser `FileList` into a `Vec`, preserving selection order.
fn file_list_to_vec(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.item(i)).collect()
}

/// Drop target for file selection.
///
/// Fires `on_files_added` exactly once per user action (picker change
/// or drop) with the full ordered selection. While `disabled`, clicks
/// and drops are no-ops; drag-over still suppresses the browser's
/// default navigation so a stray drop never leaves the page.
#[component]
pub fn DropZone(
    #[prop(into)] disabled: Signal<bool>,
    #[prop(into)] on_files_added: Callback<Vec<File>>,
) -> impl IntoView {
    let (drag, set_drag) = create_signal(DragState::default());

    let on_change = move |ev: Event| {
        if disabled.get_untracked() {
            return;
        }
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            on_files_added.call(file_list_to_vec(&files));
        }
    };

    let open_file_dialog = move |_| {
        if disabled.get_untracked() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(input) = document.get_element_by_id("fileInput") {
                    if let Some(html_input) = input.dyn_ref::<HtmlInputElement>() {
                        html_input.click();
                    }
                }
            }
        }
    };

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag.update(|d| d.drag_over(disabled.get_untracked()));
    };

    let on_drag_leave = move |_: DragEvent| {
        set_drag.update(|d| d.drag_leave());
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_drag.update(|d| d.drop_finished());
        if disabled.get_untracked() {
            return;
        }
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            on_files_added.call(file_list_to_vec(&files));
        }
    };

    view! {
        <div
            class="dropzone"
            class:highlight=move || drag.get().highlight
            style:cursor=move || if disabled.get() { "default" } else { "pointer" }
            on:click=open_file_dialog
            on:dragover=on_drag_over
            on:dragleave=on_drag_leave
            on:drop=on_drop
        >
            <input
                type="file"
                id="fileInput"
                class="file-input"
                multiple=true
                style="display:none"
                on:change=on_change
            />
            <div class="upload-icon">"📤"</div>
            <span>"Upload Files"</span>
            <div class="upload-hint">"drag & drop, or click to browse"</div>
        </div>
    }
}
