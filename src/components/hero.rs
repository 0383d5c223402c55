//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Dashboard - File Upload"</h1>
            <p class="subtitle">
                "Drop files below or click to browse. "
                "Each file is uploaded independently with live progress."
            </p>
        </div>
    }
}
