use leptos::*;

/// Horizontal progress bar.
///
/// Pure function of `percentage`: the fill width tracks the value with
/// no clamping, so out-of-range inputs pass through visually.
#[component]
pub fn ProgressBar(#[prop(into)] percentage: Signal<f64>) -> impl IntoView {
    view! {
        <div class="progress-bar">
            <div
                class="progress-fill"
                style=move || format!("width: {}%;", percentage.get())
            ></div>
        </div>
    }
}
