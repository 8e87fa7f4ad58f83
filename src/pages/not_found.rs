use leptos::prelude::*;

/// Fallback for unknown routes.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<main class="page-overlay">
			<h1>"Page not found"</h1>
			<a href="/">"Back home"</a>
		</main>
	}
}
