use leptos::prelude::*;

use crate::components::network_background::{ColorMode, NetworkBackground};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let (mode, set_mode) = signal(ColorMode::Dark);

	view! {
		<div class="page" data-theme=move || mode.get().as_str()>
			<NetworkBackground mode=mode />
			<main class="page-overlay">
				<h1>"Systems, services and the wiring in between"</h1>
				<p class="subtitle">"Portfolio, services and resources."</p>
				<button
					class="theme-toggle"
					on:click=move |_| set_mode.update(|m| *m = m.toggled())
				>
					{move || match mode.get() {
						ColorMode::Dark => "Light mode",
						ColorMode::Light => "Dark mode",
					}}
				</button>
			</main>
		</div>
	}
}
