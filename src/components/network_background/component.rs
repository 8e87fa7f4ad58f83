use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MediaQueryList, Window};

use super::config::BackgroundConfig;
use super::lifecycle::{FrameHost, Lifecycle};
use super::state::NetworkState;
use super::types::{ColorMode, MotionPreferences, MotionState};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
const PRINT_QUERY: &str = "print";

#[component]
pub fn NetworkBackground(
	#[prop(into)] mode: Signal<ColorMode>,
	#[prop(optional, into)] lite: MaybeProp<bool>,
	#[prop(default = BackgroundConfig::default())] config: BackgroundConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let runtime = StoredValue::new_local(None::<Runtime>);
	let preferences_changed = RwSignal::new(0u32);

	// Mounts once the canvas exists; `lite` or a media query flipping remounts.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		preferences_changed.track();
		let forced_lite = lite.get().unwrap_or(false);
		let config = config.clone();
		let remount = move || {
			preferences_changed.try_update(|n| *n = n.wrapping_add(1));
		};
		runtime.update_value(|slot| {
			if let Some(mut old) = slot.take() {
				old.stop();
			}
			*slot = Runtime::mount(
				canvas.into(),
				config,
				mode.get_untracked(),
				forced_lite,
				remount,
			);
		});
	});

	Effect::new(move |_| {
		let mode = mode.get();
		runtime.with_value(|slot| {
			if let Some(rt) = slot {
				rt.set_color_mode(mode);
			}
		});
	});

	on_cleanup(move || {
		runtime.try_update_value(|slot| {
			if let Some(mut rt) = slot.take() {
				rt.stop();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-background"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -1; display: block; pointer-events: none;"
		/>
	}
}

struct Scene {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	state: NetworkState,
}

/// Window plus the JS closures registered with it.
struct BrowserHost {
	window: Window,
	queries: Vec<MediaQueryList>,
	animate: RefCell<Option<Closure<dyn FnMut(f64)>>>,
	apply_resize: RefCell<Option<Closure<dyn FnMut()>>>,
	on_resize: RefCell<Option<Closure<dyn FnMut()>>>,
	on_preference: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl BrowserHost {
	fn new(window: Window, queries: Vec<MediaQueryList>) -> Self {
		Self {
			window,
			queries,
			animate: RefCell::new(None),
			apply_resize: RefCell::new(None),
			on_resize: RefCell::new(None),
			on_preference: RefCell::new(None),
		}
	}

	fn listen(&self, on_resize: Closure<dyn FnMut()>, on_preference: Closure<dyn FnMut()>) {
		if self
			.window
			.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
			.is_err()
		{
			warn!("network background: could not listen for resize");
		}
		for query in &self.queries {
			if query
				.add_event_listener_with_callback("change", on_preference.as_ref().unchecked_ref())
				.is_err()
			{
				warn!("network background: could not watch {}", query.media());
			}
		}
		*self.on_resize.borrow_mut() = Some(on_resize);
		*self.on_preference.borrow_mut() = Some(on_preference);
	}

	/// Drop every closure. Call after the listeners are detached.
	fn release(&self) {
		self.animate.borrow_mut().take();
		self.apply_resize.borrow_mut().take();
		self.on_resize.borrow_mut().take();
		self.on_preference.borrow_mut().take();
	}
}

impl FrameHost for BrowserHost {
	fn request_frame(&self) -> Option<i32> {
		let animate = self.animate.borrow();
		self.window
			.request_animation_frame(animate.as_ref()?.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel_frame(&self, id: i32) {
		let _ = self.window.cancel_animation_frame(id);
	}

	fn set_timer(&self, delay_ms: i32) -> Option<i32> {
		let apply = self.apply_resize.borrow();
		self.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				apply.as_ref()?.as_ref().unchecked_ref(),
				delay_ms,
			)
			.ok()
	}

	fn clear_timer(&self, id: i32) {
		self.window.clear_timeout_with_handle(id);
	}

	fn remove_listeners(&self) {
		if let Some(cb) = self.on_resize.borrow().as_ref() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = self.on_preference.borrow().as_ref() {
			for query in &self.queries {
				let _ = query.remove_event_listener_with_callback("change", cb.as_ref().unchecked_ref());
			}
		}
	}
}

/// Browser-side resources of one mounted background.
struct Runtime {
	host: Rc<BrowserHost>,
	scene: Rc<RefCell<Scene>>,
	lifecycle: Rc<RefCell<Lifecycle>>,
}

impl Runtime {
	fn mount(
		canvas: HtmlCanvasElement,
		config: BackgroundConfig,
		mode: ColorMode,
		forced_lite: bool,
		on_preference_change: impl Fn() + 'static,
	) -> Option<Self> {
		let window = web_sys::window()?;
		let Some(ctx) = context_2d(&canvas) else {
			warn!("network background: 2d context unavailable, skipping");
			return None;
		};

		let (width, height) = viewport(&window);
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

		let reduced_motion = match_query(&window, REDUCED_MOTION_QUERY);
		let print = match_query(&window, PRINT_QUERY);
		let cores = window.navigator().hardware_concurrency();
		let prefs = MotionPreferences {
			reduced_motion: reduced_motion.as_ref().is_some_and(MediaQueryList::matches),
			low_power: cores > 0.0 && cores <= 2.0,
			print: print.as_ref().is_some_and(MediaQueryList::matches),
			forced_lite,
		};
		let motion = MotionState::resolve(prefs);
		debug!("network background preferences: {:?} -> {:?}", prefs, motion);

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let state = NetworkState::new(config, width, height, mode, motion, seed);
		info!(
			"network background mounted: {}x{}, {} nodes, {:?}",
			width,
			height,
			state.nodes().len(),
			motion
		);

		let queries = reduced_motion.into_iter().chain(print).collect();
		let runtime = Self {
			host: Rc::new(BrowserHost::new(window, queries)),
			scene: Rc::new(RefCell::new(Scene { canvas, ctx, state })),
			lifecycle: Rc::new(RefCell::new(Lifecycle::default())),
		};
		runtime.install_callbacks(on_preference_change);
		match motion {
			MotionState::Active => runtime.lifecycle.borrow_mut().start(&*runtime.host, motion),
			MotionState::Disabled => {
				let scene = runtime.scene.borrow();
				scene.state.paint_static(&scene.ctx);
			}
		}
		Some(runtime)
	}

	/// Closures hold the host weakly so that dropping the runtime frees it.
	fn install_callbacks(&self, on_preference_change: impl Fn() + 'static) {
		let host = Rc::downgrade(&self.host);
		let delay = self.scene.borrow().state.config.resize_debounce_ms;

		let (scene, lifecycle, weak) = (self.scene.clone(), self.lifecycle.clone(), host.clone());
		*self.host.animate.borrow_mut() = Some(Closure::new(move |now: f64| {
			if !lifecycle.borrow_mut().frame_fired() {
				return;
			}
			{
				let scene = &mut *scene.borrow_mut();
				scene.state.frame(now, &scene.ctx);
			}
			if let Some(host) = weak.upgrade() {
				lifecycle.borrow_mut().reschedule(&*host);
			}
		}));

		let (scene, lifecycle) = (self.scene.clone(), self.lifecycle.clone());
		*self.host.apply_resize.borrow_mut() = Some(Closure::new(move || {
			if !lifecycle.borrow_mut().resize_timer_fired() {
				return;
			}
			let Some(win) = web_sys::window() else {
				return;
			};
			let (width, height) = viewport(&win);
			debug!("network background resized to {}x{}", width, height);
			let scene = &mut *scene.borrow_mut();
			scene.canvas.set_width(width as u32);
			scene.canvas.set_height(height as u32);
			scene.state.apply_resize(width, height, &scene.ctx);
		}));

		let (lifecycle, weak) = (self.lifecycle.clone(), host);
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			if let Some(host) = weak.upgrade() {
				lifecycle.borrow_mut().resize_event(&*host, delay);
			}
		});
		let on_preference: Closure<dyn FnMut()> = Closure::new(move || {
			debug!("network background: motion preference changed");
			on_preference_change();
		});
		self.host.listen(on_resize, on_preference);
	}

	fn set_color_mode(&self, mode: ColorMode) {
		let Ok(mut scene) = self.scene.try_borrow_mut() else {
			return;
		};
		let scene = &mut *scene;
		scene.state.apply_color_mode(mode, &scene.ctx);
	}

	/// Withdraw every pending callback and release the closures.
	fn stop(&mut self) {
		self.lifecycle.borrow_mut().stop(&*self.host);
		self.host.release();
		debug!("network background stopped");
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok().flatten()?.dyn_into().ok()
}

fn match_query(window: &Window, query: &str) -> Option<MediaQueryList> {
	window.match_media(query).ok().flatten()
}

fn viewport(window: &Window) -> (f64, f64) {
	let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(
		dimension(window.inner_width()),
		dimension(window.inner_height()),
	)
}

#[cfg(all(test, target_arch = "wasm32"))]
impl BrowserHost {
	fn is_released(&self) -> bool {
		self.animate.borrow().is_none()
			&& self.apply_resize.borrow().is_none()
			&& self.on_resize.borrow().is_none()
			&& self.on_preference.borrow().is_none()
	}
}
