use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::config::BackgroundConfig;
use super::node::{NetworkNode, spawn_pool};
use super::packets::PacketSimulator;
use super::render;
use super::surface::Surface;
use super::topology::Topology;
use super::types::{ColorMode, MotionState, Palette};

/// Everything one mounted background owns.
pub struct NetworkState {
	pub config: BackgroundConfig,
	pub width: f64,
	pub height: f64,
	pub mode: ColorMode,
	palette: Palette,
	motion: MotionState,
	nodes: Vec<NetworkNode>,
	topology: Topology,
	packets: PacketSimulator,
	rng: SmallRng,
	last_paint: Option<f64>,
}

impl NetworkState {
	pub fn new(
		config: BackgroundConfig,
		width: f64,
		height: f64,
		mode: ColorMode,
		motion: MotionState,
		seed: u64,
	) -> Self {
		let mut state = Self {
			topology: Topology::new(width, height, &config),
			config,
			width,
			height,
			mode,
			palette: Palette::for_mode(mode),
			motion,
			nodes: Vec::new(),
			packets: PacketSimulator::new(),
			rng: SmallRng::seed_from_u64(seed),
			last_paint: None,
		};
		state.populate();
		state
	}

	fn populate(&mut self) {
		self.nodes = match self.motion {
			MotionState::Active => {
				let count = self.config.node_count(self.width, self.height);
				spawn_pool(count, self.width, self.height, &self.config, &mut self.rng)
			}
			MotionState::Disabled => Vec::new(),
		};
		self.topology = Topology::new(self.width, self.height, &self.config);
		self.packets.clear();
	}

	pub fn motion(&self) -> MotionState {
		self.motion
	}

	pub fn nodes(&self) -> &[NetworkNode] {
		&self.nodes
	}

	/// Discard the pool and rebuild it for the new viewport.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.populate();
	}

	/// Colours only; the simulation keeps running untouched.
	pub fn set_color_mode(&mut self, mode: ColorMode) {
		self.mode = mode;
		self.palette = Palette::for_mode(mode);
	}

	pub fn paint_static<S: Surface + ?Sized>(&self, surface: &S) {
		render::paint_static(surface, &self.palette, self.width, self.height);
	}

	/// Settled resize. A disabled background has no loop to repaint it,
	/// so the gradient is redrawn here.
	pub fn apply_resize<S: Surface + ?Sized>(&mut self, width: f64, height: f64, surface: &S) {
		self.resize(width, height);
		if self.motion == MotionState::Disabled {
			self.paint_static(surface);
		}
	}

	/// Returns false when `mode` is already in effect.
	pub fn apply_color_mode<S: Surface + ?Sized>(&mut self, mode: ColorMode, surface: &S) -> bool {
		if mode == self.mode {
			return false;
		}
		self.set_color_mode(mode);
		if self.motion == MotionState::Disabled {
			self.paint_static(surface);
		}
		true
	}

	/// Run one frame callback. Returns whether anything was painted;
	/// callbacks arriving sooner than the target interval are skipped.
	pub fn frame<S: Surface + ?Sized>(&mut self, now: f64, surface: &S) -> bool {
		if self.motion == MotionState::Disabled {
			return false;
		}
		let interval = self.config.frame_interval_ms();
		match self.last_paint {
			Some(last) => {
				let elapsed = now - last;
				if elapsed < interval {
					return false;
				}
				self.last_paint = Some(now - elapsed % interval);
			}
			None => self.last_paint = Some(now),
		}

		render::fill_background(surface, &self.palette, self.width, self.height);
		for node in &mut self.nodes {
			node.update(self.width, self.height, now);
		}
		self.topology.refresh(now, &mut self.nodes, &self.config);
		render::draw_links(surface, &self.palette, &self.config, &self.nodes, self.topology.links());
		render::draw_nodes(surface, &self.palette, &self.nodes);
		self.packets.step(&self.nodes, &self.config, &mut self.rng);
		render::draw_packets(
			surface,
			&self.palette,
			&self.config,
			&self.nodes,
			self.packets.packets(),
		);
		true
	}
}

#[cfg(test)]
impl NetworkState {
	pub fn links(&self) -> &[super::topology::Link] {
		self.topology.links()
	}

	pub fn packets(&self) -> &PacketSimulator {
		&self.packets
	}

	pub fn last_topology_rebuild(&self) -> Option<f64> {
		self.topology.last_rebuild()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network_background::surface::recording::{Call, Recorder};

	fn active(width: f64, height: f64) -> NetworkState {
		NetworkState::new(
			BackgroundConfig::default(),
			width,
			height,
			ColorMode::Dark,
			MotionState::Active,
			1234,
		)
	}

	#[test]
	fn fast_callbacks_are_throttled_to_target_rate() {
		let mut state = active(800.0, 600.0);
		let recorder = Recorder::default();
		let mut painted = 0;

		let mut now = 0.0;
		while now <= 1_000.0 {
			if state.frame(now, &recorder) {
				painted += 1;
			}
			now += 4.0;
		}

		let backgrounds = recorder.count(&Call::FillRect);
		assert_eq!(backgrounds, painted);
		assert!(backgrounds <= 31, "painted {backgrounds} frames in one second");
		assert!(backgrounds >= 25, "painted only {backgrounds} frames");
	}

	#[test]
	fn slow_callbacks_paint_every_time() {
		let mut state = active(800.0, 600.0);
		let recorder = Recorder::default();
		for i in 0..10 {
			assert!(state.frame(i as f64 * 50.0, &recorder));
		}
		assert_eq!(recorder.count(&Call::FillRect), 10);
	}

	#[test]
	fn long_run_keeps_invariants() {
		let mut state = active(640.0, 480.0);
		let recorder = Recorder::default();
		let cap = state.config.packet_cap(state.nodes().len());
		let slack = state.config.node_speed + 1e-9;

		for i in 0..2_000 {
			state.frame(i as f64 * 34.0, &recorder);
			recorder.reset();
			for node in state.nodes() {
				assert!(node.x >= -slack && node.x <= 640.0 + slack);
				assert!(node.y >= -slack && node.y <= 480.0 + slack);
				assert!(node.neighbors.len() <= state.config.max_degree);
			}
			assert!(state.packets().len() <= cap);
			for packet in state.packets().packets() {
				assert!(packet.progress < 1.0);
			}
		}
		assert!(!state.links().is_empty());
	}

	#[test]
	fn first_frame_builds_topology_before_drawing() {
		let mut state = active(800.0, 600.0);
		let recorder = Recorder::default();
		assert!(state.last_topology_rebuild().is_none());
		state.frame(16.0, &recorder);
		assert_eq!(state.last_topology_rebuild(), Some(16.0));

		let calls = recorder.calls();
		assert_eq!(calls[1], Call::FillRect);
		if !state.links().is_empty() {
			assert!(calls.contains(&Call::Stroke));
		}
	}

	#[test]
	fn color_change_does_not_rebuild_topology() {
		let mut state = active(800.0, 600.0);
		let recorder = Recorder::default();
		state.frame(0.0, &recorder);
		let links = state.links().to_vec();

		state.set_color_mode(ColorMode::Light);
		assert_eq!(state.links(), links.as_slice());
		assert_eq!(state.last_topology_rebuild(), Some(0.0));

		recorder.reset();
		state.frame(40.0, &recorder);
		assert_eq!(recorder.calls()[0], Call::FillStyle("#f8fafc".into()));
		assert_eq!(state.last_topology_rebuild(), Some(0.0));
	}

	#[test]
	fn resize_to_one_pixel_rebuilds_safely() {
		let mut state = active(1280.0, 720.0);
		let recorder = Recorder::default();
		state.frame(0.0, &recorder);

		state.resize(1.0, 1.0);
		assert!(!state.nodes().is_empty());
		assert!(state.packets().is_empty());
		assert!(state.last_topology_rebuild().is_none());
		for i in 1..50 {
			state.frame(i as f64 * 40.0, &recorder);
		}
		for node in state.nodes() {
			assert!(node.x >= -1.0 && node.x <= 2.0);
		}
	}

	#[test]
	fn disabled_state_only_paints_static_gradient() {
		let mut state = NetworkState::new(
			BackgroundConfig::default(),
			800.0,
			600.0,
			ColorMode::Light,
			MotionState::Disabled,
			1,
		);
		let recorder = Recorder::default();
		assert!(!state.frame(0.0, &recorder));
		assert!(!state.frame(1_000.0, &recorder));
		assert!(recorder.calls().is_empty());
		assert!(state.nodes().is_empty());

		state.paint_static(&recorder);
		assert_eq!(recorder.calls(), vec![Call::Gradient(2)]);
	}

	fn disabled(mode: ColorMode) -> NetworkState {
		NetworkState::new(
			BackgroundConfig::default(),
			800.0,
			600.0,
			mode,
			MotionState::Disabled,
			1,
		)
	}

	#[test]
	fn disabled_resize_repaints_gradient_at_new_size() {
		let mut state = disabled(ColorMode::Dark);
		let recorder = Recorder::default();
		state.apply_resize(320.0, 200.0, &recorder);
		assert_eq!(recorder.calls(), vec![Call::Gradient(2)]);
		assert_eq!((state.width, state.height), (320.0, 200.0));
		assert!(state.nodes().is_empty());
	}

	#[test]
	fn disabled_color_change_repaints_once() {
		let mut state = disabled(ColorMode::Dark);
		let recorder = Recorder::default();
		assert!(!state.apply_color_mode(ColorMode::Dark, &recorder));
		assert!(recorder.calls().is_empty());

		assert!(state.apply_color_mode(ColorMode::Light, &recorder));
		assert_eq!(recorder.calls(), vec![Call::Gradient(2)]);
		assert_eq!(state.mode, ColorMode::Light);
	}

	#[test]
	fn active_resize_and_color_change_leave_painting_to_the_loop() {
		let mut state = active(800.0, 600.0);
		let recorder = Recorder::default();
		state.apply_resize(400.0, 300.0, &recorder);
		assert!(state.apply_color_mode(ColorMode::Light, &recorder));
		assert!(recorder.calls().is_empty());
		assert!(!state.nodes().is_empty());
	}
}
