use std::f64::consts::TAU;

use rand::Rng;

use super::config::BackgroundConfig;

/// One animated point of the background.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
	/// Stable position in the pool; addresses the connection-count table.
	pub index: usize,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub opacity: f64,
	opacity_base: f64,
	opacity_amplitude: f64,
	pulse_speed: f64,
	phase: f64,
	/// Nodes linked to this one in the current topology.
	pub neighbors: Vec<usize>,
}

impl NetworkNode {
	/// Random position inside the viewport, random heading at `node_speed`.
	pub fn spawn<R: Rng + ?Sized>(
		index: usize,
		width: f64,
		height: f64,
		config: &BackgroundConfig,
		rng: &mut R,
	) -> Self {
		let heading = rng.gen_range(0.0..TAU);
		Self {
			index,
			x: uniform(rng, 0.0, width),
			y: uniform(rng, 0.0, height),
			vx: heading.cos() * config.node_speed,
			vy: heading.sin() * config.node_speed,
			radius: uniform(rng, config.node_radius_min, config.node_radius_max),
			opacity: config.opacity_base,
			opacity_base: config.opacity_base,
			opacity_amplitude: config.opacity_amplitude,
			pulse_speed: uniform(rng, config.pulse_speed_min, config.pulse_speed_max),
			phase: rng.gen_range(0.0..TAU),
			neighbors: Vec::new(),
		}
	}

	/// Advance one step, bouncing off the viewport edges.
	pub fn update(&mut self, width: f64, height: f64, now: f64) {
		self.x += self.vx;
		self.y += self.vy;

		if self.x < 0.0 {
			self.vx = self.vx.abs();
		} else if self.x > width {
			self.vx = -self.vx.abs();
		}
		if self.y < 0.0 {
			self.vy = self.vy.abs();
		} else if self.y > height {
			self.vy = -self.vy.abs();
		}

		let pulse = (now * self.pulse_speed + self.phase).sin();
		self.opacity = (self.opacity_base + self.opacity_amplitude * pulse).clamp(0.0, 1.0);
	}

	pub fn distance_sq(&self, other: &NetworkNode) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		dx * dx + dy * dy
	}
}

/// Build a fresh pool of `count` nodes with indices `0..count`.
pub fn spawn_pool<R: Rng + ?Sized>(
	count: usize,
	width: f64,
	height: f64,
	config: &BackgroundConfig,
	rng: &mut R,
) -> Vec<NetworkNode> {
	(0..count)
		.map(|i| NetworkNode::spawn(i, width, height, config, rng))
		.collect()
}

/// `gen_range` panics on empty ranges; collapse those to `lo`.
pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

#[cfg(test)]
impl NetworkNode {
	/// A motionless node with a steady opacity.
	pub fn at(index: usize, x: f64, y: f64) -> Self {
		Self {
			index,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			radius: 1.5,
			opacity: 0.5,
			opacity_base: 0.5,
			opacity_amplitude: 0.0,
			pulse_speed: 0.0,
			phase: 0.0,
			neighbors: Vec::new(),
		}
	}

	pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
		self.vx = vx;
		self.vy = vy;
		self
	}
}
