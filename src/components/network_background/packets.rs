use rand::Rng;
use rand::seq::SliceRandom;

use super::config::BackgroundConfig;
use super::node::{NetworkNode, uniform};

/// A light travelling along a link from `from` to `to`.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPacket {
	pub from: usize,
	pub to: usize,
	pub progress: f64,
	pub speed: f64,
}

impl DataPacket {
	pub fn new(from: usize, to: usize, speed: f64) -> Self {
		Self {
			from,
			to,
			progress: 0.0,
			speed,
		}
	}

	pub fn update(&mut self) {
		self.progress += self.speed;
	}

	pub fn has_arrived(&self) -> bool {
		self.progress >= 1.0
	}

	/// Interpolated between the endpoints' current positions.
	pub fn position(&self, nodes: &[NetworkNode]) -> (f64, f64) {
		let (a, b) = (&nodes[self.from], &nodes[self.to]);
		let t = self.progress.min(1.0);
		(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
	}
}

/// Live packets plus the spawn/retire rules.
#[derive(Clone, Debug, Default)]
pub struct PacketSimulator {
	packets: Vec<DataPacket>,
	hubs: Vec<usize>,
}

impl PacketSimulator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn packets(&self) -> &[DataPacket] {
		&self.packets
	}

	pub fn clear(&mut self) {
		self.packets.clear();
	}

	pub fn spawn(&mut self, from: usize, to: usize, speed: f64) {
		self.packets.push(DataPacket::new(from, to, speed));
	}

	/// Retirement pass followed by the spawn pass.
	pub fn step<R: Rng + ?Sized>(
		&mut self,
		nodes: &[NetworkNode],
		config: &BackgroundConfig,
		rng: &mut R,
	) {
		self.advance(nodes, config, rng);
		self.spawn_random(nodes, config, rng);
	}

	/// Move every packet forward; arrivals are removed, and some of them
	/// continue onto a random neighbour of the node they reached.
	pub fn advance<R: Rng + ?Sized>(
		&mut self,
		nodes: &[NetworkNode],
		config: &BackgroundConfig,
		rng: &mut R,
	) {
		for i in (0..self.packets.len()).rev() {
			self.packets[i].update();
			if !self.packets[i].has_arrived() {
				continue;
			}

			let at = self.packets[i].to;
			let next = nodes.get(at).and_then(|node| {
				if node.neighbors.is_empty() || !rng.gen_bool(probability(config.chain_probability)) {
					None
				} else {
					node.neighbors.choose(rng).copied()
				}
			});
			if let Some(next) = next {
				let speed = packet_speed(config, rng);
				self.spawn(at, next, speed);
			}
			self.packets.swap_remove(i);
		}
	}

	/// Maybe start one packet from a random connected node.
	pub fn spawn_random<R: Rng + ?Sized>(
		&mut self,
		nodes: &[NetworkNode],
		config: &BackgroundConfig,
		rng: &mut R,
	) {
		if self.packets.len() >= config.packet_cap(nodes.len()) {
			return;
		}
		if !rng.gen_bool(probability(config.spawn_probability)) {
			return;
		}

		self.hubs.clear();
		self.hubs
			.extend(nodes.iter().filter(|n| !n.neighbors.is_empty()).map(|n| n.index));
		let Some(&from) = self.hubs.choose(rng) else {
			return;
		};
		if let Some(&to) = nodes[from].neighbors.choose(rng) {
			let speed = packet_speed(config, rng);
			self.spawn(from, to, speed);
		}
	}
}

fn packet_speed<R: Rng + ?Sized>(config: &BackgroundConfig, rng: &mut R) -> f64 {
	uniform(rng, config.packet_speed_min, config.packet_speed_max)
}

fn probability(p: f64) -> f64 {
	if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
impl PacketSimulator {
	pub fn len(&self) -> usize {
		self.packets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.packets.is_empty()
	}
}
