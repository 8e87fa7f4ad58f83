/// Tuning knobs for the background simulation.
///
/// None of these values are load-bearing; the defaults just produce a
/// reasonable density of nodes, links and packets on common screens.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundConfig {
	/// Viewport area (px²) per node before clamping.
	pub area_per_node: f64,
	pub min_nodes: usize,
	pub max_nodes: usize,
	/// Distance travelled per painted frame, in px.
	pub node_speed: f64,
	pub node_radius_min: f64,
	pub node_radius_max: f64,
	pub opacity_base: f64,
	pub opacity_amplitude: f64,
	/// Radians per millisecond.
	pub pulse_speed_min: f64,
	pub pulse_speed_max: f64,
	/// Connection distance; also the spatial grid cell size.
	pub max_distance: f64,
	pub max_degree: usize,
	pub topology_interval_ms: f64,
	pub link_width: f64,
	/// Progress per painted frame, so `1.0 / speed` frames per hop.
	pub packet_speed_min: f64,
	pub packet_speed_max: f64,
	pub packet_radius: f64,
	pub packet_glow_radius: f64,
	pub packet_glow_alpha: f64,
	pub spawn_probability: f64,
	pub chain_probability: f64,
	pub nodes_per_packet: usize,
	pub max_packets: usize,
	pub target_fps: f64,
	pub resize_debounce_ms: i32,
}

impl Default for BackgroundConfig {
	fn default() -> Self {
		Self {
			area_per_node: 15_000.0,
			min_nodes: 20,
			max_nodes: 120,
			node_speed: 0.3,
			node_radius_min: 1.0,
			node_radius_max: 2.5,
			opacity_base: 0.5,
			opacity_amplitude: 0.3,
			pulse_speed_min: 0.0005,
			pulse_speed_max: 0.0015,
			max_distance: 150.0,
			max_degree: 4,
			topology_interval_ms: 300.0,
			link_width: 0.6,
			packet_speed_min: 0.008,
			packet_speed_max: 0.02,
			packet_radius: 1.5,
			packet_glow_radius: 4.0,
			packet_glow_alpha: 0.3,
			spawn_probability: 0.05,
			chain_probability: 0.25,
			nodes_per_packet: 4,
			max_packets: 30,
			target_fps: 30.0,
			resize_debounce_ms: 250,
		}
	}
}

impl BackgroundConfig {
	/// Pool size for a viewport, scaled by area and clamped both ways.
	pub fn node_count(&self, width: f64, height: f64) -> usize {
		let min = self.min_nodes.max(1);
		let max = self.max_nodes.max(min);
		let area = width.max(0.0) * height.max(0.0);
		let scaled = (area / self.area_per_node.max(1.0)).floor();
		if !scaled.is_finite() {
			return min;
		}
		(scaled as usize).clamp(min, max)
	}

	pub fn frame_interval_ms(&self) -> f64 {
		1000.0 / self.target_fps.max(1.0)
	}

	/// Maximum number of packets alive at once for a pool of `node_count`.
	pub fn packet_cap(&self, node_count: usize) -> usize {
		(node_count / self.nodes_per_packet.max(1)).min(self.max_packets)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn node_count_scales_with_area_within_bounds() {
		let config = BackgroundConfig::default();
		assert_eq!(config.node_count(1920.0, 1080.0), 120);
		assert_eq!(config.node_count(800.0, 600.0), 32);
		assert_eq!(config.node_count(320.0, 240.0), 20);
	}

	#[test]
	fn degenerate_viewports_still_yield_nodes() {
		let mut config = BackgroundConfig::default();
		assert_eq!(config.node_count(1.0, 1.0), 20);
		assert_eq!(config.node_count(0.0, 0.0), 20);
		assert_eq!(config.node_count(f64::NAN, 10.0), 20);

		config.min_nodes = 0;
		config.area_per_node = 0.0;
		assert!(config.node_count(1.0, 1.0) >= 1);
		assert_eq!(config.node_count(f64::INFINITY, 1.0), 1);
	}

	#[test]
	fn packet_cap_is_bounded_by_absolute_maximum() {
		let config = BackgroundConfig::default();
		assert_eq!(config.packet_cap(20), 5);
		assert_eq!(config.packet_cap(1000), 30);
		assert!((config.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-9);
	}
}
