use super::config::BackgroundConfig;
use super::grid::SpatialGrid;
use super::node::NetworkNode;

/// Undirected edge between two pool indices, valid until the next rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
}

/// Degree-bounded proximity graph over the node pool, rebuilt on an interval.
#[derive(Clone, Debug)]
pub struct Topology {
	grid: SpatialGrid,
	links: Vec<Link>,
	degree: Vec<usize>,
	candidates: Vec<usize>,
	last_rebuild: Option<f64>,
}

impl Topology {
	pub fn new(width: f64, height: f64, config: &BackgroundConfig) -> Self {
		Self {
			grid: SpatialGrid::new(width, height, config.max_distance),
			links: Vec::new(),
			degree: Vec::new(),
			candidates: Vec::new(),
			last_rebuild: None,
		}
	}

	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Rebuild if this is the first call or the interval has elapsed.
	pub fn refresh(&mut self, now: f64, nodes: &mut [NetworkNode], config: &BackgroundConfig) -> bool {
		let due = match self.last_rebuild {
			Some(last) => now - last > config.topology_interval_ms,
			None => true,
		};
		if due {
			self.rebuild(nodes, config.max_distance, config.max_degree);
			self.last_rebuild = Some(now);
		}
		due
	}

	/// Greedy pass in ascending index order; a node accepts candidates
	/// with a higher index until either side reaches `max_degree`.
	pub fn rebuild(&mut self, nodes: &mut [NetworkNode], max_distance: f64, max_degree: usize) {
		self.grid.clear();
		self.links.clear();
		for node in nodes.iter_mut() {
			node.neighbors.clear();
		}
		for node in nodes.iter() {
			self.grid.insert(node);
		}
		self.degree.clear();
		self.degree.resize(nodes.len(), 0);

		let max_sq = max_distance * max_distance;
		for i in 0..nodes.len() {
			if self.degree[i] >= max_degree {
				continue;
			}
			self.grid.collect_nearby(nodes[i].x, nodes[i].y, &mut self.candidates);

			for &j in &self.candidates {
				if j <= i || self.degree[j] >= max_degree {
					continue;
				}
				if nodes[i].distance_sq(&nodes[j]) > max_sq {
					continue;
				}
				self.links.push(Link { a: i, b: j });
				nodes[i].neighbors.push(j);
				nodes[j].neighbors.push(i);
				self.degree[i] += 1;
				self.degree[j] += 1;
				if self.degree[i] >= max_degree {
					break;
				}
			}
		}
	}
}

#[cfg(test)]
impl Topology {
	pub fn last_rebuild(&self) -> Option<f64> {
		self.last_rebuild
	}
}
