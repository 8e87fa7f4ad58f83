use super::node::NetworkNode;

/// Uniform bucket grid over the viewport.
///
/// With `cell_size` equal to the connection distance, every node within
/// range of a query point lives in the query cell or one of its eight
/// surrounding cells, so a 3×3 scan finds all of them.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
	cell_size: f64,
	cols: usize,
	rows: usize,
	cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
	pub fn new(width: f64, height: f64, cell_size: f64) -> Self {
		let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
			cell_size
		} else {
			1.0
		};
		let (cols, rows) = (span(width, cell_size), span(height, cell_size));
		Self {
			cell_size,
			cols,
			rows,
			cells: vec![Vec::new(); cols * rows],
		}
	}

	/// Empty every bucket, keeping their allocations.
	pub fn clear(&mut self) {
		for cell in &mut self.cells {
			cell.clear();
		}
	}

	pub fn insert(&mut self, node: &NetworkNode) {
		let (col, row) = self.cell_of(node.x, node.y);
		self.cells[row * self.cols + col].push(node.index);
	}

	/// Replace `out` with the contents of the 3×3 cells around `(x, y)`.
	pub fn collect_nearby(&self, x: f64, y: f64, out: &mut Vec<usize>) {
		out.clear();
		let (col, row) = self.cell_of(x, y);
		for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
			for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
				out.extend_from_slice(&self.cells[r * self.cols + c]);
			}
		}
	}

	/// Cell containing `(x, y)`; points past an edge land in the edge cell.
	fn cell_of(&self, x: f64, y: f64) -> (usize, usize) {
		(
			bucket(x, self.cell_size, self.cols),
			bucket(y, self.cell_size, self.rows),
		)
	}
}

fn span(dimension: f64, cell_size: f64) -> usize {
	let n = (dimension / cell_size).ceil();
	if n.is_finite() && n >= 1.0 { n as usize } else { 1 }
}

fn bucket(coord: f64, cell_size: f64, count: usize) -> usize {
	// Float-to-int casts saturate, and NaN becomes 0.
	((coord / cell_size).floor().max(0.0) as usize).min(count - 1)
}

#[cfg(test)]
impl SpatialGrid {
	pub fn cols(&self) -> usize {
		self.cols
	}

	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Candidate neighbours of `node` (itself included).
	pub fn nearby(&self, node: &NetworkNode) -> Vec<usize> {
		let mut out = Vec::new();
		self.collect_nearby(node.x, node.y, &mut out);
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::rngs::SmallRng;
	use rand::{Rng, SeedableRng};

	#[test]
	fn dimensions_round_up_and_never_hit_zero() {
		let grid = SpatialGrid::new(1000.0, 301.0, 150.0);
		assert_eq!((grid.cols(), grid.rows()), (7, 3));

		let tiny = SpatialGrid::new(1.0, 1.0, 150.0);
		assert_eq!((tiny.cols(), tiny.rows()), (1, 1));

		let empty = SpatialGrid::new(0.0, 0.0, 0.0);
		assert_eq!((empty.cols(), empty.rows()), (1, 1));
	}

	#[test]
	fn clear_leaves_no_stale_entries() {
		let mut grid = SpatialGrid::new(500.0, 500.0, 100.0);
		let nodes: Vec<_> = (0..20)
			.map(|i| NetworkNode::at(i, i as f64 * 20.0, 250.0))
			.collect();
		for node in &nodes {
			grid.insert(node);
		}
		assert!(!grid.nearby(&nodes[5]).is_empty());

		grid.clear();
		for node in &nodes {
			assert!(grid.nearby(node).is_empty());
		}
	}

	#[test]
	fn nearby_never_misses_a_node_in_range() {
		let (w, h, d) = (900.0, 700.0, 120.0);
		let mut rng = SmallRng::seed_from_u64(99);
		let nodes: Vec<_> = (0..400)
			.map(|i| NetworkNode::at(i, rng.gen_range(0.0..=w), rng.gen_range(0.0..=h)))
			.collect();
		let mut grid = SpatialGrid::new(w, h, d);
		for node in &nodes {
			grid.insert(node);
		}

		for a in &nodes {
			let candidates = grid.nearby(a);
			assert!(candidates.contains(&a.index));
			for b in &nodes {
				if a.distance_sq(b) <= d * d {
					assert!(candidates.contains(&b.index), "{} missed {}", a.index, b.index);
				}
			}
		}
	}

	#[test]
	fn overshooting_nodes_are_bucketed_at_the_edge() {
		let mut grid = SpatialGrid::new(300.0, 300.0, 100.0);
		let outside = NetworkNode::at(0, -0.4, 300.6);
		let inside = NetworkNode::at(1, 40.0, 250.0);
		grid.insert(&outside);
		grid.insert(&inside);

		let found = grid.nearby(&inside);
		assert!(found.contains(&0) && found.contains(&1));
	}

	#[test]
	fn far_cells_are_not_scanned() {
		let mut grid = SpatialGrid::new(1000.0, 1000.0, 100.0);
		let a = NetworkNode::at(0, 50.0, 50.0);
		let b = NetworkNode::at(1, 950.0, 950.0);
		grid.insert(&a);
		grid.insert(&b);
		assert_eq!(grid.nearby(&a), vec![0]);
	}
}
