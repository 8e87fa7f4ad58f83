use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

/// The 2D drawing operations the renderer relies on.
pub trait Surface {
	fn set_fill_style(&self, style: &str);
	fn set_stroke_style(&self, style: &str);
	fn set_line_width(&self, width: f64);
	fn set_global_alpha(&self, alpha: f64);
	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
	/// Fill `0,0..width,height` with a top-to-bottom gradient.
	fn fill_vertical_gradient(&self, width: f64, height: f64, stops: &[(f64, &str)]);
	fn begin_path(&self);
	fn move_to(&self, x: f64, y: f64);
	fn line_to(&self, x: f64, y: f64);
	/// Add a closed circle as its own subpath.
	fn circle(&self, x: f64, y: f64, radius: f64);
	fn fill(&self);
	fn stroke(&self);
}

impl Surface for CanvasRenderingContext2d {
	fn set_fill_style(&self, style: &str) {
		self.set_fill_style_str(style);
	}

	fn set_stroke_style(&self, style: &str) {
		self.set_stroke_style_str(style);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_global_alpha(&self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_vertical_gradient(&self, width: f64, height: f64, stops: &[(f64, &str)]) {
		let gradient = self.create_linear_gradient(0.0, 0.0, 0.0, height);
		for &(offset, color) in stops {
			let _ = gradient.add_color_stop(offset as f32, color);
		}
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, width, height);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn circle(&self, x: f64, y: f64, radius: f64) {
		CanvasRenderingContext2d::move_to(self, x + radius, y);
		let _ = self.arc(x, y, radius, 0.0, TAU);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}
}
