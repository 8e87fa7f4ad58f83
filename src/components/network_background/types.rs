/// Light/dark colour selection supplied by the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
	Light,
	#[default]
	Dark,
}

impl ColorMode {
	pub fn toggled(self) -> Self {
		match self {
			Self::Light => Self::Dark,
			Self::Dark => Self::Light,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}
}

/// Draw-time colours for one [`ColorMode`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	pub background: &'static str,
	pub gradient: [&'static str; 2],
	pub link: &'static str,
	/// Nodes are filled per node with their own alpha.
	pub node_rgb: (u8, u8, u8),
	pub packet: &'static str,
}

impl Palette {
	pub fn for_mode(mode: ColorMode) -> Self {
		match mode {
			ColorMode::Dark => Self {
				background: "#0b1120",
				gradient: ["#0b1120", "#1e293b"],
				link: "rgba(96, 165, 250, 0.18)",
				node_rgb: (96, 165, 250),
				packet: "#22d3ee",
			},
			ColorMode::Light => Self {
				background: "#f8fafc",
				gradient: ["#f8fafc", "#e2e8f0"],
				link: "rgba(37, 99, 235, 0.14)",
				node_rgb: (37, 99, 235),
				packet: "#0891b2",
			},
		}
	}

	pub fn node_fill(&self, opacity: f64) -> String {
		let (r, g, b) = self.node_rgb;
		format!("rgba({}, {}, {}, {:.3})", r, g, b, opacity)
	}
}

/// Host hints gathered once per mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionPreferences {
	pub reduced_motion: bool,
	pub low_power: bool,
	pub print: bool,
	/// Explicit lite switch from the embedding page.
	pub forced_lite: bool,
}

/// Operating state of one mounted background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionState {
	/// Full simulation and draw loop.
	Active,
	/// Static gradient only.
	Disabled,
}

impl MotionState {
	pub fn resolve(prefs: MotionPreferences) -> Self {
		if prefs.reduced_motion || prefs.low_power || prefs.print || prefs.forced_lite {
			Self::Disabled
		} else {
			Self::Active
		}
	}
}
