use super::config::BackgroundConfig;
use super::node::NetworkNode;
use super::packets::DataPacket;
use super::surface::Surface;
use super::topology::Link;
use super::types::Palette;

pub fn fill_background<S: Surface + ?Sized>(surface: &S, palette: &Palette, width: f64, height: f64) {
	surface.set_fill_style(palette.background);
	surface.fill_rect(0.0, 0.0, width, height);
}

/// Replacement for the whole animation when motion is disabled.
pub fn paint_static<S: Surface + ?Sized>(surface: &S, palette: &Palette, width: f64, height: f64) {
	let [top, bottom] = palette.gradient;
	surface.fill_vertical_gradient(width, height, &[(0.0, top), (1.0, bottom)]);
}

/// All links as a single stroked path.
pub fn draw_links<S: Surface + ?Sized>(
	surface: &S,
	palette: &Palette,
	config: &BackgroundConfig,
	nodes: &[NetworkNode],
	links: &[Link],
) {
	if links.is_empty() {
		return;
	}
	surface.set_stroke_style(palette.link);
	surface.set_line_width(config.link_width);
	surface.begin_path();
	for link in links {
		let (a, b) = (&nodes[link.a], &nodes[link.b]);
		surface.move_to(a.x, a.y);
		surface.line_to(b.x, b.y);
	}
	surface.stroke();
}

/// One fill per node, each with its own opacity.
pub fn draw_nodes<S: Surface + ?Sized>(surface: &S, palette: &Palette, nodes: &[NetworkNode]) {
	for node in nodes {
		surface.set_fill_style(&palette.node_fill(node.opacity));
		surface.begin_path();
		surface.circle(node.x, node.y, node.radius);
		surface.fill();
	}
}

/// Glow layer for every packet at reduced alpha, then the cores.
pub fn draw_packets<S: Surface + ?Sized>(
	surface: &S,
	palette: &Palette,
	config: &BackgroundConfig,
	nodes: &[NetworkNode],
	packets: &[DataPacket],
) {
	if packets.is_empty() {
		return;
	}
	surface.set_fill_style(palette.packet);

	surface.set_global_alpha(config.packet_glow_alpha);
	surface.begin_path();
	for packet in packets {
		let (x, y) = packet.position(nodes);
		surface.circle(x, y, config.packet_glow_radius);
	}
	surface.fill();

	surface.set_global_alpha(1.0);
	surface.begin_path();
	for packet in packets {
		let (x, y) = packet.position(nodes);
		surface.circle(x, y, config.packet_radius);
	}
	surface.fill();
}
