use super::types::MotionState;

/// Scheduling primitives a mounted background needs from its host.
pub trait FrameHost {
	fn request_frame(&self) -> Option<i32>;
	fn cancel_frame(&self, id: i32);
	/// Arm the resize debounce timer.
	fn set_timer(&self, delay_ms: i32) -> Option<i32>;
	fn clear_timer(&self, id: i32);
	/// Detach resize and preference listeners.
	fn remove_listeners(&self);
}

/// Pending callback handles of one mounted background.
///
/// Every host callback goes through here first, so once [`Lifecycle::stop`]
/// has run nothing is rescheduled even if a late callback still fires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Lifecycle {
	frame: Option<i32>,
	resize_timer: Option<i32>,
	stopped: bool,
}

impl Lifecycle {
	pub fn start<H: FrameHost + ?Sized>(&mut self, host: &H, motion: MotionState) {
		if motion == MotionState::Active && !self.stopped {
			self.frame = host.request_frame();
		}
	}

	/// Top of a frame callback. `false` means the loop was torn down.
	pub fn frame_fired(&mut self) -> bool {
		self.frame = None;
		!self.stopped
	}

	pub fn reschedule<H: FrameHost + ?Sized>(&mut self, host: &H) {
		if !self.stopped {
			self.frame = host.request_frame();
		}
	}

	/// A resize event restarts the quiet period.
	pub fn resize_event<H: FrameHost + ?Sized>(&mut self, host: &H, delay_ms: i32) {
		if self.stopped {
			return;
		}
		if let Some(id) = self.resize_timer.take() {
			host.clear_timer(id);
		}
		self.resize_timer = host.set_timer(delay_ms);
	}

	/// The debounce timer elapsed; returns whether to rebuild now.
	pub fn resize_timer_fired(&mut self) -> bool {
		self.resize_timer.take().is_some() && !self.stopped
	}

	/// Withdraw every pending callback. Idempotent.
	pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &H) {
		if self.stopped {
			return;
		}
		self.stopped = true;
		if let Some(id) = self.frame.take() {
			host.cancel_frame(id);
		}
		if let Some(id) = self.resize_timer.take() {
			host.clear_timer(id);
		}
		host.remove_listeners();
	}
}

#[cfg(test)]
impl Lifecycle {
	pub fn pending_frame(&self) -> Option<i32> {
		self.frame
	}

	pub fn pending_resize(&self) -> Option<i32> {
		self.resize_timer
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped
	}
}
