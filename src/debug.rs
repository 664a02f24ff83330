/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects frame statistics
 * to be displayed in the UI.
 *
 * Includes metrics for:
 * - FPS (frames per second)
 * - Frame time
 * - Animation frames rendered since attach
 * - Particles and links painted in the last frame
 */

use std::time::Duration;

use crate::field::FrameReport;

#[derive(Clone, Debug)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub frames_rendered: u64,
    pub particles_drawn: usize,
    pub links_drawn: usize,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            frames_rendered: 0,
            particles_drawn: 0,
            links_drawn: 0,
        }
    }
}

impl DebugInfo {
    pub fn record_frame(&mut self, report: FrameReport, frames_rendered: u64) {
        self.particles_drawn = report.particles_drawn;
        self.links_drawn = report.links_drawn;
        self.frames_rendered = frames_rendered;
    }

    pub fn lines(&self) -> [String; 4] {
        [
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Particles: {}", self.particles_drawn),
            format!("Links: {} (frame {})", self.links_drawn, self.frames_rendered),
        ]
    }
}
