/*
 * Input Module
 *
 * This module handles keyboard and raw window events for the particle field
 * window.
 *
 * Keys:
 * - D: toggle dark/light display mode
 * - R: reseed the particle field (detach and attach again)
 * - G: toggle the debug statistics
 */

use nannou::prelude::*;

use crate::app::Model;

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    // Keys typed into the control panel are not shortcuts
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    // Mode and reseed requests run in the next update, after its frames fire
    let queued = &mut model.queued_actions;
    match key {
        Key::D => queued.toggle_mode = !queued.toggle_mode,
        Key::R => queued.reseed = true,
        Key::G => model.show_debug = !model.show_debug,
        _ => {}
    }
}

// Pass raw events on to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
