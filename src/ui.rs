/*
 * UI Module
 *
 * This module builds the small control panel using nannou_egui: a display
 * mode toggle, a reseed button, sliders for the population size and link
 * distance, and the frame statistics.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::palette::DisplayMode;
use crate::params::FieldConfig;

// What the user asked for this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiActions {
    pub toggle_mode: bool,
    pub reseed: bool,
    // A slider moved; the field has to be rebuilt with the new config
    pub reconfigure: bool,
}

impl UiActions {
    pub fn needs_reattach(&self) -> bool {
        self.reseed || self.reconfigure
    }

    // Combine with actions requested elsewhere (keyboard shortcuts)
    pub fn merge(self, other: UiActions) -> UiActions {
        UiActions {
            toggle_mode: self.toggle_mode != other.toggle_mode,
            reseed: self.reseed || other.reseed,
            reconfigure: self.reconfigure || other.reconfigure,
        }
    }
}

pub fn update_ui(
    egui: &mut Egui,
    mode: DisplayMode,
    config: &mut FieldConfig,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiActions {
    let ctx = egui.begin_frame();
    controls(&ctx, mode, config, show_debug, debug_info)
}

pub fn controls(
    ctx: &egui::CtxRef,
    mode: DisplayMode,
    config: &mut FieldConfig,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::Window::new("Particle Field")
        .default_pos([10.0, 10.0])
        .show(ctx, |ui| {
            let mut light = !mode.is_dark();
            if ui.checkbox(&mut light, "Light Mode (D)").changed() {
                actions.toggle_mode = true;
            }

            if ui.button("Reseed Particles (R)").clicked() {
                actions.reseed = true;
            }

            ui.collapsing("Field", |ui| {
                let count = ui.add(
                    egui::Slider::new(&mut config.particle_count, FieldConfig::get_particle_count_range())
                        .text("Particles"),
                );
                let distance = ui.add(
                    egui::Slider::new(&mut config.link_distance, FieldConfig::get_link_distance_range())
                        .text("Link Distance"),
                );
                if count.changed() || distance.changed() {
                    actions.reconfigure = true;
                }
            });

            ui.checkbox(show_debug, "Show Debug Info (G)");

            if *show_debug {
                ui.separator();
                for line in debug_info.lines() {
                    ui.label(line);
                }
            }
        });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_sits_inside_the_slider_ranges() {
        let config = FieldConfig::default();
        assert!(FieldConfig::get_particle_count_range().contains(&config.particle_count));
        assert!(FieldConfig::get_link_distance_range().contains(&config.link_distance));
    }

    #[test]
    fn sliders_and_reseed_both_ask_for_a_reattach() {
        assert!(!UiActions::default().needs_reattach());
        assert!(UiActions { reseed: true, ..UiActions::default() }.needs_reattach());
        assert!(UiActions { reconfigure: true, ..UiActions::default() }.needs_reattach());
        assert!(!UiActions { toggle_mode: true, ..UiActions::default() }.needs_reattach());
    }

    #[test]
    fn merged_toggles_cancel_out() {
        let key = UiActions { toggle_mode: true, reseed: true, ..UiActions::default() };
        let panel = UiActions { toggle_mode: true, ..UiActions::default() };

        let merged = panel.merge(key);
        assert!(!merged.toggle_mode);
        assert!(merged.reseed);
        assert_eq!(UiActions::default().merge(key), key);
    }

    #[test]
    fn an_idle_frame_leaves_the_config_alone() {
        let mut ctx = egui::CtxRef::default();
        ctx.begin_frame(egui::RawInput::default());

        let mut config = FieldConfig::default();
        let mut show_debug = true;
        let actions = controls(&ctx, DisplayMode::Dark, &mut config, &mut show_debug, &DebugInfo::default());
        ctx.end_frame();

        assert_eq!(actions, UiActions::default());
        assert_eq!(config, FieldConfig::default());
        assert!(show_debug);
    }
}
