//! `insertTempCommands` and the standby/preheat profile math (§4.E
//! "Temperature-command insertion").

use crate::layer_plan::LayerPlan;
use crate::motion::extruder_plan::TemperatureInsert;
use std::collections::HashMap;
use tracing::warn;

/// Firmware/material parameters the temperature-insertion algorithm needs.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureSettings {
    pub standby_temperature: f64,
    /// Degrees per second; assumed symmetric for heating and cooling.
    pub nozzle_heat_up_speed: f64,
    pub min_cool_heat_time_window: f64,
    /// Extra time added to a computed heating duration to absorb
    /// accumulated estimate error (§4.E step 3; "e.g. 1 s").
    pub safety_margin: f64,
}

impl Default for TemperatureSettings {
    fn default() -> Self {
        Self {
            standby_temperature: 150.0,
            nozzle_heat_up_speed: 2.0,
            min_cool_heat_time_window: 5.0,
            safety_margin: 1.0,
        }
    }
}

fn heat_time(settings: &TemperatureSettings, from: f64, to: f64) -> f64 {
    (to - from).abs() / settings.nozzle_heat_up_speed.max(1e-9)
}

struct StandbyProfile {
    low_temperature: f64,
    heating_time: f64,
}

/// Cools from `start_temp` toward `standby_temperature` for as long as the
/// window allows, then warms back to `target_temp`; if the window is too
/// short to both cool and reheat, skips cooling and stays hot (§4.E step 2).
fn compute_standby_profile(
    settings: &TemperatureSettings,
    start_temp: f64,
    target_temp: f64,
    window: f64,
) -> StandbyProfile {
    let full_heating_time = heat_time(settings, settings.standby_temperature, target_temp);
    if window < settings.min_cool_heat_time_window || window <= full_heating_time {
        return StandbyProfile {
            low_temperature: start_temp.max(target_temp),
            heating_time: 0.0,
        };
    }

    let cooling_time = window - full_heating_time;
    let max_drop = settings.nozzle_heat_up_speed * cooling_time;
    let low = (start_temp - max_drop).max(settings.standby_temperature);
    let heating_time = heat_time(settings, low, target_temp);
    StandbyProfile { low_temperature: low, heating_time }
}

/// Walks `plan`'s paths backward from the end, accumulating each path's
/// own estimated time, to find the `(path_index, delta)` that sits
/// `offset` seconds before the plan's end.
fn locate_offset_from_end(path_times: &[f64], offset: f64) -> (usize, f64) {
    let mut remaining = offset;
    for (i, &t) in path_times.iter().enumerate().rev() {
        if remaining <= t {
            return (i, (t - remaining).max(0.0));
        }
        remaining -= t;
    }
    (0, 0.0)
}

/// A flat index into the buffer's plans, in emission order.
type FlatIndex = (usize, usize);

/// Inserts all temperature commands needed by the plans currently in
/// `layers` (§4.E). Operates on the whole buffered window at once, since a
/// preheat command for a later plan may need to land inside an earlier
/// one. Re-derives every insert from scratch each call rather than
/// appending to whatever a previous call already placed, since a plan that
/// stays buffered across multiple `handle()` calls would otherwise
/// accumulate duplicate commands.
pub fn insert_temperature_commands(layers: &mut [LayerPlan], settings: &TemperatureSettings) {
    for layer in layers.iter_mut() {
        for plan in layer.extruder_plans.iter_mut() {
            plan.temperature_inserts.clear();
        }
    }

    let flat: Vec<FlatIndex> = layers
        .iter()
        .enumerate()
        .flat_map(|(li, layer)| (0..layer.extruder_plans.len()).map(move |pi| (li, pi)))
        .collect();

    let mut last_plan_for_extruder: HashMap<usize, usize> = HashMap::new();

    for (flat_idx, &(li, pi)) in flat.iter().enumerate() {
        let extruder = layers[li].extruder_plans[pi].extruder_nr;
        let required_temp = layers[li].extruder_plans[pi].required_start_temperature;

        if flat_idx == 0 {
            layers[li].extruder_plans[pi].insert_temperature(TemperatureInsert {
                extruder,
                path_index: 0,
                delta: 0.0,
                temperature: required_temp,
                wait: true,
            });
            last_plan_for_extruder.insert(extruder, flat_idx);
            continue;
        }

        let (prev_li, prev_pi) = flat[flat_idx - 1];
        let prev_extruder = layers[prev_li].extruder_plans[prev_pi].extruder_nr;

        if prev_extruder == extruder {
            let prev_extrusion_temp = layers[prev_li].extruder_plans[prev_pi]
                .extrusion_temperature
                .unwrap_or(required_temp);
            let duration = heat_time(settings, prev_extrusion_temp, required_temp);
            let half = duration / 2.0;
            let path_times = layers[prev_li].extruder_plans[prev_pi].path_times.clone();
            let (path_index, delta) = locate_offset_from_end(&path_times, half);
            layers[prev_li].extruder_plans[prev_pi].insert_temperature(TemperatureInsert {
                extruder,
                path_index,
                delta,
                temperature: required_temp,
                wait: false,
            });
        } else if let Some(&prime_flat_idx) = last_plan_for_extruder.get(&extruder) {
            let (pli, ppi) = flat[prime_flat_idx];
            let window: f64 = flat[prime_flat_idx + 1..flat_idx]
                .iter()
                .map(|&(l, p)| layers[l].extruder_plans[p].layer_time())
                .sum();
            let prime_extrusion_temp = layers[pli].extruder_plans[ppi]
                .extrusion_temperature
                .unwrap_or(required_temp);
            let profile = compute_standby_profile(settings, prime_extrusion_temp, required_temp, window);

            let cooldown_index = layers[pli].extruder_plans[ppi].paths.len();
            layers[pli].extruder_plans[ppi].insert_temperature(TemperatureInsert {
                extruder,
                path_index: cooldown_index,
                delta: 0.0,
                temperature: profile.low_temperature,
                wait: false,
            });

            if profile.heating_time <= 0.0 {
                continue;
            }

            let heating_time = profile.heating_time + settings.safety_margin;
            if window < settings.min_cool_heat_time_window {
                warn!(extruder, window, "preheat window below configured minimum");
            }
            insert_preheat_backward(layers, &flat, prime_flat_idx, flat_idx, heating_time, extruder, required_temp);
        } else {
            // No P⁼ in the buffer: hold the extruder at its required
            // temperature for the whole visible window.
            layers[li].extruder_plans[pi].insert_temperature(TemperatureInsert {
                extruder,
                path_index: 0,
                delta: 0.0,
                temperature: required_temp,
                wait: true,
            });
        }

        last_plan_for_extruder.insert(extruder, flat_idx);
    }
}

fn insert_preheat_backward(
    layers: &mut [LayerPlan],
    flat: &[FlatIndex],
    prime_flat_idx: usize,
    target_flat_idx: usize,
    heating_time: f64,
    target_extruder: usize,
    target_temperature: f64,
) {
    let mut remaining = heating_time;
    let mut j = target_flat_idx;
    while j > prime_flat_idx + 1 {
        j -= 1;
        let (l, p) = flat[j];
        let duration = layers[l].extruder_plans[p].layer_time();
        if remaining <= duration {
            let path_times = layers[l].extruder_plans[p].path_times.clone();
            let (path_index, delta) = locate_offset_from_end(&path_times, remaining);
            layers[l].extruder_plans[p].insert_temperature(TemperatureInsert {
                extruder: target_extruder,
                path_index,
                delta,
                temperature: target_temperature,
                wait: false,
            });
            return;
        }
        remaining -= duration;
    }

    // Ran out of buffered plans before placing the full lead time: pin the
    // preheat at the start of the earliest plan after P⁼.
    let (l, p) = flat[prime_flat_idx + 1];
    layers[l].extruder_plans[p].insert_temperature(TemperatureInsert {
        extruder: target_extruder,
        path_index: 0,
        delta: 0.0,
        temperature: target_temperature,
        wait: false,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer_plan::LayerPlan;
    use crate::motion::extruder_plan::ExtruderPlan;
    use crate::motion::estimate::TimeMaterialEstimate;

    fn plan_with_duration(extruder_nr: usize, required_temp: f64, extrusion_temp: f64, duration: f64, path_count: usize) -> ExtruderPlan {
        let mut plan = ExtruderPlan::new(extruder_nr, required_temp);
        plan.extrusion_temperature = Some(extrusion_temp);
        plan.estimate = TimeMaterialEstimate { extrude_time: duration, ..Default::default() };
        let per_path = duration / path_count as f64;
        plan.path_times = vec![per_path; path_count];
        plan.paths = (0..path_count)
            .map(|_| crate::motion::GCodePath {
                config: crate::motion::PathConfig {
                    feature_type: crate::motion::PrintFeatureType::OuterWall,
                    speed: 50.0,
                    acceleration: 500.0,
                    jerk: 5.0,
                    line_width: 400,
                    layer_thickness: 200,
                    flow_ratio: 1.0,
                    fan_speed_override: None,
                    is_bridge: false,
                },
                kind: crate::motion::GCodePathKind::Travel(crate::geometry::IntPoint::ZERO),
                retract: false,
                z_hop: false,
                spiralize: false,
                done: false,
            })
            .collect();
        plan
    }

    #[test]
    fn scenario_five_places_cooldown_and_preheat_as_specified() {
        // Heat-up speed such that rising from standby (175) to 210 takes 14s.
        let settings = TemperatureSettings {
            standby_temperature: 175.0,
            nozzle_heat_up_speed: (210.0 - 175.0) / 14.0,
            min_cool_heat_time_window: 1.0,
            safety_margin: 0.0,
        };

        let a = plan_with_duration(0, 190.0, 190.0, 60.0, 3);
        let b = plan_with_duration(1, 200.0, 200.0, 20.0, 4);
        let c = plan_with_duration(0, 210.0, 210.0, 10.0, 2);

        let mut layers = vec![LayerPlan {
            z_height: 0,
            layer_thickness: 200,
            extruder_plans: vec![a, b, c],
            last_planned_position: crate::geometry::IntPoint::ZERO,
            first_travel_destination_index: 0,
        }];

        insert_temperature_commands(&mut layers, &settings);

        let a_inserts = &layers[0].extruder_plans[0].temperature_inserts;
        // The cooldown lands right after A's last path (path_index == path count).
        let cooldown = a_inserts.iter().find(|i| i.temperature == 175.0).expect("cooldown present");
        assert_eq!(cooldown.path_index, 3);

        let b_inserts = &layers[0].extruder_plans[1].temperature_inserts;
        let preheat = b_inserts.iter().find(|i| i.temperature == 210.0).expect("preheat present");
        // 14s before the end of a 20s plan split into 4 equal 5s paths:
        // that's 14s back from the end, landing 1s into path index 2 (0-based).
        let time_from_end: f64 = b.path_times_suffix_sum(preheat.path_index, preheat.delta);
        assert!((time_from_end - 14.0).abs() < 1e-6);
    }

    impl ExtruderPlan {
        /// Test helper: time remaining from `(path_index, delta)` to the
        /// end of the plan.
        fn path_times_suffix_sum(&self, path_index: usize, delta: f64) -> f64 {
            let mut total = self.path_times[path_index] - delta;
            for t in &self.path_times[path_index + 1..] {
                total += t;
            }
            total
        }
    }

    #[test]
    fn same_extruder_no_switch_inserts_single_midpoint_command() {
        let settings = TemperatureSettings::default();
        let a = plan_with_duration(0, 200.0, 200.0, 30.0, 2);
        let b = plan_with_duration(0, 205.0, 205.0, 10.0, 1);
        let mut layers = vec![LayerPlan {
            z_height: 0,
            layer_thickness: 200,
            extruder_plans: vec![a, b],
            last_planned_position: crate::geometry::IntPoint::ZERO,
            first_travel_destination_index: 0,
        }];
        insert_temperature_commands(&mut layers, &settings);
        let inserts = &layers[0].extruder_plans[0].temperature_inserts;
        assert!(inserts.iter().any(|i| i.temperature == 205.0));
    }

    #[test]
    fn first_plan_of_job_gets_an_initial_temperature_wait() {
        let settings = TemperatureSettings::default();
        let a = plan_with_duration(0, 200.0, 200.0, 10.0, 1);
        let mut layers = vec![LayerPlan {
            z_height: 0,
            layer_thickness: 200,
            extruder_plans: vec![a],
            last_planned_position: crate::geometry::IntPoint::ZERO,
            first_travel_destination_index: 0,
        }];
        insert_temperature_commands(&mut layers, &settings);
        let inserts = &layers[0].extruder_plans[0].temperature_inserts;
        assert_eq!(inserts.len(), 1);
        assert!(inserts[0].wait);
    }
}
