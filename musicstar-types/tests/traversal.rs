//! Playhead traversal properties, driven through the public sequencer API.

use musicstar_types::reduce::reduce_action;
use musicstar_types::*;

/// Sequencer with both lanes emptied and the top lane at 40 bpm (1.5 s per step).
fn empty_sequencer() -> StarSequencer {
    let mut seq = StarSequencer::default();
    seq.clear_lane(Lane::Top);
    seq.clear_lane(Lane::Bottom);
    seq.set_tempo(Lane::Top, 0.0);
    seq
}

fn with_steps(seq: &mut StarSequencer, lane: Lane, steps: &[usize]) {
    for &step in steps {
        seq.toggle_step(lane, step);
    }
}

/// Tick one interval at a time and record where the cursor lands.
fn visit(seq: &mut StarSequencer, lane: Lane, n: usize) -> Vec<usize> {
    let interval = seq.lane(lane).interval_secs();
    (0..n)
        .map(|_| {
            seq.tick(lane, interval);
            seq.cursor(lane)
        })
        .collect()
}

#[test]
fn forward_wraps_in_order() {
    let mut seq = empty_sequencer();
    let visited = visit(&mut seq, Lane::Top, 25);
    let expected: Vec<usize> = (0..25).map(|i| i % STEPS).collect();
    assert_eq!(visited, expected);
}

#[test]
fn reverse_wraps_backwards() {
    let mut seq = empty_sequencer();
    seq.set_mode_flag(Lane::Top, ModeFlag::Reverse, true);
    // parked on 11: first reverse step is 10
    let visited = visit(&mut seq, Lane::Top, 14);
    assert_eq!(visited, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 11, 10, 9]);

    seq.enter_scene();
    seq.set_mode_flag(Lane::Top, ModeFlag::Restart, true);
    let visited = visit(&mut seq, Lane::Top, 3);
    assert_eq!(visited, vec![0, 11, 10]);
}

#[test]
fn skip_only_visits_active_steps() {
    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[2, 5]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    let visited = visit(&mut seq, Lane::Top, 40);
    for (i, step) in visited.iter().enumerate() {
        assert_eq!(*step, if i % 2 == 0 { 2 } else { 5 });
    }
}

#[test]
fn skip_fires_on_every_interval() {
    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[2, 5]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    let fired = seq.tick(Lane::Top, 1.5 * 6.0);
    let steps: Vec<_> = fired.iter().map(|f| f.step).collect();
    assert_eq!(steps, vec![2, 5, 2, 5, 2, 5]);
}

#[test]
fn skip_with_no_active_steps_does_not_hang() {
    let mut seq = empty_sequencer();
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    assert_eq!(visit(&mut seq, Lane::Top, 3), vec![0, 1, 2]);

    seq.set_mode_flag(Lane::Top, ModeFlag::Arp, true);
    assert!(seq.tick(Lane::Top, 1.5 * 20.0).is_empty());
}

#[test]
fn arp_bounces_between_active_extremes() {
    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[3, 9]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    // enter through the restart wrap so the first landing is the low end
    seq.set_mode_flag(Lane::Top, ModeFlag::Restart, true);
    assert_eq!(visit(&mut seq, Lane::Top, 1), vec![3]);

    seq.set_mode_flag(Lane::Top, ModeFlag::Arp, true);
    let visited = visit(&mut seq, Lane::Top, 30);
    for (i, step) in visited.iter().enumerate() {
        assert_eq!(*step, if i % 2 == 0 { 9 } else { 3 });
    }
    assert!(!visited.contains(&0));
    assert!(!visited.contains(&11));
}

#[test]
fn arp_from_fresh_playhead_starts_at_high_end() {
    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[3, 9]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    seq.set_mode_flag(Lane::Top, ModeFlag::Arp, true);
    // parked on the last step, the bounce turns before the first move
    assert_eq!(visit(&mut seq, Lane::Top, 6), vec![9, 3, 9, 3, 9, 3]);
}

#[test]
fn arp_with_one_active_step_sweeps_silent_steps() {
    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[4]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    seq.set_mode_flag(Lane::Top, ModeFlag::Arp, true);
    let visited = visit(&mut seq, Lane::Top, 8);
    assert_eq!(visited, vec![10, 9, 8, 7, 6, 5, 4, 3]);

    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[4]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    seq.set_mode_flag(Lane::Top, ModeFlag::Arp, true);
    let fired = seq.tick(Lane::Top, 1.5 * 22.0);
    let steps: Vec<_> = fired.iter().map(|f| f.step).collect();
    // down from 11 and back up: step 4 is passed twice
    assert_eq!(steps, vec![4, 4]);
}

#[test]
fn arp_never_fires_same_step_twice_in_a_row() {
    let mut seq = empty_sequencer();
    with_steps(&mut seq, Lane::Top, &[0, 4, 7, 11]);
    seq.set_mode_flag(Lane::Top, ModeFlag::Skip, true);
    seq.set_mode_flag(Lane::Top, ModeFlag::Arp, true);
    let fired = seq.tick(Lane::Top, 1.5 * 50.0);
    assert_eq!(fired.len(), 50);
    for pair in fired.windows(2) {
        assert_ne!(pair[0].step, pair[1].step);
    }
}

#[test]
fn restart_lands_on_zero_and_clears() {
    for reverse in [false, true] {
        for arp in [false, true] {
            let mut seq = empty_sequencer();
            seq.set_mode_flag(Lane::Top, ModeFlag::Reverse, reverse);
            seq.set_mode_flag(Lane::Top, ModeFlag::Arp, arp);
            visit(&mut seq, Lane::Top, 7);
            seq.set_mode_flag(Lane::Top, ModeFlag::Restart, true);
            assert_eq!(visit(&mut seq, Lane::Top, 1), vec![0]);
            assert!(!seq.mode_flag(Lane::Top, ModeFlag::Restart));
        }
    }
}

#[test]
fn active_count_matches_pattern_through_actions() {
    let mut seq = StarSequencer::default();
    let toggles = [(0, 3), (1, 3), (0, 3), (0, 0), (1, 5), (1, 11), (0, 11), (1, 11)];
    for (lane, step) in toggles {
        let lane = Lane::from_index(lane);
        reduce_action(&StarAction::ToggleStep(lane, step), &mut seq);
        for lane in Lane::ALL {
            let counted = seq.lane(lane).pattern().steps().iter().filter(|&&s| s).count();
            assert_eq!(seq.active_count(lane), counted);
        }
    }
}

#[test]
fn scenario_tempo_range_endpoints() {
    let mut seq = StarSequencer::default();
    reduce_action(&StarAction::SetTempo(Lane::Top, 0.0), &mut seq);
    assert_eq!(seq.tempo(Lane::Top), 40.0);
    reduce_action(&StarAction::SetTempo(Lane::Top, 1.0), &mut seq);
    assert_eq!(seq.tempo(Lane::Top), 1000.0);
    reduce_action(&StarAction::SetTempo(Lane::Top, 0.0), &mut seq);
    assert_eq!(seq.tick(Lane::Top, 60.0 / 40.0).len(), 1);
}

#[test]
fn matched_lanes_fire_together() {
    let mut seq = StarSequencer::default();
    reduce_action(&StarAction::ToggleMatch(MatchKind::Tempo), &mut seq);
    reduce_action(&StarAction::SetTempo(Lane::Top, 0.5), &mut seq);
    assert_eq!(seq.tempo(Lane::Top), seq.tempo(Lane::Bottom));

    let interval = seq.lane(Lane::Top).interval_secs();
    for _ in 0..24 {
        for lane in Lane::ALL {
            seq.tick(lane, interval * 0.5);
            seq.tick(lane, interval * 0.5);
        }
        assert_eq!(seq.cursor(Lane::Top), seq.cursor(Lane::Bottom));
    }
}
