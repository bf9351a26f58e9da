//! Whole-run scenarios driven through the contact probe

use hoppy::consts::SIM_DT;
use hoppy::sim::{ContactProbe, GamePhase, SimEvent, Simulation, TickInput, tick};
use hoppy::{SceneDescriptor, Tuning};

/// Weightless body with every gap centered on `gap_y`
fn hovering(gap_y: f32) -> Simulation {
    let tuning = Tuning::from_json(&format!(
        r#"{{ "gravity": 0.0, "spawn_y_min": {gap_y}, "spawn_y_max": {gap_y} }}"#
    ))
    .unwrap();
    Simulation::new(&SceneDescriptor::default(), tuning, 2024).unwrap()
}

/// Step with probe contacts fed back in, collecting every event
fn play(sim: &mut Simulation, ticks: usize) -> Vec<SimEvent> {
    let mut probe = ContactProbe::new();
    let mut input = TickInput::default();
    let mut events = Vec::new();
    for _ in 0..ticks {
        tick(sim, &input, SIM_DT);
        input = TickInput {
            contacts: probe.detect(sim),
            ..Default::default()
        };
        events.extend(sim.drain_events());
    }
    for (a, b) in &input.contacts {
        sim.on_contact(a, b);
    }
    events.extend(sim.drain_events());
    events
}

#[test]
fn test_every_passed_gap_scores_once() {
    let mut sim = hovering(320.0);
    let events = play(&mut sim, 60 * 20);

    assert_eq!(sim.current_state(), GamePhase::Active);

    let released = events
        .iter()
        .filter(|e| matches!(e, SimEvent::ObstacleReleased { .. }))
        .count() as u64;
    let body = sim.body();
    let overlapping = sim
        .obstacles()
        .filter(|o| o.left() < body.pos.x + body.radius)
        .count() as u64;

    assert!(released >= 5);
    assert_eq!(sim.current_score(), released + overlapping);
}

#[test]
fn test_column_hit_ends_run_once() {
    let mut sim = hovering(450.0);
    let events = play(&mut sim, 60 * 10);

    assert_eq!(sim.current_state(), GamePhase::GameOver);
    assert_eq!(sim.current_score(), 0);
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, SimEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
}

#[test]
fn test_fresh_instance_per_run() {
    let mut first = hovering(450.0);
    play(&mut first, 60 * 10);
    assert_eq!(first.current_state(), GamePhase::GameOver);

    let second = hovering(450.0);
    assert_eq!(second.current_state(), GamePhase::Active);
    assert_eq!(second.current_score(), 0);
    assert_eq!(second.obstacles().count(), 0);
}

#[test]
fn test_untouched_run_falls_to_ground() {
    let mut sim = Simulation::new(&SceneDescriptor::default(), Tuning::default(), 8).unwrap();
    let events = play(&mut sim, 120);

    assert_eq!(sim.current_state(), GamePhase::GameOver);
    assert!(events.contains(&SimEvent::GameOver { score: 0 }));
    let body = sim.body();
    assert_eq!(body.pos.y, sim.ground_top() + body.radius);
}
