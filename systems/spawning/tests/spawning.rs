use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use eco_defender_core::{Command, EnemyTuning, Event};
use eco_defender_system_spawning::{Config, Spawning};
use eco_defender_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

fn run_frames(seed: u64, frames: usize) -> Vec<Command> {
    let mut spawning = Spawning::new(Config::from_tuning(&EnemyTuning::default(), seed));
    let mut commands = Vec::new();
    for _ in 0..frames {
        spawning.handle(FRAME, &mut commands);
    }
    commands
}

fn lanes(commands: &[Command]) -> Vec<f32> {
    commands
        .iter()
        .map(|command| match command {
            Command::SpawnEnemy { lane } => *lane,
            other => panic!("unexpected command emitted: {other:?}"),
        })
        .collect()
}

#[test]
fn spawns_every_interval_at_sixty_frames_per_second() {
    // 2000 ms is exceeded on the 126th 16 ms frame (2016 ms), then the timer restarts.
    let commands = run_frames(0x1234_5678, 126 * 4);
    assert_eq!(commands.len(), 4);
}

#[test]
fn lanes_stay_within_band() {
    let commands = run_frames(0xdead_beef, 126 * 50);
    let lanes = lanes(&commands);
    assert_eq!(lanes.len(), 50);
    for lane in lanes {
        assert!((50.0..=550.0).contains(&lane), "lane {lane} outside band");
        assert_eq!(lane.fract(), 0.0, "lanes are whole pixels");
    }
}

#[test]
fn same_seed_replays_identically() {
    let fingerprint = |commands: &[Command]| {
        let mut hasher = DefaultHasher::new();
        for lane in lanes(commands) {
            lane.to_bits().hash(&mut hasher);
        }
        hasher.finish()
    };

    let first = run_frames(0x4d59_5df4_d0f3_3173, 126 * 10);
    let second = run_frames(0x4d59_5df4_d0f3_3173, 126 * 10);
    let other = run_frames(0x0000_0000_0000_0001, 126 * 10);

    assert_eq!(fingerprint(&first), fingerprint(&second));
    assert_ne!(lanes(&first), lanes(&other));
}

#[test]
fn spawned_enemies_enter_at_left_edge() {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::from_tuning(&EnemyTuning::default(), 99));
    let mut commands = Vec::new();
    spawning.handle(Duration::from_millis(2_001), &mut commands);

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let enemies = query::enemy_view(&world).into_vec();
    assert_eq!(enemies.len(), 1);
    assert_eq!(enemies[0].position.x(), 0.0);
    assert_eq!(enemies[0].health, 5);
    assert!(matches!(events.as_slice(), [Event::EnemySpawned { .. }]));
}
