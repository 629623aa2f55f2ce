use std::time::Duration;

use eco_defender_core::{PlayerAction, TowerKind, Tuning, WorldPoint};
use eco_defender_simulation::Simulation;
use eco_defender_world::query;
use proptest::prelude::*;

fn action() -> impl Strategy<Value = PlayerAction> {
    prop_oneof![
        (0usize..3).prop_map(|index| PlayerAction::SelectTower(TowerKind::ALL[index])),
        (0.0f32..800.0, 0.0f32..600.0)
            .prop_map(|(x, y)| PlayerAction::PlaceAt(WorldPoint::new(x, y))),
    ]
}

fn frame() -> impl Strategy<Value = (u64, Vec<PlayerAction>)> {
    (0u64..250, prop::collection::vec(action(), 0..3))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn money_and_power_never_go_negative(
        seed in any::<u64>(),
        frames in prop::collection::vec(frame(), 1..400),
    ) {
        let mut simulation = Simulation::new(Tuning::default(), seed).expect("valid tuning");
        for (millis, actions) in frames {
            let _ = simulation.step(Duration::from_millis(millis), &actions);
            let economy = query::economy(simulation.world());
            prop_assert!(economy.money >= 0.0, "money went negative: {}", economy.money);
            prop_assert!(economy.power >= 0.0, "power went negative: {}", economy.power);
        }
    }
}
