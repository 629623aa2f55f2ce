#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Eco Defender.

mod towers;

use eco_defender_core::{
    Command, EnemyId, Event, PurchaseError, TowerKind, Tuning, WorldPoint, WELCOME_BANNER,
};

use self::towers::TowerRegistry;

/// Represents the authoritative Eco Defender world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    tuning: Tuning,
    towers: TowerRegistry,
    enemies: Vec<Enemy>,
    next_enemy_id: EnemyId,
    economy: Economy,
    selection: TowerKind,
    city_fallen: bool,
}

impl World {
    /// Creates a new world using the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Creates a new world whose constants come from the provided tuning.
    #[must_use]
    pub fn with_tuning(tuning: Tuning) -> Self {
        let economy = Economy {
            money: tuning.economy.starting_money,
            power: tuning.economy.starting_power,
            city_health: tuning.economy.starting_city_health,
        };
        Self {
            banner: WELCOME_BANNER,
            tuning,
            towers: TowerRegistry::new(),
            enemies: Vec::new(),
            next_enemy_id: EnemyId::new(0),
            economy,
            selection: TowerKind::Tree,
            city_fallen: false,
        }
    }

    fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|candidate| candidate.id == enemy)
    }

    fn resolve_enemies(&mut self, out_events: &mut Vec<Event>) {
        let field_width = self.tuning.field.width;
        let reward = self.tuning.economy.kill_reward;
        let economy = &mut self.economy;

        self.enemies.retain(|enemy| {
            if enemy.health <= 0 {
                economy.money += reward;
                out_events.push(Event::EnemyKilled {
                    enemy: enemy.id,
                    reward,
                });
                false
            } else if enemy.position.x() > field_width {
                economy.city_health = economy.city_health.saturating_sub(1);
                out_events.push(Event::EnemyBreached {
                    enemy: enemy.id,
                    city_health: economy.city_health,
                });
                false
            } else {
                true
            }
        });

        if self.economy.city_health == 0 && !self.city_fallen {
            self.city_fallen = true;
            out_events.push(Event::CityFell);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SelectTowerKind { kind } => {
            world.selection = kind;
            out_events.push(Event::SelectionChanged { kind });
        }
        Command::PurchaseTower { kind, position } => {
            let cost = world.tuning.towers.cost(kind);
            if world.economy.money >= cost {
                let tower = world.towers.insert(kind, position, &world.tuning.towers);
                world.economy.money -= cost;
                out_events.push(Event::TowerPurchased {
                    tower,
                    kind,
                    position,
                    cost,
                });
            } else {
                out_events.push(Event::TowerPurchaseRejected {
                    kind,
                    position,
                    reason: PurchaseError::InsufficientFunds,
                });
            }
        }
        Command::Tick { dt } => {
            world.towers.advance_cooldowns(dt);

            let step = world.tuning.enemies.speed * dt.as_secs_f32();
            for enemy in &mut world.enemies {
                enemy.position = WorldPoint::new(enemy.position.x() + step, enemy.position.y());
            }
            out_events.push(Event::TimeAdvanced { dt });
        }
        Command::SpawnEnemy { lane } => {
            let enemy = world.next_enemy_id;
            world.next_enemy_id = EnemyId::new(enemy.get().saturating_add(1));
            let position = WorldPoint::new(0.0, lane);
            world.enemies.push(Enemy {
                id: enemy,
                position,
                health: world.tuning.enemies.health,
            });
            out_events.push(Event::EnemySpawned { enemy, position });
        }
        Command::FireTower { tower, enemy } => {
            let Some(weapon) = world.towers.weapon_mut(tower) else {
                return;
            };
            if !weapon.ready_in.is_zero() {
                return;
            }
            let damage = weapon.damage;
            let cooldown = weapon.cooldown;

            let Some(target) = world.enemy_mut(enemy) else {
                return;
            };
            target.health = target.health.saturating_sub(damage);
            let remaining_health = target.health;

            if let Some(weapon) = world.towers.weapon_mut(tower) {
                weapon.ready_in = cooldown;
            }
            out_events.push(Event::TowerFired {
                tower,
                enemy,
                remaining_health,
            });
        }
        Command::DestroyTower { tower } => {
            let fragile = world
                .towers
                .get(tower)
                .is_some_and(|entry| entry.state.kind().is_fragile());
            if !fragile {
                return;
            }
            if let Some(removed) = world.towers.remove(tower) {
                out_events.push(Event::TowerDestroyed {
                    tower,
                    kind: removed.state.kind(),
                });
            }
        }
        Command::ResolveEnemies => world.resolve_enemies(out_events),
        Command::AdjustResources { money, power } => {
            world.economy.money = (world.economy.money + money).max(0.0);
            world.economy.power = (world.economy.power + power).max(0.0);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use eco_defender_core::{
        EconomySnapshot, EnemySnapshot, EnemyView, FieldTuning, TowerKind, TowerView, Tuning,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the constants driving the world.
    #[must_use]
    pub fn tuning(world: &World) -> &Tuning {
        &world.tuning
    }

    /// Provides read-only access to the play field definition.
    #[must_use]
    pub fn field(world: &World) -> &FieldTuning {
        &world.tuning.field
    }

    /// Captures a read-only view of the towers in creation order.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures a read-only view of the enemies in creation order.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                    health: enemy.health,
                })
                .collect(),
        )
    }

    /// Reports the current money, power and city health.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            money: world.economy.money,
            power: world.economy.power,
            city_health: world.economy.city_health,
        }
    }

    /// Tower kind used by the next purchase.
    #[must_use]
    pub fn selection(world: &World) -> TowerKind {
        world.selection
    }

    /// Reports whether city health has reached zero.
    #[must_use]
    pub fn city_fallen(world: &World) -> bool {
        world.city_fallen
    }
}

#[derive(Clone, Copy, Debug)]
struct Economy {
    money: f64,
    power: f64,
    city_health: u32,
}

#[derive(Clone, Debug)]
struct Enemy {
    id: EnemyId,
    position: WorldPoint,
    health: i32,
}
