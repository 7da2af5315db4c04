//! Turn scheduling and attack application.
//!
//! The battle owns the grid, both unit lists, the wall HP pool, and the
//! event log for one level. Everything advances strictly in response to the
//! player-facing entry points; invalid actions are silent no-ops per the
//! combat rules, and terminal transitions surface as [`BattleSignal`]
//! return values rather than callbacks.

use std::thread;
use std::time::Duration;

use crate::error::LevelError;
use crate::game::combat::{trace_shot, Shot};
use crate::game::enemy::enemy_phase;
use crate::game::event::BattleEvent;
use crate::game::knockback::apply_knockback;
use crate::game::status::{sweep_dead, tick_unit};
use crate::game::unit::{BonusStat, Side, Unit, UnitSpec};
use crate::game::{Cell, Coord, Dir, Grid};
use crate::levelgen::LevelConfig;

/// Collision damage taken when a knocked-back unit hits something.
const KNOCKBACK_COLLISION_DAMAGE: i32 = 2;

/// Enemy generator: `(rows, cols, turns_taken)` to an enemy list.
///
/// Invoked once at battle construction with the carried-over turn count so
/// successive levels can escalate.
pub type EnemyGenerator = fn(u16, u16, u32) -> Vec<UnitSpec>;

/// Terminal transition signalled by an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum BattleSignal {
    /// Nothing terminal happened.
    None,
    /// The wall collapsed; the level is complete and the battle is frozen.
    LevelComplete,
    /// The party was wiped out.
    GameOver,
}

/// Whose turn it is and what the active hero may still do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    /// Index of the active hero in the living party list.
    pub current: usize,
    /// Move points the active hero has left this turn.
    pub move_points: u16,
    /// The active hero has armed an attack and owes a direction.
    pub awaiting_attack: bool,
    /// The wall fell; every mutating entry point is a no-op.
    pub transitioning: bool,
}

/// One level's worth of tactical combat state.
#[derive(Debug, Clone)]
pub struct Battle {
    grid: Grid,
    heroes: Vec<Unit>,
    enemies: Vec<Unit>,
    wall_hp: i32,
    turn: TurnState,
    turns_taken: u32,
    events: Vec<BattleEvent>,
    pacing: Duration,
    over: bool,
}

impl Battle {
    /// Build a battle from a level configuration and a party.
    ///
    /// Enemies come from the config's explicit list; a config asking for
    /// generated enemies degrades to an empty list here (see
    /// [`Battle::with_generator`]).
    ///
    /// # Errors
    ///
    /// Returns a [`LevelError`] for an empty party, zero dimensions, a
    /// malformed layout, or a grid too small for all units.
    pub fn new(config: &LevelConfig, party: Vec<Unit>) -> Result<Self, LevelError> {
        Self::with_generator(config, party, None, 0)
    }

    /// Build a battle, pulling enemies from `generator` when the config
    /// requests generated enemies.
    ///
    /// `prior_turns` is the carried-over turn count handed to the generator
    /// for difficulty escalation.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Battle::new`].
    pub fn with_generator(
        config: &LevelConfig,
        party: Vec<Unit>,
        generator: Option<EnemyGenerator>,
        prior_turns: u32,
    ) -> Result<Self, LevelError> {
        if party.is_empty() {
            return Err(LevelError::EmptyParty);
        }
        let mut grid = Grid::new(config.rows, config.cols).ok_or(LevelError::ZeroDimensions {
            rows: config.rows,
            cols: config.cols,
        })?;

        Self::paint_terrain(&mut grid, config)?;

        let enemy_specs: Vec<UnitSpec> = if config.generate_enemies {
            // Missing generator degrades to an empty enemy list; validating
            // the config is the level loader's job.
            generator.map_or_else(Vec::new, |g| g(config.rows, config.cols, prior_turns))
        } else {
            config.enemies.clone()
        };

        let mut heroes = party;
        for hero in &mut heroes {
            hero.side = Side::Hero;
            Self::place(&mut grid, hero, Cell::Hero)?;
        }

        let mut enemies = Vec::with_capacity(enemy_specs.len());
        for spec in &enemy_specs {
            let mut enemy = Unit::from_spec(spec, Side::Enemy);
            Self::place(&mut grid, &mut enemy, Cell::Enemy)?;
            enemies.push(enemy);
        }

        let first_agility = heroes[0].agility;
        Ok(Self {
            grid,
            heroes,
            enemies,
            wall_hp: config.wall_hp,
            turn: TurnState {
                current: 0,
                move_points: first_agility,
                awaiting_attack: false,
                transitioning: false,
            },
            turns_taken: 0,
            events: Vec::new(),
            pacing: Duration::ZERO,
            over: false,
        })
    }

    /// Write wall and rock cells from the layout, or the default rightmost
    /// wall column when no layout is given.
    fn paint_terrain(grid: &mut Grid, config: &LevelConfig) -> Result<(), LevelError> {
        let Some(layout) = &config.layout else {
            let x = grid.cols() - 1;
            for y in 0..grid.rows() {
                grid.set(Coord::new(x, y), Cell::Wall);
            }
            return Ok(());
        };

        let shape_err = LevelError::LayoutShape {
            rows: config.rows,
            cols: config.cols,
        };
        if layout.len() != usize::from(config.rows) {
            return Err(shape_err);
        }
        for (y, row) in layout.iter().enumerate() {
            if row.chars().count() != usize::from(config.cols) {
                return Err(shape_err);
            }
            for (x, symbol) in row.chars().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let coord = Coord::new(x as u16, y as u16);
                match symbol {
                    '.' => {}
                    '#' => {
                        grid.set(coord, Cell::Wall);
                    }
                    'R' => {
                        grid.set(coord, Cell::Rock);
                    }
                    other => return Err(LevelError::LayoutSymbol { symbol: other }),
                }
            }
        }
        Ok(())
    }

    /// Place a unit on its configured cell, probing forward in row-major
    /// order when that cell is taken or out of bounds.
    fn place(grid: &mut Grid, unit: &mut Unit, marker: Cell) -> Result<(), LevelError> {
        let start = if grid.in_bounds(unit.pos) {
            unit.pos
        } else {
            Coord::new(0, 0)
        };
        let spot = if grid.is_empty(start) {
            start
        } else {
            grid.probe_empty(start).ok_or(LevelError::Crowded)?
        };
        unit.pos = spot;
        grid.set(spot, marker);
        Ok(())
    }

    /// The battlefield grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Living party members in turn order.
    #[must_use]
    pub fn heroes(&self) -> &[Unit] {
        &self.heroes
    }

    /// Mutable party access, for applying mode-up buffs between levels.
    pub fn heroes_mut(&mut self) -> &mut [Unit] {
        &mut self.heroes
    }

    /// Living enemies.
    #[must_use]
    pub fn enemies(&self) -> &[Unit] {
        &self.enemies
    }

    /// Remaining wall hit points (may be ≤ 0 after collapse).
    #[must_use]
    pub const fn wall_hp(&self) -> i32 {
        self.wall_hp
    }

    /// Current turn state.
    #[must_use]
    pub const fn turn(&self) -> TurnState {
        self.turn
    }

    /// Full party rounds completed.
    #[must_use]
    pub const fn turns_taken(&self) -> u32 {
        self.turns_taken
    }

    /// Whether the party has been wiped out.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.over
    }

    /// The hero whose turn it is, while the battle is running.
    #[must_use]
    pub fn active_hero(&self) -> Option<&Unit> {
        if self.over || self.heroes.is_empty() {
            None
        } else {
            self.heroes.get(self.turn.current)
        }
    }

    /// Set the pacing delay applied between attack resolution and turn
    /// advancement. Zero (the default) disables it; tests leave it at zero.
    pub const fn set_pacing(&mut self, pacing: Duration) {
        self.pacing = pacing;
    }

    /// Everything logged so far.
    #[must_use]
    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Take the accumulated events, leaving the log empty.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether player entry points may mutate state at all.
    fn accepting(&self) -> bool {
        !self.over && !self.turn.transitioning && !self.heroes.is_empty()
    }

    /// Move the active hero one cell.
    ///
    /// Silent no-op while awaiting an attack direction, transitioning, out
    /// of move points, or with an invalid destination. Spending the last
    /// move point advances the turn.
    pub fn move_unit(&mut self, dir: Dir) -> BattleSignal {
        if !self.accepting() || self.turn.awaiting_attack || self.turn.move_points == 0 {
            return BattleSignal::None;
        }

        let hero = &mut self.heroes[self.turn.current];
        let Some(dest) = hero.pos.step(dir) else {
            return BattleSignal::None;
        };
        if !self.grid.is_empty(dest) {
            return BattleSignal::None;
        }

        self.grid.clear(hero.pos);
        self.grid.set(dest, Cell::Hero);
        hero.pos = dest;
        self.turn.move_points -= 1;

        if self.turn.move_points == 0 {
            return self.advance_turn();
        }
        BattleSignal::None
    }

    /// Arm an attack: the next call to [`Battle::attack_in_direction`]
    /// resolves it. No-op while transitioning or after game over.
    pub fn arm_attack(&mut self) {
        if self.accepting() {
            self.turn.awaiting_attack = true;
        }
    }

    /// Disarm a pending attack without spending it.
    pub fn cancel_attack(&mut self) {
        self.turn.awaiting_attack = false;
    }

    /// Resolve an armed attack along `dir`.
    ///
    /// Hits the first enemy or wall segment within the hero's range. A wall
    /// collapse freezes the battle and reports `LevelComplete` without
    /// advancing the turn; every other outcome (hit, miss, blocked) applies
    /// the pacing delay and advances to the next turn.
    pub fn attack_in_direction(&mut self, dir: Dir) -> BattleSignal {
        if !self.accepting() || !self.turn.awaiting_attack {
            return BattleSignal::None;
        }

        let hero = &self.heroes[self.turn.current];
        let (from, range, damage, yeet, attacker) = (
            hero.pos,
            hero.range,
            hero.strike_damage(),
            hero.bonuses.get(BonusStat::Yeet),
            hero.name.clone(),
        );

        match trace_shot(&self.grid, from, dir, range) {
            Shot::Unit {
                side: Side::Enemy,
                at,
            } => self.strike_enemy(at, dir, damage, yeet, &attacker),
            Shot::Wall { .. } => {
                self.wall_hp -= damage;
                self.events.push(BattleEvent::WallHit {
                    attacker,
                    damage,
                    remaining: self.wall_hp.max(0),
                });
                if self.wall_hp <= 0 {
                    self.turn.awaiting_attack = false;
                    self.turn.transitioning = true;
                    self.events.push(BattleEvent::WallDown);
                    return BattleSignal::LevelComplete;
                }
            }
            Shot::Rock { .. } => {
                self.events.push(BattleEvent::Blocked { attacker });
            }
            Shot::Unit {
                side: Side::Hero, ..
            }
            | Shot::Miss => {
                self.events.push(BattleEvent::Miss { attacker });
            }
        }

        self.turn.awaiting_attack = false;
        self.pace();
        self.advance_turn()
    }

    /// Forfeit the rest of the active hero's move points and advance.
    pub fn end_turn(&mut self) -> BattleSignal {
        if !self.accepting() {
            return BattleSignal::None;
        }
        self.turn.awaiting_attack = false;
        self.turn.move_points = 0;
        self.advance_turn()
    }

    /// Apply attack damage (and any knockback) to the enemy standing at `at`.
    fn strike_enemy(&mut self, at: Coord, dir: Dir, damage: i32, yeet: i32, attacker: &str) {
        let Some(idx) = self.enemies.iter().position(|e| e.pos == at) else {
            return;
        };
        let enemy = &mut self.enemies[idx];
        enemy.hp -= damage;
        self.events.push(BattleEvent::AttackHit {
            attacker: attacker.to_string(),
            target: enemy.name.clone(),
            damage,
        });

        if enemy.is_alive() && yeet > 0 {
            let distance = u16::try_from(yeet).unwrap_or(0);
            apply_knockback(
                &mut self.grid,
                &mut self.enemies[idx],
                dir,
                distance,
                KNOCKBACK_COLLISION_DAMAGE,
                &mut self.events,
            );
        }

        sweep_dead(&mut self.enemies, &mut self.grid, &mut self.events);
    }

    /// Hand the turn to the next hero; wrapping past the last living hero
    /// runs a status tick, the enemy turn, and a second status tick. The
    /// double tick is deliberate: effects burn down twice per party round.
    fn advance_turn(&mut self) -> BattleSignal {
        self.turn.current += 1;
        if self.turn.current >= self.heroes.len() {
            if self.tick_boundary() {
                return self.finish_game_over();
            }
            enemy_phase(
                &mut self.grid,
                &mut self.heroes,
                &mut self.enemies,
                &mut self.events,
            );
            if self.heroes.is_empty() {
                return self.finish_game_over();
            }
            if self.tick_boundary() {
                return self.finish_game_over();
            }
            self.turn.current = 0;
            self.turns_taken += 1;
        }
        self.turn.move_points = self.heroes[self.turn.current].agility;
        BattleSignal::None
    }

    /// One status-effect tick over every living unit (heroes then enemies),
    /// followed by the dead-unit sweep. Returns true when the party is gone.
    fn tick_boundary(&mut self) -> bool {
        for hero in &mut self.heroes {
            tick_unit(hero, &mut self.events);
        }
        for enemy in &mut self.enemies {
            tick_unit(enemy, &mut self.events);
        }
        sweep_dead(&mut self.heroes, &mut self.grid, &mut self.events);
        sweep_dead(&mut self.enemies, &mut self.grid, &mut self.events);
        self.heroes.is_empty()
    }

    fn finish_game_over(&mut self) -> BattleSignal {
        self.over = true;
        self.events.push(BattleEvent::GameOver);
        BattleSignal::GameOver
    }

    fn pace(&self) {
        if !self.pacing.is_zero() {
            thread::sleep(self.pacing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero(name: &str, x: u16, y: u16, attack: i32, range: u16, agility: u16) -> Unit {
        Unit::from_spec(
            &UnitSpec {
                name: name.to_string(),
                symbol: '@',
                x,
                y,
                attack,
                range,
                hp: 20,
                agility,
                bonuses: Vec::new(),
            },
            Side::Hero,
        )
    }

    fn enemy_spec(name: &str, x: u16, y: u16, hp: i32) -> UnitSpec {
        UnitSpec {
            name: name.to_string(),
            symbol: 'g',
            x,
            y,
            attack: 3,
            range: 1,
            hp,
            agility: 1,
            bonuses: Vec::new(),
        }
    }

    fn open_level(rows: u16, cols: u16, wall_hp: i32, enemies: Vec<UnitSpec>) -> LevelConfig {
        LevelConfig {
            rows,
            cols,
            wall_hp,
            enemies,
            generate_enemies: false,
            layout: None,
        }
    }

    #[test]
    fn test_empty_party_rejected() {
        let config = open_level(6, 6, 10, Vec::new());
        assert!(matches!(
            Battle::new(&config, Vec::new()),
            Err(LevelError::EmptyParty)
        ));
    }

    #[test]
    fn test_default_wall_column() {
        let config = open_level(4, 6, 10, Vec::new());
        let battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();
        for y in 0..4 {
            assert_eq!(battle.grid().get(Coord::new(5, y)), Some(Cell::Wall));
        }
    }

    #[test]
    fn test_spawn_collision_probes_forward() {
        // Two enemies configured onto the same cell: second gets the next
        // free cell in row-major order.
        let config = open_level(
            4,
            6,
            10,
            vec![enemy_spec("g1", 2, 1, 10), enemy_spec("g2", 2, 1, 10)],
        );
        let battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();
        assert_eq!(battle.enemies()[0].pos, Coord::new(2, 1));
        assert_eq!(battle.enemies()[1].pos, Coord::new(3, 1));
    }

    #[test]
    fn test_move_consumes_points_and_advances() {
        let config = open_level(6, 6, 10, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 2)]).unwrap();

        assert_eq!(battle.turn().move_points, 2);
        let _ = battle.move_unit(Dir::Down);
        assert_eq!(battle.turn().move_points, 1);
        assert_eq!(battle.heroes()[0].pos, Coord::new(0, 1));
        // Second move wraps the party turn (single hero) and resets points.
        let _ = battle.move_unit(Dir::Down);
        assert_eq!(battle.turn().move_points, 2);
        assert_eq!(battle.turns_taken(), 1);
    }

    #[test]
    fn test_move_into_wall_is_noop() {
        let config = open_level(4, 3, 10, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 1, 0, 2, 1, 2)]).unwrap();

        let _ = battle.move_unit(Dir::Right);
        assert_eq!(battle.heroes()[0].pos, Coord::new(1, 0));
        assert_eq!(battle.turn().move_points, 2);
    }

    #[test]
    fn test_move_while_awaiting_attack_is_noop() {
        let config = open_level(6, 6, 10, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 2)]).unwrap();

        battle.arm_attack();
        let _ = battle.move_unit(Dir::Down);
        assert_eq!(battle.heroes()[0].pos, Coord::new(0, 0));

        battle.cancel_attack();
        let _ = battle.move_unit(Dir::Down);
        assert_eq!(battle.heroes()[0].pos, Coord::new(0, 1));
    }

    #[test]
    fn test_attack_requires_arming() {
        let config = open_level(4, 4, 10, vec![enemy_spec("g", 1, 0, 10)]);
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 4, 1, 2)]).unwrap();

        let signal = battle.attack_in_direction(Dir::Right);
        assert_eq!(signal, BattleSignal::None);
        assert_eq!(battle.enemies()[0].hp, 10);
    }

    #[test]
    fn test_attack_kills_adjacent_enemy() {
        let config = open_level(4, 4, 10, vec![enemy_spec("g", 1, 0, 4)]);
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 4, 1, 2)]).unwrap();

        battle.arm_attack();
        let signal = battle.attack_in_direction(Dir::Right);
        assert_eq!(signal, BattleSignal::None);
        assert!(battle.enemies().is_empty());
        assert!(battle.grid().is_empty(Coord::new(1, 0)));
        assert!(battle
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::Defeated { .. })));
    }

    #[test]
    fn test_wall_collapse_freezes_battle() {
        // Attack damage equals the wall's full strength: one hit fells it.
        let config = open_level(4, 3, 4, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 1, 0, 4, 1, 2)]).unwrap();

        battle.arm_attack();
        let signal = battle.attack_in_direction(Dir::Right);
        assert_eq!(signal, BattleSignal::LevelComplete);
        assert!(battle.turn().transitioning);
        assert_eq!(battle.wall_hp(), 0);

        // Frozen: nothing mutates any more.
        let before = battle.heroes()[0].pos;
        assert_eq!(battle.move_unit(Dir::Down), BattleSignal::None);
        assert_eq!(battle.heroes()[0].pos, before);
        battle.arm_attack();
        assert!(!battle.turn().awaiting_attack);
        assert_eq!(battle.end_turn(), BattleSignal::None);
    }

    #[test]
    fn test_wall_hit_without_collapse_advances_turn() {
        let config = open_level(4, 3, 10, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 1, 0, 4, 1, 2)]).unwrap();

        battle.arm_attack();
        let signal = battle.attack_in_direction(Dir::Right);
        assert_eq!(signal, BattleSignal::None);
        assert_eq!(battle.wall_hp(), 6);
        assert!(!battle.turn().awaiting_attack);
        assert_eq!(battle.turn().move_points, 2);
        assert_eq!(battle.turns_taken(), 1);
    }

    #[test]
    fn test_status_ticks_twice_per_round() {
        use crate::game::status::BurnState;

        let config = open_level(6, 6, 10, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();
        battle.heroes_mut()[0].status.burn = Some(BurnState {
            damage_per_tick: 1,
            remaining: 4,
        });

        // One full party round: the burn ticks once before the enemy turn
        // and once after it.
        let _ = battle.end_turn();

        assert_eq!(battle.heroes()[0].hp, 18);
        assert_eq!(
            battle.heroes()[0].status.burn,
            Some(BurnState {
                damage_per_tick: 1,
                remaining: 2
            })
        );
        let burns = battle
            .events()
            .iter()
            .filter(|e| matches!(e, BattleEvent::BurnTick { .. }))
            .count();
        assert_eq!(burns, 2);
    }

    #[test]
    fn test_miss_logs_and_advances() {
        let config = open_level(6, 6, 10, Vec::new());
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 4, 2, 1)]).unwrap();

        battle.arm_attack();
        let _ = battle.attack_in_direction(Dir::Down);
        assert!(battle
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::Miss { .. })));
    }

    #[test]
    fn test_enemy_turn_strikes_adjacent_hero() {
        let config = open_level(6, 6, 10, vec![enemy_spec("g", 0, 1, 10)]);
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();

        // Hero moves right, away from the enemy; enemy (agility 1) steps
        // adjacent and strikes for 3.
        let _ = battle.move_unit(Dir::Right);
        assert_eq!(battle.heroes()[0].hp, 17);
    }

    #[test]
    fn test_game_over_on_party_wipe() {
        let mut spec = enemy_spec("g", 0, 1, 30);
        spec.attack = 50;
        let config = open_level(6, 6, 10, vec![spec]);
        let mut battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();

        let signal = battle.move_unit(Dir::Right);
        assert_eq!(signal, BattleSignal::GameOver);
        assert!(battle.is_over());
        assert!(battle.heroes().is_empty());
        assert!(battle
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::GameOver)));
    }

    #[test]
    fn test_generator_pulls_enemies() {
        fn wave_gen(_rows: u16, _cols: u16, turns: u32) -> Vec<UnitSpec> {
            vec![UnitSpec {
                name: format!("wave {turns}"),
                symbol: 'g',
                x: 3,
                y: 3,
                attack: 1,
                range: 1,
                hp: 5,
                agility: 1,
                bonuses: Vec::new(),
            }]
        }

        let mut config = open_level(6, 6, 10, Vec::new());
        config.generate_enemies = true;

        let battle =
            Battle::with_generator(&config, vec![hero("a", 0, 0, 2, 1, 1)], Some(wave_gen), 7)
                .unwrap();
        assert_eq!(battle.enemies().len(), 1);
        assert_eq!(battle.enemies()[0].name, "wave 7");
    }

    #[test]
    fn test_missing_generator_degrades_to_empty() {
        let mut config = open_level(6, 6, 10, vec![enemy_spec("ignored", 3, 3, 10)]);
        config.generate_enemies = true;

        let battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();
        assert!(battle.enemies().is_empty());
    }

    #[test]
    fn test_yeet_bonus_knocks_back_survivor() {
        let mut attacker = hero("a", 0, 0, 2, 1, 2);
        attacker.bonuses.add(BonusStat::Yeet, 2);
        let config = open_level(1, 6, 10, vec![enemy_spec("g", 1, 0, 20)]);
        let mut battle = Battle::new(&config, vec![attacker]).unwrap();

        battle.arm_attack();
        let _ = battle.attack_in_direction(Dir::Right);
        // Enemy took 2 damage and slid 2 cells right.
        let enemy = &battle.enemies()[0];
        assert_eq!(enemy.pos, Coord::new(3, 0));
        assert_eq!(enemy.hp, 18);
    }

    #[test]
    fn test_layout_overrides_wall() {
        let config = LevelConfig {
            rows: 2,
            cols: 3,
            wall_hp: 5,
            enemies: Vec::new(),
            generate_enemies: false,
            layout: Some(vec!["..#".to_string(), ".R#".to_string()]),
        };
        let battle = Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]).unwrap();
        assert_eq!(battle.grid().get(Coord::new(2, 0)), Some(Cell::Wall));
        assert_eq!(battle.grid().get(Coord::new(1, 1)), Some(Cell::Rock));
    }

    #[test]
    fn test_layout_shape_mismatch() {
        let config = LevelConfig {
            rows: 2,
            cols: 3,
            wall_hp: 5,
            enemies: Vec::new(),
            generate_enemies: false,
            layout: Some(vec!["..".to_string(), "..".to_string()]),
        };
        assert!(matches!(
            Battle::new(&config, vec![hero("a", 0, 0, 2, 1, 1)]),
            Err(LevelError::LayoutShape { .. })
        ));
    }
}
