//! Player kinematics driven through the full step pipeline: landing,
//! coyote time, jump buffering and variable jump height.

use glam::Vec2;

use aberredcore::components::collider::Collider;
use aberredcore::components::motion::Motion;
use aberredcore::components::transform::Transform;
use aberredcore::ecs::entity::{Entity, Tag};
use aberredcore::game::Game;
use aberredcore::resources::gameconfig::GameConfig;
use aberredcore::resources::input::InputSnapshot;
use aberredcore::resources::player::{PlayerMode, PlayerState};

const DT: f32 = 0.01;
const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

fn jump() -> InputSnapshot {
    InputSnapshot::jump()
}

/// Wide floor whose top surface is at `top`.
fn spawn_floor(game: &mut Game, top: f32) -> Entity {
    game.spawn_platform(Vec2::new(0.0, top + 2.0), Vec2::new(500.0, 2.0))
}

/// Game with a floor at y = 18 and the default player standing on it.
fn standing_game(config: GameConfig) -> (Game, Entity) {
    let mut game = Game::new(config);
    let floor = spawn_floor(&mut game, 18.0);
    game.spawn_player(Vec2::new(0.0, 10.0));
    for _ in 0..5 {
        game.step(DT, idle());
    }
    assert_eq!(game.player.mode(), PlayerMode::Grounded);
    (game, floor)
}

fn player_y(game: &Game) -> f32 {
    game.registry.transforms.get(game.player.entity).position.y
}

fn player_vy(game: &Game) -> f32 {
    game.registry.motions.get(game.player.entity).velocity.y
}

#[test]
fn test_landing_pushes_out_and_grounds() {
    let mut game = Game::new(GameConfig::new());
    spawn_floor(&mut game, 9.0);

    // Collider extents are half-extents: 0.5 scaled by 4 is a 4x4 box whose
    // bottom edge starts 2 units into the floor.
    let player = game.registry.create_entity(Tag::Player);
    game.registry.transforms.insert(
        player,
        Transform::new(0.0, 9.0).with_scale(Vec2::new(4.0, 4.0)),
    );
    game.registry.colliders.insert(player, Collider::new(0.5, 0.5));
    game.registry.motions.insert(
        player,
        Motion::new()
            .with_velocity(Vec2::new(0.0, 50.0))
            .with_acceleration(Vec2::new(0.0, game.config.physics.gravity)),
    );
    game.player = PlayerState::new(player, game.config.player.coyote_time);

    game.step(DT, idle());
    assert_eq!(player_vy(&game), 0.0);
    // Bottom edge (y + 2) back on the floor top.
    assert!(approx_eq(player_y(&game), 7.0), "y = {}", player_y(&game));
    assert_eq!(game.player.mode(), PlayerMode::Grounded);

    game.step(DT, idle());
    assert_eq!(game.player.mode(), PlayerMode::Grounded);
    assert!(approx_eq(player_y(&game), 7.0));
}

#[test]
fn test_unit_half_extent_player_lands_on_floor() {
    let mut config = GameConfig::new();
    config.physics.gravity = 0.0;
    let mut game = Game::new(config);
    spawn_floor(&mut game, 9.0);

    // Half-extent 1 is a 2x2 box. At y = 10 it overlaps the floor by (2, 2)
    // and the tie separates vertically.
    let player = game.registry.create_entity(Tag::Player);
    game.registry.transforms.insert(player, Transform::new(0.0, 10.0));
    game.registry.colliders.insert(player, Collider::new(1.0, 1.0));
    game.registry.motions.insert(player, Motion::new());
    game.player = PlayerState::new(player, game.config.player.coyote_time);

    game.step(DT, idle());
    assert_eq!(player_vy(&game), 0.0);
    assert!(approx_eq(player_y(&game), 8.0), "y = {}", player_y(&game));
    assert_eq!(game.player.mode(), PlayerMode::Grounded);
}

#[test]
fn test_standing_player_stays_put() {
    let (mut game, _) = standing_game(GameConfig::new());
    for _ in 0..120 {
        game.step(DT, idle());
        assert_eq!(game.player.mode(), PlayerMode::Grounded);
    }
    assert!(approx_eq(player_y(&game), 10.0));
}

fn walk_off_and_press_at(press_step: usize) -> Game {
    let (mut game, floor) = standing_game(GameConfig::new());
    game.registry.remove_all_components_of(floor);
    for step in 1..=press_step + 20 {
        let input = if step == press_step { jump() } else { idle() };
        game.step(DT, input);
        if game.player.jumping {
            break;
        }
    }
    game
}

#[test]
fn test_coyote_jump_inside_grace_period() {
    let game = walk_off_and_press_at(5);
    assert!(game.player.jumping);
    assert!(player_vy(&game) < 0.0);
}

#[test]
fn test_no_coyote_jump_after_grace_period() {
    let game = walk_off_and_press_at(12);
    assert!(!game.player.jumping);
    assert!(player_vy(&game) > 0.0);
    assert_eq!(game.player.mode(), PlayerMode::Airborne);
}

/// Player falling at a constant 100 u/s towards a floor 27.5 units below.
/// With no gravity it touches down on step 28.
fn falling_game() -> Game {
    let mut config = GameConfig::new();
    config.physics.gravity = 0.0;
    let mut game = Game::new(config);
    spawn_floor(&mut game, 18.0 + 27.5);
    let player = game.spawn_player(Vec2::new(0.0, 10.0));
    game.registry.motions.get_mut(player).velocity.y = 100.0;
    game
}

#[test]
fn test_held_jump_is_buffered_until_landing() {
    let mut game = falling_game();
    let mut jumped_at = None;
    for step in 1..=40 {
        let input = if step >= 13 { jump() } else { idle() };
        game.step(DT, input);
        if step == 13 {
            assert!(game.player.pending_jump);
            assert!(!game.player.jumping);
        }
        if game.player.jumping {
            jumped_at = Some(step);
            break;
        }
    }
    assert_eq!(jumped_at, Some(28));
    assert!(approx_eq(player_vy(&game), -game.config.player.jump_speed));
}

#[test]
fn test_tapped_jump_expires_before_landing() {
    let mut game = falling_game();
    for step in 1..=40 {
        let input = if step == 13 { jump() } else { idle() };
        game.step(DT, input);
        assert!(!game.player.jumping, "jumped on step {}", step);
    }
    assert!(!game.player.pending_jump);
}

fn jump_apex(hold_steps: usize) -> f32 {
    let (mut game, _) = standing_game(GameConfig::new());
    let start = player_y(&game);
    let mut highest = start;
    for step in 0..120 {
        let input = if step < hold_steps { jump() } else { idle() };
        game.step(DT, input);
        highest = highest.min(player_y(&game));
    }
    start - highest
}

#[test]
fn test_releasing_jump_early_cuts_height() {
    let full = jump_apex(60);
    let short = jump_apex(5);
    // v² / 2g with the default 300 u/s jump and 900 u/s² gravity.
    assert!(full > 45.0 && full < 51.0, "full jump rose {}", full);
    assert!(short < full * 0.75, "short {} vs full {}", short, full);
    assert!(short > 10.0);
}

#[test]
fn test_jump_lands_back_on_floor() {
    let (mut game, _) = standing_game(GameConfig::new());
    game.step(DT, jump());
    assert!(game.player.jumping);
    for _ in 0..100 {
        game.step(DT, idle());
    }
    assert!(!game.player.jumping);
    assert_eq!(game.player.mode(), PlayerMode::Grounded);
    assert!(approx_eq(player_y(&game), 10.0));
}

#[test]
fn test_ceiling_stops_rise() {
    let (mut game, _) = standing_game(GameConfig::new());
    // Slab whose underside is 10 units above the player's head.
    game.spawn_platform(Vec2::new(0.0, -10.0), Vec2::new(50.0, 2.0));
    game.step(DT, jump());
    let mut hit_ceiling = false;
    for _ in 0..30 {
        game.step(DT, jump());
        if game.player.ceiling {
            hit_ceiling = true;
            assert!(player_vy(&game) >= 0.0);
            break;
        }
    }
    assert!(hit_ceiling);
    // Head pushed back out to the slab's underside.
    assert!(approx_eq(player_y(&game) - 8.0, -8.0));
}

#[test]
fn test_ladder_climb_and_jump_off() {
    let (mut game, _) = standing_game(GameConfig::new());
    game.spawn_ladder(Vec2::new(0.0, -20.0), Vec2::new(4.0, 40.0));
    let up = InputSnapshot {
        up: true,
        ..InputSnapshot::default()
    };
    for _ in 0..20 {
        game.step(DT, up);
    }
    assert_eq!(game.player.mode(), PlayerMode::Laddered);
    assert!(player_y(&game) < 10.0);

    // Let go: the climb speed from the last step is spent, then hang in place.
    game.step(DT, idle());
    let y = player_y(&game);
    for _ in 0..10 {
        game.step(DT, idle());
    }
    assert_eq!(game.player.mode(), PlayerMode::Laddered);
    assert!(approx_eq(player_y(&game), y));

    game.step(DT, jump());
    assert!(game.player.jumping);
    assert!(!game.player.laddered);
}
