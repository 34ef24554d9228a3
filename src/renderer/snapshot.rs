//! Per-frame snapshot of everything on screen

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::shapes::{self, Circle, Line, Polygon};
use crate::palette::{BLACK, Color, GOLD, NEON_BLUE, NEON_GREEN, NEON_PINK, ORANGE, RED, WHITE};
use crate::sim::obstacle::{Obstacle, ObstacleKind, ObstacleVariant};
use crate::sim::particle::Particle;
use crate::sim::player::Player;
use crate::sim::powerup::Powerup;
use crate::sim::rect::Rect;
use crate::sim::state::{GamePhase, GameState};

/// Banner shown while the firewall warning counts down
pub const FIREWALL_BANNER: &str = "!! FIRE WALL !!";

/// A line of HUD text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudText {
    pub text: String,
    pub color: Color,
}

impl HudText {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOverOverlay {
    pub title: HudText,
    pub final_score: HudText,
    pub restart_hint: HudText,
}

/// Heads-up display. Every field is `None` when it shouldn't be drawn.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Hud {
    /// Top-left score readout
    pub score: Option<HudText>,
    /// Top-right combo multiplier
    pub combo: Option<HudText>,
    /// Centered warning banner
    pub warning: Option<HudText>,
    pub game_over: Option<GameOverOverlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Sprite center (slightly below the hitbox top)
    pub center: Vec2,
    pub tilt: f32,
    pub shielded: bool,
    /// Ship parts, back to front
    pub parts: Vec<Polygon>,
    /// Shield bubble, when shielded
    pub shield: Option<Circle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub variant: ObstacleVariant,
    pub bounds: Rect,
    pub polygons: Vec<Polygon>,
    pub lines: Vec<Line>,
    pub circles: Vec<Circle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerupView {
    pub id: u32,
    pub center: Vec2,
    pub rotation: f32,
    pub glow_radius: f32,
    pub glow: Circle,
    pub cross: [Polygon; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

impl From<&Particle> for ParticleView {
    fn from(p: &Particle) -> Self {
        Self {
            pos: p.pos,
            size: p.size,
            color: p.color,
        }
    }
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub field_width: f32,
    pub field_height: f32,
    pub background: Color,
    pub phase: GamePhase,
    pub tick: u64,
    /// Floored score
    pub score: u64,
    /// Absent once the player has been hit
    pub player: Option<PlayerView>,
    pub obstacles: Vec<ObstacleView>,
    pub powerups: Vec<PowerupView>,
    /// Trails, flames and explosions, in draw order
    pub particles: Vec<ParticleView>,
    pub hud: Hud,
}

impl Snapshot {
    /// Describe the current frame. Once the player is hit only the explosion
    /// is drawn, then the game-over overlay.
    pub fn capture(state: &GameState) -> Self {
        let playing = state.phase == GamePhase::Playing;
        let mut particles = Vec::new();

        let (player, obstacles, powerups) = if playing {
            particles.extend(state.player.trail.iter().map(ParticleView::from));
            for obstacle in &state.obstacles {
                particles.extend(obstacle.particles().iter().map(ParticleView::from));
            }
            (
                Some(player_view(&state.player)),
                state.obstacles.iter().map(obstacle_view).collect(),
                state.powerups.iter().map(powerup_view).collect(),
            )
        } else {
            (None, Vec::new(), Vec::new())
        };
        particles.extend(
            state
                .particles
                .iter()
                .filter(|p| p.is_alive())
                .map(ParticleView::from),
        );

        Self {
            field_width: state.tuning.field_width,
            field_height: state.tuning.field_height,
            background: BLACK,
            phase: state.phase,
            tick: state.time_ticks,
            score: state.display_score(),
            player,
            obstacles,
            powerups,
            particles,
            hud: hud(state),
        }
    }
}

fn hud(state: &GameState) -> Hud {
    let score = state.display_score();
    match state.phase {
        GamePhase::Playing => Hud {
            score: Some(HudText::new(format!("SCORE: {}", score), WHITE)),
            combo: (!state.firewall.is_active()).then(|| {
                let color = if state.combo.is_maxed() { GOLD } else { ORANGE };
                HudText::new(format!("{:.1}x", state.combo.multiplier), color)
            }),
            warning: state
                .firewall
                .warning_visible()
                .then(|| HudText::new(FIREWALL_BANNER, RED)),
            game_over: None,
        },
        GamePhase::Dying => Hud::default(),
        GamePhase::GameOver => Hud {
            game_over: Some(GameOverOverlay {
                title: HudText::new("GAME OVER", NEON_PINK),
                final_score: HudText::new(format!("Final Score: {}", score), WHITE),
                restart_hint: HudText::new("R to Play Again", NEON_BLUE),
            }),
            ..Hud::default()
        },
    }
}

fn player_view(player: &Player) -> PlayerView {
    let center = Vec2::new(player.x, player.y + 10.0);
    PlayerView {
        center,
        tilt: player.tilt,
        shielded: player.has_shield,
        parts: shapes::ship(center, player.tilt),
        shield: player.has_shield.then(|| Circle {
            center: Vec2::new(player.x, player.y + 25.0),
            radius: 40.0,
            color: GOLD,
            alpha: 50,
        }),
    }
}

fn obstacle_view(obstacle: &Obstacle) -> ObstacleView {
    let bounds = obstacle.hitbox();
    let Rect { x, y, w, h } = bounds;
    let center = bounds.center();

    let mut view = ObstacleView {
        id: obstacle.id,
        variant: obstacle.variant(),
        bounds,
        polygons: Vec::new(),
        lines: Vec::new(),
        circles: Vec::new(),
    };
    match &obstacle.kind {
        ObstacleKind::Asteroid { points } => {
            view.polygons
                .push(shapes::asteroid(center, points, obstacle.rotation));
            view.circles.push(Circle::opaque(center, 4.0, NEON_BLUE));
        }
        ObstacleKind::Drone => {
            view.polygons.push(shapes::drone_hull(x, y, w, h));
            view.lines
                .extend(shapes::drone_pincers(x, y, w, h, obstacle.pincer_spread()));
            view.circles.push(Circle::opaque(
                Vec2::new(center.x, y + 15.0),
                obstacle.eye_radius(),
                ORANGE,
            ));
        }
        ObstacleKind::Scout { .. } => view.polygons.push(shapes::scout(x, y, w, h)),
        ObstacleKind::FirewallSegment { .. } => view.polygons.push(shapes::wall(x, y, w, h)),
    }
    view
}

fn powerup_view(powerup: &Powerup) -> PowerupView {
    let center = powerup.center();
    PowerupView {
        id: powerup.id,
        center,
        rotation: powerup.rotation,
        glow_radius: powerup.glow_radius,
        glow: Circle {
            center,
            radius: powerup.size / 2.0 + powerup.glow_radius,
            color: NEON_GREEN,
            alpha: 50,
        },
        cross: shapes::powerup_cross(center, powerup.size, powerup.rotation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(21, Tuning::default())
    }

    #[test]
    fn test_playing_hud() {
        let mut state = state();
        state.score = 12.7;
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.hud.score.as_ref().map(|t| t.text.as_str()), Some("SCORE: 12"));
        let combo = snap.hud.combo.expect("combo shown");
        assert_eq!(combo.text, "1.0x");
        assert_eq!(combo.color, ORANGE);
        assert!(snap.hud.warning.is_none());
        assert!(snap.player.is_some());
    }

    #[test]
    fn test_combo_gold_when_maxed() {
        let mut state = state();
        state.combo.multiplier = 5.0;
        let snap = Snapshot::capture(&state);
        let combo = snap.hud.combo.unwrap();
        assert_eq!(combo.text, "5.0x");
        assert_eq!(combo.color, GOLD);
    }

    #[test]
    fn test_firewall_hides_combo_and_shows_banner() {
        let mut state = state();
        state.firewall.active = true;
        state.firewall.warning_ticks = 10;
        let snap = Snapshot::capture(&state);
        assert!(snap.hud.combo.is_none());
        assert_eq!(snap.hud.warning.unwrap().text, FIREWALL_BANNER);
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = state();
        state.phase = GamePhase::GameOver;
        state.score = 88.2;
        let snap = Snapshot::capture(&state);
        assert!(snap.player.is_none());
        assert!(snap.hud.score.is_none());
        let overlay = snap.hud.game_over.unwrap();
        assert_eq!(overlay.title.text, "GAME OVER");
        assert_eq!(overlay.final_score.text, "Final Score: 88");
        assert_eq!(overlay.restart_hint.text, "R to Play Again");
    }

    #[test]
    fn test_dying_only_draws_explosion() {
        let mut state = state();
        let tuning = state.tuning.clone();
        let id = state.ids.next();
        let obstacle = Obstacle::spawn(id, ObstacleVariant::Drone, &mut state.rng, &tuning, 0).unwrap();
        state.obstacles.push(obstacle);
        crate::sim::particle::spawn_explosion(&mut state.particles, &mut state.rng, Vec2::ZERO);
        state.phase = GamePhase::Dying;

        let snap = Snapshot::capture(&state);
        assert!(snap.obstacles.is_empty());
        assert_eq!(snap.particles.len(), crate::consts::EXPLOSION_PARTICLES);
        assert_eq!(snap.hud, Hud::default());
    }

    #[test]
    fn test_obstacle_decorations() {
        let mut state = state();
        let tuning = state.tuning.clone();
        for variant in ObstacleVariant::SPAWNABLE {
            let id = state.ids.next();
            let obstacle = Obstacle::spawn(id, variant, &mut state.rng, &tuning, 0).unwrap();
            state.obstacles.push(obstacle);
        }
        let snap = Snapshot::capture(&state);
        let drone = snap
            .obstacles
            .iter()
            .find(|o| o.variant == ObstacleVariant::Drone)
            .unwrap();
        assert_eq!(drone.lines.len(), 2);
        assert_eq!(drone.circles.len(), 1);
        let asteroid = snap
            .obstacles
            .iter()
            .find(|o| o.variant == ObstacleVariant::Asteroid)
            .unwrap();
        assert!(asteroid.polygons[0].points.len() >= 7);
    }

    #[test]
    fn test_snapshot_serializes() {
        let snap = Snapshot::capture(&state());
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.hud, snap.hud);
    }
}
