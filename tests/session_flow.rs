//! End-to-end sessions through the public API

use glam::Vec2;
use tiny_hoops::Tuning;
use tiny_hoops::renderer::build_frame;
use tiny_hoops::sim::{
    AimVector, GameEvent, GameOverReason, GameWorld, TickInput, aim_channel, rest_pose, tick,
};

const DT: f32 = 1.0 / 60.0;

struct Session {
    world: GameWorld,
    t: f32,
    events: Vec<GameEvent>,
}

impl Session {
    fn new() -> Self {
        Self {
            world: GameWorld::default(),
            t: 0.0,
            events: Vec::new(),
        }
    }

    fn frame(&mut self, input: TickInput) {
        self.t += DT;
        self.events.extend(tick(&mut self.world, &input, self.t, DT));
    }

    fn idle(&mut self, frames: usize) {
        for _ in 0..frames {
            self.frame(TickInput::default());
        }
    }

    fn toggle_game(&mut self) {
        self.frame(TickInput {
            toggle_game: true,
            ..Default::default()
        });
    }

    /// Park the hoop in the middle for the rest of the session
    fn freeze_backboard(&mut self) {
        self.world.backboard.paused = true;
        self.world.backboard.offset = 0.0;
    }

    fn shoot(&mut self, x: f32, y: f32) {
        let aim = AimVector::new(x, y, &self.world.tuning.aim);
        self.frame(TickInput {
            aim,
            ..Default::default()
        });
        // Long enough for any throw to finish
        self.idle(150);
    }
}

#[test]
fn scripted_games_accumulate_in_order() {
    let mut s = Session::new();
    let planned = [2u32, 0, 3];

    for &baskets in &planned {
        s.toggle_game();
        s.freeze_backboard();
        for _ in 0..baskets {
            s.shoot(0.0, 1.0);
        }
        s.toggle_game();
    }

    assert_eq!(s.world.game.session_scores(), &planned);
    assert_eq!(s.world.game.high_score(), 3);
    assert_eq!(s.world.game.last_score(), 3);
    assert_eq!(s.world.game.games_played(), 3);

    let frame = build_frame(&s.world);
    assert_eq!(frame.hud.high_score, 3);
    assert_eq!(frame.hud.games_played, 3);
}

#[test]
fn wide_throws_miss_a_centered_hoop() {
    let mut s = Session::new();
    s.toggle_game();
    s.freeze_backboard();
    s.shoot(0.6, 0.8);
    s.shoot(-0.6, 0.8);
    assert_eq!(s.world.game.score, 0);
    let misses = s
        .events
        .iter()
        .filter(|e| **e == GameEvent::ThrowResolved { scored: false })
        .count();
    assert_eq!(misses, 2);
}

#[test]
fn timer_runs_out_mid_throw() {
    let mut s = Session::new();
    s.toggle_game();
    let aim = AimVector::new(0.0, 1.0, &s.world.tuning.aim);
    s.frame(TickInput {
        aim,
        ..Default::default()
    });
    assert!(s.world.throw.active);

    s.events.clear();
    let game_time = s.world.tuning.game_time;
    s.t += game_time + 1.0;
    let events = tick(&mut s.world, &TickInput::default(), s.t, game_time + 1.0);
    assert_eq!(
        events,
        vec![GameEvent::GameOver {
            score: 0,
            reason: GameOverReason::Timeout
        }]
    );
    assert!(!s.world.throw.active);
    assert_eq!(s.world.ball_pose, rest_pose(&s.world.tuning.throw));
    assert_eq!(s.world.backboard.offset, 0.0);

    // Idle frames keep everything parked
    s.idle(30);
    assert_eq!(s.world.ball_pose, rest_pose(&s.world.tuning.throw));
    assert_eq!(s.world.game.games_played(), 1);
}

#[test]
fn pointer_releases_flow_through_the_slot() {
    let mut s = Session::new();
    s.toggle_game();
    s.freeze_backboard();

    let (tx, rx) = aim_channel();
    let canvas = Vec2::new(800.0, 600.0);
    let aim_tuning = s.world.tuning.aim.clone();

    // Two quick releases before the next frame: only the first is queued
    let straight = AimVector::from_release(Vec2::new(400.0, 50.0), canvas, &aim_tuning).unwrap();
    let wide = AimVector::from_release(Vec2::new(790.0, 500.0), canvas, &aim_tuning).unwrap();
    assert!(tx.send(straight));
    assert!(!tx.send(wide));

    s.frame(TickInput {
        aim: rx.take(),
        ..Default::default()
    });
    assert_eq!(s.world.throw.aim(), Some(straight));

    // Release mid-flight is drained and ignored
    assert!(tx.send(wide));
    s.frame(TickInput {
        aim: rx.take(),
        ..Default::default()
    });
    assert_eq!(s.events.last(), Some(&GameEvent::AimIgnored));
    assert_eq!(rx.take(), None);

    for _ in 0..150 {
        s.frame(TickInput {
            aim: rx.take(),
            ..Default::default()
        });
    }
    assert_eq!(s.world.game.score, 1);
}

#[test]
fn custom_tuning_shortens_games() {
    let tuning = Tuning::from_json(r#"{ "game_time": 2.0 }"#).unwrap();
    let mut world = GameWorld::new(tuning);
    let start = TickInput {
        toggle_game: true,
        ..Default::default()
    };
    let mut t = 0.0;
    tick(&mut world, &start, t, DT);
    let mut frames = 0;
    while world.game.ongoing {
        t += DT;
        tick(&mut world, &TickInput::default(), t, DT);
        frames += 1;
        assert!(frames < 200);
    }
    assert_eq!(world.game.games_played(), 1);
}
