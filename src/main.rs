//! Tiny Hoops entry point
//!
//! Web: wires pointer/keyboard input into the simulation, runs the frame
//! loop and hands each frame to the page's renderer.
//! Native: runs a headless autoplay session and prints the results.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use tiny_hoops::Tuning;
    use tiny_hoops::consts::MAX_FRAME_DT;
    use tiny_hoops::tuning::AimTuning;
    use tiny_hoops::renderer::{Frame, build_frame};
    use tiny_hoops::sim::{
        AimReceiver, AimSender, AimVector, GameEvent, GameWorld, TickInput, aim_channel, tick,
    };

    // Forward frames to the page's renderer if it registered one
    #[wasm_bindgen(inline_js = "
        export function host_draw(instances, texts) {
            if (typeof window.tinyHoopsDraw === 'function') {
                window.tinyHoopsDraw(instances, texts);
            }
        }
    ")]
    extern "C" {
        fn host_draw(instances: &[f32], texts: js_sys::Array);
    }

    /// Game instance holding all state
    struct Game {
        world: GameWorld,
        aims: AimReceiver,
        input: TickInput,
        start_time: f64,
        last_time: f64,
    }

    impl Game {
        fn new(tuning: Tuning, aims: AimReceiver) -> Self {
            Self {
                world: GameWorld::new(tuning),
                aims,
                input: TickInput::default(),
                start_time: 0.0,
                last_time: 0.0,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, time: f64) {
            if self.start_time == 0.0 {
                self.start_time = time;
            }
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_DT)
            } else {
                0.0
            };
            self.last_time = time;
            let t = ((time - self.start_time) / 1000.0) as f32;

            // At most one aim per frame
            self.input.aim = self.aims.take();
            let input = std::mem::take(&mut self.input);
            for event in tick(&mut self.world, &input, t, dt) {
                match event {
                    GameEvent::GameOver { score, .. } => {
                        log::info!("Final score: {}", score);
                    }
                    GameEvent::AimIgnored => log::debug!("Ball still in flight"),
                    _ => {}
                }
            }
        }

        fn render(&self) {
            let frame = build_frame(&self.world);
            let raw = frame.instance_data();
            let texts = js_sys::Array::new();
            for item in &frame.texts {
                texts.push(&JsValue::from_str(&item.text));
            }
            host_draw(bytemuck::cast_slice(&raw), texts);
            update_hud(&frame);
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(frame: &Frame) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let hud = &frame.hud;

        if let Some(el) = document.get_element_by_id("hud-timer") {
            el.set_text_content(Some(&hud.timer_text()));
        }
        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&hud.score_text()));
        }
        if let Some(el) = document.get_element_by_id("hud-session") {
            el.set_text_content(Some(&hud.session_text()));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Tiny Hoops starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let canvas: HtmlCanvasElement = match document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into().ok())
        {
            Some(canvas) => canvas,
            None => {
                log::error!("No #canvas element");
                return;
            }
        };

        let tuning = Tuning::load();
        let (aim_tx, aim_rx) = aim_channel();
        let aim_tuning = tuning.aim.clone();
        let game = Rc::new(RefCell::new(Game::new(tuning, aim_rx)));

        setup_pointer(&canvas, aim_tx, aim_tuning);
        setup_keyboard(game.clone());

        request_animation_frame(game);

        log::info!("Tiny Hoops running! Enter starts a game, M toggles the backboard");
    }

    /// Pointer release becomes an aim (the listener never touches the world)
    fn setup_pointer(canvas: &HtmlCanvasElement, aims: AimSender, tuning: AimTuning) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            let pos = Vec2::new(
                event.client_x() as f32 - rect.left() as f32,
                event.client_y() as f32 - rect.top() as f32,
            );
            let size = Vec2::new(rect.width() as f32, rect.height() as f32);
            match AimVector::from_release(pos, size, &tuning) {
                Some(aim) => {
                    aims.send(aim);
                }
                None => log::debug!("Release too close to the ball, ignored"),
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "Enter" | "g" | "G" => g.input.toggle_game = true,
                "m" | "M" => g.input.toggle_backboard = true,
                _ => {}
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tiny_hoops::Tuning;
    use tiny_hoops::sim::{AutoShooter, GameEvent, GameWorld, tick};

    env_logger::init();
    log::info!("Tiny Hoops (native) starting...");
    log::info!("Native mode runs a headless autoplay session - serve the wasm build for the game");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load_file(std::path::Path::new(&path)),
        None => Tuning::default(),
    };

    const GAMES: usize = 3;
    const FRAME_DT: f32 = 1.0 / 60.0;

    let mut world = GameWorld::new(tuning);
    let mut shooter = AutoShooter::new(0x5eed, 0.15);
    let mut t = 0.0;
    let (mut throws, mut baskets) = (0u32, 0u32);

    while world.game.games_played() < GAMES {
        let input = shooter.next_input(&world, FRAME_DT);
        t += FRAME_DT;
        for event in tick(&mut world, &input, t, FRAME_DT) {
            if let GameEvent::ThrowResolved { scored } = event {
                throws += 1;
                baskets += scored as u32;
            }
        }
    }

    println!("\nAutoplay session ({} games, {:.0}s simulated)", GAMES, t);
    for (i, score) in world.game.session_scores().iter().enumerate() {
        println!("  game {}: {}", i + 1, score);
    }
    println!(
        "  high score: {}  throws: {}  baskets: {}",
        world.game.high_score(),
        throws,
        baskets
    );
}
