//! Sky Ace entry point
//!
//! The browser build is driven from JS through `sky_ace::web`. Natively this
//! runs a headless autopilot session: it flies waves, shops in the hangar
//! between them, and prints the final HUD as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sky_ace::consts::*;
    use sky_ace::platform::Autopilot;
    use sky_ace::sim::{Command, GamePhase};
    use sky_ace::snapshot::NullRenderer;
    use sky_ace::upgrades::UpgradeKind;

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    let max_seconds: u64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);

    log::info!("Sky Ace (native, headless) starting with seed {seed}");

    let mut session = sky_ace::Session::new(seed, Autopilot::new(), NullRenderer::default());
    if let Err(err) = session.command(Command::Start) {
        log::error!("Could not launch: {err}");
        return;
    }

    let max_ticks = max_seconds * TICKS_PER_SECOND as u64;
    let mut ticks = 0;
    while ticks < max_ticks {
        session.step();
        ticks += 1;
        session.drain_events();

        match session.state().phase {
            GamePhase::Playing => {}
            GamePhase::WaveComplete => {
                // Shop: keep buying the cheapest affordable upgrade
                let _ = session.command(Command::OpenHangar);
                loop {
                    let state = session.state();
                    let cheapest = UpgradeKind::ALL
                        .iter()
                        .copied()
                        .filter(|&k| state.upgrades.next_cost(k) <= state.credits)
                        .min_by_key(|&k| state.upgrades.next_cost(k));
                    match cheapest {
                        Some(kind) => {
                            if session.command(Command::Purchase(kind)).is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                let _ = session.command(Command::Start);
            }
            GamePhase::GameOver => break,
            GamePhase::Menu | GamePhase::Hangar => break,
        }
    }

    let seconds = ticks as f32 * SIM_DT;
    log::info!("Session ended after {seconds:.1}s of flight");
    match serde_json::to_string_pretty(&session.hud()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not serialize HUD: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is sky_ace::web::start, this is just to satisfy the compiler
}
