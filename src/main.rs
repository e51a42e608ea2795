//! Mink: Night Thief entry point
//!
//! The browser build is driven from `web::WebSession`. Natively this plays the
//! scripted night through the rules engine and prints the transcript.

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Mink: Night Thief (native) starting...");
    log::info!("Native mode has no renderer - serve the wasm build for the real game");

    if let Err(e) = play_demo_night() {
        log::error!("Demo night failed: {e}");
        std::process::exit(1);
    }
}

/// Walk the main story path, grabbing the chicken on the way
#[cfg(not(target_arch = "wasm32"))]
fn play_demo_night() -> Result<(), mink_night_thief::GameError> {
    use mink_night_thief::sim::{Command, EntityKind};
    use mink_night_thief::{Session, Settings};

    let mut session = Session::new(Settings {
        instant_text: true,
        ..Settings::default()
    })?;

    let script = [
        Command::Choose { index: 0 },          // Venture out
        Command::Choose { index: 0 },          // Head directly to the coop
        Command::Choose { index: 0 },          // Begin the theft
        Command::MoveTo { x: 255.0, y: 115.0 }, // Straight into the farm light
        Command::MoveTo { x: 315.0, y: 195.0 }, // Onto the chicken
        Command::Target {
            kind: EntityKind::AlertSource,
            id: "chicken-1".into(),
        },
        Command::Choose { index: 0 }, // Run back
        Command::Continue,
    ];

    print_scene(&session);
    for command in script {
        log::debug!("Command: {command:?}");
        session.handle(command)?;
        for note in session.drain_notifications() {
            println!("  [{:?}] {}: {}", note.severity, note.title, note.description);
        }
        print_scene(&session);
    }

    let state = session.state();
    println!(
        "\nNight over: {} | objectives {}/{} | detection {:.2}",
        if state.has_won { "kits fed" } else { "empty handed" },
        state.objectives.iter().filter(|o| state.is_completed(o)).count(),
        state.objectives.len(),
        state.actor.detection_level(),
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_scene(session: &mink_night_thief::Session) {
    let snap = session.snapshot();
    println!(
        "\n== {} [{}] phase={}",
        snap.title,
        snap.scene_id,
        snap.state.phase.as_str()
    );
    println!("{}", snap.text);
}
