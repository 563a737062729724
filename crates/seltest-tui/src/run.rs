// ABOUTME: Interactive wizard event loop
// ABOUTME: Selects over terminal events and backend responses, dispatching actions as tasks

use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use crate::app::App;
use crate::bridge::Bridge;
use crate::cli::client_for;
use crate::config::Config;
use crate::error::Result;
use crate::tui::event::TuiEvent;
use crate::tui::Tui;
use crate::types::Action;
use crate::ui;

pub async fn run_wizard(config: &Config) -> Result<()> {
    let client = client_for(config)?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let bridge = Bridge::new(client, config.output.dir.clone(), tx);
    let mut app = App::new(config.api.base_url.clone());

    tracing::info!(api_url = %config.api.base_url, "Starting wizard");

    let mut tui = Tui::new()?;
    let mut events = tui.event_stream();

    if let Some(action) = app.start() {
        bridge.dispatch(action);
    }

    loop {
        tui.terminal_mut().draw(|f| ui::render(f, &app))?;

        let action = tokio::select! {
            Some(response) = rx.recv() => app.handle_response(response),
            Some(event) = events.next() => match event {
                TuiEvent::Key(key) => app.handle_key(key),
                TuiEvent::Paste(text) => {
                    app.handle_paste(&text);
                    None
                }
                TuiEvent::Resize(..) => None,
                TuiEvent::Tick => {
                    app.tick();
                    None
                }
            },
            else => break,
        };

        match action {
            Some(Action::Quit) => break,
            Some(action) => bridge.dispatch(action),
            None => {}
        }
    }

    tui.restore()?;
    Ok(())
}
