use std::time::Duration;

use packager_core::{update, AppState, AppViewModel, Field, FormVariant, Msg};

use crate::EffectRunner;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Owns the application state and feeds it messages from the user and the engine.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    pub fn new(variant: FormVariant, runner: EffectRunner) -> Self {
        Self {
            state: AppState::with_variant(variant),
            runner,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Returns whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let mut pending = vec![msg];
        while let Some(msg) = pending.pop() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            pending.extend(self.runner.run(effects));
        }
    }

    /// Applies engine messages that already arrived, without blocking.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(msg) = self.runner.try_next_msg() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Blocks until the outstanding request, if any, has settled.
    pub fn wait_for_settlement(&mut self) {
        while self.state.submission().is_submitting() {
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
    }

    /// Fills the form, submits once and waits for the outcome.
    pub fn submit_once(&mut self, url: &str, app_name: Option<&str>) -> AppViewModel {
        self.dispatch(Msg::FieldChanged {
            field: Field::Url,
            value: url.to_string(),
        });
        if let Some(app_name) = app_name {
            self.dispatch(Msg::FieldChanged {
                field: Field::AppName,
                value: app_name.to_string(),
            });
        }
        self.dispatch(Msg::SubmitClicked);
        self.wait_for_settlement();
        self.view()
    }
}
