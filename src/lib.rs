use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod logging;
pub mod outcome;
pub mod strategy;

use config::TableOptions;
use error::GameError;
use game::{GameSession, TableEvent};

/// One browser table. Every render event goes to the callback passed to the
/// constructor; the round result arrives after `outcome_delay_ms`.
#[wasm_bindgen]
pub struct Table {
    session: GameSession,
    options: TableOptions,
    render: Function,
}

#[wasm_bindgen]
impl Table {
    #[wasm_bindgen(constructor)]
    pub fn new(options: &JsValue, render: Function) -> Result<Table, JsValue> {
        console_error_panic_hook::set_once();
        let options: TableOptions = if options.is_undefined() || options.is_null() {
            TableOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options.clone())
                .map_err(|err| JsValue::from_str(&format!("Invalid options: {err}")))?
        };
        let max_level = options
            .max_level()
            .map_err(|err| JsValue::from_str(&format!("Invalid options: {err}")))?;
        logging::init(max_level);

        let mut table = Table {
            session: GameSession::new(options.seed),
            options,
            render,
        };
        table.new_game();
        Ok(table)
    }

    #[wasm_bindgen(js_name = newGame)]
    pub fn new_game(&mut self) {
        console_error_panic_hook::set_once();
        let mut events = Vec::new();
        self.session.new_game(|event| events.push(event.clone()));
        self.dispatch(events);
    }

    pub fn hit(&mut self) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let mut events = Vec::new();
        let result = self.session.hit(|event| events.push(event.clone()));
        let result = result.map(|_| ()).map_err(report);
        self.dispatch(events);
        result
    }

    pub fn stand(&mut self) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let mut events = Vec::new();
        let result = self.session.stand(|event| events.push(event.clone()));
        let result = result.map(|_| ()).map_err(report);
        self.dispatch(events);
        result
    }

    #[wasm_bindgen(js_name = canAct)]
    pub fn can_act(&self) -> bool {
        self.session.can_act()
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session.snapshot())
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))
    }
}

impl Table {
    /// Delivers every event even when the page fails on one of them.
    fn dispatch(&self, events: Vec<TableEvent>) {
        for event in events {
            if let Err(err) = self.deliver(&event) {
                web_sys::console::error_1(&err);
            }
        }
    }

    fn deliver(&self, event: &TableEvent) -> Result<(), JsValue> {
        let value = serde_wasm_bindgen::to_value(event)
            .map_err(|err| JsValue::from_str(&format!("Serialization failed: {err}")))?;
        if is_deferred(event) {
            announce_later(&self.render, value, self.options.outcome_delay_ms)
        } else {
            self.render.call1(&JsValue::NULL, &value).map(|_| ())
        }
    }
}

#[wasm_bindgen(js_name = cardValue)]
pub fn card_value(token: &str) -> Result<u32, JsValue> {
    hand::value_of(token).map_err(report)
}

/// The round result waits for the card animations; everything else renders at once.
fn is_deferred(event: &TableEvent) -> bool {
    matches!(event, TableEvent::RoundFinished { .. })
}

/// Single `setTimeout`, never cancelled.
fn announce_later(render: &Function, event: JsValue, delay_ms: u32) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
    let render = render.clone();
    let callback = Closure::once_into_js(move || {
        if let Err(err) = render.call1(&JsValue::NULL, &event) {
            web_sys::console::error_1(&err);
        }
    });
    let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)?;
    Ok(())
}

fn report(err: GameError) -> JsValue {
    let message = JsValue::from_str(&err.to_string());
    if err.is_fatal() {
        web_sys::console::error_1(&message);
    } else {
        web_sys::console::warn_1(&message);
    }
    message
}
