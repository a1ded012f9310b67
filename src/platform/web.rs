//! Browser host
//!
//! Mounts the hero background on a canvas: `requestAnimationFrame` drives the
//! loop, window listeners feed pointer and resize events, and `stop` tears
//! everything down again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement,
    MouseEvent, TouchEvent, Window,
};

use super::input::PointerEvent;
use super::scheduler::FrameScheduler;
use crate::driver::FrameDriver;
use crate::settings::{Settings, Theme, ThemePreference};

/// LocalStorage key the site theme switcher writes
const SITE_THEME_KEY: &str = "theme";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` as a `FrameScheduler`
pub struct WebScheduler {
    window: Window,
    callback: FrameCallback,
}

impl WebScheduler {
    fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }
}

impl FrameScheduler for WebScheduler {
    type Handle = Option<i32>;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: Option<i32>) {
        if let Some(id) = handle {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

struct Host {
    window: Window,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    driver: RefCell<FrameDriver<WebScheduler>>,
    listeners: RefCell<Vec<Listener>>,
}

impl Host {
    /// Re-read the viewport size and resize the backing store
    fn apply_resize(&self) {
        let width = self.window.inner_width().ok().and_then(|v| v.as_f64());
        let height = self.window.inner_height().ok().and_then(|v| v.as_f64());
        let (Some(width), Some(height)) = (width, height) else {
            return;
        };
        let dpr = self.window.device_pixel_ratio();

        let (bw, bh) = self
            .driver
            .borrow_mut()
            .resize(width as f32, height as f32, dpr);
        if self.canvas.width() != bw || self.canvas.height() != bh {
            self.canvas.set_width(bw);
            self.canvas.set_height(bh);
        }
        // Draw in CSS pixels; setting the size resets the transform
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    fn listen(
        &self,
        target: EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        self.listeners.borrow_mut().push(Listener {
            target,
            kind,
            closure,
        });
        Ok(())
    }

    fn detach_listeners(&self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

fn system_prefers_dark(window: &Window) -> bool {
    window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|q| q.matches())
        .unwrap_or(true)
}

/// Resolve the site theme: the switcher's stored choice wins over settings
fn resolve_theme(window: &Window, settings: &Settings) -> Theme {
    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(SITE_THEME_KEY).ok().flatten())
        .and_then(|v| ThemePreference::from_str(&v));
    stored
        .unwrap_or(settings.theme)
        .resolve(system_prefers_dark(window))
}

/// Window listeners for resize, mouse and touch movement
fn attach_listeners(host: &Rc<Host>, window: &Window) -> Result<(), JsValue> {
    {
        let weak = Rc::downgrade(host);
        host.listen(window.clone().into(), "resize", move |_| {
            if let Some(host) = weak.upgrade() {
                host.apply_resize();
            }
        })?;
    }
    {
        let weak = Rc::downgrade(host);
        host.listen(window.clone().into(), "mousemove", move |event| {
            let (Some(host), Some(event)) = (weak.upgrade(), event.dyn_ref::<MouseEvent>())
            else {
                return;
            };
            host.driver.borrow_mut().pointer_moved(PointerEvent::Move {
                x: event.client_x() as f32,
                y: event.client_y() as f32,
            });
        })?;
    }
    {
        let weak = Rc::downgrade(host);
        host.listen(window.clone().into(), "touchmove", move |event| {
            let (Some(host), Some(event)) = (weak.upgrade(), event.dyn_ref::<TouchEvent>())
            else {
                return;
            };
            let first = event
                .touches()
                .get(0)
                .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32));
            let touches: Vec<Vec2> = first.into_iter().collect();
            host.driver
                .borrow_mut()
                .pointer_moved(PointerEvent::Touch(&touches));
        })?;
    }
    Ok(())
}

/// A mounted hero background
#[wasm_bindgen]
pub struct HeroBackground {
    host: Option<Rc<Host>>,
}

#[wasm_bindgen]
impl HeroBackground {
    /// Mount on the canvas with the given element id and start animating
    #[wasm_bindgen(constructor)]
    pub fn mount(canvas_id: &str) -> Result<HeroBackground, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", canvas_id)))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let settings = Settings::load();
        let theme = resolve_theme(&window, &settings);
        let seed = js_sys::Date::now() as u64;
        let scheduler = WebScheduler::new(window.clone());
        let callback = scheduler.callback.clone();

        let host = Rc::new(Host {
            window: window.clone(),
            canvas,
            ctx,
            driver: RefCell::new(FrameDriver::new(seed, &settings, theme, scheduler)),
            listeners: RefCell::new(Vec::new()),
        });

        // The frame callback holds only a weak reference so the host can drop
        let weak: Weak<Host> = Rc::downgrade(&host);
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            if let Some(host) = weak.upgrade() {
                let mut ctx = host.ctx.clone();
                host.driver.borrow_mut().on_frame(timestamp, Some(&mut ctx));
            }
        }));

        host.apply_resize();

        if let Err(e) = attach_listeners(&host, &window) {
            host.detach_listeners();
            return Err(e);
        }

        host.driver.borrow_mut().start();
        log::info!("Hero background mounted on #{} (seed {})", canvas_id, seed);

        Ok(HeroBackground { host: Some(host) })
    }

    /// Stop the loop and detach all listeners; safe to call twice
    pub fn stop(&mut self) {
        let Some(host) = self.host.take() else {
            return;
        };
        let callback = {
            let mut driver = host.driver.borrow_mut();
            driver.stop();
            driver.scheduler_mut().callback.clone()
        };
        host.detach_listeners();
        callback.borrow_mut().take();
        log::info!("Hero background unmounted");
    }

    /// Switch palette when the site theme changes ("light" | "dark" | "system")
    #[wasm_bindgen(js_name = setTheme)]
    pub fn set_theme(&mut self, theme: &str) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let Some(preference) = ThemePreference::from_str(theme) else {
            log::warn!("Unknown theme {:?}", theme);
            return;
        };
        let resolved = preference.resolve(system_prefers_dark(&host.window));
        host.driver.borrow_mut().renderer.set_theme(resolved);
    }

    /// Apply and persist settings given as JSON; missing fields take defaults
    #[wasm_bindgen(js_name = setSettings)]
    pub fn set_settings(&mut self, json: &str) -> Result<(), JsValue> {
        let Some(host) = self.host.as_ref() else {
            return Ok(());
        };
        let settings =
            Settings::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let theme = resolve_theme(&host.window, &settings);
        host.driver.borrow_mut().apply_settings(&settings, theme);
        settings.save();
        log::info!("Settings applied (quality {})", settings.quality.as_str());
        Ok(())
    }
}

impl Drop for HeroBackground {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Module start: logging and panic reporting
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Hero Pong module loaded");
}
