#![deny(unsafe_code)]
//! Browser host for the plexus particle background.
//!
//! On load the module looks for a `<canvas id="particleCanvas">`, sizes it to
//! the viewport at device-pixel resolution and drives a [`FrameDriver`] from
//! `requestAnimationFrame`. Pages without the canvas are left alone. The
//! optional `data-preset` and `data-theme` attributes on the canvas choose
//! the look.
//!
//! Exports `set_theme`, `next_theme`, `set_brightness` and `stop` for page
//! controls.

mod canvas;

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn, Level};
use plexus_core::{FrameDriver, Preset, Theme, Xorshift64};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent,
    Window,
};

use canvas::Canvas2dSurface;

const CANVAS_ID: &str = "particleCanvas";

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

struct App {
    window: Window,
    canvas: HtmlCanvasElement,
    surface: Canvas2dSurface,
    driver: FrameDriver,
    theme: Option<Theme>,
}

impl App {
    fn frame(&mut self) -> bool {
        self.driver.tick(&mut self.surface).is_some()
    }

    /// Refits the canvas and regenerates the field for the new viewport.
    fn resize(&mut self) -> Result<(), JsValue> {
        let (width, height) = viewport(&self.window)?;
        fit_canvas(&self.window, &self.canvas, self.surface.context(), width, height)?;
        self.surface.set_size(width, height);
        self.driver.resize(width, height);
        Ok(())
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), JsValue> {
        self.driver.apply_theme(theme);
        self.theme = Some(theme);
        let body = document(&self.window)?
            .body()
            .ok_or_else(|| js_err("document has no body"))?;
        let classes = body.class_list();
        for t in Theme::ALL {
            classes.remove_1(&theme_class(t))?;
        }
        classes.add_1(&theme_class(theme))
    }
}

fn theme_class(theme: Theme) -> String {
    format!("theme-{}", theme.name())
}

/// Theme after `current`; a page with no theme yet starts from the default.
fn following_theme(current: Option<Theme>) -> Theme {
    current.unwrap_or_default().next()
}

/// `devicePixelRatio`, with 1 standing in for missing or nonsense values.
fn device_scale(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 {
        dpr
    } else {
        1.0
    }
}

/// Backing-store pixels for a CSS length at `scale`.
fn backing_size(css: f64, scale: f64) -> u32 {
    let px = (css * scale).round();
    if px.is_finite() && px > 0.0 {
        px.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// CSS value for `--brightness`; any finite non-negative number.
fn brightness_value(value: f64) -> Result<String, String> {
    if value.is_finite() && value >= 0.0 {
        Ok(value.to_string())
    } else {
        Err(format!("brightness must be finite and >= 0, got {value}"))
    }
}

fn js_err(message: &str) -> JsValue {
    JsValue::from_str(message)
}

fn with_app<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut App) -> Result<R, JsValue>,
{
    APP.with(|cell| match cell.borrow_mut().as_mut() {
        Some(app) => f(app),
        None => Err(js_err("particle canvas is not initialized")),
    })
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| js_err("no global window"))
}

fn document(window: &Window) -> Result<Document, JsValue> {
    window.document().ok_or_else(|| js_err("window has no document"))
}

fn viewport(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| js_err("innerWidth is not a number"))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| js_err("innerHeight is not a number"))?;
    Ok((width, height))
}

/// Sizes the backing store to `viewport * devicePixelRatio` and scales the
/// context so drawing stays in CSS pixels.
fn fit_canvas(
    window: &Window,
    canvas: &HtmlCanvasElement,
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
) -> Result<(), JsValue> {
    let dpr = device_scale(window.device_pixel_ratio());
    canvas.set_width(backing_size(width, dpr));
    canvas.set_height(backing_size(height, dpr));
    let style = canvas.style();
    style.set_property("width", &format!("{width}px"))?;
    style.set_property("height", &format!("{height}px"))?;
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)
}

fn preset_for(canvas: &HtmlCanvasElement) -> Result<Preset, JsValue> {
    match canvas.get_attribute("data-preset") {
        Some(name) => Preset::from_name(&name).map_err(|e| js_err(&e.to_string())),
        None => Ok(Preset::default()),
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(Level::Info);

    let window = window()?;
    let Some(element) = document(&window)?.get_element_by_id(CANVAS_ID) else {
        info!("no #{CANVAS_ID} on this page, particle background disabled");
        return Ok(());
    };
    let canvas: HtmlCanvasElement = element
        .dyn_into()
        .map_err(|_| js_err("#particleCanvas is not a canvas element"))?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| js_err("2d context unavailable"))?
        .dyn_into()?;

    let preset = preset_for(&canvas)?;
    let theme = canvas.get_attribute("data-theme");
    let (width, height) = viewport(&window)?;
    fit_canvas(&window, &canvas, &ctx, width, height)?;

    let seed = Xorshift64::from_unit(js_sys::Math::random()).next_u64();
    let mut driver = FrameDriver::new(width, height, preset.field_config(), preset.style(), seed);
    driver.start();

    let mut app = App {
        window: window.clone(),
        canvas: canvas.clone(),
        surface: Canvas2dSurface::new(ctx, width, height),
        driver,
        theme: None,
    };
    if let Some(name) = theme {
        let theme = Theme::from_name(&name).map_err(|e| js_err(&e.to_string()))?;
        app.set_theme(theme)?;
    }
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    listen(&window)?;
    run_frames(&window)
}

fn listen(window: &Window) -> Result<(), JsValue> {
    let on_resize = Closure::wrap(Box::new(move || {
        if let Err(e) = with_app(App::resize) {
            warn!("resize failed: {e:?}");
        }
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let on_mouse = Closure::wrap(Box::new(move |e: MouseEvent| {
        let _ = with_app(|app| {
            app.driver
                .set_pointer_client(e.client_x() as f64, e.client_y() as f64);
            Ok(())
        });
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("mousemove", on_mouse.as_ref().unchecked_ref())?;
    on_mouse.forget();

    let on_touch = Closure::wrap(Box::new(move |e: TouchEvent| {
        if let Some(touch) = e.touches().get(0) {
            let _ = with_app(|app| {
                app.driver
                    .set_pointer_client(touch.client_x() as f64, touch.client_y() as f64);
                Ok(())
            });
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("touchmove", on_touch.as_ref().unchecked_ref())?;
    on_touch.forget();

    Ok(())
}

/// Self-rescheduling animation-frame chain. It ends once the driver stops.
fn run_frames(window: &Window) -> Result<(), JsValue> {
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);
    let win = window.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let running = APP.with(|cell| cell.borrow_mut().as_mut().is_some_and(App::frame));
        if !running {
            info!("animation loop ended");
            return;
        }
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                warn!("requestAnimationFrame failed: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(callback) = g.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Recolors the field and swaps the `theme-*` class on `<body>`.
#[wasm_bindgen]
pub fn set_theme(name: &str) -> Result<(), JsValue> {
    let theme = Theme::from_name(name).map_err(|e| js_err(&e.to_string()))?;
    with_app(|app| app.set_theme(theme))
}

/// Advances to the next theme in the cycle and returns its name.
#[wasm_bindgen]
pub fn next_theme() -> Result<String, JsValue> {
    with_app(|app| {
        let theme = following_theme(app.theme);
        app.set_theme(theme)?;
        Ok(theme.name().to_string())
    })
}

/// Writes the `--brightness` CSS variable on the document element.
#[wasm_bindgen]
pub fn set_brightness(value: f64) -> Result<(), JsValue> {
    let css = brightness_value(value).map_err(|e| js_err(&e))?;
    let root: HtmlElement = document(&window()?)?
        .document_element()
        .ok_or_else(|| js_err("document has no root element"))?
        .dyn_into()
        .map_err(|_| js_err("document root is not an HTML element"))?;
    root.style().set_property("--brightness", &css)
}

/// Stops the animation. The frame loop ends on its next callback.
#[wasm_bindgen]
pub fn stop() {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            app.driver.stop();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_classes_match_css_names() {
        assert_eq!(theme_class(Theme::RedBlack), "theme-red-black");
        assert_eq!(theme_class(Theme::GrayWhite), "theme-gray-white");
        assert_eq!(theme_class(Theme::BlueYellow), "theme-blue-yellow");
    }

    #[test]
    fn next_theme_cycles_from_the_default() {
        assert_eq!(following_theme(None), Theme::GrayWhite);
        let mut theme = None;
        let mut seen = Vec::new();
        for _ in 0..3 {
            let t = following_theme(theme);
            seen.push(t);
            theme = Some(t);
        }
        assert_eq!(seen, [Theme::GrayWhite, Theme::BlueYellow, Theme::RedBlack]);
    }

    #[test]
    fn device_scale_falls_back_to_one() {
        assert_eq!(device_scale(2.0), 2.0);
        assert_eq!(device_scale(0.0), 1.0);
        assert_eq!(device_scale(-1.5), 1.0);
        assert_eq!(device_scale(f64::NAN), 1.0);
    }

    #[test]
    fn backing_size_scales_and_rounds() {
        assert_eq!(backing_size(800.0, 2.0), 1600);
        assert_eq!(backing_size(333.0, 1.5), 500);
        assert_eq!(backing_size(0.0, 2.0), 0);
        assert_eq!(backing_size(f64::INFINITY, 1.0), 0);
    }

    #[test]
    fn brightness_accepts_slider_values_only() {
        assert_eq!(brightness_value(0.75).unwrap(), "0.75");
        assert_eq!(brightness_value(1.0).unwrap(), "1");
        assert!(brightness_value(-0.1).is_err());
        assert!(brightness_value(f64::NAN).is_err());
    }
}
