use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::SurfaceError;
use crate::frame_loop::FrameLoop;
use crate::sim::{BACKGROUND, Starfield};

const CANVAS_ID: &str = "starfield";
const CANVAS_STYLE: [(&str, &str); 6] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "0"),
];

fn dom_err(err: JsValue) -> SurfaceError {
    SurfaceError::Dom(format!("{err:?}"))
}

fn viewport(window: &Window) -> (f64, f64) {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (w, h)
}

struct Scene {
    field: RefCell<Starfield>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    frames: RefCell<FrameLoop>,
}

impl Scene {
    fn fit(&self, window: &Window) {
        let (w, h) = viewport(window);
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.field.borrow_mut().resize(w, h);
    }

    fn draw(&self) {
        let mut field = self.field.borrow_mut();
        let (w, h) = field.size();
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        for star in field.step() {
            self.ctx.begin_path();
            if self.ctx.arc(star.x, star.y, star.radius, 0.0, TAU).is_err() {
                continue;
            }
            self.ctx.set_fill_style_str(&star.fill_style());
            self.ctx.fill();
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Full-window canvas behind the page content, redrawn every animation
/// frame until torn down. Dropping the surface tears it down.
pub struct StarfieldSurface {
    window: Window,
    scene: Rc<Scene>,
    on_resize: Option<Closure<dyn FnMut()>>,
    on_frame: FrameCallback,
}

impl StarfieldSurface {
    pub fn attach(seed: u64) -> Result<Self, SurfaceError> {
        let window = web_sys::window().ok_or(SurfaceError::Unavailable)?;
        let document = window.document().ok_or(SurfaceError::Unavailable)?;
        let body = document.body().ok_or(SurfaceError::Unavailable)?;

        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(dom_err)?
            .dyn_into()
            .map_err(|_| SurfaceError::Unavailable)?;
        canvas.set_id(CANVAS_ID);
        let style = canvas.style();
        for (name, value) in CANVAS_STYLE {
            style.set_property(name, value).map_err(dom_err)?;
        }
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(dom_err)?
            .ok_or(SurfaceError::Unavailable)?
            .dyn_into()
            .map_err(|_| SurfaceError::Unavailable)?;
        body.append_child(&canvas).map_err(dom_err)?;

        let (w, h) = viewport(&window);
        let scene = Rc::new(Scene {
            field: RefCell::new(Starfield::new(w, h, seed)),
            canvas,
            ctx,
            frames: RefCell::new(FrameLoop::new()),
        });
        scene.fit(&window);

        let mut surface = Self {
            window: window.clone(),
            scene: scene.clone(),
            on_resize: None,
            on_frame: Rc::new(RefCell::new(None)),
        };

        let resize_scene = scene.clone();
        let resize_window = window.clone();
        let on_resize = Closure::<dyn FnMut()>::new(move || resize_scene.fit(&resize_window));
        window
            .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            .map_err(dom_err)?;
        surface.on_resize = Some(on_resize);

        // The frame callback re-queues itself through the shared slot; the
        // slot is emptied on teardown, which also breaks the Rc cycle.
        let slot = surface.on_frame.clone();
        let frame_window = window.clone();
        let frame_scene = scene;
        *surface.on_frame.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
            if !frame_scene.frames.borrow_mut().begin_frame() {
                return;
            }
            frame_scene.draw();
            if let Some(cb) = slot.borrow().as_ref() {
                match frame_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => frame_scene.frames.borrow_mut().scheduled(id),
                    Err(err) => {
                        warn!("starfield stopped: {err:?}");
                        frame_scene.frames.borrow_mut().fail();
                    }
                }
            }
        }));

        if let Some(cb) = surface.on_frame.borrow().as_ref() {
            let id = window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(dom_err)?;
            surface.scene.frames.borrow_mut().scheduled(id);
        }
        Ok(surface)
    }

    pub fn is_running(&self) -> bool {
        self.scene.frames.borrow().is_running()
    }

    /// Stop the loop, drop the resize listener and remove the canvas.
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        let pending = self.scene.frames.borrow_mut().stop();
        if let Some(id) = pending {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Some(on_resize) = self.on_resize.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
        }
        self.on_frame.borrow_mut().take();
        self.scene.canvas.remove();
    }
}

impl Drop for StarfieldSurface {
    fn drop(&mut self) {
        self.teardown();
    }
}
