use std::cell::{Cell, RefCell};
use std::f32::consts::TAU;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, KeyboardEvent, MouseEvent, WebGl2RenderingContext as GL,
    WebGlProgram, WebGlShader, WebGlUniformLocation, WebGlVertexArrayObject, WheelEvent,
};

use super::overlay::Overlay;
use crate::app::{App, EventQueue, UiEvent};
use crate::scene::{PostEffect, SceneFrame};

const VERT: &str = r#"#version 300 es
layout(location = 0) in vec3 a_pos;
uniform mat4 u_mvp;
uniform float u_size;
void main() {
    gl_Position = u_mvp * vec4(a_pos, 1.0);
    // Perspective-sized points so far stars read smaller.
    gl_PointSize = u_size / max(gl_Position.w * 0.05, 1.0);
}
"#;

const FRAG: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_color;
uniform float u_points;
out vec4 out_color;
void main() {
    float a = u_color.a;
    if (u_points > 0.5) {
        float d = length(gl_PointCoord - vec2(0.5));
        if (d > 0.5) discard;
        a *= 1.0 - smoothstep(0.2, 0.5, d);
    }
    out_color = vec4(u_color.rgb * a, a);
}
"#;

/// Start the render loop, input listeners and resize handling.
pub fn start(
    canvas: HtmlCanvasElement,
    app: Rc<RefCell<App>>,
    overlay: Overlay,
) -> Result<(), JsValue> {
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let queue = app.borrow().queue();
    let renderer = {
        let app = app.borrow();
        let frame = app.scene_frame();
        Renderer::new(gl, &frame)?
    };

    // Resize canvas to fit window
    let resize = {
        let canvas = canvas.clone();
        let queue = queue.clone();
        move || {
            if let Err(e) = fit_canvas(&canvas, &queue) {
                log::warn!("resize failed: {e:?}");
            }
        }
    };
    resize();
    let resize_closure = Closure::wrap(Box::new(resize) as Box<dyn FnMut()>);
    window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    attach_input(&canvas, &queue)?;

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let mut overlay = overlay;
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        {
            let mut app = app.borrow_mut();
            match app.frame(now_ms) {
                Ok(_) => {
                    renderer.draw(&canvas, &app);
                    if let Err(e) = overlay.sync(&app) {
                        log::warn!("overlay update failed: {e:?}");
                    }
                }
                Err(err) => log::warn!("frame skipped: {err}"),
            }
        }

        // schedule next
        if let Err(e) = request_frame(&f) {
            log::error!("could not schedule next frame: {e:?}");
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)?;
    Ok(())
}

fn request_frame(f: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) -> Result<(), JsValue> {
    let slot = f.borrow();
    let closure = slot.as_ref().ok_or("frame closure missing")?;
    window()
        .ok_or("no window")?
        .request_animation_frame(closure.as_ref().unchecked_ref())?;
    Ok(())
}

fn fit_canvas(canvas: &HtmlCanvasElement, queue: &EventQueue) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let w = window.inner_width()?.as_f64().unwrap_or(1.0);
    let h = window.inner_height()?.as_f64().unwrap_or(1.0);
    let dpr = window.device_pixel_ratio().clamp(1.0, 2.0);
    canvas.set_width((w * dpr) as u32);
    canvas.set_height((h * dpr) as u32);
    queue.borrow_mut().push_back(UiEvent::Resize {
        width: w as f32,
        height: h as f32,
    });
    Ok(())
}

/// Drag to orbit, wheel to zoom, Escape to dismiss. Handlers only enqueue.
fn attach_input(canvas: &HtmlCanvasElement, queue: &EventQueue) -> Result<(), JsValue> {
    let last: Rc<Cell<Option<(f32, f32)>>> = Rc::new(Cell::new(None));

    {
        let last = last.clone();
        let down = Closure::wrap(Box::new(move |e: MouseEvent| {
            last.set(Some((e.client_x() as f32, e.client_y() as f32)));
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref())?;
        down.forget();
    }
    {
        let last = last.clone();
        let queue = queue.clone();
        let moved = Closure::wrap(Box::new(move |e: MouseEvent| {
            if let Some((x, y)) = last.get() {
                let (nx, ny) = (e.client_x() as f32, e.client_y() as f32);
                last.set(Some((nx, ny)));
                queue.borrow_mut().push_back(UiEvent::Drag {
                    dx: nx - x,
                    dy: ny - y,
                });
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref())?;
        moved.forget();
    }
    for name in ["pointerup", "pointerleave", "pointercancel"] {
        let last = last.clone();
        let up = Closure::wrap(Box::new(move |_: MouseEvent| last.set(None)) as Box<dyn FnMut(MouseEvent)>);
        canvas.add_event_listener_with_callback(name, up.as_ref().unchecked_ref())?;
        up.forget();
    }
    {
        let queue = queue.clone();
        let wheel = Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            let notches = (e.delta_y() / 100.0).clamp(-3.0, 3.0) as f32;
            queue.borrow_mut().push_back(UiEvent::Wheel(notches));
        }) as Box<dyn FnMut(WheelEvent)>);
        canvas.add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())?;
        wheel.forget();
    }
    {
        let queue = queue.clone();
        let key = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                queue.borrow_mut().push_back(UiEvent::Escape);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        window()
            .ok_or("no window")?
            .add_event_listener_with_callback("keydown", key.as_ref().unchecked_ref())?;
        key.forget();
    }
    Ok(())
}

struct Mesh {
    vao: WebGlVertexArrayObject,
    count: i32,
    mode: u32,
}

/// How the fixed post stack maps onto this renderer's passes.
#[derive(Debug, Clone, Copy)]
struct PostParams {
    glow: f32,
    focus: f32,
}

impl PostParams {
    fn from_stack(stack: &[PostEffect]) -> Self {
        let mut params = PostParams { glow: 0.0, focus: 0.0 };
        for effect in stack {
            match *effect {
                PostEffect::Bloom { intensity, .. } => params.glow = intensity,
                PostEffect::DepthOfField { focus_distance, .. } => params.focus = focus_distance,
                // Grain and vignette are CSS layers in the overlay.
                PostEffect::Noise { .. } | PostEffect::Vignette { .. } => {}
            }
        }
        params
    }
}

struct Uniforms {
    mvp: WebGlUniformLocation,
    color: WebGlUniformLocation,
    size: WebGlUniformLocation,
    points: WebGlUniformLocation,
}

struct Renderer {
    gl: GL,
    program: WebGlProgram,
    uniforms: Uniforms,
    stars: Mesh,
    sparkles: Mesh,
    sparkle_buffer: web_sys::WebGlBuffer,
    ring: Mesh,
    gem: Mesh,
    glow: Mesh,
    ground: Mesh,
    post: PostParams,
}

impl Renderer {
    fn new(gl: GL, frame: &SceneFrame<'_>) -> Result<Self, JsValue> {
        let vs = compile_shader(&gl, GL::VERTEX_SHADER, VERT)?;
        let fs = compile_shader(&gl, GL::FRAGMENT_SHADER, FRAG)?;
        let program = link_program(&gl, &vs, &fs)?;
        let uniform = |name: &str| {
            gl.get_uniform_location(&program, name)
                .ok_or_else(|| JsValue::from_str(&format!("uniform {name} missing")))
        };
        let uniforms = Uniforms {
            mvp: uniform("u_mvp")?,
            color: uniform("u_color")?,
            size: uniform("u_size")?,
            points: uniform("u_points")?,
        };

        let star_points: Vec<f32> = frame.stars.iter().flat_map(|v| v.to_array()).collect();
        let stars = upload(&gl, &star_points, GL::POINTS, GL::STATIC_DRAW)?.0;
        let sparkle_points: Vec<f32> = frame.sparkles.iter().flat_map(|v| v.to_array()).collect();
        let (sparkles, sparkle_buffer) = upload(&gl, &sparkle_points, GL::POINTS, GL::DYNAMIC_DRAW)?;
        let ring = upload(&gl, &ring_lines(), GL::LINES, GL::STATIC_DRAW)?.0;
        let gem = upload(&gl, &octahedron_lines(0.35), GL::LINES, GL::STATIC_DRAW)?.0;
        let glow = upload(&gl, &[0.0, 0.0, 0.0], GL::POINTS, GL::STATIC_DRAW)?.0;
        let ground = upload(&gl, &grid_lines(20.0, 20), GL::LINES, GL::STATIC_DRAW)?.0;

        log::info!("post stack: {:?}", frame.post);

        Ok(Self {
            post: PostParams::from_stack(&frame.post),
            gl,
            program,
            uniforms,
            stars,
            sparkles,
            sparkle_buffer,
            ring,
            gem,
            glow,
            ground,
        })
    }

    fn draw(&self, canvas: &HtmlCanvasElement, app: &App) {
        let gl = &self.gl;
        let frame = app.scene_frame();
        let view_proj = app.camera().view_proj();
        let eye = app.camera().eye();

        gl.viewport(0, 0, canvas.width() as i32, canvas.height() as i32);
        let bg = frame.background;
        gl.clear_color(bg.x, bg.y, bg.z, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        gl.enable(GL::BLEND);
        // Additive blending gives the bloom-like glow on overlapping lines.
        gl.blend_func(GL::ONE, GL::ONE);
        gl.use_program(Some(&self.program));

        // Far stars fade; the focus distance keeps the portals crisp.
        let star_alpha = 0.8 - self.post.focus * 4.0;
        self.draw_mesh(&self.stars, view_proj, frame.star_color, star_alpha, 6.0);

        let sparkle_points: Vec<f32> = frame.sparkles.iter().flat_map(|v| v.to_array()).collect();
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.sparkle_buffer));
        let data = js_sys::Float32Array::from(sparkle_points.as_slice());
        gl.buffer_sub_data_with_i32_and_array_buffer_view(GL::ARRAY_BUFFER, 0, &data);
        self.draw_mesh(&self.sparkles, view_proj, frame.accent_light.color, 0.6, 18.0);

        let ground = Mat4::from_translation(Vec3::new(0.0, frame.ground_height, 0.0));
        let ground_lit = frame.ground_color + Vec3::splat(frame.ambient * 0.3);
        self.draw_mesh(&self.ground, view_proj * ground, ground_lit, 0.5, 1.0);

        let light = frame.key_light;
        for portal in &frame.portals {
            let origin = portal.ring.transform_point3(Vec3::ZERO);
            let to_light = (light.position - origin).normalize_or_zero();
            let to_eye = (eye - origin).normalize_or_zero();
            let shade = frame.ambient + to_light.dot(to_eye).max(0.0) * 0.5 * light.intensity;
            let boost = if portal.hovered { 1.3 } else { 1.0 };
            let color = portal.color * shade.min(1.5) * boost;

            self.draw_mesh(&self.ring, view_proj * portal.ring, color, 1.0, 1.0);
            self.draw_mesh(&self.gem, view_proj * portal.gem, color, 1.0, 1.0);
            let glow_size = 90.0 * self.post.glow * boost;
            self.draw_mesh(&self.glow, view_proj * portal.gem, portal.color, 0.35, glow_size);
        }
    }

    fn draw_mesh(&self, mesh: &Mesh, mvp: Mat4, color: Vec3, alpha: f32, size: f32) {
        let gl = &self.gl;
        let u = &self.uniforms;
        gl.uniform_matrix4fv_with_f32_array(Some(&u.mvp), false, &mvp.to_cols_array());
        gl.uniform4f(Some(&u.color), color.x, color.y, color.z, alpha.clamp(0.0, 1.0));
        gl.uniform1f(Some(&u.size), size);
        gl.uniform1f(Some(&u.points), if mesh.mode == GL::POINTS { 1.0 } else { 0.0 });
        gl.bind_vertex_array(Some(&mesh.vao));
        gl.draw_arrays(mesh.mode, 0, mesh.count);
        gl.bind_vertex_array(None);
    }
}

fn upload(gl: &GL, data: &[f32], mode: u32, usage: u32) -> Result<(Mesh, web_sys::WebGlBuffer), JsValue> {
    let vao = gl.create_vertex_array().ok_or("failed to create vertex array")?;
    let buffer = gl.create_buffer().ok_or("failed to create buffer")?;
    gl.bind_vertex_array(Some(&vao));
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let array = js_sys::Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, usage);
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, GL::FLOAT, false, 0, 0);
    gl.bind_vertex_array(None);
    let mesh = Mesh {
        vao,
        count: (data.len() / 3) as i32,
        mode,
    };
    Ok((mesh, buffer))
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("unable to create shader")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let info = gl.get_shader_info_log(&shader).unwrap_or_default();
        Err(JsValue::from_str(&format!("shader compile failed: {info}")))
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl.create_program().ok_or("unable to create program")?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let info = gl.get_program_info_log(&program).unwrap_or_default();
        Err(JsValue::from_str(&format!("program link failed: {info}")))
    }
}

/// Torus stand-in: three concentric circles in the XY plane, as line pairs.
fn ring_lines() -> Vec<f32> {
    const SEGMENTS: usize = 96;
    let mut out = Vec::with_capacity(3 * SEGMENTS * 6);
    for radius in [0.94_f32, 1.0, 1.06] {
        for i in 0..SEGMENTS {
            let a0 = i as f32 / SEGMENTS as f32 * TAU;
            let a1 = (i + 1) as f32 / SEGMENTS as f32 * TAU;
            out.extend_from_slice(&[a0.cos() * radius, a0.sin() * radius, 0.0]);
            out.extend_from_slice(&[a1.cos() * radius, a1.sin() * radius, 0.0]);
        }
    }
    out
}

fn octahedron_lines(r: f32) -> Vec<f32> {
    let tips = [Vec3::Y * r * 1.4, -Vec3::Y * r * 1.4];
    let belt = [Vec3::X * r, Vec3::Z * r, -Vec3::X * r, -Vec3::Z * r];
    let mut out = Vec::with_capacity(12 * 6);
    for i in 0..belt.len() {
        let next = belt[(i + 1) % belt.len()];
        for (a, b) in [(belt[i], next), (belt[i], tips[0]), (belt[i], tips[1])] {
            out.extend_from_slice(&a.to_array());
            out.extend_from_slice(&b.to_array());
        }
    }
    out
}

fn grid_lines(size: f32, divisions: usize) -> Vec<f32> {
    let half = size / 2.0;
    let step = size / divisions as f32;
    let mut out = Vec::with_capacity((divisions + 1) * 12);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        out.extend_from_slice(&[-half, 0.0, k, half, 0.0, k]);
        out.extend_from_slice(&[k, 0.0, -half, k, 0.0, half]);
    }
    out
}
