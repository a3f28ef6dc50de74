//! Windowed front-end built on druid.

use crate::error::AppError;
use crate::input::{Flow, InputEvent};
use crate::math::Vec2;
use crate::render::{render_frame, Canvas, Rgba};
use crate::state::{ModeKind, SceneConfig, SceneState};
use druid::kurbo::{Circle, Line, Point, Rect};
use druid::widget::prelude::*;
use druid::{
    commands, AppLauncher, Color, Data, MouseButton, RenderContext, TimerToken, Widget, WindowDesc,
};
use log::info;

/// Scene widget: steps on a timer, paints the ray fan
pub struct OcclusionWidget {
    config: SceneConfig,
    timer: TimerToken,
}

impl OcclusionWidget {
    pub fn new(config: SceneConfig) -> Self {
        OcclusionWidget {
            config,
            timer: TimerToken::INVALID,
        }
    }

    fn dispatch(&self, ctx: &mut EventCtx, data: &mut SceneState, input: InputEvent) {
        if data.handle_event(input) == Flow::Quit {
            ctx.submit_command(commands::QUIT_APP);
        }
    }
}

fn key_input(key: &druid::keyboard_types::Key) -> Option<InputEvent> {
    use druid::keyboard_types::Key;
    match key {
        Key::Character(s) => match s.as_str() {
            "a" | "A" => Some(InputEvent::SelectMode(ModeKind::Automatic)),
            "d" | "D" => Some(InputEvent::SelectMode(ModeKind::Drag)),
            "q" | "Q" => Some(InputEvent::Quit),
            _ => None,
        },
        Key::Escape => Some(InputEvent::Quit),
        _ => None,
    }
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x, v.y)
}

fn to_color(c: Rgba) -> Color {
    Color::rgba8(c.r, c.g, c.b, c.a)
}

/// Canvas adapter over a piet render context
struct PietCanvas<'a, R> {
    rc: &'a mut R,
    area: Rect,
}

impl<R: RenderContext> Canvas for PietCanvas<'_, R> {
    fn clear(&mut self, color: Rgba) {
        self.rc.fill(self.area, &to_color(color));
    }

    fn draw_line(&mut self, p0: Vec2, p1: Vec2, color: Rgba) {
        self.rc
            .stroke(Line::new(to_point(p0), to_point(p1)), &to_color(color), 1.0);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        self.rc
            .fill(Circle::new(to_point(center), radius), &to_color(color));
    }

    // druid presents once paint returns
    fn present(&mut self) {}
}

impl Widget<SceneState> for OcclusionWidget {
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut SceneState, _env: &Env) {
        match event {
            Event::WindowConnected => {
                self.timer = ctx.request_timer(self.config.frame_interval);
                // Request focus to receive keyboard events
                ctx.request_focus();
            }
            Event::Timer(token) if *token == self.timer => {
                data.step(&self.config);
                ctx.request_paint();
                self.timer = ctx.request_timer(self.config.frame_interval);
            }
            Event::KeyDown(key_event) => {
                if let Some(input) = key_input(&key_event.key) {
                    self.dispatch(ctx, data, input);
                }
            }
            Event::MouseDown(mouse_event) if mouse_event.button == MouseButton::Left => {
                self.dispatch(ctx, data, InputEvent::PointerDown);
                ctx.set_active(true); // Capture mouse events
            }
            Event::MouseMove(mouse_event) => {
                let pos = Vec2::new(mouse_event.pos.x, mouse_event.pos.y);
                self.dispatch(ctx, data, InputEvent::PointerMove(pos));
            }
            Event::MouseUp(mouse_event) if mouse_event.button == MouseButton::Left => {
                self.dispatch(ctx, data, InputEvent::PointerUp);
                ctx.set_active(false);
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        _event: &LifeCycle,
        _data: &SceneState,
        _env: &Env,
    ) {
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &SceneState, data: &SceneState, _env: &Env) {
        if !old_data.same(data) {
            ctx.request_paint();
        }
    }

    fn layout(
        &mut self,
        _layout_ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &SceneState,
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    fn paint(&mut self, ctx: &mut PaintCtx, data: &SceneState, _env: &Env) {
        let area = ctx.size().to_rect();
        let mut canvas = PietCanvas {
            rc: &mut **ctx,
            area,
        };
        render_frame(data, &self.config, &mut canvas);
    }
}

/// Opens the window and runs until it is closed
pub fn run(config: &SceneConfig, initial_mode: ModeKind) -> Result<(), AppError> {
    info!(
        "Starting window front-end at {}x{}",
        config.width, config.height
    );
    let main_window = WindowDesc::new(OcclusionWidget::new(config.clone()))
        .title("2D Light Occlusion")
        .window_size((config.width, config.height));

    let initial_state = SceneState::with_mode(config, initial_mode);

    AppLauncher::with_window(main_window)
        .launch(initial_state)
        .map_err(|err| AppError::Window(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use druid::keyboard_types::Key;

    #[test]
    fn keys_map_to_scene_events() {
        assert_eq!(
            key_input(&Key::Character("a".into())),
            Some(InputEvent::SelectMode(ModeKind::Automatic))
        );
        assert_eq!(
            key_input(&Key::Character("D".into())),
            Some(InputEvent::SelectMode(ModeKind::Drag))
        );
        assert_eq!(key_input(&Key::Escape), Some(InputEvent::Quit));
        assert_eq!(key_input(&Key::Enter), None);
    }

    #[test]
    fn colours_keep_channels() {
        let color = to_color(Rgba::BLOCKER);
        assert_eq!(color.as_rgba8(), (0, 100, 255, 255));
    }
}
