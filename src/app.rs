//! Windowed host: turns winit events into latch updates, drives the fixed-step
//! simulation and mirrors the HUD into the window title.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::audio::AudioSystem;
use crate::console::Console;
use crate::game::menu::{self, MenuAction, MenuState};
use crate::game::world::World;
use crate::game_loop::GameLoop;
use crate::input::InputLatch;
use crate::settings::Settings;

/// Reads console lines from stdin on a helper thread.
pub fn spawn_console_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub struct ArenaApp {
    window: Option<Arc<Window>>,
    world: World,
    settings: Settings,
    settings_path: PathBuf,
    input: InputLatch,
    menu: MenuState,
    console: Console,
    console_lines: Option<Receiver<String>>,
    game_loop: GameLoop,
    audio: Option<AudioSystem>,
    pointer_locked: bool,
    title: String,
}

impl ArenaApp {
    pub fn new(
        mut settings: Settings,
        settings_path: PathBuf,
        rng: StdRng,
        console_lines: Option<Receiver<String>>,
    ) -> Self {
        let world = World::new(&mut settings, rng);

        let audio = match AudioSystem::new(settings.bg_volume, settings.fx_volume) {
            Ok(mut audio) => {
                audio.load_all_sounds();
                Some(audio)
            }
            Err(e) => {
                warn!("{e}, continuing without sound");
                None
            }
        };

        Self {
            window: None,
            world,
            settings,
            settings_path,
            input: InputLatch::new(),
            menu: MenuState::new(),
            console: Console::new(),
            console_lines,
            game_loop: GameLoop::default(),
            audio,
            pointer_locked: false,
            title: String::new(),
        }
    }

    fn lock_pointer(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            warn!("pointer lock unavailable: {e}");
        }
        window.set_cursor_visible(false);

        self.pointer_locked = true;
        self.menu.pointer_locked();
        self.world.activate();
    }

    fn release_pointer(&mut self) {
        if let Some(window) = self.window.as_ref() {
            if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
                debug!("failed to release pointer: {e}");
            }
            window.set_cursor_visible(true);
        }
        self.pointer_locked = false;
        self.menu.pointer_released();
    }

    fn restart(&mut self) {
        self.world.reset(&mut self.settings);
        self.input.release_all();
        self.menu.restarted();
        self.game_loop.resync();
    }

    fn handle_menu_action(&mut self, action: MenuAction) {
        match action {
            MenuAction::LockPointer => self.lock_pointer(),
            MenuAction::Restart => self.restart(),
        }
    }

    fn handle_key(&mut self, code: KeyCode, state: ElementState) {
        if state == ElementState::Released {
            self.input.handle_key_release(code);
            return;
        }

        if code == KeyCode::Escape {
            self.release_pointer();
            return;
        }
        if let Some(action) = self.menu.handle_key(code) {
            self.handle_menu_action(action);
            return;
        }
        self.input.handle_key_press(code);
    }

    fn handle_click(&mut self) {
        match self.menu.handle_click() {
            Some(action) => self.handle_menu_action(action),
            None if self.pointer_locked => {
                if let Some(shot) = self.world.shoot() {
                    debug!("shot hit_enemy={} end={}", shot.hit_enemy, shot.beam_end);
                }
            }
            None => self.lock_pointer(),
        }
    }

    fn poll_console(&mut self) {
        let Some(lines) = self.console_lines.as_ref() else {
            return;
        };

        let mut pending = Vec::new();
        let mut disconnected = false;
        loop {
            match lines.try_recv() {
                Ok(line) => pending.push(line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if disconnected {
            debug!("console input closed");
            self.console_lines = None;
        }

        for line in pending {
            let Some(reply) = self.console.execute(&line, &mut self.world, &mut self.settings) else {
                continue;
            };
            println!("{}", reply.text);

            if reply.settings_changed {
                if let Some(audio) = self.audio.as_mut() {
                    audio.set_volumes(self.settings.bg_volume, self.settings.fx_volume);
                }
                if let Err(e) = self.settings.save(&self.settings_path) {
                    warn!("{e}");
                }
            }
            if !self.world.is_frozen() && matches!(self.menu.overlay, menu::Overlay::GameOver(_)) {
                self.menu.restarted();
            }
        }
    }

    fn step(&mut self) {
        self.poll_console();

        let world = &mut self.world;
        let input = &mut self.input;
        let mut ended = None;
        self.game_loop.tick(|dt| {
            if let Some(summary) = world.frame(dt, input) {
                ended = Some(summary);
            }
        });

        if let Some(summary) = ended {
            println!("{}", menu::game_over_text(&summary));
            self.release_pointer();
            self.menu.game_over(summary);
        }

        let events = self.world.audio.drain();
        if let Some(audio) = self.audio.as_mut() {
            for event in &events {
                audio.process_event(event);
            }
        }

        let title = menu::window_title(&self.world.hud_line(), &self.menu);
        if title != self.title {
            debug!("{title}");
            if let Some(window) = self.window.as_ref() {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for ArenaApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Arena")
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0));
        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let window = Arc::new(window);
                window.request_redraw();
                self.window = Some(window);
                self.game_loop.resync();
                info!("window created");
            }
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Focused(false) => {
                self.input.release_all();
                self.release_pointer();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(code, event.state);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.handle_click(),
            WindowEvent::RedrawRequested => {
                self.step();
                if let Some(window) = self.window.as_ref() {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if self.pointer_locked && self.menu.is_playing() {
                self.input.accumulate_mouse(dx as f32, dy as f32);
            }
        }
    }
}
