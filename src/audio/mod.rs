pub mod events;

use events::{AudioEvent, Footsteps, SoundEffect};
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::{
        static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
        PlaybackState,
    },
    tween::Tween,
    Volume,
};
use log::{debug, warn};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::resource_path::find_sound;

const MUSIC: &str = "music";

pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<&'static str, StaticSoundData>,
    music: Option<StaticSoundHandle>,
    footsteps: Option<(Footsteps, StaticSoundHandle)>,
    bg_volume: f32,
    fx_volume: f32,
}

impl AudioSystem {
    pub fn new(bg_volume: f32, fx_volume: f32) -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| Error::AudioBackend(e.to_string()))?;

        Ok(Self {
            manager,
            sounds: HashMap::new(),
            music: None,
            footsteps: None,
            bg_volume,
            fx_volume,
        })
    }

    pub fn load_sound(&mut self, name: &'static str) -> Result<()> {
        let path = find_sound(name).ok_or_else(|| Error::SoundLoad {
            name: name.to_string(),
            message: "file not found".to_string(),
        })?;
        let sound_data = StaticSoundData::from_file(&path).map_err(|e| Error::SoundLoad {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        self.sounds.insert(name, sound_data);
        Ok(())
    }

    pub fn load_all_sounds(&mut self) {
        let names = std::iter::once(MUSIC).chain(SoundEffect::ALL.iter().map(|e| e.name()));
        for name in names {
            if let Err(e) = self.load_sound(name) {
                warn!("{e}");
            }
        }
    }

    fn start(&mut self, name: &str, volume: f32, looped: bool) -> Option<StaticSoundHandle> {
        let sound_data = self.sounds.get(name)?;

        let mut settings = StaticSoundSettings::default();
        settings.volume = Volume::Amplitude(volume as f64).into();
        if looped {
            settings = settings.loop_region(0.0..);
        }

        match self.manager.play(sound_data.clone().with_settings(settings)) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("failed to play {name}: {e:?}");
                None
            }
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let volume = effect.volume_ratio() * self.fx_volume;
        self.start(effect.name(), volume, false);
    }

    fn set_footsteps(&mut self, mode: Footsteps) {
        if self.footsteps.as_ref().map(|(current, _)| *current) == Some(mode) {
            return;
        }
        if let Some((_, mut handle)) = self.footsteps.take() {
            handle.stop(Tween::default());
        }

        let effect = match mode {
            Footsteps::Silent => return,
            Footsteps::Walk => SoundEffect::Walk,
            Footsteps::Sprint => SoundEffect::Sprint,
        };
        let volume = effect.volume_ratio() * self.fx_volume;
        if let Some(handle) = self.start(effect.name(), volume, true) {
            self.footsteps = Some((mode, handle));
        }
    }

    fn start_music(&mut self) {
        let playing = self
            .music
            .as_ref()
            .map_or(false, |h| h.state() == PlaybackState::Playing);
        if playing {
            debug!("background music already playing");
            return;
        }
        self.music = self.start(MUSIC, self.bg_volume, true);
    }

    pub fn set_volumes(&mut self, bg_volume: f32, fx_volume: f32) {
        self.bg_volume = bg_volume;
        self.fx_volume = fx_volume;

        if let Some(music) = self.music.as_mut() {
            music.set_volume(Volume::Amplitude(bg_volume as f64), Tween::default());
        }
        if let Some((mode, handle)) = self.footsteps.as_mut() {
            let ratio = match mode {
                Footsteps::Sprint => SoundEffect::Sprint.volume_ratio(),
                _ => SoundEffect::Walk.volume_ratio(),
            };
            handle.set_volume(Volume::Amplitude((ratio * fx_volume) as f64), Tween::default());
        }
    }

    pub fn process_event(&mut self, event: &AudioEvent) {
        match *event {
            AudioEvent::Play(effect) => self.play(effect),
            AudioEvent::Footsteps(mode) => self.set_footsteps(mode),
            AudioEvent::StartMusic => self.start_music(),
        }
    }
}
