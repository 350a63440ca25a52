#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    Walk,
    Sprint,
    Jump,
    Teleport,
    Shoot,
    Hit,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 6] = [
        SoundEffect::Walk,
        SoundEffect::Sprint,
        SoundEffect::Jump,
        SoundEffect::Teleport,
        SoundEffect::Shoot,
        SoundEffect::Hit,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Walk => "walk",
            SoundEffect::Sprint => "sprint",
            SoundEffect::Jump => "jump",
            SoundEffect::Teleport => "teleport",
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
        }
    }

    /// Loudness relative to the effects volume setting.
    pub fn volume_ratio(self) -> f32 {
        match self {
            SoundEffect::Walk | SoundEffect::Sprint | SoundEffect::Hit => 1.5,
            SoundEffect::Jump => 2.1,
            SoundEffect::Teleport => 1.0,
            SoundEffect::Shoot => 0.8,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Footsteps {
    #[default]
    Silent,
    Walk,
    Sprint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioEvent {
    Play(SoundEffect),
    Footsteps(Footsteps),
    StartMusic,
}

#[derive(Default)]
pub struct AudioEventQueue {
    pub events: Vec<AudioEvent>,
}

impl AudioEventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: AudioEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.push(AudioEvent::Play(effect));
    }

    pub fn drain(&mut self) -> Vec<AudioEvent> {
        self.events.drain(..).collect()
    }
}
