use log::info;
use thiserror::Error;

use crate::game::world::World;
use crate::settings::{SettingKey, Settings};

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Help,
    Get(SettingKey),
    Set(SettingKey, String),
    /// Respawn the wave, optionally with a new enemy count.
    Respawn(Option<u32>),
    Restart,
    History,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConsoleError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Text reply plus whether the stored settings changed and need saving.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleReply {
    pub text: String,
    pub settings_changed: bool,
}

impl ConsoleReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            settings_changed: false,
        }
    }
}

pub struct Console {
    history: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Self { history: Vec::new() }
    }

    /// Parses one line. Blank lines yield `Ok(None)` and are not recorded.
    pub fn parse(&mut self, line: &str) -> Result<Option<ConsoleCommand>, ConsoleError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, args)) = parts.split_first() else {
            return Ok(None);
        };
        self.history.push(line.trim().to_string());

        let command = match (name, args) {
            ("help", []) => ConsoleCommand::Help,
            ("get", [key]) => ConsoleCommand::Get(parse_key(key)?),
            ("get", _) => return Err(ConsoleError::Usage("get <key>")),
            ("set", [key, value]) => ConsoleCommand::Set(parse_key(key)?, (*value).to_string()),
            ("set", _) => return Err(ConsoleError::Usage("set <key> <value>")),
            ("respawn", []) => ConsoleCommand::Respawn(None),
            ("respawn", [count]) => {
                let count = count.parse().map_err(|_| ConsoleError::InvalidValue {
                    key: SettingKey::Enemies.name(),
                    value: (*count).to_string(),
                })?;
                ConsoleCommand::Respawn(Some(count))
            }
            ("respawn", _) => return Err(ConsoleError::Usage("respawn [count]")),
            ("restart", []) => ConsoleCommand::Restart,
            ("history", []) => ConsoleCommand::History,
            _ => return Err(ConsoleError::UnknownCommand(name.to_string())),
        };
        Ok(Some(command))
    }

    /// Parses and runs a line, turning every failure into reply text.
    pub fn execute(&mut self, line: &str, world: &mut World, settings: &mut Settings) -> Option<ConsoleReply> {
        match self.parse(line) {
            Ok(Some(command)) => Some(run(command, &self.history, world, settings)),
            Ok(None) => None,
            Err(e) => Some(ConsoleReply::text(e.to_string())),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_key(name: &str) -> Result<SettingKey, ConsoleError> {
    SettingKey::parse(name).ok_or_else(|| ConsoleError::UnknownSetting(name.to_string()))
}

pub fn help_text() -> String {
    let keys: Vec<&str> = SettingKey::ALL.iter().map(|k| k.name()).collect();
    format!(
        "Commands: help, get <key>, set <key> <value>, respawn [count], restart, history. Keys: {}",
        keys.join(", ")
    )
}

/// Numbered history listing, oldest first.
pub fn history_text(history: &[String]) -> String {
    history
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{:>3}  {line}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run(command: ConsoleCommand, history: &[String], world: &mut World, settings: &mut Settings) -> ConsoleReply {
    match command {
        ConsoleCommand::Help => ConsoleReply::text(help_text()),
        ConsoleCommand::Get(key) => ConsoleReply::text(format!("{} = {}", key.name(), settings.get(key))),
        ConsoleCommand::Set(key, value) => {
            if !settings.set(key, &value) {
                return ConsoleReply::text(
                    ConsoleError::InvalidValue {
                        key: key.name(),
                        value,
                    }
                    .to_string(),
                );
            }
            match key {
                SettingKey::Enemies => {
                    world.respawn_all_enemies(settings);
                }
                SettingKey::Sensitivity | SettingKey::Fov => world.apply_settings(settings),
                SettingKey::BgVolume | SettingKey::FxVolume => {}
            }
            info!("setting {} changed to {}", key.name(), settings.get(key));
            ConsoleReply {
                text: format!("{} = {}", key.name(), settings.get(key)),
                settings_changed: true,
            }
        }
        ConsoleCommand::Respawn(count) => {
            if let Some(count) = count {
                settings.enemy_count = count;
            }
            let spawned = world.respawn_all_enemies(settings);
            ConsoleReply {
                text: format!("Spawned {spawned} enemies"),
                settings_changed: count.is_some(),
            }
        }
        ConsoleCommand::Restart => {
            world.reset(settings);
            ConsoleReply::text("Restarted")
        }
        ConsoleCommand::History => ConsoleReply::text(history_text(history)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn world() -> (World, Settings) {
        let mut settings = Settings::default();
        let world = World::new(&mut settings, StdRng::seed_from_u64(5));
        (world, settings)
    }

    #[rstest]
    #[case("help", ConsoleCommand::Help)]
    #[case("get fov", ConsoleCommand::Get(SettingKey::Fov))]
    #[case("  set bg_volume 0.2 ", ConsoleCommand::Set(SettingKey::BgVolume, "0.2".into()))]
    #[case("respawn", ConsoleCommand::Respawn(None))]
    #[case("respawn 7", ConsoleCommand::Respawn(Some(7)))]
    #[case("restart", ConsoleCommand::Restart)]
    #[case("history", ConsoleCommand::History)]
    fn parses_commands(#[case] line: &str, #[case] expected: ConsoleCommand) {
        assert_eq!(Console::new().parse(line), Ok(Some(expected)));
    }

    #[rstest]
    #[case("fly", ConsoleError::UnknownCommand("fly".into()))]
    #[case("get gamma", ConsoleError::UnknownSetting("gamma".into()))]
    #[case("set fov", ConsoleError::Usage("set <key> <value>"))]
    #[case("respawn lots", ConsoleError::InvalidValue { key: "enemies", value: "lots".into() })]
    fn rejects_bad_lines(#[case] line: &str, #[case] expected: ConsoleError) {
        assert_eq!(Console::new().parse(line), Err(expected));
    }

    #[test]
    fn blank_lines_are_not_recorded() {
        let mut console = Console::new();
        assert_eq!(console.parse("   "), Ok(None));
        console.parse("help").unwrap();
        assert_eq!(console.history, ["help"]);
    }

    #[test]
    fn history_lists_previous_lines_in_order() {
        let (mut world, mut settings) = world();
        let mut console = Console::new();
        console.execute("get fov", &mut world, &mut settings);
        console.execute("", &mut world, &mut settings);
        console.execute("fly", &mut world, &mut settings);

        let reply = console.execute("history", &mut world, &mut settings).unwrap();
        assert_eq!(reply.text, "  1  get fov\n  2  fly\n  3  history");
        assert!(!reply.settings_changed);
        assert_eq!(console.history.len(), 3);
    }

    #[test]
    fn set_enemies_respawns_clamped_wave() {
        let (mut world, mut settings) = world();
        let mut console = Console::new();

        let reply = console.execute("set enemies 25", &mut world, &mut settings).unwrap();
        assert!(reply.settings_changed);
        assert_eq!(reply.text, "enemies = 20");
        assert_eq!(world.enemies.len(), 20);
        assert_eq!(settings.enemy_count, 20);
    }

    #[test]
    fn invalid_value_leaves_settings_alone() {
        let (mut world, mut settings) = world();
        let mut console = Console::new();

        let reply = console.execute("set fov -5", &mut world, &mut settings).unwrap();
        assert!(!reply.settings_changed);
        assert_eq!(reply.text, "Invalid value for fov: -5");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn sensitivity_applies_to_camera() {
        let (mut world, mut settings) = world();
        let mut console = Console::new();

        console.execute("set sensitivity 500", &mut world, &mut settings);
        assert_eq!(world.camera.angular_sensibility, 500.0);
    }
}
