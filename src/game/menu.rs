use winit::keyboard::KeyCode;

use crate::game::game_state::GameSummary;

pub const CONTROLS_TEXT: &str = "WASD move | Shift sprint | Space jump | Q teleport | Click shoot | Esc release mouse";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// Shown before the first pointer lock and whenever the pointer is free.
    Instructions,
    Hidden,
    GameOver(GameSummary),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    LockPointer,
    Restart,
}

pub struct MenuState {
    pub overlay: Overlay,
}

impl MenuState {
    pub fn new() -> Self {
        Self {
            overlay: Overlay::Instructions,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.overlay == Overlay::Hidden
    }

    pub fn pointer_locked(&mut self) {
        if self.overlay == Overlay::Instructions {
            self.overlay = Overlay::Hidden;
        }
    }

    pub fn pointer_released(&mut self) {
        if self.overlay == Overlay::Hidden {
            self.overlay = Overlay::Instructions;
        }
    }

    pub fn game_over(&mut self, summary: GameSummary) {
        self.overlay = Overlay::GameOver(summary);
    }

    pub fn restarted(&mut self) {
        self.overlay = Overlay::Instructions;
    }

    /// Click on the overlay.
    pub fn handle_click(&self) -> Option<MenuAction> {
        match self.overlay {
            Overlay::Instructions => Some(MenuAction::LockPointer),
            Overlay::GameOver(_) => Some(MenuAction::Restart),
            Overlay::Hidden => None,
        }
    }

    pub fn handle_key(&self, key: KeyCode) -> Option<MenuAction> {
        match (self.overlay, key) {
            (Overlay::GameOver(_), KeyCode::Enter) => Some(MenuAction::Restart),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<String> {
        match self.overlay {
            Overlay::Instructions => Some(format!("Click to play. {CONTROLS_TEXT}")),
            Overlay::Hidden => None,
            Overlay::GameOver(summary) => Some(game_over_text(&summary)),
        }
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn game_over_text(summary: &GameSummary) -> String {
    format!(
        "Game Over! Score: {} | Accuracy: {:.1}% | Click or press Enter to restart",
        summary.score, summary.accuracy
    )
}

/// Window title: HUD line, plus the overlay text when one is showing.
pub fn window_title(hud: &str, menu: &MenuState) -> String {
    match menu.text() {
        Some(text) => format!("Arena | {hud} | {text}"),
        None => format!("Arena | {hud}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_follows_pointer_lock() {
        let mut menu = MenuState::new();
        assert_eq!(menu.handle_click(), Some(MenuAction::LockPointer));

        menu.pointer_locked();
        assert!(menu.is_playing());
        assert_eq!(menu.handle_click(), None);

        menu.pointer_released();
        assert_eq!(menu.overlay, Overlay::Instructions);
    }

    #[test]
    fn game_over_offers_restart() {
        let mut menu = MenuState::new();
        menu.pointer_locked();
        menu.game_over(GameSummary {
            score: 40,
            accuracy: 66.666,
        });

        menu.pointer_released();
        assert!(matches!(menu.overlay, Overlay::GameOver(_)));
        assert_eq!(menu.handle_key(KeyCode::Enter), Some(MenuAction::Restart));
        assert_eq!(menu.handle_click(), Some(MenuAction::Restart));
        assert_eq!(
            menu.text().unwrap(),
            "Game Over! Score: 40 | Accuracy: 66.7% | Click or press Enter to restart"
        );
    }

    #[test]
    fn title_hides_overlay_while_playing() {
        let mut menu = MenuState::new();
        menu.pointer_locked();
        assert_eq!(window_title("Score: 0 | Time Left: 60s", &menu), "Arena | Score: 0 | Time Left: 60s");
    }
}
