#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Screen flow between game-mode selection, hero selection, the world map
//! and battles.
//!
//! Screens never reach into each other. The system consumes explicit
//! [`ScreenCommand`] values and navigation [`Event`] values, and answers with
//! [`Transition`] values that the presentation layer acts upon.

use std::fmt;

use quiztasy_core::{AmbushId, Event, LevelId};
use tracing::{debug, info};

/// Playable heroes offered by the hero selection screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hero {
    /// The boy hero.
    Boy,
    /// The girl hero.
    Girl,
}

impl Hero {
    /// Asset token naming the hero.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Boy => "boy",
            Self::Girl => "girl",
        }
    }

    /// Relative path of the soundtrack played on the map for this hero.
    #[must_use]
    pub fn map_soundtrack(self) -> String {
        let token = self.token();
        format!("audio/ost/{token}/{token}_map_ost.mp3")
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Screens managed by the flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Game-mode picker, the root of the flow.
    GameModes,
    /// Hero selection shown before entering the map.
    HeroSelection,
    /// The navigable world map.
    Map,
    /// A battle started by a level or an ambush.
    Battle,
}

/// Result reported when a battle screen closes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleOutcome {
    /// The player won.
    Victory,
    /// The player lost.
    Defeat,
    /// The battle ended without a winner.
    Abandoned,
}

/// What started a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encounter {
    /// The quiz battle guarding a level.
    Level(LevelId),
    /// A random ambush on the road.
    Ambush(AmbushId),
}

/// Requests issued by user interface widgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Opens hero selection from the game-mode picker.
    OpenHeroSelection,
    /// Confirms the provided hero and enters the map.
    SelectHero(Hero),
    /// Back button pressed on the current screen.
    Back,
    /// The battle screen finished with the provided outcome.
    FinishBattle(BattleOutcome),
}

/// Screen changes the presentation layer must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Show the game-mode picker.
    ShowGameModes,
    /// Show hero selection.
    ShowHeroSelection,
    /// Show the map for the chosen hero.
    EnterMap {
        /// Hero that was confirmed.
        hero: Hero,
        /// Soundtrack to start on the map.
        soundtrack: String,
    },
    /// Leave the map for a battle.
    StartBattle {
        /// Cause of the battle.
        encounter: Encounter,
    },
    /// Return to the map after a battle.
    ResumeMap {
        /// How the battle ended.
        outcome: BattleOutcome,
    },
}

/// Pure system tracking the active screen.
#[derive(Debug)]
pub struct GameModes {
    screen: Screen,
    hero: Option<Hero>,
    encounter: Option<Encounter>,
}

impl GameModes {
    /// Screen currently shown.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Hero confirmed for the current map session, if any.
    #[must_use]
    pub fn hero(&self) -> Option<Hero> {
        self.hero
    }

    /// Battle currently in progress, if any.
    #[must_use]
    pub fn encounter(&self) -> Option<Encounter> {
        self.encounter
    }

    /// Applies user interface commands in order.
    pub fn handle_commands(&mut self, commands: &[ScreenCommand], out: &mut Vec<Transition>) {
        for command in commands {
            match (*command, self.screen) {
                (ScreenCommand::OpenHeroSelection, Screen::GameModes) => {
                    self.hero = None;
                    self.enter(Screen::HeroSelection);
                    out.push(Transition::ShowHeroSelection);
                }
                (ScreenCommand::SelectHero(hero), Screen::HeroSelection) => {
                    info!(%hero, "hero confirmed");
                    self.hero = Some(hero);
                    self.enter(Screen::Map);
                    out.push(Transition::EnterMap {
                        hero,
                        soundtrack: hero.map_soundtrack(),
                    });
                }
                (ScreenCommand::Back, Screen::HeroSelection | Screen::Map) => {
                    self.hero = None;
                    self.enter(Screen::GameModes);
                    out.push(Transition::ShowGameModes);
                }
                (ScreenCommand::FinishBattle(outcome), Screen::Battle) => {
                    info!(?outcome, encounter = ?self.encounter, "battle finished");
                    self.encounter = None;
                    self.enter(Screen::Map);
                    out.push(Transition::ResumeMap { outcome });
                }
                (command, screen) => {
                    debug!(?command, ?screen, "screen command ignored");
                }
            }
        }
    }

    /// Reacts to navigation events while the map is shown.
    ///
    /// An ambush in the batch takes precedence over a freshly completed level.
    pub fn handle_events(&mut self, events: &[Event], out: &mut Vec<Transition>) {
        if self.screen != Screen::Map {
            return;
        }

        let ambush = events.iter().find_map(|event| match event {
            Event::AmbushTriggered { ambush, .. } => Some(Encounter::Ambush(*ambush)),
            _ => None,
        });
        let level = events.iter().find_map(|event| match event {
            Event::LevelCompleted { level } => Some(Encounter::Level(*level)),
            _ => None,
        });

        if let Some(encounter) = ambush.or(level) {
            info!(?encounter, "battle starting");
            self.encounter = Some(encounter);
            self.enter(Screen::Battle);
            out.push(Transition::StartBattle { encounter });
        }
    }

    fn enter(&mut self, screen: Screen) {
        debug!(from = ?self.screen, to = ?screen, "screen changed");
        self.screen = screen;
    }
}

impl Default for GameModes {
    fn default() -> Self {
        Self {
            screen: Screen::GameModes,
            hero: None,
            encounter: None,
        }
    }
}
