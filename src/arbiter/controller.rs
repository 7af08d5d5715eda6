//! Seat controllers: human input or a computer strategy.

use crate::ai::{BackgroundStrategy, RandomStrategy, SearchStrategy, Strategy};
use crate::core::{ControllerKind, GameRng, PlayerId};

/// Who decides a seat's turns.
pub enum Controller {
    /// Turns arrive through [`Arbiter::select`](super::Arbiter::select).
    Human,
    /// A strategy consulted synchronously when the seat is to act.
    Computer(Box<dyn Strategy>),
    /// A strategy run on a worker thread; the arbiter resumes when it reports.
    Background(BackgroundStrategy<Box<dyn Strategy>>),
}

impl Controller {
    /// Build the controller described by `kind` for `player`.
    pub fn from_kind(kind: ControllerKind, player: PlayerId, rng: GameRng) -> Self {
        match kind {
            ControllerKind::Human => Controller::Human,
            ControllerKind::Random => Controller::Computer(Box::new(RandomStrategy::new(player, rng))),
            ControllerKind::Search { ranking } => {
                Controller::Computer(Box::new(SearchStrategy::new(player, ranking, rng)))
            }
            ControllerKind::BackgroundSearch { ranking } => {
                let strategy: Box<dyn Strategy> = Box::new(SearchStrategy::new(player, ranking, rng));
                Controller::Background(BackgroundStrategy::new(strategy))
            }
        }
    }

    #[must_use]
    pub fn is_computer(&self) -> bool {
        !matches!(self, Controller::Human)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Controller::Human => "Human",
            Controller::Computer(strategy) => strategy.name(),
            Controller::Background(strategy) => strategy.name(),
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Controller").field(&self.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Ranking;

    #[test]
    fn test_from_kind() {
        let p = PlayerId::new(0);
        let rng = || GameRng::new(1);

        assert!(!Controller::from_kind(ControllerKind::Human, p, rng()).is_computer());
        assert_eq!(Controller::from_kind(ControllerKind::Random, p, rng()).name(), "Random");

        let search = Controller::from_kind(
            ControllerKind::Search {
                ranking: Ranking::Any,
            },
            p,
            rng(),
        );
        assert!(matches!(search, Controller::Computer(_)));

        let background = Controller::from_kind(
            ControllerKind::BackgroundSearch {
                ranking: Ranking::MoveDifference,
            },
            p,
            rng(),
        );
        assert!(matches!(background, Controller::Background(_)));
        assert_eq!(background.name(), "Search (MoveDifference) (background)");
    }
}
