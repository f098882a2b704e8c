//! Rejected commands.
//!
//! Breaking a game rule is not a failure: the command is dropped, the state is left alone and the
//! player is told why. The `Display` text of each variant is that notice.

use thiserror::Error;

use crate::room::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("A solid wall blocks the way {0}. Dead end.")]
    OutOfBounds(Direction),
    #[error("You can't leave while a monster bars the way.")]
    NotExploring,
    #[error("There is nothing here to fight.")]
    NotInCombat,
    #[error("The boss blocks every exit. There is no escape!")]
    BossBlocksEscape,
    #[error("Hold on, the last move is still playing out.")]
    Busy,
    #[error("The adventure is over. Reset to play again.")]
    GameFinished,
    #[error("'{0}' is not something you can do in a fight.")]
    UnknownAction(String),
}
