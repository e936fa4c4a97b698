//! What an actor wants to do with its slot.

use umbra_core::Direction;

/// Presentation-layer menus the player can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Menu {
    /// Carried items.
    Inventory,
    /// Known spells.
    Spellbook,
    /// Look at a cell or actor.
    Inspect,
}

/// An action request, from player input or monster AI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Step one cell, or attack a hostile standing there.
    Move(Direction),
    /// Pass the turn.
    Wait,
    /// Pick up the item underfoot.
    PickUp,
    /// Use the stair underfoot.
    TakeStairs,
    /// Open a menu. Never consumes a turn.
    OpenMenu(Menu),
}
