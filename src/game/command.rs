use strum_macros::Display;

use crate::{
    bitflags_with_display,
    log,
};

use super::{
    GameMode,
    company::{CompanyId, Owner},
    economy::{ExpenseType, Money},
    object::ObjectType,
    world::World,
};

// ----------------------------------------------
// DoCommandFlags
// ----------------------------------------------

bitflags_with_display! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct DoCommandFlags: u8 {
        // Apply the command. Without it the command only validates and reports its cost.
        const EXEC          = 1 << 0;
        // Implicit removal as part of building something else.
        const AUTO          = 1 << 1;
        // Removal that overrides ownership and autoremove restrictions.
        const FORCE_REMOVAL = 1 << 2;
    }
}

// ----------------------------------------------
// CommandContext
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CommandContext {
    pub actor: Owner,
    pub mode: GameMode,
    pub flags: DoCommandFlags,
}

impl CommandContext {
    #[inline]
    pub const fn new(actor: Owner, mode: GameMode, flags: DoCommandFlags) -> Self {
        Self { actor, mode, flags }
    }

    // Normal play command on behalf of a company.
    #[inline]
    pub const fn company(id: CompanyId, flags: DoCommandFlags) -> Self {
        Self::new(Owner::Company(id), GameMode::Normal, flags)
    }

    // Scenario editor command by the neutral actor.
    #[inline]
    pub const fn editor(flags: DoCommandFlags) -> Self {
        Self::new(Owner::None, GameMode::Editor, flags)
    }

    #[inline]
    pub fn is_exec(&self) -> bool {
        self.flags.contains(DoCommandFlags::EXEC)
    }

    #[inline]
    pub fn has(&self, flags: DoCommandFlags) -> bool {
        self.flags.contains(flags)
    }

    #[inline]
    pub fn with(self, flags: DoCommandFlags) -> Self {
        Self { flags: self.flags | flags, ..self }
    }

    #[inline]
    pub fn without(self, flags: DoCommandFlags) -> Self {
        Self { flags: self.flags - flags, ..self }
    }

    // Bypasses every ownership and autoremove check when clearing.
    #[inline]
    pub fn is_forced_removal(&self) -> bool {
        self.actor == Owner::Water || self.has(DoCommandFlags::FORCE_REMOVAL)
    }
}

// ----------------------------------------------
// CommandCost
// ----------------------------------------------

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandCost {
    expense: ExpenseType,
    cost: Money,
}

impl CommandCost {
    #[inline]
    pub const fn new(expense: ExpenseType) -> Self {
        Self { expense, cost: 0 }
    }

    #[inline]
    pub const fn with_cost(expense: ExpenseType, cost: Money) -> Self {
        Self { expense, cost }
    }

    #[inline]
    pub fn expense(&self) -> ExpenseType {
        self.expense
    }

    #[inline]
    pub fn cost(&self) -> Money {
        self.cost
    }

    #[inline]
    pub fn add_cost(&mut self, cost: Money) {
        self.cost += cost;
    }

    // Adds the cost of a nested command. The expense type of `self` is kept.
    #[inline]
    pub fn add(&mut self, other: CommandCost) {
        self.cost += other.cost;
    }

    #[inline]
    pub fn multiply(&mut self, factor: Money) {
        self.cost *= factor;
    }
}

// ----------------------------------------------
// CommandError
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum TerrainError {
    #[strum(to_string = "flat land required")]
    FlatLandRequired,
    #[strum(to_string = "must demolish bridge first")]
    BridgeInTheWay,
    #[strum(to_string = "water in the way")]
    WaterInTheWay,
    #[strum(to_string = "land sloped in wrong direction")]
    LandSlopedWrongDirection,
    #[strum(to_string = "outside of the map")]
    OutOfMap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandError {
    NotAvailable,
    RestrictedContext,
    TooManyObjects,
    NoTownYet,
    UnsuitableTerrain(TerrainError),
    AlreadyOwned,
    // Which kind of object blocks the removal.
    ObstructedByExisting(ObjectType),
    PermissionDenied,
    NotOwner,
    OutOfCapacity,
    GenericCommandFailure,
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::NotAvailable          => write!(f, "Object type is not available"),
            Self::RestrictedContext     => write!(f, "Not allowed in this game mode"),
            Self::TooManyObjects        => write!(f, "Too many objects"),
            Self::NoTownYet             => write!(f, "Must found a town first"),
            Self::UnsuitableTerrain(r)  => write!(f, "Unsuitable terrain: {r}"),
            Self::AlreadyOwned          => write!(f, "You already own it"),
            Self::ObstructedByExisting(ObjectType::Headquarters) => {
                write!(f, "Company headquarters in the way")
            }
            Self::ObstructedByExisting(ObjectType::Statue) => write!(f, "Statue already built"),
            Self::ObstructedByExisting(_) => write!(f, "Object in the way"),
            Self::PermissionDenied      => write!(f, "Can't demolish this"),
            Self::NotOwner              => write!(f, "Owned by another company"),
            Self::OutOfCapacity         => write!(f, "Object pool is full"),
            Self::GenericCommandFailure => write!(f, "Command failed"),
        }
    }
}

impl std::error::Error for CommandError {}

pub type CommandResult = Result<CommandCost, CommandError>;

// ----------------------------------------------
// execute_command
// ----------------------------------------------

// Runs `command` as a query first and, if that succeeds and `ctx` has EXEC,
// runs it again for real. A failing command never mutates the world.
pub fn execute_command<F>(world: &mut World, ctx: &CommandContext, mut command: F) -> CommandResult
    where F: FnMut(&mut World, &CommandContext) -> CommandResult
{
    let query_ctx = ctx.without(DoCommandFlags::EXEC);

    let query = match command(world, &query_ctx) {
        Ok(cost) => cost,
        Err(err) => {
            log::verbose!(log::channel!("command"), "Command by {} rejected: {err}", ctx.actor);
            return Err(err);
        }
    };

    if !ctx.is_exec() {
        return Ok(query);
    }

    let result = match command(world, ctx) {
        Ok(cost) => cost,
        Err(err) => panic!("Command by {} failed after a successful query: {err}", ctx.actor),
    };

    assert_eq!(query.cost(), result.cost(), "Command cost differs between query and execution!");
    Ok(result)
}
