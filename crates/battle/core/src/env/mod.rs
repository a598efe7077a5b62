//! Traits describing the collaborator interfaces the engine consumes.
//!
//! Oracles expose map geometry, movement ranges, combat capability, ability
//! catalogs, and protection flags. The [`Env`] aggregate bundles them so the
//! decision engine can access everything it needs without hard coupling to
//! concrete implementations: tests plug in small stand-ins, the real game
//! plugs in its systems.
mod ability;
mod combat;
mod error;
mod map;
mod movement;
mod protection;

pub use ability::{AbilityDef, AbilityId, AbilityKind, AbilityOracle};
pub use combat::CombatOracle;
pub use error::OracleError;
pub use map::{MapDimensions, MapOracle};
pub use movement::MovementOracle;
pub use protection::ProtectionOracle;

/// Aggregates the read-only collaborator interfaces for one decision.
///
/// Every oracle is optional; accessors surface a missing oracle as an
/// [`OracleError`] so callers can degrade gracefully instead of unwrapping.
pub struct Env<'a, M, V, C, A, P>
where
    M: MapOracle + ?Sized,
    V: MovementOracle + ?Sized,
    C: CombatOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    P: ProtectionOracle + ?Sized,
{
    map: Option<&'a M>,
    movement: Option<&'a V>,
    combat: Option<&'a C>,
    abilities: Option<&'a A>,
    protection: Option<&'a P>,
}

// Manual impls: the fields are shared references, so the bundle is copyable
// even when the oracle types themselves are unsized trait objects.
impl<'a, M, V, C, A, P> Clone for Env<'a, M, V, C, A, P>
where
    M: MapOracle + ?Sized,
    V: MovementOracle + ?Sized,
    C: CombatOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    P: ProtectionOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, M, V, C, A, P> Copy for Env<'a, M, V, C, A, P>
where
    M: MapOracle + ?Sized,
    V: MovementOracle + ?Sized,
    C: CombatOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    P: ProtectionOracle + ?Sized,
{
}

/// The dyn-erased bundle the decision engine works with.
pub type BattleEnv<'a> = Env<
    'a,
    dyn MapOracle + 'a,
    dyn MovementOracle + 'a,
    dyn CombatOracle + 'a,
    dyn AbilityOracle + 'a,
    dyn ProtectionOracle + 'a,
>;

impl<'a, M, V, C, A, P> Env<'a, M, V, C, A, P>
where
    M: MapOracle + ?Sized,
    V: MovementOracle + ?Sized,
    C: CombatOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    P: ProtectionOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        movement: Option<&'a V>,
        combat: Option<&'a C>,
        abilities: Option<&'a A>,
        protection: Option<&'a P>,
    ) -> Self {
        Self {
            map,
            movement,
            combat,
            abilities,
            protection,
        }
    }

    pub fn with_all(
        map: &'a M,
        movement: &'a V,
        combat: &'a C,
        abilities: &'a A,
        protection: &'a P,
    ) -> Self {
        Self::new(
            Some(map),
            Some(movement),
            Some(combat),
            Some(abilities),
            Some(protection),
        )
    }

    pub fn empty() -> Self {
        Self {
            map: None,
            movement: None,
            combat: None,
            abilities: None,
            protection: None,
        }
    }

    /// Returns the map oracle, or an error if not available.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    /// Returns the movement oracle, or an error if not available.
    pub fn movement(&self) -> Result<&'a V, OracleError> {
        self.movement.ok_or(OracleError::MovementNotAvailable)
    }

    /// Returns the combat oracle, or an error if not available.
    pub fn combat(&self) -> Result<&'a C, OracleError> {
        self.combat.ok_or(OracleError::CombatNotAvailable)
    }

    /// Returns the ability oracle, or an error if not available.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilityNotAvailable)
    }

    /// Returns the protection oracle, or an error if not available.
    pub fn protection(&self) -> Result<&'a P, OracleError> {
        self.protection.ok_or(OracleError::ProtectionNotAvailable)
    }
}
