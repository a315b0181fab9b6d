use strum::{EnumCount, IntoEnumIterator};

use crate::{
    bitflags_with_display,
    config::Prices,
    game::{Date, economy::Money},
};

use super::ObjectType;

// ----------------------------------------------
// ObjectFlags
// ----------------------------------------------

bitflags_with_display! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct ObjectFlags: u16 {
        const HAS_NO_FOUNDATION = 1 << 0;
        const ALLOW_UNDER_BRIDGE = 1 << 1;
        // May be removed implicitly when something else is built over it.
        const AUTOREMOVE        = 1 << 2;
        // Removing it refunds money instead of costing.
        const CLEAR_INCOME      = 1 << 3;
        const ONLY_IN_SCENEDIT  = 1 << 4;
        const ONLY_IN_GAME      = 1 << 5;
        // Only created through the town authority action.
        const TOWN_ACTION_ONLY  = 1 << 6;
    }
}

// ----------------------------------------------
// ObjectSpec
// ----------------------------------------------

#[derive(Clone, Debug)]
pub struct ObjectSpec {
    pub name: &'static str,
    // Footprint packed as width in the low nibble, height in the high nibble.
    pub size: u8,
    pub flags: ObjectFlags,
    pub build_cost_multiplier: u8,
    pub clear_cost_multiplier: u8,
    pub introduction_date: Date,
    pub end_of_life_date: Option<Date>,
    pub enabled: bool,
}

impl ObjectSpec {
    const fn new(name: &'static str, size: u8, flags: ObjectFlags, build_cost_multiplier: u8, clear_cost_multiplier: u8) -> Self {
        Self {
            name,
            size,
            flags,
            build_cost_multiplier,
            clear_cost_multiplier,
            introduction_date: Date(0),
            end_of_life_date: None,
            enabled: true,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        (self.size & 0xF) as i32
    }

    #[inline]
    pub fn height(&self) -> i32 {
        (self.size >> 4) as i32
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn has_flags(&self, flags: ObjectFlags) -> bool {
        self.flags.contains(flags)
    }

    pub fn is_available(&self, date: Date) -> bool {
        self.enabled &&
        date >= self.introduction_date &&
        self.end_of_life_date.is_none_or(|end| date < end)
    }

    // Per tile costs.
    #[inline]
    pub fn build_cost(&self, prices: &Prices) -> Money {
        prices.build_object * self.build_cost_multiplier as Money
    }

    #[inline]
    pub fn clear_cost(&self, prices: &Prices) -> Money {
        prices.clear_object * self.clear_cost_multiplier as Money
    }
}

// ----------------------------------------------
// ObjectSpecs
// ----------------------------------------------

// The object type catalog, one spec per ObjectType.
#[derive(Clone, Debug)]
pub struct ObjectSpecs {
    specs: [ObjectSpec; ObjectType::COUNT],
}

impl Default for ObjectSpecs {
    fn default() -> Self {
        use ObjectFlags as F;
        Self {
            specs: [
                ObjectSpec::new("Transmitter", 0x11, F::ONLY_IN_SCENEDIT, 15, 2),
                ObjectSpec::new("Lighthouse",  0x11, F::ONLY_IN_SCENEDIT, 15, 2),
                ObjectSpec::new("Company Statue", 0x11, F::ONLY_IN_GAME.union(F::TOWN_ACTION_ONLY), 1, 2),
                ObjectSpec::new("Owned Land", 0x11,
                                F::AUTOREMOVE
                                    .union(F::ONLY_IN_GAME)
                                    .union(F::CLEAR_INCOME)
                                    .union(F::HAS_NO_FOUNDATION)
                                    .union(F::ALLOW_UNDER_BRIDGE),
                                10, 10),
                ObjectSpec::new("Company Headquarters", 0x22, F::ONLY_IN_GAME, 10, 2),
            ],
        }
    }
}

impl ObjectSpecs {
    #[inline]
    pub fn get(&self, object_type: ObjectType) -> &ObjectSpec {
        &self.specs[object_type as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, object_type: ObjectType) -> &mut ObjectSpec {
        &mut self.specs[object_type as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectType, &ObjectSpec)> {
        ObjectType::iter().map(|object_type| (object_type, self.get(object_type)))
    }
}
